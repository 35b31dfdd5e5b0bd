//! Error types for EduTalks
//!
//! This module provides the error type shared by the model, resolver and
//! session layers: validation failures, lookups that miss, duplicate slugs
//! and persistence errors.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for EduTalks domain code
#[derive(Debug, Error)]
pub enum PortalError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// General validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// A single field of a tab/section form failed validation
    #[error("Invalid {field}: {message}")]
    FieldValidation { field: String, message: String },

    /// Slug is not URL-safe
    #[error("Invalid slug '{0}': use lowercase letters, digits and single hyphens")]
    InvalidSlug(String),

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    /// Tab not found in the current tree
    #[error("Tab not found: {0}")]
    TabNotFound(String),

    /// Section not found in the current tree
    #[error("Section not found: {0}")]
    SectionNotFound(String),

    // ========================================================================
    // Duplicate Errors
    // ========================================================================
    /// Tab slug already used by another tab
    #[error("Duplicate tab slug: '{0}' already exists")]
    DuplicateTabSlug(String),

    /// Section slug already used inside the same tab
    #[error("Duplicate section slug: '{section}' already exists in tab '{tab}'")]
    DuplicateSectionSlug { tab: String, section: String },

    // ========================================================================
    // Payload Errors
    // ========================================================================
    /// Server payload did not have the expected shape
    #[error("Unexpected payload: {0}")]
    Payload(String),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Operation cancelled by user
    #[error("Operation cancelled")]
    Cancelled,
}

impl PortalError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        PortalError::Validation(msg.into())
    }

    /// Create a field validation error
    pub fn field_validation(field: impl Into<String>, msg: impl Into<String>) -> Self {
        PortalError::FieldValidation {
            field: field.into(),
            message: msg.into(),
        }
    }

    /// Create a payload error
    pub fn payload(msg: impl Into<String>) -> Self {
        PortalError::Payload(msg.into())
    }

    /// Check if this error is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PortalError::Validation(_)
                | PortalError::FieldValidation { .. }
                | PortalError::InvalidSlug(_)
                | PortalError::DuplicateTabSlug(_)
                | PortalError::DuplicateSectionSlug { .. }
        )
    }

    /// Check if this error is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PortalError::TabNotFound(_) | PortalError::SectionNotFound(_)
        )
    }

    /// Check if this error is an IO error
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            PortalError::Io(_) | PortalError::FileRead { .. } | PortalError::FileWrite { .. }
        )
    }
}

/// Result type alias using PortalError
pub type PortalResult<T> = Result<T, PortalError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_validation_error() {
        let err = PortalError::validation("Title is required");
        assert!(err.is_validation());
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "Validation error: Title is required");
    }

    #[test]
    fn test_field_validation_error() {
        let err = PortalError::field_validation("slug", "must not be empty");
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Invalid slug: must not be empty");
    }

    #[test]
    fn test_duplicate_slug_errors() {
        let err = PortalError::DuplicateTabSlug("legal".to_string());
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Duplicate tab slug: 'legal' already exists"
        );

        let err = PortalError::DuplicateSectionSlug {
            tab: "legal".to_string(),
            section: "contracts".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Duplicate section slug: 'contracts' already exists in tab 'legal'"
        );
    }

    #[test]
    fn test_not_found_errors() {
        let err = PortalError::SectionNotFound("12".to_string());
        assert!(err.is_not_found());
        assert!(!err.is_validation());
        assert_eq!(err.to_string(), "Section not found: 12");
    }

    #[test]
    fn test_io_error_classification() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PortalError = io_err.into();
        assert!(err.is_io());
    }
}
