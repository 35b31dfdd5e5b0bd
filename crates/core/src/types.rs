//! Core types used throughout EduTalks
//!
//! Server-assigned identifiers, URL-safe slugs, display positions and the
//! session role capability.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::{PortalError, PortalResult};

// ============================================================================
// Unique Identifiers
// ============================================================================

macro_rules! server_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Raw numeric value as assigned by the server
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl FromStr for $name {
            type Err = PortalError;

            fn from_str(s: &str) -> PortalResult<Self> {
                s.trim().parse::<i64>().map(Self).map_err(|_| {
                    PortalError::validation(format!(
                        "'{}' is not a valid {}",
                        s,
                        stringify!($name)
                    ))
                })
            }
        }
    };
}

server_id!(
    /// Identifier of a tab
    TabId
);
server_id!(
    /// Identifier of a section
    SectionId
);
server_id!(
    /// Identifier of a file
    FileId
);

/// Display order among siblings. Lower values are shown first.
pub type Position = i32;

// ============================================================================
// Slug
// ============================================================================

static SLUG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug pattern is a valid regex")
});

/// URL-safe identifier for a tab or section
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Create a slug, rejecting anything that is not lowercase kebab-case
    pub fn new(value: impl Into<String>) -> PortalResult<Self> {
        let value = value.into();
        if Self::is_valid(&value) {
            Ok(Self(value))
        } else {
            Err(PortalError::InvalidSlug(value))
        }
    }

    /// Wrap a server-provided slug without validating it.
    ///
    /// The server is the authority on stored slugs; the client only
    /// validates what it submits.
    pub fn from_server(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Check whether a string is a valid slug
    pub fn is_valid(value: &str) -> bool {
        SLUG_PATTERN.is_match(value)
    }

    /// Borrow the slug text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Route path for this slug (`/{slug}`)
    pub fn to_path(&self) -> String {
        format!("/{}", self.0)
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Slug {
    type Err = PortalError;

    fn from_str(s: &str) -> PortalResult<Self> {
        Self::new(s)
    }
}

// ============================================================================
// Role
// ============================================================================

/// Capability attached to the current session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Platform administrator; unlocks `/admin/tabs`
    Admin,
    /// Any other authenticated role, kept verbatim
    Member(String),
    /// No session
    #[default]
    Anonymous,
}

impl Role {
    /// Whether the role grants the administrative capability
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Wire representation of the role
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Member(name) => name.as_str(),
            Role::Anonymous => "",
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            Role::Anonymous
        } else if trimmed == "admin" {
            Role::Admin
        } else {
            Role::Member(trimmed.to_string())
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Role::from(value.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Anonymous => f.write_str("anonymous"),
            other => f.write_str(other.as_str()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_id_display_and_parse() {
        let id = TabId(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!("42".parse::<TabId>().unwrap(), id);
        assert!("forty-two".parse::<SectionId>().is_err());
    }

    #[test]
    fn test_id_serde_transparent() {
        let json = serde_json::to_string(&FileId(7)).unwrap();
        assert_eq!(json, "7");
        let back: FileId = serde_json::from_str("7").unwrap();
        assert_eq!(back, FileId(7));
    }

    #[test]
    fn test_slug_validation() {
        assert!(Slug::is_valid("legal"));
        assert!(Slug::is_valid("exam-papers-2024"));
        assert!(!Slug::is_valid(""));
        assert!(!Slug::is_valid("Legal"));
        assert!(!Slug::is_valid("legal--docs"));
        assert!(!Slug::is_valid("-legal"));
        assert!(!Slug::is_valid("legal docs"));
        assert!(Slug::new("bad slug").unwrap_err().is_validation());
    }

    #[test]
    fn test_slug_path() {
        let slug = Slug::new("legal").unwrap();
        assert_eq!(slug.to_path(), "/legal");
    }

    #[test]
    fn test_server_slug_is_not_validated() {
        let slug = Slug::from_server("Legacy_Slug");
        assert_eq!(slug.as_str(), "Legacy_Slug");
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!(Role::from("admin"), Role::Admin);
        assert_eq!(Role::from("teacher"), Role::Member("teacher".to_string()));
        assert_eq!(Role::from(""), Role::Anonymous);
        assert!(Role::Admin.is_admin());
        assert!(!Role::from("Admin").is_admin());
    }

    #[test]
    fn test_role_serde() {
        let json = serde_json::to_string(&Role::Admin).unwrap();
        assert_eq!(json, "\"admin\"");
        let role: Role = serde_json::from_str("\"student\"").unwrap();
        assert_eq!(role, Role::Member("student".to_string()));
    }
}
