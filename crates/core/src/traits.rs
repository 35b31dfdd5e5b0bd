//! Core traits for EduTalks
//!
//! Behaviour shared by tabs, sections and persisted client state:
//! validation, ordering, activity, identity and JSON persistence.

use std::io::Write;
use std::path::Path;

use crate::error::{PortalError, PortalResult};
use crate::types::Position;
use serde::{Serialize, de::DeserializeOwned};
use tempfile::NamedTempFile;

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can be validated
///
/// # Example
///
/// ```rust,ignore
/// use edutalks_core::{Validatable, PortalResult, PortalError};
///
/// struct TabForm {
///     title: String,
/// }
///
/// impl Validatable for TabForm {
///     fn validate(&self) -> PortalResult<()> {
///         if self.title.trim().is_empty() {
///             return Err(PortalError::field_validation("title", "is required"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validatable {
    /// Validate the current state of the object
    fn validate(&self) -> PortalResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Get all validation errors (for types that can have multiple errors)
    fn validation_errors(&self) -> Vec<String> {
        match self.validate() {
            Ok(()) => vec![],
            Err(e) => vec![e.to_string()],
        }
    }
}

// ============================================================================
// Ordering and activity
// ============================================================================

/// Items displayed in server-defined order among their siblings
pub trait Ordered {
    /// Display position
    fn position(&self) -> Position;
}

/// Items that can be hidden from end users without being deleted
pub trait Activatable {
    /// Whether the item is visible to end users
    fn is_active(&self) -> bool;
}

/// Next free position after the given siblings: `max + 1`, or `1` when empty.
///
/// Two admins computing this concurrently can collide; the server does not
/// sequence positions atomically.
pub fn next_position<'a, T, I>(siblings: I) -> Position
where
    T: Ordered + 'a,
    I: IntoIterator<Item = &'a T>,
{
    siblings
        .into_iter()
        .map(Ordered::position)
        .max()
        .map_or(1, |max| max.saturating_add(1))
}

// ============================================================================
// Identity
// ============================================================================

/// Trait for types with a server-assigned identifier
pub trait Identifiable {
    /// Identifier type
    type Id: Copy + Eq;

    /// Get the identifier
    fn id(&self) -> Self::Id;

    /// Check if this object has the given identifier
    fn matches_id(&self, id: Self::Id) -> bool {
        self.id() == id
    }
}

// ============================================================================
// Persistable Trait
// ============================================================================

/// Trait for client state that is stored as a JSON file
///
/// ```rust,ignore
/// impl Persistable for Session {}
///
/// session.save_to_file(&path)?;
/// let restored = Session::load_from_file(&path)?;
/// ```
pub trait Persistable: Serialize + DeserializeOwned + Sized {
    /// Serialize to a pretty JSON string
    fn to_json(&self) -> PortalResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from a JSON string
    fn from_json(json: &str) -> PortalResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Save to a file, creating parent directories as needed.
    ///
    /// The JSON is written to a temporary file next to `path` and renamed
    /// over it, so readers see either the old contents or the new ones.
    fn save_to_file(&self, path: &Path) -> PortalResult<()> {
        let json = self.to_json()?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let write_err = |e: std::io::Error| PortalError::FileWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        };

        if !dir.exists() {
            std::fs::create_dir_all(dir).map_err(|e| PortalError::FileWrite {
                path: dir.to_path_buf(),
                message: e.to_string(),
            })?;
        }

        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(json.as_bytes()).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(path).map_err(|e| write_err(e.error))?;
        Ok(())
    }

    /// Load from a file
    fn load_from_file(path: &Path) -> PortalResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| PortalError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    struct Item(Position);

    impl Ordered for Item {
        fn position(&self) -> Position {
            self.0
        }
    }

    #[test]
    fn test_next_position_empty() {
        let items: Vec<Item> = Vec::new();
        assert_eq!(next_position(&items), 1);
    }

    #[test]
    fn test_next_position_uses_max() {
        let items = vec![Item(3), Item(10), Item(2)];
        assert_eq!(next_position(&items), 11);
    }

    #[test]
    fn test_next_position_negative_positions() {
        let items = vec![Item(-5), Item(-2)];
        assert_eq!(next_position(&items), -1);
    }

    struct TitleOnly(String);

    impl Validatable for TitleOnly {
        fn validate(&self) -> PortalResult<()> {
            if self.0.trim().is_empty() {
                return Err(PortalError::field_validation("title", "is required"));
            }
            Ok(())
        }
    }

    #[test]
    fn test_validatable_trait() {
        assert!(TitleOnly("News".to_string()).is_valid());
        let invalid = TitleOnly("  ".to_string());
        assert!(!invalid.is_valid());
        assert_eq!(invalid.validation_errors(), vec!["Invalid title: is required"]);
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        seen: bool,
    }

    impl Persistable for Prefs {}

    #[test]
    fn test_persistable_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");
        Prefs { seen: true }.save_to_file(&path).unwrap();
        assert_eq!(Prefs::load_from_file(&path).unwrap(), Prefs { seen: true });
    }

    #[test]
    fn test_save_replaces_file_without_leaving_temporaries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{\"seen\": fa").unwrap();

        Prefs { seen: true }.save_to_file(&path).unwrap();
        Prefs { seen: false }.save_to_file(&path).unwrap();

        assert_eq!(Prefs::load_from_file(&path).unwrap(), Prefs { seen: false });
        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("prefs.json")]);
    }

    #[test]
    fn test_persistable_missing_file() {
        let err = Prefs::load_from_file(std::path::Path::new("/nonexistent/prefs.json"))
            .unwrap_err();
        assert!(err.is_io());
    }
}
