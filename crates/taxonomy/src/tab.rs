//! Tab definitions
//!
//! A tab is a top-level navigation category. The server assigns ids; the
//! client submits [`TabInput`] payloads for create and update.

use edutalks_core::{
    Activatable, Identifiable, Ordered, PortalError, PortalResult, Position, Slug, TabId,
    Validatable,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// Tab
// ============================================================================

/// A top-level navigational category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    /// Server-assigned identifier
    pub id: TabId,

    /// Display title
    pub title: String,

    /// URL-safe slug, unique across the tree
    pub slug: Slug,

    /// Display order among tabs
    #[serde(default)]
    pub position: Position,

    /// Whether end users can navigate to this tab
    pub is_active: bool,
}

impl Tab {
    /// Create a tab record (mostly useful for fixtures)
    pub fn new(id: impl Into<TabId>, title: impl Into<String>, slug: Slug) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            slug,
            position: 0,
            is_active: true,
        }
    }

    /// Set the position
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Set the active flag
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Route path for this tab
    pub fn path(&self) -> String {
        self.slug.to_path()
    }
}

impl Identifiable for Tab {
    type Id = TabId;

    fn id(&self) -> TabId {
        self.id
    }
}

impl Ordered for Tab {
    fn position(&self) -> Position {
        self.position
    }
}

impl Activatable for Tab {
    fn is_active(&self) -> bool {
        self.is_active
    }
}

// ============================================================================
// TabInput
// ============================================================================

/// Payload for `POST /api/admin/tabs` and `PATCH /api/admin/tabs/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabInput {
    pub title: String,
    pub slug: String,
    pub position: Position,
    pub is_active: bool,
}

impl TabInput {
    /// Prefill an input from an existing tab (edit form)
    pub fn from_tab(tab: &Tab) -> Self {
        Self {
            title: tab.title.clone(),
            slug: tab.slug.to_string(),
            position: tab.position,
            is_active: tab.is_active,
        }
    }
}

impl Validatable for TabInput {
    fn validate(&self) -> PortalResult<()> {
        if self.title.trim().is_empty() {
            return Err(PortalError::field_validation("title", "is required"));
        }
        if self.slug.trim().is_empty() {
            return Err(PortalError::field_validation("slug", "is required"));
        }
        Slug::new(self.slug.clone())?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn slug(s: &str) -> Slug {
        Slug::new(s).unwrap()
    }

    #[test]
    fn test_tab_builder() {
        let tab = Tab::new(1, "Legal", slug("legal"))
            .with_position(3)
            .with_active(false);
        assert_eq!(tab.position, 3);
        assert!(!tab.is_active);
        assert_eq!(tab.path(), "/legal");
    }

    #[test]
    fn test_tab_deserialize() {
        let tab: Tab = serde_json::from_str(
            r#"{"id": 5, "title": "Legal", "slug": "legal", "position": 2, "is_active": true}"#,
        )
        .unwrap();
        assert_eq!(tab.id, TabId(5));
        assert_eq!(tab.slug.as_str(), "legal");
        assert_eq!(tab.position, 2);
    }

    #[test]
    fn test_input_from_tab() {
        let tab = Tab::new(9, "Archive", slug("archive")).with_position(4);
        let input = TabInput::from_tab(&tab);
        assert_eq!(
            input,
            TabInput {
                title: "Archive".to_string(),
                slug: "archive".to_string(),
                position: 4,
                is_active: true,
            }
        );
    }

    #[test]
    fn test_input_validation() {
        let mut input = TabInput {
            title: "Legal".to_string(),
            slug: "legal".to_string(),
            position: 1,
            is_active: true,
        };
        assert!(input.is_valid());

        input.slug = "Legal Docs".to_string();
        assert!(!input.is_valid());

        input.slug = "legal".to_string();
        input.title = "   ".to_string();
        assert_eq!(input.validation_errors(), vec!["Invalid title: is required"]);
    }
}
