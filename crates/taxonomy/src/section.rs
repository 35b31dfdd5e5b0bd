//! Section definitions
//!
//! A section groups related files inside exactly one tab.

use edutalks_core::{
    Activatable, Identifiable, Ordered, PortalError, PortalResult, Position, SectionId, Slug,
    TabId, Validatable,
};
use serde::{Deserialize, Serialize};

/// A sub-category of a tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Server-assigned identifier
    pub id: SectionId,

    /// Owning tab, when the payload carries it (the tree nests sections
    /// under their tab, so it is usually omitted there)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_id: Option<TabId>,

    /// Display title
    pub title: String,

    /// URL-safe slug, unique within the owning tab
    pub slug: Slug,

    /// Optional description shown above the file listing
    #[serde(default)]
    pub description: Option<String>,

    /// Display order among the tab's sections
    #[serde(default)]
    pub position: Position,

    /// Whether end users can see this section
    pub is_active: bool,
}

impl Section {
    /// Create a section record (mostly useful for fixtures)
    pub fn new(id: impl Into<SectionId>, title: impl Into<String>, slug: Slug) -> Self {
        Self {
            id: id.into(),
            tab_id: None,
            title: title.into(),
            slug,
            description: None,
            position: 0,
            is_active: true,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
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
}

impl Identifiable for Section {
    type Id = SectionId;

    fn id(&self) -> SectionId {
        self.id
    }
}

impl Ordered for Section {
    fn position(&self) -> Position {
        self.position
    }
}

impl Activatable for Section {
    fn is_active(&self) -> bool {
        self.is_active
    }
}

/// Payload for `POST /api/admin/sections` and `PATCH /api/admin/sections/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionInput {
    pub tab_id: TabId,
    pub title: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub position: Position,
    pub is_active: bool,
}

impl SectionInput {
    /// Prefill an input from an existing section (edit form)
    pub fn from_section(tab_id: TabId, section: &Section) -> Self {
        Self {
            tab_id,
            title: section.title.clone(),
            slug: section.slug.to_string(),
            description: section.description.clone(),
            position: section.position,
            is_active: section.is_active,
        }
    }
}

impl Validatable for SectionInput {
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

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_section_deserialize_without_optional_fields() {
        let section: Section = serde_json::from_str(
            r#"{"id": 3, "title": "Contracts", "slug": "contracts", "is_active": false}"#,
        )
        .unwrap();
        assert_eq!(section.id, SectionId(3));
        assert_eq!(section.tab_id, None);
        assert_eq!(section.description, None);
        assert_eq!(section.position, 0);
        assert!(!section.is_active);
    }

    #[test]
    fn test_input_serialization_skips_empty_description() {
        let input = SectionInput {
            tab_id: TabId(1),
            title: "Contracts".to_string(),
            slug: "contracts".to_string(),
            description: None,
            position: 2,
            is_active: true,
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "tab_id": 1,
                "title": "Contracts",
                "slug": "contracts",
                "position": 2,
                "is_active": true
            })
        );
    }

    #[test]
    fn test_input_from_section_keeps_description() {
        let section = Section::new(4, "Forms", Slug::new("forms").unwrap())
            .with_description("Downloadable forms")
            .with_position(7);
        let input = SectionInput::from_section(TabId(2), &section);
        assert_eq!(input.tab_id, TabId(2));
        assert_eq!(input.description.as_deref(), Some("Downloadable forms"));
        assert_eq!(input.position, 7);
    }

    #[test]
    fn test_input_validation_rejects_bad_slug() {
        let input = SectionInput {
            tab_id: TabId(1),
            title: "Forms".to_string(),
            slug: "Forms!".to_string(),
            description: None,
            position: 1,
            is_active: true,
        };
        assert!(!input.is_valid());
    }
}
