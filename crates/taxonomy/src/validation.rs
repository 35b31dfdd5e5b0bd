//! Tree consistency checks and slug helpers
//!
//! The server is expected to enforce slug uniqueness, but the client checks
//! fetched trees and admin forms against the same rules so problems show up
//! as warnings and form errors instead of broken routes.

use std::collections::HashMap;

use edutalks_core::{PortalError, PortalResult, SectionId, Slug, TabId};
use heck::ToKebabCase;

use crate::tree::TaxonomyTree;

/// A rule the fetched tree violates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeIssue {
    /// Several tabs share one slug
    DuplicateTabSlug { slug: String, tabs: Vec<TabId> },
    /// Several sections of one tab share a slug
    DuplicateSectionSlug {
        tab: TabId,
        slug: String,
        sections: Vec<SectionId>,
    },
}

impl std::fmt::Display for TreeIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeIssue::DuplicateTabSlug { slug, tabs } => {
                write!(f, "tab slug '{}' is used by {} tabs", slug, tabs.len())
            }
            TreeIssue::DuplicateSectionSlug {
                tab,
                slug,
                sections,
            } => write!(
                f,
                "section slug '{}' is used by {} sections of tab {}",
                slug,
                sections.len(),
                tab
            ),
        }
    }
}

/// Collect every consistency issue of a tree
pub fn check_tree(tree: &TaxonomyTree) -> Vec<TreeIssue> {
    let mut issues = Vec::new();

    let mut tab_slugs: HashMap<&str, Vec<TabId>> = HashMap::new();
    for tab in tree.tabs() {
        tab_slugs.entry(tab.slug.as_str()).or_default().push(tab.id);
    }
    let mut tab_dupes: Vec<TreeIssue> = tab_slugs
        .into_iter()
        .filter(|(_, ids)| ids.len() > 1)
        .map(|(slug, tabs)| TreeIssue::DuplicateTabSlug {
            slug: slug.to_string(),
            tabs,
        })
        .collect();
    tab_dupes.sort_by(|a, b| a.to_string().cmp(&b.to_string()));
    issues.extend(tab_dupes);

    for node in tree.nodes() {
        let mut section_slugs: HashMap<&str, Vec<SectionId>> = HashMap::new();
        for section_node in &node.sections {
            section_slugs
                .entry(section_node.section.slug.as_str())
                .or_default()
                .push(section_node.section.id);
        }
        let mut dupes: Vec<TreeIssue> = section_slugs
            .into_iter()
            .filter(|(_, ids)| ids.len() > 1)
            .map(|(slug, sections)| TreeIssue::DuplicateSectionSlug {
                tab: node.tab.id,
                slug: slug.to_string(),
                sections,
            })
            .collect();
        dupes.sort_by(|a, b| a.to_string().cmp(&b.to_string()));
        issues.extend(dupes);
    }

    issues
}

/// Log every issue of a freshly fetched tree as a warning
pub fn warn_on_issues(tree: &TaxonomyTree) -> usize {
    let issues = check_tree(tree);
    for issue in &issues {
        tracing::warn!(%issue, "taxonomy tree inconsistency");
    }
    issues.len()
}

/// Check that `slug` is free among tabs, ignoring the tab being edited
pub fn ensure_tab_slug_available(
    tree: &TaxonomyTree,
    slug: &str,
    editing: Option<TabId>,
) -> PortalResult<()> {
    let taken = tree
        .tabs()
        .any(|tab| tab.slug.as_str() == slug && Some(tab.id) != editing);
    if taken {
        Err(PortalError::DuplicateTabSlug(slug.to_string()))
    } else {
        Ok(())
    }
}

/// Check that `slug` is free among the sections of `tab`, ignoring the
/// section being edited
pub fn ensure_section_slug_available(
    tree: &TaxonomyTree,
    tab: TabId,
    slug: &str,
    editing: Option<SectionId>,
) -> PortalResult<()> {
    let node = tree
        .node(tab)
        .ok_or_else(|| PortalError::TabNotFound(tab.to_string()))?;
    let taken = node
        .sections
        .iter()
        .any(|n| n.section.slug.as_str() == slug && Some(n.section.id) != editing);
    if taken {
        Err(PortalError::DuplicateSectionSlug {
            tab: node.tab.slug.to_string(),
            section: slug.to_string(),
        })
    } else {
        Ok(())
    }
}

/// Suggest a slug for a title: kebab-case, ASCII letters and digits only
pub fn suggest_slug(title: &str) -> String {
    let kebab = title.to_kebab_case();
    let filtered: String = kebab
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect::<String>()
        .to_ascii_lowercase();

    let collapsed = filtered
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    debug_assert!(collapsed.is_empty() || Slug::is_valid(&collapsed));
    collapsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::Section;
    use crate::tab::Tab;
    use crate::tree::TabNode;
    use pretty_assertions::assert_eq;

    fn slug(s: &str) -> Slug {
        Slug::new(s).unwrap()
    }

    fn tree() -> TaxonomyTree {
        TaxonomyTree::new(vec![
            TabNode::new(Tab::new(1, "Legal", slug("legal")))
                .with_section(Section::new(10, "Forms", slug("forms")), 0)
                .with_section(Section::new(11, "Forms again", slug("forms")), 0),
            TabNode::new(Tab::new(2, "Legal copy", slug("legal"))),
            TabNode::new(Tab::new(3, "Exams", slug("exams")))
                .with_section(Section::new(30, "Forms", slug("forms")), 0),
        ])
    }

    #[test]
    fn test_check_tree_reports_duplicates() {
        let issues = check_tree(&tree());
        assert_eq!(
            issues,
            vec![
                TreeIssue::DuplicateTabSlug {
                    slug: "legal".to_string(),
                    tabs: vec![TabId(1), TabId(2)],
                },
                TreeIssue::DuplicateSectionSlug {
                    tab: TabId(1),
                    slug: "forms".to_string(),
                    sections: vec![SectionId(10), SectionId(11)],
                },
            ]
        );
    }

    #[test]
    fn test_clean_tree_has_no_issues() {
        let tree = TaxonomyTree::new(vec![TabNode::new(Tab::new(1, "A", slug("a")))]);
        assert!(check_tree(&tree).is_empty());
        assert_eq!(warn_on_issues(&tree), 0);
    }

    #[test]
    fn test_tab_slug_availability() {
        let tree = tree();
        assert!(ensure_tab_slug_available(&tree, "news", None).is_ok());
        assert!(ensure_tab_slug_available(&tree, "exams", None).is_err());
        assert!(ensure_tab_slug_available(&tree, "exams", Some(TabId(3))).is_ok());
    }

    #[test]
    fn test_section_slug_availability_is_per_tab() {
        let tree = tree();
        assert!(ensure_section_slug_available(&tree, TabId(3), "forms", Some(SectionId(30))).is_ok());
        assert!(ensure_section_slug_available(&tree, TabId(3), "forms", None).is_err());
        assert!(ensure_section_slug_available(&tree, TabId(2), "forms", None).is_ok());
        assert!(
            ensure_section_slug_available(&tree, TabId(99), "forms", None)
                .unwrap_err()
                .is_not_found()
        );
    }

    #[test]
    fn test_suggest_slug() {
        assert_eq!(suggest_slug("Past Exam Papers"), "past-exam-papers");
        assert_eq!(suggest_slug("Form 4 — Biology!"), "form-4-biology");
        assert_eq!(suggest_slug("  "), "");
    }
}
