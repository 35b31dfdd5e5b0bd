//! Tab and section resolution
//!
//! End users only ever see active tabs and sections. The server is the
//! authority on ordering, so resolution filters but never re-sorts.

use edutalks_core::{Activatable, Slug, TabId};

use crate::section::Section;
use crate::tab::Tab;
use crate::tree::{SectionNode, TabNode, TaxonomyTree};

/// An active tab paired with the slug it is routed under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTab {
    pub slug: Slug,
    pub tab: Tab,
}

/// Active tabs of the tree, in the tree's order.
///
/// An empty tree (or one where every tab is inactive) resolves to nothing.
pub fn resolve_tabs(tree: &TaxonomyTree) -> Vec<ResolvedTab> {
    tree.tabs()
        .filter(|tab| tab.is_active())
        .map(|tab| ResolvedTab {
            slug: tab.slug.clone(),
            tab: tab.clone(),
        })
        .collect()
}

/// Sections of a tab exactly as nested in the payload (admins see all of them)
pub fn resolve_sections(node: &TabNode) -> Vec<&Section> {
    node.sections.iter().map(|n| &n.section).collect()
}

/// Sections of a tab that end users may open, in payload order
pub fn visible_sections(node: &TabNode) -> Vec<&SectionNode> {
    node.sections
        .iter()
        .filter(|n| n.section.is_active())
        .collect()
}

/// Resolve the content of a tab route when it is visited.
///
/// Returns `None` when the tab vanished from the tree or was deactivated
/// since the routes were composed.
pub fn resolve_tab_content(tree: &TaxonomyTree, tab_id: TabId) -> Option<&TabNode> {
    tree.node(tab_id).filter(|node| node.tab.is_active())
}
