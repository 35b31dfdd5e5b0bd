//! The taxonomy tree projection
//!
//! `GET /api/taxonomy/tree` returns every tab with its sections nested in
//! display order. The tree is a read-only snapshot: it is never edited
//! locally, only replaced by the next fetch.

use edutalks_core::{SectionId, TabId};
use serde::{Deserialize, Serialize};

use crate::section::Section;
use crate::tab::Tab;

/// A section together with the number of documents attached to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionNode {
    pub section: Section,
    #[serde(default)]
    pub docs_count: u64,
}

/// A tab together with its sections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabNode {
    pub tab: Tab,
    #[serde(default)]
    pub sections: Vec<SectionNode>,
}

impl TabNode {
    /// Create a node without sections
    pub fn new(tab: Tab) -> Self {
        Self {
            tab,
            sections: Vec::new(),
        }
    }

    /// Append a section (fixture helper)
    pub fn with_section(mut self, section: Section, docs_count: u64) -> Self {
        self.sections.push(SectionNode {
            section,
            docs_count,
        });
        self
    }

    /// Find a section of this tab by id
    pub fn section(&self, id: SectionId) -> Option<&SectionNode> {
        self.sections.iter().find(|node| node.section.id == id)
    }

    /// Total number of documents across the tab's sections
    pub fn docs_count(&self) -> u64 {
        self.sections.iter().map(|node| node.docs_count).sum()
    }
}

/// Ordered sequence of tabs with their sections, as served by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxonomyTree {
    nodes: Vec<TabNode>,
}

impl TaxonomyTree {
    /// Build a tree from nodes in server order
    pub fn new(nodes: Vec<TabNode>) -> Self {
        Self { nodes }
    }

    /// An empty tree
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the tree has no tabs
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of tabs (active or not)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Tab nodes in server order
    pub fn nodes(&self) -> &[TabNode] {
        &self.nodes
    }

    /// Tabs in server order
    pub fn tabs(&self) -> impl Iterator<Item = &Tab> {
        self.nodes.iter().map(|node| &node.tab)
    }

    /// Find a tab node by id
    pub fn node(&self, id: TabId) -> Option<&TabNode> {
        self.nodes.iter().find(|node| node.tab.id == id)
    }

    /// Find the first tab node with the given slug
    pub fn node_by_slug(&self, slug: &str) -> Option<&TabNode> {
        self.nodes.iter().find(|node| node.tab.slug.as_str() == slug)
    }

    /// Find a section anywhere in the tree, with the id of its owning tab
    pub fn find_section(&self, id: SectionId) -> Option<(TabId, &SectionNode)> {
        self.nodes.iter().find_map(|node| {
            node.section(id)
                .map(|section_node| (node.tab.id, section_node))
        })
    }

    /// Every section in the tree, paired with its owning tab id
    pub fn sections(&self) -> impl Iterator<Item = (TabId, &Section)> {
        self.nodes.iter().flat_map(|node| {
            node.sections
                .iter()
                .map(move |section_node| (node.tab.id, &section_node.section))
        })
    }
}

impl From<Vec<TabNode>> for TaxonomyTree {
    fn from(nodes: Vec<TabNode>) -> Self {
        Self::new(nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edutalks_core::Slug;
    use pretty_assertions::assert_eq;

    fn sample() -> TaxonomyTree {
        TaxonomyTree::new(vec![
            TabNode::new(Tab::new(1, "Legal", Slug::new("legal").unwrap()))
                .with_section(Section::new(10, "Contracts", Slug::new("contracts").unwrap()), 3)
                .with_section(Section::new(11, "Forms", Slug::new("forms").unwrap()), 2),
            TabNode::new(Tab::new(2, "Archive", Slug::new("archive").unwrap()).with_active(false))
                .with_section(Section::new(20, "2019", Slug::new("2019").unwrap()), 0),
        ])
    }

    #[test]
    fn test_lookup_by_id_and_slug() {
        let tree = sample();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.node(TabId(2)).unwrap().tab.title, "Archive");
        assert_eq!(tree.node_by_slug("legal").unwrap().tab.id, TabId(1));
        assert!(tree.node_by_slug("missing").is_none());
    }

    #[test]
    fn test_find_section_reports_owner() {
        let tree = sample();
        let (owner, node) = tree.find_section(SectionId(20)).unwrap();
        assert_eq!(owner, TabId(2));
        assert_eq!(node.section.title, "2019");
    }

    #[test]
    fn test_sections_iterates_in_order() {
        let tree = sample();
        let ids: Vec<i64> = tree.sections().map(|(_, s)| s.id.get()).collect();
        assert_eq!(ids, vec![10, 11, 20]);
    }

    #[test]
    fn test_docs_count_sum() {
        let tree = sample();
        assert_eq!(tree.node(TabId(1)).unwrap().docs_count(), 5);
    }

    #[test]
    fn test_empty_tree() {
        let tree = TaxonomyTree::empty();
        assert!(tree.is_empty());
        assert_eq!(tree.tabs().count(), 0);
    }
}
