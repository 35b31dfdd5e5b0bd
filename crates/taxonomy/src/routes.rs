//! Route composition
//!
//! Every active tab becomes one route at `/{slug}`. The route only records
//! which tab it points at; sections are resolved against the tree when the
//! route is visited. Administrators additionally get `/admin/tabs`.
//!
//! A table is composed once per tree fetch. It does not follow server-side
//! changes until the tree is fetched again.

use std::collections::HashSet;

use edutalks_core::{Role, Slug, TabId};

use crate::resolver::ResolvedTab;

/// Path of the tab/section administration view
pub const ADMIN_TABS_PATH: &str = "/admin/tabs";

/// What a route renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Content of one tab, resolved lazily from the tree
    Tab {
        tab_id: TabId,
        slug: Slug,
        title: String,
    },
    /// Tab/section administration
    AdminTabs,
}

impl Route {
    /// Navigation label
    pub fn label(&self) -> &str {
        match self {
            Route::Tab { title, .. } => title,
            Route::AdminTabs => "Manage tabs",
        }
    }
}

/// One registered path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: String,
    pub route: Route,
}

/// Ordered set of routes the view switcher can match against
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Compose routes from resolved tabs for a session role.
    ///
    /// Tab order is kept. If two tabs share a slug the first one wins and
    /// the duplicate is logged and skipped.
    pub fn compose(tabs: &[ResolvedTab], role: &Role) -> Self {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(tabs.len() + 1);

        for resolved in tabs {
            let path = resolved.slug.to_path();
            if !seen.insert(path.clone()) {
                tracing::warn!(
                    slug = %resolved.slug,
                    tab_id = %resolved.tab.id,
                    "duplicate tab slug, route skipped"
                );
                continue;
            }
            entries.push(RouteEntry {
                path,
                route: Route::Tab {
                    tab_id: resolved.tab.id,
                    slug: resolved.slug.clone(),
                    title: resolved.tab.title.clone(),
                },
            });
        }

        if role.is_admin() {
            entries.push(RouteEntry {
                path: ADMIN_TABS_PATH.to_string(),
                route: Route::AdminTabs,
            });
        }

        tracing::debug!(routes = entries.len(), role = %role, "composed route table");
        Self { entries }
    }

    /// Match a path. A trailing slash is ignored.
    pub fn resolve(&self, path: &str) -> Option<&Route> {
        let normalized = normalize_path(path);
        self.entries
            .iter()
            .find(|entry| entry.path == normalized)
            .map(|entry| &entry.route)
    }

    /// Registered entries in order
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Registered paths in order
    pub fn paths(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.path.as_str()).collect()
    }

    /// Tab routes only (navigation menu)
    pub fn tab_entries(&self) -> impl Iterator<Item = &RouteEntry> {
        self.entries
            .iter()
            .filter(|e| matches!(e.route, Route::Tab { .. }))
    }

    /// First tab route, used as the default landing target
    pub fn first_tab_path(&self) -> Option<&str> {
        self.tab_entries().next().map(|e| e.path.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize_path(path: &str) -> String {
    let trimmed = path.trim();
    let trimmed = trimmed.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::resolve_tabs;
    use crate::section::Section;
    use crate::tab::Tab;
    use crate::tree::{TabNode, TaxonomyTree};
    use pretty_assertions::assert_eq;

    fn slug(s: &str) -> Slug {
        Slug::new(s).unwrap()
    }

    fn legal_archive() -> TaxonomyTree {
        TaxonomyTree::new(vec![
            TabNode::new(Tab::new(1, "Legal", slug("legal"))),
            TabNode::new(Tab::new(2, "Archive", slug("archive")).with_active(false))
                .with_section(Section::new(9, "Old", slug("old")), 3),
        ])
    }

    #[test]
    fn test_single_active_tab_registers_one_route() {
        let table = RouteTable::compose(&resolve_tabs(&legal_archive()), &Role::Anonymous);
        assert_eq!(table.paths(), vec!["/legal"]);
        assert!(table.resolve("/archive").is_none());
    }

    #[test]
    fn test_admin_route_only_for_admin() {
        let tabs = resolve_tabs(&legal_archive());

        let member = RouteTable::compose(&tabs, &Role::from("teacher"));
        assert!(member.resolve(ADMIN_TABS_PATH).is_none());

        let admin = RouteTable::compose(&tabs, &Role::Admin);
        assert_eq!(admin.paths(), vec!["/legal", ADMIN_TABS_PATH]);
        assert_eq!(admin.resolve(ADMIN_TABS_PATH), Some(&Route::AdminTabs));
    }

    #[test]
    fn test_empty_tree_yields_no_routes() {
        let table = RouteTable::compose(&resolve_tabs(&TaxonomyTree::empty()), &Role::Anonymous);
        assert!(table.is_empty());
        assert!(table.first_tab_path().is_none());
        assert!(table.resolve("/").is_none());
    }

    #[test]
    fn test_resolve_normalizes_path() {
        let table = RouteTable::compose(&resolve_tabs(&legal_archive()), &Role::Anonymous);
        let expected = Route::Tab {
            tab_id: TabId(1),
            slug: slug("legal"),
            title: "Legal".to_string(),
        };
        assert_eq!(table.resolve("/legal/"), Some(&expected));
        assert_eq!(table.resolve("legal"), Some(&expected));
    }

    #[test]
    fn test_duplicate_slug_keeps_first() {
        let tree = TaxonomyTree::new(vec![
            TabNode::new(Tab::new(1, "First", slug("news"))),
            TabNode::new(Tab::new(2, "Second", slug("news"))),
        ]);
        let table = RouteTable::compose(&resolve_tabs(&tree), &Role::Anonymous);
        assert_eq!(table.len(), 1);
        assert_eq!(table.resolve("/news").unwrap().label(), "First");
    }

    #[test]
    fn test_tab_entries_excludes_admin() {
        let table = RouteTable::compose(&resolve_tabs(&legal_archive()), &Role::Admin);
        assert_eq!(table.tab_entries().count(), 1);
        assert_eq!(table.first_tab_path(), Some("/legal"));
    }
}
