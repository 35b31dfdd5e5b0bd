//! # EduTalks Taxonomy
//!
//! Data model and navigation logic for the tab → section → file taxonomy.
//!
//! ## Core Concepts
//!
//! - **Tab**: top-level navigation category, routed under its slug
//! - **Section**: sub-category of exactly one tab, groups files
//! - **TaxonomyTree**: every tab with its nested sections, as served
//! - **RouteTable**: one route per active tab, plus `/admin/tabs` for admins
//! - **SectionIndex**: files grouped by section, built once per file fetch
//!

// Module declarations
pub mod file;
pub mod resolver;
pub mod routes;
pub mod section;
pub mod section_index;
pub mod serialization;
pub mod tab;
pub mod tree;
pub mod validation;

// Re-export commonly used types at crate root
pub use file::FileRecord;
pub use resolver::{
    ResolvedTab, resolve_sections, resolve_tab_content, resolve_tabs, visible_sections,
};
pub use routes::{ADMIN_TABS_PATH, Route, RouteEntry, RouteTable};
pub use section::{Section, SectionInput};
pub use section_index::{SectionIndex, list_files};
pub use serialization::{GENERIC_ERROR_MESSAGE, decode_files, decode_tree, error_message};
pub use tab::{Tab, TabInput};
pub use tree::{SectionNode, TabNode, TaxonomyTree};
pub use validation::{
    TreeIssue, check_tree, ensure_section_slug_available, ensure_tab_slug_available,
    suggest_slug, warn_on_issues,
};

// Re-export core types that are commonly used with the taxonomy
pub use edutalks_core::{
    FileId, PortalError, PortalResult, Position, Role, SectionId, Slug, TabId, next_position,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Prelude Module
// ============================================================================

/// Convenient re-exports for common usage
pub mod prelude {
    pub use crate::{
        FileRecord, PortalError, PortalResult, ResolvedTab, Role, Route, RouteTable, Section,
        SectionId, SectionIndex, SectionInput, SectionNode, Slug, Tab, TabId, TabInput,
        TabNode, TaxonomyTree, resolve_tabs, visible_sections,
    };
}

/// Resolve the active tabs of a tree and compose the route table for a role.
pub fn compose_routes(tree: &TaxonomyTree, role: &Role) -> RouteTable {
    RouteTable::compose(&resolve_tabs(tree), role)
}

// ============================================================================
// Tests
// ============================================================================
