//! # EduTalks Core
//!
//! Core types, traits, and error handling for EduTalks.
//!
//! This crate provides the foundational building blocks used throughout
//! the workspace, including:
//!
//! - **Types**: Server identifiers, slugs, positions and roles
//! - **Traits**: `Validatable`, `Ordered`, `Activatable`, `Persistable`
//! - **Errors**: Unified error handling with `PortalError` and `PortalResult`
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{PortalError, PortalResult};
pub use traits::{Activatable, Identifiable, Ordered, Persistable, Validatable, next_position};
pub use types::{FileId, Position, Role, SectionId, Slug, TabId};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
