//! # UI Hooks
//!
//! Custom Dioxus hooks for EduTalks views:
//! - Request scopes that cancel in-flight calls when a view unmounts
//! - Per-view taxonomy loading with last-request-wins semantics

pub mod use_request_scope;
pub mod use_taxonomy;

pub use use_request_scope::use_request_scope;
pub use use_taxonomy::{UseTaxonomy, use_taxonomy};
