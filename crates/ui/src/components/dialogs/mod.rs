//! # Dialog Components
//!
//! - **EditorDialog**: Create and edit tabs and sections
//! - **ConfirmDeleteDialog**: Confirmation before deleting a tab or section
//! - **FilePreviewDialog**: Fetch and preview a document
//! - **SignInDialog**: Store an access token for the session
//!
//! The editor and delete dialogs are driven by the owning view's
//! [`AdminEditor`](crate::admin::AdminEditor); the other two are opened
//! through [`Dialog`](crate::state::Dialog) in the global state.

pub mod confirm_delete;
pub mod editor_dialog;
pub mod file_preview;
pub mod sign_in;

pub use confirm_delete::ConfirmDeleteDialog;
pub use editor_dialog::EditorDialog;
pub use file_preview::FilePreviewDialog;
pub use sign_in::SignInDialog;
