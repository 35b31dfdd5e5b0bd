//! # UI Components
//!
//! Reusable Dioxus components for the EduTalks client.
//!
//! ```text
//! Modal
//! ├── EditorDialog (create/edit tabs and sections)
//! ├── ConfirmDeleteDialog
//! ├── FilePreviewDialog
//! └── SignInDialog
//!
//! FileList
//! └── FileRow (preview / download)
//!
//! Feedback: LoadingState, EmptyState, InlineAlert, badges
//! Inputs: TextInput, TextArea, PositionInput, Toggle
//! ```

pub mod dialogs;
pub mod feedback;
pub mod file_list;
pub mod inputs;

pub use dialogs::{ConfirmDeleteDialog, EditorDialog, FilePreviewDialog, SignInDialog};
pub use feedback::{CountBadge, EmptyState, InactiveBadge, InlineAlert, LoadingState, Modal};
pub use file_list::{FileList, file_icon};
pub use inputs::{PositionInput, TextArea, TextInput, Toggle};
