//! Page Components for EduTalks
//!
//! Each page is the content of one route (or of the shell state before
//! routes exist).
//!
//! ## Available Pages
//!
//! - **LandingPage**: One-time introduction shown before the first tab
//! - **TabContentPage**: Sections and documents of one tab
//! - **TabManagerPage**: Admin view for tabs and sections
//! - **NotFoundPage**: Unknown paths and the empty-routes state
//!

pub mod landing;
pub mod not_found;
pub mod tab_content;
pub mod tab_manager;

// Re-export page components for convenience
pub use landing::LandingPage;
pub use not_found::NotFoundPage;
pub use tab_content::TabContentPage;
pub use tab_manager::TabManagerPage;
