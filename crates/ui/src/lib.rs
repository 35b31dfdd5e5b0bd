//! # EduTalks UI
//!
//! Dioxus Desktop UI for the EduTalks navigation client.
//!
//! ## Features
//!
//! - Navigation composed from the server's tab/section tree
//! - Per-tab section browsing with document preview and download
//! - Tab and section administration for admin sessions
//! - Token sign-in persisted across launches
//!

// ============================================================================
// Modules
// ============================================================================

pub mod admin;
pub mod app;
pub mod components;
pub mod file_ops;
pub mod hooks;
pub mod pages;
pub mod services;
pub mod state;

// ============================================================================
// Re-exports
// ============================================================================

// Re-export internal crates for convenience
pub use edutalks_client;
pub use edutalks_core;
pub use edutalks_taxonomy;

// Re-export main components
pub use admin::{AdminEditor, DeleteTarget, EditTarget, EditorForm, EditorPhase};
pub use app::App;
pub use file_ops::{PreviewContent, PreviewFile, format_size, save_download, show_save_dialog};
pub use pages::{LandingPage, NotFoundPage, TabContentPage, TabManagerPage};
pub use services::{Services, use_services};
pub use state::{
    APP_STATE, AppState, Dialog, Notification, RouteLoad, SessionView, StatusLevel,
    StatusMessage, UiState,
};

// Re-export hooks
pub use hooks::{UseTaxonomy, use_request_scope, use_taxonomy};

use edutalks_client::{ClientConfig, ClientResult};

// ============================================================================
// Constants
// ============================================================================

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const NAME: &str = "EduTalks";

/// Application display title
pub const TITLE: &str = "EduTalks";

/// CSS styles for the application
const STYLES: &str = include_str!("../../../assets/styles/main.css");

// ============================================================================
// Launch Function
// ============================================================================

/// Launch the EduTalks desktop application
///
/// Loads the client configuration (falling back to defaults when it is
/// invalid), restores the persisted session and starts the UI.
///
/// # Example
///
/// ```rust,ignore
/// fn main() {
///     edutalks_ui::launch().unwrap();
/// }
/// ```
pub fn launch() -> ClientResult<()> {
    tracing::info!("Starting {} v{}", NAME, VERSION);

    let config = ClientConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Ignoring client configuration: {}", e);
        ClientConfig::default()
    });
    tracing::info!("Backend: {}", config.base_url);

    let services = Services::from_config(&config)?;

    launch_with_services(services, TITLE, 1280.0, 820.0);
    Ok(())
}

/// Launch with prepared services and window geometry
pub fn launch_with_services(services: Services, title: &str, width: f64, height: f64) {
    // Build custom head with embedded CSS
    let custom_head = format!(r#"<style type="text/css">{}</style>"#, STYLES);

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(
                    dioxus::desktop::WindowBuilder::new()
                        .with_title(title)
                        .with_resizable(true)
                        .with_inner_size(dioxus::desktop::LogicalSize::new(width, height))
                        .with_min_inner_size(dioxus::desktop::LogicalSize::new(800.0, 600.0)),
                )
                .with_menu(None)
                .with_custom_head(custom_head),
        )
        .with_context(services)
        .launch(App);
}

/// Get the embedded CSS styles
pub fn get_styles() -> &'static str {
    STYLES
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "EduTalks");
        assert!(TITLE.contains(NAME));
    }

    #[test]
    fn test_styles_loaded() {
        assert!(!STYLES.is_empty());
        assert!(STYLES.contains(".bg-slate-900"));
        assert!(STYLES.contains(".animate-spin"));
    }
}
