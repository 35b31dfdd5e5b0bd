//! EduTalks
//!
//! Desktop client for taxonomy-driven course navigation.
//!
//! This is the main entry point for the Dioxus Desktop application.

use std::process;

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() {
    // Initialize logging
    let _subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .pretty()
        .init();

    // Launch the Dioxus desktop application
    if let Err(e) = edutalks_ui::launch() {
        tracing::error!("EduTalks failed to start: {}", e);
        process::exit(1);
    }
}
