//! # EduTalks CLI
//!
//! Command-line interface for the EduTalks backend.
//!
//! Mirrors what the desktop client does, for scripting and smoke tests
//! against a running server.
//!
//! ## Commands
//!
//! - `tree` - Print the tab/section tree
//! - `routes` - Print the routes composed for a role
//! - `files` - List documents, grouped by section
//! - `tabs` / `sections` - Create, update and delete tabs and sections
//! - `download` - Save one document to disk
//! - `login` / `logout` / `whoami` - Manage the persisted session
//!

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod commands;
pub mod output;

pub use commands::{Context, run};

// Re-export dependencies for use in main.rs
pub use edutalks_client;
pub use edutalks_core;
pub use edutalks_taxonomy;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[derive(Debug, Parser)]
#[command(name = "edutalks-cli")]
#[command(about = "Inspect and administer EduTalks tabs, sections and documents", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend base URL (overrides the config file)
    #[arg(long, env = "EDUTALKS_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Session file (overrides the config file)
    #[arg(long, env = "EDUTALKS_SESSION_FILE", global = true)]
    pub session_file: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the tab/section tree, inactive entries included
    Tree,

    /// Print the routes the client would register
    Routes {
        /// Compose for this role instead of the session's
        #[arg(long)]
        role: Option<String>,
    },

    /// List documents, grouped by section
    Files {
        /// Only documents of this section
        #[arg(long)]
        section: Option<i64>,
    },

    /// Manage tabs
    Tabs {
        #[command(subcommand)]
        command: TabCommands,
    },

    /// Manage sections
    Sections {
        #[command(subcommand)]
        command: SectionCommands,
    },

    /// Download a document
    Download {
        /// File id
        id: i64,

        /// Where to write it (defaults to the server's file name)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Store an access token for later commands
    Login {
        /// Access token issued by the backend
        #[arg(long)]
        token: String,

        /// User name
        #[arg(long)]
        username: String,

        /// Role ("admin" unlocks tab management)
        #[arg(long, default_value = "member")]
        role: String,

        /// Display name
        #[arg(long)]
        display_name: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show the stored session
    Whoami,
}

#[derive(Debug, Subcommand)]
pub enum TabCommands {
    /// Create a tab
    Create {
        #[arg(long)]
        title: String,

        /// Defaults to a slug derived from the title
        #[arg(long)]
        slug: Option<String>,

        /// Defaults to one past the last tab
        #[arg(long, allow_negative_numbers = true)]
        position: Option<i32>,

        /// Create hidden from end users
        #[arg(long)]
        inactive: bool,
    },

    /// Update a tab; omitted fields keep their value
    Update {
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        slug: Option<String>,

        #[arg(long, allow_negative_numbers = true)]
        position: Option<i32>,

        #[arg(long)]
        active: Option<bool>,
    },

    /// Delete a tab and its sections
    Delete {
        id: i64,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum SectionCommands {
    /// Create a section in a tab
    Create {
        /// Owning tab id
        #[arg(long)]
        tab: i64,

        #[arg(long)]
        title: String,

        /// Defaults to a slug derived from the title
        #[arg(long)]
        slug: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Defaults to one past the tab's last section
        #[arg(long, allow_negative_numbers = true)]
        position: Option<i32>,

        /// Create hidden from end users
        #[arg(long)]
        inactive: bool,
    },

    /// Update a section; omitted fields keep their value
    Update {
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        slug: Option<String>,

        /// Empty string clears the description
        #[arg(long)]
        description: Option<String>,

        #[arg(long, allow_negative_numbers = true)]
        position: Option<i32>,

        #[arg(long)]
        active: Option<bool>,
    },

    /// Delete a section
    Delete {
        id: i64,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}
