//! Application State Management for EduTalks
//!
//! Centralized state using Dioxus 0.7 Signals: the session as the UI sees it,
//! the last fetched taxonomy tree with the routes composed from it, the
//! current path, dialogs and notifications.
//!
//! Views keep their own request scopes and caches; this state only holds
//! what the shell (sidebar, toolbar, status bar) needs to render.

use std::sync::Arc;

use dioxus::prelude::*;
use edutalks_core::Role;
use edutalks_taxonomy::{FileRecord, Route, RouteTable, TaxonomyTree, compose_routes};
use uuid::Uuid;

/// How many notifications are kept on screen at once
pub const MAX_NOTIFICATIONS: usize = 4;

// ============================================================================
// Session View
// ============================================================================

/// Session fields the shell renders
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionView {
    pub role: Role,
    pub label: Option<String>,
    pub authenticated: bool,
    pub seen_landing: bool,
}

impl SessionView {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Name shown in the sidebar footer
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or("Guest")
    }
}

// ============================================================================
// Route Loading
// ============================================================================

/// Progress of the tree fetch that routes are composed from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RouteLoad {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

impl RouteLoad {
    pub fn is_loading(&self) -> bool {
        matches!(self, RouteLoad::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RouteLoad::Failed(message) => Some(message),
            _ => None,
        }
    }
}

// ============================================================================
// UI State
// ============================================================================

/// Modal dialogs owned by the shell
#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    /// Preview of a document fetched on open
    FilePreview(FileRecord),
    /// Sign in with an access token
    SignIn,
    /// About dialog
    About,
    /// Error dialog
    Error(String),
}

/// Transient notification shown in the corner
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub text: String,
    pub level: StatusLevel,
}

/// Status message for the status bar
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
}

/// Status message severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl StatusLevel {
    /// Tailwind classes for the level's accent
    pub fn classes(&self) -> &'static str {
        match self {
            StatusLevel::Info => "bg-slate-800 border-indigo-500 text-slate-100",
            StatusLevel::Success => "bg-slate-800 border-green-500 text-green-200",
            StatusLevel::Warning => "bg-slate-800 border-yellow-500 text-yellow-200",
            StatusLevel::Error => "bg-slate-800 border-red-500 text-red-200",
        }
    }
}

/// UI-specific state
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UiState {
    /// Whether the sidebar is collapsed
    pub sidebar_collapsed: bool,
    /// Currently active dialog (if any)
    pub active_dialog: Option<Dialog>,
    /// Status bar message
    pub status_message: Option<StatusMessage>,
    /// Notifications, oldest first
    pub notifications: Vec<Notification>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_dialog(&mut self, dialog: Dialog) {
        self.active_dialog = Some(dialog);
    }

    pub fn close_dialog(&mut self) {
        self.active_dialog = None;
    }

    pub fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            level,
        });
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
    }

    /// Queue a notification; the oldest one drops off past the limit
    pub fn notify(&mut self, text: impl Into<String>, level: StatusLevel) -> Uuid {
        let id = Uuid::new_v4();
        self.notifications.push(Notification {
            id,
            text: text.into(),
            level,
        });
        if self.notifications.len() > MAX_NOTIFICATIONS {
            self.notifications.remove(0);
        }
        id
    }

    pub fn dismiss(&mut self, id: Uuid) {
        self.notifications.retain(|n| n.id != id);
    }
}

// ============================================================================
// Application State
// ============================================================================

/// Main application state container
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Session as last read from the session store
    pub session: SessionView,
    /// Tree the routes were composed from
    pub tree: Option<Arc<TaxonomyTree>>,
    /// Routes for the current tree and role
    pub routes: RouteTable,
    /// Progress of the tree fetch
    pub route_load: RouteLoad,
    /// Path of the active view
    pub current_path: Option<String>,
    /// UI state
    pub ui: UiState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a freshly fetched tree and recompose routes for the session role.
    ///
    /// The current path is kept while it still resolves; otherwise the view
    /// falls back to the first tab.
    pub fn apply_tree(&mut self, tree: Arc<TaxonomyTree>) {
        self.routes = compose_routes(&tree, &self.session.role);
        self.tree = Some(tree);
        self.route_load = RouteLoad::Ready;
        self.ensure_current_path();
    }

    pub fn set_route_error(&mut self, message: impl Into<String>) {
        self.route_load = RouteLoad::Failed(message.into());
    }

    pub fn begin_route_load(&mut self) {
        self.route_load = RouteLoad::Loading;
    }

    /// Replace the session; routes are recomposed since they depend on role
    pub fn set_session(&mut self, session: SessionView) {
        let role_changed = session.role != self.session.role;
        self.session = session;
        if role_changed && let Some(tree) = self.tree.clone() {
            self.apply_tree(tree);
        }
    }

    pub fn navigate(&mut self, path: impl Into<String>) {
        self.current_path = Some(path.into());
    }

    /// Route for the current path, if one is registered
    pub fn current_route(&self) -> Option<&Route> {
        self.current_path
            .as_deref()
            .and_then(|path| self.routes.resolve(path))
    }

    /// Whether the one-time landing page is still due
    pub fn show_landing(&self) -> bool {
        !self.session.seen_landing
    }

    /// Number of tabs in the last fetched tree
    pub fn tab_count(&self) -> usize {
        self.tree.as_ref().map(|tree| tree.len()).unwrap_or(0)
    }

    /// Get window title
    pub fn window_title(&self) -> String {
        match self.current_route() {
            Some(route) => format!("{} - EduTalks", route.label()),
            None => "EduTalks".to_string(),
        }
    }

    fn ensure_current_path(&mut self) {
        let still_valid = self
            .current_path
            .as_deref()
            .is_some_and(|path| self.routes.resolve(path).is_some());
        if !still_valid {
            self.current_path = self.routes.first_tab_path().map(str::to_string);
        }
    }
}

// ============================================================================
// Global State Context
// ============================================================================

/// Global application state signal
pub static APP_STATE: GlobalSignal<AppState> = Signal::global(AppState::new);

// ============================================================================
// State Hooks (for component use)
// ============================================================================

/// Current session view
pub fn use_session() -> SessionView {
    APP_STATE.read().session.clone()
}

/// Current path, if any
pub fn use_current_path() -> Option<String> {
    APP_STATE.read().current_path.clone()
}

/// Shorthand for queuing a notification from an event handler
pub fn notify(text: impl Into<String>, level: StatusLevel) -> Uuid {
    APP_STATE.write().ui.notify(text, level)
}

// ============================================================================
// Tests
// ============================================================================
