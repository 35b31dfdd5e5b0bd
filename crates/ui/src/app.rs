//! Main Application Component for EduTalks
//!
//! Root Dioxus component and the shell around the active view: toolbar,
//! navigation sidebar composed from the route table, status bar,
//! notifications and the global dialog overlay.
//!
//! The shell fetches the taxonomy tree once on mount and composes routes
//! from it for the session role. Routes are not re-composed until the tree
//! is fetched again (toolbar reload, or a change made in the tab manager).

use std::time::Duration;

use dioxus::prelude::*;
use edutalks_taxonomy::{ADMIN_TABS_PATH, Route, RouteEntry};

use crate::components::{
    FilePreviewDialog, InlineAlert, LoadingState, Modal, SignInDialog,
};
use crate::hooks::use_taxonomy;
use crate::pages::{LandingPage, NotFoundPage, TabContentPage, TabManagerPage};
use crate::services::use_services;
use crate::state::{APP_STATE, Dialog, Notification, RouteLoad, StatusLevel, notify};

/// How long a notification stays up
const NOTIFICATION_SECS: u64 = 4;

// ============================================================================
// Main App Component
// ============================================================================

/// Root application component
#[component]
pub fn App() -> Element {
    let services = use_services();
    let taxonomy = use_taxonomy();

    use_hook(move || {
        let session = services.session_view();
        tracing::info!(role = %session.role, "EduTalks UI initialized");
        APP_STATE.write().set_session(session);
    });

    // Mirror the shell's fetch into the global route state
    use_effect({
        let tree = taxonomy.tree;
        let error = taxonomy.error;
        let loading = taxonomy.loading;
        move || {
            let tree = tree.read().clone();
            let error = error.read().clone();
            let loading = *loading.read();
            let mut state = APP_STATE.write();
            match (tree, error) {
                (Some(tree), None) => state.apply_tree(tree),
                (Some(_), Some(message)) => {
                    state
                        .ui
                        .set_status(format!("Navigation not refreshed: {message}"), StatusLevel::Warning);
                }
                (None, Some(message)) => state.set_route_error(message),
                (None, None) if loading => state.begin_route_load(),
                (None, None) => {}
            }
        }
    });

    // Window title follows the active route
    use_effect(move || {
        let title = APP_STATE.read().window_title();
        dioxus::desktop::window().set_title(&title);
    });

    let reload = use_callback({
        let taxonomy = taxonomy.clone();
        move |_: ()| {
            tracing::debug!("Reloading navigation");
            APP_STATE.write().ui.clear_status();
            taxonomy.reload();
        }
    });
    let reloading = *taxonomy.loading.read();

    rsx! {
        div {
            class: "app-container h-screen w-screen flex flex-col bg-slate-900 text-slate-100 overflow-hidden",

            // Top Toolbar
            Toolbar { reloading, on_reload: reload }

            // Main content area with sidebar
            div {
                class: "flex flex-1 overflow-hidden",

                // Left Sidebar (navigation)
                Sidebar {}

                // Main Content Area
                MainContent { on_reload: reload }
            }

            // Status Bar
            StatusBar {}

            // Notification stack
            Notifications {}

            // Dialog overlay (if active)
            DialogOverlay {}
        }
    }
}

// ============================================================================
// Toolbar Component
// ============================================================================

/// Top toolbar with session actions
#[component]
fn Toolbar(reloading: bool, on_reload: EventHandler<()>) -> Element {
    let services = use_services();

    let state = APP_STATE.read();
    let authenticated = state.session.authenticated;
    let title = state
        .current_route()
        .map(|route| route.label().to_string())
        .unwrap_or_default();
    drop(state);
    let reload_label = if reloading { "Reloading" } else { "Reload" };

    let sign_out = move |_| match services.sign_out() {
        Ok(view) => {
            APP_STATE.write().set_session(view);
            notify("Signed out", StatusLevel::Info);
        }
        Err(e) => {
            tracing::error!("Failed to clear session: {}", e);
            APP_STATE.write().ui.show_dialog(Dialog::Error(e.to_string()));
        }
    };

    rsx! {
        header {
            class: "toolbar h-12 bg-slate-800 border-b border-slate-700 flex items-center px-4 gap-2 shrink-0",

            // App Logo/Title
            div {
                class: "flex items-center gap-2 mr-4",
                span { class: "text-xl", "🎓" }
                span { class: "font-semibold text-sm hidden sm:inline", "EduTalks" }
            }

            if !title.is_empty() {
                span { class: "text-sm text-slate-400 truncate", "{title}" }
            }

            // Spacer
            div { class: "flex-1" }

            div {
                class: "flex items-center gap-1",

                ToolbarButton {
                    icon: "🔄",
                    label: reload_label,
                    disabled: reloading,
                    onclick: move |_| on_reload.call(()),
                }

                if authenticated {
                    ToolbarButton {
                        icon: "🚪",
                        label: "Sign out",
                        onclick: sign_out,
                    }
                } else {
                    ToolbarButton {
                        icon: "🔑",
                        label: "Sign in",
                        onclick: move |_| APP_STATE.write().ui.show_dialog(Dialog::SignIn),
                    }
                }

                ToolbarButton {
                    icon: "ℹ️",
                    label: "About",
                    onclick: move |_| APP_STATE.write().ui.show_dialog(Dialog::About),
                }
            }
        }
    }
}

/// Toolbar button component
#[component]
fn ToolbarButton(
    icon: &'static str,
    label: &'static str,
    #[props(default = false)] disabled: bool,
    onclick: EventHandler<MouseEvent>,
) -> Element {
    let base_class = "px-2 py-1 rounded text-sm flex items-center gap-1 transition-colors";
    let state_class = if disabled {
        "opacity-50 cursor-not-allowed"
    } else {
        "hover:bg-slate-700 cursor-pointer"
    };

    rsx! {
        button {
            class: "{base_class} {state_class}",
            disabled: disabled,
            title: "{label}",
            onclick: move |e| {
                if !disabled {
                    onclick.call(e);
                }
            },
            span { "{icon}" }
            span { class: "hidden lg:inline", "{label}" }
        }
    }
}

// ============================================================================
// Sidebar Component
// ============================================================================

/// Left sidebar with one entry per composed route
#[component]
fn Sidebar() -> Element {
    let state = APP_STATE.read();
    let collapsed = state.ui.sidebar_collapsed;
    let current = state.current_path.clone();
    let tabs: Vec<RouteEntry> = state.routes.tab_entries().cloned().collect();
    let admin = state
        .routes
        .entries()
        .iter()
        .find(|entry| entry.route == Route::AdminTabs)
        .cloned();
    let loading = state.route_load.is_loading() && state.routes.is_empty();
    let label = state.session.display_label().to_string();
    let role = state.session.role.to_string();
    drop(state);

    rsx! {
        aside {
            class: "sidebar flex flex-col shrink-0 bg-slate-800 border-r border-slate-700 transition-all duration-200",
            style: if collapsed { "width: 60px;" } else { "width: 220px;" },

            // Header with toggle button
            div {
                class: "h-12 flex items-center justify-between px-3 border-b border-slate-700",
                if !collapsed {
                    span {
                        class: "text-sm font-semibold text-slate-300",
                        "Tabs"
                    }
                }
                button {
                    class: "w-8 h-8 flex items-center justify-center rounded hover:bg-slate-700 text-slate-400 hover:text-slate-200 transition-colors",
                    title: if collapsed { "Expand sidebar" } else { "Collapse sidebar" },
                    onclick: move |_| {
                        APP_STATE.write().ui.toggle_sidebar();
                    },
                    if collapsed { "☰" } else { "✕" }
                }
            }

            // Navigation items
            nav {
                class: "flex-1 py-4 overflow-y-auto",

                if loading && !collapsed {
                    p { class: "px-4 text-xs text-slate-500", "Loading..." }
                }

                for entry in tabs.into_iter() {
                    SidebarItem {
                        key: "{entry.path}",
                        active: current.as_deref() == Some(entry.path.as_str()),
                        icon: "📘",
                        entry,
                        collapsed,
                    }
                }

                if let Some(entry) = admin {
                    // Divider
                    div { class: "my-3 mx-3 border-t border-slate-700" }

                    SidebarItem {
                        active: current.as_deref() == Some(ADMIN_TABS_PATH),
                        icon: "🛠️",
                        entry,
                        collapsed,
                    }
                }
            }

            // Session at bottom
            if !collapsed {
                div {
                    class: "border-t border-slate-700 px-4 py-3",
                    p { class: "text-sm text-slate-200 truncate", "{label}" }
                    p { class: "text-xs text-slate-500", "{role}" }
                }
            }
        }
    }
}

/// Sidebar navigation item
#[component]
fn SidebarItem(entry: RouteEntry, icon: &'static str, active: bool, collapsed: bool) -> Element {
    let name = entry.route.label().to_string();
    let path = entry.path.clone();
    let color = if active {
        "bg-indigo-600 text-white"
    } else {
        "text-slate-300 hover:bg-slate-700"
    };
    let layout = if collapsed {
        "justify-center w-11 h-11 mx-auto my-1"
    } else {
        "gap-3 px-4 py-2 mx-2 my-0.5 w-[calc(100%-16px)] text-left"
    };

    rsx! {
        button {
            class: "flex items-center rounded-lg transition-colors {layout} {color}",
            title: "{name}",
            onclick: move |_| {
                APP_STATE.write().navigate(path.clone());
            },
            span { class: "text-lg leading-none shrink-0", "{icon}" }
            if !collapsed {
                span { class: "text-sm font-medium truncate", "{name}" }
            }
        }
    }
}

// ============================================================================
// Main Content Component
// ============================================================================

/// Main content area that renders the view for the current path
#[component]
fn MainContent(on_reload: EventHandler<()>) -> Element {
    let state = APP_STATE.read();
    let show_landing = state.show_landing();
    let route = state.current_route().cloned();
    let path = state.current_path.clone();
    let route_load = state.route_load.clone();
    let role = state.session.role.to_string();
    drop(state);

    let view = if show_landing {
        rsx! { LandingPage {} }
    } else {
        match (route, route_load) {
            // Keyed by role so a sign-in re-fetches with the new credentials
            (Some(Route::Tab { tab_id, .. }), _) => rsx! {
                TabContentPage { key: "{tab_id}-{role}", tab_id }
            },
            (Some(Route::AdminTabs), _) => rsx! { TabManagerPage {} },
            (None, RouteLoad::Loading) => rsx! {
                LoadingState { message: "Loading navigation..." }
            },
            (None, RouteLoad::Failed(message)) => rsx! {
                div {
                    class: "p-6",
                    InlineAlert { message, on_retry: move |_| on_reload.call(()) }
                }
            },
            (None, RouteLoad::Ready) => rsx! { NotFoundPage { path } },
        }
    };

    rsx! {
        main {
            class: "flex-1 overflow-auto bg-slate-900",
            {view}
        }
    }
}

// ============================================================================
// Status Bar Component
// ============================================================================

/// Bottom status bar
#[component]
fn StatusBar() -> Element {
    let state = APP_STATE.read();
    let status = state.ui.status_message.clone();
    let tab_count = state.tab_count();
    let has_tree = state.tree.is_some();
    let authenticated = state.session.authenticated;
    drop(state);

    rsx! {
        footer {
            class: "status-bar h-6 bg-slate-800 border-t border-slate-700 flex items-center px-4 text-xs text-slate-400 shrink-0",

            // Status message
            if let Some(msg) = status {
                span {
                    class: match msg.level {
                        StatusLevel::Info => "text-slate-400",
                        StatusLevel::Success => "text-green-400",
                        StatusLevel::Warning => "text-amber-400",
                        StatusLevel::Error => "text-red-400",
                    },
                    "{msg.text}"
                }
            } else {
                span { "Ready" }
            }

            // Spacer
            div { class: "flex-1" }

            div {
                class: "flex items-center gap-4",
                if has_tree {
                    span { "Tabs: {tab_count}" }
                }
                span { if authenticated { "Signed in" } else { "Guest" } }
            }
        }
    }
}

// ============================================================================
// Notifications
// ============================================================================

/// Stack of transient notifications, newest at the bottom
#[component]
fn Notifications() -> Element {
    let notifications = APP_STATE.read().ui.notifications.clone();

    if notifications.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "fixed bottom-10 right-4 z-40 flex flex-col gap-2 w-80",
            for notification in notifications.into_iter() {
                Toast { key: "{notification.id}", notification }
            }
        }
    }
}

#[component]
fn Toast(notification: Notification) -> Element {
    let id = notification.id;

    use_hook(move || {
        spawn(async move {
            tokio::time::sleep(Duration::from_secs(NOTIFICATION_SECS)).await;
            APP_STATE.write().ui.dismiss(id);
        });
    });

    let classes = notification.level.classes();

    rsx! {
        div {
            class: "flex items-start gap-2 px-3 py-2 rounded-lg border-l-4 shadow-lg text-sm {classes}",
            span { class: "flex-1", "{notification.text}" }
            button {
                class: "text-slate-400 hover:text-white",
                onclick: move |_| APP_STATE.write().ui.dismiss(id),
                "✕"
            }
        }
    }
}

// ============================================================================
// Dialog Overlay Component
// ============================================================================

/// Modal dialog overlay
#[component]
fn DialogOverlay() -> Element {
    let dialog = APP_STATE.read().ui.active_dialog.clone();

    let Some(dialog) = dialog else {
        return rsx! {};
    };

    let width = match &dialog {
        Dialog::FilePreview(_) => "max-w-3xl",
        _ => "max-w-lg",
    };

    rsx! {
        Modal {
            width: width.to_string(),
            on_close: move |_| APP_STATE.write().ui.close_dialog(),
            match dialog {
                Dialog::FilePreview(record) => rsx! {
                    FilePreviewDialog { key: "{record.id}", record }
                },
                Dialog::SignIn => rsx! { SignInDialog {} },
                Dialog::About => rsx! { AboutDialog {} },
                Dialog::Error(message) => rsx! { ErrorDialog { message } },
            }
        }
    }
}

/// About dialog
#[component]
fn AboutDialog() -> Element {
    let services = use_services();
    let base_url = services.client().base_url().to_string();
    let version = crate::VERSION;

    rsx! {
        div {
            class: "p-6",
            h2 { class: "text-xl font-bold mb-4", "About EduTalks" }
            p { class: "text-slate-300 mb-2", "Version {version}" }
            p { class: "text-slate-400 text-sm mb-2", "Tabs, sections and documents served by the EduTalks backend." }
            p { class: "text-slate-500 text-xs mb-4", "Backend: {base_url}" }
            button {
                class: "px-4 py-2 bg-slate-700 hover:bg-slate-600 rounded",
                onclick: move |_| {
                    APP_STATE.write().ui.close_dialog();
                },
                "Close"
            }
        }
    }
}

/// Error dialog
#[component]
fn ErrorDialog(message: String) -> Element {
    rsx! {
        div {
            class: "p-6",
            h2 { class: "text-xl font-bold text-red-400 mb-4", "Error" }
            p { class: "text-slate-300 mb-4", "{message}" }
            button {
                class: "px-4 py-2 bg-slate-700 hover:bg-slate-600 rounded",
                onclick: move |_| {
                    APP_STATE.write().ui.close_dialog();
                },
                "Close"
            }
        }
    }
}
