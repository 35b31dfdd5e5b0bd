//! Landing Page Component
//!
//! Shown once, on the first launch of a session. Dismissing it records the
//! fact in the persisted session and opens the first tab.

use dioxus::prelude::*;

use crate::services::use_services;
use crate::state::{APP_STATE, StatusLevel};

#[component]
pub fn LandingPage() -> Element {
    let services = use_services();

    let state = APP_STATE.read();
    let tab_count = state.tab_count();
    let signed_in = state.session.authenticated;
    let label = state.session.display_label().to_string();
    drop(state);

    let get_started = move |_| {
        if let Err(e) = services.mark_landing_seen() {
            tracing::warn!("Could not persist landing flag: {}", e);
            APP_STATE
                .write()
                .ui
                .set_status("Could not save your preferences", StatusLevel::Warning);
        }
        let mut state = APP_STATE.write();
        state.session.seen_landing = true;
        if let Some(first) = state.routes.first_tab_path().map(str::to_string) {
            state.navigate(first);
        }
    };

    rsx! {
        div {
            class: "landing-page h-full flex flex-col items-center justify-center p-8 text-center",

            div {
                class: "max-w-xl",
                div { class: "text-6xl mb-6", "🎓" }
                h1 { class: "text-3xl font-bold text-white mb-3", "Welcome to EduTalks" }
                p {
                    class: "text-slate-400 mb-8",
                    "Course material organised by tab and section. Pick a tab in the sidebar to browse its sections and documents."
                }

                div {
                    class: "grid grid-cols-2 gap-4 mb-8 text-left",
                    InfoCard {
                        icon: "🗂️",
                        title: "Tabs",
                        text: if tab_count == 0 {
                            "No tabs yet".to_string()
                        } else {
                            format!("{tab_count} tab{} available", if tab_count == 1 { "" } else { "s" })
                        },
                    }
                    InfoCard {
                        icon: "👤",
                        title: "Session",
                        text: if signed_in { format!("Signed in as {label}") } else { "Browsing as guest".to_string() },
                    }
                }

                button {
                    r#type: "button",
                    class: "px-6 py-3 bg-indigo-600 hover:bg-indigo-700 rounded-lg font-medium transition-colors",
                    onclick: get_started,
                    "Get started"
                }
            }
        }
    }
}

#[component]
fn InfoCard(icon: String, title: String, text: String) -> Element {
    rsx! {
        div {
            class: "p-4 bg-slate-800 border border-slate-700 rounded-lg",
            div {
                class: "flex items-center gap-2 mb-1",
                span { "{icon}" }
                span { class: "font-medium text-slate-200", "{title}" }
            }
            p { class: "text-sm text-slate-400", "{text}" }
        }
    }
}
