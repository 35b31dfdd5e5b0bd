//! Fallback views for paths without content

use dioxus::prelude::*;

use crate::components::EmptyState;
use crate::state::APP_STATE;

/// No route matched the current path
#[component]
pub fn NotFoundPage(path: Option<String>) -> Element {
    let first_tab = APP_STATE.read().routes.first_tab_path().map(str::to_string);

    let Some(first_tab) = first_tab else {
        return rsx! {
            EmptyState {
                icon: "📭",
                title: "No content available yet",
                message: "Tabs appear here once an administrator creates them.",
            }
        };
    };

    let message = match path {
        Some(path) => format!("Nothing lives at {path}."),
        None => "Nothing lives here.".to_string(),
    };

    rsx! {
        div {
            class: "flex flex-col items-center",
            EmptyState { icon: "🧭", title: "Page not found", message }
            button {
                r#type: "button",
                class: "px-4 py-2 bg-slate-700 hover:bg-slate-600 rounded-lg transition-colors",
                onclick: move |_| APP_STATE.write().navigate(first_tab.clone()),
                "Go to first tab"
            }
        }
    }
}
