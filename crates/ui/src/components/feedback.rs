//! # Feedback Components
//!
//! Loading, empty and error states shared by the content and admin views,
//! plus the modal frame dialogs render into.

use dioxus::prelude::*;

/// Spinner with a caption
#[component]
pub fn LoadingState(#[props(default = "Loading...".to_string())] message: String) -> Element {
    rsx! {
        div {
            class: "flex items-center justify-center gap-3 p-12 text-slate-400",
            span { class: "animate-spin", "⏳" }
            span { "{message}" }
        }
    }
}

/// Placeholder for a list with nothing in it
#[component]
pub fn EmptyState(
    icon: String,
    title: String,
    #[props(default)] message: Option<String>,
) -> Element {
    rsx! {
        div {
            class: "flex flex-col items-center justify-center text-center p-12 text-slate-400",
            span { class: "text-4xl mb-3", "{icon}" }
            h3 { class: "text-lg font-semibold text-slate-200", "{title}" }
            if let Some(message) = message {
                p { class: "mt-1 text-sm max-w-md", "{message}" }
            }
        }
    }
}

/// Error message with an optional retry action
#[component]
pub fn InlineAlert(message: String, #[props(default)] on_retry: Option<EventHandler<()>>) -> Element {
    rsx! {
        div {
            class: "m-6 p-4 bg-red-500/10 border border-red-500/30 rounded-lg flex items-start gap-3",
            role: "alert",
            span { class: "text-red-400", "⚠" }
            div {
                class: "flex-1",
                p { class: "text-sm text-red-300", "{message}" }
            }
            if let Some(on_retry) = on_retry {
                button {
                    r#type: "button",
                    class: "px-3 py-1 text-sm bg-slate-700 hover:bg-slate-600 rounded-lg transition-colors",
                    onclick: move |_| on_retry.call(()),
                    "Retry"
                }
            }
        }
    }
}

/// Marker for items hidden from end users
#[component]
pub fn InactiveBadge() -> Element {
    rsx! {
        span {
            class: "px-1.5 py-0.5 text-[10px] uppercase tracking-wide rounded bg-slate-700 text-slate-400",
            "inactive"
        }
    }
}

/// Small counter pill
#[component]
pub fn CountBadge(count: u64, #[props(default = "docs".to_string())] unit: String) -> Element {
    rsx! {
        span {
            class: "px-2 py-0.5 text-xs rounded-full bg-indigo-500/20 text-indigo-300",
            "{count} {unit}"
        }
    }
}

/// Backdrop plus centred panel
#[component]
pub fn Modal(
    #[props(default = "max-w-lg".to_string())] width: String,
    on_close: EventHandler<()>,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: "fixed inset-0 z-50 flex items-center justify-center",
            div {
                class: "absolute inset-0 bg-black/50",
                onclick: move |_| on_close.call(()),
            }
            div {
                class: "relative bg-slate-800 rounded-lg shadow-xl border border-slate-700 mx-4 w-full {width} max-h-[90vh] overflow-y-auto",
                onclick: move |e| e.stop_propagation(),
                {children}
            }
        }
    }
}
