//! Tab Content Page
//!
//! Content of one tab route. The tab is resolved against a tree fetched
//! when the view mounts, so a tab deactivated or deleted since the routes
//! were composed shows a "no longer available" state instead of stale data.
//!
//! Files are listed once per mount and grouped by section; switching
//! sections does not re-fetch.

use dioxus::prelude::*;
use edutalks_client::ClientError;
use edutalks_core::{SectionId, TabId};
use edutalks_taxonomy::{SectionIndex, SectionNode, resolve_tab_content, visible_sections};

use crate::components::{
    CountBadge, EmptyState, FileList, InactiveBadge, InlineAlert, LoadingState,
};
use crate::hooks::{use_request_scope, use_taxonomy};
use crate::services::use_services;
use crate::state::{APP_STATE, Dialog};

enum FileLoad {
    Loading,
    Ready(SectionIndex),
    Failed { message: String, unauthorized: bool },
}

#[component]
pub fn TabContentPage(tab_id: TabId) -> Element {
    let taxonomy = use_taxonomy();
    let services = use_services();
    let scope = use_request_scope();
    let mut files = use_signal(|| FileLoad::Loading);
    let mut selected = use_signal(|| None::<SectionId>);

    let load_files = use_callback(move |_: ()| {
        let client = services.client().clone();
        let scope = scope.clone();
        files.set(FileLoad::Loading);
        spawn(async move {
            match scope.run(client.list_files()).await {
                Ok(records) => {
                    tracing::debug!("Listed {} files", records.len());
                    files.set(FileLoad::Ready(SectionIndex::build(records)));
                }
                Err(ClientError::Cancelled) => {}
                Err(e) => {
                    tracing::warn!("Failed to list files: {}", e);
                    files.set(FileLoad::Failed {
                        message: e.user_message(),
                        unauthorized: e.is_unauthorized(),
                    });
                }
            }
        });
    });
    use_hook(move || load_files.call(()));

    let is_admin = APP_STATE.read().session.is_admin();
    let tree = taxonomy.tree.read().clone();
    let error = taxonomy.error.read().clone();

    let Some(tree) = tree else {
        if let Some(message) = error {
            let taxonomy = taxonomy.clone();
            return rsx! {
                InlineAlert { message, on_retry: move |_| taxonomy.reload() }
            };
        }
        return rsx! { LoadingState { message: "Loading tab..." } };
    };

    let Some(node) = resolve_tab_content(&tree, tab_id) else {
        return rsx! {
            EmptyState {
                icon: "🚫",
                title: "This tab is no longer available",
                message: "It may have been removed or hidden. Pick another tab from the sidebar.",
            }
        };
    };

    let sections: Vec<SectionNode> = if is_admin {
        node.sections.clone()
    } else {
        visible_sections(node).into_iter().cloned().collect()
    };
    let current = (*selected.read())
        .filter(|id| sections.iter().any(|s| s.section.id == *id))
        .or_else(|| sections.first().map(|s| s.section.id));
    let active = current.and_then(|id| sections.iter().find(|s| s.section.id == id).cloned());
    let title = node.tab.title.clone();
    let total_docs = node.docs_count();

    rsx! {
        div {
            class: "tab-content-page h-full flex flex-col",

            // Header
            div {
                class: "px-6 py-4 border-b border-slate-700 flex items-center gap-3",
                h1 { class: "text-2xl font-semibold text-white", "{title}" }
                CountBadge { count: total_docs }
                if let Some(message) = taxonomy.error.read().clone() {
                    span { class: "text-xs text-amber-300", "Refresh failed: {message}" }
                }
            }

            if sections.is_empty() {
                EmptyState {
                    icon: "🗂️",
                    title: "No sections in this tab yet",
                }
            } else {
                div {
                    class: "flex-1 flex min-h-0",

                    // Section list
                    nav {
                        class: "w-64 shrink-0 border-r border-slate-700 overflow-y-auto p-3 space-y-1",
                        for entry in sections.iter() {
                            SectionButton {
                                key: "{entry.section.id}",
                                entry: entry.clone(),
                                active: Some(entry.section.id) == current,
                                on_select: move |id| selected.set(Some(id)),
                            }
                        }
                    }

                    // Section documents
                    div {
                        class: "flex-1 overflow-y-auto p-6",
                        if let Some(entry) = active {
                            h2 { class: "text-xl font-semibold text-white", "{entry.section.title}" }
                            if let Some(description) = &entry.section.description {
                                p { class: "mt-1 text-sm text-slate-400", "{description}" }
                            }
                            div {
                                class: "mt-6",
                                SectionFiles { section: entry.section.id, files, on_retry: load_files }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn SectionButton(entry: SectionNode, active: bool, on_select: EventHandler<SectionId>) -> Element {
    let id = entry.section.id;
    let class = if active {
        "bg-indigo-600/20 text-indigo-200 border-indigo-500/50"
    } else {
        "text-slate-300 border-transparent hover:bg-slate-800"
    };

    rsx! {
        button {
            r#type: "button",
            class: "w-full flex items-center gap-2 px-3 py-2 rounded-lg border text-left text-sm transition-colors {class}",
            onclick: move |_| on_select.call(id),
            span { class: "flex-1 truncate", "{entry.section.title}" }
            if !entry.section.is_active {
                InactiveBadge {}
            }
            CountBadge { count: entry.docs_count, unit: "" }
        }
    }
}

#[component]
fn SectionFiles(section: SectionId, files: Signal<FileLoad>, on_retry: EventHandler<()>) -> Element {
    match &*files.read() {
        FileLoad::Loading => rsx! { LoadingState { message: "Loading documents..." } },
        FileLoad::Failed {
            message,
            unauthorized,
        } => {
            let unauthorized = *unauthorized;
            rsx! {
                InlineAlert { message: message.clone(), on_retry: move |_| on_retry.call(()) }
                if unauthorized {
                    div {
                        class: "mx-6",
                        button {
                            r#type: "button",
                            class: "px-4 py-2 bg-indigo-600 hover:bg-indigo-700 rounded-lg transition-colors",
                            onclick: move |_| APP_STATE.write().ui.show_dialog(Dialog::SignIn),
                            "Sign in"
                        }
                    }
                }
            }
        }
        FileLoad::Ready(index) => {
            let records = index.files_for(section).to_vec();
            if records.is_empty() {
                rsx! {
                    EmptyState {
                        icon: "📂",
                        title: "No documents in this section yet",
                    }
                }
            } else {
                rsx! { FileList { files: records } }
            }
        }
    }
}
