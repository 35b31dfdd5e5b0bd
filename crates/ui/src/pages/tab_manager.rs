//! Tab Manager Page
//!
//! Administration of tabs and their sections. Every change goes to the
//! server first; on success the view invalidates its cache, re-fetches the
//! tree and recomposes the application routes from it. Nothing is applied
//! locally before the server confirms.

use dioxus::prelude::*;
use edutalks_client::{ClientError, Mutation};
use edutalks_core::{PortalResult, SectionId, TabId};
use edutalks_taxonomy::{SectionNode, TabNode, TaxonomyTree};

use crate::admin::{AdminEditor, EditorPhase, Resume};
use crate::components::{
    ConfirmDeleteDialog, CountBadge, EditorDialog, EmptyState, InactiveBadge, InlineAlert,
    LoadingState, Modal,
};
use crate::hooks::use_taxonomy;
use crate::state::{APP_STATE, StatusLevel, notify};

/// Notification text for a write the server rejected
fn failure_notice(mutation: &Mutation, message: &str) -> String {
    let (verb, kind) = match mutation {
        Mutation::CreateTab(_) => ("create", "tab"),
        Mutation::UpdateTab(..) => ("save", "tab"),
        Mutation::DeleteTab(_) => ("delete", "tab"),
        Mutation::CreateSection(_) => ("create", "section"),
        Mutation::UpdateSection(..) => ("save", "section"),
        Mutation::DeleteSection(_) => ("delete", "section"),
    };
    format!("Could not {verb} {kind}: {message}")
}

/// Row action raised by the tab list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ManagerAction {
    NewTab,
    EditTab(TabId),
    DeleteTab(TabId),
    NewSection(TabId),
    EditSection(TabId, SectionId),
    DeleteSection(TabId, SectionId),
}

impl ManagerAction {
    fn begin(self, editor: &mut AdminEditor, tree: &TaxonomyTree) -> PortalResult<()> {
        match self {
            ManagerAction::NewTab => editor.begin_create_tab(tree),
            ManagerAction::EditTab(id) => editor.begin_edit_tab(tree, id),
            ManagerAction::DeleteTab(id) => editor.begin_delete_tab(tree, id),
            ManagerAction::NewSection(tab) => editor.begin_create_section(tree, tab),
            ManagerAction::EditSection(tab, section) => editor.begin_edit_section(tree, tab, section),
            ManagerAction::DeleteSection(tab, section) => {
                editor.begin_delete_section(tree, tab, section)
            }
        }
    }
}

#[component]
pub fn TabManagerPage() -> Element {
    let taxonomy = use_taxonomy();
    let mut editor = use_signal(AdminEditor::new);

    let tree = taxonomy.tree.read().clone();

    // Keep the shell's routes in step with what this view fetched
    use_effect({
        let tree_signal = taxonomy.tree;
        move || {
            if let Some(tree) = tree_signal.read().clone() {
                APP_STATE.write().apply_tree(tree);
            }
        }
    });

    let on_action = use_callback({
        let tree_signal = taxonomy.tree;
        move |action: ManagerAction| {
            let Some(tree) = tree_signal.peek().clone() else { return };
            if let Err(e) = action.begin(&mut editor.write(), &tree) {
                notify(e.to_string(), StatusLevel::Warning);
            }
        }
    });

    let submit = use_callback({
        let taxonomy = taxonomy.clone();
        move |_: ()| {
            let Some(current) = taxonomy.tree.peek().clone() else { return };
            let mutation = match editor.write().submit(&current) {
                Ok(mutation) => mutation,
                Err(e) => {
                    tracing::debug!("Form rejected: {}", e);
                    return;
                }
            };

            let taxonomy = taxonomy.clone();
            spawn(async move {
                let client = taxonomy.client().clone();
                let sent = taxonomy.scope().run(mutation.send(&client)).await;
                match sent {
                    Ok(()) => {
                        if let Err(e) = editor.write().finish(Ok(())) {
                            tracing::debug!("Editor already closed: {}", e);
                        }
                        notify(mutation.summary(), StatusLevel::Success);
                    }
                    Err(ClientError::Cancelled) => return,
                    Err(e) => {
                        tracing::warn!("{} failed: {}", mutation.summary(), e);
                        let message = e.user_message();
                        if let Err(e) = editor.write().finish(Err(message.clone())) {
                            tracing::debug!("Editor already closed: {}", e);
                        }
                        notify(failure_notice(&mutation, &message), StatusLevel::Error);
                        return;
                    }
                }

                taxonomy.cache().invalidate();
                match taxonomy.scope().run(taxonomy.cache().read(&client)).await {
                    Ok(fresh) => taxonomy.publish(fresh),
                    Err(ClientError::Cancelled) => {}
                    Err(e) => {
                        tracing::warn!("Re-fetch after change failed: {}", e);
                        notify(
                            format!("Saved, but the list could not be refreshed: {}", e.user_message()),
                            StatusLevel::Warning,
                        );
                    }
                }
            });
        }
    });

    let cancel = move |_| {
        editor.write().cancel();
    };

    let Some(tree) = tree else {
        if let Some(message) = taxonomy.error.read().clone() {
            let taxonomy = taxonomy.clone();
            return rsx! {
                InlineAlert { message, on_retry: move |_| taxonomy.reload() }
            };
        }
        return rsx! { LoadingState { message: "Loading tabs..." } };
    };

    let phase = editor.read().phase().clone();
    let busy = !matches!(phase, EditorPhase::Viewing);
    let nodes: Vec<TabNode> = tree.nodes().to_vec();
    let reload = {
        let taxonomy = taxonomy.clone();
        move |_| taxonomy.reload()
    };
    let refreshing = *taxonomy.loading.read();

    let modal = match phase {
        EditorPhase::Editing { .. }
        | EditorPhase::Submitting {
            resume: Resume::Edit { .. },
            ..
        } => rsx! {
            Modal {
                on_close: cancel,
                EditorDialog { editor, on_submit: submit, on_cancel: cancel }
            }
        },
        EditorPhase::Deleting { .. } | EditorPhase::Submitting { .. } => rsx! {
            Modal {
                on_close: cancel,
                ConfirmDeleteDialog { editor, on_confirm: submit, on_cancel: cancel }
            }
        },
        EditorPhase::Viewing => rsx! {},
    };

    rsx! {
        div {
            class: "tab-manager-page h-full overflow-y-auto p-6",

            // Header
            div {
                class: "flex items-center justify-between mb-6",
                div {
                    h1 { class: "text-2xl font-semibold text-white", "Manage tabs" }
                    p { class: "text-sm text-slate-400", "Tabs and sections appear in the navigation in position order." }
                }
                div {
                    class: "flex gap-2",
                    button {
                        r#type: "button",
                        class: "px-3 py-2 bg-slate-700 hover:bg-slate-600 rounded-lg transition-colors disabled:opacity-50",
                        disabled: refreshing,
                        onclick: reload,
                        if refreshing { "Refreshing..." } else { "Refresh" }
                    }
                    button {
                        r#type: "button",
                        class: "px-3 py-2 bg-indigo-600 hover:bg-indigo-700 rounded-lg transition-colors disabled:opacity-50",
                        disabled: busy,
                        onclick: move |_| on_action.call(ManagerAction::NewTab),
                        "+ New tab"
                    }
                }
            }

            if let Some(message) = taxonomy.error.read().clone() {
                InlineAlert { message }
            }

            if nodes.is_empty() {
                EmptyState {
                    icon: "🗂️",
                    title: "No tabs yet",
                    message: "Create the first tab to start organising content.",
                }
            } else {
                div {
                    class: "space-y-4",
                    for node in nodes.into_iter() {
                        TabCard {
                            key: "{node.tab.id}",
                            node,
                            disabled: busy,
                            on_action,
                        }
                    }
                }
            }

            {modal}
        }
    }
}

#[component]
fn TabCard(node: TabNode, disabled: bool, on_action: EventHandler<ManagerAction>) -> Element {
    let tab_id = node.tab.id;
    let path = node.tab.path();
    let docs = node.docs_count();

    rsx! {
        div {
            class: "bg-slate-800 border border-slate-700 rounded-lg",

            div {
                class: "flex items-center gap-3 px-4 py-3 border-b border-slate-700",
                span { class: "text-xs text-slate-500 w-8", "#{node.tab.position}" }
                div {
                    class: "flex-1 min-w-0",
                    div {
                        class: "flex items-center gap-2",
                        span { class: "font-medium text-white truncate", "{node.tab.title}" }
                        if !node.tab.is_active {
                            InactiveBadge {}
                        }
                    }
                    span { class: "text-xs text-slate-500", "{path}" }
                }
                CountBadge { count: docs }
                RowButton { label: "+ Section", disabled, onclick: move |_| on_action.call(ManagerAction::NewSection(tab_id)) }
                RowButton { label: "Edit", disabled, onclick: move |_| on_action.call(ManagerAction::EditTab(tab_id)) }
                RowButton { label: "Delete", danger: true, disabled, onclick: move |_| on_action.call(ManagerAction::DeleteTab(tab_id)) }
            }

            if node.sections.is_empty() {
                p { class: "px-4 py-3 text-sm text-slate-500", "No sections" }
            } else {
                ul {
                    class: "divide-y divide-slate-700/50",
                    for entry in node.sections.iter().cloned() {
                        SectionRow {
                            key: "{entry.section.id}",
                            tab_id,
                            entry,
                            disabled,
                            on_action,
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn SectionRow(
    tab_id: TabId,
    entry: SectionNode,
    disabled: bool,
    on_action: EventHandler<ManagerAction>,
) -> Element {
    let section_id = entry.section.id;

    rsx! {
        li {
            class: "flex items-center gap-3 px-4 py-2 pl-12",
            span { class: "text-xs text-slate-500 w-8", "#{entry.section.position}" }
            div {
                class: "flex-1 min-w-0 flex items-center gap-2",
                span { class: "text-sm text-slate-200 truncate", "{entry.section.title}" }
                span { class: "text-xs text-slate-500", "{entry.section.slug}" }
                if !entry.section.is_active {
                    InactiveBadge {}
                }
            }
            CountBadge { count: entry.docs_count }
            RowButton { label: "Edit", disabled, onclick: move |_| on_action.call(ManagerAction::EditSection(tab_id, section_id)) }
            RowButton { label: "Delete", danger: true, disabled, onclick: move |_| on_action.call(ManagerAction::DeleteSection(tab_id, section_id)) }
        }
    }
}

#[component]
fn RowButton(
    label: String,
    #[props(default)] danger: bool,
    disabled: bool,
    onclick: EventHandler<MouseEvent>,
) -> Element {
    let color = if danger {
        "text-red-300 hover:bg-red-500/20"
    } else {
        "text-slate-300 hover:bg-slate-700"
    };
    rsx! {
        button {
            r#type: "button",
            class: "px-2 py-1 text-xs rounded transition-colors disabled:opacity-40 disabled:cursor-not-allowed {color}",
            disabled: disabled,
            onclick: move |e| onclick.call(e),
            "{label}"
        }
    }
}
