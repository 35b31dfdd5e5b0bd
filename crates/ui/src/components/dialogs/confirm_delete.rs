//! # Confirm Delete Dialog Component
//!
//! Confirmation for deleting a tab or a section. Shows what goes with it
//! (sections of a tab, document count of a section) and requires an
//! explicit click before the view sends the delete.

use dioxus::prelude::*;

use crate::admin::{AdminEditor, DeleteTarget};

#[derive(Props, Clone, PartialEq)]
pub struct ConfirmDeleteDialogProps {
    /// Editor of the owning view
    pub editor: Signal<AdminEditor>,

    /// Deletion confirmed
    pub on_confirm: EventHandler<()>,

    /// Dialog dismissed
    pub on_cancel: EventHandler<()>,
}

/// Confirmation dialog for delete operations
#[component]
pub fn ConfirmDeleteDialog(props: ConfirmDeleteDialogProps) -> Element {
    let editor = props.editor.read();
    let Some(target) = editor.delete_target().cloned() else {
        return rsx! {};
    };
    let deleting = editor.is_submitting();
    drop(editor);

    let title = format!("Delete {}?", target.kind());
    let item_name = target.title().to_string();
    let consequences = consequences(&target);

    rsx! {
        div {
            class: "confirm-delete-dialog p-6",

            // Header with warning icon
            div {
                class: "flex items-start gap-4 mb-6",

                div {
                    class: "flex-shrink-0 w-12 h-12 rounded-full bg-red-500/20 flex items-center justify-center",
                    span { class: "text-2xl", "⚠️" }
                }

                div {
                    class: "flex-1",
                    h2 { class: "text-xl font-bold text-red-400 mb-2", "{title}" }
                    p { class: "text-slate-300", "This cannot be undone from here." }
                }
            }

            // Item being deleted
            div {
                class: "mb-4 p-3 bg-slate-700/50 rounded-lg border border-slate-600",
                div {
                    class: "flex items-center gap-2",
                    span { class: "text-slate-400", "Item:" }
                    span { class: "font-medium text-white", "{item_name}" }
                }
            }

            if !consequences.is_empty() {
                div {
                    class: "mb-6 p-3 bg-amber-500/10 border border-amber-500/30 rounded-lg",
                    ul {
                        class: "list-disc list-inside text-sm text-amber-200/80",
                        for line in consequences.iter() {
                            li { "{line}" }
                        }
                    }
                }
            }

            // Actions
            div {
                class: "flex justify-end gap-3",

                button {
                    r#type: "button",
                    class: "px-4 py-2 bg-slate-700 hover:bg-slate-600 rounded-lg transition-colors",
                    disabled: deleting,
                    onclick: move |_| props.on_cancel.call(()),
                    "Cancel"
                }

                button {
                    r#type: "button",
                    class: "px-4 py-2 bg-red-600 hover:bg-red-700 disabled:bg-red-600/50 disabled:cursor-not-allowed rounded-lg transition-colors flex items-center gap-2",
                    disabled: deleting,
                    onclick: move |_| props.on_confirm.call(()),

                    if deleting {
                        span { class: "animate-spin", "⏳" }
                        "Deleting..."
                    } else {
                        span { "🗑️" }
                        "Delete"
                    }
                }
            }
        }
    }
}

/// What else a delete affects, as shown to the admin
fn consequences(target: &DeleteTarget) -> Vec<String> {
    match target {
        DeleteTarget::Tab { section_count, .. } => match *section_count {
            0 => vec![],
            1 => vec!["Its section goes with it".to_string()],
            n => vec![format!("Its {n} sections go with it")],
        },
        DeleteTarget::Section { docs_count, .. } => match *docs_count {
            0 => vec![],
            n => vec![format!(
                "It has {n} document{} attached",
                if n == 1 { "" } else { "s" }
            )],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edutalks_core::{SectionId, TabId};

    #[test]
    fn test_consequences() {
        let tab = |section_count| DeleteTarget::Tab {
            id: TabId(1),
            title: "Legal".to_string(),
            section_count,
        };
        assert!(consequences(&tab(0)).is_empty());
        assert_eq!(consequences(&tab(3)), vec!["Its 3 sections go with it"]);

        let section = DeleteTarget::Section {
            tab: TabId(1),
            id: SectionId(10),
            title: "Forms".to_string(),
            docs_count: 1,
        };
        assert_eq!(
            consequences(&section),
            vec!["It has 1 document attached"]
        );
    }
}
