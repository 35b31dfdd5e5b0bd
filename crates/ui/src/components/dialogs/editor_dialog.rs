//! # Tab / Section Editor Dialog
//!
//! Create and edit form for tabs and sections. Reads and writes the form
//! held by the view's [`AdminEditor`]; submission is handed back to the view,
//! which owns the request scope and the cache.
//!
//! New items get a slug suggested from the title until the slug is edited
//! by hand.

use dioxus::prelude::*;
use edutalks_core::Slug;
use edutalks_taxonomy::suggest_slug;

use crate::admin::{AdminEditor, EditorForm};
use crate::components::inputs::{PositionInput, TextArea, TextInput, Toggle};

#[derive(Props, Clone, PartialEq)]
pub struct EditorDialogProps {
    /// Editor of the owning view
    pub editor: Signal<AdminEditor>,

    /// Submit the form
    pub on_submit: EventHandler<()>,

    /// Close without saving
    pub on_cancel: EventHandler<()>,
}

#[component]
pub fn EditorDialog(props: EditorDialogProps) -> Element {
    let mut editor = props.editor;
    let mut slug_touched = use_signal(|| false);

    let snapshot = editor.read();
    let Some((target, form)) = snapshot.edit_form() else {
        return rsx! {};
    };
    let form = form.clone();
    let submitting = snapshot.is_submitting();
    let server_error = snapshot.form_error().map(str::to_string);
    drop(snapshot);

    let is_section = matches!(form, EditorForm::Section(_));
    let is_new = target.is_new();
    let heading = target.heading();
    let kind = if is_section { "section" } else { "tab" };

    let slug_error = slug_hint(form.slug());
    let can_submit = !submitting
        && !form.title().trim().is_empty()
        && !form.slug().trim().is_empty()
        && slug_error.is_none();

    let on_title_change = move |value: String| {
        let mut guard = editor.write();
        if let Some(form) = guard.form_mut() {
            if is_new && !*slug_touched.peek() {
                form.set_slug(suggest_slug(&value));
            }
            form.set_title(value);
        }
    };

    let on_slug_change = move |value: String| {
        slug_touched.set(true);
        if let Some(form) = editor.write().form_mut() {
            form.set_slug(value);
        }
    };

    rsx! {
        div {
            class: "editor-dialog p-6",

            // Header
            div {
                class: "flex items-center justify-between mb-6",
                h2 { class: "text-xl font-semibold text-white", "{heading}" }
                button {
                    r#type: "button",
                    class: "text-slate-400 hover:text-white",
                    disabled: submitting,
                    onclick: move |_| props.on_cancel.call(()),
                    "✕"
                }
            }

            // Server error
            if let Some(message) = server_error {
                div {
                    class: "mb-4 p-3 bg-red-500/10 border border-red-500/30 rounded-lg text-sm text-red-300",
                    "{message}"
                }
            }

            form {
                class: "space-y-4",
                onsubmit: move |e| {
                    e.prevent_default();
                    if can_submit {
                        props.on_submit.call(());
                    }
                },

                TextInput {
                    value: form.title().to_string(),
                    label: "Title",
                    placeholder: if is_section { "e.g., Past papers" } else { "e.g., Legal documents" },
                    required: true,
                    disabled: submitting,
                    on_change: on_title_change,
                }

                TextInput {
                    value: form.slug().to_string(),
                    label: "Slug",
                    prefix: "/",
                    help_text: format!("URL segment for this {kind}; lowercase letters, digits and hyphens"),
                    required: true,
                    disabled: submitting,
                    error: slug_error,
                    on_change: on_slug_change,
                }

                if is_section {
                    TextArea {
                        value: form.description().unwrap_or_default().to_string(),
                        label: "Description",
                        placeholder: "Shown under the section title",
                        disabled: submitting,
                        on_change: move |value: String| {
                            if let Some(form) = editor.write().form_mut() {
                                form.set_description(value);
                            }
                        },
                    }
                }

                PositionInput {
                    value: form.position(),
                    label: "Position",
                    help_text: "Lower positions are listed first",
                    disabled: submitting,
                    on_change: move |position| {
                        if let Some(form) = editor.write().form_mut() {
                            form.set_position(position);
                        }
                    },
                }

                Toggle {
                    checked: form.is_active(),
                    label: "Active",
                    help_text: format!("Inactive {kind}s are hidden from users but kept"),
                    disabled: submitting,
                    on_change: move |active| {
                        if let Some(form) = editor.write().form_mut() {
                            form.set_active(active);
                        }
                    },
                }

                // Actions
                div {
                    class: "flex justify-end gap-3 pt-2",

                    button {
                        r#type: "button",
                        class: "px-4 py-2 bg-slate-700 hover:bg-slate-600 rounded-lg transition-colors",
                        disabled: submitting,
                        onclick: move |_| props.on_cancel.call(()),
                        "Cancel"
                    }

                    button {
                        r#type: "submit",
                        class: "px-4 py-2 bg-indigo-600 hover:bg-indigo-700 disabled:bg-indigo-600/50 disabled:cursor-not-allowed rounded-lg transition-colors flex items-center gap-2",
                        disabled: !can_submit,
                        if submitting {
                            span { class: "animate-spin", "⏳" }
                            "Saving..."
                        } else if is_new {
                            "Create"
                        } else {
                            "Save"
                        }
                    }
                }
            }
        }
    }
}

/// Inline slug problem, if any; an empty slug is reported only on submit
fn slug_hint(slug: &str) -> Option<String> {
    let slug = slug.trim();
    if slug.is_empty() || Slug::is_valid(slug) {
        None
    } else {
        Some("Use lowercase letters, digits and single hyphens".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_hint() {
        assert_eq!(slug_hint(""), None);
        assert_eq!(slug_hint("past-papers"), None);
        assert!(slug_hint("Past Papers").is_some());
        assert!(slug_hint("double--hyphen").is_some());
    }
}
