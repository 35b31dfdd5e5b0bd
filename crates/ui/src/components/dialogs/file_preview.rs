//! # File Preview Dialog
//!
//! Fetches a document when opened and keeps a temporary copy for as long as
//! the dialog is mounted. Closing the dialog (or unmounting it for any other
//! reason) cancels a pending fetch and removes the copy.

use dioxus::prelude::*;
use edutalks_client::{ClientError, FileDownload};
use edutalks_core::PortalError;
use edutalks_taxonomy::FileRecord;

use crate::file_ops::{PreviewContent, PreviewFile, format_size, save_download};
use crate::hooks::use_request_scope;
use crate::services::use_services;
use crate::state::{APP_STATE, StatusLevel, notify};

enum PreviewState {
    Loading,
    Ready {
        download: FileDownload,
        preview: PreviewFile,
    },
    Failed(String),
}

#[component]
pub fn FilePreviewDialog(record: FileRecord) -> Element {
    let services = use_services();
    let scope = use_request_scope();
    let mut state = use_signal(|| PreviewState::Loading);

    use_hook({
        let record = record.clone();
        let client = services.client().clone();
        let scope = scope.clone();
        move || {
            spawn(async move {
                let result = scope.run(client.download_file(record.id)).await;
                let next = match result {
                    Ok(download) => match PreviewFile::create(&download, &record) {
                        Ok(preview) => PreviewState::Ready { download, preview },
                        Err(e) => {
                            tracing::error!("Could not stage preview of {}: {}", record.filename, e);
                            PreviewState::Failed(e.to_string())
                        }
                    },
                    Err(ClientError::Cancelled) => return,
                    Err(e) => {
                        tracing::warn!("Preview of file {} failed: {}", record.id, e);
                        PreviewState::Failed(e.user_message())
                    }
                };
                state.set(next);
            });
        }
    });

    let close = use_callback(move |_: ()| {
        scope.cancel();
        state.set(PreviewState::Loading);
        APP_STATE.write().ui.close_dialog();
    });

    let save = {
        let record = record.clone();
        move |_| {
            let download = match &*state.read() {
                PreviewState::Ready { download, .. } => download.clone(),
                _ => return,
            };
            let record = record.clone();
            spawn(async move {
                match save_download(&download, &record).await {
                    Ok(path) => notify(format!("Saved {}", path.display()), StatusLevel::Success),
                    Err(PortalError::Cancelled) => return,
                    Err(e) => notify(e.to_string(), StatusLevel::Error),
                };
            });
        }
    };

    let body = match &*state.read() {
        PreviewState::Loading => rsx! {
            div {
                class: "flex items-center justify-center gap-3 p-12 text-slate-400",
                span { class: "animate-spin", "⏳" }
                "Fetching document..."
            }
        },
        PreviewState::Failed(message) => rsx! {
            div {
                class: "p-4 bg-red-500/10 border border-red-500/30 rounded-lg text-sm text-red-300",
                "{message}"
            }
        },
        PreviewState::Ready { preview, .. } => {
            let size = format_size(preview.size());
            let content_type = preview.content_type().unwrap_or("unknown type").to_string();
            match preview.content() {
                PreviewContent::Text { body, truncated } => rsx! {
                    p { class: "text-xs text-slate-400 mb-2", "{content_type} · {size}" }
                    pre {
                        class: "max-h-[60vh] overflow-auto p-4 bg-slate-900 rounded-lg text-xs text-slate-200 whitespace-pre-wrap",
                        "{body}"
                    }
                    if *truncated {
                        p { class: "mt-2 text-xs text-amber-300", "Preview truncated; save the file to see all of it." }
                    }
                },
                PreviewContent::Binary => rsx! {
                    div {
                        class: "p-6 bg-slate-900 rounded-lg text-center",
                        p { class: "text-slate-200", "No inline preview for this file type." }
                        p { class: "mt-1 text-xs text-slate-400", "{content_type} · {size}" }
                    }
                },
            }
        }
    };
    let can_save = matches!(&*state.read(), PreviewState::Ready { .. });

    rsx! {
        div {
            class: "file-preview-dialog p-6",

            div {
                class: "flex items-center justify-between mb-4",
                h2 { class: "text-lg font-semibold text-white truncate", "{record.filename}" }
                button {
                    r#type: "button",
                    class: "text-slate-400 hover:text-white",
                    onclick: move |_| close.call(()),
                    "✕"
                }
            }

            {body}

            div {
                class: "flex justify-end gap-3 mt-6",
                button {
                    r#type: "button",
                    class: "px-4 py-2 bg-slate-700 hover:bg-slate-600 rounded-lg transition-colors",
                    onclick: move |_| close.call(()),
                    "Close"
                }
                button {
                    r#type: "button",
                    class: "px-4 py-2 bg-indigo-600 hover:bg-indigo-700 disabled:opacity-50 rounded-lg transition-colors",
                    disabled: !can_save,
                    onclick: save,
                    "Save as..."
                }
            }
        }
    }
}
