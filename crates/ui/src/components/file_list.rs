//! # File List Component
//!
//! Documents of one section with preview and download actions.

use std::collections::HashSet;

use dioxus::prelude::*;
use edutalks_client::ClientError;
use edutalks_core::{FileId, PortalError};
use edutalks_taxonomy::FileRecord;

use crate::file_ops::save_download;
use crate::hooks::use_request_scope;
use crate::services::use_services;
use crate::state::{APP_STATE, Dialog, StatusLevel, notify};

/// Icon for a file based on its extension
pub fn file_icon(record: &FileRecord) -> &'static str {
    match record.extension().as_deref() {
        Some("pdf") => "📕",
        Some("doc" | "docx" | "odt" | "rtf") => "📝",
        Some("xls" | "xlsx" | "ods" | "csv") => "📊",
        Some("ppt" | "pptx" | "odp") => "📽️",
        Some("png" | "jpg" | "jpeg" | "gif" | "svg" | "webp") => "🖼️",
        Some("zip" | "tar" | "gz" | "7z") => "🗜️",
        Some("txt" | "md") => "📄",
        _ => "📎",
    }
}

#[component]
pub fn FileList(files: Vec<FileRecord>) -> Element {
    let services = use_services();
    let scope = use_request_scope();
    let mut downloading = use_signal(HashSet::<FileId>::new);

    let start_download = use_callback(move |record: FileRecord| {
        if !downloading.write().insert(record.id) {
            return;
        }
        let client = services.client().clone();
        let scope = scope.clone();
        spawn(async move {
            let result = scope.run(client.download_file(record.id)).await;
            match result {
                Ok(download) => match save_download(&download, &record).await {
                    Ok(path) => {
                        notify(format!("Saved {}", path.display()), StatusLevel::Success);
                    }
                    Err(PortalError::Cancelled) => {}
                    Err(e) => {
                        tracing::error!("Failed to save {}: {}", record.filename, e);
                        notify(e.to_string(), StatusLevel::Error);
                    }
                },
                Err(ClientError::Cancelled) => return,
                Err(e) => {
                    tracing::warn!("Download of file {} failed: {}", record.id, e);
                    notify(e.user_message(), StatusLevel::Error);
                }
            }
            downloading.write().remove(&record.id);
        });
    });

    rsx! {
        ul {
            class: "divide-y divide-slate-700 border border-slate-700 rounded-lg overflow-hidden",
            for record in files.into_iter() {
                FileRow {
                    key: "{record.id}",
                    busy: downloading.read().contains(&record.id),
                    record,
                    on_download: start_download,
                }
            }
        }
    }
}

#[component]
fn FileRow(record: FileRecord, busy: bool, on_download: EventHandler<FileRecord>) -> Element {
    let uploaded = record.uploaded_at.format("%Y-%m-%d").to_string();
    let icon = file_icon(&record);
    let preview_record = record.clone();
    let download_record = record.clone();

    rsx! {
        li {
            class: "flex items-center gap-3 px-4 py-3 bg-slate-800/50 hover:bg-slate-800 transition-colors",

            span { class: "text-xl", "{icon}" }

            div {
                class: "flex-1 min-w-0",
                p { class: "text-sm font-medium text-slate-100 truncate", "{record.filename}" }
                p {
                    class: "text-xs text-slate-400",
                    if let Some(category) = &record.category {
                        span { class: "mr-2", "{category}" }
                    }
                    "Uploaded {uploaded}"
                }
                if let Some(description) = &record.description {
                    p { class: "text-xs text-slate-500 mt-0.5 truncate", "{description}" }
                }
            }

            button {
                r#type: "button",
                class: "px-3 py-1 text-sm bg-slate-700 hover:bg-slate-600 rounded-lg transition-colors",
                onclick: move |_| {
                    APP_STATE.write().ui.show_dialog(Dialog::FilePreview(preview_record.clone()));
                },
                "Preview"
            }

            button {
                r#type: "button",
                class: "px-3 py-1 text-sm bg-indigo-600 hover:bg-indigo-700 disabled:opacity-50 rounded-lg transition-colors",
                disabled: busy,
                onclick: move |_| on_download.call(download_record.clone()),
                if busy { "Downloading..." } else { "Download" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> FileRecord {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "filename": name,
            "uploaded_at": "2024-03-01T10:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_file_icon_by_extension() {
        assert_eq!(file_icon(&record("Syllabus.PDF")), "📕");
        assert_eq!(file_icon(&record("grades.xlsx")), "📊");
        assert_eq!(file_icon(&record("README")), "📎");
    }
}
