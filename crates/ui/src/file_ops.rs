//! File Operations for EduTalks
//!
//! Saving downloaded documents through a native `rfd` dialog, and scoped
//! preview copies that live in a temporary directory until the preview
//! closes.

use std::path::{Path, PathBuf};

use edutalks_client::FileDownload;
use edutalks_core::{PortalError, PortalResult};
use edutalks_taxonomy::FileRecord;
use rfd::AsyncFileDialog;
use tempfile::TempDir;

/// Largest text body rendered inline by the preview
pub const MAX_INLINE_TEXT: usize = 256 * 1024;

/// Extensions previewed as text regardless of the reported content type
const TEXT_EXTENSIONS: &[&str] = &["txt", "md", "csv", "json", "log", "xml", "html"];

// ============================================================================
// File Dialog Functions
// ============================================================================

/// Ask where to save a document
///
/// Returns None if the dialog was cancelled.
pub async fn show_save_dialog(file_name: &str) -> Option<PathBuf> {
    let mut dialog = AsyncFileDialog::new()
        .set_title("Save Document")
        .set_file_name(file_name);

    if let Some(dir) = dirs::download_dir().filter(|d| d.exists()) {
        dialog = dialog.set_directory(dir);
    }

    let file = dialog.save_file().await?;
    Some(file.path().to_path_buf())
}

/// Save a downloaded document where the user picks
pub async fn save_download(download: &FileDownload, record: &FileRecord) -> PortalResult<PathBuf> {
    let name = download_name(download, record);
    let path = show_save_dialog(&name)
        .await
        .ok_or(PortalError::Cancelled)?;
    write_file(&path, &download.bytes)?;
    tracing::info!("Saved {} ({} bytes) to {}", name, download.len(), path.display());
    Ok(path)
}

/// Name offered in the save dialog: the server's choice, else the record's
pub fn download_name(download: &FileDownload, record: &FileRecord) -> String {
    let name = download
        .filename
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or(&record.filename);
    sanitize_file_name(name)
}

/// Strip path separators and control characters from a server-supplied name
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .filter(|c| !c.is_control())
        .collect::<String>()
        .trim()
        .trim_start_matches('.')
        .to_string();
    if cleaned.is_empty() {
        "document".to_string()
    } else {
        cleaned
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> PortalResult<()> {
    std::fs::write(path, bytes).map_err(|e| PortalError::FileWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

// ============================================================================
// Preview Files
// ============================================================================

/// How a preview renders its content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewContent {
    /// Decoded text, possibly cut at [`MAX_INLINE_TEXT`]
    Text { body: String, truncated: bool },
    /// Anything else; only metadata and a save action are offered
    Binary,
}

/// Copy of a downloaded document kept for the lifetime of a preview.
///
/// The temporary directory, and the copy in it, are removed when this value
/// is dropped.
#[derive(Debug)]
pub struct PreviewFile {
    _dir: TempDir,
    path: PathBuf,
    content_type: Option<String>,
    size: usize,
    content: PreviewContent,
}

impl PreviewFile {
    /// Write the download into a fresh temporary directory
    pub fn create(download: &FileDownload, record: &FileRecord) -> PortalResult<Self> {
        let dir = tempfile::Builder::new().prefix("edutalks-preview-").tempdir()?;
        let path = dir.path().join(download_name(download, record));
        write_file(&path, &download.bytes)?;

        let content = if is_text(download.content_type.as_deref(), record) {
            text_content(&download.bytes)
        } else {
            PreviewContent::Binary
        };
        tracing::debug!("Preview copy at {}", path.display());

        Ok(Self {
            _dir: dir,
            path,
            content_type: download.content_type.clone(),
            size: download.len(),
            content,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn content(&self) -> &PreviewContent {
        &self.content
    }
}

fn is_text(content_type: Option<&str>, record: &FileRecord) -> bool {
    let by_type = content_type.is_some_and(|ct| {
        let ct = ct.to_ascii_lowercase();
        ct.starts_with("text/") || ct.starts_with("application/json")
    });
    by_type
        || record
            .extension()
            .is_some_and(|ext| TEXT_EXTENSIONS.contains(&ext.as_str()))
}

fn text_content(bytes: &[u8]) -> PreviewContent {
    let truncated = bytes.len() > MAX_INLINE_TEXT;
    let shown = &bytes[..bytes.len().min(MAX_INLINE_TEXT)];
    PreviewContent::Text {
        body: String::from_utf8_lossy(shown).into_owned(),
        truncated,
    }
}

/// Human-readable byte count
pub fn format_size(bytes: usize) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

// ============================================================================
// Tests
// ============================================================================
