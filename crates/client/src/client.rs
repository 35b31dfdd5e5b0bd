//! HTTP client for the EduTalks REST API
//!
//! ```rust,ignore
//! let client = ApiClient::new(&ClientConfig::load()?, store.auth())?;
//! let tree = client.fetch_tree().await?;
//! client.create_tab(&TabInput { .. }).await?;
//! ```

use std::time::Duration;

use edutalks_core::{FileId, SectionId, TabId, Validatable};
use edutalks_taxonomy::{
    FileRecord, SectionInput, TabInput, TaxonomyTree, decode_files, decode_tree, error_message,
};
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE, HeaderMap};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::AuthContext;

pub const TREE_PATH: &str = "/api/taxonomy/tree";
pub const ADMIN_TABS_API: &str = "/api/admin/tabs";
pub const ADMIN_SECTIONS_API: &str = "/api/admin/sections";
pub const ADMIN_FILES_API: &str = "/api/admin/files";
pub const FILES_API: &str = "/api/files";

/// Bytes of a downloaded file plus what the server said about them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDownload {
    pub file_id: FileId,
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    /// Filename from `Content-Disposition`, if any
    pub filename: Option<String>,
}

impl FileDownload {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// ============================================================================
// API Client
// ============================================================================

/// Typed client for the taxonomy, admin and file endpoints.
///
/// Every request carries the bearer token currently held by the
/// [`AuthContext`]. Without a token the request is still sent and the
/// server's 401 comes back as [`ClientError::Api`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    auth: AuthContext,
}

impl ApiClient {
    /// Create a client from configuration and an auth handle
    pub fn new(config: &ClientConfig, auth: AuthContext) -> ClientResult<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.normalized_base_url().to_string(),
            auth,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match self.auth.bearer_token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    // ========================================================================
    // Generic request helpers
    // ========================================================================

    /// Send a request and return headers and body of a 2xx response
    async fn send(&self, req: RequestBuilder) -> ClientResult<(HeaderMap, Vec<u8>)> {
        let response = self.authorize(req).send().await?;
        let status = response.status();
        let url = response.url().path().to_string();

        if status.is_success() {
            debug!(%status, path = %url, "request succeeded");
            let headers = response.headers().clone();
            let body = response.bytes().await?.to_vec();
            Ok((headers, body))
        } else {
            let body = response.bytes().await.unwrap_or_default();
            let message = error_message(&body);
            warn!(%status, path = %url, %message, "request failed");
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    async fn get_bytes(&self, path: &str) -> ClientResult<(HeaderMap, Vec<u8>)> {
        self.send(self.client.get(self.url(path))).await
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> ClientResult<()> {
        self.send(self.client.post(self.url(path)).json(body))
            .await
            .map(|_| ())
    }

    async fn patch<B: Serialize>(&self, path: &str, body: &B) -> ClientResult<()> {
        self.send(self.client.patch(self.url(path)).json(body))
            .await
            .map(|_| ())
    }

    async fn delete(&self, path: &str) -> ClientResult<()> {
        self.send(self.client.delete(self.url(path)))
            .await
            .map(|_| ())
    }

    // ========================================================================
    // Taxonomy
    // ========================================================================

    /// Fetch the whole tab → section tree.
    ///
    /// GET /api/taxonomy/tree
    pub async fn fetch_tree(&self) -> ClientResult<TaxonomyTree> {
        let (_, body) = self.get_bytes(TREE_PATH).await?;
        let tree = decode_tree(&body).map_err(|e| ClientError::Parse(e.to_string()))?;
        debug!(tabs = tree.len(), "fetched taxonomy tree");
        Ok(tree)
    }

    /// Fetch the flat list of every file.
    ///
    /// GET /api/admin/files
    pub async fn list_files(&self) -> ClientResult<Vec<FileRecord>> {
        let (_, body) = self.get_bytes(ADMIN_FILES_API).await?;
        let files = decode_files(&body).map_err(|e| ClientError::Parse(e.to_string()))?;
        debug!(files = files.len(), "fetched file list");
        Ok(files)
    }

    // ========================================================================
    // Tab administration
    // ========================================================================

    /// POST /api/admin/tabs
    pub async fn create_tab(&self, input: &TabInput) -> ClientResult<()> {
        input.validate()?;
        self.post(ADMIN_TABS_API, input).await
    }

    /// PATCH /api/admin/tabs/{id}
    pub async fn update_tab(&self, id: TabId, input: &TabInput) -> ClientResult<()> {
        input.validate()?;
        self.patch(&format!("{ADMIN_TABS_API}/{id}"), input).await
    }

    /// DELETE /api/admin/tabs/{id}
    pub async fn delete_tab(&self, id: TabId) -> ClientResult<()> {
        self.delete(&format!("{ADMIN_TABS_API}/{id}")).await
    }

    // ========================================================================
    // Section administration
    // ========================================================================

    /// POST /api/admin/sections
    pub async fn create_section(&self, input: &SectionInput) -> ClientResult<()> {
        input.validate()?;
        self.post(ADMIN_SECTIONS_API, input).await
    }

    /// PATCH /api/admin/sections/{id}
    pub async fn update_section(&self, id: SectionId, input: &SectionInput) -> ClientResult<()> {
        input.validate()?;
        self.patch(&format!("{ADMIN_SECTIONS_API}/{id}"), input)
            .await
    }

    /// DELETE /api/admin/sections/{id}
    pub async fn delete_section(&self, id: SectionId) -> ClientResult<()> {
        self.delete(&format!("{ADMIN_SECTIONS_API}/{id}")).await
    }

    // ========================================================================
    // Files
    // ========================================================================

    /// Fetch the bytes of one file (preview and download).
    ///
    /// GET /api/files/{id}
    pub async fn download_file(&self, id: FileId) -> ClientResult<FileDownload> {
        let (headers, bytes) = self.get_bytes(&format!("{FILES_API}/{id}")).await?;
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let filename = headers
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(disposition_filename);
        debug!(file_id = %id, bytes = bytes.len(), "downloaded file");
        Ok(FileDownload {
            file_id: id,
            bytes,
            content_type,
            filename,
        })
    }
}

/// Extract `filename` from a `Content-Disposition` header value
fn disposition_filename(value: &str) -> Option<String> {
    value.split(';').map(str::trim).find_map(|part| {
        let (key, raw) = part.split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("filename") {
            return None;
        }
        let name = raw.trim().trim_matches('"');
        (!name.is_empty()).then(|| name.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disposition_filename() {
        assert_eq!(
            disposition_filename("attachment; filename=\"syllabus.pdf\"").as_deref(),
            Some("syllabus.pdf")
        );
        assert_eq!(
            disposition_filename("inline; FILENAME=notes.txt").as_deref(),
            Some("notes.txt")
        );
        assert_eq!(disposition_filename("inline"), None);
        assert_eq!(disposition_filename("attachment; filename=\"\""), None);
    }

    #[test]
    fn test_base_url_is_normalized() {
        let config = ClientConfig::with_base_url("http://localhost:8000/");
        let client = ApiClient::new(&config, AuthContext::anonymous()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url(TREE_PATH), "http://localhost:8000/api/taxonomy/tree");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ClientConfig::with_base_url("localhost:8000");
        let err = ApiClient::new(&config, AuthContext::anonymous()).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }
}
