//! Decoding of backend payloads
//!
//! The backend wraps list payloads in one or two `data` envelopes
//! (`{ "data": { "data": [...] } }` for the taxonomy tree). This module
//! unwraps those envelopes and extracts messages from error bodies.

use edutalks_core::{PortalError, PortalResult};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::file::FileRecord;
use crate::tree::{TabNode, TaxonomyTree};

/// Fallback shown when an error body carries no usable message
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

// ============================================================================
// Envelopes
// ============================================================================

#[derive(Deserialize)]
struct Inner<T> {
    data: T,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Nested { data: Inner<T> },
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Nested { data } => data.data,
            Envelope::Wrapped { data } => data,
            Envelope::Bare(value) => value,
        }
    }
}

/// Decode a payload that may be wrapped in zero, one or two `data` envelopes
pub fn decode_enveloped<T: DeserializeOwned>(bytes: &[u8]) -> PortalResult<T> {
    serde_json::from_slice::<Envelope<T>>(bytes)
        .map(Envelope::into_inner)
        .map_err(|e| PortalError::payload(format!("unrecognised response shape: {e}")))
}

/// Decode the body of `GET /api/taxonomy/tree`
pub fn decode_tree(bytes: &[u8]) -> PortalResult<TaxonomyTree> {
    decode_enveloped::<Vec<TabNode>>(bytes).map(TaxonomyTree::new)
}

/// Decode the body of `GET /api/admin/files`
pub fn decode_files(bytes: &[u8]) -> PortalResult<Vec<FileRecord>> {
    decode_enveloped(bytes)
}

// ============================================================================
// Error bodies
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Extract a user-facing message from an error response body.
///
/// Looks at `detail` (string, or list of `{msg}` validation entries),
/// then `message`, then `error`; falls back to [`GENERIC_ERROR_MESSAGE`].
pub fn error_message(bytes: &[u8]) -> String {
    let body: ErrorBody = serde_json::from_slice(bytes).unwrap_or_default();

    let detail = body.detail.and_then(|detail| match detail {
        serde_json::Value::String(text) => Some(text),
        serde_json::Value::Array(items) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .map(str::to_string)
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    });

    detail
        .or(body.message)
        .or(body.error)
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use edutalks_core::{SectionId, TabId};
    use pretty_assertions::assert_eq;

    const TREE: &str = r#"{
        "data": {
            "data": [
                {
                    "tab": {"id": 1, "title": "Legal", "slug": "legal", "position": 1, "is_active": true},
                    "sections": []
                },
                {
                    "tab": {"id": 2, "title": "Archive", "slug": "archive", "position": 2, "is_active": false},
                    "sections": [
                        {
                            "section": {"id": 7, "title": "Old", "slug": "old", "position": 1, "is_active": true},
                            "docs_count": 4
                        }
                    ]
                }
            ]
        }
    }"#;

    #[test]
    fn test_decode_nested_tree() {
        let tree = decode_tree(TREE.as_bytes()).unwrap();
        assert_eq!(tree.len(), 2);
        let archive = tree.node(TabId(2)).unwrap();
        assert_eq!(archive.sections[0].section.id, SectionId(7));
        assert_eq!(archive.sections[0].docs_count, 4);
    }

    #[test]
    fn test_decode_single_and_bare_envelopes() {
        let wrapped = r#"{"data": [{"tab": {"id": 1, "title": "A", "slug": "a", "is_active": true}}]}"#;
        assert_eq!(decode_tree(wrapped.as_bytes()).unwrap().len(), 1);

        let bare = r#"[{"tab": {"id": 1, "title": "A", "slug": "a", "is_active": true}}]"#;
        assert_eq!(decode_tree(bare.as_bytes()).unwrap().len(), 1);
    }

    #[test]
    fn test_decode_empty_tree() {
        let tree = decode_tree(br#"{"data": {"data": []}}"#).unwrap();
        assert!(tree.is_empty());
    }

    #[test]
    fn test_decode_garbage_is_payload_error() {
        let err = decode_tree(b"<html>502</html>").unwrap_err();
        assert!(matches!(err, PortalError::Payload(_)));
    }

    #[test]
    fn test_decode_files_list() {
        let body = r#"{"data": [
            {"id": 1, "filename": "a.pdf", "section_id": 3, "uploaded_at": "2024-01-01T00:00:00Z"},
            {"id": 2, "filename": "b.pdf", "section_id": null, "uploaded_at": "2024-01-02T00:00:00Z"}
        ]}"#;
        let files = decode_files(body.as_bytes()).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[1].section_id, None);
    }

    #[test]
    fn test_error_message_variants() {
        assert_eq!(error_message(br#"{"detail": "Slug already exists"}"#), "Slug already exists");
        assert_eq!(
            error_message(br#"{"detail": [{"msg": "title required"}, {"msg": "slug invalid"}]}"#),
            "title required; slug invalid"
        );
        assert_eq!(error_message(br#"{"message": "Forbidden"}"#), "Forbidden");
        assert_eq!(error_message(br#"{"error": "boom"}"#), "boom");
        assert_eq!(error_message(b"not json"), GENERIC_ERROR_MESSAGE);
        assert_eq!(error_message(br#"{"detail": ""}"#), GENERIC_ERROR_MESSAGE);
    }
}
