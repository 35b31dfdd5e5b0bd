//! Shared fixtures for the HTTP-level tests

#![allow(dead_code)]

use edutalks_client::{ApiClient, AuthContext, ClientConfig, Credentials};
use edutalks_core::Role;
use serde_json::{Value, json};
use wiremock::MockServer;

pub fn client_for(server: &MockServer, auth: AuthContext) -> ApiClient {
    ApiClient::new(&ClientConfig::with_base_url(server.uri()), auth).expect("client")
}

pub fn admin_auth() -> AuthContext {
    AuthContext::with_credentials(Credentials::new("admin-token", Role::Admin, "root"))
}

pub fn tab(id: i64, title: &str, slug: &str, position: i32, active: bool) -> Value {
    json!({"id": id, "title": title, "slug": slug, "position": position, "is_active": active})
}

pub fn section(id: i64, title: &str, slug: &str, position: i32, active: bool) -> Value {
    json!({
        "id": id,
        "title": title,
        "slug": slug,
        "description": null,
        "position": position,
        "is_active": active
    })
}

/// Wrap tab nodes the way `GET /api/taxonomy/tree` does
pub fn tree_body(nodes: Vec<Value>) -> Value {
    json!({"data": {"data": nodes}})
}

pub fn legal_archive_tree() -> Value {
    tree_body(vec![
        json!({
            "tab": tab(1, "Legal", "legal", 1, true),
            "sections": [
                {"section": section(10, "Forms", "forms", 1, true), "docs_count": 2},
                {"section": section(11, "Drafts", "drafts", 2, false), "docs_count": 0}
            ]
        }),
        json!({
            "tab": tab(2, "Archive", "archive", 2, false),
            "sections": []
        }),
    ])
}
