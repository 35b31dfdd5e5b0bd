//! Admin tab/section mutations followed by a tree re-fetch

mod common;

use common::{admin_auth, client_for, legal_archive_tree, section, tab, tree_body};
use edutalks_client::{AuthContext, Mutation, TaxonomyCache};
use edutalks_core::{SectionId, TabId, next_position};
use edutalks_taxonomy::{SectionInput, TabInput};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_create_tab_then_refetch_shows_submitted_fields() {
    let server = MockServer::start().await;

    // Tree before the mutation, served once
    Mock::given(method("GET"))
        .and(path("/api/taxonomy/tree"))
        .respond_with(ResponseTemplate::new(200).set_body_json(legal_archive_tree()))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let client = client_for(&server, admin_auth());
    let cache = TaxonomyCache::new();
    let before = cache.read(&client).await.unwrap();

    let input = TabInput {
        title: "News".to_string(),
        slug: "news".to_string(),
        position: next_position(before.tabs()),
        is_active: true,
    };
    assert_eq!(input.position, 3);

    Mock::given(method("POST"))
        .and(path("/api/admin/tabs"))
        .and(header("Authorization", "Bearer admin-token"))
        .and(body_json(json!({
            "title": "News",
            "slug": "news",
            "position": 3,
            "is_active": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"data": tab(3, "News", "news", 3, true)})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/taxonomy/tree"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tree_body(vec![
            json!({"tab": tab(1, "Legal", "legal", 1, true), "sections": []}),
            json!({"tab": tab(2, "Archive", "archive", 2, false), "sections": []}),
            json!({"tab": tab(3, "News", "news", 3, true), "sections": []}),
        ])))
        .mount(&server)
        .await;

    let applied = cache
        .apply(&client, &Mutation::CreateTab(input))
        .await
        .unwrap();
    let after = applied.tree().unwrap();

    let created = after.node_by_slug("news").unwrap();
    assert_eq!(created.tab.title, "News");
    assert_eq!(created.tab.position, 3);
    assert!(created.tab.is_active);
}

#[tokio::test]
async fn test_delete_section_then_refetch_no_longer_lists_it() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/admin/sections/11"))
        .and(header("Authorization", "Bearer admin-token"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/taxonomy/tree"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tree_body(vec![json!({
            "tab": tab(1, "Legal", "legal", 1, true),
            "sections": [{"section": section(10, "Forms", "forms", 1, true), "docs_count": 2}]
        })])))
        .mount(&server)
        .await;

    let client = client_for(&server, admin_auth());
    let cache = TaxonomyCache::new();
    let applied = cache
        .apply(&client, &Mutation::DeleteSection(SectionId(11)))
        .await
        .unwrap();
    let tree = applied.tree().unwrap();

    let legal = tree.node(TabId(1)).unwrap();
    assert!(legal.section(SectionId(11)).is_none());
    assert!(legal.section(SectionId(10)).is_some());
}

#[tokio::test]
async fn test_accepted_delete_with_failed_refetch_is_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/taxonomy/tree"))
        .respond_with(ResponseTemplate::new(200).set_body_json(legal_archive_tree()))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let client = client_for(&server, admin_auth());
    let cache = TaxonomyCache::new();
    cache.read(&client).await.unwrap();

    Mock::given(method("DELETE"))
        .and(path("/api/admin/tabs/2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/taxonomy/tree"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let applied = cache
        .apply(&client, &Mutation::DeleteTab(TabId(2)))
        .await
        .expect("accepted delete must not be reported as failed");

    assert!(applied.tree().is_none());
    assert_eq!(applied.refresh_error().and_then(|e| e.status()), Some(503));
    assert!(!cache.is_cached());
}

#[tokio::test]
async fn test_update_section_uses_patch_with_tab_id() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/admin/sections/10"))
        .and(body_json(json!({
            "tab_id": 1,
            "title": "Forms and templates",
            "slug": "forms",
            "position": 1,
            "is_active": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, admin_auth());
    let input = SectionInput {
        tab_id: TabId(1),
        title: "Forms and templates".to_string(),
        slug: "forms".to_string(),
        description: None,
        position: 1,
        is_active: true,
    };
    client.update_section(SectionId(10), &input).await.unwrap();
}

#[tokio::test]
async fn test_failed_mutation_surfaces_detail_and_keeps_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/taxonomy/tree"))
        .respond_with(ResponseTemplate::new(200).set_body_json(legal_archive_tree()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/api/admin/tabs/1"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(json!({"detail": "Slug 'archive' already exists"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, admin_auth());
    let cache = TaxonomyCache::new();
    cache.read(&client).await.unwrap();

    let input = TabInput {
        title: "Legal".to_string(),
        slug: "archive".to_string(),
        position: 1,
        is_active: true,
    };
    let err = cache
        .apply(&client, &Mutation::UpdateTab(TabId(1), input))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(409));
    assert_eq!(err.user_message(), "Slug 'archive' already exists");
    assert!(cache.is_cached());
}

#[tokio::test]
async fn test_error_without_message_uses_generic_text() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/tabs/2"))
        .respond_with(ResponseTemplate::new(500).set_body_string(""))
        .mount(&server)
        .await;

    let client = client_for(&server, admin_auth());
    let err = client.delete_tab(TabId(2)).await.unwrap_err();
    assert_eq!(err.user_message(), "Something went wrong");
}

#[tokio::test]
async fn test_missing_token_sends_request_and_surfaces_401() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/tabs"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Not authenticated"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, AuthContext::anonymous());
    let input = TabInput {
        title: "News".to_string(),
        slug: "news".to_string(),
        position: 1,
        is_active: true,
    };
    let err = client.create_tab(&input).await.unwrap_err();
    assert!(err.is_unauthorized());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_invalid_input_is_rejected_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, admin_auth());
    let input = TabInput {
        title: "News".to_string(),
        slug: "Not A Slug".to_string(),
        position: 1,
        is_active: true,
    };
    let err = client.create_tab(&input).await.unwrap_err();
    assert!(!err.is_network());
}
