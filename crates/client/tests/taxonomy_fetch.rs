//! Tree fetching, caching and cancellation against a mock backend

mod common;

use std::time::Duration;

use common::{client_for, legal_archive_tree, tree_body};
use edutalks_client::{AuthContext, ClientError, RequestScope, TaxonomyCache};
use edutalks_core::{Role, TabId};
use edutalks_taxonomy::{compose_routes, resolve_tabs};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetch_tree_decodes_nested_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/taxonomy/tree"))
        .respond_with(ResponseTemplate::new(200).set_body_json(legal_archive_tree()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, AuthContext::anonymous());
    let tree = client.fetch_tree().await.unwrap();

    assert_eq!(tree.len(), 2);
    let legal = tree.node(TabId(1)).unwrap();
    assert_eq!(legal.sections.len(), 2);
    assert_eq!(legal.sections[0].docs_count, 2);

    let resolved = resolve_tabs(&tree);
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].slug.as_str(), "legal");
    assert_eq!(compose_routes(&tree, &Role::Anonymous).paths(), vec!["/legal"]);
}

#[tokio::test]
async fn test_fetching_twice_yields_identical_trees() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/taxonomy/tree"))
        .respond_with(ResponseTemplate::new(200).set_body_json(legal_archive_tree()))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server, AuthContext::anonymous());
    let first = client.fetch_tree().await.unwrap();
    let second = client.fetch_tree().await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_empty_tree_yields_no_routes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/taxonomy/tree"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tree_body(vec![])))
        .mount(&server)
        .await;

    let client = client_for(&server, AuthContext::anonymous());
    let tree = client.fetch_tree().await.unwrap();
    assert!(tree.is_empty());
    assert!(compose_routes(&tree, &Role::Anonymous).is_empty());
}

#[tokio::test]
async fn test_server_error_is_a_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/taxonomy/tree"))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_json(serde_json::json!({"message": "Maintenance window"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, AuthContext::anonymous());
    let err = client.fetch_tree().await.unwrap_err();
    assert!(err.is_network());
    assert_eq!(err.status(), Some(503));
    assert_eq!(err.user_message(), "Maintenance window");
}

#[tokio::test]
async fn test_unexpected_shape_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/taxonomy/tree"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, AuthContext::anonymous());
    let err = client.fetch_tree().await.unwrap_err();
    assert!(matches!(err, ClientError::Parse(_)));
    assert!(!err.is_network());
}

#[tokio::test]
async fn test_cache_serves_second_read_without_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/taxonomy/tree"))
        .respond_with(ResponseTemplate::new(200).set_body_json(legal_archive_tree()))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server, AuthContext::anonymous());
    let cache = TaxonomyCache::new();

    let first = cache.read(&client).await.unwrap();
    let second = cache.read(&client).await.unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));

    cache.invalidate();
    let third = cache.read(&client).await.unwrap();
    assert_eq!(*first, *third);
}

#[tokio::test]
async fn test_cancelled_scope_abandons_slow_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/taxonomy/tree"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(legal_archive_tree())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, AuthContext::anonymous());
    let scope = RequestScope::new();

    let canceller = scope.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let result = scope.run(client.fetch_tree()).await;
    assert!(matches!(result, Err(ClientError::Cancelled)));
}
