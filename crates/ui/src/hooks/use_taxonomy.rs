//! # Taxonomy Hook
//!
//! Fetches the taxonomy tree for one view. Each view owns its cache and
//! request scope; a reload invalidates the cache and re-fetches. When two
//! loads overlap, only the most recently issued one updates the view.

use std::sync::Arc;

use dioxus::prelude::*;
use edutalks_client::{ApiClient, ClientError, RequestScope, TaxonomyCache};
use edutalks_taxonomy::TaxonomyTree;

use super::use_request_scope;
use crate::services::use_services;

/// Issues tickets so that only the latest load may publish its result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LatestRequest {
    issued: u64,
}

impl LatestRequest {
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.issued == ticket
    }
}

/// Handle returned by [`use_taxonomy`]
#[derive(Clone)]
pub struct UseTaxonomy {
    pub tree: Signal<Option<Arc<TaxonomyTree>>>,
    pub error: Signal<Option<String>>,
    pub loading: Signal<bool>,
    latest: Signal<LatestRequest>,
    cache: TaxonomyCache,
    scope: RequestScope,
    client: ApiClient,
}

impl UseTaxonomy {
    pub fn cache(&self) -> &TaxonomyCache {
        &self.cache
    }

    pub fn scope(&self) -> &RequestScope {
        &self.scope
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Drop the cached tree and fetch again
    pub fn reload(&self) {
        self.cache.invalidate();
        self.load();
    }

    /// Publish a tree obtained elsewhere (e.g. a post-mutation re-fetch)
    pub fn publish(&self, tree: Arc<TaxonomyTree>) {
        let mut latest = self.latest;
        let mut current = self.tree;
        let mut error = self.error;
        let mut loading = self.loading;
        latest.write().issue();
        current.set(Some(tree));
        error.set(None);
        loading.set(false);
    }

    fn load(&self) {
        let mut latest = self.latest;
        let mut tree = self.tree;
        let mut error = self.error;
        let mut loading = self.loading;
        let cache = self.cache.clone();
        let scope = self.scope.clone();
        let client = self.client.clone();

        let ticket = latest.write().issue();
        loading.set(true);

        spawn(async move {
            let result = scope.run(cache.read(&client)).await;
            if !latest.peek().is_current(ticket) {
                tracing::debug!("Discarding superseded taxonomy load #{}", ticket);
                return;
            }
            match result {
                Ok(fetched) => {
                    tree.set(Some(fetched));
                    error.set(None);
                }
                Err(ClientError::Cancelled) => return,
                Err(e) => {
                    tracing::warn!("Failed to load taxonomy: {}", e);
                    error.set(Some(e.user_message()));
                }
            }
            loading.set(false);
        });
    }
}

/// Load the taxonomy tree once when the calling view mounts
pub fn use_taxonomy() -> UseTaxonomy {
    let services = use_services();
    let scope = use_request_scope();
    let tree = use_signal(|| None);
    let error = use_signal(|| None);
    let loading = use_signal(|| true);
    let latest = use_signal(LatestRequest::default);

    use_hook(move || {
        let handle = UseTaxonomy {
            tree,
            error,
            loading,
            latest,
            cache: TaxonomyCache::new(),
            scope,
            client: services.client().clone(),
        };
        handle.load();
        handle
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_is_current() {
        let mut latest = LatestRequest::default();
        let first = latest.issue();
        let second = latest.issue();
        assert!(!latest.is_current(first));
        assert!(latest.is_current(second));
    }
}
