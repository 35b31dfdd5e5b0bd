//! Taxonomy cache and admin mutations
//!
//! The cache holds the last fetched tree. Reads after the first return the
//! cached tree until it is invalidated. Every mutation goes through
//! [`TaxonomyCache::apply`], which invalidates and re-reads, so the tree a
//! view renders after a mutation always comes from the server. A re-read that
//! fails after the server accepted the write is reported as
//! [`Applied::RefreshFailed`], never as a failed mutation.

use std::sync::Arc;

use edutalks_core::{SectionId, TabId};
use edutalks_taxonomy::{SectionInput, TabInput, TaxonomyTree, warn_on_issues};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::client::ApiClient;
use crate::error::{ClientError, ClientResult};

// ============================================================================
// Mutation
// ============================================================================

/// One admin write against the taxonomy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    CreateTab(TabInput),
    UpdateTab(TabId, TabInput),
    DeleteTab(TabId),
    CreateSection(SectionInput),
    UpdateSection(SectionId, SectionInput),
    DeleteSection(SectionId),
}

impl Mutation {
    /// Send the mutation to the server
    pub async fn send(&self, client: &ApiClient) -> ClientResult<()> {
        match self {
            Mutation::CreateTab(input) => client.create_tab(input).await,
            Mutation::UpdateTab(id, input) => client.update_tab(*id, input).await,
            Mutation::DeleteTab(id) => client.delete_tab(*id).await,
            Mutation::CreateSection(input) => client.create_section(input).await,
            Mutation::UpdateSection(id, input) => client.update_section(*id, input).await,
            Mutation::DeleteSection(id) => client.delete_section(*id).await,
        }
    }

    /// Short past-tense description for notifications
    pub fn summary(&self) -> String {
        match self {
            Mutation::CreateTab(input) => format!("Created tab '{}'", input.title),
            Mutation::UpdateTab(_, input) => format!("Updated tab '{}'", input.title),
            Mutation::DeleteTab(id) => format!("Deleted tab {id}"),
            Mutation::CreateSection(input) => format!("Created section '{}'", input.title),
            Mutation::UpdateSection(_, input) => format!("Updated section '{}'", input.title),
            Mutation::DeleteSection(id) => format!("Deleted section {id}"),
        }
    }
}

// ============================================================================
// Applied
// ============================================================================

/// Outcome of a mutation the server accepted
#[derive(Debug)]
pub enum Applied {
    /// The tree was re-read after the write
    Refreshed(Arc<TaxonomyTree>),
    /// The write succeeded but the re-read did not; the cache stays empty
    RefreshFailed(ClientError),
}

impl Applied {
    /// Fresh tree, when the re-read succeeded
    pub fn tree(&self) -> Option<&Arc<TaxonomyTree>> {
        match self {
            Applied::Refreshed(tree) => Some(tree),
            Applied::RefreshFailed(_) => None,
        }
    }

    pub fn refresh_error(&self) -> Option<&ClientError> {
        match self {
            Applied::Refreshed(_) => None,
            Applied::RefreshFailed(err) => Some(err),
        }
    }
}

// ============================================================================
// TaxonomyCache
// ============================================================================

#[derive(Debug, Default)]
struct CacheState {
    tree: Option<Arc<TaxonomyTree>>,
    /// Bumped on every invalidation; a fetch that started under an older
    /// generation does not populate the cache
    generation: u64,
}

/// Shared handle to a cached taxonomy tree
#[derive(Debug, Clone, Default)]
pub struct TaxonomyCache {
    state: Arc<Mutex<CacheState>>,
}

impl TaxonomyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached tree, if any
    pub fn cached(&self) -> Option<Arc<TaxonomyTree>> {
        self.state.lock().tree.clone()
    }

    pub fn is_cached(&self) -> bool {
        self.state.lock().tree.is_some()
    }

    /// Drop the cached tree; the next read fetches
    pub fn invalidate(&self) {
        let mut state = self.state.lock();
        state.tree = None;
        state.generation += 1;
        debug!(generation = state.generation, "taxonomy cache invalidated");
    }

    /// Cached tree, fetching it first when the cache is empty
    pub async fn read(&self, client: &ApiClient) -> ClientResult<Arc<TaxonomyTree>> {
        let generation = {
            let state = self.state.lock();
            if let Some(tree) = &state.tree {
                return Ok(Arc::clone(tree));
            }
            state.generation
        };

        let tree = Arc::new(client.fetch_tree().await?);
        warn_on_issues(&tree);

        let mut state = self.state.lock();
        if state.generation == generation {
            state.tree = Some(Arc::clone(&tree));
        } else {
            debug!("taxonomy cache invalidated during fetch, result not stored");
        }
        Ok(tree)
    }

    /// Invalidate, then fetch
    pub async fn refresh(&self, client: &ApiClient) -> ClientResult<Arc<TaxonomyTree>> {
        self.invalidate();
        self.read(client).await
    }

    /// Send a mutation, invalidate, and fetch the updated tree.
    ///
    /// `Err` means the server rejected (or never received) the write, and
    /// the cache is left untouched. Once the write is accepted the result is
    /// always `Ok`, carrying the re-read outcome.
    pub async fn apply(&self, client: &ApiClient, mutation: &Mutation) -> ClientResult<Applied> {
        mutation.send(client).await?;
        info!("{}", mutation.summary());
        match self.refresh(client).await {
            Ok(tree) => Ok(Applied::Refreshed(tree)),
            Err(err) => {
                warn!(error = %err, "mutation applied but the tree could not be re-read");
                Ok(Applied::RefreshFailed(err))
            }
        }
    }
}
