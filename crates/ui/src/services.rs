//! Long-lived services shared by every view
//!
//! Built once at launch and provided through Dioxus context. The API client
//! and the session store share one [`AuthContext`], so signing in or out is
//! visible to the next request without rebuilding the client.

use std::sync::Arc;

use dioxus::prelude::*;
use edutalks_client::{ApiClient, AuthContext, ClientConfig, ClientResult, Credentials, SessionStore};
use edutalks_core::PortalResult;
use parking_lot::Mutex;

use crate::state::SessionView;

#[derive(Clone)]
pub struct Services {
    client: ApiClient,
    session: Arc<Mutex<SessionStore>>,
}

impl Services {
    /// Load the persisted session and build a client sharing its credentials
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let store = SessionStore::load(config.session_path.clone());
        let client = ApiClient::new(config, store.auth())?;
        Ok(Self {
            client,
            session: Arc::new(Mutex::new(store)),
        })
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn auth(&self) -> &AuthContext {
        self.client.auth()
    }

    /// Snapshot of the session for the shell
    pub fn session_view(&self) -> SessionView {
        let store = self.session.lock();
        let session = store.session();
        SessionView {
            role: session.role.clone(),
            label: session.label().map(str::to_string),
            authenticated: session.is_authenticated(),
            seen_landing: session.seen_landing,
        }
    }

    pub fn sign_in(&self, credentials: Credentials) -> PortalResult<SessionView> {
        self.session.lock().login(credentials)?;
        Ok(self.session_view())
    }

    pub fn sign_out(&self) -> PortalResult<SessionView> {
        self.session.lock().logout()?;
        Ok(self.session_view())
    }

    pub fn mark_landing_seen(&self) -> PortalResult<()> {
        self.session.lock().mark_landing_seen()
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("base_url", &self.client.base_url())
            .field("authenticated", &self.auth().is_authenticated())
            .finish()
    }
}

/// Services provided at launch
pub fn use_services() -> Services {
    use_context::<Services>()
}
