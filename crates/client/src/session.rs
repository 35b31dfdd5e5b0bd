//! Session persistence and the authentication context
//!
//! [`SessionStore`] owns the persisted session file. It hands out
//! [`AuthContext`] handles that network code reads the bearer token and role
//! from; login and logout go through the store so the file and every handle
//! stay in step.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use edutalks_core::{Persistable, PortalResult, Role};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

// ============================================================================
// Session
// ============================================================================

/// Identity returned by the authentication flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub access_token: String,
    pub role: Role,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl Credentials {
    pub fn new(access_token: impl Into<String>, role: Role, username: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            role,
            username: username.into(),
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }
}

/// Everything the client keeps between runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    pub access_token: Option<String>,
    pub role: Role,
    pub username: Option<String>,
    pub display_name: Option<String>,
    /// Whether the landing page has already been shown
    pub seen_landing: bool,
}

impl Session {
    /// Session holding a fresh login, keeping the landing flag
    pub fn from_credentials(credentials: Credentials, seen_landing: bool) -> Self {
        Self {
            access_token: Some(credentials.access_token),
            role: credentials.role,
            username: Some(credentials.username),
            display_name: credentials.display_name,
            seen_landing,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Display name, falling back to the username
    pub fn label(&self) -> Option<&str> {
        self.display_name.as_deref().or(self.username.as_deref())
    }

    fn credentials(&self) -> Option<Credentials> {
        let token = self.access_token.clone().filter(|t| !t.is_empty())?;
        Some(Credentials {
            access_token: token,
            role: self.role.clone(),
            username: self.username.clone().unwrap_or_default(),
            display_name: self.display_name.clone(),
        })
    }
}

impl Persistable for Session {}

// ============================================================================
// AuthContext
// ============================================================================

/// Shared, read-mostly view of the current credentials.
///
/// Cloning is cheap; all clones observe the same login state. Only
/// [`SessionStore`] mutates it.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    inner: Arc<RwLock<Option<Credentials>>>,
}

impl AuthContext {
    /// Context with nobody signed in
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Context pre-populated with credentials (tests, one-shot CLI calls)
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(credentials))),
        }
    }

    /// Bearer token to attach to outgoing requests
    pub fn bearer_token(&self) -> Option<String> {
        self.inner.read().as_ref().map(|c| c.access_token.clone())
    }

    /// Role of the current session
    pub fn role(&self) -> Role {
        self.inner
            .read()
            .as_ref()
            .map(|c| c.role.clone())
            .unwrap_or_default()
    }

    pub fn is_admin(&self) -> bool {
        self.role().is_admin()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().is_some()
    }

    /// Snapshot of the current credentials
    pub fn credentials(&self) -> Option<Credentials> {
        self.inner.read().clone()
    }

    fn set(&self, credentials: Option<Credentials>) {
        *self.inner.write() = credentials;
    }
}

// ============================================================================
// SessionStore
// ============================================================================

/// Single owner of the persisted session
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    session: Session,
    auth: AuthContext,
}

impl SessionStore {
    /// Open the store at `path`. A missing file is an empty session; an
    /// unreadable one is logged and replaced by an empty session.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let session = if path.exists() {
            match Session::load_from_file(&path) {
                Ok(session) => {
                    debug!("Loaded session from {}", path.display());
                    session
                }
                Err(e) => {
                    warn!("Ignoring unreadable session file {}: {}", path.display(), e);
                    Session::default()
                }
            }
        } else {
            Session::default()
        };
        let auth = AuthContext::default();
        auth.set(session.credentials());
        Self {
            path,
            session,
            auth,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Handle for network-calling code
    pub fn auth(&self) -> AuthContext {
        self.auth.clone()
    }

    /// Write the current session to disk
    pub fn save(&self) -> PortalResult<()> {
        self.session.save_to_file(&self.path)
    }

    /// Store new credentials and persist them
    pub fn login(&mut self, credentials: Credentials) -> PortalResult<()> {
        info!(user = %credentials.username, role = %credentials.role, "Signed in");
        self.session = Session::from_credentials(credentials, self.session.seen_landing);
        self.auth.set(self.session.credentials());
        self.save()
    }

    /// Forget everything, including the landing flag, and remove the file
    pub fn logout(&mut self) -> PortalResult<()> {
        info!("Signed out");
        self.session = Session::default();
        self.auth.set(None);
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    /// Whether the landing page should be shown
    pub fn should_show_landing(&self) -> bool {
        !self.session.seen_landing
    }

    /// Record that the landing page was shown
    pub fn mark_landing_seen(&mut self) -> PortalResult<()> {
        if self.session.seen_landing {
            return Ok(());
        }
        self.session.seen_landing = true;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> Credentials {
        Credentials::new("tok-123", Role::Admin, "ada").with_display_name("Ada L.")
    }

    #[test]
    fn test_missing_file_is_anonymous() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::load(dir.path().join("session.json"));
        assert!(!store.session().is_authenticated());
        assert!(store.auth().bearer_token().is_none());
        assert_eq!(store.auth().role(), Role::Anonymous);
        assert!(store.should_show_landing());
    }

    #[test]
    fn test_login_persists_and_updates_handles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let mut store = SessionStore::load(&path);
        let handle = store.auth();
        store.login(admin()).unwrap();

        assert_eq!(handle.bearer_token().as_deref(), Some("tok-123"));
        assert!(handle.is_admin());
        assert!(path.exists());

        let reopened = SessionStore::load(&path);
        assert_eq!(reopened.session().username.as_deref(), Some("ada"));
        assert_eq!(reopened.session().label(), Some("Ada L."));
        assert_eq!(reopened.auth().role(), Role::Admin);
    }

    #[test]
    fn test_landing_flag_survives_login_and_clears_on_logout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut store = SessionStore::load(&path);
        store.mark_landing_seen().unwrap();
        assert!(!store.should_show_landing());

        store.login(admin()).unwrap();
        assert!(store.session().seen_landing);

        let handle = store.auth();
        store.logout().unwrap();
        assert!(handle.bearer_token().is_none());
        assert!(store.should_show_landing());
        assert!(!path.exists());
        assert_eq!(SessionStore::load(&path).session(), &Session::default());
    }

    #[test]
    fn test_corrupt_file_falls_back_to_empty_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = SessionStore::load(&path);
        assert_eq!(store.session(), &Session::default());
    }

    #[test]
    fn test_member_role_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut store = SessionStore::load(&path);
        store
            .login(Credentials::new("t", Role::from("teacher"), "tom"))
            .unwrap();

        let json = std::fs::read_to_string(&path).unwrap();
        assert!(json.contains("\"role\": \"teacher\""));
        assert_eq!(
            SessionStore::load(&path).auth().role(),
            Role::Member("teacher".to_string())
        );
    }
}
