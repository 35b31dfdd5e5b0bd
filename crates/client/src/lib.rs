//! # EduTalks Client
//!
//! Network side of the EduTalks navigation client.
//!
//! - [`ApiClient`]: typed requests against the taxonomy, admin and file endpoints
//! - [`SessionStore`] / [`AuthContext`]: persisted session and the handle
//!   network code reads credentials from
//! - [`TaxonomyCache`]: cached tree with explicit invalidation on mutation
//! - [`RequestScope`]: cancellation of requests owned by a torn-down view
//! - [`ClientConfig`]: layered configuration (defaults, TOML file, environment)

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod scope;
pub mod session;

pub use cache::{Applied, Mutation, TaxonomyCache};
pub use client::{
    ADMIN_FILES_API, ADMIN_SECTIONS_API, ADMIN_TABS_API, ApiClient, FILES_API, FileDownload,
    TREE_PATH,
};
pub use config::{ClientConfig, ENV_API_URL, ENV_SESSION_FILE, ENV_TIMEOUT_SECS};
pub use error::{ClientError, ClientResult};
pub use scope::RequestScope;
pub use session::{AuthContext, Credentials, Session, SessionStore};
