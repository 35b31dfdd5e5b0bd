//! Request scopes tied to a view's lifetime
//!
//! A view creates one [`RequestScope`] when it mounts and cancels it when it
//! is torn down. Requests started through [`RequestScope::run`] then resolve
//! to [`ClientError::Cancelled`] instead of delivering a result to a view
//! that no longer exists.

use std::future::Future;

use tokio_util::sync::{CancellationToken, DropGuard};

use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, Default)]
pub struct RequestScope {
    token: CancellationToken,
}

impl RequestScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope that is cancelled together with `self`, but can also be
    /// cancelled on its own
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Guard that cancels the scope when dropped
    pub fn guard(&self) -> DropGuard {
        self.token.clone().drop_guard()
    }

    /// Race `fut` against cancellation of this scope
    pub async fn run<F, T>(&self, fut: F) -> ClientResult<T>
    where
        F: Future<Output = ClientResult<T>>,
    {
        if self.token.is_cancelled() {
            return Err(ClientError::Cancelled);
        }
        tokio::select! {
            biased;
            _ = self.token.cancelled() => {
                tracing::debug!("request abandoned by its scope");
                Err(ClientError::Cancelled)
            }
            result = fut => result,
        }
    }
}
