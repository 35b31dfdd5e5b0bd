//! # Request Scope Hook

use dioxus::prelude::*;
use edutalks_client::RequestScope;

/// Scope for requests issued by the calling component.
///
/// Cancelled when the component unmounts, so late responses are dropped
/// instead of landing in a torn-down view.
pub fn use_request_scope() -> RequestScope {
    let scope = use_hook(RequestScope::new);
    let on_drop = scope.clone();
    use_drop(move || {
        tracing::trace!("View unmounted; cancelling its requests");
        on_drop.cancel();
    });
    scope
}
