use std::sync::Arc;

use crate::store::UserStore;
use crate::webhooks::signature::WebhookVerifier;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable user store. Default: `PgUserStore`.
    pub store: Arc<dyn UserStore>,
    pub verifier: Arc<WebhookVerifier>,
}
