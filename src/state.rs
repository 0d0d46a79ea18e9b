//! Shared application state for all routes.

use crate::config::ReferencePolicy;
use crate::repository::CatalogStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
    /// Applied when a director or genre is deleted.
    pub reference_policy: ReferencePolicy,
}

impl AppState {
    pub fn new(store: Arc<dyn CatalogStore>, reference_policy: ReferencePolicy) -> Self {
        AppState {
            store,
            reference_policy,
        }
    }
}
