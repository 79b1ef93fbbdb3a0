use std::sync::Arc;

use roehrenboerse_db::store::ListingStore;

use crate::services::ListingService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Listing operations over the configured store.
    pub listings: ListingService,
}

impl AppState {
    pub fn new(store: Arc<dyn ListingStore>) -> Self {
        Self {
            listings: ListingService::new(store),
        }
    }
}
