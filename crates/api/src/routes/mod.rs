pub mod health;
pub mod listing;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /listings                 list (?q= | ?category=), create
/// /listings/{id}            get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/listings", listing::router())
}
