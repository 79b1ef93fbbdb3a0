//! Route definitions for listings.

use axum::routing::get;
use axum::Router;

use crate::handlers::listing;
use crate::state::AppState;

/// Listing routes mounted at `/listings`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> update
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(listing::list).post(listing::create))
        .route(
            "/{id}",
            get(listing::get_by_id)
                .put(listing::update)
                .delete(listing::delete),
        )
}
