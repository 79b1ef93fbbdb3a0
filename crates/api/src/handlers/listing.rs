//! Handlers for the `/listings` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use roehrenboerse_core::listing::{CreateListing, Listing, UpdateListing};
use roehrenboerse_core::types::DbId;
use roehrenboerse_core::validation::require_non_blank;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::query::ListingQueryParams;
use crate::services::ListingError;
use crate::state::AppState;

/// GET /api/listings?q=&category=
///
/// All listings newest-first, or the search / category subset.
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListingQueryParams>,
) -> AppResult<Json<Vec<Listing>>> {
    let listings = match (params.q, params.category) {
        (Some(_), Some(_)) => {
            return Err(AppError::BadRequest(
                "use either q or category, not both".to_string(),
            ))
        }
        (Some(q), None) => state.listings.search_listings(&q).await?,
        (None, Some(category)) => {
            require_non_blank("category", &category)?;
            state.listings.get_listings_by_category(&category).await?
        }
        (None, None) => state.listings.get_listings().await?,
    };
    Ok(Json(listings))
}

/// POST /api/listings
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateListing>,
) -> AppResult<(StatusCode, Json<Listing>)> {
    let listing = state.listings.create_listing(input).await?;
    Ok((StatusCode::CREATED, Json(listing)))
}

/// GET /api/listings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Listing>> {
    let listing = state.listings.get_listing_by_id(id).await?;
    Ok(Json(listing))
}

/// PUT /api/listings/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateListing>,
) -> AppResult<Json<Listing>> {
    let listing = state.listings.update_listing(id, input).await?;
    Ok(Json(listing))
}

/// DELETE /api/listings/{id}
pub async fn delete(State(state): State<AppState>, AppPath(id): AppPath<DbId>) -> AppResult<StatusCode> {
    if state.listings.delete_listing(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Listing(ListingError::NotFound(id)))
    }
}
