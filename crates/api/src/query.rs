//! Query parameter types for API handlers.

use serde::Deserialize;

/// Optional filters for `GET /api/listings` (`?q=` or `?category=`).
#[derive(Debug, Default, Deserialize)]
pub struct ListingQueryParams {
    pub q: Option<String>,
    pub category: Option<String>,
}
