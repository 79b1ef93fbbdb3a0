//! Listing service: domain operations mapped onto [`ListingStore`] calls.
//!
//! Every read is ordered newest-first. Store failures are converted into a
//! typed [`ListingError`] that carries the store's message; nothing is
//! retried or suppressed.

use std::sync::Arc;

use roehrenboerse_core::error::CoreError;
use roehrenboerse_core::listing::{CreateListing, Listing, UpdateListing};
use roehrenboerse_core::types::DbId;
use roehrenboerse_db::store::{ListingFilter, ListingStore, SortOrder, StoreError};

/// Failures of the listing service, one kind per operation family.
#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    #[error("Failed to fetch listings: {0}")]
    Fetch(String),

    #[error("Listing with id {0} not found")]
    NotFound(DbId),

    #[error("Failed to create listing: {0}")]
    Create(String),

    /// `missing` is set when no row had the requested id.
    #[error("Failed to update listing: {message}")]
    Update { message: String, missing: bool },

    #[error("Failed to delete listing: {0}")]
    Delete(String),

    #[error("Failed to search listings: {0}")]
    Search(String),

    /// Input rejected before reaching the store.
    #[error("Invalid listing: {0}")]
    Invalid(String),
}

impl From<CoreError> for ListingError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => ListingError::Invalid(msg),
        }
    }
}

/// CRUD façade over a [`ListingStore`].
///
/// Cheap to clone; the store is shared behind an `Arc`.
#[derive(Clone)]
pub struct ListingService {
    store: Arc<dyn ListingStore>,
}

impl ListingService {
    pub fn new(store: Arc<dyn ListingStore>) -> Self {
        Self { store }
    }

    /// All listings, newest first.
    pub async fn get_listings(&self) -> Result<Vec<Listing>, ListingError> {
        let listings = self
            .store
            .select_all(SortOrder::NEWEST_FIRST)
            .await
            .map_err(|e| fail(ListingError::Fetch, e))?;
        tracing::debug!(count = listings.len(), "Fetched listings");
        Ok(listings)
    }

    /// A single listing by id.
    pub async fn get_listing_by_id(&self, id: DbId) -> Result<Listing, ListingError> {
        self.store
            .select_by_id(id)
            .await
            .map_err(|e| fail(ListingError::Fetch, e))?
            .ok_or(ListingError::NotFound(id))
    }

    /// Validate, normalize tags, and insert a new listing.
    pub async fn create_listing(&self, input: CreateListing) -> Result<Listing, ListingError> {
        let input = input.normalized()?;
        let listing = self
            .store
            .insert(&input)
            .await
            .map_err(|e| fail(ListingError::Create, e))?;
        tracing::info!(listing_id = listing.id, title = %listing.title, "Listing created");
        Ok(listing)
    }

    /// Apply a partial patch and return the updated listing.
    pub async fn update_listing(
        &self,
        id: DbId,
        patch: UpdateListing,
    ) -> Result<Listing, ListingError> {
        let patch = patch.normalized()?;
        let updated = self.store.update_by_id(id, &patch).await.map_err(|e| {
            tracing::warn!(listing_id = id, error = %e, "Listing update failed");
            ListingError::Update {
                message: e.to_string(),
                missing: false,
            }
        })?;
        match updated {
            Some(listing) => {
                tracing::info!(listing_id = id, "Listing updated");
                Ok(listing)
            }
            None => Err(ListingError::Update {
                message: format!("no listing with id {id}"),
                missing: true,
            }),
        }
    }

    /// Delete a listing. Returns `false` if no row had this id.
    pub async fn delete_listing(&self, id: DbId) -> Result<bool, ListingError> {
        let deleted = self
            .store
            .delete_by_id(id)
            .await
            .map_err(|e| fail(ListingError::Delete, e))?;
        if deleted {
            tracing::info!(listing_id = id, "Listing deleted");
        }
        Ok(deleted)
    }

    /// Listings whose title contains `query` (case-insensitive) or whose
    /// tags contain it as an element, newest first.
    pub async fn search_listings(&self, query: &str) -> Result<Vec<Listing>, ListingError> {
        let filter = ListingFilter::Search(query.to_string());
        let listings = self
            .store
            .select_where(&filter, SortOrder::NEWEST_FIRST)
            .await
            .map_err(|e| fail(ListingError::Search, e))?;
        tracing::debug!(query, count = listings.len(), "Searched listings");
        Ok(listings)
    }

    /// Listings with an exact category match, newest first.
    pub async fn get_listings_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Listing>, ListingError> {
        let filter = ListingFilter::Category(category.to_string());
        self.store
            .select_where(&filter, SortOrder::NEWEST_FIRST)
            .await
            .map_err(|e| fail(ListingError::Fetch, e))
    }

    /// Whether the backing store answers.
    pub async fn store_healthy(&self) -> bool {
        self.store.ping().await.is_ok()
    }
}

/// Log a store failure and wrap its message in the given error kind.
fn fail(kind: fn(String) -> ListingError, err: StoreError) -> ListingError {
    let err = kind(err.to_string());
    tracing::warn!(error = %err, "Listing store call failed");
    err
}
