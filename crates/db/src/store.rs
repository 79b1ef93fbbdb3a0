//! The record store interface.
//!
//! Every operation is a single call against the underlying engine: no
//! transactions, no batching, no retries. Select operations take an
//! explicit [`SortOrder`].

use async_trait::async_trait;
use roehrenboerse_core::listing::{CreateListing, Listing, UpdateListing};
use roehrenboerse_core::types::DbId;

/// Column a select is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Sort order for select operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub field: SortField,
    pub direction: Direction,
}

impl SortOrder {
    /// `created_at` descending: the order every listing view uses.
    pub const NEWEST_FIRST: SortOrder = SortOrder {
        field: SortField::CreatedAt,
        direction: Direction::Descending,
    };

    /// `ORDER BY` clause body. `id` breaks ties in the same direction.
    pub fn to_sql(self) -> &'static str {
        match (self.field, self.direction) {
            (SortField::CreatedAt, Direction::Descending) => "created_at DESC, id DESC",
            (SortField::CreatedAt, Direction::Ascending) => "created_at ASC, id ASC",
        }
    }

    /// Compare two listings according to this order.
    pub fn compare(self, a: &Listing, b: &Listing) -> std::cmp::Ordering {
        let ord = match self.field {
            SortField::CreatedAt => (a.created_at, a.id).cmp(&(b.created_at, b.id)),
        };
        match self.direction {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    }
}

/// Row filter for [`ListingStore::select_where`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingFilter {
    /// Exact match on `category`.
    Category(String),
    /// Title contains the query (case-insensitive) or tags contain it as an element.
    Search(String),
}

impl ListingFilter {
    pub fn matches(&self, listing: &Listing) -> bool {
        match self {
            ListingFilter::Category(category) => listing.category == *category,
            ListingFilter::Search(query) => listing.matches_query(query),
        }
    }
}

/// Errors returned by a record store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The PostgreSQL engine reported an error.
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    /// The store could not serve the request.
    #[error("{0}")]
    Unavailable(String),
}

/// Row-level operations against the `listings` table.
#[async_trait]
pub trait ListingStore: Send + Sync {
    /// All listings in the given order.
    async fn select_all(&self, order: SortOrder) -> Result<Vec<Listing>, StoreError>;

    /// A single listing, or `None` if no row has this id.
    async fn select_by_id(&self, id: DbId) -> Result<Option<Listing>, StoreError>;

    /// Listings matching `filter`, in the given order.
    async fn select_where(
        &self,
        filter: &ListingFilter,
        order: SortOrder,
    ) -> Result<Vec<Listing>, StoreError>;

    /// Insert a row, returning it with the assigned `id` and `created_at`.
    async fn insert(&self, input: &CreateListing) -> Result<Listing, StoreError>;

    /// Apply a partial patch. Returns `None` if no row has this id.
    async fn update_by_id(
        &self,
        id: DbId,
        patch: &UpdateListing,
    ) -> Result<Option<Listing>, StoreError>;

    /// Delete a row. Returns whether a row was removed.
    async fn delete_by_id(&self, id: DbId) -> Result<bool, StoreError>;

    /// Confirm the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
