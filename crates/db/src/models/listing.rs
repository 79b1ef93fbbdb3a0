//! Row mapping for the `listings` table.

use roehrenboerse_core::listing::Listing;
use roehrenboerse_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `listings` table.
#[derive(Debug, Clone, FromRow)]
pub struct ListingRow {
    pub id: DbId,
    pub title: String,
    pub tags: Vec<String>,
    pub price: String,
    pub location: String,
    pub category: String,
    pub label: Option<String>,
    pub created_at: Timestamp,
    pub user_id: Option<String>,
}

impl From<ListingRow> for Listing {
    fn from(row: ListingRow) -> Self {
        Listing {
            id: row.id,
            title: row.title,
            tags: row.tags,
            price: row.price,
            location: row.location,
            category: row.category,
            label: row.label,
            created_at: row.created_at,
            user_id: row.user_id,
        }
    }
}
