//! Repository for the `listings` table.

use async_trait::async_trait;
use roehrenboerse_core::listing::{CreateListing, Listing, UpdateListing};
use roehrenboerse_core::search::contains_pattern;
use roehrenboerse_core::types::DbId;
use sqlx::PgPool;

use crate::models::listing::ListingRow;
use crate::store::{ListingFilter, ListingStore, SortOrder, StoreError};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, tags, price, location, category, label, created_at, user_id";

/// Provides CRUD operations for listings.
pub struct ListingRepo;

impl ListingRepo {
    /// Insert a new listing, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateListing) -> Result<Listing, sqlx::Error> {
        let query = format!(
            "INSERT INTO listings (title, tags, price, location, category, label, user_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ListingRow>(&query)
            .bind(&input.title)
            .bind(&input.tags)
            .bind(&input.price)
            .bind(&input.location)
            .bind(&input.category)
            .bind(&input.label)
            .bind(&input.user_id)
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    /// Find a listing by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM listings WHERE id = $1");
        let row = sqlx::query_as::<_, ListingRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Listing::from))
    }

    /// List all listings in the given order.
    pub async fn list(pool: &PgPool, order: SortOrder) -> Result<Vec<Listing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM listings ORDER BY {}", order.to_sql());
        let rows = sqlx::query_as::<_, ListingRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Listing::from).collect())
    }

    /// List listings with an exact category match.
    pub async fn list_by_category(
        pool: &PgPool,
        category: &str,
        order: SortOrder,
    ) -> Result<Vec<Listing>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM listings WHERE category = $1 ORDER BY {}",
            order.to_sql()
        );
        let rows = sqlx::query_as::<_, ListingRow>(&query)
            .bind(category)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Listing::from).collect())
    }

    /// Search listings by title substring (case-insensitive) or exact tag.
    pub async fn search(
        pool: &PgPool,
        query_text: &str,
        order: SortOrder,
    ) -> Result<Vec<Listing>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM listings \
             WHERE title ILIKE $1 ESCAPE '\\' OR tags @> ARRAY[$2]::text[] \
             ORDER BY {}",
            order.to_sql()
        );
        let rows = sqlx::query_as::<_, ListingRow>(&query)
            .bind(contains_pattern(query_text))
            .bind(query_text)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Listing::from).collect())
    }

    /// Update a listing. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateListing,
    ) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!(
            "UPDATE listings SET \
                title = COALESCE($2, title), \
                tags = COALESCE($3, tags), \
                price = COALESCE($4, price), \
                location = COALESCE($5, location), \
                category = COALESCE($6, category), \
                label = COALESCE($7, label), \
                user_id = COALESCE($8, user_id) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ListingRow>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.tags)
            .bind(&input.price)
            .bind(&input.location)
            .bind(&input.category)
            .bind(&input.label)
            .bind(&input.user_id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Listing::from))
    }

    /// Delete a listing. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM listings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// [`ListingStore`] backed by PostgreSQL.
#[derive(Clone)]
pub struct PgListingStore {
    pool: PgPool,
}

impl PgListingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListingStore for PgListingStore {
    async fn select_all(&self, order: SortOrder) -> Result<Vec<Listing>, StoreError> {
        Ok(ListingRepo::list(&self.pool, order).await?)
    }

    async fn select_by_id(&self, id: DbId) -> Result<Option<Listing>, StoreError> {
        Ok(ListingRepo::find_by_id(&self.pool, id).await?)
    }

    async fn select_where(
        &self,
        filter: &ListingFilter,
        order: SortOrder,
    ) -> Result<Vec<Listing>, StoreError> {
        let rows = match filter {
            ListingFilter::Category(category) => {
                ListingRepo::list_by_category(&self.pool, category, order).await?
            }
            ListingFilter::Search(query) => ListingRepo::search(&self.pool, query, order).await?,
        };
        Ok(rows)
    }

    async fn insert(&self, input: &CreateListing) -> Result<Listing, StoreError> {
        Ok(ListingRepo::create(&self.pool, input).await?)
    }

    async fn update_by_id(
        &self,
        id: DbId,
        patch: &UpdateListing,
    ) -> Result<Option<Listing>, StoreError> {
        Ok(ListingRepo::update(&self.pool, id, patch).await?)
    }

    async fn delete_by_id(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(ListingRepo::delete(&self.pool, id).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
