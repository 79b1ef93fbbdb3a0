//! In-process [`ListingStore`].
//!
//! Rows live in a `Vec` behind a `tokio::sync::RwLock`. Ids come from a
//! counter starting at 1 and `created_at` is strictly increasing, so
//! newest-first order is total even when inserts land in the same clock
//! tick.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use roehrenboerse_core::listing::{CreateListing, Listing, UpdateListing};
use roehrenboerse_core::types::{DbId, Timestamp};
use tokio::sync::RwLock;

use crate::store::{ListingFilter, ListingStore, SortOrder, StoreError};

#[derive(Debug, Default)]
struct Inner {
    rows: Vec<Listing>,
    next_id: DbId,
    last_created_at: Option<Timestamp>,
    outage: Option<String>,
}

impl Inner {
    fn check_available(&self) -> Result<(), StoreError> {
        match &self.outage {
            Some(message) => Err(StoreError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }

    fn next_created_at(&mut self) -> Timestamp {
        let now = Utc::now();
        let created_at = match self.last_created_at {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_created_at = Some(created_at);
        created_at
    }
}

/// [`ListingStore`] holding rows in memory.
#[derive(Debug, Default)]
pub struct MemoryListingStore {
    inner: RwLock<Inner>,
}

impl MemoryListingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with [`StoreError::Unavailable`]
    /// carrying `message`, until [`MemoryListingStore::restore`] is called.
    pub async fn simulate_outage(&self, message: impl Into<String>) {
        self.inner.write().await.outage = Some(message.into());
    }

    /// End a simulated outage.
    pub async fn restore(&self) {
        self.inner.write().await.outage = None;
    }

    fn sorted(mut rows: Vec<Listing>, order: SortOrder) -> Vec<Listing> {
        rows.sort_by(|a, b| order.compare(a, b));
        rows
    }
}

#[async_trait]
impl ListingStore for MemoryListingStore {
    async fn select_all(&self, order: SortOrder) -> Result<Vec<Listing>, StoreError> {
        let inner = self.inner.read().await;
        inner.check_available()?;
        Ok(Self::sorted(inner.rows.clone(), order))
    }

    async fn select_by_id(&self, id: DbId) -> Result<Option<Listing>, StoreError> {
        let inner = self.inner.read().await;
        inner.check_available()?;
        Ok(inner.rows.iter().find(|l| l.id == id).cloned())
    }

    async fn select_where(
        &self,
        filter: &ListingFilter,
        order: SortOrder,
    ) -> Result<Vec<Listing>, StoreError> {
        let inner = self.inner.read().await;
        inner.check_available()?;
        let rows = inner
            .rows
            .iter()
            .filter(|l| filter.matches(l))
            .cloned()
            .collect();
        Ok(Self::sorted(rows, order))
    }

    async fn insert(&self, input: &CreateListing) -> Result<Listing, StoreError> {
        let mut inner = self.inner.write().await;
        inner.check_available()?;
        inner.next_id += 1;
        let listing = Listing {
            id: inner.next_id,
            title: input.title.clone(),
            tags: input.tags.clone(),
            price: input.price.clone(),
            location: input.location.clone(),
            category: input.category.clone(),
            label: input.label.clone(),
            created_at: inner.next_created_at(),
            user_id: input.user_id.clone(),
        };
        inner.rows.push(listing.clone());
        tracing::debug!(listing_id = listing.id, "Inserted listing into memory store");
        Ok(listing)
    }

    async fn update_by_id(
        &self,
        id: DbId,
        patch: &UpdateListing,
    ) -> Result<Option<Listing>, StoreError> {
        let mut inner = self.inner.write().await;
        inner.check_available()?;
        let Some(listing) = inner.rows.iter_mut().find(|l| l.id == id) else {
            return Ok(None);
        };
        patch.apply_to(listing);
        Ok(Some(listing.clone()))
    }

    async fn delete_by_id(&self, id: DbId) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        inner.check_available()?;
        let before = inner.rows.len();
        inner.rows.retain(|l| l.id != id);
        Ok(inner.rows.len() < before)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.read().await.check_available()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn input(title: &str, category: &str, tags: &[&str]) -> CreateListing {
        CreateListing {
            title: title.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            price: "50 €".to_string(),
            location: "Leipzig".to_string(),
            category: category.to_string(),
            label: None,
            user_id: None,
        }
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids_and_timestamps() {
        let store = MemoryListingStore::new();
        let a = store.insert(&input("A", "Röhre", &[])).await.unwrap();
        let b = store.insert(&input("B", "Röhre", &[])).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert!(b.created_at > a.created_at);
    }

    #[tokio::test]
    async fn select_all_is_newest_first() {
        let store = MemoryListingStore::new();
        for title in ["first", "second", "third"] {
            store.insert(&input(title, "Röhre", &[])).await.unwrap();
        }

        let rows = store.select_all(SortOrder::NEWEST_FIRST).await.unwrap();
        let titles: Vec<_> = rows.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, ["third", "second", "first"]);
    }

    #[tokio::test]
    async fn category_filter_is_exact() {
        let store = MemoryListingStore::new();
        store.insert(&input("EL34", "Endröhre", &[])).await.unwrap();
        store.insert(&input("ECC83", "Röhre", &[])).await.unwrap();

        let rows = store
            .select_where(
                &ListingFilter::Category("Endröhre".into()),
                SortOrder::NEWEST_FIRST,
            )
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "EL34");
    }

    #[tokio::test]
    async fn update_and_delete_unknown_id() {
        let store = MemoryListingStore::new();
        let patched = store
            .update_by_id(42, &UpdateListing::default())
            .await
            .unwrap();
        assert!(patched.is_none());
        assert!(!store.delete_by_id(42).await.unwrap());
    }

    #[tokio::test]
    async fn outage_fails_every_call_until_restored() {
        let store = MemoryListingStore::new();
        store.simulate_outage("connection refused").await;

        let err = store.select_all(SortOrder::NEWEST_FIRST).await.unwrap_err();
        assert_matches!(err, StoreError::Unavailable(ref m) if m == "connection refused");
        assert!(store.ping().await.is_err());

        store.restore().await;
        assert!(store.ping().await.is_ok());
    }
}
