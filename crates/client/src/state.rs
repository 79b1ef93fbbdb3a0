//! Local mirror of the listing collection.
//!
//! [`ListingsState`] owns a [`watch`] channel holding the current
//! [`ListingsSnapshot`]. Reads replace the collection; successful mutations
//! patch it in place. Nothing is applied optimistically, so a failed call
//! leaves the mirror untouched.

use std::sync::{Arc, Weak};

use tokio::sync::watch;

use roehrenboerse_core::listing::{CreateListing, Listing, UpdateListing};
use roehrenboerse_core::types::DbId;

use crate::api::ListingsTransport;
use crate::error::ClientError;

/// Point-in-time view of the client state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingsSnapshot {
    /// Newest first, in the order the last fetch returned them.
    pub listings: Vec<Listing>,
    /// A fetch is in flight.
    pub loading: bool,
    /// Message of the last failed fetch, cleared by the next successful one.
    pub error: Option<String>,
}

struct Shared {
    transport: Arc<dyn ListingsTransport>,
    tx: watch::Sender<ListingsSnapshot>,
}

impl Shared {
    fn apply_fetch(&self, result: Result<Vec<Listing>, ClientError>) {
        match result {
            Ok(listings) => {
                tracing::debug!(count = listings.len(), "Listings fetched");
                self.tx.send_modify(|s| {
                    s.listings = listings;
                    s.error = None;
                    s.loading = false;
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch listings");
                self.tx.send_modify(|s| {
                    s.error = Some(e.to_string());
                    s.loading = false;
                });
            }
        }
    }
}

/// Client-side listing collection backed by a [`ListingsTransport`].
///
/// Must be created inside a Tokio runtime: construction spawns the initial
/// fetch.
pub struct ListingsState {
    shared: Arc<Shared>,
}

impl ListingsState {
    /// Create the state and start loading all listings in the background.
    ///
    /// The background fetch only holds a weak reference; if the state is
    /// dropped before it completes, the result is discarded.
    pub fn new(transport: Arc<dyn ListingsTransport>) -> Self {
        let (tx, _rx) = watch::channel(ListingsSnapshot {
            loading: true,
            ..Default::default()
        });
        let shared = Arc::new(Shared { transport, tx });

        let weak = Arc::downgrade(&shared);
        tokio::spawn(initial_fetch(weak));

        Self { shared }
    }

    /// Reload the full collection.
    ///
    /// Failures are recorded in [`ListingsSnapshot::error`] and the previous
    /// collection is kept.
    pub async fn refetch(&self) {
        self.shared.tx.send_modify(|s| s.loading = true);
        let result = self.shared.transport.fetch_all().await;
        self.shared.apply_fetch(result);
    }

    /// Wait until no fetch is in flight.
    pub async fn loaded(&self) -> ListingsSnapshot {
        let mut rx = self.shared.tx.subscribe();
        let snapshot = match rx.wait_for(|s| !s.loading).await {
            Ok(snapshot) => snapshot.clone(),
            // The sender lives in `self`, so the channel cannot close here.
            Err(_) => self.snapshot(),
        };
        snapshot
    }

    /// Create a listing and put it at the front of the collection.
    pub async fn create(&self, input: &CreateListing) -> Result<Listing, ClientError> {
        let created = self.shared.transport.create(input).await?;
        tracing::info!(listing_id = created.id, "Listing created");
        self.shared
            .tx
            .send_modify(|s| s.listings.insert(0, created.clone()));
        Ok(created)
    }

    /// Update a listing and replace the local copy with the stored record.
    pub async fn update(&self, id: DbId, patch: &UpdateListing) -> Result<Listing, ClientError> {
        let updated = self.shared.transport.update(id, patch).await?;
        tracing::info!(listing_id = id, "Listing updated");
        self.shared.tx.send_modify(|s| {
            for listing in s.listings.iter_mut().filter(|l| l.id == id) {
                *listing = updated.clone();
            }
        });
        Ok(updated)
    }

    /// Delete a listing and drop it from the collection.
    pub async fn delete(&self, id: DbId) -> Result<(), ClientError> {
        self.shared.transport.delete(id).await?;
        tracing::info!(listing_id = id, "Listing deleted");
        self.shared.tx.send_modify(|s| s.listings.retain(|l| l.id != id));
        Ok(())
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> ListingsSnapshot {
        self.shared.tx.borrow().clone()
    }

    /// Receiver that is notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<ListingsSnapshot> {
        self.shared.tx.subscribe()
    }

    /// Listings matching the list-view filters. Empty inputs do not filter.
    pub fn visible(&self, search: &str, category: &str) -> Vec<Listing> {
        let search = search.trim();
        let category = category.trim();
        self.shared
            .tx
            .borrow()
            .listings
            .iter()
            .filter(|l| category.is_empty() || l.category == category)
            .filter(|l| search.is_empty() || l.matches_query(search))
            .cloned()
            .collect()
    }
}

async fn initial_fetch(weak: Weak<Shared>) {
    let Some(transport) = weak.upgrade().map(|s| Arc::clone(&s.transport)) else {
        return;
    };
    let result = transport.fetch_all().await;
    match weak.upgrade() {
        Some(shared) => shared.apply_fetch(result),
        None => tracing::debug!("Listings state dropped before initial fetch completed"),
    }
}
