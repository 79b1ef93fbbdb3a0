//! Domain services sitting between the HTTP handlers and the record store.

pub mod listing_service;

pub use listing_service::{ListingError, ListingService};
