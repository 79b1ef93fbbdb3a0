//! Request handlers.
//!
//! Handlers delegate to the [`ListingService`](crate::services::ListingService)
//! held in [`AppState`](crate::state::AppState) and map errors via
//! [`AppError`](crate::error::AppError).

pub mod listing;
