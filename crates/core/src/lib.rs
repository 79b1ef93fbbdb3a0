//! Pure domain logic for the Röhrenbörse marketplace.
//!
//! Nothing in this crate performs I/O, so it can be shared by the record
//! store, the API server and the client without pulling in a runtime.

pub mod category;
pub mod error;
pub mod listing;
pub mod search;
pub mod tags;
pub mod types;
pub mod validation;
