//! Database row structs.
//!
//! Rows are mapped into the shared domain types from `roehrenboerse_core`.

pub mod listing;
