//! Client side of the Röhrenbörse marketplace.
//!
//! [`api::ListingsApi`] talks to the listing HTTP API,
//! [`state::ListingsState`] keeps a local newest-first mirror of the
//! collection, and [`form`] / [`auth`] back the creation and login forms.
//! [`session::SessionState`] tracks who is signed in.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod form;
pub mod session;
pub mod state;
