//! Campaign Tracker gateway library entry.
//!
//! This crate wires config, the campaign store, the progress/chart handlers,
//! and ops endpoints into an axum service. It is consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod api;
pub mod app_state;
pub mod config;
pub mod cors;
pub mod obs;
pub mod ops;
pub mod router;
pub mod store;
