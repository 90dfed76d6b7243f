//! Popup Builder REST API
//!
//! Serves the `popups` table over `/api/popups`. The binary in `main.rs`
//! wires configuration, logging and the SQLite store; tests build the same
//! app around an in-memory repository.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
