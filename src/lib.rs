//! db-suggest - A debounced, database-backed autocomplete dropdown for the
//! terminal.
//!
//! This library exposes the core modules for use in integration tests.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod suggest;
pub mod tui;
