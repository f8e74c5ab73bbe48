//! TUI widgets for db-suggest.
//!
//! Contains reusable UI components.

pub mod dropdown;
pub mod header;
pub mod input;
pub mod selection;
