//! Shared types and models for the A4 Stock Tracker
//!
//! This crate contains the domain types, the monthly report matrix builder and
//! the CSV/ZIP export encoder. It performs no I/O so it can be used by the
//! command-line client and by the browser (via WASM) alike.

pub mod export;
pub mod models;
pub mod report;
pub mod types;
pub mod validation;

pub use export::*;
pub use models::*;
pub use report::*;
pub use types::*;
pub use validation::*;
