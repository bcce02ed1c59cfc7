//! Domain models for the A4 Stock Tracker

mod color;
mod description;
mod monthly_report;
mod stock_entry;

pub use color::*;
pub use description::*;
pub use monthly_report::*;
pub use stock_entry::*;
