//! Command handlers
//!
//! Each handler performs one user action against the backend and prints its
//! result to stdout. Errors are returned to `main` untouched.

pub mod entry;
pub mod reference;
pub mod report;

use crate::cli::Command;
use crate::error::AppResult;
use crate::AppState;

/// Run a parsed command
pub async fn dispatch(state: &AppState, command: Command) -> AppResult<()> {
    match command {
        Command::Descriptions { search } => {
            reference::list_descriptions(state, search.as_deref()).await
        }
        Command::AddDescription {
            name,
            opening_stock,
        } => reference::add_description(state, &name, opening_stock).await,
        Command::Colors => reference::list_colors(state).await,
        Command::AddColor { name, hex } => reference::add_color(state, &name, &hex).await,
        Command::Entry(args) => entry::record_entry(state, args).await,
        Command::QuickPurchase {
            description,
            qty,
            color,
            date,
        } => entry::quick_purchase(state, &description, qty, color.as_deref(), date).await,
        Command::Report {
            month,
            search,
            view,
            entries,
        } => {
            report::show_report(state, month, search.as_deref(), view, entries.as_deref()).await
        }
        Command::ExportZip { month, search, out } => {
            report::export_zip(state, month, search.as_deref(), out).await
        }
        Command::ExportExcel { month, out } => report::export_excel(state, month, out).await,
        Command::Rollover { month } => report::rollover(state, month).await,
    }
}
