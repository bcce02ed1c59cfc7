//! Command-line interface

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use shared::YearMonth;

use crate::services::ReportView;

#[derive(Parser, Debug)]
#[command(name = "a4-stock", version, about = "A4 paper stock tracking client")]
pub struct Cli {
    /// Backend address, overrides api.base_url from configuration
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List descriptions
    Descriptions {
        /// Case-insensitive name filter
        #[arg(long)]
        search: Option<String>,
    },

    /// Create a new description
    AddDescription {
        name: String,

        #[arg(long, default_value_t = 0)]
        opening_stock: i64,
    },

    /// List colours
    Colors,

    /// Create a new colour
    AddColor {
        name: String,

        /// `#RRGGBB`
        hex: String,
    },

    /// Record a stock entry
    Entry(EntryArgs),

    /// Record a purchase for a description in one step
    QuickPurchase {
        description: String,

        qty: u32,

        /// Colour name, defaults to entry.default_color
        #[arg(long)]
        color: Option<String>,

        /// Entry date, defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show the monthly report
    Report {
        month: YearMonth,

        #[arg(long)]
        search: Option<String>,

        #[arg(long, value_enum, default_value_t = ReportView::All)]
        view: ReportView,

        /// Aggregate a local JSON file of stock entries instead of the
        /// server report
        #[arg(long)]
        entries: Option<PathBuf>,
    },

    /// Download the three CSV reports as one ZIP archive
    ExportZip {
        month: YearMonth,

        #[arg(long)]
        search: Option<String>,

        /// Output directory, defaults to export.output_dir
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Download the backend's spreadsheet for a month
    ExportExcel {
        month: YearMonth,

        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Carry a month's closing stock into the opening stock
    Rollover { month: YearMonth },
}

#[derive(Args, Debug)]
pub struct EntryArgs {
    /// Description name
    #[arg(long)]
    pub description: String,

    /// Colour name, defaults to entry.default_color
    #[arg(long)]
    pub color: Option<String>,

    /// Entry date, defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,

    #[arg(long, conflicts_with = "purchase")]
    pub usage: Option<u32>,

    #[arg(long)]
    pub purchase: Option<u32>,

    #[arg(long)]
    pub reason: Option<String>,
}
