//! Handlers for the monthly report, exports and the opening-stock rollover

use std::path::{Path, PathBuf};

use shared::{MonthlyMatrix, YearMonth};

use crate::error::AppResult;
use crate::services::{render_table, ExportService, ReportService, ReportView};
use crate::AppState;

/// `report <YYYY-MM> [--search T] [--view V] [--entries FILE]`
pub async fn show_report(
    state: &AppState,
    month: YearMonth,
    search: Option<&str>,
    view: ReportView,
    entries: Option<&Path>,
) -> AppResult<()> {
    let service = ReportService::new(state.api.clone());
    let matrix = match entries {
        Some(path) => service.from_entries_file(month, path).await?,
        None => service.load(month).await?,
    };
    let matrix = matrix.filtered(search.unwrap_or(""));

    println!("Monthly Stock Report - {}", month);
    println!("{}", render_table(&matrix, view));
    if !matrix.is_empty() {
        let (purchase, usage, closing) = matrix.totals();
        println!(
            "Descriptions: {}  Total Purchase: {}  Total Usage: {}  Closing Stock: {}",
            matrix.rows.len(),
            purchase,
            usage,
            closing
        );
    }
    Ok(())
}

/// `export-zip <YYYY-MM> [--search T] [--out DIR]`
pub async fn export_zip(
    state: &AppState,
    month: YearMonth,
    search: Option<&str>,
    out: Option<PathBuf>,
) -> AppResult<()> {
    let matrix: MonthlyMatrix = ReportService::new(state.api.clone())
        .load(month)
        .await?
        .filtered(search.unwrap_or(""));

    let dir = out.unwrap_or_else(|| state.config.export.output_dir.clone());
    let path = ExportService::new(state.api.clone())
        .write_zip(&matrix, &dir)
        .await?;
    println!("ZIP file downloaded successfully: {}", path.display());
    Ok(())
}

/// `export-excel <YYYY-MM> [--out DIR]`
pub async fn export_excel(state: &AppState, month: YearMonth, out: Option<PathBuf>) -> AppResult<()> {
    let dir = out.unwrap_or_else(|| state.config.export.output_dir.clone());
    let path = ExportService::new(state.api.clone())
        .download_excel(month, &dir)
        .await?;
    println!("Excel file downloaded successfully: {}", path.display());
    Ok(())
}

/// `rollover <YYYY-MM>`
pub async fn rollover(state: &AppState, month: YearMonth) -> AppResult<()> {
    let response = state.api.roll_over_opening_stock(month).await?;
    tracing::info!(month = %month, "Opening stock rolled over");
    println!("{}", response.message);
    Ok(())
}
