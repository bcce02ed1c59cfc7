//! Monthly report loading and plain-text rendering

use std::path::Path;

use clap::ValueEnum;
use shared::{MatrixRow, MonthlyMatrix, StockEntry, YearMonth};

use crate::api::StockApiClient;
use crate::error::AppResult;

/// Shown instead of an empty table
pub const NO_DATA_MESSAGE: &str = "No data found for the selected month";

/// Which movements a rendered table shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportView {
    #[default]
    All,
    Purchase,
    Usage,
}

impl ReportView {
    fn shows_purchase(&self) -> bool {
        matches!(self, ReportView::All | ReportView::Purchase)
    }

    fn shows_usage(&self) -> bool {
        matches!(self, ReportView::All | ReportView::Usage)
    }

    /// Closing figure for the tab: the full balance, or the one-sided
    /// purchase/usage closing
    fn closing(&self, row: &MatrixRow) -> i64 {
        match self {
            ReportView::All => row.closing,
            ReportView::Purchase => row.purchase_only_closing(),
            ReportView::Usage => row.usage_only_closing(),
        }
    }
}

/// Report service
#[derive(Clone)]
pub struct ReportService {
    api: StockApiClient,
}

impl ReportService {
    pub fn new(api: StockApiClient) -> Self {
        Self { api }
    }

    /// Load the server-aggregated report for a month
    pub async fn load(&self, month: YearMonth) -> AppResult<MonthlyMatrix> {
        let response = self.api.monthly_report(month).await?;
        let matrix = MonthlyMatrix::from_server(&response)?;
        tracing::info!(month = %month, rows = matrix.rows.len(), "Report loaded");
        Ok(matrix)
    }

    /// Aggregate a local JSON array of stock entries against the backend's
    /// description list
    pub async fn from_entries_file(
        &self,
        month: YearMonth,
        path: &Path,
    ) -> AppResult<MonthlyMatrix> {
        let raw = tokio::fs::read_to_string(path).await?;
        let entries: Vec<StockEntry> = serde_json::from_str(&raw)?;
        let descriptions = self.api.list_descriptions().await?;

        let matrix = MonthlyMatrix::from_entries(month, &descriptions, &entries);
        tracing::info!(
            month = %month,
            entries = entries.len(),
            rows = matrix.rows.len(),
            "Report aggregated from {}",
            path.display()
        );
        Ok(matrix)
    }
}

/// Render the matrix as an aligned text table.
///
/// Zero day cells show as `-`. An empty matrix renders [`NO_DATA_MESSAGE`].
pub fn render_table(matrix: &MonthlyMatrix, view: ReportView) -> String {
    if matrix.is_empty() {
        return NO_DATA_MESSAGE.to_string();
    }

    let mut header = vec![
        "S/N".to_string(),
        "Description".to_string(),
        "Opening".to_string(),
    ];
    if view.shows_purchase() {
        header.extend(matrix.day_range().map(|d| format!("P-{}", d)));
    }
    if view.shows_usage() {
        header.extend(matrix.day_range().map(|d| format!("U-{}", d)));
    }
    if view.shows_purchase() {
        header.push("Total Purchase".to_string());
    }
    if view.shows_usage() {
        header.push("Total Usage".to_string());
    }
    header.push("Closing Stock".to_string());

    let mut lines = vec![header];
    for row in &matrix.rows {
        let mut cells = vec![
            row.sn.to_string(),
            row.description.clone(),
            row.opening.to_string(),
        ];
        if view.shows_purchase() {
            cells.extend(matrix.day_range().map(|d| day_cell(row.purchase_on(d))));
        }
        if view.shows_usage() {
            cells.extend(matrix.day_range().map(|d| day_cell(row.usage_on(d))));
        }
        if view.shows_purchase() {
            cells.push(row.total_purchase.to_string());
        }
        if view.shows_usage() {
            cells.push(row.total_usage.to_string());
        }
        cells.push(view.closing(row).to_string());
        lines.push(cells);
    }

    let columns = lines[0].len();
    let widths: Vec<usize> = (0..columns)
        .map(|col| {
            lines
                .iter()
                .map(|line| line[col].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    lines
        .iter()
        .map(|line| {
            line.iter()
                .zip(&widths)
                .enumerate()
                .map(|(col, (cell, width))| {
                    // description is left aligned, numbers right aligned
                    if col == 1 {
                        format!("{:<width$}", cell, width = *width)
                    } else {
                        format!("{:>width$}", cell, width = *width)
                    }
                })
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn day_cell(value: i64) -> String {
    if value > 0 {
        value.to_string()
    } else {
        "-".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::{Description, EntryKind};

    fn matrix() -> MonthlyMatrix {
        let month = YearMonth::new(2024, 2).unwrap();
        let descriptions = vec![
            Description {
                id: 1,
                name: "A4 White Ream".to_string(),
                opening_stock: 100,
                active: true,
            },
            Description {
                id: 2,
                name: "Packing".to_string(),
                opening_stock: 5,
                active: true,
            },
        ];
        let entries = vec![
            StockEntry {
                id: 1,
                entry_date: NaiveDate::from_ymd_opt(2024, 2, 5).unwrap(),
                description_id: 1,
                color_id: 1,
                purchase_qty: 0,
                usage_qty: 10,
                reason: Some("Daily usage".to_string()),
                kind: Some(EntryKind::Usage),
            },
            StockEntry {
                id: 2,
                entry_date: NaiveDate::from_ymd_opt(2024, 2, 6).unwrap(),
                description_id: 1,
                color_id: 1,
                purchase_qty: 50,
                usage_qty: 0,
                reason: None,
                kind: Some(EntryKind::Purchase),
            },
        ];
        MonthlyMatrix::from_entries(month, &descriptions, &entries)
    }

    #[test]
    fn test_empty_renders_message() {
        let empty = MonthlyMatrix::empty(YearMonth::new(2024, 3).unwrap());
        assert_eq!(render_table(&empty, ReportView::All), NO_DATA_MESSAGE);
    }

    #[test]
    fn test_usage_view() {
        let table = render_table(&matrix(), ReportView::Usage);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);

        let header: Vec<&str> = lines[0].split(" | ").map(str::trim).collect();
        // S/N, Description, Opening, 29 days, Total Usage, Closing Stock
        assert_eq!(header.len(), 3 + 29 + 2);
        assert_eq!(header[3], "U-1");
        assert_eq!(header[31], "U-29");

        let row: Vec<&str> = lines[1].split(" | ").map(str::trim).collect();
        assert_eq!(row[1], "A4 White Ream");
        assert_eq!(row[3], "-");
        assert_eq!(row[7], "10");
        assert_eq!(row[32], "10");
        // usage-only closing
        assert_eq!(row[33], "90");
    }

    #[test]
    fn test_all_view_closing() {
        let table = render_table(&matrix(), ReportView::All);
        let row: Vec<&str> = table.lines().nth(1).unwrap().split(" | ").map(str::trim).collect();
        assert_eq!(row.last(), Some(&"140"));

        let purchase = render_table(&matrix(), ReportView::Purchase);
        let row: Vec<&str> = purchase
            .lines()
            .nth(1)
            .unwrap()
            .split(" | ")
            .map(str::trim)
            .collect();
        assert_eq!(row.last(), Some(&"150"));
    }

    #[test]
    fn test_filtered_table() {
        let filtered = matrix().filtered("PACK");
        let table = render_table(&filtered, ReportView::All);
        assert_eq!(table.lines().count(), 2);
        assert!(table.contains("Packing"));

        let none = matrix().filtered("toner");
        assert_eq!(render_table(&none, ReportView::All), NO_DATA_MESSAGE);
    }
}
