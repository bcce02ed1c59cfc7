//! WebAssembly module for the A4 Stock Tracker
//!
//! Exposes the report matrix builder, the description filter and the export
//! encoder to a browser front end. Everything goes in and out as JSON or
//! plain strings.

use serde::Serialize;
use shared::{CsvVariant, Description, MonthlyMatrix, MonthlyReportResponse, StockEntry, YearMonth};
use wasm_bindgen::prelude::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&JsValue::from_str("a4-stock wasm module loaded"));
}

/// Build the monthly matrix from raw entries and the description list
#[wasm_bindgen]
pub fn build_monthly_matrix(
    descriptions_json: &str,
    entries_json: &str,
    year_month: &str,
) -> Result<String, JsValue> {
    matrix_from_entries(descriptions_json, entries_json, year_month).map_err(to_js)
}

/// Convert a `GET /stock/monthly/{YYYY-MM}` payload into the matrix shape
#[wasm_bindgen]
pub fn matrix_from_server_report(report_json: &str) -> Result<String, JsValue> {
    matrix_from_report(report_json).map_err(to_js)
}

/// Keep rows whose description contains `term`, ignoring case
#[wasm_bindgen]
pub fn filter_report_rows(matrix_json: &str, term: &str) -> Result<String, JsValue> {
    filter_matrix(matrix_json, term).map_err(to_js)
}

/// Render one CSV layout: `all`, `purchase` or `usage`
#[wasm_bindgen]
pub fn generate_csv_variant(matrix_json: &str, variant: &str) -> Result<String, JsValue> {
    csv_for(matrix_json, variant).map_err(to_js)
}

/// The three CSV layouts as one ZIP archive
#[wasm_bindgen]
pub fn build_zip_archive(matrix_json: &str) -> Result<Vec<u8>, JsValue> {
    zip_for(matrix_json).map_err(to_js)
}

/// Number of days in a month; 0 for an invalid month
#[wasm_bindgen]
pub fn days_in_month(year: i32, month: u32) -> u32 {
    shared::days_in_month(year, month)
}

/// `Stock_Report_<YYYY-MM>.zip`, or an empty string for a malformed month
#[wasm_bindgen]
pub fn zip_file_name(year_month: &str) -> String {
    year_month
        .parse::<YearMonth>()
        .map(shared::zip_file_name)
        .unwrap_or_default()
}

/// `Stock_Report_<year>-<month>.xlsx`, or an empty string for a malformed month
#[wasm_bindgen]
pub fn xlsx_file_name(year_month: &str) -> String {
    year_month
        .parse::<YearMonth>()
        .map(shared::xlsx_file_name)
        .unwrap_or_default()
}

// Native-testable bodies; JsValue is only built at the boundary

fn matrix_from_entries(
    descriptions_json: &str,
    entries_json: &str,
    year_month: &str,
) -> Result<String, String> {
    let month: YearMonth = year_month.parse().map_err(|e| format!("{}", e))?;
    let descriptions: Vec<Description> = parse(descriptions_json, "descriptions")?;
    let entries: Vec<StockEntry> = parse(entries_json, "entries")?;

    to_json(&MonthlyMatrix::from_entries(month, &descriptions, &entries))
}

fn matrix_from_report(report_json: &str) -> Result<String, String> {
    let report: MonthlyReportResponse = parse(report_json, "report")?;
    let matrix = MonthlyMatrix::from_server(&report).map_err(|e| format!("{}", e))?;
    to_json(&matrix)
}

fn filter_matrix(matrix_json: &str, term: &str) -> Result<String, String> {
    let matrix: MonthlyMatrix = parse(matrix_json, "matrix")?;
    to_json(&matrix.filtered(term))
}

fn csv_for(matrix_json: &str, variant: &str) -> Result<String, String> {
    let matrix: MonthlyMatrix = parse(matrix_json, "matrix")?;
    let variant: CsvVariant = variant.parse()?;
    shared::generate_csv(variant, &matrix).map_err(|e| format!("{}", e))
}

fn zip_for(matrix_json: &str) -> Result<Vec<u8>, String> {
    let matrix: MonthlyMatrix = parse(matrix_json, "matrix")?;
    if matrix.is_empty() {
        return Err("No data to download".to_string());
    }
    shared::build_zip(&matrix).map_err(|e| format!("{}", e))
}

fn parse<T: serde::de::DeserializeOwned>(json: &str, what: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization failed: {}", e))
}

fn to_js(message: String) -> JsValue {
    JsValue::from_str(&message)
}
