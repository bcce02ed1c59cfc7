//! CSV and ZIP export of the monthly matrix
//!
//! Three CSV layouts are produced from the same grid (all stock, purchases
//! only, usage only) and bundled into a single archive for download.

use std::io::{Cursor, Write};

use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::models::MAX_REPORT_DAYS;
use crate::report::{MatrixRow, MonthlyMatrix};
use crate::types::YearMonth;

/// Export failures
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// The three CSV layouts in the export archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CsvVariant {
    AllStock,
    Purchase,
    Usage,
}

impl CsvVariant {
    pub const ALL: [CsvVariant; 3] = [
        CsvVariant::AllStock,
        CsvVariant::Purchase,
        CsvVariant::Usage,
    ];

    /// Name of the file inside the archive
    pub fn file_name(&self) -> &'static str {
        match self {
            CsvVariant::AllStock => "1_All_Stock.csv",
            CsvVariant::Purchase => "2_Purchase_Records.csv",
            CsvVariant::Usage => "3_Usage_Records.csv",
        }
    }

    fn has_purchase(&self) -> bool {
        matches!(self, CsvVariant::AllStock | CsvVariant::Purchase)
    }

    fn has_usage(&self) -> bool {
        matches!(self, CsvVariant::AllStock | CsvVariant::Usage)
    }

    /// Header row for a month of `days` days
    pub fn headers(&self, days: u32) -> Vec<String> {
        let mut headers = vec![
            "S/N".to_string(),
            "Description".to_string(),
            "Opening".to_string(),
        ];
        if self.has_purchase() {
            headers.extend((1..=days).map(|d| format!("P-{}", d)));
        }
        if self.has_usage() {
            headers.extend((1..=days).map(|d| format!("U-{}", d)));
        }
        if self.has_purchase() {
            headers.push("Total Purchase".to_string());
        }
        if self.has_usage() {
            headers.push("Total Usage".to_string());
        }
        headers.push("Closing Stock".to_string());
        headers
    }

    /// Data cells for one row, in header order
    pub fn record(&self, row: &MatrixRow, days: u32) -> Vec<String> {
        let mut record = vec![
            row.sn.to_string(),
            row.description.clone(),
            row.opening.to_string(),
        ];
        if self.has_purchase() {
            record.extend((1..=days).map(|d| row.purchase_on(d).to_string()));
        }
        if self.has_usage() {
            record.extend((1..=days).map(|d| row.usage_on(d).to_string()));
        }
        if self.has_purchase() {
            record.push(row.total_purchase.to_string());
        }
        if self.has_usage() {
            record.push(row.total_usage.to_string());
        }
        record.push(row.closing.to_string());
        record
    }
}

impl std::str::FromStr for CsvVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" | "all_stock" => Ok(CsvVariant::AllStock),
            "purchase" => Ok(CsvVariant::Purchase),
            "usage" => Ok(CsvVariant::Usage),
            other => Err(format!("unknown report view: {}", other)),
        }
    }
}

/// Render one CSV layout.
///
/// Every file carries the fixed 31 purchase/usage day columns; days past the
/// end of a short month are 0. Fields are comma separated and lines end in
/// `\n`. The description is always quoted with embedded quotes doubled;
/// numbers and headers are written bare.
pub fn generate_csv(variant: CsvVariant, matrix: &MonthlyMatrix) -> Result<String, ExportError> {
    // quoting is applied to the description by hand, so the writer must not
    // quote again
    let mut wtr = WriterBuilder::new()
        .delimiter(b',')
        .terminator(Terminator::Any(b'\n'))
        .quote_style(QuoteStyle::Never)
        .from_writer(vec![]);

    wtr.write_record(variant.headers(MAX_REPORT_DAYS))?;
    for row in &matrix.rows {
        let mut record = variant.record(row, MAX_REPORT_DAYS);
        record[1] = quote_field(&record[1]);
        wtr.write_record(&record)?;
    }

    let bytes = wtr.into_inner().map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Wrap a field in double quotes, doubling any quote inside it
fn quote_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Parse CSV text produced by [`generate_csv`] back into rows of cells,
/// header row included
pub fn parse_csv(text: &str) -> Result<Vec<Vec<String>>, ExportError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Bundle the three CSV layouts into an in-memory deflated archive
pub fn build_zip(matrix: &MonthlyMatrix) -> Result<Vec<u8>, ExportError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for variant in CsvVariant::ALL {
        let csv = generate_csv(variant, matrix)?;
        zip.start_file(variant.file_name(), options)?;
        zip.write_all(csv.as_bytes())?;
    }

    Ok(zip.finish()?.into_inner())
}

/// `Stock_Report_2024-03.zip`
pub fn zip_file_name(month: YearMonth) -> String {
    format!("Stock_Report_{}.zip", month)
}

/// `Stock_Report_2024-3.xlsx` (month is not zero-padded)
pub fn xlsx_file_name(month: YearMonth) -> String {
    format!("Stock_Report_{}-{}.xlsx", month.year(), month.month())
}
