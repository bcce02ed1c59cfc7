//! Report downloads: the client-built CSV archive and the backend's
//! spreadsheet
//!
//! Payloads are assembled fully in memory, written to a `.part` file next to
//! the target and renamed into place, so a failed export never leaves a
//! partial file under the final name.

use std::path::{Path, PathBuf};

use shared::{build_zip, xlsx_file_name, zip_file_name, MonthlyMatrix, YearMonth};

use crate::api::StockApiClient;
use crate::error::{AppError, AppResult};

/// Export service
#[derive(Clone)]
pub struct ExportService {
    api: StockApiClient,
}

impl ExportService {
    pub fn new(api: StockApiClient) -> Self {
        Self { api }
    }

    /// Write `Stock_Report_<YYYY-MM>.zip` with the three CSV layouts into `dir`
    pub async fn write_zip(&self, matrix: &MonthlyMatrix, dir: &Path) -> AppResult<PathBuf> {
        if matrix.is_empty() {
            return Err(AppError::EmptyReport(matrix.month));
        }

        let bytes = build_zip(matrix)?;
        let path = dir.join(zip_file_name(matrix.month));
        write_file(&path, &bytes).await?;

        tracing::info!(
            rows = matrix.rows.len(),
            bytes = bytes.len(),
            "ZIP file downloaded successfully"
        );
        Ok(path)
    }

    /// Fetch the backend's spreadsheet and write it unmodified into `dir`
    pub async fn download_excel(&self, month: YearMonth, dir: &Path) -> AppResult<PathBuf> {
        let bytes = self.api.monthly_report_excel(month).await?;
        let path = dir.join(xlsx_file_name(month));
        write_file(&path, &bytes).await?;

        tracing::info!(bytes = bytes.len(), "Excel file downloaded successfully");
        Ok(path)
    }
}

async fn write_file(path: &Path, bytes: &[u8]) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let tmp = part_path(path);
    let written = match tokio::fs::write(&tmp, bytes).await {
        Ok(()) => tokio::fs::rename(&tmp, path).await,
        Err(e) => Err(e),
    };
    if let Err(e) = written {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e.into());
    }

    tracing::debug!("Wrote {}", path.display());
    Ok(())
}

/// Sibling of `path` that holds the payload until it is complete
fn part_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("a4-stock-write-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn listing(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_part_path() {
        assert_eq!(
            part_path(Path::new("out/Stock_Report_2024-03.zip")),
            PathBuf::from("out/Stock_Report_2024-03.zip.part")
        );
    }

    #[tokio::test]
    async fn test_write_replaces_whole_file() {
        let dir = scratch_dir("replace");
        let path = dir.join("Stock_Report_2024-03.zip");

        write_file(&path, b"first payload, longer than the second").await.unwrap();
        write_file(&path, b"second").await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"second");
        assert_eq!(listing(&dir), vec!["Stock_Report_2024-03.zip"]);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_no_part_file() {
        let dir = scratch_dir("failed");
        // a directory under the target name makes the rename fail
        let path = dir.join("Stock_Report_2024-03.zip");
        std::fs::create_dir_all(path.join("occupied")).unwrap();

        assert!(write_file(&path, b"payload").await.is_err());
        assert_eq!(listing(&dir), vec!["Stock_Report_2024-03.zip"]);
        assert!(path.is_dir());
    }
}
