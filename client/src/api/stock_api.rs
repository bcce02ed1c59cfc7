//! Stock API client
//!
//! Thin transport over the backend's REST endpoints. No business logic lives
//! here; every call is a single request with no retry.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::{
    Color, Description, MonthlyReportResponse, NewColor, NewDescription, NewStockEntry,
    StockEntry, YearMonth,
};

use crate::error::{AppError, AppResult};

/// Stock API client
#[derive(Clone)]
pub struct StockApiClient {
    client: Client,
    base_url: String,
}

/// Response of the opening-stock rollover endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolloverResponse {
    pub message: String,
}

/// FastAPI-style error body
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<Value>,
}

impl StockApiClient {
    /// Create a new StockApiClient
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create a new StockApiClient with a default reqwest client
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /descriptions`
    pub async fn list_descriptions(&self) -> AppResult<Vec<Description>> {
        self.get_json("/descriptions").await
    }

    /// `POST /descriptions`
    pub async fn create_description(&self, input: &NewDescription) -> AppResult<Description> {
        self.post_json("/descriptions", input).await
    }

    /// `GET /colors`
    pub async fn list_colors(&self) -> AppResult<Vec<Color>> {
        self.get_json("/colors").await
    }

    /// `POST /colors`
    pub async fn create_color(&self, input: &NewColor) -> AppResult<Color> {
        self.post_json("/colors", input).await
    }

    /// `POST /stock`
    pub async fn create_stock_entry(&self, entry: &NewStockEntry) -> AppResult<StockEntry> {
        self.post_json("/stock", entry).await
    }

    /// `GET /stock/monthly/{YYYY-MM}`
    pub async fn monthly_report(&self, month: YearMonth) -> AppResult<MonthlyReportResponse> {
        self.get_json(&format!("/stock/monthly/{}", month)).await
    }

    /// `GET /stock/monthly/{YYYY-MM}/excel`, returned as raw bytes
    pub async fn monthly_report_excel(&self, month: YearMonth) -> AppResult<Vec<u8>> {
        let url = self.url(&format!("/stock/monthly/{}/excel", month));
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let response = Self::check(response).await?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }

    /// `POST /stock/update-opening-stock/{YYYY-MM}`: carry this month's
    /// closing stock into each description's opening stock
    pub async fn roll_over_opening_stock(&self, month: YearMonth) -> AppResult<RolloverResponse> {
        self.post_json(
            &format!("/stock/update-opening-stock/{}", month),
            &serde_json::json!({}),
        )
        .await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        let url = self.url(path);
        tracing::debug!("POST {}", url);

        let response = self.client.post(&url).json(body).send().await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    /// Turn a non-2xx response into [`AppError::Api`], keeping the backend's
    /// `detail` when it sent one
    async fn check(response: Response) -> AppResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let detail = extract_detail(&body);
        tracing::warn!("Stock API error: {} - {}", status, body);

        Err(AppError::Api { status, detail })
    }
}

/// Pull a human-readable `detail` out of an error body.
///
/// FastAPI sends either `{"detail": "text"}` or, for request validation,
/// `{"detail": [{"msg": "..."}, ...]}`.
pub fn extract_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Array(items) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    other => other.get("msg").and_then(Value::as_str).map(str::to_string),
                })
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        Value::Null => None,
        Value::String(_) => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_detail_string() {
        assert_eq!(
            extract_detail(r#"{"detail": "Description not found"}"#),
            Some("Description not found".to_string())
        );
    }

    #[test]
    fn test_extract_detail_validation_list() {
        let body = r#"{"detail": [
            {"loc": ["body", "purchase_qty"], "msg": "ensure this value is greater than or equal to 0"},
            {"loc": ["body", "entry_date"], "msg": "field required"}
        ]}"#;
        assert_eq!(
            extract_detail(body),
            Some("ensure this value is greater than or equal to 0; field required".to_string())
        );
    }

    #[test]
    fn test_extract_detail_absent() {
        assert_eq!(extract_detail("Internal Server Error"), None);
        assert_eq!(extract_detail(r#"{"error": "x"}"#), None);
        assert_eq!(extract_detail(r#"{"detail": null}"#), None);
        assert_eq!(extract_detail(r#"{"detail": "  "}"#), None);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = StockApiClient::with_base_url("http://127.0.0.1:8000/");
        assert_eq!(client.base_url(), "http://127.0.0.1:8000");
        assert_eq!(client.url("/colors"), "http://127.0.0.1:8000/colors");
    }
}
