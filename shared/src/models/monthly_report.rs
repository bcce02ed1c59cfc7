//! Monthly report payload as returned by `GET /stock/monthly/{YYYY-MM}`

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Color;

/// Largest day index the backend emits (`purchase_day_31`)
pub const MAX_REPORT_DAYS: u32 = 31;

/// Server-aggregated report for one month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyReportResponse {
    pub year_month: String,
    #[serde(default)]
    pub colors: Vec<Color>,
    #[serde(default)]
    pub data: Vec<ServerReportRow>,
}

/// One row of the server report, keyed by zero-padded day columns
/// (`purchase_day_01` .. `usage_day_31`)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServerReportRow {
    #[serde(default)]
    pub sn: Option<i64>,
    pub description: String,
    #[serde(default)]
    pub opening_stock: Option<i64>,
    #[serde(default)]
    pub total_purchase: Option<i64>,
    #[serde(default)]
    pub total_usage: Option<i64>,
    #[serde(default)]
    pub closing_stock: Option<i64>,
    #[serde(default)]
    pub closing_stock_purchase: Option<i64>,
    #[serde(default)]
    pub closing_stock_usage: Option<i64>,
    /// Day columns and anything else the backend adds
    #[serde(flatten)]
    pub columns: BTreeMap<String, Value>,
}

impl ServerReportRow {
    /// Column name for a purchase day, e.g. `purchase_day_05`
    pub fn purchase_key(day: u32) -> String {
        format!("purchase_day_{:02}", day)
    }

    /// Column name for a usage day, e.g. `usage_day_05`
    pub fn usage_key(day: u32) -> String {
        format!("usage_day_{:02}", day)
    }

    pub fn purchase_on(&self, day: u32) -> i64 {
        self.column(&Self::purchase_key(day))
    }

    pub fn usage_on(&self, day: u32) -> i64 {
        self.column(&Self::usage_key(day))
    }

    /// Numeric column value; absent, null or non-numeric cells read as 0
    fn column(&self, key: &str) -> i64 {
        self.columns
            .get(key)
            .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
            .unwrap_or(0)
    }
}
