//! Monthly report matrix
//!
//! Reshapes a month of stock movements into a dense grid: one row per
//! description, one purchase and one usage column per day of the month, and
//! the opening/total/closing figures. The grid can be filled from the
//! server-aggregated report (authoritative) or aggregated locally from raw
//! entries; both produce the same [`MonthlyMatrix`].

use std::collections::HashSet;
use std::ops::RangeInclusive;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::models::{Description, MonthlyReportResponse, StockEntry};
use crate::types::{YearMonth, YearMonthError};

/// One description's movements over a month
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatrixRow {
    /// 1-based serial number as displayed
    pub sn: i64,
    pub description_id: Option<i64>,
    pub description: String,
    pub opening: i64,
    /// Purchases per day; index 0 is day 1
    pub daily_purchase: Vec<i64>,
    /// Usage per day; index 0 is day 1
    pub daily_usage: Vec<i64>,
    pub total_purchase: i64,
    pub total_usage: i64,
    pub closing: i64,
}

impl MatrixRow {
    fn blank(sn: i64, description: &Description, days: u32) -> Self {
        Self {
            sn,
            description_id: Some(description.id),
            description: description.name.clone(),
            opening: description.opening_stock,
            daily_purchase: vec![0; days as usize],
            daily_usage: vec![0; days as usize],
            total_purchase: 0,
            total_usage: 0,
            closing: description.opening_stock,
        }
    }

    /// Purchase quantity on a 1-based day; 0 outside the month
    pub fn purchase_on(&self, day: u32) -> i64 {
        day_value(&self.daily_purchase, day)
    }

    /// Usage quantity on a 1-based day; 0 outside the month
    pub fn usage_on(&self, day: u32) -> i64 {
        day_value(&self.daily_usage, day)
    }

    /// Opening plus purchases, ignoring usage
    pub fn purchase_only_closing(&self) -> i64 {
        self.opening + self.total_purchase
    }

    /// Opening minus usage, ignoring purchases
    pub fn usage_only_closing(&self) -> i64 {
        self.opening - self.total_usage
    }

    fn apply(&mut self, day: u32, purchase: i64, usage: i64) {
        if let Some(slot) = self.daily_purchase.get_mut(day as usize - 1) {
            *slot += purchase;
        }
        if let Some(slot) = self.daily_usage.get_mut(day as usize - 1) {
            *slot += usage;
        }
        self.total_purchase += purchase;
        self.total_usage += usage;
    }

    fn close(&mut self) {
        // negative balances are kept as-is
        self.closing = self.opening + self.total_purchase - self.total_usage;
    }
}

fn day_value(values: &[i64], day: u32) -> i64 {
    if day == 0 {
        return 0;
    }
    values.get(day as usize - 1).copied().unwrap_or(0)
}

/// Day-by-day stock grid for one month
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthlyMatrix {
    pub month: YearMonth,
    pub days: u32,
    pub rows: Vec<MatrixRow>,
}

impl MonthlyMatrix {
    /// Empty grid for a month
    pub fn empty(month: YearMonth) -> Self {
        Self {
            month,
            days: month.days_in_month(),
            rows: Vec::new(),
        }
    }

    /// Take the backend's aggregated rows verbatim.
    ///
    /// Totals and closing stock come from the server; nothing is recomputed.
    /// Day columns past the end of the month are dropped.
    pub fn from_server(response: &MonthlyReportResponse) -> Result<Self, YearMonthError> {
        let month: YearMonth = response.year_month.parse()?;
        let days = month.days_in_month();

        let rows = response
            .data
            .iter()
            .enumerate()
            .map(|(idx, row)| MatrixRow {
                sn: row.sn.unwrap_or(idx as i64 + 1),
                description_id: None,
                description: row.description.clone(),
                opening: row.opening_stock.unwrap_or(0),
                daily_purchase: (1..=days).map(|d| row.purchase_on(d)).collect(),
                daily_usage: (1..=days).map(|d| row.usage_on(d)).collect(),
                total_purchase: row.total_purchase.unwrap_or(0),
                total_usage: row.total_usage.unwrap_or(0),
                closing: row.closing_stock.unwrap_or(0),
            })
            .collect();

        Ok(Self { month, days, rows })
    }

    /// Aggregate raw entries locally.
    ///
    /// Produces one row per active description, plus any inactive description
    /// that still has entries in the month, in the order of `descriptions`.
    /// Entries outside the month or for unknown descriptions are ignored.
    pub fn from_entries(
        month: YearMonth,
        descriptions: &[Description],
        entries: &[StockEntry],
    ) -> Self {
        let days = month.days_in_month();

        let in_month: Vec<&StockEntry> = entries
            .iter()
            .filter(|e| month.contains(e.entry_date))
            .collect();
        let touched: HashSet<i64> = in_month.iter().map(|e| e.description_id).collect();

        let mut rows: Vec<MatrixRow> = Vec::new();
        for description in descriptions
            .iter()
            .filter(|d| d.active || touched.contains(&d.id))
        {
            let mut row = MatrixRow::blank(rows.len() as i64 + 1, description, days);
            for entry in in_month
                .iter()
                .filter(|e| e.description_id == description.id)
            {
                let (purchase, usage) = entry.contribution();
                row.apply(entry.entry_date.day(), purchase, usage);
            }
            row.close();
            rows.push(row);
        }

        Self { month, days, rows }
    }

    /// Days shown as columns, `1..=days`
    pub fn day_range(&self) -> RangeInclusive<u32> {
        1..=self.days
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Copy of the grid keeping only rows whose description matches `term`
    pub fn filtered(&self, term: &str) -> Self {
        Self {
            month: self.month,
            days: self.days,
            rows: filter_rows(&self.rows, term),
        }
    }

    /// Column totals across all rows: `(purchase, usage, closing)`
    pub fn totals(&self) -> (i64, i64, i64) {
        self.rows.iter().fold((0, 0, 0), |(p, u, c), row| {
            (p + row.total_purchase, u + row.total_usage, c + row.closing)
        })
    }
}

/// Case-insensitive substring filter on the description.
///
/// A blank term returns every row unchanged.
pub fn filter_rows(rows: &[MatrixRow], term: &str) -> Vec<MatrixRow> {
    rows.iter()
        .filter(|row| crate::models::name_matches(&row.description, term))
        .cloned()
        .collect()
}
