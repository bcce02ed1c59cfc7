//! Stock entries: one recorded purchase or usage event on a given date

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Reason text that marked a purchase on records created before entries
/// carried an explicit kind
pub const LEGACY_PURCHASE_REASON: &str = "New stock received";

/// Kind of a stock entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Purchase,
    Usage,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKind::Purchase => write!(f, "Purchase"),
            EntryKind::Usage => write!(f, "Usage"),
        }
    }
}

/// The quantity moved by a single entry.
///
/// An entry is either a purchase or a usage, never both.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Movement {
    Purchase { qty: u32 },
    Usage { qty: u32 },
}

impl Default for Movement {
    fn default() -> Self {
        Movement::Usage { qty: 0 }
    }
}

impl Movement {
    pub fn kind(&self) -> EntryKind {
        match self {
            Movement::Purchase { .. } => EntryKind::Purchase,
            Movement::Usage { .. } => EntryKind::Usage,
        }
    }

    pub fn qty(&self) -> u32 {
        match self {
            Movement::Purchase { qty } | Movement::Usage { qty } => *qty,
        }
    }

    pub fn purchase_qty(&self) -> u32 {
        match self {
            Movement::Purchase { qty } => *qty,
            Movement::Usage { .. } => 0,
        }
    }

    pub fn usage_qty(&self) -> u32 {
        match self {
            Movement::Usage { qty } => *qty,
            Movement::Purchase { .. } => 0,
        }
    }
}

/// Body of `POST /stock`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "StockEntryPayload")]
pub struct NewStockEntry {
    pub entry_date: NaiveDate,
    pub description_id: i64,
    pub color_id: i64,
    pub movement: Movement,
    pub reason: Option<String>,
}

/// Wire shape expected by the backend: both quantity columns, exactly one
/// of them non-zero, plus the explicit kind
#[derive(Debug, Serialize)]
struct StockEntryPayload {
    entry_date: NaiveDate,
    description_id: i64,
    color_id: i64,
    purchase_qty: u32,
    usage_qty: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    kind: EntryKind,
}

impl From<NewStockEntry> for StockEntryPayload {
    fn from(entry: NewStockEntry) -> Self {
        Self {
            entry_date: entry.entry_date,
            description_id: entry.description_id,
            color_id: entry.color_id,
            purchase_qty: entry.movement.purchase_qty(),
            usage_qty: entry.movement.usage_qty(),
            reason: entry
                .reason
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty()),
            kind: entry.movement.kind(),
        }
    }
}

/// A stock entry as stored by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockEntry {
    #[serde(default)]
    pub id: i64,
    #[serde(alias = "date")]
    pub entry_date: NaiveDate,
    pub description_id: i64,
    #[serde(default)]
    pub color_id: i64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub purchase_qty: i64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub usage_qty: i64,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<EntryKind>,
}

impl StockEntry {
    /// Quantities this entry adds to the report as `(purchase, usage)`.
    ///
    /// An explicit kind decides which column counts. Records without a kind
    /// always count their usage, and count their purchase only when the
    /// reason is exactly [`LEGACY_PURCHASE_REASON`].
    pub fn contribution(&self) -> (i64, i64) {
        match self.kind {
            Some(EntryKind::Purchase) => (self.purchase_qty, 0),
            Some(EntryKind::Usage) => (0, self.usage_qty),
            None => {
                let purchase = if self.reason.as_deref() == Some(LEGACY_PURCHASE_REASON) {
                    self.purchase_qty
                } else {
                    0
                };
                (purchase, self.usage_qty)
            }
        }
    }
}

fn zero_if_null<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(0))
}
