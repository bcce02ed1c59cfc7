//! Paper colour variants attached to each stock entry

use serde::{Deserialize, Serialize};

/// Colour selected on the entry form when it exists
pub const DEFAULT_COLOR_NAME: &str = "White";

/// A colour tag; reference data only, not used in report aggregation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Color {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex_code: Option<String>,
}

/// Body of `POST /colors`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewColor {
    pub name: String,
    pub hex_code: String,
}

impl NewColor {
    pub fn new(name: impl Into<String>, hex_code: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            hex_code: hex_code.into().trim().to_uppercase(),
        }
    }
}
