//! Stock item descriptions (paper grades and other tracked items)

use serde::{Deserialize, Serialize};

/// A distinct trackable stock-item type with its opening balance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Description {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub opening_stock: i64,
    /// Inactive descriptions are hidden from new entries but stay in reports
    #[serde(default = "default_active")]
    pub active: bool,
}

/// Body of `POST /descriptions`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewDescription {
    pub name: String,
    pub opening_stock: i64,
    pub active: bool,
}

impl NewDescription {
    pub fn new(name: impl Into<String>, opening_stock: i64) -> Self {
        Self {
            name: name.into().trim().to_string(),
            opening_stock,
            active: true,
        }
    }
}

fn default_active() -> bool {
    true
}

impl Description {
    /// Case-insensitive substring match used by every search box
    pub fn matches(&self, term: &str) -> bool {
        name_matches(&self.name, term)
    }

    /// Case-insensitive equality used for the duplicate check
    pub fn same_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }
}

/// Case-insensitive substring match; an empty or blank term matches everything
pub fn name_matches(name: &str, term: &str) -> bool {
    let term = term.trim();
    term.is_empty() || name.to_lowercase().contains(&term.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ream() -> Description {
        Description {
            id: 1,
            name: "A4 White Ream".to_string(),
            opening_stock: 100,
            active: true,
        }
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let d = ream();
        assert!(d.matches("white"));
        assert!(d.matches("A4 WHITE"));
        assert!(d.matches(""));
        assert!(d.matches("   "));
        assert!(!d.matches("pink"));
    }

    #[test]
    fn test_same_name() {
        let d = ream();
        assert!(d.same_name("a4 white ream"));
        assert!(d.same_name("  A4 White Ream "));
        assert!(!d.same_name("A4 White"));
    }

    #[test]
    fn test_defaults_when_fields_missing() {
        let d: Description = serde_json::from_str(r#"{"id": 3, "name": "Packing"}"#).unwrap();
        assert_eq!(d.opening_stock, 0);
        assert!(d.active);
    }

    #[test]
    fn test_new_description_trims_name() {
        let nd = NewDescription::new("  Glossy A4  ", 20);
        assert_eq!(nd.name, "Glossy A4");
        assert!(nd.active);
    }
}
