//! Validation utilities for the A4 Stock Tracker
//!
//! These mirror the checks the entry form performs before anything is sent to
//! the backend. The backend remains the authority on everything else.

use crate::models::{Description, Movement};

// ============================================================================
// Description Validations
// ============================================================================

/// Maximum description name length accepted by the backend
pub const MAX_DESCRIPTION_NAME_LEN: usize = 255;

/// Maximum colour name length accepted by the backend
pub const MAX_COLOR_NAME_LEN: usize = 50;

/// Validate a new description name (non-blank, at most 255 characters)
pub fn validate_description_name(name: &str) -> Result<(), &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Please enter description name");
    }
    if name.chars().count() > MAX_DESCRIPTION_NAME_LEN {
        return Err("Description name must be at most 255 characters");
    }
    Ok(())
}

/// Find an existing description with the same name, ignoring case
pub fn find_duplicate_description<'a>(
    existing: &'a [Description],
    name: &str,
) -> Option<&'a Description> {
    existing.iter().find(|d| d.same_name(name))
}

/// Opening stock cannot be negative
pub fn validate_opening_stock(opening_stock: i64) -> Result<(), &'static str> {
    if opening_stock < 0 {
        return Err("Opening stock cannot be negative");
    }
    Ok(())
}

// ============================================================================
// Colour Validations
// ============================================================================

/// Validate a colour name (non-blank, at most 50 characters)
pub fn validate_color_name(name: &str) -> Result<(), &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Please enter color name");
    }
    if name.chars().count() > MAX_COLOR_NAME_LEN {
        return Err("Color name must be at most 50 characters");
    }
    Ok(())
}

/// Validate a `#RRGGBB` hex colour code
pub fn validate_hex_code(hex: &str) -> Result<(), &'static str> {
    let hex = hex.trim();
    let digits = hex.strip_prefix('#').ok_or("Hex code must start with #")?;
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err("Hex code must be in #RRGGBB format");
    }
    Ok(())
}

// ============================================================================
// Entry Validations
// ============================================================================

/// A purchase recorded through the quick-purchase flow must be positive
pub fn validate_purchase_qty(qty: u32) -> Result<(), &'static str> {
    if qty == 0 {
        return Err("Please enter a valid quantity");
    }
    Ok(())
}

/// Entries need both a description and a colour
pub fn validate_entry_selection(
    description_id: Option<i64>,
    color_id: Option<i64>,
) -> Result<(), &'static str> {
    if description_id.is_none() || color_id.is_none() {
        return Err("Please select Description and Color");
    }
    Ok(())
}

/// Check if a movement carries any quantity at all
pub fn is_empty_movement(movement: &Movement) -> bool {
    movement.qty() == 0
}
