//! Handlers for descriptions and colours

use shared::{validate_color_name, validate_hex_code, NewColor};

use crate::error::{AppError, AppResult};
use crate::services::{EntryRecorder, ReferenceData};
use crate::AppState;

/// `descriptions [--search T]`
pub async fn list_descriptions(state: &AppState, search: Option<&str>) -> AppResult<()> {
    let descriptions = state.api.list_descriptions().await?;
    let term = search.unwrap_or("");

    let mut shown = 0;
    for d in descriptions.iter().filter(|d| d.matches(term)) {
        let status = if d.active { "" } else { " (inactive)" };
        println!(
            "{:>4}  {}  [opening: {}]{}",
            d.id, d.name, d.opening_stock, status
        );
        shown += 1;
    }

    if shown == 0 {
        println!("No descriptions found");
    }
    Ok(())
}

/// `add-description <NAME> [--opening-stock N]`
pub async fn add_description(state: &AppState, name: &str, opening_stock: i64) -> AppResult<()> {
    let reference = ReferenceData::load(&state.api).await?;
    let mut recorder = EntryRecorder::new(reference, &state.config.entry.default_color);

    let created = recorder
        .create_description(&state.api, name, opening_stock)
        .await?;
    println!("Description \"{}\" added successfully!", created.name);
    Ok(())
}

/// `colors`
pub async fn list_colors(state: &AppState) -> AppResult<()> {
    let colors = state.api.list_colors().await?;
    if colors.is_empty() {
        println!("No colors found");
    }
    for c in &colors {
        println!(
            "{:>4}  {}  {}",
            c.id,
            c.name,
            c.hex_code.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

/// `add-color <NAME> <HEX>`
pub async fn add_color(state: &AppState, name: &str, hex: &str) -> AppResult<()> {
    validate_color_name(name).map_err(AppError::validation)?;
    validate_hex_code(hex).map_err(AppError::validation)?;

    let created = state.api.create_color(&NewColor::new(name, hex)).await?;
    tracing::info!(id = created.id, "Color \"{}\" added", created.name);
    println!("Color \"{}\" added successfully!", created.name);
    Ok(())
}
