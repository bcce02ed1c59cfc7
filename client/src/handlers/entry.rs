//! Handlers for recording stock entries

use chrono::NaiveDate;

use crate::cli::EntryArgs;
use crate::error::{AppError, AppResult};
use crate::services::{EntryRecorder, ReferenceData};
use crate::AppState;

/// `entry --description D [--color C] [--date YYYY-MM-DD] (--usage N | --purchase N) [--reason R]`
pub async fn record_entry(state: &AppState, args: EntryArgs) -> AppResult<()> {
    let mut recorder = recorder(state).await?;

    let description_id = find_description(&recorder, &args.description)?;
    recorder.select_description(description_id)?;
    select_color(&mut recorder, args.color.as_deref())?;

    if let Some(date) = args.date {
        recorder.set_date(date);
    }
    if let Some(qty) = args.usage {
        recorder.set_usage(qty);
    }
    if let Some(qty) = args.purchase {
        recorder.set_purchase(qty)?;
    }
    if let Some(reason) = args.reason {
        recorder.set_reason(reason);
    }

    let saved = recorder.submit(&state.api).await?;
    println!("Entry saved successfully! ID: {}", saved.id);
    Ok(())
}

/// `quick-purchase <DESCRIPTION> <QTY> [--color C] [--date YYYY-MM-DD]`
pub async fn quick_purchase(
    state: &AppState,
    description: &str,
    qty: u32,
    color: Option<&str>,
    date: Option<NaiveDate>,
) -> AppResult<()> {
    let mut recorder = recorder(state).await?;

    let description_id = recorder
        .reference()
        .description_by_name(description)
        .map(|d| d.id)
        .ok_or_else(|| AppError::validation("Please select a description"))?;
    recorder.quick_purchase(description_id, qty)?;
    select_color(&mut recorder, color)?;
    if let Some(date) = date {
        recorder.set_date(date);
    }

    let saved = recorder.submit(&state.api).await?;
    println!(
        "Purchase: {} - Qty: {} (entry {})",
        description.trim(),
        qty,
        saved.id
    );
    Ok(())
}

async fn recorder(state: &AppState) -> AppResult<EntryRecorder> {
    let reference = ReferenceData::load(&state.api).await?;
    Ok(EntryRecorder::new(
        reference,
        &state.config.entry.default_color,
    ))
}

fn find_description(recorder: &EntryRecorder, name: &str) -> AppResult<i64> {
    recorder
        .reference()
        .description_by_name(name)
        .map(|d| d.id)
        .ok_or_else(|| AppError::NotFound(format!("Description \"{}\"", name.trim())))
}

/// Select a colour by name; without one the default colour stays selected
fn select_color(recorder: &mut EntryRecorder, name: Option<&str>) -> AppResult<()> {
    let Some(name) = name else {
        return Ok(());
    };
    let id = recorder
        .reference()
        .color_by_name(name)
        .map(|c| c.id)
        .ok_or_else(|| AppError::NotFound(format!("Color \"{}\"", name.trim())))?;
    recorder.select_color(id)
}
