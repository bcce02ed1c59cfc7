//! Entry recorder: the draft stock entry and its Quick Purchase and
//! New Description sub-flows

use chrono::{Local, NaiveDate};
use shared::{
    find_duplicate_description, is_empty_movement, validate_description_name,
    validate_entry_selection, validate_opening_stock, validate_purchase_qty, Description,
    Movement, NewDescription, NewStockEntry, StockEntry,
};

use crate::api::StockApiClient;
use crate::error::{AppError, AppResult};
use crate::services::reference::ReferenceData;

/// The entry currently being filled in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    pub entry_date: NaiveDate,
    pub description_id: Option<i64>,
    pub color_id: Option<i64>,
    pub movement: Movement,
    pub reason: String,
}

/// Drafts and submits stock entries against a session's reference data
pub struct EntryRecorder {
    reference: ReferenceData,
    default_color: String,
    draft: EntryDraft,
}

impl EntryRecorder {
    pub fn new(reference: ReferenceData, default_color: impl Into<String>) -> Self {
        let default_color = default_color.into();
        let draft = fresh_draft(&reference, &default_color);
        Self {
            reference,
            default_color,
            draft,
        }
    }

    pub fn draft(&self) -> &EntryDraft {
        &self.draft
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Today's date, no description, default colour when it exists
    pub fn reset(&mut self) {
        self.draft = fresh_draft(&self.reference, &self.default_color);
    }

    pub fn select_description(&mut self, id: i64) -> AppResult<()> {
        let description = self
            .reference
            .description(id)
            .ok_or_else(|| AppError::NotFound(format!("Description {}", id)))?;
        if !description.active {
            return Err(AppError::validation(format!(
                "Description \"{}\" is inactive",
                description.name
            )));
        }
        self.draft.description_id = Some(id);
        Ok(())
    }

    pub fn select_color(&mut self, id: i64) -> AppResult<()> {
        if self.reference.color(id).is_none() {
            return Err(AppError::NotFound(format!("Color {}", id)));
        }
        self.draft.color_id = Some(id);
        Ok(())
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.draft.entry_date = date;
    }

    pub fn set_reason(&mut self, reason: impl Into<String>) {
        self.draft.reason = reason.into();
    }

    /// Record a usage quantity. A non-zero usage replaces any drafted purchase.
    pub fn set_usage(&mut self, qty: u32) {
        match self.draft.movement {
            Movement::Purchase { .. } if qty == 0 => {}
            _ => self.draft.movement = Movement::Usage { qty },
        }
    }

    /// Record a purchase quantity; refused while a usage is drafted
    pub fn set_purchase(&mut self, qty: u32) -> AppResult<()> {
        if self.draft.movement.usage_qty() > 0 {
            return Err(AppError::validation(
                "Purchase quantity is disabled while a usage quantity is entered",
            ));
        }
        self.draft.movement = Movement::Purchase { qty };
        Ok(())
    }

    /// Quick Purchase: pick a description and a positive purchase in one step.
    ///
    /// Any drafted usage is replaced; the entry stays a single purchase.
    pub fn quick_purchase(&mut self, description_id: i64, qty: u32) -> AppResult<()> {
        let description = self
            .reference
            .description(description_id)
            .ok_or_else(|| AppError::validation("Please select a description"))?;
        if !description.active {
            return Err(AppError::validation(format!(
                "Description \"{}\" is inactive",
                description.name
            )));
        }
        let name = description.name.clone();
        validate_purchase_qty(qty).map_err(AppError::validation)?;

        let drafted_usage = self.draft.movement.usage_qty();
        if drafted_usage > 0 {
            tracing::warn!(
                usage = drafted_usage,
                purchase = qty,
                "Quick purchase replaces the drafted usage"
            );
        }

        self.draft.description_id = Some(description_id);
        self.draft.movement = Movement::Purchase { qty };
        tracing::info!("Purchase: {} - Qty: {}", name, qty);
        Ok(())
    }

    /// New Description: create it on the backend unless the name is already
    /// taken, then add it to the cache and select it
    pub async fn create_description(
        &mut self,
        api: &StockApiClient,
        name: &str,
        opening_stock: i64,
    ) -> AppResult<Description> {
        validate_description_name(name).map_err(AppError::validation)?;
        validate_opening_stock(opening_stock).map_err(AppError::validation)?;

        if let Some(duplicate) = find_duplicate_description(self.reference.descriptions(), name)
        {
            return Err(AppError::DuplicateDescription(duplicate.name.clone()));
        }

        let created = api
            .create_description(&NewDescription::new(name, opening_stock))
            .await?;
        tracing::info!(id = created.id, "Description \"{}\" added", created.name);

        self.reference.push_description(created.clone());
        self.draft.description_id = Some(created.id);
        Ok(created)
    }

    /// Send the draft to the backend and reset on success.
    ///
    /// Nothing is sent unless both a description and a colour are selected.
    pub async fn submit(&mut self, api: &StockApiClient) -> AppResult<StockEntry> {
        validate_entry_selection(self.draft.description_id, self.draft.color_id)
            .map_err(AppError::validation)?;
        let (Some(description_id), Some(color_id)) =
            (self.draft.description_id, self.draft.color_id)
        else {
            return Err(AppError::validation("Please select Description and Color"));
        };

        if is_empty_movement(&self.draft.movement) {
            tracing::warn!("Submitting an entry with no quantity");
        }

        let entry = NewStockEntry {
            entry_date: self.draft.entry_date,
            description_id,
            color_id,
            movement: self.draft.movement,
            reason: Some(self.draft.reason.clone()),
        };

        let saved = api.create_stock_entry(&entry).await?;
        tracing::info!(id = saved.id, "Entry saved");

        self.reset();
        Ok(saved)
    }
}

fn fresh_draft(reference: &ReferenceData, default_color: &str) -> EntryDraft {
    EntryDraft {
        entry_date: Local::now().date_naive(),
        description_id: None,
        color_id: reference.default_color(default_color).map(|c| c.id),
        movement: Movement::default(),
        reason: String::new(),
    }
}
