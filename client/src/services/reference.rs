//! Reference data cache for descriptions and colours
//!
//! Fetched once per session; there is no invalidation beyond reloading.

use shared::{Color, Description};

use crate::api::StockApiClient;
use crate::error::AppResult;

/// Session copy of the backend's descriptions and colours
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    descriptions: Vec<Description>,
    colors: Vec<Color>,
}

impl ReferenceData {
    pub fn new(descriptions: Vec<Description>, colors: Vec<Color>) -> Self {
        Self {
            descriptions,
            colors,
        }
    }

    /// Fetch both lists concurrently
    pub async fn load(api: &StockApiClient) -> AppResult<Self> {
        let (descriptions, colors) =
            tokio::try_join!(api.list_descriptions(), api.list_colors())?;

        tracing::info!(
            descriptions = descriptions.len(),
            colors = colors.len(),
            "Reference data loaded"
        );

        Ok(Self::new(descriptions, colors))
    }

    pub fn descriptions(&self) -> &[Description] {
        &self.descriptions
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Descriptions offered for new entries
    pub fn active_descriptions(&self) -> impl Iterator<Item = &Description> {
        self.descriptions.iter().filter(|d| d.active)
    }

    pub fn description(&self, id: i64) -> Option<&Description> {
        self.descriptions.iter().find(|d| d.id == id)
    }

    pub fn description_by_name(&self, name: &str) -> Option<&Description> {
        self.descriptions.iter().find(|d| d.same_name(name))
    }

    pub fn color(&self, id: i64) -> Option<&Color> {
        self.colors.iter().find(|c| c.id == id)
    }

    pub fn color_by_name(&self, name: &str) -> Option<&Color> {
        let name = name.trim().to_lowercase();
        self.colors.iter().find(|c| c.name.to_lowercase() == name)
    }

    /// Colour preselected on a fresh entry, if it exists
    pub fn default_color(&self, name: &str) -> Option<&Color> {
        self.colors.iter().find(|c| c.name == name)
    }

    /// Descriptions whose name contains `term`, case-insensitively
    pub fn search<'a>(&'a self, term: &'a str) -> impl Iterator<Item = &'a Description> + 'a {
        self.descriptions.iter().filter(move |d| d.matches(term))
    }

    /// Append a freshly created description
    pub fn push_description(&mut self, description: Description) {
        self.descriptions.push(description);
    }
}
