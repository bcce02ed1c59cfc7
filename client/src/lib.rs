//! A4 Stock Tracker client
//!
//! Records paper stock purchases and usage against the stock backend, shows
//! the monthly day-by-day report and downloads it as CSV archive or
//! spreadsheet.

use std::sync::Arc;

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod services;

pub use crate::config::Config;
pub use crate::error::{AppError, AppResult};

/// State shared by every command handler
#[derive(Clone)]
pub struct AppState {
    pub api: api::StockApiClient,
    pub config: Arc<Config>,
}

impl AppState {
    /// Build the API client from configuration
    pub fn from_config(config: Config) -> AppResult<Self> {
        let api = api::StockApiClient::new(config.api.base_url.clone(), config.api.timeout())?;
        Ok(Self {
            api,
            config: Arc::new(config),
        })
    }
}
