//! Error handling for the A4 Stock Tracker client
//!
//! Every failure ends up at the command boundary, where it is logged and a
//! single line is shown to the user. There is no retry.

use reqwest::StatusCode;
use shared::{ExportError, YearMonth, YearMonthError};
use thiserror::Error;

/// Client error types
#[derive(Error, Debug)]
pub enum AppError {
    // Transport errors
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend rejected the request ({}): {}", .status, .detail.as_deref().unwrap_or("no detail"))]
    Api {
        status: StatusCode,
        detail: Option<String>,
    },

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Description \"{0}\" already exists!")]
    DuplicateDescription(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Empty results
    #[error("No data found for {0}")]
    EmptyReport(YearMonth),

    // Local plumbing
    #[error("Invalid month: {0}")]
    InvalidMonth(#[from] YearMonthError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    /// Stable code for logs
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Transport(_) => "TRANSPORT_ERROR",
            AppError::Api { .. } => "API_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::DuplicateDescription(_) => "DUPLICATE_ENTRY",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::EmptyReport(_) => "EMPTY_REPORT",
            AppError::InvalidMonth(_) => "INVALID_MONTH",
            AppError::Export(_) => "EXPORT_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Json(_) => "JSON_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    /// The line shown to the user.
    ///
    /// A backend `detail` is surfaced verbatim; otherwise the transport or
    /// status message is used.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Api {
                detail: Some(detail),
                ..
            } => format!("Error: {}", detail),
            AppError::Api {
                status,
                detail: None,
            } => format!(
                "Error: Request failed with status code {}",
                status.as_u16()
            ),
            AppError::Transport(e) => format!("Error: {}", e),
            AppError::Validation(msg) => msg.clone(),
            AppError::EmptyReport(_) => "No data to download".to_string(),
            other => format!("Error: {}", other),
        }
    }
}

/// Result type alias for client operations
pub type AppResult<T> = Result<T, AppError>;
