//! Custom error types for the forecasting core.
//!
//! This module provides the error hierarchy used throughout the crate,
//! built with `thiserror`. Errors are serializable as `{code, message}`
//! pairs so a frontend collaborator (CLI, HTTP layer) can map them to
//! user-facing messages without string matching.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for dataset preparation and projection.
#[derive(Error, Debug)]
pub enum ForecastError {
    /// The prepared table contains no data rows.
    #[error("Dataset contains no data rows")]
    EmptyDataset,

    /// An observation column header is not a year, or the year axis is
    /// not strictly increasing.
    #[error("Invalid period axis: {0}")]
    InvalidPeriodAxis(String),

    /// Every observation in the selected row is missing; there is nothing
    /// to fit a trend against.
    #[error("All observations for '{0}' are missing")]
    AllValuesMissing(String),

    /// Fewer than two clean historical points; the regression is
    /// underdetermined.
    #[error("Insufficient data for '{entity}': {points} usable point(s), need at least 2")]
    InsufficientData { entity: String, points: usize },

    /// The requested target year does not lie beyond the historical axis.
    #[error("Target year {target} must be greater than the last historical year {last_year}")]
    InvalidTargetYear { target: i32, last_year: i32 },

    /// Row selector outside the dataset's row range.
    #[error("Row index {index} out of range for dataset with {rows} row(s)")]
    RowOutOfRange { index: usize, rows: usize },

    /// Predict was called before a dataset was prepared.
    #[error("No dataset loaded")]
    NoDataLoaded,

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ForecastError>,
    },
}

impl ForecastError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ForecastError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyDataset => "EMPTY_DATASET",
            Self::InvalidPeriodAxis(_) => "INVALID_PERIOD_AXIS",
            Self::AllValuesMissing(_) => "ALL_VALUES_MISSING",
            Self::InsufficientData { .. } => "INSUFFICIENT_DATA",
            Self::InvalidTargetYear { .. } => "INVALID_TARGET_YEAR",
            Self::RowOutOfRange { .. } => "ROW_OUT_OF_RANGE",
            Self::NoDataLoaded => "NO_DATA_LOADED",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error is recoverable by the caller choosing different
    /// inputs (as opposed to a malformed dataset or an IO failure).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NoDataLoaded
                | Self::InvalidTargetYear { .. }
                | Self::RowOutOfRange { .. }
                | Self::InsufficientData { .. }
                | Self::AllValuesMissing(_)
        )
    }
}

/// Serialize implementation for IPC/JSON compatibility.
///
/// Errors are serialized as a struct with `code` and `message` fields,
/// making them easy to handle in a frontend.
impl Serialize for ForecastError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ForecastError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for forecasting operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ForecastError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(ForecastError::NoDataLoaded.error_code(), "NO_DATA_LOADED");
        assert_eq!(
            ForecastError::InsufficientData {
                entity: "Spain".to_string(),
                points: 1,
            }
            .error_code(),
            "INSUFFICIENT_DATA"
        );
    }

    #[test]
    fn test_is_recoverable() {
        assert!(ForecastError::NoDataLoaded.is_recoverable());
        assert!(
            ForecastError::InvalidTargetYear {
                target: 2000,
                last_year: 2023,
            }
            .is_recoverable()
        );
        assert!(!ForecastError::EmptyDataset.is_recoverable());
    }

    #[test]
    fn test_error_serialization() {
        let error = ForecastError::RowOutOfRange { index: 7, rows: 3 };
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("ROW_OUT_OF_RANGE"));
        assert!(json.contains("7"));
    }

    #[test]
    fn test_with_context() {
        let error = ForecastError::AllValuesMissing("Andorra".to_string())
            .with_context("During projection");
        assert!(error.to_string().contains("During projection"));
        assert_eq!(error.error_code(), "ALL_VALUES_MISSING"); // Preserves original code
    }
}
