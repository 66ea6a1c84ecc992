//! Configuration for dataset preparation and projection.
//!
//! Uses the builder pattern for flexible and ergonomic setup.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Tokens treated as a missing observation during coercion, in addition to
/// anything that fails numeric parsing. Matching is case-insensitive after
/// trimming. The dash is the sentinel used by the upstream energy tables.
pub const MISSING_MARKERS: [&str; 5] = ["-", "", "n/a", "na", "null"];

/// Error returned when a configuration fails validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("max_target_year {0} is before any plausible historical axis")]
    MaxTargetYearTooEarly(i32),
    #[error("missing_markers must not be empty")]
    NoMissingMarkers,
}

/// Configuration for the forecasting session.
///
/// # Example
///
/// ```rust,ignore
/// use energy_forecasting::ForecastConfig;
///
/// let config = ForecastConfig::builder()
///     .max_target_year(2060)
///     .output_dir("./outputs")
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Tokens coerced to missing in observation columns.
    /// Default: [`MISSING_MARKERS`].
    pub missing_markers: Vec<String>,

    /// Practical upper bound for the target year, enforced at the caller
    /// boundary (the core itself only requires the target to lie beyond
    /// the historical axis). Default: 2050.
    pub max_target_year: i32,

    /// Output directory for generated projection reports.
    /// Default: "outputs"
    pub output_dir: PathBuf,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            missing_markers: MISSING_MARKERS.iter().map(|s| s.to_string()).collect(),
            max_target_year: 2050,
            output_dir: PathBuf::from("outputs"),
        }
    }
}

impl ForecastConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ForecastConfigBuilder {
        ForecastConfigBuilder::default()
    }

    /// Check whether a trimmed token counts as a missing marker.
    pub fn is_missing_marker(&self, token: &str) -> bool {
        let lower = token.trim().to_ascii_lowercase();
        self.missing_markers.iter().any(|m| *m == lower)
    }
}

/// Builder for [`ForecastConfig`].
#[derive(Debug, Default)]
pub struct ForecastConfigBuilder {
    missing_markers: Option<Vec<String>>,
    max_target_year: Option<i32>,
    output_dir: Option<PathBuf>,
}

impl ForecastConfigBuilder {
    /// Replace the set of tokens treated as missing.
    pub fn missing_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.missing_markers = Some(
            markers
                .into_iter()
                .map(|s| s.into().trim().to_ascii_lowercase())
                .collect(),
        );
        self
    }

    /// Set the practical upper bound for target years.
    pub fn max_target_year(mut self, year: i32) -> Self {
        self.max_target_year = Some(year);
        self
    }

    /// Set the output directory for reports.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<ForecastConfig, ConfigValidationError> {
        let defaults = ForecastConfig::default();
        let config = ForecastConfig {
            missing_markers: self.missing_markers.unwrap_or(defaults.missing_markers),
            max_target_year: self.max_target_year.unwrap_or(defaults.max_target_year),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
        };

        if config.missing_markers.is_empty() {
            return Err(ConfigValidationError::NoMissingMarkers);
        }
        if config.max_target_year < 1900 {
            return Err(ConfigValidationError::MaxTargetYearTooEarly(
                config.max_target_year,
            ));
        }

        Ok(config)
    }
}
