//! Shared data types for imputation and projection results.

use serde::{Deserialize, Serialize};

/// An ordered sequence of (year, value) pairs sharing one period axis.
///
/// Both the cleaned historical data and the projected future data are
/// expressed as a `YearSeries` so any chart renderer can consume them
/// without knowing which is which.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSeries {
    pub years: Vec<i32>,
    pub values: Vec<f64>,
}

impl YearSeries {
    pub fn new(years: Vec<i32>, values: Vec<f64>) -> Self {
        debug_assert_eq!(years.len(), values.len());
        Self { years, values }
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Iterate over (year, value) pairs.
    pub fn points(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.years.iter().copied().zip(self.values.iter().copied())
    }

    /// The last (year, value) pair, if the series is non-empty.
    pub fn last(&self) -> Option<(i32, f64)> {
        match (self.years.last(), self.values.last()) {
            (Some(&y), Some(&v)) => Some((y, v)),
            _ => None,
        }
    }
}

/// Result of projecting one entity's consumption to a future year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projection {
    /// Label of the projected entity (first column of the dataset).
    pub entity: String,
    /// The requested future year.
    pub target_year: i32,
    /// Predicted consumption at `target_year` (last element of `projected`).
    pub predicted: f64,
    /// Fitted slope of the regression line (consumption per year).
    pub slope: f64,
    /// Fitted intercept of the regression line.
    pub intercept: f64,
    /// Cleaned historical observations used for the fit.
    pub historical: YearSeries,
    /// Extrapolated values for every year after the historical axis,
    /// up to and including `target_year`.
    pub projected: YearSeries,
}

impl Projection {
    /// Human-readable status message for display layers.
    pub fn message(&self) -> String {
        format!(
            "Predicted per-capita energy consumption for {} in {}: {:.2} kWh",
            self.entity, self.target_year, self.predicted
        )
    }
}

/// Summary of one imputation pass over a dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImputationSummary {
    /// Number of rows processed.
    pub rows: usize,
    /// Number of missing cells replaced by a row mean.
    pub cells_filled: usize,
    /// Labels of rows whose observations were all missing. These rows are
    /// left untouched (still missing) and must be handled by the caller;
    /// they are never silently filled with zero.
    pub all_missing: Vec<String>,
    /// Human-readable status message.
    pub message: String,
}

impl ImputationSummary {
    /// True when every row now has a full set of finite observations.
    pub fn is_complete(&self) -> bool {
        self.all_missing.is_empty()
    }
}
