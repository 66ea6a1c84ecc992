//! Session state for the prepare/predict workflow.
//!
//! The imputed table lives in an explicit handle the caller owns, not in
//! ambient process-wide state: `prepare` installs a validated, imputed
//! dataset wholesale; `predict` and `entities` read it. The dataset sits
//! behind a `parking_lot::RwLock` so one session can be shared across
//! threads (e.g. request handlers) without a global.

use crate::config::ForecastConfig;
use crate::dataset::EnergyDataset;
use crate::error::{ForecastError, Result};
use crate::imputer::RowMeanImputer;
use crate::projector::LinearProjector;
use crate::types::{ImputationSummary, Projection};
use parking_lot::RwLock;
use polars::prelude::DataFrame;
use tracing::info;

/// A forecasting session holding at most one prepared dataset.
pub struct ForecastSession {
    config: ForecastConfig,
    dataset: RwLock<Option<EnergyDataset>>,
}

// Sessions are shared across request-handling threads.
static_assertions::assert_impl_all!(ForecastSession: Send, Sync);

impl ForecastSession {
    /// Create an empty session.
    pub fn new(config: ForecastConfig) -> Self {
        Self {
            config,
            dataset: RwLock::new(None),
        }
    }

    /// The session's configuration.
    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Whether a dataset has been prepared.
    pub fn is_ready(&self) -> bool {
        self.dataset.read().is_some()
    }

    /// Validate, impute, and install a dataset, replacing any previous one.
    ///
    /// Returns the imputation summary, including the labels of rows that
    /// could not be repaired because every observation was missing.
    pub fn prepare(&self, df: DataFrame) -> Result<ImputationSummary> {
        let mut dataset = EnergyDataset::from_dataframe(df, &self.config)?;
        let summary = RowMeanImputer::impute(&mut dataset)?;
        info!(
            "Session prepared: {} entities, axis {}..={}",
            dataset.height(),
            dataset.years()[0],
            dataset.last_year()
        );
        *self.dataset.write() = Some(dataset);
        Ok(summary)
    }

    /// `(index, label)` pairs for every entity, 0-based, in row order.
    pub fn entities(&self) -> Result<Vec<(usize, String)>> {
        let guard = self.dataset.read();
        let dataset = guard.as_ref().ok_or(ForecastError::NoDataLoaded)?;
        Ok(dataset
            .labels()
            .iter()
            .enumerate()
            .map(|(i, label)| (i, label.clone()))
            .collect())
    }

    /// Resolve an entity label to its 0-based row index (exact match first,
    /// then case-insensitive).
    pub fn find_entity(&self, name: &str) -> Result<Option<usize>> {
        let guard = self.dataset.read();
        let dataset = guard.as_ref().ok_or(ForecastError::NoDataLoaded)?;
        let labels = dataset.labels();
        if let Some(i) = labels.iter().position(|l| l == name) {
            return Ok(Some(i));
        }
        Ok(labels
            .iter()
            .position(|l| l.eq_ignore_ascii_case(name.trim())))
    }

    /// Project one entity's consumption to `target_year`.
    ///
    /// `row_index` is 0-based; callers presenting 1-based indices must
    /// normalize before calling (once, at their boundary).
    pub fn predict(&self, row_index: usize, target_year: i32) -> Result<Projection> {
        let guard = self.dataset.read();
        let dataset = guard.as_ref().ok_or(ForecastError::NoDataLoaded)?;
        LinearProjector::project(dataset, row_index, target_year)
    }

    /// The last historical year of the prepared dataset.
    pub fn last_year(&self) -> Result<i32> {
        let guard = self.dataset.read();
        let dataset = guard.as_ref().ok_or(ForecastError::NoDataLoaded)?;
        Ok(dataset.last_year())
    }
}
