//! Row-wise mean imputation.
//!
//! Each entity's missing observations are filled with the arithmetic mean
//! of that entity's non-missing observations. Rows are processed
//! independently; no information crosses rows.

use crate::dataset::EnergyDataset;
use crate::error::Result;
use crate::types::ImputationSummary;
use tracing::{info, warn};

/// Row-wise mean imputer for annual observation tables.
pub struct RowMeanImputer;

impl RowMeanImputer {
    /// Fill every missing observation in `dataset` with its row's mean.
    ///
    /// A row with zero non-missing observations has no defined mean; it is
    /// left entirely missing and reported by label in the summary rather
    /// than being filled with zero or NaN. Running the imputer again on an
    /// already-complete dataset is a no-op.
    pub fn impute(dataset: &mut EnergyDataset) -> Result<ImputationSummary> {
        let mut matrix = dataset.observation_matrix()?;
        let rows = dataset.height();
        let cols = matrix.len();

        let mut cells_filled = 0usize;
        let mut all_missing = Vec::new();

        for row in 0..rows {
            match row_mean(&matrix, row) {
                Some(mean) => {
                    for col_values in matrix.iter_mut() {
                        if col_values[row].is_none() {
                            col_values[row] = Some(mean);
                            cells_filled += 1;
                        }
                    }
                }
                None => {
                    let label = dataset.label(row)?.to_string();
                    warn!("Row '{}' has no observations; left missing", label);
                    all_missing.push(label);
                }
            }
        }

        dataset.replace_observations(matrix)?;

        let message = if all_missing.is_empty() {
            format!(
                "Missing values imputed: filled {} of {} cells",
                cells_filled,
                rows * cols
            )
        } else {
            format!(
                "Missing values imputed: filled {} of {} cells; {} row(s) had no data at all",
                cells_filled,
                rows * cols,
                all_missing.len()
            )
        };
        info!("{}", message);

        Ok(ImputationSummary {
            rows,
            cells_filled,
            all_missing,
            message,
        })
    }
}

/// Mean of one row's non-missing observations over a column-major matrix.
/// `None` when the row has no observations at all.
fn row_mean(matrix: &[Vec<Option<f64>>], row: usize) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for col_values in matrix {
        if let Some(v) = col_values[row] {
            sum += v;
            count += 1;
        }
    }
    if count == 0 { None } else { Some(sum / count as f64) }
}
