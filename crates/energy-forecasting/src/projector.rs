//! Linear projection of an entity's consumption into future years.
//!
//! Fits a single ordinary-least-squares line through one row's clean
//! (year, value) pairs using the centered closed form, then evaluates it
//! over every year after the historical axis up to the target. The fit is
//! deterministic; identical inputs always produce identical projections.
//! The straight-line model is a deliberate, fixed choice.

use crate::dataset::EnergyDataset;
use crate::error::{ForecastError, Result};
use crate::types::{Projection, YearSeries};
use tracing::debug;

/// Coefficients of a fitted regression line `value = slope * year + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Fit a line through the given points by least squares.
    ///
    /// Returns `None` when the fit is underdetermined: fewer than two
    /// points, or no spread on the year axis.
    pub fn fit(points: &[(i32, f64)]) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let n = points.len() as f64;
        let mean_x = points.iter().map(|&(x, _)| x as f64).sum::<f64>() / n;
        let mean_y = points.iter().map(|&(_, y)| y).sum::<f64>() / n;

        let mut sxy = 0.0;
        let mut sxx = 0.0;
        for &(x, y) in points {
            let dx = x as f64 - mean_x;
            sxy += dx * (y - mean_y);
            sxx += dx * dx;
        }
        if sxx == 0.0 {
            return None;
        }

        let slope = sxy / sxx;
        let intercept = mean_y - slope * mean_x;
        Some(Self { slope, intercept })
    }

    /// Evaluate the fitted line at a year.
    pub fn value_at(&self, year: i32) -> f64 {
        self.slope * year as f64 + self.intercept
    }
}

/// Projects one dataset row to a future year.
pub struct LinearProjector;

impl LinearProjector {
    /// Project `row_index`'s consumption to `target_year`.
    ///
    /// The row is cleaned to finite (year, value) pairs first; residual
    /// missing values are dropped even after imputation. The returned
    /// [`Projection`] carries the cleaned historical series and the
    /// extrapolated series over `(last historical year, target_year]`.
    ///
    /// # Errors
    ///
    /// - [`ForecastError::RowOutOfRange`] for a bad row selector.
    /// - [`ForecastError::InvalidTargetYear`] when `target_year` does not
    ///   lie beyond the historical axis.
    /// - [`ForecastError::AllValuesMissing`] when the row has no usable
    ///   observations at all.
    /// - [`ForecastError::InsufficientData`] with fewer than two usable
    ///   points.
    pub fn project(
        dataset: &EnergyDataset,
        row_index: usize,
        target_year: i32,
    ) -> Result<Projection> {
        let entity = dataset.label(row_index)?.to_string();

        let last_year = dataset.last_year();
        if target_year <= last_year {
            return Err(ForecastError::InvalidTargetYear {
                target: target_year,
                last_year,
            });
        }

        let historical = clean_points(dataset, row_index)?;
        match historical.len() {
            0 => return Err(ForecastError::AllValuesMissing(entity)),
            1 => {
                return Err(ForecastError::InsufficientData {
                    entity,
                    points: 1,
                });
            }
            _ => {}
        }

        // Two or more points on a strictly increasing axis always admit a fit.
        let fit = LinearFit::fit(&historical).ok_or(ForecastError::InsufficientData {
            entity: entity.clone(),
            points: historical.len(),
        })?;
        debug!(
            "Fitted '{}': slope {:.4}, intercept {:.4}",
            entity, fit.slope, fit.intercept
        );

        let future_years: Vec<i32> = (last_year + 1..=target_year).collect();
        let future_values: Vec<f64> = future_years.iter().map(|&y| fit.value_at(y)).collect();
        // Last element of the projected series by construction.
        let predicted = fit.value_at(target_year);

        let (hist_years, hist_values): (Vec<i32>, Vec<f64>) = historical.into_iter().unzip();

        Ok(Projection {
            entity,
            target_year,
            predicted,
            slope: fit.slope,
            intercept: fit.intercept,
            historical: YearSeries::new(hist_years, hist_values),
            projected: YearSeries::new(future_years, future_values),
        })
    }
}

/// One row's finite (year, value) pairs, in axis order.
fn clean_points(dataset: &EnergyDataset, row_index: usize) -> Result<Vec<(i32, f64)>> {
    let values = dataset.row_values(row_index)?;
    Ok(dataset
        .years()
        .iter()
        .copied()
        .zip(values)
        .filter_map(|(year, value)| match value {
            Some(v) if v.is_finite() => Some((year, v)),
            _ => None,
        })
        .collect())
}
