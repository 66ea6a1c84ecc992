//! Dataset layer: wraps a polars `DataFrame` of per-entity annual
//! observations and normalizes it for the imputer and projector.
//!
//! Expected table shape: first column = entity label (e.g. country name),
//! every remaining column header = a year. During construction each
//! observation column is coerced to `Float64`; the missing sentinel and any
//! token that fails numeric parsing become polars nulls. Nulls are the one
//! and only representation of "missing" inside the core; NaN never stands
//! in for a missing value.

use crate::config::ForecastConfig;
use crate::error::{ForecastError, Result};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Read a delimited table from disk with headers.
///
/// Kept deliberately thin: all shape validation and coercion happens in
/// [`EnergyDataset::from_dataframe`].
pub fn read_table(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    info!("Loaded table {:?} with shape {:?}", path, df.shape());
    Ok(df)
}

/// A validated dataset of per-entity annual observations.
///
/// Invariants held after construction:
/// - at least one data row and one observation column,
/// - the year axis is strictly increasing,
/// - every observation column is `Float64` with nulls for missing values.
#[derive(Debug, Clone)]
pub struct EnergyDataset {
    df: DataFrame,
    labels: Vec<String>,
    years: Vec<i32>,
}

impl EnergyDataset {
    /// Validate and coerce an already-parsed table.
    pub fn from_dataframe(df: DataFrame, config: &ForecastConfig) -> Result<Self> {
        if df.height() == 0 {
            return Err(ForecastError::EmptyDataset);
        }
        if df.width() < 2 {
            return Err(ForecastError::InvalidPeriodAxis(
                "table has no observation columns after the label column".to_string(),
            ));
        }

        let years = parse_year_axis(&df)?;
        let labels = extract_labels(&df)?;

        let mut df = df;
        let year_names: Vec<String> = df
            .get_column_names()
            .iter()
            .skip(1)
            .map(|n| n.to_string())
            .collect();
        for name in &year_names {
            let coerced = coerce_observations(df.column(name)?.as_materialized_series(), config)?;
            df.replace(name, coerced)?;
        }

        debug!(
            "Dataset validated: {} entities, years {}..={}",
            labels.len(),
            years[0],
            years[years.len() - 1]
        );

        Ok(Self { df, labels, years })
    }

    /// Number of entity rows.
    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// The shared, strictly increasing year axis.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// The last historical year on the axis.
    pub fn last_year(&self) -> i32 {
        *self.years.last().expect("axis is non-empty by invariant")
    }

    /// All entity labels, in row order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Label for one row, rejecting out-of-range indices.
    pub fn label(&self, row_index: usize) -> Result<&str> {
        self.labels
            .get(row_index)
            .map(String::as_str)
            .ok_or(ForecastError::RowOutOfRange {
                index: row_index,
                rows: self.height(),
            })
    }

    /// One row's observations aligned to [`Self::years`], with `None` for
    /// missing values.
    pub fn row_values(&self, row_index: usize) -> Result<Vec<Option<f64>>> {
        if row_index >= self.height() {
            return Err(ForecastError::RowOutOfRange {
                index: row_index,
                rows: self.height(),
            });
        }
        let mut values = Vec::with_capacity(self.years.len());
        for column in self.df.get_columns().iter().skip(1) {
            let ca = column.as_materialized_series().f64()?;
            values.push(ca.get(row_index));
        }
        Ok(values)
    }

    /// All observation columns, column-major, for whole-table passes.
    pub(crate) fn observation_matrix(&self) -> Result<Vec<Vec<Option<f64>>>> {
        let mut matrix = Vec::with_capacity(self.years.len());
        for column in self.df.get_columns().iter().skip(1) {
            let ca = column.as_materialized_series().f64()?;
            matrix.push(ca.into_iter().collect());
        }
        Ok(matrix)
    }

    /// Replace the observation columns wholesale, preserving shape and
    /// column names. Used by the imputer after a fill pass.
    pub(crate) fn replace_observations(&mut self, matrix: Vec<Vec<Option<f64>>>) -> Result<()> {
        debug_assert_eq!(matrix.len(), self.years.len());
        let year_names: Vec<String> = self
            .df
            .get_column_names()
            .iter()
            .skip(1)
            .map(|n| n.to_string())
            .collect();
        for (name, values) in year_names.iter().zip(matrix) {
            debug_assert_eq!(values.len(), self.height());
            let series = Series::new(name.as_str().into(), values);
            self.df.replace(name, series)?;
        }
        Ok(())
    }

    /// Borrow the underlying DataFrame (e.g. for display).
    pub fn as_dataframe(&self) -> &DataFrame {
        &self.df
    }
}

/// Check if a DataType is numeric (integer or float).
#[inline]
fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Parse the observation column headers into a strictly increasing year axis.
fn parse_year_axis(df: &DataFrame) -> Result<Vec<i32>> {
    let mut years = Vec::with_capacity(df.width() - 1);
    for name in df.get_column_names().iter().skip(1) {
        let year: i32 = name.trim().parse().map_err(|_| {
            ForecastError::InvalidPeriodAxis(format!("column header '{}' is not a year", name))
        })?;
        years.push(year);
    }
    if !years.windows(2).all(|w| w[0] < w[1]) {
        return Err(ForecastError::InvalidPeriodAxis(
            "year columns are not strictly increasing".to_string(),
        ));
    }
    Ok(years)
}

/// Materialize the label column as strings.
fn extract_labels(df: &DataFrame) -> Result<Vec<String>> {
    let first = df.get_columns()[0].as_materialized_series();
    let as_str = first.cast(&DataType::String)?;
    let ca = as_str.str()?;
    Ok(ca
        .into_iter()
        .enumerate()
        .map(|(i, v)| v.map(str::to_string).unwrap_or_else(|| format!("row {}", i)))
        .collect())
}

/// Coerce one observation column to `Float64`, mapping the missing sentinel
/// and unparseable tokens to null. Malformed values degrade to missing
/// rather than raising.
fn coerce_observations(series: &Series, config: &ForecastConfig) -> Result<Series> {
    let name = series.name().clone();
    match series.dtype() {
        dtype if is_numeric_dtype(dtype) => Ok(series.cast(&DataType::Float64)?),
        DataType::String => {
            let ca = series.str()?;
            let parsed: Vec<Option<f64>> = ca
                .into_iter()
                .map(|opt| opt.and_then(|token| parse_observation(token, config)))
                .collect();
            Ok(Series::new(name, parsed))
        }
        _ => {
            // Anything else (booleans, dates) has no numeric meaning here.
            let nulls: Vec<Option<f64>> = vec![None; series.len()];
            Ok(Series::new(name, nulls))
        }
    }
}

/// Parse a single observation token, treating configured markers and parse
/// failures as missing. Thousands separators and stray spaces are stripped.
fn parse_observation(token: &str, config: &ForecastConfig) -> Option<f64> {
    if config.is_missing_marker(token) {
        return None;
    }
    let cleaned: String = token.trim().chars().filter(|c| *c != ',' && *c != ' ').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ForecastConfig {
        ForecastConfig::default()
    }

    #[test]
    fn test_from_dataframe_numeric_columns() {
        let df = df![
            "country" => ["Spain", "France"],
            "1965" => [100.0, 200.0],
            "1966" => [110.0, 210.0],
        ]
        .unwrap();

        let dataset = EnergyDataset::from_dataframe(df, &config()).unwrap();
        assert_eq!(dataset.height(), 2);
        assert_eq!(dataset.years(), &[1965, 1966]);
        assert_eq!(dataset.last_year(), 1966);
        assert_eq!(dataset.labels(), &["Spain", "France"]);
        assert_eq!(dataset.row_values(0).unwrap(), vec![Some(100.0), Some(110.0)]);
    }

    #[test]
    fn test_sentinel_and_garbage_become_missing() {
        let df = df![
            "country" => ["Spain"],
            "1965" => ["100.5"],
            "1966" => ["-"],
            "1967" => ["not a number"],
        ]
        .unwrap();

        let dataset = EnergyDataset::from_dataframe(df, &config()).unwrap();
        assert_eq!(
            dataset.row_values(0).unwrap(),
            vec![Some(100.5), None, None]
        );
    }

    #[test]
    fn test_thousands_separators_are_stripped() {
        let df = df![
            "country" => ["Spain"],
            "1965" => ["1,234.5"],
        ]
        .unwrap();

        let dataset = EnergyDataset::from_dataframe(df, &config()).unwrap();
        assert_eq!(dataset.row_values(0).unwrap(), vec![Some(1234.5)]);
    }

    #[test]
    fn test_empty_table_rejected() {
        let df = df![
            "country" => Vec::<String>::new(),
            "1965" => Vec::<f64>::new(),
        ]
        .unwrap();

        let err = EnergyDataset::from_dataframe(df, &config()).unwrap_err();
        assert!(matches!(err, ForecastError::EmptyDataset));
    }

    #[test]
    fn test_label_only_table_rejected() {
        let df = df![
            "country" => ["Spain"],
        ]
        .unwrap();

        let err = EnergyDataset::from_dataframe(df, &config()).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidPeriodAxis(_)));
    }

    #[test]
    fn test_non_year_header_rejected() {
        let df = df![
            "country" => ["Spain"],
            "first" => [1.0],
        ]
        .unwrap();

        let err = EnergyDataset::from_dataframe(df, &config()).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidPeriodAxis(_)));
    }

    #[test]
    fn test_decreasing_axis_rejected() {
        let df = df![
            "country" => ["Spain"],
            "1966" => [1.0],
            "1965" => [2.0],
        ]
        .unwrap();

        let err = EnergyDataset::from_dataframe(df, &config()).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidPeriodAxis(_)));
    }

    #[test]
    fn test_row_out_of_range() {
        let df = df![
            "country" => ["Spain"],
            "1965" => [1.0],
        ]
        .unwrap();

        let dataset = EnergyDataset::from_dataframe(df, &config()).unwrap();
        let err = dataset.row_values(5).unwrap_err();
        assert!(matches!(
            err,
            ForecastError::RowOutOfRange { index: 5, rows: 1 }
        ));
        assert!(dataset.label(5).is_err());
    }
}
