//! Integration tests for the prepare/predict workflow.
//!
//! These tests exercise the full path from CSV on disk through imputation
//! to projection, the way the CLI collaborator drives the library.

use energy_forecasting::{
    ForecastConfig, ForecastError, ForecastSession, ProjectionReport, dataset,
};
use polars::prelude::*;
use pretty_assertions::assert_eq;
use std::path::PathBuf;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_fixture(filename: &str) -> DataFrame {
    dataset::read_table(fixtures_path().join(filename)).expect("Failed to read fixture CSV")
}

fn prepared_session() -> ForecastSession {
    let session = ForecastSession::new(ForecastConfig::default());
    session
        .prepare(load_fixture("energy_subset.csv"))
        .expect("prepare should succeed");
    session
}

// ============================================================================
// Prepare: loading, coercion, imputation
// ============================================================================

#[test]
fn test_prepare_reports_imputation() {
    let session = ForecastSession::new(ForecastConfig::default());
    let summary = session
        .prepare(load_fixture("energy_subset.csv"))
        .expect("prepare should succeed");

    // Spain: 2 dashes, France: 1, Moldova: "eighty" + 1 dash = 2.
    // Atlantis is all-missing and stays that way (6 cells untouched).
    assert_eq!(summary.rows, 5);
    assert_eq!(summary.cells_filled, 5);
    assert_eq!(summary.all_missing, vec!["Atlantis".to_string()]);
    assert!(!summary.is_complete());
    assert!(summary.message.contains("imputed"));
}

#[test]
fn test_entities_are_zero_based_and_ordered() {
    let session = prepared_session();
    let entities = session.entities().unwrap();
    let labels: Vec<&str> = entities.iter().map(|(_, l)| l.as_str()).collect();
    assert_eq!(entities[0].0, 0);
    assert_eq!(labels, vec!["Spain", "France", "Norway", "Atlantis", "Moldova"]);
}

#[test]
fn test_prepare_rejects_non_year_headers() {
    let session = ForecastSession::new(ForecastConfig::default());
    let df = df![
        "country" => ["Spain"],
        "not_a_year" => [1.0],
    ]
    .unwrap();
    let err = session.prepare(df).unwrap_err();
    assert!(matches!(err, ForecastError::InvalidPeriodAxis(_)));
}

// ============================================================================
// Predict: projection and its typed failures
// ============================================================================

#[test]
fn test_end_to_end_known_slope() {
    // Spec scenario: {1965:100, 1966:missing, 1967:120} imputes the gap to
    // 110, the fit has slope 10/year, and 2024 predicts 690.
    let session = ForecastSession::new(ForecastConfig::default());
    let df = df![
        "country" => ["Spain"],
        "1965" => ["100"],
        "1966" => ["-"],
        "1967" => ["120"],
    ]
    .unwrap();
    let summary = session.prepare(df).unwrap();
    assert_eq!(summary.cells_filled, 1);

    let projection = session.predict(0, 2024).unwrap();
    assert_eq!(projection.historical.values, vec![100.0, 110.0, 120.0]);
    assert!((projection.slope - 10.0).abs() < 1e-9);
    assert!((projection.predicted - 690.0).abs() < 1e-6);
    assert_eq!(projection.projected.years.first(), Some(&1968));
    assert_eq!(projection.projected.years.last(), Some(&2024));
}

#[test]
fn test_projection_series_cover_the_gap_years() {
    let session = prepared_session();
    let projection = session.predict(2, 1975).unwrap(); // Norway

    assert_eq!(projection.projected.years, vec![1971, 1972, 1973, 1974, 1975]);
    assert_eq!(projection.projected.values.len(), 5);
    // Norway is strictly increasing, so the linear extrapolation is too
    assert!(
        projection
            .projected
            .values
            .windows(2)
            .all(|w| w[0] < w[1])
    );
}

#[test]
fn test_predict_all_missing_row() {
    let session = prepared_session();
    let err = session.predict(3, 2030).unwrap_err(); // Atlantis
    assert!(matches!(err, ForecastError::AllValuesMissing(ref l) if l == "Atlantis"));
}

#[test]
fn test_predict_invalid_year() {
    let session = prepared_session();
    let err = session.predict(0, 1970).unwrap_err();
    assert!(matches!(
        err,
        ForecastError::InvalidTargetYear {
            target: 1970,
            last_year: 1970,
        }
    ));
}

#[test]
fn test_predict_row_out_of_range() {
    let session = prepared_session();
    let err = session.predict(99, 2030).unwrap_err();
    assert!(matches!(
        err,
        ForecastError::RowOutOfRange { index: 99, rows: 5 }
    ));
}

#[test]
fn test_error_codes_survive_serialization() {
    let session = prepared_session();
    let err = session.predict(99, 2030).unwrap_err();
    let json = serde_json::to_string(&err).unwrap();
    assert!(json.contains("ROW_OUT_OF_RANGE"));
}

// ============================================================================
// Reports
// ============================================================================

#[test]
fn test_report_written_for_fixture_projection() {
    let session = prepared_session();
    let projection = session.predict(1, 2035).unwrap(); // France

    let dir = std::env::temp_dir().join("energy_forecasting_it_reports");
    let report = ProjectionReport::new(projection, Some("energy_subset.csv".to_string()));
    let path = report.write_json(&dir).expect("report should be written");

    let raw = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed["entity"], "France");
    assert_eq!(parsed["target_year"], 2035);
    assert!(parsed["projected"]["years"].is_array());
    std::fs::remove_file(path).ok();
}

// ============================================================================
// Imputation properties on the fixture
// ============================================================================

#[test]
fn test_imputation_is_idempotent_on_fixture() {
    let config = ForecastConfig::default();
    let mut first = energy_forecasting::EnergyDataset::from_dataframe(
        load_fixture("energy_subset.csv"),
        &config,
    )
    .unwrap();
    energy_forecasting::RowMeanImputer::impute(&mut first).unwrap();
    let snapshot: Vec<_> = (0..first.height())
        .map(|i| first.row_values(i).unwrap())
        .collect();

    let summary = energy_forecasting::RowMeanImputer::impute(&mut first).unwrap();
    assert_eq!(summary.cells_filled, 0);
    for (i, row) in snapshot.iter().enumerate() {
        assert_eq!(&first.row_values(i).unwrap(), row);
    }
}

#[test]
fn test_moldova_text_token_treated_as_missing() {
    let session = prepared_session();
    let projection = session.predict(4, 1980).unwrap(); // Moldova

    // "eighty" (1966) and "-" (1969) were imputed with the row mean of the
    // four numeric cells: (80 + 90 + 95 + 105) / 4 = 92.5
    let imputed_1966 = projection
        .historical
        .points()
        .find(|&(year, _)| year == 1966)
        .map(|(_, v)| v)
        .unwrap();
    assert!((imputed_1966 - 92.5).abs() < 1e-9);
}
