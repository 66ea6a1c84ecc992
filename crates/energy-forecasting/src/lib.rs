//! Energy Consumption Forecasting Library
//!
//! Ingests a table of per-country annual energy-consumption figures,
//! repairs missing observations with row-wise mean imputation, and
//! produces per-country linear projections of future consumption.
//!
//! # Overview
//!
//! Two computations do the real work, used in sequence:
//!
//! - **[`RowMeanImputer`]**: fills each row's missing observations with
//!   that row's mean. Rows are independent; a row with no data at all is
//!   reported, never zero-filled.
//! - **[`LinearProjector`]**: fits a closed-form ordinary-least-squares
//!   line through one row's clean (year, value) pairs and extrapolates it
//!   over every year up to the target, returning both the historical and
//!   projected series for charting.
//!
//! A [`ForecastSession`] ties them together as an explicit prepare/predict
//! handle (no ambient global state), safe to share across threads.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use energy_forecasting::{ForecastConfig, ForecastSession, dataset};
//!
//! let session = ForecastSession::new(ForecastConfig::default());
//!
//! // "prepare": load, validate, impute, install
//! let df = dataset::read_table("data/energy_data.csv")?;
//! let summary = session.prepare(df)?;
//! println!("{}", summary.message);
//!
//! // "predict": project row 9 to 2040
//! let projection = session.predict(9, 2040)?;
//! println!("{}", projection.message());
//! for (year, value) in projection.projected.points() {
//!     println!("{year}: {value:.1} kWh");
//! }
//! ```
//!
//! # Error handling
//!
//! All failure modes are explicit [`ForecastError`] variants with stable
//! codes (`INSUFFICIENT_DATA`, `INVALID_TARGET_YEAR`, `ROW_OUT_OF_RANGE`,
//! ...). The core performs no logging-as-control-flow and never substitutes
//! fallback values for missing data.

pub mod config;
pub mod dataset;
pub mod error;
pub mod imputer;
pub mod projector;
pub mod report;
pub mod session;
pub mod types;

// Re-exports for convenient access
pub use config::{ConfigValidationError, ForecastConfig, ForecastConfigBuilder, MISSING_MARKERS};
pub use dataset::{EnergyDataset, read_table};
pub use error::{ForecastError, Result as ForecastResult, ResultExt};
pub use imputer::RowMeanImputer;
pub use projector::{LinearFit, LinearProjector};
pub use report::ProjectionReport;
pub use session::ForecastSession;
pub use types::{ImputationSummary, Projection, YearSeries};
