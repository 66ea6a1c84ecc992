//! Projection report generation.
//!
//! The core hands back two series; this module packages them, with
//! metadata, into an artifact any chart renderer or frontend can consume.

use crate::error::Result;
use crate::types::Projection;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// A serializable projection report: the prediction plus both series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionReport {
    /// Timestamp when the report was generated.
    pub generated_at: String,
    /// Input file the dataset was loaded from, if known.
    pub input_file: Option<String>,
    /// The projection itself, with historical and projected series.
    #[serde(flatten)]
    pub projection: Projection,
}

impl ProjectionReport {
    /// Build a report for a finished projection.
    pub fn new(projection: Projection, input_file: Option<String>) -> Self {
        Self {
            generated_at: Local::now().to_rfc3339(),
            input_file,
            projection,
        }
    }

    /// Render a human-readable summary for terminal output.
    pub fn render_text(&self) -> String {
        let p = &self.projection;
        let mut out = String::new();
        out.push_str(&format!("{}\n", "=".repeat(64)));
        out.push_str(&format!(
            "Energy consumption projection: {} -> {}\n",
            p.entity, p.target_year
        ));
        out.push_str(&format!("{}\n", "-".repeat(64)));
        out.push_str(&format!(
            "  Historical points: {} ({}..={})\n",
            p.historical.len(),
            p.historical.years.first().copied().unwrap_or_default(),
            p.historical.years.last().copied().unwrap_or_default(),
        ));
        out.push_str(&format!(
            "  Fitted trend:      {:+.4} kWh/year (intercept {:.2})\n",
            p.slope, p.intercept
        ));
        out.push_str(&format!("  {}\n", p.message()));
        out.push_str(&format!("{}\n", "=".repeat(64)));
        out
    }

    /// Write the report as pretty-printed JSON under `output_dir`.
    ///
    /// The file name is derived from the entity and target year, e.g.
    /// `projection_spain_2040.json`. Returns the written path.
    pub fn write_json(&self, output_dir: impl AsRef<Path>) -> Result<PathBuf> {
        let output_dir = output_dir.as_ref();
        fs::create_dir_all(output_dir)?;

        let slug: String = self
            .projection
            .entity
            .to_ascii_lowercase()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        let path = output_dir.join(format!(
            "projection_{}_{}.json",
            slug, self.projection.target_year
        ));

        let mut file = File::create(&path)?;
        file.write_all(serde_json::to_string_pretty(self)?.as_bytes())?;
        info!("Projection report written to {:?}", path);
        Ok(path)
    }
}
