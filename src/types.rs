// src/types.rs

use std::str::FromStr;

use clap::ValueEnum;
use serde::Deserialize;

/// Which scalar domain time values live in for one analysis run.
///
/// - `Discrete`: integer time, the smallest increment is 1 (default).
/// - `Dense`: real-valued time, the smallest increment is the smallest
///   positive normal `f64`.
///
/// The choice selects the [`crate::time::Time`] instantiation once, at the
/// entry point; nothing downstream can mix the two domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TimeModel {
    #[default]
    Discrete,
    Dense,
}

impl FromStr for TimeModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "discrete" => Ok(TimeModel::Discrete),
            "dense" => Ok(TimeModel::Dense),
            other => Err(format!(
                "invalid time_model: {other} (expected \"discrete\" or \"dense\")"
            )),
        }
    }
}

/// Input format of a job-set file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobSetFormat {
    /// Comma-separated rows with a header line (default).
    Csv,
    /// `[[job]]` tables.
    Toml,
}

impl JobSetFormat {
    pub fn from_path(path: &std::path::Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => JobSetFormat::Toml,
            _ => JobSetFormat::Csv,
        }
    }
}
