// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::engine::ExplorationConfig;
use crate::types::TimeModel;

/// Configuration file as deserialised from TOML, before validation.
///
/// ```toml
/// [analysis]
/// time_model = "discrete"
/// naive = false
/// early_exit = true
/// por = false
/// max_depth = 100
/// timeout = 30.0
///
/// [input]
/// jobset = "jobs.csv"
/// precedence = "prec.csv"
///
/// [output]
/// response_times = "jobs.rta.csv"
/// dot = "graph.dot"
/// ```
///
/// Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub analysis: AnalysisSection,

    #[serde(default)]
    pub input: InputSection,

    #[serde(default)]
    pub output: OutputSection,
}

/// `[analysis]` section.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AnalysisSection {
    /// Disable state merging.
    #[serde(default)]
    pub naive: bool,

    #[serde(default)]
    pub early_exit: bool,

    /// Enable partial-order reduction.
    #[serde(default)]
    pub por: bool,

    #[serde(default)]
    pub time_model: TimeModel,

    /// Round cap.
    #[serde(default)]
    pub max_depth: Option<usize>,

    /// Wall-clock budget in seconds.
    #[serde(default)]
    pub timeout: Option<f64>,
}

/// `[input]` section.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct InputSection {
    #[serde(default)]
    pub jobset: Option<PathBuf>,

    #[serde(default)]
    pub precedence: Option<PathBuf>,
}

/// `[output]` section.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    #[serde(default)]
    pub response_times: Option<PathBuf>,

    #[serde(default)]
    pub dot: Option<PathBuf>,
}

/// Validated configuration. Only constructed through `TryFrom<RawConfigFile>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub analysis: AnalysisSection,
    pub input: InputSection,
    pub output: OutputSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        analysis: AnalysisSection,
        input: InputSection,
        output: OutputSection,
    ) -> Self {
        Self {
            analysis,
            input,
            output,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.analysis
            .timeout
            .and_then(|t| Duration::try_from_secs_f64(t).ok())
    }
}

impl From<&ConfigFile> for ExplorationConfig {
    fn from(cfg: &ConfigFile) -> Self {
        ExplorationConfig {
            naive: cfg.analysis.naive,
            early_exit: cfg.analysis.early_exit,
            por: cfg.analysis.por,
            max_depth: cfg.analysis.max_depth,
            timeout: cfg.timeout(),
        }
    }
}
