// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::cli::CliArgs;
use crate::config::model::{ConfigFile, RawConfigFile};
use crate::config::validate::validate_config;
use crate::engine::ExplorationConfig;
use crate::errors::{Result, SagError};
use crate::types::TimeModel;

/// Read and deserialize a config file without semantic validation.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a config file and validate it (positive timeout, non-zero round cap,
/// non-empty paths).
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Everything one invocation needs, after merging the config file (if any)
/// with command-line overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub jobset: PathBuf,
    pub precedence: Option<PathBuf>,
    pub time_model: TimeModel,
    pub exploration: ExplorationConfig,
    pub response_times: Option<PathBuf>,
    pub dot: Option<PathBuf>,
}

impl Settings {
    /// CLI values win over the config file; boolean flags can only switch
    /// features on.
    pub fn resolve(args: &CliArgs) -> Result<Self> {
        let mut cfg = match &args.config {
            Some(path) => {
                debug!(path = %path.display(), "loading config file");
                load_and_validate(path)?
            }
            None => ConfigFile::default(),
        };

        let analysis = &mut cfg.analysis;
        analysis.naive |= args.naive;
        analysis.early_exit |= args.early_exit;
        analysis.por |= args.por;
        if let Some(model) = args.time_model {
            analysis.time_model = model;
        }
        if args.max_depth.is_some() {
            analysis.max_depth = args.max_depth;
        }
        if args.timeout.is_some() {
            analysis.timeout = args.timeout;
        }
        validate_config(&cfg)?;

        let jobset = args
            .jobset
            .clone()
            .or_else(|| cfg.input.jobset.clone())
            .ok_or_else(|| {
                SagError::ConfigError(
                    "no job set given (use --jobset or [input].jobset)".to_string(),
                )
            })?;

        Ok(Self {
            jobset,
            precedence: args.precedence.clone().or_else(|| cfg.input.precedence.clone()),
            time_model: cfg.analysis.time_model,
            exploration: ExplorationConfig::from(&cfg),
            response_times: args.output.clone().or_else(|| cfg.output.response_times.clone()),
            dot: args.dot.clone().or_else(|| cfg.output.dot.clone()),
        })
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.exploration.timeout
    }
}
