// src/config/validate.rs

use std::time::Duration;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, SagError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = SagError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.analysis, raw.input, raw.output))
    }
}

/// Run the same checks on an already assembled configuration, e.g. after
/// CLI overrides were applied.
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    validate_max_depth(cfg.analysis.max_depth)?;
    validate_timeout(cfg.analysis.timeout)?;
    Ok(())
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_max_depth(cfg.analysis.max_depth)?;
    validate_timeout(cfg.analysis.timeout)?;
    validate_paths(cfg)?;
    Ok(())
}

fn validate_max_depth(max_depth: Option<usize>) -> Result<()> {
    if max_depth == Some(0) {
        return Err(SagError::ConfigError(
            "[analysis].max_depth must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_timeout(timeout: Option<f64>) -> Result<()> {
    let Some(t) = timeout else {
        return Ok(());
    };
    if t <= 0.0 || Duration::try_from_secs_f64(t).is_err() {
        return Err(SagError::ConfigError(format!(
            "[analysis].timeout must be a positive number of seconds that fits a duration (got {t})"
        )));
    }
    Ok(())
}

fn validate_paths(cfg: &RawConfigFile) -> Result<()> {
    let paths = [
        ("[input].jobset", cfg.input.jobset.as_ref()),
        ("[input].precedence", cfg.input.precedence.as_ref()),
        ("[output].response_times", cfg.output.response_times.as_ref()),
        ("[output].dot", cfg.output.dot.as_ref()),
    ];
    for (key, path) in paths {
        if path.is_some_and(|p| p.as_os_str().is_empty()) {
            return Err(SagError::ConfigError(format!("{key} must not be empty")));
        }
    }
    Ok(())
}
