// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SagError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid job: {0}")]
    InvalidJob(String),

    #[error("Duplicate job: {0}")]
    DuplicateJob(String),

    #[error("Job not found: {0}")]
    UnknownJob(String),

    #[error("Missing predecessor '{predecessor}' of job '{job}'")]
    MissingPredecessor { job: String, predecessor: String },

    #[error("Cycle detected in precedence graph: {0}")]
    PrecedenceCycle(String),

    /// Two logically distinct states were registered under one name.
    #[error("Duplicate state: {0}")]
    DuplicateState(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, SagError>;
