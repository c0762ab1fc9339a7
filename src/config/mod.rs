// src/config/mod.rs

//! Configuration loading and validation.
//!
//! - `model.rs`: the TOML-backed data model.
//! - `loader.rs`: reading a file from disk and merging it with CLI flags.
//! - `validate.rs`: value checks on budgets and paths.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{Settings, load_and_validate, load_from_path};
pub use model::{AnalysisSection, ConfigFile, InputSection, OutputSection, RawConfigFile};
pub use validate::validate_config;
