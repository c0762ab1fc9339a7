// tests/error_handling.rs

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use npsag::cli::CliArgs;
use npsag::config::{Settings, load_and_validate};
use npsag::errors::SagError;
use npsag::io::{parse_jobset_csv, parse_jobset_toml};
use npsag::jobs::JobSet;
use npsag::types::TimeModel;
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn test_zero_max_depth_returns_config_error() {
    let file = config_file(
        r#"
[analysis]
max_depth = 0
"#,
    );

    match load_and_validate(file.path()) {
        Err(SagError::ConfigError(msg)) => assert!(msg.contains("max_depth")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_non_positive_timeout_returns_config_error() {
    let file = config_file(
        r#"
[analysis]
timeout = -1.5
"#,
    );

    match load_and_validate(file.path()) {
        Err(SagError::ConfigError(msg)) => assert!(msg.contains("timeout")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_unknown_time_model_returns_toml_error() {
    let file = config_file(
        r#"
[analysis]
time_model = "continuous"
"#,
    );

    assert!(matches!(
        load_and_validate(file.path()),
        Err(SagError::TomlError(_))
    ));
}

#[test]
fn test_unknown_key_returns_toml_error() {
    let file = config_file(
        r#"
[analysis]
merge = false
"#,
    );

    assert!(matches!(
        load_and_validate(file.path()),
        Err(SagError::TomlError(_))
    ));
}

#[test]
fn test_missing_config_file_returns_io_error() {
    assert!(matches!(
        load_and_validate("/definitely/not/here/npsag.toml"),
        Err(SagError::IoError(_))
    ));
}

#[test]
fn test_config_file_values_are_loaded() {
    let file = config_file(
        r#"
[analysis]
time_model = "dense"
early_exit = true
max_depth = 12
timeout = 2.5

[input]
jobset = "jobs.csv"

[output]
dot = "graph.dot"
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();
    assert_eq!(cfg.analysis.time_model, TimeModel::Dense);
    assert!(cfg.analysis.early_exit);
    assert!(!cfg.analysis.naive);
    assert_eq!(cfg.analysis.max_depth, Some(12));
    assert_eq!(cfg.timeout(), Some(Duration::from_millis(2500)));
    assert_eq!(cfg.input.jobset, Some(PathBuf::from("jobs.csv")));
    assert_eq!(cfg.output.dot, Some(PathBuf::from("graph.dot")));
    assert_eq!(cfg.output.response_times, None);
}

#[test]
fn test_cli_overrides_config_file() {
    let file = config_file(
        r#"
[analysis]
time_model = "dense"
max_depth = 12

[input]
jobset = "from-config.csv"
precedence = "prec.csv"
"#,
    );

    let args = CliArgs {
        config: Some(file.path().to_path_buf()),
        jobset: Some(PathBuf::from("from-cli.csv")),
        time_model: Some(TimeModel::Discrete),
        naive: true,
        timeout: Some(1.0),
        ..Default::default()
    };
    let settings = Settings::resolve(&args).unwrap();

    assert_eq!(settings.jobset, PathBuf::from("from-cli.csv"));
    assert_eq!(settings.precedence, Some(PathBuf::from("prec.csv")));
    assert_eq!(settings.time_model, TimeModel::Discrete);
    assert!(settings.exploration.naive);
    assert!(!settings.exploration.por);
    assert_eq!(settings.exploration.max_depth, Some(12));
    assert_eq!(settings.exploration.timeout, Some(Duration::from_secs(1)));
}

#[test]
fn test_missing_jobset_returns_config_error() {
    match Settings::resolve(&CliArgs::default()) {
        Err(SagError::ConfigError(msg)) => assert!(msg.contains("job set")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_invalid_cli_timeout_is_rejected() {
    let args = CliArgs {
        jobset: Some(PathBuf::from("jobs.csv")),
        timeout: Some(0.0),
        ..Default::default()
    };
    assert!(matches!(
        Settings::resolve(&args),
        Err(SagError::ConfigError(_))
    ));
}

#[test]
fn test_oversized_cli_timeout_is_rejected() {
    let args = CliArgs::try_parse_from(["npsag", "-j", "jobs.csv", "--timeout", "1e30"]).unwrap();

    match Settings::resolve(&args) {
        Err(SagError::ConfigError(msg)) => assert!(msg.contains("timeout")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_oversized_config_timeout_returns_config_error() {
    let file = config_file(
        r#"
[analysis]
timeout = 1e30
"#,
    );

    assert!(matches!(
        load_and_validate(file.path()),
        Err(SagError::ConfigError(_))
    ));
}

#[test]
fn test_inverted_arrival_returns_invalid_job() {
    let csv = "Task ID,Job ID,Arrival min,Arrival max,Cost min,Cost max,Deadline,Priority\n\
               1,1,5,2,1,1,10,1\n";

    match parse_jobset_csv::<i64>(csv) {
        Err(SagError::InvalidJob(msg)) => assert!(msg.contains("J1,1")),
        Err(e) => panic!("Expected InvalidJob error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_duplicate_job_returns_duplicate_job() {
    let csv = "Task ID,Job ID,Arrival min,Arrival max,Cost min,Cost max,Deadline,Priority\n\
               1,1,0,0,1,1,10,1\n\
               1,1,0,0,2,2,10,1\n";

    assert!(matches!(
        parse_jobset_csv::<i64>(csv),
        Err(SagError::DuplicateJob(name)) if name == "J1,1"
    ));
}

#[test]
fn test_toml_jobset_with_missing_field_returns_toml_error() {
    let toml = r#"
[[job]]
task_id = 1
job_id = 1
arrival_min = 0
"#;
    let result: Result<JobSet<i64>, SagError> = parse_jobset_toml(toml);
    assert!(matches!(result, Err(SagError::TomlError(_))));
}
