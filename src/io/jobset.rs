// src/io/jobset.rs

//! Job-set readers.
//!
//! CSV rows are `Task ID, Job ID, Arrival min, Arrival max, Cost min,
//! Cost max, Deadline, Priority` after one header line. A field that is
//! missing or does not parse becomes zero and is reported with a warning.
//!
//! TOML job sets use one `[[job]]` table per job:
//!
//! ```toml
//! [[job]]
//! task_id = 1
//! job_id = 1
//! arrival_min = 0
//! arrival_max = 0
//! cost_min = 1
//! cost_max = 2
//! deadline = 10
//! priority = 1
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::Result;
use crate::jobs::{Job, JobSet};
use crate::time::Time;
use crate::types::JobSetFormat;

const CSV_COLUMNS: [&str; 8] = [
    "Task ID",
    "Job ID",
    "Arrival min",
    "Arrival max",
    "Cost min",
    "Cost max",
    "Deadline",
    "Priority",
];

/// Read a job set, picking the format from the file extension.
pub fn read_jobset<T: Time>(path: impl AsRef<Path>) -> Result<JobSet<T>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    debug!(path = %path.display(), "opened job set file");

    match JobSetFormat::from_path(path) {
        JobSetFormat::Csv => parse_jobset_csv(&contents),
        JobSetFormat::Toml => parse_jobset_toml(&contents),
    }
}

pub fn parse_jobset_csv<T: Time>(contents: &str) -> Result<JobSet<T>> {
    let mut jobs = JobSet::new();

    // first line is the header
    for (line_no, line) in contents.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let row = line_no + 1;

        let task_id = id_field(&fields, 0, row);
        let job_id = id_field(&fields, 1, row);
        let arrival_min: T = time_field(&fields, 2, row);
        let arrival_max: T = time_field(&fields, 3, row);
        let cost_min: T = time_field(&fields, 4, row);
        let cost_max: T = time_field(&fields, 5, row);
        let deadline: T = time_field(&fields, 6, row);
        let priority: T = time_field(&fields, 7, row);

        let job = Job::new(
            task_id,
            job_id,
            (arrival_min, arrival_max),
            (cost_min, cost_max),
            deadline,
            priority,
        )?;
        jobs.push(job)?;
    }

    debug!(jobs = jobs.len(), "parsed CSV job set");
    Ok(jobs)
}

#[derive(Debug, Deserialize)]
#[serde(bound = "T: Time")]
struct TomlJobSet<T> {
    #[serde(default)]
    job: Vec<TomlJob<T>>,
}

#[derive(Debug, Deserialize)]
#[serde(bound = "T: Time")]
#[serde(deny_unknown_fields)]
struct TomlJob<T> {
    task_id: u32,
    job_id: u32,
    arrival_min: T,
    arrival_max: T,
    cost_min: T,
    cost_max: T,
    deadline: T,
    priority: T,
}

pub fn parse_jobset_toml<T: Time>(contents: &str) -> Result<JobSet<T>> {
    let file: TomlJobSet<T> = toml::from_str(contents)?;
    let mut jobs = JobSet::new();
    for j in file.job {
        jobs.push(Job::new(
            j.task_id,
            j.job_id,
            (j.arrival_min, j.arrival_max),
            (j.cost_min, j.cost_max),
            j.deadline,
            j.priority,
        )?)?;
    }
    debug!(jobs = jobs.len(), "parsed TOML job set");
    Ok(jobs)
}

fn id_field(fields: &[&str], column: usize, row: usize) -> u32 {
    let raw = fields.get(column).copied().unwrap_or_default();
    raw.parse().unwrap_or_else(|_| {
        warn!(row, column = CSV_COLUMNS[column], value = raw, "unparsable field, using 0");
        0
    })
}

fn time_field<T: Time>(fields: &[&str], column: usize, row: usize) -> T {
    let raw = fields.get(column).copied().unwrap_or_default();
    T::parse_time(raw).unwrap_or_else(|| {
        warn!(row, column = CSV_COLUMNS[column], value = raw, "unparsable field, using 0");
        T::ZERO
    })
}
