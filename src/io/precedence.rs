// src/io/precedence.rs

//! Precedence constraints: rows `From TID, From JID, To TID, To JID` after a
//! header line. `From` must complete before `To` may start.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::errors::{Result, SagError};
use crate::jobs::{Job, JobSet};
use crate::time::Time;

pub fn read_precedence<T: Time>(path: impl AsRef<Path>, jobs: &mut JobSet<T>) -> Result<usize> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    debug!(path = %path.display(), "opened precedence file");
    apply_precedence_csv(&contents, jobs)
}

/// Attach every listed edge to `jobs`. Returns the number of edges read.
pub fn apply_precedence_csv<T: Time>(contents: &str, jobs: &mut JobSet<T>) -> Result<usize> {
    let mut edges = 0;
    for (line_no, line) in contents.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let ids = line
            .split(',')
            .map(|f| f.trim().parse::<u32>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| {
                SagError::ConfigError(format!("precedence row {}: {e}", line_no + 1))
            })?;
        let [from_task, from_job, to_task, to_job] = ids[..] else {
            return Err(SagError::ConfigError(format!(
                "precedence row {}: expected 4 fields, got {}",
                line_no + 1,
                ids.len()
            )));
        };

        let from = Job::<T>::name_for(from_task, from_job);
        let to = Job::<T>::name_for(to_task, to_job);
        jobs.add_predecessor(&to, &from)?;
        edges += 1;
    }
    debug!(edges, "read precedence constraints");
    Ok(edges)
}
