// src/io/writer.rs

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::dag::StateGraph;
use crate::engine::ResponseTimes;
use crate::errors::Result;
use crate::jobs::JobSet;
use crate::time::Time;

pub const RESPONSE_TIME_HEADER: &str = "Task ID,Job ID,BCCT,WCCT,BCRT,WCRT";

/// One row per job in workload order; response times are relative to the
/// earliest arrival. Jobs without a record are left out.
pub fn render_response_times<T: Time>(jobs: &JobSet<T>, rt: &ResponseTimes<T>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RESPONSE_TIME_HEADER}");

    for (_, job) in jobs.iter() {
        let Some(finish) = rt.get(&job.name) else {
            warn!(job = %job.name, "no response time recorded");
            continue;
        };
        let _ = writeln!(
            out,
            "{},{},{},{},{},{}",
            job.task_id,
            job.job_id,
            finish.start,
            finish.end,
            finish.start.saturating_sub(job.earliest_arrival()),
            finish.end.saturating_sub(job.earliest_arrival()),
        );
    }
    out
}

pub fn write_response_times<T: Time>(
    path: impl AsRef<Path>,
    jobs: &JobSet<T>,
    rt: &ResponseTimes<T>,
) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, render_response_times(jobs, rt))?;
    debug!(path = %path.display(), "wrote response times");
    Ok(())
}

pub fn write_dot(path: impl AsRef<Path>, graph: &StateGraph) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, graph.to_dot())?;
    debug!(path = %path.display(), vertices = graph.vertex_count(), "wrote state graph");
    Ok(())
}
