// src/engine/report.rs

use std::collections::HashMap;
use std::fmt::Write as _;
use std::time::Duration;

use crate::engine::AbortReason;
use crate::engine::context::ExplorationContext;
use crate::interval::Interval;
use crate::jobs::JobSet;
use crate::time::Time;

/// Best- and worst-case completion time of every job seen on some path.
#[derive(Debug, Clone, Default)]
pub struct ResponseTimes<T> {
    by_job: HashMap<String, Interval<T>>,
}

impl<T: Time> ResponseTimes<T> {
    pub fn new() -> Self {
        Self {
            by_job: HashMap::new(),
        }
    }

    /// Widen the record of `job` to cover `finish`.
    pub fn update(&mut self, job: &str, finish: Interval<T>) {
        self.by_job
            .entry(job.to_string())
            .and_modify(|current| *current = current.widen(&finish))
            .or_insert(finish);
    }

    pub fn get(&self, job: &str) -> Option<Interval<T>> {
        self.by_job.get(job).copied()
    }

    pub fn len(&self) -> usize {
        self.by_job.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_job.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Interval<T>)> {
        self.by_job.iter().map(|(name, iv)| (name.as_str(), *iv))
    }
}

/// Summary of one finished (or aborted) exploration.
#[derive(Debug, Clone)]
pub struct ExplorationOutcome<T> {
    /// Completed rounds.
    pub rounds: usize,
    pub states: usize,
    pub edges: usize,
    pub dead_ends: usize,
    pub potential_misses: usize,
    pub reduced_transitions: usize,
    /// Jobs whose worst-case completion exceeds their deadline, by deadline.
    pub deadline_misses: Vec<String>,
    /// Jobs that never appeared on any dispatch edge.
    pub unscheduled: Vec<String>,
    pub abort: Option<AbortReason>,
    pub elapsed: Duration,
    pub response_times: ResponseTimes<T>,
}

impl<T: Time> ExplorationOutcome<T> {
    pub(crate) fn collect(ctx: &ExplorationContext<T>) -> Self {
        let mut deadline_misses = Vec::new();
        let mut unscheduled = Vec::new();
        for &j in &ctx.by_deadline {
            let job = ctx.jobs.get(j);
            match ctx.response_times.get(&job.name) {
                Some(finish) if job.exceeds_deadline(finish.end) => {
                    deadline_misses.push(job.name.clone())
                }
                Some(_) => {}
                None => unscheduled.push(job.name.clone()),
            }
        }

        Self {
            rounds: ctx.round,
            states: ctx.states.len(),
            edges: ctx.graph.edge_count(),
            dead_ends: ctx.dead_ends.len(),
            potential_misses: ctx.potential_misses,
            reduced_transitions: ctx.reduced_transitions,
            deadline_misses,
            unscheduled,
            abort: ctx.abort.clone(),
            elapsed: ctx.started.elapsed(),
            response_times: ctx.response_times.clone(),
        }
    }

    pub fn is_aborted(&self) -> bool {
        self.abort.is_some()
    }

    /// Every job scheduled on every path and none can miss its deadline.
    pub fn is_schedulable(&self) -> bool {
        self.abort.is_none()
            && self.dead_ends == 0
            && self.deadline_misses.is_empty()
            && self.unscheduled.is_empty()
    }
}

/// Render "Response times:" followed by one `Name: I[BCCT,WCCT]` line per job,
/// in workload order. Jobs never dispatched are omitted.
pub fn format_response_times<T: Time>(jobs: &JobSet<T>, rt: &ResponseTimes<T>) -> String {
    let mut out = String::from("Response times:\n");
    for (_, job) in jobs.iter() {
        if let Some(finish) = rt.get(&job.name) {
            let _ = writeln!(out, "{}: {}", job.name, finish);
        }
    }
    out
}
