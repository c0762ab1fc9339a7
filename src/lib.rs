// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod interval;
pub mod io;
pub mod jobs;
pub mod logging;
pub mod state;
pub mod time;
pub mod types;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::Settings;
use crate::engine::{ExplorationContext, ExplorationOutcome, format_response_times};
use crate::jobs::JobSet;
use crate::time::Time;
use crate::types::TimeModel;

/// High-level entry point used by `main.rs`.
///
/// Resolves settings, reads the workload in the selected time model, runs
/// the exploration and writes the requested outputs.
pub fn run(args: CliArgs) -> Result<()> {
    let settings = Settings::resolve(&args)?;
    debug!(?settings, "resolved settings");

    match settings.time_model {
        TimeModel::Discrete => analyze::<i64>(&settings).map(|_| ()),
        TimeModel::Dense => analyze::<f64>(&settings).map(|_| ()),
    }
}

/// Load the job set described by `settings`, including precedence.
pub fn load_workload<T: Time>(settings: &Settings) -> Result<JobSet<T>> {
    let mut jobs = io::read_jobset::<T>(&settings.jobset)?;
    if let Some(path) = &settings.precedence {
        io::read_precedence(path, &mut jobs)?;
    }
    info!(
        jobs = jobs.len(),
        precedence = jobs.has_precedence(),
        path = %settings.jobset.display(),
        "loaded job set"
    );
    Ok(jobs)
}

/// Analyse one workload and report on stdout.
pub fn analyze<T: Time>(settings: &Settings) -> Result<ExplorationOutcome<T>> {
    let jobs = load_workload::<T>(settings)?;

    let mut ctx = ExplorationContext::new(jobs, settings.exploration)?;
    let outcome = ctx.explore()?;

    print!("{}", format_response_times(ctx.jobs(), ctx.response_times()));
    print_verdict(&outcome);

    if let Some(path) = &settings.response_times {
        io::write_response_times(path, ctx.jobs(), ctx.response_times())?;
    }
    if let Some(path) = &settings.dot {
        io::write_dot(path, ctx.graph())?;
    }

    println!("Exploration finished");
    println!(
        "Time taken: {:?} ({} states, {} rounds)",
        outcome.elapsed, outcome.states, outcome.rounds
    );
    Ok(outcome)
}

fn print_verdict<T: Time>(outcome: &ExplorationOutcome<T>) {
    if let Some(reason) = &outcome.abort {
        println!("Aborted: {reason}");
    }
    if outcome.dead_ends > 0 {
        println!("Dead ends: {}", outcome.dead_ends);
    }
    if !outcome.deadline_misses.is_empty() {
        println!("Deadline misses: {}", outcome.deadline_misses.join(" "));
    }
    if outcome.is_schedulable() {
        println!("Schedulable: yes");
    } else {
        println!("Schedulable: no");
    }
}
