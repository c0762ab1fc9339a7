// src/engine/mod.rs

//! State-space exploration engine.
//!
//! This module ties together:
//! - the [`context::ExplorationContext`] owning all state of one analysis run
//! - the eligibility rules deciding which job may be dispatched next
//! - the round-based explorer loop with state merging
//! - [`reduction::ReductionSet`] for partial-order reduction and early
//!   deadline-miss detection
//! - the response-time record and outcome summary in [`report`]

use std::fmt;
use std::time::Duration;

pub mod context;
pub mod eligibility;
pub mod explorer;
pub mod reduction;
pub mod report;

pub use context::ExplorationContext;
pub use reduction::ReductionSet;
pub use report::{ExplorationOutcome, ResponseTimes, format_response_times};

/// Options for one exploration run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExplorationConfig {
    /// Disable state merging.
    pub naive: bool,
    /// Abort on the first dead end or deadline miss.
    pub early_exit: bool,
    /// Collapse independent dispatch orders through reduction sets.
    pub por: bool,
    /// Maximum number of rounds before the run is cut short.
    pub max_depth: Option<usize>,
    /// Wall-clock budget, checked once per round.
    pub timeout: Option<Duration>,
}

/// Why an exploration stopped before exhausting all rounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbortReason {
    /// A frontier state had no eligible successor while jobs remained.
    DeadEnd { state: String },
    /// A reduction set at a frontier state reported a possible miss.
    PotentialDeadlineMiss { state: String },
    /// A dispatched job's latest finish exceeded its deadline.
    DeadlineMiss { job: String },
    /// The wall-clock budget ran out.
    Timeout,
    /// The round cap was reached.
    DepthLimit { rounds: usize },
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortReason::DeadEnd { state } => write!(f, "dead end at state {state}"),
            AbortReason::PotentialDeadlineMiss { state } => {
                write!(f, "potential deadline miss at state {state}")
            }
            AbortReason::DeadlineMiss { job } => write!(f, "job {job} misses its deadline"),
            AbortReason::Timeout => write!(f, "timeout"),
            AbortReason::DepthLimit { rounds } => write!(f, "depth limit of {rounds} rounds"),
        }
    }
}
