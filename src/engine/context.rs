// src/engine/context.rs

//! Everything one analysis run owns.

use std::collections::BTreeSet;
use std::time::Instant;

use tracing::debug;

use crate::dag::StateGraph;
use crate::engine::report::ResponseTimes;
use crate::engine::{AbortReason, ExplorationConfig};
use crate::errors::Result;
use crate::jobs::{JobIndex, JobOrder, JobSet};
use crate::state::{State, StateId, StateStorage};
use crate::time::Time;

/// Owned state of a single exploration.
///
/// Independent analyses (e.g. with and without POR) each get their own
/// context; nothing is shared at process scope.
#[derive(Debug)]
pub struct ExplorationContext<T> {
    pub(crate) config: ExplorationConfig,
    pub(crate) jobs: JobSet<T>,
    pub(crate) by_earliest_arrival: Vec<JobIndex>,
    pub(crate) by_latest_arrival: Vec<JobIndex>,
    pub(crate) by_deadline: Vec<JobIndex>,
    pub(crate) by_priority: Vec<JobIndex>,
    pub(crate) topological: Vec<JobIndex>,
    pub(crate) graph: StateGraph,
    pub(crate) states: StateStorage<T>,
    /// Index handed to the next newly created state.
    pub(crate) next_state_index: usize,
    pub(crate) round: usize,
    pub(crate) response_times: ResponseTimes<T>,
    pub(crate) abort: Option<AbortReason>,
    pub(crate) dead_ends: BTreeSet<StateId>,
    pub(crate) potential_misses: usize,
    pub(crate) reduced_transitions: usize,
    pub(crate) started: Instant,
}

impl<T: Time> ExplorationContext<T> {
    /// Preprocess `jobs` and create the root state.
    pub fn new(mut jobs: JobSet<T>, config: ExplorationConfig) -> Result<Self> {
        let topological = jobs.preprocess()?;

        let mut ctx = Self {
            config,
            by_earliest_arrival: jobs.sorted(JobOrder::EarliestArrival),
            by_latest_arrival: jobs.sorted(JobOrder::LatestArrival),
            by_deadline: jobs.sorted(JobOrder::Deadline),
            by_priority: jobs.sorted(JobOrder::Priority),
            topological,
            jobs,
            graph: StateGraph::new(),
            states: StateStorage::new(),
            next_state_index: 0,
            round: 0,
            response_times: ResponseTimes::new(),
            abort: None,
            dead_ends: BTreeSet::new(),
            potential_misses: 0,
            reduced_transitions: 0,
            started: Instant::now(),
        };
        ctx.initialize()?;
        Ok(ctx)
    }

    fn initialize(&mut self) -> Result<()> {
        let mut root = State::root();
        root.index = self.next_state_index;
        root.vertex = Some(self.graph.add_vertex(root.name(), root.label()));
        debug!(state = %root.name(), "registered root state");
        self.states.insert(root)?;
        self.next_state_index += 1;
        self.round = 0;
        Ok(())
    }

    pub fn config(&self) -> &ExplorationConfig {
        &self.config
    }

    /// The preprocessed workload.
    pub fn jobs(&self) -> &JobSet<T> {
        &self.jobs
    }

    pub fn graph(&self) -> &StateGraph {
        &self.graph
    }

    pub fn states(&self) -> &StateStorage<T> {
        &self.states
    }

    pub fn response_times(&self) -> &ResponseTimes<T> {
        &self.response_times
    }

    pub fn round(&self) -> usize {
        self.round
    }

    pub fn abort_reason(&self) -> Option<&AbortReason> {
        self.abort.as_ref()
    }

    /// One of the four sorted views built at construction.
    pub fn jobs_in_order(&self, order: JobOrder) -> Option<&[JobIndex]> {
        match order {
            JobOrder::EarliestArrival => Some(self.by_earliest_arrival.as_slice()),
            JobOrder::LatestArrival => Some(self.by_latest_arrival.as_slice()),
            JobOrder::Deadline => Some(self.by_deadline.as_slice()),
            JobOrder::Priority => Some(self.by_priority.as_slice()),
            JobOrder::MaximalCost => None,
        }
    }

    /// Precedence-respecting order of the workload.
    pub fn topological_order(&self) -> &[JobIndex] {
        &self.topological
    }
}
