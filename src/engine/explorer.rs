// src/engine/explorer.rs

//! Round-based exploration loop: frontier expansion, dispatch, merging and
//! response-time accumulation.

use tracing::{debug, info, warn};

use crate::dag::VertexId;
use crate::engine::context::ExplorationContext;
use crate::engine::reduction::ReductionSet;
use crate::engine::report::ExplorationOutcome;
use crate::engine::AbortReason;
use crate::errors::{Result, SagError};
use crate::interval::Interval;
use crate::jobs::JobIndex;
use crate::state::{ScheduledJobs, State, StateId};
use crate::time::{self, Time, maximum};

/// Per-member bounds and combined availability of a reduced transition.
struct ReducedDispatch<T> {
    members: Vec<JobIndex>,
    availability: Interval<T>,
    finish_times: Vec<(JobIndex, Interval<T>)>,
}

impl<T: Time> ExplorationContext<T> {
    /// Run the exploration to its fixed point (or until aborted).
    ///
    /// Without an abort this takes exactly one round per job.
    pub fn explore(&mut self) -> Result<ExplorationOutcome<T>> {
        let total = self.jobs.len();
        info!(
            jobs = total,
            naive = self.config.naive,
            por = self.config.por,
            early_exit = self.config.early_exit,
            "starting exploration"
        );

        while self.round < total {
            if let Some(reason) = self.budget_exhausted() {
                warn!(%reason, round = self.round, "exploration budget exhausted");
                self.abort = Some(reason);
                break;
            }

            let frontier = self.frontier()?;
            debug!(round = self.round, frontier = frontier.len(), "starting round");

            for state in frontier {
                self.explore_state(state)?;
                if self.abort.is_some() {
                    break;
                }
            }

            if let Some(reason) = &self.abort {
                warn!(%reason, round = self.round, "---> Aborted!");
                break;
            }

            self.round += 1;
        }

        let outcome = ExplorationOutcome::collect(self);
        info!(
            rounds = outcome.rounds,
            states = outcome.states,
            edges = outcome.edges,
            dead_ends = outcome.dead_ends,
            schedulable = outcome.is_schedulable(),
            "exploration finished"
        );
        Ok(outcome)
    }

    fn budget_exhausted(&self) -> Option<AbortReason> {
        if let Some(max_depth) = self.config.max_depth {
            if self.round >= max_depth {
                return Some(AbortReason::DepthLimit { rounds: max_depth });
            }
        }
        if let Some(timeout) = self.config.timeout {
            if self.started.elapsed() >= timeout {
                return Some(AbortReason::Timeout);
            }
        }
        None
    }

    /// States that are still graph leaves.
    pub fn frontier(&self) -> Result<Vec<StateId>> {
        self.graph
            .leaves()
            .into_iter()
            .map(|vertex| {
                let name = self
                    .graph
                    .vertex(vertex)
                    .map(|v| v.name.as_str())
                    .unwrap_or_default();
                self.states.id_of(name).ok_or_else(|| {
                    SagError::Other(anyhow::anyhow!("graph vertex '{name}' has no registered state"))
                })
            })
            .collect()
    }

    fn explore_state(&mut self, id: StateId) -> Result<()> {
        let Some(state) = self.states.get(id).cloned() else {
            return Ok(());
        };
        if state.scheduled.len() == self.jobs.len() {
            return Ok(());
        }

        debug!("==========================================");
        debug!(state = %state.name(), jobs = %state.describe_jobs(&self.jobs), "looking at state");

        let successors = self.eligible_successors(&state);
        if successors.is_empty() {
            // out of options and not every job is scheduled
            if self.dead_ends.insert(id) {
                warn!(state = %state.name(), "dead end: no eligible successor");
            }
            if self.config.early_exit {
                self.abort = Some(AbortReason::DeadEnd {
                    state: state.name(),
                });
            }
            return Ok(());
        }

        let check = ReductionSet::new(&self.jobs, state.availability, &successors);
        if check.has_potential_deadline_misses() {
            self.potential_misses += 1;
            warn!(state = %state.name(), "potential deadline miss among eligible successors");
            if self.config.early_exit {
                self.abort = Some(AbortReason::PotentialDeadlineMiss {
                    state: state.name(),
                });
                return Ok(());
            }
        }

        if self.config.por {
            if let Some(reduced) = self.reduce(&state, &successors) {
                return self.dispatch_reduced(&state, reduced);
            }
        }

        for job in successors {
            self.schedule(&state, job)?;
            if self.abort.is_some() {
                break;
            }
        }
        Ok(())
    }

    /// Dispatch `job` from `parent`, merging into an existing state if possible.
    fn schedule(&mut self, parent: &State<T>, job: JobIndex) -> Result<()> {
        let finish = self.next_finish_times(parent, job);
        let mut scheduled = parent.scheduled.clone();
        scheduled.insert(job);
        let pending_release = self.earliest_pending_release(&scheduled);
        let label = self.dispatch_label(job, finish);

        debug!(job = %self.jobs.get(job).name, finish = %finish, "dispatch job");
        self.add_successor(parent, finish, scheduled, pending_release, label)?;
        self.record_finish(job, finish);
        Ok(())
    }

    /// Register the successor state, or merge it into an equivalent leaf.
    fn add_successor(
        &mut self,
        parent: &State<T>,
        availability: Interval<T>,
        scheduled: ScheduledJobs,
        pending_release: T,
        label: String,
    ) -> Result<()> {
        let parent_vertex = vertex_of(parent)?;
        let candidate = State::new(self.next_state_index, availability, scheduled, pending_release);

        if !self.config.naive && self.try_to_merge(&candidate, parent_vertex, &label) {
            return Ok(());
        }
        self.make_state(candidate, parent_vertex, label)
    }

    fn make_state(&mut self, mut state: State<T>, parent: VertexId, label: String) -> Result<()> {
        let vertex = self.graph.add_vertex(state.name(), state.label());
        state.vertex = Some(vertex);

        debug!(
            state = %state.name(),
            availability = %state.availability,
            earliest_pending_release = %time::display(state.earliest_pending_release),
            jobs = %state.describe_jobs(&self.jobs),
            "make state"
        );

        self.states.insert(state)?;
        self.graph.add_edge(parent, vertex, label);
        self.next_state_index += 1;
        Ok(())
    }

    /// Merge `candidate` into the first unexpanded state with the same job set
    /// and an intersecting availability.
    fn try_to_merge(&mut self, candidate: &State<T>, parent: VertexId, label: &str) -> bool {
        let ids = self.states.with_same_jobs(&candidate.scheduled).to_vec();

        for id in ids {
            let Some(existing) = self.states.get_mut(id) else {
                continue;
            };
            let Some(vertex) = existing.vertex else {
                continue;
            };
            if !self.graph.is_leaf(vertex) || !existing.can_merge(candidate) {
                continue;
            }

            existing.merge(candidate);
            debug!(
                state = %existing.name(),
                availability = %existing.availability,
                "merged into existing state"
            );
            let updated_label = existing.label();
            self.graph.update_vertex_label(vertex, updated_label);
            self.graph.add_edge(parent, vertex, label);
            return true;
        }
        false
    }

    /// Widen the response-time record and flag misses.
    fn record_finish(&mut self, job: JobIndex, finish: Interval<T>) {
        let j = self.jobs.get(job);
        self.response_times.update(&j.name, finish);

        if j.exceeds_deadline(finish.end) {
            debug!(job = %j.name, latest_finish = %finish.end, deadline = %j.deadline, "deadline miss");
            if self.config.early_exit && self.abort.is_none() {
                self.abort = Some(AbortReason::DeadlineMiss {
                    job: j.name.clone(),
                });
            }
        }
    }

    fn dispatch_label(&self, job: JobIndex, finish: Interval<T>) -> String {
        let j = self.jobs.get(job);
        format!(
            "{}\\nDL={}\\nES={}\\nLS={}\\nEF={}\\nLF={}",
            j.name,
            j.deadline,
            finish.start.saturating_sub(j.least_cost()),
            finish.end.saturating_sub(j.maximal_cost()),
            finish.start,
            finish.end
        )
    }

    /// Close the eligible successors under interference. Gives up when the
    /// closure would pull in a job whose predecessors are still pending
    /// outside the set, when the set stays trivial, or when a member may
    /// miss its deadline.
    fn reduce(&self, state: &State<T>, successors: &[JobIndex]) -> Option<ReducedDispatch<T>> {
        let mut set = ReductionSet::new(&self.jobs, state.availability, successors);

        loop {
            let busy = set.latest_busy_time();
            let idle = set.latest_idle_time();
            let first_release = set.first_latest_arrival();
            let lowest = set.lowest_priority_member().map(|m| self.jobs.get(m));

            let interfering = self.by_earliest_arrival.iter().copied().find(|&j| {
                if state.is_dispatched(j) || set.contains(j) {
                    return false;
                }
                let job = self.jobs.get(j);
                let release = job.earliest_arrival();
                release < busy
                    && (lowest.is_some_and(|m| job.higher_priority_than(m))
                        || idle.is_some_and(|t| release <= t)
                        || first_release.is_some_and(|t| release < t))
            });

            let Some(job) = interfering else {
                break;
            };
            let ready = self
                .jobs
                .predecessors_of(job)
                .iter()
                .all(|p| state.is_dispatched(*p) || set.contains(*p));
            if !ready {
                debug!(job = %self.jobs.get(job).name, "interfering job not ready; no reduction");
                return None;
            }
            set.add_job(job);
        }

        if set.len() < 2 || set.has_potential_deadline_misses() {
            return None;
        }

        let finish_times = set
            .members()
            .iter()
            .map(|&j| {
                let job = self.jobs.get(j);
                let earliest = self.next_earliest_start_time(state, j).saturating_add(job.least_cost());
                let latest = set
                    .latest_start_time(j)
                    .unwrap_or(T::INFINITY)
                    .saturating_add(job.maximal_cost());
                (j, Interval::new(earliest, maximum(earliest, latest)))
            })
            .collect();

        let earliest = set.earliest_finish_time();
        Some(ReducedDispatch {
            members: set.members().to_vec(),
            availability: Interval::new(earliest, maximum(earliest, set.latest_busy_time())),
            finish_times,
        })
    }

    /// Dispatch a whole reduction set as one transition.
    fn dispatch_reduced(&mut self, parent: &State<T>, reduced: ReducedDispatch<T>) -> Result<()> {
        let mut scheduled = parent.scheduled.clone();
        scheduled.extend(reduced.members.iter().copied());
        let pending_release = self.earliest_pending_release(&scheduled);

        let names: Vec<&str> = reduced
            .members
            .iter()
            .map(|&j| self.jobs.get(j).name.as_str())
            .collect();
        let label = format!(
            "{{{}}}\\nEF={}\\nLF={}",
            names.join(", "),
            reduced.availability.start,
            reduced.availability.end
        );
        debug!(jobs = %names.join(", "), availability = %reduced.availability, "dispatch reduction set");

        self.add_successor(parent, reduced.availability, scheduled, pending_release, label)?;
        self.reduced_transitions += 1;
        for (job, finish) in reduced.finish_times {
            self.record_finish(job, finish);
        }
        Ok(())
    }
}

fn vertex_of<T: Time>(state: &State<T>) -> Result<VertexId> {
    state.vertex.ok_or_else(|| {
        SagError::Other(anyhow::anyhow!("state '{}' is not in the graph", state.name()))
    })
}
