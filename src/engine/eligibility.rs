// src/engine/eligibility.rs

//! Rules deciding which job may be dispatched next from a state, and the
//! timing bounds of such a dispatch.

use tracing::debug;

use crate::engine::context::ExplorationContext;
use crate::interval::Interval;
use crate::jobs::JobIndex;
use crate::state::{ScheduledJobs, State};
use crate::time::{Time, maximum, minimum};

impl<T: Time> ExplorationContext<T> {
    /// All predecessors of `job` are already dispatched in `state`.
    pub fn is_ready(&self, state: &State<T>, job: JobIndex) -> bool {
        self.jobs
            .predecessors_of(job)
            .iter()
            .all(|p| state.is_dispatched(*p))
    }

    /// Earliest time `job` could start from `state`.
    pub fn next_earliest_start_time(&self, state: &State<T>, job: JobIndex) -> T {
        maximum(state.availability.start, self.jobs.get(job).earliest_arrival())
    }

    /// Jobs that could legally be dispatched next from `state`, in
    /// earliest-arrival order.
    pub fn eligible_successors(&self, state: &State<T>) -> Vec<JobIndex> {
        let own_latest_start = maximum(
            self.next_eligible_job_ready(state),
            state.availability.end,
        );
        debug!(
            state = %state.name(),
            ts_min = %state.availability.start,
            rel_min = %state.earliest_pending_release,
            t_l = %own_latest_start,
            "looking for eligible successors"
        );

        let mut successors = Vec::new();
        for &j in &self.by_earliest_arrival {
            let job = self.jobs.get(j);
            if job.earliest_arrival() < state.earliest_pending_release || state.is_dispatched(j) {
                continue;
            }
            if job.earliest_arrival() > own_latest_start {
                break;
            }
            if self.is_eligible_successor(state, j) {
                debug!(job = %job.name, "can be next");
                successors.push(j);
            }
        }
        successors
    }

    pub fn is_eligible_successor(&self, state: &State<T>, job: JobIndex) -> bool {
        let name = &self.jobs.get(job).name;

        if state.is_dispatched(job) {
            debug!(job = %name, "already complete");
            return false;
        }

        if !self.is_ready(state, job) {
            debug!(job = %name, "predecessors incomplete");
            return false;
        }

        let t_s = self.next_earliest_start_time(state, job);
        if !self.priority_eligible(state, job, t_s) {
            debug!(job = %name, "not priority eligible");
            return false;
        }

        if !self.potentially_next(state, job) {
            debug!(job = %name, "not potentially next");
            return false;
        }

        true
    }

    pub fn priority_eligible(&self, state: &State<T>, job: JobIndex, at: T) -> bool {
        !self.certainly_released_higher_priority_exists(state, job, at)
    }

    /// Some other ready job is released for sure by `at` and outranks `job`.
    fn certainly_released_higher_priority_exists(
        &self,
        state: &State<T>,
        job: JobIndex,
        at: T,
    ) -> bool {
        let reference = self.jobs.get(job);
        for &j in &self.by_latest_arrival {
            let other = self.jobs.get(j);
            if other.earliest_arrival() < state.earliest_pending_release {
                continue;
            }
            if other.latest_arrival() > at {
                break;
            }
            if state.is_dispatched(j) || j == job || !self.is_ready(state, j) {
                continue;
            }
            if other.higher_priority_than(reference) {
                debug!(job = %reference.name, other = %other.name, "found higher priority job");
                return true;
            }
        }
        false
    }

    /// Earliest latest-arrival among pending jobs that are priority eligible
    /// once certainly released: the processor cannot stay uncommitted past it.
    pub fn next_eligible_job_ready(&self, state: &State<T>) -> T {
        for &j in &self.by_latest_arrival {
            if state.is_dispatched(j) || !self.is_ready(state, j) {
                continue;
            }
            let job = self.jobs.get(j);
            let t = maximum(job.latest_arrival(), state.availability.end);
            if self.priority_eligible(state, j, t) {
                return job.latest_arrival();
            }
        }
        T::INFINITY
    }

    /// If the processor is certainly free before `job` can arrive, some other
    /// job certainly released earlier would be dispatched first.
    fn potentially_next(&self, state: &State<T>, job: JobIndex) -> bool {
        let earliest_arrival = self.jobs.get(job).earliest_arrival();
        if state.availability.end < earliest_arrival {
            let r = self.next_certain_job_release(state);
            if r < earliest_arrival {
                return false;
            }
        }
        true
    }

    fn next_certain_job_release(&self, state: &State<T>) -> T {
        for &j in &self.by_latest_arrival {
            let job = self.jobs.get(j);
            if job.latest_arrival() < state.availability.start {
                continue;
            }
            if state.is_dispatched(j) || !self.is_ready(state, j) {
                continue;
            }
            return job.latest_arrival();
        }
        T::INFINITY
    }

    fn next_certain_higher_priority_job_release(&self, state: &State<T>, job: JobIndex) -> T {
        let reference = self.jobs.get(job);
        for &j in &self.by_latest_arrival {
            let other = self.jobs.get(j);
            if other.latest_arrival() < state.availability.start {
                continue;
            }
            if state.is_dispatched(j) || !self.is_ready(state, j) {
                continue;
            }
            if other.higher_priority_than(reference) {
                return other.latest_arrival();
            }
        }
        T::INFINITY
    }

    /// Finish-time range of `job` when dispatched next from `state`.
    pub fn next_finish_times(&self, state: &State<T>, job: JobIndex) -> Interval<T> {
        let j = self.jobs.get(job);
        let earliest_finish = self
            .next_earliest_start_time(state, job)
            .saturating_add(j.least_cost());

        let own_latest_start = maximum(self.next_eligible_job_ready(state), state.availability.end);
        let other_latest_start = self
            .next_certain_higher_priority_job_release(state, job)
            .saturating_sub(T::EPSILON);
        let latest_start = minimum(own_latest_start, other_latest_start);
        debug!(
            job = %j.name,
            own_latest_start = %own_latest_start,
            other_latest_start = %other_latest_start,
            "latest start bounds"
        );

        let latest_finish = maximum(latest_start.saturating_add(j.maximal_cost()), earliest_finish);
        Interval::new(earliest_finish, latest_finish)
    }

    /// Earliest arrival among jobs outside `scheduled`.
    pub fn earliest_pending_release(&self, scheduled: &ScheduledJobs) -> T {
        self.by_earliest_arrival
            .iter()
            .find(|j| !scheduled.contains(j))
            .map(|&j| self.jobs.get(j).earliest_arrival())
            .unwrap_or(T::INFINITY)
    }
}
