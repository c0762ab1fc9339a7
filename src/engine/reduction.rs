// src/engine/reduction.rs

//! Reduction sets: bounds on how long the next dispatches from one state can
//! be delayed, used for partial-order reduction and early deadline-miss
//! detection.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::interval::Interval;
use crate::jobs::{JobIndex, JobSet};
use crate::time::{Time, maximum, minimum};

/// Jobs considered together from one decision point, plus derived bounds.
///
/// All derived quantities are recomputed on [`ReductionSet::add_job`].
#[derive(Debug, Clone)]
pub struct ReductionSet<'a, T> {
    jobs: &'a JobSet<T>,
    availability: Interval<T>,
    members: Vec<JobIndex>,
    by_earliest_arrival: Vec<JobIndex>,
    by_latest_arrival: Vec<JobIndex>,
    /// Worst-case cost, largest first.
    by_maximal_cost: Vec<JobIndex>,
    latest_busy_time: T,
    latest_idle_time: Option<T>,
    latest_start_times: HashMap<JobIndex, T>,
    lowest_priority_member: Option<JobIndex>,
    num_interfering_jobs_added: usize,
}

impl<'a, T: Time> ReductionSet<'a, T> {
    pub fn new(jobs: &'a JobSet<T>, availability: Interval<T>, members: &[JobIndex]) -> Self {
        let mut set = Self {
            jobs,
            availability,
            members: members.to_vec(),
            by_earliest_arrival: Vec::new(),
            by_latest_arrival: Vec::new(),
            by_maximal_cost: Vec::new(),
            latest_busy_time: T::ZERO,
            latest_idle_time: None,
            latest_start_times: HashMap::new(),
            lowest_priority_member: None,
            num_interfering_jobs_added: 0,
        };
        set.recompute();
        set
    }

    /// Grow the set by one interfering job.
    pub fn add_job(&mut self, job: JobIndex) {
        if self.members.contains(&job) {
            return;
        }
        self.members.push(job);
        self.num_interfering_jobs_added += 1;
        self.recompute();
    }

    pub fn members(&self) -> &[JobIndex] {
        &self.members
    }

    pub fn contains(&self, job: JobIndex) -> bool {
        self.members.contains(&job)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn latest_busy_time(&self) -> T {
        self.latest_busy_time
    }

    /// Latest instant the processor may idle before the set completes,
    /// `None` if no such gap exists.
    pub fn latest_idle_time(&self) -> Option<T> {
        self.latest_idle_time
    }

    pub fn latest_start_time(&self, job: JobIndex) -> Option<T> {
        self.latest_start_times.get(&job).copied()
    }

    /// Member every other member outranks, under the full priority order
    /// including the task and job ID tie-break.
    pub fn lowest_priority_member(&self) -> Option<JobIndex> {
        self.lowest_priority_member
    }

    pub fn num_interfering_jobs_added(&self) -> usize {
        self.num_interfering_jobs_added
    }

    /// Smallest latest arrival among the members.
    pub fn first_latest_arrival(&self) -> Option<T> {
        self.by_latest_arrival
            .first()
            .map(|&j| self.jobs.get(j).latest_arrival())
    }

    /// Best-case time by which every member has completed.
    pub fn earliest_finish_time(&self) -> T {
        let mut t = self.availability.start;
        for &j in &self.by_earliest_arrival {
            let job = self.jobs.get(j);
            t = maximum(t, job.earliest_arrival()).saturating_add(job.least_cost());
        }
        t
    }

    /// True if some member may finish past its deadline.
    pub fn has_potential_deadline_misses(&self) -> bool {
        self.members.iter().any(|&j| {
            let job = self.jobs.get(j);
            let lst = self.latest_start_times.get(&j).copied().unwrap_or(T::INFINITY);
            let missed = job.exceeds_deadline(lst.saturating_add(job.maximal_cost()));
            if missed {
                debug!(
                    job = %job.name,
                    latest_start = %lst,
                    deadline = %job.deadline,
                    "reduction set member may miss its deadline"
                );
            }
            missed
        })
    }

    fn recompute(&mut self) {
        let jobs = self.jobs;

        self.by_earliest_arrival = self.members.clone();
        self.by_earliest_arrival.sort_by(|&a, &b| {
            jobs.get(a)
                .earliest_arrival()
                .total_cmp(&jobs.get(b).earliest_arrival())
                .then_with(|| jobs.get(a).name.cmp(&jobs.get(b).name))
        });

        self.by_latest_arrival = self.members.clone();
        self.by_latest_arrival.sort_by(|&a, &b| {
            jobs.get(a)
                .latest_arrival()
                .total_cmp(&jobs.get(b).latest_arrival())
                .then_with(|| jobs.get(a).name.cmp(&jobs.get(b).name))
        });

        self.by_maximal_cost = self.members.clone();
        self.by_maximal_cost.sort_by(|&a, &b| {
            jobs.get(b)
                .maximal_cost()
                .total_cmp(&jobs.get(a).maximal_cost())
        });

        self.latest_busy_time = self.compute_latest_busy_time();
        self.latest_idle_time = self.compute_latest_idle_time();
        self.latest_start_times = self.compute_latest_start_times();
        self.lowest_priority_member = self.compute_lowest_priority_member();
    }

    fn compute_latest_busy_time(&self) -> T {
        let mut t = self.availability.end;
        for &j in &self.by_latest_arrival {
            let job = self.jobs.get(j);
            t = maximum(t, job.latest_arrival()).saturating_add(job.maximal_cost());
        }
        t
    }

    fn compute_latest_idle_time(&self) -> Option<T> {
        let mut idle_job: Option<JobIndex> = None;

        for &i in &self.by_latest_arrival {
            let release = self.jobs.get(i).latest_arrival();
            if release <= self.availability.start {
                continue;
            }

            // best-case sweep over everything certainly released before `i`
            let mut t = self.availability.start;
            for &j in &self.by_earliest_arrival {
                let job = self.jobs.get(j);
                if job.latest_arrival() < release {
                    t = maximum(t, job.earliest_arrival()).saturating_add(job.least_cost());
                }
                if t >= release {
                    break;
                }
            }

            if t < release
                && idle_job.is_none_or(|k| release > self.jobs.get(k).latest_arrival())
            {
                idle_job = Some(i);
            }
        }

        let idle_job = idle_job?;
        let first = *self.by_latest_arrival.first()?;
        let release = self.jobs.get(idle_job).latest_arrival();
        if release == self.jobs.get(first).latest_arrival() {
            return None;
        }
        Some(release.saturating_sub(T::EPSILON))
    }

    /// Each member's priority, lowered to the lowest priority among its
    /// predecessors inside the set.
    fn effective_priorities(&self) -> HashMap<JobIndex, T> {
        let members: HashSet<JobIndex> = self.members.iter().copied().collect();
        let mut priorities: HashMap<JobIndex, T> = self
            .members
            .iter()
            .map(|&j| (j, self.jobs.get(j).priority))
            .collect();

        // acyclic, so this settles within |members| passes
        for _ in 0..self.members.len() {
            let mut changed = false;
            for &j in &self.members {
                let mut p = priorities[&j];
                for pred in self.jobs.predecessors_of(j) {
                    if members.contains(pred) {
                        p = maximum(p, priorities[pred]);
                    }
                }
                if p != priorities[&j] {
                    priorities.insert(j, p);
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
        priorities
    }

    fn compute_latest_start_times(&self) -> HashMap<JobIndex, T> {
        let priorities = self.effective_priorities();
        self.members
            .iter()
            .map(|&j| {
                let blocking_bound = self.blocking_aware_bound(j, &priorities);
                let busy_bound = self.busy_window_bound(j);
                (j, minimum(blocking_bound, busy_bound))
            })
            .collect()
    }

    /// Latest start of `i` given one lower-priority blocker and every
    /// member that outranks it and is released before it starts.
    fn blocking_aware_bound(&self, i: JobIndex, priorities: &HashMap<JobIndex, T>) -> T {
        let job = self.jobs.get(i);

        let blocker = self.by_maximal_cost.iter().copied().find(|&j| {
            j != i
                && self.outranks(i, j, priorities)
                && maximum(self.availability.start, self.jobs.get(j).earliest_arrival())
                    < job.latest_arrival()
        });
        let blocking_time = blocker
            .map(|b| maximum(T::ZERO, self.jobs.get(b).maximal_cost().saturating_sub(T::EPSILON)))
            .unwrap_or(T::ZERO);

        let mut latest_start = maximum(
            self.availability.end,
            job.latest_arrival().saturating_add(blocking_time),
        );

        for &j in &self.by_earliest_arrival {
            if j == i {
                continue;
            }
            let other = self.jobs.get(j);
            if other.earliest_arrival() > latest_start {
                break;
            }
            if self.outranks(j, i, priorities) {
                latest_start = latest_start.saturating_add(other.maximal_cost());
            }
        }
        latest_start
    }

    /// Latest start of `i` such that it and all its descendants in the set
    /// still fit before the latest busy time.
    fn busy_window_bound(&self, i: JobIndex) -> T {
        let descendant_cost = self
            .descendants(i)
            .into_iter()
            .fold(T::ZERO, |acc, d| acc.saturating_add(self.jobs.get(d).maximal_cost()));

        self.latest_busy_time
            .saturating_sub(descendant_cost)
            .saturating_sub(self.jobs.get(i).maximal_cost())
    }

    /// Transitive successors of `i` that are members of this set.
    fn descendants(&self, i: JobIndex) -> Vec<JobIndex> {
        let mut found = Vec::new();
        let mut seen = HashSet::new();
        let mut stack = vec![i];

        while let Some(current) = stack.pop() {
            for &succ in self.jobs.successors_of(current) {
                if self.members.contains(&succ) && seen.insert(succ) {
                    found.push(succ);
                    stack.push(succ);
                }
            }
        }
        found
    }

    /// `a` beats `b` on effective priority, ties broken by task then job ID.
    fn outranks(&self, a: JobIndex, b: JobIndex, priorities: &HashMap<JobIndex, T>) -> bool {
        match priorities[&a].total_cmp(&priorities[&b]) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => {
                let (ja, jb) = (self.jobs.get(a), self.jobs.get(b));
                (ja.task_id, ja.job_id) < (jb.task_id, jb.job_id)
            }
        }
    }

    fn compute_lowest_priority_member(&self) -> Option<JobIndex> {
        self.members.iter().copied().reduce(|lowest, j| {
            if self.jobs.get(lowest).higher_priority_than(self.jobs.get(j)) {
                j
            } else {
                lowest
            }
        })
    }
}
