// src/jobs/job.rs

//! Static per-job descriptor.

use std::cmp::Ordering;
use std::fmt;

use crate::errors::{Result, SagError};
use crate::interval::Interval;
use crate::time::Time;

/// Position of a job inside its [`crate::jobs::JobSet`] arena.
pub type JobIndex = usize;

/// One instance of recurring work with uncertain release and execution time.
#[derive(Debug, Clone, PartialEq)]
pub struct Job<T> {
    /// Unique `J{task},{job}` name.
    pub name: String,
    pub task_id: u32,
    pub job_id: u32,
    /// Earliest and latest release.
    pub arrival: Interval<T>,
    /// Best- and worst-case execution time.
    pub cost: Interval<T>,
    pub deadline: T,
    /// Lower value means higher priority.
    pub priority: T,
    /// Names of jobs that must complete before this one may start.
    pub predecessors: Vec<String>,
}

impl<T: Time> Job<T> {
    pub fn new(
        task_id: u32,
        job_id: u32,
        arrival: (T, T),
        cost: (T, T),
        deadline: T,
        priority: T,
    ) -> Result<Self> {
        let name = Self::name_for(task_id, job_id);
        let arrival = Interval::try_new(arrival.0, arrival.1).ok_or_else(|| {
            SagError::InvalidJob(format!(
                "{name}: arrival min {} exceeds arrival max {}",
                arrival.0, arrival.1
            ))
        })?;
        let cost = Interval::try_new(cost.0, cost.1).ok_or_else(|| {
            SagError::InvalidJob(format!(
                "{name}: cost min {} exceeds cost max {}",
                cost.0, cost.1
            ))
        })?;

        Ok(Self {
            name,
            task_id,
            job_id,
            arrival,
            cost,
            deadline,
            priority,
            predecessors: Vec::new(),
        })
    }

    pub fn name_for(task_id: u32, job_id: u32) -> String {
        format!("J{task_id},{job_id}")
    }

    pub fn earliest_arrival(&self) -> T {
        self.arrival.start
    }

    pub fn latest_arrival(&self) -> T {
        self.arrival.end
    }

    pub fn least_cost(&self) -> T {
        self.cost.start
    }

    pub fn maximal_cost(&self) -> T {
        self.cost.end
    }

    /// Fixed-priority order: lower priority value wins, then lower task ID,
    /// then lower job ID.
    pub fn higher_priority_than(&self, other: &Job<T>) -> bool {
        match self.priority.total_cmp(&other.priority) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => (self.task_id, self.job_id) < (other.task_id, other.job_id),
        }
    }

    pub fn exceeds_deadline(&self, now: T) -> bool {
        self.deadline < now && now.saturating_sub(self.deadline) > T::DEADLINE_MISS_TOLERANCE
    }

    pub fn add_predecessor(&mut self, predecessor: impl Into<String>) {
        let predecessor = predecessor.into();
        if !self.predecessors.contains(&predecessor) {
            self.predecessors.push(predecessor);
        }
    }
}

impl<T: Time> fmt::Display for Job<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{:?}",
            self.name, self.arrival, self.cost, self.deadline, self.priority, self.predecessors
        )
    }
}
