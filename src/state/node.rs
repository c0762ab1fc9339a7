// src/state/node.rs

//! The abstract scheduling state carried by each graph vertex.

use std::collections::BTreeSet;
use std::fmt;

use crate::dag::VertexId;
use crate::interval::Interval;
use crate::jobs::{JobIndex, JobSet};
use crate::time::{self, Time};

/// Set of dispatched jobs; ordering on the path is not retained.
pub type ScheduledJobs = BTreeSet<JobIndex>;

/// Sound over-approximation of every concrete partial schedule that has
/// dispatched exactly `scheduled`.
#[derive(Debug, Clone, PartialEq)]
pub struct State<T> {
    /// Monotonic creation counter; the state's name is derived from it.
    pub index: usize,
    /// Range of times at which the processor becomes free.
    pub availability: Interval<T>,
    pub scheduled: ScheduledJobs,
    /// Earliest arrival among jobs not in `scheduled` (`INFINITY` if none).
    pub earliest_pending_release: T,
    /// Vertex of this state in the exploration graph, once registered.
    pub vertex: Option<VertexId>,
}

impl<T: Time> State<T> {
    pub fn new(
        index: usize,
        availability: Interval<T>,
        scheduled: ScheduledJobs,
        earliest_pending_release: T,
    ) -> Self {
        Self {
            index,
            availability,
            scheduled,
            earliest_pending_release,
            vertex: None,
        }
    }

    /// The unique starting state: nothing dispatched, processor free at 0.
    pub fn root() -> Self {
        Self::new(0, Interval::point(T::ZERO), ScheduledJobs::new(), T::ZERO)
    }

    pub fn name(&self) -> String {
        format!("S{}", self.index)
    }

    pub fn is_dispatched(&self, job: JobIndex) -> bool {
        self.scheduled.contains(&job)
    }

    /// Graph label: name, availability and earliest pending release.
    pub fn label(&self) -> String {
        format!(
            "{}: {}\\nER={}",
            self.name(),
            self.availability,
            time::display(self.earliest_pending_release)
        )
    }

    /// Merging is only lossless enough when availabilities overlap.
    pub fn can_merge(&self, other: &State<T>) -> bool {
        self.scheduled == other.scheduled && self.availability.intersects(&other.availability)
    }

    /// Widen this state's availability to cover `other`'s.
    pub fn merge(&mut self, other: &State<T>) {
        self.availability = self.availability.widen(&other.availability);
    }

    /// Names of the dispatched jobs, in workload order.
    pub fn describe_jobs(&self, jobs: &JobSet<T>) -> String {
        self.scheduled
            .iter()
            .map(|&j| jobs.get(j).name.as_str())
            .collect::<Vec<_>>()
            .join(" - ")
    }
}

impl<T: Time> fmt::Display for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {:?} ER={}",
            self.name(),
            self.availability,
            self.scheduled,
            time::display(self.earliest_pending_release)
        )
    }
}
