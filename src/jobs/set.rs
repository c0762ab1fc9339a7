// src/jobs/set.rs

//! Arena of jobs with derived orderings and precedence preprocessing.
//!
//! Jobs are stored once, in workload order. Every sorted view is a
//! permutation of [`JobIndex`] values into that arena.

use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::debug;

use crate::errors::{Result, SagError};
use crate::jobs::job::{Job, JobIndex};
use crate::time::{Time, maximum};

/// Orderings the explorer and reduction sets consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOrder {
    EarliestArrival,
    LatestArrival,
    Deadline,
    Priority,
    MaximalCost,
}

#[derive(Debug, Clone)]
pub struct JobSet<T> {
    jobs: Vec<Job<T>>,
    by_name: HashMap<String, JobIndex>,
    /// Resolved `predecessors` of each job; filled by [`JobSet::resolve_precedence`].
    predecessors: Vec<Vec<JobIndex>>,
    successors: Vec<Vec<JobIndex>>,
}

impl<T: Time> Default for JobSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Time> JobSet<T> {
    pub fn new() -> Self {
        Self {
            jobs: Vec::new(),
            by_name: HashMap::new(),
            predecessors: Vec::new(),
            successors: Vec::new(),
        }
    }

    pub fn from_jobs(jobs: impl IntoIterator<Item = Job<T>>) -> Result<Self> {
        let mut set = Self::new();
        for job in jobs {
            set.push(job)?;
        }
        Ok(set)
    }

    /// Append a job; names must be unique.
    pub fn push(&mut self, job: Job<T>) -> Result<JobIndex> {
        if !job.arrival.is_well_formed() || !job.cost.is_well_formed() {
            return Err(SagError::InvalidJob(format!(
                "{}: malformed arrival {} or cost {}",
                job.name, job.arrival, job.cost
            )));
        }
        if self.by_name.contains_key(&job.name) {
            return Err(SagError::DuplicateJob(job.name));
        }

        let index = self.jobs.len();
        self.by_name.insert(job.name.clone(), index);
        self.jobs.push(job);
        self.predecessors.push(Vec::new());
        self.successors.push(Vec::new());
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn get(&self, index: JobIndex) -> &Job<T> {
        &self.jobs[index]
    }

    pub fn index_of(&self, name: &str) -> Option<JobIndex> {
        self.by_name.get(name).copied()
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Job<T>> {
        self.index_of(name).map(|i| &self.jobs[i])
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Jobs in workload order.
    pub fn iter(&self) -> impl Iterator<Item = (JobIndex, &Job<T>)> {
        self.jobs.iter().enumerate()
    }

    pub fn has_precedence(&self) -> bool {
        self.jobs.iter().any(|j| !j.predecessors.is_empty())
    }

    /// Record that `predecessor` must complete before `job` may start.
    pub fn add_predecessor(&mut self, job: &str, predecessor: &str) -> Result<()> {
        let index = self
            .index_of(job)
            .ok_or_else(|| SagError::UnknownJob(job.to_string()))?;
        if !self.contains_name(predecessor) {
            return Err(SagError::MissingPredecessor {
                job: job.to_string(),
                predecessor: predecessor.to_string(),
            });
        }
        self.jobs[index].add_predecessor(predecessor);
        Ok(())
    }

    /// Direct predecessors (valid after [`JobSet::resolve_precedence`]).
    pub fn predecessors_of(&self, index: JobIndex) -> &[JobIndex] {
        &self.predecessors[index]
    }

    /// Direct successors (valid after [`JobSet::resolve_precedence`]).
    pub fn successors_of(&self, index: JobIndex) -> &[JobIndex] {
        &self.successors[index]
    }

    /// Turn predecessor names into index links.
    pub fn resolve_precedence(&mut self) -> Result<()> {
        let mut predecessors = vec![Vec::new(); self.jobs.len()];
        let mut successors = vec![Vec::new(); self.jobs.len()];

        for (index, job) in self.jobs.iter().enumerate() {
            for name in &job.predecessors {
                let pred = self.by_name.get(name).copied().ok_or_else(|| {
                    SagError::MissingPredecessor {
                        job: job.name.clone(),
                        predecessor: name.clone(),
                    }
                })?;
                if pred == index {
                    return Err(SagError::PrecedenceCycle(format!(
                        "job '{}' cannot precede itself",
                        job.name
                    )));
                }
                predecessors[index].push(pred);
                successors[pred].push(index);
            }
        }

        self.predecessors = predecessors;
        self.successors = successors;
        Ok(())
    }

    /// Stable sorted view of the arena.
    pub fn sorted(&self, order: JobOrder) -> Vec<JobIndex> {
        let mut view: Vec<JobIndex> = (0..self.jobs.len()).collect();
        let jobs = &self.jobs;
        match order {
            JobOrder::EarliestArrival => view.sort_by(|&a, &b| {
                jobs[a]
                    .earliest_arrival()
                    .total_cmp(&jobs[b].earliest_arrival())
                    .then_with(|| jobs[a].name.cmp(&jobs[b].name))
            }),
            JobOrder::LatestArrival => view.sort_by(|&a, &b| {
                jobs[a]
                    .latest_arrival()
                    .total_cmp(&jobs[b].latest_arrival())
                    .then_with(|| jobs[a].name.cmp(&jobs[b].name))
            }),
            JobOrder::Deadline => {
                view.sort_by(|&a, &b| jobs[a].deadline.total_cmp(&jobs[b].deadline))
            }
            JobOrder::Priority => view.sort_by(|&a, &b| {
                if jobs[a].higher_priority_than(&jobs[b]) {
                    Ordering::Less
                } else if jobs[b].higher_priority_than(&jobs[a]) {
                    Ordering::Greater
                } else {
                    Ordering::Equal
                }
            }),
            JobOrder::MaximalCost => view
                .sort_by(|&a, &b| jobs[a].maximal_cost().total_cmp(&jobs[b].maximal_cost())),
        }
        view
    }

    /// Fail on a cycle in the precedence relation.
    fn check_acyclic(&self) -> Result<()> {
        let mut graph: DiGraphMap<JobIndex, ()> = DiGraphMap::new();
        for index in 0..self.jobs.len() {
            graph.add_node(index);
        }
        for (index, preds) in self.predecessors.iter().enumerate() {
            for &pred in preds {
                graph.add_edge(pred, index, ());
            }
        }

        match toposort(&graph, None) {
            Ok(_) => Ok(()),
            Err(cycle) => Err(SagError::PrecedenceCycle(format!(
                "cycle detected in precedence graph involving job '{}'",
                self.jobs[cycle.node_id()].name
            ))),
        }
    }

    /// Order in which every job appears after all of its predecessors.
    ///
    /// Jobs without predecessors keep workload order; the rest are emitted
    /// from a queue as soon as their predecessors are out.
    pub fn topological_order(&self) -> Result<Vec<JobIndex>> {
        // toposort's DFS order is not stable in workload order, hence the queue
        self.check_acyclic()?;

        let mut emitted = vec![false; self.jobs.len()];
        let mut order = Vec::with_capacity(self.jobs.len());
        let mut pending = VecDeque::new();

        for index in 0..self.jobs.len() {
            if self.predecessors[index].is_empty() {
                emitted[index] = true;
                order.push(index);
            } else {
                pending.push_back(index);
            }
        }

        // acyclic, so every requeued job eventually becomes ready
        while let Some(index) = pending.pop_front() {
            if self.predecessors[index].iter().all(|&p| emitted[p]) {
                emitted[index] = true;
                order.push(index);
            } else {
                pending.push_back(index);
            }
        }

        Ok(order)
    }

    /// Resolve precedence, then push every job's arrival window no earlier
    /// than its predecessors' windows. Returns the topological order used.
    pub fn preprocess(&mut self) -> Result<Vec<JobIndex>> {
        self.resolve_precedence()?;
        let order = self.topological_order()?;

        if !self.has_precedence() {
            return Ok(order);
        }

        for &index in &order {
            let mut earliest = self.jobs[index].earliest_arrival();
            let mut latest = self.jobs[index].latest_arrival();
            for &pred in &self.predecessors[index] {
                earliest = maximum(earliest, self.jobs[pred].earliest_arrival());
                latest = maximum(latest, self.jobs[pred].latest_arrival());
            }

            let job = &mut self.jobs[index];
            if job.arrival.start != earliest || job.arrival.end != latest {
                debug!(
                    job = %job.name,
                    from = %job.arrival,
                    "arrival window adjusted for predecessors"
                );
            }
            job.arrival.start = earliest;
            job.arrival.end = latest;
        }

        Ok(order)
    }
}
