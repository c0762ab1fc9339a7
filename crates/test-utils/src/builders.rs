#![allow(dead_code)]

use npsag::jobs::{Job, JobSet};
use npsag::time::Time;

/// Builder for a single `Job`.
///
/// Defaults: released at 0, unit cost, deadline 100, priority 0.
pub struct JobBuilder<T> {
    task_id: u32,
    job_id: u32,
    arrival: (T, T),
    cost: (T, T),
    deadline: T,
    priority: T,
    predecessors: Vec<(u32, u32)>,
}

impl JobBuilder<i64> {
    pub fn new(task_id: u32, job_id: u32) -> Self {
        Self {
            task_id,
            job_id,
            arrival: (0, 0),
            cost: (1, 1),
            deadline: 100,
            priority: 0,
            predecessors: Vec::new(),
        }
    }
}

impl JobBuilder<f64> {
    pub fn dense(task_id: u32, job_id: u32) -> Self {
        Self {
            task_id,
            job_id,
            arrival: (0.0, 0.0),
            cost: (1.0, 1.0),
            deadline: 100.0,
            priority: 0.0,
            predecessors: Vec::new(),
        }
    }
}

impl<T: Time> JobBuilder<T> {
    pub fn arrival(mut self, min: T, max: T) -> Self {
        self.arrival = (min, max);
        self
    }

    /// Both arrival bounds at `t`.
    pub fn released_at(self, t: T) -> Self {
        self.arrival(t, t)
    }

    pub fn cost(mut self, min: T, max: T) -> Self {
        self.cost = (min, max);
        self
    }

    pub fn deadline(mut self, deadline: T) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn priority(mut self, priority: T) -> Self {
        self.priority = priority;
        self
    }

    pub fn after(mut self, task_id: u32, job_id: u32) -> Self {
        self.predecessors.push((task_id, job_id));
        self
    }

    pub fn build(self) -> Job<T> {
        let mut job = Job::new(
            self.task_id,
            self.job_id,
            self.arrival,
            self.cost,
            self.deadline,
            self.priority,
        )
        .expect("Failed to build valid job from builder");
        for (task, id) in self.predecessors {
            job.add_predecessor(Job::<T>::name_for(task, id));
        }
        job
    }
}

/// Builder for a `JobSet`, in insertion (workload) order.
pub struct JobSetBuilder<T> {
    jobs: Vec<Job<T>>,
}

impl<T: Time> JobSetBuilder<T> {
    pub fn new() -> Self {
        Self { jobs: Vec::new() }
    }

    pub fn with_job(mut self, job: JobBuilder<T>) -> Self {
        self.jobs.push(job.build());
        self
    }

    pub fn build(self) -> JobSet<T> {
        JobSet::from_jobs(self.jobs).expect("Failed to build valid job set from builder")
    }
}

impl<T: Time> Default for JobSetBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
