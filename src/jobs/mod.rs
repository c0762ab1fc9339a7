// src/jobs/mod.rs

//! Job descriptors and the job-set arena.
//!
//! - [`job`] holds the immutable per-job descriptor and priority order.
//! - [`set`] owns all jobs of one workload, their sorted views and the
//!   precedence preprocessing pass.

pub mod job;
pub mod set;

pub use job::{Job, JobIndex};
pub use set::{JobOrder, JobSet};
