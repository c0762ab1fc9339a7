// src/state/mod.rs

//! Scheduling states and their registry.
//!
//! - [`node`] defines the abstract [`State`] and the merge operation.
//! - [`storage`] registers states by name and finds merge candidates.

pub mod node;
pub mod storage;

pub use node::{ScheduledJobs, State};
pub use storage::{StateId, StateStorage};
