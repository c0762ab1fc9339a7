// src/state/storage.rs

//! Arena of states keyed by creation position, with a name index for
//! uniqueness and a job-set index for merge-candidate lookup.

use std::collections::HashMap;

use crate::errors::{Result, SagError};
use crate::state::node::{ScheduledJobs, State};
use crate::time::Time;

/// Stable handle of a state; never invalidated by a merge.
pub type StateId = usize;

#[derive(Debug, Clone, Default)]
pub struct StateStorage<T> {
    states: Vec<State<T>>,
    by_name: HashMap<String, StateId>,
    by_jobs: HashMap<ScheduledJobs, Vec<StateId>>,
}

impl<T: Time> StateStorage<T> {
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            by_name: HashMap::new(),
            by_jobs: HashMap::new(),
        }
    }

    /// Register a state. A name collision is an internal consistency failure.
    pub fn insert(&mut self, state: State<T>) -> Result<StateId> {
        let name = state.name();
        if self.by_name.contains_key(&name) {
            return Err(SagError::DuplicateState(name));
        }

        let id = self.states.len();
        self.by_name.insert(name, id);
        self.by_jobs
            .entry(state.scheduled.clone())
            .or_default()
            .push(id);
        self.states.push(state);
        Ok(id)
    }

    pub fn get(&self, id: StateId) -> Option<&State<T>> {
        self.states.get(id)
    }

    /// Mutable access for in-place merging. The scheduled set must not change.
    pub fn get_mut(&mut self, id: StateId) -> Option<&mut State<T>> {
        self.states.get_mut(id)
    }

    pub fn id_of(&self, name: &str) -> Option<StateId> {
        self.by_name.get(name).copied()
    }

    pub fn get_by_name(&self, name: &str) -> Option<&State<T>> {
        self.id_of(name).and_then(|id| self.states.get(id))
    }

    /// States whose scheduled set equals `jobs`, oldest first.
    pub fn with_same_jobs(&self, jobs: &ScheduledJobs) -> &[StateId] {
        self.by_jobs.get(jobs).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StateId, &State<T>)> {
        self.states.iter().enumerate()
    }
}
