// src/dag/mod.rs

//! State graph of the exploration.
//!
//! [`graph`] records which state led to which via which dispatch, independent
//! of the state payload, and exports it for visualisation.

pub mod graph;

pub use graph::{StateGraph, Vertex, VertexId};
