// src/dag/graph.rs

use petgraph::Direction;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

/// Opaque handle of a vertex in the [`StateGraph`].
pub type VertexId = NodeIndex;

/// Vertex payload: the owning state's name plus its display label.
#[derive(Debug, Clone)]
pub struct Vertex {
    pub name: String,
    pub label: String,
}

/// Provenance of the exploration: which state led to which, via which job.
///
/// Edges are only ever added from an existing frontier vertex to a newly
/// created or merged one, so the graph stays acyclic.
#[derive(Debug, Clone, Default)]
pub struct StateGraph {
    graph: DiGraph<Vertex, String>,
}

impl StateGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
        }
    }

    pub fn add_vertex(&mut self, name: impl Into<String>, label: impl Into<String>) -> VertexId {
        self.graph.add_node(Vertex {
            name: name.into(),
            label: label.into(),
        })
    }

    pub fn add_edge(&mut self, from: VertexId, to: VertexId, label: impl Into<String>) -> EdgeIndex {
        self.graph.add_edge(from, to, label.into())
    }

    /// Replace a vertex label in place (after a merge widened the state).
    pub fn update_vertex_label(&mut self, id: VertexId, label: impl Into<String>) {
        if let Some(vertex) = self.graph.node_weight_mut(id) {
            vertex.label = label.into();
        }
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.graph.node_weight(id)
    }

    /// Vertices without outgoing edges, in insertion order.
    pub fn leaves(&self) -> Vec<VertexId> {
        self.graph.externals(Direction::Outgoing).collect()
    }

    pub fn is_leaf(&self, id: VertexId) -> bool {
        self.graph
            .neighbors_directed(id, Direction::Outgoing)
            .next()
            .is_none()
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Labels of the edges leaving `id`.
    pub fn outgoing_labels(&self, id: VertexId) -> Vec<&str> {
        self.graph
            .edges_directed(id, Direction::Outgoing)
            .map(|e| e.weight().as_str())
            .collect()
    }

    /// Names of the direct successors of `id`.
    pub fn successors(&self, id: VertexId) -> Vec<&str> {
        self.graph
            .neighbors_directed(id, Direction::Outgoing)
            .filter_map(|n| self.graph.node_weight(n))
            .map(|v| v.name.as_str())
            .collect()
    }

    /// Graphviz rendering; labels use `\n` escapes for line breaks.
    pub fn to_dot(&self) -> String {
        let dot = Dot::with_attr_getters(
            &self.graph,
            &[Config::EdgeNoLabel, Config::NodeNoLabel],
            &|_, edge| format!("label=\"{}\"", edge.weight()),
            &|_, (_, vertex)| format!("label=\"{}\"", vertex.label),
        );
        format!("{dot:?}")
    }
}
