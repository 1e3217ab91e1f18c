//! In-memory interaction graph.
//!
//! Wraps a `petgraph::DiGraph` with an ID ↔ NodeIndex mapping and enforces the
//! bipartite invariants: explicit node kinds, consumer → content edges only,
//! one edge per ordered pair (re-adding overwrites the weight).
//!
//! Nodes are never removed, so `NodeIndex` order is insertion order. Every
//! ordered query below relies on that.

use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

use super::models::{InteractionEdge, InteractionNode, NodeKind};
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct InteractionGraph {
    /// The underlying directed graph
    pub(crate) graph: DiGraph<InteractionNode, InteractionEdge>,
    id_to_index: HashMap<String, NodeIndex>,
}

impl InteractionGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            id_to_index: HashMap::new(),
        }
    }

    /// Create a graph with pre-allocated capacity.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            graph: DiGraph::with_capacity(nodes, edges),
            id_to_index: HashMap::with_capacity(nodes),
        }
    }

    /// Add a node. Re-adding an id with the same kind returns the existing index;
    /// a different kind is a `DuplicateNode` error.
    pub fn add_node(&mut self, id: &str, kind: NodeKind) -> Result<NodeIndex> {
        if let Some(&idx) = self.id_to_index.get(id) {
            let existing = self.graph[idx].kind;
            if existing != kind {
                return Err(Error::DuplicateNode {
                    id: id.to_string(),
                    existing,
                    requested: kind,
                });
            }
            return Ok(idx);
        }
        let idx = self.graph.add_node(InteractionNode {
            id: id.to_string(),
            kind,
        });
        self.id_to_index.insert(id.to_string(), idx);
        Ok(idx)
    }

    /// Add or overwrite the consumer → content edge `source -> target`.
    pub fn add_edge(&mut self, source: &str, target: &str, weight: f64) -> Result<EdgeIndex> {
        let from = self.require(source)?;
        let to = self.require(target)?;
        if from == to {
            return Err(Error::SelfLoop(source.to_string()));
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::InvalidWeight {
                from: source.to_string(),
                to: target.to_string(),
                weight,
            });
        }
        if self.graph[from].kind != NodeKind::Consumer || self.graph[to].kind != NodeKind::Content
        {
            return Err(Error::InvalidEdgeDirection {
                from: source.to_string(),
                to: target.to_string(),
            });
        }
        Ok(self
            .graph
            .update_edge(from, to, InteractionEdge { weight }))
    }

    /// Targets of the outgoing edges of `id`, in target insertion order.
    ///
    /// Unknown ids yield an empty list; check [`contains`](Self::contains) first
    /// when absence matters.
    pub fn successors(&self, id: &str) -> Vec<&str> {
        match self.get_index(id) {
            Some(idx) => self
                .successor_indices(idx)
                .into_iter()
                .map(|t| self.graph[t].id.as_str())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Weight of the edge `source -> target`, if it exists.
    pub fn edge_weight(&self, source: &str, target: &str) -> Option<f64> {
        let from = self.get_index(source)?;
        let to = self.get_index(target)?;
        self.graph
            .find_edge(from, to)
            .map(|e| self.graph[e].weight)
    }

    /// Ids of all nodes of `kind`, lazily, in insertion order.
    pub fn nodes_by_kind(&self, kind: NodeKind) -> impl Iterator<Item = &str> + '_ {
        self.graph
            .node_indices()
            .filter(move |&idx| self.graph[idx].kind == kind)
            .map(move |idx| self.graph[idx].id.as_str())
    }

    /// All node ids in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph
            .node_indices()
            .map(move |idx| self.graph[idx].id.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.id_to_index.contains_key(id)
    }

    pub fn kind_of(&self, id: &str) -> Option<NodeKind> {
        self.get_index(id).map(|idx| self.graph[idx].kind)
    }

    /// Get the NodeIndex for a given ID.
    pub fn get_index(&self, id: &str) -> Option<NodeIndex> {
        self.id_to_index.get(id).copied()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn in_degree(&self, id: &str) -> usize {
        self.degree(id, Direction::Incoming)
    }

    pub fn out_degree(&self, id: &str) -> usize {
        self.degree(id, Direction::Outgoing)
    }

    /// Outgoing neighbors sorted by index. petgraph walks adjacency lists
    /// newest-first, so the order has to be restored here.
    pub(crate) fn successor_indices(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut targets: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .collect();
        targets.sort_unstable();
        targets
    }

    /// Outgoing `(target, weight)` pairs sorted by target index.
    pub(crate) fn weighted_successors(&self, idx: NodeIndex) -> Vec<(NodeIndex, f64)> {
        let mut targets: Vec<(NodeIndex, f64)> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (e.target(), e.weight().weight))
            .collect();
        targets.sort_unstable_by_key(|&(t, _)| t);
        targets
    }

    fn degree(&self, id: &str, dir: Direction) -> usize {
        self.get_index(id)
            .map(|idx| self.graph.neighbors_directed(idx, dir).count())
            .unwrap_or(0)
    }

    fn require(&self, id: &str) -> Result<NodeIndex> {
        self.get_index(id)
            .ok_or_else(|| Error::UnknownNode(id.to_string()))
    }
}

impl Default for InteractionGraph {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
