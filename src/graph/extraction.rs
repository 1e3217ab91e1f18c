//! Record source → petgraph extraction.
//!
//! Converts a snapshot of consumer, content and interaction records into an
//! [`InteractionGraph`] ready for analytics computation. Records are read
//! through the [`InteractionSource`] trait, so the same builder serves files,
//! in-memory stores and any database-backed source.
//!
//! ## Build policy
//!
//! - A node declared twice with conflicting kinds aborts the whole build.
//! - An invalid interaction (unknown endpoint, bad weight, self-loop, wrong
//!   direction) is skipped and counted, or aborts the build when
//!   `strict_interactions` is set.

use serde::Serialize;
use std::sync::Arc;

use super::models::{NodeKind, DEFAULT_WEIGHT};
use super::store::InteractionGraph;
use crate::error::Result;
use crate::report::NameTable;
use crate::source::{InteractionSource, Snapshot};

/// Counters describing one graph build.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BuildStats {
    pub consumers: usize,
    pub contents: usize,
    /// Interactions that produced (or overwrote) an edge
    pub interactions_applied: usize,
    /// Interactions rejected and skipped
    pub interactions_skipped: usize,
}

/// Build a graph from an in-memory snapshot.
pub fn build_graph(snapshot: &Snapshot, strict: bool) -> Result<(InteractionGraph, BuildStats)> {
    let mut graph = InteractionGraph::with_capacity(
        snapshot.consumers.len() + snapshot.contents.len(),
        snapshot.interactions.len(),
    );
    let mut stats = BuildStats::default();

    for record in &snapshot.consumers {
        graph.add_node(&record.id, NodeKind::Consumer)?;
    }
    for record in &snapshot.contents {
        graph.add_node(&record.id, NodeKind::Content)?;
    }
    stats.consumers = graph.nodes_by_kind(NodeKind::Consumer).count();
    stats.contents = graph.nodes_by_kind(NodeKind::Content).count();

    for record in &snapshot.interactions {
        let weight = record.weight.unwrap_or(DEFAULT_WEIGHT);
        match graph.add_edge(&record.consumer_id, &record.content_id, weight) {
            Ok(_) => stats.interactions_applied += 1,
            Err(e) if !strict && e.is_record_level() => {
                tracing::warn!(
                    consumer = %record.consumer_id,
                    content = %record.content_id,
                    "Skipping interaction: {}",
                    e
                );
                stats.interactions_skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        skipped = stats.interactions_skipped,
        "Built interaction graph"
    );

    Ok((graph, stats))
}

/// Reads a full record snapshot from an [`InteractionSource`] and builds the
/// graph plus the display-name table for it.
pub struct GraphBuilder {
    source: Arc<dyn InteractionSource>,
    strict: bool,
}

impl GraphBuilder {
    /// Create a new builder backed by the given source.
    pub fn new(source: Arc<dyn InteractionSource>, strict: bool) -> Self {
        Self { source, strict }
    }

    pub async fn build(&self) -> Result<(InteractionGraph, NameTable, BuildStats)> {
        let snapshot = self.source.snapshot().await?;
        let (graph, stats) = build_graph(&snapshot, self.strict)?;
        Ok((graph, NameTable::from_snapshot(&snapshot), stats))
    }
}

// ============================================================================
// Tests
// ============================================================================
