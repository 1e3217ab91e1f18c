//! Analytics engine — orchestrates the full pipeline.
//!
//! The `AnalyticsEngine` trait is the single entry point for analytics
//! callers (CLI, embedding services). It encapsulates:
//!
//! 1. **Extraction**: record source → petgraph via `GraphBuilder`
//! 2. **Computation**: recommendations, Louvain communities, degree centrality
//! 3. **Presentation**: display-name mapping via the `report` module
//!
//! Every engine call builds a fresh [`AnalyticsSession`] from the current
//! record snapshot. Callers that issue several queries against the same
//! snapshot should build one session and query it directly.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::algorithms::{compute_all, degree_centrality, detect_communities};
use super::extraction::{BuildStats, GraphBuilder};
use super::models::{AnalyticsConfig, CentralityScores, NodeKind, Partition};
use super::recommend::recommend;
use super::store::InteractionGraph;
use crate::error::Result;
use crate::report::{
    format_centrality, format_communities, format_recommendations, CentralityEntry, NameTable,
    RecommendationEntry,
};
use crate::source::InteractionSource;

// ============================================================================
// Output type
// ============================================================================

/// Combined analytics results for one snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSnapshot {
    pub node_count: usize,
    pub edge_count: usize,
    pub consumer_count: usize,
    pub content_count: usize,
    /// Counters from the graph build
    pub build: BuildStats,
    /// Modularity of the detected partition
    pub modularity: f64,
    pub louvain_levels: usize,
    /// Display names grouped by community label
    pub communities: BTreeMap<u32, Vec<String>>,
    /// The `centrality_top_k` most central nodes
    pub centrality: Vec<CentralityEntry>,
    /// Computation time in milliseconds (excluding the source read)
    pub computation_ms: u64,
    /// When the analytics were computed
    pub computed_at: DateTime<Utc>,
}

// ============================================================================
// Session
// ============================================================================

/// A built graph together with its display names, ready to be queried.
pub struct AnalyticsSession {
    graph: InteractionGraph,
    names: NameTable,
    stats: BuildStats,
    config: AnalyticsConfig,
}

impl AnalyticsSession {
    pub fn new(
        graph: InteractionGraph,
        names: NameTable,
        stats: BuildStats,
        config: AnalyticsConfig,
    ) -> Self {
        Self {
            graph,
            names,
            stats,
            config,
        }
    }

    pub fn graph(&self) -> &InteractionGraph {
        &self.graph
    }

    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    /// Ranked recommendations for `consumer_id` with display names.
    pub fn recommend(
        &self,
        consumer_id: &str,
        limit: usize,
    ) -> Result<Vec<RecommendationEntry>> {
        let scored = recommend(&self.graph, consumer_id, limit)?;
        Ok(format_recommendations(&scored, &self.names))
    }

    pub fn partition(&self) -> Partition {
        detect_communities(&self.graph, &self.config)
    }

    /// Display names grouped by community label.
    pub fn detect_communities(&self) -> BTreeMap<u32, Vec<String>> {
        format_communities(&self.partition(), &self.names)
    }

    pub fn centrality(&self) -> CentralityScores {
        degree_centrality(&self.graph)
    }

    pub fn centrality_top(&self, k: usize) -> Vec<CentralityEntry> {
        format_centrality(&self.centrality(), &self.names, k)
    }

    /// Run every algorithm once and summarize the results.
    pub fn analyze(&self) -> AnalyticsSnapshot {
        let analytics = compute_all(&self.graph, &self.config);

        let partition: Partition = analytics
            .metrics
            .iter()
            .map(|(id, m)| (id.to_string(), m.community_id))
            .collect();
        let centrality: CentralityScores = analytics
            .metrics
            .iter()
            .map(|(id, m)| (id.to_string(), m.degree_centrality))
            .collect();

        AnalyticsSnapshot {
            node_count: analytics.node_count,
            edge_count: analytics.edge_count,
            consumer_count: self.graph.nodes_by_kind(NodeKind::Consumer).count(),
            content_count: self.graph.nodes_by_kind(NodeKind::Content).count(),
            build: self.stats.clone(),
            modularity: analytics.modularity,
            louvain_levels: analytics.louvain_levels,
            communities: format_communities(&partition, &self.names),
            centrality: format_centrality(&centrality, &self.names, self.config.centrality_top_k),
            computation_ms: analytics.computation_ms,
            computed_at: Utc::now(),
        }
    }
}

// ============================================================================
// Trait
// ============================================================================

/// Analytics engine trait — single entry point for graph analytics.
///
/// Callers use `Arc<dyn AnalyticsEngine>` for dependency injection.
#[async_trait]
pub trait AnalyticsEngine: Send + Sync {
    /// Recommend up to `limit` unseen content nodes for a consumer.
    ///
    /// Returns `UnknownConsumer` if the id is not a consumer of the snapshot.
    async fn recommend(
        &self,
        consumer_id: &str,
        limit: usize,
    ) -> Result<Vec<RecommendationEntry>>;

    /// Community label → member display names. Empty for an empty snapshot.
    async fn detect_communities(&self) -> Result<BTreeMap<u32, Vec<String>>>;

    /// The `k` nodes with the highest degree centrality.
    async fn centrality_top(&self, k: usize) -> Result<Vec<CentralityEntry>>;

    /// Full analysis of the current snapshot.
    async fn analyze(&self) -> Result<AnalyticsSnapshot>;
}

// ============================================================================
// Concrete implementation
// ============================================================================

/// Real analytics engine backed by an `InteractionSource`.
pub struct GraphAnalyticsEngine {
    builder: GraphBuilder,
    config: AnalyticsConfig,
}

impl GraphAnalyticsEngine {
    /// Create a new engine backed by the given source.
    pub fn new(source: Arc<dyn InteractionSource>, config: AnalyticsConfig) -> Self {
        Self {
            builder: GraphBuilder::new(source, config.strict_interactions),
            config,
        }
    }

    /// Read the current snapshot and build a queryable session from it.
    pub async fn session(&self) -> Result<AnalyticsSession> {
        let (graph, names, stats) = self.builder.build().await?;
        Ok(AnalyticsSession::new(graph, names, stats, self.config.clone()))
    }
}

#[async_trait]
impl AnalyticsEngine for GraphAnalyticsEngine {
    async fn recommend(
        &self,
        consumer_id: &str,
        limit: usize,
    ) -> Result<Vec<RecommendationEntry>> {
        self.session().await?.recommend(consumer_id, limit)
    }

    async fn detect_communities(&self) -> Result<BTreeMap<u32, Vec<String>>> {
        Ok(self.session().await?.detect_communities())
    }

    async fn centrality_top(&self, k: usize) -> Result<Vec<CentralityEntry>> {
        Ok(self.session().await?.centrality_top(k))
    }

    async fn analyze(&self) -> Result<AnalyticsSnapshot> {
        Ok(self.session().await?.analyze())
    }
}

// ============================================================================
// Tests
// ============================================================================
