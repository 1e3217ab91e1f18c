//! Interaction graph analytics.
//!
//! Builds a weighted bipartite consumer → content graph in petgraph and
//! derives recommendations, Louvain communities and degree centrality from
//! it, all in-process.
//!
//! ## Architecture
//!
//! ```text
//! InteractionSource ──► extraction ──► InteractionGraph (petgraph::DiGraph)
//!                                            │
//!                              recommend / algorithms
//!                                            │
//!                                 report (display names)
//!                                            │
//!                              AnalyticsEngine (orchestrator)
//! ```
//!
//! ## Modules
//!
//! - [`models`] — Data structures (NodeKind, NodeMap, CommunityInfo, GraphAnalytics, AnalyticsConfig)
//! - [`store`] — `InteractionGraph`, the id-indexed graph with bipartite edge validation
//! - [`recommend`] — Neighborhood-aggregation recommendations
//! - [`algorithms`] — Louvain communities, modularity, degree centrality
//! - [`extraction`] — Record source → petgraph conversion via `GraphBuilder`
//! - [`engine`] — `AnalyticsEngine` trait and `GraphAnalyticsEngine` orchestrator

pub mod algorithms;
pub mod engine;
pub mod extraction;
pub mod models;
pub mod recommend;
pub mod store;

// Re-export primary types for convenience
pub use engine::{AnalyticsEngine, AnalyticsSession, AnalyticsSnapshot, GraphAnalyticsEngine};
pub use extraction::{BuildStats, GraphBuilder};
pub use models::{
    AnalyticsConfig, CentralityScores, CommunityDetection, CommunityInfo, GraphAnalytics,
    NodeKind, NodeMap, NodeMetrics, Partition, ScoredContent, DEFAULT_WEIGHT,
};
pub use store::InteractionGraph;
