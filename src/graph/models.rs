//! Graph analytics data models.
//!
//! Defines the type system shared by the graph store and the algorithms:
//!
//! ## Graph structure
//! - [`NodeKind`] / [`InteractionNode`] — typed nodes (consumer or content)
//! - [`InteractionEdge`] — weighted consumer → content interaction
//!
//! ## Output types (analytics)
//! - [`NodeMap`] — insertion-ordered node id → value map
//! - [`Partition`] / [`CentralityScores`] — per-node algorithm results
//! - [`CommunityInfo`] / [`CommunityDetection`] — Louvain summaries
//! - [`ScoredContent`] — a ranked recommendation candidate
//!
//! ## Configuration
//! - [`AnalyticsConfig`] — tuning parameters for the analytics algorithms

use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

/// Weight assumed for interactions that do not carry one.
pub const DEFAULT_WEIGHT: f64 = 1.0;

// ============================================================================
// Graph structure
// ============================================================================

/// Role of a node in the bipartite interaction graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Consumer,
    Content,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Consumer => write!(f, "Consumer"),
            Self::Content => write!(f, "Content"),
        }
    }
}

/// A node of the interaction graph. Display names are kept outside the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionNode {
    /// Globally unique identifier
    pub id: String,
    /// Explicit role, fixed at creation
    pub kind: NodeKind,
}

/// A weighted interaction from a consumer to a content node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionEdge {
    /// Non-negative, finite weight
    pub weight: f64,
}

impl Default for InteractionEdge {
    fn default() -> Self {
        Self {
            weight: DEFAULT_WEIGHT,
        }
    }
}

// ============================================================================
// NodeMap — ordered per-node results
// ============================================================================

/// Node id → value map that iterates in node insertion order.
///
/// Algorithm outputs cover every node exactly once, and reports need a
/// reproducible order, so this keeps both a vector of entries and an index.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeMap<V> {
    entries: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

impl<V> NodeMap<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Insert or replace the value for `id`. Replacing keeps the original position.
    pub fn insert(&mut self, id: impl Into<String>, value: V) {
        let id = id.into();
        match self.index.get(&id) {
            Some(&pos) => self.entries[pos].1 = value,
            None => {
                self.index.insert(id.clone(), self.entries.len());
                self.entries.push((id, value));
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&V> {
        self.index.get(id).map(|&pos| &self.entries[pos].1)
    }

    pub fn contains_key(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(id, v)| (id.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl<V> Default for NodeMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> std::ops::Index<&str> for NodeMap<V> {
    type Output = V;

    fn index(&self, id: &str) -> &V {
        match self.get(id) {
            Some(v) => v,
            None => panic!("no entry for node {id}"),
        }
    }
}

impl<V> FromIterator<(String, V)> for NodeMap<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (id, v) in iter {
            map.insert(id, v);
        }
        map
    }
}

impl<V: Serialize> Serialize for NodeMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Community label per node (labels are only meaningful within one run).
pub type Partition = NodeMap<u32>;

/// Normalized degree centrality per node, each in [0, 1].
pub type CentralityScores = NodeMap<f64>;

// ============================================================================
// Output types — Analytics results
// ============================================================================

/// Metadata about a community detected by the Louvain algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityInfo {
    /// Community label
    pub id: u32,
    /// Number of nodes in this community
    pub size: usize,
    /// Node IDs in node insertion order
    pub members: Vec<String>,
}

/// Full result of a Louvain run.
#[derive(Debug, Clone)]
pub struct CommunityDetection {
    /// Label per node
    pub partition: Partition,
    /// Communities ordered by label
    pub communities: Vec<CommunityInfo>,
    /// Newman modularity of the final partition
    pub modularity: f64,
    /// Number of aggregation levels that changed the partition
    pub levels: usize,
}

/// Per-node analytics metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeMetrics {
    pub kind: NodeKind,
    /// Incoming interactions (content nodes only)
    pub in_degree: usize,
    /// Outgoing interactions (consumer nodes only)
    pub out_degree: usize,
    /// (in + out) / (n - 1)
    pub degree_centrality: f64,
    /// Louvain community label
    pub community_id: u32,
}

/// Complete result of a graph analytics computation.
#[derive(Debug, Clone, Serialize)]
pub struct GraphAnalytics {
    /// Per-node metrics in node insertion order
    pub metrics: NodeMap<NodeMetrics>,
    /// Community summaries ordered by label
    pub communities: Vec<CommunityInfo>,
    /// Modularity of the detected partition
    pub modularity: f64,
    /// Louvain aggregation levels that changed the partition
    pub louvain_levels: usize,
    pub node_count: usize,
    pub edge_count: usize,
    /// Computation time in milliseconds
    pub computation_ms: u64,
}

/// A content node proposed to a consumer, with its accumulated score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredContent {
    pub id: String,
    pub score: f64,
}

// ============================================================================
// Configuration
// ============================================================================

/// Tuning parameters for the analytics algorithms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Louvain resolution parameter (default: 1.0, higher = smaller communities)
    pub louvain_resolution: f64,
    /// Local-move passes per aggregation level (default: 100)
    pub louvain_max_passes: usize,
    /// Aggregation levels (default: 10)
    pub louvain_max_levels: usize,
    /// Recommendations returned when the caller does not ask for a count (default: 10)
    pub recommendation_limit: usize,
    /// Nodes listed in centrality reports (default: 10)
    pub centrality_top_k: usize,
    /// Abort the build on the first invalid interaction instead of skipping it
    pub strict_interactions: bool,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            louvain_resolution: 1.0,
            louvain_max_passes: 100,
            louvain_max_levels: 10,
            recommendation_limit: 10,
            centrality_top_k: 10,
            strict_interactions: false,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
