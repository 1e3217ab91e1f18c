//! Graph analytics algorithms.
//!
//! Implements the analytics run over an [`InteractionGraph`]:
//! - **Community detection (Louvain)**: multi-level modularity optimization
//!   on the undirected projection, custom implementation
//! - **Modularity**: Newman weighted modularity of a partition
//! - **Degree centrality**: (in + out) degree normalized by `n - 1`
//!
//! Every iteration runs in node insertion order and ties are resolved towards
//! the lowest index, so results are reproducible for a fixed input order.

use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{BTreeMap, HashMap};

use super::models::{
    AnalyticsConfig, CentralityScores, CommunityDetection, CommunityInfo, GraphAnalytics,
    NodeMap, NodeMetrics, Partition,
};
use super::store::InteractionGraph;

/// A move must beat staying put by more than this to count as an improvement.
const GAIN_TOLERANCE: f64 = 1e-12;

// ============================================================================
// Undirected projection
// ============================================================================

/// Weighted undirected graph worked on by Louvain. At level 0 node `i` is
/// `NodeIndex::new(i)`; at later levels it is a community of the level below.
#[derive(Debug, Clone)]
struct UndirectedGraph {
    /// Neighbors sorted by index, self-loops excluded
    adj: Vec<Vec<(usize, f64)>>,
    /// Weight folded into each node by aggregation
    self_loops: Vec<f64>,
}

impl UndirectedGraph {
    fn from_pairs(n: usize, pairs: BTreeMap<(usize, usize), f64>, self_loops: Vec<f64>) -> Self {
        let mut adj: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
        for ((a, b), w) in pairs {
            adj[a].push((b, w));
            adj[b].push((a, w));
        }
        for neighbors in adj.iter_mut() {
            neighbors.sort_by_key(|&(j, _)| j);
        }
        Self { adj, self_loops }
    }

    fn node_count(&self) -> usize {
        self.adj.len()
    }

    /// Weighted degree per node; a self-loop counts twice.
    fn strengths(&self) -> Vec<f64> {
        self.adj
            .iter()
            .zip(&self.self_loops)
            .map(|(neighbors, sl)| neighbors.iter().map(|&(_, w)| w).sum::<f64>() + 2.0 * sl)
            .collect()
    }
}

fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Collapse directed edges into undirected ones, summing reciprocal weights.
fn project_undirected(graph: &InteractionGraph) -> UndirectedGraph {
    let g = &graph.graph;
    let n = g.node_count();
    let mut pairs: BTreeMap<(usize, usize), f64> = BTreeMap::new();
    for edge in g.edge_references() {
        let (s, t) = (edge.source().index(), edge.target().index());
        if s == t {
            continue;
        }
        *pairs.entry(ordered(s, t)).or_default() += edge.weight().weight;
    }
    UndirectedGraph::from_pairs(n, pairs, vec![0.0; n])
}

// ============================================================================
// Community Detection — Louvain (custom implementation)
// ============================================================================

/// Modularity change of inserting a node of strength `ki` into a community
/// with total strength `sigma_tot`, linked to it by `k_in`.
fn modularity_gain(k_in: f64, sigma_tot: f64, ki: f64, m: f64, resolution: f64) -> f64 {
    k_in / m - resolution * sigma_tot * ki / (2.0 * m * m)
}

/// One level of greedy local moves. Returns the community of every node and
/// whether any node changed community.
fn local_moves(level: &UndirectedGraph, resolution: f64, max_passes: usize) -> (Vec<usize>, bool) {
    let n = level.node_count();
    let strengths = level.strengths();
    let m = strengths.iter().sum::<f64>() / 2.0;
    let mut community: Vec<usize> = (0..n).collect();
    if m <= 0.0 {
        return (community, false);
    }

    let mut totals = strengths.clone();
    let mut moved_any = false;

    for pass in 0..max_passes {
        let mut moved = 0usize;

        for i in 0..n {
            let current = community[i];
            let ki = strengths[i];

            // BTreeMap keeps candidate evaluation in label order.
            let mut links: BTreeMap<usize, f64> = BTreeMap::new();
            for &(j, w) in &level.adj[i] {
                *links.entry(community[j]).or_default() += w;
            }

            totals[current] -= ki;
            let stay_links = links.get(&current).copied().unwrap_or(0.0);
            let mut best = current;
            let mut best_gain = modularity_gain(stay_links, totals[current], ki, m, resolution);

            for (&candidate, &k_in) in &links {
                if candidate == current {
                    continue;
                }
                let gain = modularity_gain(k_in, totals[candidate], ki, m, resolution);
                if gain > best_gain + GAIN_TOLERANCE {
                    best = candidate;
                    best_gain = gain;
                }
            }
            totals[best] += ki;

            if best != current {
                community[i] = best;
                moved += 1;
            }
        }

        tracing::trace!(pass, moved, "Louvain local-move pass");
        if moved == 0 {
            break;
        }
        moved_any = true;
    }

    (community, moved_any)
}

/// Relabel to 0.. in order of first appearance. Returns the label count.
fn renumber(labels: &mut [usize]) -> usize {
    let mut remap: HashMap<usize, usize> = HashMap::new();
    for label in labels.iter_mut() {
        let next = remap.len();
        *label = *remap.entry(*label).or_insert(next);
    }
    remap.len()
}

/// Condense each community into a single node; intra-community weight
/// becomes a self-loop.
fn aggregate(level: &UndirectedGraph, community: &[usize], count: usize) -> UndirectedGraph {
    let mut pairs: BTreeMap<(usize, usize), f64> = BTreeMap::new();
    let mut self_loops = vec![0.0; count];

    for (i, neighbors) in level.adj.iter().enumerate() {
        let ci = community[i];
        self_loops[ci] += level.self_loops[i];
        for &(j, w) in neighbors {
            if j < i {
                continue;
            }
            let cj = community[j];
            if ci == cj {
                self_loops[ci] += w;
            } else {
                *pairs.entry(ordered(ci, cj)).or_default() += w;
            }
        }
    }

    UndirectedGraph::from_pairs(count, pairs, self_loops)
}

/// Newman modularity of `labels` over `level`.
fn partition_modularity(level: &UndirectedGraph, labels: &[usize], resolution: f64) -> f64 {
    let strengths = level.strengths();
    let m2: f64 = strengths.iter().sum();
    if m2 <= 0.0 {
        return 0.0;
    }

    let mut internal: BTreeMap<usize, f64> = BTreeMap::new();
    let mut totals: BTreeMap<usize, f64> = BTreeMap::new();
    for (i, neighbors) in level.adj.iter().enumerate() {
        *totals.entry(labels[i]).or_default() += strengths[i];
        // Each undirected edge appears twice in the adjacency lists.
        let mut within = 2.0 * level.self_loops[i];
        for &(j, w) in neighbors {
            if labels[j] == labels[i] {
                within += w;
            }
        }
        *internal.entry(labels[i]).or_default() += within;
    }

    totals
        .iter()
        .map(|(c, &tot)| {
            let inside = internal.get(c).copied().unwrap_or(0.0);
            inside / m2 - resolution * (tot / m2) * (tot / m2)
        })
        .sum()
}

/// Detect communities using the Louvain method.
///
/// Works on the undirected projection of the graph. Each level moves nodes
/// greedily between neighboring communities until no move improves
/// modularity (or `louvain_max_passes` is reached), then condenses the
/// communities into super-nodes for the next level. Stops when a level
/// changes nothing or after `louvain_max_levels` levels.
pub fn louvain_communities(
    graph: &InteractionGraph,
    config: &AnalyticsConfig,
) -> CommunityDetection {
    let g = &graph.graph;
    let n = g.node_count();
    if n == 0 {
        return CommunityDetection {
            partition: Partition::new(),
            communities: vec![],
            modularity: 0.0,
            levels: 0,
        };
    }

    let base = project_undirected(graph);
    let mut level = base.clone();
    // Community of every original node at the current level.
    let mut membership: Vec<usize> = (0..n).collect();
    let mut levels = 0;

    for depth in 0..config.louvain_max_levels {
        let (mut community, moved) = local_moves(
            &level,
            config.louvain_resolution,
            config.louvain_max_passes,
        );
        if !moved {
            break;
        }
        let count = renumber(&mut community);
        for m in membership.iter_mut() {
            *m = community[*m];
        }
        levels += 1;
        tracing::debug!(
            level = depth,
            nodes = level.node_count(),
            communities = count,
            "Louvain level complete"
        );
        if count == level.node_count() {
            break;
        }
        level = aggregate(&level, &community, count);
    }

    let count = renumber(&mut membership);
    let modularity = partition_modularity(&base, &membership, config.louvain_resolution);

    let mut partition = Partition::with_capacity(n);
    let mut communities: Vec<CommunityInfo> = (0..count)
        .map(|id| CommunityInfo {
            id: id as u32,
            size: 0,
            members: Vec::new(),
        })
        .collect();
    for idx in g.node_indices() {
        let id = &g[idx].id;
        let label = membership[idx.index()];
        partition.insert(id.clone(), label as u32);
        communities[label].members.push(id.clone());
        communities[label].size += 1;
    }

    CommunityDetection {
        partition,
        communities,
        modularity,
        levels,
    }
}

/// Partition of every node into Louvain communities.
pub fn detect_communities(graph: &InteractionGraph, config: &AnalyticsConfig) -> Partition {
    louvain_communities(graph, config).partition
}

/// Newman modularity (resolution 1) of `partition` over the undirected
/// projection of `graph`. Nodes missing from the partition count as singletons.
pub fn modularity(graph: &InteractionGraph, partition: &Partition) -> f64 {
    let base = project_undirected(graph);
    let g = &graph.graph;
    let offset = partition.values().copied().max().map_or(0, |m| m as usize + 1);
    let labels: Vec<usize> = g
        .node_indices()
        .map(|idx| match partition.get(&g[idx].id) {
            Some(&label) => label as usize,
            None => offset + idx.index(),
        })
        .collect();
    partition_modularity(&base, &labels, 1.0)
}

// ============================================================================
// Degree Centrality
// ============================================================================

/// Unnormalized in + out degree per node, in insertion order.
pub fn raw_degrees(graph: &InteractionGraph) -> NodeMap<usize> {
    let g = &graph.graph;
    let mut degrees = NodeMap::with_capacity(g.node_count());
    for idx in g.node_indices() {
        let degree = g.neighbors_directed(idx, Direction::Incoming).count()
            + g.neighbors_directed(idx, Direction::Outgoing).count();
        degrees.insert(g[idx].id.clone(), degree);
    }
    degrees
}

/// Degree centrality: (in + out) / (n - 1), or 0 for every node when n <= 1.
pub fn degree_centrality(graph: &InteractionGraph) -> CentralityScores {
    let n = graph.node_count();
    let scale = if n > 1 { 1.0 / (n - 1) as f64 } else { 0.0 };
    raw_degrees(graph)
        .iter()
        .map(|(id, &degree)| (id.to_string(), degree as f64 * scale))
        .collect()
}

/// The `k` highest scores, ties broken by insertion order.
pub fn top_k(scores: &CentralityScores, k: usize) -> Vec<(String, f64)> {
    let mut ranked: Vec<(&str, f64)> = scores.iter().map(|(id, &s)| (id, s)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
        .into_iter()
        .take(k)
        .map(|(id, s)| (id.to_string(), s))
        .collect()
}

// ============================================================================
// Orchestrator: compute_all
// ============================================================================

/// Run community detection and centrality and assemble a `GraphAnalytics`.
pub fn compute_all(graph: &InteractionGraph, config: &AnalyticsConfig) -> GraphAnalytics {
    let start = std::time::Instant::now();

    let detection = louvain_communities(graph, config);
    let centrality = degree_centrality(graph);

    let g = &graph.graph;
    let mut metrics = NodeMap::with_capacity(g.node_count());
    for idx in g.node_indices() {
        let node = &g[idx];
        metrics.insert(
            node.id.clone(),
            NodeMetrics {
                kind: node.kind,
                in_degree: g.neighbors_directed(idx, Direction::Incoming).count(),
                out_degree: g.neighbors_directed(idx, Direction::Outgoing).count(),
                degree_centrality: centrality.get(&node.id).copied().unwrap_or(0.0),
                community_id: detection.partition.get(&node.id).copied().unwrap_or(0),
            },
        );
    }

    let elapsed = start.elapsed();
    tracing::info!(
        nodes = g.node_count(),
        edges = g.edge_count(),
        communities = detection.communities.len(),
        modularity = detection.modularity,
        elapsed_ms = elapsed.as_millis() as u64,
        "Graph analytics computed"
    );

    GraphAnalytics {
        metrics,
        communities: detection.communities,
        modularity: detection.modularity,
        louvain_levels: detection.levels,
        node_count: g.node_count(),
        edge_count: g.edge_count(),
        computation_ms: elapsed.as_millis() as u64,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::models::NodeKind;

    fn graph_from(
        consumers: &[&str],
        contents: &[&str],
        edges: &[(&str, &str, f64)],
    ) -> InteractionGraph {
        let mut g = InteractionGraph::new();
        for id in consumers {
            g.add_node(id, NodeKind::Consumer).unwrap();
        }
        for id in contents {
            g.add_node(id, NodeKind::Content).unwrap();
        }
        for (s, t, w) in edges {
            g.add_edge(s, t, *w).unwrap();
        }
        g
    }

    /// Two complete bipartite blocks K(3,3) joined by a single bridge edge.
    fn make_two_blocks() -> InteractionGraph {
        let consumers = ["a_u0", "a_u1", "a_u2", "b_u0", "b_u1", "b_u2"];
        let contents = ["a_c0", "a_c1", "a_c2", "b_c0", "b_c1", "b_c2"];
        let mut edges = Vec::new();
        for block in ["a", "b"] {
            for u in 0..3 {
                for c in 0..3 {
                    edges.push((format!("{block}_u{u}"), format!("{block}_c{c}")));
                }
            }
        }
        edges.push(("a_u0".to_string(), "b_c0".to_string()));
        let edges: Vec<(&str, &str, f64)> = edges
            .iter()
            .map(|(s, t)| (s.as_str(), t.as_str(), 1.0))
            .collect();
        graph_from(&consumers, &contents, &edges)
    }

    /// One consumer interacting with every content node.
    fn make_star(n_leaves: usize) -> InteractionGraph {
        let leaves: Vec<String> = (0..n_leaves).map(|i| format!("leaf_{i}")).collect();
        let leaf_refs: Vec<&str> = leaves.iter().map(String::as_str).collect();
        let edges: Vec<(&str, &str, f64)> =
            leaf_refs.iter().map(|leaf| ("center", *leaf, 1.0)).collect();
        graph_from(&["center"], &leaf_refs, &edges)
    }

    /// Eight complete 2x2 blocks in a ring; consumer 0 of each block also
    /// reaches content 1 of the next block.
    fn make_block_ring() -> InteractionGraph {
        const BLOCKS: usize = 8;
        let consumers: Vec<String> = (0..BLOCKS)
            .flat_map(|b| (0..2).map(move |i| format!("u{b}_{i}")))
            .collect();
        let contents: Vec<String> = (0..BLOCKS)
            .flat_map(|b| (0..2).map(move |i| format!("c{b}_{i}")))
            .collect();
        let mut edges = Vec::new();
        for b in 0..BLOCKS {
            for u in 0..2 {
                for c in 0..2 {
                    edges.push((format!("u{b}_{u}"), format!("c{b}_{c}")));
                }
            }
            edges.push((format!("u{b}_0"), format!("c{}_1", (b + 1) % BLOCKS)));
        }
        let consumer_refs: Vec<&str> = consumers.iter().map(String::as_str).collect();
        let content_refs: Vec<&str> = contents.iter().map(String::as_str).collect();
        let edges: Vec<(&str, &str, f64)> = edges
            .iter()
            .map(|(s, t)| (s.as_str(), t.as_str(), 1.0))
            .collect();
        graph_from(&consumer_refs, &content_refs, &edges)
    }

    // --- Projection ---

    #[test]
    fn test_projection_symmetric_weights() {
        let g = graph_from(
            &["U1"],
            &["C1", "C2"],
            &[("U1", "C1", 2.5), ("U1", "C2", 1.0)],
        );
        let projected = project_undirected(&g);
        assert_eq!(projected.adj[0], vec![(1, 2.5), (2, 1.0)]);
        assert_eq!(projected.adj[1], vec![(0, 2.5)]);
        assert_eq!(projected.strengths(), vec![3.5, 2.5, 1.0]);
    }

    #[test]
    fn test_aggregate_preserves_total_strength() {
        let g = make_two_blocks();
        let level = project_undirected(&g);
        let (mut community, moved) = local_moves(&level, 1.0, 100);
        assert!(moved);
        let count = renumber(&mut community);
        let condensed = aggregate(&level, &community, count);

        let before: f64 = level.strengths().iter().sum();
        let after: f64 = condensed.strengths().iter().sum();
        assert!((before - after).abs() < 1e-9);
    }

    // --- Louvain ---

    #[test]
    fn test_louvain_disjoint_clusters() {
        let g = graph_from(
            &["U1", "U2", "U3", "U4"],
            &["C1", "C2"],
            &[
                ("U1", "C1", 1.0),
                ("U2", "C1", 1.0),
                ("U3", "C2", 1.0),
                ("U4", "C2", 1.0),
            ],
        );
        let partition = detect_communities(&g, &AnalyticsConfig::default());

        assert_eq!(partition.len(), 6);
        assert_eq!(partition["U1"], partition["U2"]);
        assert_eq!(partition["U1"], partition["C1"]);
        assert_eq!(partition["U3"], partition["U4"]);
        assert_eq!(partition["U3"], partition["C2"]);
        assert_ne!(partition["U1"], partition["U3"]);
        // labels follow first appearance in insertion order
        assert_eq!(partition["U1"], 0);
        assert_eq!(partition["U3"], 1);
    }

    #[test]
    fn test_louvain_two_blocks_detects_2_communities() {
        let g = make_two_blocks();
        let detection = louvain_communities(&g, &AnalyticsConfig::default());

        assert_eq!(detection.partition.len(), 12);
        assert_eq!(
            detection.communities.len(),
            2,
            "Expected 2 communities, got {:?}",
            detection.communities
        );
        assert!(detection.modularity > 0.4, "got {}", detection.modularity);

        let a = detection.partition["a_u0"];
        let b = detection.partition["b_u0"];
        assert_ne!(a, b);
        for (id, &label) in detection.partition.iter() {
            let expected = if id.starts_with("a_") { a } else { b };
            assert_eq!(label, expected, "node {id} in wrong community");
        }
        assert_eq!(detection.communities[0].size, 6);
        assert_eq!(detection.communities[1].size, 6);
    }

    #[test]
    fn test_louvain_second_level_merges_pairs_into_blocks() {
        let g = make_block_ring();
        let detection = louvain_communities(&g, &AnalyticsConfig::default());

        // Level 0 pairs nodes up; only the aggregated level recovers the blocks.
        assert_eq!(detection.levels, 2);
        assert_eq!(detection.communities.len(), 8);
        assert!((detection.modularity - 0.675).abs() < 1e-9);
        for b in 0..8 {
            let label = detection.partition[format!("u{b}_0").as_str()];
            for id in [format!("u{b}_1"), format!("c{b}_0"), format!("c{b}_1")] {
                assert_eq!(detection.partition[id.as_str()], label, "node {id}");
            }
        }

        let single_level = AnalyticsConfig {
            louvain_max_levels: 1,
            ..AnalyticsConfig::default()
        };
        let first = louvain_communities(&g, &single_level);
        assert_eq!(first.levels, 1);
        assert_eq!(first.communities.len(), 16);
        assert!((first.modularity - 0.3375).abs() < 1e-9);
        assert!(first.modularity < detection.modularity);
    }

    #[test]
    fn test_louvain_star_single_community() {
        let g = make_star(5);
        let detection = louvain_communities(&g, &AnalyticsConfig::default());
        assert_eq!(detection.communities.len(), 1);
        assert_eq!(detection.communities[0].size, 6);
        assert!(detection.modularity.abs() < 1e-9);
    }

    #[test]
    fn test_louvain_isolated_nodes_are_singletons() {
        let g = graph_from(
            &["U1", "U2", "lonely_user"],
            &["C1", "lonely_item"],
            &[("U1", "C1", 1.0), ("U2", "C1", 1.0)],
        );
        let detection = louvain_communities(&g, &AnalyticsConfig::default());
        let p = &detection.partition;

        assert_eq!(p.len(), 5);
        assert_eq!(p["U1"], p["C1"]);
        assert_eq!(p["U2"], p["C1"]);
        assert_ne!(p["lonely_user"], p["U1"]);
        assert_ne!(p["lonely_item"], p["U1"]);
        assert_ne!(p["lonely_user"], p["lonely_item"]);
        assert_eq!(detection.communities.len(), 3);
    }

    #[test]
    fn test_louvain_edgeless_graph() {
        let g = graph_from(&["U1"], &["C1", "C2"], &[]);
        let detection = louvain_communities(&g, &AnalyticsConfig::default());
        assert_eq!(
            detection.partition.values().copied().collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert_eq!(detection.levels, 0);
        assert_eq!(detection.modularity, 0.0);
    }

    #[test]
    fn test_louvain_empty_graph() {
        let g = InteractionGraph::new();
        let detection = louvain_communities(&g, &AnalyticsConfig::default());
        assert!(detection.partition.is_empty());
        assert!(detection.communities.is_empty());
    }

    #[test]
    fn test_louvain_zero_levels_keeps_singletons() {
        let g = make_two_blocks();
        let config = AnalyticsConfig {
            louvain_max_levels: 0,
            ..AnalyticsConfig::default()
        };
        let detection = louvain_communities(&g, &config);
        assert_eq!(detection.communities.len(), 12);
    }

    #[test]
    fn test_louvain_deterministic() {
        let g = make_two_blocks();
        let config = AnalyticsConfig::default();
        let first = detect_communities(&g, &config);
        for _ in 0..5 {
            assert_eq!(detect_communities(&g, &config), first);
        }
    }

    // --- Modularity ---

    #[test]
    fn test_modularity_of_detected_partition_matches() {
        let g = make_two_blocks();
        let detection = louvain_communities(&g, &AnalyticsConfig::default());
        let q = modularity(&g, &detection.partition);
        assert!((q - detection.modularity).abs() < 1e-12);
    }

    #[test]
    fn test_modularity_single_community_is_zero() {
        let g = make_two_blocks();
        let all_in_one: Partition = g.node_ids().map(|id| (id.to_string(), 0)).collect();
        assert!(modularity(&g, &all_in_one).abs() < 1e-12);
    }

    // --- Degree Centrality ---

    #[test]
    fn test_degree_centrality_star() {
        let g = make_star(4);
        let scores = degree_centrality(&g);
        assert_eq!(scores.len(), 5);
        assert!((scores["center"] - 1.0).abs() < f64::EPSILON);
        assert!((scores["leaf_0"] - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_degree_centrality_bounds_and_degree_sum() {
        let g = make_two_blocks();
        let scores = degree_centrality(&g);
        assert!(scores.values().all(|&s| (0.0..=1.0).contains(&s)));

        let total: usize = raw_degrees(&g).values().sum();
        assert_eq!(total, 2 * g.edge_count());
    }

    #[test]
    fn test_degree_centrality_single_and_empty() {
        let g = graph_from(&["U1"], &[], &[]);
        let scores = degree_centrality(&g);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores["U1"], 0.0);
        assert!(degree_centrality(&InteractionGraph::new()).is_empty());
    }

    #[test]
    fn test_top_k_ties_by_insertion_order() {
        let g = graph_from(
            &["U1", "U2"],
            &["C1", "C2"],
            &[("U1", "C1", 1.0), ("U2", "C2", 1.0), ("U2", "C1", 1.0)],
        );
        let scores = degree_centrality(&g);
        let top = top_k(&scores, 3);
        let ids: Vec<&str> = top.iter().map(|(id, _)| id.as_str()).collect();
        // U2 and C1 have degree 2; U2 was inserted first
        assert_eq!(ids, vec!["U2", "C1", "U1"]);
        assert_eq!(top_k(&scores, 10).len(), 4);
        assert!(top_k(&scores, 0).is_empty());
    }

    // --- compute_all ---

    #[test]
    fn test_compute_all_assembles_all_metrics() {
        let g = make_two_blocks();
        let analytics = compute_all(&g, &AnalyticsConfig::default());

        assert_eq!(analytics.node_count, 12);
        assert_eq!(analytics.edge_count, 19);
        assert_eq!(analytics.metrics.len(), 12);
        assert_eq!(analytics.communities.len(), 2);

        let hub = &analytics.metrics["a_u0"];
        assert_eq!(hub.kind, NodeKind::Consumer);
        assert_eq!(hub.out_degree, 4);
        assert_eq!(hub.in_degree, 0);
        assert!((hub.degree_centrality - 4.0 / 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_compute_all_empty_graph() {
        let analytics = compute_all(&InteractionGraph::new(), &AnalyticsConfig::default());
        assert_eq!(analytics.node_count, 0);
        assert_eq!(analytics.edge_count, 0);
        assert!(analytics.metrics.is_empty());
        assert!(analytics.communities.is_empty());
    }

    // --- Benchmark Test ---

    #[test]
    fn test_benchmark_compute_all_1000_nodes() {
        let mut g = InteractionGraph::with_capacity(1000, 2000);
        let consumers: Vec<String> = (0..500).map(|i| format!("user_{i}")).collect();
        let contents: Vec<String> = (0..500).map(|i| format!("item_{i}")).collect();
        for id in &consumers {
            g.add_node(id, NodeKind::Consumer).unwrap();
        }
        for id in &contents {
            g.add_node(id, NodeKind::Content).unwrap();
        }
        for i in 0..500 {
            for offset in [0, 7, 31, 127] {
                g.add_edge(&consumers[i], &contents[(i + offset) % 500], 1.0)
                    .unwrap();
            }
        }
        assert_eq!(g.edge_count(), 2000);

        let start = std::time::Instant::now();
        let analytics = compute_all(&g, &AnalyticsConfig::default());
        let elapsed = start.elapsed();

        assert_eq!(analytics.metrics.len(), 1000);
        assert!(!analytics.communities.is_empty());
        assert!(
            elapsed.as_millis() < 5000,
            "compute_all on 1000 nodes took {}ms (limit: 5000ms for debug build)",
            elapsed.as_millis()
        );
    }
}
