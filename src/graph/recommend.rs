//! Neighborhood-aggregation recommendations.
//!
//! Every other consumer votes for the content it interacted with and the
//! target consumer has not seen yet, with its edge weight as the vote. Votes
//! are summed per content node and ranked.

use petgraph::graph::NodeIndex;
use std::collections::HashSet;

use super::models::{NodeKind, ScoredContent};
use super::store::InteractionGraph;
use crate::error::{Error, Result};

/// Recommend up to `limit` unseen content nodes for `consumer`.
///
/// Candidates are ordered by score descending, ties by node insertion order.
/// Returns `UnknownConsumer` if `consumer` is not a consumer node of `graph`.
pub fn recommend(
    graph: &InteractionGraph,
    consumer: &str,
    limit: usize,
) -> Result<Vec<ScoredContent>> {
    let target = match graph.get_index(consumer) {
        Some(idx) if graph.graph[idx].kind == NodeKind::Consumer => idx,
        _ => return Err(Error::UnknownConsumer(consumer.to_string())),
    };

    let g = &graph.graph;
    let seen: HashSet<_> = graph.successor_indices(target).into_iter().collect();

    // Indexed by node index so the final sort can fall back on insertion order.
    let mut scores: Vec<Option<f64>> = vec![None; g.node_count()];

    for other in g.node_indices() {
        if other == target || g[other].kind != NodeKind::Consumer {
            continue;
        }
        for (content, weight) in graph.weighted_successors(other) {
            if seen.contains(&content) {
                continue;
            }
            *scores[content.index()].get_or_insert(0.0) += weight;
        }
    }

    let mut candidates: Vec<(usize, f64)> = scores
        .into_iter()
        .enumerate()
        .filter_map(|(i, s)| s.map(|s| (i, s)))
        .collect();
    // Stable sort: equal scores keep ascending node index.
    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
    candidates.truncate(limit);

    tracing::debug!(
        consumer,
        seen = seen.len(),
        returned = candidates.len(),
        "Computed recommendations"
    );

    Ok(candidates
        .into_iter()
        .map(|(i, score)| ScoredContent {
            id: g[NodeIndex::new(i)].id.clone(),
            score,
        })
        .collect())
}

// ============================================================================
// Tests
// ============================================================================
