//! Human-readable reports.
//!
//! Maps node ids to display names and shapes algorithm outputs for the
//! presentation layer. No graph logic lives here.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::graph::algorithms::top_k;
use crate::graph::models::{CentralityScores, Partition, ScoredContent};
use crate::source::Snapshot;

/// Display names by node id.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    names: HashMap<String, String>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the names of every consumer and content record.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let consumers = snapshot.consumers.iter().map(|c| (&c.id, &c.name));
        let contents = snapshot.contents.iter().map(|c| (&c.id, &c.name));
        consumers
            .chain(contents)
            .map(|(id, name)| (id.clone(), name.clone()))
            .collect()
    }

    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.names.insert(id.into(), name.into());
    }

    /// Display name for `id`, or the id itself when none is known.
    pub fn name_of<'a>(&'a self, id: &'a str) -> &'a str {
        self.names.get(id).map(String::as_str).unwrap_or(id)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<(String, String)> for NameTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

/// A recommended content node ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationEntry {
    pub content_id: String,
    pub display_name: String,
    pub score: f64,
}

/// A ranked node ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CentralityEntry {
    pub node_id: String,
    pub display_name: String,
    pub score: f64,
}

pub fn format_recommendations(
    recommendations: &[ScoredContent],
    names: &NameTable,
) -> Vec<RecommendationEntry> {
    recommendations
        .iter()
        .map(|rec| RecommendationEntry {
            content_id: rec.id.clone(),
            display_name: names.name_of(&rec.id).to_string(),
            score: rec.score,
        })
        .collect()
}

/// Group display names by community label. Members keep node insertion order.
pub fn format_communities(
    partition: &Partition,
    names: &NameTable,
) -> BTreeMap<u32, Vec<String>> {
    let mut groups: BTreeMap<u32, Vec<String>> = BTreeMap::new();
    for (id, &label) in partition.iter() {
        groups
            .entry(label)
            .or_default()
            .push(names.name_of(id).to_string());
    }
    groups
}

/// The `k` most central nodes with their display names.
pub fn format_centrality(
    scores: &CentralityScores,
    names: &NameTable,
    k: usize,
) -> Vec<CentralityEntry> {
    top_k(scores, k)
        .into_iter()
        .map(|(id, score)| CentralityEntry {
            display_name: names.name_of(&id).to_string(),
            node_id: id,
            score,
        })
        .collect()
}

pub fn render_recommendations(entries: &[RecommendationEntry]) -> String {
    if entries.is_empty() {
        return "(no recommendations available)\n".to_string();
    }
    entries
        .iter()
        .map(|e| format!("- {}\n", e.display_name))
        .collect()
}

pub fn render_communities(groups: &BTreeMap<u32, Vec<String>>) -> String {
    let mut out = String::new();
    for (label, members) in groups {
        out.push_str(&format!("Community {label}:\n"));
        for name in members {
            out.push_str(&format!("  - {name}\n"));
        }
        out.push('\n');
    }
    out
}

pub fn render_centrality(entries: &[CentralityEntry]) -> String {
    let mut out = format!("Top {} nodes by degree centrality:\n", entries.len());
    for e in entries {
        out.push_str(&format!("  - {}: {:.4}\n", e.display_name, e.score));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> NameTable {
        let mut names = NameTable::new();
        names.insert("U1", "Ana");
        names.insert("C1", "Radiohead");
        names
    }

    #[test]
    fn test_name_of_falls_back_to_id() {
        let names = names();
        assert_eq!(names.name_of("U1"), "Ana");
        assert_eq!(names.name_of("U7"), "U7");
    }

    #[test]
    fn test_name_table_from_snapshot() {
        let snapshot: Snapshot = serde_yaml::from_str(
            "consumers: [{id: U1, name: Ana}]\ncontents: [{id: C1, name: Radiohead}]\n",
        )
        .unwrap();
        let names = NameTable::from_snapshot(&snapshot);
        assert_eq!(names.len(), 2);
        assert_eq!(names.name_of("C1"), "Radiohead");
    }

    #[test]
    fn test_format_communities_groups_by_label() {
        let partition: Partition = vec![
            ("U1".to_string(), 1),
            ("U2".to_string(), 0),
            ("C1".to_string(), 1),
        ]
        .into_iter()
        .collect();
        let groups = format_communities(&partition, &names());

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[&0], vec!["U2"]);
        assert_eq!(groups[&1], vec!["Ana", "Radiohead"]);
        assert_eq!(
            render_communities(&groups),
            "Community 0:\n  - U2\n\nCommunity 1:\n  - Ana\n  - Radiohead\n\n"
        );
    }

    #[test]
    fn test_format_centrality_top_k() {
        let scores: CentralityScores = vec![
            ("U1".to_string(), 0.5),
            ("C1".to_string(), 1.0),
            ("C2".to_string(), 0.5),
        ]
        .into_iter()
        .collect();
        let entries = format_centrality(&scores, &names(), 2);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].display_name, "Radiohead");
        assert_eq!(entries[1].node_id, "U1");
        assert_eq!(
            render_centrality(&entries),
            "Top 2 nodes by degree centrality:\n  - Radiohead: 1.0000\n  - Ana: 0.5000\n"
        );
    }

    #[test]
    fn test_format_recommendations() {
        let recs = vec![ScoredContent {
            id: "C1".to_string(),
            score: 5.0,
        }];
        let entries = format_recommendations(&recs, &names());
        assert_eq!(entries[0].display_name, "Radiohead");
        assert_eq!(render_recommendations(&entries), "- Radiohead\n");
        assert_eq!(
            render_recommendations(&[]),
            "(no recommendations available)\n"
        );
    }
}
