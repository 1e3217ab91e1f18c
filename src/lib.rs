//! Graph Analytics
//!
//! In-process analytics over a consumer → content interaction graph:
//! - petgraph-backed bipartite graph with weighted, validated edges
//! - Neighborhood-aggregation content recommendations
//! - Louvain community detection and modularity
//! - Degree centrality ranking
//! - Record sources behind an async trait (in-memory, JSON/YAML snapshot files)

pub mod error;
pub mod graph;
pub mod report;
pub mod source;

pub use error::{Error, Result};
pub use graph::{AnalyticsConfig, AnalyticsEngine, GraphAnalyticsEngine, InteractionGraph};

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use crate::source::{InMemorySource, InteractionSource, SnapshotSource};

// ============================================================================
// YAML config structs (deserialization targets)
// ============================================================================

/// Top-level YAML configuration file structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub analytics: AnalyticsConfig,
    pub source: SourceYamlConfig,
}

/// Record source configuration section
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SourceYamlConfig {
    /// JSON or YAML snapshot file; no path means an empty in-memory source
    pub snapshot_path: Option<PathBuf>,
}

// ============================================================================
// Runtime config (what the application actually uses)
// ============================================================================

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub analytics: AnalyticsConfig,
    pub snapshot_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from an optional YAML file, then override with env vars.
    ///
    /// Priority: env var > YAML > default
    ///
    /// If `yaml_path` is None, tries "config.yaml" in CWD. If the file doesn't
    /// exist, falls back to pure env var / defaults. A file passed explicitly
    /// that fails to parse is an error.
    pub fn from_yaml_and_env(yaml_path: Option<&Path>) -> Result<Self> {
        // 1. Load YAML config (or defaults if file not found)
        let yaml = Self::load_yaml(yaml_path)?;
        let mut analytics = yaml.analytics;

        // 2. Env var overrides
        if let Some(v) = env_parse("ANALYTICS_RESOLUTION") {
            analytics.louvain_resolution = v;
        }
        if let Some(v) = env_parse("ANALYTICS_MAX_PASSES") {
            analytics.louvain_max_passes = v;
        }
        if let Some(v) = env_parse("ANALYTICS_MAX_LEVELS") {
            analytics.louvain_max_levels = v;
        }
        if let Some(v) = env_parse("ANALYTICS_RECOMMENDATION_LIMIT") {
            analytics.recommendation_limit = v;
        }
        if let Some(v) = env_parse("ANALYTICS_CENTRALITY_TOP_K") {
            analytics.centrality_top_k = v;
        }
        if let Ok(v) = std::env::var("ANALYTICS_STRICT") {
            analytics.strict_interactions = matches!(v.as_str(), "1" | "true" | "yes");
        }

        // 3. Louvain needs a finite, non-negative resolution
        let resolution = analytics.louvain_resolution;
        if !resolution.is_finite() || resolution < 0.0 {
            let fallback = AnalyticsConfig::default().louvain_resolution;
            tracing::warn!(
                "Invalid louvain_resolution {}, using {}",
                resolution,
                fallback
            );
            analytics.louvain_resolution = fallback;
        }

        Ok(Self {
            analytics,
            snapshot_path: std::env::var("ANALYTICS_SNAPSHOT")
                .ok()
                .map(PathBuf::from)
                .or(yaml.source.snapshot_path),
        })
    }

    /// The record source this configuration points at.
    pub fn source(&self) -> Arc<dyn InteractionSource> {
        match &self.snapshot_path {
            Some(path) => Arc::new(SnapshotSource::new(path)),
            None => {
                tracing::warn!("No snapshot configured, using an empty in-memory source");
                Arc::new(InMemorySource::new())
            }
        }
    }

    /// Build an analytics engine over the configured source.
    pub fn engine(&self) -> GraphAnalyticsEngine {
        GraphAnalyticsEngine::new(self.source(), self.analytics.clone())
    }

    /// Try to load and parse a YAML config file. A missing file, or a broken
    /// implicit `config.yaml`, yields defaults.
    fn load_yaml(yaml_path: Option<&Path>) -> Result<YamlConfig> {
        let default_path = Path::new("config.yaml");
        let path = yaml_path.unwrap_or(default_path);

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    Ok(config)
                }
                Err(e) if yaml_path.is_some() => Err(e.into()),
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                    Ok(YamlConfig::default())
                }
            },
            Err(_) => {
                tracing::debug!(
                    "No config file at {}, using env vars / defaults",
                    path.display()
                );
                Ok(YamlConfig::default())
            }
        }
    }
}

/// Parse an env var, ignoring it when unset or malformed.
fn env_parse<T: FromStr>(var: &str) -> Option<T> {
    let raw = std::env::var(var).ok()?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!("Ignoring malformed {}={}", var, raw);
            None
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
