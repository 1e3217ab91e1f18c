//! Snapshot-file record source.
//!
//! A snapshot holds the three record collections in one document:
//!
//! ```yaml
//! consumers:
//!   - { id: U1, name: Ana }
//! contents:
//!   - { id: C1, name: Radiohead }
//! interactions:
//!   - { consumer_id: U1, content_id: C1, weight: 3 }
//! ```
//!
//! `.yaml` / `.yml` files are parsed as YAML, everything else as JSON.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{ConsumerRecord, ContentRecord, InteractionRecord, InteractionSource};
use crate::error::Result;

/// The full record set of one analytics run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub consumers: Vec<ConsumerRecord>,
    pub contents: Vec<ContentRecord>,
    pub interactions: Vec<InteractionRecord>,
}

impl Snapshot {
    /// Parse a snapshot, picking the format from the file extension.
    pub fn parse(path: &Path, contents: &str) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(contents)?),
            _ => Ok(serde_json::from_str(contents)?),
        }
    }
}

/// Reads records from a snapshot file. The file is re-read on every call so
/// each analytics run sees the file's current content.
pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load and parse the snapshot file.
    pub async fn load(&self) -> Result<Snapshot> {
        let contents = tokio::fs::read_to_string(&self.path).await?;
        let snapshot = Snapshot::parse(&self.path, &contents)?;
        tracing::debug!(
            path = %self.path.display(),
            consumers = snapshot.consumers.len(),
            contents = snapshot.contents.len(),
            interactions = snapshot.interactions.len(),
            "Loaded snapshot"
        );
        Ok(snapshot)
    }
}

#[async_trait]
impl InteractionSource for SnapshotSource {
    async fn consumers(&self) -> Result<Vec<ConsumerRecord>> {
        Ok(self.load().await?.consumers)
    }

    async fn contents(&self) -> Result<Vec<ContentRecord>> {
        Ok(self.load().await?.contents)
    }

    async fn interactions(&self) -> Result<Vec<InteractionRecord>> {
        Ok(self.load().await?.interactions)
    }

    async fn snapshot(&self) -> Result<Snapshot> {
        self.load().await
    }
}
