//! Interaction record sources.
//!
//! The analytics engine never talks to a database directly: it reads a full
//! snapshot of consumer, content and interaction records through the
//! [`InteractionSource`] trait.
//!
//! - [`memory`] — `InMemorySource`, a lock-guarded in-process store
//! - [`snapshot`] — `SnapshotSource`, a JSON or YAML snapshot file

pub mod memory;
pub mod snapshot;

pub use memory::InMemorySource;
pub use snapshot::{Snapshot, SnapshotSource};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A consumer as stored by the record source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumerRecord {
    pub id: String,
    pub name: String,
}

/// A content (producer) node as stored by the record source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: String,
    pub name: String,
}

/// A weighted interaction between a consumer and a content node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    #[serde(alias = "consumerId")]
    pub consumer_id: String,
    #[serde(alias = "contentId")]
    pub content_id: String,
    /// Missing weights default to `DEFAULT_WEIGHT`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl InteractionRecord {
    pub fn new(consumer_id: &str, content_id: &str, weight: f64) -> Self {
        Self {
            consumer_id: consumer_id.to_string(),
            content_id: content_id.to_string(),
            weight: Some(weight),
        }
    }
}

/// Abstract interface over the external record store.
///
/// Each call returns the full record set in the store's natural order; that
/// order becomes the graph's insertion order.
#[async_trait]
pub trait InteractionSource: Send + Sync {
    /// All consumer records
    async fn consumers(&self) -> Result<Vec<ConsumerRecord>>;

    /// All content records
    async fn contents(&self) -> Result<Vec<ContentRecord>>;

    /// All interaction records
    async fn interactions(&self) -> Result<Vec<InteractionRecord>>;

    /// The three collections together. Sources that can read them in one go
    /// should override this.
    async fn snapshot(&self) -> Result<Snapshot> {
        Ok(Snapshot {
            consumers: self.consumers().await?,
            contents: self.contents().await?,
            interactions: self.interactions().await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interaction_record_accepts_camel_case_and_missing_weight() {
        let json = r#"{"consumerId": "U1", "contentId": "C1"}"#;
        let record: InteractionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.consumer_id, "U1");
        assert_eq!(record.content_id, "C1");
        assert_eq!(record.weight, None);

        let json = r#"{"consumer_id": "U2", "content_id": "C2", "weight": 4.5}"#;
        let record: InteractionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record, InteractionRecord::new("U2", "C2", 4.5));
    }
}
