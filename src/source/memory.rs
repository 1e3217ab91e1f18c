//! In-memory record source.
//!
//! Keeps records in `tokio::sync::RwLock<Vec<_>>` collections so a store can
//! be filled and read from async code without external synchronization.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ConsumerRecord, ContentRecord, InteractionRecord, InteractionSource};
use crate::error::Result;

/// In-process implementation of [`InteractionSource`].
#[derive(Default)]
pub struct InMemorySource {
    pub consumers: RwLock<Vec<ConsumerRecord>>,
    pub contents: RwLock<Vec<ContentRecord>>,
    pub interactions: RwLock<Vec<InteractionRecord>>,
}

impl InMemorySource {
    /// Create a new empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source pre-filled with the given records.
    pub fn with_records(
        consumers: Vec<ConsumerRecord>,
        contents: Vec<ContentRecord>,
        interactions: Vec<InteractionRecord>,
    ) -> Self {
        Self {
            consumers: RwLock::new(consumers),
            contents: RwLock::new(contents),
            interactions: RwLock::new(interactions),
        }
    }

    pub async fn add_consumer(&self, id: &str, name: &str) {
        self.consumers.write().await.push(ConsumerRecord {
            id: id.to_string(),
            name: name.to_string(),
        });
    }

    pub async fn add_content(&self, id: &str, name: &str) {
        self.contents.write().await.push(ContentRecord {
            id: id.to_string(),
            name: name.to_string(),
        });
    }

    pub async fn add_interaction(&self, consumer_id: &str, content_id: &str, weight: f64) {
        self.interactions
            .write()
            .await
            .push(InteractionRecord::new(consumer_id, content_id, weight));
    }
}

#[async_trait]
impl InteractionSource for InMemorySource {
    async fn consumers(&self) -> Result<Vec<ConsumerRecord>> {
        Ok(self.consumers.read().await.clone())
    }

    async fn contents(&self) -> Result<Vec<ContentRecord>> {
        Ok(self.contents.read().await.clone())
    }

    async fn interactions(&self) -> Result<Vec<InteractionRecord>> {
        Ok(self.interactions.read().await.clone())
    }
}
