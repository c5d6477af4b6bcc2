//! In-memory entry store

use async_trait::async_trait;
use stash_core::{Entry, EntryStore, Result, StashError};
use std::collections::VecDeque;
use tokio::sync::RwLock;
use tracing::debug;

/// Process-local entry list, newest first. Never fails.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<VecDeque<Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn list(&self) -> Result<Vec<Entry>> {
        let entries = self.entries.read().await;
        Ok(entries.iter().cloned().collect())
    }

    async fn create(&self, text: String) -> Result<Entry> {
        let entry = Entry::new(text);
        self.entries.write().await.push_front(entry.clone());
        debug!("Stored entry {} in memory", entry.id);
        Ok(entry)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        let index = entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or_else(|| StashError::EntryNotFound(id.to_string()))?;
        entries.remove(index);
        Ok(())
    }
}
