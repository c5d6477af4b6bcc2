//! Storage trait for entries

use crate::{Entry, Result};
use async_trait::async_trait;

/// Entry store
///
/// Implementations keep entries newest first: `create` puts the new entry at
/// the head and `list` returns the whole collection in that order.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Short backend name used in logs.
    fn backend(&self) -> &'static str;

    async fn list(&self) -> Result<Vec<Entry>>;

    /// Store a new entry. `text` must already be normalised with
    /// [`crate::normalize_text`].
    async fn create(&self, text: String) -> Result<Entry>;

    /// Remove one entry by id, failing with `EntryNotFound` if none matches.
    async fn delete(&self, id: &str) -> Result<()>;
}
