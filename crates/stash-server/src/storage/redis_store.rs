//! Redis-backed entry store
//!
//! Entries live as JSON strings in a single Redis list. New entries are
//! `LPUSH`ed, so `LRANGE 0 -1` already yields newest first.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisError};
use stash_core::{Entry, EntryStore, Result, StashError};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

pub struct RedisStore {
    client: Client,
    key: String,
    conn: Mutex<Option<ConnectionManager>>,
}

impl RedisStore {
    /// Validate `url` and prepare a store for list `key`.
    ///
    /// No connection is made here; see [`RedisStore::connect`].
    pub fn new(url: &str, key: impl Into<String>) -> Result<Self> {
        let client = Client::open(url)
            .map_err(|e| StashError::Config(format!("Invalid Redis URL {}: {}", url, e)))?;
        Ok(Self {
            client,
            key: key.into(),
            conn: Mutex::new(None),
        })
    }

    /// Try to connect up front. Failure is only logged; the next request
    /// makes its own single attempt.
    pub async fn connect(&self) {
        match self.connection().await {
            Ok(_) => info!("Connected to Redis, list key '{}'", self.key),
            Err(e) => warn!("Redis not reachable at startup: {}", e),
        }
    }

    async fn connection(&self) -> Result<ConnectionManager> {
        if let Some(conn) = self.conn.lock().await.as_ref() {
            return Ok(conn.clone());
        }

        // One attempt, no backoff; the lock is not held while connecting.
        debug!("Opening Redis connection");
        let conn = ConnectionManager::new_with_backoff(self.client.clone(), 2, 100, 0)
            .await
            .map_err(classify)?;

        let mut guard = self.conn.lock().await;
        Ok(guard.get_or_insert(conn).clone())
    }

    async fn raw_entries(&self, conn: &mut ConnectionManager) -> Result<Vec<String>> {
        conn.lrange(&self.key, 0, -1).await.map_err(classify)
    }
}

#[async_trait]
impl EntryStore for RedisStore {
    fn backend(&self) -> &'static str {
        "redis"
    }

    async fn list(&self) -> Result<Vec<Entry>> {
        let mut conn = self.connection().await?;
        let raw = self.raw_entries(&mut conn).await?;
        decode_all(&raw)
    }

    async fn create(&self, text: String) -> Result<Entry> {
        let entry = Entry::new(text);
        let payload = serde_json::to_string(&entry)?;

        let mut conn = self.connection().await?;
        let _: i64 = conn.lpush(&self.key, payload).await.map_err(classify)?;
        debug!("Pushed entry {} onto '{}'", entry.id, self.key);
        Ok(entry)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut conn = self.connection().await?;
        let raw = self.raw_entries(&mut conn).await?;
        let target = find_raw(&raw, id)?
            .ok_or_else(|| StashError::EntryNotFound(id.to_string()))?;

        // Not atomic with the read above: another client may have removed it.
        let removed: i64 = conn.lrem(&self.key, 1, target).await.map_err(classify)?;
        if removed == 0 {
            return Err(StashError::EntryNotFound(id.to_string()));
        }
        Ok(())
    }
}

fn decode_all(raw: &[String]) -> Result<Vec<Entry>> {
    raw.iter()
        .map(|item| serde_json::from_str::<Entry>(item).map_err(StashError::from))
        .collect()
}

/// First raw list element whose entry has `id`. Every element must decode.
fn find_raw<'a>(raw: &'a [String], id: &str) -> Result<Option<&'a str>> {
    let entries = decode_all(raw)?;
    Ok(entries
        .iter()
        .zip(raw)
        .find(|(entry, _)| entry.id == id)
        .map(|(_, item)| item.as_str()))
}

fn classify(err: RedisError) -> StashError {
    if err.is_io_error()
        || err.is_connection_refusal()
        || err.is_connection_dropped()
        || err.is_timeout()
    {
        StashError::StoreUnavailable(err.to_string())
    } else {
        StashError::Storage(err.to_string())
    }
}
