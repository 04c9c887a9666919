use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use crate::models::PairRecord;
use crate::sources::FetchError;

/// Outcome of one fetch, shared between callers without copying the JSON.
pub type FetchOutcome = Result<Arc<PairRecord>, FetchError>;

struct CacheEntry {
    outcome: FetchOutcome,
    stored_at: Instant,
}

/// Fetch outcomes keyed by (chain, lower-cased address). Entries older than
/// the TTL are ignored on read and dropped by [`PairCache::purge_expired`].
pub struct PairCache {
    entries: RwLock<HashMap<(String, String), CacheEntry>>,
    ttl: Duration,
}

impl PairCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn get(&self, chain: &str, address: &str) -> Option<FetchOutcome> {
        let entries = self.entries.read();
        let entry = entries.get(&(chain.to_string(), address.to_string()))?;
        if entry.stored_at.elapsed() >= self.ttl {
            return None;
        }
        Some(entry.outcome.clone())
    }

    /// Stores an outcome. Returns true when it replaced an entry that was
    /// still fresh, i.e. another caller fetched the same key concurrently.
    pub fn insert(&self, chain: &str, address: &str, outcome: FetchOutcome) -> bool {
        let mut entries = self.entries.write();
        let previous = entries.insert(
            (chain.to_string(), address.to_string()),
            CacheEntry {
                outcome,
                stored_at: Instant::now(),
            },
        );
        previous.map_or(false, |entry| entry.stored_at.elapsed() < self.ttl)
    }

    pub fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);

        let removed = before - entries.len();
        if removed > 0 {
            tracing::debug!("🧹 Cleaned {} expired pairs", removed);
        }
        removed
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }
}
