// ── Tagged response cache ──
//
// Stores serialized response bodies keyed by route, each with a lifetime
// and a set of invalidation tags. Time comes from the tokio clock so a
// paused runtime controls expiry.
//
// Misses are filled under a per-key lock, so concurrent requests for a cold
// key share one producer run. Every tag carries a generation that
// invalidation bumps; a fill that overlaps an invalidation of one of its
// tags is returned to its caller but not kept.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use bytes::Bytes;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

struct CachedBody {
    body: Bytes,
    tags: Vec<String>,
    stored_at: Instant,
    ttl: Duration,
    generation: u64,
}

impl CachedBody {
    fn is_fresh(&self, now: Instant) -> bool {
        now.duration_since(self.stored_at) < self.ttl
    }
}

/// Concurrent key → body cache with time-based expiry and tag invalidation.
///
/// Cheap to clone; clones share storage.
#[derive(Clone, Default)]
pub struct ResponseCache {
    entries: Arc<DashMap<String, CachedBody>>,
    fills: Arc<DashMap<String, Arc<Mutex<()>>>>,
    tag_generations: Arc<DashMap<String, u64>>,
    epoch: Arc<AtomicU64>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh body for `key`, dropping it if it has expired.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        let now = Instant::now();
        if let Some(hit) = self.entries.get(key) {
            if hit.is_fresh(now) {
                return Some(hit.body.clone());
            }
        }
        self.entries.remove_if(key, |_, cached| !cached.is_fresh(now));
        None
    }

    pub fn insert(&self, key: &str, tags: &[&str], ttl: Duration, body: Bytes) {
        let generation = self.generation(tags);
        self.store(key, tags, ttl, body, generation);
    }

    /// Return the cached body or run `produce`, storing its output on success.
    ///
    /// Concurrent misses on the same key wait for a single `produce` run.
    /// Errors are returned as-is and never cached.
    pub async fn get_or_try_insert<F, Fut, E>(
        &self,
        key: &str,
        tags: &[&str],
        ttl: Duration,
        produce: F,
    ) -> Result<Bytes, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Bytes, E>>,
    {
        if let Some(body) = self.get(key) {
            debug!(key, "cache hit");
            return Ok(body);
        }

        let lock = self.fills.entry(key.to_owned()).or_default().clone();
        let _fill = lock.lock().await;
        if let Some(body) = self.get(key) {
            debug!(key, "cache hit after concurrent fill");
            return Ok(body);
        }

        debug!(key, "cache miss");
        let generation = self.generation(tags);
        let body = produce().await?;
        self.store(key, tags, ttl, body.clone(), generation);
        Ok(body)
    }

    /// Drop every entry carrying `tag`, including fills still in flight.
    /// Returns how many stored entries were removed.
    pub fn invalidate_tag(&self, tag: &str) -> usize {
        *self.tag_generations.entry(tag.to_owned()).or_insert(0) += 1;

        let before = self.entries.len();
        self.entries
            .retain(|_, cached| !cached.tags.iter().any(|t| t == tag));
        let removed = before.saturating_sub(self.entries.len());
        debug!(tag, removed, "invalidated cache tag");
        removed
    }

    /// Drop everything. Returns how many stored entries were removed.
    pub fn invalidate_all(&self) -> usize {
        self.epoch.fetch_add(1, Ordering::SeqCst);

        let removed = self.entries.len();
        self.entries.clear();
        debug!(removed, "invalidated all cache entries");
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // ── Generations ─────────────────────────────────────────────────

    /// Sum of the global epoch and the generations of `tags`. Any
    /// invalidation touching these tags strictly increases it.
    fn generation(&self, tags: &[&str]) -> u64 {
        tags.iter()
            .map(|tag| self.tag_generations.get(*tag).map_or(0, |g| *g))
            .fold(self.epoch.load(Ordering::SeqCst), u64::wrapping_add)
    }

    /// Store `body` stamped with the generation read before it was produced.
    ///
    /// Inserts first, then re-reads the generation: an invalidation that
    /// raced the insert either sees the entry in its `retain`, or bumped
    /// the generation before the re-read and the entry is removed here.
    fn store(&self, key: &str, tags: &[&str], ttl: Duration, body: Bytes, generation: u64) {
        self.entries.insert(
            key.to_owned(),
            CachedBody {
                body,
                tags: tags.iter().map(|t| (*t).to_owned()).collect(),
                stored_at: Instant::now(),
                ttl,
                generation,
            },
        );
        if self.generation(tags) != generation {
            self.entries
                .remove_if(key, |_, cached| cached.generation == generation);
            debug!(key, "discarded body invalidated while it was produced");
        }
    }
}
