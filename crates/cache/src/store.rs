//! Bounded least-recently-used cache for rendered output.

use crate::digest::ContentDigest;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};

/// Default number of rendered documents retained.
fn default_capacity() -> usize {
    128
}

/// Configuration for a [`RenderCache`].
///
/// Deserializable so the editor's preference layer can load it straight from
/// its settings store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderCacheConfig {
    /// Maximum number of rendered documents retained. Zero disables retention
    /// entirely: every render is a miss and nothing is stored.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for RenderCacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

/// Counters accumulated since construction or the last [`RenderCache::clear`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Renders served from the cache without invoking the transform.
    pub hits: u64,
    /// Renders that had to invoke the transform.
    pub misses: u64,
    /// Entries removed to stay within capacity.
    pub evictions: u64,
}

struct Entry {
    output: String,
    last_accessed: u64,
}

/// Thread-safe render cache with least-recently-used eviction.
///
/// The store is internally synchronized: interactive edit events and
/// background refresh timers may call [`render_with`](Self::render_with)
/// concurrently without external locking. The transform always runs outside
/// the lock, so a slow render never stalls unrelated callers; concurrent
/// misses for the same digest may therefore compute redundantly (last insert
/// wins). Callers receive owned copies of the output, never a handle into
/// the store.
pub struct RenderCache {
    entries: RwLock<HashMap<ContentDigest, Entry>>,
    capacity: usize,
    /// Logical access clock. Strictly increasing, so LRU order is total.
    clock: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl RenderCache {
    /// Create a cache retaining at most `capacity` rendered documents.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity,
            clock: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Create a cache from a [`RenderCacheConfig`].
    #[must_use]
    pub fn from_config(config: &RenderCacheConfig) -> Self {
        Self::new(config.capacity)
    }

    /// Render `text`, consulting the cache first.
    ///
    /// Empty input maps to the fixed empty output without consulting the
    /// cache or invoking the transform. On a hit the stored output is
    /// returned unchanged and the entry's access stamp is bumped. On a miss
    /// the transform runs, its output is stored (evicting the least recently
    /// used entry first when at capacity), and the output is returned.
    ///
    /// A failed transform propagates its error unchanged and stores nothing.
    pub fn render_with<F, E>(&self, text: &str, transform: F) -> Result<String, E>
    where
        F: FnOnce(&str) -> Result<String, E>,
    {
        if text.is_empty() {
            return Ok(String::new());
        }
        let digest = ContentDigest::of_text(text);

        if let Some(output) = self.lookup(&digest) {
            return Ok(output);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(digest = %digest, "render cache miss");
        let output = transform(text)?;
        self.insert(digest, output.clone());
        Ok(output)
    }

    /// Render `text` with an infallible transform.
    pub fn render(&self, text: &str, transform: impl FnOnce(&str) -> String) -> String {
        match self.render_with::<_, std::convert::Infallible>(text, |t| Ok(transform(t))) {
            Ok(output) => output,
            Err(never) => match never {},
        }
    }

    /// Number of entries currently retained. Never exceeds the configured
    /// capacity once a render call has returned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop a single entry, if present. Returns whether one was removed.
    ///
    /// The editor calls this when a document is re-rendered after external
    /// modification and the stale output should not linger until eviction.
    pub fn invalidate(&self, digest: &ContentDigest) -> bool {
        let Ok(mut entries) = self.entries.write() else {
            return false;
        };
        entries.remove(digest).is_some()
    }

    /// Remove all entries and reset the hit/miss/eviction counters.
    ///
    /// Calls already past their lookup are unaffected; they re-insert into
    /// the emptied store when they finish rendering.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
        debug!("render cache cleared");
    }

    /// Snapshot of the hit/miss/eviction counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }

    /// Look up `digest`, bumping its access stamp on a hit.
    fn lookup(&self, digest: &ContentDigest) -> Option<String> {
        let mut entries = self.entries.write().ok()?;
        let entry = entries.get_mut(digest)?;
        entry.last_accessed = self.next_stamp();
        self.hits.fetch_add(1, Ordering::Relaxed);
        trace!(digest = %digest, "render cache hit");
        Some(entry.output.clone())
    }

    /// Insert a freshly rendered output, evicting at most one entry.
    fn insert(&self, digest: ContentDigest, output: String) {
        if self.capacity == 0 {
            return;
        }
        let Ok(mut entries) = self.entries.write() else {
            return;
        };
        if !entries.contains_key(&digest) && entries.len() >= self.capacity {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_accessed)
                .map(|(key, _)| key.clone());
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
                self.evictions.fetch_add(1, Ordering::Relaxed);
                debug!(digest = %oldest, "render cache eviction");
            }
        }
        entries.insert(
            digest,
            Entry {
                output,
                last_accessed: self.next_stamp(),
            },
        );
    }

    fn next_stamp(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed) + 1
    }
}
