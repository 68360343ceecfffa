//! Ref-list cache with age-based eviction.
//!
//! Computing the ref list for a query (subject scan or double index query
//! plus merge) is the expensive half of a search, so the list is cached per
//! normalized query and shared across pagination calls. Entries live until
//! they have gone unused for the configured TTL; a background sweep removes
//! the stale ones. Eviction is age-only, never size-based, so the map grows
//! with query cardinality between sweeps.
//!
//! Time is injected through [`Clock`] so staleness is testable without
//! waiting out real TTLs.

use crate::types::ScoredRef;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::debug;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// The wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// The cached outcome of ref computation for one normalized query.
#[derive(Debug, Clone)]
pub struct CachedRefs {
    /// Refs in final relevance order. Shared, never mutated after insert.
    pub refs: Arc<[ScoredRef]>,
    /// Whether the refs came from a whole-subject listing. Subject listings
    /// skip window expansion and business re-ranking downstream.
    pub was_subject_match: bool,
}

struct CacheEntry {
    cached: CachedRefs,
    last_access: Instant,
}

/// TTL cache over computed ref lists, keyed by normalized query.
pub struct QueryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl QueryCache {
    /// Creates a cache on the wall clock.
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Creates a cache on a caller-supplied clock.
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    /// Returns the cached refs for `key` and refreshes the entry's
    /// last-access time, extending its life by a full TTL.
    pub fn lookup(&self, key: &str) -> Option<CachedRefs> {
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let entry = entries.get_mut(key)?;
        entry.last_access = now;
        Some(entry.cached.clone())
    }

    /// Inserts (or replaces) the refs for `key`, stamped with the current
    /// time.
    pub fn store(&self, key: impl Into<String>, cached: CachedRefs) {
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(
            key.into(),
            CacheEntry {
                cached,
                last_access: now,
            },
        );
    }

    /// Removes every entry whose last access is older than the TTL and
    /// returns how many were evicted.
    ///
    /// Runs under the same lock as `lookup`, so an entry a concurrent
    /// request just refreshed is never evicted on a stale read.
    pub fn sweep(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let before = entries.len();
        entries.retain(|_, entry| now.saturating_duration_since(entry.last_access) <= self.ttl);
        before - entries.len()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Periodic sweep task for a [`QueryCache`].
///
/// Spawned onto the current tokio runtime by [`run`](CacheSweeper::run);
/// stopped through the returned [`SweeperHandle`] or by dropping it.
pub struct CacheSweeper {
    cache: Arc<QueryCache>,
    period: Duration,
}

impl CacheSweeper {
    pub fn new(cache: Arc<QueryCache>, period: Duration) -> Self {
        Self { cache, period }
    }

    /// Starts the sweep loop. The first sweep runs one full period after
    /// start, then every period thereafter.
    pub fn run(self) -> SweeperHandle {
        debug!(period_secs = self.period.as_secs(), "cache sweeper started");
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.period);
            // An interval's first tick resolves immediately; skip it so
            // sweeps land on period boundaries.
            interval.tick().await;
            loop {
                interval.tick().await;
                let evicted = self.cache.sweep();
                if evicted > 0 {
                    debug!(evicted, remaining = self.cache.len(), "cache sweep");
                }
            }
        });
        SweeperHandle { handle }
    }
}

/// Handle to a running sweep loop. Aborts the loop on [`stop`](Self::stop)
/// or drop.
pub struct SweeperHandle {
    handle: tokio::task::JoinHandle<()>,
}

impl SweeperHandle {
    /// Stops the sweep loop.
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
