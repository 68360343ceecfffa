//! Search facade: the one public entry point over both corpora.
//!
//! Owns the external seams (store, two relevance indexes, employee map),
//! the ref cache, and the per-request pipeline wiring. Ref computation is
//! cached per normalized query; hydration always reads the live store so
//! seat counts stay current between sweeps.

use crate::cache::{CacheSweeper, CachedRefs, Clock, QueryCache, SweeperHandle};
use crate::config::SearchConfig;
use crate::error::{Anomaly, Result};
use crate::index::RelevanceIndex;
use crate::pipeline::hydrate::hydrate_refs;
use crate::pipeline::merge::{merge_scored, rewrite_subject_prefix, strip_email_domains};
use crate::pipeline::ranking::rerank_tie_groups;
use crate::pipeline::subject::subject_match;
use crate::pipeline::window::expand_to_tie_groups;
use crate::store::CatalogStore;
use crate::types::{EmployeeRecord, HydratedResult};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, trace, warn};

/// The results of one search plus every degradation absorbed while serving
/// it.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    /// Hydrated results for the requested page, in final order.
    pub results: Vec<HydratedResult>,
    /// Degradations encountered, in the order the pipeline hit them.
    pub anomalies: Vec<Anomaly>,
}

/// Ranked, paginated search over one term's class catalog and the staff
/// directory.
///
/// Construct with [`Search::new`], then serve queries with
/// [`search`](Search::search) or [`search_range`](Search::search_range).
/// The instance is `Send + Sync`; requests only take shared references.
pub struct Search {
    store: Box<dyn CatalogStore>,
    employees: HashMap<String, EmployeeRecord>,
    class_index: Box<dyn RelevanceIndex>,
    employee_index: Box<dyn RelevanceIndex>,
    config: SearchConfig,
    cache: Arc<QueryCache>,
}

impl Search {
    /// Creates a facade over the given seams.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`](crate::error::SearchError::Config)
    /// when the configuration fails validation.
    pub fn new(
        store: Box<dyn CatalogStore>,
        employees: HashMap<String, EmployeeRecord>,
        class_index: Box<dyn RelevanceIndex>,
        employee_index: Box<dyn RelevanceIndex>,
        config: SearchConfig,
    ) -> Result<Self> {
        config.validate()?;
        let cache = Arc::new(QueryCache::new(config.cache_ttl));
        Ok(Self {
            store,
            employees,
            class_index,
            employee_index,
            config,
            cache,
        })
    }

    /// Replaces the cache clock. Builder-style; call before serving queries,
    /// as the cache is recreated empty.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.cache = Arc::new(QueryCache::with_clock(self.config.cache_ttl, clock));
        self
    }

    /// Starts the periodic cache sweep on the current tokio runtime.
    ///
    /// The sweep stops when the returned handle is stopped or dropped.
    pub fn start_sweeper(&self) -> SweeperHandle {
        CacheSweeper::new(Arc::clone(&self.cache), self.config.sweep_period).run()
    }

    /// Searches with the default pagination window, `0..default_max_index`.
    pub fn search(&self, query: &str) -> Vec<HydratedResult> {
        self.search_range(query, 0, self.config.default_max_index)
    }

    /// Returns result positions `min_index..max_index` for `query`.
    ///
    /// Degradations are logged and absorbed; use
    /// [`search_detailed`](Search::search_detailed) to observe them as
    /// values.
    pub fn search_range(
        &self,
        query: &str,
        min_index: usize,
        max_index: usize,
    ) -> Vec<HydratedResult> {
        self.search_detailed(query, min_index, max_index).results
    }

    /// Like [`search_range`](Search::search_range), but also reports the
    /// anomalies the pipeline absorbed while serving the request.
    pub fn search_detailed(
        &self,
        query: &str,
        min_index: usize,
        max_index: usize,
    ) -> SearchOutcome {
        let started = Instant::now();
        let mut anomalies = Vec::new();

        // 1. Reject empty or inverted windows outright.
        if max_index <= min_index {
            warn!(min_index, max_index, "invalid pagination range");
            anomalies.push(Anomaly::InvalidRange {
                min_index,
                max_index,
            });
            return SearchOutcome {
                results: Vec::new(),
                anomalies,
            };
        }

        // 2. Normalize once; the cache key and every later stage share it.
        let query = query.trim().to_lowercase();
        trace!(query = %query, min_index, max_index, "search");

        // 3. Refs from cache, or computed and cached.
        let cached = match self.cache.lookup(&query) {
            Some(hit) => hit,
            None => {
                let computed = self.compute_refs(&query);
                self.cache.store(query.clone(), computed.clone());
                computed
            }
        };
        let refs = &cached.refs;

        // 4. Out of results, or the page starts past them.
        if refs.is_empty() || min_index >= refs.len() {
            return SearchOutcome {
                results: Vec::new(),
                anomalies,
            };
        }

        // 5. Establish the hydration window. Subject listings keep catalog
        //    order, so only index-scored refs expand to tie groups.
        let requested = max_index - min_index;
        let window = if cached.was_subject_match {
            min_index..max_index.min(refs.len())
        } else {
            expand_to_tie_groups(refs, min_index, max_index)
        };
        let offset = min_index - window.start;

        // 6. Hydrate the window against the live store.
        let mut results = hydrate_refs(
            self.store.as_ref(),
            &self.employees,
            &refs[window],
            &mut anomalies,
        );

        // 7. Re-rank relevance ties by demand, subject listings excepted.
        if !cached.was_subject_match {
            let rerank_started = Instant::now();
            rerank_tie_groups(&mut results, &mut anomalies);
            debug!(
                window = results.len(),
                elapsed_ms = rerank_started.elapsed().as_millis() as u64,
                "tie groups re-ranked"
            );
        }

        // 8. Trim the expansion back to the requested page.
        let results: Vec<HydratedResult> =
            results.into_iter().skip(offset).take(requested).collect();

        debug!(
            results = results.len(),
            anomalies = anomalies.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "search complete"
        );

        SearchOutcome { results, anomalies }
    }

    /// Live cache entry count, for capacity monitoring.
    pub fn cached_queries(&self) -> usize {
        self.cache.len()
    }

    fn compute_refs(&self, query: &str) -> CachedRefs {
        // A query naming a subject exactly lists the whole subject and
        // never touches the indexes.
        if let Some(listing) = subject_match(self.store.as_ref(), query) {
            return CachedRefs {
                refs: listing.into(),
                was_subject_match: true,
            };
        }

        let rewritten = rewrite_subject_prefix(self.store.subjects(), query);
        let rewritten = strip_email_domains(&rewritten);
        if rewritten != query {
            trace!(rewritten = %rewritten, "query rewritten");
        }

        let class_hits = self.class_index.search(&rewritten, &self.config.class_query);
        let employee_hits = self
            .employee_index
            .search(&rewritten, &self.config.employee_query);
        let merged = merge_scored(class_hits, employee_hits);

        CachedRefs {
            refs: merged.into(),
            was_subject_match: false,
        }
    }
}
