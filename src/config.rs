//! Configuration for the search pipeline.

use crate::error::SearchError;
use crate::index::{FieldBoost, QueryOptions};
use std::time::Duration;

/// Configuration for a [`Search`](crate::search::Search) instance.
///
/// The defaults reproduce the standing query profiles and cache policy the
/// pipeline has always run with; embedders only override them to tune boost
/// weights or cache lifetime.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Query options for the class corpus index.
    pub class_query: QueryOptions,
    /// Query options for the employee corpus index.
    pub employee_query: QueryOptions,
    /// How long a cached ref list stays servable.
    pub cache_ttl: Duration,
    /// How often the background sweeper scans the cache for stale entries.
    pub sweep_period: Duration,
    /// Upper pagination bound used by [`Search::search`](crate::search::Search::search)
    /// when the caller does not pass an explicit range.
    pub default_max_index: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            class_query: QueryOptions {
                boosts: vec![
                    FieldBoost::new("classId", 4.0),
                    FieldBoost::new("acronym", 4.0),
                    FieldBoost::new("subject", 2.0),
                    FieldBoost::new("desc", 1.0),
                    FieldBoost::new("name", 1.0),
                    FieldBoost::new("profs", 1.0),
                    FieldBoost::new("crns", 1.0),
                ],
                expand: true,
            },
            employee_query: QueryOptions {
                boosts: vec![
                    FieldBoost::new("name", 2.0),
                    FieldBoost::new("primaryRole", 1.0),
                    FieldBoost::new("primaryDepartment", 1.0),
                    FieldBoost::new("emails", 1.0),
                    FieldBoost::new("phone", 1.0),
                ],
                expand: true,
            },
            cache_ttl: Duration::from_secs(60 * 60 * 24),
            sweep_period: Duration::from_secs(60 * 60 * 24),
            default_max_index: 1000,
        }
    }
}

impl SearchConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.cache_ttl.is_zero() {
            return Err(SearchError::Config("cache_ttl must be non-zero".into()));
        }
        if self.sweep_period.is_zero() {
            return Err(SearchError::Config("sweep_period must be non-zero".into()));
        }
        if self.default_max_index == 0 {
            return Err(SearchError::Config(
                "default_max_index must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
