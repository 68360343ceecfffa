//! Interface to the externally built full-text relevance indexes.
//!
//! The pipeline never builds or tokenizes an index itself; the embedding
//! application supplies one index per corpus through [`RelevanceIndex`].
//! Hits come back best-first and the pipeline treats that order, and the
//! scores attached to it, as authoritative.

/// A single hit from a relevance index.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexHit {
    /// Opaque ref understood by the catalog store or the employee map.
    pub ref_id: String,
    /// Relevance score assigned by the index; higher is better.
    pub score: f64,
}

impl IndexHit {
    pub fn new(ref_id: impl Into<String>, score: f64) -> Self {
        Self {
            ref_id: ref_id.into(),
            score,
        }
    }
}

/// A query-time boost multiplier for one indexed field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldBoost {
    pub field: String,
    pub boost: f64,
}

impl FieldBoost {
    pub fn new(field: impl Into<String>, boost: f64) -> Self {
        Self {
            field: field.into(),
            boost,
        }
    }
}

/// Options forwarded to the index with every query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOptions {
    /// Per-field boosts applied by the index at query time.
    pub boosts: Vec<FieldBoost>,
    /// Whether the index should expand terms to prefix matches.
    pub expand: bool,
}

/// A prebuilt full-text index over one corpus.
///
/// Implementations must return hits in non-increasing score order; the
/// merger folds two such lists together without re-sorting.
pub trait RelevanceIndex: Send + Sync {
    /// Runs `query` against the index and returns scored hits, best first.
    fn search(&self, query: &str, options: &QueryOptions) -> Vec<IndexHit>;
}
