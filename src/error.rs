//! Error and anomaly types for the search pipeline.
//!
//! Hard failures ([`SearchError`]) abort an operation; anomalies
//! ([`Anomaly`]) are degradations the pipeline absorbs while still producing
//! a result. Anomalies travel back to the caller as values on the search
//! outcome so callers and tests can assert on them instead of scraping logs.

use thiserror::Error;

/// Convenience alias for results with [`SearchError`].
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors surfaced by search construction and execution.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// A non-fatal degradation encountered while serving a query.
///
/// Each variant corresponds to a condition the pipeline handles by skipping
/// or substituting data rather than failing the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Anomaly {
    /// The requested pagination range was empty or inverted; the query
    /// returned no results.
    #[error("invalid pagination range [{min_index}, {max_index})")]
    InvalidRange { min_index: usize, max_index: usize },

    /// A class ref survived in the index or cache but its record is gone
    /// from the store. The result slot is kept with an empty record.
    #[error("class record missing from store: {ref_id}")]
    MissingClass { ref_id: String },

    /// A section hash could not be derived for a CRN listed on a class.
    /// The section is skipped.
    #[error("no section hash for crn {crn} on class {class_uid}")]
    MissingSectionKey { class_uid: String, crn: String },

    /// A derived section hash resolved to no record. The section is skipped.
    #[error("section record missing from store: {hash}")]
    MissingSection { hash: String },

    /// An employee ref had no entry in the employee map. The result slot is
    /// kept with an empty record.
    #[error("employee record missing: {ref_id}")]
    MissingEmployee { ref_id: String },

    /// A numeric catalog number exceeded the representable tier range.
    /// The class is ranked in a fixed low tier instead of scaling.
    #[error("class number out of tier range: {class_id}")]
    ClassNumberOutOfRange { class_id: String },
}
