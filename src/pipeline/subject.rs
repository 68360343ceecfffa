//! Whole-subject listings for queries that name a subject exactly.
//!
//! A query equal to a subject code or full subject name (after the facade's
//! normalization) short-circuits the index entirely: every class in the
//! subject is listed in catalog order with score 0. Downstream, such
//! listings skip window expansion and business re-ranking so the catalog
//! order survives pagination.

use crate::store::CatalogStore;
use crate::types::{RefKind, ScoredRef, Subject};
use tracing::debug;

/// Returns the first subject whose code or full name equals `query`,
/// ignoring case. `query` must already be trimmed and lower-cased.
///
/// Linear scan; subject tables are small enough that this never shows up in
/// a profile.
pub fn find_subject<'a>(subjects: &'a [Subject], query: &str) -> Option<&'a Subject> {
    subjects.iter().find(|subject| {
        subject.subject.to_lowercase() == query || subject.text.to_lowercase() == query
    })
}

/// Builds the zero-scored listing for every class in `subject`.
pub fn subject_listing(store: &dyn CatalogStore, subject: &Subject) -> Vec<ScoredRef> {
    store
        .classes_in_subject(&subject.subject)
        .into_iter()
        .map(|ref_id| ScoredRef {
            ref_id,
            score: 0.0,
            kind: RefKind::Class,
        })
        .collect()
}

/// Matches `query` against the store's subject table and, on a hit, returns
/// the whole-subject listing.
pub fn subject_match(store: &dyn CatalogStore, query: &str) -> Option<Vec<ScoredRef>> {
    let subject = find_subject(store.subjects(), query)?;
    debug!(subject = %subject.subject, "whole-subject listing");
    Some(subject_listing(store, subject))
}
