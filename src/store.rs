//! Interface to the externally supplied catalog store.
//!
//! A [`CatalogStore`] wraps one term's data dump: the subject table, the
//! class and section records keyed by their content hashes, and the store's
//! own key-hashing scheme for deriving section refs. The pipeline only reads
//! through this trait; loading and keying the dump is the embedder's job.

use crate::types::{ClassRecord, SectionRecord, Subject};

/// The fields that identify one section under the store's hashing scheme.
///
/// Borrowed from a [`ClassRecord`] plus one of its CRNs at hydration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionKey<'a> {
    pub host: &'a str,
    pub term_id: &'a str,
    pub subject: &'a str,
    pub class_uid: &'a str,
    pub crn: &'a str,
}

/// Read access to one term's catalog dump.
pub trait CatalogStore: Send + Sync {
    /// All subjects in this term's catalog.
    fn subjects(&self) -> &[Subject];

    /// Refs of every class filed under `subject`, in catalog order.
    /// Empty for an unknown subject.
    fn classes_in_subject(&self, subject: &str) -> Vec<String>;

    /// Resolves a class ref to its record.
    fn class_by_hash(&self, hash: &str) -> Option<&ClassRecord>;

    /// Resolves a derived section hash to its record.
    fn section_by_hash(&self, hash: &str) -> Option<&SectionRecord>;

    /// Derives the hash for a section key under the store's scheme.
    /// `None` when the key is incomplete for that scheme.
    fn section_hash(&self, key: &SectionKey<'_>) -> Option<String>;
}
