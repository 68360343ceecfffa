//! The per-query ranking pipeline: subject matching, scored-list merging,
//! window expansion, business re-ranking, and hydration.
//!
//! Each stage is a function over refs and records with no shared state; the
//! facade in [`crate::search`] wires them together per request and owns all
//! caching.

pub mod hydrate;
pub mod merge;
pub mod ranking;
pub mod subject;
pub mod window;
