//! # campus-search
//!
//! Embedded ranked search over a university course catalog and staff
//! directory. Full-text indexing and record storage stay outside: the
//! embedder supplies prebuilt relevance indexes and a keyed data store,
//! and this crate turns them into one coherent, paginated result stream.
//!
//! ## Design
//!
//! - Queries naming a subject exactly list the whole subject in catalog
//!   order instead of touching the indexes
//! - Course-code queries are rewritten (`cs2500` -> `cs 2500`) and campus
//!   email domains stripped before the indexes run
//! - Class and employee hits merge by score in one pass; ties favor the
//!   employee
//! - Runs of equal relevance score re-rank by enrollment demand, with the
//!   hydration window widened so a run is never split by a page boundary
//! - Computed ref lists are cached per query with sliding 24-hour expiry;
//!   records are always fetched live so seat counts stay current
//! - Lookup failures degrade to partial results and surface as values on
//!   the search outcome, never as panics
//!
//! Queries are logged at trace level only.

pub mod cache;
pub mod config;
pub mod error;
pub mod index;
pub mod pipeline;
pub mod search;
pub mod store;
pub mod types;

pub use cache::{CachedRefs, Clock, QueryCache, SystemClock};
pub use config::SearchConfig;
pub use error::{Anomaly, Result, SearchError};
pub use index::{FieldBoost, IndexHit, QueryOptions, RelevanceIndex};
pub use search::{Search, SearchOutcome};
pub use store::{CatalogStore, SectionKey};
pub use types::{
    ClassRecord, EmployeeRecord, HydratedResult, RefKind, ScoredRef, SectionRecord, Subject,
};
