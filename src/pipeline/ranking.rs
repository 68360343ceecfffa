//! Demand-based re-ranking within relevance tie groups.
//!
//! The relevance index cannot tell two classes named alike apart, so runs
//! of equal relevance score are reordered by a business score built from
//! enrollment demand. Results with distinct relevance scores never move.
//!
//! Tiers, best first: classes with takers (score `taken + 1_000_000`),
//! low catalog numbers (`10_000 - number`), numeric catalog numbers past
//! the tier ceiling (2), non-numeric catalog numbers (1), and the floor
//! shared by section-less classes and employees (0).

use crate::error::Anomaly;
use crate::types::{HydratedResult, SectionRecord};
use std::cmp::Reverse;
use tracing::warn;

/// Offset that keeps any class with takers above every taker-less tier.
const TAKEN_SEATS_TIER: i64 = 1_000_000;
/// Catalog numbers above this share a fixed low tier instead of scaling.
const MAX_CLASS_NUMBER: i64 = 10_000;

/// Computes the business score of one hydrated result.
///
/// Employees always score the floor tier; their relative order within a tie
/// group is whatever the merge produced. A catalog number past
/// [`MAX_CLASS_NUMBER`] is reported through `anomalies`.
pub fn business_score(result: &HydratedResult, anomalies: &mut Vec<Anomaly>) -> i64 {
    match result {
        HydratedResult::Class {
            class, sections, ..
        } => {
            if sections.is_empty() {
                return 0;
            }

            let taken: i64 = sections.iter().map(SectionRecord::seats_taken).sum();
            if taken > 0 {
                return taken + TAKEN_SEATS_TIER;
            }

            // A ref whose class record is gone also hydrated no sections,
            // so this arm only sees resolved records.
            let Some(class) = class else {
                return 0;
            };

            let Ok(number) = class.class_id.parse::<i64>() else {
                return 1;
            };

            if number > MAX_CLASS_NUMBER {
                warn!(class_id = %class.class_id, "catalog number exceeds tier range");
                anomalies.push(Anomaly::ClassNumberOutOfRange {
                    class_id: class.class_id.clone(),
                });
                return 2;
            }

            MAX_CLASS_NUMBER - number
        }
        HydratedResult::Employee { .. } => 0,
    }
}

/// Reorders each maximal run of equal relevance scores by descending
/// business score, in place.
///
/// The sort is stable, so business-score ties keep their merged order, and
/// runs of one are left untouched without ever computing their business
/// score.
pub fn rerank_tie_groups(results: &mut [HydratedResult], anomalies: &mut Vec<Anomaly>) {
    let mut start = 0;
    while start < results.len() {
        let score = results[start].score();
        let mut end = start + 1;
        while end < results.len() && results[end].score() == score {
            end += 1;
        }

        if end - start > 1 {
            results[start..end]
                .sort_by_cached_key(|result| Reverse(business_score(result, anomalies)));
        }

        start = end;
    }
}
