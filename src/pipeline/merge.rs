//! Query rewriting and the two-corpus merge of scored index hits.
//!
//! Before the indexes run, the query gets two rewrites: a space is inserted
//! after a leading subject code when the tail looks like a catalog number
//! (`cs2500` -> `cs 2500`), and campus email domains are stripped so a
//! pasted address finds its owner. The merge then folds the two best-first
//! hit lists into one ref list without re-sorting either side.

use crate::index::IndexHit;
use crate::types::{RefKind, ScoredRef, Subject};

/// Longest tail after a subject code that can still be a catalog number.
const MAX_COURSE_TAIL_CHARS: usize = 5;
/// Digits the tail must contain before the rewrite applies.
const MIN_COURSE_TAIL_DIGITS: usize = 3;

/// Inserts a space after a leading subject code when the rest of the query
/// has a high probability of being a catalog number.
///
/// Only the first subject (in table order) whose code prefixes the query is
/// consulted; whether or not its tail qualifies, no later subject gets a
/// look. `query` must already be trimmed and lower-cased.
pub fn rewrite_subject_prefix(subjects: &[Subject], query: &str) -> String {
    for subject in subjects {
        let code = subject.subject.to_lowercase();
        if code.is_empty() {
            continue;
        }
        let Some(tail) = query.strip_prefix(code.as_str()) else {
            continue;
        };

        if tail.chars().count() <= MAX_COURSE_TAIL_CHARS
            && tail.chars().filter(char::is_ascii_digit).count() >= MIN_COURSE_TAIL_DIGITS
        {
            return format!("{code} {tail}");
        }
        break;
    }
    query.to_string()
}

/// Strips every occurrence of the campus email domains from the query.
/// `query` must already be lower-cased.
pub fn strip_email_domains(query: &str) -> String {
    query.replace("@northeastern.edu", "").replace("@neu.edu", "")
}

/// Folds two best-first hit lists into one ref list.
///
/// Whichever list's head scores higher goes next; on an exact tie the
/// employee goes first. With both inputs in non-increasing score order the
/// output is too.
pub fn merge_scored(classes: Vec<IndexHit>, employees: Vec<IndexHit>) -> Vec<ScoredRef> {
    let mut merged = Vec::with_capacity(classes.len() + employees.len());
    let mut classes = classes.into_iter().peekable();
    let mut employees = employees.into_iter().peekable();

    loop {
        let take_class = match (classes.peek(), employees.peek()) {
            (None, None) => break,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (Some(class), Some(employee)) => class.score > employee.score,
        };

        if take_class {
            if let Some(hit) = classes.next() {
                merged.push(ScoredRef {
                    ref_id: hit.ref_id,
                    score: hit.score,
                    kind: RefKind::Class,
                });
            }
        } else if let Some(hit) = employees.next() {
            merged.push(ScoredRef {
                ref_id: hit.ref_id,
                score: hit.score,
                kind: RefKind::Employee,
            });
        }
    }

    merged
}
