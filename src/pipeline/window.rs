//! Tie-group-preserving expansion of a requested pagination window.
//!
//! Business re-ranking reorders results only within runs of equal relevance
//! score, so a run sliced in half by a page boundary would re-rank against
//! half its members and paginate inconsistently. The fix is to widen the
//! hydration window until both edges sit on score-group boundaries; the
//! facade trims back to the requested page after re-ranking.

use crate::types::ScoredRef;
use std::ops::Range;

/// Expands the requested window `min..max` outward to score-group
/// boundaries and returns the indices to hydrate.
///
/// The item one past the requested window seeds the upper walk, so it joins
/// the expansion even when it starts a fresh group; the facade's final trim
/// drops it again. `max` may exceed `refs.len()`.
///
/// Callers guarantee `refs` is non-empty and sorted by non-increasing
/// score, and that `min < refs.len()` and `min < max`.
pub fn expand_to_tie_groups(refs: &[ScoredRef], min: usize, max: usize) -> Range<usize> {
    let mut lo = min;
    while lo > 0 && refs[lo].score == refs[lo - 1].score {
        lo -= 1;
    }

    let mut hi = if refs.len() <= max { refs.len() - 1 } else { max };
    while hi + 1 < refs.len() && refs[hi + 1].score == refs[hi].score {
        hi += 1;
    }

    lo..hi + 1
}
