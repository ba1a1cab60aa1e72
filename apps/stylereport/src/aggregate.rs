//! Category aggregation over raw engine counters.
//!
//! Both guide profiles are judged by the same code set: every category
//! handled here is assumed to agree between PEP 8 and the Google guide.
//! A category whose profiles diverge needs its own aggregation.

use crate::models::{CategoryResult, ErrorBreakdown, RawCounters};

/// Aggregate `codes` against `counters`.
///
/// Returns the category result and the number of errors it accounts for.
/// Matched codes appear in the breakdown in `codes` order; counts of zero
/// are treated as absent. The total saturates at `u64::MAX`.
pub fn aggregate(codes: &[&str], counters: &RawCounters) -> (CategoryResult, u64) {
    let mut breakdown = ErrorBreakdown::default();
    let mut total = 0u64;
    for code in codes {
        match counters.get(*code) {
            Some(&count) if count > 0 => {
                breakdown.push(*code, count);
                total = total.saturating_add(count);
            }
            _ => {}
        }
    }
    if breakdown.is_empty() {
        return (CategoryResult::compliant(), 0);
    }
    let result = CategoryResult {
        pep: Some(false),
        google: Some(false),
        errors: Some(breakdown),
    };
    (result, total)
}
