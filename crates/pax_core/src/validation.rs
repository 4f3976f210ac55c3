//! Payload validity checks and equal-split distribution generation.
//!
//! Validation never blocks editing; callers render failures inline and
//! decide for themselves whether to gate save/generate actions on them.

use crate::rules::{Distribution, RulePayload};

/// Percentage sums within this distance of 100 are accepted.
pub const PERCENT_SUM_TOLERANCE: f64 = 0.1;

/// True when the shares sum to 100 within [`PERCENT_SUM_TOLERANCE`].
pub fn is_valid_percentage_distribution(shares: &Distribution) -> bool {
    let sum: f64 = shares.values().sum();
    (sum - 100.0).abs() < PERCENT_SUM_TOLERANCE
}

/// True for stored load factors in `(0, 1]`.
pub fn is_valid_load_factor(value: f64) -> bool {
    value > 0.0 && value <= 1.0
}

/// True when `mean >= 0` and `std > 0`.
pub fn is_valid_arrival_pattern(mean: f64, std: f64) -> bool {
    mean >= 0.0 && std > 0.0
}

/// Dispatch over the payload union.
pub fn is_valid_payload(payload: &RulePayload) -> bool {
    match payload {
        RulePayload::Distribution(shares) => is_valid_percentage_distribution(shares),
        RulePayload::LoadFactor(value) => is_valid_load_factor(*value),
        RulePayload::ArrivalPattern { mean, std } => is_valid_arrival_pattern(*mean, *std),
    }
}

/// Split 100 percent evenly over `categories`, handing the integer
/// remainder to the first categories in list order.
///
/// Always sums to exactly 100 for `N >= 1`. An empty category list is
/// undefined input; debug builds assert, release builds return an empty map.
pub fn equal_split<S: AsRef<str>>(categories: &[S]) -> Distribution {
    debug_assert!(!categories.is_empty(), "equal_split needs at least one category");
    if categories.is_empty() {
        return Distribution::new();
    }

    let n = categories.len();
    let base = 100 / n;
    let remainder = 100 - base * n;

    categories
        .iter()
        .enumerate()
        .map(|(position, category)| {
            let percent = if position < remainder { base + 1 } else { base };
            (category.as_ref().to_string(), percent as f64)
        })
        .collect()
}
