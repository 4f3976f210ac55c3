//! Sequential first-come-first-served flight allocation.
//!
//! Rules are processed in priority order. Each rule claims the flights its
//! predicate matches minus everything an earlier rule already claimed, like
//! a firewall rule chain. Whatever remains after the last rule falls to the
//! default rule. Swapping two rules whose matched sets intersect changes
//! both rules' claimed counts; that order sensitivity is the point.

use std::collections::{HashMap, HashSet};

use crate::index::{ColumnIndex, FlightId};
use crate::rules::Rule;

/// Per-rule allocation counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RuleAllocation {
    /// Flights the rule's predicate matched, ignoring earlier rules.
    pub matched: usize,
    /// Flights actually claimed (matched minus earlier claims).
    pub claimed: usize,
    /// Flights lost to earlier rules: `matched - claimed`.
    pub overlap: usize,
}

/// Result of one allocator run. Derived state, recomputed on every rule or
/// dataset change, never persisted.
#[derive(Clone, Debug, Default)]
pub struct AllocationResult {
    pub per_rule: HashMap<String, RuleAllocation>,
    /// Flights no explicit rule claimed, absorbed by the default rule.
    pub default_claimed: usize,
    pub total_flights: usize,
}

impl AllocationResult {
    pub fn total_claimed(&self) -> usize {
        self.per_rule.values().map(|a| a.claimed).sum()
    }
}

/// Run the allocator over `rules` in order against `index`.
///
/// Never fails: a rule whose predicate matches nothing, or whose match is
/// fully subsumed by earlier rules, simply claims zero flights. An empty
/// rule list leaves the whole universe to the default rule.
pub fn allocate(rules: &[Rule], index: &ColumnIndex) -> AllocationResult {
    let total_flights = index.total_flights();
    let mut claimed_so_far: HashSet<FlightId> = HashSet::new();
    let mut per_rule = HashMap::with_capacity(rules.len());
    let mut total_claimed = 0usize;

    for rule in rules {
        let matched = rule.predicate.evaluate(index);
        let matched_count = matched.len();

        let mut claimed = 0usize;
        for flight in matched {
            if claimed_so_far.insert(flight) {
                claimed += 1;
            }
        }

        total_claimed += claimed;
        per_rule.insert(
            rule.id.clone(),
            RuleAllocation {
                matched: matched_count,
                claimed,
                overlap: matched_count - claimed,
            },
        );
    }

    AllocationResult {
        per_rule,
        default_claimed: total_flights.saturating_sub(total_claimed),
        total_flights,
    }
}
