//! Flight-selection predicates: OR within a column, AND across columns.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use crate::index::{ColumnIndex, FlightId};

/// Selected values for one backend column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub column: String,
    pub values: BTreeSet<String>,
}

impl Condition {
    pub fn new<I, S>(column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// An ordered set of conditions over distinct columns.
///
/// Evaluation semantics:
///
/// - within a condition, selected values are OR-ed (union of flight sets);
/// - across conditions, the per-column unions are AND-ed (intersection);
/// - a condition with an empty selection is excluded from the AND rather
///   than treated as match-everything;
/// - zero effective conditions match nothing (only the default rule matches
///   without a predicate).
///
/// Unknown values contribute nothing; a column missing from the index
/// entirely yields an empty per-column union and therefore an empty match
/// (fail closed).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    conditions: Vec<Condition>,
}

impl Predicate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style condition append.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn add_condition(&mut self, condition: Condition) {
        self.conditions.push(condition);
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// True when no condition carries a non-empty selection.
    pub fn is_empty(&self) -> bool {
        self.conditions.iter().all(|c| c.values.is_empty())
    }

    /// Compute the set of flights this predicate matches.
    pub fn evaluate(&self, index: &ColumnIndex) -> HashSet<FlightId> {
        let mut matched: Option<HashSet<FlightId>> = None;

        for condition in &self.conditions {
            if condition.values.is_empty() {
                continue;
            }

            let mut union: HashSet<FlightId> = HashSet::new();
            for value in &condition.values {
                if let Some(flights) = index.flights_for(&condition.column, value) {
                    union.extend(flights.iter().cloned());
                }
            }

            matched = Some(match matched {
                None => union,
                Some(acc) => acc.intersection(&union).cloned().collect(),
            });

            if matched.as_ref().map(HashSet::is_empty).unwrap_or(false) {
                break;
            }
        }

        matched.unwrap_or_default()
    }
}
