//! Rule model: tagged payloads, ordered rule lists, and the default rule.
//!
//! A rule's priority is its position in the list (dense `0..N-1` by
//! construction); reordering shifts positions, never leaves gaps. The
//! default rule has no predicate and absorbs whatever no explicit rule
//! claimed. It is created and cleared explicitly, independent of whether
//! any explicit rules exist.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::predicate::Predicate;
use crate::validation::equal_split;

/// Category name → percentage share (0..100).
pub type Distribution = BTreeMap<String, f64>;

/// Rule payload, discriminated explicitly so the allocator and validator
/// can pattern-match instead of probing for keys.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RulePayload {
    /// Percentage shares per category (nationality, pax profile).
    Distribution(Distribution),
    /// Seat occupancy as a decimal in `(0, 1]`.
    LoadFactor(f64),
    /// Show-up time: minutes before departure, normally distributed.
    ArrivalPattern { mean: f64, std: f64 },
}

impl RulePayload {
    /// Build a load factor payload from the UI percentage (1..100).
    pub fn load_factor_from_percent(percent: f64) -> Self {
        RulePayload::LoadFactor(percent / 100.0)
    }

    /// Stored decimal back to the UI percentage, when this is a load factor.
    pub fn as_load_factor_percent(&self) -> Option<f64> {
        match self {
            RulePayload::LoadFactor(value) => Some(value * 100.0),
            _ => None,
        }
    }
}

/// Predicate + payload. Priority is the rule's index in its [`RuleSet`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    pub predicate: Predicate,
    pub payload: RulePayload,
}

/// Ordered rule list plus the optional default payload.
///
/// Every mutation replaces the list in a single assignment, so a reader
/// re-running the allocator between events never observes a half-applied
/// edit.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    rules: Vec<Rule>,
    default_payload: Option<RulePayload>,
    next_id: u64,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule at the lowest priority and return its assigned id.
    pub fn add_rule(&mut self, predicate: Predicate, payload: RulePayload) -> String {
        let id = format!("rule-{}", self.next_id);
        self.next_id += 1;
        self.rules.push(Rule {
            id: id.clone(),
            predicate,
            payload,
        });
        id
    }

    /// Replace the predicate and payload of an existing rule in place.
    /// Returns false when the id is unknown.
    pub fn update_rule(&mut self, id: &str, predicate: Predicate, payload: RulePayload) -> bool {
        match self.rules.iter_mut().find(|rule| rule.id == id) {
            Some(rule) => {
                rule.predicate = predicate;
                rule.payload = payload;
                true
            }
            None => false,
        }
    }

    pub fn remove_rule(&mut self, id: &str) -> bool {
        let before = self.rules.len();
        self.rules.retain(|rule| rule.id != id);
        self.rules.len() != before
    }

    /// Move the rule at `from` to position `to`, shifting the rules in
    /// between. Priorities stay dense because priority is position.
    pub fn move_rule(&mut self, from: usize, to: usize) -> bool {
        if from >= self.rules.len() || to >= self.rules.len() {
            return false;
        }
        let mut reordered = self.rules.clone();
        let rule = reordered.remove(from);
        reordered.insert(to, rule);
        // Whole-list replacement.
        self.rules = reordered;
        true
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    /// Position of a rule in the list, which is its priority.
    pub fn priority_of(&self, id: &str) -> Option<usize> {
        self.rules.iter().position(|rule| rule.id == id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Set the default rule payload ("Apply Default Rule").
    pub fn set_default(&mut self, payload: RulePayload) {
        self.default_payload = Some(payload);
    }

    /// Set an equal-split distribution over `categories` as the default.
    pub fn set_equal_split_default<S: AsRef<str>>(&mut self, categories: &[S]) {
        self.default_payload = Some(RulePayload::Distribution(equal_split(categories)));
    }

    pub fn clear_default(&mut self) {
        self.default_payload = None;
    }

    pub fn default_payload(&self) -> Option<&RulePayload> {
        self.default_payload.as_ref()
    }
}
