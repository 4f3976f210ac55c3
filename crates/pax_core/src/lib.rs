//! Flight-rule matching and sequential allocation engine for passenger
//! show-up scenario authoring.
//!
//! Given a column index built from flight-schedule metadata and an ordered
//! list of rules (predicate + payload), the engine computes which flights
//! each rule claims under first-come-first-served semantics and how many
//! flights fall through to the default rule.
//!
//! The crate is organized into:
//!
//! - [`index`]: column → value → flight-id lookup built from raw metadata
//! - [`predicate`]: OR-within-column / AND-across-columns flight selection
//! - [`rules`]: rule payloads, ordered rule lists, and the default rule
//! - [`allocation`]: the sequential allocator
//! - [`validation`]: payload validity checks and equal-split generation
//! - [`translation`]: display label ↔ backend column key mapping
//! - [`showup`]: show-up-time curve math for previews
//! - [`cache`]: memoized allocation for repeated re-renders

pub mod allocation;
pub mod cache;
pub mod index;
pub mod predicate;
pub mod rules;
pub mod showup;
pub mod translation;
pub mod validation;

pub use allocation::{allocate, AllocationResult, RuleAllocation};
pub use cache::AllocationCache;
pub use index::{ColumnIndex, FlightId, RawColumnMetadata, RawValueEntry};
pub use predicate::{Condition, Predicate};
pub use rules::{Distribution, Rule, RulePayload, RuleSet};
