//! Column index: read-only column → value → flight-id lookup.
//!
//! Built once per loaded flight-schedule dataset (airport + date) from the
//! raw per-column metadata the schedule step produces, then treated as
//! immutable until a new dataset replaces it wholesale.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Opaque flight identifier. No structure is assumed beyond equality.
pub type FlightId = String;

/// Backend column name, e.g. `operating_carrier_name`.
pub type ColumnName = String;

/// One value entry of the inbound schedule metadata.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawValueEntry {
    /// Flight ids exhibiting this value.
    pub flights: Vec<FlightId>,
    /// Source row indices. Carried by the wire shape; unused by the engine.
    #[serde(default)]
    pub indices: Vec<u64>,
}

/// Per-column metadata as delivered by the flight-schedule load step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawColumnMetadata {
    pub column: ColumnName,
    pub values: BTreeMap<String, RawValueEntry>,
}

/// Lookup from column name to, per observed value, the set of flights
/// exhibiting that value.
///
/// The flight universe is the union over *all* columns' flights, not any
/// single column's: a column is allowed to enumerate only a subset of the
/// schedule.
#[derive(Clone, Debug, Default)]
pub struct ColumnIndex {
    dataset_key: String,
    columns: HashMap<ColumnName, HashMap<String, HashSet<FlightId>>>,
    universe: HashSet<FlightId>,
}

impl ColumnIndex {
    /// Flatten raw per-column metadata into the lookup structure.
    ///
    /// `dataset_key` identifies the loaded dataset (conventionally
    /// `"{airport}:{date}"`) and is used by [`crate::cache::AllocationCache`]
    /// to distinguish indexes cheaply.
    pub fn build(dataset_key: impl Into<String>, raw: &[RawColumnMetadata]) -> Self {
        let mut columns: HashMap<ColumnName, HashMap<String, HashSet<FlightId>>> =
            HashMap::with_capacity(raw.len());
        let mut universe = HashSet::new();

        for metadata in raw {
            let entries = columns.entry(metadata.column.clone()).or_default();
            for (value, entry) in &metadata.values {
                let flights: HashSet<FlightId> = entry.flights.iter().cloned().collect();
                universe.extend(flights.iter().cloned());
                // Values are independent sets; repeated metadata for the same
                // value unions rather than overwrites.
                entries.entry(value.clone()).or_default().extend(flights);
            }
        }

        Self {
            dataset_key: dataset_key.into(),
            columns,
            universe,
        }
    }

    pub fn dataset_key(&self) -> &str {
        &self.dataset_key
    }

    /// Flights exhibiting `value` in `column`, or `None` when either is
    /// unknown to the index.
    pub fn flights_for(&self, column: &str, value: &str) -> Option<&HashSet<FlightId>> {
        self.columns.get(column)?.get(value)
    }

    /// Observed values for a column, sorted for stable display.
    pub fn values_for(&self, column: &str) -> Vec<&str> {
        let mut values: Vec<&str> = self
            .columns
            .get(column)
            .map(|entries| entries.keys().map(String::as_str).collect())
            .unwrap_or_default();
        values.sort_unstable();
        values
    }

    /// Indexed column names, sorted.
    pub fn columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = self.columns.keys().map(String::as_str).collect();
        columns.sort_unstable();
        columns
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    /// Union of every flight appearing under any column/value.
    pub fn all_flight_ids(&self) -> &HashSet<FlightId> {
        &self.universe
    }

    /// Size of the flight universe; the allocator's `total_flights`.
    pub fn total_flights(&self) -> usize {
        self.universe.len()
    }
}
