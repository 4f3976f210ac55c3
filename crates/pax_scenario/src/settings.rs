//! Scenario-level settings: which schedule to simulate and how early
//! passengers may arrive.

use serde::{Deserialize, Serialize};

/// Earliest show-up cutoff the backend accepts by default.
const DEFAULT_MIN_ARRIVAL_MINUTES: f64 = 30.0;

/// Settings section of the simulation payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSettings {
    /// Airport code of the loaded schedule, e.g. `ICN`.
    pub airport: String,
    /// Schedule date, `YYYY-MM-DD`.
    pub date: String,
    /// Minimum minutes before departure a passenger can show up.
    pub min_arrival_minutes: f64,
}

impl ScenarioSettings {
    pub fn new(airport: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            airport: airport.into(),
            date: date.into(),
            min_arrival_minutes: DEFAULT_MIN_ARRIVAL_MINUTES,
        }
    }

    pub fn with_min_arrival_minutes(mut self, minutes: f64) -> Self {
        self.min_arrival_minutes = minutes;
        self
    }

    /// Key identifying the loaded dataset, used when building the column
    /// index so allocation caching can tell datasets apart.
    pub fn dataset_key(&self) -> String {
        format!("{}:{}", self.airport, self.date)
    }

    /// Shape check for `YYYY-MM-DD` with a plausible month and day.
    pub fn has_valid_date(&self) -> bool {
        let bytes = self.date.as_bytes();
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return false;
        }
        let digits = |range: std::ops::Range<usize>| -> Option<u32> {
            self.date.get(range)?.parse().ok()
        };
        let (Some(_year), Some(month), Some(day)) = (digits(0..4), digits(5..7), digits(8..10))
        else {
            return false;
        };
        (1..=12).contains(&month) && (1..=31).contains(&day)
    }
}
