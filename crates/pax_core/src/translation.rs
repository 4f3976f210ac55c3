//! Display label ↔ backend column key translation.
//!
//! The condition dialog shows human-readable labels ("Airline: Korean Air")
//! while the index and the outbound payload use backend column keys and
//! values (`operating_carrier_iata: KE`). Labels missing from the fixed
//! table fall back to a lowercase/underscore transform; values missing from
//! the per-column remap pass through unchanged. Fallback translations are
//! deterministic and stable but do not recover the original casing.

/// Fixed display label → backend column key table.
const LABEL_COLUMNS: &[(&str, &str)] = &[
    ("Airline", "operating_carrier_iata"),
    ("Airline Name", "operating_carrier_name"),
    ("Arrival/Departure", "arrival_departure"),
    ("Aircraft Type", "aircraft_type"),
    ("Flight Type", "flight_type"),
    ("Region", "region_name"),
    ("Country", "country_name"),
    ("Terminal", "terminal_name"),
];

/// Airline display name → IATA code, applied for the `operating_carrier_iata`
/// column only.
const CARRIER_IATA: &[(&str, &str)] = &[
    ("Korean Air", "KE"),
    ("Asiana Airlines", "OZ"),
    ("Jeju Air", "7C"),
    ("Jin Air", "LJ"),
    ("T'way Air", "TW"),
    ("Air Busan", "BX"),
    ("Air Seoul", "RS"),
    ("Eastar Jet", "ZE"),
    ("Air Premia", "YP"),
    ("Aero K", "RF"),
];

const CARRIER_CODE_COLUMN: &str = "operating_carrier_iata";

/// Lowercase/underscore transform for labels absent from the fixed table.
fn fallback_column(label: &str) -> String {
    label
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '/' { '_' } else { c })
        .collect()
}

/// Translate a display condition into the backend (column key, value) pair.
pub fn to_backend_condition(label: &str, value: &str) -> (String, String) {
    let column = LABEL_COLUMNS
        .iter()
        .find(|(display, _)| *display == label)
        .map(|(_, column)| (*column).to_string())
        .unwrap_or_else(|| fallback_column(label));

    let backend_value = if column == CARRIER_CODE_COLUMN {
        CARRIER_IATA
            .iter()
            .find(|(name, _)| *name == value)
            .map(|(_, code)| (*code).to_string())
            .unwrap_or_else(|| value.to_string())
    } else {
        value.to_string()
    };

    (column, backend_value)
}

/// Inverse of [`to_backend_condition`]: backend (column key, value) back to
/// the display pair. Unmapped columns display the key itself.
pub fn to_display_condition(column: &str, value: &str) -> (String, String) {
    let label = LABEL_COLUMNS
        .iter()
        .find(|(_, backend)| *backend == column)
        .map(|(display, _)| (*display).to_string())
        .unwrap_or_else(|| column.to_string());

    let display_value = if column == CARRIER_CODE_COLUMN {
        CARRIER_IATA
            .iter()
            .find(|(_, code)| *code == value)
            .map(|(name, _)| (*name).to_string())
            .unwrap_or_else(|| value.to_string())
    } else {
        value.to_string()
    };

    (label, display_value)
}
