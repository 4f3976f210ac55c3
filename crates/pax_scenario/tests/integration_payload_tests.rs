//! Full payload assembly against the backend contract shape.

use std::collections::BTreeMap;

use pax_core::predicate::{Condition, Predicate};
use pax_core::rules::{Distribution, RulePayload, RuleSet};
use pax_core::translation::to_backend_condition;
use pax_scenario::payload::{build_simulation_payload, export_payload_json, PayloadError};
use pax_scenario::settings::ScenarioSettings;

fn shares(pairs: &[(&str, f64)]) -> Distribution {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn airline_predicate(display_names: &[&str]) -> Predicate {
    let values: Vec<String> = display_names
        .iter()
        .map(|name| to_backend_condition("Airline", name).1)
        .collect();
    Predicate::new().with_condition(Condition::new("operating_carrier_iata", values))
}

fn full_rule_sets() -> (RuleSet, RuleSet, RuleSet, RuleSet) {
    let mut generation = RuleSet::new();
    generation.add_rule(
        airline_predicate(&["Korean Air"]),
        RulePayload::load_factor_from_percent(85.0),
    );
    generation.set_default(RulePayload::load_factor_from_percent(75.0));

    let mut nationality = RuleSet::new();
    nationality.add_rule(
        airline_predicate(&["Korean Air", "Asiana Airlines"]),
        RulePayload::Distribution(shares(&[
            ("Korea", 70.0),
            ("Japan", 20.0),
            ("Other", 10.0),
        ])),
    );
    nationality.set_equal_split_default(&["Korea", "Japan", "Other"]);

    let mut profile = RuleSet::new();
    profile.set_default(RulePayload::Distribution(shares(&[
        ("Business", 30.0),
        ("Leisure", 70.0),
    ])));

    let mut arrival = RuleSet::new();
    arrival.add_rule(
        airline_predicate(&["Jeju Air"]),
        RulePayload::ArrivalPattern { mean: 90.0, std: 25.0 },
    );
    arrival.set_default(RulePayload::ArrivalPattern { mean: 120.0, std: 30.0 });

    (generation, nationality, profile, arrival)
}

#[test]
fn payload_matches_the_backend_contract_shape() {
    let settings = ScenarioSettings::new("ICN", "2026-03-01").with_min_arrival_minutes(45.0);
    let (generation, nationality, profile, arrival) = full_rule_sets();

    let payload =
        build_simulation_payload(&settings, &generation, &nationality, &profile, &arrival)
            .expect("valid payload");
    let json = serde_json::to_value(&payload).expect("serializable");

    assert_eq!(json["settings"]["airport"], "ICN");
    assert_eq!(json["settings"]["date"], "2026-03-01");
    assert_eq!(json["settings"]["min_arrival_minutes"], 45.0);

    let generation_rule = &json["pax_generation"]["rules"][0];
    assert_eq!(
        generation_rule["conditions"]["operating_carrier_iata"][0],
        "KE"
    );
    assert_eq!(generation_rule["value"]["load_factor"], 0.85);
    assert_eq!(json["pax_generation"]["default"]["load_factor"], 0.75);

    let nationality_section = &json["pax_demographics"]["nationality"];
    assert_eq!(
        nationality_section["available_values"]
            .as_array()
            .unwrap()
            .len(),
        3
    );
    assert_eq!(nationality_section["rules"][0]["value"]["Korea"], 70.0);
    assert_eq!(nationality_section["default"]["Korea"], 34.0);

    assert!(json["pax_demographics"]["profile"]["rules"]
        .as_array()
        .unwrap()
        .is_empty());

    let arrival_rule = &json["pax_arrival_patterns"]["rules"][0];
    assert_eq!(arrival_rule["conditions"]["operating_carrier_iata"][0], "7C");
    assert_eq!(arrival_rule["value"]["mean"], 90.0);
    assert_eq!(json["pax_arrival_patterns"]["default"]["std"], 30.0);
}

#[test]
fn failed_build_leaves_inputs_reusable() {
    let settings = ScenarioSettings::new("ICN", "2026-03-01");
    let (generation, mut nationality, profile, arrival) = full_rule_sets();

    nationality.clear_default();
    let err =
        build_simulation_payload(&settings, &generation, &nationality, &profile, &arrival)
            .expect_err("missing default must fail");
    assert_eq!(
        err,
        PayloadError::MissingDemographicDefault {
            section: "nationality"
        }
    );

    // Fix the default and retry with the same rule sets.
    nationality.set_equal_split_default(&["Korea", "Japan", "Other"]);
    build_simulation_payload(&settings, &generation, &nationality, &profile, &arrival)
        .expect("retry succeeds");
}

#[test]
fn exported_json_round_trips() {
    let settings = ScenarioSettings::new("ICN", "2026-03-01");
    let (generation, nationality, profile, arrival) = full_rule_sets();
    let payload =
        build_simulation_payload(&settings, &generation, &nationality, &profile, &arrival)
            .expect("valid payload");

    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("scenario.json");
    export_payload_json(&payload, &path).expect("export succeeds");

    let raw = std::fs::read_to_string(&path).expect("readable");
    let reparsed: pax_scenario::payload::SimulationPayload =
        serde_json::from_str(&raw).expect("parseable");
    assert_eq!(reparsed, payload);
}
