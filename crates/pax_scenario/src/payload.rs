//! Outbound simulation payload: the JSON contract of the backend's
//! passenger show-up generation endpoint.
//!
//! Conditions are emitted with backend column keys and values only (the
//! rule sets store post-translation conditions). Assembly is fallible and
//! side-effect free: a failed build reports the offending section/rule and
//! leaves every input untouched, so the caller can fix and retry.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use pax_core::predicate::Predicate;
use pax_core::rules::{Distribution, RulePayload, RuleSet};
use pax_core::validation::{
    is_valid_arrival_pattern, is_valid_load_factor, is_valid_percentage_distribution,
};

use crate::settings::ScenarioSettings;

/// Backend column key → selected values, as serialized under `conditions`.
pub type ConditionMap = BTreeMap<String, Vec<String>>;

// ---------------------------------------------------------------------------
// Payload shape (verbatim backend contract)
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationPayload {
    pub settings: SettingsSection,
    pub pax_generation: PaxGenerationSection,
    pub pax_demographics: PaxDemographicsSection,
    pub pax_arrival_patterns: PaxArrivalPatternsSection,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SettingsSection {
    pub airport: String,
    pub date: String,
    pub min_arrival_minutes: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoadFactorValue {
    pub load_factor: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoadFactorDefault {
    pub load_factor: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoadFactorRule {
    pub conditions: ConditionMap,
    pub value: LoadFactorValue,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaxGenerationSection {
    pub rules: Vec<LoadFactorRule>,
    pub default: LoadFactorDefault,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistributionRule {
    pub conditions: ConditionMap,
    pub value: Distribution,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DemographicSection {
    pub available_values: Vec<String>,
    pub rules: Vec<DistributionRule>,
    pub default: Distribution,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaxDemographicsSection {
    pub nationality: DemographicSection,
    pub profile: DemographicSection,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArrivalPatternValue {
    pub mean: f64,
    pub std: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArrivalPatternDefault {
    pub mean: Option<f64>,
    pub std: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArrivalPatternRule {
    pub conditions: ConditionMap,
    pub value: ArrivalPatternValue,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaxArrivalPatternsSection {
    pub rules: Vec<ArrivalPatternRule>,
    pub default: ArrivalPatternDefault,
}

// ---------------------------------------------------------------------------
// Assembly errors
// ---------------------------------------------------------------------------

/// Why a payload could not be assembled. `rule_id: None` refers to a
/// section's default rule.
#[derive(Debug, PartialEq, Eq)]
pub enum PayloadError {
    WrongPayloadKind {
        section: &'static str,
        rule_id: Option<String>,
    },
    InvalidDistribution {
        section: &'static str,
        rule_id: Option<String>,
    },
    InvalidLoadFactor {
        rule_id: Option<String>,
    },
    InvalidArrivalPattern {
        rule_id: Option<String>,
    },
    MissingDemographicDefault {
        section: &'static str,
    },
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let describe = |rule_id: &Option<String>| match rule_id {
            Some(id) => format!("rule {}", id),
            None => "default rule".to_string(),
        };
        match self {
            PayloadError::WrongPayloadKind { section, rule_id } => {
                write!(f, "{}: {} carries a payload of the wrong kind", section, describe(rule_id))
            }
            PayloadError::InvalidDistribution { section, rule_id } => {
                write!(f, "{}: {} percentages do not sum to 100", section, describe(rule_id))
            }
            PayloadError::InvalidLoadFactor { rule_id } => {
                write!(f, "pax_generation: {} load factor outside (0, 1]", describe(rule_id))
            }
            PayloadError::InvalidArrivalPattern { rule_id } => {
                write!(f, "pax_arrival_patterns: {} has invalid mean/std", describe(rule_id))
            }
            PayloadError::MissingDemographicDefault { section } => {
                write!(f, "{}: demographic sections require a default distribution", section)
            }
        }
    }
}

impl std::error::Error for PayloadError {}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Serialize a predicate's conditions into the backend map shape, dropping
/// empty selections (they do not constrain the match).
pub fn conditions_for(predicate: &Predicate) -> ConditionMap {
    predicate
        .conditions()
        .iter()
        .filter(|condition| !condition.values.is_empty())
        .map(|condition| {
            (
                condition.column.clone(),
                condition.values.iter().cloned().collect(),
            )
        })
        .collect()
}

/// Assemble the full backend payload from the four authored rule sets.
pub fn build_simulation_payload(
    settings: &ScenarioSettings,
    generation: &RuleSet,
    nationality: &RuleSet,
    profile: &RuleSet,
    arrival: &RuleSet,
) -> Result<SimulationPayload, PayloadError> {
    Ok(SimulationPayload {
        settings: SettingsSection {
            airport: settings.airport.clone(),
            date: settings.date.clone(),
            min_arrival_minutes: settings.min_arrival_minutes,
        },
        pax_generation: build_generation_section(generation)?,
        pax_demographics: PaxDemographicsSection {
            nationality: build_demographic_section("nationality", nationality)?,
            profile: build_demographic_section("profile", profile)?,
        },
        pax_arrival_patterns: build_arrival_section(arrival)?,
    })
}

fn build_generation_section(set: &RuleSet) -> Result<PaxGenerationSection, PayloadError> {
    let mut rules = Vec::with_capacity(set.len());
    for rule in set.rules() {
        let RulePayload::LoadFactor(load_factor) = &rule.payload else {
            return Err(PayloadError::WrongPayloadKind {
                section: "pax_generation",
                rule_id: Some(rule.id.clone()),
            });
        };
        let load_factor = *load_factor;
        if !is_valid_load_factor(load_factor) {
            return Err(PayloadError::InvalidLoadFactor {
                rule_id: Some(rule.id.clone()),
            });
        }
        rules.push(LoadFactorRule {
            conditions: conditions_for(&rule.predicate),
            value: LoadFactorValue { load_factor },
        });
    }

    // The generation default is optional; the backend accepts null.
    let default = match set.default_payload() {
        None => LoadFactorDefault { load_factor: None },
        Some(RulePayload::LoadFactor(load_factor)) => {
            if !is_valid_load_factor(*load_factor) {
                return Err(PayloadError::InvalidLoadFactor { rule_id: None });
            }
            LoadFactorDefault {
                load_factor: Some(*load_factor),
            }
        }
        Some(_) => {
            return Err(PayloadError::WrongPayloadKind {
                section: "pax_generation",
                rule_id: None,
            })
        }
    };

    Ok(PaxGenerationSection { rules, default })
}

fn build_demographic_section(
    section: &'static str,
    set: &RuleSet,
) -> Result<DemographicSection, PayloadError> {
    let default = match set.default_payload() {
        None => return Err(PayloadError::MissingDemographicDefault { section }),
        Some(RulePayload::Distribution(shares)) => {
            if !is_valid_percentage_distribution(shares) {
                return Err(PayloadError::InvalidDistribution {
                    section,
                    rule_id: None,
                });
            }
            shares.clone()
        }
        Some(_) => {
            return Err(PayloadError::WrongPayloadKind {
                section,
                rule_id: None,
            })
        }
    };

    let mut rules = Vec::with_capacity(set.len());
    for rule in set.rules() {
        let RulePayload::Distribution(shares) = &rule.payload else {
            return Err(PayloadError::WrongPayloadKind {
                section,
                rule_id: Some(rule.id.clone()),
            });
        };
        if !is_valid_percentage_distribution(shares) {
            return Err(PayloadError::InvalidDistribution {
                section,
                rule_id: Some(rule.id.clone()),
            });
        }
        rules.push(DistributionRule {
            conditions: conditions_for(&rule.predicate),
            value: shares.clone(),
        });
    }

    // The default enumerates every category, so it doubles as the
    // available-values list.
    let available_values: Vec<String> = default.keys().cloned().collect();

    Ok(DemographicSection {
        available_values,
        rules,
        default,
    })
}

fn build_arrival_section(set: &RuleSet) -> Result<PaxArrivalPatternsSection, PayloadError> {
    let mut rules = Vec::with_capacity(set.len());
    for rule in set.rules() {
        let RulePayload::ArrivalPattern { mean, std } = &rule.payload else {
            return Err(PayloadError::WrongPayloadKind {
                section: "pax_arrival_patterns",
                rule_id: Some(rule.id.clone()),
            });
        };
        let (mean, std) = (*mean, *std);
        if !is_valid_arrival_pattern(mean, std) {
            return Err(PayloadError::InvalidArrivalPattern {
                rule_id: Some(rule.id.clone()),
            });
        }
        rules.push(ArrivalPatternRule {
            conditions: conditions_for(&rule.predicate),
            value: ArrivalPatternValue { mean, std },
        });
    }

    let default = match set.default_payload() {
        None => ArrivalPatternDefault {
            mean: None,
            std: None,
        },
        Some(RulePayload::ArrivalPattern { mean, std }) => {
            if !is_valid_arrival_pattern(*mean, *std) {
                return Err(PayloadError::InvalidArrivalPattern { rule_id: None });
            }
            ArrivalPatternDefault {
                mean: Some(*mean),
                std: Some(*std),
            }
        }
        Some(_) => {
            return Err(PayloadError::WrongPayloadKind {
                section: "pax_arrival_patterns",
                rule_id: None,
            })
        }
    };

    Ok(PaxArrivalPatternsSection { rules, default })
}

/// Write the payload as pretty-printed JSON, for inspection or manual
/// submission.
pub fn export_payload_json(
    payload: &SimulationPayload,
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), payload)?;
    Ok(())
}
