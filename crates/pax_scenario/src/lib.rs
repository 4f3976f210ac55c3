//! Scenario assembly for the passenger show-up simulation backend.
//!
//! Takes the rule sets authored against [`pax_core`] plus scenario settings
//! and produces the JSON payload the simulation backend consumes. Also
//! loads the inbound per-column flight metadata straight from a parquet
//! flight schedule.
//!
//! The crate is organized into:
//!
//! - [`settings`]: airport / date / minimum-arrival settings
//! - [`payload`]: outbound backend payload structs and assembly
//! - [`schedule`]: parquet flight schedule → raw column metadata
//! - [`client`] (feature `backend`): blocking HTTP submission

pub mod payload;
pub mod schedule;
pub mod settings;

#[cfg(feature = "backend")]
pub mod client;

pub use payload::{build_simulation_payload, PayloadError, SimulationPayload};
pub use schedule::load_schedule_metadata;
pub use settings::ScenarioSettings;
