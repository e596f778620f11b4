//! Decision Engine Library
//!
//! Flight planning for small UAV missions and the binary go/no-go decision
//! made over the assembled plan.
//!
//! ## Decision factors
//!
//! | Factor               | Passes when                                          |
//! |----------------------|------------------------------------------------------|
//! | `faa_compliant`      | no Part 107 violations                               |
//! | `weather_acceptable` | weather risk is not `HIGH_RISK`                      |
//! | `terrain_clearance`  | lowest waypoint ≥ max terrain elevation + 200 ft     |
//! | `battery_reserve`    | wind-corrected flight time > 10 min                  |
//! | `aircraft_ready`     | operator reports the aircraft ready                  |
//!
//! Weather and terrain come from pluggable [`WeatherSource`] / [`TerrainSource`]
//! providers; the simulated providers return fixed records.

use thiserror::Error;

pub mod aircraft;
pub mod emergency;
pub mod engine;
pub mod faa;
pub mod performance;
pub mod preflight;
pub mod terrain;
pub mod weather;

pub use aircraft::AircraftProfile;
pub use emergency::EmergencyProcedures;
pub use engine::{
    ConfidenceLevel, Coordinates, DecisionConfig, DecisionEngine, DecisionFactors, DecisionOutcome,
    FlightPlan, FlightPlanBundle, FlightRequest,
};
pub use faa::{ComplianceInput, ComplianceReport, FaaKnowledgeBase};
pub use performance::PerformanceEstimate;
pub use preflight::{PreflightCheck, PreflightReport};
pub use terrain::{SimulatedTerrain, TerrainProfile, TerrainSource, Waypoint};
pub use weather::{SimulatedWeather, WeatherReport, WeatherRisk, WeatherSource};

#[derive(Error, Debug)]
pub enum DecisionError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DecisionError>;
