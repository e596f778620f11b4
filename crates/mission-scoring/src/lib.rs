//! Mission Scoring Library
//!
//! Scores a mission record across three independent domains (technical,
//! weather, regulatory), folds in the geofence confirmation and produces a
//! single confidence percentage with a GO / CAUTION / NO-GO recommendation.
//!
//! Mission records are tolerant: any missing or malformed field falls back to
//! its documented default instead of failing the evaluation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

pub mod aggregator;
pub mod scorers;

pub use aggregator::{AggregatorConfig, ConfidenceAssessment, Recommendation, ScoreAggregator};

/// Visibility assumed when a record carries none (km)
pub const DEFAULT_VISIBILITY_KM: f64 = 10.0;

/// Simulation flag assumed when a record carries none
pub const DEFAULT_SIMULATION: bool = true;

#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("Mission record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScoringError>;

/// One mission evaluation input
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MissionParameters {
    #[serde(deserialize_with = "lenient::or_default")]
    pub aircraft: AircraftParams,
    #[serde(deserialize_with = "lenient::or_default")]
    pub flight_plan: FlightPlanParams,
    #[serde(deserialize_with = "lenient::or_default")]
    pub weather: WeatherParams,
    #[serde(deserialize_with = "lenient::or_default")]
    pub location: Location,
    #[serde(deserialize_with = "lenient::or_default")]
    pub controlled_airspace: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub airspace_authorization: bool,
    /// Records without the flag are evaluated in simulation mode
    #[serde(deserialize_with = "lenient::simulation_flag")]
    pub is_simulation: bool,
}

impl Default for MissionParameters {
    fn default() -> Self {
        Self {
            aircraft: AircraftParams::default(),
            flight_plan: FlightPlanParams::default(),
            weather: WeatherParams::default(),
            location: Location::default(),
            controlled_airspace: false,
            airspace_authorization: false,
            is_simulation: DEFAULT_SIMULATION,
        }
    }
}

impl MissionParameters {
    /// Parse a mission record. Only syntactically broken JSON is an error.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AircraftParams {
    /// Grams
    #[serde(deserialize_with = "lenient::or_default")]
    pub takeoff_weight: f64,
    /// Minutes of endurance on a full battery
    #[serde(deserialize_with = "lenient::or_default")]
    pub max_flight_time: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlightPlanParams {
    /// Minutes
    #[serde(deserialize_with = "lenient::or_default")]
    pub estimated_duration: f64,
    /// Metres AGL
    #[serde(deserialize_with = "lenient::or_default")]
    pub max_altitude: f64,
    #[serde(deserialize_with = "lenient::or_default")]
    pub waypoints: Vec<Waypoint>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Waypoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Metres AGL
    pub altitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WeatherParams {
    /// Knots
    #[serde(deserialize_with = "lenient::or_default")]
    pub wind_speed: f64,
    /// Kilometres
    #[serde(deserialize_with = "lenient::visibility")]
    pub visibility: f64,
    #[serde(deserialize_with = "lenient::or_default")]
    pub condition: FlightCategory,
}

impl Default for WeatherParams {
    fn default() -> Self {
        Self {
            wind_speed: 0.0,
            visibility: DEFAULT_VISIBILITY_KM,
            condition: FlightCategory::Vfr,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Location {
    #[serde(deserialize_with = "lenient::or_default")]
    pub latitude: f64,
    #[serde(deserialize_with = "lenient::or_default")]
    pub longitude: f64,
}

/// Reported flight category. Matching is exact on the lowercase names; anything
/// else (including `"lifr"` and uppercase spellings) is carried through verbatim
/// and scored without penalty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum FlightCategory {
    #[default]
    Vfr,
    Mvfr,
    Ifr,
    Other(String),
}

impl From<String> for FlightCategory {
    fn from(value: String) -> Self {
        match value.as_str() {
            "vfr" => Self::Vfr,
            "mvfr" => Self::Mvfr,
            "ifr" => Self::Ifr,
            _ => Self::Other(value),
        }
    }
}

impl From<FlightCategory> for String {
    fn from(category: FlightCategory) -> Self {
        match category {
            FlightCategory::Vfr => "vfr".to_string(),
            FlightCategory::Mvfr => "mvfr".to_string(),
            FlightCategory::Ifr => "ifr".to_string(),
            FlightCategory::Other(value) => value,
        }
    }
}

impl fmt::Display for FlightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label: String = self.clone().into();
        write!(f, "{}", label.to_uppercase())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Issue {
    pub severity: Severity,
    pub message: String,
}

impl Issue {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.severity, self.message)
    }
}

/// A formatted status line with its severity band
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Detail {
    pub severity: Severity,
    pub value: String,
}

impl Detail {
    pub fn new(severity: Severity, value: impl Into<String>) -> Self {
        Self {
            severity,
            value: value.into(),
        }
    }
}

/// Output of one domain scorer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DomainScore {
    /// 0-100
    pub score: u32,
    pub issues: Vec<Issue>,
    pub details: BTreeMap<String, Detail>,
}

impl DomainScore {
    pub fn has_critical(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Critical)
    }
}

mod lenient {
    use crate::{DEFAULT_SIMULATION, DEFAULT_VISIBILITY_KM};
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use tracing::warn;

    fn parse<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        match serde_json::from_value(value) {
            Ok(parsed) => Ok(Some(parsed)),
            Err(e) => {
                warn!("Ignoring malformed mission field: {}", e);
                Ok(None)
            }
        }
    }

    pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        Ok(parse(deserializer)?.unwrap_or_default())
    }

    pub fn visibility<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(parse(deserializer)?.unwrap_or(DEFAULT_VISIBILITY_KM))
    }

    pub fn simulation_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(parse(deserializer)?.unwrap_or(DEFAULT_SIMULATION))
    }
}
