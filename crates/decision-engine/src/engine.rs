//! Flight planning and the go/no-go decision

use crate::emergency::EmergencyProcedures;
use crate::faa::{ComplianceInput, ComplianceReport, FaaKnowledgeBase};
use crate::performance::PerformanceEstimate;
use crate::terrain::{SimulatedTerrain, TerrainProfile, TerrainSource, Waypoint};
use crate::weather::{assess_flight_risk, SimulatedWeather, WeatherReport, WeatherRisk, WeatherSource};
use crate::{AircraftProfile, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DecisionConfig {
    /// Wind-corrected flight time must exceed this (minutes)
    pub min_flight_time: f64,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            min_flight_time: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for Coordinates {
    fn default() -> Self {
        Self {
            latitude: 37.7749,
            longitude: -122.4194,
        }
    }
}

/// What the operator asks to fly
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlightRequest {
    /// Reference flying wing when absent
    pub aircraft: Option<AircraftProfile>,
    pub location: Coordinates,
    pub waypoints: Vec<Waypoint>,
    /// Planned ceiling, feet AGL
    pub max_altitude: f64,
    pub over_populated_area: bool,
    pub near_airport: bool,
    pub aircraft_ready: bool,
}

impl Default for FlightRequest {
    fn default() -> Self {
        Self {
            aircraft: None,
            location: Coordinates::default(),
            waypoints: Vec::new(),
            max_altitude: 0.0,
            over_populated_area: false,
            near_airport: false,
            aircraft_ready: true,
        }
    }
}

impl FlightRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Everything the decision looks at, resolved
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlightPlanBundle {
    pub aircraft: AircraftProfile,
    pub weather: Option<WeatherReport>,
    pub weather_risk: WeatherRisk,
    pub terrain: TerrainProfile,
    pub waypoints: Vec<Waypoint>,
    pub performance: PerformanceEstimate,
    pub compliance: ComplianceReport,
    pub emergency_procedures: EmergencyProcedures,
    pub aircraft_ready: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfidenceLevel {
    High,
    Low,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DecisionFactors {
    pub faa_compliant: bool,
    pub weather_acceptable: bool,
    pub terrain_clearance: bool,
    pub battery_reserve: bool,
    pub aircraft_ready: bool,
}

impl DecisionFactors {
    fn named(&self) -> [(&'static str, bool); 5] {
        [
            ("faa_compliant", self.faa_compliant),
            ("weather_acceptable", self.weather_acceptable),
            ("terrain_clearance", self.terrain_clearance),
            ("battery_reserve", self.battery_reserve),
            ("aircraft_ready", self.aircraft_ready),
        ]
    }

    pub fn all_passed(&self) -> bool {
        self.named().iter().all(|(_, passed)| *passed)
    }

    /// Names of failed factors, in evaluation order
    pub fn failed(&self) -> Vec<&'static str> {
        self.named()
            .into_iter()
            .filter(|(_, passed)| !passed)
            .map(|(name, _)| name)
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionOutcome {
    pub go: bool,
    pub confidence_level: ConfidenceLevel,
    pub factors: DecisionFactors,
    pub reasons: Vec<String>,
    pub recommendations: Vec<String>,
}

/// A planned mission with its decision
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlightPlan {
    pub mission_id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub bundle: FlightPlanBundle,
    pub decision: DecisionOutcome,
}

pub struct DecisionEngine {
    knowledge_base: FaaKnowledgeBase,
    weather: Box<dyn WeatherSource>,
    terrain: Box<dyn TerrainSource>,
    config: DecisionConfig,
}

impl DecisionEngine {
    /// Engine backed by the simulated weather and terrain providers
    pub fn new() -> Self {
        Self::with_sources(Box::new(SimulatedWeather::new()), Box::new(SimulatedTerrain::new()))
    }

    pub fn with_sources(weather: Box<dyn WeatherSource>, terrain: Box<dyn TerrainSource>) -> Self {
        Self {
            knowledge_base: FaaKnowledgeBase::default(),
            weather,
            terrain,
            config: DecisionConfig::default(),
        }
    }

    pub fn with_config(mut self, config: DecisionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn knowledge_base(&self) -> &FaaKnowledgeBase {
        &self.knowledge_base
    }

    /// Resolve providers and assemble the plan the decision runs over
    pub fn bundle(&self, request: &FlightRequest) -> FlightPlanBundle {
        let aircraft = request.aircraft.clone().unwrap_or_default();
        let weather = self
            .weather
            .current(request.location.latitude, request.location.longitude);
        let weather_risk = assess_flight_risk(weather.as_ref().map(|w| &w.metar));
        let terrain = self.terrain.profile(&request.waypoints);
        let performance = PerformanceEstimate::calculate(&aircraft, weather.as_ref());

        let compliance = self.knowledge_base.check_compliance(&ComplianceInput {
            max_altitude: request.max_altitude,
            flight_time: performance.estimated_flight_time,
            over_populated_area: request.over_populated_area,
            wind_speed: weather.as_ref().map(|w| w.metar.wind_speed).unwrap_or(0.0),
            terrain_elevation: terrain.max_terrain_elevation,
            near_airport: request.near_airport,
        });

        FlightPlanBundle {
            aircraft,
            weather,
            weather_risk,
            terrain,
            waypoints: request.waypoints.clone(),
            performance,
            compliance,
            emergency_procedures: EmergencyProcedures::standard(),
            aircraft_ready: request.aircraft_ready,
        }
    }

    pub fn decide(&self, bundle: &FlightPlanBundle) -> DecisionOutcome {
        let factors = DecisionFactors {
            faa_compliant: bundle.compliance.compliant,
            weather_acceptable: bundle.weather_risk.is_acceptable(),
            terrain_clearance: bundle.terrain.terrain_clearance,
            battery_reserve: bundle.performance.estimated_flight_time
                > self.config.min_flight_time,
            aircraft_ready: bundle.aircraft_ready,
        };

        let go = factors.all_passed();
        let reasons: Vec<String> = factors
            .failed()
            .into_iter()
            .map(|factor| format!("Failed {} check", factor.replace('_', " ")))
            .collect();

        if go {
            info!("Decision: GO ({})", bundle.aircraft.name);
        } else {
            warn!("Decision: NO-GO ({}): {}", bundle.aircraft.name, reasons.join("; "));
        }

        DecisionOutcome {
            go,
            confidence_level: if go {
                ConfidenceLevel::High
            } else {
                ConfidenceLevel::Low
            },
            factors,
            reasons,
            recommendations: bundle.compliance.recommendations.clone(),
        }
    }

    pub fn plan(&self, request: &FlightRequest) -> FlightPlan {
        let bundle = self.bundle(request);
        let decision = self.decide(&bundle);
        let mission_id = Uuid::new_v4();

        info!(
            "Planned mission {}: {} waypoints, {:.1} min, {:?}",
            mission_id,
            bundle.waypoints.len(),
            bundle.performance.estimated_flight_time,
            bundle.weather_risk
        );

        FlightPlan {
            mission_id,
            created_at: Utc::now(),
            bundle,
            decision,
        }
    }
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new()
    }
}
