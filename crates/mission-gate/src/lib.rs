//! Mission Gate
//!
//! Wires the geofence, airframe, scoring, decision and monitoring crates into
//! one set of services built from a single configuration document.
//!
//! # Stages
//!
//! | Stage   | Service                          | Output                 |
//! |---------|----------------------------------|------------------------|
//! | Design  | `FlyingWingBuilder` + balance    | [`DesignReport`]       |
//! | Assess  | `ScoreAggregator`                | `ConfidenceAssessment` |
//! | Plan    | `DecisionEngine` + preflight     | [`PlanReport`]         |
//! | Operate | `FlightMonitor`                  | `MonitorReport`s       |

use airframe::{
    performance::estimate_flight_time, AircraftDesign, Airspeeds, WeightBalanceCalculator,
    WeightBalanceReport,
};
use decision_engine::{DecisionEngine, FlightPlan, FlightRequest, PreflightReport};
use flight_monitor::{FlightBaseline, FlightMonitor, MonitorReport, TelemetrySample};
use geofence::{Boundary, GeofenceValidator};
use mission_scoring::ScoreAggregator;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

pub mod config;
pub mod loader;

pub use config::MissionGateConfig;

#[derive(Error, Debug)]
pub enum GateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Boundary error: {0}")]
    Geofence(#[from] geofence::GeofenceError),
    #[error("Airframe error: {0}")]
    Airframe(#[from] airframe::AirframeError),
    #[error("Mission record error: {0}")]
    Scoring(#[from] mission_scoring::ScoringError),
    #[error("Flight request error: {0}")]
    Decision(#[from] decision_engine::DecisionError),
    #[error("Telemetry error: {0}")]
    Monitor(#[from] flight_monitor::MonitorError),
}

pub type Result<T> = std::result::Result<T, GateError>;

/// A candidate design with its weight & balance certification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignReport {
    pub design: AircraftDesign,
    pub weight_balance: WeightBalanceReport,
    pub airspeeds: Airspeeds,
    /// Minutes
    pub estimated_flight_time: f64,
    /// Stable and within the weight limit
    pub accepted: bool,
}

impl DesignReport {
    pub fn certify(design: AircraftDesign, calculator: &WeightBalanceCalculator) -> Self {
        let weight_balance = calculator.compute(&design);
        let accepted =
            weight_balance.is_stable && weight_balance.total_weight <= airframe::WEIGHT_LIMIT_G;
        if !accepted {
            warn!(
                "Design {} rejected: margin {:.3}, weight {:.1}g",
                design.name, weight_balance.stability_margin, weight_balance.total_weight
            );
        }

        Self {
            airspeeds: Airspeeds::from_design(&design),
            estimated_flight_time: estimate_flight_time(&design),
            design,
            weight_balance,
            accepted,
        }
    }
}

/// A flight plan with its preflight checklist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanReport {
    pub plan: FlightPlan,
    pub preflight: PreflightReport,
}

/// Long-lived services shared by every command
pub struct MissionGate {
    validator: Arc<GeofenceValidator>,
    aggregator: ScoreAggregator,
    engine: DecisionEngine,
    monitor: FlightMonitor,
}

impl MissionGate {
    pub fn new(config: &MissionGateConfig, boundary: Boundary) -> Self {
        let validator = Arc::new(GeofenceValidator::with_boundary(boundary));
        Self {
            aggregator: ScoreAggregator::with_config(validator.clone(), config.aggregator.clone()),
            engine: DecisionEngine::new().with_config(config.decision.clone()),
            monitor: FlightMonitor::new(config.monitor.clone()),
            validator,
        }
    }

    /// Services over the configured boundary file, or the packaged boundary
    pub fn from_config(config: &MissionGateConfig) -> Result<Self> {
        let boundary = match &config.boundary {
            Some(path) => loader::load_boundary(path)?,
            None => Boundary::embedded(),
        };
        info!("Operational boundary: {} vertices", boundary.vertices().len());
        Ok(Self::new(config, boundary))
    }

    pub fn validator(&self) -> &Arc<GeofenceValidator> {
        &self.validator
    }

    pub fn aggregator(&self) -> &ScoreAggregator {
        &self.aggregator
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    pub fn plan(&self, request: &FlightRequest) -> PlanReport {
        let plan = self.engine.plan(request);
        let preflight = PreflightReport::run(&plan.bundle);
        PlanReport { plan, preflight }
    }

    /// Plan the request, then run every sample against the plan's baseline
    pub fn monitor(
        &self,
        request: &FlightRequest,
        telemetry: &[TelemetrySample],
    ) -> Vec<MonitorReport> {
        let plan = self.engine.plan(request);
        let baseline = FlightBaseline::from_plan(&plan);
        telemetry
            .iter()
            .map(|sample| self.monitor.tick(sample, &baseline))
            .collect()
    }
}
