//! Flight Monitor Library
//!
//! Re-applies planning thresholds to live telemetry:
//! - airspeed below 1.2 × stall speed is CRITICAL
//! - altitude below the terrain minimum safe altitude is a WARNING
//! - battery below 20% is a WARNING
//!
//! Each tick is independent; the monitor keeps no flight history.

use decision_engine::FlightPlan;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Telemetry parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MonitorError>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MonitorConfig {
    /// Multiple of stall speed below which airspeed is critical
    pub stall_margin_factor: f64,
    /// Percent
    pub low_battery_percent: f64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            stall_margin_factor: 1.2,
            low_battery_percent: 20.0,
        }
    }
}

/// One telemetry sample
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TelemetrySample {
    /// m/s
    pub airspeed: f64,
    /// Feet MSL
    pub altitude: f64,
    pub battery_percent: f64,
}

impl Default for TelemetrySample {
    fn default() -> Self {
        Self {
            airspeed: 0.0,
            altitude: 0.0,
            battery_percent: 100.0,
        }
    }
}

impl TelemetrySample {
    /// Parse a single sample or an array of samples
    pub fn parse_many(json: &str) -> Result<Vec<Self>> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if value.is_array() {
            Ok(serde_json::from_value(value)?)
        } else {
            Ok(vec![serde_json::from_value(value)?])
        }
    }
}

/// Planning outputs the monitor compares against
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FlightBaseline {
    /// m/s
    pub stall_speed: f64,
    /// Feet MSL
    pub minimum_safe_altitude: f64,
}

impl FlightBaseline {
    pub fn from_plan(plan: &FlightPlan) -> Self {
        Self {
            stall_speed: plan.bundle.aircraft.airspeeds.vs,
            minimum_safe_altitude: plan.bundle.terrain.minimum_safe_altitude,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertLevel {
    Warning,
    Critical,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
    pub action: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlightStatus {
    Nominal,
    Caution,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonitorReport {
    pub alerts: Vec<Alert>,
    pub flight_status: FlightStatus,
}

impl MonitorReport {
    pub fn highest_level(&self) -> Option<AlertLevel> {
        self.alerts.iter().map(|a| a.level).max()
    }
}

#[derive(Debug, Clone, Default)]
pub struct FlightMonitor {
    config: MonitorConfig,
}

impl FlightMonitor {
    pub fn new(config: MonitorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn tick(&self, sample: &TelemetrySample, baseline: &FlightBaseline) -> MonitorReport {
        let mut alerts = Vec::new();

        if sample.airspeed < baseline.stall_speed * self.config.stall_margin_factor {
            alerts.push(Alert {
                level: AlertLevel::Critical,
                message: format!(
                    "Airspeed too low! Current: {:.1} m/s, Stall: {:.1} m/s",
                    sample.airspeed, baseline.stall_speed
                ),
                action: "Increase throttle immediately, lower nose gently".to_string(),
            });
        }

        if sample.altitude < baseline.minimum_safe_altitude {
            alerts.push(Alert {
                level: AlertLevel::Warning,
                message: format!(
                    "Low altitude! Current: {}ft, Minimum: {}ft",
                    sample.altitude, baseline.minimum_safe_altitude
                ),
                action: "Climb to safe altitude".to_string(),
            });
        }

        if sample.battery_percent < self.config.low_battery_percent {
            alerts.push(Alert {
                level: AlertLevel::Warning,
                message: format!("Low battery: {}%", sample.battery_percent),
                action: "Return to launch area immediately".to_string(),
            });
        }

        for alert in &alerts {
            warn!("{:?}: {}", alert.level, alert.message);
        }

        let flight_status = if alerts.is_empty() {
            FlightStatus::Nominal
        } else {
            FlightStatus::Caution
        };
        debug!("Telemetry tick: {:?} ({} alerts)", flight_status, alerts.len());

        MonitorReport {
            alerts,
            flight_status,
        }
    }
}
