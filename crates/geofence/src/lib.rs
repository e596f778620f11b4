//! Geofence Library
//!
//! Operational-area validation for small UAV missions: a fixed lon/lat boundary
//! polygon, a ray-casting containment test, and a validator service that keeps
//! the most recent successful validation for readiness reporting.
//!
//! # Validation bands
//!
//! | Outcome          | Signal    | Health    | Status           |
//! |------------------|-----------|-----------|------------------|
//! | Simulation       | 95–100    | 98        | `SIM_CALIBRATED` |
//! | Inside boundary  | 80–95     | 85–95     | `OPERATIONAL`    |
//! | Outside boundary | 15–40     | 25–60     | `POOR_SIGNAL`    |
//!
//! The band offsets are derived from the coordinates, so repeated validation
//! of the same point always yields the same reading.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod boundary;
pub mod validator;

pub use boundary::Boundary;
pub use validator::{Confirmation, GeofenceValidator, LastValidation};

#[derive(Error, Debug)]
pub enum GeofenceError {
    #[error("Boundary payload is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("Boundary JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid boundary polygon: {0}")]
    InvalidPolygon(String),
}

pub type Result<T> = std::result::Result<T, GeofenceError>;

/// Calibration status reported alongside a validation reading
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CalibrationStatus {
    Operational,
    PoorSignal,
    SimCalibrated,
}

/// Whether the boundary test ran and what it concluded
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BoundaryCheck {
    Inside,
    Outside,
    /// Simulation mode skips the boundary test
    NotChecked,
}

/// Result of validating one (latitude, longitude, simulation) triple
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeofenceResult {
    pub valid: bool,
    /// Signal strength (0-100)
    pub signal_strength: f64,
    /// System health (0-100)
    pub system_health: f64,
    pub status: CalibrationStatus,
    pub boundary: BoundaryCheck,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SystemMode {
    Simulator,
    Hardware,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadinessStatus {
    Ready,
    NotValidated,
    ValidationExpired,
    Validated,
}

/// Validator readiness snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemStatus {
    pub mode: SystemMode,
    pub status: ReadinessStatus,
    /// Human-readable age of the last validation ("NEVER", "12 seconds ago", ...)
    pub last_validation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_validation_age_secs: Option<i64>,
    /// Signal quality (0-100)
    pub signal_quality: f64,
}
