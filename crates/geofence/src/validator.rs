//! Geofence validator service
//!
//! One instance is constructed at startup and shared (`Arc<GeofenceValidator>`)
//! by every caller that needs area validation. The simulation flag and the last
//! successful validation sit behind a mutex; `validate` itself is pure.

use crate::{
    Boundary, BoundaryCheck, CalibrationStatus, GeofenceResult, ReadinessStatus, SystemMode,
    SystemStatus,
};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Minimum signal strength for a validation to pass
pub const SIGNAL_THRESHOLD: f64 = 70.0;

/// Minimum system health for a validation to pass
pub const HEALTH_THRESHOLD: f64 = 75.0;

/// A recorded validation expires after one hour
pub const VALIDATION_EXPIRY_SECS: i64 = 3600;

/// Signal quality reported in simulator mode
const SIMULATOR_SIGNAL_QUALITY: f64 = 99.0;

/// Signal quality right at expiry; decays one point per minute after that
const EXPIRED_SIGNAL_BASE: f64 = 50.0;

/// Last successful validation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LastValidation {
    pub timestamp: DateTime<Utc>,
    /// (latitude, longitude)
    pub position: (f64, f64),
    pub result: GeofenceResult,
}

/// Outcome of a recorded validation attempt
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Confirmation {
    pub passed: bool,
    pub result: GeofenceResult,
}

#[derive(Debug, Default)]
struct ValidatorState {
    simulation: bool,
    last_validation: Option<LastValidation>,
}

pub struct GeofenceValidator {
    boundary: Boundary,
    state: Mutex<ValidatorState>,
}

impl GeofenceValidator {
    /// Validator over the packaged boundary
    pub fn new() -> Self {
        Self::with_boundary(Boundary::embedded())
    }

    pub fn with_boundary(boundary: Boundary) -> Self {
        Self {
            boundary,
            state: Mutex::new(ValidatorState::default()),
        }
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    /// Validate a position without touching recorded state
    pub fn validate(&self, latitude: f64, longitude: f64, simulation: bool) -> GeofenceResult {
        if simulation {
            return GeofenceResult {
                valid: true,
                signal_strength: 95.0 + 5.0 * jitter(latitude + longitude),
                system_health: 98.0,
                status: CalibrationStatus::SimCalibrated,
                boundary: BoundaryCheck::NotChecked,
            };
        }

        if !self.boundary.contains(latitude, longitude) {
            warn!(
                "Position ({:.6}, {:.6}) is outside the operational boundary",
                latitude, longitude
            );
            return GeofenceResult {
                valid: false,
                signal_strength: 15.0 + 25.0 * jitter(latitude),
                system_health: 25.0 + 35.0 * jitter(longitude),
                status: CalibrationStatus::PoorSignal,
                boundary: BoundaryCheck::Outside,
            };
        }

        GeofenceResult {
            valid: true,
            signal_strength: 80.0 + 15.0 * jitter(latitude),
            system_health: 85.0 + 10.0 * jitter(longitude),
            status: CalibrationStatus::Operational,
            boundary: BoundaryCheck::Inside,
        }
    }

    /// Validate and record the outcome; true when the position passes
    pub fn confirm(&self, latitude: f64, longitude: f64, simulation: bool) -> bool {
        self.check(latitude, longitude, simulation).passed
    }

    pub fn confirm_at(
        &self,
        latitude: f64,
        longitude: f64,
        simulation: bool,
        now: DateTime<Utc>,
    ) -> bool {
        self.check_at(latitude, longitude, simulation, now).passed
    }

    /// Like [`confirm`](Self::confirm), but also returns the underlying reading
    pub fn check(&self, latitude: f64, longitude: f64, simulation: bool) -> Confirmation {
        self.check_at(latitude, longitude, simulation, Utc::now())
    }

    pub fn check_at(
        &self,
        latitude: f64,
        longitude: f64,
        simulation: bool,
        now: DateTime<Utc>,
    ) -> Confirmation {
        let result = self.validate(latitude, longitude, simulation);
        let passed = result.valid
            && result.signal_strength > SIGNAL_THRESHOLD
            && result.system_health > HEALTH_THRESHOLD;

        let mut state = self.state.lock();
        state.simulation = simulation;
        if passed {
            state.last_validation = Some(LastValidation {
                timestamp: now,
                position: (latitude, longitude),
                result,
            });
            debug!(
                "Validation passed at ({:.6}, {:.6}): signal {:.1}, health {:.1}",
                latitude, longitude, result.signal_strength, result.system_health
            );
        } else {
            state.last_validation = None;
            info!(
                "Validation failed at ({:.6}, {:.6}): {:?} / {:?}",
                latitude, longitude, result.status, result.boundary
            );
        }

        Confirmation { passed, result }
    }

    pub fn status(&self) -> SystemStatus {
        self.status_at(Utc::now())
    }

    pub fn status_at(&self, now: DateTime<Utc>) -> SystemStatus {
        let state = self.state.lock();

        if state.simulation {
            return SystemStatus {
                mode: SystemMode::Simulator,
                status: ReadinessStatus::Ready,
                last_validation: "SIM_MODE".to_string(),
                last_validation_age_secs: None,
                signal_quality: SIMULATOR_SIGNAL_QUALITY,
            };
        }

        let Some(last) = state.last_validation.as_ref() else {
            return SystemStatus {
                mode: SystemMode::Hardware,
                status: ReadinessStatus::NotValidated,
                last_validation: "NEVER".to_string(),
                last_validation_age_secs: None,
                signal_quality: 0.0,
            };
        };

        // clock skew: a validation stamped after `now` counts as fresh
        let age_secs = (now - last.timestamp).num_seconds().max(0);
        if age_secs > VALIDATION_EXPIRY_SECS {
            let age_minutes = age_secs as f64 / 60.0;
            return SystemStatus {
                mode: SystemMode::Hardware,
                status: ReadinessStatus::ValidationExpired,
                last_validation: format!("{} minutes ago", age_secs / 60),
                last_validation_age_secs: Some(age_secs),
                signal_quality: (EXPIRED_SIGNAL_BASE - age_minutes).max(0.0),
            };
        }

        SystemStatus {
            mode: SystemMode::Hardware,
            status: ReadinessStatus::Validated,
            last_validation: format!("{} seconds ago", age_secs),
            last_validation_age_secs: Some(age_secs),
            signal_quality: last.result.signal_strength,
        }
    }

    pub fn last_validation(&self) -> Option<LastValidation> {
        self.state.lock().last_validation.clone()
    }
}

impl Default for GeofenceValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministic offset in [0, 0.99] derived from a coordinate value
fn jitter(value: f64) -> f64 {
    let digest = blake3::hash(&value.to_bits().to_le_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest.as_bytes()[..8]);
    (u64::from_le_bytes(head) % 100) as f64 / 100.0
}
