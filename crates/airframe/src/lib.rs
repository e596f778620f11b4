//! Airframe Library
//!
//! Design records, weight & balance, and first-order performance estimates for
//! sub-250g flying-wing UAVs.
//!
//! Positions are millimetres aft of the nose along the longitudinal axis (x),
//! weights are grams, wingspan is millimetres and wing area is square metres.
//! Centre of gravity and stability margin are always derived from the
//! component list; the values stored on [`AircraftDesign`] are design targets.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod balance;
pub mod builder;
pub mod performance;

pub use balance::{WeightBalanceCalculator, WeightBalanceReport};
pub use builder::{FlyingWingBuilder, HardwareCatalog, Part};
pub use performance::Airspeeds;

/// FAA registration threshold for small UAVs (grams)
pub const WEIGHT_LIMIT_G: f64 = 250.0;

#[derive(Error, Debug)]
pub enum AirframeError {
    #[error("Hardware catalog has no {0}")]
    EmptyCatalog(&'static str),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AirframeError>;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Component {
    pub name: String,
    /// Grams
    pub weight: f64,
    pub position: Position,
}

impl Component {
    pub fn new(name: impl Into<String>, weight: f64, position: Position) -> Self {
        Self {
            name: name.into(),
            weight,
            position,
        }
    }
}

/// Missing fields default; a zero wingspan or empty component list is
/// reported as unstable by the balance calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AircraftDesign {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub components: Vec<Component>,
    /// Millimetres
    #[serde(default)]
    pub wingspan: f64,
    /// Square metres
    #[serde(default)]
    pub wing_area: f64,
    #[serde(default)]
    pub empty_weight: f64,
    #[serde(default)]
    pub max_takeoff_weight: f64,
    /// Target CG as a fraction of MAC
    #[serde(default)]
    pub cg_location_percent: f64,
    /// Target stability margin as a fraction of MAC
    #[serde(default)]
    pub stability_margin: f64,
}

impl AircraftDesign {
    pub fn total_weight(&self) -> f64 {
        self.components.iter().map(|c| c.weight).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_design_record_without_name() {
        let design: AircraftDesign = serde_json::from_str(
            r#"{
                "components": [
                    {"name": "battery", "weight": 40, "position": {"x": 120, "y": 0, "z": 0}}
                ],
                "wingspan": 800,
                "wing_area": 0.12
            }"#,
        )
        .unwrap();
        assert!(design.name.is_empty());
        assert_eq!(design.components.len(), 1);
        assert_eq!(design.total_weight(), 40.0);
    }

    #[test]
    fn test_empty_design_record() {
        let design: AircraftDesign = serde_json::from_str("{}").unwrap();
        assert!(design.components.is_empty());
        assert_eq!(design.wingspan, 0.0);
    }
}
