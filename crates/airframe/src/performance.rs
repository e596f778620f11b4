//! First-order performance estimates
//!
//! These are sizing heuristics, not aerodynamic predictions.

use crate::AircraftDesign;
use serde::{Deserialize, Serialize};

/// Sea-level air density (kg/m³)
const AIR_DENSITY: f64 = 1.225;

/// Empirical factor applied to the ideal stall speed
const STALL_FACTOR: f64 = 0.7;

/// Roughly ten minutes of flight per 30g of LiPo
const MINUTES_PER_BATTERY_GRAM: f64 = 10.0 / 30.0;

/// Assumed battery weight when the design lists none
const DEFAULT_BATTERY_G: f64 = 30.0;

/// Characteristic airspeeds (m/s)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Airspeeds {
    /// Stall
    #[serde(rename = "Vs")]
    pub vs: f64,
    /// Best angle of climb
    #[serde(rename = "Vx")]
    pub vx: f64,
    /// Best rate of climb
    #[serde(rename = "Vy")]
    pub vy: f64,
    /// Maximum structural cruising speed
    #[serde(rename = "Vno")]
    pub vno: f64,
}

impl Airspeeds {
    pub fn from_design(design: &AircraftDesign) -> Self {
        let wing_loading = if design.wing_area > 0.0 {
            design.empty_weight / 1000.0 / design.wing_area
        } else {
            0.0
        };

        let vs = (wing_loading * 2.0 / AIR_DENSITY).sqrt() * STALL_FACTOR;

        Self {
            vs: round_tenth(vs),
            vx: round_tenth(vs * 1.1),
            vy: round_tenth(vs * 1.3),
            vno: round_tenth(vs * 1.5),
        }
    }
}

/// Endurance estimate in minutes from the battery component's weight
pub fn estimate_flight_time(design: &AircraftDesign) -> f64 {
    let battery_weight = design
        .components
        .iter()
        .find(|c| c.name.contains("Battery"))
        .map(|c| c.weight)
        .unwrap_or(DEFAULT_BATTERY_G);

    battery_weight * MINUTES_PER_BATTERY_GRAM
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FlyingWingBuilder, HardwareCatalog};

    #[test]
    fn test_default_design_airspeeds() {
        let design = FlyingWingBuilder::default()
            .design(&HardwareCatalog::with_defaults())
            .unwrap();
        let speeds = Airspeeds::from_design(&design);
        assert_eq!(speeds.vs, 1.1);
        assert_eq!(speeds.vx, 1.2);
        assert_eq!(speeds.vy, 1.4);
        assert_eq!(speeds.vno, 1.7);
    }

    #[test]
    fn test_flight_time_from_battery() {
        let design = FlyingWingBuilder::default()
            .design(&HardwareCatalog::with_defaults())
            .unwrap();
        // 127.5g battery
        assert!((estimate_flight_time(&design) - 42.5).abs() < 1e-9);
    }

    #[test]
    fn test_flight_time_without_battery() {
        let mut design = FlyingWingBuilder::default()
            .design(&HardwareCatalog::with_defaults())
            .unwrap();
        design.components.retain(|c| !c.name.contains("Battery"));
        assert!((estimate_flight_time(&design) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_wing_area() {
        let mut design = FlyingWingBuilder::default()
            .design(&HardwareCatalog::with_defaults())
            .unwrap();
        design.wing_area = 0.0;
        assert_eq!(Airspeeds::from_design(&design).vs, 0.0);
    }

    #[test]
    fn test_airspeeds_serialize_with_v_names() {
        let speeds = Airspeeds {
            vs: 1.1,
            vx: 1.2,
            vy: 1.4,
            vno: 1.7,
        };
        let json = serde_json::to_value(speeds).unwrap();
        assert_eq!(json["Vs"], 1.1);
        assert_eq!(json["Vno"], 1.7);
    }
}
