//! Aircraft profile used for planning

use crate::Result;
use airframe::{performance::estimate_flight_time, AircraftDesign, Airspeeds};
use serde::{Deserialize, Serialize};

/// Reserve carried by every profile unless configured otherwise (minutes)
pub const DEFAULT_BATTERY_RESERVE_MIN: f64 = 5.0;

/// Flattened design plus flight characteristics
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AircraftProfile {
    pub name: String,
    #[serde(rename = "type")]
    pub aircraft_type: String,
    /// Grams
    pub empty_weight: f64,
    /// Grams
    pub max_takeoff_weight: f64,
    /// Millimetres
    pub wingspan: f64,
    /// Square metres
    pub wing_area: f64,
    pub airspeeds: Airspeeds,
    /// Minutes, still air
    pub estimated_flight_time: f64,
    /// Minutes
    pub battery_reserve: f64,
}

impl Default for AircraftProfile {
    /// Reference 185g flying wing
    fn default() -> Self {
        Self {
            name: "Flying_Wing_185g".to_string(),
            aircraft_type: "flying_wing".to_string(),
            empty_weight: 185.0,
            max_takeoff_weight: 205.0,
            wingspan: 800.0,
            wing_area: 0.12,
            airspeeds: Airspeeds {
                vs: 1.1,
                vx: 1.2,
                vy: 1.4,
                vno: 1.7,
            },
            estimated_flight_time: 47.0,
            battery_reserve: DEFAULT_BATTERY_RESERVE_MIN,
        }
    }
}

impl AircraftProfile {
    pub fn from_design(design: &AircraftDesign) -> Self {
        Self {
            name: design.name.clone(),
            aircraft_type: "flying_wing".to_string(),
            empty_weight: design.empty_weight,
            max_takeoff_weight: design.max_takeoff_weight,
            wingspan: design.wingspan,
            wing_area: design.wing_area,
            airspeeds: Airspeeds::from_design(design),
            estimated_flight_time: estimate_flight_time(design),
            battery_reserve: DEFAULT_BATTERY_RESERVE_MIN,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airframe::{FlyingWingBuilder, HardwareCatalog};

    #[test]
    fn test_from_default_design() {
        let design = FlyingWingBuilder::default()
            .design(&HardwareCatalog::with_defaults())
            .unwrap();
        let profile = AircraftProfile::from_design(&design);
        assert_eq!(profile.name, "FlyingWing_185g");
        assert_eq!(profile.empty_weight, 185.0);
        assert_eq!(profile.max_takeoff_weight, 205.0);
        assert_eq!(profile.airspeeds, AircraftProfile::default().airspeeds);
        assert!((profile.estimated_flight_time - 42.5).abs() < 1e-9);
    }

    #[test]
    fn test_partial_profile_json() {
        let profile =
            AircraftProfile::from_json(r#"{"name": "Scout", "empty_weight": 240}"#).unwrap();
        assert_eq!(profile.name, "Scout");
        assert_eq!(profile.empty_weight, 240.0);
        assert_eq!(profile.estimated_flight_time, 47.0);
        assert_eq!(profile.airspeeds.vy, 1.4);
    }
}
