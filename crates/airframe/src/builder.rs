//! Flying-wing design from a hardware catalog
//!
//! Layout rules (x in mm from the nose):
//! - lightest autopilot at the datum
//! - IMU / GPS / barometer forward at 120-140mm
//! - airspeed sensor plus pitot (+15g) at the nose
//! - battery aft, sized to fill the weight budget left after a 30g airframe reserve
//! - 15g motor + propeller at 80mm

use crate::{
    AircraftDesign, AirframeError, Component, Position, Result, WEIGHT_LIMIT_G,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Sensors every design carries, with their mounting positions
const ESSENTIAL_SENSORS: [(&str, Position); 3] = [
    ("imu_mpu6050", Position { x: 120.0, y: 0.0, z: 5.0 }),
    ("gps_ublox_neo_m8n", Position { x: 140.0, y: 0.0, z: 5.0 }),
    ("baro_ms5611", Position { x: 130.0, y: 0.0, z: 5.0 }),
];

const AIRSPEED_SENSOR: &str = "airspeed_mp3v5004";
const PITOT_WEIGHT_G: f64 = 15.0;
const AIRFRAME_RESERVE_G: f64 = 30.0;
const MIN_BATTERY_G: f64 = 20.0;
const MOTOR_WEIGHT_G: f64 = 15.0;
const MTOW_HEADROOM_G: f64 = 20.0;

const WINGSPAN_MM: f64 = 800.0;
const CHORD_MM: f64 = 150.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Part {
    pub name: String,
    /// Grams
    pub weight: f64,
}

impl Part {
    fn new(name: &str, weight: f64) -> Self {
        Self {
            name: name.to_string(),
            weight,
        }
    }
}

/// Available autopilots and sensors, keyed by part id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HardwareCatalog {
    #[serde(default)]
    pub autopilots: BTreeMap<String, Part>,
    #[serde(default)]
    pub sensors: BTreeMap<String, Part>,
}

impl HardwareCatalog {
    /// Built-in catalog of common sub-250g avionics
    pub fn with_defaults() -> Self {
        let autopilots = [
            ("apogee", Part::new("Paparazzi Apogee", 8.0)),
            ("lisa_mx", Part::new("Lisa/MX", 10.5)),
            ("chimera", Part::new("Paparazzi Chimera", 22.0)),
        ];
        let sensors = [
            ("imu_mpu6050", Part::new("MPU-6050 IMU", 2.0)),
            ("gps_ublox_neo_m8n", Part::new("u-blox NEO-M8N GPS", 12.0)),
            ("baro_ms5611", Part::new("MS5611 Barometer", 1.5)),
            ("airspeed_mp3v5004", Part::new("MPXV5004 Airspeed", 4.0)),
        ];

        Self {
            autopilots: autopilots
                .into_iter()
                .map(|(id, p)| (id.to_string(), p))
                .collect(),
            sensors: sensors
                .into_iter()
                .map(|(id, p)| (id.to_string(), p))
                .collect(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn lightest_autopilot(&self) -> Option<&Part> {
        self.autopilots
            .values()
            .min_by(|a, b| a.weight.partial_cmp(&b.weight).unwrap_or(std::cmp::Ordering::Equal))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlyingWingBuilder {
    /// All-up weight the battery is sized against (grams)
    pub target_weight: f64,
}

impl Default for FlyingWingBuilder {
    fn default() -> Self {
        Self {
            target_weight: 200.0,
        }
    }
}

impl FlyingWingBuilder {
    pub fn new(target_weight: f64) -> Self {
        Self { target_weight }
    }

    pub fn design(&self, catalog: &HardwareCatalog) -> Result<AircraftDesign> {
        let autopilot = catalog
            .lightest_autopilot()
            .ok_or(AirframeError::EmptyCatalog("autopilots"))?;

        let mut components = vec![Component::new(
            autopilot.name.clone(),
            autopilot.weight,
            Position::default(),
        )];

        for (id, position) in ESSENTIAL_SENSORS {
            match catalog.sensors.get(id) {
                Some(sensor) => {
                    components.push(Component::new(sensor.name.clone(), sensor.weight, position))
                }
                None => debug!("Catalog has no {}, skipping", id),
            }
        }

        if let Some(airspeed) = catalog.sensors.get(AIRSPEED_SENSOR) {
            components.push(Component::new(
                airspeed.name.clone(),
                airspeed.weight + PITOT_WEIGHT_G,
                Position::new(50.0, 0.0, 10.0),
            ));
        }

        let avionics_weight: f64 = components.iter().map(|c| c.weight).sum();
        let battery_weight =
            (self.target_weight - avionics_weight - AIRFRAME_RESERVE_G).max(MIN_BATTERY_G);

        components.push(Component::new(
            "LiPo Battery",
            battery_weight,
            Position::new(-20.0, 0.0, -5.0),
        ));
        components.push(Component::new(
            "Brushless Motor + Propeller",
            MOTOR_WEIGHT_G,
            Position::new(80.0, 0.0, 0.0),
        ));

        let total_weight: f64 = components.iter().map(|c| c.weight).sum();
        let wing_area = WINGSPAN_MM * CHORD_MM / 1_000_000.0;

        info!(
            "Designed flying wing: {:.1}g ({} components, battery {:.1}g)",
            total_weight,
            components.len(),
            battery_weight
        );

        Ok(AircraftDesign {
            name: format!("FlyingWing_{}g", total_weight as i64),
            components,
            wingspan: WINGSPAN_MM,
            wing_area,
            empty_weight: total_weight,
            max_takeoff_weight: (total_weight + MTOW_HEADROOM_G).min(WEIGHT_LIMIT_G),
            cg_location_percent: 0.25,
            stability_margin: 0.1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WeightBalanceCalculator;

    #[test]
    fn test_default_design() {
        let design = FlyingWingBuilder::default()
            .design(&HardwareCatalog::with_defaults())
            .unwrap();

        // 8 + 2 + 12 + 1.5 + (4 + 15) avionics, 127.5 battery, 15 motor
        assert_eq!(design.name, "FlyingWing_185g");
        assert_eq!(design.components.len(), 7);
        assert_eq!(design.components[0].name, "Paparazzi Apogee");
        assert_eq!(design.empty_weight, 185.0);
        assert_eq!(design.max_takeoff_weight, 205.0);
        assert_eq!(design.wingspan, 800.0);
        assert!((design.wing_area - 0.12).abs() < 1e-12);
    }

    #[test]
    fn test_default_design_is_stable() {
        let design = FlyingWingBuilder::default()
            .design(&HardwareCatalog::with_defaults())
            .unwrap();
        let report = WeightBalanceCalculator::default().compute(&design);
        assert!(report.is_stable, "margin {}", report.stability_margin);
    }

    #[test]
    fn test_battery_floor() {
        let design = FlyingWingBuilder::new(50.0)
            .design(&HardwareCatalog::with_defaults())
            .unwrap();
        let battery = design
            .components
            .iter()
            .find(|c| c.name == "LiPo Battery")
            .unwrap();
        assert_eq!(battery.weight, 20.0);
    }

    #[test]
    fn test_mtow_capped_at_limit() {
        let design = FlyingWingBuilder::new(260.0)
            .design(&HardwareCatalog::with_defaults())
            .unwrap();
        assert!(design.empty_weight > 240.0);
        assert_eq!(design.max_takeoff_weight, WEIGHT_LIMIT_G);
    }

    #[test]
    fn test_empty_catalog() {
        let result = FlyingWingBuilder::default().design(&HardwareCatalog::default());
        assert!(matches!(result, Err(AirframeError::EmptyCatalog("autopilots"))));
    }

    #[test]
    fn test_missing_sensors_skipped() {
        let mut catalog = HardwareCatalog::with_defaults();
        catalog.sensors.clear();
        let design = FlyingWingBuilder::default().design(&catalog).unwrap();
        // autopilot, battery, motor
        assert_eq!(design.components.len(), 3);
    }

    #[test]
    fn test_catalog_from_json() {
        let catalog = HardwareCatalog::from_json(
            r#"{"autopilots": {"tiny": {"name": "Tiny AP", "weight": 3.0}}}"#,
        )
        .unwrap();
        assert_eq!(catalog.lightest_autopilot().unwrap().name, "Tiny AP");
        assert!(catalog.sensors.is_empty());
    }
}
