//! FAA Part 107 knowledge base

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Wind above which delaying the flight is recommended (knots)
const HIGH_WIND_KT: f64 = 10.0;

/// Terrain elevation above which an extra altitude buffer is recommended (feet MSL)
const HIGH_TERRAIN_FT: f64 = 1000.0;

/// Extra endurance required on top of the battery reserve (minutes)
const RESERVE_MARGIN_MIN: f64 = 5.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Part107Limits {
    /// Feet AGL
    pub max_altitude: f64,
    pub visual_line_of_sight: bool,
    pub over_people: bool,
    pub night_operations: bool,
    pub controlled_airspace: bool,
    /// Feet horizontal
    pub min_distance_from_clouds: f64,
    /// Feet vertical
    pub min_distance_below_clouds: f64,
}

impl Default for Part107Limits {
    fn default() -> Self {
        Self {
            max_altitude: 400.0,
            visual_line_of_sight: true,
            over_people: false,
            night_operations: false,
            controlled_airspace: false,
            min_distance_from_clouds: 500.0,
            min_distance_below_clouds: 500.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SafetyMargins {
    /// Minutes
    pub battery_reserve: f64,
    /// Feet
    pub altitude_buffer: f64,
    /// Feet from obstacles
    pub horizontal_buffer: f64,
    /// Feet per minute
    pub emergency_descent_rate: f64,
}

impl Default for SafetyMargins {
    fn default() -> Self {
        Self {
            battery_reserve: 5.0,
            altitude_buffer: 100.0,
            horizontal_buffer: 500.0,
            emergency_descent_rate: 500.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FaaKnowledgeBase {
    pub part_107: Part107Limits,
    pub safety_margins: SafetyMargins,
}

/// The slice of a flight plan the compliance check looks at
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ComplianceInput {
    /// Feet AGL
    pub max_altitude: f64,
    /// Wind-corrected minutes
    pub flight_time: f64,
    pub over_populated_area: bool,
    /// Knots
    pub wind_speed: f64,
    /// Feet MSL
    pub terrain_elevation: f64,
    pub near_airport: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ComplianceReport {
    pub compliant: bool,
    pub violations: Vec<String>,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
}

impl FaaKnowledgeBase {
    pub fn check_compliance(&self, input: &ComplianceInput) -> ComplianceReport {
        let mut violations = Vec::new();

        if input.max_altitude > self.part_107.max_altitude {
            violations.push(format!(
                "Maximum altitude exceeds FAA limit of {}ft",
                self.part_107.max_altitude
            ));
        }

        if input.flight_time < self.safety_margins.battery_reserve + RESERVE_MARGIN_MIN {
            violations.push(format!(
                "Insufficient battery reserve. Need at least {}min reserve",
                self.safety_margins.battery_reserve
            ));
        }

        if input.over_populated_area {
            violations.push("Cannot operate over populated areas".to_string());
        }

        for violation in &violations {
            warn!("Part 107 violation: {}", violation);
        }

        ComplianceReport {
            compliant: violations.is_empty(),
            violations,
            warnings: Vec::new(),
            recommendations: self.safety_recommendations(input),
        }
    }

    pub fn safety_recommendations(&self, input: &ComplianceInput) -> Vec<String> {
        let mut recommendations = Vec::new();

        if input.wind_speed > HIGH_WIND_KT {
            recommendations
                .push("High wind conditions detected. Consider delaying flight.".to_string());
        }
        if input.terrain_elevation > HIGH_TERRAIN_FT {
            recommendations
                .push("High terrain elevation. Ensure adequate altitude buffer.".to_string());
        }
        if input.near_airport {
            recommendations.push(
                "Near controlled airspace. Maintain extra separation from manned aircraft."
                    .to_string(),
            );
        }

        recommendations
    }
}
