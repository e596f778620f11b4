//! Wind-corrected performance estimate

use crate::{AircraftProfile, WeatherReport};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Endurance lost per knot of wind, as a fraction
pub const WIND_CORRECTION_PER_KT: f64 = 0.001;

/// Floor for the wind-corrected flight time (minutes)
pub const MIN_FLIGHT_TIME_MIN: f64 = 5.0;

/// Fraction of ideal range achieved in practice
const RANGE_EFFICIENCY: f64 = 0.8;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerformanceEstimate {
    /// m/s (Vy)
    pub cruise_speed: f64,
    /// m/s (Vno)
    pub max_speed: f64,
    /// m/s (Vs)
    pub stall_speed: f64,
    /// Wind-corrected minutes, never below [`MIN_FLIGHT_TIME_MIN`]
    pub estimated_flight_time: f64,
    /// Nominal range: wind-adjusted minutes (before the floor) × Vy × efficiency
    pub range: f64,
    /// Endurance reduction in percent
    pub wind_impact: f64,
    /// Minutes
    pub battery_reserve: f64,
}

/// `base × (1 − 0.001 × wind)` before flooring
fn wind_adjusted(base_minutes: f64, wind_kt: f64) -> f64 {
    base_minutes * (1.0 - WIND_CORRECTION_PER_KT * wind_kt)
}

pub fn wind_corrected_flight_time(base_minutes: f64, wind_kt: f64) -> f64 {
    wind_adjusted(base_minutes, wind_kt).max(MIN_FLIGHT_TIME_MIN)
}

impl PerformanceEstimate {
    pub fn calculate(aircraft: &AircraftProfile, weather: Option<&WeatherReport>) -> Self {
        let wind = weather.map(|w| w.metar.wind_speed).unwrap_or(0.0);
        let adjusted = wind_adjusted(aircraft.estimated_flight_time, wind);
        let speeds = &aircraft.airspeeds;

        let estimate = Self {
            cruise_speed: speeds.vy,
            max_speed: speeds.vno,
            stall_speed: speeds.vs,
            estimated_flight_time: adjusted.max(MIN_FLIGHT_TIME_MIN),
            range: adjusted * speeds.vy * RANGE_EFFICIENCY,
            wind_impact: wind * WIND_CORRECTION_PER_KT * 100.0,
            battery_reserve: aircraft.battery_reserve,
        };

        debug!(
            "Performance: {:.1} min at {} kt wind (base {:.1} min)",
            estimate.estimated_flight_time, wind, aircraft.estimated_flight_time
        );
        estimate
    }
}
