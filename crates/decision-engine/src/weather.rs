//! Weather reports and flight-risk classification

use serde::{Deserialize, Serialize};

/// Knots
pub const HIGH_RISK_WIND_KT: f64 = 20.0;
pub const MODERATE_RISK_WIND_KT: f64 = 10.0;
/// Statute miles
pub const HIGH_RISK_VISIBILITY: f64 = 3.0;
pub const MODERATE_RISK_VISIBILITY: f64 = 5.0;
/// Feet AGL
pub const HIGH_RISK_CEILING_FT: f64 = 1000.0;
pub const MODERATE_RISK_CEILING_FT: f64 = 3000.0;

/// METAR-style surface observation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MetarReport {
    pub station: String,
    /// Celsius
    pub temperature: f64,
    pub dewpoint: f64,
    /// Knots
    pub wind_speed: f64,
    /// Degrees true
    pub wind_direction: f64,
    /// Statute miles
    pub visibility: f64,
    /// inHg
    pub altimeter: f64,
    /// Feet AGL
    pub ceiling: f64,
}

impl Default for MetarReport {
    fn default() -> Self {
        Self {
            station: String::new(),
            temperature: 15.0,
            dewpoint: 10.0,
            wind_speed: 0.0,
            wind_direction: 0.0,
            visibility: 10.0,
            altimeter: 29.92,
            ceiling: 10000.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TafSummary {
    pub forecast: String,
    pub wind: String,
    pub visibility: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WeatherReport {
    #[serde(default)]
    pub metar: MetarReport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taf: Option<TafSummary>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeatherRisk {
    LowRisk,
    ModerateRisk,
    HighRisk,
    /// No report was available
    Unknown,
}

impl WeatherRisk {
    /// Only `HIGH_RISK` grounds a flight; an unknown risk is left to the preflight checklist
    pub fn is_acceptable(self) -> bool {
        self != Self::HighRisk
    }
}

pub fn assess_flight_risk(report: Option<&MetarReport>) -> WeatherRisk {
    let Some(metar) = report else {
        return WeatherRisk::Unknown;
    };

    if metar.wind_speed > HIGH_RISK_WIND_KT
        || metar.visibility < HIGH_RISK_VISIBILITY
        || metar.ceiling < HIGH_RISK_CEILING_FT
    {
        WeatherRisk::HighRisk
    } else if metar.wind_speed > MODERATE_RISK_WIND_KT
        || metar.visibility < MODERATE_RISK_VISIBILITY
        || metar.ceiling < MODERATE_RISK_CEILING_FT
    {
        WeatherRisk::ModerateRisk
    } else {
        WeatherRisk::LowRisk
    }
}

/// Weather data provider interface
pub trait WeatherSource: Send + Sync {
    /// Current conditions near a location, if any are available
    fn current(&self, latitude: f64, longitude: f64) -> Option<WeatherReport>;
}

/// Fixed VFR observation for planning without a live feed
#[derive(Debug, Clone, Default)]
pub struct SimulatedWeather;

impl SimulatedWeather {
    pub fn new() -> Self {
        Self
    }
}

impl WeatherSource for SimulatedWeather {
    fn current(&self, _latitude: f64, _longitude: f64) -> Option<WeatherReport> {
        Some(WeatherReport {
            metar: MetarReport {
                station: "KSIM".to_string(),
                temperature: 25.0,
                dewpoint: 15.0,
                wind_speed: 8.0,
                wind_direction: 180.0,
                visibility: 10.0,
                altimeter: 30.12,
                ceiling: 5000.0,
            },
            taf: Some(TafSummary {
                forecast: "VFR conditions expected".to_string(),
                wind: "5-10 knots".to_string(),
                visibility: "greater than 6 miles".to_string(),
            }),
        })
    }
}
