//! Domain scorers
//!
//! Each scorer starts at 100, subtracts fixed penalties per failed threshold
//! and floors at 0. Scorers are pure functions of the mission record.

use crate::{Detail, DomainScore, FlightCategory, Issue, MissionParameters, Severity, WeatherParams};
use std::collections::BTreeMap;
use tracing::debug;

const BASE_SCORE: i32 = 100;

pub use airframe::WEIGHT_LIMIT_G;
pub const WEIGHT_CAUTION_G: f64 = 225.0;
pub const OVERWEIGHT_PENALTY: i32 = 40;
pub const NEAR_LIMIT_PENALTY: i32 = 15;

/// Fractions of endurance consumed by the planned flight
pub const BATTERY_CRITICAL_FRACTION: f64 = 0.9;
pub const BATTERY_WARNING_FRACTION: f64 = 0.8;
pub const BATTERY_CRITICAL_PENALTY: i32 = 30;
pub const BATTERY_WARNING_PENALTY: i32 = 15;

/// Knots
pub const WIND_LIMIT_KT: f64 = 15.0;
pub const WIND_CAUTION_KT: f64 = 10.0;
pub const WIND_LIMIT_PENALTY: i32 = 35;
pub const WIND_CAUTION_PENALTY: i32 = 15;

/// Kilometres
pub const VISIBILITY_MIN_KM: f64 = 3.0;
pub const VISIBILITY_CAUTION_KM: f64 = 5.0;
pub const VISIBILITY_MIN_PENALTY: i32 = 30;
pub const VISIBILITY_CAUTION_PENALTY: i32 = 10;

pub const IFR_PENALTY: i32 = 40;
pub const MVFR_PENALTY: i32 = 15;

/// Metres AGL (120 m ≈ 400 ft)
pub const ALTITUDE_LIMIT_M: f64 = 120.0;
pub const ALTITUDE_CAUTION_M: f64 = 100.0;
pub const ALTITUDE_LIMIT_PENALTY: i32 = 40;
pub const ALTITUDE_CAUTION_PENALTY: i32 = 10;

pub const UNAUTHORIZED_AIRSPACE_PENALTY: i32 = 50;

/// Accumulates penalties and issues for one domain
struct Scorecard {
    score: i32,
    issues: Vec<Issue>,
    details: BTreeMap<String, Detail>,
}

impl Scorecard {
    fn new() -> Self {
        Self {
            score: BASE_SCORE,
            issues: Vec::new(),
            details: BTreeMap::new(),
        }
    }

    fn penalize(&mut self, penalty: i32, severity: Severity, message: &str) {
        self.score -= penalty;
        self.issues.push(Issue::new(severity, message));
    }

    fn note(&mut self, message: &str) {
        self.issues.push(Issue::new(Severity::Info, message));
    }

    fn detail(&mut self, label: &str, severity: Severity, value: String) {
        self.details.insert(label.to_string(), Detail::new(severity, value));
    }

    fn finish(self, domain: &str) -> DomainScore {
        let score = self.score.max(0) as u32;
        debug!("{} score: {} ({} issues)", domain, score, self.issues.len());
        DomainScore {
            score,
            issues: self.issues,
            details: self.details,
        }
    }
}

/// Aircraft weight and battery margin
pub fn technical(params: &MissionParameters) -> DomainScore {
    let mut card = Scorecard::new();
    let weight = params.aircraft.takeoff_weight;
    let endurance = params.aircraft.max_flight_time;
    let duration = params.flight_plan.estimated_duration;

    let weight_severity = if weight > WEIGHT_LIMIT_G {
        card.penalize(
            OVERWEIGHT_PENALTY,
            Severity::Critical,
            "Aircraft exceeds 250g FAA limit",
        );
        Severity::Critical
    } else if weight > WEIGHT_CAUTION_G {
        card.penalize(
            NEAR_LIMIT_PENALTY,
            Severity::Warning,
            "Aircraft near weight limit",
        );
        Severity::Warning
    } else {
        Severity::Info
    };

    if duration >= endurance * BATTERY_CRITICAL_FRACTION {
        card.penalize(
            BATTERY_CRITICAL_PENALTY,
            Severity::Critical,
            "Insufficient battery margin",
        );
    } else if duration >= endurance * BATTERY_WARNING_FRACTION {
        card.penalize(
            BATTERY_WARNING_PENALTY,
            Severity::Warning,
            "Low battery margin",
        );
    }

    card.detail(
        "weight_usage",
        weight_severity,
        format!("{}g ({:.1}% of limit)", weight, weight / WEIGHT_LIMIT_G * 100.0),
    );
    let reserve = endurance - duration;
    card.detail(
        "battery_margin",
        Severity::Info,
        format!("{:.1} min reserve", reserve),
    );
    let status = match weight_severity {
        Severity::Info => "Good",
        Severity::Warning => "Caution",
        Severity::Critical => "Over Limit",
    };
    card.detail("weight_status", weight_severity, status.to_string());

    card.finish("Technical")
}

/// Wind, visibility and flight category
pub fn weather(weather: &WeatherParams) -> DomainScore {
    let mut card = Scorecard::new();
    let wind = weather.wind_speed;
    let visibility = weather.visibility;

    let wind_severity = if wind > WIND_LIMIT_KT {
        card.penalize(
            WIND_LIMIT_PENALTY,
            Severity::Critical,
            "Wind speed exceeds safe limits",
        );
        Severity::Critical
    } else if wind > WIND_CAUTION_KT {
        card.penalize(
            WIND_CAUTION_PENALTY,
            Severity::Warning,
            "Moderate wind conditions",
        );
        Severity::Warning
    } else {
        Severity::Info
    };

    let visibility_severity = if visibility < VISIBILITY_MIN_KM {
        card.penalize(
            VISIBILITY_MIN_PENALTY,
            Severity::Critical,
            "Poor visibility conditions",
        );
        Severity::Critical
    } else if visibility < VISIBILITY_CAUTION_KM {
        card.penalize(
            VISIBILITY_CAUTION_PENALTY,
            Severity::Warning,
            "Limited visibility",
        );
        Severity::Warning
    } else {
        Severity::Info
    };

    let condition_severity = match weather.condition {
        FlightCategory::Ifr => {
            card.penalize(
                IFR_PENALTY,
                Severity::Critical,
                "IFR conditions not suitable for drone ops",
            );
            Severity::Critical
        }
        FlightCategory::Mvfr => {
            card.penalize(MVFR_PENALTY, Severity::Warning, "Marginal VFR conditions");
            Severity::Warning
        }
        FlightCategory::Vfr => Severity::Info,
        FlightCategory::Other(ref value) => {
            debug!("Unrecognised flight category '{}', not penalized", value);
            Severity::Critical
        }
    };

    card.detail("wind_status", wind_severity, format!("{} kts", wind));
    card.detail(
        "visibility_status",
        visibility_severity,
        format!("{} km", visibility),
    );
    card.detail(
        "condition_status",
        condition_severity,
        weather.condition.to_string(),
    );

    card.finish("Weather")
}

/// Part 107 altitude ceiling and airspace authorization
pub fn regulatory(params: &MissionParameters) -> DomainScore {
    let mut card = Scorecard::new();
    let altitude = params.flight_plan.max_altitude;

    let altitude_severity = if altitude > ALTITUDE_LIMIT_M {
        card.penalize(
            ALTITUDE_LIMIT_PENALTY,
            Severity::Critical,
            "Altitude exceeds 400ft AGL limit",
        );
        Severity::Critical
    } else if altitude > ALTITUDE_CAUTION_M {
        card.penalize(
            ALTITUDE_CAUTION_PENALTY,
            Severity::Warning,
            "Operating near altitude limit",
        );
        Severity::Warning
    } else {
        Severity::Info
    };

    let (airspace_severity, airspace) =
        match (params.controlled_airspace, params.airspace_authorization) {
            (false, _) => (Severity::Info, "Class G"),
            (true, true) => {
                card.note("Controlled airspace - authorized");
                (Severity::Info, "Authorized")
            }
            (true, false) => {
                card.penalize(
                    UNAUTHORIZED_AIRSPACE_PENALTY,
                    Severity::Critical,
                    "No authorization for controlled airspace",
                );
                (Severity::Critical, "Restricted")
            }
        };

    card.detail("altitude_status", altitude_severity, format!("{}m", altitude));
    card.detail("airspace_status", airspace_severity, airspace.to_string());

    card.finish("Regulatory")
}
