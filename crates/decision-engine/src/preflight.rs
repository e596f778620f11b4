//! Preflight checklist
//!
//! Stricter than the go/no-go decision: an unknown weather risk fails here.

use crate::weather::WeatherRisk;
use crate::FlightPlanBundle;
use airframe::WEIGHT_LIMIT_G;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Knots
pub const PREFLIGHT_MAX_WIND_KT: f64 = 15.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreflightCheck {
    pub name: String,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl PreflightCheck {
    fn from_result(name: &str, result: std::result::Result<(), String>) -> Self {
        let (passed, detail) = match result {
            Ok(()) => (true, None),
            Err(detail) => (false, Some(detail)),
        };
        Self {
            name: name.to_string(),
            passed,
            detail,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreflightReport {
    pub checks: Vec<PreflightCheck>,
    pub all_passed: bool,
}

impl PreflightReport {
    pub fn run(bundle: &FlightPlanBundle) -> Self {
        let checks = vec![
            PreflightCheck::from_result("aircraft_config", check_aircraft(bundle)),
            PreflightCheck::from_result("weather_conditions", check_weather(bundle)),
            PreflightCheck::from_result("faa_compliance", check_compliance(bundle)),
            PreflightCheck::from_result("system_integrity", Ok(())),
            PreflightCheck::from_result("emergency_procedures", check_procedures(bundle)),
        ];

        for check in checks.iter().filter(|c| !c.passed) {
            warn!(
                "Preflight {} failed: {}",
                check.name,
                check.detail.as_deref().unwrap_or("")
            );
        }

        let all_passed = checks.iter().all(|c| c.passed);
        info!("Preflight checklist: {}", if all_passed { "PASS" } else { "FAIL" });

        Self { checks, all_passed }
    }

    pub fn check(&self, name: &str) -> Option<&PreflightCheck> {
        self.checks.iter().find(|c| c.name == name)
    }
}

fn check_aircraft(bundle: &FlightPlanBundle) -> std::result::Result<(), String> {
    let aircraft = &bundle.aircraft;
    if aircraft.name.trim().is_empty() {
        return Err("Aircraft has no name".to_string());
    }
    if aircraft.estimated_flight_time <= 0.0 {
        return Err("Aircraft has no flight time estimate".to_string());
    }
    if aircraft.empty_weight > WEIGHT_LIMIT_G {
        return Err(format!(
            "Aircraft weight {}g exceeds {}g limit",
            aircraft.empty_weight, WEIGHT_LIMIT_G
        ));
    }
    Ok(())
}

fn check_weather(bundle: &FlightPlanBundle) -> std::result::Result<(), String> {
    match bundle.weather_risk {
        WeatherRisk::HighRisk | WeatherRisk::Unknown => {
            return Err(format!("Weather risk too high: {:?}", bundle.weather_risk));
        }
        WeatherRisk::LowRisk | WeatherRisk::ModerateRisk => {}
    }

    let wind = bundle
        .weather
        .as_ref()
        .map(|w| w.metar.wind_speed)
        .unwrap_or(0.0);
    if wind > PREFLIGHT_MAX_WIND_KT {
        return Err(format!("Wind speed {} knots too high", wind));
    }
    Ok(())
}

fn check_compliance(bundle: &FlightPlanBundle) -> std::result::Result<(), String> {
    if bundle.compliance.compliant {
        Ok(())
    } else {
        Err(bundle.compliance.violations.join("; "))
    }
}

fn check_procedures(bundle: &FlightPlanBundle) -> std::result::Result<(), String> {
    let missing = bundle.emergency_procedures.missing();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(format!("Missing emergency procedures: {}", missing.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DecisionEngine, FlightRequest, Waypoint};

    fn bundle() -> FlightPlanBundle {
        DecisionEngine::new().bundle(&FlightRequest {
            waypoints: vec![Waypoint::new(37.77, -122.42, 800.0)],
            max_altitude: 300.0,
            ..Default::default()
        })
    }

    #[test]
    fn test_nominal_bundle_passes() {
        let report = PreflightReport::run(&bundle());
        assert!(report.all_passed, "{:?}", report.checks);
        assert_eq!(report.checks.len(), 5);
    }

    #[test]
    fn test_unknown_weather_fails() {
        let mut bundle = bundle();
        bundle.weather = None;
        bundle.weather_risk = WeatherRisk::Unknown;
        let report = PreflightReport::run(&bundle);
        assert!(!report.all_passed);
        assert!(!report.check("weather_conditions").unwrap().passed);
    }

    #[test]
    fn test_moderate_risk_with_strong_wind_fails() {
        let mut bundle = bundle();
        bundle.weather_risk = WeatherRisk::ModerateRisk;
        if let Some(weather) = bundle.weather.as_mut() {
            weather.metar.wind_speed = 18.0;
        }
        let report = PreflightReport::run(&bundle);
        let check = report.check("weather_conditions").unwrap();
        assert!(!check.passed);
        assert_eq!(check.detail.as_deref(), Some("Wind speed 18 knots too high"));
    }

    #[test]
    fn test_overweight_aircraft_fails() {
        let mut bundle = bundle();
        bundle.aircraft.empty_weight = 260.0;
        let report = PreflightReport::run(&bundle);
        assert!(!report.check("aircraft_config").unwrap().passed);
        assert!(report.check("system_integrity").unwrap().passed);
    }

    #[test]
    fn test_missing_procedure_fails() {
        let mut bundle = bundle();
        bundle.emergency_procedures.0.remove("ads_b_traffic");
        let report = PreflightReport::run(&bundle);
        let check = report.check("emergency_procedures").unwrap();
        assert!(!check.passed);
        assert_eq!(
            check.detail.as_deref(),
            Some("Missing emergency procedures: ads_b_traffic")
        );
    }
}
