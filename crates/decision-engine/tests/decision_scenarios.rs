use decision_engine::emergency::EmergencyProcedures;
use decision_engine::weather::{assess_flight_risk, MetarReport};
use decision_engine::{
    AircraftProfile, ComplianceInput, ConfidenceLevel, DecisionEngine, FaaKnowledgeBase,
    FlightPlanBundle, PerformanceEstimate, TerrainProfile, TerrainSource, Waypoint,
    WeatherReport, WeatherRisk, WeatherSource,
};
use proptest::prelude::*;

fn route() -> Vec<Waypoint> {
    vec![
        Waypoint::new(37.7749, -122.4194, 720.0),
        Waypoint::new(37.7755, -122.4185, 730.0),
    ]
}

/// Compliant plan in moderate weather with 12 minutes of corrected endurance
fn moderate_bundle() -> FlightPlanBundle {
    let weather = WeatherReport {
        metar: MetarReport {
            wind_speed: 12.0,
            ..Default::default()
        },
        taf: None,
    };
    let aircraft = AircraftProfile::default();
    let mut performance = PerformanceEstimate::calculate(&aircraft, Some(&weather));
    performance.estimated_flight_time = 12.0;

    let compliance = FaaKnowledgeBase::default().check_compliance(&ComplianceInput {
        max_altitude: 300.0,
        flight_time: performance.estimated_flight_time,
        wind_speed: weather.metar.wind_speed,
        terrain_elevation: 500.0,
        ..Default::default()
    });

    FlightPlanBundle {
        aircraft,
        weather_risk: assess_flight_risk(Some(&weather.metar)),
        weather: Some(weather),
        terrain: TerrainProfile::over(&route(), 500.0, Vec::new()),
        waypoints: route(),
        performance,
        compliance,
        emergency_procedures: EmergencyProcedures::standard(),
        aircraft_ready: true,
    }
}

#[test]
fn moderate_risk_twelve_minutes_is_go() {
    let bundle = moderate_bundle();
    assert_eq!(bundle.weather_risk, WeatherRisk::ModerateRisk);
    assert!(bundle.compliance.compliant);
    assert!(bundle.terrain.terrain_clearance);

    let outcome = DecisionEngine::new().decide(&bundle);
    assert!(outcome.go);
    assert_eq!(outcome.confidence_level, ConfidenceLevel::High);
    assert!(outcome.reasons.is_empty());
    // wind above 10 kt still earns a recommendation
    assert_eq!(outcome.recommendations.len(), 1);
}

#[test]
fn high_risk_weather_is_the_only_reason() {
    let mut bundle = moderate_bundle();
    bundle.weather_risk = WeatherRisk::HighRisk;
    let outcome = DecisionEngine::new().decide(&bundle);
    assert!(!outcome.go);
    assert_eq!(outcome.confidence_level, ConfidenceLevel::Low);
    assert_eq!(outcome.reasons, vec!["Failed weather acceptable check"]);
}

#[test]
fn exactly_ten_minutes_fails_battery_reserve() {
    let mut bundle = moderate_bundle();
    bundle.performance.estimated_flight_time = 10.0;
    let outcome = DecisionEngine::new().decide(&bundle);
    assert_eq!(outcome.reasons, vec!["Failed battery reserve check"]);
}

struct StormySky;

impl WeatherSource for StormySky {
    fn current(&self, _latitude: f64, _longitude: f64) -> Option<WeatherReport> {
        Some(WeatherReport {
            metar: MetarReport {
                wind_speed: 25.0,
                ceiling: 800.0,
                ..Default::default()
            },
            taf: None,
        })
    }
}

struct NoWeather;

impl WeatherSource for NoWeather {
    fn current(&self, _latitude: f64, _longitude: f64) -> Option<WeatherReport> {
        None
    }
}

struct Lowlands;

impl TerrainSource for Lowlands {
    fn profile(&self, path: &[Waypoint]) -> TerrainProfile {
        TerrainProfile::over(path, 0.0, Vec::new())
    }
}

#[test]
fn injected_storm_grounds_flight() {
    let engine = DecisionEngine::with_sources(Box::new(StormySky), Box::new(Lowlands));
    let plan = engine.plan(&decision_engine::FlightRequest {
        waypoints: route(),
        max_altitude: 300.0,
        ..Default::default()
    });
    assert_eq!(plan.bundle.weather_risk, WeatherRisk::HighRisk);
    assert!(!plan.decision.go);
    assert!(plan
        .decision
        .reasons
        .contains(&"Failed weather acceptable check".to_string()));
}

#[test]
fn missing_weather_is_unknown_but_not_grounding() {
    let engine = DecisionEngine::with_sources(Box::new(NoWeather), Box::new(Lowlands));
    let plan = engine.plan(&decision_engine::FlightRequest {
        waypoints: route(),
        max_altitude: 300.0,
        ..Default::default()
    });
    assert_eq!(plan.bundle.weather_risk, WeatherRisk::Unknown);
    assert!(plan.decision.go);
    assert_eq!(plan.bundle.performance.estimated_flight_time, 47.0);
}

proptest! {
    #[test]
    fn go_iff_no_reasons(
        compliant in any::<bool>(),
        risk in prop_oneof![
            Just(WeatherRisk::LowRisk),
            Just(WeatherRisk::ModerateRisk),
            Just(WeatherRisk::HighRisk),
            Just(WeatherRisk::Unknown),
        ],
        clearance in any::<bool>(),
        minutes in 5.0f64..60.0,
        ready in any::<bool>(),
    ) {
        let mut bundle = moderate_bundle();
        bundle.compliance.compliant = compliant;
        bundle.weather_risk = risk;
        bundle.terrain.terrain_clearance = clearance;
        bundle.performance.estimated_flight_time = minutes;
        bundle.aircraft_ready = ready;

        let outcome = DecisionEngine::new().decide(&bundle);
        let expected = compliant && risk != WeatherRisk::HighRisk && clearance && minutes > 10.0 && ready;
        prop_assert_eq!(outcome.go, expected);
        prop_assert_eq!(outcome.go, outcome.reasons.is_empty());
        prop_assert_eq!(outcome.confidence_level == ConfidenceLevel::High, outcome.go);
    }
}
