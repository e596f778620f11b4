//! Confidence aggregation
//!
//! The three domain scores and a geofence contribution are averaged with equal
//! weight. Thresholds are inclusive: exactly 85 is GO, exactly 70 is CAUTION.

use crate::{scorers, DomainScore, Issue, MissionParameters};
use geofence::{BoundaryCheck, GeofenceValidator};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AggregatorConfig {
    pub go_threshold: f64,
    pub caution_threshold: f64,
    /// Contribution when the geofence confirms the mission location
    pub geofence_pass_score: f64,
    /// Contribution when it does not
    pub geofence_fail_score: f64,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            go_threshold: 85.0,
            caution_threshold: 70.0,
            geofence_pass_score: 85.0,
            geofence_fail_score: 25.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Recommendation {
    #[serde(rename = "GO")]
    Go,
    #[serde(rename = "CAUTION")]
    Caution,
    #[serde(rename = "NO-GO")]
    NoGo,
}

impl Recommendation {
    pub fn from_confidence(confidence: f64, config: &AggregatorConfig) -> Self {
        match confidence {
            c if c >= config.go_threshold => Self::Go,
            c if c >= config.caution_threshold => Self::Caution,
            _ => Self::NoGo,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfidenceAssessment {
    /// 0-100
    pub ai_confidence: f64,
    pub recommendation: Recommendation,
    pub technical: DomainScore,
    pub weather: DomainScore,
    pub regulatory: DomainScore,
    pub geofence_confirmed: bool,
    pub key_concerns: Vec<String>,
}

impl ConfidenceAssessment {
    /// Every issue raised across the three domains, in domain order
    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.technical
            .issues
            .iter()
            .chain(&self.weather.issues)
            .chain(&self.regulatory.issues)
    }
}

pub struct ScoreAggregator {
    validator: Arc<GeofenceValidator>,
    config: AggregatorConfig,
}

impl ScoreAggregator {
    pub fn new(validator: Arc<GeofenceValidator>) -> Self {
        Self::with_config(validator, AggregatorConfig::default())
    }

    pub fn with_config(validator: Arc<GeofenceValidator>, config: AggregatorConfig) -> Self {
        Self { validator, config }
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    pub fn validator(&self) -> &Arc<GeofenceValidator> {
        &self.validator
    }

    pub fn assess(&self, params: &MissionParameters) -> ConfidenceAssessment {
        let technical = scorers::technical(params);
        let weather = scorers::weather(&params.weather);
        let regulatory = scorers::regulatory(params);

        let confirmation = self.validator.check(
            params.location.latitude,
            params.location.longitude,
            params.is_simulation,
        );

        let mut key_concerns = Vec::new();
        let geofence_score = if confirmation.passed {
            self.config.geofence_pass_score
        } else {
            let concern = match confirmation.result.boundary {
                BoundaryCheck::Outside => {
                    "Mission location is outside the authorized operational area"
                }
                BoundaryCheck::Inside | BoundaryCheck::NotChecked => {
                    "System validation indicates poor signal conditions"
                }
            };
            warn!("Geofence not confirmed: {}", concern);
            key_concerns.push(concern.to_string());
            self.config.geofence_fail_score
        };

        let contributions = [
            technical.score as f64,
            weather.score as f64,
            regulatory.score as f64,
            geofence_score,
        ];
        let ai_confidence = contributions.iter().sum::<f64>() / contributions.len() as f64;
        let recommendation = Recommendation::from_confidence(ai_confidence, &self.config);

        info!(
            "Mission assessment: confidence {:.2}% -> {:?}",
            ai_confidence, recommendation
        );

        ConfidenceAssessment {
            ai_confidence,
            recommendation,
            technical,
            weather,
            regulatory,
            geofence_confirmed: confirmation.passed,
            key_concerns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_thresholds() {
        let config = AggregatorConfig::default();
        assert_eq!(Recommendation::from_confidence(100.0, &config), Recommendation::Go);
        assert_eq!(Recommendation::from_confidence(85.0, &config), Recommendation::Go);
        assert_eq!(
            Recommendation::from_confidence(84.999, &config),
            Recommendation::Caution
        );
        assert_eq!(
            Recommendation::from_confidence(70.0, &config),
            Recommendation::Caution
        );
        assert_eq!(
            Recommendation::from_confidence(69.999, &config),
            Recommendation::NoGo
        );
        assert_eq!(Recommendation::from_confidence(0.0, &config), Recommendation::NoGo);
    }

    #[test]
    fn test_recommendation_serialized_names() {
        assert_eq!(serde_json::to_value(Recommendation::NoGo).unwrap(), "NO-GO");
        assert_eq!(serde_json::to_value(Recommendation::Go).unwrap(), "GO");
    }

    #[test]
    fn test_outside_area_concern() {
        let aggregator = ScoreAggregator::new(Arc::new(GeofenceValidator::new()));
        let params = MissionParameters {
            is_simulation: false,
            ..Default::default()
        };
        let assessment = aggregator.assess(&params);
        assert!(!assessment.geofence_confirmed);
        assert_eq!(
            assessment.key_concerns,
            vec!["Mission location is outside the authorized operational area".to_string()]
        );
    }

    #[test]
    fn test_custom_thresholds() {
        let config = AggregatorConfig {
            go_threshold: 97.0,
            ..Default::default()
        };
        let aggregator =
            ScoreAggregator::with_config(Arc::new(GeofenceValidator::new()), config);
        let mut params = MissionParameters::default();
        params.aircraft.max_flight_time = 30.0;
        params.is_simulation = true;
        // (100 + 100 + 100 + 85) / 4 = 96.25
        let assessment = aggregator.assess(&params);
        assert_eq!(assessment.recommendation, Recommendation::Caution);
        assert!((assessment.ai_confidence - 96.25).abs() < 1e-9);
    }
}
