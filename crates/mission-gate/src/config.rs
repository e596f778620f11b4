//! Configuration document
//!
//! Every section is optional; an empty document yields the built-in defaults.

use decision_engine::DecisionConfig;
use flight_monitor::MonitorConfig;
use mission_scoring::AggregatorConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MissionGateConfig {
    pub aggregator: AggregatorConfig,
    pub decision: DecisionConfig,
    pub monitor: MonitorConfig,
    /// Boundary JSON replacing the packaged polygon
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boundary: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config: MissionGateConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, MissionGateConfig::default());
        assert_eq!(config.aggregator.go_threshold, 85.0);
        assert_eq!(config.decision.min_flight_time, 10.0);
        assert_eq!(config.monitor.low_battery_percent, 20.0);
    }

    #[test]
    fn test_partial_section() {
        let config: MissionGateConfig =
            serde_json::from_str(r#"{"aggregator": {"caution_threshold": 65.0}}"#).unwrap();
        assert_eq!(config.aggregator.caution_threshold, 65.0);
        assert_eq!(config.aggregator.go_threshold, 85.0);
        assert!(config.boundary.is_none());
    }
}
