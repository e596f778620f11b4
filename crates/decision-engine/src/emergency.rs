//! Emergency procedure catalog

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Procedures every flight plan must carry
pub const REQUIRED_PROCEDURES: [&str; 4] = [
    "engine_failure",
    "loss_of_control",
    "low_battery",
    "ads_b_traffic",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EmergencyProcedure {
    #[serde(default)]
    pub immediate_actions: Vec<String>,
    /// Named reference values ("best_glide_speed", "reserve_time", ...)
    #[serde(default)]
    pub notes: BTreeMap<String, String>,
}

impl EmergencyProcedure {
    fn new(actions: &[&str], notes: &[(&str, &str)]) -> Self {
        Self {
            immediate_actions: actions.iter().map(|a| a.to_string()).collect(),
            notes: notes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct EmergencyProcedures(pub BTreeMap<String, EmergencyProcedure>);

impl EmergencyProcedures {
    pub fn standard() -> Self {
        let procedures = [
            (
                "engine_failure",
                EmergencyProcedure::new(
                    &["Reduce throttle to idle", "Pitch down for best glide speed"],
                    &[
                        ("best_glide_speed", "Vs + 5 knots"),
                        ("landing_priority", "Find suitable landing area immediately"),
                    ],
                ),
            ),
            (
                "loss_of_control",
                EmergencyProcedure::new(
                    &[
                        "Throttle to idle",
                        "Attempt recovery with full control deflection",
                    ],
                    &[(
                        "recovery_technique",
                        "Opposite rudder to stop rotation, then gentle back pressure",
                    )],
                ),
            ),
            (
                "low_battery",
                EmergencyProcedure::new(
                    &[
                        "Return to launch immediately",
                        "Use minimum throttle for cruise",
                    ],
                    &[
                        ("warning_threshold", "20% remaining"),
                        ("reserve_time", "5 minutes at minimum throttle"),
                    ],
                ),
            ),
            (
                "ads_b_traffic",
                EmergencyProcedure::new(
                    &["Climb or descend to increase separation"],
                    &[
                        (
                            "separation_standard",
                            "500 feet vertical, 1 nautical mile horizontal",
                        ),
                        ("communication", "Monitor ADS-B display continuously"),
                    ],
                ),
            ),
        ];

        Self(
            procedures
                .into_iter()
                .map(|(name, procedure)| (name.to_string(), procedure))
                .collect(),
        )
    }

    pub fn get(&self, name: &str) -> Option<&EmergencyProcedure> {
        self.0.get(name)
    }

    /// Required procedures absent from this catalog
    pub fn missing(&self) -> Vec<&'static str> {
        REQUIRED_PROCEDURES
            .into_iter()
            .filter(|name| !self.0.contains_key(*name))
            .collect()
    }
}
