//! Weight & balance for flying-wing planforms
//!
//! ```text
//! cg_from_wing     = Σ(wᵢ · (xᵢ − x_le)) / Σwᵢ
//! mac              = wing_area[mm²] / wingspan[mm]
//! neutral_point    = 0.25 · mac
//! stability_margin = (neutral_point − cg_from_wing) / mac
//! ```
//!
//! Conventional (tailed) layouts are not modelled.

use crate::AircraftDesign;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Wing leading edge sits 100mm aft of the nose
pub const WING_LEADING_EDGE_MM: f64 = 100.0;

/// Neutral point as a fraction of MAC
pub const NEUTRAL_POINT_FRACTION: f64 = 0.25;

/// A design is stable only with strictly more margin than this
pub const MIN_STABILITY_MARGIN: f64 = 0.05;

const MM2_PER_M2: f64 = 1_000_000.0;

/// Moment contribution of one component
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComponentMoment {
    pub component: String,
    pub weight: f64,
    /// x from the nose (mm)
    pub position: f64,
    /// x from the wing leading edge (mm)
    pub relative_pos: f64,
    pub moment: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeightBalanceReport {
    pub total_weight: f64,
    pub cg_from_wing: f64,
    pub cg_from_nose: f64,
    pub mac: f64,
    pub neutral_point: f64,
    pub stability_margin: f64,
    pub is_stable: bool,
    pub weight_distribution: Vec<ComponentMoment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightBalanceCalculator {
    pub wing_leading_edge_mm: f64,
    pub neutral_point_fraction: f64,
    pub min_stability_margin: f64,
}

impl Default for WeightBalanceCalculator {
    fn default() -> Self {
        Self {
            wing_leading_edge_mm: WING_LEADING_EDGE_MM,
            neutral_point_fraction: NEUTRAL_POINT_FRACTION,
            min_stability_margin: MIN_STABILITY_MARGIN,
        }
    }
}

impl WeightBalanceCalculator {
    pub fn compute(&self, design: &AircraftDesign) -> WeightBalanceReport {
        let weight_distribution: Vec<ComponentMoment> = design
            .components
            .iter()
            .map(|c| {
                let relative_pos = c.position.x - self.wing_leading_edge_mm;
                ComponentMoment {
                    component: c.name.clone(),
                    weight: c.weight,
                    position: c.position.x,
                    relative_pos,
                    moment: c.weight * relative_pos,
                }
            })
            .collect();

        let total_weight: f64 = weight_distribution.iter().map(|m| m.weight).sum();
        let total_moment: f64 = weight_distribution.iter().map(|m| m.moment).sum();

        // Massless design: CG collapses onto the leading edge
        let cg_from_wing = if total_weight > 0.0 {
            total_moment / total_weight
        } else {
            0.0
        };

        let mac = if design.wingspan > 0.0 {
            design.wing_area * MM2_PER_M2 / design.wingspan
        } else {
            0.0
        };
        let neutral_point = self.neutral_point_fraction * mac;

        let stability_margin = if mac > 0.0 && mac.is_finite() {
            (neutral_point - cg_from_wing) / mac
        } else {
            0.0
        };
        let is_stable = self.is_stable_margin(stability_margin);

        debug!(
            "W&B {}: {:.1}g, cg {:.1}mm from LE, mac {:.1}mm, margin {:.3} ({})",
            design.name,
            total_weight,
            cg_from_wing,
            mac,
            stability_margin,
            if is_stable { "stable" } else { "unstable" }
        );

        WeightBalanceReport {
            total_weight,
            cg_from_wing,
            cg_from_nose: cg_from_wing + self.wing_leading_edge_mm,
            mac,
            neutral_point,
            stability_margin,
            is_stable,
            weight_distribution,
        }
    }

    pub fn is_stable_margin(&self, margin: f64) -> bool {
        margin > self.min_stability_margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Component, Position};

    /// 1000mm span, 0.125m² → 125mm MAC, neutral point 31.25mm aft of LE
    fn single_mass_design(x: f64) -> AircraftDesign {
        AircraftDesign {
            name: "test".to_string(),
            components: vec![Component::new("ballast", 10.0, Position::new(x, 0.0, 0.0))],
            wingspan: 1000.0,
            wing_area: 0.125,
            empty_weight: 10.0,
            max_takeoff_weight: 10.0,
            cg_location_percent: 0.25,
            stability_margin: 0.1,
        }
    }

    #[test]
    fn test_geometry() {
        let report = WeightBalanceCalculator::default().compute(&single_mass_design(125.0));
        assert_eq!(report.total_weight, 10.0);
        assert_eq!(report.mac, 125.0);
        assert_eq!(report.neutral_point, 31.25);
        assert_eq!(report.cg_from_wing, 25.0);
        assert_eq!(report.cg_from_nose, 125.0);
    }

    #[test]
    fn test_margin_exactly_threshold_is_unstable() {
        let report = WeightBalanceCalculator::default().compute(&single_mass_design(125.0));
        assert_eq!(report.stability_margin, 0.05);
        assert!(!report.is_stable);
    }

    #[test]
    fn test_margin_just_above_threshold_is_stable() {
        // cg = 31.25 - 0.0501 * 125 = 24.9875
        let report = WeightBalanceCalculator::default().compute(&single_mass_design(124.9875));
        assert!((report.stability_margin - 0.0501).abs() < 1e-9);
        assert!(report.is_stable);
    }

    #[test]
    fn test_threshold_predicate() {
        let calc = WeightBalanceCalculator::default();
        assert!(!calc.is_stable_margin(0.05));
        assert!(calc.is_stable_margin(0.0501));
        assert!(!calc.is_stable_margin(-0.2));
    }

    #[test]
    fn test_aft_cg_unstable() {
        let report = WeightBalanceCalculator::default().compute(&single_mass_design(200.0));
        assert!(report.stability_margin < 0.0);
        assert!(!report.is_stable);
    }

    #[test]
    fn test_moments_per_component() {
        let mut design = single_mass_design(125.0);
        design
            .components
            .push(Component::new("battery", 30.0, Position::new(80.0, 0.0, -5.0)));

        let report = WeightBalanceCalculator::default().compute(&design);
        assert_eq!(report.weight_distribution.len(), 2);
        assert_eq!(report.weight_distribution[1].relative_pos, -20.0);
        assert_eq!(report.weight_distribution[1].moment, -600.0);
        // (250 - 600) / 40
        assert_eq!(report.cg_from_wing, -8.75);
    }

    #[test]
    fn test_degenerate_design_not_stable() {
        let design = AircraftDesign {
            name: "empty".to_string(),
            components: Vec::new(),
            wingspan: 0.0,
            wing_area: 0.0,
            empty_weight: 0.0,
            max_takeoff_weight: 0.0,
            cg_location_percent: 0.0,
            stability_margin: 0.0,
        };
        let report = WeightBalanceCalculator::default().compute(&design);
        assert_eq!(report.total_weight, 0.0);
        assert_eq!(report.cg_from_wing, 0.0);
        assert_eq!(report.mac, 0.0);
        assert_eq!(report.stability_margin, 0.0);
        assert!(!report.is_stable);
    }
}
