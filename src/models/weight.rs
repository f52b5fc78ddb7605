//! Weight calculation result models.
//!
//! Per-box figures keep their full decimal precision. Only the
//! shipment-level chargeable total is rounded (up, to a whole kilogram),
//! and that rounded figure is the one carriers price.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which weight determined the chargeable weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMethod {
    /// The actual (scale) weight was used.
    Actual,
    /// The volumetric weight exceeded the actual weight and was used.
    Volumetric,
}

/// The chargeable weight of a single box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeableWeightResult {
    /// The greater of actual and volumetric weight.
    pub chargeable_weight: Decimal,
    /// `L×W×H / divisor`, or zero when dimensions are incomplete.
    pub volumetric_weight: Decimal,
    /// Which weight won.
    pub calculation_method: CalculationMethod,
    /// True when the volumetric weight is the pricing basis.
    pub is_dimensional_weight: bool,
}

/// Per-box line of a mixed shipment breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxCalculationResult {
    /// 1-based position of the box specification in the request.
    pub box_number: usize,
    /// Actual weight of one box (zero when unknown).
    pub actual_weight: Decimal,
    /// Volumetric weight of one box.
    pub volumetric_weight: Decimal,
    /// Chargeable weight of one box, unrounded.
    pub chargeable_weight: Decimal,
    /// Number of boxes with this specification.
    pub quantity: u32,
    /// `chargeable_weight × quantity`, unrounded.
    pub subtotal: Decimal,
    /// Which weight won for this box.
    pub calculation_method: CalculationMethod,
}

/// Classification of how the boxes of a shipment differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// All boxes share weight and dimensions.
    Identical,
    /// Same dimensions, different weights.
    MixedWeights,
    /// Same weight, different dimensions.
    MixedDimensions,
    /// Both weights and dimensions differ.
    CompletelyMixed,
}

/// Banding of the actual/volumetric ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EfficiencyBand {
    /// Below 50%: mostly empty space.
    Low,
    /// 50% to 80% inclusive.
    Moderate,
    /// Above 80%.
    High,
}

/// Derived analytics over a multi-box shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionalAnalysis {
    /// How the boxes differ from each other.
    pub scenario: Scenario,
    /// Sum of actual weight × quantity.
    pub total_actual_weight: Decimal,
    /// Sum of volumetric weight × quantity.
    pub total_volumetric_weight: Decimal,
    /// Sum of the per-box subtotals, unrounded.
    pub total_chargeable_weight: Decimal,
    /// `total_actual_weight − total_volumetric_weight`; positive favors actual-weight pricing.
    pub dimensional_advantage: Decimal,
    /// `actual / volumetric × 100`, absent when there is no volumetric weight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_efficiency: Option<Decimal>,
    /// Band of `volume_efficiency`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub efficiency_band: Option<EfficiencyBand>,
    /// Human-readable packaging advice.
    pub recommendations: Vec<String>,
}

/// Weight breakdown for a shipment of identical boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniformShipmentSummary {
    /// Result for one box.
    pub per_box: ChargeableWeightResult,
    /// Number of boxes.
    pub quantity: u32,
    /// `per_box.chargeable_weight × quantity`, unrounded.
    pub total_chargeable_weight: Decimal,
    /// The total rounded up to a whole kilogram.
    pub rounded_chargeable_weight: Decimal,
}

/// Weight breakdown for a shipment of differing boxes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MixedShipmentSummary {
    /// One line per box specification.
    pub box_calculations: Vec<BoxCalculationResult>,
    /// Totals, scenario and advice.
    pub dimensional_analysis: DimensionalAnalysis,
    /// Total number of physical boxes.
    pub total_boxes: u64,
    /// The chargeable total rounded up to a whole kilogram.
    pub rounded_chargeable_weight: Decimal,
    /// Largest volumetric weight of any single box.
    pub max_box_volumetric_weight: Decimal,
}

/// Weight breakdown attached to a quoted shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum WeightSummary {
    /// Identical boxes.
    Uniform(UniformShipmentSummary),
    /// Differing boxes.
    Mixed(MixedShipmentSummary),
}

impl WeightSummary {
    /// The rounded chargeable weight carriers price.
    pub fn rounded_chargeable_weight(&self) -> Decimal {
        match self {
            WeightSummary::Uniform(s) => s.rounded_chargeable_weight,
            WeightSummary::Mixed(s) => s.rounded_chargeable_weight,
        }
    }

    /// Total number of physical boxes.
    pub fn total_boxes(&self) -> u64 {
        match self {
            WeightSummary::Uniform(s) => u64::from(s.quantity),
            WeightSummary::Mixed(s) => s.total_boxes,
        }
    }

    /// Largest volumetric weight of any single box, used by per-box carrier limits.
    pub fn max_box_volumetric_weight(&self) -> Decimal {
        match self {
            WeightSummary::Uniform(s) => s.per_box.volumetric_weight,
            WeightSummary::Mixed(s) => s.max_box_volumetric_weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn uniform() -> WeightSummary {
        WeightSummary::Uniform(UniformShipmentSummary {
            per_box: ChargeableWeightResult {
                chargeable_weight: dec!(14.4),
                volumetric_weight: dec!(14.4),
                calculation_method: CalculationMethod::Volumetric,
                is_dimensional_weight: true,
            },
            quantity: 3,
            total_chargeable_weight: dec!(43.2),
            rounded_chargeable_weight: dec!(44),
        })
    }

    #[test]
    fn test_uniform_summary_accessors() {
        let summary = uniform();
        assert_eq!(summary.rounded_chargeable_weight(), dec!(44));
        assert_eq!(summary.total_boxes(), 3);
        assert_eq!(summary.max_box_volumetric_weight(), dec!(14.4));
    }

    #[test]
    fn test_scenario_serializes_snake_case() {
        let json = serde_json::to_string(&Scenario::CompletelyMixed).unwrap();
        assert_eq!(json, "\"completely_mixed\"");
    }

    #[test]
    fn test_chargeable_weight_result_serializes_camel_case() {
        let json = serde_json::to_value(match uniform() {
            WeightSummary::Uniform(s) => s.per_box,
            WeightSummary::Mixed(_) => unreachable!(),
        })
        .unwrap();
        assert_eq!(json["calculationMethod"], "volumetric");
        assert_eq!(json["isDimensionalWeight"], true);
    }
}
