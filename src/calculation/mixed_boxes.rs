//! Mixed-box shipment aggregation.
//!
//! A shipment may contain several box specifications, each with its own
//! weight, dimensions and quantity. Every specification is weighed on its
//! own, the subtotals are summed without rounding, and the shipment total
//! is rounded up once. The breakdown also classifies how the boxes differ
//! and derives packaging advice from the actual/volumetric ratio.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{
    BoxCalculationResult, BoxSpec, DimensionalAnalysis, EfficiencyBand, MixedShipmentSummary,
    Scenario,
};

use super::chargeable_weight::calculate_chargeable_weight;

/// Magnitude of the dimensional advantage (kg) above which advice is firm.
pub const ADVANTAGE_THRESHOLD_KG: Decimal = dec!(10);

/// Aggregates a list of box specifications.
///
/// Returns `None` if any specification has neither a weight nor complete
/// dimensions, or if the list is empty.
///
/// # Examples
///
/// ```
/// use carrier_quote_engine::calculation::aggregate_boxes;
/// use carrier_quote_engine::models::{BoxSpec, Dimensions, Scenario};
/// use rust_decimal_macros::dec;
///
/// let boxes = vec![
///     BoxSpec::new(dec!(10), Dimensions::new(dec!(20), dec!(30), dec!(60)), 1),
///     BoxSpec::new(dec!(15), Dimensions::new(dec!(60), dec!(50), dec!(50)), 1),
/// ];
/// let summary = aggregate_boxes(&boxes, dec!(5000)).unwrap();
/// assert_eq!(summary.rounded_chargeable_weight, dec!(40));
/// assert_eq!(summary.dimensional_analysis.scenario, Scenario::CompletelyMixed);
/// ```
pub fn aggregate_boxes(boxes: &[BoxSpec], divisor: Decimal) -> Option<MixedShipmentSummary> {
    if boxes.is_empty() {
        return None;
    }

    let mut box_calculations = Vec::with_capacity(boxes.len());
    let mut total_actual = Decimal::ZERO;
    let mut total_volumetric = Decimal::ZERO;
    let mut total_chargeable = Decimal::ZERO;
    let mut total_boxes = 0u64;
    let mut max_box_volumetric = Decimal::ZERO;

    for (idx, spec) in boxes.iter().enumerate() {
        let result = calculate_chargeable_weight(spec.known_weight(), &spec.dimensions, divisor)?;
        let quantity = Decimal::from(spec.quantity);
        let actual = spec.known_weight().unwrap_or(Decimal::ZERO);
        let subtotal = result.chargeable_weight.saturating_mul(quantity);

        total_actual = total_actual.saturating_add(actual.saturating_mul(quantity));
        total_volumetric =
            total_volumetric.saturating_add(result.volumetric_weight.saturating_mul(quantity));
        total_chargeable = total_chargeable.saturating_add(subtotal);
        total_boxes += u64::from(spec.quantity);
        max_box_volumetric = max_box_volumetric.max(result.volumetric_weight);

        box_calculations.push(BoxCalculationResult {
            box_number: idx + 1,
            actual_weight: actual,
            volumetric_weight: result.volumetric_weight,
            chargeable_weight: result.chargeable_weight,
            quantity: spec.quantity,
            subtotal,
            calculation_method: result.calculation_method,
        });
    }

    let dimensional_advantage = total_actual - total_volumetric;
    let volume_efficiency = total_actual
        .checked_div(total_volumetric)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .map(|pct| pct.round_dp(2));
    let efficiency_band = volume_efficiency.map(efficiency_band);

    let dimensional_analysis = DimensionalAnalysis {
        scenario: classify_scenario(boxes),
        total_actual_weight: total_actual,
        total_volumetric_weight: total_volumetric,
        total_chargeable_weight: total_chargeable,
        dimensional_advantage,
        volume_efficiency,
        efficiency_band,
        recommendations: recommendations(dimensional_advantage, efficiency_band),
    };

    Some(MixedShipmentSummary {
        box_calculations,
        dimensional_analysis,
        total_boxes,
        rounded_chargeable_weight: total_chargeable.ceil(),
        max_box_volumetric_weight: max_box_volumetric,
    })
}

/// Classifies boxes by their distinct weights and distinct `(L, W, H)` triples.
pub fn classify_scenario(boxes: &[BoxSpec]) -> Scenario {
    let weights: BTreeSet<Option<Decimal>> = boxes.iter().map(BoxSpec::known_weight).collect();
    let dimensions: BTreeSet<Option<(Decimal, Decimal, Decimal)>> =
        boxes.iter().map(|b| b.dimensions.complete()).collect();

    match (weights.len() > 1, dimensions.len() > 1) {
        (false, false) => Scenario::Identical,
        (true, false) => Scenario::MixedWeights,
        (false, true) => Scenario::MixedDimensions,
        (true, true) => Scenario::CompletelyMixed,
    }
}

/// Bands a volume efficiency percentage: below 50, 50 to 80, above 80.
pub fn efficiency_band(efficiency: Decimal) -> EfficiencyBand {
    if efficiency < dec!(50) {
        EfficiencyBand::Low
    } else if efficiency <= dec!(80) {
        EfficiencyBand::Moderate
    } else {
        EfficiencyBand::High
    }
}

fn recommendations(advantage: Decimal, band: Option<EfficiencyBand>) -> Vec<String> {
    let mut advice = Vec::new();

    let magnitude = advantage.abs();
    if advantage < Decimal::ZERO && magnitude > ADVANTAGE_THRESHOLD_KG {
        advice.push(format!(
            "Volumetric weight exceeds actual weight by {} kg; smaller or fuller boxes would lower the chargeable weight.",
            magnitude.normalize()
        ));
    } else if advantage < Decimal::ZERO {
        advice.push(format!(
            "Volumetric weight is slightly above actual weight ({} kg); packaging is close to optimal.",
            magnitude.normalize()
        ));
    } else if magnitude > ADVANTAGE_THRESHOLD_KG {
        advice.push(format!(
            "Actual weight exceeds volumetric weight by {} kg; the shipment is dense and priced on actual weight.",
            magnitude.normalize()
        ));
    } else {
        advice.push("Actual and volumetric weights are balanced.".to_string());
    }

    match band {
        Some(EfficiencyBand::Low) => advice.push(
            "Volume efficiency is below 50%; consolidating into fewer or smaller boxes is recommended."
                .to_string(),
        ),
        Some(EfficiencyBand::Moderate) => advice.push(
            "Volume efficiency is moderate; repacking the bulkiest boxes may reduce cost.".to_string(),
        ),
        Some(EfficiencyBand::High) => {
            advice.push("Volume efficiency is good; no repacking needed.".to_string())
        }
        None => {}
    }

    advice
}
