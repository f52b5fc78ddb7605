//! Chargeable weight calculation.
//!
//! Carriers bill the greater of the actual weight and the volumetric weight
//! (`L×W×H / divisor`, dimensions in cm). Per-box figures stay fractional;
//! only the shipment total is rounded up to a whole kilogram.
//!
//! Weights too large to represent saturate at `Decimal::MAX`, which is
//! above any shipment limit.

use rust_decimal::Decimal;

use crate::models::{
    BoxSpec, CalculationMethod, ChargeableWeightResult, Dimensions, UniformShipmentSummary,
};

/// Volumetric weight of one box in kg.
///
/// Returns zero unless all three dimensions are known and positive.
///
/// # Examples
///
/// ```
/// use carrier_quote_engine::calculation::volumetric_weight;
/// use carrier_quote_engine::models::Dimensions;
/// use rust_decimal_macros::dec;
///
/// let dims = Dimensions::new(dec!(40), dec!(40), dec!(50));
/// assert_eq!(volumetric_weight(&dims, dec!(5000)), dec!(16));
/// ```
pub fn volumetric_weight(dimensions: &Dimensions, divisor: Decimal) -> Decimal {
    match dimensions.complete() {
        Some((length, width, height)) if divisor > Decimal::ZERO => {
            length
                .saturating_mul(width)
                .saturating_mul(height)
                .checked_div(divisor)
                .unwrap_or(Decimal::MAX)
        }
        _ => Decimal::ZERO,
    }
}

/// Calculates the chargeable weight of one box.
///
/// Returns `None` when neither a positive actual weight nor complete
/// dimensions are known. When only one of them is known, it is used alone.
///
/// # Examples
///
/// ```
/// use carrier_quote_engine::calculation::calculate_chargeable_weight;
/// use carrier_quote_engine::models::{CalculationMethod, Dimensions};
/// use rust_decimal_macros::dec;
///
/// let dims = Dimensions::new(dec!(40), dec!(40), dec!(50));
/// let result = calculate_chargeable_weight(Some(dec!(5)), &dims, dec!(5000)).unwrap();
/// assert_eq!(result.chargeable_weight, dec!(16));
/// assert_eq!(result.calculation_method, CalculationMethod::Volumetric);
/// ```
pub fn calculate_chargeable_weight(
    actual: Option<Decimal>,
    dimensions: &Dimensions,
    divisor: Decimal,
) -> Option<ChargeableWeightResult> {
    let actual = actual.filter(|w| *w > Decimal::ZERO);
    let volumetric = volumetric_weight(dimensions, divisor);

    if actual.is_none() && volumetric.is_zero() {
        return None;
    }

    let actual = actual.unwrap_or(Decimal::ZERO);
    let is_dimensional = volumetric > actual;
    let (chargeable_weight, calculation_method) = if is_dimensional {
        (volumetric, CalculationMethod::Volumetric)
    } else {
        (actual, CalculationMethod::Actual)
    };

    Some(ChargeableWeightResult {
        chargeable_weight,
        volumetric_weight: volumetric,
        calculation_method,
        is_dimensional_weight: is_dimensional,
    })
}

/// Shipment-level chargeable weight: `ceil(per_box × quantity)`.
///
/// This is the only place a weight is rounded.
///
/// # Examples
///
/// ```
/// use carrier_quote_engine::calculation::shipment_total;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(shipment_total(dec!(14.4), 3), dec!(44));
/// ```
pub fn shipment_total(per_box: Decimal, quantity: u32) -> Decimal {
    per_box.saturating_mul(Decimal::from(quantity)).ceil()
}

/// Weight breakdown for `quantity` identical boxes.
///
/// Returns `None` when the box has neither weight nor complete dimensions.
pub fn summarize_uniform(spec: &BoxSpec, divisor: Decimal) -> Option<UniformShipmentSummary> {
    let per_box = calculate_chargeable_weight(spec.known_weight(), &spec.dimensions, divisor)?;
    Some(UniformShipmentSummary {
        per_box,
        quantity: spec.quantity,
        total_chargeable_weight: per_box
            .chargeable_weight
            .saturating_mul(Decimal::from(spec.quantity)),
        rounded_chargeable_weight: shipment_total(per_box.chargeable_weight, spec.quantity),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    const DIVISOR: Decimal = dec!(5000);

    fn dims(l: Decimal, w: Decimal, h: Decimal) -> Dimensions {
        Dimensions::new(l, w, h)
    }

    #[test]
    fn test_actual_weight_wins_when_heavier() {
        let result =
            calculate_chargeable_weight(Some(dec!(20)), &dims(dec!(30), dec!(30), dec!(30)), DIVISOR)
                .unwrap();
        assert_eq!(result.chargeable_weight, dec!(20));
        assert_eq!(result.volumetric_weight, dec!(5.4));
        assert_eq!(result.calculation_method, CalculationMethod::Actual);
        assert!(!result.is_dimensional_weight);
    }

    #[test]
    fn test_equal_weights_use_actual_method() {
        let result =
            calculate_chargeable_weight(Some(dec!(16)), &dims(dec!(40), dec!(40), dec!(50)), DIVISOR)
                .unwrap();
        assert_eq!(result.chargeable_weight, dec!(16));
        assert_eq!(result.calculation_method, CalculationMethod::Actual);
    }

    #[test]
    fn test_weight_only() {
        let result = calculate_chargeable_weight(Some(dec!(2.5)), &Dimensions::default(), DIVISOR)
            .unwrap();
        assert_eq!(result.chargeable_weight, dec!(2.5));
        assert_eq!(result.volumetric_weight, Decimal::ZERO);
    }

    #[test]
    fn test_dimensions_only() {
        let result =
            calculate_chargeable_weight(None, &dims(dec!(60), dec!(50), dec!(50)), DIVISOR).unwrap();
        assert_eq!(result.chargeable_weight, dec!(30));
        assert!(result.is_dimensional_weight);
    }

    #[test]
    fn test_nothing_known_is_insufficient() {
        assert!(calculate_chargeable_weight(None, &Dimensions::default(), DIVISOR).is_none());
        assert!(
            calculate_chargeable_weight(Some(Decimal::ZERO), &Dimensions::default(), DIVISOR)
                .is_none()
        );
    }

    #[test]
    fn test_partial_dimensions_count_as_unknown() {
        let partial = Dimensions {
            length: Some(dec!(40)),
            width: Some(dec!(40)),
            height: None,
        };
        assert_eq!(volumetric_weight(&partial, DIVISOR), Decimal::ZERO);
    }

    #[test]
    fn test_round_once_on_the_total() {
        // 14.4 kg per box, 3 boxes: 43.2 kg, billed as 44 kg
        assert_eq!(shipment_total(dec!(14.4), 3), dec!(44));
        // Rounding each box first would give 45
        assert_ne!(shipment_total(dec!(14.4).ceil(), 3), dec!(44));
    }

    #[test]
    fn test_whole_totals_are_not_rounded_up() {
        assert_eq!(shipment_total(dec!(16), 2), dec!(32));
        assert_eq!(shipment_total(dec!(300), 1), dec!(300));
        assert_eq!(shipment_total(dec!(300.01), 1), dec!(301));
    }

    #[test]
    fn test_uniform_summary_keeps_per_box_precision() {
        let spec = BoxSpec::new(dec!(10), dims(dec!(40), dec!(30), dec!(60)), 3);
        let summary = summarize_uniform(&spec, DIVISOR).unwrap();
        assert_eq!(summary.per_box.chargeable_weight, dec!(14.4));
        assert_eq!(summary.total_chargeable_weight, dec!(43.2));
        assert_eq!(summary.rounded_chargeable_weight, dec!(44));
    }

    #[test]
    fn test_huge_dimensions_saturate() {
        let side = dec!(10000000000);
        let huge = dims(side, side, side);
        assert_eq!(volumetric_weight(&huge, DIVISOR), Decimal::MAX / DIVISOR);

        let spec = BoxSpec::new(dec!(1), huge, u32::MAX);
        let summary = summarize_uniform(&spec, DIVISOR).unwrap();
        assert_eq!(summary.total_chargeable_weight, Decimal::MAX);
        assert_eq!(summary.rounded_chargeable_weight, Decimal::MAX);
    }

    #[test]
    fn test_tiny_divisor_saturates() {
        let side = dec!(1000000000);
        let big = dims(side, side, side);
        assert_eq!(volumetric_weight(&big, dec!(0.0001)), Decimal::MAX);
    }

    #[test]
    fn test_uniform_summary_needs_a_measurement() {
        assert!(summarize_uniform(&BoxSpec::default(), DIVISOR).is_none());
    }

    proptest! {
        #[test]
        fn prop_chargeable_is_exact_max(
            actual in 1u32..50_000,
            l in 1u32..200,
            w in 1u32..200,
            h in 1u32..200,
        ) {
            let actual = Decimal::new(actual as i64, 2);
            let dimensions = dims(Decimal::from(l), Decimal::from(w), Decimal::from(h));
            let volumetric = volumetric_weight(&dimensions, DIVISOR);

            let result = calculate_chargeable_weight(Some(actual), &dimensions, DIVISOR).unwrap();
            prop_assert_eq!(result.chargeable_weight, actual.max(volumetric));
            prop_assert_eq!(result.is_dimensional_weight, volumetric > actual);
        }

        #[test]
        fn prop_total_is_smallest_whole_kg_covering_the_boxes(
            per_box in 1u32..100_000,
            quantity in 1u32..20,
        ) {
            let per_box = Decimal::new(per_box as i64, 3);
            let exact = per_box * Decimal::from(quantity);
            let total = shipment_total(per_box, quantity);
            prop_assert!(total >= exact);
            prop_assert!(total - exact < Decimal::ONE);
            prop_assert_eq!(total.fract(), Decimal::ZERO);
        }
    }
}
