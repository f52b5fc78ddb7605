//! Shipment input models.
//!
//! This module defines the box specifications and the request the quote
//! engine prices. Every measurement is optional because callers often
//! supply partial information; the engine decides what is missing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Carrier;

/// Box dimensions in centimetres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Length in cm.
    pub length: Option<Decimal>,
    /// Width in cm.
    pub width: Option<Decimal>,
    /// Height in cm.
    pub height: Option<Decimal>,
}

impl Dimensions {
    /// Creates dimensions where all three sides are known.
    pub fn new(length: Decimal, width: Decimal, height: Decimal) -> Self {
        Self {
            length: Some(length),
            width: Some(width),
            height: Some(height),
        }
    }

    /// Returns the `(L, W, H)` triple when all three sides are known and positive.
    ///
    /// # Examples
    ///
    /// ```
    /// use carrier_quote_engine::models::Dimensions;
    /// use rust_decimal::Decimal;
    ///
    /// let dims = Dimensions::new(Decimal::from(40), Decimal::from(40), Decimal::from(50));
    /// assert!(dims.complete().is_some());
    ///
    /// let partial = Dimensions { length: Some(Decimal::from(40)), ..Default::default() };
    /// assert!(partial.complete().is_none());
    /// ```
    pub fn complete(&self) -> Option<(Decimal, Decimal, Decimal)> {
        match (self.length, self.width, self.height) {
            (Some(l), Some(w), Some(h))
                if l > Decimal::ZERO && w > Decimal::ZERO && h > Decimal::ZERO =>
            {
                Some((l, w, h))
            }
            _ => None,
        }
    }

    /// Returns true when at least one side was given.
    pub fn any_given(&self) -> bool {
        self.length.is_some() || self.width.is_some() || self.height.is_some()
    }
}

/// One box specification, possibly repeated `quantity` times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxSpec {
    /// Actual weight of one box in kg.
    pub weight: Option<Decimal>,
    /// Dimensions of one box.
    pub dimensions: Dimensions,
    /// Number of identical boxes.
    pub quantity: u32,
}

impl BoxSpec {
    /// Creates a fully specified box.
    pub fn new(weight: Decimal, dimensions: Dimensions, quantity: u32) -> Self {
        Self {
            weight: Some(weight),
            dimensions,
            quantity,
        }
    }

    /// Returns the actual weight if it is known and positive.
    pub fn known_weight(&self) -> Option<Decimal> {
        self.weight.filter(|w| *w > Decimal::ZERO)
    }

    /// Returns true when neither a weight nor complete dimensions are known.
    pub fn is_unmeasured(&self) -> bool {
        self.known_weight().is_none() && self.dimensions.complete().is_none()
    }
}

impl Default for BoxSpec {
    fn default() -> Self {
        Self {
            weight: None,
            dimensions: Dimensions::default(),
            quantity: 1,
        }
    }
}

/// The boxes that make up a shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "boxes")]
pub enum ShipmentBoxes {
    /// `quantity` copies of one box specification.
    Uniform(BoxSpec),
    /// Several box specifications, each with its own quantity.
    Mixed(Vec<BoxSpec>),
}

/// A request for quotes from one or more carriers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentRequest {
    /// Free-text description of the contents.
    pub content: String,
    /// Free-text destination, e.g. "Almanya" or "Berlin, Germany".
    pub country: String,
    /// The boxes to price.
    pub boxes: ShipmentBoxes,
    /// Restricts quoting to these carriers when set.
    pub carriers: Option<Vec<Carrier>>,
}

impl ShipmentRequest {
    /// Returns the carriers to evaluate, in declaration order.
    pub fn requested_carriers(&self) -> Vec<Carrier> {
        match &self.carriers {
            Some(filter) if !filter.is_empty() => Carrier::ALL
                .into_iter()
                .filter(|c| filter.contains(c))
                .collect(),
            _ => Carrier::ALL.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_non_positive_dimension_is_incomplete() {
        let dims = Dimensions::new(dec!(40), dec!(0), dec!(50));
        assert!(dims.complete().is_none());
        assert!(dims.any_given());
    }

    #[test]
    fn test_zero_weight_is_unknown() {
        let spec = BoxSpec {
            weight: Some(Decimal::ZERO),
            ..Default::default()
        };
        assert!(spec.known_weight().is_none());
        assert!(spec.is_unmeasured());
    }

    #[test]
    fn test_default_box_has_quantity_one() {
        assert_eq!(BoxSpec::default().quantity, 1);
    }

    #[test]
    fn test_carrier_filter_keeps_declaration_order() {
        let request = ShipmentRequest {
            content: "books".to_string(),
            country: "Germany".to_string(),
            boxes: ShipmentBoxes::Uniform(BoxSpec::default()),
            carriers: Some(vec![Carrier::Aramex, Carrier::Ups]),
        };
        assert_eq!(
            request.requested_carriers(),
            vec![Carrier::Ups, Carrier::Aramex]
        );
    }

    #[test]
    fn test_empty_filter_means_all_carriers() {
        let request = ShipmentRequest {
            content: "books".to_string(),
            country: "Germany".to_string(),
            boxes: ShipmentBoxes::Uniform(BoxSpec::default()),
            carriers: Some(vec![]),
        };
        assert_eq!(request.requested_carriers(), Carrier::ALL.to_vec());
    }
}
