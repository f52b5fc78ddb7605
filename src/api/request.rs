//! Request types for the Carrier Quote Engine API.
//!
//! This module defines the JSON request structure for the `/quote` endpoint
//! and its conversion into a [`ShipmentRequest`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{BoxSpec, Carrier, Dimensions, ShipmentBoxes, ShipmentRequest};

/// Request body for the `/quote` endpoint.
///
/// A single box kind is described by the top-level `weight`, `length`,
/// `width`, `height` and `quantity` fields. A shipment of differing boxes
/// uses `boxes` instead; when `boxes` is non-empty the top-level
/// measurements are ignored.
///
/// Missing `content` or `country` is not a request error: the engine answers
/// with the list of missing fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    /// Free-text description of the contents.
    #[serde(default)]
    pub content: String,
    /// Free-text destination country, optionally preceded by a city.
    #[serde(default)]
    pub country: String,
    /// Actual weight of one box in kg.
    #[serde(default)]
    pub weight: Option<Decimal>,
    /// Length in cm.
    #[serde(default)]
    pub length: Option<Decimal>,
    /// Width in cm.
    #[serde(default)]
    pub width: Option<Decimal>,
    /// Height in cm.
    #[serde(default)]
    pub height: Option<Decimal>,
    /// Number of identical boxes, 1 if omitted.
    #[serde(default)]
    pub quantity: Option<u32>,
    /// Differing box specifications.
    #[serde(default)]
    pub boxes: Option<Vec<BoxRequest>>,
    /// Restricts quoting to these carriers.
    #[serde(default)]
    pub carriers: Option<Vec<Carrier>>,
}

/// One box specification in a mixed shipment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxRequest {
    /// Actual weight of one box in kg.
    #[serde(default)]
    pub weight: Option<Decimal>,
    /// Length in cm.
    #[serde(default)]
    pub length: Option<Decimal>,
    /// Width in cm.
    #[serde(default)]
    pub width: Option<Decimal>,
    /// Height in cm.
    #[serde(default)]
    pub height: Option<Decimal>,
    /// Number of boxes with this specification, 1 if omitted.
    #[serde(default)]
    pub quantity: Option<u32>,
}

/// Largest accepted actual weight of one box, in kg.
pub const MAX_BOX_WEIGHT_KG: Decimal = dec!(10000);

/// Largest accepted box side, in cm.
pub const MAX_DIMENSION_CM: Decimal = dec!(10000);

/// Largest accepted quantity of one box specification.
pub const MAX_QUANTITY: u32 = 10_000;

fn box_spec(
    field_prefix: &str,
    weight: Option<Decimal>,
    dimensions: Dimensions,
    quantity: Option<u32>,
) -> Result<BoxSpec, EngineError> {
    let quantity = quantity.unwrap_or(1);
    if quantity == 0 {
        return Err(EngineError::InvalidShipment {
            field: format!("{}quantity", field_prefix),
            message: "must be at least 1".to_string(),
        });
    }
    if quantity > MAX_QUANTITY {
        return Err(EngineError::InvalidShipment {
            field: format!("{}quantity", field_prefix),
            message: format!("must not exceed {}", MAX_QUANTITY),
        });
    }

    let measurements = [
        ("weight", weight, MAX_BOX_WEIGHT_KG),
        ("length", dimensions.length, MAX_DIMENSION_CM),
        ("width", dimensions.width, MAX_DIMENSION_CM),
        ("height", dimensions.height, MAX_DIMENSION_CM),
    ];
    for (name, value, max) in measurements {
        let Some(value) = value else { continue };
        let message = if value < Decimal::ZERO {
            "must not be negative".to_string()
        } else if value > max {
            format!("must not exceed {}", max)
        } else {
            continue;
        };
        return Err(EngineError::InvalidShipment {
            field: format!("{}{}", field_prefix, name),
            message,
        });
    }

    Ok(BoxSpec {
        weight,
        dimensions,
        quantity,
    })
}

impl TryFrom<QuoteRequest> for ShipmentRequest {
    type Error = EngineError;

    fn try_from(req: QuoteRequest) -> Result<Self, Self::Error> {
        let boxes = match req.boxes {
            Some(boxes) if !boxes.is_empty() => {
                let specs = boxes
                    .into_iter()
                    .enumerate()
                    .map(|(idx, b)| {
                        let dimensions = Dimensions {
                            length: b.length,
                            width: b.width,
                            height: b.height,
                        };
                        box_spec(&format!("boxes[{}].", idx), b.weight, dimensions, b.quantity)
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                ShipmentBoxes::Mixed(specs)
            }
            _ => {
                let dimensions = Dimensions {
                    length: req.length,
                    width: req.width,
                    height: req.height,
                };
                ShipmentBoxes::Uniform(box_spec("", req.weight, dimensions, req.quantity)?)
            }
        };

        Ok(ShipmentRequest {
            content: req.content,
            country: req.country,
            boxes,
            carriers: req.carriers,
        })
    }
}
