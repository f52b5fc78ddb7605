//! Response types for the Carrier Quote Engine API.
//!
//! This module defines the `/quote` response body, which flattens a
//! [`QuoteOutcome`] into one camelCase JSON object, and the error response
//! structures used for malformed requests and configuration failures.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{
    BoxCalculationResult, Carrier, DestinationKey, DimensionalAnalysis, Quote, QuoteOutcome,
    QuoteStatus, UnavailableReason, UniformShipmentSummary, WeightSummary,
};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::TableNotFound { .. }
            | EngineError::TableParseError { .. }
            | EngineError::CarrierNotConfigured { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Reference tables could not be loaded",
                    message,
                ),
            },
            EngineError::InvalidShipment { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_SHIPMENT",
                    message,
                    "The shipment data contains invalid information",
                ),
            },
            EngineError::DestinationNotResolved { .. } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::new("DESTINATION_NOT_RESOLVED", message),
            },
            EngineError::PriceNotFound { .. } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::new("PRICE_NOT_FOUND", message),
            },
            EngineError::CarrierLimitExceeded { .. } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::new("CARRIER_LIMIT_EXCEEDED", message),
            },
        }
    }
}

/// One carrier line of a `/quote` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteView {
    /// The carrier.
    pub carrier: Carrier,
    /// Whether the carrier priced the shipment.
    pub available: bool,
    /// Total price, present when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<Decimal>,
    /// Price per box, present when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_box: Option<Decimal>,
    /// The carrier's service product.
    pub service_type: String,
    /// Resolved region of a region-based carrier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<u32>,
    /// Resolved country of a country-keyed carrier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_key: Option<String>,
    /// The rounded chargeable weight that was priced.
    pub chargeable_weight: Decimal,
    /// Why the carrier is unavailable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<UnavailableReason>,
    /// Diagnostic message when unavailable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<Quote> for QuoteView {
    fn from(quote: Quote) -> Self {
        let (region, country_key) = match quote.destination {
            Some(DestinationKey::Region(region)) => (Some(region), None),
            Some(DestinationKey::Country(key)) => (None, Some(key)),
            None => (None, None),
        };
        let (available, total_price, price_per_box, reason, message) = match quote.status {
            QuoteStatus::Available {
                total_price,
                price_per_box,
            } => (true, Some(total_price), Some(price_per_box), None, None),
            QuoteStatus::Unavailable { reason, message } => {
                (false, None, None, Some(reason), Some(message))
            }
        };

        Self {
            carrier: quote.carrier,
            available,
            total_price,
            price_per_box,
            service_type: quote.service_type,
            region,
            country_key,
            chargeable_weight: quote.chargeable_weight,
            reason,
            message,
        }
    }
}

/// Response body for the `/quote` endpoint.
///
/// `allowed` is false only when the request was refused (prohibited
/// contents or shipment limit). `needsInfo` is set when more input is
/// required; otherwise the quote fields are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponseBody {
    /// Whether the shipment may be quoted at all.
    pub allowed: bool,
    /// Rejection code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Rejection message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Set when more input is required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub needs_info: Option<bool>,
    /// What to ask the shipper.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// Names of the missing fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<Vec<String>>,
    /// Identifier of the quote set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_id: Option<Uuid>,
    /// When the quotes were produced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Engine version that produced the quotes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_version: Option<String>,
    /// Rounded shipment chargeable weight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chargeable_weight: Option<Decimal>,
    /// Carrier quotes, available ones first by ascending price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quotes: Option<Vec<QuoteView>>,
    /// Breakdown of a single-kind shipment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_summary: Option<UniformShipmentSummary>,
    /// Per-box lines of a mixed shipment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_calculations: Option<Vec<BoxCalculationResult>>,
    /// Analysis of a mixed shipment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensional_analysis: Option<DimensionalAnalysis>,
}

impl From<QuoteOutcome> for QuoteResponseBody {
    fn from(outcome: QuoteOutcome) -> Self {
        match outcome {
            QuoteOutcome::Rejected { reason } => Self {
                allowed: false,
                reason: Some(reason.code().to_string()),
                message: Some(reason.to_string()),
                ..Default::default()
            },
            QuoteOutcome::NeedsInfo { prompt, missing } => Self {
                allowed: true,
                needs_info: Some(true),
                prompt: Some(prompt),
                missing: Some(missing),
                ..Default::default()
            },
            QuoteOutcome::Quoted(set) => {
                let chargeable_weight = set.weight_summary.rounded_chargeable_weight();
                let (weight_summary, box_calculations, dimensional_analysis) =
                    match set.weight_summary {
                        WeightSummary::Uniform(summary) => (Some(summary), None, None),
                        WeightSummary::Mixed(summary) => (
                            None,
                            Some(summary.box_calculations),
                            Some(summary.dimensional_analysis),
                        ),
                    };
                Self {
                    allowed: true,
                    quote_id: Some(set.quote_id),
                    timestamp: Some(set.timestamp),
                    engine_version: Some(set.engine_version),
                    chargeable_weight: Some(chargeable_weight),
                    quotes: Some(set.quotes.into_iter().map(QuoteView::from).collect()),
                    weight_summary,
                    box_calculations,
                    dimensional_analysis,
                    ..Default::default()
                }
            }
        }
    }
}

/// Response body for the `/health` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// "ok" when the reference tables are loaded.
    pub status: String,
    /// Engine version.
    pub version: String,
    /// Carriers with loaded tables.
    pub carriers: Vec<Carrier>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RejectionReason;
    use rust_decimal_macros::dec;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_table_errors_map_to_server_error() {
        let api_error: ApiErrorResponse = EngineError::TableNotFound {
            path: "config/engine.yaml".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
        assert!(api_error.error.details.unwrap().contains("engine.yaml"));
    }

    #[test]
    fn test_invalid_shipment_maps_to_bad_request() {
        let api_error: ApiErrorResponse = EngineError::InvalidShipment {
            field: "quantity".to_string(),
            message: "must be at least 1".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_SHIPMENT");
    }

    #[test]
    fn test_rejection_body() {
        let body = QuoteResponseBody::from(QuoteOutcome::Rejected {
            reason: RejectionReason::ShipmentLimitExceeded {
                chargeable_weight: dec!(301),
                limit: dec!(300),
            },
        });
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["allowed"], false);
        assert_eq!(json["reason"], "SHIPMENT_LIMIT_EXCEEDED");
        assert!(json.get("quotes").is_none());
    }

    #[test]
    fn test_unavailable_quote_view() {
        let view = QuoteView::from(Quote {
            carrier: Carrier::Aramex,
            service_type: "Priority Express".to_string(),
            destination: None,
            chargeable_weight: dec!(32),
            status: QuoteStatus::Unavailable {
                reason: UnavailableReason::DestinationNotServed,
                message: "Aramex does not serve destination 'Almanya'".to_string(),
            },
        });
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["available"], false);
        assert_eq!(json["reason"], "destination_not_served");
        assert_eq!(json["chargeableWeight"], "32");
        assert!(json.get("totalPrice").is_none());
        assert!(json.get("region").is_none());
    }
}
