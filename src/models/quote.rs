//! Quote models for the Carrier Quote Engine.
//!
//! This module contains the per-carrier [`Quote`] and the request-level
//! [`QuoteOutcome`]. Both are tagged variants so that an available quote
//! always carries a price and an unavailable one always carries a reason.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Carrier, WeightSummary};

/// The carrier-specific key a destination resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestinationKey {
    /// A numbered region of a region-based carrier.
    Region(u32),
    /// A country key of a country-keyed carrier.
    Country(String),
}

impl fmt::Display for DestinationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DestinationKey::Region(region) => write!(f, "region {}", region),
            DestinationKey::Country(key) => f.write_str(key),
        }
    }
}

/// Why a carrier could not quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    /// The destination did not resolve in the carrier's tables.
    DestinationNotServed,
    /// A carrier-specific limit was exceeded.
    CarrierLimitExceeded,
    /// The carrier has no price for the resolved destination and weight.
    PriceNotFound,
    /// The carrier has no settings or tables loaded.
    CarrierNotConfigured,
}

/// Availability and price of a carrier quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum QuoteStatus {
    /// The carrier priced the shipment.
    Available {
        /// Total price for the shipment, greater than zero.
        total_price: Decimal,
        /// `total_price` divided by the number of boxes.
        price_per_box: Decimal,
    },
    /// The carrier cannot carry or price the shipment.
    Unavailable {
        /// Category of the failure.
        reason: UnavailableReason,
        /// Diagnostic message for the caller.
        message: String,
    },
}

/// One carrier's answer for a shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// The carrier that produced this quote.
    pub carrier: Carrier,
    /// The carrier's service product name.
    pub service_type: String,
    /// The resolved destination, if resolution got that far.
    pub destination: Option<DestinationKey>,
    /// The rounded shipment-level chargeable weight that was priced.
    pub chargeable_weight: Decimal,
    /// Availability and price.
    pub status: QuoteStatus,
}

impl Quote {
    /// Returns true if the carrier priced the shipment.
    pub fn is_available(&self) -> bool {
        matches!(self.status, QuoteStatus::Available { .. })
    }

    /// Returns the total price of an available quote.
    pub fn total_price(&self) -> Option<Decimal> {
        match self.status {
            QuoteStatus::Available { total_price, .. } => Some(total_price),
            QuoteStatus::Unavailable { .. } => None,
        }
    }
}

/// Why a whole request was refused before any carrier was asked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RejectionReason {
    /// The declared contents matched a prohibited keyword.
    ProhibitedContent {
        /// The keyword that matched.
        keyword: String,
    },
    /// The rounded chargeable weight exceeds the shipment-wide ceiling.
    ShipmentLimitExceeded {
        /// The rounded chargeable weight of the shipment.
        chargeable_weight: Decimal,
        /// The ceiling.
        limit: Decimal,
    },
}

impl RejectionReason {
    /// Stable code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            RejectionReason::ProhibitedContent { .. } => "PROHIBITED_CONTENT",
            RejectionReason::ShipmentLimitExceeded { .. } => "SHIPMENT_LIMIT_EXCEEDED",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::ProhibitedContent { keyword } => write!(
                f,
                "The declared contents match a prohibited item ('{}') and cannot be shipped",
                keyword
            ),
            RejectionReason::ShipmentLimitExceeded {
                chargeable_weight,
                limit,
            } => write!(
                f,
                "Chargeable weight of {} kg exceeds the {} kg shipment limit",
                chargeable_weight, limit
            ),
        }
    }
}

/// The priced result of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteSet {
    /// Unique identifier for this quote set.
    pub quote_id: Uuid,
    /// When the quotes were produced.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that produced the quotes.
    pub engine_version: String,
    /// The destination as given by the caller.
    pub destination: String,
    /// Quotes: available ones by ascending price, then unavailable ones.
    pub quotes: Vec<Quote>,
    /// How the chargeable weight was derived.
    pub weight_summary: WeightSummary,
}

impl QuoteSet {
    /// Returns the cheapest available quote, if any.
    pub fn best_quote(&self) -> Option<&Quote> {
        self.quotes.first().filter(|q| q.is_available())
    }
}

/// The result of a quote request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum QuoteOutcome {
    /// The request was refused; no pricing was attempted.
    Rejected {
        /// Why the request was refused.
        reason: RejectionReason,
    },
    /// More input is required before pricing.
    NeedsInfo {
        /// What to ask the shipper.
        prompt: String,
        /// Names of the missing fields.
        missing: Vec<String>,
    },
    /// Carriers were asked; see the individual quotes.
    Quoted(QuoteSet),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn quote(status: QuoteStatus) -> Quote {
        Quote {
            carrier: Carrier::Ups,
            service_type: "Express Saver".to_string(),
            destination: Some(DestinationKey::Region(1)),
            chargeable_weight: dec!(32),
            status,
        }
    }

    #[test]
    fn test_available_quote_exposes_price() {
        let q = quote(QuoteStatus::Available {
            total_price: dec!(180.50),
            price_per_box: dec!(90.25),
        });
        assert!(q.is_available());
        assert_eq!(q.total_price(), Some(dec!(180.50)));
    }

    #[test]
    fn test_unavailable_quote_has_no_price() {
        let q = quote(QuoteStatus::Unavailable {
            reason: UnavailableReason::PriceNotFound,
            message: "no price".to_string(),
        });
        assert!(!q.is_available());
        assert_eq!(q.total_price(), None);
    }

    #[test]
    fn test_destination_key_display() {
        assert_eq!(DestinationKey::Region(3).to_string(), "region 3");
        assert_eq!(
            DestinationKey::Country("Qatar".to_string()).to_string(),
            "Qatar"
        );
    }

    #[test]
    fn test_rejection_reason_message_and_code() {
        let reason = RejectionReason::ShipmentLimitExceeded {
            chargeable_weight: dec!(301),
            limit: dec!(300),
        };
        assert_eq!(reason.code(), "SHIPMENT_LIMIT_EXCEEDED");
        assert_eq!(
            reason.to_string(),
            "Chargeable weight of 301 kg exceeds the 300 kg shipment limit"
        );
    }
}
