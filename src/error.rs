//! Error types for the Carrier Quote Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading reference data
//! and pricing shipments.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::Carrier;

/// The main error type for the Carrier Quote Engine.
///
/// Table loading errors (`TableNotFound`, `TableParseError`,
/// `CarrierNotConfigured`) are fatal for the whole engine. The remaining
/// variants describe per-carrier or per-request conditions and are turned
/// into structured quote results by the engine.
///
/// # Example
///
/// ```
/// use carrier_quote_engine::error::EngineError;
///
/// let error = EngineError::TableNotFound {
///     path: "/missing/regions.txt".to_string(),
/// };
/// assert_eq!(error.to_string(), "Reference table not found: /missing/regions.txt");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A reference table or settings file was not found at the specified path.
    #[error("Reference table not found: {path}")]
    TableNotFound {
        /// The path that was not found.
        path: String,
    },

    /// A reference table or settings file could not be parsed.
    #[error("Failed to parse reference table '{path}' (line {line}): {message}")]
    TableParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// The 1-based line number, or 0 when the error is not tied to a line.
        line: usize,
        /// A description of the parse error.
        message: String,
    },

    /// A carrier has no usable section in the engine settings.
    #[error("Carrier '{carrier}' is not configured: {message}")]
    CarrierNotConfigured {
        /// The carrier missing from the settings.
        carrier: Carrier,
        /// What is missing.
        message: String,
    },

    /// The destination could not be mapped to one of the carrier's regions or countries.
    #[error("{carrier} does not serve destination '{destination}'")]
    DestinationNotResolved {
        /// The carrier that was asked.
        carrier: Carrier,
        /// The destination as given by the caller.
        destination: String,
    },

    /// No price exists for the resolved destination and weight.
    #[error("No {carrier} price for '{key}' at {weight} kg")]
    PriceNotFound {
        /// The carrier whose table was searched.
        carrier: Carrier,
        /// The resolved region or country key.
        key: String,
        /// The chargeable weight that was priced.
        weight: Decimal,
    },

    /// A carrier-specific limit was exceeded.
    #[error("{carrier} accepts at most {limit} kg volumetric weight per box, got {actual} kg")]
    CarrierLimitExceeded {
        /// The carrier enforcing the limit.
        carrier: Carrier,
        /// The offending per-box volumetric weight.
        actual: Decimal,
        /// The carrier's ceiling.
        limit: Decimal,
    },

    /// The shipment request itself is malformed.
    #[error("Invalid shipment field '{field}': {message}")]
    InvalidShipment {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

impl EngineError {
    /// Returns true for errors raised while loading reference data.
    ///
    /// These indicate a deployment defect rather than a per-request condition.
    pub fn is_table_load_failure(&self) -> bool {
        matches!(
            self,
            EngineError::TableNotFound { .. }
                | EngineError::TableParseError { .. }
                | EngineError::CarrierNotConfigured { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_table_not_found_displays_path() {
        let error = EngineError::TableNotFound {
            path: "/missing/prices.txt".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Reference table not found: /missing/prices.txt"
        );
    }

    #[test]
    fn test_table_parse_error_displays_path_line_and_message() {
        let error = EngineError::TableParseError {
            path: "ups/regions.txt".to_string(),
            line: 4,
            message: "country list before any region header".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse reference table 'ups/regions.txt' (line 4): country list before any region header"
        );
    }

    #[test]
    fn test_destination_not_resolved_names_carrier() {
        let error = EngineError::DestinationNotResolved {
            carrier: Carrier::Aramex,
            destination: "Germany".to_string(),
        };
        assert_eq!(error.to_string(), "Aramex does not serve destination 'Germany'");
    }

    #[test]
    fn test_carrier_limit_exceeded_displays_weights() {
        let error = EngineError::CarrierLimitExceeded {
            carrier: Carrier::Ups,
            actual: dec!(112),
            limit: dec!(70),
        };
        assert_eq!(
            error.to_string(),
            "UPS accepts at most 70 kg volumetric weight per box, got 112 kg"
        );
    }

    #[test]
    fn test_only_load_errors_are_fatal() {
        assert!(
            EngineError::TableNotFound {
                path: "x".to_string()
            }
            .is_table_load_failure()
        );
        assert!(
            !EngineError::PriceNotFound {
                carrier: Carrier::Dhl,
                key: "region 3".to_string(),
                weight: dec!(12),
            }
            .is_table_load_failure()
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(EngineError::TableNotFound {
                path: "/test".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
