//! Core data models for the Carrier Quote Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod carrier;
mod quote;
mod shipment;
mod weight;

pub use carrier::{Carrier, CarrierModel};
pub use quote::{
    DestinationKey, Quote, QuoteOutcome, QuoteSet, QuoteStatus, RejectionReason,
    UnavailableReason,
};
pub use shipment::{BoxSpec, Dimensions, ShipmentBoxes, ShipmentRequest};
pub use weight::{
    BoxCalculationResult, CalculationMethod, ChargeableWeightResult, DimensionalAnalysis,
    EfficiencyBand, MixedShipmentSummary, Scenario, UniformShipmentSummary, WeightSummary,
};
