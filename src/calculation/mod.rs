//! Calculation logic for the Carrier Quote Engine.
//!
//! This module contains the pure calculations behind a quote: chargeable
//! weight per box and per shipment, mixed-box aggregation with dimensional
//! analysis, price lookup over weight-break tables and bands, and content
//! compliance screening.

mod chargeable_weight;
mod compliance;
mod interpolation;
mod mixed_boxes;

pub use chargeable_weight::{
    calculate_chargeable_weight, shipment_total, summarize_uniform, volumetric_weight,
};
pub use compliance::{ComplianceGuard, ComplianceVerdict, PROHIBITED_KEYWORDS};
pub use interpolation::{
    interpolate, price_from_breaks, price_from_country, price_with_tiers, select_band,
};
pub use mixed_boxes::{
    ADVANTAGE_THRESHOLD_KG, aggregate_boxes, classify_scenario, efficiency_band,
};
