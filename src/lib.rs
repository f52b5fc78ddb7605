//! Multi-carrier shipment quote engine.
//!
//! This crate quotes international parcel shipments across UPS, DHL and
//! Aramex. It resolves free-text destinations to each carrier's pricing
//! region, derives the chargeable weight from actual and volumetric weight,
//! prices the shipment from the carriers' reference tables and returns the
//! quotes ranked by price.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod resolution;
