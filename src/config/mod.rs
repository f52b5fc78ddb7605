//! Reference data loading for the Carrier Quote Engine.
//!
//! This module loads the engine settings and every carrier's reference
//! tables from a data directory: `engine.yaml`, plain-text region lists and
//! price grids for region-based carriers, and YAML country tables for
//! country-keyed carriers.
//!
//! # Example
//!
//! ```no_run
//! use carrier_quote_engine::config::LazyTableStore;
//!
//! let store = LazyTableStore::new("./config");
//! let tables = store.get().unwrap();
//! println!("Shipment limit: {} kg", tables.settings().limits.max_chargeable_weight_kg);
//! ```

mod heavyweight;
mod loader;
mod parser;
mod types;

pub use heavyweight::{
    DHL_HEAVYWEIGHT_THRESHOLD, DHL_HEAVYWEIGHT_TIERS, TierBand, heavyweight_tiers,
};
pub use loader::{CarrierTables, LazyTableStore, RegionalTables, TableStore};
pub use parser::{parse_price_table, parse_region_table};
pub use types::{
    CarrierSettings, CountryEntry, CountryPriceTable, CountryRates, CountryTableFile,
    EngineSettings, FlatRateRow, PriceBreakTable, PricePoint, PriceRow, RateBand, RegionTable,
    ShipmentLimits, WeightBand,
};
