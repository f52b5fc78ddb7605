//! Reference table loading.
//!
//! This module provides the [`TableStore`], which reads `engine.yaml` and
//! every carrier table it points to, and the [`LazyTableStore`], which
//! defers that work until the first request needs it.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{Carrier, CarrierModel};

use super::parser::{parse_price_table, parse_region_table};
use super::types::{
    CarrierSettings, CountryPriceTable, CountryTableFile, EngineSettings, PriceBreakTable,
    RegionTable,
};

/// Region list and price grid of a region-based carrier.
#[derive(Debug, Clone)]
pub struct RegionalTables {
    /// Country to region number.
    pub regions: RegionTable,
    /// Weight-break prices by region.
    pub prices: PriceBreakTable,
}

/// The reference data of one carrier, shaped by its data model.
#[derive(Debug, Clone)]
pub enum CarrierTables {
    /// Region-numbered carrier (UPS, DHL).
    Regional(RegionalTables),
    /// Country-keyed carrier (Aramex).
    CountryKeyed(CountryPriceTable),
}

/// All reference data the engine needs, loaded once and read-only afterwards.
///
/// # Directory Structure
///
/// ```text
/// config/
/// ├── engine.yaml          # Limits, service types and table paths
/// ├── ups/
/// │   ├── regions.txt
/// │   └── prices.txt
/// ├── dhl/
/// │   ├── regions.txt
/// │   └── prices.txt
/// └── aramex/
///     └── countries.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use carrier_quote_engine::config::TableStore;
/// use carrier_quote_engine::models::Carrier;
///
/// let store = TableStore::load("./config")?;
/// println!("UPS service: {}", store.carrier_settings(Carrier::Ups)?.service_type);
/// # Ok::<(), carrier_quote_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TableStore {
    settings: EngineSettings,
    carriers: BTreeMap<Carrier, CarrierTables>,
}

impl TableStore {
    /// Loads the settings and every carrier's tables from a data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `engine.yaml` or any table it references is missing
    /// - any file fails to parse
    /// - a carrier has no settings section or lacks a table its model needs
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let dir = path.as_ref();
        let settings = load_yaml::<EngineSettings>(&dir.join("engine.yaml"))?;

        let mut carriers = BTreeMap::new();
        for carrier in Carrier::ALL {
            let carrier_settings =
                settings
                    .carriers
                    .get(&carrier)
                    .ok_or_else(|| EngineError::CarrierNotConfigured {
                        carrier,
                        message: "missing from engine.yaml".to_string(),
                    })?;
            let tables = load_carrier(dir, carrier, carrier_settings)?;
            carriers.insert(carrier, tables);
        }

        let store = Self::from_parts(settings, carriers);
        info!(
            data_dir = %dir.display(),
            carriers = store.carriers.len(),
            max_chargeable_weight_kg = %store.settings.limits.max_chargeable_weight_kg,
            "Reference tables loaded"
        );
        Ok(store)
    }

    /// Builds a store from already-parsed parts.
    pub fn from_parts(settings: EngineSettings, carriers: BTreeMap<Carrier, CarrierTables>) -> Self {
        Self { settings, carriers }
    }

    /// The engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Settings of one carrier.
    pub fn carrier_settings(&self, carrier: Carrier) -> EngineResult<&CarrierSettings> {
        self.settings
            .carriers
            .get(&carrier)
            .ok_or_else(|| EngineError::CarrierNotConfigured {
                carrier,
                message: "no settings loaded".to_string(),
            })
    }

    /// Tables of one carrier.
    pub fn tables(&self, carrier: Carrier) -> EngineResult<&CarrierTables> {
        self.carriers
            .get(&carrier)
            .ok_or_else(|| EngineError::CarrierNotConfigured {
                carrier,
                message: "no tables loaded".to_string(),
            })
    }

    /// Carriers with loaded tables, in declaration order.
    pub fn carriers(&self) -> impl Iterator<Item = Carrier> + '_ {
        self.carriers.keys().copied()
    }
}

/// A [`TableStore`] loaded on first use and cached for the process lifetime.
///
/// A failed load is not cached; the next call tries again.
#[derive(Debug)]
pub struct LazyTableStore {
    path: PathBuf,
    cell: OnceLock<Arc<TableStore>>,
}

impl LazyTableStore {
    /// Creates a store that will load from `path` on first use.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            cell: OnceLock::new(),
        }
    }

    /// Wraps an already-loaded store.
    pub fn from_store(store: TableStore) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(Arc::new(store));
        Self {
            path: PathBuf::new(),
            cell,
        }
    }

    /// Returns the shared store, loading it if this is the first call.
    pub fn get(&self) -> EngineResult<Arc<TableStore>> {
        if let Some(store) = self.cell.get() {
            return Ok(Arc::clone(store));
        }
        let loaded = Arc::new(TableStore::load(&self.path)?);
        // A concurrent loader may have won; keep whichever got there first.
        Ok(Arc::clone(self.cell.get_or_init(|| loaded)))
    }

    /// Returns true once the tables have been loaded.
    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    /// The data directory this store loads from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn load_carrier(dir: &Path, carrier: Carrier, settings: &CarrierSettings) -> EngineResult<CarrierTables> {
    let required = |table: &Option<PathBuf>, name: &str| {
        table
            .as_ref()
            .map(|p| dir.join(p))
            .ok_or_else(|| EngineError::CarrierNotConfigured {
                carrier,
                message: format!("{} is required", name),
            })
    };

    match carrier.model() {
        CarrierModel::RegionBreaks => {
            let region_path = required(&settings.region_table, "region_table")?;
            let price_path = required(&settings.price_table, "price_table")?;

            let regions = parse_region_table(&read_table(&region_path)?, &display(&region_path))?;
            let prices = parse_price_table(&read_table(&price_path)?, &display(&price_path))?;
            info!(
                carrier = %carrier,
                countries = regions.len(),
                breakpoints = prices.rows().len(),
                flat_rate = prices.flat_rate_row().is_some(),
                "Carrier tables loaded"
            );
            Ok(CarrierTables::Regional(RegionalTables { regions, prices }))
        }
        CarrierModel::CountryTiers => {
            let country_path = required(&settings.country_table, "country_table")?;
            let file = load_yaml::<CountryTableFile>(&country_path)?;
            let table = CountryPriceTable::from_file(file).map_err(|dangling| {
                EngineError::TableParseError {
                    path: display(&country_path),
                    line: 0,
                    message: format!("aliases point to unknown countries: {}", dangling.join(", ")),
                }
            })?;
            info!(
                carrier = %carrier,
                countries = table.len(),
                aliases = table.aliases().len(),
                "Carrier tables loaded"
            );
            Ok(CarrierTables::CountryKeyed(table))
        }
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

fn read_table(path: &Path) -> EngineResult<String> {
    fs::read_to_string(path).map_err(|_| EngineError::TableNotFound {
        path: display(path),
    })
}

/// Loads and parses a YAML file.
fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
    let content = read_table(path)?;

    serde_yaml::from_str(&content).map_err(|e| EngineError::TableParseError {
        path: display(path),
        line: e.location().map(|loc| loc.line()).unwrap_or(0),
        message: e.to_string(),
    })
}
