//! Configuration and reference table types.
//!
//! This module contains the engine settings deserialized from
//! `engine.yaml` and the parsed carrier reference tables. All of them are
//! built once at load time and only read afterwards.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::models::Carrier;
use crate::resolution::{CountryLookup, normalize_country};

fn default_volumetric_divisor() -> Decimal {
    dec!(5000)
}

/// Shipment-wide limits applied identically to every carrier.
#[derive(Debug, Clone, Deserialize)]
pub struct ShipmentLimits {
    /// The rounded chargeable weight above which a request is refused.
    pub max_chargeable_weight_kg: Decimal,
    /// Divisor for `L×W×H` (cm) to obtain volumetric kg.
    #[serde(default = "default_volumetric_divisor")]
    pub volumetric_divisor: Decimal,
}

/// Per-carrier settings from `engine.yaml`.
///
/// Paths are relative to the data directory.
#[derive(Debug, Clone, Deserialize)]
pub struct CarrierSettings {
    /// The service product quoted, e.g. "Express Saver".
    pub service_type: String,
    /// Header-delimited country list (region-based carriers).
    #[serde(default)]
    pub region_table: Option<PathBuf>,
    /// Weight-row/region-column price grid (region-based carriers).
    #[serde(default)]
    pub price_table: Option<PathBuf>,
    /// YAML country price table (country-keyed carriers).
    #[serde(default)]
    pub country_table: Option<PathBuf>,
    /// Per-box volumetric weight ceiling, if the carrier has one.
    #[serde(default)]
    pub max_box_volumetric_weight_kg: Option<Decimal>,
}

/// Contents of `engine.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    /// Shipment-wide limits.
    pub limits: ShipmentLimits,
    /// Settings for each carrier.
    pub carriers: BTreeMap<Carrier, CarrierSettings>,
    /// Keywords refused in addition to the built-in list.
    #[serde(default)]
    pub prohibited_keywords: Vec<String>,
}

/// Normalized country name to region number for one carrier.
#[derive(Debug, Clone, Default)]
pub struct RegionTable {
    countries: CountryLookup<u32>,
}

impl RegionTable {
    /// Wraps a populated lookup.
    pub fn new(countries: CountryLookup<u32>) -> Self {
        Self { countries }
    }

    /// The underlying lookup used by the resolver.
    pub fn lookup(&self) -> &CountryLookup<u32> {
        &self.countries
    }

    /// Region of an already-normalized country name.
    pub fn region_of(&self, normalized: &str) -> Option<u32> {
        self.countries.get(normalized).copied()
    }

    /// Number of known countries.
    pub fn len(&self) -> usize {
        self.countries.len()
    }

    /// Returns true if the table has no countries.
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}

/// One weight breakpoint of a price grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRow {
    /// Breakpoint weight in kg.
    pub weight: Decimal,
    /// Price at this weight by region; regions without a price are absent.
    pub prices: BTreeMap<u32, Decimal>,
}

/// The reserved heavy-shipment row: a per-kg rate by region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRateRow {
    /// The weight the row is labelled with (e.g. 70 for `>=70`).
    pub min_weight: Decimal,
    /// Per-kg rate by region.
    pub per_kg: BTreeMap<u32, Decimal>,
}

/// A sparse weight-break price table with an optional flat per-kg row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceBreakTable {
    rows: Vec<PriceRow>,
    flat_rate: Option<FlatRateRow>,
}

impl PriceBreakTable {
    /// Creates a table; rows are sorted by weight.
    pub fn new(mut rows: Vec<PriceRow>, flat_rate: Option<FlatRateRow>) -> Self {
        rows.sort_by(|a, b| a.weight.cmp(&b.weight));
        Self { rows, flat_rate }
    }

    /// All breakpoint rows, ascending by weight.
    pub fn rows(&self) -> &[PriceRow] {
        &self.rows
    }

    /// `(weight, price)` points available for a region, ascending by weight.
    pub fn points(&self, region: u32) -> Vec<(Decimal, Decimal)> {
        self.rows
            .iter()
            .filter_map(|row| row.prices.get(&region).map(|price| (row.weight, *price)))
            .collect()
    }

    /// The flat per-kg rate for a region, if the table has one.
    pub fn flat_rate(&self, region: u32) -> Option<Decimal> {
        self.flat_rate
            .as_ref()
            .and_then(|row| row.per_kg.get(&region).copied())
    }

    /// The flat-rate row, if present.
    pub fn flat_rate_row(&self) -> Option<&FlatRateRow> {
        self.flat_rate.as_ref()
    }
}

/// A weight band priced per kg.
///
/// Bands are half-open on the left: a band covers `min_weight < w <= max_weight`.
pub trait WeightBand {
    /// Exclusive lower bound in kg.
    fn min_weight(&self) -> Decimal;
    /// Inclusive upper bound in kg.
    fn max_weight(&self) -> Decimal;
}

/// A breakpoint of a country's low-weight tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PricePoint {
    /// Weight in kg.
    pub weight: Decimal,
    /// Price at this weight.
    pub price: Decimal,
}

/// A per-kg band of a country's high-weight tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RateBand {
    /// Exclusive lower bound in kg.
    pub min_weight: Decimal,
    /// Inclusive upper bound in kg.
    pub max_weight: Decimal,
    /// Rate per kg inside the band.
    pub per_kg: Decimal,
}

impl WeightBand for RateBand {
    fn min_weight(&self) -> Decimal {
        self.min_weight
    }

    fn max_weight(&self) -> Decimal {
        self.max_weight
    }
}

/// Prices for one destination country of a country-keyed carrier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryRates {
    /// Low-weight tier: weight to price breakpoints.
    pub prices: Vec<PricePoint>,
    /// High-weight tier: per-kg bands above the last breakpoint.
    pub bands: Vec<RateBand>,
}

impl CountryRates {
    /// `(weight, price)` points ascending by weight.
    pub fn points(&self) -> Vec<(Decimal, Decimal)> {
        let mut points: Vec<(Decimal, Decimal)> =
            self.prices.iter().map(|p| (p.weight, p.price)).collect();
        points.sort_by(|a, b| a.0.cmp(&b.0));
        points
    }

    /// Highest breakpoint of the low-weight tier.
    pub fn max_breakpoint(&self) -> Option<Decimal> {
        self.prices.iter().map(|p| p.weight).max()
    }
}

/// One entry of a country table file.
#[derive(Debug, Clone, Deserialize)]
pub struct CountryEntry {
    /// The country key reported in quotes.
    pub key: String,
    /// Extra names the country is known by.
    #[serde(default)]
    pub names: Vec<String>,
    /// Low-weight tier breakpoints.
    pub prices: Vec<PricePoint>,
    /// High-weight tier bands.
    #[serde(default)]
    pub bands: Vec<RateBand>,
}

/// Raw contents of a country table YAML file.
#[derive(Debug, Clone, Deserialize)]
pub struct CountryTableFile {
    /// Countries in file order.
    pub countries: Vec<CountryEntry>,
    /// City or synonym to country key.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

/// A country-keyed carrier's prices, lookup and alias map.
#[derive(Debug, Clone, Default)]
pub struct CountryPriceTable {
    countries: CountryLookup<String>,
    rates: HashMap<String, CountryRates>,
    aliases: HashMap<String, String>,
}

impl CountryPriceTable {
    /// Builds the table from a parsed file, normalizing names and aliases.
    ///
    /// Returns the keys of aliases that point to unknown countries, which
    /// the caller treats as a parse error.
    pub fn from_file(file: CountryTableFile) -> Result<Self, Vec<String>> {
        let mut table = Self::default();

        for entry in file.countries {
            table.countries.insert(&entry.key, entry.key.clone());
            for name in &entry.names {
                table.countries.insert(name, entry.key.clone());
            }
            let rates = CountryRates {
                prices: entry.prices,
                bands: entry.bands,
            };
            table.rates.insert(entry.key, rates);
        }

        let mut dangling = Vec::new();
        for (alias, target) in file.aliases {
            let target = normalize_country(&target);
            if table.countries.get(&target).is_none() {
                dangling.push(alias);
                continue;
            }
            table.aliases.insert(normalize_country(&alias), target);
        }

        if dangling.is_empty() {
            Ok(table)
        } else {
            Err(dangling)
        }
    }

    /// The lookup used by the resolver.
    pub fn lookup(&self) -> &CountryLookup<String> {
        &self.countries
    }

    /// Normalized alias to normalized country name.
    pub fn aliases(&self) -> &HashMap<String, String> {
        &self.aliases
    }

    /// Rates for a country key.
    pub fn rates(&self, key: &str) -> Option<&CountryRates> {
        self.rates.get(key)
    }

    /// Number of countries with rates.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns true if the table has no countries.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(weight: Decimal, prices: &[(u32, Decimal)]) -> PriceRow {
        PriceRow {
            weight,
            prices: prices.iter().copied().collect(),
        }
    }

    #[test]
    fn test_price_table_sorts_rows_and_filters_points_by_region() {
        let table = PriceBreakTable::new(
            vec![
                row(dec!(10), &[(1, dec!(100)), (2, dec!(120))]),
                row(dec!(0.5), &[(1, dec!(20))]),
            ],
            None,
        );
        assert_eq!(table.rows()[0].weight, dec!(0.5));
        assert_eq!(table.points(1), vec![(dec!(0.5), dec!(20)), (dec!(10), dec!(100))]);
        assert_eq!(table.points(2), vec![(dec!(10), dec!(120))]);
        assert!(table.points(3).is_empty());
    }

    #[test]
    fn test_flat_rate_by_region() {
        let table = PriceBreakTable::new(
            vec![row(dec!(1), &[(1, dec!(10))])],
            Some(FlatRateRow {
                min_weight: dec!(70),
                per_kg: [(1, dec!(4.5))].into_iter().collect(),
            }),
        );
        assert_eq!(table.flat_rate(1), Some(dec!(4.5)));
        assert_eq!(table.flat_rate(2), None);
    }

    #[test]
    fn test_country_table_normalizes_names_and_aliases() {
        let file: CountryTableFile = serde_yaml::from_str(
            r#"
countries:
  - key: United Arab Emirates
    names: [UAE]
    prices:
      - { weight: 0.5, price: 20 }
aliases:
  Dubai: united arab emirates
"#,
        )
        .unwrap();

        let table = CountryPriceTable::from_file(file).unwrap();
        assert_eq!(
            table.lookup().get("uae").map(String::as_str),
            Some("United Arab Emirates")
        );
        assert_eq!(
            table.aliases().get("dubai").map(String::as_str),
            Some("united arab emirates")
        );
        assert!(table.rates("United Arab Emirates").is_some());
    }

    #[test]
    fn test_country_table_reports_dangling_aliases() {
        let file: CountryTableFile = serde_yaml::from_str(
            r#"
countries:
  - key: Qatar
    prices:
      - { weight: 1, price: 30 }
aliases:
  Riyadh: Saudi Arabia
"#,
        )
        .unwrap();

        let dangling = CountryPriceTable::from_file(file).unwrap_err();
        assert_eq!(dangling, vec!["Riyadh".to_string()]);
    }

    #[test]
    fn test_engine_settings_deserialize_with_defaults() {
        let settings: EngineSettings = serde_yaml::from_str(
            r#"
limits:
  max_chargeable_weight_kg: 300
carriers:
  ups:
    service_type: Express Saver
    region_table: ups/regions.txt
    price_table: ups/prices.txt
    max_box_volumetric_weight_kg: 70
"#,
        )
        .unwrap();

        assert_eq!(settings.limits.volumetric_divisor, dec!(5000));
        assert!(settings.prohibited_keywords.is_empty());
        let ups = &settings.carriers[&Carrier::Ups];
        assert_eq!(ups.max_box_volumetric_weight_kg, Some(dec!(70)));
        assert!(ups.country_table.is_none());
    }
}
