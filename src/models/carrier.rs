//! Carrier identifiers and their data models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The carriers the engine can quote, in declaration order.
///
/// Declaration order matters: unavailable quotes are reported in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Carrier {
    /// UPS, region-numbered with a flat per-kg row for heavy shipments.
    Ups,
    /// DHL, region-numbered with an in-code heavyweight tier table.
    Dhl,
    /// Aramex, country-keyed with its own alias map.
    Aramex,
}

/// How a carrier organises its reference data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarrierModel {
    /// Countries grouped into numbered regions with a breakpoint price grid.
    RegionBreaks,
    /// Prices keyed directly by destination country.
    CountryTiers,
}

impl Carrier {
    /// All carriers in declaration order.
    pub const ALL: [Carrier; 3] = [Carrier::Ups, Carrier::Dhl, Carrier::Aramex];

    /// Returns the lowercase identifier used in settings and requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            Carrier::Ups => "ups",
            Carrier::Dhl => "dhl",
            Carrier::Aramex => "aramex",
        }
    }

    /// Returns the data model the carrier's tables follow.
    ///
    /// # Examples
    ///
    /// ```
    /// use carrier_quote_engine::models::{Carrier, CarrierModel};
    ///
    /// assert_eq!(Carrier::Dhl.model(), CarrierModel::RegionBreaks);
    /// assert_eq!(Carrier::Aramex.model(), CarrierModel::CountryTiers);
    /// ```
    pub fn model(&self) -> CarrierModel {
        match self {
            Carrier::Ups | Carrier::Dhl => CarrierModel::RegionBreaks,
            Carrier::Aramex => CarrierModel::CountryTiers,
        }
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Carrier::Ups => "UPS",
            Carrier::Dhl => "DHL",
            Carrier::Aramex => "Aramex",
        };
        f.write_str(name)
    }
}

impl FromStr for Carrier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ups" => Ok(Carrier::Ups),
            "dhl" => Ok(Carrier::Dhl),
            "aramex" => Ok(Carrier::Aramex),
            other => Err(format!("unknown carrier: {}", other)),
        }
    }
}
