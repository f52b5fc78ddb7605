//! DHL heavyweight tiers.
//!
//! Above 30 kg DHL prices per kg by weight band and region instead of using
//! its published price grid. The tiers are not part of the grid file.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::Carrier;

use super::types::WeightBand;

/// Weight above which the heavyweight tiers replace the DHL price grid.
pub const DHL_HEAVYWEIGHT_THRESHOLD: Decimal = dec!(30);

/// A heavyweight band with a per-kg rate for each region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierBand {
    /// Exclusive lower bound in kg.
    pub min_weight: Decimal,
    /// Inclusive upper bound in kg.
    pub max_weight: Decimal,
    /// `(region, per-kg rate)` pairs.
    pub rates: &'static [(u32, Decimal)],
}

impl TierBand {
    /// The per-kg rate for a region, if the band prices it.
    pub fn rate_for(&self, region: u32) -> Option<Decimal> {
        self.rates
            .iter()
            .find(|(r, _)| *r == region)
            .map(|(_, rate)| *rate)
    }
}

impl WeightBand for TierBand {
    fn min_weight(&self) -> Decimal {
        self.min_weight
    }

    fn max_weight(&self) -> Decimal {
        self.max_weight
    }
}

/// DHL Express Worldwide heavyweight tiers, contiguous from 30 kg.
pub const DHL_HEAVYWEIGHT_TIERS: &[TierBand] = &[
    TierBand {
        min_weight: dec!(30),
        max_weight: dec!(50),
        rates: &[
            (1, dec!(5.98)),
            (2, dec!(6.62)),
            (3, dec!(9.11)),
            (4, dec!(7.45)),
            (5, dec!(10.40)),
        ],
    },
    TierBand {
        min_weight: dec!(50),
        max_weight: dec!(70),
        rates: &[
            (1, dec!(5.72)),
            (2, dec!(6.34)),
            (3, dec!(8.71)),
            (4, dec!(7.13)),
            (5, dec!(9.94)),
        ],
    },
    TierBand {
        min_weight: dec!(70),
        max_weight: dec!(100),
        rates: &[
            (1, dec!(5.46)),
            (2, dec!(6.05)),
            (3, dec!(8.32)),
            (4, dec!(6.80)),
            (5, dec!(9.49)),
        ],
    },
    TierBand {
        min_weight: dec!(100),
        max_weight: dec!(300),
        rates: &[
            (1, dec!(5.20)),
            (2, dec!(5.76)),
            (3, dec!(7.92)),
            (4, dec!(6.48)),
            (5, dec!(9.04)),
        ],
    },
];

/// The heavyweight tiers and threshold a carrier applies, if any.
pub fn heavyweight_tiers(carrier: Carrier) -> Option<(&'static [TierBand], Decimal)> {
    match carrier {
        Carrier::Dhl => Some((DHL_HEAVYWEIGHT_TIERS, DHL_HEAVYWEIGHT_THRESHOLD)),
        Carrier::Ups | Carrier::Aramex => None,
    }
}
