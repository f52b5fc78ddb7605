//! Price lookup over sparse weight-break tables.
//!
//! Published price grids only list some weights. A weight between two
//! breakpoints is priced by linear interpolation; a weight outside the grid
//! is clamped to the nearest end unless a flat per-kg rate or a weight band
//! takes over.
//!
//! A per-kg rate never bills less than the price at the point where it
//! starts, so a heavier shipment never costs less than a lighter one.

use rust_decimal::Decimal;

use crate::config::{CountryRates, PriceBreakTable, TierBand, WeightBand};

/// Interpolates a price from `(weight, price)` points sorted by weight.
///
/// - exact breakpoint: the stored price
/// - between two breakpoints: linear interpolation
/// - below the first or above the last: clamped to that end's price
///
/// Returns `None` if there are no points.
///
/// # Examples
///
/// ```
/// use carrier_quote_engine::calculation::interpolate;
/// use rust_decimal_macros::dec;
///
/// let points = [(dec!(10), dec!(100)), (dec!(20), dec!(160))];
/// assert_eq!(interpolate(&points, dec!(15)), Some(dec!(130)));
/// assert_eq!(interpolate(&points, dec!(5)), Some(dec!(100)));
/// assert_eq!(interpolate(&points, dec!(25)), Some(dec!(160)));
/// ```
pub fn interpolate(points: &[(Decimal, Decimal)], weight: Decimal) -> Option<Decimal> {
    let (first, last) = (points.first()?, points.last()?);
    if weight <= first.0 {
        return Some(first.1);
    }
    if weight >= last.0 {
        return Some(last.1);
    }

    let upper_idx = points.partition_point(|(w, _)| *w < weight);
    let (w1, p1) = points[upper_idx];
    if w1 == weight {
        return Some(p1);
    }
    let (w0, p0) = points[upper_idx - 1];
    Some(p0 + (p1 - p0) * (weight - w0) / (w1 - w0))
}

fn at_least(price: Decimal, floor: Option<Decimal>) -> Decimal {
    floor.map_or(price, |floor| price.max(floor))
}

/// Prices a weight for one region of a price-break table.
///
/// Above the region's highest breakpoint the flat per-kg row is used when
/// the region has a value in it, billing at least the highest breakpoint's
/// price; otherwise the weight is interpolated. Returns `None` if the region
/// has no prices at all.
pub fn price_from_breaks(table: &PriceBreakTable, region: u32, weight: Decimal) -> Option<Decimal> {
    let points = table.points(region);
    let (max_breakpoint, max_price) = *points.last()?;

    if weight > max_breakpoint {
        if let Some(per_kg) = table.flat_rate(region) {
            return Some(at_least(weight * per_kg, Some(max_price)));
        }
    }
    interpolate(&points, weight)
}

impl PriceBreakTable {
    /// Prices a weight for a region; see [`price_from_breaks`].
    pub fn price_for(&self, region: u32, weight: Decimal) -> Option<Decimal> {
        price_from_breaks(self, region, weight)
    }
}

/// Selects the band covering `weight` (`min < w <= max`).
///
/// Weights above the highest band fall into it. Weights at or below the
/// lowest band's minimum match nothing.
pub fn select_band<B: WeightBand>(bands: &[B], weight: Decimal) -> Option<&B> {
    if let Some(band) = bands
        .iter()
        .find(|b| weight > b.min_weight() && weight <= b.max_weight())
    {
        return Some(band);
    }
    bands
        .iter()
        .max_by(|a, b| a.max_weight().cmp(&b.max_weight()))
        .filter(|top| weight > top.max_weight())
}

/// Prices a weight with heavyweight tiers above `threshold`, falling back to
/// the price-break table at or below it, or when the tiers do not price the
/// region.
///
/// A tier bills at least the price at its lower bound.
pub fn price_with_tiers(
    table: &PriceBreakTable,
    tiers: &[TierBand],
    threshold: Decimal,
    region: u32,
    weight: Decimal,
) -> Option<Decimal> {
    if weight > threshold {
        if let Some(band) = select_band(tiers, weight) {
            if let Some(per_kg) = band.rate_for(region) {
                // band.min_weight < weight, so this terminates
                let floor = price_with_tiers(table, tiers, threshold, region, band.min_weight);
                return Some(at_least(weight * per_kg, floor));
            }
        }
    }
    price_from_breaks(table, region, weight)
}

/// Prices a weight from a country's rates.
///
/// Up to the last low-tier breakpoint the breakpoints are interpolated;
/// above it, the matching per-kg band applies, billing at least the price at
/// the band's lower bound. Without a matching band the low tier is clamped
/// to its last price.
pub fn price_from_country(rates: &CountryRates, weight: Decimal) -> Option<Decimal> {
    let above_breakpoints = rates.max_breakpoint().is_none_or(|max| weight > max);
    if above_breakpoints {
        if let Some(band) = select_band(&rates.bands, weight) {
            let floor = price_from_country(rates, band.min_weight);
            return Some(at_least(weight * band.per_kg, floor));
        }
    }
    interpolate(&rates.points(), weight)
}
