//! Parsers for the plain-text carrier reference tables.
//!
//! Region tables list countries under `Region N` (or `Bölge N`) headers.
//! Price tables are weight-row, region-column grids delimited by `;` or tab,
//! optionally using decimal commas, with an optional trailing flat per-kg
//! row such as `>=70`.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::resolution::{CountryLookup, normalize_country};

use super::types::{FlatRateRow, PriceBreakTable, PriceRow, RegionTable};

/// Normalized words that open a region header.
const REGION_KEYWORDS: &[&str] = &["region", "bolge", "zone"];

fn parse_error(path: &str, line: usize, message: impl Into<String>) -> EngineError {
    EngineError::TableParseError {
        path: path.to_string(),
        line,
        message: message.into(),
    }
}

/// Returns the region number and the rest of the line if `line` is a header.
fn region_header(line: &str) -> Option<(u32, &str)> {
    let first_word = line.split_whitespace().next()?;
    if !REGION_KEYWORDS.contains(&normalize_country(first_word).as_str()) {
        return None;
    }

    let after_keyword = line[first_word.len()..].trim_start();
    let digits_len = after_keyword
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(after_keyword.len());
    if digits_len == 0 {
        return None;
    }
    let region = after_keyword[..digits_len].parse().ok()?;
    let rest = after_keyword[digits_len..]
        .trim_start_matches(|c: char| c.is_whitespace() || matches!(c, ':' | '-' | '.' | ')'));
    Some((region, rest))
}

fn add_countries(
    lookup: &mut CountryLookup<u32>,
    list: &str,
    region: u32,
    path: &str,
    line_no: usize,
) {
    for name in list.split([',', ';']) {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        if !lookup.insert(name, region) {
            warn!(
                path = %path,
                line = line_no,
                country = %name,
                "Duplicate country in region table, keeping first region"
            );
        }
    }
}

/// Parses a region table.
///
/// ```text
/// Region 1: Germany, France, Netherlands
/// Luxembourg, Austria
/// Bölge 2 - United Kingdom; Ireland
/// ```
///
/// # Errors
///
/// Returns [`EngineError::TableParseError`] if countries appear before the
/// first header, or if the table lists no countries at all.
pub fn parse_region_table(source: &str, path: &str) -> EngineResult<RegionTable> {
    let mut lookup = CountryLookup::new();
    let mut current: Option<u32> = None;

    for (idx, raw) in source.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((region, rest)) = region_header(line) {
            current = Some(region);
            add_countries(&mut lookup, rest, region, path, line_no);
            continue;
        }

        let Some(region) = current else {
            return Err(parse_error(
                path,
                line_no,
                "country list appears before the first region header",
            ));
        };
        add_countries(&mut lookup, line, region, path, line_no);
    }

    if lookup.is_empty() {
        return Err(parse_error(path, 0, "no countries found"));
    }

    Ok(RegionTable::new(lookup))
}

fn split_cells(line: &str) -> Vec<&str> {
    if line.contains(';') {
        line.split(';').map(str::trim).collect()
    } else if line.contains('\t') {
        line.split('\t').map(str::trim).collect()
    } else {
        line.split_whitespace().collect()
    }
}

fn parse_number(cell: &str) -> Option<Decimal> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    Decimal::from_str(&cell.replace(',', ".")).ok()
}

/// Strips a flat-row marker (`>=70`, `≥70`, `70+`) from a weight cell.
fn flat_row_weight(cell: &str) -> Option<Decimal> {
    let inner = if let Some(rest) = cell.strip_prefix(">=") {
        rest
    } else if let Some(rest) = cell.strip_prefix('≥') {
        rest
    } else if let Some(rest) = cell.strip_suffix('+') {
        rest
    } else {
        return None;
    };
    parse_number(inner)
}

/// Parses the price cells of one row; column `i` (1-based) is region `i`.
fn parse_prices(cells: &[&str], path: &str, line_no: usize) -> EngineResult<BTreeMap<u32, Decimal>> {
    let mut prices = BTreeMap::new();
    for (column, cell) in cells.iter().enumerate() {
        if cell.is_empty() || *cell == "-" {
            continue;
        }
        let value = parse_number(cell).ok_or_else(|| {
            parse_error(path, line_no, format!("invalid price '{}' in column {}", cell, column + 2))
        })?;
        prices.insert(column as u32 + 1, value);
    }
    Ok(prices)
}

/// Parses a price-break table.
///
/// ```text
/// kg;Region 1;Region 2
/// 0.5;21.10;23.55
/// 1;24.18;27.08
/// >=70;5.58;6.39
/// ```
///
/// # Errors
///
/// Returns [`EngineError::TableParseError`] for unreadable price cells,
/// duplicate breakpoints, a breakpoint after the flat row, or a table
/// without breakpoints.
pub fn parse_price_table(source: &str, path: &str) -> EngineResult<PriceBreakTable> {
    let mut rows: Vec<PriceRow> = Vec::new();
    let mut flat_rate: Option<FlatRateRow> = None;

    for (idx, raw) in source.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let cells = split_cells(line);
        let Some((weight_cell, price_cells)) = cells.split_first() else {
            continue;
        };

        if let Some(min_weight) = flat_row_weight(weight_cell) {
            if flat_rate.is_some() {
                return Err(parse_error(path, line_no, "more than one flat-rate row"));
            }
            flat_rate = Some(FlatRateRow {
                min_weight,
                per_kg: parse_prices(price_cells, path, line_no)?,
            });
            continue;
        }

        // Header and label rows
        let Some(weight) = parse_number(weight_cell) else {
            continue;
        };

        if flat_rate.is_some() {
            return Err(parse_error(
                path,
                line_no,
                "breakpoint rows must come before the flat-rate row",
            ));
        }
        if weight <= Decimal::ZERO {
            return Err(parse_error(path, line_no, format!("non-positive weight {}", weight)));
        }
        if rows.iter().any(|row| row.weight == weight) {
            return Err(parse_error(path, line_no, format!("duplicate breakpoint {} kg", weight)));
        }

        rows.push(PriceRow {
            weight,
            prices: parse_prices(price_cells, path, line_no)?,
        });
    }

    if rows.is_empty() {
        return Err(parse_error(path, 0, "no weight breakpoints found"));
    }

    Ok(PriceBreakTable::new(rows, flat_rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_region_headers_and_continuation_lines() {
        let source = "\
# export zones
Region 1: Germany, France
Netherlands

Bölge 2 - United Kingdom; Ireland
ZONE 3) Japan
";
        let table = parse_region_table(source, "regions.txt").unwrap();
        assert_eq!(table.region_of("germany"), Some(1));
        assert_eq!(table.region_of("netherlands"), Some(1));
        assert_eq!(table.region_of("united kingdom"), Some(2));
        assert_eq!(table.region_of("ireland"), Some(2));
        assert_eq!(table.region_of("japan"), Some(3));
        assert_eq!(table.len(), 6);
    }

    #[test]
    fn test_region_header_without_countries() {
        let table = parse_region_table("Region 4\nCanada, Mexico", "r.txt").unwrap();
        assert_eq!(table.region_of("canada"), Some(4));
    }

    #[test]
    fn test_duplicate_country_keeps_first_region() {
        let table = parse_region_table("Region 1: Germany\nRegion 2: germany, Italy", "r.txt").unwrap();
        assert_eq!(table.region_of("germany"), Some(1));
        assert_eq!(table.region_of("italy"), Some(2));
    }

    #[test]
    fn test_countries_before_header_is_error() {
        let err = parse_region_table("Germany\nRegion 1: France", "r.txt").unwrap_err();
        match err {
            EngineError::TableParseError { line, .. } => assert_eq!(line, 1),
            other => panic!("Expected TableParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_region_word_inside_country_list_is_not_a_header() {
        let table = parse_region_table("Region 1: France\nRegional Islands", "r.txt").unwrap();
        assert_eq!(table.region_of("regional islands"), Some(1));
    }

    #[test]
    fn test_price_table_semicolons_and_flat_row() {
        let source = "\
kg;Region 1;Region 2
0.5;21.10;23.55
1;24.18;
>=70;5.58;6.39
";
        let table = parse_price_table(source, "prices.txt").unwrap();
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.points(1), vec![(dec!(0.5), dec!(21.10)), (dec!(1), dec!(24.18))]);
        assert_eq!(table.points(2), vec![(dec!(0.5), dec!(23.55))]);
        assert_eq!(table.flat_rate(2), Some(dec!(6.39)));
        assert_eq!(table.flat_rate_row().unwrap().min_weight, dec!(70));
    }

    #[test]
    fn test_price_table_tabs_and_decimal_commas() {
        let source = "Weight (kg)\tBölge 1\tBölge 2\n0,5\t22,25\t-\n1\t25,48\t28,18\n";
        let table = parse_price_table(source, "prices.txt").unwrap();
        assert_eq!(table.points(1), vec![(dec!(0.5), dec!(22.25)), (dec!(1), dec!(25.48))]);
        assert_eq!(table.points(2), vec![(dec!(1), dec!(28.18))]);
        assert!(table.flat_rate_row().is_none());
    }

    #[test]
    fn test_plus_suffix_marks_flat_row() {
        let table = parse_price_table("1;10\n70+;4,5", "p.txt").unwrap();
        assert_eq!(table.flat_rate(1), Some(dec!(4.5)));
    }

    #[test]
    fn test_breakpoint_after_flat_row_is_error() {
        let err = parse_price_table("1;10\n>=70;4.5\n80;400", "p.txt").unwrap_err();
        assert!(matches!(err, EngineError::TableParseError { line: 3, .. }));
    }

    #[test]
    fn test_duplicate_breakpoint_is_error() {
        let err = parse_price_table("1;10\n1,0;11", "p.txt").unwrap_err();
        assert!(matches!(err, EngineError::TableParseError { line: 2, .. }));
    }

    #[test]
    fn test_invalid_price_cell_is_error() {
        let err = parse_price_table("1;ten", "p.txt").unwrap_err();
        assert!(err.to_string().contains("invalid price 'ten'"));
    }

    #[test]
    fn test_table_without_breakpoints_is_error() {
        let err = parse_price_table("kg;Region 1\n", "p.txt").unwrap_err();
        assert!(matches!(err, EngineError::TableParseError { line: 0, .. }));
    }
}
