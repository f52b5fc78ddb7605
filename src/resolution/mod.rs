//! Country and region resolution.
//!
//! Free-text destinations ("Almanya", "Berlin, Germany", "Dubai") are mapped
//! to carrier-specific keys by an ordered chain of [`ResolveStrategy`]
//! implementations. The first strategy that matches wins.
//!
//! # Example
//!
//! ```
//! use carrier_quote_engine::resolution::{CountryLookup, RegionResolver};
//!
//! let mut regions = CountryLookup::new();
//! regions.insert("Germany", 1u32);
//!
//! let resolver = RegionResolver::for_table(&regions);
//! let resolution = resolver.resolve("ALMANYA").unwrap();
//! assert_eq!(resolution.key, 1);
//! assert_eq!(resolution.strategy, "dictionary");
//! ```

mod dictionary;
mod lookup;
mod normalize;
mod strategies;

use std::collections::HashMap;

use tracing::debug;

pub use dictionary::translate_country;
pub use lookup::CountryLookup;
pub use normalize::{normalize_country, prepare_destination};
pub use strategies::{AliasMatch, DictionaryMatch, ExactMatch, FuzzyMatch, ResolveStrategy};

/// A successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution<K> {
    /// The carrier key the destination maps to.
    pub key: K,
    /// The normalized destination token that was matched.
    pub normalized: String,
    /// Name of the strategy that matched.
    pub strategy: &'static str,
}

/// Runs resolution strategies in order; first match wins.
pub struct RegionResolver<'a, K> {
    strategies: Vec<Box<dyn ResolveStrategy<K> + 'a>>,
}

impl<'a, K: Clone + 'a> RegionResolver<'a, K> {
    /// Creates a resolver from an explicit strategy list.
    pub fn new(strategies: Vec<Box<dyn ResolveStrategy<K> + 'a>>) -> Self {
        Self { strategies }
    }

    /// The standard chain: exact, dictionary, fuzzy.
    pub fn for_table(lookup: &'a CountryLookup<K>) -> Self {
        Self::new(vec![
            Box::new(ExactMatch::new(lookup)),
            Box::new(DictionaryMatch::new(lookup)),
            Box::new(FuzzyMatch::new(lookup)),
        ])
    }

    /// The chain for carriers with their own alias map: exact, alias, dictionary, fuzzy.
    pub fn with_aliases(lookup: &'a CountryLookup<K>, aliases: &'a HashMap<String, String>) -> Self {
        Self::new(vec![
            Box::new(ExactMatch::new(lookup)),
            Box::new(AliasMatch::new(lookup, aliases)),
            Box::new(DictionaryMatch::new(lookup)),
            Box::new(FuzzyMatch::new(lookup)),
        ])
    }

    /// Resolves a free-text destination.
    ///
    /// Returns `None` when no strategy matches or the destination is blank.
    pub fn resolve(&self, destination: &str) -> Option<Resolution<K>> {
        let normalized = prepare_destination(destination);
        if normalized.is_empty() {
            return None;
        }

        for strategy in &self.strategies {
            if let Some(key) = strategy.try_resolve(&normalized) {
                debug!(
                    destination = %destination,
                    normalized = %normalized,
                    strategy = strategy.name(),
                    "Destination resolved"
                );
                return Some(Resolution {
                    key,
                    normalized,
                    strategy: strategy.name(),
                });
            }
        }

        debug!(destination = %destination, normalized = %normalized, "Destination not resolved");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regions() -> CountryLookup<u32> {
        let mut lookup = CountryLookup::new();
        lookup.insert("Germany", 1);
        lookup.insert("France", 1);
        lookup.insert("United States", 6);
        lookup.insert("United Arab Emirates", 5);
        lookup
    }

    #[test]
    fn test_resolution_is_case_diacritic_and_whitespace_insensitive() {
        let table = regions();
        let resolver = RegionResolver::for_table(&table);

        let a = resolver.resolve("Almanya").unwrap();
        let b = resolver.resolve("ALMANYA").unwrap();
        let c = resolver.resolve(" almanya ").unwrap();

        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a.key, 1);
    }

    #[test]
    fn test_city_country_uses_trailing_token() {
        let table = regions();
        let resolver = RegionResolver::for_table(&table);
        let resolution = resolver.resolve("Lyon, France").unwrap();
        assert_eq!(resolution.key, 1);
        assert_eq!(resolution.strategy, "exact");
    }

    #[test]
    fn test_first_matching_strategy_wins() {
        let table = regions();
        let resolver = RegionResolver::for_table(&table);
        assert_eq!(resolver.resolve("germany").unwrap().strategy, "exact");
        assert_eq!(resolver.resolve("Birleşik Arap Emirlikleri").unwrap().strategy, "dictionary");
        assert_eq!(resolver.resolve("Dubai").unwrap().strategy, "fuzzy");
    }

    #[test]
    fn test_alias_chain_runs_alias_before_dictionary() {
        let table = regions();
        let mut aliases = HashMap::new();
        aliases.insert("amerika".to_string(), "germany".to_string());
        let resolver = RegionResolver::with_aliases(&table, &aliases);
        let resolution = resolver.resolve("Amerika").unwrap();
        assert_eq!(resolution.strategy, "alias");
        assert_eq!(resolution.key, 1);
    }

    #[test]
    fn test_unknown_and_blank_destinations_fail() {
        let table = regions();
        let resolver = RegionResolver::for_table(&table);
        assert!(resolver.resolve("Atlantis").is_none());
        assert!(resolver.resolve("   ").is_none());
    }

    #[test]
    fn test_empty_strategy_list_never_resolves() {
        let resolver: RegionResolver<'_, u32> = RegionResolver::new(vec![]);
        assert!(resolver.resolve("Germany").is_none());
    }
}
