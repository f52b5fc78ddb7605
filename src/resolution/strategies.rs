//! Destination resolution strategies.
//!
//! Each strategy answers one question about an already-normalized
//! destination and can be tested on its own. [`super::RegionResolver`]
//! runs them in order and stops at the first match.

use std::collections::HashMap;

use super::CountryLookup;
use super::dictionary::{SYNONYM_OVERRIDES, translate_country, trigger_matches};

/// A single step of the destination resolution chain.
pub trait ResolveStrategy<K> {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Tries to map a normalized destination to a carrier key.
    fn try_resolve(&self, normalized: &str) -> Option<K>;
}

/// Exact match against the carrier's normalized country table.
#[derive(Debug)]
pub struct ExactMatch<'a, K> {
    lookup: &'a CountryLookup<K>,
}

impl<'a, K> ExactMatch<'a, K> {
    /// Creates the strategy over a country table.
    pub fn new(lookup: &'a CountryLookup<K>) -> Self {
        Self { lookup }
    }
}

impl<K: Clone> ResolveStrategy<K> for ExactMatch<'_, K> {
    fn name(&self) -> &'static str {
        "exact"
    }

    fn try_resolve(&self, normalized: &str) -> Option<K> {
        self.lookup.get(normalized).cloned()
    }
}

/// A carrier's own synonym and city map (e.g. "dubai" to "united arab emirates").
///
/// Alias keys and targets must already be normalized.
#[derive(Debug)]
pub struct AliasMatch<'a, K> {
    lookup: &'a CountryLookup<K>,
    aliases: &'a HashMap<String, String>,
}

impl<'a, K> AliasMatch<'a, K> {
    /// Creates the strategy over a country table and its alias map.
    pub fn new(lookup: &'a CountryLookup<K>, aliases: &'a HashMap<String, String>) -> Self {
        Self { lookup, aliases }
    }
}

impl<K: Clone> ResolveStrategy<K> for AliasMatch<'_, K> {
    fn name(&self) -> &'static str {
        "alias"
    }

    fn try_resolve(&self, normalized: &str) -> Option<K> {
        let target = self.aliases.get(normalized)?;
        self.lookup.get(target).cloned()
    }
}

/// Translation through the static Turkish/English dictionary, then exact match.
#[derive(Debug)]
pub struct DictionaryMatch<'a, K> {
    lookup: &'a CountryLookup<K>,
}

impl<'a, K> DictionaryMatch<'a, K> {
    /// Creates the strategy over a country table.
    pub fn new(lookup: &'a CountryLookup<K>) -> Self {
        Self { lookup }
    }
}

impl<K: Clone> ResolveStrategy<K> for DictionaryMatch<'_, K> {
    fn name(&self) -> &'static str {
        "dictionary"
    }

    fn try_resolve(&self, normalized: &str) -> Option<K> {
        let translated = translate_country(normalized)?;
        self.lookup.get(translated).cloned()
    }
}

/// Synonym overrides, then substring containment in either direction.
///
/// Substring matching can pick a short country name that happens to occur
/// inside a longer input (or the reverse). Table order decides which entry
/// wins in that case.
#[derive(Debug)]
pub struct FuzzyMatch<'a, K> {
    lookup: &'a CountryLookup<K>,
}

impl<'a, K> FuzzyMatch<'a, K> {
    /// Creates the strategy over a country table.
    pub fn new(lookup: &'a CountryLookup<K>) -> Self {
        Self { lookup }
    }

    fn synonym_override(&self, normalized: &str) -> Option<&'a K> {
        for (triggers, markers) in SYNONYM_OVERRIDES {
            if !triggers.iter().any(|t| trigger_matches(normalized, t)) {
                continue;
            }
            let hit = self
                .lookup
                .entries()
                .find(|(name, _)| markers.iter().any(|m| name.contains(m)));
            if let Some((_, key)) = hit {
                return Some(key);
            }
        }
        None
    }
}

impl<K: Clone> ResolveStrategy<K> for FuzzyMatch<'_, K> {
    fn name(&self) -> &'static str {
        "fuzzy"
    }

    fn try_resolve(&self, normalized: &str) -> Option<K> {
        if normalized.is_empty() {
            return None;
        }
        if let Some(key) = self.synonym_override(normalized) {
            return Some(key.clone());
        }
        self.lookup
            .entries()
            .find(|(name, _)| name.contains(normalized) || normalized.contains(name))
            .map(|(_, key)| key.clone())
    }
}
