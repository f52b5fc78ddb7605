//! Normalized country name index.

use std::collections::HashMap;

use super::normalize_country;

/// Known country names of one carrier, normalized, mapped to a carrier key.
///
/// Entries keep their insertion (file) order, which fuzzy matching relies
/// on for deterministic results.
#[derive(Debug, Clone)]
pub struct CountryLookup<K> {
    entries: Vec<(String, K)>,
    index: HashMap<String, usize>,
}

impl<K> CountryLookup<K> {
    /// Creates an empty lookup.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Normalizes `name` and stores it with `key`.
    ///
    /// Returns false, leaving the first entry in place, if the normalized
    /// name is already present or empty.
    pub fn insert(&mut self, name: &str, key: K) -> bool {
        let normalized = normalize_country(name);
        if normalized.is_empty() || self.index.contains_key(&normalized) {
            return false;
        }
        self.index.insert(normalized.clone(), self.entries.len());
        self.entries.push((normalized, key));
        true
    }

    /// Looks up an already-normalized name.
    pub fn get(&self, normalized: &str) -> Option<&K> {
        self.index.get(normalized).map(|&idx| &self.entries[idx].1)
    }

    /// Iterates over `(normalized name, key)` pairs in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &K)> {
        self.entries.iter().map(|(name, key)| (name.as_str(), key))
    }

    /// Number of known country names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no country is known.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K> Default for CountryLookup<K> {
    fn default() -> Self {
        Self::new()
    }
}
