//! Content compliance screening.
//!
//! Declared contents are checked against prohibited keywords before any
//! destination resolution or pricing. Matching is a case- and
//! diacritic-insensitive substring test, so "Tabancalar" matches "tabanca".
//! A clear verdict only means no known red flag was found.

use tracing::debug;

use crate::resolution::normalize_country;

/// Built-in prohibited keywords, English and Turkish.
pub const PROHIBITED_KEYWORDS: &[&str] = &[
    // Weapons and ammunition
    "weapon",
    "firearm",
    "pistol",
    "rifle",
    "ammunition",
    "silah",
    "tabanca",
    "tufek",
    "mermi",
    // Explosives and pyrotechnics
    "explosive",
    "gunpowder",
    "detonator",
    "firework",
    "patlayici",
    "barut",
    "havai fisek",
    // Narcotics
    "narcotic",
    "cocaine",
    "heroin",
    "cannabis",
    "marijuana",
    "uyusturucu",
    "kokain",
    "eroin",
    "esrar",
    // Hazardous materials
    "radioactive",
    "radyoaktif",
    "toxic gas",
    "zehirli gaz",
    // Currency and protected goods
    "banknote",
    "banknot",
    "ivory",
    "fildisi",
];

/// Result of screening declared contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComplianceVerdict {
    /// No prohibited keyword found.
    Clear,
    /// The contents match a prohibited keyword.
    Prohibited {
        /// The keyword that matched, normalized.
        keyword: String,
    },
}

impl ComplianceVerdict {
    /// Returns true if the contents may be shipped.
    pub fn is_clear(&self) -> bool {
        matches!(self, ComplianceVerdict::Clear)
    }
}

/// Screens declared contents against the built-in and configured keywords.
#[derive(Debug, Clone)]
pub struct ComplianceGuard {
    keywords: Vec<String>,
}

impl ComplianceGuard {
    /// Creates a guard with the built-in keywords plus `extra`.
    ///
    /// Keywords are normalized; blank and repeated ones are dropped.
    pub fn new<S: AsRef<str>>(extra: &[S]) -> Self {
        let mut keywords: Vec<String> = Vec::new();
        let builtin = PROHIBITED_KEYWORDS.iter().map(|kw| normalize_country(kw));
        let configured = extra.iter().map(|kw| normalize_country(kw.as_ref()));
        for normalized in builtin.chain(configured) {
            if !normalized.is_empty() && !keywords.contains(&normalized) {
                keywords.push(normalized);
            }
        }
        Self { keywords }
    }

    /// Checks declared contents.
    ///
    /// # Examples
    ///
    /// ```
    /// use carrier_quote_engine::calculation::{ComplianceGuard, ComplianceVerdict};
    ///
    /// let guard = ComplianceGuard::new::<&str>(&[]);
    /// assert!(guard.check("Cotton T-shirts").is_clear());
    /// assert_eq!(
    ///     guard.check("Av TÜFEK seti"),
    ///     ComplianceVerdict::Prohibited { keyword: "tufek".to_string() }
    /// );
    /// ```
    pub fn check(&self, content: &str) -> ComplianceVerdict {
        let normalized = normalize_country(content);
        match self.keywords.iter().find(|kw| normalized.contains(kw.as_str())) {
            Some(keyword) => {
                debug!(keyword = %keyword, "Prohibited content detected");
                ComplianceVerdict::Prohibited {
                    keyword: keyword.clone(),
                }
            }
            None => ComplianceVerdict::Clear,
        }
    }

    /// Number of active keywords.
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// Returns true if no keyword is active.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

impl Default for ComplianceGuard {
    fn default() -> Self {
        Self::new::<&str>(&[])
    }
}
