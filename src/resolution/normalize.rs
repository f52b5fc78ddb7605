//! Country name normalization.
//!
//! Every country token stored in a reference table and every destination
//! typed by a caller goes through [`normalize_country`], so comparisons are
//! insensitive to case, diacritics, punctuation and spacing.

/// Normalizes a country name for comparison.
///
/// Case-folds, strips diacritics (including the Turkish letters), drops
/// punctuation, turns `-`, `_` and `/` into spaces and collapses whitespace.
///
/// # Examples
///
/// ```
/// use carrier_quote_engine::resolution::normalize_country;
///
/// assert_eq!(normalize_country("  ALMANYA "), "almanya");
/// assert_eq!(normalize_country("Côte d'Ivoire"), "cote divoire");
/// assert_eq!(normalize_country("Birleşik Arap Emirlikleri"), "birlesik arap emirlikleri");
/// assert_eq!(normalize_country("İsviçre"), "isvicre");
/// ```
pub fn normalize_country(input: &str) -> String {
    let mut folded = String::with_capacity(input.len());

    for c in input.chars().flat_map(char::to_lowercase) {
        if is_combining_mark(c) {
            continue;
        }
        if let Some(replacement) = fold_diacritic(c) {
            folded.push_str(replacement);
        } else if c.is_alphanumeric() {
            folded.push(c);
        } else if c.is_whitespace() || matches!(c, '-' | '_' | '/') {
            folded.push(' ');
        }
    }

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Prepares a free-text destination for resolution.
///
/// For "City, Country" style input the trailing comma-separated token is
/// used; the result is then normalized.
///
/// # Examples
///
/// ```
/// use carrier_quote_engine::resolution::prepare_destination;
///
/// assert_eq!(prepare_destination("Berlin, Almanya"), "almanya");
/// assert_eq!(prepare_destination("Dubai"), "dubai");
/// ```
pub fn prepare_destination(raw: &str) -> String {
    let token = match raw.rsplit_once(',') {
        Some((_, tail)) if !tail.trim().is_empty() => tail,
        Some((head, _)) => head,
        None => raw,
    };
    normalize_country(token)
}

fn is_combining_mark(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036F}')
}

fn fold_diacritic(c: char) -> Option<&'static str> {
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'ç' | 'ć' | 'č' => "c",
        'ď' | 'đ' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ę' | 'ě' => "e",
        'ğ' => "g",
        'ì' | 'í' | 'î' | 'ï' | 'ı' | 'ī' => "i",
        'ł' => "l",
        'ñ' | 'ń' | 'ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => "o",
        'ř' => "r",
        'ş' | 'ś' | 'š' | 'ș' => "s",
        'ţ' | 'ț' | 'ť' => "t",
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' => "u",
        'ý' | 'ÿ' => "y",
        'ž' | 'ź' | 'ż' => "z",
        'ß' => "ss",
        'æ' => "ae",
        'œ' => "oe",
        _ => return None,
    };
    Some(folded)
}
