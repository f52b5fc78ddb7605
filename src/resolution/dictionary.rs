//! Static Turkish to English country dictionary and fuzzy-match synonyms.
//!
//! Keys and values are already normalized (see [`super::normalize_country`]).

const TRANSLATIONS: &[(&str, &str)] = &[
    ("abd", "united states"),
    ("almanya", "germany"),
    ("amerika", "united states"),
    ("amerika birlesik devletleri", "united states"),
    ("arjantin", "argentina"),
    ("avustralya", "australia"),
    ("avusturya", "austria"),
    ("azerbaycan", "azerbaijan"),
    ("bae", "united arab emirates"),
    ("bahreyn", "bahrain"),
    ("belcika", "belgium"),
    ("birlesik arap emirlikleri", "united arab emirates"),
    ("birlesik krallik", "united kingdom"),
    ("brezilya", "brazil"),
    ("bulgaristan", "bulgaria"),
    ("cek cumhuriyeti", "czech republic"),
    ("cekya", "czech republic"),
    ("cezayir", "algeria"),
    ("cin", "china"),
    ("danimarka", "denmark"),
    ("endonezya", "indonesia"),
    ("fas", "morocco"),
    ("finlandiya", "finland"),
    ("fransa", "france"),
    ("guney afrika", "south africa"),
    ("guney kore", "south korea"),
    ("gurcistan", "georgia"),
    ("hindistan", "india"),
    ("hirvatistan", "croatia"),
    ("hollanda", "netherlands"),
    ("ingiltere", "united kingdom"),
    ("irak", "iraq"),
    ("irlanda", "ireland"),
    ("ispanya", "spain"),
    ("israil", "israel"),
    ("isvec", "sweden"),
    ("isvicre", "switzerland"),
    ("italya", "italy"),
    ("japonya", "japan"),
    ("kanada", "canada"),
    ("katar", "qatar"),
    ("kazakistan", "kazakhstan"),
    ("kibris", "cyprus"),
    ("kuveyt", "kuwait"),
    ("lubnan", "lebanon"),
    ("luksemburg", "luxembourg"),
    ("macaristan", "hungary"),
    ("malezya", "malaysia"),
    ("meksika", "mexico"),
    ("misir", "egypt"),
    ("norvec", "norway"),
    ("polonya", "poland"),
    ("portekiz", "portugal"),
    ("romanya", "romania"),
    ("rusya", "russia"),
    ("singapur", "singapore"),
    ("suudi arabistan", "saudi arabia"),
    ("tayland", "thailand"),
    ("tunus", "tunisia"),
    ("turkiye", "turkey"),
    ("ukrayna", "ukraine"),
    ("umman", "oman"),
    ("urdun", "jordan"),
    ("yeni zelanda", "new zealand"),
    ("yunanistan", "greece"),
];

/// Input triggers and the table-entry markers they select during fuzzy matching.
pub(crate) const SYNONYM_OVERRIDES: &[(&[&str], &[&str])] = &[
    (&["emirat", "uae", "dubai", "abu dhabi"], &["emirates", "arap"]),
    (&["usa", "america", "amerika", "abd"], &["united states", "amerika"]),
    (&["uk", "britain", "england", "ingiltere"], &["united kingdom", "ingiltere"]),
    (&["holland", "hollanda"], &["netherlands"]),
    (&["korea", "kore"], &["south korea"]),
];

/// Translates a normalized Turkish country name into its normalized English name.
///
/// # Examples
///
/// ```
/// use carrier_quote_engine::resolution::translate_country;
///
/// assert_eq!(translate_country("almanya"), Some("germany"));
/// assert_eq!(translate_country("germany"), None);
/// ```
pub fn translate_country(normalized: &str) -> Option<&'static str> {
    TRANSLATIONS
        .binary_search_by(|(tr, _)| (*tr).cmp(normalized))
        .ok()
        .and_then(|idx| TRANSLATIONS.get(idx))
        .map(|(_, en)| *en)
}

/// Returns true if a synonym trigger occurs in the normalized input.
///
/// Short triggers (three letters or fewer) must match a whole word so that
/// "uk" does not fire on "ukraine".
pub(crate) fn trigger_matches(normalized: &str, trigger: &str) -> bool {
    if trigger.len() <= 3 {
        normalized.split(' ').any(|word| word == trigger)
    } else {
        normalized.contains(trigger)
    }
}
