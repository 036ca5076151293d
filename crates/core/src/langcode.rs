//! Country/region token to ISO 639-1 language mapping.
//!
//! Keys are the lowercase tokens Slack uses in flag emoji names: either the
//! bare alias (`jp`, `fr`, `us`) or the part after `flag-` (`flag-br` -> `br`).
//! Each country maps to its most widely used language, which is a lossy
//! choice for multilingual countries.

use std::collections::HashMap;
use std::fmt;

/// Built-in table. Sorted by key.
pub const BUILTIN_LANGUAGE_CODES: &[(&str, &str)] = &[
    ("ac", "en"),
    ("ad", "ca"),
    ("ae", "ar"),
    ("af", "ps"),
    ("ag", "en"),
    ("ai", "en"),
    ("al", "sq"),
    ("am", "hy"),
    ("ao", "pt"),
    ("ar", "es"),
    ("as", "en"),
    ("at", "de"),
    ("au", "en"),
    ("aw", "nl"),
    ("ax", "sv"),
    ("az", "az"),
    ("ba", "bs"),
    ("bb", "en"),
    ("bd", "bn"),
    ("be", "nl"),
    ("bf", "fr"),
    ("bg", "bg"),
    ("bh", "ar"),
    ("bi", "fr"),
    ("bj", "fr"),
    ("bl", "fr"),
    ("bm", "en"),
    ("bn", "ms"),
    ("bo", "es"),
    ("bq", "nl"),
    ("br", "pt"),
    ("bs", "en"),
    ("bw", "en"),
    ("by", "be"),
    ("bz", "en"),
    ("ca", "en"),
    ("cd", "fr"),
    ("cf", "fr"),
    ("cg", "fr"),
    ("ch", "de"),
    ("ci", "fr"),
    ("ck", "en"),
    ("cl", "es"),
    ("cm", "fr"),
    ("cn", "zh"),
    ("co", "es"),
    ("cp", "fr"),
    ("cr", "es"),
    ("cu", "es"),
    ("cv", "pt"),
    ("cw", "nl"),
    ("cx", "en"),
    ("cy", "el"),
    ("cz", "cs"),
    ("de", "de"),
    ("dg", "en"),
    ("dj", "fr"),
    ("dk", "da"),
    ("dm", "en"),
    ("do", "es"),
    ("dz", "ar"),
    ("ea", "es"),
    ("ec", "es"),
    ("ee", "et"),
    ("eg", "ar"),
    ("eh", "ar"),
    ("er", "ti"),
    ("es", "es"),
    ("et", "am"),
    ("fi", "fi"),
    ("fj", "en"),
    ("fk", "en"),
    ("fm", "en"),
    ("fo", "da"),
    ("fr", "fr"),
    ("ga", "fr"),
    ("gb", "en"),
    ("gd", "en"),
    ("ge", "ka"),
    ("gf", "fr"),
    ("gg", "en"),
    ("gh", "en"),
    ("gi", "en"),
    ("gl", "da"),
    ("gm", "en"),
    ("gn", "fr"),
    ("gp", "fr"),
    ("gq", "es"),
    ("gr", "el"),
    ("gs", "en"),
    ("gt", "es"),
    ("gu", "en"),
    ("gw", "pt"),
    ("gy", "en"),
    ("hk", "zh"),
    ("hn", "es"),
    ("hr", "hr"),
    ("ht", "ht"),
    ("hu", "hu"),
    ("ic", "es"),
    ("id", "id"),
    ("ie", "ga"),
    ("il", "he"),
    ("im", "en"),
    ("in", "hi"),
    ("io", "en"),
    ("iq", "ar"),
    ("ir", "fa"),
    ("is", "is"),
    ("it", "it"),
    ("je", "en"),
    ("jm", "en"),
    ("jo", "ar"),
    ("jp", "ja"),
    ("ke", "sw"),
    ("kg", "ky"),
    ("kh", "km"),
    ("ki", "en"),
    ("km", "ar"),
    ("kn", "en"),
    ("kp", "ko"),
    ("kr", "ko"),
    ("kw", "ar"),
    ("ky", "en"),
    ("kz", "kk"),
    ("la", "lo"),
    ("lb", "ar"),
    ("lc", "en"),
    ("li", "de"),
    ("lk", "si"),
    ("lr", "en"),
    ("ls", "st"),
    ("lt", "lt"),
    ("lu", "lb"),
    ("lv", "lv"),
    ("ly", "ar"),
    ("ma", "ar"),
    ("mc", "fr"),
    ("md", "ro"),
    ("me", "sr"),
    ("mf", "fr"),
    ("mg", "mg"),
    ("mh", "en"),
    ("mk", "mk"),
    ("ml", "fr"),
    ("mm", "my"),
    ("mn", "mn"),
    ("mo", "zh"),
    ("mp", "en"),
    ("mq", "fr"),
    ("mr", "ar"),
    ("ms", "en"),
    ("mt", "mt"),
    ("mu", "en"),
    ("mv", "dv"),
    ("mw", "ny"),
    ("mx", "es"),
    ("my", "ms"),
    ("mz", "pt"),
    ("na", "en"),
    ("nc", "fr"),
    ("ne", "fr"),
    ("nf", "en"),
    ("ng", "en"),
    ("ni", "es"),
    ("nl", "nl"),
    ("no", "no"),
    ("np", "ne"),
    ("nr", "en"),
    ("nu", "en"),
    ("nz", "en"),
    ("om", "ar"),
    ("pa", "es"),
    ("pe", "es"),
    ("pf", "fr"),
    ("pg", "en"),
    ("ph", "tl"),
    ("pk", "ur"),
    ("pl", "pl"),
    ("pm", "fr"),
    ("pn", "en"),
    ("pr", "es"),
    ("ps", "ar"),
    ("pt", "pt"),
    ("pw", "en"),
    ("py", "es"),
    ("qa", "ar"),
    ("re", "fr"),
    ("ro", "ro"),
    ("rs", "sr"),
    ("ru", "ru"),
    ("rw", "rw"),
    ("sa", "ar"),
    ("sb", "en"),
    ("sc", "fr"),
    ("sd", "ar"),
    ("se", "sv"),
    ("sg", "en"),
    ("sh", "en"),
    ("si", "sl"),
    ("sk", "sk"),
    ("sl", "en"),
    ("sm", "it"),
    ("sn", "fr"),
    ("so", "so"),
    ("sr", "nl"),
    ("ss", "en"),
    ("st", "pt"),
    ("sv", "es"),
    ("sx", "nl"),
    ("sy", "ar"),
    ("sz", "en"),
    ("ta", "en"),
    ("tc", "en"),
    ("td", "fr"),
    ("tf", "fr"),
    ("tg", "fr"),
    ("th", "th"),
    ("tj", "tg"),
    ("tk", "en"),
    ("tl", "pt"),
    ("tm", "tk"),
    ("tn", "ar"),
    ("to", "to"),
    ("tr", "tr"),
    ("tt", "en"),
    ("tv", "en"),
    ("tw", "zh"),
    ("tz", "sw"),
    ("ua", "uk"),
    ("ug", "en"),
    ("uk", "en"),
    ("us", "en"),
    ("uy", "es"),
    ("uz", "uz"),
    ("va", "it"),
    ("vc", "en"),
    ("ve", "es"),
    ("vg", "en"),
    ("vi", "en"),
    ("vn", "vi"),
    ("vu", "bi"),
    ("wf", "fr"),
    ("ws", "sm"),
    ("xk", "sq"),
    ("ye", "ar"),
    ("yt", "fr"),
    ("za", "af"),
    ("zm", "en"),
    ("zw", "en"),
];

/// ISO 639-1 language code resolved from a reaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LanguageCode(&'static str);

impl LanguageCode {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Read-only lookup over a country-token table.
#[derive(Clone, Debug)]
pub struct LanguageTable {
    entries: HashMap<&'static str, LanguageCode>,
}

impl Default for LanguageTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LanguageTable {
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN_LANGUAGE_CODES)
    }

    /// Later duplicates replace earlier ones.
    pub fn from_entries(entries: &[(&'static str, &'static str)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(country, language)| (*country, LanguageCode(*language)))
                .collect(),
        }
    }

    pub fn get(&self, country: &str) -> Option<LanguageCode> {
        self.entries.get(country).copied()
    }

    pub fn contains(&self, country: &str) -> bool {
        self.entries.contains_key(country)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{LanguageTable, BUILTIN_LANGUAGE_CODES};

    #[test]
    fn builtin_keys_are_unique_and_sorted() {
        let table = LanguageTable::builtin();
        assert_eq!(table.len(), BUILTIN_LANGUAGE_CODES.len());
        assert!(BUILTIN_LANGUAGE_CODES.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }

    #[test]
    fn builtin_entries_are_lowercase_two_letter_codes() {
        for (country, language) in BUILTIN_LANGUAGE_CODES {
            assert!(
                country.chars().all(|ch| ch.is_ascii_lowercase()),
                "country token `{country}` should be lowercase"
            );
            assert!(
                language.len() == 2 && language.chars().all(|ch| ch.is_ascii_lowercase()),
                "language `{language}` for `{country}` should be ISO 639-1"
            );
        }
    }

    #[test]
    fn common_slack_flag_aliases_are_present() {
        let table = LanguageTable::builtin();
        let expected = [
            ("jp", "ja"),
            ("kr", "ko"),
            ("cn", "zh"),
            ("de", "de"),
            ("fr", "fr"),
            ("es", "es"),
            ("it", "it"),
            ("ru", "ru"),
            ("us", "en"),
            ("gb", "en"),
            ("uk", "en"),
        ];

        for (country, language) in expected {
            assert_eq!(table.get(country).map(|code| code.as_str()), Some(language));
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let table = LanguageTable::builtin();
        assert!(table.contains("jp"));
        assert!(!table.contains("JP"));
    }

    #[test]
    fn custom_tables_can_be_injected() {
        let table = LanguageTable::from_entries(&[("xx", "eo")]);
        assert_eq!(table.get("xx").map(|code| code.to_string()), Some("eo".to_owned()));
        assert!(table.get("jp").is_none());
        assert!(!table.is_empty());
    }
}
