//! Locale-aware string collation.
//!
//! A small multi-level collator in the spirit of the Unicode Collation
//! Algorithm, tailored for the two locales the tables are used with:
//!
//! 1. primary: letters compared case- and accent-blind, scripts ordered by
//!    the active locale (Russian puts Cyrillic first, English puts Latin
//!    first); whitespace and punctuation sort before digits, digits before
//!    letters;
//! 2. secondary: accents (`е` < `ё`, `e` < `é`);
//! 3. tertiary: case, uppercase first;
//! 4. finally a fully uppercase string ranks before one that is not.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Locales with a collation tailoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Ru,
    En,
}

impl Locale {
    /// Parse a BCP 47 tag by its language subtag (`"ru-RU"` → `Ru`).
    pub fn parse(tag: &str) -> Option<Self> {
        let language = tag.split(['-', '_']).next()?.trim();
        if language.eq_ignore_ascii_case("ru") {
            Some(Locale::Ru)
        } else if language.eq_ignore_ascii_case("en") {
            Some(Locale::En)
        } else {
            None
        }
    }

    fn leading_script(self) -> Script {
        match self {
            Locale::Ru => Script::Cyrillic,
            Locale::En => Script::Latin,
        }
    }
}

/// Candidate set used when nothing else is configured, in preference order.
pub const DEFAULT_LOCALES: [Locale; 2] = [Locale::Ru, Locale::En];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Script {
    Latin,
    Cyrillic,
}

// Primary weight classes
const RANK_VARIABLE: u8 = 0;
const RANK_DIGIT: u8 = 1;
const RANK_LEADING: u8 = 2;
const RANK_TRAILING: u8 = 3;
const RANK_OTHER: u8 = 4;

/// Precomputed collation key. Comparing keys is equivalent to comparing the
/// strings they were built from.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    primary: Vec<(u8, u32)>,
    secondary: Vec<u8>,
    tertiary: Vec<u8>,
    /// `false` sorts first, so fully uppercase text wins the last tie.
    not_all_upper: bool,
}

/// String collator over an ordered locale preference list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collator {
    locales: Vec<Locale>,
    active: Locale,
}

impl Collator {
    /// Create a collator. The first locale in preference order is used; an
    /// empty list falls back to English.
    pub fn new(locales: &[Locale]) -> Self {
        Self {
            locales: locales.to_vec(),
            active: locales.first().copied().unwrap_or(Locale::En),
        }
    }

    /// Create a collator from language tags, skipping unsupported ones.
    ///
    /// `["de-DE", "en-US"]` picks English: the best available match.
    pub fn from_tags(tags: &[&str]) -> Self {
        let locales: Vec<Locale> = tags.iter().filter_map(|tag| Locale::parse(tag)).collect();
        Self::new(&locales)
    }

    /// The locale whose tailoring is in effect.
    pub fn locale(&self) -> Locale {
        self.active
    }

    pub fn locales(&self) -> &[Locale] {
        &self.locales
    }

    /// Compare two strings.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.sort_key(a).cmp(&self.sort_key(b))
    }

    /// Build the collation key of `s`.
    pub fn sort_key(&self, s: &str) -> CollationKey {
        let mut key = CollationKey {
            primary: Vec::with_capacity(s.len()),
            secondary: Vec::with_capacity(s.len()),
            tertiary: Vec::with_capacity(s.len()),
            not_all_upper: s != s.to_uppercase(),
        };
        for c in s.chars() {
            let (rank, base, accent, case) = self.element(c);
            key.primary.push((rank, base));
            key.secondary.push(accent);
            key.tertiary.push(case);
        }
        key
    }

    /// Collation element of one character: (class, base, accent, case).
    fn element(&self, c: char) -> (u8, u32, u8, u8) {
        let lower = c.to_lowercase().next().unwrap_or(c);
        let case = if c.is_uppercase() { 0 } else { 1 };

        if let Some(digit) = c.to_digit(10) {
            return (RANK_DIGIT, digit, 0, case);
        }
        if let Some((script, base, accent)) = fold_letter(lower) {
            let rank = if script == self.active.leading_script() {
                RANK_LEADING
            } else {
                RANK_TRAILING
            };
            return (rank, base as u32, accent, case);
        }
        if c.is_alphabetic() {
            return (RANK_OTHER, lower as u32, 0, case);
        }
        if c.is_numeric() {
            return (RANK_DIGIT, 10 + c as u32, 0, case);
        }
        (RANK_VARIABLE, c as u32, 0, case)
    }
}

impl Default for Collator {
    fn default() -> Self {
        Self::new(&DEFAULT_LOCALES)
    }
}

// Secondary weights
const GRAVE: u8 = 1;
const ACUTE: u8 = 2;
const CIRCUMFLEX: u8 = 3;
const TILDE: u8 = 4;
const DIAERESIS: u8 = 5;
const RING: u8 = 6;
const CEDILLA: u8 = 7;

/// Split a lowercase letter into script, base letter and accent weight.
fn fold_letter(c: char) -> Option<(Script, char, u8)> {
    let folded = match c {
        'a'..='z' => (Script::Latin, c, 0),
        'à' => (Script::Latin, 'a', GRAVE),
        'á' => (Script::Latin, 'a', ACUTE),
        'â' => (Script::Latin, 'a', CIRCUMFLEX),
        'ã' => (Script::Latin, 'a', TILDE),
        'ä' => (Script::Latin, 'a', DIAERESIS),
        'å' => (Script::Latin, 'a', RING),
        'ç' => (Script::Latin, 'c', CEDILLA),
        'è' => (Script::Latin, 'e', GRAVE),
        'é' => (Script::Latin, 'e', ACUTE),
        'ê' => (Script::Latin, 'e', CIRCUMFLEX),
        'ë' => (Script::Latin, 'e', DIAERESIS),
        'ì' => (Script::Latin, 'i', GRAVE),
        'í' => (Script::Latin, 'i', ACUTE),
        'î' => (Script::Latin, 'i', CIRCUMFLEX),
        'ï' => (Script::Latin, 'i', DIAERESIS),
        'ñ' => (Script::Latin, 'n', TILDE),
        'ò' => (Script::Latin, 'o', GRAVE),
        'ó' => (Script::Latin, 'o', ACUTE),
        'ô' => (Script::Latin, 'o', CIRCUMFLEX),
        'õ' => (Script::Latin, 'o', TILDE),
        'ö' => (Script::Latin, 'o', DIAERESIS),
        'ù' => (Script::Latin, 'u', GRAVE),
        'ú' => (Script::Latin, 'u', ACUTE),
        'û' => (Script::Latin, 'u', CIRCUMFLEX),
        'ü' => (Script::Latin, 'u', DIAERESIS),
        'ý' => (Script::Latin, 'y', ACUTE),
        'ÿ' => (Script::Latin, 'y', DIAERESIS),
        // ё is е with a diaeresis at the primary level; й stays a letter of its own
        'ё' => (Script::Cyrillic, 'е', DIAERESIS),
        'а'..='я' => (Script::Cyrillic, c, 0),
        // Other Cyrillic letters (і ї є ґ ў ...) by code point, after я
        '\u{0400}'..='\u{04FF}' if c.is_alphabetic() => (Script::Cyrillic, c, 0),
        _ => return None,
    };
    Some(folded)
}
