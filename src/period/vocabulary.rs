//! Month-name lookup tables used to recognise periods in table names.

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;

use crate::errors::{TrackerError, TrackerResult};

const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

const MONTHS_EN: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

pub const DEFAULT_LOCALE: &str = "es";

static BUILTIN: Lazy<MonthVocabulary> = Lazy::new(MonthVocabulary::builtin);

/// Maps month indices (0 = January) to lowercase names per language, and back.
#[derive(Debug, Clone)]
pub struct MonthVocabulary {
    default_locale: String,
    languages: BTreeMap<String, Vec<String>>,
    index: HashMap<String, u32>,
}

impl MonthVocabulary {
    /// Creates an empty vocabulary whose fallback language is `default_locale`.
    pub fn new(default_locale: &str) -> Self {
        Self {
            default_locale: normalize_locale(default_locale),
            languages: BTreeMap::new(),
            index: HashMap::new(),
        }
    }

    /// Spanish and English month names, Spanish as fallback.
    pub fn builtin() -> Self {
        let mut vocabulary = Self::new(DEFAULT_LOCALE);
        vocabulary.insert("es", MONTHS_ES.iter().map(|name| name.to_string()).collect());
        vocabulary.insert("en", MONTHS_EN.iter().map(|name| name.to_string()).collect());
        vocabulary
    }

    /// Shared instance of [`MonthVocabulary::builtin`].
    pub fn shared() -> &'static MonthVocabulary {
        &BUILTIN
    }

    /// Registers twelve month names for `locale`, replacing any previous entry.
    ///
    /// Names of a replaced entry stop resolving. A name already registered by
    /// another locale for a different month is rejected; sharing a name for
    /// the same month (e.g. `agosto`) is allowed.
    pub fn register<I, S>(&mut self, locale: &str, names: I) -> TrackerResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = names
            .into_iter()
            .map(|name| name.as_ref().trim().to_lowercase())
            .collect();
        if names.len() != 12 || names.iter().any(String::is_empty) {
            return Err(TrackerError::Validation(format!(
                "locale `{locale}` needs 12 non-empty month names, got {}",
                names.len()
            )));
        }
        let key = normalize_locale(locale);
        for (month, name) in names.iter().enumerate() {
            if names[..month].contains(name) {
                return Err(TrackerError::Validation(format!(
                    "locale `{locale}` lists `{name}` more than once"
                )));
            }
            let clash = self
                .languages
                .iter()
                .filter(|(other, _)| **other != key)
                .find_map(|(other, existing)| {
                    existing
                        .iter()
                        .position(|existing| existing == name)
                        .filter(|index| *index != month)
                        .map(|_| other)
                });
            if let Some(other) = clash {
                return Err(TrackerError::Validation(format!(
                    "month name `{name}` is already used by locale `{other}` for another month"
                )));
            }
        }
        self.insert(locale, names);
        Ok(())
    }

    fn insert(&mut self, locale: &str, names: Vec<String>) {
        self.languages.insert(normalize_locale(locale), names);
        self.index = self
            .languages
            .values()
            .flat_map(|names| {
                names
                    .iter()
                    .enumerate()
                    .map(|(month, name)| (name.clone(), month as u32))
            })
            .collect();
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    /// Name of `month` in `locale`, falling back to the default language.
    pub fn month_name(&self, locale: &str, month: u32) -> Option<&str> {
        let names = self
            .languages
            .get(&normalize_locale(locale))
            .or_else(|| self.languages.get(&self.default_locale))?;
        names.get(month as usize).map(String::as_str)
    }

    /// Name of `month` in every registered language.
    pub fn month_names(&self, month: u32) -> impl Iterator<Item = &str> {
        self.languages
            .values()
            .filter_map(move |names| names.get(month as usize).map(String::as_str))
    }

    /// Month index for a name in any registered language, case-insensitive.
    pub fn month_index(&self, name: &str) -> Option<u32> {
        self.index.get(&name.trim().to_lowercase()).copied()
    }
}

impl Default for MonthVocabulary {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Reduces a locale tag such as `es-AR` or `en_US` to its language subtag.
pub fn normalize_locale(tag: &str) -> String {
    tag.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}
