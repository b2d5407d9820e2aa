//! Locales and embedded UI message tables.
//!
//! The site ships with English and Spanish message tables compiled into the
//! binary. Lookup uses dotted keys (`"nav.home"`); a key missing from a
//! locale falls back to English, and a key missing everywhere resolves to
//! the key itself so a typo shows up on the page instead of crashing it.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Embedded message tables, one JSON document per locale.
const EN_MESSAGES: &str = include_str!("../messages/en.json");
const ES_MESSAGES: &str = include_str!("../messages/es.json");

/// A supported site locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English (the fallback locale).
    #[default]
    En,
    /// Spanish.
    Es,
}

impl Locale {
    /// Every supported locale, in display order.
    pub const ALL: [Self; 2] = [Self::En, Self::Es];

    /// The locale's URL segment / BCP 47 tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized locale tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown locale: {0}")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "es" => Ok(Self::Es),
            other => Err(UnknownLocale(other.to_owned())),
        }
    }
}

/// Error loading the embedded message tables.
#[derive(Debug, thiserror::Error)]
#[error("message table for {locale} is invalid: {source}")]
pub struct MessagesError {
    locale: Locale,
    #[source]
    source: serde_json::Error,
}

/// Parsed message tables for all locales.
#[derive(Debug, Clone)]
pub struct Messages {
    tables: HashMap<Locale, serde_json::Value>,
}

impl Messages {
    /// Parse the embedded message tables.
    ///
    /// # Errors
    ///
    /// Returns an error if any embedded table is not valid JSON; this is a
    /// build defect, caught at startup.
    pub fn load() -> Result<Self, MessagesError> {
        let mut tables = HashMap::new();
        for (locale, raw) in [(Locale::En, EN_MESSAGES), (Locale::Es, ES_MESSAGES)] {
            let table: serde_json::Value = serde_json::from_str(raw)
                .map_err(|source| MessagesError { locale, source })?;
            tables.insert(locale, table);
        }
        Ok(Self { tables })
    }

    /// Look up a dotted key (`"contact.errors.emailInvalid"`) for a locale.
    ///
    /// Falls back to English for keys the locale does not translate, and to
    /// the key itself when no table has it.
    #[must_use]
    pub fn get<'a>(&'a self, locale: Locale, key: &'a str) -> &'a str {
        self.lookup(locale, key)
            .or_else(|| self.lookup(Locale::En, key))
            .unwrap_or(key)
    }

    fn lookup(&self, locale: Locale, key: &str) -> Option<&str> {
        let mut node = self.tables.get(&locale)?;
        for part in key.split('.') {
            node = node.get(part)?;
        }
        node.as_str()
    }
}
