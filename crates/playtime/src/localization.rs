// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Localization tables and request language negotiation.
//!
//! Tables are flat `key -> string` JSON objects stored as
//! `localization/{code}.json` in the asset bundle. Strings may contain
//! positional placeholders `{0}`, `{1}`, ... filled from the arguments of a
//! `loc("key", arg0, arg1)` call.
//!
//! Lookups never fail. A key missing from the active language is looked up
//! in the fallback language, and if that misses too the key itself is
//! returned.

use crate::assets::ASSETS;
use crate::error::{PlaytimeError, Result};
use include_dir::Dir;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::{BTreeMap, HashMap};

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\{(\d+)\}").expect("placeholder pattern is valid");
}

/// Language code used when nothing else matches.
pub const DEFAULT_FALLBACK_LANGUAGE: &str = "en";

/// Per-request signals used to pick a language, strongest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageHints {
    /// `lang` query parameter.
    pub query: Option<String>,
    /// `lang` cookie.
    pub cookie: Option<String>,
    /// Raw `Accept-Language` header.
    pub accept_language: Option<String>,
}

/// Immutable set of localization tables.
#[derive(Debug, Clone)]
pub struct Localization {
    tables: BTreeMap<String, HashMap<String, String>>,
    fallback: String,
}

impl Localization {
    /// Loads the tables shipped in the asset bundle.
    pub fn builtin() -> Result<Self> {
        Self::from_dir(&ASSETS)
    }

    /// Loads every `localization/*.json` file of a bundle.
    pub fn from_dir(dir: &Dir<'_>) -> Result<Self> {
        let folder = dir
            .get_dir("localization")
            .ok_or_else(|| PlaytimeError::Asset("missing localization directory".to_string()))?;

        let mut tables = BTreeMap::new();
        for file in folder.files() {
            let path = file.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(code) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let source = file.contents_utf8().ok_or_else(|| {
                PlaytimeError::Asset(format!("{} is not valid UTF-8", path.display()))
            })?;
            let table: HashMap<String, String> = serde_json::from_str(source).map_err(|e| {
                PlaytimeError::Asset(format!("invalid localization table {}: {}", path.display(), e))
            })?;

            tables.insert(code.to_string(), table);
        }

        tracing::debug!("Loaded {} localization tables", tables.len());
        Ok(Self::from_tables(tables))
    }

    /// Builds a catalog from tables already in memory.
    pub fn from_tables<I>(tables: I) -> Self
    where
        I: IntoIterator<Item = (String, HashMap<String, String>)>,
    {
        Self {
            tables: tables.into_iter().collect(),
            fallback: DEFAULT_FALLBACK_LANGUAGE.to_string(),
        }
    }

    /// Sets the fallback language.
    pub fn with_fallback(mut self, code: impl Into<String>) -> Self {
        self.fallback = code.into();
        self
    }

    /// The fallback language code.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Supported language codes in alphabetical order.
    pub fn list(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }

    /// Returns true if a table exists for `code`.
    pub fn is_supported(&self, code: &str) -> bool {
        self.tables.contains_key(code)
    }

    /// Looks up `key` in `code` and fills placeholders from `args`.
    ///
    /// Placeholders without a matching argument are left untouched.
    pub fn localize(&self, code: &str, key: &str, args: &[String]) -> String {
        let template = self
            .lookup(code, key)
            .or_else(|| self.lookup(&self.fallback, key))
            .unwrap_or(key);

        if args.is_empty() {
            return template.to_string();
        }

        PLACEHOLDER
            .replace_all(template, |caps: &Captures| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|idx| args.get(idx))
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    /// Picks the language for a request.
    ///
    /// Order: `lang` query parameter, `lang` cookie, `Accept-Language`
    /// entries in header order. Only supported codes are accepted; the
    /// fallback language is used when nothing matches.
    pub fn negotiate(&self, hints: &LanguageHints) -> String {
        let explicit = [hints.query.as_deref(), hints.cookie.as_deref()];
        for candidate in explicit.into_iter().flatten() {
            if let Some(code) = self.match_code(candidate) {
                return code;
            }
        }

        if let Some(header) = hints.accept_language.as_deref() {
            for entry in header.split(',') {
                let tag = entry.split(';').next().unwrap_or_default().trim();
                if tag.is_empty() || tag == "*" {
                    continue;
                }
                if let Some(code) = self.match_code(tag) {
                    return code;
                }
            }
        }

        self.fallback.clone()
    }

    fn lookup(&self, code: &str, key: &str) -> Option<&str> {
        self.tables
            .get(code)
            .and_then(|table| table.get(key))
            .map(String::as_str)
    }

    fn match_code(&self, candidate: &str) -> Option<String> {
        let candidate = candidate.trim();
        if self.is_supported(candidate) {
            return Some(candidate.to_string());
        }

        let primary = candidate
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        self.is_supported(&primary).then_some(primary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn localization() -> Localization {
        let en = HashMap::from([
            ("greet".to_string(), "Hello {0}, you have {1} saves".to_string()),
            ("only_en".to_string(), "English only".to_string()),
        ]);
        let de = HashMap::from([("greet".to_string(), "Hallo {0}, du hast {1} Spielstände".to_string())]);
        Localization::from_tables([("en".to_string(), en), ("de".to_string(), de)])
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_list_is_sorted() {
        assert_eq!(localization().list(), vec!["de", "en"]);
    }

    #[test]
    fn test_positional_arguments() {
        let loc = localization();
        assert_eq!(
            loc.localize("de", "greet", &args(&["Ada", "3"])),
            "Hallo Ada, du hast 3 Spielstände"
        );
        assert_eq!(
            loc.localize("en", "greet", &args(&["Ada"])),
            "Hello Ada, you have {1} saves"
        );
    }

    #[test]
    fn test_fallback_chain() {
        let loc = localization();
        assert_eq!(loc.localize("de", "only_en", &[]), "English only");
        assert_eq!(loc.localize("fr", "only_en", &[]), "English only");
        assert_eq!(loc.localize("de", "missing.key", &[]), "missing.key");
    }

    #[test]
    fn test_custom_fallback() {
        let loc = localization().with_fallback("de");
        assert_eq!(loc.fallback(), "de");
        assert_eq!(loc.localize("fr", "greet", &args(&["A", "1"])), "Hallo A, du hast 1 Spielstände");
    }

    #[test]
    fn test_negotiate_order() {
        let loc = localization();
        let hints = LanguageHints {
            query: Some("de".to_string()),
            cookie: Some("en".to_string()),
            accept_language: Some("en-US".to_string()),
        };
        assert_eq!(loc.negotiate(&hints), "de");

        let hints = LanguageHints {
            query: Some("xx".to_string()),
            cookie: Some("de".to_string()),
            accept_language: None,
        };
        assert_eq!(loc.negotiate(&hints), "de");

        let hints = LanguageHints {
            accept_language: Some("fr-CH, fr;q=0.9, de-DE;q=0.8, en;q=0.7".to_string()),
            ..Default::default()
        };
        assert_eq!(loc.negotiate(&hints), "de");

        assert_eq!(loc.negotiate(&LanguageHints::default()), "en");
    }

    #[test]
    fn test_builtin_tables() {
        let loc = Localization::builtin().unwrap();
        assert!(loc.list().contains(&"en".to_string()));
        assert!(loc.list().contains(&"de".to_string()));
        assert_eq!(loc.localize("de", "settings.save", &[]), "Speichern");
        // Not translated: falls back to English.
        assert_eq!(loc.localize("de", "platform.core", &[]), "Core");
    }
}
