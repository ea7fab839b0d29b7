//! Core catalog types for pocodec.
//! The PO reader decodes into these; external aggregators consume them.

use std::{collections::BTreeMap, fmt::Display};

use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

/// One item yielded by a parse pass.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogEntry {
    /// The catalog header (the `msgid ""` entry carrying `Key: Value` lines).
    Metadata(LocalizationMetadata),

    /// A translatable message.
    LocalizedString(LocalizedString),
}

impl CatalogEntry {
    pub fn as_metadata(&self) -> Option<&LocalizationMetadata> {
        match self {
            CatalogEntry::Metadata(metadata) => Some(metadata),
            CatalogEntry::LocalizedString(_) => None,
        }
    }

    pub fn as_localized_string(&self) -> Option<&LocalizedString> {
        match self {
            CatalogEntry::Metadata(_) => None,
            CatalogEntry::LocalizedString(string) => Some(string),
        }
    }
}

/// A whole catalog collected from an entry stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Catalog {
    /// The header of the catalog, if one was recognized.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub metadata: Option<LocalizationMetadata>,

    /// All localized strings, in input order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub strings: Vec<LocalizedString>,
}

impl Catalog {
    pub(crate) fn add_entry(&mut self, entry: CatalogEntry) {
        match entry {
            CatalogEntry::Metadata(metadata) => self.metadata = Some(metadata),
            CatalogEntry::LocalizedString(string) => self.strings.push(string),
        }
    }

    pub fn find_string(&self, singular: &str) -> Option<&LocalizedString> {
        self.strings
            .iter()
            .find(|s| s.untranslated_singular_value.as_deref() == Some(singular))
    }
}

impl FromIterator<CatalogEntry> for Catalog {
    fn from_iter<T: IntoIterator<Item = CatalogEntry>>(iter: T) -> Self {
        let mut catalog = Catalog::default();
        for entry in iter {
            catalog.add_entry(entry);
        }
        catalog
    }
}

/// Header-level metadata of a catalog.
///
/// Keys keep the spelling and order they had in the file; lookups ignore case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LocalizationMetadata {
    entries: Vec<(String, String)>,
}

impl LocalizationMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a header, replacing the value of an existing key in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&key))
        {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `Language` header, if present and non-empty.
    pub fn language(&self) -> Option<&str> {
        self.get("language").filter(|lang| !lang.is_empty())
    }

    /// Parses the `Language` header. Gettext spells regions with `_` (`pt_BR`), so
    /// those are normalized to BCP 47 separators first.
    pub fn language_identifier(&self) -> Option<LanguageIdentifier> {
        self.language()?.replace('_', "-").parse().ok()
    }

    /// Number of plural forms declared by `Plural-Forms: nplurals=N; ...`.
    pub fn plural_count(&self) -> Option<usize> {
        self.get("plural-forms")?.split(';').find_map(|part| {
            let (key, value) = part.split_once('=')?;
            if key.trim() == "nplurals" {
                value.trim().parse().ok()
            } else {
                None
            }
        })
    }
}

impl Display for LocalizationMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Metadata {{ {} }}",
            self.entries
                .iter()
                .map(|(k, v)| format!("{}: {}", k, v))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

/// A single translatable message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LocalizedString {
    /// Source text (`msgid`). Only `None` when the entry had no `msgid` at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub untranslated_singular_value: Option<String>,

    /// Plural source text (`msgid_plural`).
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub untranslated_plural_value: Option<String>,

    /// Map from plural index → translation. `msgstr` is index 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub translated_values: Option<BTreeMap<usize, String>>,

    /// Disambiguating context (`msgctxt`).
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub context: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub gender: Option<Gender>,

    /// `#.` comments, newline-joined.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub developer_comments: Option<String>,

    /// `# ` comments, newline-joined.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub translator_comments: Option<String>,

    /// Source locations from `#:` comments.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub references: Option<Vec<String>>,

    /// The last `*-format` flag, e.g. `c-format`.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub string_format_hint: Option<String>,

    /// Every `#,` flag in comment order.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub flags: Option<Vec<String>>,
}

impl LocalizedString {
    /// Translations ordered by plural index.
    pub fn translations(&self) -> Vec<&str> {
        self.translated_values
            .iter()
            .flat_map(|values| values.values().map(String::as_str))
            .collect()
    }

    pub fn translation(&self, index: usize) -> Option<&str> {
        self.translated_values.as_ref()?.get(&index).map(String::as_str)
    }

    pub fn is_plural(&self) -> bool {
        self.untranslated_plural_value.is_some()
    }

    pub fn is_fuzzy(&self) -> bool {
        self.has_flag("fuzzy")
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags
            .as_ref()
            .is_some_and(|flags| flags.iter().any(|f| f == flag))
    }
}

impl Display for LocalizedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LocalizedString {{ id: {}, translations: {:?} }}",
            self.untranslated_singular_value.as_deref().unwrap_or_default(),
            self.translations()
        )
    }
}

/// Grammatical gender inferred from a message context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Masculine,
    Feminine,
}
