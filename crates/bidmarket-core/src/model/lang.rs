// ── Languages and localized text ──
//
// The backend fans every translatable field out into one key per language
// (`name_uk`, `name_en`, ...). The domain model folds those into a single
// `Lang -> String` map so every lookup shares one fallback chain.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// Supported interface languages.
///
/// Declaration order matters: it is the "first available" order used at the
/// end of every fallback chain.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Lang {
    #[default]
    Uk,
    En,
    Pl,
    Fr,
    De,
}

impl Lang {
    pub const ALL: [Self; 5] = [Self::Uk, Self::En, Self::Pl, Self::Fr, Self::De];

    /// Order in which stored slugs of other languages are tried.
    pub const SLUG_FALLBACK: [Self; 5] = [Self::En, Self::Uk, Self::Pl, Self::Fr, Self::De];

    /// Lowercase ISO code (`"uk"`, `"en"`, ...).
    pub fn code(self) -> &'static str {
        self.into()
    }

    /// Requested language, then `en`, then `uk`, then everything else in
    /// declaration order. No language appears twice.
    pub fn fallback_chain(self) -> Vec<Self> {
        let mut chain = Vec::with_capacity(Self::ALL.len());
        for lang in [self, Self::En, Self::Uk].into_iter().chain(Self::ALL) {
            if !chain.contains(&lang) {
                chain.push(lang);
            }
        }
        chain
    }
}

// ── LocalizedText ───────────────────────────────────────────────────

/// Per-language strings. Blank values behave as if absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(BTreeMap<Lang, String>);

impl LocalizedText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, lang: Lang, value: impl Into<String>) -> Self {
        self.insert(lang, value);
        self
    }

    pub fn insert(&mut self, lang: Lang, value: impl Into<String>) {
        self.0.insert(lang, value.into());
    }

    /// Exact lookup; blank strings yield `None`.
    pub fn get(&self, lang: Lang) -> Option<&str> {
        self.0
            .get(&lang)
            .map(String::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    /// Lookup through the fallback chain: requested, `en`, `uk`, then the
    /// first non-blank value in declaration order.
    pub fn resolve(&self, lang: Lang) -> Option<&str> {
        self.get(lang)
            .or_else(|| self.get(Lang::En))
            .or_else(|| self.get(Lang::Uk))
            .or_else(|| {
                self.0
                    .values()
                    .map(String::as_str)
                    .find(|s| !s.trim().is_empty())
            })
    }

    /// `true` when no language carries a non-blank value.
    pub fn is_empty(&self) -> bool {
        self.0.values().all(|s| s.trim().is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Lang, &str)> {
        self.0.iter().map(|(lang, s)| (*lang, s.as_str()))
    }
}

impl FromIterator<(Lang, String)> for LocalizedText {
    fn from_iter<I: IntoIterator<Item = (Lang, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
