// ── Reference entities ──
//
// Categories, subcategories, countries and cities share one shape. The
// kind decides which endpoint they come from and what their parent is.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use bidmarket_api::ReferencePath;

use super::lang::{Lang, LocalizedText};

// ── EntityId ────────────────────────────────────────────────────────

/// Backend-assigned identifier. Stable and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u64);

impl EntityId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<u64> for EntityId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

// ── EntityKind ──────────────────────────────────────────────────────

/// The four reference collections.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EntityKind {
    Category,
    Subcategory,
    Country,
    City,
}

impl EntityKind {
    pub const ALL: [Self; 4] = [Self::Category, Self::Subcategory, Self::Country, Self::City];

    /// Kind of the owning entity, for the two child kinds.
    pub fn parent_kind(self) -> Option<Self> {
        match self {
            Self::Subcategory => Some(Self::Category),
            Self::City => Some(Self::Country),
            Self::Category | Self::Country => None,
        }
    }

    pub fn reference_path(self) -> ReferencePath {
        match self {
            Self::Category => ReferencePath::Categories,
            Self::Subcategory => ReferencePath::Subcategories,
            Self::Country => ReferencePath::Countries,
            Self::City => ReferencePath::Cities,
        }
    }
}

// ── Entity ──────────────────────────────────────────────────────────

/// A reference record in domain form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub names: LocalizedText,
    #[serde(default)]
    pub slugs: LocalizedText,
    /// Older records kept a snake_case identifier instead of a slug.
    #[serde(default)]
    pub legacy_name: Option<String>,
    /// Owning category (subcategory) or country (city).
    #[serde(default)]
    pub parent_id: Option<EntityId>,
}

impl Entity {
    pub fn new(id: u64, kind: EntityKind) -> Self {
        Self {
            id: EntityId(id),
            kind,
            names: LocalizedText::new(),
            slugs: LocalizedText::new(),
            legacy_name: None,
            parent_id: None,
        }
    }

    pub fn with_name(mut self, lang: Lang, name: impl Into<String>) -> Self {
        self.names.insert(lang, name);
        self
    }

    pub fn with_slug(mut self, lang: Lang, slug: impl Into<String>) -> Self {
        self.slugs.insert(lang, slug);
        self
    }

    pub fn with_legacy_name(mut self, name: impl Into<String>) -> Self {
        self.legacy_name = Some(name.into());
        self
    }

    pub fn with_parent(mut self, parent: u64) -> Self {
        self.parent_id = Some(EntityId(parent));
        self
    }

    /// Display name through the language fallback chain.
    pub fn display_name(&self, lang: Lang) -> &str {
        self.names.resolve(lang).unwrap_or_default()
    }

    /// `true` when this entity is a direct child of `parent`.
    pub fn is_child_of(&self, parent: &Entity) -> bool {
        self.kind.parent_kind() == Some(parent.kind) && self.parent_id == Some(parent.id)
    }
}
