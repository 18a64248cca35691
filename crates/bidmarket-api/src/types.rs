// Wire types for the marketplace backend.
//
// These mirror the JSON exactly, including the per-language field fan-out
// (`name_uk`, `name_en`, ...). `bidmarket-core` converts them into its
// language-keyed domain model.

use serde::{Deserialize, Serialize};

/// A reference record as returned by `/categories`, `/subcategories`,
/// `/countries` and `/cities`.
///
/// All four endpoints share this shape; the parent link is `category_id`
/// for subcategories and `country_id` for cities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntity {
    pub id: u64,

    /// Legacy snake_case identifier kept by older records.
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub name_uk: Option<String>,
    #[serde(default)]
    pub name_en: Option<String>,
    #[serde(default)]
    pub name_pl: Option<String>,
    #[serde(default)]
    pub name_fr: Option<String>,
    #[serde(default)]
    pub name_de: Option<String>,

    #[serde(default)]
    pub slug_uk: Option<String>,
    #[serde(default)]
    pub slug_en: Option<String>,
    #[serde(default)]
    pub slug_pl: Option<String>,
    #[serde(default)]
    pub slug_fr: Option<String>,
    #[serde(default)]
    pub slug_de: Option<String>,

    #[serde(default, alias = "parent_id")]
    pub category_id: Option<u64>,
    #[serde(default)]
    pub country_id: Option<u64>,
}

/// Response body of the listing search endpoints.
///
/// Items are passed through untouched; their shape belongs to the
/// rendering layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
    #[serde(default)]
    pub total: u64,
}
