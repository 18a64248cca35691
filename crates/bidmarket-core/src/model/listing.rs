// ── Listing variants ──
//
// One engine serves every filter page. `ListingType` picks the path shape,
// the URL route, the search endpoint and which query parameters apply.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use bidmarket_api::SearchEndpoint;

use super::entity::EntityKind;

const FULL_PATH: [EntityKind; 4] = [
    EntityKind::Country,
    EntityKind::City,
    EntityKind::Category,
    EntityKind::Subcategory,
];

const CATEGORY_PATH: [EntityKind; 2] = [EntityKind::Category, EntityKind::Subcategory];

/// Which kind of listing page the filters drive.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
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
pub enum ListingType {
    /// Customer requests ("bids") filtered by location and category.
    #[default]
    Requests,
    /// Company directory filtered by location and category.
    Companies,
    /// Requests inside a single category tree, no location segments.
    Category,
}

impl ListingType {
    pub const ALL: [Self; 3] = [Self::Requests, Self::Companies, Self::Category];

    /// First path segment after the language prefix.
    pub fn route(self) -> &'static str {
        match self {
            Self::Requests => "bids",
            Self::Companies => "companies",
            Self::Category => "category",
        }
    }

    pub fn from_route(route: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.route() == route)
    }

    pub fn endpoint(self) -> SearchEndpoint {
        match self {
            Self::Requests | Self::Category => SearchEndpoint::Bids,
            Self::Companies => SearchEndpoint::Companies,
        }
    }

    /// Path dimensions in their fixed order.
    pub fn dimensions(self) -> &'static [EntityKind] {
        match self {
            Self::Requests | Self::Companies => &FULL_PATH,
            Self::Category => &CATEGORY_PATH,
        }
    }

    pub fn has_dimension(self, kind: EntityKind) -> bool {
        self.dimensions().contains(&kind)
    }

    /// Only request listings carry a budget range.
    pub fn carries_cost(self) -> bool {
        matches!(self, Self::Requests | Self::Category)
    }
}
