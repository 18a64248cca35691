//! Localized catalog filter and slug-resolution engine.
//!
//! Converts between the backend's numeric entity ids and per-language URL
//! path segments, and keeps a two-phase (draft / applied) filter state so
//! listing requests only fire on an explicit commit.
//!
//! - **[`CatalogStore`]** loads categories, subcategories, countries and
//!   cities once per session into an immutable [`Catalog`].
//! - **[`slug`]** maps entities to slugs and back, with a per-language
//!   fallback chain and Unicode-aware slug derivation.
//! - **[`build_path`] / [`parse_path`]** turn a [`FilterSelection`] into a
//!   [`FilterPath`] and back. [`Location`] splits pasted hrefs.
//! - **[`FilterState`]** holds draft and applied selections; commits hand
//!   back a [`Commit`].
//! - **[`ListingFetcher`]** maps the applied selection to search parameters
//!   and discards stale responses.
//! - **[`FilterEngine`]** ties it all together behind a [`HistorySink`].

pub mod catalog;
pub mod config;
pub mod convert;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod model;
pub mod path;
pub mod slug;
pub mod state;

// ── Primary re-exports ──────────────────────────────────────────────
pub use catalog::{Catalog, CatalogStore, ReferenceSource};
pub use config::{MarketConfig, TlsVerification};
pub use engine::{FilterEngine, HistorySink};
pub use error::CoreError;
pub use fetch::{ListingFetcher, ListingSource, ListingState, listing_params};
pub use path::{FilterPath, Location, build_path, parse_path};
pub use slug::{entity_to_slug, slug_to_entity, slug_to_entity_id, slugify};
pub use state::{Commit, DraftEdit, FilterPhase, FilterState};

pub use model::{
    CostRange, Entity, EntityId, EntityKind, EntityRef, FilterSelection, Lang, ListingType,
    LocalizedText,
};

pub use bidmarket_api::SearchPage;
