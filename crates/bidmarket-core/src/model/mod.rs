// ── Domain model ──

pub mod entity;
pub mod lang;
pub mod listing;
pub mod selection;

pub use entity::{Entity, EntityId, EntityKind};
pub use lang::{Lang, LocalizedText};
pub use listing::ListingType;
pub use selection::{CostRange, EntityRef, FilterSelection};
