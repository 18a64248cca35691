// ── Filter selections ──
//
// A selection is what one filter panel describes: up to four entity
// references plus free text and a budget range. Draft and applied state
// are both plain `FilterSelection`s; only their handling differs.

use std::sync::Arc;

use serde::Serialize;

use super::entity::{Entity, EntityId, EntityKind};
use crate::error::CoreError;

/// Shared handle to a catalog entity.
pub type EntityRef = Arc<Entity>;

// ── CostRange ───────────────────────────────────────────────────────

/// Budget bounds for request listings. Zero means "no bound".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CostRange {
    pub min: Option<u64>,
    pub max: Option<u64>,
}

impl CostRange {
    pub fn new(min: Option<u64>, max: Option<u64>) -> Self {
        Self {
            min: min.filter(|v| *v > 0),
            max: max.filter(|v| *v > 0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        match (self.min, self.max) {
            (Some(min), Some(max)) if min > max => Err(CoreError::ValidationFailed {
                message: format!("minimum cost {min} is greater than maximum cost {max}"),
            }),
            _ => Ok(()),
        }
    }
}

// ── FilterSelection ─────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterSelection {
    pub category: Option<EntityRef>,
    pub subcategory: Option<EntityRef>,
    pub country: Option<EntityRef>,
    pub city: Option<EntityRef>,
    pub search: String,
    pub cost: CostRange,
}

impl FilterSelection {
    pub fn empty() -> Self {
        Self::default()
    }

    /// `true` when nothing narrows the listing.
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.subcategory.is_none()
            && self.country.is_none()
            && self.city.is_none()
            && self.search_term().is_none()
            && self.cost.is_empty()
    }

    /// Trimmed search text, `None` when blank.
    pub fn search_term(&self) -> Option<&str> {
        Some(self.search.trim()).filter(|s| !s.is_empty())
    }

    /// The selected entity for one dimension.
    pub fn entity(&self, kind: EntityKind) -> Option<&EntityRef> {
        match kind {
            EntityKind::Category => self.category.as_ref(),
            EntityKind::Subcategory => self.subcategory.as_ref(),
            EntityKind::Country => self.country.as_ref(),
            EntityKind::City => self.city.as_ref(),
        }
    }

    pub fn set_entity(&mut self, kind: EntityKind, entity: Option<EntityRef>) {
        let slot = match kind {
            EntityKind::Category => &mut self.category,
            EntityKind::Subcategory => &mut self.subcategory,
            EntityKind::Country => &mut self.country,
            EntityKind::City => &mut self.city,
        };
        *slot = entity;
    }

    pub fn category_id(&self) -> Option<EntityId> {
        self.category.as_ref().map(|e| e.id)
    }

    pub fn subcategory_id(&self) -> Option<EntityId> {
        self.subcategory.as_ref().map(|e| e.id)
    }

    pub fn country_id(&self) -> Option<EntityId> {
        self.country.as_ref().map(|e| e.id)
    }

    pub fn city_id(&self) -> Option<EntityId> {
        self.city.as_ref().map(|e| e.id)
    }

    /// Clear children whose parent is not the selected one.
    ///
    /// Returns `true` when something was dropped.
    pub fn enforce_hierarchy(&mut self) -> bool {
        let mut changed = false;
        if !child_fits(self.subcategory.as_ref(), self.category.as_ref()) {
            self.subcategory = None;
            changed = true;
        }
        if !child_fits(self.city.as_ref(), self.country.as_ref()) {
            self.city = None;
            changed = true;
        }
        changed
    }

    /// Check everything a commit must satisfy.
    pub fn validate(&self) -> Result<(), CoreError> {
        self.cost.validate()?;
        if !child_fits(self.subcategory.as_ref(), self.category.as_ref()) {
            return Err(CoreError::ValidationFailed {
                message: "subcategory does not belong to the selected category".into(),
            });
        }
        if !child_fits(self.city.as_ref(), self.country.as_ref()) {
            return Err(CoreError::ValidationFailed {
                message: "city does not belong to the selected country".into(),
            });
        }
        Ok(())
    }
}

fn child_fits(child: Option<&EntityRef>, parent: Option<&EntityRef>) -> bool {
    match (child, parent) {
        (None, _) => true,
        (Some(child), Some(parent)) => child.is_child_of(parent),
        (Some(_), None) => false,
    }
}
