// ── Reference catalog ──
//
// Immutable snapshot of the four reference collections. Built once per
// session by `CatalogStore` and shared behind an `Arc`; every parse and
// build reads from it without locking.

mod store;

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::model::{Entity, EntityId, EntityKind, EntityRef};

pub use store::{CatalogStore, ReferenceSource};

/// The four reference collections, in backend order.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Arc<[EntityRef]>,
    subcategories: Arc<[EntityRef]>,
    countries: Arc<[EntityRef]>,
    cities: Arc<[EntityRef]>,
    loaded_at: DateTime<Utc>,
}

impl Catalog {
    /// Assemble a catalog, dropping children whose parent is missing.
    pub fn new(
        categories: Vec<Entity>,
        subcategories: Vec<Entity>,
        countries: Vec<Entity>,
        cities: Vec<Entity>,
    ) -> Self {
        let category_ids: HashSet<EntityId> = categories.iter().map(|e| e.id).collect();
        let country_ids: HashSet<EntityId> = countries.iter().map(|e| e.id).collect();

        Self {
            subcategories: keep_attached(subcategories, &category_ids),
            cities: keep_attached(cities, &country_ids),
            categories: share(categories),
            countries: share(countries),
            loaded_at: Utc::now(),
        }
    }

    /// A catalog with nothing in it.
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new(), Vec::new())
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn collection(&self, kind: EntityKind) -> &[EntityRef] {
        match kind {
            EntityKind::Category => &self.categories,
            EntityKind::Subcategory => &self.subcategories,
            EntityKind::Country => &self.countries,
            EntityKind::City => &self.cities,
        }
    }

    pub fn categories(&self) -> &[EntityRef] {
        &self.categories
    }

    pub fn subcategories(&self) -> &[EntityRef] {
        &self.subcategories
    }

    pub fn countries(&self) -> &[EntityRef] {
        &self.countries
    }

    pub fn cities(&self) -> &[EntityRef] {
        &self.cities
    }

    pub fn get(&self, kind: EntityKind, id: EntityId) -> Option<&EntityRef> {
        self.collection(kind).iter().find(|e| e.id == id)
    }

    /// Children of `parent` in collection order. Empty for leaf kinds.
    pub fn children_of<'a>(&'a self, parent: &'a Entity) -> impl Iterator<Item = &'a EntityRef> {
        let child_kind = match parent.kind {
            EntityKind::Category => Some(EntityKind::Subcategory),
            EntityKind::Country => Some(EntityKind::City),
            EntityKind::Subcategory | EntityKind::City => None,
        };
        let children = child_kind.map_or(&[][..], |kind| self.collection(kind));
        children.iter().filter(move |child| child.is_child_of(parent))
    }

    /// Total number of entities across all four collections.
    pub fn len(&self) -> usize {
        EntityKind::ALL
            .into_iter()
            .map(|kind| self.collection(kind).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn share(entities: Vec<Entity>) -> Arc<[EntityRef]> {
    entities.into_iter().map(Arc::new).collect()
}

fn keep_attached(entities: Vec<Entity>, parents: &HashSet<EntityId>) -> Arc<[EntityRef]> {
    entities
        .into_iter()
        .filter(|entity| {
            let attached = entity.parent_id.is_some_and(|p| parents.contains(&p));
            if !attached {
                warn!(
                    kind = %entity.kind,
                    id = %entity.id,
                    parent = ?entity.parent_id.map(EntityId::get),
                    "dropping reference record without a loaded parent"
                );
            }
            attached
        })
        .map(Arc::new)
        .collect()
}
