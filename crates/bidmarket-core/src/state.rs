// ── Draft / applied filter state ──
//
// Two selections side by side. The draft absorbs every edit; only a commit
// (apply, submit, quick filter, reset) replaces the applied selection.
// This type is synchronous and side-effect free: commits hand back a
// `Commit` and the engine decides what to push and fetch.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::CoreError;
use crate::model::{CostRange, EntityId, EntityKind, FilterSelection, Lang, ListingType};
use crate::path::{FilterPath, build_path, parse_path};

/// Where the filter panel is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum FilterPhase {
    /// Catalog not loaded yet.
    Idle,
    Ready,
    /// Catalog load failed; filters stay disabled.
    Unavailable { message: String },
}

/// One change to the draft selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftEdit {
    /// Pick an entity by id. Picking a child also picks its parent.
    Select(EntityKind, EntityId),
    /// Clear one dimension. Clearing a parent clears its child.
    Clear(EntityKind),
    Search(String),
    MinCost(Option<u64>),
    MaxCost(Option<u64>),
}

/// What a commit produced: the new applied selection and its address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
    pub selection: Arc<FilterSelection>,
    pub lang: Lang,
    pub listing: ListingType,
    pub path: FilterPath,
    pub href: String,
}

pub struct FilterState {
    phase: FilterPhase,
    catalog: Option<Arc<Catalog>>,
    lang: Lang,
    listing: ListingType,
    draft: FilterSelection,
    applied: Arc<FilterSelection>,
}

impl FilterState {
    pub fn new(lang: Lang, listing: ListingType) -> Self {
        Self {
            phase: FilterPhase::Idle,
            catalog: None,
            lang,
            listing,
            draft: FilterSelection::empty(),
            applied: Arc::new(FilterSelection::empty()),
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn phase(&self) -> &FilterPhase {
        &self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == FilterPhase::Ready
    }

    pub fn catalog(&self) -> Option<&Arc<Catalog>> {
        self.catalog.as_ref()
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    pub fn listing(&self) -> ListingType {
        self.listing
    }

    pub fn draft(&self) -> &FilterSelection {
        &self.draft
    }

    pub fn applied(&self) -> Arc<FilterSelection> {
        Arc::clone(&self.applied)
    }

    /// `true` when the draft holds edits that were not applied.
    pub fn is_dirty(&self) -> bool {
        self.draft != *self.applied
    }

    /// Path of the applied selection.
    pub fn current_path(&self) -> FilterPath {
        build_path(&self.applied, self.lang, self.listing)
    }

    pub fn current_href(&self) -> String {
        self.current_path().to_href(self.lang, self.listing)
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Enter `Ready`: parse the location and seed both selections.
    pub fn load<S: AsRef<str>>(
        &mut self,
        catalog: Arc<Catalog>,
        segments: &[S],
        query: &[(String, String)],
    ) {
        let selection = parse_path(segments, query, self.lang, &catalog, self.listing);
        self.draft = selection.clone();
        self.applied = Arc::new(selection);
        self.catalog = Some(catalog);
        self.phase = FilterPhase::Ready;
    }

    /// Enter `Unavailable` with the message for the error banner.
    pub fn mark_unavailable(&mut self, message: impl Into<String>) {
        self.catalog = None;
        self.phase = FilterPhase::Unavailable {
            message: message.into(),
        };
    }

    // ── Draft edits ──────────────────────────────────────────────────

    /// Change the draft. Never touches the applied selection.
    pub fn edit_draft(&mut self, edit: DraftEdit) -> Result<(), CoreError> {
        let catalog = self.ready_catalog()?;
        let listing = self.listing;
        apply_edit(&mut self.draft, edit, &catalog, listing)
    }

    /// Throw away draft edits.
    pub fn discard_draft(&mut self) -> Result<(), CoreError> {
        self.ready_catalog()?;
        self.draft = FilterSelection::clone(&self.applied);
        Ok(())
    }

    // ── Commits ──────────────────────────────────────────────────────

    /// Validate the draft and make it the applied selection.
    pub fn apply(&mut self) -> Result<Commit, CoreError> {
        self.ready_catalog()?;
        self.draft.validate()?;
        self.applied = Arc::new(self.draft.clone());
        Ok(self.commit())
    }

    /// Enter-key path. Same validation and effects as [`apply`](Self::apply).
    pub fn submit(&mut self) -> Result<Commit, CoreError> {
        self.apply()
    }

    /// Edit and apply in one step. On failure the draft is left unchanged.
    pub fn quick_filter(&mut self, edit: DraftEdit) -> Result<Commit, CoreError> {
        let catalog = self.ready_catalog()?;
        let mut draft = self.draft.clone();
        apply_edit(&mut draft, edit, &catalog, self.listing)?;
        draft.validate()?;
        self.draft = draft;
        self.applied = Arc::new(self.draft.clone());
        Ok(self.commit())
    }

    /// Clear both selections.
    pub fn reset(&mut self) -> Result<Commit, CoreError> {
        self.ready_catalog()?;
        self.draft = FilterSelection::empty();
        self.applied = Arc::new(FilterSelection::empty());
        Ok(self.commit())
    }

    /// Re-address the applied selection in another language.
    ///
    /// Selections hold entities, not slugs, so nothing is re-resolved.
    pub fn switch_language(&mut self, lang: Lang) -> Result<Commit, CoreError> {
        self.ready_catalog()?;
        self.lang = lang;
        Ok(self.commit())
    }

    fn commit(&self) -> Commit {
        let path = self.current_path();
        let href = path.to_href(self.lang, self.listing);
        debug!(%href, "filters committed");
        Commit {
            selection: Arc::clone(&self.applied),
            lang: self.lang,
            listing: self.listing,
            path,
            href,
        }
    }

    fn ready_catalog(&self) -> Result<Arc<Catalog>, CoreError> {
        match (&self.phase, &self.catalog) {
            (FilterPhase::Ready, Some(catalog)) => Ok(Arc::clone(catalog)),
            _ => Err(CoreError::CatalogNotLoaded),
        }
    }
}

fn apply_edit(
    draft: &mut FilterSelection,
    edit: DraftEdit,
    catalog: &Catalog,
    listing: ListingType,
) -> Result<(), CoreError> {
    match edit {
        DraftEdit::Select(kind, id) => {
            ensure_dimension(listing, kind)?;
            let entity = catalog
                .get(kind, id)
                .cloned()
                .ok_or(CoreError::UnknownEntity { kind, id })?;
            if let (Some(parent_kind), Some(parent_id)) = (kind.parent_kind(), entity.parent_id) {
                let parent = catalog
                    .get(parent_kind, parent_id)
                    .cloned()
                    .ok_or(CoreError::UnknownEntity {
                        kind: parent_kind,
                        id: parent_id,
                    })?;
                draft.set_entity(parent_kind, Some(parent));
            }
            draft.set_entity(kind, Some(entity));
            draft.enforce_hierarchy();
        }
        DraftEdit::Clear(kind) => {
            ensure_dimension(listing, kind)?;
            draft.set_entity(kind, None);
            draft.enforce_hierarchy();
        }
        DraftEdit::Search(text) => draft.search = text,
        DraftEdit::MinCost(min) => {
            ensure_cost(listing)?;
            draft.cost = CostRange::new(min, draft.cost.max);
        }
        DraftEdit::MaxCost(max) => {
            ensure_cost(listing)?;
            draft.cost = CostRange::new(draft.cost.min, max);
        }
    }
    Ok(())
}

fn ensure_dimension(listing: ListingType, kind: EntityKind) -> Result<(), CoreError> {
    if listing.has_dimension(kind) {
        Ok(())
    } else {
        Err(CoreError::ValidationFailed {
            message: format!("{listing} listings have no {kind} filter"),
        })
    }
}

fn ensure_cost(listing: ListingType) -> Result<(), CoreError> {
    if listing.carries_cost() {
        Ok(())
    } else {
        Err(CoreError::ValidationFailed {
            message: format!("{listing} listings have no cost filter"),
        })
    }
}
