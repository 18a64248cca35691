use tracing::debug;

use super::{MAX_COST_PARAM, MIN_COST_PARAM, SEARCH_PARAM, query_value};
use crate::catalog::Catalog;
use crate::model::{CostRange, EntityRef, FilterSelection, Lang, ListingType};
use crate::slug::{ALL, slug_to_entity};

/// Resolve path segments and query pairs against the catalog.
///
/// Never fails. Segments are read in the listing's dimension order and
/// missing ones mean "all". Children only resolve among the children of
/// the resolved parent, so an orphan or mismatched child is dropped.
pub fn parse_path<S: AsRef<str>>(
    segments: &[S],
    query: &[(String, String)],
    lang: Lang,
    catalog: &Catalog,
    listing: ListingType,
) -> FilterSelection {
    let mut selection = FilterSelection::empty();

    for (kind, slug) in listing
        .dimensions()
        .iter()
        .copied()
        .zip(segments.iter().map(AsRef::as_ref))
    {
        let resolved: Option<EntityRef> = match kind.parent_kind() {
            None => slug_to_entity(slug, lang, catalog.collection(kind)).cloned(),
            Some(parent_kind) => selection
                .entity(parent_kind)
                .cloned()
                .and_then(|parent| slug_to_entity(slug, lang, catalog.children_of(&parent)).cloned()),
        };
        if resolved.is_none() && !slug.is_empty() && slug != ALL {
            debug!(%kind, slug, %lang, "slug did not resolve, filter dropped");
        }
        selection.set_entity(kind, resolved);
    }

    if let Some(search) = query_value(query, SEARCH_PARAM) {
        selection.search = search.to_owned();
    }
    if listing.carries_cost() {
        let cost = CostRange::new(
            cost_param(query, MIN_COST_PARAM),
            cost_param(query, MAX_COST_PARAM),
        );
        match cost.validate() {
            Ok(()) => selection.cost = cost,
            Err(e) => debug!(error = %e, "ignoring cost range from location"),
        }
    }

    selection
}

fn cost_param(query: &[(String, String)], key: &str) -> Option<u64> {
    let raw = query_value(query, key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(key, raw, error = %e, "ignoring unparsable cost");
            None
        }
    }
}
