use super::{FilterPath, MAX_COST_PARAM, MIN_COST_PARAM, SEARCH_PARAM};
use crate::model::{FilterSelection, Lang, ListingType};
use crate::slug::{ALL, entity_to_slug};

/// Compose the path for an applied selection.
///
/// One segment per listing dimension, in fixed order, each the entity's
/// slug or `"all"`. Query pairs come in `search`, `min_cost`, `max_cost`
/// order and only when they carry a value; cost pairs are left out for
/// listings without a budget.
pub fn build_path(selection: &FilterSelection, lang: Lang, listing: ListingType) -> FilterPath {
    let segments = listing
        .dimensions()
        .iter()
        .map(|kind| {
            selection
                .entity(*kind)
                .map_or_else(|| ALL.to_owned(), |entity| entity_to_slug(entity, lang))
        })
        .collect();

    let mut query = Vec::new();
    if let Some(term) = selection.search_term() {
        query.push((SEARCH_PARAM.to_owned(), term.to_owned()));
    }
    if listing.carries_cost() {
        if let Some(min) = selection.cost.min {
            query.push((MIN_COST_PARAM.to_owned(), min.to_string()));
        }
        if let Some(max) = selection.cost.max {
            query.push((MAX_COST_PARAM.to_owned(), max.to_string()));
        }
    }

    FilterPath { segments, query }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{CostRange, Entity, EntityKind};

    fn selection() -> FilterSelection {
        FilterSelection {
            category: Some(Arc::new(
                Entity::new(1, EntityKind::Category).with_name(Lang::En, "Home Repair"),
            )),
            country: Some(Arc::new(
                Entity::new(7, EntityKind::Country)
                    .with_name(Lang::Uk, "Україна")
                    .with_slug(Lang::En, "ukraine"),
            )),
            search: "  roof  ".into(),
            cost: CostRange::new(Some(100), Some(0)),
            ..FilterSelection::default()
        }
    }

    #[test]
    fn full_path_order() {
        let path = build_path(&selection(), Lang::En, ListingType::Requests);
        assert_eq!(path.segments, vec!["ukraine", "all", "home-repair", "all"]);
        assert_eq!(
            path.query,
            vec![
                ("search".to_owned(), "roof".to_owned()),
                ("min_cost".to_owned(), "100".to_owned()),
            ]
        );
    }

    #[test]
    fn category_listing_skips_location() {
        let path = build_path(&selection(), Lang::Uk, ListingType::Category);
        assert_eq!(path.segments, vec!["home-repair", "all"]);
    }

    #[test]
    fn companies_drop_cost() {
        let path = build_path(&selection(), Lang::En, ListingType::Companies);
        assert_eq!(path.query, vec![("search".to_owned(), "roof".to_owned())]);
    }

    #[test]
    fn empty_selection_is_all_segments() {
        let path = build_path(&FilterSelection::empty(), Lang::Fr, ListingType::Requests);
        assert_eq!(path.segments, vec![ALL; 4]);
        assert!(path.query.is_empty());
    }
}
