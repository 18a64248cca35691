// ── Slug codec ──
//
// Pure conversions between catalog entities and per-language URL segments.
// Slug derivation is Unicode-aware: Cyrillic and Polish names keep their
// letters instead of collapsing to nothing.

use crate::model::{Entity, EntityId, EntityRef, Lang};

/// Path segment meaning "no filter on this dimension".
pub const ALL: &str = "all";

/// Turn display text into a URL segment.
///
/// Lower-cases, drops everything except letters, digits, whitespace,
/// hyphens and underscores, then joins the remaining words with single
/// hyphens. May return an empty string.
pub fn slugify(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_separator = false;

    for c in lowered.chars() {
        if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_separator = true;
        }
    }

    slug
}

/// Canonical slug of `entity` in `lang`.
///
/// Stored slug for `lang`, then stored slugs in `en, uk, pl, fr, de` order,
/// then a slug derived from the display name, then [`ALL`].
pub fn entity_to_slug(entity: &Entity, lang: Lang) -> String {
    let stored = std::iter::once(lang)
        .chain(Lang::SLUG_FALLBACK.into_iter().filter(|l| *l != lang))
        .find_map(|l| entity.slugs.get(l));
    if let Some(slug) = stored {
        return slug.trim().to_owned();
    }

    let derived = entity.names.resolve(lang).map(slugify).unwrap_or_default();
    if derived.is_empty() {
        ALL.to_owned()
    } else {
        derived
    }
}

/// First entity in `collection` that `slug` names in `lang`.
///
/// An entity matches on its stored slug for `lang`, on its legacy
/// snake_case name (with the slug's hyphens read as underscores), or on
/// its recomputed canonical slug. `"all"` and empty slugs match nothing.
pub fn slug_to_entity<'a, I>(slug: &str, lang: Lang, collection: I) -> Option<&'a EntityRef>
where
    I: IntoIterator<Item = &'a EntityRef>,
{
    if slug.is_empty() || slug == ALL {
        return None;
    }
    let legacy = slug.replace('-', "_");

    collection.into_iter().find(|entity| {
        entity.slugs.get(lang).is_some_and(|s| s.trim() == slug)
            || entity.legacy_name.as_deref() == Some(legacy.as_str())
            || entity_to_slug(entity, lang) == slug
    })
}

/// Id of the entity `slug` names, `None` for "no filter".
pub fn slug_to_entity_id(slug: &str, lang: Lang, collection: &[EntityRef]) -> Option<EntityId> {
    slug_to_entity(slug, lang, collection).map(|e| e.id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::EntityKind;

    fn category(id: u64) -> Entity {
        Entity::new(id, EntityKind::Category)
    }

    // ── slugify ─────────────────────────────────────────────────────

    #[test]
    fn slugify_basic_ascii() {
        assert_eq!(slugify("  Home Repair  "), "home-repair");
        assert_eq!(slugify("Cars & Trucks"), "cars-trucks");
        assert_eq!(slugify("a -- b__c"), "a-b-c");
        assert_eq!(slugify("-Leading and trailing-"), "leading-and-trailing");
    }

    #[test]
    fn slugify_underscores_separate_words() {
        assert_eq!(slugify("a_b"), "a-b");
        assert_eq!(slugify("home_repair"), "home-repair");
        assert_eq!(slugify("__x__"), "x");
    }

    #[test]
    fn slugify_keeps_unicode_letters() {
        assert_eq!(slugify("Електрика"), "електрика");
        assert_eq!(slugify("Ремонт квартир"), "ремонт-квартир");
        assert_eq!(slugify("Łódź Żółć"), "łódź-żółć");
        assert_eq!(slugify("Straße 24/7"), "straße-247");
    }

    #[test]
    fn slugify_symbols_only_is_empty() {
        assert_eq!(slugify("!!! ???"), "");
        assert_eq!(slugify(""), "");
    }

    // ── entity_to_slug ──────────────────────────────────────────────

    #[test]
    fn stored_slug_for_language_wins() {
        let e = category(1)
            .with_name(Lang::Uk, "Ремонт")
            .with_slug(Lang::Uk, "remont")
            .with_slug(Lang::En, "repair");
        assert_eq!(entity_to_slug(&e, Lang::Uk), "remont");
        assert_eq!(entity_to_slug(&e, Lang::En), "repair");
    }

    #[test]
    fn stored_slug_fallback_order() {
        let e = category(1)
            .with_name(Lang::Pl, "Remont")
            .with_slug(Lang::De, "reparatur")
            .with_slug(Lang::Uk, "remont-uk");
        // en missing, uk comes before de
        assert_eq!(entity_to_slug(&e, Lang::Pl), "remont-uk");
    }

    #[test]
    fn english_name_fallback() {
        let e = category(1).with_name(Lang::En, "Home Repair");
        assert_eq!(entity_to_slug(&e, Lang::Uk), "home-repair");
    }

    #[test]
    fn unicode_name_slug() {
        let e = category(1).with_name(Lang::Uk, "Електрика");
        assert_eq!(entity_to_slug(&e, Lang::Uk), "електрика");
    }

    #[test]
    fn symbol_name_becomes_all() {
        let e = category(1).with_name(Lang::En, "***");
        assert_eq!(entity_to_slug(&e, Lang::En), ALL);
        assert_eq!(entity_to_slug(&category(2), Lang::En), ALL);
    }

    // ── slug_to_entity_id ───────────────────────────────────────────

    fn collection() -> Vec<EntityRef> {
        vec![
            Arc::new(
                category(1)
                    .with_name(Lang::Uk, "Ремонт")
                    .with_name(Lang::En, "Home Repair")
                    .with_slug(Lang::Uk, "remont"),
            ),
            Arc::new(
                category(2)
                    .with_name(Lang::En, "Beauty & Health")
                    .with_legacy_name("beauty_salons"),
            ),
            Arc::new(category(3).with_name(Lang::Uk, "Електрика")),
            Arc::new(category(4).with_name(Lang::En, "Home Repair")),
            Arc::new(category(5).with_name(Lang::En, "Home Repair")),
        ]
    }

    #[test]
    fn sentinel_and_empty_resolve_to_none() {
        let col = collection();
        assert_eq!(slug_to_entity_id(ALL, Lang::En, &col), None);
        assert_eq!(slug_to_entity_id("", Lang::En, &col), None);
    }

    #[test]
    fn matches_stored_slug() {
        let col = collection();
        assert_eq!(slug_to_entity_id("remont", Lang::Uk, &col), Some(EntityId::new(1)));
    }

    #[test]
    fn matches_legacy_snake_case_name() {
        let col = collection();
        assert_eq!(
            slug_to_entity_id("beauty-salons", Lang::Pl, &col),
            Some(EntityId::new(2))
        );
    }

    #[test]
    fn matches_recomputed_slug() {
        let col = collection();
        assert_eq!(slug_to_entity_id("електрика", Lang::Uk, &col), Some(EntityId::new(3)));
        // no en name, so the en slug is derived from the uk one
        assert_eq!(
            slug_to_entity_id("електрика", Lang::En, &col),
            Some(EntityId::new(3))
        );
    }

    #[test]
    fn ties_go_to_collection_order() {
        let col = collection();
        // entity 1 is named "Home Repair" too, but its stored uk slug wins
        assert_eq!(
            slug_to_entity_id("home-repair", Lang::En, &col),
            Some(EntityId::new(4))
        );
    }

    #[test]
    fn unknown_slug_is_none() {
        let col = collection();
        assert_eq!(slug_to_entity_id("gardening", Lang::En, &col), None);
    }

    #[test]
    fn round_trip_for_every_entity_and_language() {
        let col: Vec<EntityRef> = vec![
            Arc::new(
                category(10)
                    .with_name(Lang::Uk, "Сантехніка")
                    .with_name(Lang::En, "Plumbing")
                    .with_name(Lang::Pl, "Hydraulika"),
            ),
            Arc::new(category(11).with_name(Lang::De, "Gartenpflege").with_slug(Lang::Fr, "jardin")),
            Arc::new(category(12).with_name(Lang::En, "IT & Software")),
            Arc::new(category(13).with_name(Lang::Fr, "Déménagement")),
        ];

        for entity in &col {
            for lang in Lang::ALL {
                let slug = entity_to_slug(entity, lang);
                assert_eq!(
                    slug_to_entity_id(&slug, lang, &col),
                    Some(entity.id),
                    "round trip failed for {} in {lang} via {slug:?}",
                    entity.id
                );
            }
        }
    }
}
