// ── API-to-domain conversions ──
//
// Folds the backend's `name_{lang}` / `slug_{lang}` field fan-out into
// `LocalizedText` maps and attaches the parent link that matches the kind.

use bidmarket_api::RawEntity;

use crate::model::{Entity, EntityId, EntityKind, Lang, LocalizedText};

fn localized(fields: [(Lang, Option<String>); 5]) -> LocalizedText {
    fields
        .into_iter()
        .filter_map(|(lang, value)| value.map(|v| (lang, v)))
        .collect()
}

impl Entity {
    /// Convert a raw reference record of the given kind.
    ///
    /// The parent link is taken from `category_id` for subcategories and
    /// `country_id` for cities; other kinds never carry one.
    pub fn from_raw(kind: EntityKind, raw: RawEntity) -> Self {
        let names = localized([
            (Lang::Uk, raw.name_uk),
            (Lang::En, raw.name_en),
            (Lang::Pl, raw.name_pl),
            (Lang::Fr, raw.name_fr),
            (Lang::De, raw.name_de),
        ]);
        let slugs = localized([
            (Lang::Uk, raw.slug_uk),
            (Lang::En, raw.slug_en),
            (Lang::Pl, raw.slug_pl),
            (Lang::Fr, raw.slug_fr),
            (Lang::De, raw.slug_de),
        ]);
        let parent_id = match kind {
            EntityKind::Subcategory => raw.category_id,
            EntityKind::City => raw.country_id,
            EntityKind::Category | EntityKind::Country => None,
        };

        Self {
            id: EntityId::new(raw.id),
            kind,
            names,
            slugs,
            legacy_name: raw.name.filter(|n| !n.trim().is_empty()),
            parent_id: parent_id.map(EntityId::new),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_out_is_folded_into_maps() {
        let raw = RawEntity {
            id: 3,
            name: Some("home_repair".into()),
            name_uk: Some("Ремонт".into()),
            name_en: Some("Home Repair".into()),
            slug_pl: Some("remont".into()),
            ..RawEntity::default()
        };

        let entity = Entity::from_raw(EntityKind::Category, raw);

        assert_eq!(entity.id, EntityId::new(3));
        assert_eq!(entity.names.get(Lang::Uk), Some("Ремонт"));
        assert_eq!(entity.names.get(Lang::En), Some("Home Repair"));
        assert_eq!(entity.names.get(Lang::De), None);
        assert_eq!(entity.slugs.get(Lang::Pl), Some("remont"));
        assert_eq!(entity.legacy_name.as_deref(), Some("home_repair"));
        assert_eq!(entity.parent_id, None);
    }

    #[test]
    fn parent_link_follows_kind() {
        let raw = RawEntity {
            id: 9,
            category_id: Some(1),
            country_id: Some(2),
            ..RawEntity::default()
        };

        assert_eq!(
            Entity::from_raw(EntityKind::Subcategory, raw.clone()).parent_id,
            Some(EntityId::new(1))
        );
        assert_eq!(
            Entity::from_raw(EntityKind::City, raw.clone()).parent_id,
            Some(EntityId::new(2))
        );
        assert_eq!(Entity::from_raw(EntityKind::Category, raw).parent_id, None);
    }

    #[test]
    fn blank_legacy_name_is_dropped() {
        let raw = RawEntity {
            id: 1,
            name: Some("  ".into()),
            ..RawEntity::default()
        };
        assert_eq!(Entity::from_raw(EntityKind::Country, raw).legacy_name, None);
    }
}
