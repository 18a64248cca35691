//! Catalog command: lists one reference collection with localized slugs.

use serde::Serialize;
use tabled::Tabled;

use bidmarket_core::{CatalogStore, EntityId, EntityRef, Lang, MarketConfig, entity_to_slug};

use crate::cli::{CatalogArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
pub struct CatalogEntry {
    pub id: EntityId,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<EntityId>,
}

impl CatalogEntry {
    fn new(entity: &EntityRef, lang: Lang) -> Self {
        Self {
            id: entity.id,
            name: entity.display_name(lang).to_owned(),
            slug: entity_to_slug(entity, lang),
            parent_id: entity.parent_id,
        }
    }
}

#[derive(Tabled)]
struct CatalogRow {
    #[tabled(rename = "ID")]
    id: EntityId,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Parent")]
    parent: String,
}

fn to_row(e: &CatalogEntry) -> CatalogRow {
    CatalogRow {
        id: e.id,
        name: e.name.clone(),
        slug: e.slug.clone(),
        parent: e.parent_id.map_or_else(|| "-".into(), |p| p.to_string()),
    }
}

pub async fn handle(
    config: &MarketConfig,
    args: CatalogArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let store = CatalogStore::new(config.client()?);
    let catalog = store.load().await?;
    let lang = config.language;

    let entries: Vec<CatalogEntry> = match args.parent {
        None => catalog
            .collection(args.kind)
            .iter()
            .map(|e| CatalogEntry::new(e, lang))
            .collect(),
        Some(parent_id) => {
            let parent_kind = args.kind.parent_kind().ok_or_else(|| CliError::Validation {
                field: "parent".into(),
                reason: format!("{} entries have no parent", args.kind),
            })?;
            let parent = catalog
                .get(parent_kind, parent_id)
                .ok_or_else(|| CliError::NotFound {
                    resource_type: parent_kind.to_string(),
                    identifier: parent_id.to_string(),
                    list_command: format!("catalog {parent_kind}"),
                })?;
            catalog
                .children_of(parent)
                .map(|e| CatalogEntry::new(e, lang))
                .collect()
        }
    };

    let out = output::render_list(&global.output, &entries, to_row, |e| e.slug.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}
