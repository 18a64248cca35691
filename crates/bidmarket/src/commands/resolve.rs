//! Resolve command: turns a localized filter URL into catalog entities and
//! prints the canonical href plus the listing parameters it implies.

use std::fmt::Write as _;

use serde::Serialize;
use tabled::Tabled;

use bidmarket_core::{
    CatalogStore, EntityId, EntityKind, FilterSelection, Lang, ListingType, Location,
    MarketConfig, build_path, listing_params, parse_path,
};

use crate::cli::{GlobalOpts, ResolveArgs};
use crate::error::CliError;
use crate::output;

/// One path dimension after resolution.
#[derive(Debug, Serialize)]
pub struct ResolvedDimension {
    pub kind: EntityKind,
    pub id: Option<EntityId>,
    pub name: Option<String>,
    pub slug: String,
}

#[derive(Debug, Serialize)]
pub struct Resolution {
    /// Canonical href for the resolved selection.
    pub href: String,
    pub lang: Lang,
    pub listing: ListingType,
    pub dimensions: Vec<ResolvedDimension>,
    pub search: Option<String>,
    pub min_cost: Option<u64>,
    pub max_cost: Option<u64>,
    /// Query parameters a listing search would send.
    pub params: Vec<(String, String)>,
}

impl Resolution {
    pub fn new(selection: &FilterSelection, lang: Lang, listing: ListingType) -> Self {
        let path = build_path(selection, lang, listing);
        let dimensions = listing
            .dimensions()
            .iter()
            .zip(&path.segments)
            .map(|(&kind, segment)| {
                let entity = selection.entity(kind);
                ResolvedDimension {
                    kind,
                    id: entity.map(|e| e.id),
                    name: entity.map(|e| e.display_name(lang).to_owned()),
                    slug: segment.clone(),
                }
            })
            .collect();

        Self {
            href: path.to_href(lang, listing),
            lang,
            listing,
            dimensions,
            search: selection.search_term().map(str::to_owned),
            min_cost: selection.cost.min.filter(|_| listing.carries_cost()),
            max_cost: selection.cost.max.filter(|_| listing.carries_cost()),
            params: listing_params(selection, lang, listing)
                .into_iter()
                .map(|(k, v)| (k.to_owned(), v))
                .collect(),
        }
    }
}

#[derive(Tabled)]
struct DimensionRow {
    #[tabled(rename = "Filter")]
    kind: EntityKind,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Slug")]
    slug: String,
}

fn detail(r: &Resolution) -> Result<String, CliError> {
    let rows: Vec<DimensionRow> = r
        .dimensions
        .iter()
        .map(|d| DimensionRow {
            kind: d.kind,
            id: d.id.map_or_else(|| "-".into(), |id| id.to_string()),
            name: d.name.clone().unwrap_or_default(),
            slug: d.slug.clone(),
        })
        .collect();

    let mut out = String::new();
    let _ = writeln!(out, "href:     {}", r.href);
    let _ = writeln!(out, "language: {}", r.lang);
    let _ = writeln!(out, "listing:  {}", r.listing);
    if let Some(ref search) = r.search {
        let _ = writeln!(out, "search:   {search}");
    }
    if r.min_cost.is_some() || r.max_cost.is_some() {
        let bound = |v: Option<u64>| v.map_or_else(|| "-".into(), |v| v.to_string());
        let _ = writeln!(out, "cost:     {} .. {}", bound(r.min_cost), bound(r.max_cost));
    }
    out.push_str(&output::render_table(&rows));
    Ok(out)
}

pub async fn handle(
    config: &MarketConfig,
    args: ResolveArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let location = Location::parse(&args.href, config.language, config.listing)?;

    let store = CatalogStore::new(config.client()?);
    let catalog = store.load().await?;

    let selection = parse_path(
        location.segments.as_slice(),
        &location.query,
        location.lang,
        &catalog,
        location.listing,
    );
    let resolution = Resolution::new(&selection, location.lang, location.listing);

    let out = output::render_single(&global.output, &resolution, detail, |r| r.href.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}
