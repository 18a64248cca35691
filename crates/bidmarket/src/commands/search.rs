//! Search command: mounts the filter engine on a URL, applies edits the way
//! a filter panel would, and prints the listing page the final commit
//! fetched.

use std::fmt::Write as _;

use serde::Serialize;
use serde_json::Value;
use tabled::Tabled;

use bidmarket_core::{
    DraftEdit, EntityKind, FilterEngine, Lang, ListingState, ListingType, Location,
    MarketConfig, listing_params,
};

use crate::cli::{GlobalOpts, SearchArgs};
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
pub struct SearchReport {
    /// Address of the applied filters after all edits.
    pub href: String,
    pub lang: Lang,
    pub listing: ListingType,
    /// Every href pushed by a commit, oldest first.
    pub history: Vec<String>,
    pub params: Vec<(String, String)>,
    pub total: u64,
    pub results: Vec<Value>,
}

/// Translate flags into draft edits: clears first, then selections, then
/// text and budget.
fn draft_edits(args: &SearchArgs) -> Vec<DraftEdit> {
    let mut edits: Vec<DraftEdit> = args.clear.iter().copied().map(DraftEdit::Clear).collect();

    let selections = [
        (EntityKind::Category, args.category),
        (EntityKind::Subcategory, args.subcategory),
        (EntityKind::Country, args.country),
        (EntityKind::City, args.city),
    ];
    edits.extend(
        selections
            .into_iter()
            .filter_map(|(kind, id)| id.map(|id| DraftEdit::Select(kind, id))),
    );

    if let Some(ref text) = args.search {
        edits.push(DraftEdit::Search(text.clone()));
    }
    if let Some(min) = args.min_cost {
        edits.push(DraftEdit::MinCost(Some(min)));
    }
    if let Some(max) = args.max_cost {
        edits.push(DraftEdit::MaxCost(Some(max)));
    }
    edits
}

pub async fn handle(
    config: &MarketConfig,
    args: SearchArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let location = Location::parse(&args.href, config.language, config.listing)?;
    let mut engine = FilterEngine::connect(config, Vec::<String>::new())?;

    let mut pending = engine.mount(&location).await?;

    if args.reset {
        pending = engine.reset()?;
    }

    let mut edits = draft_edits(&args);
    if edits.len() == 1 {
        pending = engine.quick_filter(edits.remove(0))?;
    } else if !edits.is_empty() {
        for edit in edits {
            engine.edit_draft(edit)?;
        }
        pending = engine.apply()?;
    }

    if let Some(lang) = args.switch_lang {
        pending = engine.switch_language(lang)?;
    }

    // Earlier fetches may still be running; only the latest one publishes.
    pending.await.map_err(|e| CliError::Internal {
        message: format!("listing task failed: {e}"),
    })?;

    let page = match engine.listing_state() {
        ListingState::Loaded { page, .. } => page,
        ListingState::Failed { message, .. } => return Err(CliError::ListingFailed { message }),
        other => {
            return Err(CliError::Internal {
                message: format!("listing fetch did not finish: {other:?}"),
            });
        }
    };

    let state = engine.state();
    let applied = state.applied();
    let report = SearchReport {
        href: state.current_href(),
        lang: state.lang(),
        listing: state.listing(),
        history: engine.history().clone(),
        params: listing_params(&applied, state.lang(), state.listing())
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v))
            .collect(),
        total: page.total,
        results: page.results.clone(),
    };

    let out = output::render_single(&global.output, &report, detail, |r| {
        r.results
            .iter()
            .map(|item| field(item, &["id"]))
            .collect::<Vec<_>>()
            .join("\n")
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Table rendering ──────────────────────────────────────────────────

#[derive(Tabled)]
struct ResultRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
}

/// First non-empty field among `keys`, rendered as text.
fn field(item: &Value, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|k| item.get(*k))
        .find_map(|v| match v {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .unwrap_or_default()
}

fn detail(r: &SearchReport) -> Result<String, CliError> {
    let title_keys = [
        format!("title_{}", r.lang),
        "title".to_owned(),
        format!("name_{}", r.lang),
        "name".to_owned(),
    ];
    let title_keys: Vec<&str> = title_keys.iter().map(String::as_str).collect();

    let rows: Vec<ResultRow> = r
        .results
        .iter()
        .enumerate()
        .map(|(i, item)| ResultRow {
            index: i + 1,
            id: field(item, &["id"]),
            title: field(item, &title_keys),
        })
        .collect();

    let mut out = String::new();
    let _ = writeln!(out, "href:  {}", r.href);
    let _ = writeln!(out, "total: {}", r.total);
    if !rows.is_empty() {
        out.push_str(&output::render_table(&rows));
    }
    Ok(out.trim_end().to_owned())
}
