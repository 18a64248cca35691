// ── Listing fetcher ──
//
// Turns an applied selection into search parameters and runs the request
// on a spawned task. Every request gets a sequence number; only the
// newest one may publish its outcome, so a slow response to an old
// selection can never overwrite a newer one.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use bidmarket_api::{MarketClient, SearchEndpoint, SearchPage};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::{EntityKind, FilterSelection, Lang, ListingType};

/// Where listing pages come from.
pub trait ListingSource: Send + Sync + 'static {
    fn fetch_listings(
        &self,
        endpoint: SearchEndpoint,
        params: Vec<(&'static str, String)>,
    ) -> impl Future<Output = Result<SearchPage, CoreError>> + Send;
}

impl ListingSource for MarketClient {
    async fn fetch_listings(
        &self,
        endpoint: SearchEndpoint,
        params: Vec<(&'static str, String)>,
    ) -> Result<SearchPage, CoreError> {
        Ok(self.search(endpoint, &params).await?)
    }
}

/// Query parameters for a selection, in their fixed order.
///
/// `category_id`, `subcategory_id`, `country_id`, `city_id`, `search`,
/// `min_cost`, `max_cost`, `language`. Absent values are omitted, as are
/// dimensions and costs the listing type does not carry.
pub fn listing_params(
    selection: &FilterSelection,
    lang: Lang,
    listing: ListingType,
) -> Vec<(&'static str, String)> {
    const ID_PARAMS: [(EntityKind, &str); 4] = [
        (EntityKind::Category, "category_id"),
        (EntityKind::Subcategory, "subcategory_id"),
        (EntityKind::Country, "country_id"),
        (EntityKind::City, "city_id"),
    ];

    let mut params: Vec<(&'static str, String)> = ID_PARAMS
        .into_iter()
        .filter(|(kind, _)| listing.has_dimension(*kind))
        .filter_map(|(kind, key)| selection.entity(kind).map(|e| (key, e.id.to_string())))
        .collect();

    if let Some(term) = selection.search_term() {
        params.push(("search", term.to_owned()));
    }
    if listing.carries_cost() {
        if let Some(min) = selection.cost.min {
            params.push(("min_cost", min.to_string()));
        }
        if let Some(max) = selection.cost.max {
            params.push(("max_cost", max.to_string()));
        }
    }
    params.push(("language", lang.code().to_owned()));
    params
}

// ── Observable state ────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ListingState {
    #[default]
    Idle,
    Loading {
        seq: u64,
    },
    Loaded {
        seq: u64,
        page: Arc<SearchPage>,
    },
    Failed {
        seq: u64,
        message: String,
    },
}

impl ListingState {
    pub fn seq(&self) -> Option<u64> {
        match self {
            Self::Idle => None,
            Self::Loading { seq } | Self::Loaded { seq, .. } | Self::Failed { seq, .. } => {
                Some(*seq)
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

// ── Fetcher ─────────────────────────────────────────────────────────

pub struct ListingFetcher<S> {
    source: Arc<S>,
    latest: Arc<AtomicU64>,
    state: Arc<watch::Sender<ListingState>>,
}

impl<S: ListingSource> ListingFetcher<S> {
    pub fn new(source: S) -> Self {
        let (state, _) = watch::channel(ListingState::Idle);
        Self {
            source: Arc::new(source),
            latest: Arc::new(AtomicU64::new(0)),
            state: Arc::new(state),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Receiver that sees every published state change.
    pub fn subscribe(&self) -> watch::Receiver<ListingState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> ListingState {
        self.state.borrow().clone()
    }

    /// Sequence number of the most recent request, 0 before the first.
    pub fn latest_seq(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    /// Start a request for `selection` on a new task.
    ///
    /// Publishes `Loading` immediately. The outcome is published only if no
    /// later request was started in the meantime.
    pub fn start(
        &self,
        selection: &FilterSelection,
        lang: Lang,
        listing: ListingType,
    ) -> JoinHandle<()> {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let endpoint = listing.endpoint();
        let params = listing_params(selection, lang, listing);
        debug!(seq, endpoint = endpoint.path(), ?params, "listing fetch started");
        self.state.send_replace(ListingState::Loading { seq });

        let source = Arc::clone(&self.source);
        let latest = Arc::clone(&self.latest);
        let state = Arc::clone(&self.state);

        tokio::spawn(async move {
            let outcome = match source.fetch_listings(endpoint, params).await {
                Ok(page) => ListingState::Loaded {
                    seq,
                    page: Arc::new(page),
                },
                Err(e) => {
                    warn!(seq, error = %e, "listing fetch failed");
                    ListingState::Failed {
                        seq,
                        message: e.to_string(),
                    }
                }
            };

            state.send_if_modified(|current| {
                if latest.load(Ordering::SeqCst) != seq {
                    debug!(seq, "discarding stale listing response");
                    return false;
                }
                *current = outcome;
                true
            });
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{CostRange, Entity};

    fn selection() -> FilterSelection {
        FilterSelection {
            category: Some(Arc::new(Entity::new(1, EntityKind::Category))),
            subcategory: Some(Arc::new(Entity::new(10, EntityKind::Subcategory).with_parent(1))),
            country: Some(Arc::new(Entity::new(5, EntityKind::Country))),
            search: " roof ".into(),
            cost: CostRange::new(None, Some(2000)),
            ..FilterSelection::default()
        }
    }

    fn keys(params: &[(&'static str, String)]) -> Vec<&'static str> {
        params.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn params_in_fixed_order() {
        let params = listing_params(&selection(), Lang::Pl, ListingType::Requests);
        assert_eq!(
            params,
            vec![
                ("category_id", "1".to_owned()),
                ("subcategory_id", "10".to_owned()),
                ("country_id", "5".to_owned()),
                ("search", "roof".to_owned()),
                ("max_cost", "2000".to_owned()),
                ("language", "pl".to_owned()),
            ]
        );
    }

    #[test]
    fn companies_omit_cost() {
        let params = listing_params(&selection(), Lang::En, ListingType::Companies);
        assert_eq!(
            keys(&params),
            vec!["category_id", "subcategory_id", "country_id", "search", "language"]
        );
    }

    #[test]
    fn category_listing_omits_location() {
        let params = listing_params(&selection(), Lang::En, ListingType::Category);
        assert_eq!(
            keys(&params),
            vec!["category_id", "subcategory_id", "search", "max_cost", "language"]
        );
    }

    #[test]
    fn empty_selection_sends_only_language() {
        let params = listing_params(&FilterSelection::empty(), Lang::Uk, ListingType::Requests);
        assert_eq!(params, vec![("language", "uk".to_owned())]);
    }

    #[test]
    fn state_sequence() {
        assert_eq!(ListingState::Idle.seq(), None);
        assert_eq!(ListingState::Loading { seq: 3 }.seq(), Some(3));
        assert!(ListingState::Loading { seq: 3 }.is_loading());
    }
}
