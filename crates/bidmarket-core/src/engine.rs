// ── Filter engine ──
//
// Facade a host page (or the CLI) drives. Wires the catalog store, the
// draft/applied state and the listing fetcher together, and is the only
// place where commits turn into side effects: one history push and one
// listing fetch per commit, none for draft edits.

use std::sync::Arc;

use bidmarket_api::MarketClient;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::catalog::{Catalog, CatalogStore, ReferenceSource};
use crate::config::MarketConfig;
use crate::error::CoreError;
use crate::fetch::{ListingFetcher, ListingSource, ListingState};
use crate::model::Lang;
use crate::path::Location;
use crate::state::{Commit, DraftEdit, FilterState};

/// Receiver of navigations produced by commits.
pub trait HistorySink: Send {
    fn push(&mut self, href: &str);
}

/// Records every pushed href in order.
impl HistorySink for Vec<String> {
    fn push(&mut self, href: &str) {
        Vec::push(self, href.to_owned());
    }
}

pub struct FilterEngine<R, S, H> {
    catalog: CatalogStore<R>,
    fetcher: ListingFetcher<S>,
    history: H,
    state: FilterState,
}

impl<H: HistorySink> FilterEngine<MarketClient, MarketClient, H> {
    /// Engine backed by the HTTP API described by `config`.
    pub fn connect(config: &MarketConfig, history: H) -> Result<Self, CoreError> {
        let client = config.client()?;
        Ok(Self::new(client.clone(), client, history, config))
    }
}

impl<R, S, H> FilterEngine<R, S, H>
where
    R: ReferenceSource,
    S: ListingSource,
    H: HistorySink,
{
    pub fn new(reference: R, listings: S, history: H, config: &MarketConfig) -> Self {
        Self {
            catalog: CatalogStore::new(reference),
            fetcher: ListingFetcher::new(listings),
            history,
            state: FilterState::new(config.language, config.listing),
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn catalog(&self) -> Option<Arc<Catalog>> {
        self.catalog.get()
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn listing_state(&self) -> ListingState {
        self.fetcher.state()
    }

    pub fn subscribe_listings(&self) -> watch::Receiver<ListingState> {
        self.fetcher.subscribe()
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Load the catalog, resolve `location` and fetch the first page.
    ///
    /// Does not push history: the location is already current. On catalog
    /// failure the engine stays mounted in the `Unavailable` phase.
    pub async fn mount(&mut self, location: &Location) -> Result<JoinHandle<()>, CoreError> {
        self.state = FilterState::new(location.lang, location.listing);

        let catalog = match self.catalog.load().await {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(error = %e, "filters disabled");
                self.state.mark_unavailable(e.to_string());
                return Err(e);
            }
        };

        self.state.load(catalog, location.segments.as_slice(), &location.query);
        info!(href = %self.state.current_href(), "filters mounted");

        let applied = self.state.applied();
        Ok(self
            .fetcher
            .start(&applied, self.state.lang(), self.state.listing()))
    }

    // ── Draft ────────────────────────────────────────────────────────

    pub fn edit_draft(&mut self, edit: DraftEdit) -> Result<(), CoreError> {
        self.state.edit_draft(edit)
    }

    pub fn discard_draft(&mut self) -> Result<(), CoreError> {
        self.state.discard_draft()
    }

    // ── Commits ──────────────────────────────────────────────────────

    pub fn apply(&mut self) -> Result<JoinHandle<()>, CoreError> {
        let commit = self.state.apply()?;
        Ok(self.dispatch(&commit))
    }

    pub fn submit(&mut self) -> Result<JoinHandle<()>, CoreError> {
        let commit = self.state.submit()?;
        Ok(self.dispatch(&commit))
    }

    pub fn quick_filter(&mut self, edit: DraftEdit) -> Result<JoinHandle<()>, CoreError> {
        let commit = self.state.quick_filter(edit)?;
        Ok(self.dispatch(&commit))
    }

    pub fn reset(&mut self) -> Result<JoinHandle<()>, CoreError> {
        let commit = self.state.reset()?;
        Ok(self.dispatch(&commit))
    }

    pub fn switch_language(&mut self, lang: Lang) -> Result<JoinHandle<()>, CoreError> {
        let commit = self.state.switch_language(lang)?;
        Ok(self.dispatch(&commit))
    }

    fn dispatch(&mut self, commit: &Commit) -> JoinHandle<()> {
        self.history.push(&commit.href);
        self.fetcher.start(&commit.selection, commit.lang, commit.listing)
    }
}
