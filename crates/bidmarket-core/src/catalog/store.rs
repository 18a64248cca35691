// ── Catalog store ──
//
// Loads the four reference collections concurrently and caches the first
// successful result for the rest of the session. A failed load leaves the
// cell empty so a later explicit `load()` can try again.

use std::future::Future;
use std::sync::Arc;

use bidmarket_api::MarketClient;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use super::Catalog;
use crate::error::CoreError;
use crate::model::{Entity, EntityKind};

/// Where reference collections come from.
pub trait ReferenceSource: Send + Sync {
    fn fetch_collection(
        &self,
        kind: EntityKind,
    ) -> impl Future<Output = Result<Vec<Entity>, CoreError>> + Send;
}

impl ReferenceSource for MarketClient {
    async fn fetch_collection(&self, kind: EntityKind) -> Result<Vec<Entity>, CoreError> {
        let raw = self
            .list_reference(kind.reference_path())
            .await
            .map_err(|e| CoreError::CatalogUnavailable {
                message: format!("failed to load {kind} collection: {e}"),
            })?;
        debug!(%kind, count = raw.len(), "fetched reference collection");
        Ok(raw.into_iter().map(|r| Entity::from_raw(kind, r)).collect())
    }
}

/// Lazily loaded, session-wide reference catalog.
pub struct CatalogStore<R> {
    source: R,
    catalog: OnceCell<Arc<Catalog>>,
}

impl<R: ReferenceSource> CatalogStore<R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            catalog: OnceCell::new(),
        }
    }

    pub fn source(&self) -> &R {
        &self.source
    }

    /// The cached catalog, if a load has succeeded.
    pub fn get(&self) -> Option<Arc<Catalog>> {
        self.catalog.get().cloned()
    }

    /// Load the catalog, or return the one already loaded.
    ///
    /// All four fetches must succeed; any failure surfaces as
    /// [`CoreError::CatalogUnavailable`] and nothing is cached.
    pub async fn load(&self) -> Result<Arc<Catalog>, CoreError> {
        self.catalog
            .get_or_try_init(|| self.fetch_all())
            .await
            .cloned()
    }

    async fn fetch_all(&self) -> Result<Arc<Catalog>, CoreError> {
        let (categories, subcategories, countries, cities) = tokio::try_join!(
            self.source.fetch_collection(EntityKind::Category),
            self.source.fetch_collection(EntityKind::Subcategory),
            self.source.fetch_collection(EntityKind::Country),
            self.source.fetch_collection(EntityKind::City),
        )
        .map_err(CoreError::into_catalog_failure)?;

        let catalog = Catalog::new(categories, subcategories, countries, cities);
        info!(
            categories = catalog.categories().len(),
            subcategories = catalog.subcategories().len(),
            countries = catalog.countries().len(),
            cities = catalog.cities().len(),
            "reference catalog loaded"
        );
        Ok(Arc::new(catalog))
    }
}
