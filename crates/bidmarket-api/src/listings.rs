// Listing search endpoints (`/bids-v2`, `/companies-v2`).

use crate::client::MarketClient;
use crate::error::Error;
use crate::types::SearchPage;

/// Which search endpoint a query goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchEndpoint {
    Bids,
    Companies,
}

impl SearchEndpoint {
    pub fn path(self) -> &'static str {
        match self {
            Self::Bids => "bids-v2",
            Self::Companies => "companies-v2",
        }
    }
}

impl MarketClient {
    /// Run a search with pre-built query parameters.
    ///
    /// Parameters are sent in the order given; callers own their naming
    /// and omission rules.
    pub async fn search(
        &self,
        endpoint: SearchEndpoint,
        params: &[(&str, String)],
    ) -> Result<SearchPage, Error> {
        self.get_with_params(endpoint.path(), params).await
    }
}
