// Reference data endpoints: categories, subcategories, countries, cities.

use crate::client::MarketClient;
use crate::error::Error;
use crate::types::RawEntity;

/// The four reference collections and their fixed endpoint paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferencePath {
    Categories,
    Subcategories,
    Countries,
    Cities,
}

impl ReferencePath {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Categories => "categories",
            Self::Subcategories => "subcategories",
            Self::Countries => "countries",
            Self::Cities => "cities",
        }
    }
}

impl MarketClient {
    /// Fetch one reference collection as raw records.
    pub async fn list_reference(&self, path: ReferencePath) -> Result<Vec<RawEntity>, Error> {
        self.get(path.as_str()).await
    }
}
