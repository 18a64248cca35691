// ── Runtime engine configuration ──
//
// Describes which backend to talk to and how. Never touches disk: the
// config crate (or a test) builds a `MarketConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use bidmarket_api::{MarketClient, TlsMode, TransportConfig};
use url::Url;

use crate::error::CoreError;
use crate::model::{Lang, ListingType};

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store.
    #[default]
    SystemDefaults,
    /// Extra CA certificate (PEM), e.g. for a staging backend.
    CustomCa(PathBuf),
}

/// Configuration for one backend.
#[derive(Debug, Clone)]
pub struct MarketConfig {
    /// Base URL of the marketplace API (e.g. `https://api.example.com/`).
    pub api_url: Url,
    /// Language used when a URL carries no recognizable language prefix.
    pub language: Lang,
    /// Listing page driven when none is given explicitly.
    pub listing: ListingType,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl MarketConfig {
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            language: Lang::default(),
            listing: ListingType::default(),
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }

    /// Build the HTTP client for this backend.
    pub fn client(&self) -> Result<MarketClient, CoreError> {
        Ok(MarketClient::new(self.api_url.as_str(), &self.transport())?)
    }
}
