// ── Core error types ──
//
// Engine-level errors. Consumers never see HTTP status codes or JSON
// failures directly: the `From<bidmarket_api::Error>` impl folds transport
// errors into domain variants. Unresolvable slugs and inconsistent child
// selections are not errors at all; they degrade to "no filter".

use thiserror::Error;

use crate::model::{EntityId, EntityKind};

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Catalog ──────────────────────────────────────────────────────
    /// One of the four reference fetches failed; the catalog is unusable.
    #[error("Reference catalog unavailable: {message}")]
    CatalogUnavailable { message: String },

    /// A filter operation ran before the catalog was loaded.
    #[error("Reference catalog not loaded yet")]
    CatalogNotLoaded,

    #[error("Unknown {kind} with id {id}")]
    UnknownEntity { kind: EntityKind, id: EntityId },

    // ── Listings ─────────────────────────────────────────────────────
    #[error("Listing search failed: {message}")]
    ListingFetch {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Input ────────────────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal ─────────────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Re-label an error as a catalog load failure.
    pub(crate) fn into_catalog_failure(self) -> Self {
        match self {
            Self::CatalogUnavailable { .. } => self,
            other => Self::CatalogUnavailable {
                message: other.to_string(),
            },
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<bidmarket_api::Error> for CoreError {
    fn from(err: bidmarket_api::Error) -> Self {
        match err {
            bidmarket_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            bidmarket_api::Error::Tls(msg) => CoreError::Config {
                message: format!("TLS error: {msg}"),
            },
            bidmarket_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
            other => CoreError::ListingFetch {
                status: other.status(),
                message: other.to_string(),
            },
        }
    }
}
