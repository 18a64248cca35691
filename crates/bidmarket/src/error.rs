//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use bidmarket_config::ConfigError;
use bidmarket_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Backend ──────────────────────────────────────────────────────

    #[error("Could not reach the marketplace API: {message}")]
    #[diagnostic(
        code(bidmarket::connection_failed),
        help(
            "Check that the API URL is correct and reachable.\n\
             Override it with --api-url or set api_url in your profile."
        )
    )]
    ConnectionFailed { message: String },

    #[error("Filters unavailable: {message}")]
    #[diagnostic(
        code(bidmarket::catalog_unavailable),
        help("The reference catalog could not be loaded. Retry once the backend is healthy.")
    )]
    CatalogUnavailable { message: String },

    #[error("Listing search failed: {message}")]
    #[diagnostic(
        code(bidmarket::listing_failed),
        help("The filters were applied; only the search request failed. Retry the search.")
    )]
    ListingFailed { message: String },

    #[error("API error (HTTP {status}): {message}")]
    #[diagnostic(code(bidmarket::api_error))]
    ApiError { status: u16, message: String },

    #[error("Could not set up the HTTP client: {message}")]
    #[diagnostic(
        code(bidmarket::client_setup),
        help("Check api_url and ca_cert in your profile.")
    )]
    ClientSetup { message: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(bidmarket::not_found),
        help("Run: bidmarket {list_command} to see available ids")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(bidmarket::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(bidmarket::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: bidmarket config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No API URL configured")]
    #[diagnostic(
        code(bidmarket::no_config),
        help(
            "Create a profile with: bidmarket config init\n\
             Or pass --api-url (BIDMARKET_API_URL).\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(bidmarket::config))]
    Config(Box<figment::Error>),

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(bidmarket::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(bidmarket::yaml))]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to render TOML: {0}")]
    #[diagnostic(code(bidmarket::toml))]
    Toml(#[from] toml::ser::Error),

    #[error("Internal error: {message}")]
    #[diagnostic(code(bidmarket::internal))]
    Internal { message: String },
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. }
            | Self::CatalogUnavailable { .. }
            | Self::ListingFailed { .. } => exit_code::CONNECTION,
            Self::NotFound { .. } | Self::ApiError { status: 404, .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::CatalogUnavailable { message } => CliError::CatalogUnavailable { message },

            CoreError::CatalogNotLoaded => CliError::Internal {
                message: "reference catalog not loaded".into(),
            },

            CoreError::UnknownEntity { kind, id } => CliError::NotFound {
                resource_type: kind.to_string(),
                identifier: id.to_string(),
                list_command: format!("catalog {kind}"),
            },

            CoreError::ListingFetch {
                message,
                status: Some(status),
            } => CliError::ApiError { status, message },

            CoreError::ListingFetch {
                message,
                status: None,
            } => CliError::ConnectionFailed { message },

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "filter".into(),
                reason: message,
            },

            CoreError::Config { message } => CliError::ClientSetup { message },

            CoreError::Internal(message) => CliError::Internal { message },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::UnknownProfile { profile } => CliError::ProfileNotFound {
                name: profile,
                available: "(see: bidmarket config profiles)".into(),
            },
            ConfigError::Serialization(e) => CliError::Toml(e),
            ConfigError::Figment(e) => CliError::Config(e),
            ConfigError::Io(e) => CliError::Io(e),
        }
    }
}
