//! CLI configuration: a thin layer over `bidmarket_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides (--api-url,
//! --lang, --timeout) on top of the active profile.

use std::time::Duration;

use bidmarket_config::{Config, parse_api_url, profile_to_market_config};
use bidmarket_core::MarketConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use bidmarket_config::{config_path, load_config_or_default, save_config};

/// Build the engine configuration for this invocation.
///
/// Flags beat the profile, the profile beats `[defaults]`. Without a
/// matching profile an explicit `--api-url` is enough.
pub fn resolve_market_config(global: &GlobalOpts) -> Result<MarketConfig, CliError> {
    let cfg = load_config_or_default();
    resolve_with(&cfg, global)
}

fn resolve_with(cfg: &Config, global: &GlobalOpts) -> Result<MarketConfig, CliError> {
    let profile_name = cfg.active_profile_name(global.profile.as_deref());

    let mut market = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile_to_market_config(profile, &cfg.defaults)?,
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(cfg),
            });
        }
        None => {
            let raw = global.api_url.as_deref().ok_or_else(|| CliError::NoConfig {
                path: config_path().display().to_string(),
            })?;
            let mut market = MarketConfig::new(parse_api_url(raw)?);
            market.language = cfg.defaults.language;
            market.listing = cfg.defaults.listing;
            market.timeout = Duration::from_secs(cfg.defaults.timeout);
            market
        }
    };

    if let Some(ref raw) = global.api_url {
        market.api_url = parse_api_url(raw)?;
    }
    if let Some(lang) = global.lang {
        market.language = lang;
    }
    if let Some(secs) = global.timeout {
        market.timeout = Duration::from_secs(secs);
    }

    tracing::debug!(
        profile = %profile_name,
        api_url = %market.api_url,
        language = %market.language,
        "resolved backend configuration"
    );
    Ok(market)
}

/// Comma-separated profile names, or `(none)`.
pub fn available_profiles(cfg: &Config) -> String {
    if cfg.profiles.is_empty() {
        "(none)".into()
    } else {
        cfg.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}
