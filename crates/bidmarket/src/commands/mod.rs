//! Command dispatch: bridges CLI args -> engine calls -> output formatting.

pub mod catalog;
pub mod config_cmd;
pub mod resolve;
pub mod search;
pub mod slug;

use bidmarket_core::MarketConfig;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    config: &MarketConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Catalog(args) => catalog::handle(config, args, global).await,
        Command::Resolve(args) => resolve::handle(config, args, global).await,
        Command::Search(args) => search::handle(config, args, global).await,
        // Offline commands are handled before dispatch
        Command::Slug(_) | Command::Config(_) | Command::Completions(_) => {
            Err(CliError::Internal {
                message: "offline command routed to backend dispatch".into(),
            })
        }
    }
}
