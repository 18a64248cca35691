//! Clap derive structures for the `bidmarket` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

use bidmarket_core::{EntityId, EntityKind, Lang};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// bidmarket -- localized catalog filters from the command line
#[derive(Debug, Parser)]
#[command(
    name = "bidmarket",
    version,
    about = "Resolve and drive localized marketplace catalog filters",
    long_about = "Turns localized filter URLs into catalog entities and back,\n\
        and runs filtered listing searches against a marketplace backend.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "BIDMARKET_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Marketplace API base URL (overrides profile)
    #[arg(long, short = 'u', env = "BIDMARKET_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Language used when a URL has no language prefix (uk, en, pl, fr, de)
    #[arg(long, short = 'l', env = "BIDMARKET_LANG", global = true)]
    pub lang: Option<Lang>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "BIDMARKET_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "BIDMARKET_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List a reference collection with its localized slugs
    #[command(alias = "cat")]
    Catalog(CatalogArgs),

    /// Derive URL slugs from display names (offline)
    Slug(SlugArgs),

    /// Resolve a filter URL into catalog entities
    #[command(alias = "r")]
    Resolve(ResolveArgs),

    /// Run a filtered listing search, optionally editing the filters first
    #[command(alias = "s")]
    Search(SearchArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Catalog ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CatalogArgs {
    /// Collection to list (category, subcategory, country, city)
    pub kind: EntityKind,

    /// Only show children of this parent id
    #[arg(long)]
    pub parent: Option<EntityId>,
}

// ── Slug ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SlugArgs {
    /// Display names to convert
    #[arg(required = true)]
    pub text: Vec<String>,
}

// ── Resolve ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Absolute URL or site-relative href (e.g. /en/bids/poland/all/home-repair/all)
    pub href: String,
}

// ── Search ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Starting URL; defaults to the unfiltered request listing
    #[arg(default_value = "/")]
    pub href: String,

    /// Select a category by id
    #[arg(long)]
    pub category: Option<EntityId>,

    /// Select a subcategory by id (also selects its category)
    #[arg(long)]
    pub subcategory: Option<EntityId>,

    /// Select a country by id
    #[arg(long)]
    pub country: Option<EntityId>,

    /// Select a city by id (also selects its country)
    #[arg(long)]
    pub city: Option<EntityId>,

    /// Clear a dimension (repeatable)
    #[arg(long, value_name = "KIND")]
    pub clear: Vec<EntityKind>,

    /// Free-text search; an empty string clears it
    #[arg(long)]
    pub search: Option<String>,

    /// Minimum budget (0 clears)
    #[arg(long)]
    pub min_cost: Option<u64>,

    /// Maximum budget (0 clears)
    #[arg(long)]
    pub max_cost: Option<u64>,

    /// Drop every filter before applying edits
    #[arg(long)]
    pub reset: bool,

    /// Re-address the applied filters in another language
    #[arg(long, value_name = "LANG")]
    pub switch_lang: Option<Lang>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or extend the config file with guided setup
    ///
    /// With --api-url the wizard is skipped.
    Init {
        /// Profile name
        #[arg(long, default_value = "default")]
        name: String,
    },

    /// Display current resolved configuration
    Show,

    /// Print the config file location
    Path,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
