//! Config subcommand handlers.

use dialoguer::{Input, Select};

use bidmarket_config::{Config, Profile, parse_api_url};
use bidmarket_core::{Lang, ListingType};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Pick one value from `options` with an arrow-key menu.
fn select<T: Copy + std::fmt::Display>(
    prompt: &str,
    options: &[T],
    default: T,
) -> Result<T, CliError>
where
    T: PartialEq,
{
    let labels: Vec<String> = options.iter().map(ToString::to_string).collect();
    let start = options.iter().position(|o| *o == default).unwrap_or(0);
    let picked = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(start)
        .interact()
        .map_err(prompt_err)?;
    options.get(picked).copied().ok_or_else(|| CliError::Internal {
        message: format!("menu returned out-of-range index {picked}"),
    })
}

/// Ask for everything a profile needs.
fn prompt_profile(cfg: &Config) -> Result<Profile, CliError> {
    let api_url: String = Input::new()
        .with_prompt("API base URL")
        .default("https://api.bidmarket.example/".into())
        .validate_with(|input: &String| -> Result<(), String> {
            parse_api_url(input).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()
        .map_err(prompt_err)?;

    let language = select("Default language", &Lang::ALL, cfg.defaults.language)?;
    let listing = select("Default listing", &ListingType::ALL, cfg.defaults.listing)?;

    Ok(Profile {
        language: Some(language),
        listing: Some(listing),
        ..Profile::new(api_url)
    })
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: wizard, or flags only when --api-url is given ─────
        ConfigCommand::Init { name } => {
            let config_path = config::config_path();
            let mut cfg = config::load_config_or_default();

            let profile = match global.api_url {
                Some(ref raw) => {
                    parse_api_url(raw)?;
                    Profile {
                        language: global.lang,
                        timeout: global.timeout,
                        ..Profile::new(raw.trim())
                    }
                }
                None => {
                    eprintln!("bidmarket configuration wizard");
                    eprintln!("   Config path: {}\n", config_path.display());
                    prompt_profile(&cfg)?
                }
            };

            cfg.profiles.insert(name.clone(), profile);
            cfg.default_profile = Some(name.clone());
            let written = config::save_config(&cfg)?;

            if !global.quiet {
                eprintln!("Configuration written to {}", written.display());
                eprintln!("  Active profile: {name}");
                eprintln!("  Try it: bidmarket catalog category");
            }
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let out = output::render_single(
                &global.output,
                &cfg,
                |c| Ok(toml::to_string_pretty(c)?.trim_end().to_owned()),
                |c| config::available_profiles(c).replace(", ", "\n"),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = cfg.active_profile_name(global.profile.as_deref());
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: bidmarket config init");
            } else {
                for (name, profile) in &cfg.profiles {
                    let marker = if *name == default { " *" } else { "" };
                    println!("{name}{marker}\t{}", profile.api_url);
                }
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();
            cfg.profile(&name).map_err(|_| CliError::ProfileNotFound {
                name: name.clone(),
                available: config::available_profiles(&cfg),
            })?;

            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("Default profile set to '{name}'");
            }
            Ok(())
        }
    }
}
