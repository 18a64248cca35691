//! Slug command: derives URL slugs from display names without a backend.

use serde::Serialize;
use tabled::Tabled;

use bidmarket_core::slugify;

use crate::cli::{GlobalOpts, SlugArgs};
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
pub struct SlugEntry {
    pub text: String,
    pub slug: String,
}

#[derive(Tabled)]
struct SlugRow {
    #[tabled(rename = "Text")]
    text: String,
    #[tabled(rename = "Slug")]
    slug: String,
}

pub fn handle(args: SlugArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let entries: Vec<SlugEntry> = args
        .text
        .into_iter()
        .map(|text| SlugEntry {
            slug: slugify(&text),
            text,
        })
        .collect();

    let out = output::render_list(
        &global.output,
        &entries,
        |e| SlugRow {
            text: e.text.clone(),
            slug: e.slug.clone(),
        },
        |e| e.slug.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
