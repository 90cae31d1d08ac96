use crate::forms::CountryCatalog;
use anyhow::{Context, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Args {
    pub json: bool,
}

/// Render the catalog, one country per line or as a JSON array.
///
/// # Errors
/// Returns an error if the catalog cannot be serialized.
pub fn render(catalog: &CountryCatalog, json: bool) -> Result<String> {
    if json {
        return serde_json::to_string_pretty(catalog.entries())
            .context("failed to serialize country catalog");
    }

    Ok(catalog
        .entries()
        .iter()
        .map(|country| {
            format!(
                "{}\t{}\t{}",
                country.code, country.display_label, country.phone_placeholder
            )
        })
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Execute the countries action.
/// # Errors
/// Returns an error if the catalog cannot be rendered.
pub fn execute(args: &Args) -> Result<()> {
    let output = render(&CountryCatalog::default(), args.json)?;
    println!("{output}");
    Ok(())
}
