//! Lists the merged station registry of an input directory.

use std::path::Path;

use anyhow::Result;

use super::load_registry;
use crate::{config::Config, reading::StationRegistry};

/// Returns the registry rendered one station per line.
pub fn stations(input: &Path, config: &Config) -> Result<String> {
    let registry = load_registry(input, config, &[])?;

    Ok(render_registry(&registry))
}

fn render_registry(registry: &StationRegistry) -> String {
    let width = registry.iter().map(|s| s.name.chars().count()).max().unwrap_or(0);

    registry
        .iter()
        .map(|s| {
            format!(
                "{:<8} {:<width$} {:<16} {}",
                s.id,
                s.name,
                s.longitude_latitude,
                s.elevation,
                width = width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// -- Tests -------------------------------------------------------------------
