//! Load command implementation.

use crate::config::Settings;
use anyhow::Result;
use sixtick_lib::prelude::*;
use std::path::Path;
use tracing::info;

/// Read a CSV or JSON file and store the ticks it adds.
pub(crate) fn load(
    settings: &Settings,
    file: &Path,
    format: Option<Format>,
    alias: Option<&str>,
) -> Result<()> {
    let store = settings.open_store()?;

    let (security, series) = load_file(&store, file, format, alias)?;
    let inserted = save_to_store(&store, &security, &series)?;
    info!(symbol = %security.symbol, inserted, "loaded {}", file.display());
    Ok(())
}
