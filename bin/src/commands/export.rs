//! Export command implementation.

use crate::batch;
use crate::config::Settings;
use crate::options::{OutputArgs, RangeArgs};
use anyhow::Result;
use sixtick_lib::prelude::*;
use tracing::info;

/// Write stored ticks of each tracked security to a file or stdout.
pub(crate) fn export(
    settings: &Settings,
    ids: &[String],
    format: Format,
    output: &OutputArgs,
    range: &RangeArgs,
) -> Result<()> {
    // Bad bounds abort before anything is read.
    let range = range.range()?;
    let store = settings.open_store()?;

    for id in ids {
        batch::settle(id, export_one(&store, id, format, output, &range))?;
    }
    Ok(())
}

fn export_one(
    store: &SqliteStore,
    id: &str,
    format: Format,
    output: &OutputArgs,
    range: &TimeRange,
) -> sixtick_lib::Result<()> {
    let series = load_series(store, id, range)?;
    let stem = series.identity().symbol().unwrap_or(id);
    let destination = output.destination(stem, format);

    let written = save_to_file(&format, &series, &destination, output.mode())?;
    info!(security = id, %destination, written, "exported");
    Ok(())
}
