//! Grab command implementation.

use crate::batch;
use crate::config::Settings;
use crate::options::OutputArgs;
use anyhow::Result;
use sixtick_lib::prelude::*;
use tracing::info;

/// Fetch each security and write its ticks to a file or stdout.
pub(crate) async fn grab(
    settings: &Settings,
    ids: &[String],
    format: Format,
    output: &OutputArgs,
) -> Result<()> {
    let client = settings.client()?;

    for id in ids {
        batch::settle(id, grab_one(&client, id, format, output).await)?;
    }
    Ok(())
}

async fn grab_one(
    client: &ExportClient,
    id: &str,
    format: Format,
    output: &OutputArgs,
) -> sixtick_lib::Result<()> {
    let series = client.grab(id).await?;
    let stem = series.identity().symbol().unwrap_or(id);
    let destination = output.destination(stem, format);

    let written = save_to_file(&format, &series, &destination, output.mode())?;
    info!(security = id, %destination, written, "grabbed");
    Ok(())
}
