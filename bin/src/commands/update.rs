//! Update command implementation.

use crate::batch;
use crate::config::Settings;
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use sixtick_lib::prelude::*;

/// Fetch fresh ticks for the given securities, or for the whole watchlist
/// when none are given, and store what is new.
pub(crate) async fn update(settings: &Settings, ids: &[String]) -> Result<()> {
    let store = settings.open_store()?;
    let client = settings.client()?;

    let ids: Vec<String> = if ids.is_empty() {
        store
            .securities()
            .map_err(SixtickError::from)?
            .into_iter()
            .map(|s| s.symbol)
            .collect()
    } else {
        ids.to_vec()
    };

    let progress = if settings.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(ids.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:30.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("=>-"),
        );
        pb
    };

    let mut stored = 0usize;
    for id in &ids {
        progress.set_message(format!("Updating {id}..."));
        let result = update_one(&store, &client, id).await.map(|n| stored += n);
        progress.suspend(|| batch::settle(id, result))?;
        progress.inc(1);
    }
    progress.finish_with_message(format!("Stored {stored} new ticks"));
    Ok(())
}

async fn update_one(
    store: &SqliteStore,
    client: &ExportClient,
    id: &str,
) -> sixtick_lib::Result<usize> {
    let series = client.grab(id).await?;
    let security = series
        .security()
        .ok_or_else(|| SixtickError::SecurityNotFound(id.to_string()))?;
    save_to_store(store, &security, &series)
}
