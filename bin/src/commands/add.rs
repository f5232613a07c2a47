//! Add command implementation.
//!
//! A security is fetched before it is tracked: the fetch validates the
//! identifier and yields the missing half of the (symbol, ISIN) pair.

use crate::batch;
use crate::config::Settings;
use anyhow::Result;
use sixtick_lib::prelude::*;

/// Start tracking each security, storing the ticks fetched along the way.
pub(crate) async fn add(settings: &Settings, ids: &[String]) -> Result<()> {
    let store = settings.open_store()?;
    let client = settings.client()?;

    for id in ids {
        batch::settle(id, add_one(&store, &client, id).await)?;
    }
    Ok(())
}

async fn add_one(store: &SqliteStore, client: &ExportClient, id: &str) -> sixtick_lib::Result<()> {
    if store.find_security(id)?.is_some() {
        return Err(SixtickError::AlreadyTracked(id.to_string()));
    }

    let series = client.grab(id).await?;
    let security = series
        .security()
        .ok_or_else(|| SixtickError::SecurityNotFound(id.to_string()))?;
    save_to_store(store, &security, &series)?;
    store.add_security(&security)?;

    println!("Security {id} added to the watchlist.");
    Ok(())
}
