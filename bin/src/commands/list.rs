//! List command implementation.

use crate::config::Settings;
use anyhow::Result;
use sixtick_lib::prelude::*;

/// Print every tracked security as `SYMBOL<TAB>ISIN`.
pub(crate) fn list_watchlist(settings: &Settings) -> Result<()> {
    let store = settings.open_store()?;
    let securities = store.securities().map_err(SixtickError::from)?;

    if securities.is_empty() {
        eprintln!("Watchlist is empty");
        return Ok(());
    }

    for security in &securities {
        println!("{security}");
    }
    Ok(())
}
