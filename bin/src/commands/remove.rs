//! Remove and purge command implementation.

use crate::config::Settings;
use anyhow::Result;
use sixtick_lib::prelude::*;

/// Stop tracking the given securities, optionally erasing their ticks.
pub(crate) fn remove(settings: &Settings, ids: &[String], purge: bool) -> Result<()> {
    let store = settings.open_store()?;

    let removed = store.remove_securities(ids).map_err(SixtickError::from)?;
    if !removed.is_empty() {
        let symbols: Vec<&str> = removed.iter().map(|s| s.symbol.as_str()).collect();
        println!(
            "Securities {} removed from the watchlist.",
            symbols.join(", ")
        );
    }

    let missing: Vec<&str> = ids
        .iter()
        .map(String::as_str)
        .filter(|id| !removed.iter().any(|s| s.matches(id)))
        .collect();
    if !missing.is_empty() {
        eprintln!("{}", SixtickError::NotTracked(missing.join(", ")));
    }

    if purge {
        let erased = store.delete_ticks(ids).map_err(SixtickError::from)?;
        if erased > 0 {
            println!("Securities {} data erased.", ids.join(", "));
        } else {
            eprintln!("No data for {} to erase.", ids.join(", "));
        }
    }
    Ok(())
}
