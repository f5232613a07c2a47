//! Setup command implementation.

use crate::config::Settings;
use anyhow::Result;
use sixtick_lib::prelude::*;

/// Create the store indexes.
pub(crate) fn setup(settings: &Settings) -> Result<()> {
    let store = settings.open_store()?;
    store.setup().map_err(SixtickError::from)?;
    if !settings.quiet {
        println!("Database ready at {}", settings.db_path.display());
    }
    Ok(())
}
