//! Runtime settings resolved from global flags and the environment.

use anyhow::{Context, Result};
use sixtick_lib::prelude::*;
use std::path::PathBuf;
use tracing::debug;

/// Settings shared by every subcommand.
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) db_path: PathBuf,
    pub(crate) endpoint: Option<String>,
    pub(crate) quiet: bool,
}

impl Settings {
    pub(crate) fn new(db: Option<PathBuf>, endpoint: Option<String>, quiet: bool) -> Self {
        Self {
            db_path: db.unwrap_or_else(SqliteStore::default_path),
            endpoint,
            quiet,
        }
    }

    /// Opens the store. Failure here aborts the whole invocation.
    pub(crate) fn open_store(&self) -> Result<SqliteStore> {
        debug!(path = %self.db_path.display(), "opening store");
        let store = SqliteStore::open(&self.db_path).map_err(SixtickError::from)?;
        Ok(store)
    }

    pub(crate) fn client(&self) -> Result<ExportClient> {
        let mut config = ClientConfig::default();
        if let Some(endpoint) = &self.endpoint {
            config.endpoint.clone_from(endpoint);
        }
        ExportClient::new(config).context("Failed to create HTTP client")
    }
}
