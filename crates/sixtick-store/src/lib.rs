//! Watchlist and tick persistence for the sixtick tick data tool.
//!
//! - [`Store`] - Typed access to tracked securities and their ticks
//! - [`SqliteStore`] - The SQLite implementation used by the CLI

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/sixtick/sixtick/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod sqlite;
mod store;

pub use error::{Result, StoreError};
pub use sqlite::{DATABASE_FILE, SqliteStore};
pub use store::Store;
