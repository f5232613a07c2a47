//! Rust library for collecting SIX Swiss Exchange tick data.
//!
//! This is a facade crate that re-exports functionality from the sixtick
//! workspace crates for convenient access.

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/sixtick/sixtick/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use sixtick_types::*;

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use sixtick_fetch::{ClientConfig, ExportClient, ExportError, FetchError, parse_export, url};

// Re-export codecs
#[cfg(feature = "format")]
pub use sixtick_format::{Codec, CsvCodec, Existing, Format, FormatError, JsonCodec};

// Re-export storage
#[cfg(feature = "store")]
pub use sixtick_store::{SqliteStore, Store, StoreError};

// Re-export the merge engine
#[cfg(feature = "merge")]
pub use sixtick_merge::{
    Destination, WriteMode, load_file, load_series, save_to_file, save_to_store,
};

/// Prelude module for convenient imports.
///
/// ```
/// use sixtick_lib::prelude::*;
/// ```
pub mod prelude {
    pub use sixtick_types::{
        Result, SecurityIdentity, SixtickError, TickRecord, TickSeries, TimeRange, WatchlistEntry,
    };

    #[cfg(feature = "fetch")]
    pub use sixtick_fetch::{ClientConfig, ExportClient};

    #[cfg(feature = "format")]
    pub use sixtick_format::{Codec, Format};

    #[cfg(feature = "store")]
    pub use sixtick_store::{SqliteStore, Store};

    #[cfg(feature = "merge")]
    pub use sixtick_merge::{
        Destination, WriteMode, load_file, load_series, save_to_file, save_to_store,
    };
}
