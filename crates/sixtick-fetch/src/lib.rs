//! Exchange export download and parsing for the sixtick tick data tool.
//!
//! This crate provides the fetch pipeline:
//!
//! - [`ExportClient`] - HTTP client with a fixed transport retry count
//! - [`parse_export`] - Raw export parsing into a [`TickSeries`](sixtick_types::TickSeries)
//! - [`url`] - Endpoint constants and not-found detection

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/sixtick/sixtick/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod export;
pub mod url;

pub use client::{ClientConfig, ExportClient, FetchError};
pub use export::{ExportError, parse_export};
