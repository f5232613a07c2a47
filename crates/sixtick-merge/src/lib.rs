//! Incremental merge engine for the sixtick tick data tool.
//!
//! - [`save_to_file`] - Write a series to a file or stdout under a [`WriteMode`]
//! - [`save_to_store`] - Insert the records newer than the store's watermark
//! - [`load_file`] - Read a file series and resolve its identity
//! - [`load_series`] - Read a tracked security's ticks from the store

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/sixtick/sixtick/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod destination;
mod file;
mod import;
mod store;

pub use destination::{Destination, WriteMode};
pub use file::save_to_file;
pub use import::load_file;
pub use store::{load_series, save_to_store};
