//! CSV and JSON tick series codecs for the sixtick tick data tool.
//!
//! This crate provides the file codecs used for import and export:
//!
//! - [`CsvCodec`] - Header-free `datetime;price;volume` lines, appended in place
//! - [`JsonCodec`] - A single `{symbol, isin, ticks}` document, rewritten on append
//! - [`Format`] - Runtime selection between the two

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/sixtick/sixtick/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod codec;
mod csv;
mod json;

pub use crate::csv::CsvCodec;
pub use codec::{Codec, Existing, Format, FormatError};
pub use json::JsonCodec;
