//! Core types for the sixtick SIX Swiss Exchange tick data tool.
//!
//! This crate provides the fundamental data structures used throughout sixtick:
//!
//! - [`TickRecord`] - A single (timestamp, price, volume) observation
//! - [`EncodedRow`] - A tick in its exported `[datetime, price, volume]` form
//! - [`TickSeries`] - An ascending run of ticks tagged with a [`SecurityIdentity`]
//! - [`WatchlistEntry`] - A tracked security with symbol and ISIN
//! - [`TimeRange`] - Optional inclusive time bounds
//! - [`SixtickError`] - The error taxonomy shared by all crates

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/sixtick/sixtick/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod datetime;
mod error;
mod security;
mod series;
mod tick;
mod time_range;

pub use datetime::{
    EPOCH, TICK_DATETIME_FORMAT, format_tick_datetime, parse_range_boundary, parse_tick_datetime,
};
pub use error::{ParseError, Result, SixtickError};
pub use security::{SecurityIdentity, WatchlistEntry};
pub use series::TickSeries;
pub use tick::{EncodedRow, TickRecord};
pub use time_range::TimeRange;
