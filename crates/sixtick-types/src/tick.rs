//! Tick data representation.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::ParseError;
use crate::datetime::{format_tick_datetime, parse_tick_datetime};

/// A single price/volume observation for a security.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickRecord {
    /// Exchange-local timestamp, one-second resolution.
    pub timestamp: NaiveDateTime,
    /// Trade price.
    pub price: f64,
    /// Traded volume.
    pub volume: i64,
}

impl TickRecord {
    /// Creates a new tick record.
    #[must_use]
    pub const fn new(timestamp: NaiveDateTime, price: f64, volume: i64) -> Self {
        Self {
            timestamp,
            price,
            volume,
        }
    }

    /// Parses a tick from its three textual fields.
    ///
    /// Surrounding whitespace is ignored; the datetime must otherwise match
    /// `DD.MM.YYYY HH:MM:SS` exactly.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] naming the first field that fails to parse.
    pub fn from_fields(datetime: &str, price: &str, volume: &str) -> Result<Self, ParseError> {
        let timestamp = parse_tick_datetime(datetime.trim())?;
        let price = price
            .trim()
            .parse::<f64>()
            .map_err(|_| ParseError::Price(price.to_string()))?;
        let volume = volume
            .trim()
            .parse::<i64>()
            .map_err(|_| ParseError::Volume(volume.to_string()))?;
        Ok(Self::new(timestamp, price, volume))
    }

    /// Returns the record in its on-disk form.
    #[must_use]
    pub fn encode(&self) -> EncodedRow {
        EncodedRow(format_tick_datetime(&self.timestamp), self.price, self.volume)
    }
}

/// A tick as it appears in exported files: `[datetime, price, volume]`.
///
/// Serializes as a three-element sequence, which is both the JSON `ticks`
/// entry layout and a CSV record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedRow(pub String, pub f64, pub i64);

impl EncodedRow {
    /// Returns the formatted datetime field.
    #[must_use]
    pub fn datetime(&self) -> &str {
        &self.0
    }

    /// Decodes the row back into a typed record.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Datetime`] if the datetime field is malformed.
    pub fn decode(&self) -> Result<TickRecord, ParseError> {
        Ok(TickRecord::new(parse_tick_datetime(&self.0)?, self.1, self.2))
    }
}
