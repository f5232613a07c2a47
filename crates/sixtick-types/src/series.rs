//! Tick series tagged with a security identity.

use chrono::NaiveDateTime;

use crate::{EncodedRow, ParseError, SecurityIdentity, TickRecord, WatchlistEntry};

/// An ordered run of ticks for one security.
///
/// Records are kept in ascending timestamp order. Equal timestamps are
/// allowed; no uniqueness is enforced here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickSeries {
    identity: SecurityIdentity,
    records: Vec<TickRecord>,
}

impl TickSeries {
    /// Creates a series from already typed records.
    #[must_use]
    pub const fn new(identity: SecurityIdentity, records: Vec<TickRecord>) -> Self {
        Self { identity, records }
    }

    /// Builds a series from `(datetime, price, volume)` text triples.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] encountered.
    pub fn from_rows<I, S>(identity: SecurityIdentity, rows: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = (S, S, S)>,
        S: AsRef<str>,
    {
        let records = rows
            .into_iter()
            .map(|(dt, price, volume)| {
                TickRecord::from_fields(dt.as_ref(), price.as_ref(), volume.as_ref())
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(identity, records))
    }

    /// Builds a series from rows in their exported form.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Datetime`] for the first malformed datetime.
    pub fn from_encoded<'a, I>(identity: SecurityIdentity, rows: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = &'a EncodedRow>,
    {
        let records = rows
            .into_iter()
            .map(EncodedRow::decode)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(identity, records))
    }

    /// Returns the security identity.
    #[must_use]
    pub const fn identity(&self) -> &SecurityIdentity {
        &self.identity
    }

    /// Returns the resolved (symbol, ISIN) pair, if both are known.
    #[must_use]
    pub fn security(&self) -> Option<WatchlistEntry> {
        self.identity.resolved()
    }

    /// Returns the records in ascending order.
    #[must_use]
    pub fn records(&self) -> &[TickRecord] {
        &self.records
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the series holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the timestamp of the last record.
    #[must_use]
    pub fn last_timestamp(&self) -> Option<NaiveDateTime> {
        self.records.last().map(|r| r.timestamp)
    }

    /// Returns a copy of this series carrying a different identity.
    #[must_use]
    pub fn with_identity(self, identity: impl Into<SecurityIdentity>) -> Self {
        Self {
            identity: identity.into(),
            records: self.records,
        }
    }

    /// Iterates over records strictly newer than `start`.
    pub fn records_after(&self, start: NaiveDateTime) -> impl Iterator<Item = &TickRecord> + '_ {
        self.records.iter().filter(move |r| r.timestamp > start)
    }

    /// Iterates over the exported form of every record strictly newer than
    /// `start`, in series order.
    ///
    /// The iterator borrows the series, so it can be recreated at will.
    pub fn encoded_rows(&self, start: NaiveDateTime) -> impl Iterator<Item = EncodedRow> + '_ {
        self.records_after(start).map(TickRecord::encode)
    }
}
