//! Optional time bounds for reading stored ticks.

use chrono::NaiveDateTime;

use crate::SixtickError;
use crate::datetime::parse_range_boundary;

/// A possibly open-ended range of timestamps, inclusive at both ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
    /// Start (inclusive), or unbounded.
    pub from: Option<NaiveDateTime>,
    /// End (inclusive), or unbounded.
    pub to: Option<NaiveDateTime>,
}

impl TimeRange {
    /// Creates a new range, validating that `from <= to` when both are set.
    ///
    /// # Errors
    ///
    /// Returns [`SixtickError::InvalidRange`] if `from > to`.
    pub fn new(from: Option<NaiveDateTime>, to: Option<NaiveDateTime>) -> Result<Self, SixtickError> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(SixtickError::InvalidRange { from, to });
            }
        }
        Ok(Self { from, to })
    }

    /// A range with no bounds.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            from: None,
            to: None,
        }
    }

    /// Parses user-entered `--from`/`--to` boundaries.
    ///
    /// # Errors
    ///
    /// Returns [`SixtickError::UnrecognizedDatetime`] for an unparseable
    /// boundary, or [`SixtickError::InvalidRange`] for an inverted range.
    pub fn parse(from: Option<&str>, to: Option<&str>) -> Result<Self, SixtickError> {
        let from = from.map(parse_range_boundary).transpose()?;
        let to = to.map(parse_range_boundary).transpose()?;
        Self::new(from, to)
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.from, self.to) {
            (Some(from), Some(to)) => write!(f, "{from} to {to}"),
            (Some(from), None) => write!(f, "from {from}"),
            (None, Some(to)) => write!(f, "until {to}"),
            (None, None) => write!(f, "all time"),
        }
    }
}
