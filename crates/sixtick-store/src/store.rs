//! The persistence capability consumed by the merge engine and the CLI.

use chrono::NaiveDateTime;
use sixtick_types::{TickRecord, TimeRange, WatchlistEntry};

use crate::Result;

/// Typed access to the watchlist and the tick collection.
///
/// Identifier sets (`ids`) match an entry when either its symbol or its
/// ISIN is in the set.
pub trait Store {
    /// Creates the lookup indexes.
    ///
    /// # Errors
    ///
    /// Returns an error if the database rejects the statement.
    fn setup(&self) -> Result<()>;

    /// Returns every tracked security in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn securities(&self) -> Result<Vec<WatchlistEntry>>;

    /// Looks up a tracked security by symbol or ISIN.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn find_security(&self, symbol_or_isin: &str) -> Result<Option<WatchlistEntry>>;

    /// Starts tracking a security.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyTracked`](crate::StoreError::AlreadyTracked)
    /// if the symbol or the ISIN is already present.
    fn add_security(&self, entry: &WatchlistEntry) -> Result<()>;

    /// Stops tracking every security matching `ids` and returns them.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn remove_securities(&self, ids: &[String]) -> Result<Vec<WatchlistEntry>>;

    /// Inserts ticks for a security and returns how many were written.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails; nothing is written in that case.
    fn insert_ticks(&self, security: &WatchlistEntry, ticks: &[TickRecord]) -> Result<usize>;

    /// Returns a symbol's ticks within `range`, ascending by time.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn ticks(&self, symbol: &str, range: &TimeRange) -> Result<Vec<TickRecord>>;

    /// Returns the newest stored timestamp for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn last_tick_time(&self, symbol: &str) -> Result<Option<NaiveDateTime>>;

    /// Deletes every tick matching `ids` and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn delete_ticks(&self, ids: &[String]) -> Result<usize>;
}
