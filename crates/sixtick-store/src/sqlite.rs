//! SQLite-backed [`Store`].

use chrono::{DateTime, NaiveDateTime};
use directories::ProjectDirs;
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};
use sixtick_types::{TickRecord, TimeRange, WatchlistEntry};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::{Result, Store, StoreError};

/// Database file name inside the data directory.
pub const DATABASE_FILE: &str = "sixtick.db";

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS securities (
    symbol TEXT NOT NULL UNIQUE,
    isin   TEXT NOT NULL UNIQUE
);
CREATE TABLE IF NOT EXISTS ticks (
    symbol TEXT    NOT NULL,
    isin   TEXT    NOT NULL,
    time   INTEGER NOT NULL,
    price  REAL    NOT NULL,
    volume INTEGER NOT NULL
);
";

const INDEXES: &str = "
CREATE INDEX IF NOT EXISTS ticks_symbol_time ON ticks (symbol, time);
CREATE INDEX IF NOT EXISTS ticks_isin ON ticks (isin);
";

/// A [`Store`] kept in a single SQLite database.
///
/// Tick times are stored as whole seconds since the Unix epoch, so
/// ordering by the `time` column is chronological.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the database at `path`.
    ///
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the database
    /// cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty() && !p.exists())
        {
            fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "opened store");
        Self::with_connection(conn)
    }

    /// Opens a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if SQLite cannot allocate the database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| StoreError::Open {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Returns the default database location.
    ///
    /// - Linux: `~/.local/share/sixtick/sixtick.db`
    /// - macOS: `~/Library/Application Support/sixtick/sixtick.db`
    /// - Windows: `C:\Users\<User>\AppData\Roaming\sixtick\sixtick.db`
    ///
    /// Falls back to `./.sixtick/sixtick.db` when no home directory is known.
    #[must_use]
    pub fn default_path() -> PathBuf {
        ProjectDirs::from("", "", "sixtick")
            .map_or_else(
                || PathBuf::from(".sixtick"),
                |dirs| dirs.data_dir().to_path_buf(),
            )
            .join(DATABASE_FILE)
    }
}

fn to_epoch_seconds(timestamp: &NaiveDateTime) -> i64 {
    timestamp.and_utc().timestamp()
}

fn from_epoch_seconds(secs: i64) -> Result<NaiveDateTime> {
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.naive_utc())
        .ok_or(StoreError::CorruptTimestamp(secs))
}

fn entry_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<WatchlistEntry> {
    Ok(WatchlistEntry::new(
        row.get::<_, String>(0)?,
        row.get::<_, String>(1)?,
    ))
}

/// `?, ?, ?` for an `IN (...)` list of `n` values.
fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

impl Store for SqliteStore {
    fn setup(&self) -> Result<()> {
        self.conn.execute_batch(INDEXES)?;
        debug!("created store indexes");
        Ok(())
    }

    fn securities(&self) -> Result<Vec<WatchlistEntry>> {
        let mut stmt = self
            .conn
            .prepare("SELECT symbol, isin FROM securities ORDER BY rowid")?;
        let rows = stmt.query_map([], entry_from_row)?;
        Ok(rows.collect::<rusqlite::Result<_>>()?)
    }

    fn find_security(&self, symbol_or_isin: &str) -> Result<Option<WatchlistEntry>> {
        let entry = self
            .conn
            .query_row(
                "SELECT symbol, isin FROM securities WHERE symbol = ?1 OR isin = ?1 LIMIT 1",
                [symbol_or_isin],
                entry_from_row,
            )
            .optional()?;
        Ok(entry)
    }

    fn add_security(&self, entry: &WatchlistEntry) -> Result<()> {
        let exists = self
            .conn
            .query_row(
                "SELECT 1 FROM securities WHERE symbol = ?1 OR isin = ?2 LIMIT 1",
                params![entry.symbol, entry.isin],
                |_| Ok(()),
            )
            .optional()?
            .is_some();
        if exists {
            return Err(StoreError::AlreadyTracked(entry.symbol.clone()));
        }

        self.conn.execute(
            "INSERT INTO securities (symbol, isin) VALUES (?1, ?2)",
            params![entry.symbol, entry.isin],
        )?;
        debug!(symbol = %entry.symbol, isin = %entry.isin, "tracking security");
        Ok(())
    }

    fn remove_securities(&self, ids: &[String]) -> Result<Vec<WatchlistEntry>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let list = placeholders(ids.len());
        let filter = format!("symbol IN ({list}) OR isin IN ({list})");

        let tx = self.conn.unchecked_transaction()?;
        let removed = {
            let mut stmt = tx.prepare(&format!(
                "SELECT symbol, isin FROM securities WHERE {filter} ORDER BY rowid"
            ))?;
            let rows = stmt.query_map(params_from_iter(ids.iter().chain(ids)), entry_from_row)?;
            rows.collect::<rusqlite::Result<Vec<_>>>()?
        };
        tx.execute(
            &format!("DELETE FROM securities WHERE {filter}"),
            params_from_iter(ids.iter().chain(ids)),
        )?;
        tx.commit()?;
        Ok(removed)
    }

    fn insert_ticks(&self, security: &WatchlistEntry, ticks: &[TickRecord]) -> Result<usize> {
        if ticks.is_empty() {
            return Ok(0);
        }

        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO ticks (symbol, isin, time, price, volume) VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for tick in ticks {
                stmt.execute(params![
                    security.symbol,
                    security.isin,
                    to_epoch_seconds(&tick.timestamp),
                    tick.price,
                    tick.volume,
                ])?;
            }
        }
        tx.commit()?;
        debug!(symbol = %security.symbol, count = ticks.len(), "inserted ticks");
        Ok(ticks.len())
    }

    fn ticks(&self, symbol: &str, range: &TimeRange) -> Result<Vec<TickRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT time, price, volume FROM ticks
             WHERE symbol = ?1
               AND (?2 IS NULL OR time >= ?2)
               AND (?3 IS NULL OR time <= ?3)
             ORDER BY time ASC, rowid ASC",
        )?;
        let from = range.from.as_ref().map(to_epoch_seconds);
        let to = range.to.as_ref().map(to_epoch_seconds);
        let rows = stmt.query_map(params![symbol, from, to], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, f64>(1)?, row.get::<_, i64>(2)?))
        })?;

        let mut ticks = Vec::new();
        for row in rows {
            let (secs, price, volume) = row?;
            ticks.push(TickRecord::new(from_epoch_seconds(secs)?, price, volume));
        }
        Ok(ticks)
    }

    fn last_tick_time(&self, symbol: &str) -> Result<Option<NaiveDateTime>> {
        let secs: Option<i64> = self.conn.query_row(
            "SELECT MAX(time) FROM ticks WHERE symbol = ?1",
            [symbol],
            |row| row.get(0),
        )?;
        secs.map(from_epoch_seconds).transpose()
    }

    fn delete_ticks(&self, ids: &[String]) -> Result<usize> {
        if ids.is_empty() {
            return Ok(0);
        }
        let list = placeholders(ids.len());
        let deleted = self.conn.execute(
            &format!("DELETE FROM ticks WHERE symbol IN ({list}) OR isin IN ({list})"),
            params_from_iter(ids.iter().chain(ids)),
        )?;
        debug!(deleted, "deleted ticks");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sixtick_types::parse_tick_datetime;

    fn abbn() -> WatchlistEntry {
        WatchlistEntry::new("ABBN", "CH0012221716")
    }

    fn tick(ts: &str, price: f64, volume: i64) -> TickRecord {
        TickRecord::new(parse_tick_datetime(ts).unwrap(), price, volume)
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn test_add_and_list_securities() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.add_security(&abbn()).unwrap();
        store
            .add_security(&WatchlistEntry::new("NESN", "CH0038863350"))
            .unwrap();

        let all = store.securities().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].symbol, "ABBN");
        assert_eq!(all[1].symbol, "NESN");
    }

    #[test]
    fn test_add_security_rejects_duplicates() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.add_security(&abbn()).unwrap();

        let same_isin = WatchlistEntry::new("ABB", "CH0012221716");
        assert!(matches!(
            store.add_security(&same_isin),
            Err(StoreError::AlreadyTracked(_))
        ));
        let same_symbol = WatchlistEntry::new("ABBN", "CH0000000000");
        assert!(matches!(
            store.add_security(&same_symbol),
            Err(StoreError::AlreadyTracked(_))
        ));
        assert_eq!(store.securities().unwrap().len(), 1);
    }

    #[test]
    fn test_find_security_by_symbol_or_isin() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.add_security(&abbn()).unwrap();

        assert_eq!(store.find_security("ABBN").unwrap(), Some(abbn()));
        assert_eq!(store.find_security("CH0012221716").unwrap(), Some(abbn()));
        assert_eq!(store.find_security("NESN").unwrap(), None);
    }

    #[test]
    fn test_remove_securities() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.add_security(&abbn()).unwrap();
        store
            .add_security(&WatchlistEntry::new("NESN", "CH0038863350"))
            .unwrap();

        let removed = store
            .remove_securities(&ids(&["CH0012221716", "UNKNOWN"]))
            .unwrap();
        assert_eq!(removed, vec![abbn()]);
        assert_eq!(store.securities().unwrap().len(), 1);
        assert!(store.remove_securities(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_ticks_roundtrip_in_time_order() {
        let store = SqliteStore::open_in_memory().unwrap();
        let inserted = store
            .insert_ticks(
                &abbn(),
                &[
                    tick("29.07.2014 17:30:00", 21.5, 300),
                    tick("29.07.2014 09:00:00", 21.3, 100),
                ],
            )
            .unwrap();
        assert_eq!(inserted, 2);

        let ticks = store.ticks("ABBN", &TimeRange::unbounded()).unwrap();
        assert_eq!(ticks.len(), 2);
        assert_eq!(ticks[0].volume, 100);
        assert_eq!(ticks[1].volume, 300);
        assert!(store.ticks("NESN", &TimeRange::unbounded()).unwrap().is_empty());
    }

    #[test]
    fn test_ticks_respects_inclusive_range() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .insert_ticks(
                &abbn(),
                &[
                    tick("28.07.2014 12:00:00", 21.0, 1),
                    tick("29.07.2014 00:00:00", 21.1, 2),
                    tick("29.07.2014 12:00:00", 21.2, 3),
                    tick("30.07.2014 12:00:00", 21.3, 4),
                ],
            )
            .unwrap();

        let range = TimeRange::parse(Some("29.07.2014"), Some("29.07.2014T12:00")).unwrap();
        let volumes: Vec<i64> = store
            .ticks("ABBN", &range)
            .unwrap()
            .iter()
            .map(|t| t.volume)
            .collect();
        assert_eq!(volumes, vec![2, 3]);
    }

    #[test]
    fn test_last_tick_time() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.last_tick_time("ABBN").unwrap(), None);

        store
            .insert_ticks(
                &abbn(),
                &[
                    tick("29.07.2014 09:00:00", 21.3, 100),
                    tick("29.07.2014 17:30:00", 21.5, 300),
                ],
            )
            .unwrap();
        assert_eq!(
            store.last_tick_time("ABBN").unwrap(),
            Some(parse_tick_datetime("29.07.2014 17:30:00").unwrap())
        );
    }

    #[test]
    fn test_delete_ticks_by_isin() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .insert_ticks(&abbn(), &[tick("29.07.2014 09:00:00", 21.3, 100)])
            .unwrap();

        assert_eq!(store.delete_ticks(&ids(&["CH0012221716"])).unwrap(), 1);
        assert_eq!(store.last_tick_time("ABBN").unwrap(), None);
    }

    #[test]
    fn test_setup_is_repeatable() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.setup().unwrap();
        store.setup().unwrap();
    }

    #[test]
    fn test_open_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(DATABASE_FILE);

        {
            let store = SqliteStore::open(&path).unwrap();
            store.add_security(&abbn()).unwrap();
        }
        let reopened = SqliteStore::open(&path).unwrap();
        assert_eq!(reopened.securities().unwrap(), vec![abbn()]);
    }

    #[test]
    fn test_default_path_ends_with_database_file() {
        assert!(SqliteStore::default_path().ends_with(DATABASE_FILE));
    }

    #[test]
    fn test_already_tracked_maps_to_domain_error() {
        let err: sixtick_types::SixtickError = StoreError::AlreadyTracked("ABBN".into()).into();
        assert!(!err.is_fatal());
        let err: sixtick_types::SixtickError = StoreError::CorruptTimestamp(0).into();
        assert!(err.is_fatal());
    }
}
