//! Store destinations and store-backed export.

use sixtick_store::Store;
use sixtick_types::{EPOCH, SixtickError, TickSeries, TimeRange, WatchlistEntry};
use tracing::{debug, info};

/// Inserts the records of `series` newer than the newest tick stored for
/// `security`, and returns how many were inserted.
///
/// Nothing is written when no record qualifies, so feeding the same series
/// twice leaves the store as it was after the first call.
///
/// # Errors
///
/// Returns [`SixtickError::Store`] if the store fails.
pub fn save_to_store<S: Store + ?Sized>(
    store: &S,
    security: &WatchlistEntry,
    series: &TickSeries,
) -> Result<usize, SixtickError> {
    let watermark = store.last_tick_time(&security.symbol)?.unwrap_or(EPOCH);
    let fresh: Vec<_> = series.records_after(watermark).copied().collect();
    debug!(symbol = %security.symbol, %watermark, fresh = fresh.len(), "store watermark");
    if fresh.is_empty() {
        return Ok(0);
    }

    let inserted = store.insert_ticks(security, &fresh)?;
    info!(symbol = %security.symbol, inserted, "saved ticks");
    Ok(inserted)
}

/// Reads the stored ticks of a tracked security within `range`.
///
/// # Errors
///
/// Returns [`SixtickError::SecurityNotFound`] if `symbol_or_isin` is not on
/// the watchlist, or [`SixtickError::Store`] if the store fails.
pub fn load_series<S: Store + ?Sized>(
    store: &S,
    symbol_or_isin: &str,
    range: &TimeRange,
) -> Result<TickSeries, SixtickError> {
    let security = store
        .find_security(symbol_or_isin)?
        .ok_or_else(|| SixtickError::SecurityNotFound(symbol_or_isin.to_string()))?;
    let records = store.ticks(&security.symbol, range)?;
    debug!(symbol = %security.symbol, %range, records = records.len(), "loaded series");
    Ok(TickSeries::new(security.into(), records))
}
