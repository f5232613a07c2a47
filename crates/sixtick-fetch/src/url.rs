//! Exchange export URL construction.

/// Endpoint serving the per-security market data export.
pub const DEFAULT_ENDPOINT: &str =
    "http://www.six-swiss-exchange.com/shares/info_market_data_download.csv";

/// Marker the exchange puts in the redirect target for unknown securities.
pub const NOT_FOUND_MARKER: &str = "not_found";

/// Query parameter carrying the symbol or ISIN.
pub const ID_PARAM: &str = "id";

/// Returns true if the final (post-redirect) URL signals an unknown security.
///
/// # Example
///
/// ```
/// use sixtick_fetch::url::is_not_found;
///
/// assert!(is_not_found("http://www.six-swiss-exchange.com/not_found.html"));
/// assert!(!is_not_found("http://www.six-swiss-exchange.com/shares/info_market_data_download.csv?id=ABBN"));
/// ```
#[must_use]
pub fn is_not_found(resolved_url: &str) -> bool {
    resolved_url.contains(NOT_FOUND_MARKER)
}
