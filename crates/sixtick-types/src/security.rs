//! Security identities and watchlist entries.

/// A tracked security with both identifiers known.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WatchlistEntry {
    /// Exchange ticker symbol (e.g., "ABBN").
    pub symbol: String,
    /// International Securities Identification Number.
    pub isin: String,
}

impl WatchlistEntry {
    /// Creates a new watchlist entry.
    #[must_use]
    pub fn new(symbol: impl Into<String>, isin: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            isin: isin.into(),
        }
    }

    /// Returns true if `symbol_or_isin` names this security.
    #[must_use]
    pub fn matches(&self, symbol_or_isin: &str) -> bool {
        self.symbol == symbol_or_isin || self.isin == symbol_or_isin
    }
}

impl std::fmt::Display for WatchlistEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\t{}", self.symbol, self.isin)
    }
}

/// The (symbol, ISIN) pair a tick series belongs to.
///
/// Either half may be unknown, e.g. for a series loaded from a CSV file,
/// which carries no header. The identity must be resolved before the series
/// is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityIdentity {
    symbol: Option<String>,
    isin: Option<String>,
}

impl SecurityIdentity {
    /// Creates a fully known identity.
    #[must_use]
    pub fn new(symbol: impl Into<String>, isin: impl Into<String>) -> Self {
        Self {
            symbol: Some(symbol.into()),
            isin: Some(isin.into()),
        }
    }

    /// Creates an identity from whichever halves are known.
    #[must_use]
    pub const fn from_parts(symbol: Option<String>, isin: Option<String>) -> Self {
        Self { symbol, isin }
    }

    /// Creates an identity with neither identifier known.
    #[must_use]
    pub const fn unresolved() -> Self {
        Self {
            symbol: None,
            isin: None,
        }
    }

    /// Returns the symbol, if known.
    #[must_use]
    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    /// Returns the ISIN, if known.
    #[must_use]
    pub fn isin(&self) -> Option<&str> {
        self.isin.as_deref()
    }

    /// Returns the resolved pair, or `None` if either half is missing or empty.
    #[must_use]
    pub fn resolved(&self) -> Option<WatchlistEntry> {
        match (self.symbol(), self.isin()) {
            (Some(symbol), Some(isin)) if !symbol.is_empty() && !isin.is_empty() => {
                Some(WatchlistEntry::new(symbol, isin))
            }
            _ => None,
        }
    }
}

impl From<WatchlistEntry> for SecurityIdentity {
    fn from(entry: WatchlistEntry) -> Self {
        Self {
            symbol: Some(entry.symbol),
            isin: Some(entry.isin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_from_parts() {
        let partial = SecurityIdentity::from_parts(Some("ABBN".into()), None);
        assert_eq!(partial.symbol(), Some("ABBN"));
        assert_eq!(partial.resolved(), None);

        let full = SecurityIdentity::from_parts(Some("ABBN".into()), Some("CH0012221716".into()));
        assert_eq!(full, SecurityIdentity::new("ABBN", "CH0012221716"));
        assert_eq!(SecurityIdentity::from_parts(None, None), SecurityIdentity::unresolved());
    }

    #[test]
    fn test_entry_matches_either_identifier() {
        let entry = WatchlistEntry::new("ABBN", "CH0012221716");
        assert!(entry.matches("ABBN"));
        assert!(entry.matches("CH0012221716"));
        assert!(!entry.matches("ATLN"));
    }

    #[test]
    fn test_entry_display() {
        let entry = WatchlistEntry::new("ABBN", "CH0012221716");
        assert_eq!(entry.to_string(), "ABBN\tCH0012221716");
    }

    #[test]
    fn test_resolved_identity() {
        let identity = SecurityIdentity::new("ABBN", "CH0012221716");
        assert_eq!(
            identity.resolved(),
            Some(WatchlistEntry::new("ABBN", "CH0012221716"))
        );
    }

    #[test]
    fn test_unresolved_identity() {
        assert_eq!(SecurityIdentity::unresolved().resolved(), None);
        assert_eq!(SecurityIdentity::new("", "CH0012221716").resolved(), None);
    }
}
