//! Parsing of user-supplied ticker lists.

use std::collections::HashSet;

use tracing::warn;
use valuation_core::Ticker;

/// Maximum number of distinct tickers analyzed per run.
pub const MAX_TICKERS: usize = 50;

/// Parses a comma-separated ticker list.
///
/// Symbols are trimmed and upper-cased, empty entries are dropped and
/// duplicates are kept once, in order of first appearance. At most `limit`
/// distinct tickers are returned.
#[must_use]
pub fn parse_tickers(input: &str, limit: usize) -> Vec<Ticker> {
    let mut seen = HashSet::new();
    let tickers: Vec<Ticker> = input
        .split(',')
        .map(Ticker::new)
        .filter(|ticker| !ticker.is_empty())
        .filter(|ticker| seen.insert(ticker.clone()))
        .collect();

    if tickers.len() > limit {
        warn!(
            requested = tickers.len(),
            limit, "Too many tickers, ignoring the rest"
        );
        return tickers.into_iter().take(limit).collect();
    }

    tickers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(tickers: &[Ticker]) -> Vec<&str> {
        tickers.iter().map(Ticker::as_str).collect()
    }

    #[test]
    fn test_normalizes_symbols() {
        let tickers = parse_tickers(" aapl,MSFT , brk-b", MAX_TICKERS);
        assert_eq!(symbols(&tickers), ["AAPL", "MSFT", "BRK-B"]);
    }

    #[test]
    fn test_drops_empty_entries() {
        let tickers = parse_tickers("AAPL,, ,MSFT,", MAX_TICKERS);
        assert_eq!(symbols(&tickers), ["AAPL", "MSFT"]);

        assert!(parse_tickers("", MAX_TICKERS).is_empty());
        assert!(parse_tickers(" , ", MAX_TICKERS).is_empty());
    }

    #[test]
    fn test_duplicates_after_normalization() {
        let tickers = parse_tickers("aapl, AAPL ,msft,Aapl", MAX_TICKERS);
        assert_eq!(symbols(&tickers), ["AAPL", "MSFT"]);
    }

    #[test]
    fn test_limit_counts_distinct_tickers() {
        let tickers = parse_tickers("A,A,B,B,C,D", 3);
        assert_eq!(symbols(&tickers), ["A", "B", "C"]);
    }

    #[test]
    fn test_limit_of_fifty() {
        let input = (0..60)
            .map(|i| format!("T{i}"))
            .collect::<Vec<_>>()
            .join(",");

        let tickers = parse_tickers(&input, MAX_TICKERS);
        assert_eq!(tickers.len(), 50);
        assert_eq!(tickers[49].as_str(), "T49");
    }
}
