//! Raw input types for a single company.
//!
//! This module defines the data fetched from a provider:
//!
//! - [`Ticker`] - Normalised stock symbol
//! - [`StatementTable`] - One financial statement, line item to per-period values
//! - [`QuoteInfo`] - Scalar quote and profile fields
//! - [`FinancialSnapshot`] - Everything fetched for one ticker

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A stock symbol, the unit of analysis.
///
/// Tickers are trimmed and uppercased on creation, so `" aapl "` and
/// `"AAPL"` compare equal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Ticker(String);

impl Ticker {
    /// Creates a new ticker from a string, trimming and converting to uppercase.
    #[must_use]
    pub fn new(s: impl AsRef<str>) -> Self {
        Self(s.as_ref().trim().to_uppercase())
    }

    /// Returns the ticker as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the ticker is empty after normalisation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Ticker {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Ticker {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Ticker {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// The three statements fetched per ticker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatementKind {
    /// Balance sheet.
    BalanceSheet,
    /// Income statement.
    IncomeStatement,
    /// Cash-flow statement.
    CashFlow,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BalanceSheet => write!(f, "balance sheet"),
            Self::IncomeStatement => write!(f, "income statement"),
            Self::CashFlow => write!(f, "cash-flow statement"),
        }
    }
}

/// A financial statement as reported: line-item name to per-period values.
///
/// Every row holds one value per reported period, most recent period first.
/// A `None` cell means the provider reported the line item but had no value
/// for that period.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatementTable {
    kind: StatementKind,
    period_ends: Vec<NaiveDate>,
    rows: HashMap<String, Vec<Option<f64>>>,
}

impl StatementTable {
    /// Creates an empty statement of the given kind.
    #[must_use]
    pub fn new(kind: StatementKind) -> Self {
        Self {
            kind,
            period_ends: Vec::new(),
            rows: HashMap::new(),
        }
    }

    /// Sets the end dates of the reported periods, most recent first.
    #[must_use]
    pub fn with_period_ends(mut self, period_ends: Vec<NaiveDate>) -> Self {
        self.period_ends = period_ends;
        self
    }

    /// Adds a line item, replacing any existing row with the same name.
    #[must_use]
    pub fn with_row(mut self, name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        self.insert_row(name, values);
        self
    }

    /// Inserts a line item, replacing any existing row with the same name.
    pub fn insert_row(&mut self, name: impl Into<String>, values: Vec<Option<f64>>) {
        self.rows.insert(name.into(), values);
    }

    /// Returns the per-period values of a line item, if present.
    #[must_use]
    pub fn row(&self, name: &str) -> Option<&[Option<f64>]> {
        self.rows.get(name).map(Vec::as_slice)
    }

    /// Returns true if the statement reports the given line item.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.rows.contains_key(name)
    }

    /// Returns the statement kind.
    #[must_use]
    pub const fn kind(&self) -> StatementKind {
        self.kind
    }

    /// Returns the reported period end dates, most recent first.
    #[must_use]
    pub fn period_ends(&self) -> &[NaiveDate] {
        &self.period_ends
    }

    /// Returns the number of line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the statement has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Scalar quote and profile fields for a ticker at fetch time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteInfo {
    // Identity
    /// Company long name.
    pub long_name: Option<String>,
    /// Business sector.
    pub sector: Option<String>,
    /// Country of incorporation.
    pub country: Option<String>,
    /// Industry within the sector.
    pub industry: Option<String>,

    // Market
    /// Current share price.
    pub current_price: Option<f64>,
    /// Shares outstanding.
    pub shares_outstanding: Option<f64>,
    /// Beta coefficient.
    pub beta: Option<f64>,

    // Valuation
    /// Trailing price-to-earnings ratio.
    pub trailing_pe: Option<f64>,
    /// Price-to-book ratio.
    pub price_to_book: Option<f64>,
    /// Trailing twelve-month earnings per share.
    pub trailing_eps: Option<f64>,
    /// Forward (estimated) earnings per share.
    pub forward_eps: Option<f64>,

    // Dividends
    /// Annual dividend per share.
    pub dividend_rate: Option<f64>,
    /// Dividend yield.
    pub dividend_yield: Option<f64>,
    /// Dividend payout ratio.
    pub payout_ratio: Option<f64>,

    // Profitability & solvency
    /// Return on assets.
    pub return_on_assets: Option<f64>,
    /// Return on equity.
    pub return_on_equity: Option<f64>,
    /// Current ratio.
    pub current_ratio: Option<f64>,
    /// Long-term debt to equity.
    pub long_term_debt_to_equity: Option<f64>,
    /// Total debt to equity.
    pub debt_to_equity: Option<f64>,
    /// Operating margin.
    pub operating_margin: Option<f64>,
    /// Net profit margin.
    pub profit_margin: Option<f64>,
}

/// Everything fetched from a provider for one ticker.
///
/// A snapshot is immutable once built; refetching produces a new snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    /// The ticker the data belongs to.
    pub ticker: Ticker,
    /// Quote and profile fields.
    pub quote: QuoteInfo,
    /// Balance sheet.
    pub balance_sheet: StatementTable,
    /// Income statement.
    pub income_statement: StatementTable,
    /// Cash-flow statement.
    pub cash_flow: StatementTable,
    /// When the data was fetched.
    pub fetched_at: DateTime<Utc>,
}

impl FinancialSnapshot {
    /// Creates a snapshot stamped with the current time.
    #[must_use]
    pub fn new(
        ticker: Ticker,
        quote: QuoteInfo,
        balance_sheet: StatementTable,
        income_statement: StatementTable,
        cash_flow: StatementTable,
    ) -> Self {
        Self {
            ticker,
            quote,
            balance_sheet,
            income_statement,
            cash_flow,
            fetched_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_normalisation() {
        assert_eq!(Ticker::new(" aapl ").as_str(), "AAPL");
        assert_eq!(Ticker::from("msft"), Ticker::new("MSFT"));
        assert!(Ticker::new("   ").is_empty());
    }

    #[test]
    fn test_statement_rows() {
        let table = StatementTable::new(StatementKind::BalanceSheet)
            .with_row("Long Term Debt", vec![Some(100.0), Some(90.0)])
            .with_row("Cash", vec![None]);

        assert_eq!(table.len(), 2);
        assert!(table.contains("Cash"));
        assert!(!table.contains("Inventory"));
        assert_eq!(table.row("Long Term Debt"), Some(&[Some(100.0), Some(90.0)][..]));
        assert_eq!(table.kind(), StatementKind::BalanceSheet);
    }

    #[test]
    fn test_insert_row_replaces() {
        let mut table = StatementTable::new(StatementKind::IncomeStatement);
        table.insert_row("EBIT", vec![Some(1.0)]);
        table.insert_row("EBIT", vec![Some(2.0)]);
        assert_eq!(table.row("EBIT"), Some(&[Some(2.0)][..]));
    }
}
