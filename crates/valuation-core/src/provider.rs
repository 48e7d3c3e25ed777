//! Provider traits for fetching quotes and financial statements.
//!
//! This module defines the core provider traits:
//!
//! - [`DataProvider`] - Base trait for all data providers
//! - [`FinancialsProvider`] - Quote fields and the three financial statements

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::Result,
    period::PeriodType,
    types::{FinancialSnapshot, QuoteInfo, StatementTable, Ticker},
};

/// Base trait for all data providers.
///
/// All data providers must implement this trait to provide basic metadata
/// about the provider and its capabilities.
pub trait DataProvider: Send + Sync + Debug {
    /// Returns the name of this provider (e.g., "Yahoo Finance").
    fn name(&self) -> &str;

    /// Returns a description of this provider.
    fn description(&self) -> &str;

    /// Returns the statement period types supported by this provider.
    fn supported_periods(&self) -> &[PeriodType];
}

/// Provider for quote fields and financial statements.
///
/// Any method may fail (network error, unknown ticker, rate limit); callers
/// are expected to handle failures per ticker.
#[async_trait]
pub trait FinancialsProvider: DataProvider {
    /// Fetches scalar quote and profile fields for a ticker.
    async fn quote(&self, ticker: &Ticker) -> Result<QuoteInfo>;

    /// Fetches the balance sheet, most recent period first.
    async fn balance_sheet(&self, ticker: &Ticker, period_type: PeriodType)
    -> Result<StatementTable>;

    /// Fetches the income statement, most recent period first.
    async fn income_statement(
        &self,
        ticker: &Ticker,
        period_type: PeriodType,
    ) -> Result<StatementTable>;

    /// Fetches the cash-flow statement, most recent period first.
    async fn cash_flow(&self, ticker: &Ticker, period_type: PeriodType) -> Result<StatementTable>;

    /// Fetches the quote and all three statements for a ticker.
    ///
    /// Default implementation calls the four operations sequentially and
    /// fails on the first error. Providers that can serve everything in one
    /// request should override it.
    async fn fetch_snapshot(
        &self,
        ticker: &Ticker,
        period_type: PeriodType,
    ) -> Result<FinancialSnapshot> {
        let quote = self.quote(ticker).await?;
        let balance_sheet = self.balance_sheet(ticker, period_type).await?;
        let income_statement = self.income_statement(ticker, period_type).await?;
        let cash_flow = self.cash_flow(ticker, period_type).await?;

        Ok(FinancialSnapshot::new(
            ticker.clone(),
            quote,
            balance_sheet,
            income_statement,
            cash_flow,
        ))
    }
}
