//! Results store trait.
//!
//! This module defines the [`ResultsStore`] trait: the collection of
//! [`TickerReport`]s accumulated during one analysis session.

use async_trait::async_trait;

use crate::{error::Result, report::TickerReport, types::Ticker};

/// Session-scoped, append-only collection of ticker reports.
///
/// A report is never replaced once written: appending a report for a ticker
/// that is already present leaves the store unchanged.
#[async_trait]
pub trait ResultsStore: Send + Sync {
    /// Returns true if a report for the ticker has been stored.
    async fn contains(&self, ticker: &Ticker) -> Result<bool>;

    /// Retrieves the stored report for a ticker.
    ///
    /// Returns `Ok(Some(report))` if present, `Ok(None)` if not.
    async fn get(&self, ticker: &Ticker) -> Result<Option<TickerReport>>;

    /// Appends a report.
    ///
    /// Returns `Ok(true)` if the report was stored, `Ok(false)` if a report
    /// for the same ticker already existed.
    async fn append(&self, report: TickerReport) -> Result<bool>;

    /// Returns all reports in the order they were appended.
    async fn reports(&self) -> Result<Vec<TickerReport>>;

    /// Returns the number of stored reports.
    async fn len(&self) -> Result<usize>;

    /// Returns true if no report has been stored.
    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }
}
