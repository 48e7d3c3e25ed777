//! In-memory results store.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use valuation_core::{Result, ResultsStore, Ticker, TickerReport};

#[derive(Debug, Default)]
struct Entries {
    order: Vec<Ticker>,
    reports: HashMap<Ticker, TickerReport>,
}

/// Append-only in-memory store for one analysis session.
///
/// Reports are kept in insertion order and never replaced. Data is lost
/// when the store is dropped.
#[derive(Debug, Default)]
pub struct InMemoryResultsStore {
    entries: RwLock<Entries>,
}

impl InMemoryResultsStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResultsStore for InMemoryResultsStore {
    #[instrument(skip(self), fields(ticker = %ticker))]
    async fn contains(&self, ticker: &Ticker) -> Result<bool> {
        Ok(self.entries.read().await.reports.contains_key(ticker))
    }

    #[instrument(skip(self), fields(ticker = %ticker))]
    async fn get(&self, ticker: &Ticker) -> Result<Option<TickerReport>> {
        let entries = self.entries.read().await;
        match entries.reports.get(ticker) {
            Some(report) => {
                debug!("Store hit");
                Ok(Some(report.clone()))
            }
            None => {
                debug!("Store miss");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, report), fields(ticker = %report.ticker()))]
    async fn append(&self, report: TickerReport) -> Result<bool> {
        let mut entries = self.entries.write().await;
        if entries.reports.contains_key(report.ticker()) {
            debug!("Report already stored, ignoring");
            return Ok(false);
        }

        let ticker = report.ticker().clone();
        entries.order.push(ticker.clone());
        entries.reports.insert(ticker, report);
        debug!(total = entries.order.len(), "Stored report");
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn reports(&self) -> Result<Vec<TickerReport>> {
        let entries = self.entries.read().await;
        Ok(entries
            .order
            .iter()
            .filter_map(|ticker| entries.reports.get(ticker).cloned())
            .collect())
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.entries.read().await.order.len())
    }
}
