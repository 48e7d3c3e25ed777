//! Sequential per-ticker analysis with provider fallback.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::{debug, info, warn};

use valuation_core::{
    FinancialSnapshot, FinancialsProvider, PeriodType, Result, ResultsStore, Ticker,
    TickerReport, ValuationError,
};
use valuation_engine::{CapitalAssumptions, ValuationEngine};

use crate::tickers::{MAX_TICKERS, parse_tickers};

/// Default pause between two ticker fetches.
const DEFAULT_REQUEST_INTERVAL: Duration = Duration::from_millis(1500);

/// Settings for an analysis session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Which statement history to fetch.
    pub period_type: PeriodType,
    /// Minimum time between two ticker fetches, across all providers.
    pub request_interval: Duration,
    /// Maximum number of distinct tickers accepted from a ticker list.
    pub max_tickers: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            period_type: PeriodType::Annual,
            request_interval: DEFAULT_REQUEST_INTERVAL,
            max_tickers: MAX_TICKERS,
        }
    }
}

impl AnalyzerConfig {
    /// Sets the statement period type.
    #[must_use]
    pub const fn with_period_type(mut self, period_type: PeriodType) -> Self {
        self.period_type = period_type;
        self
    }

    /// Sets the minimum time between two ticker fetches.
    #[must_use]
    pub const fn with_request_interval(mut self, request_interval: Duration) -> Self {
        self.request_interval = request_interval;
        self
    }

    /// Sets the maximum number of tickers per run.
    #[must_use]
    pub const fn with_max_tickers(mut self, max_tickers: usize) -> Self {
        self.max_tickers = max_tickers;
        self
    }
}

/// Counts for one analysis run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnalysisSummary {
    /// Tickers fetched and evaluated.
    pub analyzed: usize,
    /// Tickers already present in the store.
    pub skipped: usize,
    /// Tickers whose fetch failed; their reports carry the error.
    pub failed: usize,
}

impl AnalysisSummary {
    /// Total number of tickers seen by the run.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.analyzed + self.skipped + self.failed
    }
}

/// Spaces out ticker fetches.
#[derive(Debug)]
struct Throttle {
    last_request: Option<Instant>,
    min_interval: Duration,
}

impl Throttle {
    const fn new(min_interval: Duration) -> Self {
        Self {
            last_request: None,
            min_interval,
        }
    }

    async fn wait(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                debug!("Throttling: waiting {}ms", wait_time.as_millis());
                sleep(wait_time).await;
            }
        }
        self.last_request = Some(Instant::now());
    }
}

/// Runs analysis sessions over lists of tickers.
///
/// Tickers are processed one at a time: fetched from the first provider that
/// succeeds, evaluated, and appended to the results store. A ticker already in
/// the store is skipped. A failed fetch is recorded as an error report and the
/// run moves on to the next ticker.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use valuation::{Analyzer, InMemoryResultsStore, Ticker};
///
/// let analyzer = Analyzer::new(Arc::new(InMemoryResultsStore::new())).with_yahoo();
/// let summary = analyzer.analyze(&[Ticker::new("AAPL")]).await?;
/// assert_eq!(summary.total(), 1);
/// ```
pub struct Analyzer {
    providers: Vec<Arc<dyn FinancialsProvider>>,
    store: Arc<dyn ResultsStore>,
    engine: ValuationEngine,
    config: AnalyzerConfig,
    throttle: Mutex<Throttle>,
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field(
                "providers",
                &self.providers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("engine", &self.engine)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Analyzer {
    /// Create an analyzer with no providers that writes to `store`.
    #[must_use]
    pub fn new(store: Arc<dyn ResultsStore>) -> Self {
        let config = AnalyzerConfig::default();
        Self {
            providers: Vec::new(),
            store,
            engine: ValuationEngine::default(),
            throttle: Mutex::new(Throttle::new(config.request_interval)),
            config,
        }
    }

    /// Replace the session settings.
    #[must_use]
    pub fn with_config(mut self, config: AnalyzerConfig) -> Self {
        self.throttle = Mutex::new(Throttle::new(config.request_interval));
        self.config = config;
        self
    }

    /// Replace the capital-market assumptions.
    #[must_use]
    pub fn with_assumptions(mut self, assumptions: CapitalAssumptions) -> Self {
        self.engine = ValuationEngine::new(assumptions);
        self
    }

    /// Register a provider. Providers are tried in registration order.
    pub fn register(&mut self, provider: Arc<dyn FinancialsProvider>) {
        debug!(provider = provider.name(), "Registering financials provider");
        self.providers.push(provider);
    }

    /// Register a provider, builder style.
    #[must_use]
    pub fn with_provider(mut self, provider: Arc<dyn FinancialsProvider>) -> Self {
        self.register(provider);
        self
    }

    /// Add the Yahoo Finance provider.
    #[cfg(feature = "yahoo")]
    #[must_use]
    pub fn with_yahoo(self) -> Self {
        self.with_provider(Arc::new(valuation_yahoo::YahooProvider::new()))
    }

    /// Returns the session settings.
    #[must_use]
    pub const fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Returns the ratio engine.
    #[must_use]
    pub const fn engine(&self) -> &ValuationEngine {
        &self.engine
    }

    /// Returns the results store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn ResultsStore> {
        &self.store
    }

    /// Fetch a snapshot, trying providers in order until one succeeds.
    pub async fn fetch_snapshot(&self, ticker: &Ticker) -> Result<FinancialSnapshot> {
        if self.providers.is_empty() {
            return Err(ValuationError::ProviderNotConfigured(
                "No financials providers registered".to_string(),
            ));
        }

        self.throttle.lock().await.wait().await;

        let mut last_error = None;
        for provider in &self.providers {
            debug!(
                provider = provider.name(),
                ticker = %ticker,
                "Fetching snapshot"
            );

            match provider
                .fetch_snapshot(ticker, self.config.period_type)
                .await
            {
                Ok(snapshot) => return Ok(snapshot),
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        ticker = %ticker,
                        error = %e,
                        "Provider failed, trying next"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ValuationError::Other("All providers failed with no error".to_string())
        }))
    }

    /// Analyze one ticker and append its report.
    ///
    /// Returns `Ok(None)` if the store already holds the ticker, either before
    /// the fetch or when the append is rejected. Provider failures are
    /// captured in the returned report, not propagated.
    pub async fn analyze_ticker(&self, ticker: &Ticker) -> Result<Option<TickerReport>> {
        if self.providers.is_empty() {
            return Err(ValuationError::ProviderNotConfigured(
                "No financials providers registered".to_string(),
            ));
        }

        if self.store.contains(ticker).await? {
            debug!(ticker = %ticker, "Already analyzed, skipping");
            return Ok(None);
        }

        let report = match self.fetch_snapshot(ticker).await {
            Ok(snapshot) => self.engine.evaluate(&snapshot),
            Err(e) => {
                warn!(ticker = %ticker, error = %e, "Fetch failed, recording error");
                TickerReport::failed(ticker.clone(), e.to_string())
            }
        };

        if !self.store.append(report.clone()).await? {
            debug!(ticker = %ticker, "Store already held a report, keeping it");
            return Ok(None);
        }
        Ok(Some(report))
    }

    /// Analyze tickers in order, one at a time.
    pub async fn analyze(&self, tickers: &[Ticker]) -> Result<AnalysisSummary> {
        let mut summary = AnalysisSummary::default();

        for ticker in tickers {
            match self.analyze_ticker(ticker).await? {
                None => summary.skipped += 1,
                Some(report) if report.is_error() => summary.failed += 1,
                Some(_) => summary.analyzed += 1,
            }
        }

        info!(
            analyzed = summary.analyzed,
            skipped = summary.skipped,
            failed = summary.failed,
            "Analysis complete"
        );

        Ok(summary)
    }

    /// Parse a comma-separated ticker list and analyze it.
    pub async fn analyze_input(&self, input: &str) -> Result<AnalysisSummary> {
        let tickers = parse_tickers(input, self.config.max_tickers);
        if tickers.is_empty() {
            return Err(ValuationError::InvalidParameter(
                "no ticker symbols given".to_string(),
            ));
        }

        info!(count = tickers.len(), "Analyzing tickers");
        self.analyze(&tickers).await
    }

    /// All reports of the session, in the order they were analyzed.
    pub async fn reports(&self) -> Result<Vec<TickerReport>> {
        self.store.reports().await
    }
}
