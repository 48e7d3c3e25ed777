//! Analyzer sessions driven by scripted in-process providers.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use valuation::{
    AnalysisSummary, Analyzer, AnalyzerConfig, CapitalAssumptions, DataProvider,
    FinancialsProvider, GrowthOutlook, InMemoryResultsStore, LiquidityStatus, PeriodType,
    QuoteInfo, Result, ResultsStore, StatementKind, StatementTable, Ticker, TickerReport,
    ValuationError, metrics_frame,
};

/// Serves the same synthetic company for every ticker except `ZZZZ`.
#[derive(Debug, Default)]
struct ScriptedProvider {
    quote_calls: AtomicUsize,
}

impl ScriptedProvider {
    fn calls(&self) -> usize {
        self.quote_calls.load(Ordering::SeqCst)
    }
}

impl DataProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "Scripted"
    }

    fn description(&self) -> &str {
        "Synthetic statements for tests"
    }

    fn supported_periods(&self) -> &[PeriodType] {
        &[PeriodType::Annual]
    }
}

#[async_trait]
impl FinancialsProvider for ScriptedProvider {
    async fn quote(&self, ticker: &Ticker) -> Result<QuoteInfo> {
        self.quote_calls.fetch_add(1, Ordering::SeqCst);
        if ticker.as_str() == "ZZZZ" {
            return Err(ValuationError::TickerNotFound(ticker.to_string()));
        }
        Ok(QuoteInfo {
            long_name: Some(format!("{ticker} Corp")),
            current_price: Some(50.0),
            shares_outstanding: Some(10.0),
            beta: Some(1.2),
            trailing_eps: Some(2.0),
            forward_eps: Some(2.3),
            ..Default::default()
        })
    }

    async fn balance_sheet(
        &self,
        _ticker: &Ticker,
        _period_type: PeriodType,
    ) -> Result<StatementTable> {
        Ok(StatementTable::new(StatementKind::BalanceSheet)
            .with_row("Long Term Debt", vec![Some(100.0), Some(90.0)])
            .with_row("Short Long Term Debt", vec![Some(20.0), Some(20.0)])
            .with_row("Total Stockholder Equity", vec![Some(400.0), Some(360.0)])
            .with_row("Cash", vec![Some(150.0)])
            .with_row("Total Current Assets", vec![Some(320.0)])
            .with_row("Inventory", vec![Some(40.0)])
            .with_row("Current Liabilities", vec![Some(200.0)]))
    }

    async fn income_statement(
        &self,
        _ticker: &Ticker,
        _period_type: PeriodType,
    ) -> Result<StatementTable> {
        Ok(StatementTable::new(StatementKind::IncomeStatement)
            .with_row("EBIT", vec![Some(60.0), Some(50.0)])
            .with_row("Total Revenue", vec![Some(1200.0), Some(1000.0)])
            .with_row("Interest Expense", vec![Some(-10.0)]))
    }

    async fn cash_flow(&self, _ticker: &Ticker, _period_type: PeriodType) -> Result<StatementTable> {
        Ok(StatementTable::new(StatementKind::CashFlow)
            .with_row(
                "Total Cash From Operating Activities",
                vec![Some(90.0), Some(80.0)],
            )
            .with_row("Capital Expenditures", vec![Some(-30.0), Some(-35.0)]))
    }
}

/// Fails every request.
#[derive(Debug)]
struct BrokenProvider;

impl DataProvider for BrokenProvider {
    fn name(&self) -> &str {
        "Broken"
    }

    fn description(&self) -> &str {
        "Always fails"
    }

    fn supported_periods(&self) -> &[PeriodType] {
        &[PeriodType::Annual]
    }
}

#[async_trait]
impl FinancialsProvider for BrokenProvider {
    async fn quote(&self, _ticker: &Ticker) -> Result<QuoteInfo> {
        Err(ValuationError::Network("connection reset".to_string()))
    }

    async fn balance_sheet(
        &self,
        _ticker: &Ticker,
        _period_type: PeriodType,
    ) -> Result<StatementTable> {
        Err(ValuationError::Network("connection reset".to_string()))
    }

    async fn income_statement(
        &self,
        _ticker: &Ticker,
        _period_type: PeriodType,
    ) -> Result<StatementTable> {
        Err(ValuationError::Network("connection reset".to_string()))
    }

    async fn cash_flow(&self, _ticker: &Ticker, _period_type: PeriodType) -> Result<StatementTable> {
        Err(ValuationError::Network("connection reset".to_string()))
    }
}

/// Never reports a ticker as present, so only `append` sees the duplicate.
#[derive(Debug, Default)]
struct BlindStore {
    inner: InMemoryResultsStore,
}

#[async_trait]
impl ResultsStore for BlindStore {
    async fn contains(&self, _ticker: &Ticker) -> Result<bool> {
        Ok(false)
    }

    async fn get(&self, ticker: &Ticker) -> Result<Option<TickerReport>> {
        self.inner.get(ticker).await
    }

    async fn append(&self, report: TickerReport) -> Result<bool> {
        self.inner.append(report).await
    }

    async fn reports(&self) -> Result<Vec<TickerReport>> {
        self.inner.reports().await
    }

    async fn len(&self) -> Result<usize> {
        self.inner.len().await
    }
}

fn config() -> AnalyzerConfig {
    AnalyzerConfig::default().with_request_interval(Duration::ZERO)
}

fn analyzer(provider: Arc<ScriptedProvider>) -> Analyzer {
    Analyzer::new(Arc::new(InMemoryResultsStore::new()))
        .with_config(config())
        .with_provider(provider)
}

#[tokio::test]
async fn test_end_to_end_metrics() {
    let analyzer = analyzer(Arc::new(ScriptedProvider::default()));

    let summary = analyzer.analyze(&[Ticker::new("TEST")]).await.unwrap();
    assert_eq!(
        summary,
        AnalysisSummary {
            analyzed: 1,
            skipped: 0,
            failed: 0
        }
    );

    let reports = analyzer.reports().await.unwrap();
    let report = &reports[0];
    let record = &report.record;

    // E = 500, D = 120, Re = 0.0933, Rd after tax = 0.04345
    let expected_wacc = (500.0 / 620.0) * 0.0933 + (120.0 / 620.0) * 0.055 * 0.79;
    assert!((record.wacc.unwrap() - expected_wacc).abs() < 1e-12);
    assert_eq!(record.total_debt, Some(120.0));
    assert_eq!(record.equity, Some(400.0));
    assert!((record.roic.unwrap() - 60.0 / 520.0).abs() < 1e-12);
    assert!((record.eva.unwrap() - (60.0 / 520.0 - expected_wacc)).abs() < 1e-12);
    assert!((record.price_to_fcf.unwrap() - 50.0 / 9.0).abs() < 1e-12);
    assert_eq!(record.long_term_debt_to_equity, Some(0.25));

    let growth = report.growth.unwrap();
    assert!((growth.metrics.revenue.unwrap() - 20.0).abs() < 1e-9);
    assert_eq!(growth.outlook, GrowthOutlook::Solid);

    let liquidity = report.liquidity.unwrap();
    assert!((liquidity.metrics.quick_ratio.unwrap() - 1.4).abs() < 1e-12);
    assert!((liquidity.metrics.cash_ratio.unwrap() - 0.75).abs() < 1e-12);
    assert_eq!(liquidity.metrics.interest_coverage, Some(6.0));
    assert_eq!(liquidity.status, LiquidityStatus::Good);
}

#[tokio::test]
async fn test_reanalyzing_is_a_no_op() {
    let provider = Arc::new(ScriptedProvider::default());
    let analyzer = analyzer(provider.clone());

    analyzer.analyze_input("test").await.unwrap();
    let first = analyzer.reports().await.unwrap();

    let summary = analyzer.analyze_input("TEST, test").await.unwrap();
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.analyzed, 0);

    let second = analyzer.reports().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_duplicates_in_one_run_are_skipped() {
    let provider = Arc::new(ScriptedProvider::default());
    let analyzer = analyzer(provider.clone());

    let tickers = [Ticker::new("AAA"), Ticker::new("aaa"), Ticker::new("BBB")];
    let summary = analyzer.analyze(&tickers).await.unwrap();

    assert_eq!(summary.analyzed, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(analyzer.store().len().await.unwrap(), 2);
    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn test_failed_ticker_does_not_stop_the_run() {
    let analyzer = analyzer(Arc::new(ScriptedProvider::default()));

    let summary = analyzer.analyze_input("AAPL,ZZZZ,MSFT").await.unwrap();
    assert_eq!(summary.analyzed, 2);
    assert_eq!(summary.failed, 1);

    let reports = analyzer.reports().await.unwrap();
    let tickers: Vec<&str> = reports.iter().map(|r| r.ticker().as_str()).collect();
    assert_eq!(tickers, ["AAPL", "ZZZZ", "MSFT"]);

    let failed = &reports[1];
    assert!(failed.is_error());
    assert_eq!(
        failed.record.error.as_deref(),
        Some("Ticker not found: ZZZZ")
    );
    assert!(failed.record.wacc.is_none());
    assert!(failed.growth.is_none());
    assert!(failed.liquidity.is_none());

    let df = metrics_frame(&reports).unwrap();
    assert_eq!(df.height(), 3);
}

#[tokio::test]
async fn test_falls_back_to_next_provider() {
    let analyzer = Analyzer::new(Arc::new(InMemoryResultsStore::new()))
        .with_config(config())
        .with_provider(Arc::new(BrokenProvider))
        .with_provider(Arc::new(ScriptedProvider::default()));

    let summary = analyzer.analyze_input("AAPL").await.unwrap();
    assert_eq!(summary.analyzed, 1);
}

#[tokio::test]
async fn test_all_providers_failing_records_last_error() {
    let analyzer = Analyzer::new(Arc::new(InMemoryResultsStore::new()))
        .with_config(config())
        .with_provider(Arc::new(BrokenProvider));

    let summary = analyzer.analyze_input("AAPL").await.unwrap();
    assert_eq!(summary.failed, 1);

    let report = analyzer
        .store()
        .get(&Ticker::new("AAPL"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        report.record.error.as_deref(),
        Some("Network error: connection reset")
    );
}

#[tokio::test]
async fn test_no_provider_is_an_error() {
    let analyzer = Analyzer::new(Arc::new(InMemoryResultsStore::new()));

    let result = analyzer.analyze_input("AAPL").await;
    assert!(matches!(
        result,
        Err(ValuationError::ProviderNotConfigured(_))
    ));
}

#[tokio::test]
async fn test_empty_input_is_rejected() {
    let analyzer = analyzer(Arc::new(ScriptedProvider::default()));

    let result = analyzer.analyze_input(" , ").await;
    assert!(matches!(result, Err(ValuationError::InvalidParameter(_))));
}

#[tokio::test]
async fn test_custom_assumptions() {
    let assumptions = CapitalAssumptions::default().with_tax_rate(0.0);
    let analyzer = analyzer(Arc::new(ScriptedProvider::default())).with_assumptions(assumptions);

    analyzer.analyze_input("TEST").await.unwrap();
    let reports = analyzer.reports().await.unwrap();

    let expected_wacc = (500.0 / 620.0) * 0.0933 + (120.0 / 620.0) * 0.055;
    assert!((reports[0].record.wacc.unwrap() - expected_wacc).abs() < 1e-12);
}

#[tokio::test]
async fn test_rejected_append_is_not_counted_as_analyzed() {
    let store = Arc::new(BlindStore::default());
    store
        .append(TickerReport::failed(Ticker::new("AAPL"), "earlier failure"))
        .await
        .unwrap();

    let analyzer = Analyzer::new(store.clone())
        .with_config(config())
        .with_provider(Arc::new(ScriptedProvider::default()));

    let summary = analyzer.analyze_input("AAPL").await.unwrap();
    assert_eq!(summary.analyzed, 0);
    assert_eq!(summary.skipped, 1);

    let reports = analyzer.reports().await.unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].record.error.as_deref(), Some("earlier failure"));
}
