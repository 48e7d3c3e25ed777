#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/valuation/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Yahoo Finance data provider.
//!
//! This crate provides a Yahoo Finance data provider that implements the
//! [`DataProvider`] and [`FinancialsProvider`] traits from `valuation-core`.
//!
//! # Features
//!
//! - Quote, profile and key-statistics fields from the quote summary API
//! - Annual and quarterly balance sheet, income statement and cash flow
//! - A whole snapshot in a single request
//! - Built-in rate limiting (1 request per second by default)
//!
//! # Example
//!
//! ```no_run
//! use valuation_yahoo::YahooProvider;
//! use valuation_core::{FinancialsProvider, PeriodType, Ticker};
//!
//! # async fn example() -> valuation_core::Result<()> {
//! let provider = YahooProvider::new();
//! let ticker = Ticker::new("AAPL");
//!
//! let snapshot = provider.fetch_snapshot(&ticker, PeriodType::Annual).await?;
//! println!("{} balance sheet rows", snapshot.balance_sheet.len());
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use tokio::time::sleep;
use tracing::debug;
use valuation_core::{
    DataProvider, FinancialSnapshot, FinancialsProvider, PeriodType, QuoteInfo, Result,
    StatementKind, StatementTable, Ticker, ValuationError,
};

/// Yahoo Finance quote summary API base URL.
const QUOTE_SUMMARY_URL: &str = "https://query2.finance.yahoo.com/v10/finance/quoteSummary";

/// Default rate limit delay in milliseconds.
const DEFAULT_RATE_LIMIT_MS: u64 = 1000;

/// User agent for HTTP requests.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

/// Provider name, also used in rate limit errors.
const PROVIDER_NAME: &str = "Yahoo Finance";

/// Modules that make up [`QuoteInfo`].
const QUOTE_MODULES: &[&str] = &[
    "price",
    "assetProfile",
    "summaryDetail",
    "defaultKeyStatistics",
    "financialData",
];

/// Statement fields that are not line items.
const NON_LINE_ITEM_FIELDS: &[&str] = &["maxAge", "endDate"];

/// Row names that do not follow the camelCase to Title Case rule.
const LABEL_OVERRIDES: &[(&str, &str)] = &[("ebit", "EBIT")];

/// Yahoo Finance data provider.
///
/// Implements [`DataProvider`] and [`FinancialsProvider`].
#[derive(Debug)]
pub struct YahooProvider {
    client: reqwest::Client,
    rate_limit_ms: u64,
    last_request_time: AtomicU64,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider with default settings.
    ///
    /// Uses built-in rate limiting of 1 request per second.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rate_limit(Duration::from_millis(DEFAULT_RATE_LIMIT_MS))
    }

    /// Create a new Yahoo Finance provider with a custom HTTP client.
    ///
    /// Uses the provided client for all HTTP requests. Rate limiting
    /// is still applied.
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            rate_limit_ms: DEFAULT_RATE_LIMIT_MS,
            last_request_time: AtomicU64::new(0),
        }
    }

    /// Create a new Yahoo Finance provider with custom rate limiting.
    #[must_use]
    pub fn with_rate_limit(rate_limit: Duration) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            rate_limit_ms: rate_limit.as_millis() as u64,
            last_request_time: AtomicU64::new(0),
        }
    }

    /// Apply rate limiting before making a request.
    async fn apply_rate_limit(&self) {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        let last = self.last_request_time.load(Ordering::Relaxed);
        let elapsed = now.saturating_sub(last);

        if elapsed < self.rate_limit_ms {
            let wait_time = self.rate_limit_ms - elapsed;
            debug!("Rate limiting: waiting {}ms", wait_time);
            sleep(Duration::from_millis(wait_time)).await;
        }

        self.last_request_time.store(
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_millis() as u64,
            Ordering::Relaxed,
        );
    }

    /// Build the quote summary URL for a ticker and a set of modules.
    fn build_url(&self, ticker: &Ticker, modules: &[&str]) -> String {
        format!(
            "{}/{}?modules={}",
            QUOTE_SUMMARY_URL,
            ticker.as_str(),
            modules.join(",")
        )
    }

    /// Fetch the requested quote summary modules for a ticker.
    async fn fetch_quote_summary(
        &self,
        ticker: &Ticker,
        modules: &[&str],
    ) -> Result<QuoteSummaryData> {
        self.apply_rate_limit().await;

        let url = self.build_url(ticker, modules);
        debug!("Fetching quote summary: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ValuationError::Network(e.to_string()))?;

        match response.status() {
            reqwest::StatusCode::TOO_MANY_REQUESTS => {
                return Err(ValuationError::RateLimited {
                    provider: PROVIDER_NAME.to_string(),
                    retry_after: Some(Duration::from_secs(60)),
                });
            }
            reqwest::StatusCode::NOT_FOUND => {
                return Err(ValuationError::TickerNotFound(ticker.to_string()));
            }
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                return Err(ValuationError::AuthenticationFailed(
                    PROVIDER_NAME.to_string(),
                ));
            }
            status if !status.is_success() => {
                return Err(ValuationError::Network(format!(
                    "HTTP {} for {}",
                    status, ticker
                )));
            }
            _ => {}
        }

        let summary: QuoteSummaryResponse = response
            .json()
            .await
            .map_err(|e| ValuationError::Parse(e.to_string()))?;

        parse_quote_summary(ticker, summary)
    }
}

impl Default for YahooProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DataProvider for YahooProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn description(&self) -> &str {
        "Yahoo Finance quote fields and annual or quarterly financial statements"
    }

    fn supported_periods(&self) -> &[PeriodType] {
        &[PeriodType::Annual, PeriodType::Quarterly]
    }
}

#[async_trait]
impl FinancialsProvider for YahooProvider {
    async fn quote(&self, ticker: &Ticker) -> Result<QuoteInfo> {
        let data = self.fetch_quote_summary(ticker, QUOTE_MODULES).await?;
        Ok(data.quote_info())
    }

    async fn balance_sheet(
        &self,
        ticker: &Ticker,
        period_type: PeriodType,
    ) -> Result<StatementTable> {
        self.fetch_statement(ticker, StatementKind::BalanceSheet, period_type)
            .await
    }

    async fn income_statement(
        &self,
        ticker: &Ticker,
        period_type: PeriodType,
    ) -> Result<StatementTable> {
        self.fetch_statement(ticker, StatementKind::IncomeStatement, period_type)
            .await
    }

    async fn cash_flow(&self, ticker: &Ticker, period_type: PeriodType) -> Result<StatementTable> {
        self.fetch_statement(ticker, StatementKind::CashFlow, period_type)
            .await
    }

    async fn fetch_snapshot(
        &self,
        ticker: &Ticker,
        period_type: PeriodType,
    ) -> Result<FinancialSnapshot> {
        let mut modules = QUOTE_MODULES.to_vec();
        modules.extend(
            [
                StatementKind::BalanceSheet,
                StatementKind::IncomeStatement,
                StatementKind::CashFlow,
            ]
            .map(|kind| statement_module(kind, period_type)),
        );

        let data = self.fetch_quote_summary(ticker, &modules).await?;
        Ok(data.snapshot(ticker, period_type))
    }
}

impl YahooProvider {
    /// Fetch a single statement.
    async fn fetch_statement(
        &self,
        ticker: &Ticker,
        kind: StatementKind,
        period_type: PeriodType,
    ) -> Result<StatementTable> {
        let module = statement_module(kind, period_type);
        let data = self.fetch_quote_summary(ticker, &[module]).await?;
        data.statement(ticker, kind, period_type)
    }
}

/// Quote summary module holding a statement history.
const fn statement_module(kind: StatementKind, period_type: PeriodType) -> &'static str {
    match (kind, period_type) {
        (StatementKind::BalanceSheet, PeriodType::Annual) => "balanceSheetHistory",
        (StatementKind::BalanceSheet, PeriodType::Quarterly) => "balanceSheetHistoryQuarterly",
        (StatementKind::IncomeStatement, PeriodType::Annual) => "incomeStatementHistory",
        (StatementKind::IncomeStatement, PeriodType::Quarterly) => {
            "incomeStatementHistoryQuarterly"
        }
        (StatementKind::CashFlow, PeriodType::Annual) => "cashflowStatementHistory",
        (StatementKind::CashFlow, PeriodType::Quarterly) => "cashflowStatementHistoryQuarterly",
    }
}

/// Extract the single result of a quote summary response.
fn parse_quote_summary(ticker: &Ticker, response: QuoteSummaryResponse) -> Result<QuoteSummaryData> {
    let summary = response.quote_summary;

    if let Some(error) = summary.error {
        if error.code == "Not Found" {
            return Err(ValuationError::TickerNotFound(ticker.to_string()));
        }
        return Err(ValuationError::Other(format!(
            "{}: {}",
            error.code, error.description
        )));
    }

    summary
        .result
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or_else(|| ValuationError::TickerNotFound(ticker.to_string()))
}

/// Convert a list of per-period statements into a [`StatementTable`].
///
/// Periods are ordered by end date, most recent first. Every numeric field
/// becomes a row; a field missing from some periods leaves those cells empty.
fn build_statement(kind: StatementKind, statements: &[Map<String, Value>]) -> StatementTable {
    let mut periods: Vec<&Map<String, Value>> = statements.iter().collect();
    periods.sort_by_key(|period| std::cmp::Reverse(end_timestamp(period)));

    let period_ends: Vec<NaiveDate> = periods
        .iter()
        .filter_map(|period| end_timestamp(period))
        .filter_map(|ts| Utc.timestamp_opt(ts, 0).single())
        .map(|dt| dt.date_naive())
        .collect();

    let mut rows: HashMap<String, Vec<Option<f64>>> = HashMap::new();
    for (index, period) in periods.iter().enumerate() {
        for (field, value) in period.iter() {
            if NON_LINE_ITEM_FIELDS.contains(&field.as_str()) {
                continue;
            }
            let row = rows
                .entry(line_item_label(field))
                .or_insert_with(|| vec![None; periods.len()]);
            row[index] = raw_number(value);
        }
    }

    let mut table = StatementTable::new(kind).with_period_ends(period_ends);
    for (label, values) in rows {
        table.insert_row(label, values);
    }
    table
}

/// Turn a camelCase field name into a Title Case row name.
fn line_item_label(field: &str) -> String {
    if let Some((_, label)) = LABEL_OVERRIDES.iter().find(|(name, _)| *name == field) {
        return (*label).to_string();
    }

    let mut label = String::with_capacity(field.len() + 8);
    for (i, c) in field.chars().enumerate() {
        if i == 0 {
            label.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            label.push(' ');
            label.push(c);
        } else {
            label.push(c);
        }
    }
    label
}

/// Read the `raw` number of a `{"raw": .., "fmt": ..}` value.
fn raw_number(value: &Value) -> Option<f64> {
    value.get("raw")?.as_f64()
}

/// Read the period end timestamp of a statement.
fn end_timestamp(period: &Map<String, Value>) -> Option<i64> {
    period.get("endDate")?.get("raw")?.as_i64()
}

// ============================================================================
// Yahoo Finance API Response Types
// ============================================================================

/// Quote Summary API response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteSummaryResponse {
    quote_summary: QuoteSummaryResult,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryResult {
    result: Option<Vec<QuoteSummaryData>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    description: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteSummaryData {
    price: Option<PriceModule>,
    asset_profile: Option<AssetProfile>,
    summary_detail: Option<SummaryDetail>,
    default_key_statistics: Option<KeyStatistics>,
    financial_data: Option<FinancialData>,
    balance_sheet_history: Option<BalanceSheetHistory>,
    balance_sheet_history_quarterly: Option<BalanceSheetHistory>,
    income_statement_history: Option<IncomeStatementHistory>,
    income_statement_history_quarterly: Option<IncomeStatementHistory>,
    cashflow_statement_history: Option<CashflowStatementHistory>,
    cashflow_statement_history_quarterly: Option<CashflowStatementHistory>,
}

impl QuoteSummaryData {
    fn quote_info(&self) -> QuoteInfo {
        let price = self.price.as_ref();
        let profile = self.asset_profile.as_ref();
        let detail = self.summary_detail.as_ref();
        let stats = self.default_key_statistics.as_ref();
        let financial = self.financial_data.as_ref();

        QuoteInfo {
            long_name: price.and_then(|p| p.long_name.clone().or_else(|| p.short_name.clone())),
            sector: profile.and_then(|p| p.sector.clone()),
            country: profile.and_then(|p| p.country.clone()),
            industry: profile.and_then(|p| p.industry.clone()),
            current_price: financial
                .and_then(|f| raw(f.current_price))
                .or_else(|| price.and_then(|p| raw(p.regular_market_price))),
            shares_outstanding: stats.and_then(|s| raw(s.shares_outstanding)),
            beta: detail
                .and_then(|d| raw(d.beta))
                .or_else(|| stats.and_then(|s| raw(s.beta))),
            trailing_pe: detail.and_then(|d| raw(d.trailing_pe)),
            price_to_book: stats.and_then(|s| raw(s.price_to_book)),
            trailing_eps: stats.and_then(|s| raw(s.trailing_eps)),
            forward_eps: stats.and_then(|s| raw(s.forward_eps)),
            dividend_rate: detail.and_then(|d| raw(d.dividend_rate)),
            dividend_yield: detail.and_then(|d| raw(d.dividend_yield)),
            payout_ratio: detail.and_then(|d| raw(d.payout_ratio)),
            return_on_assets: financial.and_then(|f| raw(f.return_on_assets)),
            return_on_equity: financial.and_then(|f| raw(f.return_on_equity)),
            current_ratio: financial.and_then(|f| raw(f.current_ratio)),
            // Yahoo publishes total debt/equity only; the engine derives this one.
            long_term_debt_to_equity: None,
            debt_to_equity: financial.and_then(|f| raw(f.debt_to_equity)),
            operating_margin: financial.and_then(|f| raw(f.operating_margins)),
            profit_margin: financial.and_then(|f| raw(f.profit_margins)),
        }
    }

    /// Builds a snapshot; a missing statement module yields an empty table.
    fn snapshot(&self, ticker: &Ticker, period_type: PeriodType) -> FinancialSnapshot {
        let statement = |kind: StatementKind| {
            self.statement(ticker, kind, period_type)
                .unwrap_or_else(|e| {
                    debug!(ticker = %ticker, error = %e, "Using empty statement");
                    StatementTable::new(kind)
                })
        };

        FinancialSnapshot::new(
            ticker.clone(),
            self.quote_info(),
            statement(StatementKind::BalanceSheet),
            statement(StatementKind::IncomeStatement),
            statement(StatementKind::CashFlow),
        )
    }

    fn statement(
        &self,
        ticker: &Ticker,
        kind: StatementKind,
        period_type: PeriodType,
    ) -> Result<StatementTable> {
        let quarterly = period_type == PeriodType::Quarterly;
        let statements = match kind {
            StatementKind::BalanceSheet => {
                let history = if quarterly {
                    &self.balance_sheet_history_quarterly
                } else {
                    &self.balance_sheet_history
                };
                history.as_ref().map(|h| h.balance_sheet_statements.as_slice())
            }
            StatementKind::IncomeStatement => {
                let history = if quarterly {
                    &self.income_statement_history_quarterly
                } else {
                    &self.income_statement_history
                };
                history.as_ref().map(|h| h.income_statement_history.as_slice())
            }
            StatementKind::CashFlow => {
                let history = if quarterly {
                    &self.cashflow_statement_history_quarterly
                } else {
                    &self.cashflow_statement_history
                };
                history.as_ref().map(|h| h.cashflow_statements.as_slice())
            }
        };

        let statements = statements.ok_or_else(|| ValuationError::StatementUnavailable {
            ticker: ticker.to_string(),
            statement: kind,
        })?;

        Ok(build_statement(kind, statements))
    }
}

/// A `{"raw": .., "fmt": ..}` value; Yahoo sends `{}` when there is none.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
struct RawValue {
    raw: Option<f64>,
}

fn raw(value: Option<RawValue>) -> Option<f64> {
    value.and_then(|v| v.raw)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceModule {
    long_name: Option<String>,
    short_name: Option<String>,
    regular_market_price: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
struct AssetProfile {
    sector: Option<String>,
    industry: Option<String>,
    country: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryDetail {
    beta: Option<RawValue>,
    #[serde(rename = "trailingPE")]
    trailing_pe: Option<RawValue>,
    dividend_rate: Option<RawValue>,
    dividend_yield: Option<RawValue>,
    payout_ratio: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeyStatistics {
    shares_outstanding: Option<RawValue>,
    price_to_book: Option<RawValue>,
    trailing_eps: Option<RawValue>,
    forward_eps: Option<RawValue>,
    beta: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FinancialData {
    current_price: Option<RawValue>,
    return_on_assets: Option<RawValue>,
    return_on_equity: Option<RawValue>,
    current_ratio: Option<RawValue>,
    debt_to_equity: Option<RawValue>,
    operating_margins: Option<RawValue>,
    profit_margins: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BalanceSheetHistory {
    #[serde(default)]
    balance_sheet_statements: Vec<Map<String, Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IncomeStatementHistory {
    #[serde(default)]
    income_statement_history: Vec<Map<String, Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CashflowStatementHistory {
    #[serde(default)]
    cashflow_statements: Vec<Map<String, Value>>,
}
