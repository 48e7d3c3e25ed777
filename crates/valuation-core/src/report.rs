//! Derived per-ticker output types.
//!
//! This module defines the rows produced by the ratio engine:
//!
//! - [`MetricRecord`] - Identity fields plus valuation and quality ratios
//! - [`GrowthSection`] - Period-over-period growth and its classification
//! - [`LiquiditySection`] - Liquidity and coverage ratios and their classification
//! - [`TickerReport`] - All of the above for one ticker

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Ticker;

/// The main output row for a ticker.
///
/// Any numeric field may be `None` when an input was missing or the ratio
/// was undefined. A record built from a failed fetch carries only the ticker
/// and [`error`](Self::error).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    /// Ticker symbol.
    pub ticker: Ticker,

    // Identity
    /// Company name.
    pub name: Option<String>,
    /// Business sector.
    pub sector: Option<String>,
    /// Country of incorporation.
    pub country: Option<String>,
    /// Industry within the sector.
    pub industry: Option<String>,

    // Valuation
    /// Current share price.
    pub price: Option<f64>,
    /// Price-to-earnings ratio.
    pub pe_ratio: Option<f64>,
    /// Price-to-book ratio.
    pub pb_ratio: Option<f64>,
    /// Price to free cash flow per share.
    pub price_to_fcf: Option<f64>,

    // Dividends
    /// Annual dividend per share.
    pub dividend_rate: Option<f64>,
    /// Dividend yield.
    pub dividend_yield: Option<f64>,
    /// Dividend payout ratio.
    pub payout_ratio: Option<f64>,

    // Quality
    /// Return on assets.
    pub roa: Option<f64>,
    /// Return on equity.
    pub roe: Option<f64>,
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

    // Cost of capital
    /// Weighted average cost of capital.
    pub wacc: Option<f64>,
    /// Return on invested capital.
    pub roic: Option<f64>,
    /// Economic value added, ROIC minus WACC.
    pub eva: Option<f64>,

    // Internal, not part of the displayed table
    /// Long-term plus short-term debt, in reporting currency.
    pub total_debt: Option<f64>,
    /// Total stockholder equity, in reporting currency.
    pub equity: Option<f64>,

    /// Provider error message when the ticker could not be fetched.
    pub error: Option<String>,
}

impl MetricRecord {
    /// Creates an empty record for a ticker.
    #[must_use]
    pub fn new(ticker: Ticker) -> Self {
        Self {
            ticker,
            ..Default::default()
        }
    }

    /// Creates an error record: the ticker and a message, every metric absent.
    #[must_use]
    pub fn failed(ticker: Ticker, error: impl Into<String>) -> Self {
        Self {
            ticker,
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// Returns true if this record captures a fetch failure.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Period-over-period growth, in percent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GrowthMetrics {
    /// Total revenue growth.
    pub revenue: Option<f64>,
    /// EPS growth.
    ///
    /// Unlike the other fields this compares forward (estimated) EPS with
    /// trailing EPS rather than two reported periods, so it mixes an
    /// estimate into an otherwise historical set.
    pub eps: Option<f64>,
    /// Operating cash-flow growth.
    pub operating_cash_flow: Option<f64>,
    /// Capital expenditure growth.
    pub capital_expenditures: Option<f64>,
    /// Book value (stockholder equity) growth.
    pub book_value: Option<f64>,
}

impl GrowthMetrics {
    /// Returns the present values in field order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        [
            self.revenue,
            self.eps,
            self.operating_cash_flow,
            self.capital_expenditures,
            self.book_value,
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Returns true if no growth value could be computed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }
}

/// Classification of a ticker's growth profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrowthOutlook {
    /// Every computed growth value is above 5%.
    Solid,
    /// At least one computed growth value is negative.
    Contraction,
    /// Neither of the above.
    Moderate,
}

impl fmt::Display for GrowthOutlook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solid => write!(f, "solid growth"),
            Self::Contraction => write!(f, "contraction"),
            Self::Moderate => write!(f, "moderate growth — monitor"),
        }
    }
}

/// Growth metrics together with their classification.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrowthSection {
    /// Growth values in percent.
    pub metrics: GrowthMetrics,
    /// Classification of the values.
    pub outlook: GrowthOutlook,
}

/// Liquidity and coverage ratios for the current period.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LiquidityMetrics {
    /// (current assets - inventory) / current liabilities.
    pub quick_ratio: Option<f64>,
    /// cash / current liabilities.
    pub cash_ratio: Option<f64>,
    /// current assets - current liabilities.
    pub working_capital: Option<f64>,
    /// EBIT / |interest expense|.
    pub interest_coverage: Option<f64>,
    /// operating cash flow / current liabilities.
    pub operating_cash_flow_ratio: Option<f64>,
}

/// Classification of a ticker's short-term financial health.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LiquidityStatus {
    /// Comfortable quick ratio, cash ratio and interest coverage.
    Good,
    /// Quick ratio below 1 or interest coverage below 1.5.
    Risk,
    /// Neither of the above.
    Fragile,
}

impl fmt::Display for LiquidityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Good => write!(f, "good"),
            Self::Risk => write!(f, "liquidity risk"),
            Self::Fragile => write!(f, "acceptable but fragile"),
        }
    }
}

/// Liquidity metrics together with their classification.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LiquiditySection {
    /// Liquidity and coverage ratios.
    pub metrics: LiquidityMetrics,
    /// Classification of the ratios.
    pub status: LiquidityStatus,
}

/// Full analysis result for one ticker.
///
/// Failed tickers carry an error [`MetricRecord`] and no sections.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TickerReport {
    /// Main metrics row.
    pub record: MetricRecord,
    /// Growth section, absent when the fetch failed.
    pub growth: Option<GrowthSection>,
    /// Liquidity section, absent when the fetch failed.
    pub liquidity: Option<LiquiditySection>,
    /// When the report was produced.
    pub analyzed_at: DateTime<Utc>,
}

impl TickerReport {
    /// Creates a report for a successfully analyzed ticker.
    #[must_use]
    pub fn new(record: MetricRecord, growth: GrowthSection, liquidity: LiquiditySection) -> Self {
        Self {
            record,
            growth: Some(growth),
            liquidity: Some(liquidity),
            analyzed_at: Utc::now(),
        }
    }

    /// Creates a report for a ticker whose data could not be fetched.
    #[must_use]
    pub fn failed(ticker: Ticker, error: impl Into<String>) -> Self {
        Self {
            record: MetricRecord::failed(ticker, error),
            growth: None,
            liquidity: None,
            analyzed_at: Utc::now(),
        }
    }

    /// Returns the ticker of this report.
    #[must_use]
    pub const fn ticker(&self) -> &Ticker {
        &self.record.ticker
    }

    /// Returns true if the ticker could not be fetched.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.record.is_error()
    }
}
