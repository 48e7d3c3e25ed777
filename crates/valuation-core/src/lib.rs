#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/valuation/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for per-ticker valuation analysis.
//!
//! This crate provides the foundational abstractions:
//!
//! - [`DataProvider`](provider::DataProvider) - Base trait for all providers
//! - [`FinancialsProvider`](provider::FinancialsProvider) - Quote fields and financial statements
//! - [`ResultsStore`](store::ResultsStore) - Session-scoped results collection

/// Error types for data and analysis operations.
pub mod error;
/// Statement period selectors.
pub mod period;
/// Provider traits for fetching quotes and statements.
pub mod provider;
/// Derived per-ticker output types.
pub mod report;
/// Results store trait.
pub mod store;
/// Raw input types (Ticker, StatementTable, QuoteInfo, etc.).
pub mod types;

// Re-export commonly used items at crate root
pub use error::{Result, ValuationError};
pub use period::{Period, PeriodType};
pub use provider::{DataProvider, FinancialsProvider};
pub use report::{
    GrowthMetrics, GrowthOutlook, GrowthSection, LiquidityMetrics, LiquiditySection,
    LiquidityStatus, MetricRecord, TickerReport,
};
pub use store::ResultsStore;
pub use types::{FinancialSnapshot, QuoteInfo, StatementKind, StatementTable, Ticker};
