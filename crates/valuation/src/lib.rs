#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/valuation/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Per-ticker valuation analysis.
//!
//! This crate re-exports the core types, the ratio engine and the provider
//! implementations, and provides an [`Analyzer`] that runs the sequential
//! fetch and evaluate loop over a list of tickers.
//!
//! # Features
//!
//! - `yahoo` - Yahoo Finance provider for quotes and financial statements

/// Sequential per-ticker analysis with provider fallback.
pub mod analyzer;
/// Tabular presentation of reports.
pub mod table;
/// Ticker list parsing.
pub mod tickers;

// Core types and traits
pub use valuation_core::*;

// Ratio engine
pub use valuation_engine::{CapitalAssumptions, ValuationEngine};

// Store implementations
pub use valuation_store::InMemoryResultsStore;

// Providers
#[cfg(feature = "yahoo")]
pub use valuation_yahoo::YahooProvider;

pub use analyzer::{AnalysisSummary, Analyzer, AnalyzerConfig};
pub use table::{growth_frame, liquidity_frame, metrics_frame};
pub use tickers::{MAX_TICKERS, parse_tickers};
