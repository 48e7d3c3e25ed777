#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/valuation/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Statement resolution and valuation ratio formulas.
//!
//! - [`resolver`] - Alias-aware line-item lookup with per-item fallbacks
//! - [`ResolvedFigures`] - The line items the ratios need, for one ticker
//! - [`capital`] - WACC, ROIC, EVA and P/FCF
//! - [`growth`] - Period-over-period growth and its classification
//! - [`liquidity`] - Liquidity/coverage ratios and their classification
//! - [`ValuationEngine`] - Turns a snapshot into a [`TickerReport`](valuation_core::TickerReport)

/// Capital-market assumptions used by the cost-of-capital formulas.
pub mod assumptions;
/// Cost of capital and return metrics.
pub mod capital;
/// Snapshot evaluation.
pub mod engine;
/// Line items resolved from the three statements.
pub mod figures;
/// Growth metrics and classification.
pub mod growth;
/// Liquidity metrics and classification.
pub mod liquidity;
/// Alias-aware statement lookup.
pub mod resolver;

pub use assumptions::CapitalAssumptions;
pub use engine::ValuationEngine;
pub use figures::{PeriodPair, ResolvedFigures};
pub use resolver::{Fallback, LineItem, LookupError};

/// Divides two optional operands.
///
/// Returns `None` if either operand is missing, the denominator is zero,
/// or the quotient is not finite.
pub(crate) fn checked_div(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    let (numerator, denominator) = (numerator?, denominator?);
    if denominator == 0.0 {
        return None;
    }
    let quotient = numerator / denominator;
    quotient.is_finite().then_some(quotient)
}
