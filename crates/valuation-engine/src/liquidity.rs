//! Liquidity metrics and classification.

use valuation_core::{LiquidityMetrics, LiquiditySection, LiquidityStatus};

use crate::{checked_div, figures::ResolvedFigures};

/// Minimum quick ratio for a "good" rating; below it is a risk.
pub const QUICK_RATIO_FLOOR: f64 = 1.0;

/// Minimum cash ratio for a "good" rating.
pub const CASH_RATIO_FLOOR: f64 = 0.5;

/// Interest coverage must exceed this for a "good" rating.
pub const COMFORTABLE_COVERAGE: f64 = 3.0;

/// Interest coverage below this is a risk.
pub const MINIMUM_COVERAGE: f64 = 1.5;

/// (current assets - inventory) / current liabilities.
#[must_use]
pub fn quick_ratio(
    current_assets: Option<f64>,
    inventory: Option<f64>,
    current_liabilities: Option<f64>,
) -> Option<f64> {
    checked_div(Some(current_assets? - inventory?), current_liabilities)
}

/// cash / current liabilities.
#[must_use]
pub fn cash_ratio(cash: Option<f64>, current_liabilities: Option<f64>) -> Option<f64> {
    checked_div(cash, current_liabilities)
}

/// current assets - current liabilities.
#[must_use]
pub fn working_capital(
    current_assets: Option<f64>,
    current_liabilities: Option<f64>,
) -> Option<f64> {
    Some(current_assets? - current_liabilities?)
}

/// EBIT / |interest expense|.
///
/// Providers report interest expense with either sign, hence the absolute value.
#[must_use]
pub fn interest_coverage(ebit: Option<f64>, interest_expense: Option<f64>) -> Option<f64> {
    checked_div(ebit, interest_expense.map(f64::abs))
}

/// operating cash flow / current liabilities.
#[must_use]
pub fn operating_cash_flow_ratio(
    operating_cash_flow: Option<f64>,
    current_liabilities: Option<f64>,
) -> Option<f64> {
    checked_div(operating_cash_flow, current_liabilities)
}

/// Computes the five liquidity metrics from current-period figures.
///
/// Each metric is computed on its own; a missing operand only blanks the
/// metrics that use it.
#[must_use]
pub fn liquidity_metrics(figures: &ResolvedFigures) -> LiquidityMetrics {
    LiquidityMetrics {
        quick_ratio: quick_ratio(
            figures.current_assets,
            figures.inventory,
            figures.current_liabilities,
        ),
        cash_ratio: cash_ratio(figures.cash, figures.current_liabilities),
        working_capital: working_capital(figures.current_assets, figures.current_liabilities),
        interest_coverage: interest_coverage(figures.ebit, figures.interest_expense),
        operating_cash_flow_ratio: operating_cash_flow_ratio(
            figures.operating_cash_flow.current,
            figures.current_liabilities,
        ),
    }
}

/// Classifies liquidity metrics.
///
/// Checked in order:
///
/// 1. Good: quick ratio >= 1 AND cash ratio >= 0.5 AND interest coverage > 3.
/// 2. Risk: quick ratio < 1 OR interest coverage < 1.5.
/// 3. Otherwise acceptable but fragile.
///
/// A missing metric fails every comparison it takes part in, so "good"
/// needs all three present while a single low quick ratio or coverage is
/// enough for "risk".
#[must_use]
pub fn classify(metrics: &LiquidityMetrics) -> LiquidityStatus {
    let holds = |value: Option<f64>, test: fn(f64) -> bool| value.is_some_and(test);

    let good = holds(metrics.quick_ratio, |q| q >= QUICK_RATIO_FLOOR)
        && holds(metrics.cash_ratio, |c| c >= CASH_RATIO_FLOOR)
        && holds(metrics.interest_coverage, |i| i > COMFORTABLE_COVERAGE);
    if good {
        return LiquidityStatus::Good;
    }

    let risk = holds(metrics.quick_ratio, |q| q < QUICK_RATIO_FLOOR)
        || holds(metrics.interest_coverage, |i| i < MINIMUM_COVERAGE);
    if risk {
        return LiquidityStatus::Risk;
    }

    LiquidityStatus::Fragile
}

/// Computes and classifies the liquidity metrics.
#[must_use]
pub fn section(figures: &ResolvedFigures) -> LiquiditySection {
    let metrics = liquidity_metrics(figures);
    LiquiditySection {
        status: classify(&metrics),
        metrics,
    }
}
