//! Cost of capital and return metrics.
//!
//! ```text
//! Re   = Rf + beta * (Rm - Rf)
//! Rd   = cost_of_debt if D > 0 else 0
//! WACC = E/(E+D) * Re + D/(E+D) * Rd * (1 - Tc)
//! ROIC = EBIT / (D + equity)
//! EVA  = ROIC - WACC
//! ```
//!
//! `E` is market capitalisation and `D` is long-term plus short-term debt.

use crate::{assumptions::CapitalAssumptions, checked_div};

/// Cost of equity from the capital asset pricing model.
#[must_use]
pub fn cost_of_equity(beta: Option<f64>, assumptions: &CapitalAssumptions) -> Option<f64> {
    beta.map(|beta| assumptions.risk_free_rate + beta * assumptions.market_risk_premium())
}

/// Pre-tax cost of debt: the assumed rate when the company carries debt, else 0.
#[must_use]
pub fn cost_of_debt(total_debt: f64, assumptions: &CapitalAssumptions) -> f64 {
    if total_debt > 0.0 {
        assumptions.cost_of_debt
    } else {
        0.0
    }
}

/// Market capitalisation, price times shares outstanding.
#[must_use]
pub fn market_cap(price: Option<f64>, shares_outstanding: Option<f64>) -> Option<f64> {
    Some(price? * shares_outstanding?)
}

/// Long-term plus short-term debt.
#[must_use]
pub fn total_debt(long_term_debt: Option<f64>, short_term_debt: Option<f64>) -> Option<f64> {
    Some(long_term_debt? + short_term_debt?)
}

/// Weighted average cost of capital.
///
/// Returns `None` if beta, market cap or debt is missing, or if market cap
/// plus debt is zero.
#[must_use]
pub fn wacc(
    beta: Option<f64>,
    market_cap: Option<f64>,
    total_debt: Option<f64>,
    assumptions: &CapitalAssumptions,
) -> Option<f64> {
    let cost_of_equity = cost_of_equity(beta, assumptions)?;
    let (equity, debt) = (market_cap?, total_debt?);

    let capital = equity + debt;
    if capital == 0.0 {
        return None;
    }

    let cost_of_debt = cost_of_debt(debt, assumptions);
    Some(
        (equity / capital) * cost_of_equity
            + (debt / capital) * cost_of_debt * (1.0 - assumptions.tax_rate),
    )
}

/// Invested capital, total debt plus book equity.
#[must_use]
pub fn invested_capital(total_debt: Option<f64>, equity: Option<f64>) -> Option<f64> {
    Some(total_debt? + equity?)
}

/// Return on invested capital.
#[must_use]
pub fn roic(ebit: Option<f64>, invested_capital: Option<f64>) -> Option<f64> {
    checked_div(ebit, invested_capital)
}

/// Economic value added, as a spread: ROIC minus WACC.
#[must_use]
pub fn eva(roic: Option<f64>, wacc: Option<f64>) -> Option<f64> {
    Some(roic? - wacc?)
}

/// Long-term debt over book equity, as a plain ratio.
#[must_use]
pub fn long_term_debt_to_equity(
    long_term_debt: Option<f64>,
    equity: Option<f64>,
) -> Option<f64> {
    checked_div(long_term_debt, equity)
}

/// Price to free cash flow per share.
///
/// Free cash flow is approximated by operating cash flow.
#[must_use]
pub fn price_to_fcf(
    price: Option<f64>,
    operating_cash_flow: Option<f64>,
    shares_outstanding: Option<f64>,
) -> Option<f64> {
    let fcf_per_share = checked_div(operating_cash_flow, shares_outstanding);
    checked_div(price, fcf_per_share)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_cost_of_equity() {
        let assumptions = CapitalAssumptions::default();
        let re = cost_of_equity(Some(1.2), &assumptions).unwrap();
        assert!((re - 0.0933).abs() < EPS);
        assert_eq!(cost_of_equity(None, &assumptions), None);
    }

    #[test]
    fn test_long_term_debt_to_equity() {
        assert_eq!(long_term_debt_to_equity(Some(100.0), Some(400.0)), Some(0.25));
        assert_eq!(long_term_debt_to_equity(Some(100.0), Some(0.0)), None);
        assert_eq!(long_term_debt_to_equity(Some(100.0), None), None);
    }

    #[test]
    fn test_cost_of_debt() {
        let assumptions = CapitalAssumptions::default();
        assert_eq!(cost_of_debt(120.0, &assumptions), 0.055);
        assert_eq!(cost_of_debt(0.0, &assumptions), 0.0);
    }

    #[test]
    fn test_wacc_scenario() {
        // price 50, shares 10, beta 1.2, LTD 100, STD 20
        let assumptions = CapitalAssumptions::default();
        let e = market_cap(Some(50.0), Some(10.0));
        let d = total_debt(Some(100.0), Some(20.0));
        assert_eq!(e, Some(500.0));
        assert_eq!(d, Some(120.0));

        let wacc = wacc(Some(1.2), e, d, &assumptions).unwrap();
        let expected = (500.0 / 620.0) * 0.0933 + (120.0 / 620.0) * 0.055 * 0.79;
        assert!((wacc - expected).abs() < EPS);
        assert!((wacc - 0.08365).abs() < 1e-5);
    }

    #[test]
    fn test_wacc_without_debt_is_cost_of_equity() {
        let assumptions = CapitalAssumptions::default();
        let wacc = wacc(Some(1.0), Some(500.0), Some(0.0), &assumptions).unwrap();
        assert!((wacc - 0.085).abs() < EPS);
    }

    #[test]
    fn test_wacc_none_cases() {
        let assumptions = CapitalAssumptions::default();
        assert_eq!(wacc(None, Some(500.0), Some(120.0), &assumptions), None);
        assert_eq!(wacc(Some(1.2), None, Some(120.0), &assumptions), None);
        assert_eq!(wacc(Some(1.2), Some(500.0), None, &assumptions), None);
        assert_eq!(wacc(Some(1.2), Some(0.0), Some(0.0), &assumptions), None);
        assert_eq!(market_cap(Some(50.0), None), None);
        assert_eq!(market_cap(None, Some(10.0)), None);
    }

    #[test]
    fn test_wacc_debt_only() {
        let assumptions = CapitalAssumptions::default();
        let wacc = wacc(Some(1.2), Some(0.0), Some(100.0), &assumptions).unwrap();
        assert!((wacc - 0.055 * 0.79).abs() < EPS);
    }

    #[test]
    fn test_roic_and_eva() {
        let invested = invested_capital(Some(120.0), Some(380.0));
        assert_eq!(invested, Some(500.0));
        let roic = roic(Some(50.0), invested);
        assert_eq!(roic, Some(0.1));

        let eva = eva(roic, Some(0.08)).unwrap();
        assert!((eva - 0.02).abs() < EPS);

        assert_eq!(invested_capital(Some(120.0), None), None);
        assert_eq!(super::roic(Some(50.0), Some(0.0)), None);
        assert_eq!(super::roic(None, Some(500.0)), None);
        assert_eq!(super::eva(Some(0.1), None), None);
    }

    #[test]
    fn test_price_to_fcf() {
        // FCF per share = 200 / 10 = 20; P/FCF = 50 / 20
        assert_eq!(price_to_fcf(Some(50.0), Some(200.0), Some(10.0)), Some(2.5));
        assert_eq!(price_to_fcf(Some(50.0), Some(0.0), Some(10.0)), None);
        assert_eq!(price_to_fcf(Some(50.0), Some(200.0), Some(0.0)), None);
        assert_eq!(price_to_fcf(None, Some(200.0), Some(10.0)), None);
    }
}
