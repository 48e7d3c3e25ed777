//! Capital-market assumptions.

use serde::{Deserialize, Serialize};

/// Default risk-free rate.
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.0435;

/// Default expected market return.
pub const DEFAULT_MARKET_RETURN: f64 = 0.085;

/// Default corporate tax rate.
pub const DEFAULT_TAX_RATE: f64 = 0.21;

/// Default pre-tax cost of debt for companies carrying debt.
pub const DEFAULT_COST_OF_DEBT: f64 = 0.055;

/// Fixed rates feeding the cost-of-capital formulas.
///
/// These are configuration, not market data: they are the same for every
/// ticker in a session.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CapitalAssumptions {
    /// Risk-free rate (Rf).
    pub risk_free_rate: f64,
    /// Expected market return (Rm).
    pub market_return: f64,
    /// Corporate tax rate (Tc).
    pub tax_rate: f64,
    /// Pre-tax cost of debt (Rd), applied only when total debt is positive.
    pub cost_of_debt: f64,
}

impl Default for CapitalAssumptions {
    fn default() -> Self {
        Self {
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            market_return: DEFAULT_MARKET_RETURN,
            tax_rate: DEFAULT_TAX_RATE,
            cost_of_debt: DEFAULT_COST_OF_DEBT,
        }
    }
}

impl CapitalAssumptions {
    /// Sets the risk-free rate.
    #[must_use]
    pub const fn with_risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = rate;
        self
    }

    /// Sets the expected market return.
    #[must_use]
    pub const fn with_market_return(mut self, rate: f64) -> Self {
        self.market_return = rate;
        self
    }

    /// Sets the corporate tax rate.
    #[must_use]
    pub const fn with_tax_rate(mut self, rate: f64) -> Self {
        self.tax_rate = rate;
        self
    }

    /// Sets the pre-tax cost of debt.
    #[must_use]
    pub const fn with_cost_of_debt(mut self, rate: f64) -> Self {
        self.cost_of_debt = rate;
        self
    }

    /// Returns the market risk premium, Rm - Rf.
    #[must_use]
    pub fn market_risk_premium(&self) -> f64 {
        self.market_return - self.risk_free_rate
    }
}
