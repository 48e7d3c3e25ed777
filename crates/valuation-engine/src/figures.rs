//! Line items resolved from the three statements.

use serde::{Deserialize, Serialize};
use valuation_core::{FinancialSnapshot, Period, StatementTable};

use crate::{
    capital,
    resolver::{self, LineItem},
};

/// Current and prior values of a line item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodPair {
    /// Most recent period.
    pub current: Option<f64>,
    /// Period before the most recent one.
    pub prior: Option<f64>,
}

impl PeriodPair {
    /// Resolves both periods of a line item.
    #[must_use]
    pub fn resolve(table: &StatementTable, item: &LineItem) -> Self {
        Self {
            current: resolver::resolve(table, item, Period::Current),
            prior: resolver::resolve(table, item, Period::Prior),
        }
    }
}

/// The statement figures the ratio engine consumes, for one ticker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedFigures {
    // Balance sheet
    /// Long-term debt.
    pub long_term_debt: Option<f64>,
    /// Short-term debt.
    pub short_term_debt: Option<f64>,
    /// Total stockholder equity.
    pub equity: PeriodPair,
    /// Cash.
    pub cash: Option<f64>,
    /// Total current assets.
    pub current_assets: Option<f64>,
    /// Current liabilities.
    pub current_liabilities: Option<f64>,
    /// Inventory.
    pub inventory: Option<f64>,

    // Income statement
    /// Earnings before interest and taxes.
    pub ebit: Option<f64>,
    /// Total revenue.
    pub revenue: PeriodPair,
    /// Interest expense.
    pub interest_expense: Option<f64>,

    // Cash-flow statement
    /// Cash from operating activities.
    pub operating_cash_flow: PeriodPair,
    /// Capital expenditures.
    pub capital_expenditures: PeriodPair,
}

impl ResolvedFigures {
    /// Resolves every figure from a snapshot's statements.
    ///
    /// Each figure is resolved independently; one missing or malformed row
    /// only affects its own figure.
    #[must_use]
    pub fn resolve(snapshot: &FinancialSnapshot) -> Self {
        let bs = &snapshot.balance_sheet;
        let is = &snapshot.income_statement;
        let cf = &snapshot.cash_flow;
        let current = |table: &StatementTable, item: &LineItem| {
            resolver::resolve(table, item, Period::Current)
        };

        Self {
            long_term_debt: current(bs, &resolver::LONG_TERM_DEBT),
            short_term_debt: current(bs, &resolver::SHORT_TERM_DEBT),
            equity: PeriodPair::resolve(bs, &resolver::EQUITY),
            cash: current(bs, &resolver::CASH),
            current_assets: current(bs, &resolver::CURRENT_ASSETS),
            current_liabilities: current(bs, &resolver::CURRENT_LIABILITIES),
            inventory: current(bs, &resolver::INVENTORY),
            ebit: current(is, &resolver::EBIT),
            revenue: PeriodPair::resolve(is, &resolver::REVENUE),
            interest_expense: current(is, &resolver::INTEREST_EXPENSE),
            operating_cash_flow: PeriodPair::resolve(cf, &resolver::OPERATING_CASH_FLOW),
            capital_expenditures: PeriodPair::resolve(cf, &resolver::CAPITAL_EXPENDITURES),
        }
    }

    /// Returns long-term plus short-term debt.
    #[must_use]
    pub fn total_debt(&self) -> Option<f64> {
        capital::total_debt(self.long_term_debt, self.short_term_debt)
    }
}
