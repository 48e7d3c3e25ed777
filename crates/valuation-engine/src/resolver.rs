//! Alias-aware statement lookup.
//!
//! Providers do not agree on line-item names, and the same provider renames
//! rows over time. Each concept the ratios need is described by a
//! [`LineItem`]: a canonical row name, the aliases to try after it, and what
//! to fall back to when none of them is present.
//!
//! Lookup failures are classified by [`LookupError`] and converted into the
//! item's [`Fallback`] here, so a bad row never affects any other figure.

use std::iter;

use thiserror::Error;
use tracing::debug;
use valuation_core::{Period, StatementTable};

/// What a line item resolves to when it cannot be read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fallback {
    /// Absence means "none of it", so the item resolves to 0.
    Zero,
    /// Absence means "unknown", so the item resolves to `None`.
    Unavailable,
}

/// A statement concept and the row names it may appear under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LineItem {
    /// Row name tried first.
    pub canonical: &'static str,
    /// Row names tried after the canonical one, in order.
    pub aliases: &'static [&'static str],
    /// Value used when the item cannot be read.
    pub fallback: Fallback,
}

impl LineItem {
    /// Creates a line item.
    #[must_use]
    pub const fn new(
        canonical: &'static str,
        aliases: &'static [&'static str],
        fallback: Fallback,
    ) -> Self {
        Self {
            canonical,
            aliases,
            fallback,
        }
    }

    /// Returns the canonical name followed by the aliases.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        iter::once(self.canonical).chain(self.aliases.iter().copied())
    }

    /// Returns the fallback value for this item.
    #[must_use]
    pub const fn fallback_value(&self) -> Option<f64> {
        match self.fallback {
            Fallback::Zero => Some(0.0),
            Fallback::Unavailable => None,
        }
    }
}

// Balance sheet

/// Short-term debt, including the current portion of long-term debt.
pub const SHORT_TERM_DEBT: LineItem = LineItem::new(
    "Short Long Term Debt",
    &["Short/Long Term Debt", "Current Debt"],
    Fallback::Zero,
);

/// Long-term debt.
pub const LONG_TERM_DEBT: LineItem = LineItem::new("Long Term Debt", &[], Fallback::Zero);

/// Total stockholder equity.
pub const EQUITY: LineItem = LineItem::new(
    "Total Stockholder Equity",
    &["Stockholders Equity"],
    Fallback::Unavailable,
);

/// Cash and equivalents.
pub const CASH: LineItem = LineItem::new(
    "Cash",
    &["Cash And Cash Equivalents"],
    Fallback::Unavailable,
);

/// Total current assets.
pub const CURRENT_ASSETS: LineItem = LineItem::new(
    "Total Current Assets",
    &["Current Assets"],
    Fallback::Unavailable,
);

/// Total current liabilities.
pub const CURRENT_LIABILITIES: LineItem = LineItem::new(
    "Current Liabilities",
    &["Total Current Liabilities"],
    Fallback::Unavailable,
);

/// Inventory. Service companies report none, so absence counts as zero.
pub const INVENTORY: LineItem = LineItem::new("Inventory", &[], Fallback::Zero);

// Income statement

/// Earnings before interest and taxes.
pub const EBIT: LineItem = LineItem::new("EBIT", &["Ebit"], Fallback::Unavailable);

/// Total revenue.
pub const REVENUE: LineItem = LineItem::new("Total Revenue", &[], Fallback::Unavailable);

/// Interest expense.
pub const INTEREST_EXPENSE: LineItem =
    LineItem::new("Interest Expense", &[], Fallback::Unavailable);

// Cash-flow statement

/// Cash from operating activities.
pub const OPERATING_CASH_FLOW: LineItem = LineItem::new(
    "Total Cash From Operating Activities",
    &["Operating Cash Flow"],
    Fallback::Unavailable,
);

/// Capital expenditures.
pub const CAPITAL_EXPENDITURES: LineItem = LineItem::new(
    "Capital Expenditures",
    &["Capital Expenditure"],
    Fallback::Unavailable,
);

/// Reasons a line item could not be read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Neither the canonical name nor any alias is in the statement.
    #[error("no row for {0} or its aliases")]
    MissingItem(&'static str),

    /// The matched row has fewer periods than requested.
    #[error("{row} has no {period} period")]
    MissingPeriod {
        /// The row that matched.
        row: &'static str,
        /// The requested period.
        period: Period,
    },

    /// The matched row has an empty cell for the requested period.
    #[error("{row} has no value for the {period} period")]
    MissingValue {
        /// The row that matched.
        row: &'static str,
        /// The requested period.
        period: Period,
    },

    /// The matched cell is NaN or infinite.
    #[error("{row} is not a finite number for the {period} period")]
    NonFinite {
        /// The row that matched.
        row: &'static str,
        /// The requested period.
        period: Period,
    },
}

/// Reads a line item for a period, reporting why it could not be read.
///
/// The first row name present in the table wins, even if that row lacks the
/// requested period; later aliases are not consulted in that case.
pub fn lookup(
    table: &StatementTable,
    item: &LineItem,
    period: Period,
) -> Result<f64, LookupError> {
    let (row, values) = item
        .names()
        .find_map(|name| table.row(name).map(|values| (name, values)))
        .ok_or(LookupError::MissingItem(item.canonical))?;

    let value = values
        .get(period.index())
        .copied()
        .ok_or(LookupError::MissingPeriod { row, period })?
        .ok_or(LookupError::MissingValue { row, period })?;

    if !value.is_finite() {
        return Err(LookupError::NonFinite { row, period });
    }

    Ok(value)
}

/// Resolves a line item for a period, applying its fallback on failure.
pub fn resolve(table: &StatementTable, item: &LineItem, period: Period) -> Option<f64> {
    match lookup(table, item, period) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(
                statement = %table.kind(),
                item = item.canonical,
                error = %e,
                "Line item unavailable, using fallback"
            );
            item.fallback_value()
        }
    }
}
