//! Snapshot evaluation.

use tracing::debug;
use valuation_core::{FinancialSnapshot, MetricRecord, TickerReport};

use crate::{
    assumptions::CapitalAssumptions, capital, figures::ResolvedFigures, growth, liquidity,
};

/// Turns a [`FinancialSnapshot`] into a [`TickerReport`].
///
/// Evaluation is pure: the same snapshot and assumptions always produce the
/// same metrics, independent of any other ticker.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ValuationEngine {
    assumptions: CapitalAssumptions,
}

impl ValuationEngine {
    /// Creates an engine with the given capital-market assumptions.
    #[must_use]
    pub const fn new(assumptions: CapitalAssumptions) -> Self {
        Self { assumptions }
    }

    /// Returns the capital-market assumptions.
    #[must_use]
    pub const fn assumptions(&self) -> &CapitalAssumptions {
        &self.assumptions
    }

    /// Builds the main metrics row from a snapshot and its resolved figures.
    #[must_use]
    pub fn metric_record(
        &self,
        snapshot: &FinancialSnapshot,
        figures: &ResolvedFigures,
    ) -> MetricRecord {
        let quote = &snapshot.quote;

        let total_debt = figures.total_debt();
        let market_cap = capital::market_cap(quote.current_price, quote.shares_outstanding);
        let wacc = capital::wacc(quote.beta, market_cap, total_debt, &self.assumptions);
        let invested_capital = capital::invested_capital(total_debt, figures.equity.current);
        let roic = capital::roic(figures.ebit, invested_capital);

        MetricRecord {
            ticker: snapshot.ticker.clone(),
            name: quote.long_name.clone(),
            sector: quote.sector.clone(),
            country: quote.country.clone(),
            industry: quote.industry.clone(),
            price: quote.current_price,
            pe_ratio: quote.trailing_pe,
            pb_ratio: quote.price_to_book,
            price_to_fcf: capital::price_to_fcf(
                quote.current_price,
                figures.operating_cash_flow.current,
                quote.shares_outstanding,
            ),
            dividend_rate: quote.dividend_rate,
            dividend_yield: quote.dividend_yield,
            payout_ratio: quote.payout_ratio,
            roa: quote.return_on_assets,
            roe: quote.return_on_equity,
            current_ratio: quote.current_ratio,
            long_term_debt_to_equity: quote.long_term_debt_to_equity.or_else(|| {
                capital::long_term_debt_to_equity(
                    figures.long_term_debt,
                    figures.equity.current,
                )
            }),
            debt_to_equity: quote.debt_to_equity,
            operating_margin: quote.operating_margin,
            profit_margin: quote.profit_margin,
            wacc,
            roic,
            eva: capital::eva(roic, wacc),
            total_debt,
            equity: figures.equity.current,
            error: None,
        }
    }

    /// Resolves the statements and computes every metric and classification.
    #[must_use]
    pub fn evaluate(&self, snapshot: &FinancialSnapshot) -> TickerReport {
        let figures = ResolvedFigures::resolve(snapshot);
        let record = self.metric_record(snapshot, &figures);
        let growth = growth::section(&figures, &snapshot.quote);
        let liquidity = liquidity::section(&figures);

        debug!(
            ticker = %snapshot.ticker,
            wacc = ?record.wacc,
            roic = ?record.roic,
            growth = %growth.outlook,
            liquidity = %liquidity.status,
            "Evaluated snapshot"
        );

        TickerReport::new(record, growth, liquidity)
    }
}
