//! Tabular presentation of reports.
//!
//! Each function turns a slice of [`TickerReport`]s into a polars
//! [`DataFrame`] with one row per ticker. The frames carry no logic beyond
//! selecting and labelling columns.

use polars::prelude::{Column, DataFrame};
use valuation_core::{
    GrowthSection, LiquiditySection, MetricRecord, Result, TickerReport, ValuationError,
};

fn text_column<F>(name: &str, reports: &[TickerReport], field: F) -> Column
where
    F: Fn(&MetricRecord) -> Option<String>,
{
    let values: Vec<Option<String>> = reports.iter().map(|r| field(&r.record)).collect();
    Column::new(name.into(), values)
}

fn number_column<F>(name: &str, reports: &[TickerReport], field: F) -> Column
where
    F: Fn(&MetricRecord) -> Option<f64>,
{
    let values: Vec<Option<f64>> = reports.iter().map(|r| field(&r.record)).collect();
    Column::new(name.into(), values)
}

fn ticker_column<'a>(tickers: impl Iterator<Item = &'a TickerReport>) -> Column {
    let values: Vec<String> = tickers.map(|r| r.ticker().to_string()).collect();
    Column::new("Ticker".into(), values)
}

fn frame(columns: Vec<Column>) -> Result<DataFrame> {
    DataFrame::new(columns).map_err(|e| ValuationError::Other(e.to_string()))
}

/// Main metrics table.
///
/// Identity and ratio fields of every report, plus an `Error` column that is
/// set for tickers whose fetch failed. Total debt and equity are not shown.
pub fn metrics_frame(reports: &[TickerReport]) -> Result<DataFrame> {
    frame(vec![
        ticker_column(reports.iter()),
        text_column("Name", reports, |m| m.name.clone()),
        text_column("Sector", reports, |m| m.sector.clone()),
        text_column("Country", reports, |m| m.country.clone()),
        text_column("Industry", reports, |m| m.industry.clone()),
        number_column("Price", reports, |m| m.price),
        number_column("P/E", reports, |m| m.pe_ratio),
        number_column("P/B", reports, |m| m.pb_ratio),
        number_column("P/FCF", reports, |m| m.price_to_fcf),
        number_column("Dividend Rate", reports, |m| m.dividend_rate),
        number_column("Dividend Yield", reports, |m| m.dividend_yield),
        number_column("Payout Ratio", reports, |m| m.payout_ratio),
        number_column("ROA", reports, |m| m.roa),
        number_column("ROE", reports, |m| m.roe),
        number_column("Current Ratio", reports, |m| m.current_ratio),
        number_column("LT Debt/Equity", reports, |m| m.long_term_debt_to_equity),
        number_column("Debt/Equity", reports, |m| m.debt_to_equity),
        number_column("Operating Margin", reports, |m| m.operating_margin),
        number_column("Profit Margin", reports, |m| m.profit_margin),
        number_column("WACC", reports, |m| m.wacc),
        number_column("ROIC", reports, |m| m.roic),
        number_column("EVA", reports, |m| m.eva),
        text_column("Error", reports, |m| m.error.clone()),
    ])
}

/// Growth table, in percent, for every successfully analyzed ticker.
pub fn growth_frame(reports: &[TickerReport]) -> Result<DataFrame> {
    let rows: Vec<(&TickerReport, &GrowthSection)> = reports
        .iter()
        .filter_map(|r| r.growth.as_ref().map(|g| (r, g)))
        .collect();

    let metric = |name: &str, field: fn(&GrowthSection) -> Option<f64>| {
        let values: Vec<Option<f64>> = rows.iter().map(|(_, g)| field(g)).collect();
        Column::new(name.into(), values)
    };
    let outlook: Vec<String> = rows.iter().map(|(_, g)| g.outlook.to_string()).collect();

    frame(vec![
        ticker_column(rows.iter().map(|(r, _)| *r)),
        metric("Revenue Growth (%)", |g| g.metrics.revenue),
        metric("EPS Growth (%)", |g| g.metrics.eps),
        metric("Operating Cash Flow Growth (%)", |g| {
            g.metrics.operating_cash_flow
        }),
        metric("CapEx Growth (%)", |g| g.metrics.capital_expenditures),
        metric("Book Value Growth (%)", |g| g.metrics.book_value),
        Column::new("Outlook".into(), outlook),
    ])
}

/// Liquidity table for every successfully analyzed ticker.
pub fn liquidity_frame(reports: &[TickerReport]) -> Result<DataFrame> {
    let rows: Vec<(&TickerReport, &LiquiditySection)> = reports
        .iter()
        .filter_map(|r| r.liquidity.as_ref().map(|l| (r, l)))
        .collect();

    let metric = |name: &str, field: fn(&LiquiditySection) -> Option<f64>| {
        let values: Vec<Option<f64>> = rows.iter().map(|(_, l)| field(l)).collect();
        Column::new(name.into(), values)
    };
    let status: Vec<String> = rows.iter().map(|(_, l)| l.status.to_string()).collect();

    frame(vec![
        ticker_column(rows.iter().map(|(r, _)| *r)),
        metric("Quick Ratio", |l| l.metrics.quick_ratio),
        metric("Cash Ratio", |l| l.metrics.cash_ratio),
        metric("Working Capital", |l| l.metrics.working_capital),
        metric("Interest Coverage", |l| l.metrics.interest_coverage),
        metric("Operating Cash Flow Ratio", |l| {
            l.metrics.operating_cash_flow_ratio
        }),
        Column::new("Status".into(), status),
    ])
}
