//! The `valuation` command-line tool.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;
use valuation::{
    Analyzer, InMemoryResultsStore, TickerReport, growth_frame, liquidity_frame, metrics_frame,
};

mod config;

/// Valuation and financial-health ratios per ticker.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "valuation")]
pub(crate) struct Cli {
    /// Comma-separated ticker symbols, up to 50
    #[arg(short, long, env = "VALUATION_TICKERS")]
    tickers: String,

    /// Use quarterly instead of annual statements
    #[arg(short, long)]
    quarterly: bool,

    /// Risk-free rate used for the cost of equity
    #[arg(long, env = "VALUATION_RISK_FREE_RATE")]
    risk_free_rate: Option<f64>,

    /// Expected market return used for the cost of equity
    #[arg(long, env = "VALUATION_MARKET_RETURN")]
    market_return: Option<f64>,

    /// Corporate tax rate applied to the cost of debt
    #[arg(long, env = "VALUATION_TAX_RATE")]
    tax_rate: Option<f64>,

    /// Pre-tax cost of debt
    #[arg(long, env = "VALUATION_COST_OF_DEBT")]
    cost_of_debt: Option<f64>,

    /// Minimum milliseconds between two ticker fetches
    #[arg(long, env = "VALUATION_REQUEST_INTERVAL_MS", default_value_t = 1500)]
    interval_ms: u64,

    /// Print the reports as JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = config::Config::from_cli(&cli)?;

    let analyzer = Analyzer::new(Arc::new(InMemoryResultsStore::new()))
        .with_config(config.analyzer)
        .with_assumptions(config.assumptions)
        .with_yahoo();

    let summary = analyzer
        .analyze_input(&cli.tickers)
        .await
        .context("analysis failed")?;
    info!(
        analyzed = summary.analyzed,
        failed = summary.failed,
        "Done"
    );

    let reports = analyzer.reports().await?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print_tables(&reports)?;
    }

    Ok(())
}

fn print_tables(reports: &[TickerReport]) -> Result<()> {
    println!("Valuation metrics");
    println!("{}", metrics_frame(reports)?);

    println!("\nGrowth");
    println!("{}", growth_frame(reports)?);

    println!("\nLiquidity");
    println!("{}", liquidity_frame(reports)?);

    Ok(())
}
