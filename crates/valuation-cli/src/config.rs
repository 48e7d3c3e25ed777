use std::time::Duration;

use anyhow::{Result, bail};
use valuation::{AnalyzerConfig, CapitalAssumptions, PeriodType};

use crate::Cli;

/// Settings for one analysis session, validated from the command line.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Config {
    pub(crate) analyzer: AnalyzerConfig,
    pub(crate) assumptions: CapitalAssumptions,
}

impl Config {
    pub(crate) fn from_cli(cli: &Cli) -> Result<Self> {
        let mut assumptions = CapitalAssumptions::default();
        if let Some(rate) = cli.risk_free_rate {
            assumptions = assumptions.with_risk_free_rate(check_rate("risk-free rate", rate)?);
        }
        if let Some(rate) = cli.market_return {
            assumptions = assumptions.with_market_return(check_rate("market return", rate)?);
        }
        if let Some(rate) = cli.tax_rate {
            let rate = check_rate("tax rate", rate)?;
            if !(0.0..=1.0).contains(&rate) {
                bail!("tax rate must be between 0 and 1, got {rate}");
            }
            assumptions = assumptions.with_tax_rate(rate);
        }
        if let Some(rate) = cli.cost_of_debt {
            assumptions = assumptions.with_cost_of_debt(check_rate("cost of debt", rate)?);
        }

        let period_type = if cli.quarterly {
            PeriodType::Quarterly
        } else {
            PeriodType::Annual
        };

        let analyzer = AnalyzerConfig::default()
            .with_period_type(period_type)
            .with_request_interval(Duration::from_millis(cli.interval_ms));

        Ok(Self {
            analyzer,
            assumptions,
        })
    }
}

fn check_rate(name: &str, rate: f64) -> Result<f64> {
    if !rate.is_finite() {
        bail!("{name} must be a finite number, got {rate}");
    }
    Ok(rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("valuation").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_cli(&parse(&["--tickers", "AAPL"])).unwrap();

        assert_eq!(config.assumptions, CapitalAssumptions::default());
        assert_eq!(config.analyzer.period_type, PeriodType::Annual);
        assert_eq!(
            config.analyzer.request_interval,
            Duration::from_millis(1500)
        );
    }

    #[test]
    fn test_overrides() {
        let cli = parse(&[
            "--tickers",
            "AAPL",
            "--quarterly",
            "--tax-rate",
            "0.25",
            "--interval-ms",
            "0",
        ]);
        let config = Config::from_cli(&cli).unwrap();

        assert_eq!(config.assumptions.tax_rate, 0.25);
        assert_eq!(config.analyzer.period_type, PeriodType::Quarterly);
        assert_eq!(config.analyzer.request_interval, Duration::ZERO);
    }

    #[test]
    fn test_rejects_bad_tax_rate() {
        let cli = parse(&["--tickers", "AAPL", "--tax-rate", "1.5"]);
        assert!(Config::from_cli(&cli).is_err());

        let cli = parse(&["--tickers", "AAPL", "--tax-rate", "NaN"]);
        assert!(Config::from_cli(&cli).is_err());
    }
}
