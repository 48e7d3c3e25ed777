//! Growth metrics and classification.

use valuation_core::{GrowthMetrics, GrowthOutlook, GrowthSection, QuoteInfo};

use crate::{checked_div, figures::ResolvedFigures};

/// Growth above this many percent, on every computed metric, counts as solid.
pub const SOLID_GROWTH_THRESHOLD: f64 = 5.0;

/// Relative change from `prior` to `current`, as a fraction.
///
/// Dividing by `|prior|` keeps the sign of the result equal to the sign of
/// `current - prior` even when `prior` is negative. Returns `None` if either
/// value is missing or `prior` is zero.
#[must_use]
pub fn growth(current: Option<f64>, prior: Option<f64>) -> Option<f64> {
    let (current, prior) = (current?, prior?);
    checked_div(Some(current - prior), Some(prior.abs()))
}

/// Relative change from `prior` to `current`, in percent.
#[must_use]
pub fn growth_percent(current: Option<f64>, prior: Option<f64>) -> Option<f64> {
    growth(current, prior).map(|g| g * 100.0)
}

/// Computes the five growth metrics, in percent.
///
/// EPS growth compares forward EPS against trailing EPS from the quote; the
/// other four compare the two most recent reported periods.
#[must_use]
pub fn growth_metrics(figures: &ResolvedFigures, quote: &QuoteInfo) -> GrowthMetrics {
    GrowthMetrics {
        revenue: growth_percent(figures.revenue.current, figures.revenue.prior),
        eps: growth_percent(quote.forward_eps, quote.trailing_eps),
        operating_cash_flow: growth_percent(
            figures.operating_cash_flow.current,
            figures.operating_cash_flow.prior,
        ),
        capital_expenditures: growth_percent(
            figures.capital_expenditures.current,
            figures.capital_expenditures.prior,
        ),
        book_value: growth_percent(figures.equity.current, figures.equity.prior),
    }
}

/// Classifies a set of growth percentages.
///
/// Checked in order: every value above [`SOLID_GROWTH_THRESHOLD`] is solid,
/// any negative value is contraction, anything else is moderate. An empty
/// set passes the first check and is therefore classified as solid.
#[must_use]
pub fn classify_values(values: &[f64]) -> GrowthOutlook {
    if values.iter().all(|&v| v > SOLID_GROWTH_THRESHOLD) {
        GrowthOutlook::Solid
    } else if values.iter().any(|&v| v < 0.0) {
        GrowthOutlook::Contraction
    } else {
        GrowthOutlook::Moderate
    }
}

/// Classifies growth metrics, ignoring the ones that could not be computed.
#[must_use]
pub fn classify(metrics: &GrowthMetrics) -> GrowthOutlook {
    classify_values(&metrics.values())
}

/// Computes and classifies the growth metrics.
#[must_use]
pub fn section(figures: &ResolvedFigures, quote: &QuoteInfo) -> GrowthSection {
    let metrics = growth_metrics(figures, quote);
    GrowthSection {
        outlook: classify(&metrics),
        metrics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figures::PeriodPair;

    #[test]
    fn test_growth() {
        assert_eq!(growth(Some(110.0), Some(100.0)), Some(0.1));
        assert_eq!(growth(Some(90.0), Some(100.0)), Some(-0.1));
        assert_eq!(growth_percent(Some(150.0), Some(100.0)), Some(50.0));
    }

    #[test]
    fn test_growth_negative_prior() {
        // -50 -> -25 is an improvement and must read as positive growth.
        assert_eq!(growth(Some(-25.0), Some(-50.0)), Some(0.5));
        assert_eq!(growth(Some(-75.0), Some(-50.0)), Some(-0.5));
    }

    #[test]
    fn test_growth_undefined() {
        assert_eq!(growth(Some(110.0), Some(0.0)), None);
        assert_eq!(growth(Some(110.0), None), None);
        assert_eq!(growth(None, Some(100.0)), None);
    }

    #[test]
    fn test_growth_sign_matches_change() {
        for (current, prior) in [(1.0, 2.0), (3.0, 2.0), (2.0, 2.0), (-1.0, 0.5), (1e9, 1e-3)] {
            let g = growth(Some(current), Some(prior)).unwrap();
            if current == prior {
                assert_eq!(g, 0.0);
            } else {
                assert_eq!(g > 0.0, current > prior);
            }
        }
    }

    #[test]
    fn test_classify_solid() {
        assert_eq!(classify_values(&[6.0, 7.0, 8.0, 9.0, 10.0]), GrowthOutlook::Solid);
    }

    #[test]
    fn test_classify_contraction() {
        assert_eq!(
            classify_values(&[6.0, -1.0, 8.0, 9.0, 10.0]),
            GrowthOutlook::Contraction
        );
    }

    #[test]
    fn test_classify_moderate() {
        assert_eq!(
            classify_values(&[2.0, 3.0, 4.0, 4.5, 1.0]),
            GrowthOutlook::Moderate
        );
    }

    #[test]
    fn test_classify_threshold_is_exclusive() {
        assert_eq!(classify_values(&[5.0, 10.0]), GrowthOutlook::Moderate);
    }

    #[test]
    fn test_classify_empty_is_solid() {
        // Vacuous truth: nothing computed still satisfies "all above 5".
        assert_eq!(classify_values(&[]), GrowthOutlook::Solid);
        assert_eq!(classify(&GrowthMetrics::default()), GrowthOutlook::Solid);
    }

    #[test]
    fn test_section_ignores_missing() {
        let figures = ResolvedFigures {
            revenue: PeriodPair {
                current: Some(120.0),
                prior: Some(100.0),
            },
            equity: PeriodPair {
                current: Some(95.0),
                prior: Some(100.0),
            },
            ..Default::default()
        };
        let quote = QuoteInfo {
            trailing_eps: Some(2.0),
            forward_eps: Some(2.5),
            ..Default::default()
        };

        let section = section(&figures, &quote);
        assert_eq!(section.metrics.revenue, Some(20.0));
        assert_eq!(section.metrics.eps, Some(25.0));
        assert_eq!(section.metrics.book_value, Some(-5.0));
        assert_eq!(section.metrics.operating_cash_flow, None);
        assert_eq!(section.metrics.capital_expenditures, None);
        assert_eq!(section.outlook, GrowthOutlook::Contraction);
    }
}
