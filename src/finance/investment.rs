//! Compound-interest projection of an initial amount plus monthly contributions

use log::debug;
use serde::{Deserialize, Serialize};

use super::annuity::{future_value_of_annuity, growth_factor, monthly_rate};
use crate::assumptions::MONTHS_PER_YEAR;
use crate::error::{require_finite, require_non_negative, require_term_months, CalcError};

/// Inputs for an investment projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentParameters {
    pub initial_amount: f64,
    pub monthly_contribution: f64,
    /// Annual return, in percent (6 = 6%), compounded monthly
    pub annual_return_percent: f64,
    pub term_years: u32,
}

impl InvestmentParameters {
    pub fn new(
        initial_amount: f64,
        monthly_contribution: f64,
        annual_return_percent: f64,
        term_years: u32,
    ) -> Self {
        Self {
            initial_amount,
            monthly_contribution,
            annual_return_percent,
            term_years,
        }
    }

    fn validate(&self) -> Result<(), CalcError> {
        require_non_negative("initial_amount", self.initial_amount)?;
        require_non_negative("monthly_contribution", self.monthly_contribution)?;
        require_finite("annual_return_percent", self.annual_return_percent)?;
        require_term_months("term_years", self.term_years)?;
        Ok(())
    }
}

/// Value of the investment at the end of a whole year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentPoint {
    pub year_index: u32,
    /// Initial amount plus every contribution made so far
    pub cumulative_contributions: f64,
    /// Portfolio value, rounded
    pub total_value: f64,
    /// total_value - cumulative_contributions
    pub gains: f64,
}

/// Project the investment for every year from 0 to `term_years` inclusive
pub fn project(params: &InvestmentParameters) -> Result<Vec<InvestmentPoint>, CalcError> {
    params.validate()?;

    let rate = monthly_rate(params.annual_return_percent);

    let points: Vec<InvestmentPoint> = (0..=params.term_years)
        .map(|year_index| {
            let elapsed_months = year_index * MONTHS_PER_YEAR;

            let initial_component = params.initial_amount * growth_factor(rate, elapsed_months);
            let contribution_component =
                future_value_of_annuity(params.monthly_contribution, rate, elapsed_months);

            let cumulative_contributions =
                params.initial_amount + params.monthly_contribution * elapsed_months as f64;
            let total_value = (initial_component + contribution_component).round();

            InvestmentPoint {
                year_index,
                cumulative_contributions,
                total_value,
                gains: total_value - cumulative_contributions,
            }
        })
        .collect();

    if let Some(last) = points.last() {
        debug!(
            "Projected {} years at {}%: contributions={:.0} value={:.0}",
            params.term_years, params.annual_return_percent, last.cumulative_contributions, last.total_value
        );
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_term_returns_initial_point() {
        let points = project(&InvestmentParameters::new(20_000_000.0, 0.0, 6.0, 0)).unwrap();

        assert_eq!(
            points,
            vec![InvestmentPoint {
                year_index: 0,
                cumulative_contributions: 20_000_000.0,
                total_value: 20_000_000.0,
                gains: 0.0,
            }]
        );
    }

    #[test]
    fn test_one_point_per_year() {
        let points = project(&InvestmentParameters::new(20_000_000.0, 100_000.0, 6.0, 25)).unwrap();

        assert_eq!(points.len(), 26);
        for (i, point) in points.iter().enumerate() {
            assert_eq!(point.year_index, i as u32);
            assert_eq!(point.gains, point.total_value - point.cumulative_contributions);
        }

        let last = points.last().unwrap();
        assert_eq!(last.cumulative_contributions, 50_000_000.0);
        assert!((last.total_value - 158_598_792.0).abs() <= 1.0, "value {}", last.total_value);
    }

    #[test]
    fn test_zero_return_accumulates_contributions() {
        let points = project(&InvestmentParameters::new(1_000_000.0, 1_000.0, 0.0, 2)).unwrap();

        let values: Vec<f64> = points.iter().map(|p| p.total_value).collect();
        assert_eq!(values, vec![1_000_000.0, 1_012_000.0, 1_024_000.0]);
        assert!(points.iter().all(|p| p.gains == 0.0));
    }

    #[test]
    fn test_value_non_decreasing_for_non_negative_returns() {
        for annual_return in [0.0, 0.5, 3.0, 12.0] {
            let points =
                project(&InvestmentParameters::new(5_000_000.0, 250_000.0, annual_return, 30)).unwrap();
            assert!(points.windows(2).all(|pair| pair[1].total_value >= pair[0].total_value));
        }
    }

    #[test]
    fn test_negative_return_loses_value() {
        let points = project(&InvestmentParameters::new(1_000_000.0, 0.0, -5.0, 3)).unwrap();
        assert!(points[3].total_value < points[0].total_value);
        assert!(points[3].gains < 0.0);
    }

    #[test]
    fn test_rejects_invalid_input() {
        assert!(project(&InvestmentParameters::new(-1.0, 0.0, 6.0, 10)).is_err());
        assert!(project(&InvestmentParameters::new(0.0, -1.0, 6.0, 10)).is_err());
        assert!(matches!(
            project(&InvestmentParameters::new(1.0, 0.0, f64::NAN, 10)),
            Err(CalcError::InvalidInput { field: "annual_return_percent", .. })
        ));
    }

    #[test]
    fn test_rejects_term_too_long_to_compound() {
        for term_years in [178_956_971, 400_000_000, u32::MAX] {
            assert!(matches!(
                project(&InvestmentParameters::new(1_000_000.0, 0.0, 6.0, term_years)),
                Err(CalcError::InvalidInput { field: "term_years", .. })
            ));
        }
    }
}
