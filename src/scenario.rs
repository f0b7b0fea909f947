//! Sensitivity sweeps over buy-vs-rent inputs
//!
//! Holds one base case and re-evaluates it under different return or interest
//! rate assumptions. Scenarios are independent and run in parallel; results
//! keep the order of the requested assumptions.

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::finance::{evaluate, BuyRentInputs, BuyRentReport};

/// Which input a sweep varies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepVariable {
    AnnualReturn,
    InterestRate,
}

/// One evaluated scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub variable: SweepVariable,
    /// Value substituted for the swept input, in percent
    pub value: f64,
    pub report: BuyRentReport,
}

/// Runs many variants of a single buy-vs-rent case
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(BuyRentInputs::new(100_000_000.0, 4.5, 25, 350_000.0, 6.0));
/// for result in runner.run_returns(&[4.0, 6.0, 8.0])? {
///     println!("{}% -> {}", result.value, result.report.comparison.outcome);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base: BuyRentInputs,
}

impl ScenarioRunner {
    pub fn new(base: BuyRentInputs) -> Self {
        Self { base }
    }

    /// Base case the sweeps start from
    pub fn base(&self) -> &BuyRentInputs {
        &self.base
    }

    /// Evaluate the base case unchanged
    pub fn run(&self) -> Result<BuyRentReport, CalcError> {
        evaluate(&self.base)
    }

    /// Evaluate the base case once per annual return (percent)
    pub fn run_returns(&self, annual_returns: &[f64]) -> Result<Vec<ScenarioResult>, CalcError> {
        self.sweep(SweepVariable::AnnualReturn, annual_returns)
    }

    /// Evaluate the base case once per mortgage interest rate (percent)
    pub fn run_rates(&self, annual_rates: &[f64]) -> Result<Vec<ScenarioResult>, CalcError> {
        self.sweep(SweepVariable::InterestRate, annual_rates)
    }

    /// Evaluate every variant; the first failing variant (in input order) fails the sweep
    pub fn sweep(&self, variable: SweepVariable, values: &[f64]) -> Result<Vec<ScenarioResult>, CalcError> {
        let results: Vec<ScenarioResult> = values
            .par_iter()
            .map(|&value| {
                let mut inputs = self.base.clone();
                match variable {
                    SweepVariable::AnnualReturn => inputs.annual_return_percent = value,
                    SweepVariable::InterestRate => inputs.annual_rate_percent = value,
                }
                evaluate(&inputs).map(|report| ScenarioResult { variable, value, report })
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!("Evaluated {} scenarios varying {:?}", results.len(), variable);
        Ok(results)
    }
}
