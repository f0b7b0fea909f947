//! Buy-vs-rent comparison
//!
//! Buying ends with a home appreciated at a fixed annual rate. Renting ends
//! with a portfolio seeded by the down payment and fed monthly with whatever
//! the mortgage payment exceeds the rent by. The larger terminal patrimony wins.

use std::fmt;

use log::info;
use serde::{Deserialize, Serialize};

use super::amortization::{amortize, AmortizationResult, LoanParameters, UnitOfAccount};
use super::investment::{project, InvestmentParameters, InvestmentPoint};
use crate::assumptions::{appreciated_property_value, default_down_payment};
use crate::error::{require_positive, CalcError};

/// Which scenario ends with more patrimony
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Buy,
    Rent,
    /// Both scenarios end with exactly the same rounded value
    Equivalent,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Buy => write!(f, "buy"),
            Outcome::Rent => write!(f, "rent and invest"),
            Outcome::Equivalent => write!(f, "equivalent"),
        }
    }
}

/// Terminal patrimony of both scenarios
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// Appreciated home value at the end of the loan term
    pub property_value: f64,
    /// Portfolio value at the end of the loan term
    pub investment_value: f64,
    /// investment_value - property_value
    pub difference: f64,
    pub outcome: Outcome,
}

impl Comparison {
    /// Absolute gap between the two scenarios
    pub fn margin(&self) -> f64 {
        self.difference.abs()
    }
}

/// Compare the appreciated home against the investment at the loan term
pub fn compare(loan: &AmortizationResult, terminal: &InvestmentPoint) -> Comparison {
    let property_value = appreciated_property_value(loan.principal, loan.term_years());
    let investment_value = terminal.total_value;
    let difference = investment_value - property_value;

    let outcome = if difference > 0.0 {
        Outcome::Rent
    } else if difference < 0.0 {
        Outcome::Buy
    } else {
        Outcome::Equivalent
    };

    Comparison {
        property_value,
        investment_value,
        difference,
        outcome,
    }
}

/// Everything the buy-vs-rent calculator asks for
///
/// Optional fields take the calculator's defaults: a 20% down payment, an
/// initial investment equal to the down payment, and a monthly investment
/// equal to whatever the mortgage payment exceeds the rent by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyRentInputs {
    pub home_price: f64,
    #[serde(default)]
    pub down_payment: Option<f64>,
    pub annual_rate_percent: f64,
    pub term_years: u32,
    #[serde(default)]
    pub unit_of_account: UnitOfAccount,
    pub monthly_rent: f64,
    pub annual_return_percent: f64,
    #[serde(default)]
    pub initial_investment: Option<f64>,
    #[serde(default)]
    pub monthly_investment: Option<f64>,
}

impl BuyRentInputs {
    /// Inputs with every optional field left to its default
    pub fn new(
        home_price: f64,
        annual_rate_percent: f64,
        term_years: u32,
        monthly_rent: f64,
        annual_return_percent: f64,
    ) -> Self {
        Self {
            home_price,
            down_payment: None,
            annual_rate_percent,
            term_years,
            unit_of_account: UnitOfAccount::Primary,
            monthly_rent,
            annual_return_percent,
            initial_investment: None,
            monthly_investment: None,
        }
    }

    /// Down payment, defaulting to 20% of the home price
    pub fn effective_down_payment(&self) -> f64 {
        self.down_payment
            .unwrap_or_else(|| default_down_payment(self.home_price))
    }

    pub fn loan_parameters(&self) -> LoanParameters {
        LoanParameters {
            principal: self.home_price,
            down_payment: self.effective_down_payment(),
            annual_rate_percent: self.annual_rate_percent,
            term_years: self.term_years,
            unit_of_account: self.unit_of_account,
        }
    }
}

/// Full result of a buy-vs-rent evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyRentReport {
    pub amortization: AmortizationResult,
    pub initial_investment: f64,
    pub monthly_investment: f64,
    /// Rent paid over the whole term
    pub total_rent: f64,
    /// Yearly investment values, year 0 through the loan term
    pub investment: Vec<InvestmentPoint>,
    pub comparison: Comparison,
}

impl BuyRentReport {
    /// Investment value at the end of the loan term
    pub fn terminal_investment(&self) -> Option<&InvestmentPoint> {
        self.investment.last()
    }
}

/// Monthly amount left to invest when renting: payment minus rent, never negative
pub fn surplus_over_rent(monthly_payment: f64, monthly_rent: f64) -> f64 {
    if monthly_payment > monthly_rent {
        monthly_payment - monthly_rent
    } else {
        0.0
    }
}

/// Evaluate both scenarios end to end
pub fn evaluate(inputs: &BuyRentInputs) -> Result<BuyRentReport, CalcError> {
    let amortization = amortize(&inputs.loan_parameters())?;

    require_positive("monthly_rent", inputs.monthly_rent)?;
    let initial_investment = inputs
        .initial_investment
        .unwrap_or(amortization.down_payment);
    require_positive("initial_investment", initial_investment)?;

    let monthly_investment = inputs
        .monthly_investment
        .unwrap_or_else(|| surplus_over_rent(amortization.monthly_payment, inputs.monthly_rent));

    let investment = project(&InvestmentParameters::new(
        initial_investment,
        monthly_investment,
        inputs.annual_return_percent,
        inputs.term_years,
    ))?;

    let terminal = investment
        .last()
        .ok_or_else(|| CalcError::invalid("term_years", "projection produced no points"))?;
    let comparison = compare(&amortization, terminal);

    let total_rent = inputs.monthly_rent * amortization.total_payment_count as f64;

    info!(
        "Buy-vs-rent over {} years: property={:.0} investment={:.0} -> {}",
        inputs.term_years, comparison.property_value, comparison.investment_value, comparison.outcome
    );

    Ok(BuyRentReport {
        amortization,
        initial_investment,
        monthly_investment,
        total_rent,
        investment,
        comparison,
    })
}
