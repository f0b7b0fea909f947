//! Mortgage amortization in the primary currency or an indexed unit of account

use log::debug;
use serde::{Deserialize, Serialize};

use super::annuity::{level_payment, monthly_rate};
use super::rate::effective_annual_rate;
use crate::assumptions::{indexed_unit_monthly_growth, MONTHS_PER_YEAR};
use crate::error::{require_finite, require_positive, require_term_months, CalcError};

/// Unit of account the loan is denominated in
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnitOfAccount {
    /// Payments fixed in the primary currency (CLP)
    #[default]
    Primary,
    /// Payments fixed in an inflation-indexed unit (UF) worth `unit_value` primary
    /// currency today; the unit appreciates monthly at the assumed indexation rate
    Indexed { unit_value: f64 },
}

/// Inputs for a mortgage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Home price in primary currency
    pub principal: f64,
    /// Down payment in primary currency
    pub down_payment: f64,
    /// Annual interest rate, in percent (4.5 = 4.5%)
    pub annual_rate_percent: f64,
    pub term_years: u32,
    #[serde(default)]
    pub unit_of_account: UnitOfAccount,
}

impl LoanParameters {
    /// Fixed-rate loan in the primary currency
    pub fn new(principal: f64, down_payment: f64, annual_rate_percent: f64, term_years: u32) -> Self {
        Self {
            principal,
            down_payment,
            annual_rate_percent,
            term_years,
            unit_of_account: UnitOfAccount::Primary,
        }
    }

    /// Same loan denominated in an indexed unit worth `unit_value` today
    pub fn indexed(mut self, unit_value: f64) -> Self {
        self.unit_of_account = UnitOfAccount::Indexed { unit_value };
        self
    }

    /// Financed amount: principal minus down payment
    pub fn loan_amount(&self) -> f64 {
        self.principal - self.down_payment
    }

    /// Number of monthly payments over the term
    pub fn payment_count(&self) -> Result<u32, CalcError> {
        require_term_months("term_years", self.term_years)
    }

    fn validate(&self) -> Result<(), CalcError> {
        require_positive("principal", self.principal)?;
        require_positive("down_payment", self.down_payment)?;
        if self.term_years == 0 {
            return Err(CalcError::invalid("term_years", "must be greater than zero"));
        }
        self.payment_count()?;
        require_finite("annual_rate_percent", self.annual_rate_percent)?;
        if self.loan_amount() <= 0.0 {
            return Err(CalcError::invalid(
                "down_payment",
                format!(
                    "down payment {} leaves nothing to finance on principal {}",
                    self.down_payment, self.principal
                ),
            ));
        }
        if let UnitOfAccount::Indexed { unit_value } = self.unit_of_account {
            require_positive("unit_value", unit_value)?;
        }
        Ok(())
    }
}

/// Figures of an indexed loan expressed in the indexed unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedFigures {
    /// Unit value at origination, in primary currency
    pub unit_value: f64,
    pub loan_amount: f64,
    pub down_payment: f64,
    /// Level monthly payment, in units (not rounded)
    pub monthly_payment: f64,
}

/// Result of amortizing a loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub principal: f64,
    pub down_payment: f64,
    pub loan_amount: f64,
    /// Monthly interest rate used for the annuity
    pub monthly_rate: f64,
    /// Monthly payment in primary currency, rounded. For indexed loans this is
    /// the first payment; later payments grow with the unit value.
    pub monthly_payment: f64,
    pub total_payment_count: u32,
    /// Sum of all payments plus the down payment, rounded
    pub total_cost: f64,
    /// Every monthly payment converted to primary currency (indexed loans only)
    pub per_payment_series: Vec<f64>,
    pub indexed: Option<IndexedFigures>,
}

/// One month of an amortization schedule, in the loan's unit of account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub payment_number: u32,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    /// Outstanding balance after this payment
    pub balance: f64,
}

/// Amortize a loan with level monthly payments
pub fn amortize(params: &LoanParameters) -> Result<AmortizationResult, CalcError> {
    params.validate()?;

    let loan_amount = params.loan_amount();
    let rate = monthly_rate(params.annual_rate_percent);
    let payment_count = params.payment_count()?;

    let result = match params.unit_of_account {
        UnitOfAccount::Primary => {
            let monthly_payment = level_payment(loan_amount, rate, payment_count).round();

            AmortizationResult {
                principal: params.principal,
                down_payment: params.down_payment,
                loan_amount,
                monthly_rate: rate,
                monthly_payment,
                total_payment_count: payment_count,
                total_cost: monthly_payment * payment_count as f64 + params.down_payment,
                per_payment_series: Vec::new(),
                indexed: None,
            }
        }
        UnitOfAccount::Indexed { unit_value } => {
            let loan_units = loan_amount / unit_value;
            let payment_units = level_payment(loan_units, rate, payment_count);
            let growth = indexed_unit_monthly_growth();

            let mut series = Vec::with_capacity(payment_count as usize);
            let mut current_unit_value = unit_value;
            for _ in 0..payment_count {
                series.push(payment_units * current_unit_value);
                current_unit_value *= growth;
            }

            let total_paid: f64 = series.iter().sum();

            AmortizationResult {
                principal: params.principal,
                down_payment: params.down_payment,
                loan_amount,
                monthly_rate: rate,
                monthly_payment: series[0].round(),
                total_payment_count: payment_count,
                total_cost: (total_paid + params.down_payment).round(),
                per_payment_series: series,
                indexed: Some(IndexedFigures {
                    unit_value,
                    loan_amount: loan_units,
                    down_payment: params.down_payment / unit_value,
                    monthly_payment: payment_units,
                }),
            }
        }
    };

    debug!(
        "Amortized {:.0} over {} payments at {:.6}/month: payment={:.0} total_cost={:.0}",
        loan_amount, payment_count, rate, result.monthly_payment, result.total_cost
    );

    Ok(result)
}

impl AmortizationResult {
    /// Loan term in whole years
    pub fn term_years(&self) -> u32 {
        self.total_payment_count / MONTHS_PER_YEAR
    }

    pub fn is_indexed(&self) -> bool {
        self.indexed.is_some()
    }

    /// Every monthly payment in primary currency, in order
    pub fn payments(&self) -> Vec<f64> {
        if self.is_indexed() {
            self.per_payment_series.clone()
        } else {
            vec![self.monthly_payment; self.total_payment_count as usize]
        }
    }

    /// Last monthly payment in primary currency, rounded
    pub fn last_payment(&self) -> f64 {
        self.per_payment_series
            .last()
            .map(|p| p.round())
            .unwrap_or(self.monthly_payment)
    }

    /// Sum of the monthly payments, excluding the down payment
    pub fn total_paid(&self) -> f64 {
        self.total_cost - self.down_payment
    }

    /// Interest/principal split per month, in the loan's own unit of account
    ///
    /// Fixed loans use the rounded payment, so the final balance carries the
    /// accumulated rounding residue instead of being exactly zero.
    pub fn schedule(&self) -> Vec<AmortizationRow> {
        let (mut balance, payment) = match &self.indexed {
            Some(indexed) => (indexed.loan_amount, indexed.monthly_payment),
            None => (self.loan_amount, self.monthly_payment),
        };

        (1..=self.total_payment_count)
            .map(|payment_number| {
                let interest = balance * self.monthly_rate;
                let principal = payment - interest;
                balance -= principal;
                AmortizationRow {
                    payment_number,
                    payment,
                    interest,
                    principal,
                    balance,
                }
            })
            .collect()
    }

    /// Effective annual cost (CAE): annualized IRR of the loan disbursement
    /// against every monthly payment in primary currency
    pub fn effective_annual_cost(&self) -> Option<f64> {
        let mut cashflows = Vec::with_capacity(self.total_payment_count as usize + 1);
        cashflows.push(self.loan_amount);
        cashflows.extend(self.payments().into_iter().map(|p| -p));
        effective_annual_rate(&cashflows)
    }
}
