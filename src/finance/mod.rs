//! Mortgage, investment and buy-vs-rent projections
//!
//! All computations work in monthly periods: annual percentages are converted
//! with `rate / 100 / 12` and terms in years become `years * 12` payments.

mod annuity;
mod amortization;
mod investment;
mod comparison;
mod rate;

pub use annuity::{monthly_rate, level_payment, future_value_of_annuity, growth_factor};
pub use amortization::{
    amortize, LoanParameters, UnitOfAccount, AmortizationResult, AmortizationRow, IndexedFigures,
};
pub use investment::{project, InvestmentParameters, InvestmentPoint};
pub use comparison::{
    compare, evaluate, surplus_over_rent, Comparison, Outcome, BuyRentInputs, BuyRentReport,
};
pub use rate::{internal_rate_of_return, effective_annual_rate};
