//! Fixed business assumptions used by the buy-vs-rent calculators
//!
//! These are hard-coded market assumptions, not user configuration.

/// Annual growth of the indexed unit of account (UF), applied monthly
pub const INDEXED_UNIT_ANNUAL_GROWTH: f64 = 0.035;

/// Annual property appreciation used for the terminal home value
pub const PROPERTY_ANNUAL_APPRECIATION: f64 = 0.04;

/// Share of the home price suggested as down payment
pub const DEFAULT_DOWN_PAYMENT_SHARE: f64 = 0.20;

/// Loan term used when the caller does not provide one
pub const DEFAULT_TERM_YEARS: u32 = 25;

/// Months per year, as used by every monthly-compounding formula
pub const MONTHS_PER_YEAR: u32 = 12;

/// Monthly growth factor of the indexed unit: (1 + 3.5%)^(1/12)
pub fn indexed_unit_monthly_growth() -> f64 {
    (1.0 + INDEXED_UNIT_ANNUAL_GROWTH).powf(1.0 / MONTHS_PER_YEAR as f64)
}

/// Suggested down payment for a home price, rounded to whole currency units
pub fn default_down_payment(home_price: f64) -> f64 {
    (home_price * DEFAULT_DOWN_PAYMENT_SHARE).round()
}

/// Home value after `years` of appreciation, rounded to whole currency units
pub fn appreciated_property_value(home_price: f64, years: u32) -> f64 {
    (home_price * (1.0 + PROPERTY_ANNUAL_APPRECIATION).powi(years as i32)).round()
}
