//! Closed-form annuity helpers

use crate::assumptions::MONTHS_PER_YEAR;

/// Monthly rate from an annual percentage: 4.5 → 0.00375
pub fn monthly_rate(annual_percent: f64) -> f64 {
    annual_percent / 100.0 / MONTHS_PER_YEAR as f64
}

/// Compound growth factor (1 + rate)^periods
pub fn growth_factor(rate: f64, periods: u32) -> f64 {
    (1.0 + rate).powi(periods as i32)
}

/// Level payment that fully amortizes `principal` over `periods` at `rate` per period
///
/// Falls back to straight division when the rate is zero.
pub fn level_payment(principal: f64, rate: f64, periods: u32) -> f64 {
    if rate == 0.0 {
        return principal / periods as f64;
    }

    let factor = growth_factor(rate, periods);
    principal * (rate * factor) / (factor - 1.0)
}

/// Future value of `payment` deposited at the end of each of `periods` periods
pub fn future_value_of_annuity(payment: f64, rate: f64, periods: u32) -> f64 {
    if rate == 0.0 {
        return payment * periods as f64;
    }

    payment * ((growth_factor(rate, periods) - 1.0) / rate)
}
