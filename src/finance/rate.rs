//! Internal rate of return for monthly cashflow streams
//!
//! Used to express a loan's cost as a single effective annual rate.

use crate::assumptions::MONTHS_PER_YEAR;

const TOLERANCE: f64 = 1e-10;
const MAX_ITERATIONS: usize = 1000;

/// Search interval for the periodic rate when Newton-Raphson fails
const BISECTION_LOW: f64 = -0.5;
const BISECTION_HIGH: f64 = 1.0;

/// Periodic IRR of `cashflows` (index = period, positive = inflow)
///
/// Returns `None` when the stream has no sign change or no root is found.
pub fn internal_rate_of_return(cashflows: &[f64]) -> Option<f64> {
    if cashflows.is_empty() {
        return None;
    }

    let has_inflow = cashflows.iter().any(|&cf| cf > TOLERANCE);
    let has_outflow = cashflows.iter().any(|&cf| cf < -TOLERANCE);
    if !has_inflow || !has_outflow {
        return None;
    }

    let mut rate = 0.05 / MONTHS_PER_YEAR as f64;
    for _ in 0..MAX_ITERATIONS {
        let (npv, slope) = npv_with_slope(cashflows, rate);
        if slope.abs() < 1e-20 {
            break;
        }

        let next = (rate - npv / slope).clamp(BISECTION_LOW, BISECTION_HIGH);
        if (next - rate).abs() < TOLERANCE {
            return Some(next);
        }
        rate = next;
    }

    bisect(cashflows)
}

/// Annualized IRR of a monthly cashflow stream: (1 + irr)^12 - 1
pub fn effective_annual_rate(cashflows: &[f64]) -> Option<f64> {
    internal_rate_of_return(cashflows).map(|monthly| (1.0 + monthly).powi(MONTHS_PER_YEAR as i32) - 1.0)
}

fn npv(cashflows: &[f64], rate: f64) -> f64 {
    let discount = 1.0 / (1.0 + rate);
    let mut factor = 1.0;
    let mut total = 0.0;
    for &cf in cashflows {
        total += cf * factor;
        factor *= discount;
    }
    total
}

/// NPV and its derivative with respect to the rate
fn npv_with_slope(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let discount = 1.0 / (1.0 + rate);
    let mut factor = 1.0;
    let mut total = 0.0;
    let mut slope = 0.0;
    for (t, &cf) in cashflows.iter().enumerate() {
        total += cf * factor;
        slope -= t as f64 * cf * factor * discount;
        factor *= discount;
    }
    (total, slope)
}

fn bisect(cashflows: &[f64]) -> Option<f64> {
    let mut low = BISECTION_LOW;
    let mut high = BISECTION_HIGH;
    let mut npv_low = npv(cashflows, low);

    if npv_low * npv(cashflows, high) > 0.0 {
        return None;
    }

    for _ in 0..MAX_ITERATIONS {
        let mid = (low + high) / 2.0;
        let npv_mid = npv(cashflows, mid);

        if npv_mid.abs() < TOLERANCE || (high - low) / 2.0 < TOLERANCE {
            return Some(mid);
        }

        if npv_mid * npv_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_single_year_return() {
        let mut cashflows = vec![-1000.0];
        cashflows.extend(vec![0.0; 11]);
        cashflows.push(1100.0);

        let annual = effective_annual_rate(&cashflows).unwrap();
        assert_abs_diff_eq!(annual, 0.10, epsilon = 1e-6);
    }

    #[test]
    fn test_level_loan_recovers_rate() {
        let payment = crate::finance::level_payment(10_000.0, 0.005, 12);
        let mut cashflows = vec![10_000.0];
        cashflows.extend(vec![-payment; 12]);

        let monthly = internal_rate_of_return(&cashflows).unwrap();
        assert_abs_diff_eq!(monthly, 0.005, epsilon = 1e-9);
    }

    #[test]
    fn test_no_sign_change() {
        assert_eq!(internal_rate_of_return(&[]), None);
        assert_eq!(internal_rate_of_return(&[100.0, 50.0]), None);
        assert_eq!(internal_rate_of_return(&[-100.0, -50.0]), None);
    }

    #[test]
    fn test_bisection_agrees_with_newton() {
        let mut cashflows = vec![-1000.0];
        cashflows.extend(vec![0.0; 11]);
        cashflows.push(1100.0);

        let newton = internal_rate_of_return(&cashflows).unwrap();
        let bisected = bisect(&cashflows).unwrap();
        assert_abs_diff_eq!(newton, bisected, epsilon = 1e-8);
    }
}
