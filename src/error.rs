//! Error types shared by the geodesy and finance modules

use thiserror::Error;

use crate::assumptions::MONTHS_PER_YEAR;

/// Errors reported by the calculators
///
/// Both kinds are terminal for the call that raised them: no partial result is
/// returned alongside an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    /// A required numeric field is missing, non-finite, or out of range
    #[error("invalid input for {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: String,
    },

    /// A batch conversion line could not be parsed
    #[error("malformed entry on line {line_number}: {line:?} ({reason})")]
    MalformedBatchEntry {
        line_number: usize,
        line: String,
        reason: String,
    },
}

impl CalcError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

/// Require a finite, strictly positive value
pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<f64, CalcError> {
    if !value.is_finite() {
        return Err(CalcError::invalid(field, "must be a finite number"));
    }
    if value <= 0.0 {
        return Err(CalcError::invalid(field, format!("must be greater than zero, got {}", value)));
    }
    Ok(value)
}

/// Require a finite value that is zero or greater
pub(crate) fn require_non_negative(field: &'static str, value: f64) -> Result<f64, CalcError> {
    if !value.is_finite() {
        return Err(CalcError::invalid(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(CalcError::invalid(field, format!("must not be negative, got {}", value)));
    }
    Ok(value)
}

/// Require any finite value
pub(crate) fn require_finite(field: &'static str, value: f64) -> Result<f64, CalcError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::invalid(field, "must be a finite number"))
    }
}

/// Number of monthly periods in `term_years`, bounded so period counts stay
/// valid as `i32` exponents
pub(crate) fn require_term_months(field: &'static str, term_years: u32) -> Result<u32, CalcError> {
    term_years
        .checked_mul(MONTHS_PER_YEAR)
        .filter(|&months| months <= i32::MAX as u32)
        .ok_or_else(|| {
            CalcError::invalid(field, format!("term of {} years is too long to compound monthly", term_years))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_positive() {
        assert_eq!(require_positive("x", 2.5), Ok(2.5));
        assert!(require_positive("x", 0.0).is_err());
        assert!(require_positive("x", -1.0).is_err());
        assert!(require_positive("x", f64::NAN).is_err());
        assert!(require_positive("x", f64::INFINITY).is_err());
    }

    #[test]
    fn test_require_non_negative() {
        assert_eq!(require_non_negative("x", 0.0), Ok(0.0));
        assert!(require_non_negative("x", -0.01).is_err());
        assert!(require_non_negative("x", f64::NAN).is_err());
    }

    #[test]
    fn test_require_term_months() {
        assert_eq!(require_term_months("term_years", 0), Ok(0));
        assert_eq!(require_term_months("term_years", 25), Ok(300));
        assert_eq!(require_term_months("term_years", 178_956_970), Ok(2_147_483_640));
        // 178,956,971 * 12 fits in u32 but not in i32
        assert!(require_term_months("term_years", 178_956_971).is_err());
        assert!(matches!(
            require_term_months("term_years", 400_000_000),
            Err(CalcError::InvalidInput { field: "term_years", .. })
        ));
    }

    #[test]
    fn test_error_messages_name_the_field() {
        let err = require_positive("term_years", 0.0).unwrap_err();
        assert!(err.to_string().contains("term_years"));

        let err = CalcError::MalformedBatchEntry {
            line_number: 3,
            line: "P3 346000".to_string(),
            reason: "expected 3 fields, found 2".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("line 3"));
        assert!(message.contains("P3 346000"));
    }
}
