//! Input guards shared by the formulas.

use crate::error::CalcError;

/// Reject NaN and infinities.
pub fn ensure_finite(field: &'static str, value: f64) -> Result<f64, CalcError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::invalid(field, format!("expected a finite number, got {value}")))
    }
}

/// Require `min <= value <= max` (inclusive on both ends).
pub fn ensure_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<f64, CalcError> {
    let value = ensure_finite(field, value)?;
    if value < min || value > max {
        return Err(CalcError::invalid(
            field,
            format!("{value} is outside the accepted range {min}..={max}"),
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_inclusive() {
        assert_eq!(ensure_range("age", 15.0, 15.0, 100.0), Ok(15.0));
        assert_eq!(ensure_range("age", 100.0, 15.0, 100.0), Ok(100.0));
        assert!(ensure_range("age", 14.9, 15.0, 100.0).is_err());
    }

    #[test]
    fn non_finite_is_rejected_with_field_name() {
        let err = ensure_range("weight", f64::NAN, 2.0, 650.0).unwrap_err();
        assert_eq!(err.field(), "weight");
        assert!(ensure_finite("x", f64::INFINITY).is_err());
    }
}
