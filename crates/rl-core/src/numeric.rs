use crate::RlError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, RlError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(RlError::NonFinite { what, value: v })
    }
}

/// True when `v` is finite and strictly greater than zero.
#[inline]
pub fn is_positive_finite(v: Real) -> bool {
    v.is_finite() && v > 0.0
}

/// Signed relative deviation of `value` from `reference`.
///
/// Returns 0 when both are zero and the absolute difference when only the
/// reference is zero, so the result is always finite for finite inputs.
pub fn relative_deviation(value: Real, reference: Real) -> Real {
    if reference == 0.0 {
        value
    } else {
        (value - reference) / reference.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn positive_finite_rejects_zero_and_nan() {
        assert!(is_positive_finite(1e-9));
        assert!(!is_positive_finite(0.0));
        assert!(!is_positive_finite(-1.0));
        assert!(!is_positive_finite(Real::NAN));
        assert!(!is_positive_finite(Real::INFINITY));
    }

    #[test]
    fn relative_deviation_signs() {
        assert!((relative_deviation(1.02, 1.0) - 0.02).abs() < 1e-12);
        assert!((relative_deviation(0.98, 1.0) + 0.02).abs() < 1e-12);
        assert_eq!(relative_deviation(0.0, 0.0), 0.0);
        assert_eq!(relative_deviation(0.5, 0.0), 0.5);
    }
}
