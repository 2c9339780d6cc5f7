use crate::FlError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, FlError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(FlError::NonFinite { what, value: v })
    }
}

/// Finite and `>= 0`.
pub fn ensure_non_negative(v: Real, what: &'static str) -> Result<Real, FlError> {
    let v = ensure_finite(v, what)?;
    if v < 0.0 {
        return Err(FlError::Negative { what, value: v });
    }
    Ok(v)
}

/// Clamp into `[0, 1]`; NaN collapses to 0.
pub fn clamp01(v: Real) -> Real {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
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
    fn ensure_non_negative_rejects_negative() {
        assert_eq!(ensure_non_negative(0.0, "dt").unwrap(), 0.0);
        assert!(matches!(
            ensure_non_negative(-0.5, "dt"),
            Err(FlError::Negative { what: "dt", .. })
        ));
    }

    #[test]
    fn clamp01_handles_nan_and_range() {
        assert_eq!(clamp01(Real::NAN), 0.0);
        assert_eq!(clamp01(-3.0), 0.0);
        assert_eq!(clamp01(0.25), 0.25);
        assert_eq!(clamp01(4.0), 1.0);
    }
}
