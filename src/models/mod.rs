//! Data models

pub mod feature_map;
pub mod explanation;
pub mod decision;
pub mod allocation;
pub mod risk;
pub mod sentiment;

pub use feature_map::*;
pub use explanation::*;
pub use decision::*;
pub use allocation::*;
pub use risk::*;
pub use sentiment::*;

/// Round to a fixed number of decimal places.
///
/// Goes through the exact decimal formatter so ties resolve the same way as
/// correctly rounded decimal conversion, not `(x * 10^n).round()`.
pub fn round_to(value: f64, places: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.*}", places, value).parse().unwrap_or(value)
}

/// Rejects NaN and infinities in numeric request fields.
pub(crate) fn all_finite(values: &[f64]) -> Result<(), validator::ValidationError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("non_finite"))
    }
}

pub(crate) fn finite(value: f64) -> Result<(), validator::ValidationError> {
    all_finite(&[value])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.695_324_14, 4), 0.6953);
        assert_eq!(round_to(0.347_662, 4), 0.3477);
        assert_eq!(round_to(-0.142_857_142_857, 6), -0.142857);
        assert_eq!(round_to(0.0, 6), 0.0);
        assert!(round_to(f64::NAN, 4).is_nan());
    }

    #[test]
    fn test_finite_checks() {
        assert!(all_finite(&[1.0, -2.5, 0.0]).is_ok());
        assert!(all_finite(&[1.0, f64::NAN]).is_err());
        assert!(finite(1.0e300).is_ok());
        assert!(finite(f64::INFINITY).is_err());
    }
}
