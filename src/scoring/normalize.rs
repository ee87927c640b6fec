use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::model::Dimension;

/// What to do with a finite value outside the declared range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangePolicy {
    #[default]
    Reject,
    Clamp,
}

/// Validate a dimension value against its declared range.
///
/// In-range values come back unchanged, except that `-0` becomes `0`.
/// Non-finite values, broken bounds and fractions on a whole-number scale
/// are always rejected; out-of-range values are rejected or clamped per
/// `policy`.
pub fn normalize(dimension: &Dimension, policy: RangePolicy) -> EngineResult<f64> {
    let invalid = || EngineError::InvalidRange {
        id: dimension.id.clone(),
        value: dimension.value,
        min: dimension.min,
        max: dimension.max,
    };

    // f64::clamp panics on these
    if !dimension.min.is_finite() || !dimension.max.is_finite() || dimension.min > dimension.max {
        return Err(invalid());
    }
    if !dimension.value.is_finite() {
        return Err(invalid());
    }

    let value = if dimension.in_range() {
        dimension.value
    } else {
        match policy {
            RangePolicy::Reject => return Err(invalid()),
            RangePolicy::Clamp => {
                let clamped = dimension.value.clamp(dimension.min, dimension.max);
                tracing::warn!(
                    dimension = %dimension.id,
                    value = dimension.value,
                    clamped,
                    "value outside declared range, clamped"
                );
                clamped
            }
        }
    };

    if dimension.is_whole_scale() && value.fract() != 0.0 {
        return Err(invalid());
    }

    // Adding +0 turns -0 into 0 so ties rank the same
    Ok(value + 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dim(value: f64) -> Dimension {
        Dimension::new("R", "Realistic", 0.0, 100.0, value)
    }

    #[test]
    fn test_in_range_is_identity() {
        for v in [0.0, 1.0, 45.0, 99.0, 100.0] {
            assert_eq!(normalize(&dim(v), RangePolicy::Reject).unwrap(), v);
            assert_eq!(normalize(&dim(v), RangePolicy::Clamp).unwrap(), v);
        }
    }

    #[test]
    fn test_fraction_on_whole_scale_rejected() {
        assert!(matches!(
            normalize(&dim(40.5), RangePolicy::Reject),
            Err(EngineError::InvalidRange { .. })
        ));
        assert!(normalize(&dim(40.5), RangePolicy::Clamp).is_err());
        // Clamping lands on a bound, which is whole
        assert_eq!(normalize(&dim(140.5), RangePolicy::Clamp).unwrap(), 100.0);
    }

    #[test]
    fn test_fraction_on_fractional_scale() {
        let weight = Dimension::new("w", "Weight", 0.0, 1.5, 0.25);
        assert_eq!(normalize(&weight, RangePolicy::Reject).unwrap(), 0.25);
    }

    #[test]
    fn test_negative_zero_becomes_zero() {
        let axis = Dimension::new("teens", "Teens", -5.0, 5.0, -0.0);
        let value = normalize(&axis, RangePolicy::Reject).unwrap();
        assert!(value.is_sign_positive());
    }

    #[test]
    fn test_broken_bounds_rejected_without_panic() {
        let inverted = Dimension::new("x", "X", 10.0, 0.0, 20.0);
        assert!(normalize(&inverted, RangePolicy::Clamp).is_err());
        let nan_bound = Dimension::new("x", "X", f64::NAN, 5.0, 20.0);
        assert!(normalize(&nan_bound, RangePolicy::Clamp).is_err());
    }

    #[test]
    fn test_out_of_range_rejected() {
        let err = normalize(&dim(101.0), RangePolicy::Reject).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidRange {
                id: "R".to_string(),
                value: 101.0,
                min: 0.0,
                max: 100.0,
            }
        );
        assert!(normalize(&dim(-0.1), RangePolicy::Reject).is_err());
    }

    #[test]
    fn test_clamp_policy() {
        assert_eq!(normalize(&dim(140.0), RangePolicy::Clamp).unwrap(), 100.0);
        assert_eq!(normalize(&dim(-3.0), RangePolicy::Clamp).unwrap(), 0.0);
    }

    #[test]
    fn test_non_finite_rejected_under_clamp() {
        assert!(normalize(&dim(f64::NAN), RangePolicy::Clamp).is_err());
        assert!(normalize(&dim(f64::INFINITY), RangePolicy::Clamp).is_err());
    }

    #[test]
    fn test_symmetric_axis_bounds() {
        let axis = Dimension::new("office", "Office", -5.0, 5.0, -5.0);
        assert_eq!(normalize(&axis, RangePolicy::Reject).unwrap(), -5.0);
        assert!(normalize(&axis.with_value(-6.0), RangePolicy::Reject).is_err());
    }
}
