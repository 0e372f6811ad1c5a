//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Clamp a value between the given limits.
pub fn clamp<T>(value: T, min: T, max: T) -> T
where
    T: Float
{
    let mut ret = value;

    if ret > max {
        ret = max
    }
    if ret < min {
        ret = min
    }

    ret
}

/// Return the sign of a value as -1, 0 or +1.
///
/// Unlike `Float::signum` zero (of either sign) maps to zero, which lets callers treat a zero
/// target as having no direction at all.
pub fn sign<T>(value: T) -> T
where
    T: Float
{
    if value > T::zero() {
        T::one()
    }
    else if value < T::zero() {
        -T::one()
    }
    else {
        T::zero()
    }
}

/// Apply a deadband to a normalised value.
///
/// Values with a magnitude at or below `deadband` become zero, values above it are rescaled so
/// that the output still spans the full [-1, 1] range.
pub fn apply_deadband<T>(value: T, deadband: T) -> T
where
    T: Float
{
    if value.abs() > deadband {
        if value > T::zero() {
            (value - deadband) / (T::one() - deadband)
        }
        else {
            (value + deadband) / (T::one() - deadband)
        }
    }
    else {
        T::zero()
    }
}

/// Scale all values down so that the largest magnitude is at most one.
///
/// Returns true if the values were scaled.
pub fn desaturate<T>(values: &mut [T]) -> bool
where
    T: Float
{
    let max_magn = values
        .iter()
        .fold(T::zero(), |acc, v| acc.max(v.abs()));

    if max_magn > T::one() {
        for v in values.iter_mut() {
            *v = *v / max_magn;
        }
        true
    }
    else {
        false
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_sign() {
        assert_eq!(sign(60f64), 1.0);
        assert_eq!(sign(-0.5f64), -1.0);
        assert_eq!(sign(0f64), 0.0);
        assert_eq!(sign(-0f64), 0.0);
    }

    #[test]
    fn test_deadband() {
        assert_eq!(apply_deadband(0.01f64, 0.02), 0.0);
        assert_eq!(apply_deadband(-0.02f64, 0.02), 0.0);
        assert_eq!(apply_deadband(1f64, 0.02), 1.0);
        assert_eq!(apply_deadband(-1f64, 0.02), -1.0);
        assert!((apply_deadband(0.51f64, 0.02) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_desaturate() {
        let mut in_range = [0.2f64, -0.5, 1.0, 0.0];
        assert!(!desaturate(&mut in_range));
        assert_eq!(in_range, [0.2, -0.5, 1.0, 0.0]);

        let mut saturated = [2.0f64, -1.0, 0.5, -4.0];
        assert!(desaturate(&mut saturated));
        assert_eq!(saturated, [0.5, -0.25, 0.125, -1.0]);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(1.2f64, -1.0, 1.0), 1.0);
        assert_eq!(clamp(-3.0f64, -1.0, 1.0), -1.0);
        assert_eq!(clamp(0.3f64, -1.0, 1.0), 0.3);
    }
}
