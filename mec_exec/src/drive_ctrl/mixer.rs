//! Mecanum inverse kinematics

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use eqpt_if::eqpt::drive::{WheelId, NUM_WHEELS};
use nalgebra::{Rotation2, Vector2};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Compute the wheel demands for a field-oriented mecanum drive.
///
/// The `(forward, strafe)` vector is rotated by `-heading_deg` to take it from the field frame
/// into the chassis frame, then decomposed onto the rollers with the rotation superimposed:
///
/// ```text
/// FL = f + s + r    FR = f - s - r
/// RL = f - s + r    RR = f + s - r
/// ```
///
/// The output is indexed by [`WheelId::index`]. Inputs are not range checked and outputs are
/// not normalised.
pub fn mix(forward: f64, strafe: f64, rotation: f64, heading_deg: f64) -> [f64; NUM_WHEELS] {
    let chassis = Rotation2::new(-heading_deg.to_radians()) * Vector2::new(forward, strafe);
    let (f, s) = (chassis[0], chassis[1]);

    let mut dems = [0f64; NUM_WHEELS];
    dems[WheelId::FrontLeft.index()] = f + s + rotation;
    dems[WheelId::FrontRight.index()] = f - s - rotation;
    dems[WheelId::RearLeft.index()] = f - s + rotation;
    dems[WheelId::RearRight.index()] = f + s - rotation;

    dems
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_dems_eq(a: [f64; NUM_WHEELS], b: [f64; NUM_WHEELS]) {
        for i in 0..NUM_WHEELS {
            assert!(
                (a[i] - b[i]).abs() < EPS,
                "wheel {} differs: {:?} vs {:?}", i, a, b
            );
        }
    }

    /// Robot-oriented decomposition in [FL, FR, RL, RR] order
    fn reference(f: f64, s: f64, r: f64) -> [f64; NUM_WHEELS] {
        [f + s + r, f - s - r, f - s + r, f + s - r]
    }

    #[test]
    fn test_mix_zero_heading() {
        let samples = [-1.0, -0.6, -0.2, 0.0, 0.3, 0.7, 1.0];

        for &f in samples.iter() {
            for &s in samples.iter() {
                assert_dems_eq(mix(f, s, 0.25, 0.0), reference(f, s, 0.25));
            }
        }
    }

    #[test]
    fn test_mix_pure_motions() {
        // Forward: all wheels forward
        assert_dems_eq(mix(1.0, 0.0, 0.0, 0.0), [1.0, 1.0, 1.0, 1.0]);

        // Strafe right: FL and RR forward, FR and RL backward
        assert_dems_eq(mix(0.0, 1.0, 0.0, 0.0), [1.0, -1.0, -1.0, 1.0]);

        // Rotate clockwise: left side forward, right side backward
        assert_dems_eq(mix(0.0, 0.0, 0.2, 0.0), [0.2, -0.2, 0.2, -0.2]);
    }

    #[test]
    fn test_mix_heading_90_swaps_axes() {
        // Field forward is chassis left once the chassis has turned 90 degrees clockwise
        assert_dems_eq(mix(1.0, 0.0, 0.0, 90.0), reference(0.0, -1.0, 0.0));

        // Field right is chassis forward
        assert_dems_eq(mix(0.0, 1.0, 0.0, 90.0), reference(1.0, 0.0, 0.0));

        // Rotation is not affected by the heading
        assert_dems_eq(mix(0.5, -0.5, 0.3, 90.0), reference(-0.5, -0.5, 0.3));
    }

    #[test]
    fn test_mix_unbounded_heading() {
        // A heading accumulated past a full turn behaves like the wrapped heading
        assert_dems_eq(mix(0.4, 0.1, 0.0, 450.0), mix(0.4, 0.1, 0.0, 90.0));
        assert_dems_eq(mix(0.4, 0.1, 0.0, -270.0), mix(0.4, 0.1, 0.0, 90.0));
    }

    #[test]
    fn test_mix_passes_out_of_range() {
        assert_dems_eq(mix(2.0, 0.0, 1.0, 0.0), [3.0, 1.0, 3.0, 1.0]);
    }
}
