//! # Wheel distance estimation

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::f64::consts::PI;

use super::OdomParams;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Converts raw encoder counts (motor revolutions) into the distance travelled by the wheel.
#[derive(Debug, Clone, Copy)]
pub struct DistanceEstimator {
    gear_ratio: f64,
    wheel_diameter_in: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl DistanceEstimator {
    pub fn new(params: &OdomParams) -> Self {
        Self {
            gear_ratio: params.gear_ratio,
            wheel_diameter_in: params.wheel_diameter_in,
        }
    }

    /// Distance in inches covered by a wheel whose encoder reads `raw_count`.
    pub fn to_inches(&self, raw_count: f64) -> f64 {
        (raw_count / self.gear_ratio) * PI * self.wheel_diameter_in
    }

    /// Encoder count that corresponds to the wheel covering `inches`.
    pub fn to_raw(&self, inches: f64) -> f64 {
        inches / (PI * self.wheel_diameter_in) * self.gear_ratio
    }
}

impl Default for DistanceEstimator {
    fn default() -> Self {
        Self::new(&OdomParams::default())
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
