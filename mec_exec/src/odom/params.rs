//! # Odometry parameters

use serde::Deserialize;

/// Parameters of the wheel drivetrain used to convert encoder counts into distances.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct OdomParams {
    /// Motor revolutions per wheel revolution.
    pub gear_ratio: f64,

    /// Units: inches
    pub wheel_diameter_in: f64,
}

impl Default for OdomParams {
    fn default() -> Self {
        Self {
            gear_ratio: 16.0,
            wheel_diameter_in: 6.0,
        }
    }
}
