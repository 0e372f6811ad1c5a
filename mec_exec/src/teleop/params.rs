//! # Teleop parameters

use serde::Deserialize;

/// Mapping of one operator axis onto a drive demand.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AxisMap {
    /// Index of the axis on the operator input device.
    pub axis: usize,

    /// Negate the axis value, used for sticks which read negative when pushed forwards.
    #[serde(default)]
    pub inverted: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TeleopParams {
    pub forward: AxisMap,

    pub strafe: AxisMap,

    pub rotation: AxisMap,

    /// Axis magnitudes at or below this are treated as zero.
    pub deadband: f64,

    /// Interpret the translation demands in the field frame.
    pub field_oriented: bool,
}

impl AxisMap {
    pub fn new(axis: usize, inverted: bool) -> Self {
        Self { axis, inverted }
    }
}

impl Default for TeleopParams {
    fn default() -> Self {
        Self {
            forward: AxisMap::new(1, true),
            strafe: AxisMap::new(0, false),
            rotation: AxisMap::new(4, false),
            deadband: 0.02,
            field_oriented: true,
        }
    }
}
