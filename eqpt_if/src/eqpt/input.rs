//! # Operator Input Interface

/// An operator input device, such as a joystick or gamepad.
pub trait OperatorInput {
    /// Read the value of the given axis, between -1 and +1.
    ///
    /// Axes which don't exist, or a disconnected device, read as zero.
    fn read_axis(&mut self, axis: usize) -> f64;
}
