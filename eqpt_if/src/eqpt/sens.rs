//! # Sensor Equipment Interface
//!
//! Sensor reads cannot fail through these interfaces. A driver that loses its device keeps
//! returning its last (or a zero) value, which the control software treats as valid.

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A rotation sensor (gyro) measuring the heading of the chassis.
pub trait RotationSensor {
    /// Read the accumulated rotation since the last zero, in degrees.
    ///
    /// Positive rotation is clockwise when viewed from above. The reading is not wrapped, a
    /// full clockwise revolution reads 360.
    fn read_angle_deg(&mut self) -> f64;

    /// Set the current rotation as the zero reference.
    fn zero(&mut self);
}

/// A wheel rotation encoder.
pub trait EncoderSensor {
    /// Read the raw count, in motor shaft revolutions since the last zero.
    fn read_raw_count(&mut self) -> f64;

    /// Set the current count to zero.
    fn zero(&mut self);
}
