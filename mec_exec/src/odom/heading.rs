//! # Heading source

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use eqpt_if::eqpt::sens::RotationSensor;
use log::debug;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Wraps the rotation sensor to provide the chassis heading.
///
/// Two headings are available. The current angle is measured from the last [`reset`] and is what
/// the motion primitives use. The field heading adds the angles accumulated before every previous
/// reset, so it stays continuous and is measured from the orientation the robot had when the
/// program started. Neither is wrapped into a single turn.
///
/// [`reset`]: HeadingSource::reset
pub struct HeadingSource {
    sensor: Box<dyn RotationSensor>,

    /// Sum of the angles read just before each reset.
    field_offset_deg: f64,

    /// The most recent field heading read from the sensor.
    last_field_heading_deg: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl HeadingSource {
    pub fn new(sensor: Box<dyn RotationSensor>) -> Self {
        Self {
            sensor,
            field_offset_deg: 0.0,
            last_field_heading_deg: 0.0,
        }
    }

    /// Read the angle accumulated since the last reset, positive clockwise.
    ///
    /// Units: degrees
    pub fn current_angle_deg(&mut self) -> f64 {
        let angle_deg = self.sensor.read_angle_deg();
        self.last_field_heading_deg = self.field_offset_deg + angle_deg;
        angle_deg
    }

    /// Read the heading relative to the orientation at program start.
    ///
    /// Units: degrees
    pub fn field_heading_deg(&mut self) -> f64 {
        self.current_angle_deg();
        self.last_field_heading_deg
    }

    /// The field heading from the most recent sensor read, without polling the sensor.
    pub fn last_field_heading_deg(&self) -> f64 {
        self.last_field_heading_deg
    }

    /// Zero the current angle, folding it into the field offset.
    pub fn reset(&mut self) {
        let angle_deg = self.sensor.read_angle_deg();
        self.field_offset_deg += angle_deg;
        self.sensor.zero();
        self.last_field_heading_deg = self.field_offset_deg;

        debug!(
            "Heading reset at {:.3} deg, field heading {:.3} deg",
            angle_deg, self.field_offset_deg
        );
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use std::{cell::Cell, rc::Rc};

    /// Gyro whose angle is set directly by the test
    struct FakeGyro(Rc<Cell<f64>>);

    impl RotationSensor for FakeGyro {
        fn read_angle_deg(&mut self) -> f64 {
            self.0.get()
        }

        fn zero(&mut self) {
            self.0.set(0.0)
        }
    }

    #[test]
    fn test_reset_zeroes_current_angle() {
        let angle = Rc::new(Cell::new(37.5));
        let mut heading = HeadingSource::new(Box::new(FakeGyro(angle.clone())));

        assert_eq!(heading.current_angle_deg(), 37.5);
        heading.reset();
        assert_eq!(heading.current_angle_deg(), 0.0);
    }

    #[test]
    fn test_field_heading_continuous() {
        let angle = Rc::new(Cell::new(90.0));
        let mut heading = HeadingSource::new(Box::new(FakeGyro(angle.clone())));

        heading.reset();
        assert_eq!(heading.field_heading_deg(), 90.0);

        // Keep turning past a full revolution, the heading is not wrapped
        angle.set(300.0);
        assert_eq!(heading.field_heading_deg(), 390.0);
        heading.reset();
        angle.set(-45.0);
        assert_eq!(heading.current_angle_deg(), -45.0);
        assert_eq!(heading.field_heading_deg(), 345.0);
        assert_eq!(heading.last_field_heading_deg(), 345.0);
    }
}
