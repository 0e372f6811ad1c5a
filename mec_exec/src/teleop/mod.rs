//! # Teleop module
//!
//! Converts the operator's stick positions into a field-oriented [`DriveCmd`] every cycle.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod params;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use eqpt_if::eqpt::input::OperatorInput;
use log::trace;

use crate::drive_ctrl::DriveCmd;
use util::maths::{apply_deadband, clamp};

pub use params::{AxisMap, TeleopParams};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

pub struct Teleop {
    params: TeleopParams,
    input: Box<dyn OperatorInput>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Teleop {
    pub fn new(params: TeleopParams, input: Box<dyn OperatorInput>) -> Self {
        Self { params, input }
    }

    /// Build the drive command for this cycle from the current operator input.
    ///
    /// `field_heading_deg` is the chassis heading relative to the field, which is only used if
    /// the teleop is field oriented.
    pub fn proc(&mut self, field_heading_deg: f64) -> DriveCmd {
        let cmd = DriveCmd {
            forward: self.read(self.params.forward),
            strafe: self.read(self.params.strafe),
            rotation: self.read(self.params.rotation),
            field_heading_deg: if self.params.field_oriented {
                Some(field_heading_deg)
            } else {
                None
            },
        };

        trace!("Teleop command: {:?}", cmd);

        cmd
    }

    fn read(&mut self, map: AxisMap) -> f64 {
        let mut value = clamp(self.input.read_axis(map.axis), -1.0, 1.0);
        if map.inverted {
            value = -value;
        }

        apply_deadband(value, self.params.deadband)
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
