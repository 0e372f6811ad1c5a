//! Parameters structure for DriveCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;
use eqpt_if::eqpt::drive::NUM_WHEELS;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for drive control.
#[derive(Debug, Clone, Deserialize)]
pub struct Params {

    /// Whether each wheel's motor is inverted, in [FL, FR, RL, RR] order.
    ///
    /// The left side motors are mounted mirrored so they are inverted by default.
    pub inverted: [bool; NUM_WHEELS],

    /// Scale factor applied to every wheel demand after desaturation.
    pub max_output: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            inverted: [true, false, true, false],
            max_output: 1.0,
        }
    }
}
