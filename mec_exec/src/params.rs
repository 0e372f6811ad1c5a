//! # Mecanum Executable Parameters
//!
//! This module provide parameters for the mecanum drive executable.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MecExecParams {
    /// Target period of one cycle.
    ///
    /// Units: seconds
    pub cycle_period_s: f64,

    /// Number of cycles between dashboard snapshots, zero disables them.
    pub tlm_save_every_cycles: u64,

    /// Number of consecutive cycle overruns after which the robot is made safe.
    pub max_consec_overruns: u64,
}

impl Default for MecExecParams {
    fn default() -> Self {
        Self {
            cycle_period_s: 0.02,
            tlm_save_every_cycles: 50,
            max_consec_overruns: 50,
        }
    }
}
