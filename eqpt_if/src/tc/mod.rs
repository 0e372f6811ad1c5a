//! # Command module
//!
//! Commands that select what the robot is doing: the operating mode, and control of the
//! autonomous sequence.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod auto;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Operating modes of the robot.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub enum RobotMode {
    /// Drive outputs held at zero.
    Disabled,

    /// Execute the autonomous script.
    Auto,

    /// Field-oriented manual control from the operator's controller.
    Teleop,
}

/// Error returned when a mode string can't be parsed.
#[derive(Debug, Error)]
pub enum ParseModeError {
    #[error("Unknown robot mode \"{0}\", expected one of disabled, auto or teleop")]
    UnknownMode(String),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl FromStr for RobotMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "disabled" => Ok(RobotMode::Disabled),
            "auto" | "autonomous" => Ok(RobotMode::Auto),
            "teleop" => Ok(RobotMode::Teleop),
            _ => Err(ParseModeError::UnknownMode(s.to_string())),
        }
    }
}
