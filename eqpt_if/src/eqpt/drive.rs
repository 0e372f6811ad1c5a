//! # Drive Equipment Interface

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use std::fmt::Display;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Number of independently driven wheels on the chassis.
pub const NUM_WHEELS: usize = 4;

/// All wheels, in the order used for every wheel-indexed array in the software.
pub const WHEEL_IDS: [WheelId; NUM_WHEELS] = [
    WheelId::FrontLeft,
    WheelId::FrontRight,
    WheelId::RearLeft,
    WheelId::RearRight,
];

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// IDs of the drive wheels.
#[derive(Serialize, Deserialize, Debug, Hash, Eq, PartialEq, Copy, Clone)]
pub enum WheelId {
    FrontLeft,
    FrontRight,
    RearLeft,
    RearRight,
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A sink for wheel speed demands, typically a set of motor controllers.
///
/// Implementations are responsible for clamping demands into [-1, 1] and for applying the
/// polarity set with `set_inverted`.
pub trait DriveActuator {
    /// Set whether the given wheel's motor is inverted. Called once at initialisation.
    fn set_inverted(&mut self, wheel: WheelId, inverted: bool);

    /// Set the normalised speed demand of a wheel, between -1 and +1.
    fn set_wheel_dem(&mut self, wheel: WheelId, speed: f64);
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl WheelId {
    /// Position of this wheel in wheel-indexed arrays.
    pub fn index(&self) -> usize {
        match self {
            WheelId::FrontLeft => 0,
            WheelId::FrontRight => 1,
            WheelId::RearLeft => 2,
            WheelId::RearRight => 3,
        }
    }

    /// Returns true if the wheel is on the left side of the chassis.
    pub fn is_left(&self) -> bool {
        matches!(self, WheelId::FrontLeft | WheelId::RearLeft)
    }
}

impl Display for WheelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WheelId::FrontLeft => write!(f, "FrontLeft"),
            WheelId::FrontRight => write!(f, "FrontRight"),
            WheelId::RearLeft => write!(f, "RearLeft"),
            WheelId::RearRight => write!(f, "RearRight"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_wheel_order() {
        for (i, w) in WHEEL_IDS.iter().enumerate() {
            assert_eq!(w.index(), i);
        }
        assert_eq!(format!("{}", WheelId::RearRight), "RearRight");
    }
}
