//! # Motion primitives
//!
//! A primitive is a resumable state machine which drives the chassis towards a single
//! [`MotionGoal`]. Each call to `step` reads the sensors through [`Odometry`] and returns at most
//! one [`DriveCmd`], so the caller keeps control of the cycle and can cancel at any step.
//!
//! The states are:
//!
//! - `Init` - the primitive has not been stepped yet
//! - `Running` - the goal has not been reached, commands are being issued
//! - `Done` - the goal was reached
//! - `TimedOut` - the step limit was reached before the goal
//! - `Cancelled` - the caller cancelled the primitive
//!
//! The last three are terminal. A primitive never issues a stop when it finishes, the caller is
//! expected to do so.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod drive_straight;
mod params;
mod turn_to_angle;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{drive_ctrl::DriveCmd, odom::Odometry};

pub use drive_straight::DriveStraight;
pub use params::{StraightParams, TurnParams};
pub use turn_to_angle::TurnToAngle;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The goal of a single motion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionGoal {
    pub kind: MotionKind,

    /// Signed target of the motion. Inches for a straight, degrees clockwise for a turn.
    pub target: f64,
}

/// The result of stepping a primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MnvrStep {
    /// State of the primitive after the step.
    pub state: MnvrState,

    /// Command to execute this cycle, if any.
    pub cmd: Option<DriveCmd>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionKind {
    Straight,
    Turn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MnvrState {
    Init,
    Running,
    Done,
    TimedOut,
    Cancelled,
}

/// A primitive built from a [`MotionGoal`].
#[derive(Debug)]
pub enum Mnvr {
    Straight(DriveStraight),
    Turn(TurnToAngle),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl MotionGoal {
    pub fn straight(target_in: f64) -> Self {
        Self {
            kind: MotionKind::Straight,
            target: target_in,
        }
    }

    pub fn turn(target_deg: f64) -> Self {
        Self {
            kind: MotionKind::Turn,
            target: target_deg,
        }
    }
}

impl Display for MotionGoal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            MotionKind::Straight => write!(f, "driveStraight({} in)", self.target),
            MotionKind::Turn => write!(f, "turnToAngle({} deg)", self.target),
        }
    }
}

impl MnvrState {
    /// Returns true if the primitive will never issue another command.
    pub fn is_terminal(&self) -> bool {
        matches!(self, MnvrState::Done | MnvrState::TimedOut | MnvrState::Cancelled)
    }
}

impl Display for MnvrState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl MnvrStep {
    /// A step which issues no command.
    pub fn idle(state: MnvrState) -> Self {
        Self { state, cmd: None }
    }
}

impl Mnvr {
    pub fn new(goal: MotionGoal, straight: &StraightParams, turn: &TurnParams) -> Self {
        match goal.kind {
            MotionKind::Straight => Mnvr::Straight(DriveStraight::new(goal.target, *straight)),
            MotionKind::Turn => Mnvr::Turn(TurnToAngle::new(goal.target, *turn)),
        }
    }

    /// Advance the primitive by one cycle.
    ///
    /// If `cancel` is set and the primitive is not already finished it moves to `Cancelled`.
    pub fn step(&mut self, odom: &mut Odometry, cancel: bool) -> MnvrStep {
        match self {
            Mnvr::Straight(m) => m.step(odom, cancel),
            Mnvr::Turn(m) => m.step(odom, cancel),
        }
    }

    pub fn state(&self) -> MnvrState {
        match self {
            Mnvr::Straight(m) => m.state(),
            Mnvr::Turn(m) => m.state(),
        }
    }

    /// Number of running steps performed so far.
    pub fn ticks(&self) -> u64 {
        match self {
            Mnvr::Straight(m) => m.ticks(),
            Mnvr::Turn(m) => m.ticks(),
        }
    }

    pub fn goal(&self) -> MotionGoal {
        match self {
            Mnvr::Straight(m) => MotionGoal::straight(m.target_in()),
            Mnvr::Turn(m) => MotionGoal::turn(m.target_deg()),
        }
    }
}

/// Returns true while a signed measurement has not yet reached a signed target.
///
/// A zero target is always reached.
pub(crate) fn short_of_target(measured: f64, target: f64) -> bool {
    (target > 0.0 && measured < target) || (target < 0.0 && measured > target)
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::odom::fakes::fake_odom;

    #[test]
    fn test_short_of_target() {
        assert!(short_of_target(10.0, 60.0));
        assert!(!short_of_target(60.0, 60.0));
        assert!(!short_of_target(61.0, 60.0));
        assert!(short_of_target(-10.0, -60.0));
        assert!(!short_of_target(-60.5, -60.0));
        assert!(!short_of_target(0.0, 0.0));
        assert!(!short_of_target(5.0, 0.0));
    }

    #[test]
    fn test_mnvr_from_goal() {
        let mut mnvr = Mnvr::new(
            MotionGoal::turn(-30.0),
            &StraightParams::default(),
            &TurnParams::default(),
        );
        assert_eq!(mnvr.goal(), MotionGoal::turn(-30.0));
        assert_eq!(mnvr.state(), MnvrState::Init);

        let (mut odom, _sens) = fake_odom(-1.0, 0.0);
        let step = mnvr.step(&mut odom, false);
        assert_eq!(step.state, MnvrState::Running);
        assert_eq!(step.cmd, Some(DriveCmd::rotate(-0.2)));
        assert_eq!(mnvr.ticks(), 1);
    }
}
