//! # Turn to angle primitive

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::{info, warn};

use super::{short_of_target, MnvrState, MnvrStep, TurnParams};
use crate::{drive_ctrl::DriveCmd, odom::Odometry};
use util::maths::sign;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Rotate on the spot until the heading has changed by the target angle.
///
/// The heading source is reset when the primitive starts, so the target is measured from the
/// heading the chassis had at that point.
#[derive(Debug)]
pub struct TurnToAngle {
    target_deg: f64,
    params: TurnParams,
    state: MnvrState,
    ticks: u64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl TurnToAngle {
    pub fn new(target_deg: f64, params: TurnParams) -> Self {
        Self {
            target_deg,
            params,
            state: MnvrState::Init,
            ticks: 0,
        }
    }

    pub fn step(&mut self, odom: &mut Odometry, cancel: bool) -> MnvrStep {
        if self.state.is_terminal() {
            return MnvrStep::idle(self.state);
        }

        if cancel {
            info!("turnToAngle({} deg) cancelled after {} ticks", self.target_deg, self.ticks);
            self.state = MnvrState::Cancelled;
            return MnvrStep::idle(self.state);
        }

        if self.state == MnvrState::Init {
            odom.reset_heading();
            self.state = MnvrState::Running;
            info!("turnToAngle({} deg) started", self.target_deg);
        }

        let angle_deg = odom.heading_deg();

        if !short_of_target(angle_deg, self.target_deg) {
            info!(
                "turnToAngle({} deg) complete at {:.2} deg after {} ticks",
                self.target_deg, angle_deg, self.ticks
            );
            self.state = MnvrState::Done;
            return MnvrStep::idle(self.state);
        }

        if self.ticks >= self.params.max_ticks {
            warn!(
                "turnToAngle({} deg) timed out at {:.2} deg after {} ticks",
                self.target_deg, angle_deg, self.ticks
            );
            self.state = MnvrState::TimedOut;
            return MnvrStep::idle(self.state);
        }

        self.ticks += 1;

        MnvrStep {
            state: self.state,
            cmd: Some(DriveCmd::rotate(sign(self.target_deg) * self.params.rate)),
        }
    }

    pub fn state(&self) -> MnvrState {
        self.state
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn target_deg(&self) -> f64 {
        self.target_deg
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::odom::fakes::fake_odom;

    #[test]
    fn test_zero_target() {
        let (mut odom, _sens) = fake_odom(1.0, 0.0);
        let mut turn = TurnToAngle::new(0.0, TurnParams::default());

        let step = turn.step(&mut odom, false);
        assert_eq!(step.state, MnvrState::Done);
        assert_eq!(step.cmd, None);
        assert_eq!(turn.ticks(), 0);
    }

    #[test]
    fn test_turn_linear_gyro() {
        // The gyro advances one degree every time it is polled
        let (mut odom, _sens) = fake_odom(1.0, 0.0);
        let mut turn = TurnToAngle::new(90.0, TurnParams::default());

        let mut polls = 0;
        let last = loop {
            let step = turn.step(&mut odom, false);
            polls += 1;

            match step.cmd {
                Some(cmd) => {
                    assert_eq!(cmd, DriveCmd::rotate(0.2));
                    assert_eq!(step.state, MnvrState::Running);
                }
                None => break step,
            }

            assert!(polls < 1000, "turn did not finish");
        };

        assert_eq!(last.state, MnvrState::Done);
        assert!(odom.pose().heading_deg >= 90.0);
        assert_eq!(polls, 91);
        assert_eq!(turn.ticks(), 90);

        // Terminal state is sticky
        assert_eq!(turn.step(&mut odom, false), MnvrStep::idle(MnvrState::Done));
        assert_eq!(turn.step(&mut odom, true), MnvrStep::idle(MnvrState::Done));
    }

    #[test]
    fn test_turn_negative_target() {
        let (mut odom, _sens) = fake_odom(-2.0, 0.0);
        let mut turn = TurnToAngle::new(-10.0, TurnParams::default());

        let mut cmds = 0;
        while turn.step(&mut odom, false).cmd.is_some() {
            cmds += 1;
        }

        // Reads 0, -2, ..., -8 while turning then -10 finishes
        assert_eq!(cmds, 5);
        assert_eq!(turn.state(), MnvrState::Done);
        assert!(odom.pose().heading_deg <= -10.0);
    }

    #[test]
    fn test_turn_timeout() {
        // A stuck gyro never reaches the target
        let (mut odom, _sens) = fake_odom(0.0, 0.0);
        let mut turn = TurnToAngle::new(
            45.0,
            TurnParams {
                max_ticks: 5,
                ..TurnParams::default()
            },
        );

        for _ in 0..5 {
            assert!(turn.step(&mut odom, false).cmd.is_some());
        }

        assert_eq!(turn.step(&mut odom, false), MnvrStep::idle(MnvrState::TimedOut));
        assert_eq!(turn.step(&mut odom, false), MnvrStep::idle(MnvrState::TimedOut));
        assert_eq!(turn.ticks(), 5);
    }

    #[test]
    fn test_turn_cancel() {
        let (mut odom, _sens) = fake_odom(1.0, 0.0);
        let mut turn = TurnToAngle::new(90.0, TurnParams::default());

        assert!(turn.step(&mut odom, false).cmd.is_some());
        assert_eq!(turn.step(&mut odom, true), MnvrStep::idle(MnvrState::Cancelled));
        assert_eq!(turn.step(&mut odom, false), MnvrStep::idle(MnvrState::Cancelled));
    }
}
