//! # Drive straight primitive

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use eqpt_if::eqpt::drive::WheelId;
use log::{debug, info, warn};

use super::{short_of_target, MnvrState, MnvrStep, StraightParams};
use crate::{drive_ctrl::DriveCmd, odom::Odometry};
use util::maths::sign;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Drive forwards or backwards until the front left wheel has covered the target distance,
/// holding the field heading captured when the primitive started.
#[derive(Debug)]
pub struct DriveStraight {
    target_in: f64,
    params: StraightParams,
    state: MnvrState,
    ticks: u64,
    heading_setpoint_deg: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl DriveStraight {
    pub fn new(target_in: f64, params: StraightParams) -> Self {
        Self {
            target_in,
            params,
            state: MnvrState::Init,
            ticks: 0,
            heading_setpoint_deg: 0.0,
        }
    }

    pub fn step(&mut self, odom: &mut Odometry, cancel: bool) -> MnvrStep {
        if self.state.is_terminal() {
            return MnvrStep::idle(self.state);
        }

        if cancel {
            info!("driveStraight({} in) cancelled after {} ticks", self.target_in, self.ticks);
            self.state = MnvrState::Cancelled;
            return MnvrStep::idle(self.state);
        }

        if self.state == MnvrState::Init {
            self.heading_setpoint_deg = odom.field_heading_deg();
            odom.reset_heading();
            odom.reset_distance();
            self.state = MnvrState::Running;
            info!(
                "driveStraight({} in) started, holding {:.2} deg",
                self.target_in, self.heading_setpoint_deg
            );
        }

        let dist_in = odom.wheel_dist_in(WheelId::FrontLeft);

        if !short_of_target(dist_in, self.target_in) {
            info!(
                "driveStraight({} in) complete at {:.2} in after {} ticks",
                self.target_in, dist_in, self.ticks
            );
            self.state = MnvrState::Done;
            return MnvrStep::idle(self.state);
        }

        if self.ticks >= self.params.max_ticks {
            warn!(
                "driveStraight({} in) timed out at {:.2} in after {} ticks",
                self.target_in, dist_in, self.ticks
            );
            self.state = MnvrState::TimedOut;
            return MnvrStep::idle(self.state);
        }

        self.ticks += 1;

        let error_deg = self.heading_setpoint_deg - odom.field_heading_deg();
        debug!("driveStraight at {:.2} in, heading error {:.3} deg", dist_in, error_deg);

        MnvrStep {
            state: self.state,
            cmd: Some(DriveCmd {
                forward: sign(self.target_in) * self.params.speed,
                strafe: 0.0,
                rotation: self.params.k_p * error_deg,
                field_heading_deg: None,
            }),
        }
    }

    pub fn state(&self) -> MnvrState {
        self.state
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn target_in(&self) -> f64 {
        self.target_in
    }

    /// The field heading being held. Only meaningful once the primitive has started.
    pub fn heading_setpoint_deg(&self) -> f64 {
        self.heading_setpoint_deg
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
        let (mut odom, _sens) = fake_odom(0.0, 1.0);
        let mut mnvr = DriveStraight::new(0.0, StraightParams::default());

        assert_eq!(mnvr.step(&mut odom, false), MnvrStep::idle(MnvrState::Done));
    }

    #[test]
    fn test_straight_converges() {
        // Every wheel advances one motor revolution per poll
        let (mut odom, sens) = fake_odom(0.0, 1.0);
        let mut mnvr = DriveStraight::new(60.0, StraightParams::default());

        let mut last_dist = -1.0;
        let mut cmds = 0;
        loop {
            let step = mnvr.step(&mut odom, false);
            let dist = odom.pose().wheel_dist_in[WheelId::FrontLeft.index()];
            assert!(dist > last_dist);
            last_dist = dist;

            match step.cmd {
                Some(cmd) => {
                    assert_eq!(cmd.forward, 0.2);
                    assert_eq!(cmd.strafe, 0.0);
                    assert_eq!(cmd.rotation, 0.0);
                    cmds += 1;
                }
                None => break,
            }

            assert!(cmds < 1000, "drive did not finish");
        }

        assert_eq!(mnvr.state(), MnvrState::Done);
        assert!(last_dist >= 60.0);

        // 60 in at 6 * pi / 16 in per revolution needs 51 revolutions
        assert_eq!(cmds, 51);
        assert!(sens.encoders[0].value.get() > 51.0);
    }

    #[test]
    fn test_straight_resets_distance() {
        let (mut odom, sens) = fake_odom(0.0, 0.0);
        for enc in sens.encoders.iter() {
            enc.value.set(500.0);
        }

        let mut mnvr = DriveStraight::new(10.0, StraightParams::default());
        let step = mnvr.step(&mut odom, false);

        // Without the reset the old count would already satisfy the target
        assert_eq!(step.state, MnvrState::Running);
        assert_eq!(odom.pose().wheel_dist_in[0], 0.0);
    }

    #[test]
    fn test_straight_heading_correction() {
        let (mut odom, sens) = fake_odom(0.0, 0.0);

        // The chassis is already at 10 deg from the field reference when the motion starts
        sens.gyro.value.set(10.0);
        odom.update();

        let params = StraightParams {
            k_p: 0.05,
            ..StraightParams::default()
        };
        let mut mnvr = DriveStraight::new(60.0, params);
        let step = mnvr.step(&mut odom, false);
        assert_eq!(mnvr.heading_setpoint_deg(), 10.0);
        assert_eq!(step.cmd.map(|c| c.rotation), Some(0.0));

        // Drift 4 deg clockwise, the correction turns back anticlockwise
        sens.gyro.value.set(4.0);
        let cmd = mnvr.step(&mut odom, false).cmd.unwrap();
        assert!((cmd.rotation - 0.05 * -4.0).abs() < 1e-12);

        // Drift the other way
        sens.gyro.value.set(-2.0);
        let cmd = mnvr.step(&mut odom, false).cmd.unwrap();
        assert!((cmd.rotation - 0.05 * 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_straight_reverse() {
        let (mut odom, _sens) = fake_odom(0.0, -1.0);
        let mut mnvr = DriveStraight::new(-20.0, StraightParams::default());

        let cmd = mnvr.step(&mut odom, false).cmd.unwrap();
        assert_eq!(cmd.forward, -0.2);

        while mnvr.step(&mut odom, false).cmd.is_some() {}
        assert_eq!(mnvr.state(), MnvrState::Done);
        assert!(odom.pose().wheel_dist_in[0] <= -20.0);
    }

    #[test]
    fn test_straight_timeout() {
        let (mut odom, _sens) = fake_odom(0.0, 0.0);
        let mut mnvr = DriveStraight::new(
            60.0,
            StraightParams {
                max_ticks: 3,
                ..StraightParams::default()
            },
        );

        for _ in 0..3 {
            assert!(mnvr.step(&mut odom, false).cmd.is_some());
        }
        assert_eq!(mnvr.step(&mut odom, false), MnvrStep::idle(MnvrState::TimedOut));
        assert_eq!(mnvr.ticks(), 3);
    }
}
