//! # AutoMgr module
//!
//! This module implements the [`AutoMgr`] state machine, which executes the autonomous script
//! one entry at a time. The state machine is broken down into a number of states:
//!
//! - `Mnvr` - A motion primitive is being executed.
//! - `Stop` - A zero drive command is issued for one cycle.
//! - `Settle` - No command is issued until a delay has elapsed.
//! - `Halt` - The script has ended, been cancelled or failed. A zero command is issued on every
//!   cycle from then on.
//!
//! The manager never blocks, it is stepped once per cycle by the robot.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod params;
mod script;
mod settle;
pub mod tm;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::fmt::Display;

use eqpt_if::tc::auto::AutoCmd;
use log::{error, info};
use serde::Serialize;

use crate::{
    drive_ctrl::DriveCmd,
    mnvr::{MnvrState, MotionGoal, Mnvr},
    odom::Odometry,
};
use settle::Settle;

pub use params::AutoMgrParams;
pub use script::{default_script, ScriptEntry};
pub use tm::AutoTm;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Autonomy Manager
pub struct AutoMgr {
    params: AutoMgrParams,

    state: AutoMgrState,

    /// Index of the script entry which produced the current state.
    cursor: usize,

    ticks_in_state: u64,

    outcome: Option<AutoOutcome>,
}

/// Input to the AutoMgr on each step.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoInput {
    /// Current time, used to time settle delays.
    ///
    /// Units: seconds
    pub time_s: f64,

    /// Command to the manager, if one was issued this cycle.
    pub cmd: Option<AutoCmd>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Errors that can occur in the autonomy manager.
#[derive(Debug, thiserror::Error)]
pub enum AutoMgrError {
    #[error("Failed to load AutoMgrParams: {0}")]
    ParamLoadError(util::params::LoadError),

    #[error("{goal} did not complete within {ticks} ticks")]
    MotionTimedOut { goal: MotionGoal, ticks: u64 },

    #[error("Script entry {0} is invalid")]
    InvalidScript(usize),
}

#[derive(Debug)]
pub enum AutoMgrState {
    Mnvr(Mnvr),
    Stop,
    Settle(Settle),
    Halt,
}

/// How the script ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum AutoOutcome {
    /// Every entry was executed.
    Completed,

    /// A motion did not reach its goal in time.
    TimedOut { goal: MotionGoal, ticks: u64 },

    /// The manager was cancelled before the end of the script.
    Cancelled,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl AutoMgr {
    /// Load the parameters from the given file and create a new manager.
    pub fn init(params_path: &str) -> Result<Self, AutoMgrError> {
        let params: AutoMgrParams = match util::params::load(params_path) {
            Ok(p) => p,
            Err(e) => return Err(AutoMgrError::ParamLoadError(e)),
        };

        Self::new(params)
    }

    /// Create a new manager positioned at the start of the script.
    pub fn new(params: AutoMgrParams) -> Result<Self, AutoMgrError> {
        if let Some(i) = script::find_invalid(&params.script) {
            return Err(AutoMgrError::InvalidScript(i));
        }

        let mut mgr = Self {
            params,
            state: AutoMgrState::Halt,
            cursor: 0,
            ticks_in_state: 0,
            outcome: None,
        };
        mgr.enter(0);

        Ok(mgr)
    }

    /// Step the manager, returning the drive command for this cycle if there is one.
    ///
    /// Returning `None` means the previous command should be held.
    pub fn step(
        &mut self,
        odom: &mut Odometry,
        input: &AutoInput,
    ) -> Result<Option<DriveCmd>, AutoMgrError> {
        self.ticks_in_state += 1;

        if let Some(AutoCmd::Cancel) = input.cmd {
            if !self.is_halted() {
                if let AutoMgrState::Mnvr(ref mut mnvr) = self.state {
                    mnvr.step(odom, true);
                }
                info!("AutoMgr cancelled in {}", self.state);
                self.halt(AutoOutcome::Cancelled);
            }
            return Ok(Some(DriveCmd::stop()));
        }

        match self.state {
            AutoMgrState::Mnvr(ref mut mnvr) => {
                let step = mnvr.step(odom, false);

                match step.state {
                    MnvrState::Init | MnvrState::Running => Ok(step.cmd),
                    MnvrState::Done => {
                        self.enter(self.cursor + 1);
                        Ok(None)
                    }
                    MnvrState::TimedOut => {
                        let goal = mnvr.goal();
                        let ticks = mnvr.ticks();
                        let err = AutoMgrError::MotionTimedOut { goal, ticks };
                        error!("{}", err);

                        self.halt(AutoOutcome::TimedOut { goal, ticks });
                        Err(err)
                    }
                    MnvrState::Cancelled => {
                        self.halt(AutoOutcome::Cancelled);
                        Ok(Some(DriveCmd::stop()))
                    }
                }
            }
            AutoMgrState::Stop => {
                self.enter(self.cursor + 1);
                Ok(Some(DriveCmd::stop()))
            }
            AutoMgrState::Settle(ref mut settle) => {
                if settle.step(input.time_s) {
                    self.enter(self.cursor + 1);
                }
                Ok(None)
            }
            AutoMgrState::Halt => Ok(Some(DriveCmd::stop())),
        }
    }

    pub fn is_halted(&self) -> bool {
        matches!(self.state, AutoMgrState::Halt)
    }

    /// How the script ended, or `None` if it is still running.
    pub fn outcome(&self) -> Option<AutoOutcome> {
        self.outcome
    }

    pub fn state(&self) -> &AutoMgrState {
        &self.state
    }

    pub fn get_tm(&self) -> AutoTm {
        AutoTm {
            state: self.state.to_string(),
            cursor: self.cursor,
            script_len: self.params.script.len(),
            ticks_in_state: self.ticks_in_state,
            outcome: self.outcome,
        }
    }

    /// Move to the state for the given script entry, halting if the end has been reached.
    fn enter(&mut self, cursor: usize) {
        self.cursor = cursor;
        self.ticks_in_state = 0;

        self.state = match self.params.script.get(cursor) {
            Some(ScriptEntry::Motion(goal)) => AutoMgrState::Mnvr(Mnvr::new(
                *goal,
                &self.params.straight,
                &self.params.turn,
            )),
            Some(ScriptEntry::Stop) => AutoMgrState::Stop,
            Some(ScriptEntry::Settle { duration_ms }) => {
                AutoMgrState::Settle(Settle::new(*duration_ms))
            }
            None => {
                info!("AutoMgr script complete");
                self.halt(AutoOutcome::Completed);
                return;
            }
        };

        info!(
            "AutoMgr state change to: {} (entry {}/{})",
            self.state,
            cursor + 1,
            self.params.script.len()
        );
    }

    fn halt(&mut self, outcome: AutoOutcome) {
        self.state = AutoMgrState::Halt;
        self.ticks_in_state = 0;
        self.outcome = Some(outcome);
        info!("AutoMgr halted: {:?}", outcome);
    }
}

impl Display for AutoMgrState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AutoMgrState::Mnvr(m) => write!(f, "AutoMgrState::Mnvr({})", m.goal()),
            AutoMgrState::Stop => write!(f, "AutoMgrState::Stop"),
            AutoMgrState::Settle(_) => write!(f, "AutoMgrState::Settle"),
            AutoMgrState::Halt => write!(f, "AutoMgrState::Halt"),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        drive_ctrl::{self, DriveCtrl},
        mnvr::{StraightParams, TurnParams},
        odom::{fakes::fake_odom, OdomParams},
        sim::{SimParams, SimPlant},
    };
    use eqpt_if::eqpt::drive::WHEEL_IDS;
    use util::module::State;

    const DT_S: f64 = 0.02;

    fn input(cycle: u64) -> AutoInput {
        AutoInput {
            time_s: cycle as f64 * DT_S,
            cmd: None,
        }
    }

    #[test]
    fn test_default_script_on_sim() {
        let mut plant = SimPlant::new(SimParams::default());
        let mut hw = plant.hardware();
        let mut odom = Odometry::new(&OdomParams::default(), hw.gyro, hw.encoders);
        let mut drive_ctrl = DriveCtrl::with_params(drive_ctrl::Params::default());

        for &id in WHEEL_IDS.iter() {
            hw.drive.set_inverted(id, drive_ctrl.params().inverted[id.index()]);
        }

        let mut mgr = AutoMgr::new(AutoMgrParams::default()).unwrap();

        let mut motions_done = 0;
        let mut last_entry = 0;
        let mut cycle = 0;

        while !mgr.is_halted() {
            assert!(cycle < 20_000, "script did not finish");

            let cmd = mgr.step(&mut odom, &input(cycle)).unwrap();
            if mgr.cursor != last_entry {
                if let Some(ScriptEntry::Motion(_)) = mgr.params.script.get(last_entry) {
                    motions_done += 1;
                }
                last_entry = mgr.cursor;
            }

            let (out, _) = drive_ctrl
                .proc(&drive_ctrl::InputData { cmd })
                .unwrap();
            for &id in WHEEL_IDS.iter() {
                hw.drive.set_wheel_dem(id, out.wheel_dems[id.index()]);
            }

            plant.step(DT_S);
            cycle += 1;
        }

        assert_eq!(motions_done, 7);
        assert_eq!(mgr.outcome(), Some(AutoOutcome::Completed));

        // Four clockwise turns of at least 90 degrees
        let heading = plant.true_heading_deg();
        assert!(heading >= 360.0 && heading < 365.0, "heading {}", heading);

        // Three legs of a square leave the chassis on the fourth corner
        let pos = plant.position_in();
        assert!(pos[0].abs() < 10.0 && (pos[1] - 60.0).abs() < 10.0, "position {:?}", pos);

        // Once halted only zero commands are issued
        for i in 0..50 {
            let cmd = mgr.step(&mut odom, &input(cycle + i)).unwrap();
            assert_eq!(cmd, Some(DriveCmd::stop()));
        }
    }

    #[test]
    fn test_cancel_during_settle() {
        let (mut odom, _sens) = fake_odom(0.0, 0.0);
        let params = AutoMgrParams {
            script: vec![
                ScriptEntry::Stop,
                ScriptEntry::Settle { duration_ms: 1000 },
                ScriptEntry::Motion(MotionGoal::straight(10.0)),
            ],
            ..AutoMgrParams::default()
        };
        let mut mgr = AutoMgr::new(params).unwrap();

        assert_eq!(mgr.step(&mut odom, &input(0)).unwrap(), Some(DriveCmd::stop()));
        assert!(matches!(mgr.state(), AutoMgrState::Settle(_)));
        assert_eq!(mgr.step(&mut odom, &input(1)).unwrap(), None);

        let cancel = AutoInput {
            time_s: 0.04,
            cmd: Some(AutoCmd::Cancel),
        };
        assert_eq!(mgr.step(&mut odom, &cancel).unwrap(), Some(DriveCmd::stop()));
        assert_eq!(mgr.outcome(), Some(AutoOutcome::Cancelled));

        // The settle time passing doesn't resume the script
        for cycle in 3..100 {
            assert_eq!(mgr.step(&mut odom, &input(cycle)).unwrap(), Some(DriveCmd::stop()));
        }
        assert_eq!(mgr.get_tm().cursor, 1);
    }

    #[test]
    fn test_cancel_during_motion() {
        let (mut odom, _sens) = fake_odom(0.0, 0.1);
        let params = AutoMgrParams {
            script: vec![ScriptEntry::Motion(MotionGoal::straight(10.0))],
            ..AutoMgrParams::default()
        };
        let mut mgr = AutoMgr::new(params).unwrap();

        assert!(mgr.step(&mut odom, &input(0)).unwrap().is_some());
        let cancel = AutoInput {
            time_s: 0.02,
            cmd: Some(AutoCmd::Cancel),
        };
        assert_eq!(mgr.step(&mut odom, &cancel).unwrap(), Some(DriveCmd::stop()));
        assert!(mgr.is_halted());
        assert_eq!(mgr.outcome(), Some(AutoOutcome::Cancelled));
    }

    #[test]
    fn test_motion_timeout() {
        // Stuck encoders mean the straight never reaches its goal
        let (mut odom, _sens) = fake_odom(0.0, 0.0);
        let params = AutoMgrParams {
            straight: StraightParams {
                max_ticks: 10,
                ..StraightParams::default()
            },
            turn: TurnParams::default(),
            script: vec![
                ScriptEntry::Motion(MotionGoal::straight(60.0)),
                ScriptEntry::Stop,
            ],
        };
        let mut mgr = AutoMgr::new(params).unwrap();

        for cycle in 0..10 {
            assert!(mgr.step(&mut odom, &input(cycle)).unwrap().is_some());
        }

        match mgr.step(&mut odom, &input(10)) {
            Err(AutoMgrError::MotionTimedOut { goal, ticks }) => {
                assert_eq!(goal, MotionGoal::straight(60.0));
                assert_eq!(ticks, 10);
            }
            r => panic!("Expected a timeout, got {:?}", r),
        }

        assert_eq!(
            mgr.outcome(),
            Some(AutoOutcome::TimedOut {
                goal: MotionGoal::straight(60.0),
                ticks: 10
            })
        );
        assert_eq!(mgr.step(&mut odom, &input(11)).unwrap(), Some(DriveCmd::stop()));
    }

    #[test]
    fn test_invalid_and_empty_scripts() {
        let params = AutoMgrParams {
            script: vec![ScriptEntry::Stop, ScriptEntry::Motion(MotionGoal::turn(f64::NAN))],
            ..AutoMgrParams::default()
        };
        assert!(matches!(AutoMgr::new(params), Err(AutoMgrError::InvalidScript(1))));

        let params = AutoMgrParams {
            script: vec![],
            ..AutoMgrParams::default()
        };
        let mgr = AutoMgr::new(params).unwrap();
        assert!(mgr.is_halted());
        assert_eq!(mgr.outcome(), Some(AutoOutcome::Completed));
    }

    #[test]
    fn test_zero_target_advances() {
        let (mut odom, _sens) = fake_odom(0.0, 0.0);
        let params = AutoMgrParams {
            script: vec![ScriptEntry::Motion(MotionGoal::turn(0.0)), ScriptEntry::Stop],
            ..AutoMgrParams::default()
        };
        let mut mgr = AutoMgr::new(params).unwrap();

        assert_eq!(mgr.step(&mut odom, &input(0)).unwrap(), None);
        assert!(matches!(mgr.state(), AutoMgrState::Stop));
        assert_eq!(mgr.step(&mut odom, &input(1)).unwrap(), Some(DriveCmd::stop()));
        assert_eq!(mgr.outcome(), Some(AutoOutcome::Completed));
    }
}
