//! # Robot host
//!
//! The [`Robot`] owns the equipment and every control module and provides the periodic callbacks
//! the executable's scheduler calls, one per robot mode.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use eqpt_if::{
    eqpt::{
        drive::{DriveActuator, NUM_WHEELS, WHEEL_IDS},
        input::OperatorInput,
        sens::{EncoderSensor, RotationSensor},
    },
    tc::auto::AutoCmd,
    tlm::TlmSink,
};
use log::{info, warn};

use crate::{
    auto_mgr::{AutoInput, AutoMgr, AutoMgrError, AutoMgrParams, AutoOutcome},
    drive_ctrl::{self, DriveCmd, DriveCtrl},
    odom::{OdomParams, Odometry, PoseEstimate},
    teleop::{Teleop, TeleopParams},
};
use util::archive::{ArchiveError, Archived};
use util::module::State;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The equipment the robot is built from.
pub struct Hardware {
    pub drive: Box<dyn DriveActuator>,

    pub gyro: Box<dyn RotationSensor>,

    /// Wheel encoders in [`eqpt_if::eqpt::drive::WheelId::index`] order.
    pub encoders: [Box<dyn EncoderSensor>; NUM_WHEELS],

    pub input: Box<dyn OperatorInput>,
}

/// Parameters of the modules owned by the robot, other than DriveCtrl.
#[derive(Debug, Clone, Default)]
pub struct RobotParams {
    pub odom: OdomParams,
    pub teleop: TeleopParams,
    pub auto_mgr: AutoMgrParams,
}

pub struct Robot {
    // Cycle management
    /// Number of cycles already executed
    pub num_cycles: u64,

    /// True if this cycle falls on a 1Hz boundary
    pub is_1_hz_cycle: bool,

    // Safe mode variables
    /// Determines if the robot is in safe mode.
    pub safe: bool,

    /// Gives the reason for the robot being in safe mode.
    pub safe_cause: Option<SafeModeCause>,

    drive: Box<dyn DriveActuator>,
    drive_ctrl: DriveCtrl,
    drive_ctrl_output: drive_ctrl::OutputData,
    drive_ctrl_status_rpt: drive_ctrl::StatusReport,

    odom: Odometry,
    teleop: Teleop,

    auto_params: AutoMgrParams,
    auto_mgr: Option<AutoMgr>,
    auto_cmd: Option<AutoCmd>,

    tlm: Box<dyn TlmSink>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Gives the reason the robot has been put into safe mode
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum SafeModeCause {
    /// The robot was disabled by the operator.
    Disabled,

    /// Too many consecutive cycle overruns.
    CycleOverrun,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Robot {
    /// Build the robot from its hardware and modules.
    ///
    /// `drive_ctrl` is passed in initialised so that it can carry its own archive.
    pub fn new(
        hw: Hardware,
        drive_ctrl: DriveCtrl,
        params: RobotParams,
        tlm: Box<dyn TlmSink>,
    ) -> Self {
        Self {
            num_cycles: 0,
            is_1_hz_cycle: false,
            safe: false,
            safe_cause: None,
            drive: hw.drive,
            drive_ctrl,
            drive_ctrl_output: drive_ctrl::OutputData::default(),
            drive_ctrl_status_rpt: drive_ctrl::StatusReport::default(),
            odom: Odometry::new(&params.odom, hw.gyro, hw.encoders),
            teleop: Teleop::new(params.teleop, hw.input),
            auto_params: params.auto_mgr,
            auto_mgr: None,
            auto_cmd: None,
            tlm,
        }
    }

    /// Zero the sensors, set the motor polarities and publish the initial dashboard values.
    pub fn robot_init(&mut self) {
        self.odom.reset_all();

        let inverted = self.drive_ctrl.params().inverted;
        for &id in WHEEL_IDS.iter() {
            self.drive.set_inverted(id, inverted[id.index()]);
        }

        self.odom.update();
        self.publish_tlm();

        info!("Robot initialised, inversions: {:?}", inverted);
    }

    /// Perform actions required at the start of a cycle.
    pub fn cycle_start(&mut self, cycle_frequency_hz: f64) {
        let cycles_per_s = (cycle_frequency_hz as u64).max(1);
        self.is_1_hz_cycle = self.num_cycles % cycles_per_s == 0;
    }

    /// Perform actions required at the end of a cycle.
    pub fn cycle_end(&mut self) {
        self.num_cycles += 1;
    }

    /// Start a fresh run of the autonomous script.
    pub fn autonomous_init(&mut self) -> Result<(), AutoMgrError> {
        self.auto_cmd = None;
        self.auto_mgr = Some(AutoMgr::new(self.auto_params.clone())?);

        info!("Autonomous initialised");
        Ok(())
    }

    /// Step the autonomous script.
    ///
    /// A failure of the script (a motion timing out) is returned once, the drive is stopped and
    /// the script halts.
    pub fn autonomous_periodic(&mut self, time_s: f64) -> Result<(), AutoMgrError> {
        let input = AutoInput {
            time_s,
            cmd: self.auto_cmd.take(),
        };

        let result = match self.auto_mgr {
            Some(ref mut mgr) => mgr.step(&mut self.odom, &input),
            None => {
                warn!("Autonomous periodic called before autonomous init");
                Ok(Some(DriveCmd::stop()))
            }
        };

        let cmd = match result {
            Ok(c) => c,
            Err(e) => {
                self.drive_cmd(Some(DriveCmd::stop()));
                self.end_of_cycle_tlm();
                return Err(e);
            }
        };

        if self.safe {
            self.drive_cmd(Some(DriveCmd::stop()));
        } else {
            self.drive_cmd(cmd);
        }

        self.end_of_cycle_tlm();
        Ok(())
    }

    /// Drive from the operator input.
    pub fn teleop_periodic(&mut self) {
        let pose = self.odom.update();

        let cmd = if self.safe {
            DriveCmd::stop()
        } else {
            self.teleop.proc(pose.field_heading_deg)
        };
        self.drive_cmd(Some(cmd));

        self.publish_tlm();
    }

    /// Keep the drive stopped, cancelling any running autonomy.
    pub fn disabled_periodic(&mut self) {
        self.cancel_auto();
        if let Some(ref mut mgr) = self.auto_mgr {
            let input = AutoInput {
                time_s: 0.0,
                cmd: self.auto_cmd.take(),
            };
            // The manager always stops on a cancel
            if let Err(e) = mgr.step(&mut self.odom, &input) {
                warn!("AutoMgr error while disabled: {}", e);
            }
        }

        self.drive_cmd(Some(DriveCmd::stop()));
        self.end_of_cycle_tlm();
    }

    /// Request the autonomous script be cancelled on its next step.
    pub fn cancel_auto(&mut self) {
        let running = self.auto_mgr.as_ref().map_or(false, |m| !m.is_halted());
        if running {
            self.auto_cmd = Some(AutoCmd::Cancel);
        }
    }

    /// Puts the robot into safe mode with the given cause.
    pub fn make_safe(&mut self, cause: SafeModeCause) {
        if !self.safe {
            warn!("Make safe requested, cause: {:?}", cause);
            self.safe = true;
            self.safe_cause = Some(cause);

            self.cancel_auto();
            self.drive_cmd(Some(DriveCmd::stop()));
        }
    }

    /// Attempts to disable the safe mode by clearing the given cause.
    ///
    /// Returns `Ok(())` if this cause was cleared and safe mode was disabled, or `Err(())`
    /// otherwise. To remove safe mode the provided cause must match the initial reason for safe
    /// mode being enabled.
    ///
    /// If safe mode was not enabled `Ok(())` is returned
    pub fn make_unsafe(&mut self, cause: SafeModeCause) -> Result<(), ()> {
        if !self.safe {
            return Ok(());
        }

        match self.safe_cause {
            Some(root_cause) if root_cause == cause => {
                self.safe = false;
                self.safe_cause = None;
                info!("Make unsafe requested, root cause match, safe mode disabled");
                Ok(())
            }
            Some(_) => Err(()),
            None => Ok(()),
        }
    }

    /// Write the module archives for this cycle.
    pub fn write_archives(&mut self) -> Result<(), ArchiveError> {
        if self.drive_ctrl.is_archiving() {
            self.drive_ctrl.write()?;
        }
        Ok(())
    }

    pub fn pose(&self) -> PoseEstimate {
        self.odom.pose()
    }

    pub fn drive_ctrl_output(&self) -> drive_ctrl::OutputData {
        self.drive_ctrl_output
    }

    pub fn drive_ctrl_status_rpt(&self) -> drive_ctrl::StatusReport {
        self.drive_ctrl_status_rpt
    }

    pub fn auto_mgr(&self) -> Option<&AutoMgr> {
        self.auto_mgr.as_ref()
    }

    pub fn auto_outcome(&self) -> Option<AutoOutcome> {
        self.auto_mgr.as_ref().and_then(|m| m.outcome())
    }

    /// Run DriveCtrl and send its output to the actuator.
    ///
    /// An invalid command is replaced by a stop.
    fn drive_cmd(&mut self, cmd: Option<DriveCmd>) {
        let result = match self.drive_ctrl.proc(&drive_ctrl::InputData { cmd }) {
            Ok(r) => Ok(r),
            Err(e) => {
                warn!("Error during DriveCtrl processing: {}", e);
                self.drive_ctrl.proc(&drive_ctrl::InputData {
                    cmd: Some(DriveCmd::stop()),
                })
            }
        };

        match result {
            Ok((o, r)) => {
                self.drive_ctrl_output = o;
                self.drive_ctrl_status_rpt = r;
            }
            Err(e) => warn!("DriveCtrl rejected the stop command: {}", e),
        }

        for &id in WHEEL_IDS.iter() {
            self.drive
                .set_wheel_dem(id, self.drive_ctrl_output.wheel_dems[id.index()]);
        }
    }

    fn end_of_cycle_tlm(&mut self) {
        self.odom.update();
        self.publish_tlm();
    }

    fn publish_tlm(&mut self) {
        let pose = self.odom.pose();

        for &id in WHEEL_IDS.iter() {
            let i = id.index();
            self.tlm
                .publish(&format!("{} Distance (RAW)", id), pose.wheel_raw[i].into());
            self.tlm
                .publish(&format!("{} Distance (Inches)", id), pose.wheel_dist_in[i].into());
        }

        self.tlm.publish("Heading", pose.heading_deg.into());
        self.tlm.publish("Field Heading", pose.field_heading_deg.into());
        self.tlm.publish("Safe", self.safe.into());

        if let Some(ref mgr) = self.auto_mgr {
            let tm = mgr.get_tm();
            self.tlm.publish("Auto State", tm.state.into());
            self.tlm.publish("Auto Entry", (tm.cursor as f64).into());
            if let Some(outcome) = tm.outcome {
                self.tlm.publish("Auto Outcome", format!("{:?}", outcome).into());
            }
        }

        self.tlm.update();
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
