//! Implementations for the DriveCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use eqpt_if::eqpt::drive::{WheelId, NUM_WHEELS};
use log::trace;
use serde::Serialize;

// Internal
use super::{mix, DriveCmd, DriveCtrlError, DriveCtrlInitError, Params};
use util::{
    archive::{ArchiveError, Archived, Archiver},
    maths,
    module::State,
    params,
    session::{self, Session},
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Drive control module state
#[derive(Default)]
pub struct DriveCtrl {

    pub(crate) params: Params,

    pub(crate) report: StatusReport,

    pub(crate) current_cmd: Option<DriveCmd>,

    pub(crate) output: Option<OutputData>,

    arch: Archiver,
}

/// Input data to Drive Control.
#[derive(Default)]
pub struct InputData {
    /// The drive command to be executed, or `None` if there is no new
    /// command on this cycle.
    pub cmd: Option<DriveCmd>
}

/// Output command from DriveCtrl that the drive actuator must execute.
#[derive(Clone, Copy, Default, Serialize, Debug, PartialEq)]
pub struct OutputData {
    /// Normalised wheel speed demands, indexed by `WheelId::index`.
    pub wheel_dems: [f64; NUM_WHEELS],
}

/// Status report for DriveCtrl processing.
#[derive(Clone, Copy, Default, Serialize, Debug)]
pub struct StatusReport {
    /// The mixed demands exceeded the normalised range and were scaled down.
    pub desaturated: bool,

    /// There was no new command so the previous output was held.
    pub held: bool,
}

/// A single flattened archive row.
#[derive(Serialize)]
struct ArchRecord {
    time_s: f64,
    forward: f64,
    strafe: f64,
    rotation: f64,
    field_heading_deg: Option<f64>,
    fl: f64,
    fr: f64,
    rl: f64,
    rr: f64,
    desaturated: bool,
    held: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for DriveCtrl {
    type InitData = &'static str;
    type InitError = DriveCtrlInitError;

    type InputData = InputData;
    type OutputData = OutputData;
    type StatusReport = StatusReport;
    type ProcError = DriveCtrlError;

    /// Initialise the DriveCtrl module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, session: &Session)
        -> Result<(), Self::InitError>
    {
        self.params = params::load(init_data)
            .map_err(DriveCtrlInitError::ParamLoadError)?;

        self.arch = Archiver::from_path(session, "drive_ctrl/output.csv")
            .map_err(DriveCtrlInitError::ArchiveError)?;

        Ok(())
    }

    /// Perform cyclic processing of Drive Control.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        // Clear the status report
        self.report = StatusReport::default();

        let output = match input_data.cmd {
            Some(cmd) => {
                if !cmd.is_valid() {
                    return Err(DriveCtrlError::InvalidDriveCmd(cmd));
                }
                self.current_cmd = Some(cmd);

                self.calc_output(&cmd)
            },
            // With no new command the actuators keep doing whatever they were last told to
            None => {
                self.report.held = true;
                self.output.unwrap_or_default()
            }
        };

        trace!("DriveCtrl output: {:?}", output.wheel_dems);

        self.output = Some(output);

        Ok((output, self.report))
    }
}

impl Archived for DriveCtrl {
    fn write(&mut self) -> Result<(), ArchiveError> {
        let cmd = self.current_cmd.unwrap_or_default();
        let dems = self.output.unwrap_or_default().wheel_dems;

        self.arch.serialise(ArchRecord {
            time_s: session::get_elapsed_seconds(),
            forward: cmd.forward,
            strafe: cmd.strafe,
            rotation: cmd.rotation,
            field_heading_deg: cmd.field_heading_deg,
            fl: dems[WheelId::FrontLeft.index()],
            fr: dems[WheelId::FrontRight.index()],
            rl: dems[WheelId::RearLeft.index()],
            rr: dems[WheelId::RearRight.index()],
            desaturated: self.report.desaturated,
            held: self.report.held,
        })
    }
}

impl DriveCtrl {

    /// Create a new instance with the given parameters and no archive.
    pub fn with_params(params: Params) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    /// Get the parameters of this instance.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Returns true if the archive has been set up by `init`.
    pub fn is_archiving(&self) -> bool {
        self.arch.is_init()
    }

    /// Mix the command into wheel demands and limit them to the normalised range.
    fn calc_output(&mut self, cmd: &DriveCmd) -> OutputData {
        let mut wheel_dems = mix(
            cmd.forward,
            cmd.strafe,
            cmd.rotation,
            cmd.field_heading_deg.unwrap_or(0.0),
        );

        self.report.desaturated = maths::desaturate(&mut wheel_dems);

        for d in wheel_dems.iter_mut() {
            *d *= self.params.max_output;
        }

        OutputData { wheel_dems }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
