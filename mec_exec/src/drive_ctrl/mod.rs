//! Drive control module
//!
//! Drive control takes a [`DriveCmd`] (forward, strafe and rotation demands plus an optional
//! field heading) and produces the four wheel demands of the mecanum chassis. The inverse
//! kinematics live in [`mix`], which is a pure function. [`DriveCtrl`] wraps it with command
//! validation, desaturation and the hold-last-output behaviour the actuators expect.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod cmd;
mod mixer;
mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use cmd::*;
pub use mixer::*;
pub use params::*;
pub use state::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during DriveCtrl operation.
#[derive(Debug, thiserror::Error)]
pub enum DriveCtrlError {
    #[error("Recieved an invalid drive command: {0:?}")]
    InvalidDriveCmd(DriveCmd),
}

/// Possible errors that can occur while initialising DriveCtrl.
#[derive(Debug, thiserror::Error)]
pub enum DriveCtrlInitError {
    #[error("Failed to load DriveCtrl parameters: {0}")]
    ParamLoadError(util::params::LoadError),

    #[error("Failed to create the DriveCtrl archive: {0}")]
    ArchiveError(util::archive::ArchiveError),
}
