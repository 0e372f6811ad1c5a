//! Commands passed into DriveCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A command to drive the chassis.
///
/// Demands are normalised, nominally between -1 and +1. Values outside this range are not
/// rejected, they are desaturated by [`super::DriveCtrl`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct DriveCmd {
    /// Speed ahead, positive forwards.
    pub forward: f64,

    /// Speed sideways, positive to the right.
    pub strafe: f64,

    /// Rotation rate, positive clockwise viewed from above.
    pub rotation: f64,

    /// The heading of the chassis relative to the field, if the translation demands are given
    /// in the field frame. `None` means the demands are relative to the chassis.
    ///
    /// Units: degrees
    pub field_heading_deg: Option<f64>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl DriveCmd {
    /// A command demanding all wheels stop.
    pub fn stop() -> Self {
        Self::default()
    }

    /// A pure rotation about the chassis centre.
    pub fn rotate(rotation: f64) -> Self {
        Self {
            rotation,
            ..Self::default()
        }
    }

    /// Determine if the command is valid (i.e. all demands are finite numbers).
    pub fn is_valid(&self) -> bool {
        self.forward.is_finite()
            && self.strafe.is_finite()
            && self.rotation.is_finite()
            && self.field_heading_deg.map_or(true, f64::is_finite)
    }

    /// Returns true if every demand is zero.
    pub fn is_stop(&self) -> bool {
        self.forward == 0.0 && self.strafe == 0.0 && self.rotation == 0.0
    }
}
