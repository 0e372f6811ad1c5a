//! # Motion primitive parameters

use serde::Deserialize;

/// Parameters of the drive straight primitive.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StraightParams {
    /// Magnitude of the normalised forward demand.
    pub speed: f64,

    /// Proportional gain of the heading hold, normalised rotation per degree of error.
    pub k_p: f64,

    /// Number of running steps allowed before the primitive times out.
    pub max_ticks: u64,
}

/// Parameters of the turn to angle primitive.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TurnParams {
    /// Magnitude of the normalised rotation demand.
    pub rate: f64,

    /// Number of running steps allowed before the primitive times out.
    pub max_ticks: u64,
}

impl Default for StraightParams {
    fn default() -> Self {
        Self {
            speed: 0.2,
            k_p: 1.0,
            max_ticks: 750,
        }
    }
}

impl Default for TurnParams {
    fn default() -> Self {
        Self {
            rate: 0.2,
            max_ticks: 750,
        }
    }
}
