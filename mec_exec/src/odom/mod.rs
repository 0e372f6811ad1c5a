//! # Odometry module
//!
//! Odometry owns the rotation sensor and the four wheel encoders. It turns raw encoder counts
//! into distances with the [`DistanceEstimator`] and tracks the chassis heading through the
//! [`HeadingSource`], producing a [`PoseEstimate`] each time it is updated.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod distance;
mod heading;
mod params;
mod state;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use distance::DistanceEstimator;
pub use heading::HeadingSource;
pub use params::OdomParams;
pub use state::{Odometry, PoseEstimate};

#[cfg(test)]
pub(crate) mod fakes;
