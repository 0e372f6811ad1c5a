//! # Equipment interface crate.
//!
//! Provides the interfaces between the drive software and the robot's equipment: actuators,
//! sensors, the operator's controller and the telemetry dashboard. Concrete drivers live
//! outside of this workspace; the executable's simulation implements every trait here.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Capability traits and data types for equipment (drive motors, gyro, encoders, controller).
pub mod eqpt;

/// Mode and autonomy commands.
pub mod tc;

/// Telemetry sink interface.
pub mod tlm;
