//! # Mecanum drive library.
//!
//! This library contains the control modules of the mecanum drive executable, allowing them to
//! be tested and benchmarked outside of the executable itself.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Autonomy manager - sequences the autonomous script of motion primitives and delays
pub mod auto_mgr;

/// Drive control module - converts drive commands into individual wheel demands
pub mod drive_ctrl;

/// Motion primitives - closed loop drive-straight and turn-to-angle manouvres
pub mod mnvr;

/// Executable parameters
pub mod params;

/// Odometry module - wheel distance estimation and the heading source
pub mod odom;

/// Robot host - owns the equipment and modules and provides the periodic mode callbacks
pub mod robot;

/// Simulated plant - implements the equipment interfaces without hardware
pub mod sim;

/// Teleop module - converts operator input into field-oriented drive commands
pub mod teleop;

/// Telemetry dashboard
pub mod tlm;
