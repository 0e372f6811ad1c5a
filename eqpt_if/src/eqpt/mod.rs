//! # Equipment Interface
//!
//! This module defines the capability interfaces that concrete equipment drivers implement.

// -----------------------------------------------------------------------------------------------
// MODULES
// -----------------------------------------------------------------------------------------------

pub mod drive;
pub mod input;
pub mod sens;
