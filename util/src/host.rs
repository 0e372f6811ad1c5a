//! Host platform (linux for example) utility functions

use std::env;
use std::path::PathBuf;
use thiserror::Error;
use uname;

/// Environment variable pointing at the root of the software checkout.
pub const SW_ROOT_ENV_VAR: &str = "MEC_SW_ROOT";

/// Errors raised while querying the host.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("The software root environment variable ({0}) is not set")]
    SwRootNotSet(&'static str),
}

/// Retrieve uname information.
pub fn get_uname() -> std::io::Result<uname::Info> {
    uname::uname()
}

/// Get the software root directory from the `MEC_SW_ROOT` environment variable.
pub fn get_mec_sw_root() -> Result<PathBuf, HostError> {
    env::var_os(SW_ROOT_ENV_VAR)
        .map(PathBuf::from)
        .ok_or(HostError::SwRootNotSet(SW_ROOT_ENV_VAR))
}
