//! # AutoMgr parameters

use serde::Deserialize;

use super::script::{default_script, ScriptEntry};
use crate::mnvr::{StraightParams, TurnParams};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AutoMgrParams {
    pub straight: StraightParams,

    pub turn: TurnParams,

    /// The sequence executed in autonomous mode.
    pub script: Vec<ScriptEntry>,
}

impl Default for AutoMgrParams {
    fn default() -> Self {
        Self {
            straight: StraightParams::default(),
            turn: TurnParams::default(),
            script: default_script(),
        }
    }
}
