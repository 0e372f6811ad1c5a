//! # Defines Telemetry Pack for Autonomy

use serde::Serialize;

use super::AutoOutcome;

/// Summary of the sequencer's progress.
#[derive(Debug, Clone, Serialize, Default)]
pub struct AutoTm {
    /// Name of the current state.
    pub state: String,

    /// Index of the script entry being executed.
    pub cursor: usize,

    pub script_len: usize,

    /// Number of steps spent in the current state.
    pub ticks_in_state: u64,

    pub outcome: Option<AutoOutcome>,
}
