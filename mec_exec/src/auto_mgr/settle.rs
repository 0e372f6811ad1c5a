//! # [`AutoMgrState::Settle`] implementation
//!
//! [`AutoMgrState::Settle`]: super::AutoMgrState::Settle

use util::time::millis_to_seconds;

/// Holds the sequencer without commanding the drive for a fixed time.
///
/// The clock starts on the first step rather than on construction.
#[derive(Debug)]
pub struct Settle {
    duration_s: f64,
    start_time_s: Option<f64>,
}

impl Settle {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_s: millis_to_seconds(duration_ms),
            start_time_s: None,
        }
    }

    /// Returns true once the duration has elapsed.
    pub fn step(&mut self, time_s: f64) -> bool {
        let start_time_s = *self.start_time_s.get_or_insert(time_s);

        time_s - start_time_s >= self.duration_s
    }
}
