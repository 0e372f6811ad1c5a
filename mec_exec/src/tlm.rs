//! # Telemetry dashboard
//!
//! A [`TlmSink`] which keeps the latest value of every key and periodically saves the whole set
//! into the session directory as JSON.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::collections::BTreeMap;

use eqpt_if::tlm::{TlmSink, TlmValue};
use log::trace;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Session-relative path of the dashboard snapshots.
pub const DASHBOARD_PATH: &str = "tlm/dashboard.json";

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

pub struct Dashboard {
    values: BTreeMap<String, TlmValue>,

    /// Number of updates between snapshots, zero disables saving.
    save_every: u64,

    num_updates: u64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Dashboard {
    pub fn new(save_every: u64) -> Self {
        Self {
            values: BTreeMap::new(),
            save_every,
            num_updates: 0,
        }
    }

    pub fn get(&self, key: &str) -> Option<&TlmValue> {
        self.values.get(key)
    }

    pub fn values(&self) -> &BTreeMap<String, TlmValue> {
        &self.values
    }

    pub fn num_updates(&self) -> u64 {
        self.num_updates
    }
}

impl TlmSink for Dashboard {
    fn publish(&mut self, key: &str, value: TlmValue) {
        trace!("TLM {} = {:?}", key, value);
        self.values.insert(key.to_string(), value);
    }

    fn update(&mut self) {
        if self.save_every > 0 && self.num_updates % self.save_every == 0 {
            util::session::save(DASHBOARD_PATH, self.values.clone());
        }

        self.num_updates += 1;
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
