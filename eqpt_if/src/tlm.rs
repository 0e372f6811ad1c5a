//! # Telemetry Interface

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// A value published to the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TlmValue {
    Number(f64),
    Bool(bool),
    Text(String),
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A fire-and-forget telemetry sink.
pub trait TlmSink {
    /// Publish a value under the given key, replacing any previous value.
    fn publish(&mut self, key: &str, value: TlmValue);

    /// Push all published values to the consumer.
    fn update(&mut self) {}
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl From<f64> for TlmValue {
    fn from(v: f64) -> Self {
        TlmValue::Number(v)
    }
}

impl From<bool> for TlmValue {
    fn from(v: bool) -> Self {
        TlmValue::Bool(v)
    }
}

impl From<&str> for TlmValue {
    fn from(v: &str) -> Self {
        TlmValue::Text(v.to_string())
    }
}

impl From<String> for TlmValue {
    fn from(v: String) -> Self {
        TlmValue::Text(v)
    }
}
