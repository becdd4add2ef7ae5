//! Typed parameter values and the joint-state-publisher parameter set

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Inline node parameters with deterministic key order
pub type ParamMap = IndexMap<String, ParamValue>;

/// Parameter values can be booleans, numbers, strings, or lists of strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    StringList(Vec<String>),
}

impl ParamValue {
    /// Render the value the way it would appear in a parameter file
    pub fn as_display(&self) -> String {
        match self {
            ParamValue::Bool(b) => b.to_string(),
            ParamValue::Int(i) => i.to_string(),
            ParamValue::Float(f) => f.to_string(),
            ParamValue::String(s) => s.clone(),
            ParamValue::StringList(items) => format!("[{}]", items.join(", ")),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<&Path> for ParamValue {
    fn from(value: &Path) -> Self {
        ParamValue::String(value.display().to_string())
    }
}

/// Recognized options of the in-process joint-state publisher
///
/// `rate_hz` is the publication rate in Hertz; the publisher consumes it as
/// the untyped `rate` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointStatePublisherParams {
    pub use_gui: bool,
    pub rate_hz: u32,
    pub publish_default_velocities: bool,
    pub publish_default_efforts: bool,
}

impl Default for JointStatePublisherParams {
    fn default() -> Self {
        Self {
            use_gui: true,
            rate_hz: 50,
            publish_default_velocities: true,
            publish_default_efforts: true,
        }
    }
}

/// Accepted publication rate range in Hertz
pub const RATE_HZ_RANGE: std::ops::RangeInclusive<u32> = 1..=1000;

impl JointStatePublisherParams {
    /// Check that the parameter set is within accepted ranges
    pub fn validate(&self) -> Result<(), ParamError> {
        if !RATE_HZ_RANGE.contains(&self.rate_hz) {
            return Err(ParamError::RateOutOfRange { rate_hz: self.rate_hz });
        }
        Ok(())
    }

    /// Produce the inline parameter map consumed by the publisher
    pub fn to_inline(&self, robot_description: &Path, source_list: Vec<String>) -> ParamMap {
        let mut params = ParamMap::new();
        params.insert("use_gui".to_string(), self.use_gui.into());
        params.insert("rate".to_string(), ParamValue::Int(self.rate_hz.into()));
        params.insert(
            "publish_default_velocities".to_string(),
            self.publish_default_velocities.into(),
        );
        params.insert(
            "publish_default_efforts".to_string(),
            self.publish_default_efforts.into(),
        );
        params.insert("robot_description".to_string(), robot_description.into());
        params.insert(
            "source_list".to_string(),
            ParamValue::StringList(source_list),
        );
        params
    }
}

/// Errors for out-of-range parameter values
#[derive(Debug, thiserror::Error)]
pub enum ParamError {
    #[error("Joint-state publication rate {rate_hz} Hz is outside {:?}", RATE_HZ_RANGE)]
    RateOutOfRange { rate_hz: u32 },
}
