//! Declarative dataset configuration shapes.
//!
//! Passive data-transfer structures decoded from runtime listings; no
//! behavior lives here.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Refresh mode replacing the accelerated working set wholesale.
pub const REFRESH_MODE_FULL: &str = "full";

/// Refresh mode appending new records to the accelerated working set.
pub const REFRESH_MODE_APPEND: &str = "append";

/// A dataset registered with the runtime.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetSpec {
    /// Source the dataset is materialized from.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub from: String,
    /// Dataset name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Source-specific parameters.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub params: HashMap<String, String>,
    /// Local acceleration settings, when enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceleration: Option<AccelerationSpec>,
}

/// Local acceleration settings for a dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccelerationSpec {
    /// Whether acceleration is enabled.
    #[serde(default)]
    pub enabled: bool,
    /// Acceleration mode.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub mode: String,
    /// Acceleration engine.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub engine: String,
    /// Interval between refreshes, as a human-readable duration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_interval: Option<String>,
    /// Refresh mode, [`REFRESH_MODE_FULL`] or [`REFRESH_MODE_APPEND`].
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub refresh_mode: String,
    /// Retention window for accelerated records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention: Option<String>,
    /// Engine-specific parameters.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub params: HashMap<String, String>,
    /// Secret reference for the engine.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub engine_secret: String,
}
