//! Loading a [`PartialParameters`] from JSON documents and the environment

use std::path::Path;

use super::PartialParameters;
use crate::error::Result;

/// Overrides `request_retention`
pub const ENV_REQUEST_RETENTION: &str = "CADENCE_REQUEST_RETENTION";
/// Overrides `maximum_interval`
pub const ENV_MAXIMUM_INTERVAL: &str = "CADENCE_MAXIMUM_INTERVAL";
/// Overrides `enable_fuzz`
pub const ENV_ENABLE_FUZZ: &str = "CADENCE_ENABLE_FUZZ";
/// Overrides `enable_short_term`
pub const ENV_ENABLE_SHORT_TERM: &str = "CADENCE_ENABLE_SHORT_TERM";

impl PartialParameters {
    /// Parse a JSON config document
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    /// Apply `CADENCE_*` environment overrides
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    ///
    /// Values that fail to parse are skipped with a warning.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = parse_override::<f64>(&lookup, ENV_REQUEST_RETENTION) {
            self.request_retention = Some(v);
        }
        if let Some(v) = parse_override::<i64>(&lookup, ENV_MAXIMUM_INTERVAL) {
            self.maximum_interval = Some(v);
        }
        if let Some(v) = parse_override::<bool>(&lookup, ENV_ENABLE_FUZZ) {
            self.enable_fuzz = Some(v);
        }
        if let Some(v) = parse_override::<bool>(&lookup, ENV_ENABLE_SHORT_TERM) {
            self.enable_short_term = Some(v);
        }
        self
    }
}

fn parse_override<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring unparsable parameter override");
            None
        }
    }
}
