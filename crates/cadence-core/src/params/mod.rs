//! Parameter Model
//!
//! The 21 FSRS-6 weights plus the scheduling knobs (target retention,
//! maximum interval, fuzz, short-term steps). Parameters are assembled once
//! from a [`PartialParameters`] config, migrating and clamping stored weight
//! vectors from FSRS-4.5 (17 weights) and FSRS-5 (19 weights).

mod config;
mod constants;
mod migrate;

use serde::{Deserialize, Serialize};

use crate::error::{FsrsError, Result};
use crate::time::MINUTES_PER_DAY;

pub use config::{
    ENV_ENABLE_FUZZ, ENV_ENABLE_SHORT_TERM, ENV_MAXIMUM_INTERVAL, ENV_REQUEST_RETENTION,
};
pub use constants::{
    clamp_ranges, DEFAULT_ENABLE_FUZZ, DEFAULT_ENABLE_SHORT_TERM, DEFAULT_LEARNING_STEPS,
    DEFAULT_MAXIMUM_INTERVAL, DEFAULT_RELEARNING_STEPS, DEFAULT_REQUEST_RETENTION,
    DEFAULT_WEIGHTS, FSRS5_DEFAULT_DECAY, FSRS6_DEFAULT_DECAY, FSRS6_WEIGHT_COUNT, INIT_S_MAX,
    S_MAX, S_MIN, W17_W18_CEILING,
};
pub use migrate::{clamp_weights, migrate, validate, w17_w18_ceiling, SUPPORTED_LENGTHS};
pub(crate) use migrate::ensure_finite;

// ============================================================================
// PARAMETERS
// ============================================================================

/// Complete, migrated FSRS-6 parameter set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Target probability of recall at the due date, in (0, 1]
    pub request_retention: f64,
    /// Longest interval the scheduler may choose, in days
    pub maximum_interval: i64,
    /// FSRS-6 weights w0..w20
    pub w: [f64; FSRS6_WEIGHT_COUNT],
    /// Randomize review intervals
    pub enable_fuzz: bool,
    /// Use minute-granularity (re)learning steps
    pub enable_short_term: bool,
    /// Learning steps for new cards ("1m", "10m", "5h", "2d")
    pub learning_steps: Vec<String>,
    /// Relearning steps for lapsed cards
    pub relearning_steps: Vec<String>,
}

impl Default for Parameters {
    fn default() -> Self {
        Self::build(PartialParameters::default())
    }
}

impl Parameters {
    /// Fill every field from a partial config
    ///
    /// Weights go through [`migrate`] with the configured relearning step
    /// count and short-term toggle; everything else takes its default.
    pub fn build(partial: PartialParameters) -> Self {
        let learning_steps = partial
            .learning_steps
            .unwrap_or_else(|| DEFAULT_LEARNING_STEPS.iter().map(|s| s.to_string()).collect());
        let relearning_steps = partial
            .relearning_steps
            .unwrap_or_else(|| DEFAULT_RELEARNING_STEPS.iter().map(|s| s.to_string()).collect());
        let enable_short_term = partial.enable_short_term.unwrap_or(DEFAULT_ENABLE_SHORT_TERM);

        let w = migrate(
            partial.w.as_deref(),
            relearning_steps.len(),
            enable_short_term,
        );

        Self {
            request_retention: partial
                .request_retention
                .unwrap_or(DEFAULT_REQUEST_RETENTION),
            maximum_interval: partial.maximum_interval.unwrap_or(DEFAULT_MAXIMUM_INTERVAL),
            w,
            enable_fuzz: partial.enable_fuzz.unwrap_or(DEFAULT_ENABLE_FUZZ),
            enable_short_term,
            learning_steps,
            relearning_steps,
        }
    }

    /// Steps that apply to a card in `state`
    ///
    /// Review and Relearning cards use the relearning steps.
    pub fn steps_for(&self, state: crate::card::State) -> &[String] {
        use crate::card::State;
        match state {
            State::Review | State::Relearning => &self.relearning_steps,
            State::New | State::Learning => &self.learning_steps,
        }
    }
}

// ============================================================================
// PARTIAL PARAMETERS (CONFIG)
// ============================================================================

/// Configuration input where any field may be omitted
///
/// Deserializes from a JSON document with any subset of fields; unknown
/// fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialParameters {
    /// Target retention
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_retention: Option<f64>,
    /// Maximum interval in days
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_interval: Option<i64>,
    /// Stored weights, 17, 19 or 21 long
    #[serde(skip_serializing_if = "Option::is_none")]
    pub w: Option<Vec<f64>>,
    /// Interval fuzz toggle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_fuzz: Option<bool>,
    /// Short-term steps toggle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_short_term: Option<bool>,
    /// Learning steps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_steps: Option<Vec<String>>,
    /// Relearning steps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relearning_steps: Option<Vec<String>>,
}

impl PartialParameters {
    /// Empty config (every field defaulted)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target retention
    pub fn request_retention(mut self, retention: f64) -> Self {
        self.request_retention = Some(retention);
        self
    }

    /// Set the maximum interval
    pub fn maximum_interval(mut self, days: i64) -> Self {
        self.maximum_interval = Some(days);
        self
    }

    /// Set the stored weight vector
    pub fn weights(mut self, w: impl Into<Vec<f64>>) -> Self {
        self.w = Some(w.into());
        self
    }

    /// Toggle interval fuzz
    pub fn enable_fuzz(mut self, enable: bool) -> Self {
        self.enable_fuzz = Some(enable);
        self
    }

    /// Toggle short-term steps
    pub fn enable_short_term(mut self, enable: bool) -> Self {
        self.enable_short_term = Some(enable);
        self
    }

    /// Set the learning steps
    pub fn learning_steps<S: Into<String>>(mut self, steps: impl IntoIterator<Item = S>) -> Self {
        self.learning_steps = Some(steps.into_iter().map(Into::into).collect());
        self
    }

    /// Set the relearning steps
    pub fn relearning_steps<S: Into<String>>(
        mut self,
        steps: impl IntoIterator<Item = S>,
    ) -> Self {
        self.relearning_steps = Some(steps.into_iter().map(Into::into).collect());
        self
    }
}

// ============================================================================
// STEP DURATIONS
// ============================================================================

/// Parse a learning step ("1m", "10m", "5h", "2d") into minutes
pub fn step_to_minutes(step: &str) -> Result<i64> {
    let step = step.trim();
    let Some((unit_at, unit)) = step.char_indices().last() else {
        return Err(FsrsError::InvalidStepDuration(step.to_string()));
    };

    let value: i64 = step[..unit_at]
        .parse()
        .map_err(|_| FsrsError::InvalidStepDuration(step.to_string()))?;
    if value < 0 {
        return Err(FsrsError::InvalidStepDuration(step.to_string()));
    }

    let minutes_per_unit = match unit {
        'm' => 1,
        'h' => 60,
        'd' => MINUTES_PER_DAY,
        _ => {
            return Err(FsrsError::InvalidStepDuration(format!(
                "{}, expected m/h/d",
                step
            )));
        }
    };
    value
        .checked_mul(minutes_per_unit)
        .ok_or_else(|| FsrsError::InvalidStepDuration(format!("{}, too long", step)))
}
