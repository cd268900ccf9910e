//! FSRS-6 Algorithm Core
//!
//! Pure functions over one [`Parameters`] set: forgetting curve, initial and
//! next difficulty, the three stability updates (recall, forget, same-day),
//! interval computation with optional fuzz, and [`Algorithm::next_state`]
//! which advances a memory state by one review.

use serde::{Deserialize, Serialize};

use super::alea::{alea, AleaSeed};
use super::fuzz::fuzz_range;
use super::{clamp, round8};
use crate::card::{MemoryState, Rating};
use crate::error::{FsrsError, Result};
use crate::params::{ensure_finite, step_to_minutes, Parameters, PartialParameters, S_MAX, S_MIN};

// ============================================================================
// FORGETTING CURVE
// ============================================================================

/// Decay exponent and matching factor of the forgetting curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayFactor {
    /// `-w20`
    pub decay: f64,
    /// `0.9^(1/decay) - 1`, so that R(S) = 90%
    pub factor: f64,
}

/// Decay and factor for a decay weight (w20)
pub fn decay_factor(w20: f64) -> DecayFactor {
    let decay = -w20;
    let factor = (0.9_f64.ln() / decay).exp() - 1.0;
    DecayFactor {
        decay,
        factor: round8(factor),
    }
}

/// Probability of recall after `elapsed_days` at `stability`
///
/// R = (1 + FACTOR * t / S)^(-w20)
pub fn forgetting_curve(w20: f64, elapsed_days: f64, stability: f64) -> f64 {
    let DecayFactor { decay, factor } = decay_factor(w20);
    round8((1.0 + factor * elapsed_days / stability).powf(decay))
}

// ============================================================================
// ALGORITHM
// ============================================================================

/// FSRS-6 model bound to one parameter set
///
/// Read-only after construction; share it freely across threads. Changing
/// parameters means building a new instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Algorithm {
    parameters: Parameters,
    interval_modifier: f64,
    seed: Option<AleaSeed>,
}

impl Default for Algorithm {
    fn default() -> Self {
        let parameters = Parameters::default();
        let interval_modifier = interval_modifier_for(&parameters.w, parameters.request_retention)
            .unwrap_or(1.0);
        Self {
            parameters,
            interval_modifier,
            seed: None,
        }
    }
}

impl Algorithm {
    /// Build parameters from a partial config and derive the interval modifier
    pub fn new(partial: PartialParameters) -> Result<Self> {
        if let Some(w) = &partial.w {
            ensure_finite(w)?;
        }
        Self::from_parameters(Parameters::build(partial))
    }

    /// Wrap an already-built parameter set
    pub fn from_parameters(parameters: Parameters) -> Result<Self> {
        if parameters.maximum_interval <= 0 {
            return Err(FsrsError::InvalidParameters(format!(
                "maximum_interval must be positive, got {}",
                parameters.maximum_interval
            )));
        }
        for step in parameters
            .learning_steps
            .iter()
            .chain(parameters.relearning_steps.iter())
        {
            step_to_minutes(step)?;
        }

        let interval_modifier =
            interval_modifier_for(&parameters.w, parameters.request_retention)?;

        Ok(Self {
            parameters,
            interval_modifier,
            seed: None,
        })
    }

    /// Fix the fuzz seed for every interval this instance computes
    pub fn with_seed(mut self, seed: impl Into<AleaSeed>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    /// Parameters in use
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Multiplier turning stability into an interval at the target retention
    pub fn interval_modifier(&self) -> f64 {
        self.interval_modifier
    }

    /// Session fuzz seed, if fixed
    pub fn seed(&self) -> Option<&AleaSeed> {
        self.seed.as_ref()
    }

    /// Decay and factor for this instance's w20
    pub fn decay_factor(&self) -> DecayFactor {
        decay_factor(self.parameters.w[20])
    }

    /// Probability of recall after `elapsed_days` at `stability`
    pub fn forgetting_curve(&self, elapsed_days: f64, stability: f64) -> f64 {
        forgetting_curve(self.parameters.w[20], elapsed_days, stability)
    }

    /// Interval modifier for an arbitrary target retention
    pub fn calculate_interval_modifier(&self, request_retention: f64) -> Result<f64> {
        interval_modifier_for(&self.parameters.w, request_retention)
    }

    // ========================================================================
    // DIFFICULTY
    // ========================================================================

    /// Initial stability: w[G-1], floored at S_MIN
    pub fn initial_stability(&self, grade: Rating) -> f64 {
        let index = usize::from(grade.value().max(1)) - 1;
        self.parameters.w[index].max(S_MIN)
    }

    /// Initial difficulty: D0(G) = w4 - e^((G-1) * w5) + 1
    ///
    /// Exponential in the grade and not clamped; callers clamp when the
    /// value becomes a card's difficulty.
    pub fn initial_difficulty(&self, grade: Rating) -> f64 {
        let w = &self.parameters.w;
        round8(w[4] - ((grade.as_f64() - 1.0) * w[5]).exp() + 1.0)
    }

    /// Linear damping: changes shrink as difficulty approaches 10
    fn linear_damping(&self, delta: f64, difficulty: f64) -> f64 {
        round8(delta * (10.0 - difficulty) / 9.0)
    }

    /// Mean reversion toward D0(Easy)
    fn mean_reversion(&self, init: f64, current: f64) -> f64 {
        let w7 = self.parameters.w[7];
        round8(w7 * init + (1.0 - w7) * current)
    }

    /// Next difficulty in [1, 10]
    pub fn next_difficulty(&self, difficulty: f64, grade: Rating) -> f64 {
        let delta = -self.parameters.w[6] * (grade.as_f64() - 3.0);
        let next = difficulty + self.linear_damping(delta, difficulty);
        clamp(
            self.mean_reversion(self.initial_difficulty(Rating::Easy), next),
            1.0,
            10.0,
        )
    }

    // ========================================================================
    // STABILITY
    // ========================================================================

    /// Stability after a successful recall
    ///
    /// S' = S * (1 + e^w8 * (11 - D) * S^-w9 * (e^((1-R) * w10) - 1) * hard * easy)
    pub fn next_recall_stability(
        &self,
        difficulty: f64,
        stability: f64,
        retrievability: f64,
        grade: Rating,
    ) -> f64 {
        let w = &self.parameters.w;
        let hard_penalty = if grade == Rating::Hard { w[15] } else { 1.0 };
        let easy_bonus = if grade == Rating::Easy { w[16] } else { 1.0 };

        let next = stability
            * (1.0
                + w[8].exp()
                    * (11.0 - difficulty)
                    * stability.powf(-w[9])
                    * (((1.0 - retrievability) * w[10]).exp() - 1.0)
                    * hard_penalty
                    * easy_bonus);

        clamp(round8(next), S_MIN, S_MAX)
    }

    /// Stability after a lapse
    ///
    /// S' = w11 * D^-w12 * ((S + 1)^w13 - 1) * e^((1-R) * w14)
    pub fn next_forget_stability(
        &self,
        difficulty: f64,
        stability: f64,
        retrievability: f64,
    ) -> f64 {
        let w = &self.parameters.w;
        let next = w[11]
            * difficulty.powf(-w[12])
            * ((stability + 1.0).powf(w[13]) - 1.0)
            * ((1.0 - retrievability) * w[14]).exp();

        clamp(round8(next), S_MIN, S_MAX)
    }

    /// Same-day stability update
    ///
    /// SInc = S^-w19 * e^(w17 * (G - 3 + w18)); passing grades never shrink
    /// stability.
    pub fn next_short_term_stability(&self, stability: f64, grade: Rating) -> f64 {
        let w = &self.parameters.w;
        let sinc = stability.powf(-w[19]) * (w[17] * (grade.as_f64() - 3.0 + w[18])).exp();
        let masked = if grade >= Rating::Hard {
            sinc.max(1.0)
        } else {
            sinc
        };
        clamp(round8(stability * masked), S_MIN, S_MAX)
    }

    // ========================================================================
    // INTERVALS
    // ========================================================================

    /// Fuzz an interval using the session seed (or the clock)
    pub fn apply_fuzz(&self, interval: f64, elapsed_days: i64) -> i64 {
        self.apply_fuzz_seeded(interval, elapsed_days, None)
    }

    /// Fuzz an interval; `seed` takes precedence over the session seed
    pub fn apply_fuzz_seeded(
        &self,
        interval: f64,
        elapsed_days: i64,
        seed: Option<&AleaSeed>,
    ) -> i64 {
        if !self.parameters.enable_fuzz || interval < 2.5 {
            return interval.round() as i64;
        }

        let seed = seed.or(self.seed.as_ref()).cloned();
        let fuzz_factor = alea(seed).next_f64();
        let range = fuzz_range(interval, elapsed_days, self.parameters.maximum_interval);
        let fuzzed = (fuzz_factor * (range.max_ivl - range.min_ivl + 1) as f64
            + range.min_ivl as f64)
            .floor() as i64;

        tracing::debug!(
            interval,
            fuzz_factor,
            min = range.min_ivl,
            max = range.max_ivl,
            fuzzed,
            "Applied interval fuzz"
        );
        fuzzed
    }

    /// Interval in days for `stability`, in [1, maximum_interval]
    pub fn next_interval(&self, stability: f64, elapsed_days: i64) -> i64 {
        self.next_interval_seeded(stability, elapsed_days, None)
    }

    /// [`next_interval`](Self::next_interval) with an explicit fuzz seed
    pub fn next_interval_seeded(
        &self,
        stability: f64,
        elapsed_days: i64,
        seed: Option<&AleaSeed>,
    ) -> i64 {
        let interval = (stability * self.interval_modifier)
            .round()
            .max(1.0)
            .min(self.parameters.maximum_interval as f64);
        self.apply_fuzz_seeded(interval, elapsed_days, seed)
    }

    // ========================================================================
    // STATE TRANSITION
    // ========================================================================

    /// Advance a memory state by one review
    ///
    /// * `memory_state` - current state; `None` or all-zero means first review
    /// * `elapsed_days` - days since the last review
    /// * `grade` - rating; `Manual` returns the state unchanged, a blank state included
    /// * `retrievability` - precomputed R, derived from the curve when `None`
    pub fn next_state(
        &self,
        memory_state: Option<MemoryState>,
        elapsed_days: f64,
        grade: Rating,
        retrievability: Option<f64>,
    ) -> Result<MemoryState> {
        let MemoryState {
            difficulty: d,
            stability: s,
        } = memory_state.unwrap_or_default();

        if !(elapsed_days >= 0.0) {
            return Err(FsrsError::InvalidElapsed(elapsed_days));
        }

        if grade == Rating::Manual {
            return Ok(MemoryState::new(d, s));
        }

        if d == 0.0 && s == 0.0 {
            return Ok(MemoryState::new(
                clamp(self.initial_difficulty(grade), 1.0, 10.0),
                self.initial_stability(grade),
            ));
        }

        if d < 1.0 || s < S_MIN {
            return Err(FsrsError::InvalidMemoryState {
                difficulty: d,
                stability: s,
            });
        }

        let r = retrievability.unwrap_or_else(|| self.forgetting_curve(elapsed_days, s));

        let s_after_success = self.next_recall_stability(d, s, r, grade);
        let s_after_fail = self.next_forget_stability(d, s, r);
        let s_after_short_term = self.next_short_term_stability(s, grade);

        let mut new_s = s_after_success;

        if grade == Rating::Again {
            let (w17, w18) = if self.parameters.enable_short_term {
                (self.parameters.w[17], self.parameters.w[18])
            } else {
                (0.0, 0.0)
            };
            // A single lapse may not collapse stability below S / e^(w17 * w18)
            let next_s_min = s / (w17 * w18).exp();
            new_s = clamp(round8(next_s_min), S_MIN, s_after_fail);
        }

        if elapsed_days == 0.0 && self.parameters.enable_short_term {
            new_s = s_after_short_term;
        }

        Ok(MemoryState::new(self.next_difficulty(d, grade), new_s))
    }
}

/// (R^(1/decay) - 1) / FACTOR for a target retention in (0, 1]
fn interval_modifier_for(w: &[f64], request_retention: f64) -> Result<f64> {
    if !(request_retention > 0.0 && request_retention <= 1.0) {
        return Err(FsrsError::InvalidRetention(request_retention));
    }
    let DecayFactor { decay, factor } = decay_factor(w[20]);
    Ok(round8(
        (request_retention.powf(1.0 / decay) - 1.0) / factor,
    ))
}
