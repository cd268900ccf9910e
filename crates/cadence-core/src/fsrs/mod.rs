//! FSRS-6 (Free Spaced Repetition Scheduler) Module
//!
//! Reference: https://github.com/open-spaced-repetition/fsrs4anki
//!
//! ## Key improvements in FSRS-6 over FSRS-5:
//! - 21 parameters (vs 19) with personalizable forgetting curve decay (w20)
//! - Same-day review handling with S^(-w19) term
//! - Better short-term memory modeling
//!
//! ## Core Formulas:
//! - Retrievability: R = (1 + FACTOR * t / S)^(-w20) where FACTOR = 0.9^(-1/w20) - 1
//! - Interval: t = S/FACTOR * (R^(1/w20) - 1)
//!
//! Every intermediate the reference implementations round is rounded to 8
//! decimal places here as well, so results agree to the last printed digit.

mod alea;
mod algorithm;
mod fuzz;

pub use alea::{alea, Alea, AleaSeed, AleaState};

pub use algorithm::{
    decay_factor,
    // Core functions
    forgetting_curve,
    Algorithm,
    DecayFactor,
};

pub use fuzz::{fuzz_range, FuzzRange};

/// Round to 8 decimal places, half away from zero
pub fn round8(value: f64) -> f64 {
    (value * 100_000_000.0).round() / 100_000_000.0
}

/// `min(max(value, min), max)`; a NaN `value` lands on `min`
pub(crate) fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}
