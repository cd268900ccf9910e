//! Weight validation, clamping and FSRS-4.5/5 → FSRS-6 migration

use super::constants::{
    clamp_ranges, DEFAULT_WEIGHTS, FSRS5_DEFAULT_DECAY, FSRS6_WEIGHT_COUNT, W17_W18_CEILING,
};
use crate::error::{FsrsError, Result};
use crate::fsrs::{clamp, round8};

/// Weight vector lengths accepted from storage: FSRS-4.5, FSRS-5, FSRS-6
pub const SUPPORTED_LENGTHS: [usize; 3] = [17, 19, 21];

/// Strict check of a stored weight vector
///
/// Fails with `InvalidParameters` on any non-finite weight or a length other
/// than 17, 19 or 21.
pub fn validate(weights: &[f64]) -> Result<()> {
    ensure_finite(weights)?;
    if !SUPPORTED_LENGTHS.contains(&weights.len()) {
        return Err(FsrsError::InvalidParameters(format!(
            "invalid parameter length {}, must be 17, 19 or 21 for FSRS-4.5, 5 and 6",
            weights.len()
        )));
    }
    Ok(())
}

/// `InvalidParameters` naming the first non-finite weight
pub(crate) fn ensure_finite(weights: &[f64]) -> Result<()> {
    match weights.iter().enumerate().find(|(_, w)| !w.is_finite()) {
        Some((i, w)) => Err(FsrsError::InvalidParameters(format!(
            "non-finite value {} at w{}",
            w, i
        ))),
        None => Ok(()),
    }
}

/// Shared ceiling for w17/w18
///
/// With several relearning steps the short-term boost compounds, so
/// `w17 * w18` is bounded by `-(ln(w11) + ln(2^w13 - 1) + w14 * 0.3) / n`.
pub fn w17_w18_ceiling(weights: &[f64], relearning_step_count: usize) -> f64 {
    if relearning_step_count <= 1 {
        return W17_W18_CEILING;
    }
    let (Some(w11), Some(w13), Some(w14)) = (weights.get(11), weights.get(13), weights.get(14))
    else {
        return W17_W18_CEILING;
    };

    let value = -(w11.ln() + (2f64.powf(*w13) - 1.0).ln() + w14 * 0.3)
        / relearning_step_count as f64;
    if value.is_nan() {
        return W17_W18_CEILING;
    }
    clamp(round8(value), 0.01, 2.0)
}

/// Clamp every weight into its allowed range
///
/// Only the first `weights.len()` rows of the range table apply, so a
/// 17-weight vector is clamped with FSRS-4.5 rows only.
pub fn clamp_weights(
    weights: &[f64],
    relearning_step_count: usize,
    enable_short_term: bool,
) -> Vec<f64> {
    let ceiling = w17_w18_ceiling(weights, relearning_step_count);
    let ranges = clamp_ranges(ceiling, enable_short_term);

    weights
        .iter()
        .zip(ranges.iter())
        .map(|(w, (min, max))| clamp(*w, *min, *max))
        .collect()
}

/// Bring a stored weight vector of any supported version up to FSRS-6
///
/// Never fails: an unsupported length falls back to the defaults with a
/// warning.
pub fn migrate(
    weights: Option<&[f64]>,
    relearning_step_count: usize,
    enable_short_term: bool,
) -> [f64; FSRS6_WEIGHT_COUNT] {
    let Some(weights) = weights else {
        return DEFAULT_WEIGHTS;
    };

    let migrated = match weights.len() {
        21 => clamp_weights(weights, relearning_step_count, enable_short_term),
        19 => {
            tracing::warn!("[FSRS-6] Auto fill w from 19 to 21 length");
            let mut w = clamp_weights(weights, relearning_step_count, enable_short_term);
            w.extend_from_slice(&[0.0, FSRS5_DEFAULT_DECAY]);
            w
        }
        17 => {
            let mut w = clamp_weights(weights, relearning_step_count, enable_short_term);
            w[4] = round8(w[5] * 2.0 + w[4]);
            w[5] = round8((w[5] * 3.0 + 1.0).ln() / 3.0);
            w[6] = round8(w[6] + 0.5);
            tracing::warn!("[FSRS-6] Auto fill w from 17 to 21 length");
            w.extend_from_slice(&[0.0, 0.0, 0.0, FSRS5_DEFAULT_DECAY]);
            w
        }
        len => {
            tracing::warn!(len, "[FSRS] Invalid parameters length, using default parameters");
            return DEFAULT_WEIGHTS;
        }
    };

    let mut out = DEFAULT_WEIGHTS;
    out.copy_from_slice(&migrated[..FSRS6_WEIGHT_COUNT]);
    out
}
