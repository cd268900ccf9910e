//! Process-wide default tables for the FSRS-6 parameter model

// ============================================================================
// SCHEDULING DEFAULTS
// ============================================================================

/// Default target retention
pub const DEFAULT_REQUEST_RETENTION: f64 = 0.9;

/// Default maximum interval in days (100 years)
pub const DEFAULT_MAXIMUM_INTERVAL: i64 = 36500;

/// Fuzz is off unless asked for
pub const DEFAULT_ENABLE_FUZZ: bool = false;

/// Short-term (minute granularity) learning steps are on by default
pub const DEFAULT_ENABLE_SHORT_TERM: bool = true;

/// Default learning steps for new cards
pub const DEFAULT_LEARNING_STEPS: [&str; 2] = ["1m", "10m"];

/// Default relearning steps for lapsed cards
pub const DEFAULT_RELEARNING_STEPS: [&str; 1] = ["10m"];

// ============================================================================
// STABILITY BOUNDS
// ============================================================================

/// Minimum stability
pub const S_MIN: f64 = 0.001;

/// Maximum stability
pub const S_MAX: f64 = 36500.0;

/// Ceiling for the four initial-stability weights
pub const INIT_S_MAX: f64 = 100.0;

// ============================================================================
// DECAY
// ============================================================================

/// Decay used by FSRS-4.5/5, appended when migrating older weight vectors
pub const FSRS5_DEFAULT_DECAY: f64 = 0.5;

/// Default FSRS-6 decay (w20)
pub const FSRS6_DEFAULT_DECAY: f64 = 0.1542;

/// Static ceiling shared by w17 and w18
pub const W17_W18_CEILING: f64 = 2.0;

/// Number of weights in an FSRS-6 vector
pub const FSRS6_WEIGHT_COUNT: usize = 21;

/// Default FSRS-6 weights
pub const DEFAULT_WEIGHTS: [f64; FSRS6_WEIGHT_COUNT] = [
    0.212,  // w0: initial stability (Again)
    1.2931, // w1: initial stability (Hard)
    2.3065, // w2: initial stability (Good)
    8.2956, // w3: initial stability (Easy)
    6.4133, // w4: initial difficulty (Good)
    0.8334, // w5: initial difficulty (multiplier)
    3.0194, // w6: difficulty (multiplier)
    0.001,  // w7: difficulty mean reversion
    1.8722, // w8: stability (exponent)
    0.1666, // w9: stability (negative power)
    0.796,  // w10: stability (exponent)
    1.4835, // w11: fail stability (multiplier)
    0.0614, // w12: fail stability (negative power)
    0.2629, // w13: fail stability (power)
    1.6483, // w14: fail stability (exponent)
    0.6014, // w15: Hard penalty
    1.8729, // w16: Easy bonus
    0.5425, // w17: short-term stability (exponent)
    0.0912, // w18: short-term stability (exponent)
    0.0658, // w19: short-term last-stability (exponent)
    FSRS6_DEFAULT_DECAY, // w20: decay
];

/// [min, max] for every weight
///
/// Rows 17 and 18 share `w17_w18_ceiling`; row 19's floor depends on
/// whether short-term scheduling is on.
pub fn clamp_ranges(w17_w18_ceiling: f64, enable_short_term: bool) -> [(f64, f64); FSRS6_WEIGHT_COUNT] {
    [
        (S_MIN, INIT_S_MAX),
        (S_MIN, INIT_S_MAX),
        (S_MIN, INIT_S_MAX),
        (S_MIN, INIT_S_MAX),
        (1.0, 10.0),
        (0.001, 4.0),
        (0.001, 4.0),
        (0.001, 0.75),
        (0.0, 4.5),
        (0.0, 0.8),
        (0.001, 3.5),
        (0.001, 5.0),
        (0.001, 0.25),
        (0.001, 0.9),
        (0.0, 4.0),
        (0.0, 1.0),
        (1.0, 6.0),
        (0.0, w17_w18_ceiling),
        (0.0, w17_w18_ceiling),
        (if enable_short_term { 0.01 } else { 0.0 }, 0.8),
        (0.1, 0.8),
    ]
}
