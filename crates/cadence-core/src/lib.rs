//! # Cadence Core
//!
//! Spaced repetition scheduling on the FSRS-6 memory model:
//!
//! - **FSRS-6**: 21-parameter model with a personalizable forgetting curve (w20)
//! - **Parameter Migration**: FSRS-4.5 (17) and FSRS-5 (19) weight vectors are
//!   upgraded and clamped on load
//! - **Seeded Fuzz**: Alea PRNG, bit-identical to the JavaScript generator, so
//!   fuzzed intervals reproduce across hosts
//! - **Two Policies**: minute-level (re)learning steps, or day-level intervals only
//! - **Rollback / Forget**: undo a review exactly, or reset a card to New
//!
//! ## Quick Start
//!
//! ```rust
//! use cadence_core::{Card, Fsrs, PartialParameters, Rating, State};
//! use chrono::{Duration, TimeZone, Utc};
//!
//! # fn main() -> cadence_core::Result<()> {
//! let fsrs = Fsrs::new(PartialParameters::new().request_retention(0.9))?;
//! let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//!
//! // First review: Good moves a new card to the second learning step
//! let first = fsrs.next(&Card::new(now), now, Rating::Good)?;
//! assert_eq!(first.card.state, State::Learning);
//!
//! // Ten minutes later the last step graduates it
//! let later = now + Duration::minutes(10);
//! let second = fsrs.next(&first.card, later, Rating::Good)?;
//! assert_eq!(second.card.state, State::Review);
//! assert!(second.card.scheduled_days > 0);
//!
//! // Every review can be undone
//! assert_eq!(fsrs.rollback(&second.card, &second.log)?, first.card);
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! [`PartialParameters`] deserializes from any JSON subset of the parameter
//! fields, and `CADENCE_*` environment variables override the scalar knobs
//! (see [`PartialParameters::with_env_overrides`]).

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod card;
pub mod error;
pub mod fsrs;
pub mod params;
pub mod scheduler;
pub mod time;

mod fsrs_instance;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Cards and review records
pub use card::{Card, MemoryState, PreviewResults, Rating, RecordLogItem, ReviewLog, State};

// Errors
pub use error::{FsrsError, Result};

// FSRS-6 algorithm
pub use fsrs::{
    alea,
    decay_factor,
    // Core functions for advanced usage
    forgetting_curve,
    fuzz_range,
    round8,
    Alea,
    AleaSeed,
    AleaState,
    Algorithm,
    DecayFactor,
    FuzzRange,
};

// Parameters
pub use params::{
    migrate, step_to_minutes, validate, Parameters, PartialParameters, DEFAULT_WEIGHTS,
};

// Scheduling
pub use fsrs_instance::Fsrs;
pub use scheduler::{
    forget, rollback, BasicLearningSteps, CardIdSeedStrategy, DefaultSeedStrategy,
    LearningStepsStrategy, Policy, Scheduler, SeedContext, SeedStrategy, StepInfo, StepTable,
};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// FSRS algorithm version (6 = 21 parameters)
pub const FSRS_VERSION: u8 = 6;

// ============================================================================
// PRELUDE
// ============================================================================

/// Convenient imports for common usage
pub mod prelude {
    pub use crate::{
        Card, Fsrs, FsrsError, PartialParameters, PreviewResults, Rating, RecordLogItem,
        Result, ReviewLog, State,
    };
}
