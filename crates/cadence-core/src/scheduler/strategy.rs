//! Strategy hooks
//!
//! Two injection points customize a scheduler without subclassing it:
//! where the fuzz seed comes from, and how learning steps map grades to
//! minute offsets. Both are single-method traits with blanket impls for
//! plain closures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::card::{Card, Rating, State};
use crate::error::Result;
use crate::fsrs::AleaSeed;
use crate::params::{step_to_minutes, Parameters};

// ============================================================================
// SEED
// ============================================================================

/// What a seed strategy sees of the review in progress
#[derive(Debug, Clone, Copy)]
pub struct SeedContext<'a> {
    /// Time of the review
    pub review_time: DateTime<Utc>,
    /// Working copy of the card (reps already incremented)
    pub card: &'a Card,
    /// Days since the previous review
    pub elapsed_days: i64,
}

/// Derives the fuzz seed for one scheduler
pub trait SeedStrategy: Send + Sync {
    /// Seed for every interval drawn while scheduling this review
    fn seed(&self, ctx: &SeedContext<'_>) -> AleaSeed;
}

impl<F> SeedStrategy for F
where
    F: Fn(&SeedContext<'_>) -> AleaSeed + Send + Sync,
{
    fn seed(&self, ctx: &SeedContext<'_>) -> AleaSeed {
        self(ctx)
    }
}

/// `"{unix_seconds}_{reps}_{difficulty * stability}"`
///
/// The product is rounded to two decimals and always printed with a
/// fractional part ("0.0", "12.5").
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSeedStrategy;

impl SeedStrategy for DefaultSeedStrategy {
    fn seed(&self, ctx: &SeedContext<'_>) -> AleaSeed {
        let mul = (ctx.card.difficulty * ctx.card.stability * 100.0).round() / 100.0;
        let mul = if mul.fract() == 0.0 {
            format!("{:.1}", mul)
        } else {
            mul.to_string()
        };
        AleaSeed::Text(format!(
            "{}_{}_{}",
            ctx.review_time.timestamp(),
            ctx.card.reps,
            mul
        ))
    }
}

/// `"{card_id}{reps}"`: stable per card, independent of review time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardIdSeedStrategy {
    card_id: String,
}

impl CardIdSeedStrategy {
    /// Seed strategy for the card with this id
    pub fn new(card_id: impl Into<String>) -> Self {
        Self {
            card_id: card_id.into(),
        }
    }
}

impl SeedStrategy for CardIdSeedStrategy {
    fn seed(&self, ctx: &SeedContext<'_>) -> AleaSeed {
        AleaSeed::Text(format!("{}{}", self.card_id, ctx.card.reps))
    }
}

// ============================================================================
// LEARNING STEPS
// ============================================================================

/// Where a grade sends a card in the step list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepInfo {
    /// Offset of the next review, in minutes
    pub scheduled_minutes: i64,
    /// Step index after the review
    pub next_step: u32,
}

/// Step outcome per grade; a missing entry promotes the card to Review
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTable {
    /// Again
    pub again: Option<StepInfo>,
    /// Hard
    pub hard: Option<StepInfo>,
    /// Good
    pub good: Option<StepInfo>,
    /// Easy
    pub easy: Option<StepInfo>,
}

impl StepTable {
    /// Entry for a grade
    pub fn get(&self, rating: Rating) -> Option<StepInfo> {
        match rating {
            Rating::Again => self.again,
            Rating::Hard => self.hard,
            Rating::Good => self.good,
            Rating::Easy => self.easy,
            Rating::Manual => None,
        }
    }

    /// True when every grade promotes
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Builds the step table for a card's state and current step index
pub trait LearningStepsStrategy: Send + Sync {
    /// Step outcomes for a card in `state` at step `cur_step`
    fn steps(&self, params: &Parameters, state: State, cur_step: u32) -> Result<StepTable>;
}

impl<F> LearningStepsStrategy for F
where
    F: Fn(&Parameters, State, u32) -> Result<StepTable> + Send + Sync,
{
    fn steps(&self, params: &Parameters, state: State, cur_step: u32) -> Result<StepTable> {
        self(params, state, cur_step)
    }
}

/// Default step table
///
/// - Again: first step, index 0
/// - Hard: mean of the first two steps (1.5x the first if only one), same index
/// - Good: next step if there is one
/// - Easy: never held back
///
/// Review cards only get the Again entry (first relearning step).
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicLearningSteps;

impl LearningStepsStrategy for BasicLearningSteps {
    fn steps(&self, params: &Parameters, state: State, cur_step: u32) -> Result<StepTable> {
        let steps = params.steps_for(state);
        let cur = cur_step as usize;
        if steps.is_empty() || cur >= steps.len() {
            return Ok(StepTable::default());
        }

        let first = step_to_minutes(&steps[0])?;
        let mut table = StepTable {
            again: Some(StepInfo {
                scheduled_minutes: first,
                next_step: 0,
            }),
            ..StepTable::default()
        };

        if state == State::Review {
            return Ok(table);
        }

        let hard_minutes = match steps.get(1) {
            Some(second) => ((first + step_to_minutes(second)?) as f64 / 2.0).round() as i64,
            None => (first as f64 * 1.5).round() as i64,
        };
        table.hard = Some(StepInfo {
            scheduled_minutes: hard_minutes,
            next_step: cur_step,
        });

        if let Some(next) = steps.get(cur + 1) {
            table.good = Some(StepInfo {
                scheduled_minutes: step_to_minutes(next)?,
                next_step: cur_step + 1,
            });
        }

        Ok(table)
    }
}
