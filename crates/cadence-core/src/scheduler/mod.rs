//! Scheduler - One grade in, one card transition out
//!
//! A [`Scheduler`] is bound to exactly one (card, review time) pair. It
//! dispatches on the card's [`State`] and hands the transition to one of two
//! policies:
//!
//! - **Short-term**: new and lapsed cards walk through minute-level
//!   (re)learning steps before graduating to Review.
//! - **Long-term**: every grade produces a day-granularity Review interval.
//!
//! Results are cached per grade, so [`Scheduler::preview`] followed by
//! [`Scheduler::review`] does the work once.

mod long_term;
mod short_term;
mod strategy;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::card::{Card, PreviewResults, Rating, RecordLogItem, ReviewLog, State};
use crate::error::{FsrsError, Result};
use crate::fsrs::{AleaSeed, Algorithm};
use crate::time::{add_days, add_minutes, days_between, MINUTES_PER_DAY};

pub use strategy::{
    BasicLearningSteps, CardIdSeedStrategy, DefaultSeedStrategy, LearningStepsStrategy,
    SeedContext, SeedStrategy, StepInfo, StepTable,
};

// ============================================================================
// POLICY
// ============================================================================

/// Transition table a scheduler applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Policy {
    /// Minute-level (re)learning steps
    ShortTerm,
    /// Day-level intervals only
    LongTerm,
}

impl Policy {
    /// Policy implied by `enable_short_term`
    pub fn for_algorithm(algorithm: &Algorithm) -> Self {
        if algorithm.parameters().enable_short_term {
            Policy::ShortTerm
        } else {
            Policy::LongTerm
        }
    }
}

// ============================================================================
// SCHEDULER
// ============================================================================

/// Turns one grade into a card transition
///
/// Not meant to be shared across threads: the per-grade cache is scoped to
/// the (card, time) pair the scheduler was built for.
pub struct Scheduler<'a> {
    algorithm: &'a Algorithm,
    last: Card,
    current: Card,
    review_time: DateTime<Utc>,
    elapsed_days: i64,
    policy: Policy,
    seed_strategy: Arc<dyn SeedStrategy>,
    learning_steps: Arc<dyn LearningStepsStrategy>,
    cache: HashMap<Rating, RecordLogItem>,
}

impl<'a> Scheduler<'a> {
    /// Scheduler with the default strategies and the policy implied by the
    /// algorithm's parameters
    pub fn new(card: &Card, now: DateTime<Utc>, algorithm: &'a Algorithm) -> Self {
        let elapsed_days = card
            .last_review
            .map(|last_review| days_between(now, last_review))
            .unwrap_or(0);

        let mut current = card.clone();
        current.reps += 1;
        current.last_review = Some(now);
        current.elapsed_days = elapsed_days;

        Self {
            algorithm,
            last: card.clone(),
            current,
            review_time: now,
            elapsed_days,
            policy: Policy::for_algorithm(algorithm),
            seed_strategy: Arc::new(DefaultSeedStrategy),
            learning_steps: Arc::new(BasicLearningSteps),
            cache: HashMap::new(),
        }
    }

    /// Force a policy regardless of `enable_short_term`
    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self.cache.clear();
        self
    }

    /// Replace the fuzz seed strategy
    pub fn with_seed_strategy(mut self, strategy: Arc<dyn SeedStrategy>) -> Self {
        self.seed_strategy = strategy;
        self.cache.clear();
        self
    }

    /// Replace the learning steps strategy
    pub fn with_learning_steps_strategy(
        mut self,
        strategy: Arc<dyn LearningStepsStrategy>,
    ) -> Self {
        self.learning_steps = strategy;
        self.cache.clear();
        self
    }

    /// Card as it was before the review
    pub fn last(&self) -> &Card {
        &self.last
    }

    /// Working copy (reps incremented, last_review set)
    pub fn current(&self) -> &Card {
        &self.current
    }

    /// Review time
    pub fn review_time(&self) -> DateTime<Utc> {
        self.review_time
    }

    /// Whole days since the previous review (0 for a first review)
    pub fn elapsed_days(&self) -> i64 {
        self.elapsed_days
    }

    /// Active policy
    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Fuzz seed for this review
    pub fn seed(&self) -> AleaSeed {
        self.seed_strategy.seed(&SeedContext {
            review_time: self.review_time,
            card: &self.current,
            elapsed_days: self.elapsed_days,
        })
    }

    /// Outcome of every grade
    pub fn preview(&mut self) -> Result<PreviewResults> {
        Ok(PreviewResults {
            again: self.review(Rating::Again)?,
            hard: self.review(Rating::Hard)?,
            good: self.review(Rating::Good)?,
            easy: self.review(Rating::Easy)?,
        })
    }

    /// Outcome of one grade; repeated calls return the cached result
    pub fn review(&mut self, grade: Rating) -> Result<RecordLogItem> {
        if !grade.is_grade() {
            return Err(FsrsError::InvalidGrade(i64::from(grade.value())));
        }
        if let Some(item) = self.cache.get(&grade) {
            return Ok(item.clone());
        }

        let item = match self.policy {
            Policy::ShortTerm => short_term::review(self, grade)?,
            Policy::LongTerm => long_term::review(self, grade)?,
        };

        tracing::debug!(
            rating = %grade,
            from = %self.last.state,
            to = %item.card.state,
            scheduled_days = item.card.scheduled_days,
            learning_steps = item.card.learning_steps,
            "Scheduled card"
        );

        self.cache.insert(grade, item.clone());
        Ok(item)
    }

    // ========================================================================
    // SHARED BY BOTH POLICIES
    // ========================================================================

    fn algorithm(&self) -> &'a Algorithm {
        self.algorithm
    }

    /// Interval for `stability` fuzzed with this review's seed
    fn next_interval(&self, stability: f64, seed: &AleaSeed) -> i64 {
        self.algorithm
            .next_interval_seeded(stability, self.elapsed_days, Some(seed))
    }

    /// Graduate `next` to Review, `days` from now
    fn schedule_review(&self, next: &mut Card, days: i64) -> Result<()> {
        next.state = State::Review;
        next.learning_steps = 0;
        next.scheduled_days = days;
        next.due = add_days(self.review_time, days)?;
        Ok(())
    }

    /// Hold `next` in `to_state`, `minutes` from now
    fn schedule_step(&self, next: &mut Card, to_state: State, step: StepInfo) -> Result<()> {
        next.state = to_state;
        next.learning_steps = step.next_step;
        next.scheduled_days = 0;
        next.due = add_minutes(self.review_time, step.scheduled_minutes)?;
        Ok(())
    }

    /// Apply the step table entry for `grade`, graduating when there is none
    fn apply_learning_steps(
        &self,
        next: &mut Card,
        grade: Rating,
        to_state: State,
        seed: &AleaSeed,
    ) -> Result<()> {
        let table = self.learning_steps.steps(
            self.algorithm.parameters(),
            self.current.state,
            self.current.learning_steps,
        )?;

        match table.get(grade) {
            Some(step) if (1..MINUTES_PER_DAY).contains(&step.scheduled_minutes) => {
                self.schedule_step(next, to_state, step)
            }
            Some(step) if step.scheduled_minutes >= MINUTES_PER_DAY => {
                let days = step.scheduled_minutes as f64 / MINUTES_PER_DAY as f64;
                self.schedule_review(next, days.round() as i64)
            }
            _ => {
                let days = self.next_interval(next.stability, seed);
                self.schedule_review(next, days)
            }
        }
    }

    /// Log for a transition to `next`
    fn build_log(&self, rating: Rating, next: &Card) -> ReviewLog {
        ReviewLog {
            rating,
            state: self.last.state,
            due: self.last.due,
            stability: self.last.stability,
            difficulty: self.last.difficulty,
            elapsed_days: self.elapsed_days,
            last_elapsed_days: self.last.scheduled_days,
            scheduled_days: next.scheduled_days,
            learning_steps: next.learning_steps,
            review: self.review_time,
            previous_learning_steps: self.last.learning_steps,
            previous_elapsed_days: self.last.elapsed_days,
            previous_lapses: Some(self.last.lapses),
            last_review: self.last.last_review,
        }
    }

    fn record(&self, rating: Rating, next: Card) -> RecordLogItem {
        let log = self.build_log(rating, &next);
        RecordLogItem { card: next, log }
    }
}

impl std::fmt::Debug for Scheduler<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("last", &self.last)
            .field("review_time", &self.review_time)
            .field("elapsed_days", &self.elapsed_days)
            .field("policy", &self.policy)
            .field("cached", &self.cache.len())
            .finish()
    }
}

// ============================================================================
// ROLLBACK / FORGET
// ============================================================================

/// Undo one review: the card as it was before `log` was written
///
/// Manual logs (from [`forget`]) cannot be undone.
pub fn rollback(card: &Card, log: &ReviewLog) -> Result<Card> {
    if log.rating == Rating::Manual {
        return Err(FsrsError::InvalidRollback(
            "cannot roll back a manual rating".to_string(),
        ));
    }

    // Logs written before `previous_lapses` existed only counted lapses
    // from Review
    let lapses = log.previous_lapses.unwrap_or_else(|| {
        if log.rating == Rating::Again && log.state == State::Review {
            card.lapses.saturating_sub(1)
        } else {
            card.lapses
        }
    });

    Ok(Card {
        due: log.due,
        stability: log.stability,
        difficulty: log.difficulty,
        elapsed_days: log.previous_elapsed_days,
        scheduled_days: log.last_elapsed_days,
        learning_steps: log.previous_learning_steps,
        reps: card.reps.saturating_sub(1),
        lapses,
        state: log.state,
        last_review: log.last_review,
    })
}

/// Reset a card to New at `now`
///
/// Review and lapse counts survive unless `reset_count`.
pub fn forget(card: &Card, now: DateTime<Utc>, reset_count: bool) -> RecordLogItem {
    let mut fresh = Card::new(now);
    if !reset_count {
        fresh.reps = card.reps;
        fresh.lapses = card.lapses;
    }

    let log = ReviewLog {
        rating: Rating::Manual,
        state: card.state,
        due: card.due,
        stability: card.stability,
        difficulty: card.difficulty,
        elapsed_days: 0,
        last_elapsed_days: card.scheduled_days,
        scheduled_days: 0,
        learning_steps: 0,
        review: now,
        previous_learning_steps: card.learning_steps,
        previous_elapsed_days: card.elapsed_days,
        previous_lapses: Some(card.lapses),
        last_review: card.last_review,
    };

    RecordLogItem { card: fresh, log }
}
