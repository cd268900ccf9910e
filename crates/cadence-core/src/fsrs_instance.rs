//! Fsrs - Entry point bundling an algorithm with its strategies
//!
//! Owns one [`Algorithm`] and the registered strategy overrides, and builds a
//! fresh [`Scheduler`] for every (card, time) pair. Cheap to clone and safe to
//! share across threads.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::card::{Card, PreviewResults, Rating, RecordLogItem, ReviewLog, State};
use crate::error::Result;
use crate::fsrs::Algorithm;
use crate::params::{Parameters, PartialParameters};
use crate::scheduler::{self, LearningStepsStrategy, Policy, Scheduler, SeedStrategy};
use crate::time::days_between;

/// Scheduling entry point
#[derive(Clone, Default)]
pub struct Fsrs {
    algorithm: Algorithm,
    policy: Option<Policy>,
    seed_strategy: Option<Arc<dyn SeedStrategy>>,
    learning_steps: Option<Arc<dyn LearningStepsStrategy>>,
}

impl Fsrs {
    /// Build from a partial config
    pub fn new(partial: PartialParameters) -> Result<Self> {
        Ok(Self::from_algorithm(Algorithm::new(partial)?))
    }

    /// Wrap an existing algorithm
    pub fn from_algorithm(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            policy: None,
            seed_strategy: None,
            learning_steps: None,
        }
    }

    /// Underlying algorithm
    pub fn algorithm(&self) -> &Algorithm {
        &self.algorithm
    }

    /// Parameters in use
    pub fn parameters(&self) -> &Parameters {
        self.algorithm.parameters()
    }

    /// Force a scheduling policy instead of deriving it from `enable_short_term`
    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Register a fuzz seed strategy
    pub fn use_seed_strategy(&mut self, strategy: impl SeedStrategy + 'static) -> &mut Self {
        self.seed_strategy = Some(Arc::new(strategy));
        self
    }

    /// Register a learning steps strategy
    pub fn use_learning_steps_strategy(
        &mut self,
        strategy: impl LearningStepsStrategy + 'static,
    ) -> &mut Self {
        self.learning_steps = Some(Arc::new(strategy));
        self
    }

    /// Drop every registered strategy and forced policy
    pub fn clear_strategies(&mut self) -> &mut Self {
        self.policy = None;
        self.seed_strategy = None;
        self.learning_steps = None;
        self
    }

    /// Scheduler for one (card, time) pair with the registered overrides applied
    pub fn scheduler(&self, card: &Card, now: DateTime<Utc>) -> Scheduler<'_> {
        let mut scheduler = Scheduler::new(card, now, &self.algorithm);
        if let Some(policy) = self.policy {
            scheduler = scheduler.with_policy(policy);
        }
        if let Some(strategy) = &self.seed_strategy {
            scheduler = scheduler.with_seed_strategy(Arc::clone(strategy));
        }
        if let Some(strategy) = &self.learning_steps {
            scheduler = scheduler.with_learning_steps_strategy(Arc::clone(strategy));
        }
        scheduler
    }

    /// Outcome of every grade
    pub fn repeat(&self, card: &Card, now: DateTime<Utc>) -> Result<PreviewResults> {
        self.scheduler(card, now).preview()
    }

    /// Outcome of one grade
    pub fn next(&self, card: &Card, now: DateTime<Utc>, grade: Rating) -> Result<RecordLogItem> {
        self.scheduler(card, now).review(grade)
    }

    /// Probability of recalling `card` at `now`
    ///
    /// New cards have nothing to recall and report 0. Elapsed time runs from
    /// the last review (or the due date if there is none) and never goes
    /// negative.
    pub fn retrievability(&self, card: &Card, now: DateTime<Utc>) -> f64 {
        if card.state == State::New {
            return 0.0;
        }
        let since = card.last_review.unwrap_or(card.due);
        let elapsed = days_between(now, since).max(0);
        self.algorithm.forgetting_curve(elapsed as f64, card.stability)
    }

    /// Undo one review
    pub fn rollback(&self, card: &Card, log: &ReviewLog) -> Result<Card> {
        scheduler::rollback(card, log)
    }

    /// Reset a card to New at `now`
    pub fn forget(&self, card: &Card, now: DateTime<Utc>, reset_count: bool) -> RecordLogItem {
        scheduler::forget(card, now, reset_count)
    }
}

impl std::fmt::Debug for Fsrs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fsrs")
            .field("parameters", self.algorithm.parameters())
            .field("policy", &self.policy)
            .field("custom_seed_strategy", &self.seed_strategy.is_some())
            .field("custom_learning_steps", &self.learning_steps.is_some())
            .finish()
    }
}
