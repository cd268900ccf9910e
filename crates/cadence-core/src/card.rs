//! Card - The unit of scheduled material
//!
//! A card carries the FSRS memory state (difficulty, stability) plus the
//! bookkeeping the scheduler needs to place it in the learning pipeline.
//! Every scheduling call produces a fresh snapshot; nothing here is mutated
//! in place by the core.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FsrsError, Result};

// ============================================================================
// STATE
// ============================================================================

/// Position of a card in the learning pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum State {
    /// Never reviewed
    #[default]
    New = 0,
    /// Going through the initial learning steps
    Learning = 1,
    /// Graduated, scheduled in whole days
    Review = 2,
    /// Lapsed from Review, going through relearning steps
    Relearning = 3,
}

impl State {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            State::New => "New",
            State::Learning => "Learning",
            State::Review => "Review",
            State::Relearning => "Relearning",
        }
    }

    /// Numeric code (0..=3)
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<i64> for State {
    type Error = FsrsError;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            0 => Ok(State::New),
            1 => Ok(State::Learning),
            2 => Ok(State::Review),
            3 => Ok(State::Relearning),
            other => Err(FsrsError::UnknownCardState(other.to_string())),
        }
    }
}

impl FromStr for State {
    type Err = FsrsError;

    /// Accepts the state name (any case) or its numeric code
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<i64>() {
            return State::try_from(code);
        }
        match trimmed.to_lowercase().as_str() {
            "new" => Ok(State::New),
            "learning" => Ok(State::Learning),
            "review" => Ok(State::Review),
            "relearning" => Ok(State::Relearning),
            _ => Err(FsrsError::UnknownCardState(s.to_string())),
        }
    }
}

// ============================================================================
// RATING
// ============================================================================

/// Grade given during a review
///
/// `Manual` is reserved for administrative changes (forget, reschedule) and
/// is never produced by normal scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rating {
    /// Administrative change, leaves the memory state untouched
    Manual = 0,
    /// Forgot
    Again = 1,
    /// Recalled with serious difficulty
    Hard = 2,
    /// Recalled after hesitation
    Good = 3,
    /// Recalled effortlessly
    Easy = 4,
}

impl Rating {
    /// The four grades a learner can give, in ascending order
    pub const GRADES: [Rating; 4] = [Rating::Again, Rating::Hard, Rating::Good, Rating::Easy];

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Manual => "Manual",
            Rating::Again => "Again",
            Rating::Hard => "Hard",
            Rating::Good => "Good",
            Rating::Easy => "Easy",
        }
    }

    /// Numeric grade (0..=4)
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Numeric grade as a float, for use inside the formulas
    pub fn as_f64(self) -> f64 {
        f64::from(self as u8)
    }

    /// True for the four learner grades (everything but `Manual`)
    pub fn is_grade(self) -> bool {
        self != Rating::Manual
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<i64> for Rating {
    type Error = FsrsError;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            0 => Ok(Rating::Manual),
            1 => Ok(Rating::Again),
            2 => Ok(Rating::Hard),
            3 => Ok(Rating::Good),
            4 => Ok(Rating::Easy),
            other => Err(FsrsError::InvalidGrade(other)),
        }
    }
}

impl FromStr for Rating {
    type Err = FsrsError;

    /// Accepts the rating name (any case) or its numeric grade
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<i64>() {
            return Rating::try_from(code);
        }
        match trimmed.to_lowercase().as_str() {
            "manual" => Ok(Rating::Manual),
            "again" => Ok(Rating::Again),
            "hard" => Ok(Rating::Hard),
            "good" => Ok(Rating::Good),
            "easy" => Ok(Rating::Easy),
            _ => Err(FsrsError::UnknownRating(trimmed.to_string())),
        }
    }
}

// ============================================================================
// MEMORY STATE
// ============================================================================

/// Difficulty/stability pair the algorithm advances review by review
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct MemoryState {
    /// Inherent difficulty (1.0 = easy, 10.0 = hard)
    pub difficulty: f64,
    /// Days until retrievability drops to 90%
    pub stability: f64,
}

impl MemoryState {
    /// Create a memory state
    pub fn new(difficulty: f64, stability: f64) -> Self {
        Self {
            difficulty,
            stability,
        }
    }

    /// Both fields zero: no graded review has happened yet
    pub fn is_blank(&self) -> bool {
        self.difficulty == 0.0 && self.stability == 0.0
    }
}

// ============================================================================
// CARD
// ============================================================================

/// A scheduled card snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// When the card is next due
    pub due: DateTime<Utc>,
    /// Memory stability (days until 90% recall probability)
    pub stability: f64,
    /// Inherent difficulty, 0 until the first graded review, then [1, 10]
    pub difficulty: f64,
    /// Days between the two most recent reviews
    pub elapsed_days: i64,
    /// Interval chosen at the last review, in days
    pub scheduled_days: i64,
    /// Index into the (re)learning step list
    pub learning_steps: u32,
    /// Number of reviews
    pub reps: u32,
    /// Number of times the card was forgotten while in Review
    pub lapses: u32,
    /// Pipeline state
    pub state: State,
    /// Last review time, if any
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub last_review: Option<DateTime<Utc>>,
}

impl Card {
    /// Create an empty card enrolled at `now`
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            due: now,
            stability: 0.0,
            difficulty: 0.0,
            elapsed_days: 0,
            scheduled_days: 0,
            learning_steps: 0,
            reps: 0,
            lapses: 0,
            state: State::New,
            last_review: None,
        }
    }

    /// Current memory state
    pub fn memory_state(&self) -> MemoryState {
        MemoryState::new(self.difficulty, self.stability)
    }
}

// ============================================================================
// REVIEW LOG
// ============================================================================

/// Immutable record of one review event
///
/// The `state`, `due`, `stability` and `difficulty` fields describe the card
/// *before* the review. `previous_*` and `last_review` carry the remaining
/// pre-review fields so a review can be undone exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewLog {
    /// Rating given
    pub rating: Rating,
    /// State before the review
    pub state: State,
    /// Due date before the review
    pub due: DateTime<Utc>,
    /// Stability before the review
    pub stability: f64,
    /// Difficulty before the review
    pub difficulty: f64,
    /// Days since the prior review
    pub elapsed_days: i64,
    /// Interval that was scheduled before this review
    pub last_elapsed_days: i64,
    /// Interval chosen by this review
    pub scheduled_days: i64,
    /// Step index after the review
    pub learning_steps: u32,
    /// When this review happened
    pub review: DateTime<Utc>,
    /// Step index before the review
    #[serde(default)]
    pub previous_learning_steps: u32,
    /// Card `elapsed_days` before the review
    #[serde(default)]
    pub previous_elapsed_days: i64,
    /// Card `lapses` before the review
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub previous_lapses: Option<u32>,
    /// Card `last_review` before the review
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub last_review: Option<DateTime<Utc>>,
}

/// Result of grading a card once
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordLogItem {
    /// Card after the review
    pub card: Card,
    /// Log of the review
    pub log: ReviewLog,
}

/// Outcome of every grade for the same (card, time) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewResults {
    /// Outcome when rated Again
    pub again: RecordLogItem,
    /// Outcome when rated Hard
    pub hard: RecordLogItem,
    /// Outcome when rated Good
    pub good: RecordLogItem,
    /// Outcome when rated Easy
    pub easy: RecordLogItem,
}

impl PreviewResults {
    /// Outcome for a grade; `None` for `Rating::Manual`
    pub fn get(&self, rating: Rating) -> Option<&RecordLogItem> {
        match rating {
            Rating::Again => Some(&self.again),
            Rating::Hard => Some(&self.hard),
            Rating::Good => Some(&self.good),
            Rating::Easy => Some(&self.easy),
            Rating::Manual => None,
        }
    }

    /// Iterate outcomes in grade order
    pub fn iter(&self) -> impl Iterator<Item = (Rating, &RecordLogItem)> {
        [
            (Rating::Again, &self.again),
            (Rating::Hard, &self.hard),
            (Rating::Good, &self.good),
            (Rating::Easy, &self.easy),
        ]
        .into_iter()
    }
}
