//! Error types shared by every module of the scheduling core.

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Scheduling core error type
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FsrsError {
    /// Weight vector has a non-finite value or an unsupported length
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
    /// Target retention outside (0, 1]
    #[error("Requested retention rate should be in the range (0,1], got {0}")]
    InvalidRetention(f64),
    /// Grade outside 0..=4
    #[error("Invalid grade: {0}")]
    InvalidGrade(i64),
    /// Rating name that is neither a known rating nor a numeric grade
    #[error("Unknown rating: {0}")]
    UnknownRating(String),
    /// Negative time delta
    #[error("Invalid elapsed days: {0}")]
    InvalidElapsed(f64),
    /// Difficulty below 1 or stability below the floor on a non-first review
    #[error("Invalid memory state {{ difficulty: {difficulty}, stability: {stability} }}")]
    InvalidMemoryState {
        /// Difficulty that failed validation
        difficulty: f64,
        /// Stability that failed validation
        stability: f64,
    },
    /// Malformed or negative learning step ("1m", "10m", "5h", "2d")
    #[error("Invalid step duration: {0}")]
    InvalidStepDuration(String),
    /// State code outside New/Learning/Review/Relearning
    #[error("Unknown card state: {0}")]
    UnknownCardState(String),
    /// Review log cannot be undone (manual ratings)
    #[error("Invalid rollback: {0}")]
    InvalidRollback(String),
    /// Configuration document could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Scheduling core result type
pub type Result<T> = std::result::Result<T, FsrsError>;

impl From<serde_json::Error> for FsrsError {
    fn from(e: serde_json::Error) -> Self {
        FsrsError::Config(e.to_string())
    }
}

impl From<std::io::Error> for FsrsError {
    fn from(e: std::io::Error) -> Self {
        FsrsError::Config(e.to_string())
    }
}
