//! Error types for the sensor-forecast pipeline.

use std::fmt;

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur while preparing, fitting, forecasting or scoring.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// A raw row could not be turned into a timestamped observation.
    #[error("parse error at row {row}: {message}")]
    Parse { row: usize, message: String },

    /// The model could not be estimated.
    #[error("fit failed: {0}")]
    Fit(String),

    /// Insufficient training data for the requested model order.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// No aligned (actual, forecast) pair survived missing-value removal.
    #[error("no valid aligned pairs to evaluate")]
    EmptyEvaluation,

    /// Invalid configuration or input supplied by the caller.
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),

    /// Two aligned structures disagree in length.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Timestamps violate the strictly-increasing invariant.
    #[error("timestamp error: {0}")]
    TimestampError(String),
}

/// Coarse classification of [`ForecastError`], one per failing stage family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Parse,
    Fit,
    EmptyEvaluation,
    PreconditionViolation,
}

impl ForecastError {
    /// Build a parse error for the given zero-based row.
    pub fn parse(row: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            row,
            message: message.into(),
        }
    }

    /// Build a precondition violation.
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::PreconditionViolation(message.into())
    }

    /// The kind of failure, independent of the exact variant.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse { .. } => ErrorKind::Parse,
            Self::Fit(_) | Self::InsufficientData { .. } => ErrorKind::Fit,
            Self::EmptyEvaluation => ErrorKind::EmptyEvaluation,
            Self::PreconditionViolation(_)
            | Self::DimensionMismatch { .. }
            | Self::TimestampError(_) => ErrorKind::PreconditionViolation,
        }
    }

    /// Whether the caller may reasonably retry with different input or order.
    ///
    /// Precondition violations are programming errors and are never recoverable.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self.kind(), ErrorKind::PreconditionViolation)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Parse => "ParseError",
            Self::Fit => "FitError",
            Self::EmptyEvaluation => "EmptyEvaluationError",
            Self::PreconditionViolation => "PreconditionViolation",
        };
        f.write_str(name)
    }
}
