//! Animation error types

use thiserror::Error;

/// Animation-related errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// Session duration must be positive and finite
    #[error("invalid animation duration: {0} ms")]
    InvalidDuration(f64),

    /// Frame interval must be positive and finite
    #[error("invalid frame interval: {0} ms")]
    InvalidFrameInterval(f64),

    /// Easing name could not be parsed
    #[error("unknown easing curve: {0:?}")]
    UnknownEasing(String),
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;
