//! Core error types

use thiserror::Error;

/// Coordinate data on a waypoint element could not be read
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoordError {
    /// The element carries no coordinate data
    #[error("element has no `{0}` coordinate data")]
    Missing(&'static str),

    /// The coordinate data is not a JSON point
    #[error("malformed coordinate data {raw:?}: {reason}")]
    Malformed { raw: String, reason: String },
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoordError>;
