//! Boundary errors for the editing engine.

use thiserror::Error;

/// Errors raised when malformed input reaches the engine's API boundary.
///
/// Operations below the boundary never fail: stale ids and out-of-range
/// requests degrade to no-ops instead.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid tool: {0:?} (expected one of \"pen\", \"eraser\", \"select\")")]
    InvalidTool(String),
    #[error("Invalid shape type: {0:?}")]
    InvalidShapeType(String),
    #[error("Invalid color: {0:?}")]
    InvalidColor(String),
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for boundary operations.
pub type EngineResult<T> = Result<T, EngineError>;
