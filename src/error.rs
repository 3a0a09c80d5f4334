//! Arcade error type
//!
//! None of these reach the page: the host-facing entry points log and drop them.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArcadeError {
    /// The canvas has not been rendered yet, or has no usable 2D context
    #[error("drawing surface unavailable")]
    SurfaceUnavailable,

    #[error("unknown game mode: {0:?}")]
    UnknownMode(String),

    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}
