//! Error types for chart rendering.

use thiserror::Error;

/// Errors surfaced while rendering chart images.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("rendering error: {0}")]
    Rendering(String),

    #[error("invalid chart data: {0}")]
    InvalidData(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
