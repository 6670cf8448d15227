//! Error types for screener-render

use thiserror::Error;

/// Result type alias for rendering operations
pub type Result<T> = std::result::Result<T, RenderError>;

/// Rendering error types
///
/// None of these reach the caller of [`crate::Renderer::render`]; they are
/// logged there and turned into the plain-text fallback.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Span {start}..{end} out of bounds for text of length {len}")]
    InvalidSpan { start: usize, end: usize, len: usize },

    #[error("Span {start}..{end} partially overlaps {outer_start}..{outer_end}")]
    Overlap {
        start: usize,
        end: usize,
        outer_start: usize,
        outer_end: usize,
    },

    #[error("Render pipeline panicked: {0}")]
    Panic(String),

    #[error("{0}")]
    Message(String),
}
