//! Error types for the block renderer.

use thiserror::Error;

/// Result type alias using RenderError.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors raised while loading configuration, baking block models or exporting.
///
/// Rendering itself never fails; see
/// [`BlockRenderContext::render`](crate::BlockRenderContext::render).
#[derive(Error, Debug)]
pub enum RenderError {
    /// Failed to parse JSON data.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error while reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A block model could not be baked into quads.
    #[error("Invalid block model: {0}")]
    InvalidModel(String),

    /// Failed to format text output.
    #[error("Format error: {0}")]
    Fmt(#[from] std::fmt::Error),
}
