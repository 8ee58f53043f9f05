//! Error types for histeq-filter

use thiserror::Error;

/// Errors that can occur in the equalization engines
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] histeq_core::Error),

    /// Source and destination plane geometry differs
    #[error("plane dimension mismatch: source {src_width}x{src_height}, destination {dst_width}x{dst_height}")]
    DimensionMismatch {
        /// Source plane width in samples
        src_width: usize,
        /// Source plane height in rows
        src_height: usize,
        /// Destination plane width in samples
        dst_width: usize,
        /// Destination plane height in rows
        dst_height: usize,
    },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
