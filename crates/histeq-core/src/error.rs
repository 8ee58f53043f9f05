//! Error types for histeq-core
//!
//! Provides a unified error type for frame and plane-view operations.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// histeq-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid frame dimensions
    #[error("invalid frame dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Invalid bits-per-sample value
    #[error("invalid bit depth: {0} bits per sample")]
    InvalidBitDepth(u32),

    /// Invalid plane count
    #[error("invalid plane count: {0}")]
    InvalidPlaneCount(usize),

    /// Invalid chroma subsampling shift
    #[error("invalid subsampling shift: {0}")]
    InvalidSubsampling(u32),

    /// Plane index out of range
    #[error("plane index out of range: {plane} >= {num_planes}")]
    PlaneOutOfRange { plane: usize, num_planes: usize },

    /// A typed plane view was requested with the wrong sample width
    #[error("sample width mismatch: frame stores {actual} byte(s) per sample, view expects {expected}")]
    SampleWidthMismatch { expected: usize, actual: usize },

    /// Row stride is not sample-addressable
    #[error("row stride of {stride} bytes is not a multiple of the {bytes}-byte sample size")]
    MisalignedStride { stride: usize, bytes: usize },

    /// Two frames that must share geometry do not
    #[error("incompatible frame geometry: {0}x{1} vs {2}x{3}")]
    IncompatibleSizes(u32, u32, u32, u32),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
