//! Error types for histeq-node
//!
//! Both construction-time error classes carry the unit name so a host can
//! report which filter in a graph refused to build. Frame processing has
//! no recoverable error class of its own: the engines are pure numeric
//! transforms, and the conditions that could make them fail are rejected
//! here, at construction.

use thiserror::Error;

/// Errors that can occur in the filter units
#[derive(Debug, Error)]
pub enum NodeError {
    /// The upstream stream's format cannot be processed
    #[error("{unit}: {reason}")]
    UnsupportedFormat {
        /// Host-visible unit name
        unit: &'static str,
        /// Human-readable rejection reason
        reason: String,
    },

    /// A construction parameter is out of its valid domain
    #[error("{unit}: {reason}")]
    InvalidParameter {
        /// Host-visible unit name
        unit: &'static str,
        /// Human-readable rejection reason
        reason: String,
    },

    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] histeq_core::Error),

    /// Equalization engine error
    #[error("filter error: {0}")]
    Filter(#[from] histeq_filter::FilterError),
}

/// Result type for node operations
pub type NodeResult<T> = Result<T, NodeError>;
