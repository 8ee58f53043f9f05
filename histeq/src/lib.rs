//! histeq - Histogram equalization filters for pull-based video pipelines
//!
//! Two filter units over a host-provided frame source:
//!
//! - `EqualizeHist` - global histogram equalization: one cumulative LUT
//!   per plane, every sample remapped through it.
//! - `CLAHE` - contrast-limited adaptive equalization: a tile grid of
//!   clipped LUTs with four-corner bilinear blending.
//!
//! Both work on 8- and 16-bit integer planar video, process planes
//! independently, and declare parallel frame scheduling: the host may
//! drive many frame indices through a unit concurrently.
//!
//! # Example
//!
//! ```
//! use histeq::{EqualizeHist, FilterUnit, Frame, VideoFormat};
//! use histeq_test::{ScriptedSource, flat_frame, run_frame};
//! use std::sync::Arc;
//!
//! let format = VideoFormat::gray(8).unwrap();
//! let source = Arc::new(ScriptedSource::from_frames(vec![
//!     flat_frame(format, 4, 4, 100),
//! ]));
//! let unit = EqualizeHist::new(source).unwrap();
//! let output = run_frame(&unit, 0).unwrap();
//! assert_eq!(output.width(), 4);
//! ```

// Re-export core types (data structures used at every layer)
pub use histeq_core::*;

// Re-export the unit layer's public surface
pub use histeq_node::{
    Activation, Clahe, ClaheParams, EqualizeHist, FetchedFrame, FilterDescriptor, FilterMode,
    FilterUnit, FrameSource, NodeError, NodeResult, ParamDescriptor, ParamKind,
};

// Re-export domain crates as modules for direct engine access
pub use histeq_filter as filter;
pub use histeq_node as node;
