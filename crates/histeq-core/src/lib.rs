//! histeq-core - Frame and plane-buffer data model
//!
//! This crate provides the data structures shared by the histeq filter
//! units and the host pipeline boundary:
//!
//! - [`VideoFormat`] / [`VideoInfo`] - sample layout and stream description
//! - [`Frame`] - planar, stride-padded pixel storage with a property map
//! - [`FrameProps`] / [`ColorRange`] - per-frame metadata
//! - [`PlaneView`] / [`PlaneViewMut`] - bit-depth-generic sample views
//!
//! No pixel algorithms live here; see `histeq-filter` for the
//! equalization engines and `histeq-node` for the pipeline-facing filter
//! units.

pub mod error;
pub mod format;
pub mod frame;
pub mod plane;
pub mod props;

pub use error::{Error, Result};
pub use format::{SampleType, VideoFormat, VideoInfo};
pub use frame::{Frame, ROW_ALIGNMENT};
pub use plane::{PlaneView, PlaneViewMut, Sample};
pub use props::{COLOR_RANGE_KEY, ColorRange, FrameProps, PropValue};
