//! histeq-filter - Equalization engines
//!
//! The two pixel algorithms behind the histeq filter units:
//!
//! - Global histogram equalization: one cumulative-histogram LUT per
//!   plane, every sample remapped through it.
//! - Tiled adaptive (contrast-limited) equalization: a per-tile clipped
//!   LUT grid with four-corner bilinear blending between tiles.
//!
//! Both engines are pure functions over plane views: no state survives a
//! call, so arbitrarily many planes and frames may be processed
//! concurrently. Bit depth is a compile-time parameter chosen by the
//! caller per frame.

pub mod clahe;
mod error;
pub mod global;

pub use clahe::{ClaheOptions, DEFAULT_CLIP_LIMIT, DEFAULT_TILE_GRID, clahe_plane};
pub use error::{FilterError, FilterResult};
pub use global::{equalize_lut, equalize_plane};
