//! Tiled adaptive equalization unit

use crate::error::{NodeError, NodeResult};
use crate::source::{FetchedFrame, FrameSource};
use crate::unit::{Activation, FilterMode, FilterUnit, validate_format};
use histeq_core::{ColorRange, Frame, PlaneView, PlaneViewMut, Sample, VideoFormat, VideoInfo};
use histeq_filter::{ClaheOptions, DEFAULT_CLIP_LIMIT, DEFAULT_TILE_GRID, clahe_plane};
use std::sync::Arc;
use tracing::{debug, trace};

const NAME: &str = "CLAHE";

/// Host-facing construction parameters.
///
/// Both fields are optional, mirroring the registered operation's
/// signature: an absent (or non-finite) clip limit falls back to
/// [`DEFAULT_CLIP_LIMIT`], an absent tile count to [`DEFAULT_TILE_GRID`].
/// A supplied non-positive tile count is a configuration error — a grid
/// of zero or negative tiles has no meaning.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClaheParams {
    /// Contrast clip limit; `None` selects the default.
    pub clip_limit: Option<f64>,
    /// Tile count along each plane dimension; `None` selects the default.
    pub tile_grid: Option<i64>,
}

impl ClaheParams {
    fn resolve(&self) -> NodeResult<ClaheOptions> {
        let clip_limit = match self.clip_limit {
            Some(limit) if limit.is_finite() => limit,
            _ => DEFAULT_CLIP_LIMIT,
        };

        let tile_grid = match self.tile_grid {
            None => DEFAULT_TILE_GRID,
            Some(tile) if tile <= 0 => {
                return Err(NodeError::InvalidParameter {
                    unit: NAME,
                    reason: format!("tile must be a positive tile count, got {tile}"),
                });
            }
            Some(tile) => u32::try_from(tile).map_err(|_| NodeError::InvalidParameter {
                unit: NAME,
                reason: format!("tile count {tile} is out of range"),
            })?,
        };

        Ok(ClaheOptions {
            clip_limit,
            tile_grid,
        })
    }
}

/// Filter unit applying contrast-limited adaptive equalization per plane.
pub struct Clahe {
    source: Arc<dyn FrameSource>,
    info: VideoInfo,
    format: VideoFormat,
    options: ClaheOptions,
}

impl std::fmt::Debug for Clahe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clahe")
            .field("info", &self.info)
            .field("format", &self.format)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Clahe {
    /// Build the unit over an upstream source.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::InvalidParameter`] for a non-positive tile
    /// count and [`NodeError::UnsupportedFormat`] for streams that are
    /// not constant-format integer video in one or two bytes per sample.
    /// On failure the source handle is dropped before returning and no
    /// frame is ever requested.
    pub fn new(source: Arc<dyn FrameSource>, params: ClaheParams) -> NodeResult<Self> {
        let options = params.resolve()?;
        let info = source.video_info().clone();
        let format = validate_format(&info, NAME)?;
        debug!(
            unit = NAME,
            width = info.width,
            height = info.height,
            bits = format.bits_per_sample(),
            clip_limit = options.clip_limit,
            tile_grid = options.tile_grid,
            "created filter unit"
        );
        Ok(Clahe {
            source,
            info,
            format,
            options,
        })
    }

    /// Build the unit with default parameters.
    pub fn with_defaults(source: Arc<dyn FrameSource>) -> NodeResult<Self> {
        Self::new(source, ClaheParams::default())
    }

    /// Effective options after defaulting.
    pub fn options(&self) -> &ClaheOptions {
        &self.options
    }

    fn produce(&self, index: usize) -> NodeResult<Frame> {
        let src = FetchedFrame::fetch(self.source.as_ref(), index);
        let mut dst = self
            .source
            .allocate_frame(src.format(), src.width(), src.height(), &src);

        let bits = self.format.bits_per_sample();
        match self.format.bytes_per_sample() {
            1 => clahe_frame::<u8>(&src, &mut dst, bits, &self.options)?,
            _ => clahe_frame::<u16>(&src, &mut dst, bits, &self.options)?,
        }

        dst.props_mut().set_color_range(ColorRange::Full);
        trace!(unit = NAME, index, "produced frame");
        Ok(dst)
    }
}

impl FilterUnit for Clahe {
    fn name(&self) -> &'static str {
        NAME
    }

    fn video_info(&self) -> &VideoInfo {
        &self.info
    }

    fn mode(&self) -> FilterMode {
        FilterMode::Parallel
    }

    fn activate(&self, index: usize, activation: Activation) -> NodeResult<Option<Frame>> {
        match activation {
            Activation::Requesting => {
                self.source.request_frame(index);
                Ok(None)
            }
            Activation::Producing => self.produce(index).map(Some),
        }
    }
}

fn clahe_frame<T: Sample>(
    src: &Frame,
    dst: &mut Frame,
    bits: u32,
    options: &ClaheOptions,
) -> NodeResult<()> {
    for plane in 0..src.num_planes() {
        let view = PlaneView::<T>::new(src, plane)?;
        let mut out = PlaneViewMut::<T>::new(dst, plane)?;
        clahe_plane(&view, &mut out, bits, options)?;
    }
    Ok(())
}
