//! Global histogram equalization unit

use crate::error::NodeResult;
use crate::source::{FetchedFrame, FrameSource};
use crate::unit::{Activation, FilterMode, FilterUnit, validate_format};
use histeq_core::{ColorRange, Frame, PlaneView, PlaneViewMut, Sample, VideoFormat, VideoInfo};
use histeq_filter::equalize_plane;
use std::sync::Arc;
use tracing::{debug, trace};

const NAME: &str = "EqualizeHist";

/// Filter unit applying global histogram equalization to every plane.
///
/// Construction validates the upstream format once; after that the unit
/// is immutable and safe to activate concurrently for distinct frame
/// indices.
pub struct EqualizeHist {
    source: Arc<dyn FrameSource>,
    info: VideoInfo,
    format: VideoFormat,
}

impl std::fmt::Debug for EqualizeHist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EqualizeHist")
            .field("info", &self.info)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

impl EqualizeHist {
    /// Build the unit over an upstream source.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::UnsupportedFormat`](crate::NodeError::UnsupportedFormat)
    /// unless the source is a constant-format, integer-sample stream
    /// stored in one or two bytes per sample. On failure the source
    /// handle is dropped before returning and no frame is ever requested.
    pub fn new(source: Arc<dyn FrameSource>) -> NodeResult<Self> {
        let info = source.video_info().clone();
        let format = validate_format(&info, NAME)?;
        debug!(
            unit = NAME,
            width = info.width,
            height = info.height,
            bits = format.bits_per_sample(),
            "created filter unit"
        );
        Ok(EqualizeHist {
            source,
            info,
            format,
        })
    }

    fn produce(&self, index: usize) -> NodeResult<Frame> {
        let src = FetchedFrame::fetch(self.source.as_ref(), index);
        let mut dst = self
            .source
            .allocate_frame(src.format(), src.width(), src.height(), &src);

        let bits = self.format.bits_per_sample();
        match self.format.bytes_per_sample() {
            1 => equalize_frame::<u8>(&src, &mut dst, bits)?,
            _ => equalize_frame::<u16>(&src, &mut dst, bits)?,
        }

        // The output spans the full sample range by construction; any
        // limited-range tag inherited from the input would be stale.
        dst.props_mut().set_color_range(ColorRange::Full);
        trace!(unit = NAME, index, "produced frame");
        Ok(dst)
    }
}

impl FilterUnit for EqualizeHist {
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

fn equalize_frame<T: Sample>(src: &Frame, dst: &mut Frame, bits: u32) -> NodeResult<()> {
    for plane in 0..src.num_planes() {
        let view = PlaneView::<T>::new(src, plane)?;
        let mut out = PlaneViewMut::<T>::new(dst, plane)?;
        equalize_plane(&view, &mut out, bits)?;
    }
    Ok(())
}
