//! Upstream frame source boundary
//!
//! [`FrameSource`] is the complete surface the filter units see of the
//! host pipeline: stream description, asynchronous frame requests,
//! fetching, releasing, and output allocation. Everything else about the
//! host (frame graphs, worker scheduling, dependency tracking) stays on
//! the other side of this trait.
//!
//! Fetched frames are host-owned and reference-counted; [`FetchedFrame`]
//! scopes one acquisition so the reference is returned on every exit
//! path, early returns included.

use histeq_core::{Frame, VideoFormat, VideoInfo};
use std::ops::Deref;
use std::sync::Arc;

/// The five host operations the filter units depend on.
///
/// Implementations must be safe to call from multiple workers at once:
/// the units declare parallel frame processing, so distinct frame indices
/// are requested and fetched concurrently.
pub trait FrameSource: Send + Sync {
    /// Describe the stream this source produces.
    fn video_info(&self) -> &VideoInfo;

    /// Register interest in the frame at `index`.
    ///
    /// Availability is signaled by the scheduler re-activating the
    /// requesting unit in its producing phase; this call must not block.
    fn request_frame(&self, index: usize);

    /// Hand out the frame at `index`, transferring one host reference.
    ///
    /// Only valid once the frame's availability has been signaled, i.e.
    /// from a producing-phase activation.
    fn fetch_frame(&self, index: usize) -> Arc<Frame>;

    /// Return a reference obtained from [`fetch_frame`](Self::fetch_frame).
    fn release_frame(&self, frame: Arc<Frame>);

    /// Allocate a fresh, zeroed output frame.
    ///
    /// The property map is copied from `template`; the filter units pass
    /// their input frame's own format and geometry, so input and output
    /// always share an identical layout.
    fn allocate_frame(
        &self,
        format: &VideoFormat,
        width: u32,
        height: u32,
        template: &Frame,
    ) -> Frame;
}

/// Scoped ownership of one fetched frame.
///
/// Dropping the guard releases the host reference, so the release cannot
/// be forgotten on any return path through a producing-phase body.
pub struct FetchedFrame<'s> {
    source: &'s dyn FrameSource,
    frame: Option<Arc<Frame>>,
}

impl<'s> FetchedFrame<'s> {
    /// Fetch the frame at `index` from `source`.
    pub fn fetch(source: &'s dyn FrameSource, index: usize) -> Self {
        let frame = source.fetch_frame(index);
        FetchedFrame {
            source,
            frame: Some(frame),
        }
    }
}

impl Deref for FetchedFrame<'_> {
    type Target = Frame;

    fn deref(&self) -> &Frame {
        self.frame.as_deref().expect("frame present until drop")
    }
}

impl Drop for FetchedFrame<'_> {
    fn drop(&mut self) {
        if let Some(frame) = self.frame.take() {
            self.source.release_frame(frame);
        }
    }
}
