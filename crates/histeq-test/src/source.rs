//! Scripted in-memory frame source
//!
//! Stands in for the host pipeline in tests: frames are preloaded, every
//! host operation is counted, and fetching an un-requested frame panics
//! so protocol violations fail loudly instead of silently succeeding.

use histeq_core::{Frame, VideoFormat, VideoInfo};
use histeq_node::FrameSource;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory [`FrameSource`] with request/fetch/release accounting.
pub struct ScriptedSource {
    info: VideoInfo,
    frames: Vec<Arc<Frame>>,
    requested: Mutex<HashSet<usize>>,
    requests: AtomicUsize,
    fetches: AtomicUsize,
    releases: AtomicUsize,
    allocations: AtomicUsize,
}

impl ScriptedSource {
    /// Build a source over preloaded frames with an explicit stream
    /// description.
    ///
    /// Use this to declare a stream the units must reject (float
    /// samples, variable format) — the frame list may then be empty.
    pub fn with_info(info: VideoInfo, frames: Vec<Frame>) -> Self {
        ScriptedSource {
            info,
            frames: frames.into_iter().map(Arc::new).collect(),
            requested: Mutex::new(HashSet::new()),
            requests: AtomicUsize::new(0),
            fetches: AtomicUsize::new(0),
            releases: AtomicUsize::new(0),
            allocations: AtomicUsize::new(0),
        }
    }

    /// Build a constant-format source, deriving the stream description
    /// from the first frame.
    ///
    /// # Panics
    ///
    /// Panics if `frames` is empty.
    pub fn from_frames(frames: Vec<Frame>) -> Self {
        let first = frames.first().expect("at least one frame");
        let info = VideoInfo::new(*first.format(), first.width(), first.height(), frames.len());
        Self::with_info(info, frames)
    }

    /// Number of `request_frame` calls so far.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Number of `fetch_frame` calls so far.
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Number of `release_frame` calls so far.
    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }

    /// Number of `allocate_frame` calls so far.
    pub fn allocations(&self) -> usize {
        self.allocations.load(Ordering::SeqCst)
    }

    /// Fetched-but-not-released frame count; zero when a unit's resource
    /// accounting is correct.
    pub fn outstanding(&self) -> usize {
        self.fetches() - self.releases()
    }
}

impl FrameSource for ScriptedSource {
    fn video_info(&self) -> &VideoInfo {
        &self.info
    }

    fn request_frame(&self, index: usize) {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().insert(index);
    }

    fn fetch_frame(&self, index: usize) -> Arc<Frame> {
        assert!(
            self.requested.lock().unwrap().contains(&index),
            "frame {index} fetched without a prior request"
        );
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Arc::clone(&self.frames[index])
    }

    fn release_frame(&self, frame: Arc<Frame>) {
        self.releases.fetch_add(1, Ordering::SeqCst);
        drop(frame);
    }

    fn allocate_frame(
        &self,
        format: &VideoFormat,
        width: u32,
        height: u32,
        template: &Frame,
    ) -> Frame {
        self.allocations.fetch_add(1, Ordering::SeqCst);
        let mut frame = Frame::new(*format, width, height).expect("valid allocation geometry");
        *frame.props_mut() = template.props().clone();
        frame
    }
}
