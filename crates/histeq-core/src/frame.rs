//! Frame - the per-picture pixel container
//!
//! A [`Frame`] owns one strided byte buffer per plane plus a property map.
//! Rows are padded to a [`ROW_ALIGNMENT`]-byte boundary, so a row's stride
//! routinely exceeds `width * bytes_per_sample`; pixel code must index
//! through the stride, never assume tight packing.
//!
//! # Storage layout
//!
//! Plane data is stored in 32-bit words (strides are always a multiple of
//! the alignment, hence word-divisible), which keeps every row start
//! aligned for both one- and two-byte sample views.

use crate::error::{Error, Result};
use crate::format::VideoFormat;
use crate::props::FrameProps;

/// Row strides are padded to this many bytes.
///
/// Matches the alignment hardware-friendly frame allocators use; it also
/// guarantees strides are 32-bit-word divisible for the backing storage.
pub const ROW_ALIGNMENT: usize = 32;

/// One plane's pixel storage.
#[derive(Debug, Clone)]
struct Plane {
    width: u32,
    height: u32,
    /// Row stride in bytes; a multiple of [`ROW_ALIGNMENT`].
    stride: usize,
    /// Backing storage, `stride / 4` words per row.
    data: Vec<u32>,
}

impl Plane {
    fn new(width: u32, height: u32, bytes_per_sample: u32) -> Self {
        let row_bytes = width as usize * bytes_per_sample as usize;
        let stride = row_bytes.div_ceil(ROW_ALIGNMENT) * ROW_ALIGNMENT;
        let words = (stride / 4) * height as usize;
        Plane {
            width,
            height,
            stride,
            data: vec![0u32; words],
        }
    }
}

/// A single video frame: planar pixel storage plus properties.
///
/// Frames are allocated by the host pipeline (or by
/// [`Frame::new_like`] when a filter produces its output) and are
/// zero-initialized. The sample format is fixed at creation; input and
/// output frames of one filter invocation always share identical width,
/// height, plane count, and format.
///
/// # Examples
///
/// ```
/// use histeq_core::{Frame, VideoFormat};
///
/// let frame = Frame::new(VideoFormat::gray(8).unwrap(), 640, 480).unwrap();
/// assert_eq!(frame.width(), 640);
/// assert_eq!(frame.num_planes(), 1);
/// assert!(frame.stride_bytes(0).unwrap() >= 640);
/// ```
#[derive(Debug, Clone)]
pub struct Frame {
    format: VideoFormat,
    width: u32,
    height: u32,
    planes: Vec<Plane>,
    props: FrameProps,
}

impl Frame {
    /// Create a zero-initialized frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0, or if
    /// chroma subsampling would produce an empty plane.
    pub fn new(format: VideoFormat, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let mut planes = Vec::with_capacity(format.num_planes());
        for plane in 0..format.num_planes() {
            let pw = format.plane_width(plane, width);
            let ph = format.plane_height(plane, height);
            if pw == 0 || ph == 0 {
                return Err(Error::InvalidDimension { width, height });
            }
            planes.push(Plane::new(pw, ph, format.bytes_per_sample()));
        }

        Ok(Frame {
            format,
            width,
            height,
            planes,
            props: FrameProps::new(),
        })
    }

    /// Create a zero-initialized frame with the template's format and
    /// geometry, copying its property map.
    ///
    /// This is the shape of a filter's output allocation: identical
    /// layout, fresh pixels, inherited metadata that the filter then
    /// selectively overwrites.
    pub fn new_like(template: &Frame) -> Self {
        // Template geometry was validated when the template was built.
        let mut frame = Frame::new(template.format, template.width, template.height)
            .expect("template frame has valid geometry");
        frame.props = template.props.clone();
        frame
    }

    /// Get the frame's sample format.
    #[inline]
    pub fn format(&self) -> &VideoFormat {
        &self.format
    }

    /// Get the frame width in pixels (plane 0).
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the frame height in pixels (plane 0).
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of planes.
    #[inline]
    pub fn num_planes(&self) -> usize {
        self.planes.len()
    }

    /// Width of one plane in samples.
    pub fn plane_width(&self, plane: usize) -> Result<u32> {
        Ok(self.plane_ref(plane)?.width)
    }

    /// Height of one plane in rows.
    pub fn plane_height(&self, plane: usize) -> Result<u32> {
        Ok(self.plane_ref(plane)?.height)
    }

    /// Row stride of one plane in bytes.
    pub fn stride_bytes(&self, plane: usize) -> Result<usize> {
        Ok(self.plane_ref(plane)?.stride)
    }

    /// Read-only byte view of one plane, including row padding.
    pub fn plane_data(&self, plane: usize) -> Result<&[u8]> {
        Ok(bytemuck::cast_slice(&self.plane_ref(plane)?.data))
    }

    /// Mutable byte view of one plane, including row padding.
    pub fn plane_data_mut(&mut self, plane: usize) -> Result<&mut [u8]> {
        let num_planes = self.planes.len();
        let p = self
            .planes
            .get_mut(plane)
            .ok_or(Error::PlaneOutOfRange { plane, num_planes })?;
        Ok(bytemuck::cast_slice_mut(&mut p.data))
    }

    /// Get the frame's property map.
    #[inline]
    pub fn props(&self) -> &FrameProps {
        &self.props
    }

    /// Get mutable access to the frame's property map.
    #[inline]
    pub fn props_mut(&mut self) -> &mut FrameProps {
        &mut self.props
    }

    /// Check that two frames share width, height, plane count, and format.
    pub fn same_geometry(&self, other: &Frame) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.format == other.format
    }

    fn plane_ref(&self, plane: usize) -> Result<&Plane> {
        self.planes.get(plane).ok_or(Error::PlaneOutOfRange {
            plane,
            num_planes: self.planes.len(),
        })
    }
}
