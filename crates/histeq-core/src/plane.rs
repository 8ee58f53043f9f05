//! Generic plane views
//!
//! Pixel algorithms index planes in *samples*, but frames store planes as
//! byte buffers whose row stride is expressed in bytes. The views here do
//! the conversion once: a byte stride divided by the sample size becomes a
//! sample-indexed stride, and row accessors hand out exactly `width`
//! samples so the padding tail is never touched.
//!
//! Bit-depth genericity is compile-time: [`Sample`] is closed over `u8`
//! and `u16`, and a caller picks the instantiation once per frame from the
//! validated format rather than branching inside per-pixel loops.

use crate::error::{Error, Result};
use crate::frame::Frame;

/// An unsigned integer sample, one or two bytes wide.
///
/// Sealed in practice: the frame model stores only 8- and 16-bit integer
/// samples, and the filter units validate that at construction.
pub trait Sample:
    bytemuck::Pod + Copy + Eq + std::fmt::Debug + Send + Sync + 'static
{
    /// Storage width in bytes.
    const BYTES: usize;

    /// Widen to `u32`.
    fn to_u32(self) -> u32;

    /// Narrow from `u32`; callers only pass values within the sample's
    /// declared peak.
    fn from_u32(value: u32) -> Self;
}

impl Sample for u8 {
    const BYTES: usize = 1;

    #[inline]
    fn to_u32(self) -> u32 {
        u32::from(self)
    }

    #[inline]
    fn from_u32(value: u32) -> Self {
        value as u8
    }
}

impl Sample for u16 {
    const BYTES: usize = 2;

    #[inline]
    fn to_u32(self) -> u32 {
        u32::from(self)
    }

    #[inline]
    fn from_u32(value: u32) -> Self {
        value as u16
    }
}

/// Read-only sample view of one plane.
pub struct PlaneView<'a, T: Sample> {
    samples: &'a [T],
    width: usize,
    height: usize,
    /// Row stride in samples (byte stride / sample size).
    stride: usize,
}

impl<'a, T: Sample> PlaneView<'a, T> {
    /// Build a view of `plane` within `frame`.
    ///
    /// # Errors
    ///
    /// Fails if the plane index is out of range, if `T` does not match the
    /// frame's bytes-per-sample, or if the stride is not sample-divisible.
    pub fn new(frame: &'a Frame, plane: usize) -> Result<Self> {
        let (width, height, stride) = checked_layout::<T>(frame, plane)?;
        let samples = bytemuck::cast_slice(frame.plane_data(plane)?);
        Ok(PlaneView {
            samples,
            width,
            height,
            stride,
        })
    }

    /// Plane width in samples.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Plane height in rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row stride in samples.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// One row of samples, padding excluded.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: usize) -> &[T] {
        let start = y * self.stride;
        &self.samples[start..start + self.width]
    }

    /// Single sample at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.row(y)[x]
    }

    /// Copy the plane into a tightly packed row-major vector.
    ///
    /// Used by algorithms that need a contiguous `width * height` grid;
    /// the packed width differs from the stride whenever rows carry
    /// padding.
    pub fn to_packed(&self) -> Vec<T> {
        let mut packed = Vec::with_capacity(self.width * self.height);
        for y in 0..self.height {
            packed.extend_from_slice(self.row(y));
        }
        packed
    }
}

/// Write-only sample view of one plane.
///
/// Read and write views never alias one plane: a filter reads its input
/// frame and writes a freshly allocated output frame.
pub struct PlaneViewMut<'a, T: Sample> {
    samples: &'a mut [T],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a, T: Sample> PlaneViewMut<'a, T> {
    /// Build a mutable view of `plane` within `frame`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`PlaneView::new`].
    pub fn new(frame: &'a mut Frame, plane: usize) -> Result<Self> {
        let (width, height, stride) = checked_layout::<T>(frame, plane)?;
        let samples = bytemuck::cast_slice_mut(frame.plane_data_mut(plane)?);
        Ok(PlaneViewMut {
            samples,
            width,
            height,
            stride,
        })
    }

    /// Plane width in samples.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Plane height in rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row stride in samples.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// One mutable row of samples, padding excluded.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        let start = y * self.stride;
        &mut self.samples[start..start + self.width]
    }

    /// Write a single sample at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if out of bounds.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        self.row_mut(y)[x] = value;
    }

    /// Copy a tightly packed row-major grid back into the strided plane.
    ///
    /// Inverse of [`PlaneView::to_packed`]; `packed` must hold exactly
    /// `width * height` samples.
    pub fn copy_from_packed(&mut self, packed: &[T]) {
        debug_assert_eq!(packed.len(), self.width * self.height);
        for y in 0..self.height {
            let width = self.width;
            self.row_mut(y).copy_from_slice(&packed[y * width..(y + 1) * width]);
        }
    }
}

/// Validate sample width and stride, returning (width, height, stride) in
/// sample units.
fn checked_layout<T: Sample>(frame: &Frame, plane: usize) -> Result<(usize, usize, usize)> {
    let bytes = frame.format().bytes_per_sample() as usize;
    if bytes != T::BYTES {
        return Err(Error::SampleWidthMismatch {
            expected: T::BYTES,
            actual: bytes,
        });
    }
    let stride_bytes = frame.stride_bytes(plane)?;
    if stride_bytes % T::BYTES != 0 {
        return Err(Error::MisalignedStride {
            stride: stride_bytes,
            bytes: T::BYTES,
        });
    }
    Ok((
        frame.plane_width(plane)? as usize,
        frame.plane_height(plane)? as usize,
        stride_bytes / T::BYTES,
    ))
}
