//! Deterministic synthetic frame builders
//!
//! Each builder fills every plane of the frame through the generic plane
//! views, so subsampled chroma planes get the same pattern at their own
//! geometry. Values are produced modulo the format's sample range.

use histeq_core::{Frame, PlaneViewMut, Sample, VideoFormat};
use rand::{RngExt, SeedableRng};

/// Fill every plane of a zeroed frame from a (plane, x, y) -> value map.
fn build_frame(format: VideoFormat, width: u32, height: u32, f: impl Fn(usize, usize, usize) -> u32) -> Frame {
    let mut frame = Frame::new(format, width, height).expect("valid test geometry");
    for plane in 0..frame.num_planes() {
        match format.bytes_per_sample() {
            1 => fill_plane::<u8>(&mut frame, plane, &f),
            _ => fill_plane::<u16>(&mut frame, plane, &f),
        }
    }
    frame
}

fn fill_plane<T: Sample>(frame: &mut Frame, plane: usize, f: &impl Fn(usize, usize, usize) -> u32) {
    let peak = frame.format().peak();
    let mut view = PlaneViewMut::<T>::new(frame, plane).expect("matching sample width");
    for y in 0..view.height() {
        let row = view.row_mut(y);
        for (x, s) in row.iter_mut().enumerate() {
            *s = T::from_u32(f(plane, x, y).min(peak));
        }
    }
}

/// Every sample equals `value` (clamped to the format's peak).
pub fn flat_frame(format: VideoFormat, width: u32, height: u32, value: u32) -> Frame {
    build_frame(format, width, height, |_, _, _| value)
}

/// Samples increase left to right: `x` modulo the sample range.
///
/// A `1 x 2^bits` gray frame yields every value exactly once.
pub fn ramp_frame(format: VideoFormat, width: u32, height: u32) -> Frame {
    let bins = 1u32 << format.bits_per_sample();
    build_frame(format, width, height, move |_, x, _| x as u32 % bins)
}

/// A diagonal gradient with plenty of distinct values per region.
pub fn gradient_frame(format: VideoFormat, width: u32, height: u32) -> Frame {
    let bins = 1u32 << format.bits_per_sample();
    build_frame(format, width, height, move |_, x, y| {
        (x as u32 * 4 + y as u32 * 7) % bins
    })
}

/// Strong local contrast: a dark left half and a bright right half, each
/// carrying small deterministic variation.
///
/// `low` and `high` are the half bases; variation spans 20 values above
/// each base. Good for separating adaptive from global equalization.
pub fn bimodal_frame(format: VideoFormat, width: u32, height: u32, low: u32, high: u32) -> Frame {
    build_frame(format, width, height, move |_, x, y| {
        let base = if (x as u32) < width / 2 { low } else { high };
        base + ((x as u32 * 13 + y as u32 * 7) % 20)
    })
}

/// Uniform pseudo-random samples over the full range, seeded.
pub fn noise_frame(format: VideoFormat, width: u32, height: u32, seed: u64) -> Frame {
    let peak = format.peak();
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut frame = Frame::new(format, width, height).expect("valid test geometry");
    for plane in 0..frame.num_planes() {
        match format.bytes_per_sample() {
            1 => noise_plane::<u8>(&mut frame, plane, peak, &mut rng),
            _ => noise_plane::<u16>(&mut frame, plane, peak, &mut rng),
        }
    }
    frame
}

fn noise_plane<T: Sample>(
    frame: &mut Frame,
    plane: usize,
    peak: u32,
    rng: &mut rand::rngs::StdRng,
) {
    let mut view = PlaneViewMut::<T>::new(frame, plane).expect("matching sample width");
    for y in 0..view.height() {
        for s in view.row_mut(y) {
            *s = T::from_u32(rng.random_range(0..=peak));
        }
    }
}
