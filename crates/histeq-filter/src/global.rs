//! Global histogram equalization
//!
//! One cumulative-histogram lookup table per plane, applied to every
//! sample. The LUT maps value `v` to `round(cdf(v) * peak / total)`,
//! with the zero bucket pinned to zero output: anchoring the darkest
//! value prevents a disproportionate brightness floor when it is rare in
//! the input.

use crate::error::{FilterError, FilterResult};
use histeq_core::{PlaneView, PlaneViewMut, Sample};

/// Derive the equalization lookup table from a histogram.
///
/// `total` is the number of samples counted into `hist`; `peak` is the
/// maximum output value (`2^bits - 1`). Entries are
/// `round(cumulative * peak / total)`, rounded half away from zero, and
/// `lut[0]` is forced to 0 regardless of the zero bin's population.
///
/// The result is non-decreasing in the input index from entry 1 upward
/// (cumulative sums are non-decreasing and the scale is positive).
pub fn equalize_lut(hist: &[u32], total: u64, peak: u32) -> Vec<u32> {
    let scale = peak as f32 / total as f32;
    let mut lut = vec![0u32; hist.len()];
    let mut sum = 0u64;
    for (entry, &count) in lut.iter_mut().zip(hist) {
        sum += u64::from(count);
        *entry = (sum as f32 * scale).round() as u32;
    }
    lut[0] = 0;
    lut
}

/// Equalize one plane globally.
///
/// Builds the histogram over all `width * height` input samples, derives
/// the LUT via [`equalize_lut`], and remaps every sample into `dst`.
/// Samples above the declared peak (possible when the stored width
/// exceeds the significant bit depth) are clamped on read.
///
/// # Errors
///
/// Returns [`FilterError::DimensionMismatch`] if `src` and `dst` differ
/// in width or height.
pub fn equalize_plane<T: Sample>(
    src: &PlaneView<'_, T>,
    dst: &mut PlaneViewMut<'_, T>,
    bits: u32,
) -> FilterResult<()> {
    if src.width() != dst.width() || src.height() != dst.height() {
        return Err(FilterError::DimensionMismatch {
            src_width: src.width(),
            src_height: src.height(),
            dst_width: dst.width(),
            dst_height: dst.height(),
        });
    }

    let (w, h) = (src.width(), src.height());
    if w == 0 || h == 0 {
        return Ok(());
    }

    let bins = 1usize << bits;
    let peak = (bins - 1) as u32;

    let mut hist = vec![0u32; bins];
    for y in 0..h {
        for &s in src.row(y) {
            hist[s.to_u32().min(peak) as usize] += 1;
        }
    }

    let lut = equalize_lut(&hist, (w as u64) * (h as u64), peak);

    for y in 0..h {
        let src_row = src.row(y);
        for (out, &s) in dst.row_mut(y).iter_mut().zip(src_row) {
            *out = T::from_u32(lut[s.to_u32().min(peak) as usize]);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use histeq_core::{Frame, VideoFormat};

    fn gray8_frame(width: u32, height: u32, samples: &[u8]) -> Frame {
        let mut frame = Frame::new(VideoFormat::gray(8).unwrap(), width, height).unwrap();
        PlaneViewMut::<u8>::new(&mut frame, 0)
            .unwrap()
            .copy_from_packed(samples);
        frame
    }

    fn equalized8(frame: &Frame) -> Vec<u8> {
        let mut out = Frame::new_like(frame);
        let src = PlaneView::<u8>::new(frame, 0).unwrap();
        let mut dst = PlaneViewMut::<u8>::new(&mut out, 0).unwrap();
        equalize_plane(&src, &mut dst, 8).unwrap();
        drop(dst);
        PlaneView::<u8>::new(&out, 0).unwrap().to_packed()
    }

    #[test]
    fn test_flat_plane_maps_to_peak() {
        // 4x4 plane, all samples 100: the single populated bin holds all
        // 16 counts, so lut[100] = round(16 * 255/16) = 255.
        let frame = gray8_frame(4, 4, &[100; 16]);
        let out = equalized8(&frame);
        assert!(out.iter().all(|&s| s == 255), "got {out:?}");
    }

    #[test]
    fn test_ramp_lut_endpoints() {
        // 1x256 ramp, each value once: lut[v] = round((v+1) * 255/256),
        // except the forced zero anchor.
        let samples: Vec<u8> = (0..=255).collect();
        let mut hist = vec![0u32; 256];
        for &s in &samples {
            hist[s as usize] += 1;
        }
        let lut = equalize_lut(&hist, 256, 255);

        assert_eq!(lut[0], 0);
        assert_eq!(lut[255], 255);
        for v in 1..256usize {
            let expected = ((v as f32 + 1.0) * 255.0 / 256.0).round() as u32;
            assert_eq!(lut[v], expected, "lut[{v}]");
        }
    }

    #[test]
    fn test_lut_monotonic_from_one() {
        let mut hist = vec![0u32; 256];
        // Spiky histogram.
        hist[3] = 50;
        hist[10] = 1;
        hist[200] = 949;
        let lut = equalize_lut(&hist, 1000, 255);
        for v in 2..256 {
            assert!(lut[v] >= lut[v - 1], "lut not monotonic at {v}");
        }
    }

    #[test]
    fn test_zero_anchor() {
        // Zero-valued samples dominate; without the anchor lut[0] would
        // be far above 0.
        let mut samples = vec![0u8; 60];
        samples.extend_from_slice(&[200; 4]);
        let frame = gray8_frame(8, 8, &samples);
        let out = equalized8(&frame);
        assert!(out[..60].iter().all(|&s| s == 0));
        assert!(out[60..].iter().all(|&s| s == 255));
    }

    #[test]
    fn test_all_zero_input_stays_zero() {
        let frame = gray8_frame(8, 4, &[0; 32]);
        let out = equalized8(&frame);
        assert!(out.iter().all(|&s| s == 0));
    }

    #[test]
    fn test_deterministic() {
        let samples: Vec<u8> = (0..64u32).map(|i| ((i * 37 + 11) % 256) as u8).collect();
        let frame = gray8_frame(8, 8, &samples);
        assert_eq!(equalized8(&frame), equalized8(&frame));
    }

    #[test]
    fn test_preserves_ordering_of_values() {
        let frame = gray8_frame(5, 1, &[10, 50, 100, 150, 200]);
        let out = equalized8(&frame);
        for i in 1..5 {
            assert!(out[i] >= out[i - 1], "ordering violated at {i}");
        }
    }

    #[test]
    fn test_sixteen_bit_scaling() {
        // 1x4 16-bit plane, all samples 1000: lut[1000] = 65535.
        let mut frame = Frame::new(VideoFormat::gray(16).unwrap(), 4, 1).unwrap();
        PlaneViewMut::<u16>::new(&mut frame, 0)
            .unwrap()
            .copy_from_packed(&[1000; 4]);

        let mut out = Frame::new_like(&frame);
        let src = PlaneView::<u16>::new(&frame, 0).unwrap();
        let mut dst = PlaneViewMut::<u16>::new(&mut out, 0).unwrap();
        equalize_plane(&src, &mut dst, 16).unwrap();
        drop(dst);

        let view = PlaneView::<u16>::new(&out, 0).unwrap();
        assert_eq!(view.row(0), &[65535; 4]);
    }

    #[test]
    fn test_ten_bit_domain_in_two_bytes() {
        // 10-bit samples stored as u16: the LUT spans 1024 bins and the
        // peak is 1023.
        let mut frame = Frame::new(VideoFormat::gray(10).unwrap(), 4, 1).unwrap();
        PlaneViewMut::<u16>::new(&mut frame, 0)
            .unwrap()
            .copy_from_packed(&[512; 4]);

        let mut out = Frame::new_like(&frame);
        let src = PlaneView::<u16>::new(&frame, 0).unwrap();
        let mut dst = PlaneViewMut::<u16>::new(&mut out, 0).unwrap();
        equalize_plane(&src, &mut dst, 10).unwrap();
        drop(dst);

        let view = PlaneView::<u16>::new(&out, 0).unwrap();
        assert_eq!(view.row(0), &[1023; 4]);
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let a = gray8_frame(4, 4, &[0; 16]);
        let mut b = Frame::new(VideoFormat::gray(8).unwrap(), 5, 4).unwrap();
        let src = PlaneView::<u8>::new(&a, 0).unwrap();
        let mut dst = PlaneViewMut::<u8>::new(&mut b, 0).unwrap();
        assert!(equalize_plane(&src, &mut dst, 8).is_err());
    }
}
