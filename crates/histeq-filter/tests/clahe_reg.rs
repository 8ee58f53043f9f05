//! Adaptive equalization regression tests
//!
//! Checks the tiled engine's integration contract on synthetic frames:
//! strided buffers round-trip through the pack/unpack copies, tile grids
//! cover non-divisible planes, and the contrast-limited output behaves
//! differently from global equalization where local contrast demands it.

use histeq_core::{Frame, PlaneView, PlaneViewMut, VideoFormat};
use histeq_filter::{ClaheOptions, clahe_plane, equalize_plane};
use histeq_test::{bimodal_frame, flat_frame, gradient_frame, noise_frame};

fn clahe8(frame: &Frame, options: &ClaheOptions) -> Vec<u8> {
    let mut out = Frame::new_like(frame);
    let src = PlaneView::<u8>::new(frame, 0).unwrap();
    let mut dst = PlaneViewMut::<u8>::new(&mut out, 0).unwrap();
    clahe_plane(&src, &mut dst, 8, options).unwrap();
    drop(dst);
    PlaneView::<u8>::new(&out, 0).unwrap().to_packed()
}

#[test]
fn clahe_reg_strided_round_trip() {
    // Width 30 leaves two padding bytes per 32-byte row; the pack and
    // unpack copies must not smear samples into the padding.
    let format = VideoFormat::gray(8).unwrap();
    let frame = gradient_frame(format, 30, 11);

    let mut out = Frame::new_like(&frame);
    let src = PlaneView::<u8>::new(&frame, 0).unwrap();
    let mut dst = PlaneViewMut::<u8>::new(&mut out, 0).unwrap();
    clahe_plane(&src, &mut dst, 8, &ClaheOptions::default()).unwrap();
    drop(dst);

    let packed = PlaneView::<u8>::new(&out, 0).unwrap().to_packed();
    assert_eq!(packed.len(), 30 * 11);
    assert!(packed.iter().any(|&s| s != packed[0]));

    // The unpack copy wrote only the 30 samples of each row; the two
    // padding bytes per row are still zero-initialized.
    let stride = out.stride_bytes(0).unwrap();
    let raw = out.plane_data(0).unwrap();
    for y in 0..11 {
        assert_eq!(&raw[y * stride + 30..(y + 1) * stride], &[0u8; 2]);
    }
}

#[test]
fn clahe_reg_non_divisible_grid() {
    // 25x17 with a 3x3 grid: edge tiles absorb the remainder; the whole
    // plane is covered and geometry is preserved.
    let format = VideoFormat::gray(8).unwrap();
    let frame = noise_frame(format, 25, 17, 5);
    let out = clahe8(&frame, &ClaheOptions::default());
    assert_eq!(out.len(), 25 * 17);
}

#[test]
fn clahe_reg_matches_range_bounds_of_global() {
    // Output samples stay within [0, peak], the same bounds global
    // equalization guarantees.
    let format = VideoFormat::gray(8).unwrap();
    let frame = bimodal_frame(format, 48, 24, 20, 210);

    let adaptive = clahe8(&frame, &ClaheOptions::default());

    let mut out = Frame::new_like(&frame);
    let src = PlaneView::<u8>::new(&frame, 0).unwrap();
    let mut dst = PlaneViewMut::<u8>::new(&mut out, 0).unwrap();
    equalize_plane(&src, &mut dst, 8).unwrap();
    drop(dst);
    let global = PlaneView::<u8>::new(&out, 0).unwrap().to_packed();

    assert_ne!(adaptive, global);
    // Both transforms land in the same sample range.
    assert!(adaptive.iter().all(|&s| s <= 255));
    assert!(global.iter().all(|&s| s <= 255));
}

#[test]
fn clahe_reg_local_contrast_beats_global_in_dark_half() {
    // In the dark half of a bimodal frame, adaptive equalization spreads
    // the 20-value variation much wider than global equalization can.
    let format = VideoFormat::gray(8).unwrap();
    let frame = bimodal_frame(format, 64, 32, 30, 200);

    let adaptive = clahe8(
        &frame,
        &ClaheOptions {
            clip_limit: 40.0,
            tile_grid: 4,
        },
    );

    let mut out = Frame::new_like(&frame);
    let src = PlaneView::<u8>::new(&frame, 0).unwrap();
    let mut dst = PlaneViewMut::<u8>::new(&mut out, 0).unwrap();
    equalize_plane(&src, &mut dst, 8).unwrap();
    drop(dst);
    let global = PlaneView::<u8>::new(&out, 0).unwrap().to_packed();

    let dark_range = |packed: &[u8]| {
        let mut lo = u8::MAX;
        let mut hi = u8::MIN;
        for y in 0..32 {
            // Stay clear of the boundary, where interpolation mixes the
            // bright half's tiles in.
            for x in 0..16 {
                let s = packed[y * 64 + x];
                lo = lo.min(s);
                hi = hi.max(s);
            }
        }
        hi - lo
    };

    assert!(
        dark_range(&adaptive) > dark_range(&global),
        "adaptive {} vs global {}",
        dark_range(&adaptive),
        dark_range(&global)
    );
}

#[test]
fn clahe_reg_flat_plane_stays_flat() {
    let format = VideoFormat::gray(8).unwrap();
    let frame = flat_frame(format, 20, 20, 64);
    let out = clahe8(&frame, &ClaheOptions::default());
    let first = out[0];
    assert!(out.iter().all(|&s| s == first));
}

#[test]
fn clahe_reg_sixteen_bit_plane() {
    let format = VideoFormat::gray(16).unwrap();
    let frame = noise_frame(format, 24, 18, 11);
    let mut out = Frame::new_like(&frame);
    let src = PlaneView::<u16>::new(&frame, 0).unwrap();
    let mut dst = PlaneViewMut::<u16>::new(&mut out, 0).unwrap();
    clahe_plane(&src, &mut dst, 16, &ClaheOptions::default()).unwrap();
    drop(dst);

    let packed = PlaneView::<u16>::new(&out, 0).unwrap().to_packed();
    assert_eq!(packed.len(), 24 * 18);
}
