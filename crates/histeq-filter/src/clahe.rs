//! Contrast-limited adaptive histogram equalization
//!
//! The plane is partitioned into a regular grid of tiles; each tile gets
//! its own clipped-histogram lookup table, and every pixel is remapped
//! through a bilinear blend of the four tile LUTs whose centers surround
//! it. Clipping caps any bin at `clip_limit * tile_area / bins` and
//! redistributes the excess evenly, which bounds how much local contrast
//! a single dominant intensity can claim.
//!
//! The engine works on a tightly packed copy of the plane: host frames
//! carry row padding, and the pack/unpack copies at the boundary keep the
//! tile arithmetic free of stride handling.

use crate::error::{FilterError, FilterResult};
use histeq_core::{PlaneView, PlaneViewMut, Sample};

/// Clip limit applied when the host supplies none.
pub const DEFAULT_CLIP_LIMIT: f64 = 7.0;

/// Tile grid dimension applied when the host supplies none.
pub const DEFAULT_TILE_GRID: u32 = 3;

/// Tiled-equalization parameters.
///
/// `tile_grid` counts tiles, not pixels: a value of 3 partitions the
/// plane into a 3x3 grid, with per-tile pixel extents derived by dividing
/// the plane dimensions (edge tiles absorb the remainder). A grid larger
/// than a plane dimension is clamped so every tile keeps at least one
/// pixel row and column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClaheOptions {
    /// Soft cap on a tile-histogram bin, as a multiple of the uniform
    /// bin count `tile_area / bins`. Non-positive disables clipping.
    pub clip_limit: f64,
    /// Tile count along each plane dimension.
    pub tile_grid: u32,
}

impl Default for ClaheOptions {
    fn default() -> Self {
        ClaheOptions {
            clip_limit: DEFAULT_CLIP_LIMIT,
            tile_grid: DEFAULT_TILE_GRID,
        }
    }
}

/// Per-coordinate blend: the two tile indices along one axis and the
/// interpolation weight between their centers.
struct AxisBlend {
    lo: usize,
    hi: usize,
    t: f32,
}

/// Tile boundaries along one axis: `bounds[i]..bounds[i+1]` is tile `i`.
fn tile_bounds(len: usize, grid: usize) -> Vec<usize> {
    (0..=grid).map(|i| i * len / grid).collect()
}

/// Precompute the blend for every coordinate along one axis.
///
/// Pixels left of the first tile center (or right of the last) clamp to
/// that center, degenerating the blend to a single-tile lookup at the
/// plane border.
fn axis_blend(len: usize, grid: usize) -> Vec<AxisBlend> {
    let bounds = tile_bounds(len, grid);
    let centers: Vec<f32> = (0..grid)
        .map(|i| (bounds[i] + bounds[i + 1]) as f32 * 0.5)
        .collect();

    let mut blend = Vec::with_capacity(len);
    let mut tile = 0usize;
    for p in 0..len {
        while p >= bounds[tile + 1] {
            tile += 1;
        }
        let pos = p as f32 + 0.5;
        let (lo, hi) = if pos < centers[tile] {
            (tile.saturating_sub(1), tile)
        } else {
            (tile, (tile + 1).min(grid - 1))
        };
        let t = if lo == hi {
            0.0
        } else {
            ((pos - centers[lo]) / (centers[hi] - centers[lo])).clamp(0.0, 1.0)
        };
        blend.push(AxisBlend { lo, hi, t });
    }
    blend
}

/// Cap bins at `clip` and spread the excess evenly across all bins,
/// remainder one count per bin from bin 0.
fn clip_histogram(hist: &mut [u32], clip: u32) {
    let mut excess = 0u64;
    for bin in hist.iter_mut() {
        if *bin > clip {
            excess += u64::from(*bin - clip);
            *bin = clip;
        }
    }
    if excess == 0 {
        return;
    }

    let bins = hist.len() as u64;
    let per_bin = (excess / bins) as u32;
    let remainder = (excess % bins) as usize;
    for (i, bin) in hist.iter_mut().enumerate() {
        *bin += per_bin;
        if i < remainder {
            *bin += 1;
        }
    }
}

/// Build one tile's LUT from its clipped histogram.
fn tile_lut<T: Sample>(
    packed: &[T],
    plane_width: usize,
    x_range: (usize, usize),
    y_range: (usize, usize),
    bins: usize,
    peak: u32,
    clip_limit: f64,
) -> Vec<u32> {
    let (x0, x1) = x_range;
    let (y0, y1) = y_range;
    let area = ((x1 - x0) * (y1 - y0)) as u64;

    let mut hist = vec![0u32; bins];
    for y in y0..y1 {
        let row = &packed[y * plane_width..y * plane_width + plane_width];
        for &s in &row[x0..x1] {
            hist[s.to_u32().min(peak) as usize] += 1;
        }
    }

    if clip_limit > 0.0 {
        let clip = ((clip_limit * area as f64 / bins as f64) as u64).max(1) as u32;
        clip_histogram(&mut hist, clip);
    }

    let scale = peak as f32 / area as f32;
    let mut lut = vec![0u32; bins];
    let mut sum = 0u64;
    for (entry, &count) in lut.iter_mut().zip(&hist) {
        sum += u64::from(count);
        *entry = (sum as f32 * scale).round() as u32;
    }
    lut
}

/// Equalize one plane adaptively.
///
/// Copies the strided plane into a packed grid, derives one clipped LUT
/// per tile, remaps every pixel through the bilinear blend of its four
/// surrounding tile LUTs, and copies the packed result back into the
/// strided destination.
///
/// # Errors
///
/// Returns [`FilterError::DimensionMismatch`] if `src` and `dst` differ
/// in geometry, or [`FilterError::InvalidParameters`] for a zero tile
/// grid.
pub fn clahe_plane<T: Sample>(
    src: &PlaneView<'_, T>,
    dst: &mut PlaneViewMut<'_, T>,
    bits: u32,
    options: &ClaheOptions,
) -> FilterResult<()> {
    if src.width() != dst.width() || src.height() != dst.height() {
        return Err(FilterError::DimensionMismatch {
            src_width: src.width(),
            src_height: src.height(),
            dst_width: dst.width(),
            dst_height: dst.height(),
        });
    }
    if options.tile_grid == 0 {
        return Err(FilterError::InvalidParameters(
            "tile grid must hold at least one tile".to_string(),
        ));
    }

    let (w, h) = (src.width(), src.height());
    if w == 0 || h == 0 {
        return Ok(());
    }

    let bins = 1usize << bits;
    let peak = (bins - 1) as u32;

    let packed = src.to_packed();

    // Every tile keeps at least one pixel in each dimension.
    let grid_x = (options.tile_grid as usize).min(w);
    let grid_y = (options.tile_grid as usize).min(h);

    let x_bounds = tile_bounds(w, grid_x);
    let y_bounds = tile_bounds(h, grid_y);

    let mut luts = Vec::with_capacity(grid_x * grid_y);
    for ty in 0..grid_y {
        for tx in 0..grid_x {
            luts.push(tile_lut(
                &packed,
                w,
                (x_bounds[tx], x_bounds[tx + 1]),
                (y_bounds[ty], y_bounds[ty + 1]),
                bins,
                peak,
                options.clip_limit,
            ));
        }
    }

    let x_blend = axis_blend(w, grid_x);
    let y_blend = axis_blend(h, grid_y);

    let mut out = Vec::with_capacity(w * h);
    for y in 0..h {
        let yb = &y_blend[y];
        for x in 0..w {
            let xb = &x_blend[x];
            let v = packed[y * w + x].to_u32().min(peak) as usize;

            let v00 = luts[yb.lo * grid_x + xb.lo][v] as f32;
            let v10 = luts[yb.lo * grid_x + xb.hi][v] as f32;
            let v01 = luts[yb.hi * grid_x + xb.lo][v] as f32;
            let v11 = luts[yb.hi * grid_x + xb.hi][v] as f32;

            let top = v00 + (v10 - v00) * xb.t;
            let bottom = v01 + (v11 - v01) * xb.t;
            let value = top + (bottom - top) * yb.t;

            out.push(T::from_u32(value.round().clamp(0.0, peak as f32) as u32));
        }
    }

    dst.copy_from_packed(&out);
    Ok(())
}
