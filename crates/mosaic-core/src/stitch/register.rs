//! Pairwise translation registration.
//!
//! Offsets are found by maximizing the normalized cross-correlation (NCC)
//! of the overlapping region. The search is exhaustive at the coarsest
//! pyramid level and refined in a small window at every finer level, so
//! displacements of any size (including barely overlapping pairs) are
//! handled without the wrap-around ambiguity of FFT-based correlation.

use ndarray::{s, Array2, Zip};
use rayon::prelude::*;
use tracing::debug;

use crate::consts::{
    MIN_OVERLAP_SIDE, MIN_OVERLAP_VARIANCE, PARALLEL_CANDIDATE_THRESHOLD, REFINE_RADIUS,
};
use crate::frame::{ImageOffset, Registration};
use crate::pipeline::config::RegistrationConfig;

use super::pyramid::{build_pyramid, level_count};

/// Overlap of `moving` placed at `offset` inside `reference`'s frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Overlap {
    x0: usize,
    y0: usize,
    width: usize,
    height: usize,
}

fn overlap(
    reference: (usize, usize),
    moving: (usize, usize),
    offset: ImageOffset,
) -> Option<Overlap> {
    let (rh, rw) = (reference.0 as i64, reference.1 as i64);
    let (mh, mw) = (moving.0 as i64, moving.1 as i64);

    let x0 = offset.dx.max(0);
    let x1 = (offset.dx + mw).min(rw);
    let y0 = offset.dy.max(0);
    let y1 = (offset.dy + mh).min(rh);

    if x1 <= x0 || y1 <= y0 {
        return None;
    }

    Some(Overlap {
        x0: x0 as usize,
        y0: y0 as usize,
        width: (x1 - x0) as usize,
        height: (y1 - y0) as usize,
    })
}

/// NCC of the overlap at `offset`, or `None` if the overlap is too small.
///
/// A textureless overlap scores 0.
fn score_offset(
    reference: &Array2<f32>,
    moving: &Array2<f32>,
    offset: ImageOffset,
    min_overlap_fraction: f32,
) -> Option<f32> {
    let ov = overlap(reference.dim(), moving.dim(), offset)?;
    if ov.width < MIN_OVERLAP_SIDE || ov.height < MIN_OVERLAP_SIDE {
        return None;
    }

    let (rh, rw) = reference.dim();
    let (mh, mw) = moving.dim();
    let smaller_area = (rh * rw).min(mh * mw) as f64;
    let area = (ov.width * ov.height) as f64;
    if area < min_overlap_fraction as f64 * smaller_area {
        return None;
    }

    let mx0 = (ov.x0 as i64 - offset.dx) as usize;
    let my0 = (ov.y0 as i64 - offset.dy) as usize;
    let ref_view = reference.slice(s![ov.y0..ov.y0 + ov.height, ov.x0..ov.x0 + ov.width]);
    let mov_view = moving.slice(s![my0..my0 + ov.height, mx0..mx0 + ov.width]);

    let (mut sum_r, mut sum_m, mut sum_rr, mut sum_mm, mut sum_rm) = (0.0, 0.0, 0.0, 0.0, 0.0);
    Zip::from(&ref_view).and(&mov_view).for_each(|&r, &m| {
        let (r, m) = (r as f64, m as f64);
        sum_r += r;
        sum_m += m;
        sum_rr += r * r;
        sum_mm += m * m;
        sum_rm += r * m;
    });

    let mean_r = sum_r / area;
    let mean_m = sum_m / area;
    let var_r = sum_rr / area - mean_r * mean_r;
    let var_m = sum_mm / area - mean_m * mean_m;
    if var_r < MIN_OVERLAP_VARIANCE || var_m < MIN_OVERLAP_VARIANCE {
        return Some(0.0);
    }

    let cov = sum_rm / area - mean_r * mean_m;
    Some((cov / (var_r * var_m).sqrt()).clamp(-1.0, 1.0) as f32)
}

/// Total order used to pick the best candidate: highest score, then the
/// smallest displacement. Makes parallel reduction deterministic.
fn pick_better(a: Registration, b: Registration) -> Registration {
    if a.score > b.score {
        return a;
    }
    if b.score > a.score {
        return b;
    }
    let key = |r: &Registration| (r.offset.dx.abs() + r.offset.dy.abs(), r.offset.dy, r.offset.dx);
    if key(&a) <= key(&b) {
        a
    } else {
        b
    }
}

/// Best offset among `dx_range` x `dy_range`.
fn search_window(
    reference: &Array2<f32>,
    moving: &Array2<f32>,
    dx_range: (i64, i64),
    dy_range: (i64, i64),
    min_overlap_fraction: f32,
) -> Option<Registration> {
    let best_in_row = |dy: i64| -> Option<Registration> {
        (dx_range.0..=dx_range.1)
            .filter_map(|dx| {
                let offset = ImageOffset::new(dx, dy);
                score_offset(reference, moving, offset, min_overlap_fraction)
                    .map(|score| Registration { offset, score })
            })
            .reduce(pick_better)
    };

    let rows: Vec<i64> = (dy_range.0..=dy_range.1).collect();
    if rows.len() >= PARALLEL_CANDIDATE_THRESHOLD {
        rows.par_iter()
            .filter_map(|&dy| best_in_row(dy))
            .reduce_with(pick_better)
    } else {
        rows.iter().filter_map(|&dy| best_in_row(dy)).reduce(pick_better)
    }
}

/// Exhaustive search over every offset that leaves some overlap.
pub fn search_exhaustive(
    reference: &Array2<f32>,
    moving: &Array2<f32>,
    min_overlap_fraction: f32,
) -> Option<Registration> {
    let (rh, rw) = reference.dim();
    let (mh, mw) = moving.dim();
    search_window(
        reference,
        moving,
        (1 - mw as i64, rw as i64 - 1),
        (1 - mh as i64, rh as i64 - 1),
        min_overlap_fraction,
    )
}

/// Search within `radius` pixels of `center`.
pub fn refine(
    reference: &Array2<f32>,
    moving: &Array2<f32>,
    center: ImageOffset,
    radius: i64,
    min_overlap_fraction: f32,
) -> Option<Registration> {
    search_window(
        reference,
        moving,
        (center.dx - radius, center.dx + radius),
        (center.dy - radius, center.dy + radius),
        min_overlap_fraction,
    )
}

/// Estimate the translation of `moving` relative to `reference`.
///
/// Returns `None` when no offset satisfies the overlap constraints. The
/// caller decides whether the returned score is good enough.
pub fn register_pair(
    reference: &Array2<f32>,
    moving: &Array2<f32>,
    config: &RegistrationConfig,
) -> Option<Registration> {
    let levels = level_count(reference.dim(), moving.dim(), config.max_search_dim);
    let ref_pyramid = build_pyramid(reference, levels);
    let mov_pyramid = build_pyramid(moving, levels);

    let mut best = search_exhaustive(
        &ref_pyramid[levels],
        &mov_pyramid[levels],
        config.min_overlap_fraction,
    )?;
    debug!(
        level = levels,
        dx = best.offset.dx,
        dy = best.offset.dy,
        score = best.score,
        "Coarse registration"
    );

    for level in (0..levels).rev() {
        best = refine(
            &ref_pyramid[level],
            &mov_pyramid[level],
            best.offset.doubled(),
            REFINE_RADIUS,
            config.min_overlap_fraction,
        )?;
    }

    debug!(
        dx = best.offset.dx,
        dy = best.offset.dy,
        score = best.score,
        "Registered pair"
    );
    Some(best)
}
