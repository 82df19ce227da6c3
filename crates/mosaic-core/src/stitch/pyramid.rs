//! Box-filtered 2x image pyramids for coarse-to-fine registration.

use ndarray::Array2;

use crate::consts::MIN_OVERLAP_SIDE;

/// Number of 2x reductions needed before the larger side of either image
/// fits within `max_dim`.
///
/// Stops early rather than shrinking any side below `2 * MIN_OVERLAP_SIDE`.
pub fn level_count(a: (usize, usize), b: (usize, usize), max_dim: usize) -> usize {
    let max_dim = max_dim.max(1);
    let mut largest = a.0.max(a.1).max(b.0).max(b.1);
    let mut smallest = a.0.min(a.1).min(b.0).min(b.1);
    let mut levels = 0;

    while largest > max_dim && smallest / 2 >= 2 * MIN_OVERLAP_SIDE {
        largest = largest.div_ceil(2);
        smallest /= 2;
        levels += 1;
    }

    levels
}

/// Build a pyramid with `levels` reduced levels.
///
/// Index 0 is the original resolution, index `levels` the coarsest.
pub fn build_pyramid(data: &Array2<f32>, levels: usize) -> Vec<Array2<f32>> {
    let mut pyramid = Vec::with_capacity(levels + 1);
    pyramid.push(data.clone());

    for level in 0..levels {
        let reduced = downsample_2x(&pyramid[level]);
        pyramid.push(reduced);
    }

    pyramid
}

/// Halve both dimensions by averaging 2x2 blocks. A trailing odd row or
/// column is dropped.
pub fn downsample_2x(data: &Array2<f32>) -> Array2<f32> {
    let (h, w) = data.dim();
    let new_h = (h / 2).max(1);
    let new_w = (w / 2).max(1);
    let mut result = Array2::<f32>::zeros((new_h, new_w));

    for r in 0..new_h {
        for c in 0..new_w {
            let r0 = (r * 2).min(h - 1);
            let r1 = (r * 2 + 1).min(h - 1);
            let c0 = (c * 2).min(w - 1);
            let c1 = (c * 2 + 1).min(w - 1);
            result[[r, c]] =
                0.25 * (data[[r0, c0]] + data[[r0, c1]] + data[[r1, c0]] + data[[r1, c1]]);
        }
    }

    result
}
