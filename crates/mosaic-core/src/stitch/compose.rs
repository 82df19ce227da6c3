//! Canvas layout and compositing of registered images.

use image::RgbImage;
use rayon::prelude::*;

use crate::consts::{COLOR_CHANNEL_COUNT, EPSILON};
use crate::frame::{ImageOffset, Placement};

use super::types::StitchMode;

/// Canvas size and per-image placements for images at absolute `positions`.
///
/// `sizes` are `(width, height)` pairs. Positions may be negative; the
/// layout is shifted so the top-left-most image edge lands at 0.
pub fn layout(sizes: &[(u32, u32)], positions: &[ImageOffset]) -> (u64, u64, Vec<Placement>) {
    debug_assert_eq!(sizes.len(), positions.len());
    if sizes.is_empty() {
        return (0, 0, Vec::new());
    }

    let min_x = positions.iter().map(|p| p.dx).min().unwrap_or(0);
    let min_y = positions.iter().map(|p| p.dy).min().unwrap_or(0);
    let max_x = sizes
        .iter()
        .zip(positions)
        .map(|(&(w, _), p)| p.dx + w as i64)
        .max()
        .unwrap_or(0);
    let max_y = sizes
        .iter()
        .zip(positions)
        .map(|(&(_, h), p)| p.dy + h as i64)
        .max()
        .unwrap_or(0);

    let placements = sizes
        .iter()
        .zip(positions)
        .map(|(&(width, height), p)| Placement {
            x: (p.dx - min_x) as u32,
            y: (p.dy - min_y) as u32,
            width,
            height,
        })
        .collect();

    ((max_x - min_x) as u64, (max_y - min_y) as u64, placements)
}

/// Feathering weight: distance (in pixels) to the nearest image border.
fn feather_weight(row: u32, col: u32, width: u32, height: u32) -> f32 {
    let dy = (row + 1).min(height - row);
    let dx = (col + 1).min(width - col);
    dx.min(dy) as f32
}

/// Composite `images` onto a `width` x `height` canvas.
///
/// Panorama mode feathers overlapping pixels by distance to each image's
/// border. Scans mode pastes images in order, later ones on top. Uncovered
/// canvas pixels are black.
pub fn compose(
    images: &[RgbImage],
    placements: &[Placement],
    width: u32,
    height: u32,
    mode: StitchMode,
) -> RgbImage {
    match mode {
        StitchMode::Panorama => compose_feathered(images, placements, width, height),
        StitchMode::Scans => compose_overwrite(images, placements, width, height),
    }
}

/// Feathered blend, one canvas row at a time. Only a row-sized
/// accumulator is live per worker, so memory stays at the output size.
fn compose_feathered(
    images: &[RgbImage],
    placements: &[Placement],
    width: u32,
    height: u32,
) -> RgbImage {
    let mut out = RgbImage::new(width, height);
    let row_len = width as usize * COLOR_CHANNEL_COUNT;
    if row_len == 0 {
        return out;
    }

    out.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| blend_row(images, placements, y as u32, row));
    out
}

fn blend_row(images: &[RgbImage], placements: &[Placement], y: u32, row: &mut [u8]) {
    let mut accum = vec![0.0f32; row.len()];
    let mut weights = vec![0.0f32; row.len() / COLOR_CHANNEL_COUNT];

    for (img, place) in images.iter().zip(placements) {
        if y < place.y || y >= place.y + place.height {
            continue;
        }
        let src_row = y - place.y;
        for col in 0..place.width {
            let weight = feather_weight(src_row, col, place.width, place.height);
            let pixel = img.get_pixel(col, src_row);
            let cx = (place.x + col) as usize;
            for ch in 0..COLOR_CHANNEL_COUNT {
                accum[cx * COLOR_CHANNEL_COUNT + ch] += weight * pixel.0[ch] as f32;
            }
            weights[cx] += weight;
        }
    }

    for (cx, &weight) in weights.iter().enumerate() {
        if weight > EPSILON {
            for ch in 0..COLOR_CHANNEL_COUNT {
                let i = cx * COLOR_CHANNEL_COUNT + ch;
                row[i] = (accum[i] / weight).round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}

fn compose_overwrite(
    images: &[RgbImage],
    placements: &[Placement],
    width: u32,
    height: u32,
) -> RgbImage {
    let mut out = RgbImage::new(width, height);
    for (img, place) in images.iter().zip(placements) {
        for (col, row, pixel) in img.enumerate_pixels() {
            out.put_pixel(place.x + col, place.y + row, *pixel);
        }
    }
    out
}
