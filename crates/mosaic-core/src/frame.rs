use image::RgbImage;
use ndarray::Array2;

use crate::consts::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};

/// Integer translation of one image relative to another, in pixels.
///
/// `dx`/`dy` give the position of the moving image's top-left corner in the
/// reference image's coordinate system.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ImageOffset {
    pub dx: i64,
    pub dy: i64,
}

impl ImageOffset {
    pub fn new(dx: i64, dy: i64) -> Self {
        Self { dx, dy }
    }

    /// Offset at the next finer pyramid level.
    pub fn doubled(self) -> Self {
        Self::new(self.dx * 2, self.dy * 2)
    }
}

impl std::ops::Add for ImageOffset {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

/// Outcome of registering a pair of images.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Registration {
    pub offset: ImageOffset,
    /// Normalized cross-correlation of the overlap, in [-1, 1].
    pub score: f32,
}

/// Placement of an image on the composite canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Convert an RGB raster to BT.601 luminance with values in [0.0, 1.0].
pub fn luminance(img: &RgbImage) -> Array2<f32> {
    let (w, h) = img.dimensions();
    let mut data = Array2::<f32>::zeros((h as usize, w as usize));

    for (col, row, pixel) in img.enumerate_pixels() {
        let [r, g, b] = pixel.0;
        data[[row as usize, col as usize]] = (LUMINANCE_R * r as f32
            + LUMINANCE_G * g as f32
            + LUMINANCE_B * b as f32)
            / 255.0;
    }

    data
}
