#![allow(dead_code)]

use std::path::Path;
use std::sync::Mutex;

use image::{Rgb, RgbImage};

use mosaic_core::io::save_image;
use mosaic_core::stitch::{StitchMode, StitchOutput, StitchStatus, Stitcher};

/// Deterministic per-pixel noise in [0, 1).
fn hash_noise(x: u32, y: u32, seed: u32) -> f32 {
    let mut h = seed.wrapping_mul(2_246_822_519) ^ 0x9E37_79B9;
    h = (h ^ x).wrapping_mul(374_761_393);
    h ^= h >> 15;
    h = (h ^ y).wrapping_mul(668_265_263);
    h ^= h >> 13;
    h = h.wrapping_mul(1_274_126_177);
    h ^= h >> 16;
    h as f32 / u32::MAX as f32
}

/// A textured synthetic scene: smooth waves plus fine noise, so every
/// sub-window is distinguishable at any pyramid level.
pub fn textured_scene(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let waves = 0.5
            + 0.25 * (x as f32 * 0.21).sin() * (y as f32 * 0.17).cos()
            + 0.1 * ((x + 2 * y) as f32 * 0.05).sin();
        let v = (0.6 * waves + 0.4 * hash_noise(x, y, 7)).clamp(0.0, 1.0);
        let r = (v * 255.0) as u8;
        let g = ((1.0 - v) * 200.0 + 20.0) as u8;
        let b = (hash_noise(x, y, 11) * 255.0) as u8;
        Rgb([r, g, b])
    })
}

/// Pure noise image; two different seeds are unrelated scenes.
pub fn noise_image(width: u32, height: u32, seed: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let v = (hash_noise(x, y, seed) * 255.0) as u8;
        Rgb([v, v, v])
    })
}

pub fn flat_image(width: u32, height: u32, value: u8) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb([value, value, value]))
}

/// Copy the `width` x `height` window at (`x`, `y`) out of `img`.
pub fn crop(img: &RgbImage, x: u32, y: u32, width: u32, height: u32) -> RgbImage {
    image::imageops::crop_imm(img, x, y, width, height).to_image()
}

/// Write `images` as numbered PNGs into `dir`.
pub fn write_pngs(dir: &Path, images: &[RgbImage]) {
    std::fs::create_dir_all(dir).expect("create image dir");
    for (i, img) in images.iter().enumerate() {
        save_image(img, &dir.join(format!("img_{i:02}.png"))).expect("write png");
    }
}

/// One recorded call to [`FakeStitcher`].
#[derive(Clone, Debug, PartialEq)]
pub struct StitchCall {
    pub image_count: usize,
    pub widths: Vec<u32>,
    pub mode: StitchMode,
}

/// Stitcher that lays images side by side and can fail on a chosen call.
pub struct FakeStitcher {
    pub calls: Mutex<Vec<StitchCall>>,
    fail_on_call: Option<(usize, StitchStatus)>,
}

impl FakeStitcher {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on_call: None,
        }
    }

    /// Fail the `index`-th call (0-based) with `status`.
    pub fn failing_on(index: usize, status: StitchStatus) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on_call: Some((index, status)),
        }
    }

    pub fn calls(&self) -> Vec<StitchCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Stitcher for FakeStitcher {
    fn name(&self) -> &str {
        "fake"
    }

    fn stitch(&self, images: &[RgbImage], mode: StitchMode) -> StitchOutput {
        let mut calls = self.calls.lock().unwrap();
        let index = calls.len();
        calls.push(StitchCall {
            image_count: images.len(),
            widths: images.iter().map(|i| i.width()).collect(),
            mode,
        });

        if let Some((fail_index, status)) = self.fail_on_call {
            if fail_index == index {
                return StitchOutput::failure(status);
            }
        }
        if images.len() < 2 {
            return StitchOutput::failure(StitchStatus::NeedMoreImages);
        }

        let width = images.iter().map(|i| i.width()).sum();
        let height = images.iter().map(|i| i.height()).max().unwrap_or(1);
        StitchOutput::success(RgbImage::new(width, height))
    }
}
