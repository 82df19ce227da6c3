use image::RgbImage;
use tracing::{debug, info, warn};

use crate::frame::{luminance, ImageOffset};
use crate::pipeline::config::RegistrationConfig;

use super::compose::{compose, layout};
use super::register::register_pair;
use super::types::{StitchMode, StitchOutput, StitchStatus};
use super::Stitcher;

/// Stitcher that chains pairwise translations between consecutive images.
///
/// Each image is registered against its predecessor, so the input order
/// matters: neighbors in the list must overlap.
pub struct TranslationStitcher {
    config: RegistrationConfig,
}

impl TranslationStitcher {
    pub fn new(config: RegistrationConfig) -> Self {
        Self { config }
    }

    /// Absolute position of every image, relative to the first one.
    fn chain_positions(&self, images: &[RgbImage]) -> Result<Vec<ImageOffset>, StitchStatus> {
        let lums: Vec<_> = images.iter().map(luminance).collect();
        let mut positions = Vec::with_capacity(images.len());
        positions.push(ImageOffset::default());

        for (i, pair) in lums.windows(2).enumerate() {
            let Some(reg) = register_pair(&pair[0], &pair[1], &self.config) else {
                warn!(pair = i, "No valid overlap between consecutive images");
                return Err(StitchStatus::HomographyEstFail);
            };
            if reg.score < self.config.min_confidence {
                warn!(
                    pair = i,
                    score = reg.score,
                    min_confidence = self.config.min_confidence,
                    "Registration confidence too low"
                );
                return Err(StitchStatus::HomographyEstFail);
            }
            positions.push(positions[i] + reg.offset);
        }

        Ok(positions)
    }
}

impl Default for TranslationStitcher {
    fn default() -> Self {
        Self::new(RegistrationConfig::default())
    }
}

impl Stitcher for TranslationStitcher {
    fn name(&self) -> &str {
        "translation"
    }

    fn stitch(&self, images: &[RgbImage], mode: StitchMode) -> StitchOutput {
        if images.len() < 2 {
            debug!(count = images.len(), "Not enough images to stitch");
            return StitchOutput::failure(StitchStatus::NeedMoreImages);
        }

        let positions = match self.chain_positions(images) {
            Ok(p) => p,
            Err(status) => return StitchOutput::failure(status),
        };

        let sizes: Vec<_> = images.iter().map(|img| img.dimensions()).collect();
        let (width, height, placements) = layout(&sizes, &positions);
        if width * height > self.config.max_canvas_pixels
            || width > u32::MAX as u64
            || height > u32::MAX as u64
        {
            warn!(
                width,
                height,
                max_pixels = self.config.max_canvas_pixels,
                "Composite canvas too large"
            );
            return StitchOutput::failure(StitchStatus::CameraParamsAdjustFail);
        }

        let pano = compose(images, &placements, width as u32, height as u32, mode);
        info!(
            images = images.len(),
            width,
            height,
            mode = %mode,
            "Stitched composite"
        );
        StitchOutput::success(pano)
    }
}
