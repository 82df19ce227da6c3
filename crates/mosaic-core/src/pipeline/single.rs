use std::path::Path;

use image::RgbImage;
use tracing::info;

use crate::error::Result;
use crate::io::{load_images_strict, save_image};
use crate::stitch::{StitchMode, Stitcher};

use super::directory::stitch_or_fail;

/// Stage name attached to stitch errors of the single-stage flow.
pub const SINGLE_STAGE: &str = "input images";

/// Load `paths`, stitch them once and write the composite to `output`.
///
/// Every image is decoded before the stitcher is called; the first
/// unreadable file aborts with a `Decode` error naming it.
pub fn run_single_stitch<P: AsRef<Path>>(
    paths: &[P],
    mode: StitchMode,
    output: &Path,
    stitcher: &dyn Stitcher,
) -> Result<RgbImage> {
    let images = load_images_strict(paths)?;
    info!(
        images = images.len(),
        mode = %mode,
        backend = stitcher.name(),
        "Stitching"
    );

    let pano = stitch_or_fail(stitcher, &images, mode, SINGLE_STAGE)?;
    save_image(&pano, output)?;
    info!(
        output = %output.display(),
        width = pano.width(),
        height = pano.height(),
        "Saved composite"
    );
    Ok(pano)
}
