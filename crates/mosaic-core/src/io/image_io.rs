use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage};
use tracing::{debug, warn};

use crate::error::{MosaicError, Result};

/// Decode an image file into an 8-bit RGB raster.
pub fn load_image(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).map_err(|source| MosaicError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let rgb = img.to_rgb8();
    debug!(
        path = %path.display(),
        width = rgb.width(),
        height = rgb.height(),
        "Loaded image"
    );
    Ok(rgb)
}

/// Load every path, skipping files that fail to decode.
pub fn load_images_lenient(paths: &[PathBuf]) -> Vec<RgbImage> {
    paths
        .iter()
        .filter_map(|path| match load_image(path) {
            Ok(img) => Some(img),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable image");
                None
            }
        })
        .collect()
}

/// Load every path, stopping at the first file that fails to decode.
pub fn load_images_strict<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<RgbImage>> {
    paths.iter().map(|p| load_image(p.as_ref())).collect()
}

/// Output format for `path`, chosen from its extension. JPEG when unknown.
pub fn output_format(path: &Path) -> ImageFormat {
    ImageFormat::from_path(path).unwrap_or(ImageFormat::Jpeg)
}

/// Save an RGB raster, choosing the format from the file extension.
pub fn save_image(img: &RgbImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    img.save_with_format(path, output_format(path))
        .map_err(|source| MosaicError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), "Saved image");
    Ok(())
}
