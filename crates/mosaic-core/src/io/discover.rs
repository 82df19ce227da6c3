//! Image discovery in a single (non-recursive) directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::consts::SUPPORTED_EXTENSIONS;
use crate::error::{MosaicError, Result};

/// Whether `path` carries one of the supported raster extensions (case-insensitive).
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|s| s.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// List the image files directly inside `dir`.
///
/// Subdirectories and files with other extensions are skipped. With `sort`
/// the result is ordered lexicographically; otherwise it follows the
/// filesystem's enumeration order.
pub fn discover_images(dir: &Path, sort: bool) -> Result<Vec<PathBuf>> {
    let read_dir_err = |source| MosaicError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut images = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if is_supported_image(&path) {
            images.push(path);
        }
    }

    if sort {
        images.sort();
    }

    debug!(dir = %dir.display(), count = images.len(), "Discovered images");
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_match_ignores_case() {
        assert!(is_supported_image(Path::new("a.PNG")));
        assert!(is_supported_image(Path::new("dir/b.Jpeg")));
        assert!(is_supported_image(Path::new("c.tif")));
        assert!(!is_supported_image(Path::new("a.txt")));
        assert!(!is_supported_image(Path::new("png")));
        assert!(!is_supported_image(Path::new("archive.png.zip")));
    }
}
