use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_DATA_DIR, DEFAULT_GROUPS, DEFAULT_GROUPS_OUTPUT, DEFAULT_MAX_CANVAS_PIXELS,
    DEFAULT_MAX_SEARCH_DIM, DEFAULT_MIN_CONFIDENCE, DEFAULT_MIN_OVERLAP_FRACTION,
};
use crate::error::{MosaicError, Result};
use crate::stitch::StitchMode;

/// Tuning of the translation stitcher.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationConfig {
    /// Minimum overlap between neighbors, as a fraction of the smaller image (0.0..1.0).
    pub min_overlap_fraction: f32,
    /// Minimum NCC score for a pair to be accepted (-1.0..1.0).
    pub min_confidence: f32,
    /// Longest side of the coarsest pyramid level, where the search is exhaustive.
    pub max_search_dim: usize,
    /// Largest composite canvas (width * height) the stitcher will allocate.
    pub max_canvas_pixels: u64,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            min_overlap_fraction: DEFAULT_MIN_OVERLAP_FRACTION,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            max_search_dim: DEFAULT_MAX_SEARCH_DIM,
            max_canvas_pixels: DEFAULT_MAX_CANVAS_PIXELS,
        }
    }
}

impl RegistrationConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_overlap_fraction) {
            return Err(MosaicError::Config(format!(
                "min_overlap_fraction must be in [0, 1], got {}",
                self.min_overlap_fraction
            )));
        }
        if !(-1.0..=1.0).contains(&self.min_confidence) {
            return Err(MosaicError::Config(format!(
                "min_confidence must be in [-1, 1], got {}",
                self.min_confidence
            )));
        }
        if self.max_search_dim == 0 {
            return Err(MosaicError::Config("max_search_dim must be > 0".into()));
        }
        if self.max_canvas_pixels == 0 {
            return Err(MosaicError::Config("max_canvas_pixels must be > 0".into()));
        }
        Ok(())
    }
}

/// Configuration of the directory-driven flow.
///
/// Each entry of `groups` names a subdirectory of `data_dir` whose images are
/// stitched into one composite; the group composites are then stitched
/// together, in order, and written to `output`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupsConfig {
    pub data_dir: PathBuf,
    pub groups: Vec<String>,
    pub output: PathBuf,
    pub group_mode: StitchMode,
    pub final_mode: StitchMode,
    /// Sort discovered files lexicographically instead of using directory order.
    pub sort_inputs: bool,
    pub registration: RegistrationConfig,
}

impl Default for GroupsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            groups: DEFAULT_GROUPS.iter().map(|g| g.to_string()).collect(),
            output: PathBuf::from(DEFAULT_GROUPS_OUTPUT),
            group_mode: StitchMode::Scans,
            final_mode: StitchMode::Scans,
            sort_inputs: true,
            registration: RegistrationConfig::default(),
        }
    }
}

impl GroupsConfig {
    /// Directory holding the images of `group`.
    pub fn group_dir(&self, group: &str) -> PathBuf {
        self.data_dir.join(group)
    }

    pub fn validate(&self) -> Result<()> {
        if self.groups.is_empty() {
            return Err(MosaicError::Config("at least one group is required".into()));
        }
        if let Some(bad) = self
            .groups
            .iter()
            .find(|g| g.is_empty() || Path::new(g.as_str()).is_absolute())
        {
            return Err(MosaicError::Config(format!(
                "group '{bad}' must be a relative subdirectory name"
            )));
        }
        self.registration.validate()
    }
}
