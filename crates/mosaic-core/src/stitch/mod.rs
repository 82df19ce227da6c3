//! The stitching boundary.
//!
//! Everything above this module talks to a [`Stitcher`] only. The bundled
//! [`TranslationStitcher`] is one implementation; tests substitute fakes.

pub mod compose;
pub mod pyramid;
pub mod register;
mod translation;
mod types;

use image::RgbImage;

use crate::pipeline::config::RegistrationConfig;

pub use translation::TranslationStitcher;
pub use types::{StitchMode, StitchOutput, StitchStatus};

/// A backend that combines overlapping images into one composite.
pub trait Stitcher: Send + Sync {
    /// Human-readable backend name.
    fn name(&self) -> &str;

    /// Make a single stitch attempt. Never panics on bad input; failures
    /// are reported through the returned status.
    fn stitch(&self, images: &[RgbImage], mode: StitchMode) -> StitchOutput;
}

/// Create the default stitching backend.
pub fn create_stitcher(config: &RegistrationConfig) -> Box<dyn Stitcher> {
    Box::new(TranslationStitcher::new(config.clone()))
}
