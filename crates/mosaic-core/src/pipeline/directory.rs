use std::path::Path;

use image::RgbImage;
use tracing::info;

use crate::error::{MosaicError, Result};
use crate::io::{discover_images, load_images_lenient, save_image};
use crate::stitch::{StitchMode, Stitcher};

use super::config::GroupsConfig;
use super::types::{PipelineStage, ProgressReporter};

/// Stitch each configured group, then stitch the group composites together
/// and write the result to `config.output`.
///
/// Unreadable files inside a group are skipped. Any failed stitch aborts the
/// flow immediately; later groups and the final stitch are not attempted.
pub fn run_directory_flow(
    config: &GroupsConfig,
    stitcher: &dyn Stitcher,
    reporter: &dyn ProgressReporter,
) -> Result<RgbImage> {
    config.validate()?;
    info!(
        data_dir = %config.data_dir.display(),
        groups = config.groups.len(),
        backend = stitcher.name(),
        "Starting directory stitch"
    );

    let mut composites = Vec::with_capacity(config.groups.len());
    for group in &config.groups {
        let dir = config.group_dir(group);
        let composite = stitch_group(&dir, group, config, stitcher, reporter)?;
        composites.push(composite);
    }

    reporter.begin_stage(
        PipelineStage::Stitching("composites".into()),
        Some(composites.len()),
    );
    let pano = stitch_or_fail(
        stitcher,
        &composites,
        config.final_mode,
        &config.data_dir.display().to_string(),
    )?;
    reporter.finish_stage();

    reporter.begin_stage(PipelineStage::Writing, None);
    save_image(&pano, &config.output)?;
    reporter.finish_stage();

    info!(
        output = %config.output.display(),
        width = pano.width(),
        height = pano.height(),
        "Directory stitch complete"
    );
    Ok(pano)
}

fn stitch_group(
    dir: &Path,
    group: &str,
    config: &GroupsConfig,
    stitcher: &dyn Stitcher,
    reporter: &dyn ProgressReporter,
) -> Result<RgbImage> {
    reporter.begin_stage(PipelineStage::Discovering(group.to_string()), None);
    let paths = discover_images(dir, config.sort_inputs)?;
    reporter.finish_stage();

    reporter.begin_stage(PipelineStage::Loading(group.to_string()), Some(paths.len()));
    let images = load_images_lenient(&paths);
    reporter.advance(paths.len());
    reporter.finish_stage();
    info!(
        group,
        found = paths.len(),
        loaded = images.len(),
        "Loaded group images"
    );

    reporter.begin_stage(PipelineStage::Stitching(group.to_string()), Some(images.len()));
    let pano = stitch_or_fail(
        stitcher,
        &images,
        config.group_mode,
        &dir.display().to_string(),
    )?;
    reporter.finish_stage();
    Ok(pano)
}

/// One stitch call, mapping a non-success status to a `Stitch` error for `stage`.
pub(super) fn stitch_or_fail(
    stitcher: &dyn Stitcher,
    images: &[RgbImage],
    mode: StitchMode,
    stage: &str,
) -> Result<RgbImage> {
    stitcher
        .stitch(images, mode)
        .into_result()
        .map_err(|status| MosaicError::Stitch {
            stage: stage.to_string(),
            status,
        })
}
