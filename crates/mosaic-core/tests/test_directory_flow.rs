mod common;

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use mosaic_core::error::MosaicError;
use mosaic_core::io::load_image;
use mosaic_core::pipeline::config::GroupsConfig;
use mosaic_core::pipeline::{run_directory_flow, NoOpReporter, PipelineStage, ProgressReporter};
use mosaic_core::stitch::{StitchMode, StitchStatus, TranslationStitcher};

use common::{crop, textured_scene, write_pngs, FakeStitcher};

/// Lay out `data/{top,middle,bottom}` with `per_group` small images each.
fn fake_data_dir(root: &Path, per_group: usize) -> GroupsConfig {
    let data_dir = root.join("data");
    for (g, group) in ["top", "middle", "bottom"].iter().enumerate() {
        let images: Vec<_> = (0..per_group)
            .map(|i| textured_scene(10 + (g * per_group + i) as u32, 8))
            .collect();
        write_pngs(&data_dir.join(group), &images);
    }
    GroupsConfig {
        data_dir,
        output: root.join("stitch.jpg"),
        ..Default::default()
    }
}

#[derive(Default)]
struct RecordingReporter {
    stages: Mutex<Vec<PipelineStage>>,
}

impl ProgressReporter for RecordingReporter {
    fn begin_stage(&self, stage: PipelineStage, _total_items: Option<usize>) {
        self.stages.lock().unwrap().push(stage);
    }
}

#[test]
fn test_groups_then_composites_are_stitched_in_order() {
    let root = tempfile::tempdir().unwrap();
    let config = fake_data_dir(root.path(), 2);
    let stitcher = FakeStitcher::new();

    let pano = run_directory_flow(&config, &stitcher, &NoOpReporter).unwrap();

    let calls = stitcher.calls();
    assert_eq!(calls.len(), 4);
    assert_eq!(calls[0].widths, vec![10, 11]);
    assert_eq!(calls[1].widths, vec![12, 13]);
    assert_eq!(calls[2].widths, vec![14, 15]);
    assert_eq!(calls[3].widths, vec![21, 25, 29]);
    assert!(calls.iter().all(|c| c.mode == StitchMode::Scans));

    assert_eq!(pano.width(), 75);
    assert!(config.output.exists());
    assert_eq!(load_image(&config.output).unwrap().dimensions(), pano.dimensions());
}

#[test]
fn test_middle_failure_aborts_before_final_stitch() {
    let root = tempfile::tempdir().unwrap();
    let config = fake_data_dir(root.path(), 2);
    let stitcher = FakeStitcher::failing_on(1, StitchStatus::HomographyEstFail);

    let err = run_directory_flow(&config, &stitcher, &NoOpReporter).unwrap_err();

    match &err {
        MosaicError::Stitch { stage, status } => {
            assert!(stage.ends_with("middle"), "stage={stage}");
            assert_eq!(*status, StitchStatus::HomographyEstFail);
        }
        other => panic!("expected Stitch error, got {other:?}"),
    }
    assert!(err.to_string().contains("Stitching error for"), "got: {err}");
    assert_eq!(stitcher.calls().len(), 2);
    assert!(!config.output.exists());
}

#[test]
fn test_final_failure_names_data_dir() {
    let root = tempfile::tempdir().unwrap();
    let config = fake_data_dir(root.path(), 2);
    let stitcher = FakeStitcher::failing_on(3, StitchStatus::CameraParamsAdjustFail);

    match run_directory_flow(&config, &stitcher, &NoOpReporter) {
        Err(MosaicError::Stitch { stage, status }) => {
            assert_eq!(stage, config.data_dir.display().to_string());
            assert_eq!(status, StitchStatus::CameraParamsAdjustFail);
        }
        other => panic!("expected Stitch error, got {other:?}"),
    }
    assert!(!config.output.exists());
}

#[test]
fn test_unreadable_files_in_group_are_skipped() {
    let root = tempfile::tempdir().unwrap();
    let config = fake_data_dir(root.path(), 2);
    fs::write(config.group_dir("top").join("broken.jpg"), b"not a jpeg").unwrap();
    fs::write(config.group_dir("top").join("notes.txt"), b"ignored").unwrap();
    let stitcher = FakeStitcher::new();

    run_directory_flow(&config, &stitcher, &NoOpReporter).unwrap();
    assert_eq!(stitcher.calls()[0].image_count, 2);
}

#[test]
fn test_missing_group_directory_is_an_error() {
    let root = tempfile::tempdir().unwrap();
    let config = fake_data_dir(root.path(), 2);
    fs::remove_dir_all(config.group_dir("bottom")).unwrap();
    let stitcher = FakeStitcher::new();

    let err = run_directory_flow(&config, &stitcher, &NoOpReporter).unwrap_err();
    assert!(matches!(err, MosaicError::ReadDir { .. }), "got {err:?}");
    assert_eq!(stitcher.calls().len(), 2);
}

#[test]
fn test_empty_group_fails_with_need_more_images() {
    let root = tempfile::tempdir().unwrap();
    let config = fake_data_dir(root.path(), 2);
    for entry in fs::read_dir(config.group_dir("top")).unwrap() {
        fs::remove_file(entry.unwrap().path()).unwrap();
    }

    let err =
        run_directory_flow(&config, &TranslationStitcher::default(), &NoOpReporter).unwrap_err();
    match err {
        MosaicError::Stitch { stage, status } => {
            assert!(stage.ends_with("top"), "stage={stage}");
            assert_eq!(status, StitchStatus::NeedMoreImages);
        }
        other => panic!("expected Stitch error, got {other:?}"),
    }
}

#[test]
fn test_custom_groups_and_modes_are_honored() {
    let root = tempfile::tempdir().unwrap();
    let mut config = fake_data_dir(root.path(), 2);
    config.groups = vec!["bottom".into(), "top".into()];
    config.group_mode = StitchMode::Panorama;
    config.final_mode = StitchMode::Scans;
    let stitcher = FakeStitcher::new();

    run_directory_flow(&config, &stitcher, &NoOpReporter).unwrap();

    let calls = stitcher.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0].widths, vec![14, 15]);
    assert_eq!(calls[0].mode, StitchMode::Panorama);
    assert_eq!(calls[2].mode, StitchMode::Scans);
}

#[test]
fn test_invalid_config_rejected_before_any_work() {
    let root = tempfile::tempdir().unwrap();
    let mut config = fake_data_dir(root.path(), 2);
    config.groups.clear();
    let stitcher = FakeStitcher::new();

    let err = run_directory_flow(&config, &stitcher, &NoOpReporter).unwrap_err();
    assert!(matches!(err, MosaicError::Config(_)));
    assert!(stitcher.calls().is_empty());
}

#[test]
fn test_reporter_sees_every_stage() {
    let root = tempfile::tempdir().unwrap();
    let config = fake_data_dir(root.path(), 2);
    let reporter = RecordingReporter::default();

    run_directory_flow(&config, &FakeStitcher::new(), &reporter).unwrap();

    let stages = reporter.stages.lock().unwrap();
    assert_eq!(stages.len(), 3 * 3 + 2);
    assert_eq!(stages[0], PipelineStage::Discovering("top".into()));
    assert_eq!(stages[2], PipelineStage::Stitching("top".into()));
    assert_eq!(stages[9], PipelineStage::Stitching("composites".into()));
    assert_eq!(stages[10], PipelineStage::Writing);
}

#[test]
fn test_real_backend_reassembles_three_strips() {
    let scene = textured_scene(160, 150);
    let root = tempfile::tempdir().unwrap();
    let data_dir = root.path().join("data");
    for (group, y) in [("top", 0), ("middle", 40), ("bottom", 80)] {
        let strip = vec![crop(&scene, 0, y, 100, 70), crop(&scene, 60, y, 100, 70)];
        write_pngs(&data_dir.join(group), &strip);
    }
    let config = GroupsConfig {
        data_dir,
        output: root.path().join("out").join("stitch.png"),
        ..Default::default()
    };

    let pano = run_directory_flow(&config, &TranslationStitcher::default(), &NoOpReporter).unwrap();

    assert_eq!(pano.dimensions(), (160, 150));
    assert_eq!(pano, scene);
    assert_eq!(load_image(&config.output).unwrap(), scene);
}
