use std::sync::atomic::{AtomicBool, Ordering};

use indicatif::{ProgressBar, ProgressStyle};
use mosaic_core::pipeline::{PipelineStage, ProgressReporter};

/// Progress bar that advances once per completed stitch stage.
pub struct StitchProgressBar {
    bar: ProgressBar,
    stitching: AtomicBool,
}

impl StitchProgressBar {
    pub fn new(stitch_stages: u64) -> anyhow::Result<Self> {
        let bar = ProgressBar::new(stitch_stages);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg:24} [{bar:40}] {pos}/{len}")?
                .progress_chars("=> "),
        );
        Ok(Self {
            bar,
            stitching: AtomicBool::new(false),
        })
    }

    pub fn finish(&self) {
        self.bar.finish_with_message("Done");
    }

    pub fn abandon(&self) {
        self.bar.abandon();
    }
}

impl ProgressReporter for StitchProgressBar {
    fn begin_stage(&self, stage: PipelineStage, _total_items: Option<usize>) {
        self.bar.set_message(stage.to_string());
        self.stitching
            .store(matches!(stage, PipelineStage::Stitching(_)), Ordering::Relaxed);
    }

    fn finish_stage(&self) {
        if self.stitching.swap(false, Ordering::Relaxed) {
            self.bar.inc(1);
        }
    }
}
