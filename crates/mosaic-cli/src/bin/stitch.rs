use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use mosaic_cli::logging::init_logging;
use mosaic_cli::FAILURE_EXIT;
use mosaic_core::consts::DEFAULT_SINGLE_OUTPUT;
use mosaic_core::error::{MosaicError, Result};
use mosaic_core::pipeline::config::RegistrationConfig;
use mosaic_core::pipeline::run_single_stitch;
use mosaic_core::stitch::{create_stitcher, StitchMode};

#[derive(Parser)]
#[command(
    name = "mosaic-stitch",
    about = "Stitch overlapping images into a panorama or scan"
)]
#[command(version)]
struct Cli {
    /// Stitcher configuration: 0 (panorama) for photo panoramas, 1 (scans)
    /// for material under affine transformation, such as scans
    #[arg(long, default_value = "0")]
    mode: StitchMode,

    /// Resulting image
    #[arg(long, default_value = DEFAULT_SINGLE_OUTPUT)]
    output: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Input images
    #[arg(required = true, num_args = 1..)]
    img: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let stitcher = create_stitcher(&RegistrationConfig::default());
    let result = run_single_stitch(&cli.img, cli.mode, &cli.output, stitcher.as_ref());
    let (lines, code) = report(result, &cli.output);
    for line in &lines {
        println!("{line}");
    }
    ExitCode::from(code)
}

/// Console lines and process exit code for a single-stitch result.
fn report<T>(result: Result<T>, output: &Path) -> (Vec<String>, u8) {
    match result {
        Ok(_) => (
            vec![
                format!("stitching completed successfully. {} saved!", output.display()),
                "Done".to_string(),
            ],
            0,
        ),
        Err(MosaicError::Decode { path, .. }) => (
            vec![format!("can't read image {}", path.display())],
            FAILURE_EXIT,
        ),
        Err(MosaicError::Stitch { status, .. }) => (
            vec![format!("Can't stitch images, error code = {}", status.code())],
            FAILURE_EXIT,
        ),
        Err(e) => (vec![e.to_string()], FAILURE_EXIT),
    }
}
