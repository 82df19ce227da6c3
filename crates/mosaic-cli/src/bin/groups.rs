use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use mosaic_cli::logging::init_logging;
use mosaic_cli::progress::StitchProgressBar;
use mosaic_cli::summary::print_groups_summary;
use mosaic_core::pipeline::config::GroupsConfig;
use mosaic_core::pipeline::run_directory_flow;
use mosaic_core::stitch::{create_stitcher, StitchMode};
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "mosaic-groups",
    about = "Stitch each image group of a data directory, then stitch the groups together"
)]
#[command(version)]
struct Cli {
    /// Groups config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory containing one subdirectory per group
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Group subdirectories, stitched in order (comma-separated)
    #[arg(long, value_delimiter = ',')]
    groups: Option<Vec<String>>,

    /// Mode used within each group: 0/panorama or 1/scans
    #[arg(long)]
    group_mode: Option<StitchMode>,

    /// Mode used to stitch the group composites: 0/panorama or 1/scans
    #[arg(long)]
    final_mode: Option<StitchMode>,

    /// Keep directory enumeration order instead of sorting file names
    #[arg(long)]
    unsorted: bool,

    /// Output file path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the default config as TOML (or write it to FILE) and exit
    #[arg(long, value_name = "FILE")]
    print_config: Option<Option<PathBuf>>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(target) = &cli.print_config {
        return print_default_config(target.as_deref());
    }

    let config = build_config(&cli)?;
    let stitcher = create_stitcher(&config.registration);
    print_groups_summary(&config, stitcher.name());

    let progress = StitchProgressBar::new(config.groups.len() as u64 + 1)?;
    match run_directory_flow(&config, stitcher.as_ref(), &progress) {
        Ok(_) => progress.finish(),
        Err(e) => {
            progress.abandon();
            return Err(e.into());
        }
    }

    println!("\nOutput saved to {}", config.output.display());
    Ok(())
}

fn build_config(cli: &Cli) -> Result<GroupsConfig> {
    let mut config: GroupsConfig = if let Some(ref config_path) = cli.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        toml::from_str(&contents).context("Invalid groups config")?
    } else {
        GroupsConfig::default()
    };

    if let Some(ref dir) = cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(ref groups) = cli.groups {
        config.groups = groups.clone();
    }
    if let Some(mode) = cli.group_mode {
        config.group_mode = mode;
    }
    if let Some(mode) = cli.final_mode {
        config.final_mode = mode;
    }
    if cli.unsorted {
        config.sort_inputs = false;
    }
    if let Some(ref output) = cli.output {
        config.output = output.clone();
    }

    config.validate()?;
    debug!(?config, "Resolved groups config");
    Ok(config)
}

/// Print or save the default GroupsConfig as TOML.
fn print_default_config(path: Option<&Path>) -> Result<()> {
    let toml_str = toml::to_string_pretty(&GroupsConfig::default())?;

    if let Some(path) = path {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Default config saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}
