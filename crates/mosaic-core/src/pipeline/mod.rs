pub mod config;
mod directory;
mod single;
mod types;

pub use directory::run_directory_flow;
pub use single::{run_single_stitch, SINGLE_STAGE};
pub use types::{NoOpReporter, PipelineStage, ProgressReporter};
