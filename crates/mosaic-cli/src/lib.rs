//! Shared plumbing of the `mosaic-stitch` and `mosaic-groups` binaries.

pub mod logging;
pub mod progress;
pub mod summary;

/// Process exit status for load and stitch failures (the byte value of -1).
pub const FAILURE_EXIT: u8 = 255;
