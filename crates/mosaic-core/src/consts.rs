/// File extensions (lowercase, without the dot) picked up by directory discovery.
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "tif", "tiff"];

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;

/// Number of channels in a decoded raster (R, G, B).
pub const COLOR_CHANNEL_COUNT: usize = 3;

/// Small epsilon to avoid division by zero in floating-point comparisons.
pub const EPSILON: f32 = 1e-10;

/// Overlap variance below which a candidate offset is treated as textureless.
pub const MIN_OVERLAP_VARIANCE: f64 = 1e-8;

/// Minimum overlap extent (in pixels, per axis) at any pyramid level.
pub const MIN_OVERLAP_SIDE: usize = 4;

/// Half-width of the search window when refining an offset at a finer level.
pub const REFINE_RADIUS: i64 = 2;

/// Minimum number of candidate rows to use Rayon parallelism in the offset search.
pub const PARALLEL_CANDIDATE_THRESHOLD: usize = 16;

/// Default minimum overlap, as a fraction of the smaller image's area.
pub const DEFAULT_MIN_OVERLAP_FRACTION: f32 = 0.15;

/// Default NCC score below which a pair is rejected as unregistrable.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.5;

/// Default longest side of the coarsest pyramid level used for exhaustive search.
pub const DEFAULT_MAX_SEARCH_DIM: usize = 96;

/// Default upper bound on composite canvas area (400 megapixels).
pub const DEFAULT_MAX_CANVAS_PIXELS: u64 = 400_000_000;

/// Default output file of the single-stage CLI.
pub const DEFAULT_SINGLE_OUTPUT: &str = "result.jpg";

/// Default output file of the directory-driven flow.
pub const DEFAULT_GROUPS_OUTPUT: &str = "stitch.jpg";

/// Default data directory of the directory-driven flow.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default group subdirectories, stitched in this order.
pub const DEFAULT_GROUPS: [&str; 3] = ["top", "middle", "bottom"];
