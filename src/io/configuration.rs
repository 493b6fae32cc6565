//! Runtime configuration defaults and fixed constants

// Output settings
/// Default path of the assembled mosaic
pub const DEFAULT_OUTPUT: &str = "mosaic.tiff";

/// Default snake traversal direction
pub const DEFAULT_SCAN_MODE: &str = "vertical";

/// Default downsampling factor (1 keeps tiles at full resolution)
pub const DEFAULT_DOWNSAMPLE: u32 = 1;

// Input discovery
/// File extensions recognised as tiles when scanning a directory
pub const TILE_EXTENSIONS: [&str; 2] = ["tif", "tiff"];

// Acquisition software writes the tile sequence number as `-<n>_` in the name
/// Pattern whose first capture group orders tiles found in a directory
pub const SEQUENCE_NUMBER_PATTERN: &str = r"-(\d+)_";

// Progress bar display settings
/// Width of the tile loading progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log filter used with `--quiet`
pub const QUIET_LOG_LEVEL: &str = "warn";
