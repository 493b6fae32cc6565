//! Progress display while tiles are decoded

use std::path::Path;
use std::sync::LazyLock;

use indicatif::{ProgressBar, ProgressStyle};

use crate::io::configuration::PROGRESS_BAR_WIDTH;

static TILE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Tiles: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks how many tiles of the grid have been decoded
pub struct TileProgress {
    bar: ProgressBar,
}

impl TileProgress {
    /// Create a progress bar for `tile_count` tiles
    pub fn new(tile_count: usize) -> Self {
        let bar = ProgressBar::new(tile_count as u64);
        bar.set_style(TILE_STYLE.clone());
        Self { bar }
    }

    /// Create a progress tracker that draws nothing
    pub fn hidden(tile_count: usize) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(tile_count as u64);
        Self { bar }
    }

    /// Show the tile currently being decoded
    pub fn start_tile(&self, path: &Path) {
        let display_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        self.bar.set_message(display_name);
    }

    /// Count a decoded tile
    pub fn complete_tile(&self) {
        self.bar.inc(1);
    }

    /// Number of tiles decoded so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Clear the progress display
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
