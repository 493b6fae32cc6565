//! Command-line interface for assembling a mosaic from a tile directory or list

use std::path::{Path, PathBuf};

use clap::Parser;
use log::debug;
use regex::Regex;

use crate::io::configuration::{
    DEFAULT_DOWNSAMPLE, DEFAULT_LOG_LEVEL, DEFAULT_OUTPUT, DEFAULT_SCAN_MODE, QUIET_LOG_LEVEL,
};
use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::io::image::export_canvas_as_tiff;
use crate::io::progress::TileProgress;
use crate::io::source::{
    GrayTile, collect_directory, load_tile, read_list_file, scale_overlap,
};
use crate::mosaic::{CompositePolicy, GridSpec, assemble};

#[derive(Parser, Debug)]
#[command(name = "snakemosaic")]
#[command(
    author,
    version,
    about = "Assemble a snake-ordered grid of TIFF tiles into one grayscale mosaic"
)]
/// Command-line arguments for the mosaic tool
pub struct Cli {
    /// Directory containing TIFF tiles (required unless using --list)
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// File listing tile paths, one per line, in acquisition order
    #[arg(long, value_name = "FILE")]
    pub list: Option<PathBuf>,

    /// Regex filtering tile file names found in --dir
    #[arg(long, value_name = "PATTERN")]
    pub regex: Option<String>,

    /// Number of rows in the mosaic
    #[arg(long)]
    pub rows: usize,

    /// Number of columns in the mosaic
    #[arg(long)]
    pub cols: usize,

    /// Overlap between horizontally adjacent tiles, in full-resolution pixels
    #[arg(long, visible_alias = "overlapX", default_value_t = 0)]
    pub overlap_x: u32,

    /// Overlap between vertically adjacent tiles, in full-resolution pixels
    #[arg(long, visible_alias = "overlapY", default_value_t = 0)]
    pub overlap_y: u32,

    /// Integer downsample factor applied to every tile (>= 1)
    #[arg(long, default_value_t = DEFAULT_DOWNSAMPLE)]
    pub downsample: u32,

    /// Output TIFF file
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    pub out: PathBuf,

    /// Snake pattern direction: vertical or horizontal
    #[arg(long, default_value = DEFAULT_SCAN_MODE)]
    pub snake: String,

    /// How overlapping pixels are combined
    #[arg(long, value_enum, default_value_t = CompositePolicy::Sum)]
    pub blend: CompositePolicy,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log filter used when `RUST_LOG` is not set
    pub const fn default_log_level(&self) -> &'static str {
        if self.quiet {
            QUIET_LOG_LEVEL
        } else {
            DEFAULT_LOG_LEVEL
        }
    }

    /// Validate grid arguments and scale overlaps to the downsampled tile size
    ///
    /// # Errors
    ///
    /// Returns an error if rows, cols or the downsample factor are zero, or the
    /// snake mode is unknown
    pub fn grid_spec(&self) -> Result<GridSpec> {
        if self.rows == 0 {
            return Err(invalid_parameter("rows", &self.rows, &"must be > 0"));
        }
        if self.cols == 0 {
            return Err(invalid_parameter("cols", &self.cols, &"must be > 0"));
        }
        if self.downsample == 0 {
            return Err(invalid_parameter(
                "downsample",
                &self.downsample,
                &"downsample factor must be >= 1",
            ));
        }

        GridSpec::new(
            self.rows,
            self.cols,
            scale_overlap(self.overlap_x, self.downsample),
            scale_overlap(self.overlap_y, self.downsample),
            &self.snake,
        )
    }

    /// Compile the file name filter, if one was given
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::InvalidPattern`] if the regex does not compile
    pub fn filename_filter(&self) -> Result<Option<Regex>> {
        self.regex
            .as_deref()
            .filter(|pattern| !pattern.is_empty())
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| MosaicError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source: e,
                })
            })
            .transpose()
    }

    /// Resolve the ordered tile paths; a list file takes precedence over a directory
    ///
    /// # Errors
    ///
    /// Returns an error if neither source is given, the filter is invalid, or
    /// the source cannot be read
    pub fn collect_paths(&self) -> Result<Vec<PathBuf>> {
        if let Some(list) = &self.list {
            return read_list_file(list);
        }

        let Some(dir) = &self.dir else {
            return Err(invalid_parameter(
                "dir",
                &"",
                &"either --dir or --list must be specified",
            ));
        };

        let filter = self.filename_filter()?;
        collect_directory(dir, filter.as_ref())
    }
}

/// Runs one mosaic assembly from command-line arguments
pub struct MosaicJob {
    cli: Cli,
}

impl MosaicJob {
    /// Create a job for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Arguments this job was created with
    pub const fn cli(&self) -> &Cli {
        &self.cli
    }

    /// Validate inputs, load tiles, assemble and write the mosaic
    ///
    /// Returns the path of the written mosaic. Nothing is written when any
    /// step fails.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Arguments fail validation
    /// - Fewer than `rows * cols` tiles are available
    /// - A tile cannot be decoded, or tiles differ in size
    /// - The mosaic cannot be written
    pub fn run(&self) -> Result<PathBuf> {
        let spec = self.cli.grid_spec()?;
        let mut paths = self.cli.collect_paths()?;

        let required = spec.tile_count();
        if paths.len() < required {
            return Err(MosaicError::NotEnoughTiles {
                available: paths.len(),
                required,
            });
        }
        debug!("Using the first {required} of {} tiles", paths.len());
        paths.truncate(required);

        let tiles = self.load_tiles(&paths)?;
        let canvas = assemble(&tiles, &spec, self.cli.blend)?;
        export_canvas_as_tiff(&canvas, &self.cli.out)?;

        Ok(self.cli.out.clone())
    }

    fn load_tiles(&self, paths: &[PathBuf]) -> Result<Vec<GrayTile>> {
        let progress = if self.cli.should_show_progress() {
            TileProgress::new(paths.len())
        } else {
            TileProgress::hidden(paths.len())
        };

        let mut tiles = Vec::with_capacity(paths.len());
        for path in paths {
            progress.start_tile(path);
            tiles.push(load_tile(path, self.cli.downsample)?);
            progress.complete_tile();
        }
        progress.finish();

        Ok(tiles)
    }

    /// Output path this job writes to
    pub fn output_path(&self) -> &Path {
        &self.cli.out
    }
}
