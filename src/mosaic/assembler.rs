//! Validation, layout and orchestration of one assembly run
//!
//! The run is fail-fast: tile count, tile size and canvas dimensions are all
//! checked before the canvas is allocated or any pixel is written.

use image::Pixel;
use log::debug;

use crate::io::error::{MosaicError, Result};
use crate::mosaic::Tile;
use crate::mosaic::canvas::Canvas;
use crate::mosaic::compositor::{Channel, CompositePolicy, Compositor, composite};
use crate::mosaic::placement::{Placement, ScanMode, plan};

/// Grid shape, overlap and traversal for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    /// Number of tile rows
    pub rows: usize,
    /// Number of tile columns
    pub cols: usize,
    /// Horizontal overlap between adjacent tiles, in pixels
    pub overlap_x: u32,
    /// Vertical overlap between adjacent tiles, in pixels
    pub overlap_y: u32,
    /// Snake traversal direction
    pub scan_mode: ScanMode,
}

impl GridSpec {
    /// Create a grid spec, parsing the scan mode by name
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::InvalidScanMode`] for an unknown scan mode name
    pub fn new(
        rows: usize,
        cols: usize,
        overlap_x: u32,
        overlap_y: u32,
        scan_mode: &str,
    ) -> Result<Self> {
        Ok(Self {
            rows,
            cols,
            overlap_x,
            overlap_y,
            scan_mode: scan_mode.parse()?,
        })
    }

    /// Number of tiles the grid holds, saturating on overflow
    pub const fn tile_count(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }
}

/// Pixel geometry derived from the tile size and a [`GridSpec`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MosaicLayout {
    /// Width shared by every tile
    pub tile_width: u32,
    /// Height shared by every tile
    pub tile_height: u32,
    /// Horizontal distance between neighbouring tile origins
    pub step_x: u32,
    /// Vertical distance between neighbouring tile origins
    pub step_y: u32,
    /// Canvas width, `step_x * cols + overlap_x`
    pub width: u32,
    /// Canvas height, `step_y * rows + overlap_y`
    pub height: u32,
}

// step * count + overlap in i64, None on overflow
fn extent(step: i64, count: usize, overlap: u32) -> Option<i64> {
    let count = i64::try_from(count).ok()?;
    step.checked_mul(count)?.checked_add(i64::from(overlap))
}

impl MosaicLayout {
    /// Compute steps and canvas size for tiles of `tile_width` x `tile_height`
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::DimensionError`] if the grid is empty, if an
    /// overlap is not smaller than the tile dimension, or if the canvas
    /// does not fit in `u32` pixel coordinates
    pub fn new(tile_width: u32, tile_height: u32, spec: &GridSpec) -> Result<Self> {
        let step_x = i64::from(tile_width) - i64::from(spec.overlap_x);
        let step_y = i64::from(tile_height) - i64::from(spec.overlap_y);

        let width = extent(step_x, spec.cols, spec.overlap_x).unwrap_or(i64::MAX);
        let height = extent(step_y, spec.rows, spec.overlap_y).unwrap_or(i64::MAX);

        let dimension_error = |reason: String| MosaicError::DimensionError {
            width,
            height,
            reason,
        };

        if spec.rows == 0 || spec.cols == 0 {
            return Err(dimension_error(format!(
                "grid must have at least one row and column, got {}x{}",
                spec.rows, spec.cols
            )));
        }
        if step_x <= 0 {
            return Err(dimension_error(format!(
                "overlap_x ({}) must be smaller than the tile width ({tile_width})",
                spec.overlap_x
            )));
        }
        if step_y <= 0 {
            return Err(dimension_error(format!(
                "overlap_y ({}) must be smaller than the tile height ({tile_height})",
                spec.overlap_y
            )));
        }

        let (Ok(canvas_width), Ok(canvas_height)) = (u32::try_from(width), u32::try_from(height))
        else {
            return Err(dimension_error(
                "canvas exceeds the maximum image dimension".to_string(),
            ));
        };

        Ok(Self {
            tile_width,
            tile_height,
            step_x: step_x as u32,
            step_y: step_y as u32,
            width: canvas_width,
            height: canvas_height,
        })
    }

    /// Canvas dimensions as (width, height)
    pub const fn canvas_dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Placement of every sequence position, in sequence order
    pub fn placements(&self, spec: &GridSpec) -> Vec<Placement> {
        plan(spec.rows, spec.cols, spec.scan_mode)
            .into_iter()
            .map(|grid| Placement::at(grid, self.step_x, self.step_y))
            .collect()
    }
}

/// Assemble `tiles` into one canvas
///
/// The `n`-th tile is placed at the `n`-th position of the snake plan for
/// `spec`. Tiles are composited one at a time in that order.
///
/// # Errors
///
/// Returns an error, before any pixel work, if:
/// - The tile count is not `rows * cols` ([`MosaicError::TileCountMismatch`])
/// - Tiles differ in size ([`MosaicError::TileSizeMismatch`])
/// - The canvas dimensions are invalid ([`MosaicError::DimensionError`])
pub fn assemble<P>(tiles: &[Tile<P>], spec: &GridSpec, policy: CompositePolicy) -> Result<Canvas<P>>
where
    P: Pixel,
    P::Subpixel: Channel,
{
    let expected = spec.tile_count();
    if tiles.len() != expected {
        return Err(MosaicError::TileCountMismatch {
            expected,
            actual: tiles.len(),
        });
    }

    let tile_size = tiles.first().map_or((0, 0), |tile| tile.dimensions());
    if let Some((index, tile)) = tiles
        .iter()
        .enumerate()
        .find(|(_, tile)| tile.dimensions() != tile_size)
    {
        return Err(MosaicError::TileSizeMismatch {
            index,
            expected: tile_size,
            actual: tile.dimensions(),
        });
    }

    let layout = MosaicLayout::new(tile_size.0, tile_size.1, spec)?;
    let placements = layout.placements(spec);
    debug!(
        "Assembling {}x{} grid of {}x{} tiles into {}x{} canvas ({} scan, {} compositing)",
        spec.rows,
        spec.cols,
        layout.tile_width,
        layout.tile_height,
        layout.width,
        layout.height,
        spec.scan_mode,
        policy
    );

    let mut canvas = Canvas::new(layout.width, layout.height)?;
    let compositor = Compositor::new(
        policy,
        layout.tile_width,
        layout.tile_height,
        spec.overlap_x,
        spec.overlap_y,
    );

    for (tile, placement) in tiles.iter().zip(&placements) {
        composite(&mut canvas, tile, placement.x, placement.y, &compositor);
    }

    Ok(canvas)
}
