//! Serpentine ("snake") traversal order for a regular tile grid
//!
//! Consecutive positions in a plan are always spatially adjacent. The
//! position at index `n` is where the `n`-th tile of the source sequence
//! is placed, so the order here must match the acquisition order exactly.

use std::fmt;
use std::str::FromStr;

use crate::io::error::MosaicError;

/// Direction in which the snake sweeps across the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScanMode {
    /// Column by column; even columns run bottom-to-top, odd columns top-to-bottom
    #[default]
    Vertical,
    /// Row by row; even rows run left-to-right, odd rows right-to-left
    Horizontal,
}

impl ScanMode {
    /// Name accepted on the command line for this mode
    pub const fn name(self) -> &'static str {
        match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
        }
    }
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScanMode {
    type Err = MosaicError;

    /// Parses a scan mode name; an empty string selects [`ScanMode::Vertical`]
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "" | "vertical" => Ok(Self::Vertical),
            "horizontal" => Ok(Self::Horizontal),
            other => Err(MosaicError::InvalidScanMode {
                value: other.to_string(),
            }),
        }
    }
}

/// Cell of the tile grid, counted from the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPosition {
    /// Row index, 0 is the top row
    pub row: usize,
    /// Column index, 0 is the leftmost column
    pub col: usize,
}

impl GridPosition {
    /// Create a grid position
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Pixel offset of this cell's top-left corner for the given step sizes
    ///
    /// Callers keep `col * step_x` and `row * step_y` within the canvas,
    /// which is itself bounded by `u32`.
    pub const fn offset(self, step_x: u32, step_y: u32) -> (u32, u32) {
        (self.col as u32 * step_x, self.row as u32 * step_y)
    }
}

/// Grid cell paired with the pixel offset at which its tile is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Cell in the tile grid
    pub grid: GridPosition,
    /// Horizontal pixel offset on the canvas
    pub x: u32,
    /// Vertical pixel offset on the canvas
    pub y: u32,
}

impl Placement {
    /// Place a grid cell using the layout's step sizes
    pub const fn at(grid: GridPosition, step_x: u32, step_y: u32) -> Self {
        let (x, y) = grid.offset(step_x, step_y);
        Self { grid, x, y }
    }
}

/// Compute the visiting order of every cell in a `rows` x `cols` grid
///
/// Each cell appears exactly once. An empty plan is returned when either
/// dimension is zero.
pub fn plan(rows: usize, cols: usize, mode: ScanMode) -> Vec<GridPosition> {
    let mut order = Vec::with_capacity(rows.saturating_mul(cols));

    match mode {
        ScanMode::Vertical => {
            for col in 0..cols {
                if col % 2 == 0 {
                    order.extend((0..rows).rev().map(|row| GridPosition::new(row, col)));
                } else {
                    order.extend((0..rows).map(|row| GridPosition::new(row, col)));
                }
            }
        }
        ScanMode::Horizontal => {
            for row in 0..rows {
                if row % 2 == 0 {
                    order.extend((0..cols).map(|col| GridPosition::new(row, col)));
                } else {
                    order.extend((0..cols).rev().map(|col| GridPosition::new(row, col)));
                }
            }
        }
    }

    order
}
