//! Mosaic assembly from a serpentine grid of pre-aligned tiles
//!
//! Tiles acquired in snake order are placed on a regular grid with a fixed
//! overlap, and overlapping pixels are merged by saturating addition or by a
//! distance-weighted linear blend.

#![forbid(unsafe_code)]

/// Input discovery, export, CLI and error handling
pub mod io;
/// Placement planning, canvas and compositing
pub mod mosaic;

pub use io::error::{MosaicError, Result};
