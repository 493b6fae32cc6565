//! Mosaic assembly engine
//!
//! This module contains the pieces that turn an ordered tile sequence into
//! one composite image:
//! - Serpentine placement planning
//! - The destination canvas
//! - Overlap compositing policies
//! - Orchestration of the full assembly run

use image::{ImageBuffer, Pixel};

/// Validation and orchestration of a full assembly run
pub mod assembler;
/// Zero-initialised destination pixel buffer
pub mod canvas;
/// Additive and feathered overlap compositing
pub mod compositor;
/// Snake-order traversal of the tile grid
pub mod placement;

pub use assembler::{GridSpec, MosaicLayout, assemble};
pub use canvas::Canvas;
pub use compositor::{Channel, CompositePolicy, Compositor, composite};
pub use placement::{GridPosition, Placement, ScanMode, plan};

/// Decoded source tile with a pixel type fixed at compile time
pub type Tile<P> = ImageBuffer<P, Vec<<P as Pixel>::Subpixel>>;
