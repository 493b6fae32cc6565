//! Overlap compositing of a tile onto the canvas
//!
//! Two policies are supported and one is chosen for the whole run:
//! - Additive summation, saturating at the channel maximum
//! - Linear feathering, where a tile's weight ramps from 0 to 1 across each
//!   overlap band on its edges
//!
//! Tiles are written strictly in placement order. The blend reads whatever the
//! canvas already holds, so regions covered by more than two tiles depend on
//! that order; corners are not special-cased.

use std::fmt;

use clap::ValueEnum;
use image::{Pixel, Primitive};
use ndarray::Array2;
use num_traits::{Bounded, NumCast, SaturatingAdd};

use crate::mosaic::Tile;
use crate::mosaic::canvas::Canvas;

/// Channel types that can be both summed with saturation and blended
pub trait Channel: Primitive + SaturatingAdd {}

impl<T: Primitive + SaturatingAdd> Channel for T {}

/// Rule for combining a tile's pixels with pixels already on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum CompositePolicy {
    /// Add source to destination, saturating at the channel maximum
    #[default]
    Sum,
    /// Distance-weighted linear blend across the overlap bands
    #[value(name = "linear", alias = "blend")]
    Blend,
}

impl fmt::Display for CompositePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sum => f.write_str("sum"),
            Self::Blend => f.write_str("linear"),
        }
    }
}

/// Blend weight along one axis for a pixel at `position` in a tile of `size`
///
/// The weight rises linearly across the leading overlap band, falls across the
/// trailing band and is 1 elsewhere. A zero overlap disables feathering on
/// that axis.
pub fn blend_weight(position: u32, size: u32, overlap: u32) -> f64 {
    if overlap == 0 {
        return 1.0;
    }

    let band = <f64 as From<u32>>::from(overlap);
    if position < overlap {
        <f64 as From<u32>>::from(position) / band
    } else if position >= size.saturating_sub(overlap) {
        <f64 as From<u32>>::from(size.saturating_sub(position).saturating_sub(1)) / band
    } else {
        1.0
    }
}

/// Per-pixel blend weights for one tile size and overlap
///
/// All tiles in a run share dimensions, so the mask is computed once and
/// reused for every tile.
#[derive(Debug, Clone)]
pub struct FeatherMask {
    /// Weights indexed by (`row`, `col`) within the tile
    weights: Array2<f64>,
}

impl FeatherMask {
    /// Build the mask; each weight is the smaller of its two axis weights
    pub fn new(tile_width: u32, tile_height: u32, overlap_x: u32, overlap_y: u32) -> Self {
        let weights = Array2::from_shape_fn(
            (tile_height as usize, tile_width as usize),
            |(row, col)| {
                let alpha_x = blend_weight(col as u32, tile_width, overlap_x);
                let alpha_y = blend_weight(row as u32, tile_height, overlap_y);
                alpha_x.min(alpha_y)
            },
        );
        Self { weights }
    }

    /// Weight of the tile pixel at `(x, y)`; 1 outside the mask
    pub fn weight(&self, x: u32, y: u32) -> f64 {
        self.weights
            .get([y as usize, x as usize])
            .copied()
            .unwrap_or(1.0)
    }

    /// Mask dimensions as (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        let (rows, cols) = self.weights.dim();
        (cols as u32, rows as u32)
    }
}

/// Compositing policy bound to the data it needs for one run
#[derive(Debug, Clone)]
pub enum Compositor {
    /// Saturating addition
    Sum,
    /// Feathered blend with a precomputed weight mask
    Blend(FeatherMask),
}

impl Compositor {
    /// Prepare a compositor for tiles of the given size and overlap
    pub fn new(
        policy: CompositePolicy,
        tile_width: u32,
        tile_height: u32,
        overlap_x: u32,
        overlap_y: u32,
    ) -> Self {
        match policy {
            CompositePolicy::Sum => Self::Sum,
            CompositePolicy::Blend => Self::Blend(FeatherMask::new(
                tile_width,
                tile_height,
                overlap_x,
                overlap_y,
            )),
        }
    }

    /// Policy this compositor applies
    pub const fn policy(&self) -> CompositePolicy {
        match self {
            Self::Sum => CompositePolicy::Sum,
            Self::Blend(_) => CompositePolicy::Blend,
        }
    }
}

// round(alpha * source + (1 - alpha) * destination), clamped to the channel range
fn blend_channel<T: Channel>(source: T, destination: T, alpha: f64) -> T {
    let (Some(src), Some(dst)) = (source.to_f64(), destination.to_f64()) else {
        return destination;
    };

    let low = <T as Bounded>::min_value().to_f64().unwrap_or(f64::MIN);
    let high = <T as Bounded>::max_value().to_f64().unwrap_or(f64::MAX);
    let value = alpha.mul_add(src, (1.0 - alpha) * dst).round().clamp(low, high);

    <T as NumCast>::from(value).unwrap_or(destination)
}

/// Write `tile` onto `canvas` with its top-left corner at `(x0, y0)`
///
/// Pixels whose destination falls outside the canvas are skipped silently.
/// This never fails; tile and overlap validation happens before compositing.
pub fn composite<P>(
    canvas: &mut Canvas<P>,
    tile: &Tile<P>,
    x0: u32,
    y0: u32,
    compositor: &Compositor,
) where
    P: Pixel,
    P::Subpixel: Channel,
{
    let (canvas_width, canvas_height) = canvas.dimensions();
    let visible_width = tile.width().min(canvas_width.saturating_sub(x0));
    let visible_height = tile.height().min(canvas_height.saturating_sub(y0));

    for y in 0..visible_height {
        for x in 0..visible_width {
            let Some(source) = tile.get_pixel_checked(x, y) else {
                continue;
            };
            let Some(destination) = canvas.pixel_mut(x0 + x, y0 + y) else {
                continue;
            };

            match compositor {
                Compositor::Sum => {
                    destination.apply2(source, |dst, src| dst.saturating_add(&src));
                }
                Compositor::Blend(mask) => {
                    let alpha = mask.weight(x, y);
                    destination.apply2(source, |dst, src| blend_channel(src, dst, alpha));
                }
            }
        }
    }
}
