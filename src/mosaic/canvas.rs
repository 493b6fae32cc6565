//! Destination buffer for the assembled mosaic

use std::fmt;

use image::{ImageBuffer, Pixel};

use crate::io::error::{MosaicError, Result};

/// Mutable composite image, sized once and never resized
///
/// The canvas is owned by a single assembly run and only handed out
/// read-only once every tile has been composited.
#[derive(Clone)]
pub struct Canvas<P: Pixel> {
    buffer: ImageBuffer<P, Vec<P::Subpixel>>,
}

impl<P: Pixel> Canvas<P> {
    /// Allocate a zero-initialised canvas
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::DimensionError`] if either dimension is zero or
    /// the buffer size does not fit in memory addressing. Validation happens
    /// before any allocation.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(MosaicError::DimensionError {
                width: i64::from(width),
                height: i64::from(height),
                reason: "canvas dimensions must be positive".to_string(),
            });
        }

        let samples = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(usize::from(P::CHANNEL_COUNT)));
        if samples.is_none() {
            return Err(MosaicError::DimensionError {
                width: i64::from(width),
                height: i64::from(height),
                reason: "canvas buffer size overflows".to_string(),
            });
        }

        Ok(Self {
            buffer: ImageBuffer::new(width, height),
        })
    }

    /// Canvas width in pixels
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    /// Canvas height in pixels
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Canvas dimensions as (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        self.buffer.dimensions()
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<&P> {
        self.buffer.get_pixel_checked(x, y)
    }

    /// Mutable pixel at `(x, y)`, or `None` outside the canvas
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> Option<&mut P> {
        self.buffer.get_pixel_mut_checked(x, y)
    }

    /// Borrow the finished image
    pub const fn as_image(&self) -> &ImageBuffer<P, Vec<P::Subpixel>> {
        &self.buffer
    }

    /// Consume the canvas, yielding the finished image
    pub fn into_image(self) -> ImageBuffer<P, Vec<P::Subpixel>> {
        self.buffer
    }
}

impl<P: Pixel> fmt::Debug for Canvas<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("channels", &P::CHANNEL_COUNT)
            .finish()
    }
}
