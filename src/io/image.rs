//! Export of the finished mosaic as a compressed 16-bit grayscale TIFF
//!
//! Samples are written with Deflate compression and a horizontal predictor.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::Luma;
use log::info;
use tiff::encoder::colortype::Gray16;
use tiff::encoder::compression::DeflateLevel;
use tiff::encoder::{Compression, Predictor, TiffEncoder};

use crate::io::error::{MosaicError, Result};
use crate::mosaic::Canvas;

fn encode_tiff(canvas: &Canvas<Luma<u16>>, output_path: &Path) -> Result<()> {
    let encode_error = |e: tiff::TiffError| MosaicError::ImageEncode {
        path: output_path.to_path_buf(),
        source: e,
    };

    let file = File::create(output_path).map_err(|e| MosaicError::FileSystem {
        path: output_path.to_path_buf(),
        operation: "create file",
        source: e,
    })?;

    let mut encoder = TiffEncoder::new(BufWriter::new(file))
        .map_err(encode_error)?
        .with_compression(Compression::Deflate(DeflateLevel::default()))
        .with_predictor(Predictor::Horizontal);
    encoder
        .write_image::<Gray16>(
            canvas.width(),
            canvas.height(),
            canvas.as_image().as_raw(),
        )
        .map_err(encode_error)
}

/// Write the canvas as a single-channel 16-bit Deflate-compressed TIFF
/// with horizontal differencing
///
/// A failed export removes the partially written file.
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The output file cannot be created
/// - TIFF encoding fails
pub fn export_canvas_as_tiff(canvas: &Canvas<Luma<u16>>, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| MosaicError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    if let Err(error) = encode_tiff(canvas, output_path) {
        // Best effort; the encode error is what the caller needs to see
        let _ = std::fs::remove_file(output_path);
        return Err(error);
    }

    info!(
        "Mosaic saved as {} ({}x{} grayscale TIFF)",
        output_path.display(),
        canvas.width(),
        canvas.height()
    );
    Ok(())
}
