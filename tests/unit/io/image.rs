//! Tests for compressed 16-bit grayscale TIFF export

#[cfg(test)]
mod tests {
    use image::Luma;
    use snakemosaic::MosaicError;
    use snakemosaic::io::image::export_canvas_as_tiff;
    use snakemosaic::mosaic::Canvas;
    use std::fs;
    use std::io::BufReader;
    use tiff::decoder::Decoder;
    use tiff::tags::{CompressionMethod, Predictor, Tag};

    fn gradient_canvas(width: u32, height: u32) -> Canvas<Luma<u16>> {
        let Ok(mut canvas) = Canvas::new(width, height) else {
            unreachable!("Canvas allocation should succeed");
        };
        for y in 0..height {
            for x in 0..width {
                if let Some(pixel) = canvas.pixel_mut(x, y) {
                    *pixel = Luma([(x * 1000 + y) as u16]);
                }
            }
        }
        canvas
    }

    // Tests the exported TIFF decodes to the same 16-bit pixels
    // Verified by writing 8-bit samples
    #[test]
    fn test_export_round_trips_pixels() {
        let Ok(dir) = tempfile::tempdir() else {
            unreachable!("Temporary directory should be created");
        };
        let path = dir.path().join("mosaic.tiff");
        let canvas = gradient_canvas(30, 20);

        assert!(export_canvas_as_tiff(&canvas, &path).is_ok());

        let Ok(decoded) = image::open(&path) else {
            unreachable!("Exported TIFF should decode");
        };
        assert!(matches!(decoded, image::DynamicImage::ImageLuma16(_)));
        assert_eq!(decoded.into_luma16(), canvas.into_image());
    }

    // Tests missing parent directories are created
    // Verified by removing the create_dir_all call
    #[test]
    fn test_export_creates_parent_directories() {
        let Ok(dir) = tempfile::tempdir() else {
            unreachable!("Temporary directory should be created");
        };
        let path = dir.path().join("a").join("b").join("mosaic.tiff");

        assert!(export_canvas_as_tiff(&gradient_canvas(4, 4), &path).is_ok());
        assert!(path.exists());
    }

    // Tests an unwritable destination reports a file system error
    // Verified by ignoring the file creation result
    #[test]
    fn test_export_unwritable_destination() {
        let Ok(dir) = tempfile::tempdir() else {
            unreachable!("Temporary directory should be created");
        };
        let blocker = dir.path().join("blocker");
        assert!(fs::write(&blocker, "not a directory").is_ok());
        let path = blocker.join("mosaic.tiff");

        let result = export_canvas_as_tiff(&gradient_canvas(4, 4), &path);
        assert!(matches!(result, Err(MosaicError::FileSystem { .. })));
        assert!(!path.exists());
    }

    // Tests the file is Deflate-compressed with horizontal differencing
    // Verified by writing without a predictor
    #[test]
    fn test_export_uses_deflate_with_predictor() {
        let Ok(dir) = tempfile::tempdir() else {
            unreachable!("Temporary directory should be created");
        };
        let path = dir.path().join("mosaic.tiff");
        assert!(export_canvas_as_tiff(&gradient_canvas(16, 8), &path).is_ok());

        let Ok(file) = fs::File::open(&path) else {
            unreachable!("Exported TIFF should open");
        };
        let Ok(mut decoder) = Decoder::new(BufReader::new(file)) else {
            unreachable!("Exported TIFF should parse");
        };
        assert!(matches!(
            decoder.get_tag_u32(Tag::Compression),
            Ok(code) if code == u32::from(CompressionMethod::Deflate.to_u16())
        ));
        assert!(matches!(
            decoder.get_tag_u32(Tag::Predictor),
            Ok(code) if code == u32::from(Predictor::Horizontal.to_u16())
        ));
    }
}
