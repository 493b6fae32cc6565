//! Tests for layout computation and assembly validation

#[cfg(test)]
mod tests {
    use image::{ImageBuffer, Luma};
    use snakemosaic::MosaicError;
    use snakemosaic::mosaic::assembler::{GridSpec, MosaicLayout, assemble};
    use snakemosaic::mosaic::compositor::CompositePolicy;
    use snakemosaic::mosaic::placement::{GridPosition, ScanMode};

    type GrayTile = ImageBuffer<Luma<u16>, Vec<u16>>;

    fn spec(rows: usize, cols: usize, overlap_x: u32, overlap_y: u32, mode: ScanMode) -> GridSpec {
        GridSpec {
            rows,
            cols,
            overlap_x,
            overlap_y,
            scan_mode: mode,
        }
    }

    fn numbered_tiles(count: usize, width: u32, height: u32) -> Vec<GrayTile> {
        (0..count)
            .map(|i| ImageBuffer::from_pixel(width, height, Luma([i as u16 + 1])))
            .collect()
    }

    // Tests canvas size follows (W - ox) * cols + ox by (H - oy) * rows + oy
    // Verified by omitting the trailing overlap term
    #[test]
    fn test_layout_canvas_size() {
        let cases = [
            (100, 100, 20, 20, 2, 2, (180, 180)),
            (10, 8, 0, 0, 3, 1, (30, 8)),
            (64, 32, 16, 4, 5, 3, (256, 88)),
        ];

        for (w, h, ox, oy, cols, rows, expected) in cases {
            let grid = spec(rows, cols, ox, oy, ScanMode::Vertical);
            let Ok(layout) = MosaicLayout::new(w, h, &grid) else {
                unreachable!("Layout should be valid for {w}x{h}");
            };
            assert_eq!(layout.canvas_dimensions(), expected);
            assert_eq!(layout.step_x, w - ox);
            assert_eq!(layout.step_y, h - oy);
        }
    }

    // Tests overlap equal to the tile size is a dimension error
    // Verified by accepting a zero step
    #[test]
    fn test_layout_rejects_overlap_at_tile_size() {
        let grid = spec(2, 2, 10, 0, ScanMode::Vertical);
        assert!(matches!(
            MosaicLayout::new(10, 10, &grid),
            Err(MosaicError::DimensionError { .. })
        ));

        let grid = spec(2, 2, 0, 12, ScanMode::Vertical);
        assert!(matches!(
            MosaicLayout::new(10, 10, &grid),
            Err(MosaicError::DimensionError { .. })
        ));
    }

    // Tests an empty grid is a dimension error
    // Verified by removing the rows/cols guard
    #[test]
    fn test_layout_rejects_empty_grid() {
        let grid = spec(0, 3, 0, 0, ScanMode::Vertical);
        assert!(matches!(
            MosaicLayout::new(10, 10, &grid),
            Err(MosaicError::DimensionError { .. })
        ));
    }

    // Tests placements follow the plan with step-sized offsets
    // Verified by using tile width as the step
    #[test]
    fn test_layout_placements() {
        let grid = spec(2, 2, 20, 20, ScanMode::Vertical);
        let Ok(layout) = MosaicLayout::new(100, 100, &grid) else {
            unreachable!("Layout should be valid");
        };

        let offsets: Vec<(u32, u32)> = layout
            .placements(&grid)
            .iter()
            .map(|p| (p.x, p.y))
            .collect();
        assert_eq!(offsets, vec![(0, 80), (0, 0), (80, 0), (80, 80)]);
    }

    // Tests grid spec parsing accepts names and rejects unknown modes
    // Verified by ignoring the scan mode argument
    #[test]
    fn test_grid_spec_new() {
        let Ok(grid) = GridSpec::new(2, 3, 4, 5, "horizontal") else {
            unreachable!("Grid spec should parse");
        };
        assert_eq!(grid.scan_mode, ScanMode::Horizontal);
        assert_eq!(grid.tile_count(), 6);

        assert!(matches!(
            GridSpec::new(2, 3, 4, 5, ""),
            Ok(GridSpec {
                scan_mode: ScanMode::Vertical,
                ..
            })
        ));
        assert!(matches!(
            GridSpec::new(2, 3, 4, 5, "spiral"),
            Err(MosaicError::InvalidScanMode { .. })
        ));
    }

    // Tests a wrong tile count fails before any pixel work
    // Verified by truncating the tile list instead of failing
    #[test]
    fn test_assemble_tile_count_mismatch() {
        let tiles = numbered_tiles(5, 10, 10);
        let grid = spec(2, 2, 0, 0, ScanMode::Vertical);

        match assemble(&tiles, &grid, CompositePolicy::Sum) {
            Err(MosaicError::TileCountMismatch { expected, actual }) => {
                assert_eq!((expected, actual), (4, 5));
            }
            other => unreachable!("Expected TileCountMismatch, got {other:?}"),
        }
    }

    // Tests tiles of differing size are rejected with the offending index
    // Verified by comparing only widths
    #[test]
    fn test_assemble_tile_size_mismatch() {
        let mut tiles = numbered_tiles(4, 10, 10);
        tiles[2] = ImageBuffer::from_pixel(10, 9, Luma([1]));
        let grid = spec(2, 2, 0, 0, ScanMode::Vertical);

        match assemble(&tiles, &grid, CompositePolicy::Sum) {
            Err(MosaicError::TileSizeMismatch {
                index,
                expected,
                actual,
            }) => {
                assert_eq!(index, 2);
                assert_eq!(expected, (10, 10));
                assert_eq!(actual, (10, 9));
            }
            other => unreachable!("Expected TileSizeMismatch, got {other:?}"),
        }
    }

    // Tests an overlap at least as large as the tile fails during assembly
    // Verified by clamping negative steps to zero
    #[test]
    fn test_assemble_dimension_error() {
        let tiles = numbered_tiles(4, 10, 10);
        let grid = spec(2, 2, 15, 0, ScanMode::Vertical);

        assert!(matches!(
            assemble(&tiles, &grid, CompositePolicy::Sum),
            Err(MosaicError::DimensionError { .. })
        ));
    }

    // Tests each tile lands at its snake position
    // Verified by placing tiles in row-major order
    #[test]
    fn test_assemble_places_tiles_in_snake_order() {
        let tiles = numbered_tiles(6, 2, 2);
        let grid = spec(3, 2, 0, 0, ScanMode::Vertical);

        let Ok(canvas) = assemble(&tiles, &grid, CompositePolicy::Sum) else {
            unreachable!("Assembly should succeed");
        };
        assert_eq!(canvas.dimensions(), (4, 6));

        // Column 0 runs bottom-to-top (tiles 1..=3), column 1 top-to-bottom (4..=6)
        let expected = [
            (GridPosition::new(2, 0), 1),
            (GridPosition::new(1, 0), 2),
            (GridPosition::new(0, 0), 3),
            (GridPosition::new(0, 1), 4),
            (GridPosition::new(1, 1), 5),
            (GridPosition::new(2, 1), 6),
        ];
        for (cell, value) in expected {
            let x = cell.col as u32 * 2;
            let y = cell.row as u32 * 2;
            assert_eq!(canvas.pixel(x, y), Some(&Luma([value])), "{cell:?}");
            assert_eq!(canvas.pixel(x + 1, y + 1), Some(&Luma([value])), "{cell:?}");
        }
    }

    // Tests later tiles are composited on top of earlier ones in plan order
    // Verified by compositing tiles in reverse order
    #[test]
    fn test_assemble_blend_follows_plan_order() {
        let tiles = vec![
            ImageBuffer::from_pixel(4, 1, Luma([100_u16])),
            ImageBuffer::from_pixel(4, 1, Luma([300_u16])),
        ];
        let grid = spec(1, 2, 2, 0, ScanMode::Horizontal);

        let Ok(canvas) = assemble(&tiles, &grid, CompositePolicy::Blend) else {
            unreachable!("Assembly should succeed");
        };
        assert_eq!(canvas.dimensions(), (6, 1));

        let row: Vec<u16> = (0..6)
            .filter_map(|x| canvas.pixel(x, 0).map(|p| p.0[0]))
            .collect();
        // Both tiles weigh [0, .5, .5, 0]; the second starts at x = 2 with zero
        // weight, so that pixel keeps the first tile's contribution
        assert_eq!(row, vec![0, 50, 50, 150, 150, 0]);
    }
}
