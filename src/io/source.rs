//! Tile discovery, ordering and decoding
//!
//! Tiles come either from a directory walk (optionally filtered by a regex on
//! the file name) or from a list file. The resulting order is the acquisition
//! order and must match the snake plan used for placement.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use image::Luma;
use image::imageops::{self, FilterType};
use log::debug;
use regex::Regex;

use crate::io::configuration::{SEQUENCE_NUMBER_PATTERN, TILE_EXTENSIONS};
use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::mosaic::Tile;

/// Single-channel 16-bit tile as consumed by the command-line pipeline
pub type GrayTile = Tile<Luma<u16>>;

static SEQUENCE_NUMBER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(SEQUENCE_NUMBER_PATTERN).ok());

/// Sequence number embedded in a tile path, or 0 when there is none
pub fn sequence_number(path: &Path) -> u64 {
    let Some(pattern) = SEQUENCE_NUMBER.as_ref() else {
        return 0;
    };

    pattern
        .captures(&path.to_string_lossy())
        .and_then(|captures| captures.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
        .unwrap_or(0)
}

/// Stable sort of tile paths by their embedded sequence number
pub fn sort_by_sequence_number(paths: &mut [PathBuf]) {
    paths.sort_by_cached_key(|path| sequence_number(path));
}

fn has_tile_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| TILE_EXTENSIONS.contains(&ext))
}

fn matches_filter(path: &Path, filter: Option<&Regex>) -> bool {
    filter.is_none_or(|pattern| {
        path.file_name()
            .is_some_and(|name| pattern.is_match(&name.to_string_lossy()))
    })
}

fn walk_directory(dir: &Path, filter: Option<&Regex>, paths: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(dir).map_err(|e| MosaicError::FileSystem {
        path: dir.to_path_buf(),
        operation: "read directory",
        source: e,
    })?;

    let mut children = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| MosaicError::FileSystem {
            path: dir.to_path_buf(),
            operation: "read directory entry",
            source: e,
        })?;
        children.push(entry.path());
    }
    children.sort();

    for path in children {
        if path.is_dir() {
            walk_directory(&path, filter, paths)?;
        } else if has_tile_extension(&path) && matches_filter(&path, filter) {
            paths.push(path);
        }
    }

    Ok(())
}

/// Find TIFF tiles below `dir`, ordered by sequence number
///
/// The walk is recursive and visits entries in lexical order, so tiles with
/// equal (or missing) sequence numbers keep lexical path order.
///
/// # Errors
///
/// Returns an error if a directory cannot be read
pub fn collect_directory(dir: &Path, filter: Option<&Regex>) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    walk_directory(dir, filter, &mut paths)?;
    sort_by_sequence_number(&mut paths);
    Ok(paths)
}

/// Read tile paths from a list file, one per line, in file order
///
/// Blank lines are skipped and surrounding whitespace is trimmed.
///
/// # Errors
///
/// Returns an error if the list file cannot be read
pub fn read_list_file(list: &Path) -> Result<Vec<PathBuf>> {
    let contents = std::fs::read_to_string(list).map_err(|e| MosaicError::FileSystem {
        path: list.to_path_buf(),
        operation: "read list file",
        source: e,
    })?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect())
}

/// Overlap in downsampled pixels for a full-resolution `overlap`
pub const fn scale_overlap(overlap: u32, factor: u32) -> u32 {
    if factor == 0 { overlap } else { overlap / factor }
}

/// Shrink a tile by an integer factor with a Lanczos3 filter
///
/// A factor of 1 returns the tile unchanged.
///
/// # Errors
///
/// Returns [`MosaicError::InvalidParameter`] if the factor is zero or larger
/// than either tile dimension
pub fn downsample(tile: GrayTile, factor: u32) -> Result<GrayTile> {
    if factor == 0 {
        return Err(invalid_parameter(
            "downsample",
            &factor,
            &"downsample factor must be >= 1",
        ));
    }
    if factor == 1 {
        return Ok(tile);
    }

    let width = tile.width() / factor;
    let height = tile.height() / factor;
    if width == 0 || height == 0 {
        return Err(invalid_parameter(
            "downsample",
            &factor,
            &format!(
                "factor exceeds tile dimensions {}x{}",
                tile.width(),
                tile.height()
            ),
        ));
    }

    Ok(imageops::resize(&tile, width, height, FilterType::Lanczos3))
}

/// Decode a tile as 16-bit grayscale, downsampling when `factor > 1`
///
/// # Errors
///
/// Returns an error if the image cannot be decoded or the factor is invalid
pub fn load_tile(path: &Path, factor: u32) -> Result<GrayTile> {
    debug!("Processing {}", path.display());

    let decoded = image::open(path).map_err(|e| MosaicError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;

    downsample(decoded.into_luma16(), factor)
}
