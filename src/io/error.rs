//! Error types for mosaic assembly and its collaborators

use std::fmt;
use std::path::PathBuf;

/// Main error type for all mosaic operations
///
/// Every variant is fatal to the current run; no partial output is written.
#[derive(Debug)]
pub enum MosaicError {
    /// Tile sequence length differs from the grid size
    TileCountMismatch {
        /// Number of tiles the grid requires (`rows * cols`)
        expected: usize,
        /// Number of tiles supplied
        actual: usize,
    },

    /// A tile's dimensions differ from the first tile's
    TileSizeMismatch {
        /// Sequence index of the offending tile
        index: usize,
        /// Dimensions shared by the run, as (width, height)
        expected: (u32, u32),
        /// Dimensions of the offending tile, as (width, height)
        actual: (u32, u32),
    },

    /// Computed canvas dimensions are not usable
    ///
    /// Occurs when:
    /// - An overlap is at least as large as the tile dimension
    /// - The grid has no rows or no columns
    /// - The canvas would be too large to address
    DimensionError {
        /// Computed canvas width
        width: i64,
        /// Computed canvas height
        height: i64,
        /// Description of the failed constraint
        reason: String,
    },

    /// Scan mode name is not recognised
    InvalidScanMode {
        /// The rejected name
        value: String,
    },

    /// Fewer input images were found than the grid needs
    NotEnoughTiles {
        /// Number of images available
        available: usize,
        /// Number of images required (`rows * cols`)
        required: usize,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Filename filter could not be compiled
    InvalidPattern {
        /// The pattern as given
        pattern: String,
        /// Underlying regex error
        source: regex::Error,
    },

    /// Failed to load a tile from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to encode the finished mosaic
    ImageEncode {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying TIFF encoder error
        source: tiff::TiffError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TileCountMismatch { expected, actual } => {
                write!(
                    f,
                    "Number of tiles ({actual}) does not match grid size ({expected})"
                )
            }
            Self::TileSizeMismatch {
                index,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Tile {index} is {}x{}, expected {}x{}",
                    actual.0, actual.1, expected.0, expected.1
                )
            }
            Self::DimensionError {
                width,
                height,
                reason,
            } => {
                write!(f, "Invalid canvas dimensions {width}x{height}: {reason}")
            }
            Self::InvalidScanMode { value } => {
                write!(
                    f,
                    "Invalid snake mode '{value}' (use 'vertical' or 'horizontal')"
                )
            }
            Self::NotEnoughTiles {
                available,
                required,
            } => {
                write!(f, "Not enough images: have {available} need {required}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidPattern { pattern, source } => {
                write!(f, "Invalid filename pattern '{pattern}': {source}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageEncode { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidPattern { source, .. } => Some(source),
            Self::ImageLoad { source, .. } => Some(source),
            Self::ImageEncode { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for mosaic results
pub type Result<T> = std::result::Result<T, MosaicError>;

impl From<image::ImageError> for MosaicError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for MosaicError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
