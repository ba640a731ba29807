//! Error types for mosaic construction and its file boundaries

use std::fmt;
use std::path::PathBuf;

/// Main error type for all mosaic operations
#[derive(Debug)]
pub enum MosaicError {
    /// Failed to load or decode an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
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

    /// The library directory holds no usable images
    EmptyLibrary {
        /// Directory that was scanned
        path: PathBuf,
    },

    /// Grid is finer than the source resolution, so cells would have zero area
    DegenerateGrid {
        /// Requested grid as (columns, rows)
        grid: (u32, u32),
        /// Source image dimensions as (width, height)
        dimensions: (u32, u32),
    },

    /// Color averaging was asked to cover zero pixels
    EmptyRegion {
        /// Region as `[min_x, min_y, max_x, max_y]`
        region: [u32; 4],
    },

    /// An index referenced a cell or library image that does not exist
    InvalidIndex {
        /// What kind of collection was indexed
        kind: &'static str,
        /// The invalid index
        index: usize,
        /// Length of the indexed collection
        len: usize,
    },

    /// Output extension has no encoder
    UnsupportedFormat {
        /// Path whose extension was rejected
        path: PathBuf,
        /// The rejected extension (empty when missing)
        extension: String,
    },

    /// Failed to encode or save the mosaic
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
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
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::EmptyLibrary { path } => {
                write!(
                    f,
                    "No library images (png, jpg, jpeg) found in '{}'",
                    path.display()
                )
            }
            Self::DegenerateGrid { grid, dimensions } => {
                write!(
                    f,
                    "Grid {}x{} is finer than the {}x{} source image; cells would be empty",
                    grid.0, grid.1, dimensions.0, dimensions.1
                )
            }
            Self::EmptyRegion { region } => {
                write!(
                    f,
                    "Cannot average empty region ({},{})-({},{})",
                    region[0], region[1], region[2], region[3]
                )
            }
            Self::InvalidIndex { kind, index, len } => {
                write!(f, "{kind} index {index} is out of bounds (len: {len})")
            }
            Self::UnsupportedFormat { path, extension } => {
                write!(
                    f,
                    "Unsupported output format '{extension}' for '{}' (expected png, jpg or jpeg)",
                    path.display()
                )
            }
            Self::ImageExport { path, source } => {
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
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
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
