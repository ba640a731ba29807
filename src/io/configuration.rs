//! Mosaic constants and runtime configuration defaults

use image::imageops::FilterType;

/// Library file extensions picked up during discovery, in load order
///
/// Matching is exact, so `PHOTO.JPG` is not part of the library.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

// Output settings
/// Suffix added to the source file stem for the output filename
pub const OUTPUT_SUFFIX: &str = "_out";
/// Quality used when the output is encoded as JPEG
pub const JPEG_QUALITY: u8 = 90;

/// Resampling filter for fitting library images into cells
pub const RESAMPLING_FILTER: FilterType = FilterType::Lanczos3;

// Safety limit to prevent runaway allocation of cell lists
/// Maximum allowed grid dimension on either axis
pub const MAX_GRID_DIMENSION: u32 = 10_000;

// Progress bar display settings
/// Template for per-stage progress bars
pub const STAGE_TEMPLATE: &str = "{prefix:>18} [{bar:40.cyan/blue}] {pos}/{len} {msg}";
/// Characters used to draw progress bars
pub const PROGRESS_CHARS: &str = "█▉▊▋▌▍▎▏ ";
