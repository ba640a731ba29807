//! Photo-mosaic generation by average-color tile matching
//!
//! The source image is split into a grid of cells, each cell is matched to the
//! library image whose mean color is nearest, and the matched images are resized
//! into their cells to form an output image of the same size as the source.

#![forbid(unsafe_code)]

/// Input/output boundaries, configuration and error handling
pub mod io;
/// Grid partitioning, color averaging, matching and composition
pub mod mosaic;

pub use io::error::{MosaicError, Result};
