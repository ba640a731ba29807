//! Mosaic core: each stage takes immutable inputs and returns new values

/// Mean color computation
pub mod color;
/// Canvas assembly from matched tiles
pub mod compositor;
/// Grid partitioning into cells
pub mod grid;
/// Library images with precomputed averages
pub mod library;
/// Nearest-color matching
pub mod matcher;
/// Stage orchestration and progress seam
pub mod pipeline;

pub use grid::{Cell, GridSize};
pub use library::LibraryImage;
pub use pipeline::{Mosaic, MosaicRequest, compose_mosaic, create_mosaic};
