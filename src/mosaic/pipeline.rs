//! End-to-end mosaic driver
//!
//! Stages run strictly forward: partition the source, average each cell, match
//! cells against library averages, then composite. Every stage takes its inputs
//! by reference and returns new values; only the compositor mutates, and only its
//! own canvas. The first error aborts the run and nothing is written.

use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::io::discovery::load_library;
use crate::io::error::{MosaicError, Result};
use crate::io::image::{OutputFormat, load_image, output_path, save_image};
use crate::mosaic::color::{Rgb, average_region};
use crate::mosaic::compositor::composite;
use crate::mosaic::grid::{Cell, GridSize, partition};
use crate::mosaic::library::LibraryImage;
use crate::mosaic::matcher::{Match, find_best_matches};

/// Pipeline stages that report progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Decoding and averaging library images
    LoadingLibrary,
    /// Averaging source cells
    AveragingCells,
    /// Writing matched tiles onto the canvas
    Compositing,
}

impl Stage {
    /// Short human-readable stage name
    pub const fn label(self) -> &'static str {
        match self {
            Self::LoadingLibrary => "Loading library",
            Self::AveragingCells => "Averaging cells",
            Self::Compositing => "Compositing",
        }
    }
}

/// Receives progress notifications from pipeline stages
pub trait StageObserver {
    /// A stage began with `total` units of work
    fn stage_started(&mut self, _stage: Stage, _total: usize) {}

    /// One unit of work in the current stage finished
    fn item_completed(&mut self) {}

    /// The current stage finished
    fn stage_finished(&mut self) {}
}

/// Observer that ignores all notifications
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl StageObserver for NoopObserver {}

/// Fully composed mosaic together with the intermediate results that produced it
#[derive(Debug, Clone)]
pub struct Mosaic {
    /// Output image with the same dimensions as the source
    pub canvas: RgbaImage,
    /// Grid cells in column-major order
    pub cells: Vec<Cell>,
    /// Average color of each cell, indexed like `cells`
    pub cell_averages: Vec<Rgb>,
    /// One match per cell, in cell order
    pub matches: Vec<Match>,
}

/// Compose a mosaic in memory
///
/// # Errors
///
/// Returns an error if the library is empty or the grid cannot partition the
/// source; both are checked before any matching happens
pub fn compose_mosaic(
    source: &RgbaImage,
    library: &[LibraryImage],
    grid: GridSize,
    observer: &mut dyn StageObserver,
) -> Result<Mosaic> {
    if library.is_empty() {
        return Err(MosaicError::EmptyLibrary {
            path: "<in-memory library>".into(),
        });
    }

    let (width, height) = source.dimensions();
    let cells = partition(width, height, grid)?;

    observer.stage_started(Stage::AveragingCells, cells.len());
    let mut cell_averages = Vec::with_capacity(cells.len());
    for cell in &cells {
        cell_averages.push(average_region(source, cell)?);
        observer.item_completed();
    }
    observer.stage_finished();

    let library_averages: Vec<Rgb> = library.iter().map(LibraryImage::average).collect();
    let matches = find_best_matches(&cell_averages, &library_averages)?;

    let canvas = composite(width, height, &cells, library, &matches, observer)?;

    Ok(Mosaic {
        canvas,
        cells,
        cell_averages,
        matches,
    })
}

/// Files and grid for one mosaic run
#[derive(Debug, Clone)]
pub struct MosaicRequest {
    /// Source image to reproduce
    pub source: PathBuf,
    /// Directory scanned for library images
    pub library_dir: PathBuf,
    /// Grid dimensions
    pub grid: GridSize,
    /// Directory the output is written into
    pub output_dir: PathBuf,
}

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct MosaicOutput {
    /// Where the encoded mosaic was written
    pub output_path: PathBuf,
    /// The composed mosaic
    pub mosaic: Mosaic,
    /// Library file paths in load order, indexed like match library indices
    pub library_paths: Vec<PathBuf>,
    /// Library average colors, indexed like `library_paths`
    pub library_averages: Vec<Rgb>,
}

impl MosaicOutput {
    /// Library file chosen for a match
    pub fn library_path(&self, matched: &Match) -> Option<&Path> {
        self.library_paths
            .get(matched.library_index)
            .map(PathBuf::as_path)
    }

    /// Average color of the library image chosen for a match
    pub fn library_average(&self, matched: &Match) -> Option<Rgb> {
        self.library_averages.get(matched.library_index).copied()
    }
}

/// Load inputs, compose the mosaic and write it to disk
///
/// The output path is `<output_dir>/<source stem>_out.<source extension>`.
///
/// # Errors
///
/// Returns an error if:
/// - The source extension has no encoder (checked before any loading)
/// - The source image or a library image cannot be decoded
/// - The grid is finer than the source image
/// - The library directory cannot be read or contains no images
/// - The mosaic cannot be encoded or written
pub fn create_mosaic(
    request: &MosaicRequest,
    observer: &mut dyn StageObserver,
) -> Result<MosaicOutput> {
    let format = OutputFormat::from_path(&request.source)?;
    let destination = output_path(&request.source, &request.output_dir)?;

    let source = load_image(&request.source)?;
    request.grid.cell_size(source.width(), source.height())?;

    let library = load_library(&request.library_dir, observer)?;
    if library.is_empty() {
        return Err(MosaicError::EmptyLibrary {
            path: request.library_dir.clone(),
        });
    }

    let mosaic = compose_mosaic(&source, &library, request.grid, observer)?;
    save_image(&mosaic.canvas, &destination, format)?;

    Ok(MosaicOutput {
        output_path: destination,
        mosaic,
        library_paths: library
            .iter()
            .map(|entry| entry.path().to_path_buf())
            .collect(),
        library_averages: library.iter().map(LibraryImage::average).collect(),
    })
}
