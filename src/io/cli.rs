//! Command-line interface for building a single mosaic

use crate::io::error::Result;
use crate::io::progress::ProgressManager;
use crate::mosaic::grid::GridSize;
use crate::mosaic::pipeline::{MosaicOutput, MosaicRequest, NoopObserver, create_mosaic};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "photomosaic")]
#[command(
    author,
    version,
    about = "Rebuild an image from a library of tile images matched by average color"
)]
/// Command-line arguments for the mosaic tool
pub struct Cli {
    /// Source image to reproduce (png, jpg or jpeg)
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Directory of library images (*.png, *.jpg, *.jpeg, not searched recursively)
    #[arg(value_name = "LIBRARY")]
    pub library: PathBuf,

    /// Grid size as "cols,rows"
    #[arg(value_name = "GRID")]
    pub grid: GridSize,

    /// Directory the mosaic is written into
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Suppress progress output and the final summary
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the chosen library image for every cell
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Pipeline request described by these arguments
    pub fn request(&self) -> MosaicRequest {
        MosaicRequest {
            source: self.source.clone(),
            library_dir: self.library.clone(),
            grid: self.grid,
            output_dir: self.output_dir.clone(),
        }
    }
}

/// Runs the mosaic pipeline for parsed CLI arguments with progress tracking
pub struct MosaicProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl MosaicProcessor {
    /// Create a new processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Build the mosaic and write it to the output directory
    ///
    /// # Errors
    ///
    /// Returns the first error from loading, matching, compositing or saving
    pub fn process(&mut self) -> Result<MosaicOutput> {
        let request = self.cli.request();

        let result = match self.progress_manager {
            Some(ref mut pm) => create_mosaic(&request, pm),
            None => create_mosaic(&request, &mut NoopObserver),
        };

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        let output = result?;
        if self.cli.verbose {
            Self::report_matches(&output);
        }
        Ok(output)
    }

    /// One line per cell: index, bounds, cell average, chosen library image and its average
    pub fn match_report(output: &MosaicOutput) -> Vec<String> {
        let mosaic = &output.mosaic;
        mosaic
            .matches
            .iter()
            .zip(&mosaic.cells)
            .zip(&mosaic.cell_averages)
            .map(|((matched, cell), average)| {
                let library = output
                    .library_path(matched)
                    .map(|path| path.display().to_string())
                    .unwrap_or_default();
                let library_average = output.library_average(matched).unwrap_or_default();
                format!(
                    "Cell [{:04}] ({},{})-({},{}) {average} -> [{:04}] {library_average} {library}",
                    matched.cell_index,
                    cell.min[0],
                    cell.min[1],
                    cell.max[0],
                    cell.max[1],
                    matched.library_index,
                )
            })
            .collect()
    }

    // Allow print for the per-cell match report requested with --verbose
    #[allow(clippy::print_stderr)]
    fn report_matches(output: &MosaicOutput) {
        for line in Self::match_report(output) {
            eprintln!("{line}");
        }
    }
}
