//! Library directory scanning and loading

use std::path::{Path, PathBuf};

use crate::io::configuration::ACCEPTED_EXTENSIONS;
use crate::io::error::{MosaicError, Result};
use crate::io::image::load_image;
use crate::mosaic::library::LibraryImage;
use crate::mosaic::pipeline::{Stage, StageObserver};

/// List library image files directly inside `dir`
///
/// Files are grouped by extension in [`ACCEPTED_EXTENSIONS`] order and sorted by
/// path within each group. Subdirectories are not searched.
///
/// # Errors
///
/// Returns an error if the directory or one of its entries cannot be read
pub fn discover_library_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let read_error = |e| MosaicError::FileSystem {
        path: dir.to_path_buf(),
        operation: "read library directory",
        source: e,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if !path.is_file() {
            continue;
        }
        let group = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ACCEPTED_EXTENSIONS.iter().position(|&accepted| accepted == ext));
        if let Some(group) = group {
            files.push((group, path));
        }
    }

    files.sort();
    Ok(files.into_iter().map(|(_, path)| path).collect())
}

/// Decode every library file in discovery order
///
/// Stops at the first file that fails to decode.
///
/// # Errors
///
/// Returns an error if the directory cannot be scanned or a file cannot be
/// decoded
pub fn load_library(dir: &Path, observer: &mut dyn StageObserver) -> Result<Vec<LibraryImage>> {
    let files = discover_library_files(dir)?;

    observer.stage_started(Stage::LoadingLibrary, files.len());
    let mut library = Vec::with_capacity(files.len());
    for path in files {
        let image = load_image(&path)?;
        library.push(LibraryImage::new(path, image)?);
        observer.item_completed();
    }
    observer.stage_finished();

    Ok(library)
}
