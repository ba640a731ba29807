//! Nearest-color assignment of library images to grid cells

use crate::io::error::{MosaicError, Result};
use crate::mosaic::color::Rgb;

/// Library image chosen for one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Index into the cell list
    pub cell_index: usize,
    /// Index into the library
    pub library_index: usize,
}

/// Index of the library color closest to `target`
///
/// Ties keep the earliest candidate, so the result follows library load order.
/// Returns `None` for an empty library.
pub fn nearest(target: Rgb, library_averages: &[Rgb]) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (index, candidate) in library_averages.iter().enumerate() {
        let distance = target.squared_distance(candidate);
        if best.is_none_or(|(_, minimum)| distance < minimum) {
            best = Some((index, distance));
        }
    }
    best.map(|(index, _)| index)
}

/// Match every cell average to its nearest library average
///
/// # Errors
///
/// Returns [`MosaicError::EmptyLibrary`] before scanning if there are no
/// library averages
pub fn find_best_matches(cell_averages: &[Rgb], library_averages: &[Rgb]) -> Result<Vec<Match>> {
    if library_averages.is_empty() {
        return Err(MosaicError::EmptyLibrary {
            path: "<in-memory library>".into(),
        });
    }

    cell_averages
        .iter()
        .enumerate()
        .map(|(cell_index, &average)| {
            nearest(average, library_averages)
                .map(|library_index| Match {
                    cell_index,
                    library_index,
                })
                .ok_or_else(|| MosaicError::EmptyLibrary {
                    path: "<in-memory library>".into(),
                })
        })
        .collect()
}
