//! Canvas assembly from matched library images
//!
//! Each matched library image is cropped around its center to the cell's aspect
//! ratio, scaled to the cell size, and copied opaquely over the cell. Cells never
//! overlap, so the write order does not affect the output.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::io::configuration::RESAMPLING_FILTER;
use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::mosaic::grid::Cell;
use crate::mosaic::library::LibraryImage;
use crate::mosaic::matcher::Match;
use crate::mosaic::pipeline::{Stage, StageObserver};

/// Crop the centered window of `image` with the target aspect ratio, then scale
/// it to exactly `width` x `height`
///
/// Images already at the target size are returned unchanged. The resampled
/// buffer never exceeds the target size.
pub fn fill(image: &RgbaImage, width: u32, height: u32, filter: FilterType) -> RgbaImage {
    let (source_width, source_height) = image.dimensions();
    if (source_width, source_height) == (width, height) {
        return image.clone();
    }
    if width == 0 || height == 0 || source_width == 0 || source_height == 0 {
        return RgbaImage::new(width, height);
    }

    let (crop_width, crop_height) = cover_window(source_width, source_height, width, height);
    let offset_x = (source_width - crop_width) / 2;
    let offset_y = (source_height - crop_height) / 2;
    let cropped =
        imageops::crop_imm(image, offset_x, offset_y, crop_width, crop_height).to_image();

    if (crop_width, crop_height) == (width, height) {
        return cropped;
    }
    imageops::resize(&cropped, width, height, filter)
}

// Largest window of the source with the target aspect ratio, rounded to whole pixels
fn cover_window(source_width: u32, source_height: u32, width: u32, height: u32) -> (u32, u32) {
    let (sw, sh) = (u64::from(source_width), u64::from(source_height));
    let (w, h) = (u64::from(width), u64::from(height));

    if sw * h > w * sh {
        let crop = ((sh * w + h / 2) / h).clamp(1, sw);
        (crop as u32, source_height)
    } else {
        let crop = ((sw * h + w / 2) / w).clamp(1, sh);
        (source_width, crop as u32)
    }
}

/// Assemble the mosaic canvas
///
/// The canvas starts fully transparent; border pixels not covered by any cell
/// stay that way. Resized tiles are cached per library image and cell size.
///
/// # Errors
///
/// Returns an error if a match refers to a missing cell or library image, or a
/// cell does not fit on the canvas
pub fn composite(
    width: u32,
    height: u32,
    cells: &[Cell],
    library: &[LibraryImage],
    matches: &[Match],
    observer: &mut dyn StageObserver,
) -> Result<RgbaImage> {
    let mut canvas = RgbaImage::new(width, height);
    let mut resized: HashMap<(usize, u32, u32), RgbaImage> = HashMap::new();

    observer.stage_started(Stage::Compositing, matches.len());

    for matched in matches {
        let cell = cells
            .get(matched.cell_index)
            .ok_or(MosaicError::InvalidIndex {
                kind: "cell",
                index: matched.cell_index,
                len: cells.len(),
            })?;
        let tile_source = library
            .get(matched.library_index)
            .ok_or(MosaicError::InvalidIndex {
                kind: "library image",
                index: matched.library_index,
                len: library.len(),
            })?;

        if !cell.fits_within(width, height) {
            return Err(invalid_parameter(
                "cell",
                &format!("{:?}", cell.as_region()),
                &format!("outside {width}x{height} canvas"),
            ));
        }

        let tile = match resized.entry((matched.library_index, cell.width(), cell.height())) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(fill(
                tile_source.image(),
                cell.width(),
                cell.height(),
                RESAMPLING_FILTER,
            )),
        };

        imageops::replace(
            &mut canvas,
            &*tile,
            i64::from(cell.min[0]),
            i64::from(cell.min[1]),
        );
        observer.item_completed();
    }

    observer.stage_finished();
    Ok(canvas)
}
