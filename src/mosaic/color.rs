//! Mean color computation over pixel regions
//!
//! Each 8-bit sample is widened to 16 bits (`v * 257`) before summing, the sum is
//! divided by the pixel count and the result truncated back to 8 bits with a right
//! shift. A uniform region therefore averages to exactly its own color. Alpha is
//! ignored.

use image::RgbaImage;

use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::mosaic::grid::Cell;

/// Mean color of a pixel region as 8-bit RGB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    /// Create a color from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Squared Euclidean distance between two colors
    pub fn squared_distance(&self, other: &Self) -> u32 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(&a, &b)| {
                let delta = i32::from(a) - i32::from(b);
                delta.unsigned_abs() * delta.unsigned_abs()
            })
            .sum()
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "({r:3}, {g:3}, {b:3})")
    }
}

const fn widen(sample: u8) -> u64 {
    sample as u64 * 257
}

/// Average color of a cell within an image
///
/// # Errors
///
/// Returns an error if the cell is empty or extends past the image bounds
pub fn average_region(image: &RgbaImage, cell: &Cell) -> Result<Rgb> {
    if !cell.fits_within(image.width(), image.height()) {
        return Err(invalid_parameter(
            "region",
            &format!("{:?}", cell.as_region()),
            &format!("outside {}x{} image", image.width(), image.height()),
        ));
    }

    let total_pixels = cell.area();
    if total_pixels == 0 {
        return Err(MosaicError::EmptyRegion {
            region: cell.as_region(),
        });
    }

    let mut sums = [0u64; 3];
    for y in cell.min[1]..cell.max[1] {
        for x in cell.min[0]..cell.max[0] {
            let pixel = image
                .get_pixel_checked(x, y)
                .ok_or(MosaicError::EmptyRegion {
                    region: cell.as_region(),
                })?;
            for (sum, &sample) in sums.iter_mut().zip(pixel.0.iter()) {
                *sum += widen(sample);
            }
        }
    }

    Ok(Rgb(sums.map(|sum| ((sum / total_pixels) >> 8) as u8)))
}

/// Average color of a whole image
///
/// # Errors
///
/// Returns an error if the image has no pixels
pub fn average_image(image: &RgbaImage) -> Result<Rgb> {
    let whole = Cell {
        min: [0, 0],
        max: [image.width(), image.height()],
    };
    average_region(image, &whole)
}

/// Average color of every cell, indexed like `cells`
///
/// # Errors
///
/// Returns the first error from [`average_region`]
pub fn average_cells(image: &RgbaImage, cells: &[Cell]) -> Result<Vec<Rgb>> {
    cells
        .iter()
        .map(|cell| average_region(image, cell))
        .collect()
}
