//! Candidate tile images with their precomputed mean color

use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::io::error::Result;
use crate::mosaic::color::{Rgb, average_image};

/// A decoded library image paired with its source path and average color
#[derive(Debug, Clone)]
pub struct LibraryImage {
    path: PathBuf,
    image: RgbaImage,
    average: Rgb,
}

impl LibraryImage {
    /// Wrap a decoded image, computing its average color once
    ///
    /// # Errors
    ///
    /// Returns an error if the image has no pixels
    pub fn new(path: impl Into<PathBuf>, image: RgbaImage) -> Result<Self> {
        let average = average_image(&image)?;
        Ok(Self {
            path: path.into(),
            image,
            average,
        })
    }

    /// File the image was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decoded pixels
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Average color over the whole image
    pub const fn average(&self) -> Rgb {
        self.average
    }
}
