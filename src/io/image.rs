//! Image decoding, output naming and PNG/JPEG export

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ImageError, ImageReader, RgbaImage};

use crate::io::configuration::{JPEG_QUALITY, OUTPUT_SUFFIX};
use crate::io::error::{MosaicError, Result};

/// Encoding used for the mosaic, chosen from the source extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Lossless PNG with alpha
    Png,
    /// JPEG at [`JPEG_QUALITY`]
    Jpeg,
}

impl OutputFormat {
    /// Pick the format for a path's extension, ignoring ASCII case
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::UnsupportedFormat`] for anything other than
    /// `png`, `jpg` or `jpeg`
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();

        match extension.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            _ => Err(MosaicError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: extension.to_string(),
            }),
        }
    }
}

/// Decode an image and normalize it to 8-bit RGBA
///
/// The format is detected from the file contents, falling back to the
/// extension when the contents are not recognized.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_image(path: &Path) -> Result<RgbaImage> {
    let load_error = |source: ImageError| MosaicError::ImageLoad {
        path: path.to_path_buf(),
        source,
    };

    let img = ImageReader::open(path)
        .and_then(ImageReader::with_guessed_format)
        .map_err(|e| load_error(ImageError::IoError(e)))?
        .decode()
        .map_err(load_error)?;
    Ok(img.into_rgba8())
}

/// Output location for a source image: `<output_dir>/<stem>_out.<ext>`
///
/// The stem is the file name up to its first `.`, so `photo.v2.png` becomes
/// `photo_out.png`. The extension is kept exactly as given.
///
/// # Errors
///
/// Returns an error if the source has no usable file name or extension
pub fn output_path(source: &Path, output_dir: &Path) -> Result<PathBuf> {
    let unsupported = || MosaicError::UnsupportedFormat {
        path: source.to_path_buf(),
        extension: String::new(),
    };

    let file_name = source
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(unsupported)?;
    let extension = source
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(unsupported)?;
    let stem = file_name.split('.').next().unwrap_or_default();

    Ok(output_dir.join(format!("{stem}{OUTPUT_SUFFIX}.{extension}")))
}

/// Encode the canvas and write it to `path`, creating the parent directory
///
/// Once the file exists, any later failure removes it again.
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory or the file cannot be created
/// - Encoding fails
/// - The encoded bytes cannot be flushed to disk
pub fn save_image(canvas: &RgbaImage, path: &Path, format: OutputFormat) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| MosaicError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    let file = File::create(path).map_err(|e| MosaicError::FileSystem {
        path: path.to_path_buf(),
        operation: "create file",
        source: e,
    })?;

    let written = encode_image(canvas, BufWriter::new(file), path, format);
    if written.is_err() {
        let _ = std::fs::remove_file(path);
    }
    written
}

/// Encode the canvas into `writer` and flush it
///
/// `path` only labels errors.
///
/// # Errors
///
/// Returns [`MosaicError::ImageExport`] if encoding fails, or
/// [`MosaicError::FileSystem`] if the writer cannot be flushed
pub fn encode_image<W: Write>(
    canvas: &RgbaImage,
    mut writer: W,
    path: &Path,
    format: OutputFormat,
) -> Result<()> {
    let encoded = match format {
        OutputFormat::Png => canvas.write_with_encoder(PngEncoder::new(&mut writer)),
        OutputFormat::Jpeg => DynamicImage::ImageRgba8(canvas.clone())
            .into_rgb8()
            .write_with_encoder(JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY)),
    };
    encoded.map_err(|e| MosaicError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })?;

    writer.flush().map_err(|e| MosaicError::FileSystem {
        path: path.to_path_buf(),
        operation: "write file",
        source: e,
    })
}
