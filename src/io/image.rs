//! Label image PNG import and export
//!
//! Label images are single-channel grayscale, read as 16-bit. Gray 8-bit
//! inputs are widened by the decoder, which scales values but keeps their
//! order and keeps 0 at 0, so renumbering produces the same result either way.
//! Colour and palette images are rejected: collapsing them to luminance could
//! merge distinct labels.

use std::path::Path;

use image::{ColorType, ImageBuffer, Luma};
use ndarray::Array2;

use crate::io::error::{ArrayError, Result, invalid_argument, layout_error};

/// Load a label image as a `(height, width)` array
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded, and
/// `InvalidArgument` if it is not single-channel grayscale.
pub fn load_label_image(path: &Path) -> Result<Array2<u16>> {
    let img = image::open(path).map_err(|e| ArrayError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    let color = img.color();
    if !matches!(color, ColorType::L8 | ColorType::L16) {
        return Err(invalid_argument(
            "color type",
            &format!("{color:?} in {}", path.display()),
            &"label images must be single-channel grayscale",
        ));
    }
    let luma = img.into_luma16();
    let (width, height) = luma.dimensions();

    Ok(Array2::from_shape_vec(
        (height as usize, width as usize),
        luma.into_raw(),
    )?)
}

/// Save a `(height, width)` label array as a 16-bit grayscale PNG
///
/// # Errors
///
/// Returns an error if:
/// - The array is too large for the PNG format
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn save_label_image(labels: &Array2<u16>, path: &Path) -> Result<()> {
    let (height, width) = labels.dim();
    let width = u32::try_from(width)
        .map_err(|_| invalid_argument("width", &width, &"exceeds the PNG size limit"))?;
    let height = u32::try_from(height)
        .map_err(|_| invalid_argument("height", &height, &"exceeds the PNG size limit"))?;

    let pixels: Vec<u16> = labels.iter().copied().collect();
    let img: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::from_raw(width, height, pixels)
        .ok_or_else(|| layout_error(&"pixel buffer does not match the image size"))?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ArrayError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(path).map_err(|e| ArrayError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}
