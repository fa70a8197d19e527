//! Image to dot matrix conversion.
//!
//! The image is decoded, flattened onto white paper, optionally scaled to the
//! printer width with nearest-neighbour sampling, and each sample is
//! thresholded on its luminance.

use image::{imageops, DynamicImage, Rgba, RgbaImage};
use log::debug;

use crate::{
    error::{Error, InvalidImageError},
    matrix::DotMatrix,
    DEFAULT_PRINT_WIDTH, THRESHOLD,
};

/// Decode `bytes` and convert the image into a dot matrix.
///
/// When `scale_to_width` is set the image is scaled proportionally so that it
/// spans the 576 dots of an 80 mm printer.
pub fn rasterize(bytes: &[u8], scale_to_width: bool) -> Result<DotMatrix, Error> {
    let print_width = if scale_to_width {
        Some(DEFAULT_PRINT_WIDTH)
    } else {
        None
    };
    rasterize_with_width(bytes, print_width)
}

/// Same as [`rasterize`] but scales to an arbitrary width, `None` keeps the
/// original size.
pub fn rasterize_with_width(bytes: &[u8], print_width: Option<u32>) -> Result<DotMatrix, Error> {
    let image = image::load_from_memory(bytes).map_err(InvalidImageError::Decode)?;
    rasterize_image(&image, print_width)
}

/// Convert an already decoded image.
pub fn rasterize_image(image: &DynamicImage, print_width: Option<u32>) -> Result<DotMatrix, Error> {
    let (src_width, src_height) = (image.width(), image.height());
    if src_width == 0 || src_height == 0 {
        return Err(InvalidImageError::EmptyImage {
            width: src_width,
            height: src_height,
        }
        .into());
    }

    // Transparent areas print as paper, so alpha never reaches the threshold.
    let mut canvas = RgbaImage::from_pixel(src_width, src_height, Rgba([0xFF, 0xFF, 0xFF, 0xFF]));
    imageops::overlay(&mut canvas, &image.to_rgba8(), 0, 0);

    let scale = match print_width {
        Some(width) => width as f64 / src_width as f64,
        None => 1.0,
    };

    // Truncated, not rounded.
    let width = (src_width as f64 * scale) as u32;
    let height = (src_height as f64 * scale) as u32;
    if width == 0 || height == 0 {
        return Err(InvalidImageError::EmptyAfterScaling { width, height }.into());
    }
    let width = u16::try_from(width).map_err(|_| InvalidImageError::TooWide(width))?;

    debug!(
        "rasterize {}x{} -> {}x{} (scale {})",
        src_width, src_height, width, height, scale
    );

    let mut dots = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        let src_y = ((y as f64 / scale) as u32).min(src_height - 1);
        for x in 0..width as u32 {
            let src_x = ((x as f64 / scale) as u32).min(src_width - 1);
            dots.push(luminance(canvas.get_pixel(src_x, src_y)) < THRESHOLD);
        }
    }

    DotMatrix::from_dots(width, height, dots)
}

/// Perceptual luminance `0.30 R + 0.59 G + 0.11 B`, truncated.
///
/// Computed exactly in integers. Evaluating the same weights in `f64` and
/// truncating lands one below the exact value for a few hundred colours
/// (e.g. `(0, 172, 232)` and `(1, 181, 181)` give 126 instead of 127), so
/// those print as ink there and as paper here.
fn luminance(pixel: &Rgba<u8>) -> u32 {
    let [r, g, b, _] = pixel.0;
    (30 * r as u32 + 59 * g as u32 + 11 * b as u32) / 100
}
