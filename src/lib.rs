//! ESC/POS Image Printing
//!
//! This crate turns an image (PNG, JPEG, BMP, ... anything the `image` crate
//! decodes) into the 24-dot double-density bit-image commands understood by
//! ESC/POS thermal receipt printers.
//!
//! # Example
//!
//! ```rust,no_run
//! use escpos_image::{encode, rasterize, Alignment};
//!
//! let png = std::fs::read("logo.png").unwrap();
//! let matrix = rasterize(&png, true).unwrap();
//! let bytes = encode(&matrix, Alignment::Center);
//! // Send `bytes` to the printer...
//! ```

mod alignment;
pub mod command;
mod config;
mod error;
mod matrix;
mod model;
mod printer;
mod raster;

pub use crate::{
    alignment::Alignment,
    command::{encode, encoded_len},
    config::Config,
    error::{Error, InvalidImageError},
    matrix::DotMatrix,
    model::Model,
    printer::{write_image, Printer, UsbDevice},
    raster::{rasterize, rasterize_image, rasterize_with_width},
};

/// Dots across an 80 mm receipt printer (72 mm at 203 dpi).
///
/// This is the width images are scaled to by [`rasterize`].
pub const DEFAULT_PRINT_WIDTH: u32 = 576;

/// Dots across a 58 mm receipt printer (48 mm at 203 dpi).
pub const NARROW_PRINT_WIDTH: u32 = 384;

/// Luminance below which a pixel is printed.
pub const THRESHOLD: u32 = 127;

/// Rows printed by one bit-image command in 24-dot mode.
pub const STRIP_HEIGHT: u32 = 24;
