//! Error types for image conversion and printer output.
//!
//! This module defines all possible errors that can occur while turning an
//! image into ESC/POS commands and while handing those commands to a printer.

use thiserror::Error;

/// Main error type for ESC/POS image operations.
///
/// This enum encompasses everything that can fail, from undecodable image
/// data to USB communication issues.
#[derive(Error, Debug)]
pub enum Error {
    /// The input could not be turned into a dot matrix.
    ///
    /// Raised by the rasterizer only. No bytes are produced when this
    /// happens.
    #[error(transparent)]
    InvalidImage(#[from] InvalidImageError),

    /// A dot buffer whose length disagrees with `width * height`.
    #[error("Dot buffer holds {actual} dots, expected {expected}")]
    MatrixSize { expected: usize, actual: usize },

    /// A matrix without columns or rows, nothing could be printed.
    #[error("Dot matrix is empty ({width}x{height})")]
    EmptyMatrix { width: u16, height: u32 },

    /// Invalid configuration parameter provided.
    ///
    /// Covers unknown alignment or model names and a model without any
    /// printable dots.
    #[error("Invalid configuration parameter: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// USB communication error.
    ///
    /// Wraps underlying rusb errors for device communication issues,
    /// timeouts, or permission problems.
    #[error(transparent)]
    UsbError(#[from] rusb::Error),

    /// Printer device is not connected or not responding.
    #[error("Device is offline")]
    DeviceOffline,

    #[error("Can't read device list, permission issue ?")]
    DeviceListNotReadable,

    #[error("Device is missing endpoint")]
    MissingEndpoint,

    #[error("Printer accepted only {0} bytes")]
    InvalidResponse(usize),
}

/// Reasons an image can not be rasterized.
#[derive(Error, Debug)]
pub enum InvalidImageError {
    /// Corrupt data or a format the decoder does not support.
    #[error("Invalid image data")]
    Decode(#[from] image::ImageError),

    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    /// Scaling truncated one of the axes down to nothing.
    #[error("Image scales down to nothing ({width}x{height})")]
    EmptyAfterScaling { width: u32, height: u32 },

    /// The bit-image header only has two bytes for the width.
    #[error("Image is {0} dots wide, at most 65535 can be printed")]
    TooWide(u32),
}
