use crate::{error::Error, STRIP_HEIGHT};

/// Monochrome dot matrix produced by the rasterizer.
///
/// Dots are stored row-major (`y * width + x`), `true` meaning the printer
/// should burn a dot. A matrix can only be built through [`DotMatrix::from_dots`],
/// so both sides are positive, the buffer length always equals
/// `width * height` and the width always fits the two-byte width field of a
/// bit-image header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotMatrix {
    width: u16,
    height: u32,
    dots: Vec<bool>,
}

impl DotMatrix {
    pub fn from_dots(width: u16, height: u32, dots: Vec<bool>) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyMatrix { width, height });
        }
        let expected = width as usize * height as usize;
        if dots.len() != expected {
            return Err(Error::MatrixSize {
                expected,
                actual: dots.len(),
            });
        }

        Ok(DotMatrix {
            width,
            height,
            dots,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dots(&self) -> &[bool] {
        &self.dots
    }

    /// Read a single dot.
    ///
    /// Coordinates outside the matrix read as blank, which is how the last
    /// strip of an image gets padded.
    pub fn is_ink(&self, x: u32, y: u32) -> bool {
        if x >= self.width as u32 || y >= self.height {
            return false;
        }
        self.dots[y as usize * self.width as usize + x as usize]
    }

    /// Number of 24-row strips needed to print the whole matrix.
    pub fn strip_count(&self) -> u32 {
        strips_for(self.height)
    }
}

fn strips_for(height: u32) -> u32 {
    if height == 0 {
        return 0;
    }
    (height - 1) / STRIP_HEIGHT + 1
}
