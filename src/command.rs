//! ESC/POS bit-image command stream.
//!
//! An image is printed as a sequence of 24-dot double-density strips
//! (`ESC * 33`). Each strip is sent column by column, three bytes per column,
//! most significant bit on top, and followed by a line feed. The line spacing
//! is set to exactly one strip for the duration of the image so consecutive
//! strips touch.

use log::debug;

use crate::{alignment::Alignment, matrix::DotMatrix, STRIP_HEIGHT};

const ESC: u8 = 0x1B;
const LF: u8 = 0x0A;

/// `m` parameter of `ESC *` selecting 24-dot double-density.
const DOUBLE_DENSITY_24: u8 = 33;

/// Line spacing restored once the image is done.
const RESTORED_LINE_SPACING: u8 = 0x28;

const BYTES_PER_COLUMN: usize = (STRIP_HEIGHT / 8) as usize;

/// ESC @ : Initialize printer
pub fn initialize(buf: &mut Vec<u8>) {
    buf.extend_from_slice(&[ESC, 0x40]);
}

/// ESC 3 n : Set line spacing to `n` dots
pub fn set_line_spacing(buf: &mut Vec<u8>, dots: u8) {
    buf.extend_from_slice(&[ESC, 0x33, dots]);
}

/// ESC a n : Select justification
pub fn select_alignment(buf: &mut Vec<u8>, alignment: Alignment) {
    buf.extend_from_slice(&[ESC, 0x61, alignment.code()]);
}

/// ESC * m nL nH : Select bit-image mode, `width` columns follow
pub fn bit_image_header(buf: &mut Vec<u8>, width: u16) {
    buf.extend_from_slice(&[ESC, 0x2A, DOUBLE_DENSITY_24]);
    buf.extend_from_slice(&width.to_le_bytes());
}

/// Exact number of bytes [`encode`] produces for `matrix`.
pub fn encoded_len(matrix: &DotMatrix) -> usize {
    let strip = 5 + matrix.width() as usize * BYTES_PER_COLUMN + 1;
    2 + 3 + 3 + matrix.strip_count() as usize * strip + 3
}

/// Serialize a dot matrix into the bytes to send to the printer.
pub fn encode(matrix: &DotMatrix, alignment: Alignment) -> Vec<u8> {
    let mut buf: Vec<u8> = Vec::with_capacity(encoded_len(matrix));

    initialize(&mut buf);
    set_line_spacing(&mut buf, STRIP_HEIGHT as u8);
    select_alignment(&mut buf, alignment);

    debug!(
        "encode {}x{} in {} strips, {:?}",
        matrix.width(),
        matrix.height(),
        matrix.strip_count(),
        alignment
    );

    for strip in 0..matrix.strip_count() {
        let offset = strip * STRIP_HEIGHT;
        bit_image_header(&mut buf, matrix.width());
        for x in 0..matrix.width() as u32 {
            for k in 0..BYTES_PER_COLUMN as u32 {
                buf.push(pack_column(matrix, x, offset.saturating_add(k * 8)));
            }
        }
        buf.push(LF);
    }

    set_line_spacing(&mut buf, RESTORED_LINE_SPACING);
    buf
}

/// Pack eight vertical dots starting at row `top`, the top one in bit 7.
fn pack_column(matrix: &DotMatrix, x: u32, top: u32) -> u8 {
    let mut slice: u8 = 0x00;
    for b in 0..8 {
        if matrix.is_ink(x, top.saturating_add(b)) {
            slice |= 1 << (7 - b);
        }
    }
    slice
}
