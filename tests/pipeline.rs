use escpos_image::{
    encode, rasterize, write_image, Alignment, Config, Error, InvalidImageError, Model,
};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use qrcode::{Color, QrCode};
use std::io::Cursor;

fn png(image: RgbaImage) -> Vec<u8> {
    let mut bytes = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(image)
        .write_to(&mut bytes, ImageFormat::Png)
        .unwrap();
    bytes.into_inner()
}

#[test]
fn two_by_two_black_image() {
    let bytes = png(RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255])));

    let matrix = rasterize(&bytes, false).unwrap();
    assert_eq!(matrix.width(), 2);
    assert_eq!(matrix.height(), 2);
    assert_eq!(matrix.dots(), &[true, true, true, true]);

    let stream = encode(&matrix, Alignment::Left);
    assert_eq!(
        stream,
        vec![
            0x1B, 0x40, 0x1B, 0x33, 0x18, 0x1B, 0x61, 0x00, 0x1B, 0x2A, 0x21, 0x02, 0x00, 0xC0,
            0x00, 0x00, 0xC0, 0x00, 0x00, 0x0A, 0x1B, 0x33, 0x28,
        ]
    );
}

#[test]
fn semi_transparent_logo_on_white() {
    // Left half opaque black, right half black at 10% opacity.
    let mut image = RgbaImage::from_pixel(8, 4, Rgba([0, 0, 0, 255]));
    for y in 0..4 {
        for x in 4..8 {
            image.put_pixel(x, y, Rgba([0, 0, 0, 25]));
        }
    }

    let matrix = rasterize(&png(image), false).unwrap();
    for y in 0..4 {
        for x in 0..8 {
            assert_eq!(matrix.is_ink(x, y), x < 4, "dot ({}, {})", x, y);
        }
    }
}

#[test]
fn scaled_to_printer_width() {
    let bytes = png(RgbaImage::from_pixel(288, 30, Rgba([0, 0, 0, 255])));

    let matrix = rasterize(&bytes, true).unwrap();
    assert_eq!((matrix.width(), matrix.height()), (576, 60));
    assert!(matrix.dots().iter().all(|&dot| dot));

    let stream = encode(&matrix, Alignment::Center);
    // 60 rows -> 3 strips of 576 columns.
    assert_eq!(stream.len(), 8 + 3 * (5 + 576 * 3 + 1) + 3);
    assert_eq!(&stream[8..13], &[0x1B, 0x2A, 0x21, 0x40, 0x02]);
}

#[test]
fn config_scales_to_model_width() {
    let bytes = png(RgbaImage::from_pixel(96, 10, Rgba([255, 255, 255, 255])));
    let config = Config::new(Model::Paper58mm)
        .scale_to_width(true)
        .alignment(Alignment::Right);

    let stream = config.convert(&bytes).unwrap();
    // 384 / 96 = 4, so 40 rows in two strips.
    assert_eq!(&stream[5..8], &[0x1B, 0x61, 0x02]);
    assert_eq!(&stream[8..13], &[0x1B, 0x2A, 0x21, 0x80, 0x01]);
    assert_eq!(stream.len(), 8 + 2 * (5 + 384 * 3 + 1) + 3);
}

#[test]
fn jpeg_input() {
    let mut bytes = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(RgbImage::from_pixel(16, 16, Rgb([0, 0, 0])))
        .write_to(&mut bytes, ImageFormat::Jpeg)
        .unwrap();

    let matrix = rasterize(bytes.get_ref(), false).unwrap();
    assert_eq!((matrix.width(), matrix.height()), (16, 16));
    assert!(matrix.dots().iter().all(|&dot| dot));
}

#[test]
fn qr_code_survives_rasterization() {
    const MODULE: u32 = 4;
    const QUIET: u32 = 4;

    let code = QrCode::new(b"https://example.com/receipt/12345").unwrap();
    let modules = code.width() as u32;
    let colors = code.to_colors();
    let size = (modules + QUIET * 2) * MODULE;

    let mut image = RgbaImage::from_pixel(size, size, Rgba([255, 255, 255, 255]));
    for (i, color) in colors.iter().enumerate() {
        if *color == Color::Dark {
            let mx = (i as u32 % modules + QUIET) * MODULE;
            let my = (i as u32 / modules + QUIET) * MODULE;
            for y in my..my + MODULE {
                for x in mx..mx + MODULE {
                    image.put_pixel(x, y, Rgba([0, 0, 0, 255]));
                }
            }
        }
    }

    let matrix = rasterize(&png(image), false).unwrap();
    assert_eq!(matrix.dots().len(), (size * size) as usize);
    for (i, color) in colors.iter().enumerate() {
        let x = (i as u32 % modules + QUIET) * MODULE + MODULE / 2;
        let y = (i as u32 / modules + QUIET) * MODULE + MODULE / 2;
        assert_eq!(matrix.is_ink(x, y), *color == Color::Dark);
    }

    let strips = ((size + 23) / 24) as usize;
    let stream = encode(&matrix, Alignment::Center);
    assert_eq!(stream.len(), 8 + strips * (5 + size as usize * 3 + 1) + 3);
}

#[test]
fn write_image_matches_encode() {
    let bytes = png(RgbaImage::from_pixel(5, 30, Rgba([10, 10, 10, 255])));
    let config = Config::new(Model::Paper80mm).alignment(Alignment::Center);

    let mut out: Vec<u8> = Vec::new();
    let written = write_image(&mut out, &bytes, &config).unwrap();

    let expected = encode(&rasterize(&bytes, false).unwrap(), Alignment::Center);
    assert_eq!(written, expected.len());
    assert_eq!(out, expected);
}

#[test]
fn malformed_input_produces_nothing() {
    assert!(matches!(
        rasterize(&[], false),
        Err(Error::InvalidImage(InvalidImageError::Decode(_)))
    ));

    let mut truncated = png(RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255])));
    truncated.truncate(20);
    assert!(matches!(
        rasterize(&truncated, true),
        Err(Error::InvalidImage(_))
    ));

    let mut out: Vec<u8> = Vec::new();
    assert!(write_image(&mut out, &truncated, &Config::default()).is_err());
    assert!(out.is_empty());
}
