use super::*;

use std::io::Cursor as IoCursor;

use image::ImageFormat;

fn png_rgb(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb(rgb));
    let mut out = Vec::new();
    img.write_to(&mut IoCursor::new(&mut out), ImageFormat::Png)
        .unwrap();
    out
}

fn png_rgba(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut out = Vec::new();
    img.write_to(&mut IoCursor::new(&mut out), ImageFormat::Png)
        .unwrap();
    out
}

fn jpeg_rgb(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb(rgb));
    let mut out = Vec::new();
    img.write_to(&mut IoCursor::new(&mut out), ImageFormat::Jpeg)
        .unwrap();
    out
}

#[test]
fn sniffs_png_and_jpeg_signatures() {
    assert_eq!(sniff(&png_rgb(1, 1, [0, 0, 0])), Some(SniffedFormat::Png));
    assert_eq!(sniff(&jpeg_rgb(1, 1, [0, 0, 0])), Some(SniffedFormat::Jpeg));
    assert_eq!(sniff(b"GIF89a"), None);
    assert_eq!(sniff(&[]), None);
    assert_eq!(sniff(&[0x89, 0x50]), None);
}

#[test]
fn probe_reads_dimensions_without_decoding() {
    let bytes = png_rgb(17, 9, [1, 2, 3]);
    let reader = ImageReader::probe(&bytes).unwrap();
    assert_eq!((reader.width(), reader.height()), (17, 9));
    assert!(reader.warnings().is_empty());
}

#[test]
fn alpha_flag_follows_the_encoding() {
    assert!(!ImageReader::probe(&png_rgb(2, 2, [0, 0, 0])).unwrap().alpha());
    assert!(
        ImageReader::probe(&png_rgba(2, 2, [0, 0, 0, 255]))
            .unwrap()
            .alpha()
    );
    assert!(!ImageReader::probe(&jpeg_rgb(2, 2, [0, 0, 0])).unwrap().alpha());
}

#[test]
fn unknown_signature_is_fatal() {
    let err = ImageReader::probe(b"not an image at all").unwrap_err();
    assert!(err.to_string().contains("Unknown image format"));
}

#[test]
fn truncated_png_fails_with_codec_message() {
    let mut bytes = png_rgb(8, 8, [10, 20, 30]);
    bytes.truncate(16);
    assert!(ImageReader::probe(&bytes).is_err());
}

#[test]
fn decode_packs_argb_words() {
    let bytes = png_rgba(2, 1, [255, 0, 0, 255]);
    let mut reader = ImageReader::probe(&bytes).unwrap();
    reader.decode().unwrap();
    let surface = reader.take_surface().unwrap();
    assert_eq!(surface, vec![0xFF0000FF, 0xFF0000FF]);

    let bytes = png_rgba(1, 1, [0x33, 0x66, 0x99, 0xCC]);
    let mut reader = ImageReader::probe(&bytes).unwrap();
    reader.decode().unwrap();
    assert_eq!(reader.take_surface().unwrap(), vec![0xCC996633]);
}

#[test]
fn decode_jpeg_is_opaque() {
    let bytes = jpeg_rgb(3, 3, [200, 100, 50]);
    let mut reader = ImageReader::probe(&bytes).unwrap();
    reader.decode().unwrap();
    let surface = reader.take_surface().unwrap();
    assert_eq!(surface.len(), 9);
    assert!(surface.iter().all(|&px| px >> 24 == 0xFF));
}

#[test]
fn sixteen_bit_sources_warn_and_downconvert() {
    let img = image::ImageBuffer::<image::Rgb<u16>, _>::from_pixel(2, 2, image::Rgb([65535, 0, 0]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb16(img)
        .write_to(&mut IoCursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();

    let mut reader = ImageReader::probe(&bytes).unwrap();
    reader.decode().unwrap();
    assert_eq!(reader.warnings().len(), 1);
    assert!(reader.warnings()[0].contains("16-bit"));
    assert_eq!(reader.take_surface().unwrap()[0], 0xFF0000FF);
}
