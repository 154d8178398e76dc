use super::*;

use image::{DynamicImage, GrayImage, Luma, Rgb, Rgba, RgbaImage};
use std::io::Cursor;

fn encode_png(image: &DynamicImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("encode test png");
    bytes
}

#[test]
fn test_decode_rgb_png() {
    let mut img = RgbImage::new(4, 3);
    img.put_pixel(0, 0, Rgb([255, 0, 0]));
    img.put_pixel(3, 2, Rgb([0, 0, 255]));
    let bytes = encode_png(&DynamicImage::ImageRgb8(img));

    let decoded = decode_bytes(&bytes).expect("decode");
    assert_eq!(decoded.dimensions(), (4, 3));
    assert_eq!(decoded.get_pixel(0, 0), &Rgb([255, 0, 0]));
    assert_eq!(decoded.get_pixel(3, 2), &Rgb([0, 0, 255]));
}

#[test]
fn test_decode_grayscale_replicates_channels() {
    let mut img = GrayImage::new(2, 2);
    img.put_pixel(0, 0, Luma([7]));
    img.put_pixel(1, 1, Luma([200]));
    let bytes = encode_png(&DynamicImage::ImageLuma8(img));

    let decoded = decode_bytes(&bytes).expect("decode");
    assert_eq!(decoded.get_pixel(0, 0), &Rgb([7, 7, 7]));
    assert_eq!(decoded.get_pixel(1, 1), &Rgb([200, 200, 200]));
}

#[test]
fn test_decode_rgba_drops_alpha() {
    let mut img = RgbaImage::new(2, 1);
    img.put_pixel(0, 0, Rgba([10, 20, 30, 0]));
    img.put_pixel(1, 0, Rgba([40, 50, 60, 128]));
    let bytes = encode_png(&DynamicImage::ImageRgba8(img));

    let decoded = decode_bytes(&bytes).expect("decode");
    assert_eq!(decoded.get_pixel(0, 0), &Rgb([10, 20, 30]));
    assert_eq!(decoded.get_pixel(1, 0), &Rgb([40, 50, 60]));
}

#[test]
fn test_decode_garbage_bytes_fails() {
    let result = decode_bytes(b"definitely not an image");
    assert!(matches!(result, Err(DecodeError::Malformed { .. })));
}

#[test]
fn test_decode_empty_bytes_fails() {
    assert!(decode_bytes(&[]).is_err());
}

#[test]
fn test_decode_path_missing_file() {
    let result = decode_path(std::path::Path::new("/nonexistent/shot.png"));
    match result {
        Err(DecodeError::Io { path, .. }) => {
            assert!(path.to_string_lossy().contains("nonexistent"));
        }
        other => panic!("Expected Io error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_decode_path_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("shot.png");

    let mut img = RgbImage::new(3, 3);
    img.put_pixel(1, 1, Rgb([9, 9, 9]));
    DynamicImage::ImageRgb8(img).save(&path).expect("save");

    let decoded = decode_path(&path).expect("decode");
    assert_eq!(decoded.dimensions(), (3, 3));
    assert_eq!(decoded.get_pixel(1, 1), &Rgb([9, 9, 9]));
}
