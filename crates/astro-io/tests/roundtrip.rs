//! Load/save integration tests against files written by the codec crates
//! directly.

#![cfg(all(feature = "png", feature = "tiff"))]

use approx::assert_abs_diff_eq;
use astro_core::Image;
use astro_io::{read, write, BitDepth, Format, IoError};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tempfile::TempDir;

fn write_png_u16_gray(path: &Path, width: u32, height: u32, values: &[u16]) {
    let file = File::create(path).unwrap();
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(png::BitDepth::Sixteen);
    let mut writer = encoder.write_header().unwrap();
    let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_be_bytes()).collect();
    writer.write_image_data(&bytes).unwrap();
    writer.finish().unwrap();
}

#[test]
fn png_rgb_8bit_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rgb.png");

    let mut data = Vec::new();
    for y in 0..20 {
        for x in 0..30 {
            data.extend_from_slice(&[x as f32 / 29.0, y as f32 / 19.0, 0.5]);
        }
    }
    let image = Image::color(30, 20, 3, data).unwrap();
    write(&path, &image).unwrap();

    let loaded = read(&path).unwrap();
    assert_eq!(loaded.source.format, Format::Png);
    assert_eq!(loaded.source.bit_depth, BitDepth::U8);
    assert_eq!(loaded.image.shape(), vec![20, 30, 3]);
    for (a, b) in image.samples().iter().zip(loaded.image.samples()) {
        assert_abs_diff_eq!(a, b, epsilon = 1.0 / 255.0 + 1e-6);
    }
}

#[test]
fn png_16bit_gray_loads_as_mono() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deep.png");
    write_png_u16_gray(&path, 4, 2, &[0, 1000, 32768, 65535, 5, 6, 7, 8]);

    let loaded = read(&path).unwrap();
    assert_eq!(loaded.source.bit_depth, BitDepth::U16);
    assert_eq!(loaded.source.file_channels, 1);
    assert!(loaded.image.is_mono());
    assert_eq!(loaded.image.shape(), vec![2, 4]);
    assert_abs_diff_eq!(loaded.image.sample(1, 0, 0), 1000.0 / 65535.0, epsilon = 1e-7);
    assert_eq!(loaded.image.sample(3, 0, 0), 1.0);
}

#[test]
fn tiff_float_roundtrip_is_lossless() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stack.tiff");

    let data: Vec<f32> = (0..64 * 48).map(|i| (i as f32 * 0.37).sin().abs() * 0.1).collect();
    let image = Image::mono(64, 48, data).unwrap();
    write(&path, &image).unwrap();

    let loaded = read(&path).unwrap();
    assert_eq!(loaded.source.format, Format::Tiff);
    assert_eq!(loaded.image, image);
}

#[test]
fn tiff_u16_rgba_drops_alpha() {
    use tiff::encoder::{colortype, TiffEncoder};

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rgba16.tif");
    let pixels: [u16; 8] = [65535, 0, 32768, 100, 0, 65535, 0, 65535];
    {
        let file = File::create(&path).unwrap();
        let mut encoder = TiffEncoder::new(BufWriter::new(file)).unwrap();
        encoder
            .write_image::<colortype::RGBA16>(2, 1, &pixels)
            .unwrap();
    }

    let loaded = read(&path).unwrap();
    assert_eq!(loaded.source.bit_depth, BitDepth::U16);
    assert_eq!(loaded.source.file_channels, 4);
    assert_eq!(loaded.image.shape(), vec![1, 2, 3]);
    let s = loaded.image.samples();
    assert_eq!(s[0], 1.0);
    assert_eq!(s[1], 0.0);
    assert_abs_diff_eq!(s[2], 32768.0 / 65535.0, epsilon = 1e-7);
    assert_eq!(&s[3..], &[0.0, 1.0, 0.0]);
}

#[cfg(not(feature = "fits"))]
#[test]
fn fits_is_recognized_but_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("light.dat");
    let mut header = b"SIMPLE  =                    T".to_vec();
    header.resize(2880, b' ');
    std::fs::write(&path, header).unwrap();

    assert_eq!(Format::detect(&path).unwrap(), Format::Fits);
    assert!(matches!(read(&path), Err(IoError::UnsupportedFormat(_))));
}

#[test]
fn unknown_extension_rejected_on_write() {
    let dir = TempDir::new().unwrap();
    let image = Image::filled_mono(2, 2, 0.5).unwrap();
    assert!(matches!(
        write(dir.path().join("out.jpg"), &image),
        Err(IoError::UnsupportedFormat(_))
    ));
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(read(dir.path().join("nope.png")), Err(IoError::Io(_))));
}

#[cfg(feature = "fits")]
mod fits {
    use super::*;
    use fitsio::FitsFile;
    use fitsio::images::{ImageDescription, ImageType};

    #[test]
    fn mono_float_roundtrip_is_lossless() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("light.fits");

        let data: Vec<f32> = (0..40 * 30).map(|i| (i as f32 * 0.11).cos().abs() * 0.2).collect();
        let image = Image::mono(40, 30, data).unwrap();
        write(&path, &image).unwrap();

        let loaded = read(&path).unwrap();
        assert_eq!(loaded.source.format, Format::Fits);
        assert_eq!(loaded.source.bit_depth, BitDepth::F32);
        assert_eq!(loaded.image, image);
    }

    #[test]
    fn rgb_cube_roundtrip_keeps_channel_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rgb.fit");

        let mut data = Vec::new();
        for i in 0..8 * 6 {
            data.extend_from_slice(&[i as f32 * 0.01, 0.5, 1.0 - i as f32 * 0.01]);
        }
        let image = Image::color(8, 6, 3, data).unwrap();
        write(&path, &image).unwrap();
        // Overwrites in place.
        write(&path, &image).unwrap();

        let loaded = read(&path).unwrap();
        assert_eq!(loaded.source.file_channels, 3);
        assert_eq!(loaded.image, image);
    }

    #[test]
    fn integer_frame_is_divided_by_65535() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("raw16.fits");
        let description = ImageDescription {
            data_type: ImageType::Long,
            dimensions: &[2, 3],
        };
        let mut fptr = FitsFile::create(&path)
            .with_custom_primary(&description)
            .open()
            .unwrap();
        let hdu = fptr.primary_hdu().unwrap();
        let counts: Vec<i32> = vec![0, 1000, 32768, 65535, 7, 9];
        hdu.write_image(&mut fptr, &counts[..]).unwrap();
        drop(fptr);

        let loaded = read(&path).unwrap();
        assert!(loaded.image.is_mono());
        assert_eq!(loaded.image.shape(), vec![2, 3]);
        assert_eq!(loaded.source.bit_depth, BitDepth::U32);
        assert_eq!(loaded.image.sample(0, 0, 0), 0.0);
        assert_abs_diff_eq!(loaded.image.sample(1, 0, 0), 1000.0 / 65535.0, epsilon = 1e-7);
        assert_eq!(loaded.image.sample(0, 1, 0), 1.0);
    }
}
