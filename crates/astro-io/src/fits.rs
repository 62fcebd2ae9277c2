//! FITS reading and writing through cfitsio.
//!
//! Only the primary HDU is used. Two layouts are understood:
//!
//! - `NAXIS = 2`: a `height x width` frame, loaded as a mono image
//! - `NAXIS = 3` with three planes: a planar `3 x height x width` cube,
//!   reordered into interleaved RGB
//!
//! Integer data is divided by 65535 whatever its BITPIX, matching the
//! convention of 16-bit capture software. Float data is kept as stored.
//! Writing always produces 32-bit float (`BITPIX = -32`) in the same
//! layouts, so a written file reads back unchanged.

use crate::{BitDepth, Format, IoError, IoResult, Loaded, SourceInfo};
use astro_core::Image;
use fitsio::FitsFile;
use fitsio::hdu::HduInfo;
use fitsio::images::{ImageDescription, ImageType};
use std::path::Path;

/// Divisor applied to integer FITS samples.
pub const INTEGER_SCALE: f32 = 65535.0;

/// Reads the primary image HDU of a FITS file.
///
/// # Errors
///
/// Returns an error if the primary HDU is not an image, has a shape other
/// than `[h, w]` or `[3, h, w]`, or uses 64-bit integer samples.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Loaded> {
    let mut fptr =
        FitsFile::open(path.as_ref()).map_err(|e| IoError::DecodeError(e.to_string()))?;
    let hdu = fptr
        .primary_hdu()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;

    let (shape, bit_depth) = match &hdu.info {
        HduInfo::ImageInfo { shape, image_type } => (shape.clone(), bit_depth(image_type)?),
        _ => {
            return Err(IoError::UnsupportedFormat(
                "FITS primary HDU is not an image".into(),
            ))
        }
    };

    let mut pixels: Vec<f32> = hdu
        .read_image(&mut fptr)
        .map_err(|e| IoError::DecodeError(e.to_string()))?;

    if !matches!(bit_depth, BitDepth::F32 | BitDepth::F64) {
        for v in pixels.iter_mut() {
            *v /= INTEGER_SCALE;
        }
    }

    let (image, file_channels) = match shape.as_slice() {
        &[height, width] => (Image::mono(width, height, pixels)?, 1),
        &[3, height, width] => (
            Image::color(width, height, 3, planar_to_interleaved(&pixels, 3))?,
            3,
        ),
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "FITS image shape {:?}",
                other
            )))
        }
    };

    Ok(Loaded {
        image,
        source: SourceInfo {
            format: Format::Fits,
            bit_depth,
            file_channels,
        },
    })
}

/// Writes an image as a 32-bit float FITS file, replacing any existing file.
///
/// Mono and single-channel images become `[h, w]`; three-channel images a
/// planar `[3, h, w]` cube.
pub fn write<P: AsRef<Path>>(path: P, image: &Image) -> IoResult<()> {
    let (width, height) = (image.width(), image.height());
    let (dimensions, data) = match image.channels() {
        1 => (vec![height, width], image.samples().to_vec()),
        3 => (
            vec![3, height, width],
            (0..3).flat_map(|c| image.channel(c)).collect::<Vec<f32>>(),
        ),
        n => {
            return Err(IoError::EncodeError(format!(
                "unsupported channel count: {}",
                n
            )))
        }
    };

    let description = ImageDescription {
        data_type: ImageType::Float,
        dimensions: &dimensions,
    };
    let mut fptr = FitsFile::create(path.as_ref())
        .with_custom_primary(&description)
        .overwrite()
        .open()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    let hdu = fptr
        .primary_hdu()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    hdu.write_image(&mut fptr, &data)
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    Ok(())
}

fn bit_depth(image_type: &ImageType) -> IoResult<BitDepth> {
    match image_type {
        ImageType::UnsignedByte | ImageType::Byte => Ok(BitDepth::U8),
        ImageType::Short | ImageType::UnsignedShort => Ok(BitDepth::U16),
        ImageType::Long | ImageType::UnsignedLong => Ok(BitDepth::U32),
        ImageType::Float => Ok(BitDepth::F32),
        ImageType::Double => Ok(BitDepth::F64),
        ImageType::LongLong => Err(IoError::UnsupportedBitDepth("FITS BITPIX 64".into())),
    }
}

/// Reorders `channels` consecutive planes into interleaved samples.
fn planar_to_interleaved(planar: &[f32], channels: usize) -> Vec<f32> {
    let plane = planar.len() / channels;
    (0..plane)
        .flat_map(|i| (0..channels).map(move |c| planar[c * plane + i]))
        .collect()
}
