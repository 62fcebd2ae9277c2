//! TIFF reading and writing.
//!
//! TIFF is the usual interchange format for linear astro data, so reading
//! accepts the integer and float sample types stacking tools produce.
//! Writing keeps full precision as 32-bit float.

use crate::{image_from_interleaved, BitDepth, Format, IoError, IoResult, Loaded, SourceInfo};
use astro_core::Image;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::{colortype, TiffEncoder};
use tiff::ColorType;

/// Reads a TIFF file into a normalized image.
///
/// Integer samples are scaled by the maximum of their type; float samples
/// are kept as they are, including values outside `[0, 1]`.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Loaded> {
    let file = File::open(path.as_ref())?;
    let mut decoder = Decoder::new(BufReader::new(file))
        .map_err(|e: tiff::TiffError| IoError::DecodeError(e.to_string()))?;

    let (width, height) = decoder
        .dimensions()
        .map_err(|e: tiff::TiffError| IoError::DecodeError(e.to_string()))?;
    let color_type = decoder
        .colortype()
        .map_err(|e: tiff::TiffError| IoError::DecodeError(e.to_string()))?;

    let channels = match color_type {
        ColorType::Gray(_) => 1,
        ColorType::GrayA(_) => 2,
        ColorType::RGB(_) => 3,
        ColorType::RGBA(_) => 4,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "TIFF color type {:?}",
                other
            )))
        }
    };

    let result = decoder
        .read_image()
        .map_err(|e: tiff::TiffError| IoError::DecodeError(e.to_string()))?;

    let (bit_depth, samples) = match result {
        DecodingResult::U8(buf) => (BitDepth::U8, scale(&buf, BitDepth::U8)),
        DecodingResult::U16(buf) => (BitDepth::U16, scale(&buf, BitDepth::U16)),
        DecodingResult::U32(buf) => (BitDepth::U32, scale(&buf, BitDepth::U32)),
        DecodingResult::F32(buf) => (BitDepth::F32, buf),
        DecodingResult::F64(buf) => (BitDepth::F64, buf.iter().map(|&v| v as f32).collect()),
        _ => {
            return Err(IoError::UnsupportedBitDepth(format!(
                "TIFF {:?} sample format",
                color_type
            )))
        }
    };

    let image = image_from_interleaved(width as usize, height as usize, channels, samples)?;

    Ok(Loaded {
        image,
        source: SourceInfo {
            format: Format::Tiff,
            bit_depth,
            file_channels: channels,
        },
    })
}

/// Writes an image as an uncompressed 32-bit float TIFF.
///
/// Samples are written unchanged; one channel becomes grayscale, three
/// become RGB.
pub fn write<P: AsRef<Path>>(path: P, image: &Image) -> IoResult<()> {
    let width = u32::try_from(image.width())
        .map_err(|_| IoError::EncodeError("width too large for TIFF".into()))?;
    let height = u32::try_from(image.height())
        .map_err(|_| IoError::EncodeError("height too large for TIFF".into()))?;

    let file = File::create(path.as_ref())?;
    let mut encoder = TiffEncoder::new(BufWriter::new(file))
        .map_err(|e: tiff::TiffError| IoError::EncodeError(e.to_string()))?;

    match image.channels() {
        1 => encoder
            .write_image::<colortype::Gray32Float>(width, height, image.samples())
            .map_err(|e: tiff::TiffError| IoError::EncodeError(e.to_string()))?,
        3 => encoder
            .write_image::<colortype::RGB32Float>(width, height, image.samples())
            .map_err(|e: tiff::TiffError| IoError::EncodeError(e.to_string()))?,
        n => {
            return Err(IoError::EncodeError(format!(
                "unsupported channel count: {}",
                n
            )))
        }
    }

    Ok(())
}

fn scale<T: Copy + Into<f64>>(buf: &[T], depth: BitDepth) -> Vec<f32> {
    let k = depth.normalization_scale();
    buf.iter().map(|&v| (v.into() * k) as f32).collect()
}
