//! PNG reading and writing.
//!
//! Reading expands palettes and sub-byte grayscale to 8 bits, then
//! normalizes 8- and 16-bit samples into `[0, 1]`. Writing always produces
//! 8-bit grayscale or RGB.

use crate::{image_from_interleaved, BitDepth, Format, IoError, IoResult, Loaded, SourceInfo};
use astro_core::Image;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Reads a PNG file into a normalized image.
///
/// # Example
///
/// ```rust,ignore
/// use astro_io::png;
///
/// let loaded = png::read("frame.png")?;
/// ```
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Loaded> {
    let file = File::open(path.as_ref())?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
    let bytes = &buf[..info.buffer_size()];

    let (color_type, depth) = reader.output_color_type();
    let channels = match color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        other => {
            return Err(IoError::UnsupportedBitDepth(format!(
                "{:?} after expansion",
                other
            )))
        }
    };

    let (bit_depth, samples) = match depth {
        png::BitDepth::Eight => (
            BitDepth::U8,
            bytes.iter().map(|&v| v as f32 / 255.0).collect::<Vec<_>>(),
        ),
        png::BitDepth::Sixteen => (
            BitDepth::U16,
            bytes
                .chunks_exact(2)
                .map(|be| u16::from_be_bytes([be[0], be[1]]) as f32 / 65535.0)
                .collect(),
        ),
        other => return Err(IoError::UnsupportedBitDepth(format!("{:?}", other))),
    };

    let image = image_from_interleaved(
        info.width as usize,
        info.height as usize,
        channels,
        samples,
    )?;

    Ok(Loaded {
        image,
        source: SourceInfo {
            format: Format::Png,
            bit_depth,
            file_channels: channels,
        },
    })
}

/// Writes an image as an 8-bit PNG.
///
/// Samples are clipped to `[0, 1]` and scaled by 255 with truncation.
/// Mono and single-channel images become grayscale, three-channel images
/// RGB.
pub fn write<P: AsRef<Path>>(path: P, image: &Image) -> IoResult<()> {
    let color_type = match image.channels() {
        1 => png::ColorType::Grayscale,
        3 => png::ColorType::Rgb,
        n => return Err(IoError::EncodeError(format!("unsupported channel count: {}", n))),
    };
    let width = dimension(image.width())?;
    let height = dimension(image.height())?;

    let file = File::create(path.as_ref())?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(color_type);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    let bytes = to_u8(image.samples());
    writer
        .write_image_data(&bytes)
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    Ok(())
}

/// Quantizes normalized samples to 8 bits.
pub fn to_u8(samples: &[f32]) -> Vec<u8> {
    samples
        .iter()
        .map(|&v| (v.clamp(0.0, 1.0) * 255.0) as u8)
        .collect()
}

fn dimension(n: usize) -> IoResult<u32> {
    u32::try_from(n).map_err(|_| IoError::EncodeError(format!("dimension {} too large for PNG", n)))
}
