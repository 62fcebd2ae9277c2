//! # astro-io
//!
//! Loading and saving images around the stretch core.
//!
//! Decoding and encoding are delegated to the `png`, `tiff` and (behind the
//! `fits` feature) `fitsio` crates; this
//! crate only maps their sample types onto normalized [`Image`] buffers:
//!
//! - integer samples are scaled into `[0, 1]` by the maximum of their depth
//!   (8-bit `/255`, 16-bit `/65535`, 32-bit `/4294967295`)
//! - floating-point samples are passed through unchanged
//! - alpha channels are dropped; grayscale loads as a mono image, color
//!   as interleaved RGB
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use astro_io::{read, write};
//!
//! let loaded = read("M42.tif")?;
//! println!("{:?} from {:?}", loaded.image.shape(), loaded.source);
//! write("M42_stretched.png", &loaded.image)?;
//! ```
//!
//! # Supported Formats
//!
//! | Format | Read | Write | Bit Depths |
//! |--------|------|-------|------------|
//! | PNG | Yes | Yes | read 1-16, write 8 |
//! | TIFF | Yes | Yes | read 8/16/32 uint, 32/64 float; write 32f |
//! | FITS | Yes | Yes | read 8/16/32 int, 32/64 float; write 32f (`fits` feature) |
//!
//! # Feature Flags
//!
//! - `png` - PNG support (default)
//! - `tiff` - TIFF support (default)
//! - `fits` - FITS support via cfitsio; without it FITS files are
//!   detected and rejected

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod detect;
mod error;

#[cfg(feature = "png")]
pub mod png;

#[cfg(feature = "tiff")]
pub mod tiff;

#[cfg(feature = "fits")]
pub mod fits;

pub use detect::Format;
pub use error::{IoError, IoResult};

use astro_core::Image;
use std::path::Path;
use tracing::debug;

/// Native sample type of a decoded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitDepth {
    /// 8-bit unsigned integer.
    U8,
    /// 16-bit unsigned integer.
    U16,
    /// 32-bit unsigned integer.
    U32,
    /// 32-bit float.
    F32,
    /// 64-bit float.
    F64,
}

impl BitDepth {
    /// Scale that maps the full integer range onto `[0, 1]`; 1.0 for floats.
    pub fn normalization_scale(&self) -> f64 {
        match self {
            BitDepth::U8 => 1.0 / u8::MAX as f64,
            BitDepth::U16 => 1.0 / u16::MAX as f64,
            BitDepth::U32 => 1.0 / u32::MAX as f64,
            BitDepth::F32 | BitDepth::F64 => 1.0,
        }
    }
}

/// Where a loaded image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceInfo {
    /// File format.
    pub format: Format,
    /// Native sample type before normalization.
    pub bit_depth: BitDepth,
    /// Channel count in the file, including any dropped alpha.
    pub file_channels: usize,
}

/// A decoded, normalized image and its origin.
#[derive(Debug, Clone)]
pub struct Loaded {
    /// Normalized image.
    pub image: Image,
    /// Source description.
    pub source: SourceInfo,
}

/// Reads an image, detecting the format from magic bytes and extension.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The format is not supported (FITS without the `fits` feature)
/// - The file is corrupted or uses an unsupported sample layout
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Loaded> {
    let path = path.as_ref();
    let format = Format::detect(path)?;
    debug!(path = %path.display(), format = format.name(), "reading");

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::read(path),

        #[cfg(feature = "tiff")]
        Format::Tiff => tiff::read(path),

        #[cfg(feature = "fits")]
        Format::Fits => fits::read(path),

        other => Err(unsupported(path, other)),
    }
}

/// Writes an image, choosing the format from the file extension.
///
/// PNG is written as 8-bit, TIFF and FITS as 32-bit float.
///
/// # Errors
///
/// Returns an error if the file cannot be created, the extension names an
/// unsupported format, or the image has a channel count the format cannot
/// hold.
pub fn write<P: AsRef<Path>>(path: P, image: &Image) -> IoResult<()> {
    let path = path.as_ref();
    let format = Format::from_extension(path);
    debug!(path = %path.display(), format = format.name(), "writing");

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::write(path, image),

        #[cfg(feature = "tiff")]
        Format::Tiff => tiff::write(path, image),

        #[cfg(feature = "fits")]
        Format::Fits => fits::write(path, image),

        other => Err(unsupported(path, other)),
    }
}

fn unsupported(path: &Path, format: Format) -> IoError {
    match format {
        Format::Fits => IoError::UnsupportedFormat(format!(
            "FITS support not enabled ({}); build with the `fits` feature",
            path.display()
        )),
        _ => IoError::UnsupportedFormat(
            path.extension()
                .and_then(|e| e.to_str())
                .unwrap_or("unknown")
                .to_string(),
        ),
    }
}

/// Builds an image from interleaved normalized samples.
///
/// One or two channels become a mono image (gray, gray+alpha); three or
/// four become RGB. Alpha is discarded.
pub(crate) fn image_from_interleaved(
    width: usize,
    height: usize,
    channels: usize,
    samples: Vec<f32>,
) -> IoResult<Image> {
    let image = match channels {
        1 => Image::mono(width, height, samples)?,
        3 => Image::color(width, height, 3, samples)?,
        2 => Image::mono(width, height, samples.chunks_exact(2).map(|ga| ga[0]).collect())?,
        4 => Image::color(
            width,
            height,
            3,
            samples
                .chunks_exact(4)
                .flat_map(|rgba| [rgba[0], rgba[1], rgba[2]])
                .collect(),
        )?,
        n => {
            return Err(IoError::UnsupportedFormat(format!(
                "{} channels per pixel",
                n
            )))
        }
    };
    Ok(image)
}
