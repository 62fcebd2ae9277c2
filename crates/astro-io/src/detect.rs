//! Format detection utilities.
//!
//! Detects image formats from magic bytes, falling back to the file
//! extension.

use crate::IoResult;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Image formats known to the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// PNG format.
    Png,
    /// TIFF format.
    Tiff,
    /// FITS format (recognized, not decoded).
    Fits,
    /// Unknown/unsupported format.
    Unknown,
}

impl Format {
    /// Detects format from file path (magic bytes, then extension).
    pub fn detect<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();

        if let Ok(format) = Self::from_magic_bytes(path) {
            if format != Format::Unknown {
                return Ok(format);
            }
        }

        Ok(Self::from_extension(path))
    }

    /// Detects format from file extension only.
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("png") => Format::Png,
            Some("tif") | Some("tiff") => Format::Tiff,
            Some("fits") | Some("fit") | Some("fts") => Format::Fits,
            _ => Format::Unknown,
        }
    }

    /// Detects format from file magic bytes.
    pub fn from_magic_bytes<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let mut file = File::open(path)?;
        let mut header = [0u8; 9];

        let bytes_read = file.read(&mut header)?;
        Ok(Self::from_bytes(&header[..bytes_read]))
    }

    /// Detects format from raw bytes (magic number check).
    pub fn from_bytes(bytes: &[u8]) -> Self {
        // PNG: 0x89 'P' 'N' 'G' CR LF SUB LF
        if bytes.len() >= 8 && bytes[0..8] == [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A] {
            return Format::Png;
        }

        // TIFF: "II*\0" (little-endian) or "MM\0*" (big-endian)
        if bytes.len() >= 4
            && (bytes[0..4] == [0x49, 0x49, 0x2A, 0x00] || bytes[0..4] == [0x4D, 0x4D, 0x00, 0x2A])
        {
            return Format::Tiff;
        }

        // FITS primary header starts with the SIMPLE keyword card.
        if bytes.len() >= 9 && &bytes[0..9] == b"SIMPLE  =" {
            return Format::Fits;
        }

        Format::Unknown
    }

    /// Human-readable format name.
    pub fn name(&self) -> &'static str {
        match self {
            Format::Png => "PNG",
            Format::Tiff => "TIFF",
            Format::Fits => "FITS",
            Format::Unknown => "unknown",
        }
    }
}
