//! Image buffer type for the stretch pipeline.
//!
//! An [`Image`] is a dense buffer of normalized `f32` samples together
//! with its shape. Two shapes are modelled, mirroring how loaders hand
//! images over:
//!
//! - [`Layout::Mono`] - rank 2, `(height, width)`
//! - [`Layout::Color`] - rank 3, `(height, width, channels)`
//!
//! # Memory Layout
//!
//! Samples are stored **row-major**, top-to-bottom, with channels
//! interleaved:
//!
//! ```text
//! Memory: [R G B R G B R G B ...]  <- Row 0
//!         [R G B R G B R G B ...]  <- Row 1
//!         ...
//! ```
//!
//! Planar layouts (all of R, then all of G, ...) must be reordered by the
//! loader before an image is built.
//!
//! # Usage
//!
//! ```rust
//! use astro_core::Image;
//!
//! let img = Image::color(4, 2, 3, vec![0.1; 4 * 2 * 3]).unwrap();
//! assert_eq!(img.shape(), vec![2, 4, 3]);
//!
//! let green = img.channel(1);
//! assert_eq!(green.len(), 8);
//! ```

use crate::{Error, Result};

/// Shape class of an [`Image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Single-channel image of rank 2.
    Mono,
    /// Rank-3 image with an explicit channel axis.
    Color,
}

/// Owned image buffer of normalized `f32` samples.
///
/// Cloning copies the buffer; the stretch operations take `&Image` and
/// return a fresh image so the caller's data is never aliased.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    data: Vec<f32>,
    width: usize,
    height: usize,
    channels: usize,
    layout: Layout,
}

impl Image {
    /// Creates a rank-2 monochrome image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if a dimension is zero or
    /// `data.len() != width * height`.
    pub fn mono(width: usize, height: usize, data: Vec<f32>) -> Result<Self> {
        Self::build(width, height, 1, Layout::Mono, data)
    }

    /// Creates a rank-3 image with `channels` interleaved channels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if a dimension is zero or the
    /// buffer length does not match `width * height * channels`.
    pub fn color(width: usize, height: usize, channels: usize, data: Vec<f32>) -> Result<Self> {
        Self::build(width, height, channels, Layout::Color, data)
    }

    /// Creates an image from a numpy-style shape: `[h, w]` or `[h, w, c]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedShape`] for any other rank.
    ///
    /// ```rust
    /// use astro_core::{Image, Layout};
    ///
    /// let img = Image::from_shape(&[3, 5], vec![0.0; 15]).unwrap();
    /// assert_eq!(img.layout(), Layout::Mono);
    /// assert!(Image::from_shape(&[1, 3, 5, 2], vec![0.0; 30]).is_err());
    /// ```
    pub fn from_shape(shape: &[usize], data: Vec<f32>) -> Result<Self> {
        match *shape {
            [h, w] => Self::mono(w, h, data),
            [h, w, c] => Self::color(w, h, c, data),
            _ => Err(Error::unsupported_shape(shape, "rank must be 2 or 3")),
        }
    }

    /// Creates a monochrome image with every sample set to `value`.
    pub fn filled_mono(width: usize, height: usize, value: f32) -> Result<Self> {
        Self::mono(width, height, vec![value; width * height])
    }

    /// Creates a color image with every sample set to `value`.
    pub fn filled_color(width: usize, height: usize, channels: usize, value: f32) -> Result<Self> {
        Self::color(width, height, channels, vec![value; width * height * channels])
    }

    fn build(
        width: usize,
        height: usize,
        channels: usize,
        layout: Layout,
        data: Vec<f32>,
    ) -> Result<Self> {
        if width == 0 || height == 0 || channels == 0 {
            return Err(Error::invalid_dimensions(format!(
                "{}x{}x{} has a zero dimension",
                height, width, channels
            )));
        }
        let expected = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(channels))
            .ok_or_else(|| Error::invalid_dimensions("image dimensions overflow"))?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(format!(
                "expected {} samples, got {}",
                expected,
                data.len()
            )));
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
            layout,
        })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of interleaved channels (1 for mono).
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Shape class.
    #[inline]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Returns `true` for rank-2 images.
    #[inline]
    pub fn is_mono(&self) -> bool {
        self.layout == Layout::Mono
    }

    /// Numpy-style shape: `[h, w]` for mono, `[h, w, c]` for color.
    pub fn shape(&self) -> Vec<usize> {
        match self.layout {
            Layout::Mono => vec![self.height, self.width],
            Layout::Color => vec![self.height, self.width, self.channels],
        }
    }

    /// Number of pixels (`width * height`).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Number of samples (`width * height * channels`).
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.data.len()
    }

    /// All samples in interleaved order.
    #[inline]
    pub fn samples(&self) -> &[f32] {
        &self.data
    }

    /// Mutable access to all samples.
    #[inline]
    pub fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consumes the image and returns its sample buffer.
    #[inline]
    pub fn into_samples(self) -> Vec<f32> {
        self.data
    }

    /// Sample at `(x, y)` in channel `c`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn sample(&self, x: usize, y: usize, c: usize) -> f32 {
        assert!(x < self.width && y < self.height && c < self.channels);
        self.data[(y * self.width + x) * self.channels + c]
    }

    /// Copies channel `c` out into a contiguous buffer.
    ///
    /// # Panics
    ///
    /// Panics if `c >= channels`.
    pub fn channel(&self, c: usize) -> Vec<f32> {
        assert!(c < self.channels, "channel {} out of range", c);
        self.data
            .iter()
            .skip(c)
            .step_by(self.channels)
            .copied()
            .collect()
    }

    /// Overwrites channel `c` from a contiguous buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `c` is out of range or
    /// `values.len()` differs from the pixel count.
    pub fn set_channel(&mut self, c: usize, values: &[f32]) -> Result<()> {
        if c >= self.channels {
            return Err(Error::invalid_dimensions(format!(
                "channel {} out of range for {} channels",
                c, self.channels
            )));
        }
        if values.len() != self.pixel_count() {
            return Err(Error::invalid_dimensions(format!(
                "expected {} channel samples, got {}",
                self.pixel_count(),
                values.len()
            )));
        }
        let stride = self.channels;
        for (dst, &v) in self.data.iter_mut().skip(c).step_by(stride).zip(values) {
            *dst = v;
        }
        Ok(())
    }

    /// Checks that every sample is finite.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonFiniteSample`] with the index of the first NaN
    /// or infinite sample.
    pub fn ensure_finite(&self) -> Result<()> {
        match self.data.iter().position(|v| !v.is_finite()) {
            Some(index) => Err(Error::NonFiniteSample { index }),
            None => Ok(()),
        }
    }

    /// Returns a copy of this image with new samples and the same shape.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if the length differs.
    pub fn with_samples(&self, data: Vec<f32>) -> Result<Self> {
        Self::build(self.width, self.height, self.channels, self.layout, data)
    }
}
