//! Error types for astro-core and the stretch operations built on it.
//!
//! Every failure of the stretch core is local, synchronous and
//! deterministic: running the same image with the same parameters again
//! reproduces the same error, so nothing here is retryable.
//!
//! # Categories
//!
//! - **Parameter errors**: [`InvalidParameter`](Error::InvalidParameter)
//! - **Numeric edge cases**: [`DegenerateStatistics`](Error::DegenerateStatistics)
//! - **Shape errors**: [`UnsupportedShape`](Error::UnsupportedShape),
//!   [`InvalidDimensions`](Error::InvalidDimensions)
//! - **Input data errors**: [`NonFiniteSample`](Error::NonFiniteSample)
//!
//! # Usage
//!
//! ```rust
//! use astro_core::{Error, Result};
//!
//! fn check_median(target: f32) -> Result<f32> {
//!     if !(target > 0.0 && target < 1.0) {
//!         return Err(Error::invalid_parameter("target_median", target, "must be in (0, 1)"));
//!     }
//!     Ok(target)
//! }
//!
//! assert!(check_median(1.0).is_err());
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while validating or stretching an image.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A stretch parameter is outside its valid range.
    ///
    /// Raised before any array computation starts; values are never
    /// silently clamped.
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f32,
        /// Why the value was rejected
        reason: &'static str,
    },

    /// The image statistics make the stretch undefined.
    ///
    /// Typical causes: a black point at or above 1.0, a tone-curve
    /// denominator of zero, or a zero maximum on the normalize path.
    #[error("degenerate statistics: {0}")]
    DegenerateStatistics(String),

    /// Image rank or channel layout is not supported by the operation.
    #[error("unsupported shape {shape:?}: {reason}")]
    UnsupportedShape {
        /// Shape as given by the caller
        shape: Vec<usize>,
        /// Reason why the shape is unsupported
        reason: String,
    },

    /// Dimensions and buffer length disagree, or a dimension is zero.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// A sample is NaN or infinite.
    #[error("non-finite sample at index {index}")]
    NonFiniteSample {
        /// Flat index of the first non-finite sample
        index: usize,
    },
}

impl Error {
    /// Creates an [`Error::InvalidParameter`] error.
    #[inline]
    pub fn invalid_parameter(name: &'static str, value: f32, reason: &'static str) -> Self {
        Self::InvalidParameter { name, value, reason }
    }

    /// Creates an [`Error::DegenerateStatistics`] error.
    #[inline]
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateStatistics(msg.into())
    }

    /// Creates an [`Error::UnsupportedShape`] error.
    #[inline]
    pub fn unsupported_shape(shape: &[usize], reason: impl Into<String>) -> Self {
        Self::UnsupportedShape {
            shape: shape.to_vec(),
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(msg: impl Into<String>) -> Self {
        Self::InvalidDimensions(msg.into())
    }

    /// Returns `true` if this is a parameter validation error.
    #[inline]
    pub fn is_parameter_error(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }

    /// Returns `true` if this is a degenerate-statistics error.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::DegenerateStatistics(_))
    }

    /// Returns `true` if this is a shape or dimension error.
    #[inline]
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedShape { .. } | Self::InvalidDimensions(_)
        )
    }
}
