//! # astro-ops
//!
//! Statistical stretch for astronomical images.
//!
//! Linear astronomical data keeps almost all of its signal just above the
//! noise floor. This crate brightens that faint signal without blowing out
//! stars by fitting a rational tone curve that moves the image median to a
//! chosen target.
//!
//! # Modules
//!
//! - [`black_point`] - Shadow clip estimation from median and standard deviation
//! - [`mtf`] - Rescaling and the median-anchored tone curve
//! - [`curves`] - Optional six-point curves boost
//! - [`params`] - [`StretchParams`] configuration value
//! - [`stretch`] - Mono and color (linked/unlinked) orchestration
//!
//! # Example
//!
//! ```rust
//! use astro_core::Image;
//! use astro_ops::{stretch_color, StretchParams};
//!
//! let mut data = Vec::new();
//! for i in 0..64 * 64 {
//!     let v = 0.02 + (i % 17) as f32 * 1e-3;
//!     data.extend_from_slice(&[v, v * 0.9, v * 1.1]);
//! }
//! let img = Image::color(64, 64, 3, data).unwrap();
//!
//! let params = StretchParams::new(0.25).with_linked(false).with_curves(0.2);
//! let out = stretch_color(&img, &params).unwrap();
//! assert_eq!(out.shape(), img.shape());
//! ```
//!
//! # Feature Flags
//!
//! - `parallel` - Stretch unlinked channels concurrently with rayon (default)
//! - `serde` - Serialize/deserialize [`StretchParams`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod black_point;
pub mod curves;
pub mod mtf;
pub mod params;
pub mod stretch;

pub use black_point::{black_point, BLACK_POINT_SIGMA};
pub use curves::CurvesBoost;
pub use mtf::MedianStretch;
pub use params::StretchParams;
pub use stretch::{
    stretch, stretch_color, stretch_mono, stretch_with_report, GroupReport, StretchReport,
};
