//! # astro-core
//!
//! Core types for statistical stretching of astronomical images.
//!
//! This crate provides the foundation the other astro-stretch crates build on:
//!
//! - [`Image`] - Normalized `f32` image buffer with a mono or color shape
//! - [`Layout`] - Shape class (rank 2 mono, rank 3 color)
//! - [`stats`] - Min/max/mean/standard deviation/median of sample sets
//! - [`Error`] - Error taxonomy shared by the stretch operations
//!
//! ## Crate Structure
//!
//! ```text
//! astro-core (this crate)
//!    ^
//!    |
//!    +-- astro-ops (black point, tone curve, curves boost, stretchers)
//!    +-- astro-io  (PNG/TIFF loaders and savers)
//!    +-- astro-cli (command-line front-end)
//! ```
//!
//! Images reaching this crate are already normalized to `[0, 1]` by a
//! loader; nothing here knows about file formats.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod stats;

pub use error::{Error, Result};
pub use image::{Image, Layout};
pub use stats::Stats;
