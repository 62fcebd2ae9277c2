//! CLI command implementations

pub mod stats;
pub mod stretch;

use anyhow::{Context, Result};
use astro_core::Image;
use astro_io::Loaded;
use std::path::Path;

/// Load image from path
pub fn load_image(path: &Path) -> Result<Loaded> {
    astro_io::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path
pub fn save_image(path: &Path, image: &Image) -> Result<()> {
    astro_io::write(path, image).with_context(|| format!("Failed to save: {}", path.display()))
}
