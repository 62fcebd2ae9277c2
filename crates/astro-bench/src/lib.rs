//! Synthetic frames for the stretch benchmarks.
//!
//! Frames look like a linear stack: a dim sky background with noise and a
//! sprinkling of saturated stars, so the stretch statistics behave as they
//! would on real data.

use astro_core::Image;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fills `width * height` samples of sky at `level` with `sigma` noise.
pub fn sky_plane(width: usize, height: usize, level: f32, sigma: f32, seed: u64) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..width * height)
        .map(|i| {
            let star = if i % 397 == 0 { 0.9 } else { 0.0 };
            (level + (rng.r#gen::<f32>() - 0.5) * 2.0 * sigma + star).clamp(0.0, 1.0)
        })
        .collect()
}

/// Mono sky frame.
pub fn mono_frame(width: usize, height: usize) -> Image {
    Image::mono(width, height, sky_plane(width, height, 0.05, 0.01, 7))
        .unwrap_or_else(|e| panic!("bench frame: {}", e))
}

/// RGB sky frame with a different background per channel.
pub fn rgb_frame(width: usize, height: usize) -> Image {
    let planes = [
        sky_plane(width, height, 0.04, 0.010, 11),
        sky_plane(width, height, 0.06, 0.012, 12),
        sky_plane(width, height, 0.09, 0.015, 13),
    ];
    let data = (0..width * height)
        .flat_map(|i| [planes[0][i], planes[1][i], planes[2][i]])
        .collect();
    Image::color(width, height, 3, data).unwrap_or_else(|e| panic!("bench frame: {}", e))
}
