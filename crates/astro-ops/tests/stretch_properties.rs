//! End-to-end properties of the statistical stretch.
//!
//! Each test builds a synthetic frame with known statistics and checks a
//! property of the full pipeline: median fixed point, range containment,
//! curves identity, normalization, linked/unlinked equivalence and the
//! black point guard.

use approx::assert_relative_eq;
use astro_core::{Image, stats};
use astro_ops::black_point::{black_point, BLACK_POINT_SIGMA};
use astro_ops::{
    stretch, stretch_color, stretch_mono, stretch_with_report, StretchParams,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const TARGETS: [f32; 6] = [0.05, 0.10, 0.25, 0.50, 0.75, 0.90];

/// Mono frame: sky background around `level`, noise of `sigma`, sparse stars.
fn starfield(width: usize, height: usize, level: f32, sigma: f32, seed: u64) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let n = (rng.r#gen::<f32>() - 0.5) * 2.0 * sigma;
            let star = if (x * 31 + y * 17) % 211 == 0 { 0.7 } else { 0.0 };
            data.push((level + n + star).clamp(0.0, 1.0));
        }
    }
    data
}

fn interleave(planes: &[Vec<f32>]) -> Vec<f32> {
    let n = planes[0].len();
    let mut data = Vec::with_capacity(n * planes.len());
    for i in 0..n {
        for p in planes {
            data.push(p[i]);
        }
    }
    data
}

#[test]
fn median_fixed_point_mono() {
    let img = Image::mono(120, 80, starfield(120, 80, 0.08, 0.01, 42)).unwrap();
    for &m in &TARGETS {
        let out = stretch_mono(&img, &StretchParams::new(m)).unwrap();
        let med = stats::median(out.samples()).unwrap();
        assert_relative_eq!(med, m, epsilon = 1e-3);
    }
}

#[test]
fn median_fixed_point_linked_color() {
    let planes = vec![
        starfield(64, 64, 0.06, 0.01, 1),
        starfield(64, 64, 0.07, 0.01, 2),
        starfield(64, 64, 0.08, 0.01, 3),
    ];
    let img = Image::color(64, 64, 3, interleave(&planes)).unwrap();
    for &m in &TARGETS {
        let out = stretch_color(&img, &StretchParams::new(m)).unwrap();
        let med = stats::median(out.samples()).unwrap();
        assert_relative_eq!(med, m, epsilon = 1e-3);
    }
}

#[test]
fn range_containment_across_parameters() {
    let mut data = starfield(50, 50, 0.1, 0.02, 9);
    // Out-of-range input samples must still come out clipped.
    data[10] = -0.05;
    data[20] = 1.3;
    let mono = Image::mono(50, 50, data.clone()).unwrap();
    let planes = vec![data.clone(), starfield(50, 50, 0.2, 0.03, 10), data];
    let color = Image::color(50, 50, 3, interleave(&planes)).unwrap();

    for &m in &TARGETS {
        for &linked in &[true, false] {
            for &normalize in &[true, false] {
                for &(apply_curves, boost) in &[(false, 0.0), (true, 0.0), (true, 0.25), (true, 0.5)] {
                    let params = StretchParams {
                        target_median: m,
                        linked,
                        normalize,
                        apply_curves,
                        curves_boost: boost,
                    };
                    for img in [&mono, &color] {
                        let out = stretch(img, &params).unwrap();
                        assert_eq!(out.shape(), img.shape());
                        assert!(
                            out.samples().iter().all(|&v| (0.0..=1.0).contains(&v)),
                            "out of range for {:?}",
                            params
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn curves_with_zero_boost_is_negligible() {
    let img = Image::mono(80, 80, starfield(80, 80, 0.05, 0.01, 77)).unwrap();
    for &m in &TARGETS {
        let plain = stretch_mono(&img, &StretchParams::new(m)).unwrap();
        let curved = stretch_mono(&img, &StretchParams::new(m).with_curves(0.0)).unwrap();
        let max_dev = plain
            .samples()
            .iter()
            .zip(curved.samples())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0f32, f32::max);
        assert!(max_dev < 1e-6, "m = {}: max deviation {}", m, max_dev);
    }
}

#[test]
fn curves_boost_brightens_upper_midtones() {
    let img = Image::mono(80, 80, starfield(80, 80, 0.05, 0.02, 5)).unwrap();
    let plain = stretch_mono(&img, &StretchParams::new(0.25)).unwrap();
    let boosted = stretch_mono(&img, &StretchParams::new(0.25).with_curves(0.3)).unwrap();
    for (a, b) in plain.samples().iter().zip(boosted.samples()) {
        if *a <= 0.25 {
            assert_relative_eq!(a, b, epsilon = 1e-6);
        } else {
            assert!(b >= a);
        }
    }
}

#[test]
fn normalize_sets_peak_to_one() {
    let img = Image::mono(60, 60, starfield(60, 60, 0.1, 0.01, 8)).unwrap();
    for &m in &TARGETS {
        let out = stretch_mono(&img, &StretchParams::new(m).with_normalize(true)).unwrap();
        assert_eq!(stats::max(out.samples()).unwrap(), 1.0);
    }
}

#[test]
fn linked_equals_unlinked_on_identical_channels() {
    let plane = starfield(48, 40, 0.07, 0.015, 123);
    let img = Image::color(48, 40, 3, interleave(&[plane.clone(), plane.clone(), plane])).unwrap();
    for &m in &TARGETS {
        let linked = stretch_color(&img, &StretchParams::new(m)).unwrap();
        let unlinked = stretch_color(&img, &StretchParams::new(m).with_linked(false)).unwrap();
        assert_eq!(linked, unlinked, "m = {}", m);
    }
}

#[test]
fn unlinked_equalizes_channel_medians() {
    let planes = vec![
        starfield(64, 64, 0.03, 0.005, 31),
        starfield(64, 64, 0.10, 0.010, 32),
        starfield(64, 64, 0.20, 0.020, 33),
    ];
    let img = Image::color(64, 64, 3, interleave(&planes)).unwrap();

    let unlinked = stretch_color(&img, &StretchParams::new(0.25).with_linked(false)).unwrap();
    for c in 0..3 {
        assert_relative_eq!(stats::median(&unlinked.channel(c)).unwrap(), 0.25, epsilon = 1e-3);
    }

    // Linked keeps the channel ordering of the input.
    let linked = stretch_color(&img, &StretchParams::new(0.25)).unwrap();
    let r = stats::median(&linked.channel(0)).unwrap();
    let b = stats::median(&linked.channel(2)).unwrap();
    assert!(r < b);
}

#[test]
fn black_point_guard_hits_min_exactly() {
    // Bimodal: half near zero, half near one. median - 2.7 std is far below min.
    let mut data = vec![0.01f32; 500];
    data.extend(vec![0.99f32; 500]);
    data[0] = 0.005;
    let stats = astro_core::Stats::compute(&data).unwrap();
    assert!(stats.median - BLACK_POINT_SIGMA * stats.std_dev < stats.min);
    assert_eq!(black_point(&data).unwrap(), 0.005);

    let img = Image::mono(40, 25, data).unwrap();
    let (_, report) = stretch_with_report(&img, &StretchParams::default()).unwrap();
    assert_eq!(report.groups[0].black_point, 0.005);
}

#[test]
fn flat_gray_round_trip() {
    let img = Image::filled_mono(100, 100, 0.3).unwrap();
    let params = StretchParams {
        target_median: 0.25,
        normalize: false,
        apply_curves: false,
        ..Default::default()
    };
    let out = stretch_mono(&img, &params).unwrap();
    assert_eq!(out.shape(), vec![100, 100]);
    assert!(out.samples().iter().all(|&v| v == 0.25));
}

#[test]
fn deterministic_across_calls() {
    let planes = vec![
        starfield(33, 21, 0.05, 0.01, 61),
        starfield(33, 21, 0.06, 0.01, 62),
        starfield(33, 21, 0.07, 0.01, 63),
    ];
    let img = Image::color(33, 21, 3, interleave(&planes)).unwrap();
    let params = StretchParams::new(0.2).with_linked(false).with_curves(0.35).with_normalize(true);
    let a = stretch(&img, &params).unwrap();
    let b = stretch(&img, &params).unwrap();
    assert_eq!(a, b);
}

#[test]
fn input_is_not_modified() {
    let img = Image::mono(30, 30, starfield(30, 30, 0.1, 0.01, 4)).unwrap();
    let before = img.clone();
    let _ = stretch(&img, &StretchParams::new(0.4).with_curves(0.2)).unwrap();
    assert_eq!(img, before);
}
