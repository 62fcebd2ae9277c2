//! Mono and color statistical stretch.
//!
//! A stretch runs, per group of samples:
//!
//! 1. black point estimation ([`crate::black_point`])
//! 2. rescale so the black point maps to 0 ([`crate::mtf::rescale_inplace`])
//! 3. median-anchored tone curve ([`crate::mtf::MedianStretch`])
//!
//! and then, on the whole result:
//!
//! 4. optional curves boost ([`crate::curves::CurvesBoost`])
//! 5. optional normalization by the maximum
//! 6. clip to `[0, 1]`
//!
//! A "group" is the whole image for mono and linked color stretches, and
//! a single channel for unlinked color stretches. The curves boost always
//! runs once over the whole array after the groups are stretched.
//!
//! # Example
//!
//! ```rust
//! use astro_core::Image;
//! use astro_ops::{stretch_mono, StretchParams};
//!
//! let img = Image::filled_mono(100, 100, 0.3).unwrap();
//! let out = stretch_mono(&img, &StretchParams::new(0.25)).unwrap();
//! assert!(out.samples().iter().all(|&v| v == 0.25));
//! ```

use astro_core::{Error, Image, Layout, Result, Stats, stats};
use tracing::{debug, trace};

use crate::black_point::black_point_from_stats;
use crate::curves::CurvesBoost;
use crate::mtf::{MedianStretch, rescale_inplace};
use crate::params::StretchParams;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Color channel counts accepted by [`stretch_color`].
pub const SUPPORTED_COLOR_CHANNELS: [usize; 2] = [1, 3];

/// Statistics of one stretched sample group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupReport {
    /// Channel index for unlinked stretches, `None` for whole-image groups.
    pub channel: Option<usize>,
    /// Statistics of the input samples.
    pub input: Stats,
    /// Estimated black point.
    pub black_point: f32,
    /// Median after rescaling, the anchor of the tone curve.
    pub rescaled_median: f32,
}

/// Diagnostics collected during a stretch.
#[derive(Debug, Clone, PartialEq)]
pub struct StretchReport {
    /// One entry per stretched group, in channel order.
    pub groups: Vec<GroupReport>,
    /// Curves boost that was applied, if any.
    pub curves: Option<CurvesBoost>,
    /// Maximum the result was divided by, if normalized.
    pub normalized_by: Option<f32>,
}

/// Stretches an image, choosing the mono or color path from its layout.
pub fn stretch(image: &Image, params: &StretchParams) -> Result<Image> {
    stretch_with_report(image, params).map(|(img, _)| img)
}

/// Stretches a rank-2 monochrome image.
///
/// `params.linked` is ignored.
///
/// # Errors
///
/// - [`Error::InvalidParameter`] for out-of-range parameters
/// - [`Error::UnsupportedShape`] if the image is not mono
/// - [`Error::NonFiniteSample`] if the input contains NaN or infinity
/// - [`Error::DegenerateStatistics`] for pathological statistics
pub fn stretch_mono(image: &Image, params: &StretchParams) -> Result<Image> {
    if image.layout() != Layout::Mono {
        return Err(Error::unsupported_shape(
            &image.shape(),
            "mono stretch needs a rank-2 image",
        ));
    }
    stretch_with_report(image, params).map(|(img, _)| img)
}

/// Stretches a rank-3 color image, linked or unlinked per `params.linked`.
///
/// # Errors
///
/// As [`stretch_mono`], with [`Error::UnsupportedShape`] for rank-2
/// images and for channel counts outside [`SUPPORTED_COLOR_CHANNELS`].
pub fn stretch_color(image: &Image, params: &StretchParams) -> Result<Image> {
    if image.layout() != Layout::Color {
        return Err(Error::unsupported_shape(
            &image.shape(),
            "color stretch needs a rank-3 image",
        ));
    }
    stretch_with_report(image, params).map(|(img, _)| img)
}

/// Stretches an image and returns the per-group diagnostics.
pub fn stretch_with_report(
    image: &Image,
    params: &StretchParams,
) -> Result<(Image, StretchReport)> {
    params.validate()?;
    if image.layout() == Layout::Color
        && !SUPPORTED_COLOR_CHANNELS.contains(&image.channels())
    {
        return Err(Error::unsupported_shape(
            &image.shape(),
            format!(
                "color stretch supports {:?} channels",
                SUPPORTED_COLOR_CHANNELS
            ),
        ));
    }
    image.ensure_finite()?;

    trace!(
        shape = ?image.shape(),
        target = params.target_median,
        linked = params.linked,
        "stretch"
    );

    let target = params.target_median;
    let (mut out, groups) = if image.is_mono() || params.linked {
        let mut samples = image.samples().to_vec();
        let group = stretch_group(&mut samples, target, None)?;
        (image.with_samples(samples)?, vec![group])
    } else {
        stretch_unlinked(image, target)?
    };

    let (curves, normalized_by) = finish(out.samples_mut(), params)?;

    Ok((
        out,
        StretchReport {
            groups,
            curves,
            normalized_by,
        },
    ))
}

/// Black point, rescale and tone curve on one sample group.
///
/// A constant group maps to the target. Otherwise the rescaled median must
/// be above zero, since the tone curve is 0/0 at a zero median.
fn stretch_group(
    samples: &mut [f32],
    target: f32,
    channel: Option<usize>,
) -> Result<GroupReport> {
    let input = Stats::compute(samples)?;
    let black_point = black_point_from_stats(&input);
    rescale_inplace(samples, black_point)?;

    let rescaled_median = if input.min == input.max {
        samples.fill(target);
        0.0
    } else {
        let curve = MedianStretch::fit(samples, target)?;
        if !(curve.median > 0.0) {
            return Err(Error::degenerate(format!(
                "median {} sits on the black point {} in a non-constant group",
                input.median, black_point
            )));
        }
        curve.apply_inplace(samples)?;
        curve.median
    };

    debug!(
        ?channel,
        black_point,
        median = input.median,
        std_dev = input.std_dev,
        rescaled_median,
        "stretched group"
    );

    Ok(GroupReport {
        channel,
        input,
        black_point,
        rescaled_median,
    })
}

/// Stretches each channel on its own statistics.
fn stretch_unlinked(image: &Image, target: f32) -> Result<(Image, Vec<GroupReport>)> {
    let planes: Vec<Vec<f32>> = (0..image.channels()).map(|c| image.channel(c)).collect();

    // Results keep channel order; the first failing channel is reported.
    #[cfg(feature = "parallel")]
    let results: Vec<Result<(Vec<f32>, GroupReport)>> = planes
        .into_par_iter()
        .enumerate()
        .map(|(c, mut plane)| stretch_group(&mut plane, target, Some(c)).map(|g| (plane, g)))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let results: Vec<Result<(Vec<f32>, GroupReport)>> = planes
        .into_iter()
        .enumerate()
        .map(|(c, mut plane)| stretch_group(&mut plane, target, Some(c)).map(|g| (plane, g)))
        .collect();

    let mut out = image.clone();
    let mut groups = Vec::with_capacity(results.len());
    for (c, result) in results.into_iter().enumerate() {
        let (plane, group) = result?;
        out.set_channel(c, &plane)?;
        groups.push(group);
    }
    Ok((out, groups))
}

/// Curves boost, normalization and final clip.
fn finish(
    samples: &mut [f32],
    params: &StretchParams,
) -> Result<(Option<CurvesBoost>, Option<f32>)> {
    let curves = if params.apply_curves {
        let boost = CurvesBoost::new(params.target_median, params.curves_boost)?;
        boost.apply_inplace(samples);
        Some(boost)
    } else {
        None
    };

    let normalized_by = if params.normalize {
        // The median maps to the target, so the peak is at least target_median.
        let peak = stats::max(samples)?;
        for v in samples.iter_mut() {
            *v /= peak;
        }
        debug!(peak, "normalized");
        Some(peak)
    } else {
        None
    };

    for v in samples.iter_mut() {
        *v = v.clamp(0.0, 1.0);
    }

    Ok((curves, normalized_by))
}
