//! Stretch parameters.

use astro_core::{Error, Result};

/// Default target median (25% gray).
pub const DEFAULT_TARGET_MEDIAN: f32 = 0.25;

/// Parameters for a statistical stretch.
///
/// The value is immutable configuration; every stretch call is a pure
/// function of the image and these parameters.
///
/// # Example
///
/// ```rust
/// use astro_ops::StretchParams;
///
/// let params = StretchParams::new(0.2)
///     .with_linked(false)
///     .with_curves(0.3);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StretchParams {
    /// Median the stretched image should have, in `(0, 1)`.
    pub target_median: f32,
    /// Color only: share statistics across channels (`true`) or stretch
    /// each channel on its own statistics (`false`).
    pub linked: bool,
    /// Divide the result by its maximum so the brightest sample is 1.0.
    pub normalize: bool,
    /// Run the curves boost after the stretch.
    pub apply_curves: bool,
    /// Curves boost amount, `>= 0` (typically 0 to 0.5).
    pub curves_boost: f32,
}

impl Default for StretchParams {
    fn default() -> Self {
        Self {
            target_median: DEFAULT_TARGET_MEDIAN,
            linked: true,
            normalize: false,
            apply_curves: false,
            curves_boost: 0.0,
        }
    }
}

impl StretchParams {
    /// Default parameters with the given target median.
    pub fn new(target_median: f32) -> Self {
        Self {
            target_median,
            ..Self::default()
        }
    }

    /// Sets linked/unlinked channel statistics.
    pub fn with_linked(mut self, linked: bool) -> Self {
        self.linked = linked;
        self
    }

    /// Enables or disables normalization.
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Enables the curves boost with the given amount.
    pub fn with_curves(mut self, boost: f32) -> Self {
        self.apply_curves = true;
        self.curves_boost = boost;
        self
    }

    /// Checks parameter ranges.
    ///
    /// `curves_boost` is checked even when curves are disabled.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `target_median` is not in
    /// `(0, 1)` or `curves_boost` is negative or non-finite.
    pub fn validate(&self) -> Result<()> {
        if !(self.target_median > 0.0 && self.target_median < 1.0) {
            return Err(Error::invalid_parameter(
                "target_median",
                self.target_median,
                "must be in the open interval (0, 1)",
            ));
        }
        if !(self.curves_boost >= 0.0 && self.curves_boost.is_finite()) {
            return Err(Error::invalid_parameter(
                "curves_boost",
                self.curves_boost,
                "must be finite and >= 0",
            ));
        }
        Ok(())
    }
}
