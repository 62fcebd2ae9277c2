//! Secondary curves boost applied after the median stretch.
//!
//! The boost is a six-point piecewise-linear curve built from the target
//! median `m` and a boost amount `b`:
//!
//! ```text
//! (0, 0)
//! (m/2, m/2)
//! (m, m)
//! (q1, q1^(1-b))              q1 = (1 - m)/4 + m
//! (q3, (q3^(1-b))^(1-b))      q3 = 3(1 - m)/4 + m
//! (1, 1)
//! ```
//!
//! Everything at or below the median stays on the identity line. The two
//! upper anchors are lifted by a power law; the 75% anchor gets the lift
//! twice, so highlights roll off harder than upper midtones.
//!
//! With `b = 0` every anchor sits on the identity line and the boost is a
//! no-op up to interpolation rounding.

use astro_core::{Error, Result};

/// Number of control points of the boost curve.
pub const NUM_POINTS: usize = 6;

/// Piecewise-linear boost curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvesBoost {
    xs: [f32; NUM_POINTS],
    ys: [f32; NUM_POINTS],
}

impl CurvesBoost {
    /// Builds the curve for a target median and boost amount.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `target` is outside `(0, 1)`,
    /// `boost` is negative or non-finite, or the control abscissae are not
    /// strictly increasing once rounded to `f32`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use astro_ops::curves::CurvesBoost;
    ///
    /// let curve = CurvesBoost::new(0.25, 0.3).unwrap();
    /// // Median and below are untouched.
    /// assert_eq!(curve.eval(0.25), 0.25);
    /// // Upper midtones are lifted.
    /// assert!(curve.eval(0.6) > 0.6);
    /// ```
    pub fn new(target: f32, boost: f32) -> Result<Self> {
        if !(target > 0.0 && target < 1.0) {
            return Err(Error::invalid_parameter(
                "target_median",
                target,
                "must be in the open interval (0, 1)",
            ));
        }
        if !(boost >= 0.0 && boost.is_finite()) {
            return Err(Error::invalid_parameter(
                "curves_boost",
                boost,
                "must be finite and >= 0",
            ));
        }

        // Anchors are computed in f64 and rounded once.
        let m = target as f64;
        let e = 1.0 - boost as f64;
        let q1 = 0.25 * (1.0 - m) + m;
        let q3 = 0.75 * (1.0 - m) + m;
        let points: [(f64, f64); NUM_POINTS] = [
            (0.0, 0.0),
            (0.5 * m, 0.5 * m),
            (m, m),
            (q1, q1.powf(e)),
            (q3, q3.powf(e).powf(e)),
            (1.0, 1.0),
        ];

        let xs = points.map(|(x, _)| x as f32);
        let ys = points.map(|(_, y)| y as f32);
        if xs.windows(2).any(|w| !(w[0] < w[1])) {
            return Err(Error::invalid_parameter(
                "target_median",
                target,
                "too close to 0 or 1 for distinct curve anchors",
            ));
        }

        Ok(Self { xs, ys })
    }

    /// Control points as `(x, y)` pairs.
    pub fn points(&self) -> [(f32, f32); NUM_POINTS] {
        std::array::from_fn(|i| (self.xs[i], self.ys[i]))
    }

    /// Returns `true` when every anchor lies on the identity line.
    pub fn is_identity(&self) -> bool {
        self.xs == self.ys
    }

    /// Evaluates the curve at `x`.
    ///
    /// Inputs below the first anchor return the first ordinate, inputs
    /// above the last return the last ordinate. NaN propagates.
    #[inline]
    pub fn eval(&self, x: f32) -> f32 {
        let (xs, ys) = (&self.xs, &self.ys);
        if x.is_nan() {
            return x;
        }
        if x <= xs[0] {
            return ys[0];
        }
        if x >= xs[NUM_POINTS - 1] {
            return ys[NUM_POINTS - 1];
        }
        // First anchor strictly greater than x; 1..NUM_POINTS-1 here.
        let hi = xs.partition_point(|&p| p <= x);
        let lo = hi - 1;
        if x == xs[lo] {
            return ys[lo];
        }
        let t = (x - xs[lo]) / (xs[hi] - xs[lo]);
        ys[lo] + t * (ys[hi] - ys[lo])
    }

    /// Applies the curve to every sample.
    pub fn apply_inplace(&self, samples: &mut [f32]) {
        for v in samples.iter_mut() {
            *v = self.eval(*v);
        }
    }
}
