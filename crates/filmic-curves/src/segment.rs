//! Power-law curve segment in log-log space.
//!
//! A power law `y = A * t^B` is a straight line in log-log coordinates,
//! so it is stored and evaluated as `exp(ln_a + slope_b * ln(t))` for
//! numerical stability. Affine transforms on both axes generalize the
//! primitive: the same increasing power law can represent a toe, a linear
//! middle (slope_b = 1), or — with negative scales — a mirrored,
//! decreasing shoulder.
//!
//! Based on the piecewise power curves described in
//! <http://filmicworlds.com/blog/filmic-tonemapping-with-piecewise-power-curves/>.

use crate::error::{CurveError, CurveResult};

/// One monotonic power-law piece of a piecewise tone curve.
///
/// Fully immutable: every field is supplied at construction and never
/// changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogLogSegment {
    /// Input offset, applied before scaling.
    pub offset_x: f64,
    /// Input scale (negative to mirror the domain).
    pub scale_x: f64,
    /// Output offset, applied last.
    pub offset_y: f64,
    /// Output scale (negative to mirror the range).
    pub scale_y: f64,
    /// `ln(A)` of the underlying power law `A * t^B`.
    pub ln_a: f64,
    /// Exponent `B` of the underlying power law.
    pub slope_b: f64,
}

impl LogLogSegment {
    /// Create a segment from all six parameters in one step.
    pub fn new(
        offset_x: f64,
        scale_x: f64,
        offset_y: f64,
        scale_y: f64,
        ln_a: f64,
        slope_b: f64,
    ) -> Self {
        Self { offset_x, scale_x, offset_y, scale_y, ln_a, slope_b }
    }

    /// A segment with identity transforms on both axes.
    pub fn from_power_law(ln_a: f64, slope_b: f64) -> Self {
        Self::new(0.0, 1.0, 0.0, 1.0, ln_a, slope_b)
    }

    /// Evaluate the segment at `x`.
    ///
    /// The transformed coordinate `t = (x - offset_x) * scale_x` clamps the
    /// log domain: any non-positive `t` contributes a raw value of 0, so the
    /// result is exactly `offset_y` there.
    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        let t = (x - self.offset_x) * self.scale_x;
        let y0 = if t > 0.0 {
            (self.ln_a + self.slope_b * t.ln()).exp()
        } else {
            0.0
        };
        y0 * self.scale_y + self.offset_y
    }
}

/// Solve the power law `y = A * t^B` passing through `(x0, y0)` with
/// derivative `m` there. Returns `(ln_a, slope_b)`.
///
/// This is the core fitting step shared by the toe and shoulder segments:
/// the transition slope carried over from the linear middle segment pins
/// down a unique power curve at the anchor point.
pub fn fit_power(x0: f64, y0: f64, m: f64) -> CurveResult<(f64, f64)> {
    if x0 <= 0.0 || y0 <= 0.0 {
        return Err(CurveError::Domain(format!(
            "power-law fit requires a positive anchor, got ({x0}, {y0})"
        )));
    }
    let slope_b = m * x0 / y0;
    let ln_a = y0.ln() - slope_b * x0.ln();
    Ok((ln_a, slope_b))
}

/// Two-point line fit. Returns `(slope, intercept)`.
///
/// Coincident x-coordinates fall back to slope 1.0 by convention rather
/// than erroring; the intercept is then taken through the first point.
pub fn slope_intercept(x0: f64, y0: f64, x1: f64, y1: f64) -> (f64, f64) {
    let dx = x1 - x0;
    let m = if dx == 0.0 { 1.0 } else { (y1 - y0) / dx };
    let b = y0 - m * x0;
    (m, b)
}
