//! Piecewise filmic operator (Hable-style power curves).
//!
//! Three [`LogLogSegment`] pieces — toe, linear middle, shoulder — are
//! fitted so they meet at two knots with matching value and slope, then the
//! whole assembly is rescaled so the white point maps to exactly 1.0.
//!
//! Reference:
//! <http://filmicworlds.com/blog/filmic-tonemapping-with-piecewise-power-curves/>.

use tracing::debug;

use crate::error::{CurveError, CurveResult};
use crate::segment::{LogLogSegment, fit_power, slope_intercept};

/// A boundary point two adjoining segments must pass through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Knot {
    /// Input coordinate, in the same units as `hdr_max`.
    pub x: f64,
    /// Output coordinate.
    pub y: f64,
}

impl Knot {
    /// Create a knot from its coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Which of the three pieces handles a given input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum SegmentRole {
    /// Dark region below the first knot.
    Toe = 0,
    /// Linear region between the knots.
    Mid = 1,
    /// Highlight roll-off above the second knot.
    Shoulder = 2,
}

impl SegmentRole {
    /// All roles in evaluation order.
    pub const ALL: [SegmentRole; 3] = [SegmentRole::Toe, SegmentRole::Mid, SegmentRole::Shoulder];
}

/// Construction parameters for [`PiecewiseCurve`].
///
/// The overshoot knot extends past the nominal white point; it shapes the
/// shoulder's curvature before the final rescale pulls the curve back down
/// to hit 1.0 at `hdr_max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PiecewiseParams {
    /// White point: the input that must map to exactly 1.0.
    pub hdr_max: f64,
    /// Toe/mid boundary. Requires `0 < toe.x < mid.x` and `0 < toe.y < mid.y`.
    pub toe: Knot,
    /// Mid/shoulder boundary. Requires `mid.x < hdr_max`.
    pub mid: Knot,
    /// Overshoot target. Requires `overshoot.x > hdr_max` and
    /// `overshoot.y > mid.y`.
    pub overshoot: Knot,
}

/// Piecewise tone-mapping curve of three slope-matched power-law segments.
///
/// Internally the curve operates on inputs normalized by `hdr_max`; the
/// stored thresholds `x0`, `x1` are in that normalized space. Immutable
/// after construction and safe to evaluate concurrently.
#[derive(Debug, Clone, Copy)]
pub struct PiecewiseCurve {
    segments: [LogLogSegment; 3],
    x0: f64,
    x1: f64,
    hdr_max: f64,
}

impl PiecewiseCurve {
    /// Fit the three segments from `params`.
    ///
    /// Fails with [`CurveError::Domain`] on degenerate knot ordering, a
    /// non-positive linear slope (its log is taken), or a collapsed
    /// white-point rescale.
    pub fn new(params: PiecewiseParams) -> CurveResult<Self> {
        let PiecewiseParams { hdr_max, toe, mid, overshoot } = params;

        if hdr_max <= 0.0 {
            return Err(CurveError::Domain(format!(
                "hdr_max must be positive, got {hdr_max}"
            )));
        }
        if !(0.0 < toe.x && toe.x < mid.x && mid.x < hdr_max) {
            return Err(CurveError::Domain(format!(
                "knots must satisfy 0 < toe.x < mid.x < hdr_max, \
                 got toe.x={}, mid.x={}, hdr_max={hdr_max}",
                toe.x, mid.x
            )));
        }
        if !(0.0 < toe.y && toe.y < mid.y) {
            return Err(CurveError::Domain(format!(
                "knots must satisfy 0 < toe.y < mid.y, got toe.y={}, mid.y={}",
                toe.y, mid.y
            )));
        }
        if overshoot.x <= hdr_max {
            return Err(CurveError::Domain(format!(
                "overshoot.x must exceed hdr_max, got overshoot.x={}, hdr_max={hdr_max}",
                overshoot.x
            )));
        }
        if overshoot.y <= mid.y {
            return Err(CurveError::Domain(format!(
                "overshoot.y must exceed mid.y, got overshoot.y={}, mid.y={}",
                overshoot.y, mid.y
            )));
        }

        // The curve is fitted in input space normalized by hdr_max.
        let x0 = toe.x / hdr_max;
        let x1 = mid.x / hdr_max;
        let overshoot_x = overshoot.x / hdr_max;

        // Linear middle: a slope-1 power law is a straight line once the
        // domain is shifted so it passes through the origin.
        let (m, intercept) = slope_intercept(x0, toe.y, x1, mid.y);
        let mid_seg = LogLogSegment::new(-intercept / m, 1.0, 0.0, 1.0, m.ln(), 1.0);

        // Toe: power law anchored at the first knot with the linear slope,
        // so value and derivative match there.
        let (ln_a, slope_b) = fit_power(x0, toe.y, m)?;
        let toe_seg = LogLogSegment::from_power_law(ln_a, slope_b);

        // Shoulder: fit the same kind of rising power law at the knot
        // reflected about the overshoot target, then mirror both axes so it
        // rolls off toward the white point instead of rising away from it.
        let flip_x = 1.0 + overshoot_x;
        let flip_y = 1.0 + overshoot.y;
        let (ln_a, slope_b) = fit_power(flip_x - x1, flip_y - mid.y, m)?;
        let shoulder_seg = LogLogSegment::new(flip_x, -1.0, flip_y, -1.0, ln_a, slope_b);

        // Rescale so the normalized white point lands on exactly 1.0.
        let scale = shoulder_seg.eval(1.0);
        if !(scale.is_finite() && scale > 0.0) {
            return Err(CurveError::Domain(format!(
                "white-point rescale collapsed, shoulder evaluates to {scale} at hdr_max"
            )));
        }

        let mut segments = [toe_seg, mid_seg, shoulder_seg];
        for seg in &mut segments {
            seg.offset_y /= scale;
            seg.scale_y /= scale;
        }

        debug!(m, scale, "fitted piecewise curve segments");
        Ok(Self { segments, x0, x1, hdr_max })
    }

    /// Which segment evaluates a normalized input. Knots belong to the
    /// higher segment.
    #[inline]
    fn select(&self, norm_x: f64) -> SegmentRole {
        if norm_x < self.x0 {
            SegmentRole::Toe
        } else if norm_x < self.x1 {
            SegmentRole::Mid
        } else {
            SegmentRole::Shoulder
        }
    }

    /// Evaluate the curve at `x` (in input units, not normalized).
    ///
    /// Inputs are not clamped: values beyond the overshoot range
    /// extrapolate through the mirrored shoulder power law and may decrease
    /// or go negative. That matches the operator's original behavior at
    /// extreme inputs and is left as-is.
    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        let norm_x = x / self.hdr_max;
        self.segments[self.select(norm_x) as usize].eval(norm_x)
    }

    /// The fitted segment for `role`, in normalized input space.
    #[inline]
    pub fn segment(&self, role: SegmentRole) -> &LogLogSegment {
        &self.segments[role as usize]
    }

    /// The white point this curve was built for.
    #[inline]
    pub fn hdr_max(&self) -> f64 {
        self.hdr_max
    }

    /// The knot thresholds in normalized input space.
    #[inline]
    pub fn knots(&self) -> (f64, f64) {
        (self.x0, self.x1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn reference_params() -> PiecewiseParams {
        PiecewiseParams {
            hdr_max: 2.0,
            toe: Knot::new(0.25, 0.25),
            mid: Knot::new(0.6, 0.6),
            overshoot: Knot::new(8.0, 1.5),
        }
    }

    // A configuration where the knots are not collinear with the origin,
    // so toe, mid and shoulder are all genuinely different curves.
    fn bent_params() -> PiecewiseParams {
        PiecewiseParams {
            hdr_max: 16.0,
            toe: Knot::new(0.5, 0.12),
            mid: Knot::new(4.0, 0.7),
            overshoot: Knot::new(20.0, 1.2),
        }
    }

    #[test]
    fn test_white_point_maps_to_one() {
        for params in [reference_params(), bent_params()] {
            let curve = PiecewiseCurve::new(params).unwrap();
            assert_relative_eq!(curve.eval(params.hdr_max), 1.0, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_black_is_black() {
        let curve = PiecewiseCurve::new(reference_params()).unwrap();
        assert_abs_diff_eq!(curve.eval(0.0), 0.0);
    }

    #[test]
    fn test_value_continuity_at_knots() {
        for params in [reference_params(), bent_params()] {
            let curve = PiecewiseCurve::new(params).unwrap();
            let (x0, x1) = curve.knots();

            let toe = curve.segment(SegmentRole::Toe);
            let mid = curve.segment(SegmentRole::Mid);
            let shoulder = curve.segment(SegmentRole::Shoulder);

            assert_abs_diff_eq!(toe.eval(x0), mid.eval(x0), epsilon = 1e-9);
            assert_abs_diff_eq!(mid.eval(x1), shoulder.eval(x1), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_slope_continuity_at_knots() {
        let h = 1e-7;
        for params in [reference_params(), bent_params()] {
            let curve = PiecewiseCurve::new(params).unwrap();
            let (x0, x1) = curve.knots();

            for (a, b, knot) in [
                (SegmentRole::Toe, SegmentRole::Mid, x0),
                (SegmentRole::Mid, SegmentRole::Shoulder, x1),
            ] {
                let slope = |role: SegmentRole| {
                    let seg = curve.segment(role);
                    (seg.eval(knot + h) - seg.eval(knot - h)) / (2.0 * h)
                };
                let (sa, sb) = (slope(a), slope(b));
                assert!(
                    (sa - sb).abs() / sb.abs().max(1.0) < 1e-6,
                    "slope mismatch at knot {knot}: {sa} vs {sb}"
                );
            }
        }
    }

    #[test]
    fn test_mid_segment_is_scaled_line() {
        // Normalized knots (0.125, 0.25) and (0.3, 0.6) give slope 2 and
        // zero intercept; after the white-point rescale the mid value at
        // x = 0.6 is 0.6 / scale.
        let curve = PiecewiseCurve::new(reference_params()).unwrap();
        let scale = 0.6 / curve.eval(0.6);
        assert_relative_eq!(curve.eval(0.3), 0.3 / scale, max_relative = 1e-9);
        assert_relative_eq!(curve.eval(0.45), 0.45 / scale, max_relative = 1e-9);
    }

    #[test]
    fn test_monotonic_up_to_white_point() {
        for params in [reference_params(), bent_params()] {
            let curve = PiecewiseCurve::new(params).unwrap();
            let mut prev = 0.0;
            for i in 1..=1000 {
                let x = i as f64 * params.hdr_max / 1000.0;
                let y = curve.eval(x);
                assert!(y >= prev, "not monotonic at x={x}: {y} < {prev}");
                prev = y;
            }
        }
    }

    #[test]
    fn test_knot_boundary_goes_to_higher_segment() {
        let curve = PiecewiseCurve::new(reference_params()).unwrap();
        let (x0, x1) = curve.knots();
        assert_eq!(curve.select(x0), SegmentRole::Mid);
        assert_eq!(curve.select(x1), SegmentRole::Shoulder);
        assert_eq!(curve.select(x0 - 1e-12), SegmentRole::Toe);
    }

    #[test]
    fn test_extrapolates_past_overshoot() {
        // No clamp above the white point: the mirrored power law keeps
        // going and is allowed to turn around at extreme inputs.
        let params = reference_params();
        let curve = PiecewiseCurve::new(params).unwrap();
        let just_above = curve.eval(params.hdr_max * 1.01);
        assert!(just_above.is_finite());
        assert!(just_above > 1.0 - 1e-9);
        assert!(curve.eval(params.overshoot.x * 100.0).is_finite());
    }

    #[test]
    fn test_rejects_bad_params() {
        let mut p = reference_params();
        p.toe.x = 0.7; // toe past mid
        assert!(PiecewiseCurve::new(p).is_err());

        let mut p = reference_params();
        p.overshoot.x = 1.5; // overshoot inside the display range
        assert!(PiecewiseCurve::new(p).is_err());

        let mut p = reference_params();
        p.overshoot.y = 0.4;
        assert!(PiecewiseCurve::new(p).is_err());

        let mut p = reference_params();
        p.toe.y = 0.6; // flat linear section, log of slope undefined
        assert!(PiecewiseCurve::new(p).is_err());

        let mut p = reference_params();
        p.hdr_max = -2.0;
        assert!(PiecewiseCurve::new(p).is_err());
    }

    #[test]
    fn test_roles_index_segments() {
        let curve = PiecewiseCurve::new(bent_params()).unwrap();
        for role in SegmentRole::ALL {
            // Each role maps to a distinct fitted segment.
            let seg = curve.segment(role);
            assert!(seg.ln_a.is_finite());
        }
        assert_ne!(
            curve.segment(SegmentRole::Toe),
            curve.segment(SegmentRole::Shoulder)
        );
    }
}
