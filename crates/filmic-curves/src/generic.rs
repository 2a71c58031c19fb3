//! Generic filmic operator (Lottes-style power ratio).
//!
//! Single closed-form curve `y = x^a / ((x^a)^d * b + c)` where `b` and `c`
//! are solved at construction from five constraints: contrast, shoulder,
//! the mid-tone pivot and the white point.
//!
//! Reference: "Advanced Techniques and Optimization of VDR Color Pipelines",
//! T. Lottes, GDC 2016, with the mid-tone corrections discussed in
//! <https://bartwronski.com/2016/09/01/dynamic-range-and-evs/>.

use tracing::debug;

use crate::error::{CurveError, CurveResult};

/// Construction parameters for [`GenericCurve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenericParams {
    /// Contrast exponent `a`, controls overall steepness. Must be > 0.
    pub contrast: f64,
    /// Shoulder exponent `d`, controls highlight roll-off. Must be > 0,
    /// typically <= 1.
    pub shoulder: f64,
    /// Input value of the mid-tone pivot, in `(0, hdr_max)`.
    pub mid_in: f64,
    /// Output value the pivot must map to, in `(0, 1)`.
    pub mid_out: f64,
    /// White point: the input that maps to the curve's ceiling. Must
    /// exceed `mid_in`.
    pub hdr_max: f64,
}

impl Default for GenericParams {
    /// Neutral curve: unit contrast and shoulder, 18% grey pivot,
    /// 256.0 white point.
    fn default() -> Self {
        Self {
            contrast: 1.0,
            shoulder: 1.0,
            mid_in: 0.18,
            mid_out: 0.18,
            hdr_max: 256.0,
        }
    }
}

/// Generic tone-mapping curve with solved coefficients.
///
/// Immutable after construction; `eval` is a pure function of the input,
/// so a built curve can be shared freely across threads.
///
/// Invariants established by the coefficient solve:
/// - `eval(mid_in) == mid_out`
/// - `eval(hdr_max) == 1.0` (the design ceiling)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenericCurve {
    a: f64,
    d: f64,
    b: f64,
    c: f64,
    hdr_max: f64,
}

impl GenericCurve {
    /// Solve the curve coefficients from `params`.
    ///
    /// Fails with [`CurveError::Domain`] when the parameters make the solve
    /// degenerate: non-positive contrast/shoulder, a pivot outside
    /// `(0, hdr_max)`, `mid_out` outside `(0, 1)`, or a white point equal
    /// to the pivot (division by zero in the solve).
    pub fn new(params: GenericParams) -> CurveResult<Self> {
        let GenericParams { contrast: a, shoulder: d, mid_in, mid_out, hdr_max } = params;

        if a <= 0.0 || d <= 0.0 {
            return Err(CurveError::Domain(format!(
                "contrast and shoulder must be positive, got a={a}, d={d}"
            )));
        }
        if mid_in <= 0.0 || mid_in >= hdr_max {
            return Err(CurveError::Domain(format!(
                "mid_in must lie in (0, hdr_max), got mid_in={mid_in}, hdr_max={hdr_max}"
            )));
        }
        if mid_out <= 0.0 || mid_out >= 1.0 {
            return Err(CurveError::Domain(format!(
                "mid_out must lie in (0, 1), got {mid_out}"
            )));
        }

        let ad = a * d;
        let u = hdr_max.powf(ad) * mid_out - mid_in.powf(ad) * mid_out;
        if u == 0.0 {
            return Err(CurveError::Domain(format!(
                "degenerate coefficient solve for hdr_max={hdr_max}, mid_in={mid_in}"
            )));
        }
        let v = mid_in.powf(ad) * mid_out;
        let w = hdr_max.powf(ad) * mid_in.powf(a) - hdr_max.powf(a) * v;

        let b = -((-mid_in.powf(a) + mid_out * w / u) / v);
        let c = w / u;

        debug!(b, c, "solved generic curve coefficients");
        Ok(Self { a, d, b, c, hdr_max })
    }

    /// Evaluate the curve at `x`.
    ///
    /// Input is clamped to `[0, hdr_max]` — this operator has a hard
    /// ceiling, unlike [`PiecewiseCurve`](crate::PiecewiseCurve) which lets
    /// out-of-range inputs extrapolate. Returns 0 at 0 and exactly the
    /// design ceiling at `hdr_max`.
    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        let z = x.min(self.hdr_max).powf(self.a);
        z / (z.powf(self.d) * self.b + self.c)
    }

    /// The white point this curve was built for.
    #[inline]
    pub fn hdr_max(&self) -> f64 {
        self.hdr_max
    }
}
