//! # filmic-curves
//!
//! Parametric tone-mapping curves with closed-form fitting.
//!
//! Tone mapping compresses a high-dynamic-range input value into a
//! displayable `[0, 1]` range. This crate implements the two operators that
//! require solving for curve coefficients rather than evaluating a fixed
//! formula:
//!
//! - [`GenericCurve`] — Lottes-style power ratio; two coefficients solved
//!   from contrast, shoulder, a mid-tone pivot and a white point.
//! - [`PiecewiseCurve`] — Hable-style toe/linear/shoulder assembly of
//!   [`LogLogSegment`] power laws, slope-matched at the knots and rescaled
//!   to hit 1.0 at the white point.
//!
//! The fixed reference operators the original comparisons were plotted
//! against live in [`reference`].
//!
//! | Curve | Fitting | Above white point |
//! |-------|---------|-------------------|
//! | [`GenericCurve`] | 2 coefficients, 5 constraints | clamps |
//! | [`PiecewiseCurve`] | 3 segments, knot continuity | extrapolates |
//! | [`reference`] operators | none | varies |
//!
//! # Usage
//!
//! ```rust
//! use filmic_curves::{GenericCurve, GenericParams};
//!
//! let curve = GenericCurve::new(GenericParams {
//!     contrast: 1.2,
//!     shoulder: 0.97,
//!     mid_in: 0.3,
//!     mid_out: 0.18,
//!     hdr_max: 16.0,
//! })?;
//!
//! // The pivot maps through exactly; the white point hits the ceiling.
//! assert!((curve.eval(0.3) - 0.18).abs() < 1e-9);
//! assert!((curve.eval(16.0) - 1.0).abs() < 1e-9);
//! # Ok::<(), filmic_curves::CurveError>(())
//! ```
//!
//! # Design
//!
//! Curves are immutable after construction: fitting happens once in `new`
//! and can fail with [`CurveError`]; evaluation is a pure `f64 -> f64`
//! function, total over finite inputs, and safe to call concurrently from
//! any number of threads. There is no I/O and no global state — sampling a
//! curve over a sweep of inputs and rendering the result is the caller's
//! business.
//!
//! # References
//!
//! - T. Lottes, "Advanced Techniques and Optimization of VDR Color
//!   Pipelines", GDC 2016
//! - J. Hable, "Filmic Tonemapping with Piecewise Power Curves"
//! - K. Narkowicz, "ACES Filmic Tone Mapping Curve"

pub mod error;
pub mod generic;
pub mod piecewise;
pub mod reference;
pub mod segment;

pub use error::{CurveError, CurveResult};
pub use generic::{GenericCurve, GenericParams};
pub use piecewise::{Knot, PiecewiseCurve, PiecewiseParams, SegmentRole};
pub use segment::LogLogSegment;

/// A tone-mapping curve: a pure scalar mapping from scene input to display
/// output.
///
/// This is the seam a chart renderer (or any other consumer) samples:
/// call [`eval`](ToneCurve::eval) over a chosen sweep of inputs and do
/// whatever presentation is needed with the `(x, y)` pairs.
pub trait ToneCurve {
    /// Evaluate the curve at `x`.
    fn eval(&self, x: f64) -> f64;
}

impl ToneCurve for GenericCurve {
    #[inline]
    fn eval(&self, x: f64) -> f64 {
        GenericCurve::eval(self, x)
    }
}

impl ToneCurve for PiecewiseCurve {
    #[inline]
    fn eval(&self, x: f64) -> f64 {
        PiecewiseCurve::eval(self, x)
    }
}
