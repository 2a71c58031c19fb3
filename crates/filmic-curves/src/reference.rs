//! Fixed-form reference operators.
//!
//! Stateless single-expression curves kept for comparison plots alongside
//! the parametric operators. None of these involve any fitting; the
//! normalized variants simply divide by the operator's value at the white
//! point so every curve hits 1.0 there.
//!
//! References:
//! - Uncharted 2: <http://filmicworlds.com/blog/filmic-tonemapping-operators/>
//! - ACES fit: <https://knarkowicz.wordpress.com/2016/01/06/aces-filmic-tone-mapping-curve/>

/// Hable's Uncharted 2 operator with the original published constants.
#[inline]
pub fn uncharted2(x: f64) -> f64 {
    const A: f64 = 0.22;
    const B: f64 = 0.30;
    const C: f64 = 0.10;
    const D: f64 = 0.20;
    const E: f64 = 0.01;
    const F: f64 = 0.30;

    (x * (A * x + C * B) + D * E) / (x * (A * x + B) + D * F) - E / F
}

/// Uncharted 2 rescaled so `hdr_max` maps to 1.0.
#[inline]
pub fn uncharted2_normalized(x: f64, hdr_max: f64) -> f64 {
    uncharted2(x) / uncharted2(hdr_max)
}

/// Narkowicz's rational fit of the ACES filmic curve.
#[inline]
pub fn aces(x: f64) -> f64 {
    const A: f64 = 2.51;
    const B: f64 = 0.03;
    const C: f64 = 2.43;
    const D: f64 = 0.59;
    const E: f64 = 0.14;

    (x * (A * x + B)) / (x * (C * x + D) + E)
}

/// ACES fit rescaled so `hdr_max` maps to 1.0.
#[inline]
pub fn aces_normalized(x: f64, hdr_max: f64) -> f64 {
    aces(x) / aces(hdr_max)
}

/// Classic Reinhard operator `x / (1 + x)`.
#[inline]
pub fn reinhard(x: f64) -> f64 {
    x / (1.0 + x)
}

/// Reinhard rescaled so `hdr_max` maps to 1.0.
#[inline]
pub fn reinhard_normalized(x: f64, hdr_max: f64) -> f64 {
    reinhard(x) / reinhard(hdr_max)
}
