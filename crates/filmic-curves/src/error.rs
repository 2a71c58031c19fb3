//! Error types for curve construction.
//!
//! All failures are reported when a curve is built; evaluation itself is
//! total over finite inputs and never errors.

use thiserror::Error;

/// Curve construction error.
///
/// A single domain-error kind covers every invalid-construction case:
/// - degenerate knot ordering
/// - zero/negative values feeding a logarithm
/// - division by zero in a coefficient solve
///
/// These are caller-input bugs, surfaced immediately; no retry applies.
#[derive(Debug, Error)]
pub enum CurveError {
    /// Construction parameters are outside the solvable domain.
    #[error("domain error: {0}")]
    Domain(String),
}

/// Result type for curve construction.
pub type CurveResult<T> = Result<T, CurveError>;
