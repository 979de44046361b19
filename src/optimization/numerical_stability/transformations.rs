//! Numerical stability utilities for simplex-constrained weights.
//!
//! Provides guarded implementations of the two maps that keep synthetic
//! control weights valid:
//!
//! # Provided items
//! - [`SIMPLEX_TOL`]: tolerance used when checking that a weight vector sums
//!   to one.
//! - [`GENERAL_TOL`]: generic small threshold below which a scale (a norm, a
//!   Lipschitz bound, a variance) is treated as zero.
//! - [`abs_simplex_weights(x)`]: maps any real vector to `|x| / Σ|x|`,
//!   rejecting the all-zero vector instead of dividing by zero.
//! - [`project_onto_simplex(y, out)`]: Euclidean projection of `y` onto the
//!   probability simplex `{w : w ≥ 0, Σw = 1}`.
//!
//! # Rationale
//! The outer predictor-weight search runs unconstrained, so every candidate
//! has to be mapped back to valid weights before it reaches the inner solver.
//! The inner QP keeps its iterates feasible by projection, which also enforces
//! the box `0 ≤ w_i ≤ 1` implied by the simplex.
use crate::optimization::errors::{OptError, OptResult};
use ndarray::{Array1, ArrayView1};

/// Tolerance for `|Σw − 1|` when checking simplex membership.
pub const SIMPLEX_TOL: f64 = 1e-9;

/// Generic scale below which quantities are treated as numerically zero.
pub const GENERAL_TOL: f64 = 1e-12;

/// Map a free vector to non-negative weights summing to one: `|x| / Σ|x|`.
///
/// # Parameters
/// - `x`: free real vector (any sign).
///
/// # Returns
/// - Normalized weights of the same length as `x`.
///
/// # Errors
/// - [`OptError::DegenerateWeights`] when `Σ|x|` is zero or non-finite; the
///   mapping is undefined there.
pub fn abs_simplex_weights(x: ArrayView1<f64>) -> OptResult<Array1<f64>> {
    let abs = x.mapv(f64::abs);
    let sum = abs.sum();
    if !sum.is_finite() || sum <= 0.0 {
        return Err(OptError::DegenerateWeights { sum });
    }
    Ok(abs / sum)
}

/// Euclidean projection onto the probability simplex.
///
/// Sort-based algorithm: find the largest `ρ` with
/// `u_ρ − (Σ_{j≤ρ} u_j − 1)/ρ > 0` over the descending sort `u` of `y`, then
/// shift by `τ = (Σ_{j≤ρ} u_j − 1)/ρ` and clip at zero.
///
/// Writes the result into `out` (which must have the same length as `y`) so
/// the QP iteration does not allocate for the output. The sort itself uses
/// one scratch vector.
///
/// # Panics
/// - Never panics for finite input of matching length. A length mismatch is a
///   programming error and triggers `ndarray`'s shape assertion.
pub fn project_onto_simplex(y: ArrayView1<f64>, out: &mut Array1<f64>) {
    let n = y.len();
    if n == 0 {
        return;
    }
    let mut sorted: Vec<f64> = y.to_vec();
    sorted.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

    let mut cumsum = 0.0;
    let mut tau = sorted[0] - 1.0;
    for (k, &u) in sorted.iter().enumerate() {
        cumsum += u;
        let candidate = (cumsum - 1.0) / (k as f64 + 1.0);
        if u - candidate > 0.0 {
            tau = candidate;
        }
    }
    out.zip_mut_with(&y, |o, &yi| *o = (yi - tau).max(0.0));
}

/// Check that `w` lies on the probability simplex within [`SIMPLEX_TOL`].
pub fn is_on_simplex(w: ArrayView1<f64>) -> bool {
    w.iter().all(|&wi| wi.is_finite() && wi >= 0.0 && wi <= 1.0 + SIMPLEX_TOL)
        && (w.sum() - 1.0).abs() <= SIMPLEX_TOL.max(w.len() as f64 * f64::EPSILON)
}
