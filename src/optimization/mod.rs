//! optimization: outer minimizer, inner simplex QP, numerical helpers, and
//! the shared error surface.
//!
//! Purpose
//! -------
//! Provide the numeric machinery behind a synthetic control fit without
//! knowing anything about predictors or donors: an Argmin-backed minimizer
//! for unconstrained losses, a projected-gradient solver for quadratic
//! programs over the probability simplex, and the small maps that keep
//! weights valid.
//!
//! Key behaviors
//! -------------
//! - `loss_optimizer`: minimize a user [`LossFunction`] with Nelder–Mead or
//!   L-BFGS, returning an [`OptimOutcome`].
//! - `simplex_qp`: minimize `0.5 wᵀPw + qᵀw` subject to `w ≥ 0`, `Σw = 1`.
//! - `numerical_stability`: `|x|/Σ|x|` normalization and Euclidean simplex
//!   projection.
//! - `errors`: a single enum (`OptError`) with the alias `OptResult<T>`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs reaching this layer are finite; the model layer validates user
//!   data first.
//! - Failures are reported as `OptError`, not panics. Non-convergence is a
//!   flag on the outcome, not an error.
//!
//! Conventions
//! -----------
//! - Vectors and matrices are `ndarray` containers over `f64`.
//! - This module performs no I/O except the opt-in `obs_slog` observer.
//!
//! [`LossFunction`]: crate::optimization::loss_optimizer::LossFunction
//! [`OptimOutcome`]: crate::optimization::loss_optimizer::OptimOutcome

pub mod errors;
pub mod loss_optimizer;
pub mod numerical_stability;
pub mod simplex_qp;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use synth_control::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loss_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
    pub use super::simplex_qp::prelude::*;
}
