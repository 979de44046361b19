//! numerical_stability: guarded maps onto the probability simplex.
//!
//! Purpose
//! -------
//! Collect the small numerical primitives shared by both optimization levels
//! of a synthetic control fit: mapping a free search vector onto normalized
//! predictor weights, and projecting QP iterates back onto the unit simplex.
//! Centralizing these keeps tolerances consistent across the outer search and
//! the inner solver.
//!
//! Key behaviors
//! -------------
//! - `abs_simplex_weights` maps any real vector `x` to `|x| / Σ|x|` and
//!   reports the all-zero vector as [`OptError::DegenerateWeights`] instead of
//!   propagating NaN.
//! - `project_onto_simplex` computes the Euclidean projection onto
//!   `{w : w ≥ 0, Σw = 1}` in O(n log n).
//! - `is_on_simplex` checks membership within [`SIMPLEX_TOL`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are assumed finite; validation of user data happens in the
//!   `synth` layer before any of these helpers run.
//! - Outputs of both maps always satisfy the simplex constraints up to
//!   floating-point rounding.
//!
//! Conventions
//! -----------
//! - All routines operate on `ndarray` vectors over `f64`.
//! - This module never logs or performs I/O.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`transformations`] cover hand-computed projections,
//!   feasibility on mixed-sign inputs, and the degenerate zero vector.
//!
//! [`OptError::DegenerateWeights`]: crate::optimization::errors::OptError::DegenerateWeights

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    GENERAL_TOL, SIMPLEX_TOL, abs_simplex_weights, is_on_simplex, project_onto_simplex,
};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::transformations::{
        GENERAL_TOL, SIMPLEX_TOL, abs_simplex_weights, is_on_simplex, project_onto_simplex,
    };
}
