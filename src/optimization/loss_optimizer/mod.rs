//! loss_optimizer: argmin-powered minimizer for the predictor-weight search.
//!
//! Purpose
//! -------
//! Provide a small, Argmin-backed optimization layer for **minimizing** a
//! scalar loss `c(θ)` over an unconstrained vector. Callers implement one
//! trait, [`LossFunction`], and invoke [`minimize`] with a
//! [`SearchOptions`] selecting Nelder–Mead or L-BFGS.
//!
//! Key behaviors
//! -------------
//! - Bridge user losses into Argmin via [`adapter::ArgMinAdapter`], with a
//!   finite-difference gradient fallback ([`finite_diff`]) for L-BFGS.
//! - Build solvers in [`builders`]: L-BFGS with Hager–Zhang or More–Thuente
//!   line search, or Nelder–Mead over a simplex centered on `θ₀`.
//! - Execute through [`run`] and normalize results into an [`OptimOutcome`].
//!
//! Invariants & assumptions
//! ------------------------
//! - The cost is minimized as returned; there is no sign flip anywhere.
//! - [`LossFunction::value`] must report invalid inputs as [`OptError`]
//!   values rather than panicking; such errors abort the run and reach the
//!   caller with their original variant.
//! - Configuration types ([`Tolerances`], [`SearchOptions`]) are validated on
//!   construction.
//!
//! Downstream usage
//! ----------------
//! - The synthetic control layer implements [`LossFunction`] for the outer
//!   predictor-weight problem and calls [`minimize`] once per fit.
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover configuration parsing and validation,
//!   adapter behavior, solver construction, and end-to-end minimization of a
//!   convex bowl with each method.
//!
//! [`OptError`]: crate::optimization::errors::OptError

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::minimize;
pub use self::traits::{
    LineSearcher, LossFunction, OptimOutcome, SearchMethod, SearchOptions, Tolerances,
};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Theta};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::api::minimize;
    pub use super::traits::{
        LineSearcher, LossFunction, OptimOutcome, SearchMethod, SearchOptions, Tolerances,
    };
    pub use super::types::{Cost, Grad, Theta};
}
