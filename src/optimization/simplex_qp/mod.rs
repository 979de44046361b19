//! simplex_qp: convex quadratic programs over the probability simplex.
//!
//! Purpose
//! -------
//! Solve `min 0.5 wᵀPw + qᵀw` subject to `w ≥ 0`, `Σw = 1`, the inner
//! problem of a synthetic control fit (donor weights for fixed predictor
//! weights).
//!
//! Key behaviors
//! -------------
//! - [`SimplexQp`] holds `P` and `q` and evaluates value, gradient and a
//!   Lipschitz bound.
//! - [`solve_simplex_qp`] runs projected gradient (plain or accelerated with
//!   restart) from the uniform point.
//! - [`QpOptions`] carries the method, iteration budget and step tolerance.
//!
//! Invariants & assumptions
//! ------------------------
//! - `P` is symmetric positive semi-definite; every returned `w` lies on the
//!   simplex up to rounding.
//! - Running out of iterations sets `converged = false` and is not an error.

pub mod options;
pub mod problem;
pub mod solver;

pub use self::options::{DEFAULT_QP_MAX_ITER, DEFAULT_QP_TOL_STEP, QpMethod, QpOptions};
pub use self::problem::SimplexQp;
pub use self::solver::{QpOutcome, solve_simplex_qp};

pub mod prelude {
    pub use super::options::{QpMethod, QpOptions};
    pub use super::problem::SimplexQp;
    pub use super::solver::{QpOutcome, solve_simplex_qp};
}
