//! loss_optimizer::builders: solver construction helpers.
//!
//! Purpose
//! -------
//! Provide small builders for the two outer solvers: L-BFGS (with either
//! line search) and Nelder–Mead. These hide `argmin`'s generic wiring and
//! apply crate-level options so the runner can take a configured solver
//! without touching `argmin` types.
//!
//! Key behaviors
//! -------------
//! - L-BFGS: apply optional gradient and cost-change tolerances through
//!   [`configure_lbfgs`]; memory comes from `opts.lbfgs_mem` or
//!   [`DEFAULT_LBFGS_MEM`].
//! - Nelder–Mead: build the initial simplex around `theta0` with
//!   [`initial_simplex`] and apply `tol_cost` as the standard-deviation
//!   tolerance of the simplex costs.
//!
//! Conventions
//! -----------
//! - L-BFGS builders do **not** set `theta0` or `max_iters`; the runner
//!   applies both. Nelder–Mead is the exception for `theta0`, since its
//!   starting point *is* the simplex.
//! - Errors raised by `argmin` configuration calls surface as
//!   [`OptError`](crate::optimization::errors::OptError) through
//!   `From<argmin::core::Error>`.
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    loss_optimizer::{
        traits::SearchOptions,
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, NelderMeadSolver, SIMPLEX_NONZERO_DELTA, SIMPLEX_ZERO_DELTA, Theta,
        },
    },
};

/// Construct L-BFGS with Hager–Zhang line search.
///
/// # Errors
/// Propagates `argmin` rejections of the configured tolerances.
pub fn build_optimizer_hager_zhang(opts: &SearchOptions) -> OptResult<LbfgsHagerZhang> {
    let hager_zhang = HagerZhangLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsHagerZhang::new(hager_zhang, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Construct L-BFGS with More–Thuente line search.
///
/// # Errors
/// Propagates `argmin` rejections of the configured tolerances.
pub fn build_optimizer_more_thuente(opts: &SearchOptions) -> OptResult<LbfgsMoreThuente> {
    let more_thuente = MoreThuenteLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsMoreThuente::new(more_thuente, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Apply optional tolerances to an L-BFGS solver, whatever its line search.
///
/// A `None` tolerance leaves `argmin`'s default in place.
///
/// # Errors
/// Returns an `OptError` when `with_tolerance_grad` or `with_tolerance_cost`
/// rejects a value.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &SearchOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

/// Initial Nelder–Mead simplex around `theta0`.
///
/// Vertex 0 is `theta0`; vertex `i + 1` perturbs coordinate `i`, scaling it
/// by `1 + SIMPLEX_NONZERO_DELTA` when non-zero and setting it to
/// `SIMPLEX_ZERO_DELTA` when zero. The result has `theta0.len() + 1`
/// vertices.
pub fn initial_simplex(theta0: &Theta) -> Vec<Theta> {
    let mut vertices = Vec::with_capacity(theta0.len() + 1);
    vertices.push(theta0.clone());
    for i in 0..theta0.len() {
        let mut vertex = theta0.clone();
        vertex[i] = if vertex[i] != 0.0 {
            (1.0 + SIMPLEX_NONZERO_DELTA) * vertex[i]
        } else {
            SIMPLEX_ZERO_DELTA
        };
        vertices.push(vertex);
    }
    vertices
}

/// Construct a Nelder–Mead solver whose simplex surrounds `theta0`.
///
/// `opts.tols.tol_cost`, when present, becomes the standard-deviation
/// tolerance on the simplex costs; `tol_grad` does not apply.
///
/// # Errors
/// Propagates `argmin` rejections of the tolerance.
pub fn build_nelder_mead(theta0: &Theta, opts: &SearchOptions) -> OptResult<NelderMeadSolver> {
    let mut solver = NelderMeadSolver::new(initial_simplex(theta0));
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_sd_tolerance(c)?;
    }
    Ok(solver)
}
