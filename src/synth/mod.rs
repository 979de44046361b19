//! synth: synthetic control estimation.
//!
//! Purpose
//! -------
//! Estimate a synthetic control for one treated unit: find predictor weights
//! `V` and donor weights `W` such that the weighted donors reproduce the
//! treated unit's pre-treatment outcomes.
//!
//! Key behaviors
//! -------------
//! - Inputs arrive through a [`DataSource`]: a [`Dataprep`] collaborator or
//!   the four matrices `X0`, `X1`, `Z0`, `Z1`.
//! - Predictors are variance-scaled jointly across donors and the treated
//!   unit before any optimization.
//! - The inner level solves a simplex-constrained QP for `W`; the outer level
//!   searches `V = diag(|x|)/Σ|x|` to minimize the outcome loss, unless the
//!   caller fixes `V`.
//! - Results are returned as an immutable [`SynthFit`].
//!
//! Invariants & assumptions
//! ------------------------
//! - `W` lies on the probability simplex; a searched `V` is non-negative
//!   with unit trace.
//! - Degenerate inputs (constant predictors, an all-zero search vector, an
//!   uninformative OLS guess) are reported as [`SynthError`] values.
//! - Non-convergence of either level is reported on the result, not raised.
//!
//! Downstream usage
//! ----------------
//! - Rust callers use [`fit`] with [`SynthOptions`]; the Python `Synth` class
//!   wraps the same call.
//!
//! Testing notes
//! -------------
//! - Unit tests live beside each submodule; `tests/integration_synth_pipeline.rs`
//!   covers end-to-end fits.

pub mod core;
pub mod errors;
pub mod models;

pub use self::core::{DataSource, Dataprep, InitialGuess, SynthData, SynthOptions, VSelection};
pub use self::errors::{SynthError, SynthResult};
pub use self::models::{
    results::SynthFit,
    synth::{fit, solve_predictor_weights},
    unit_weights::{optimize_w, solve_unit_weights},
};

pub mod prelude {
    pub use super::core::{DataSource, Dataprep, InitialGuess, SynthData, SynthOptions, VSelection};
    pub use super::errors::{SynthError, SynthResult};
    pub use super::models::{results::SynthFit, synth::fit};
}
