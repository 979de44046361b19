//! Fit configuration.
use crate::{
    optimization::{
        loss_optimizer::{SearchMethod, SearchOptions, Tolerances},
        simplex_qp::{QpMethod, QpOptions},
    },
    synth::{core::init::InitialGuess, errors::SynthResult},
};
use ndarray::{Array1, Array2};

/// How the predictor-weight matrix `V` is chosen.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum VSelection {
    /// Search over `V = diag(|x|)/Σ|x|` minimizing the outcome loss.
    #[default]
    Search,
    /// Use this `n_p × n_p` diagonal matrix as given; no search runs.
    Fixed(Array2<f64>),
}

impl VSelection {
    /// Fixed weights from a diagonal vector.
    pub fn fixed_diag(diag: Array1<f64>) -> Self {
        VSelection::Fixed(Array2::from_diag(&diag))
    }
}

/// Options for [`fit`](crate::synth::models::synth::fit).
///
/// Default: `Equal` initial guess, `V` searched with Nelder–Mead (1000
/// iterations), accelerated QP with 1000 iterations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SynthOptions {
    pub initial: InitialGuess,
    pub selection: VSelection,
    pub search: SearchOptions,
    pub qp: QpOptions,
}

impl SynthOptions {
    pub fn new(
        initial: InitialGuess, selection: VSelection, search: SearchOptions, qp: QpOptions,
    ) -> Self {
        Self { initial, selection, search, qp }
    }

    /// Build options from the string-and-budget form used by the Python
    /// `Synth.fit` signature.
    ///
    /// # Errors
    /// - `InvalidInitialGuess` for an unknown `optim_initial`.
    /// - Optimizer configuration errors (unknown method, zero budgets),
    ///   surfaced as `OptimizationFailed`.
    pub fn from_names(
        optim_method: &str, optim_initial: &str, max_iter: usize, qp_max_iter: usize,
        custom_v: Option<Array2<f64>>,
    ) -> SynthResult<Self> {
        let initial: InitialGuess = optim_initial.parse()?;
        let method: SearchMethod = optim_method.parse()?;
        let defaults = Tolerances::default();
        let tols = Tolerances::new(defaults.tol_grad, defaults.tol_cost, Some(max_iter))?;
        let search = SearchOptions { tols, method, ..SearchOptions::default() };
        let qp = QpOptions::new(QpMethod::Accelerated, qp_max_iter, QpOptions::default().tol_step)?;
        let selection = match custom_v {
            Some(v) => VSelection::Fixed(v),
            None => VSelection::Search,
        };
        Ok(Self { initial, selection, search, qp })
    }
}
