//! synth::core::data: validated input matrices and their sources.
//!
//! Purpose
//! -------
//! Hold the four matrices a synthetic control fit consumes and resolve them
//! from whichever source the caller supplied: a [`Dataprep`] collaborator
//! that builds them from a panel, or the matrices themselves.
//!
//! Key behaviors
//! -------------
//! - [`SynthData::new`] validates shapes and finiteness once, so every
//!   downstream routine can index without re-checking.
//! - [`DataSource::resolve`] enforces that exactly one source is complete and
//!   reports the first missing matrix by name otherwise.
//!
//! Conventions
//! -----------
//! - `X0` is `n_p × n_c` (predictors × donors), `X1` has length `n_p`.
//! - `Z0` is `n_t × n_c` (pre-treatment periods × donors), `Z1` has length
//!   `n_t`.
use crate::synth::{
    core::validation::validate_matrices,
    errors::{SynthError, SynthResult},
};
use ndarray::{Array1, Array2};

/// Collaborator that turns a raw panel into predictor and outcome matrices.
///
/// Implementations own reshaping, aggregation and predictor selection; the
/// fit only needs the resulting matrices.
pub trait Dataprep {
    /// Predictor matrices `(X0, X1)`.
    fn compute_x0_x1(&self) -> SynthResult<(Array2<f64>, Array1<f64>)>;

    /// Outcome matrices `(Z0, Z1)`.
    fn compute_z0_z1(&self) -> SynthResult<(Array2<f64>, Array1<f64>)>;
}

/// Validated inputs of a synthetic control fit.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthData {
    x0: Array2<f64>,
    x1: Array1<f64>,
    z0: Array2<f64>,
    z1: Array1<f64>,
}

impl SynthData {
    /// Validate and bundle the four matrices.
    ///
    /// # Errors
    /// - `NoPredictors`, `EmptyDonorPool`, `NoOutcomePeriods` for empty axes.
    /// - `DimensionMismatch` when `X1`, `Z0` or `Z1` disagree with `X0`/`Z0`.
    /// - `NonFiniteData` for the first NaN/±inf entry.
    pub fn new(
        x0: Array2<f64>, x1: Array1<f64>, z0: Array2<f64>, z1: Array1<f64>,
    ) -> SynthResult<Self> {
        validate_matrices(&x0, &x1, &z0, &z1)?;
        Ok(Self { x0, x1, z0, z1 })
    }

    /// Internal constructor for matrices derived from already validated data
    /// (e.g. after scaling).
    pub(crate) fn from_parts_unchecked(
        x0: Array2<f64>, x1: Array1<f64>, z0: Array2<f64>, z1: Array1<f64>,
    ) -> Self {
        Self { x0, x1, z0, z1 }
    }

    pub fn x0(&self) -> &Array2<f64> {
        &self.x0
    }

    pub fn x1(&self) -> &Array1<f64> {
        &self.x1
    }

    pub fn z0(&self) -> &Array2<f64> {
        &self.z0
    }

    pub fn z1(&self) -> &Array1<f64> {
        &self.z1
    }

    /// Number of predictors `n_p`.
    pub fn n_predictors(&self) -> usize {
        self.x0.nrows()
    }

    /// Number of donors `n_c`.
    pub fn n_donors(&self) -> usize {
        self.x0.ncols()
    }

    /// Number of outcome periods `n_t`.
    pub fn n_periods(&self) -> usize {
        self.z0.nrows()
    }
}

/// Where the fit gets its matrices from.
///
/// Build with [`DataSource::from_dataprep`], [`DataSource::from_matrices`],
/// or field by field starting from [`DataSource::new`]. Mixing a collaborator
/// with explicit matrices is rejected by [`DataSource::resolve`].
#[derive(Default)]
pub struct DataSource<'a> {
    dataprep: Option<&'a dyn Dataprep>,
    x0: Option<Array2<f64>>,
    x1: Option<Array1<f64>>,
    z0: Option<Array2<f64>>,
    z1: Option<Array1<f64>>,
}

impl<'a> DataSource<'a> {
    /// Empty source; resolving it reports `MissingData { field: "X0" }`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_dataprep(dataprep: &'a dyn Dataprep) -> Self {
        Self { dataprep: Some(dataprep), ..Self::default() }
    }

    pub fn from_matrices(
        x0: Array2<f64>, x1: Array1<f64>, z0: Array2<f64>, z1: Array1<f64>,
    ) -> Self {
        Self { dataprep: None, x0: Some(x0), x1: Some(x1), z0: Some(z0), z1: Some(z1) }
    }

    pub fn with_dataprep(mut self, dataprep: &'a dyn Dataprep) -> Self {
        self.dataprep = Some(dataprep);
        self
    }

    pub fn with_x0(mut self, x0: Array2<f64>) -> Self {
        self.x0 = Some(x0);
        self
    }

    pub fn with_x1(mut self, x1: Array1<f64>) -> Self {
        self.x1 = Some(x1);
        self
    }

    pub fn with_z0(mut self, z0: Array2<f64>) -> Self {
        self.z0 = Some(z0);
        self
    }

    pub fn with_z1(mut self, z1: Array1<f64>) -> Self {
        self.z1 = Some(z1);
        self
    }

    /// Produce validated [`SynthData`] from the configured source.
    ///
    /// # Errors
    /// - `AmbiguousDataSource` if a collaborator and any matrix are both set.
    /// - `MissingData { field }` naming the first absent matrix when no
    ///   collaborator is set.
    /// - Errors from the collaborator or from [`SynthData::new`].
    pub fn resolve(self) -> SynthResult<SynthData> {
        let any_matrix =
            self.x0.is_some() || self.x1.is_some() || self.z0.is_some() || self.z1.is_some();
        if let Some(dataprep) = self.dataprep {
            if any_matrix {
                return Err(SynthError::AmbiguousDataSource);
            }
            let (x0, x1) = dataprep.compute_x0_x1()?;
            let (z0, z1) = dataprep.compute_z0_z1()?;
            return SynthData::new(x0, x1, z0, z1);
        }
        let x0 = self.x0.ok_or(SynthError::MissingData { field: "X0" })?;
        let x1 = self.x1.ok_or(SynthError::MissingData { field: "X1" })?;
        let z0 = self.z0.ok_or(SynthError::MissingData { field: "Z0" })?;
        let z1 = self.z1.ok_or(SynthError::MissingData { field: "Z1" })?;
        SynthData::new(x0, x1, z0, z1)
    }
}
