//! synth::core: inputs, preprocessing, and configuration for a fit.
//!
//! Purpose
//! -------
//! Everything a fit needs before any optimization runs: validated matrices
//! ([`data`]), joint predictor scaling ([`scaling`]), the starting point of
//! the predictor-weight search ([`init`]), fit options ([`options`]) and the
//! shared input checks ([`validation`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - A [`SynthData`] value always satisfies the shape and finiteness rules
//!   in [`validation::validate_matrices`].
//! - Scaling touches predictors only; outcome matrices keep their units.

pub mod data;
pub mod init;
pub mod options;
pub mod scaling;
pub mod validation;

pub use self::data::{DataSource, Dataprep, SynthData};
pub use self::init::InitialGuess;
pub use self::options::{SynthOptions, VSelection};
