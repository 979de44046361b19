//! synth::models: the two optimization levels and the fit result.
//!
//! - [`unit_weights`]: donor weights for a fixed `V` (inner QP).
//! - [`synth`]: predictor-weight search and the composed [`fit`](synth::fit).
//! - [`results`]: the immutable [`SynthFit`](results::SynthFit).

pub mod results;
pub mod synth;
pub mod unit_weights;
