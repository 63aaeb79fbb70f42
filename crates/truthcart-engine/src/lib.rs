//! Deterministic Trust Score Engine for TruthCart.
//!
//! Turns a bounded set of community signal items plus optional product
//! metadata into a scored, flagged, explained analysis report. Every stage is
//! a pure transform: normalize, aggregate, penalize, compose, flag, assess,
//! narrate. No I/O, no randomness, no clock reads; callers supply the
//! analysis date.

pub mod aggregate;
pub mod confidence;
pub mod flags;
pub mod narrative;
pub mod normalize;
pub mod penalty;
pub mod pipeline;
pub mod score;

mod lexicon;

pub use lexicon::lexicon_score;
pub use narrative::{FALLBACK_TEXT, LOADING_TEXT};
pub use normalize::{normalize, NormalizedInput};
pub use penalty::{compute_penalties, Penalties};
pub use pipeline::analyze;
