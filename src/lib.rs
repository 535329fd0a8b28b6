//! Squared distances of labelled 2-D points to two centroids, their Gaussian
//! radial basis features, and scatter plots of both feature spaces.
//!
//! The pipeline runs in three steps held together by [`session::Session`]:
//! validate the parameter fields, [`distance`] to each centroid, then the
//! [`transform`] `φ = exp(-r² / 2σ²)`. The augmented [`table`] and the
//! [`plot`]s are available once all three have run.

pub mod cli;
pub mod config;
pub mod dataset;
pub mod distance;
pub mod error;
pub mod input;
pub mod parse;
pub mod plot;
pub mod repl;
pub mod session;
pub mod table;
pub mod transform;

pub use error::{RbfError, Result};
