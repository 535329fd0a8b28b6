use thiserror::Error;

use crate::session::Step;

#[derive(Error, Debug)]
pub enum RbfError {
    #[error("missing input: {0}")]
    MissingInput(&'static str),

    #[error("invalid number {token:?} in {field}")]
    InvalidNumber { field: &'static str, token: String },

    #[error("{field} must have {expected} components, got {actual}")]
    CentroidDimension {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("variance must be nonzero")]
    ZeroVariance,

    #[error("variance must be positive and finite, got {0}")]
    InvalidVariance(f64),

    #[error("cannot {step}: {reason}")]
    StepNotReady { step: Step, reason: &'static str },

    #[error("row {index} out of range, table has {len} rows")]
    RowOutOfRange { index: usize, len: usize },

    #[error("unknown or malformed command: {0}")]
    InvalidCommand(String),

    #[error("invalid row: {0}")]
    InvalidRow(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("plot error: {0}")]
    Plot(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RbfError>;
