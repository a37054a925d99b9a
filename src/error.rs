//! Error types shared by every fallible operation in the crate.

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NnError>;

#[derive(thiserror::Error, Debug)]
pub enum NnError {
    /// A vector length does not match the layer or network it is fed to.
    #[error("{context}: expected {expected} values, got {actual}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("features and targets must have the same length ({features} != {targets})")]
    SampleCountMismatch { features: usize, targets: usize },

    /// No constructor is registered for the given strategy name.
    #[error("unsupported {kind}: {name}")]
    UnsupportedStrategy { kind: &'static str, name: String },

    #[error("invalid {kind} props: {source}")]
    InvalidProps {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("division by zero while calculating {0}")]
    DivisionByZero(&'static str),

    /// A reconstructed layer or network breaks its shape invariants.
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    #[error("network has no layers")]
    EmptyNetwork,

    #[error("normalize: {0}")]
    Normalize(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl NnError {
    pub(crate) fn dimension(context: &'static str, expected: usize, actual: usize) -> NnError {
        NnError::DimensionMismatch {
            context,
            expected,
            actual,
        }
    }
}
