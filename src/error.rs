//! # Error standards
//!
//! This module provides a standardised error enum and result type for this crate.

// -----------------------------------------------------------------------------------------------
// TYPES
// -----------------------------------------------------------------------------------------------

/// Standard result type used in the scanline crate.
pub type Result<T> = std::result::Result<T, Error>;

// -----------------------------------------------------------------------------------------------
// ENUMERATIONS
// -----------------------------------------------------------------------------------------------

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    /// Every candidate cost of a column was infinite. The solvers only report this through
    /// the diagnostic sink as a warning, it is never returned from a solve.
    #[error("Every candidate cost at position {position} is non-finite")]
    NumericAnomaly { position: usize },

    #[error("Matrix shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not parse parameters: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[cfg(feature = "statistics")]
    #[error("Could not plot statistics: {0}")]
    Plot(String)
}

/// The reason a pair of cost matrices (or a path evaluated against them) was rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("the unary cost matrix has no positions (columns)")]
    NoPositions,

    #[error("the unary cost matrix has no nodes (rows)")]
    NoNodes,

    #[error("the pairwise cost matrix is {rows}x{cols}, expected it to be square")]
    PairwiseNotSquare { rows: usize, cols: usize },

    #[error("the pairwise cost matrix has side {side} but the unary cost matrix has {nodes} nodes")]
    PairwiseMismatch { nodes: usize, side: usize },

    #[error("row {row} has {len} entries, expected {expected}")]
    RaggedRow { row: usize, len: usize, expected: usize },

    #[error("{matrix} cost at [{row}, {col}] is {value}, only finite values or +inf are supported")]
    NonFinite { matrix: Matrix, row: usize, col: usize, value: f64 },

    #[error("the path has {len} labels but there are {positions} positions")]
    PathLength { len: usize, positions: usize },

    #[error("label {label} at position {position} is out of range for {nodes} nodes")]
    LabelOutOfRange { position: usize, label: usize, nodes: usize }
}

/// Names one of the two input matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matrix {
    Unary,
    Pairwise
}

impl std::fmt::Display for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Matrix::Unary => write!(f, "unary"),
            Matrix::Pairwise => write!(f, "pairwise")
        }
    }
}
