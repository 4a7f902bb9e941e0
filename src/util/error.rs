//! Error types for gridcorr.

use thiserror::Error;

/// Result alias for gridcorr operations.
pub type GridCorrResult<T> = std::result::Result<T, GridCorrError>;

/// Ways a weight matrix or sample grid can fail to be a well-formed 2D array.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    /// The shape does not have exactly two dimensions.
    #[error("expected a 2D shape, got {ndim} dimension(s)")]
    NotTwoDimensional { ndim: usize },
    /// A row has a different length than the first row.
    #[error("row {row} has {got} elements, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        got: usize,
    },
    /// One of the extents is zero.
    #[error("zero extent: {width}x{height}")]
    ZeroExtent { width: usize, height: usize },
    /// The flat buffer length does not match the declared extents.
    #[error("buffer holds {got} elements, expected {expected}")]
    LengthMismatch { expected: usize, got: usize },
    /// The row stride is shorter than a row.
    #[error("stride {stride} is smaller than width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// The element count overflows `usize`.
    #[error("extent {width}x{height} overflows")]
    TooLarge { width: usize, height: usize },
}

/// Errors that can occur when building kernels or grids and running correlation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GridCorrError {
    /// Weights or samples are not a rectangular 2D array.
    #[error("shape error: {0}")]
    Shape(#[from] ShapeError),
    /// The anchor lies outside the kernel extent.
    #[error("anchor ({row}, {column}) outside {rows}x{columns} kernel")]
    InvalidAnchor {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },
    /// Configuration values are out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    /// Reading or writing an image file failed.
    #[error("image io: {reason}")]
    ImageIo { reason: String },
}

impl GridCorrError {
    /// Returns `true` for shape errors.
    pub fn is_shape(&self) -> bool {
        matches!(self, GridCorrError::Shape(_))
    }
}
