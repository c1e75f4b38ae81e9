//! Error types for the edge detection pipeline.

use thiserror::Error;

/// Errors raised when grids of incompatible shape are combined.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CannyError {
    /// Two grids (or a grid and its backing buffer) disagree on size
    #[error("dimension mismatch: expected {}x{}, got {}x{}", expected.0, expected.1, actual.0, actual.1)]
    DimensionMismatch {
        /// Expected `(width, height)`
        expected: (usize, usize),
        /// Actual `(width, height)`
        actual: (usize, usize),
    },

    /// Backing buffer length is not `width * height`
    #[error("buffer holds {actual} elements, expected {expected}")]
    BufferSize {
        /// `width * height`
        expected: usize,
        /// Length of the supplied buffer
        actual: usize,
    },

    /// Kernels must be square
    #[error("kernel must be square, got {width}x{height}")]
    NonSquareKernel {
        /// Kernel width
        width: usize,
        /// Kernel height
        height: usize,
    },
}

/// Result type for pipeline operations
pub type CannyResult<T> = Result<T, CannyError>;
