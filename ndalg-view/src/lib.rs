//! Strided containers and zero-copy views.
//!
//! # Core Types
//!
//! - [`Strides`]: row-major index model mapping multi-indices to buffer offsets
//! - [`BufferND`]: owned n-dimensional array (buffer + strides + start offset)
//! - [`NdView`] / [`NdViewMut`]: borrowed views aliasing a buffer region
//! - [`StructureND`]: read interface shared by every container, including
//!   the lazily computed [`FnStructure`]
//!
//! # Views
//!
//! Views borrow the backing buffer, so a view can never outlive it and a
//! mutable view has exclusive access for its lifetime. Stacks of vectors or
//! matrices are sliced out of a higher-rank buffer without copying:
//!
//! ```rust
//! use ndalg_view::BufferND;
//!
//! let stack = BufferND::from_fn(&[3, 2, 2], |idx| (idx[0] * 4 + idx[1] * 2 + idx[2]) as f64);
//! let view = stack.view();
//! let traces: Vec<f64> = view
//!     .matrix_sequence()
//!     .unwrap()
//!     .map(|m| m[[0, 0]] + m[[1, 1]])
//!     .collect();
//! assert_eq!(traces, vec![3.0, 11.0, 19.0]);
//! ```

mod strides;
mod structure;
mod view;

pub use strides::{row_major_strides, Indices, Strides};
pub use structure::{
    content_equals, content_equals_approx, to_flat_view, Elements, FlatView, FnStructure,
    StructureND, DEFAULT_TOLERANCE,
};
pub use view::{BufferND, NdView, NdViewMut};

pub use ndalg_traits::AlgebraError;

// ============================================================================
// Error types
// ============================================================================

/// Errors that can occur during structure operations.
#[derive(Debug, thiserror::Error)]
pub enum NdError {
    /// Structure shapes are incompatible for the operation.
    #[error("shape mismatch: {0:?} vs {1:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),

    /// Structure rank does not match the rank the operation needs.
    #[error("rank mismatch: {0} vs {1}")]
    RankMismatch(usize, usize),

    /// Backing buffer is too short for the requested shape and offset.
    #[error("buffer of length {actual} cannot hold {required} elements")]
    BufferLength { required: usize, actual: usize },

    /// Matrix is not square when a square matrix was required.
    #[error("non-square matrix: rows={rows}, cols={cols}")]
    NonSquare { rows: usize, cols: usize },

    /// Matrix is not symmetric within the given tolerance.
    #[error("matrix is not symmetric within {epsilon}")]
    NotSymmetric { epsilon: f64 },

    /// Power iteration exhausted its iteration budget.
    #[error("singular component {component} did not converge after {iterations} iterations")]
    NotConverged { component: usize, iterations: usize },

    /// Named dispatch failed in the element algebra.
    #[error(transparent)]
    Algebra(#[from] AlgebraError),
}

/// Result type for structure operations.
pub type Result<T> = std::result::Result<T, NdError>;
