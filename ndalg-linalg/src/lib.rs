//! Dense linear algebra on ndalg views.
//!
//! Kernels work in place on rank-2 `f64` views and never allocate their
//! outputs; callers copy first when they need the input preserved:
//!
//! - [`lu_in_place`], [`lu_split_into`], [`permutation_into`], [`lu_det`],
//!   [`lu_inv_into`]: LU with partial pivoting
//! - [`cholesky_into`]: Cholesky factor of a symmetric positive-definite matrix
//! - [`qr_into`]: QR by modified Gram-Schmidt
//! - [`svd_into`], [`svd_1d`]: SVD by power iteration and deflation
//!
//! Every kernel checks that its views are matrices of matching shapes and
//! returns [`NdError`] otherwise. Numerical failure (singular LU, indefinite
//! Cholesky) is not detected and shows up as `NaN`/`Inf` in the output.
//!
//! The [`batch`] module lifts each kernel to stacks of matrices:
//!
//! ```rust
//! use ndalg_linalg::batch;
//! use ndalg_view::BufferND;
//!
//! let swap = BufferND::from_vec(&[2, 2], vec![0.0, 1.0, 1.0, 0.0]).unwrap();
//! assert_eq!(batch::det(&swap).unwrap()[[0]], -1.0);
//! ```

pub mod batch;
mod cholesky;
mod helpers;
mod lu;
mod qr;
mod svd;

pub use cholesky::cholesky_into;
pub use helpers::{dot, ensure_square, matmul, matmul_into, matrix_dims, norm, transpose, transpose_into};
pub use lu::{lu_det, lu_in_place, lu_inv_into, lu_split_into, permutation_into, Pivots};
pub use qr::qr_into;
pub use svd::{svd_1d, svd_into, SvdConfig, DEFAULT_SVD_EPSILON};

pub use ndalg_view::{NdError, Result};
