//! N-dimensional structures generic over their element algebra.
//!
//! `ndalg` re-exports the workspace crates under one roof:
//!
//! - [`ndalg_traits`]: [`Algebra`], [`Group`], [`Ring`], [`Field`] and the
//!   concrete algebras ([`F64_FIELD`], [`I64_RING`], [`COMPLEX64_FIELD`], ...)
//! - [`ndalg_view`]: [`Strides`], [`BufferND`], [`NdView`] / [`NdViewMut`]
//!   and the [`StructureND`] read interface
//! - [`ndalg_kernel`]: [`BufferAlgebraNd`] and the element-wise kernels
//! - [`linalg`]: LU, Cholesky, QR and SVD on `f64` matrices, batched over
//!   leading dimensions in [`linalg::batch`]
//!
//! # Example
//!
//! ```rust
//! use ndalg::{linalg, BufferAlgebraNd, F64_FIELD};
//!
//! let alg = BufferAlgebraNd::new(F64_FIELD);
//! let a = alg.structure_nd(&[2, 2], |idx| if idx[0] == idx[1] { 2.0 } else { 0.0 });
//! let b = alg.add(&a, &alg.one(&[2, 2])).unwrap();
//!
//! // [[3, 1], [1, 3]]
//! let d = linalg::batch::det(&b).unwrap();
//! assert!((d[[0]] - 8.0).abs() < 1e-12);
//! ```
//!
//! # Features
//!
//! - `parallel`: run large kernels and batched decompositions on rayon.

pub use ndalg_traits::{
    Algebra, AlgebraError, BinaryOp, ComplexField, ExponentialOperations, Field, Group,
    IntRing, PowerOperations, RealField, Ring, ScaleOperations, UnaryOp, COMPLEX64_FIELD,
    F32_FIELD, F64_FIELD, I32_RING, I64_RING,
};

pub use ndalg_view::{
    content_equals, content_equals_approx, to_flat_view, BufferND, FlatView, FnStructure,
    NdError, NdView, NdViewMut, Result, Strides, StructureND, DEFAULT_TOLERANCE,
};

pub use ndalg_kernel::{
    map_buffer, map_into, zip_buffers, zip_map2_into, BufferAlgebraNd, MIN_PARALLEL_LEN,
};

pub use ndalg_linalg as linalg;
