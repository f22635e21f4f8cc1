//! Element-wise kernels and algebra-over-structure for ndalg.
//!
//! - [`BufferAlgebraNd`]: lifts an element [`Algebra`](ndalg_traits::Algebra)
//!   to whole structures (`add`, `multiply`, `scale`, named dispatch, ...)
//! - [`map_buffer`], [`zip_buffers`], [`map_into`], [`zip_map2_into`]: the
//!   slice-level kernels underneath
//!
//! # Parallelism
//!
//! With the `parallel` feature, kernels over at least [`MIN_PARALLEL_LEN`]
//! elements run on the rayon pool. The [`MaybeSend`] / [`MaybeSync`] bounds
//! collapse to no-ops without the feature.

mod algebra_nd;
mod map_view;
mod maybe_sync;

pub use algebra_nd::BufferAlgebraNd;
pub use map_view::{
    ensure_same_shape, map_assign, map_buffer, map_indexed_buffer, map_into, zip_assign,
    zip_buffers, zip_map2_into,
};
pub use maybe_sync::{MaybeSend, MaybeSendSync, MaybeSync};

pub use ndalg_view::{BufferND, NdError, NdView, NdViewMut, Result, StructureND};

/// Minimum element count before a kernel is split across threads.
pub const MIN_PARALLEL_LEN: usize = 1 << 15;
