//! Element-wise map and zip kernels over views.
//!
//! Row-major views address a contiguous region, so every kernel here is a
//! single pass over slices. With the `parallel` feature, regions of at least
//! [`MIN_PARALLEL_LEN`] elements are split across the rayon pool.

use std::sync::Arc;

use ndalg_view::{BufferND, NdError, NdView, NdViewMut, Strides};

use crate::maybe_sync::{MaybeSend, MaybeSendSync, MaybeSync};
use crate::Result;
#[cfg(feature = "parallel")]
use crate::MIN_PARALLEL_LEN;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Check that two shapes are identical.
pub fn ensure_same_shape(a: &[usize], b: &[usize]) -> Result<()> {
    if a != b {
        return Err(NdError::ShapeMismatch(a.to_vec(), b.to_vec()));
    }
    Ok(())
}

#[cfg(feature = "parallel")]
#[inline]
fn use_parallel(len: usize) -> bool {
    len >= MIN_PARALLEL_LEN
}

fn into_buffer<U>(strides: &Arc<Strides>, buffer: Vec<U>) -> Result<BufferND<U>> {
    BufferND::with_strides(strides.clone(), buffer)
}

// ============================================================================
// Allocating kernels
// ============================================================================

/// `out[i] = f(src[i])`, returning a new structure of the same shape.
pub fn map_buffer<T, U, F>(src: &NdView<'_, T>, f: F) -> Result<BufferND<U>>
where
    T: MaybeSync,
    U: MaybeSend,
    F: Fn(&T) -> U + MaybeSendSync,
{
    let input = src.as_slice();
    #[cfg(feature = "parallel")]
    if use_parallel(input.len()) {
        log::trace!("map_buffer: {} elements on rayon", input.len());
        let buffer: Vec<U> = input.par_iter().map(&f).collect();
        return into_buffer(src.strides(), buffer);
    }
    let buffer: Vec<U> = input.iter().map(&f).collect();
    into_buffer(src.strides(), buffer)
}

/// `out[idx] = f(idx, src[idx])`, returning a new structure of the same shape.
pub fn map_indexed_buffer<T, U, F>(src: &NdView<'_, T>, f: F) -> Result<BufferND<U>>
where
    T: MaybeSync,
    U: MaybeSend,
    F: Fn(&[usize], &T) -> U + MaybeSendSync,
{
    let strides = src.strides();
    let input = src.as_slice();
    #[cfg(feature = "parallel")]
    if use_parallel(input.len()) {
        log::trace!("map_indexed_buffer: {} elements on rayon", input.len());
        let buffer: Vec<U> = input
            .par_iter()
            .enumerate()
            .map(|(off, value)| f(&strides.index(off), value))
            .collect();
        return into_buffer(strides, buffer);
    }
    let mut index = vec![0; strides.ndim()];
    let buffer: Vec<U> = input
        .iter()
        .enumerate()
        .map(|(off, value)| {
            strides.index_into(off, &mut index);
            f(&index, value)
        })
        .collect();
    into_buffer(strides, buffer)
}

/// `out[i] = f(a[i], b[i])`; the shapes of `a` and `b` must match.
pub fn zip_buffers<A, B, U, F>(a: &NdView<'_, A>, b: &NdView<'_, B>, f: F) -> Result<BufferND<U>>
where
    A: MaybeSync,
    B: MaybeSync,
    U: MaybeSend,
    F: Fn(&A, &B) -> U + MaybeSendSync,
{
    ensure_same_shape(a.shape(), b.shape())?;
    let (xs, ys) = (a.as_slice(), b.as_slice());
    #[cfg(feature = "parallel")]
    if use_parallel(xs.len()) {
        log::trace!("zip_buffers: {} elements on rayon", xs.len());
        let buffer: Vec<U> = xs
            .par_iter()
            .zip(ys.par_iter())
            .map(|(x, y)| f(x, y))
            .collect();
        return into_buffer(a.strides(), buffer);
    }
    let buffer: Vec<U> = xs.iter().zip(ys).map(|(x, y)| f(x, y)).collect();
    into_buffer(a.strides(), buffer)
}

// ============================================================================
// In-place kernels
// ============================================================================

/// `dest[i] = f(src[i])`; the shapes of `dest` and `src` must match.
pub fn map_into<D, T, F>(dest: &mut NdViewMut<'_, D>, src: &NdView<'_, T>, f: F) -> Result<()>
where
    D: MaybeSend,
    T: MaybeSync,
    F: Fn(&T) -> D + MaybeSendSync,
{
    ensure_same_shape(dest.shape(), src.shape())?;
    let input = src.as_slice();
    let output = dest.as_mut_slice();
    #[cfg(feature = "parallel")]
    if use_parallel(output.len()) {
        output
            .par_iter_mut()
            .zip(input.par_iter())
            .for_each(|(d, s)| *d = f(s));
        return Ok(());
    }
    for (d, s) in output.iter_mut().zip(input) {
        *d = f(s);
    }
    Ok(())
}

/// `dest[i] = f(a[i], b[i])`; all three shapes must match.
pub fn zip_map2_into<D, A, B, F>(
    dest: &mut NdViewMut<'_, D>,
    a: &NdView<'_, A>,
    b: &NdView<'_, B>,
    f: F,
) -> Result<()>
where
    D: MaybeSend,
    A: MaybeSync,
    B: MaybeSync,
    F: Fn(&A, &B) -> D + MaybeSendSync,
{
    ensure_same_shape(dest.shape(), a.shape())?;
    ensure_same_shape(a.shape(), b.shape())?;
    let (xs, ys) = (a.as_slice(), b.as_slice());
    let output = dest.as_mut_slice();
    #[cfg(feature = "parallel")]
    if use_parallel(output.len()) {
        output
            .par_iter_mut()
            .zip(xs.par_iter().zip(ys.par_iter()))
            .for_each(|(d, (x, y))| *d = f(x, y));
        return Ok(());
    }
    for (d, (x, y)) in output.iter_mut().zip(xs.iter().zip(ys)) {
        *d = f(x, y);
    }
    Ok(())
}

/// `dest[i] = f(dest[i], src[i])`; the shapes must match.
pub fn zip_assign<D, T, F>(dest: &mut NdViewMut<'_, D>, src: &NdView<'_, T>, f: F) -> Result<()>
where
    D: MaybeSend,
    T: MaybeSync,
    F: Fn(&D, &T) -> D + MaybeSendSync,
{
    ensure_same_shape(dest.shape(), src.shape())?;
    let input = src.as_slice();
    let output = dest.as_mut_slice();
    #[cfg(feature = "parallel")]
    if use_parallel(output.len()) {
        output
            .par_iter_mut()
            .zip(input.par_iter())
            .for_each(|(d, s)| *d = f(d, s));
        return Ok(());
    }
    for (d, s) in output.iter_mut().zip(input) {
        *d = f(d, s);
    }
    Ok(())
}

/// `dest[i] = f(dest[i])`.
pub fn map_assign<D, F>(dest: &mut NdViewMut<'_, D>, f: F)
where
    D: MaybeSend,
    F: Fn(&D) -> D + MaybeSendSync,
{
    let output = dest.as_mut_slice();
    #[cfg(feature = "parallel")]
    if use_parallel(output.len()) {
        output.par_iter_mut().for_each(|d| *d = f(d));
        return;
    }
    for d in output.iter_mut() {
        *d = f(d);
    }
}
