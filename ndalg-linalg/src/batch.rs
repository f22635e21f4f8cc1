//! Decompositions of whole tensors, one trailing matrix at a time.
//!
//! Every function takes a structure of rank >= 2 whose last two dimensions
//! are the matrix, and applies the matching in-place kernel to each matrix of
//! the stack. Outputs keep the leading (batch) dimensions of the input. With
//! the `parallel` feature each matrix is one rayon task; the tasks write to
//! disjoint chunks of the output buffers.

use ndalg_view::{BufferND, NdError, Result};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::cholesky::cholesky_into;
use crate::helpers::{ensure_square, matrix_dims};
use crate::lu::{lu_det, lu_in_place, lu_inv_into, lu_split_into, permutation_into, Pivots};
use crate::qr::qr_into;
use crate::svd::{svd_into, SvdConfig};

/// Run `f` on every task, in parallel when the feature is enabled.
fn run_batch<T, R, F>(tasks: Vec<T>, f: F) -> Result<Vec<R>>
where
    T: Send,
    R: Send,
    F: Fn(T) -> Result<R> + Send + Sync,
{
    log::debug!("batch: dispatching {} matrices", tasks.len());
    #[cfg(feature = "parallel")]
    let results = tasks.into_par_iter().map(f).collect();
    #[cfg(not(feature = "parallel"))]
    let results = tasks.into_iter().map(f).collect();
    results
}

fn batch_dims(shape: &[usize]) -> &[usize] {
    &shape[..shape.len().saturating_sub(2)]
}

fn with_matrix(batch: &[usize], rows: usize, cols: usize) -> Vec<usize> {
    let mut shape = batch.to_vec();
    shape.extend([rows, cols]);
    shape
}

/// Combined LU factors of every matrix, and their pivots.
pub fn lu(a: &BufferND<f64>) -> Result<(BufferND<f64>, Vec<Pivots>)> {
    ensure_square(a.shape())?;
    let mut lu = a.view().to_buffer_nd();
    let tasks: Vec<_> = lu.view_mut().into_matrix_sequence()?.collect();
    let pivots = run_batch(tasks, |mut m| lu_in_place(&mut m))?;
    Ok((lu, pivots))
}

/// `(P, L, U)` with `P·A = L·U` for every matrix.
pub fn lu_pivot(a: &BufferND<f64>) -> Result<(BufferND<f64>, BufferND<f64>, BufferND<f64>)> {
    let (factors, pivots) = lu(a)?;
    let mut p = BufferND::filled(a.shape(), 0.0);
    let mut l = BufferND::filled(a.shape(), 0.0);
    let mut u = BufferND::filled(a.shape(), 0.0);
    {
        let view = factors.view();
        let tasks: Vec<_> = view
            .matrix_sequence()?
            .zip(pivots.iter())
            .zip(p.view_mut().into_matrix_sequence()?)
            .zip(l.view_mut().into_matrix_sequence()?)
            .zip(u.view_mut().into_matrix_sequence()?)
            .collect();
        run_batch(tasks, |((((m, piv), mut pm), mut lm), mut um)| {
            permutation_into(piv, &mut pm)?;
            lu_split_into(&m, &mut lm, &mut um)
        })?;
    }
    Ok((p, l, u))
}

/// Determinants, shaped like the batch dimensions (`[1]` for a single matrix).
///
/// A `0×0` matrix has determinant `1`, the empty product.
pub fn det(a: &BufferND<f64>) -> Result<BufferND<f64>> {
    let n = ensure_square(a.shape())?;
    let batch = batch_dims(a.shape());
    let shape = if batch.is_empty() {
        vec![1]
    } else {
        batch.to_vec()
    };
    if n == 0 {
        return Ok(BufferND::filled(&shape, 1.0));
    }

    let (factors, pivots) = lu(a)?;
    let view = factors.view();
    let dets = view
        .matrix_sequence()?
        .zip(pivots.iter())
        .map(|(m, p)| lu_det(&m, p))
        .collect::<Result<Vec<f64>>>()?;
    BufferND::from_vec(&shape, dets)
}

/// Inverse of every matrix.
pub fn inv(a: &BufferND<f64>) -> Result<BufferND<f64>> {
    let (factors, pivots) = lu(a)?;
    let mut out = BufferND::filled(a.shape(), 0.0);
    {
        let view = factors.view();
        let tasks: Vec<_> = view
            .matrix_sequence()?
            .zip(pivots.iter())
            .zip(out.view_mut().into_matrix_sequence()?)
            .collect();
        run_batch(tasks, |((m, piv), mut o)| lu_inv_into(&m, piv, &mut o))?;
    }
    Ok(out)
}

/// Lower Cholesky factor of every matrix.
///
/// Fails with `NotSymmetric` when some `|a[i,j] - a[j,i]|` exceeds `epsilon`.
pub fn cholesky(a: &BufferND<f64>, epsilon: f64) -> Result<BufferND<f64>> {
    let n = ensure_square(a.shape())?;
    let view = a.view();
    for m in view.matrix_sequence()? {
        for i in 0..n {
            for j in 0..i {
                if (m[[i, j]] - m[[j, i]]).abs() > epsilon {
                    return Err(NdError::NotSymmetric { epsilon });
                }
            }
        }
    }

    let mut out = BufferND::filled(a.shape(), 0.0);
    {
        let tasks: Vec<_> = view
            .matrix_sequence()?
            .zip(out.view_mut().into_matrix_sequence()?)
            .collect();
        run_batch(tasks, |(m, mut l)| cholesky_into(&m, &mut l))?;
    }
    Ok(out)
}

/// `(Q, R)` of every matrix.
pub fn qr(a: &BufferND<f64>) -> Result<(BufferND<f64>, BufferND<f64>)> {
    ensure_square(a.shape())?;
    let mut q = BufferND::filled(a.shape(), 0.0);
    let mut r = BufferND::filled(a.shape(), 0.0);
    {
        let view = a.view();
        let tasks: Vec<_> = view
            .matrix_sequence()?
            .zip(q.view_mut().into_matrix_sequence()?)
            .zip(r.view_mut().into_matrix_sequence()?)
            .collect();
        run_batch(tasks, |((m, mut qm), mut rm)| qr_into(&m, &mut qm, &mut rm))?;
    }
    Ok((q, r))
}

/// `(U, S, V)` of every `n×m` matrix, with `A ≈ U·diag(S)·Vᵗ`.
///
/// For `k = min(n, m)` the outputs have trailing shapes `[n, k]`, `[k]`
/// and `[m, k]`.
pub fn svd(
    a: &BufferND<f64>,
    config: &SvdConfig,
) -> Result<(BufferND<f64>, BufferND<f64>, BufferND<f64>)> {
    let (n, m) = matrix_dims(a.shape())?;
    let k = n.min(m);
    let batch = batch_dims(a.shape());
    let mut s_shape = batch.to_vec();
    s_shape.push(k);

    let mut u = BufferND::filled(&with_matrix(batch, n, k), 0.0);
    let mut s = BufferND::filled(&s_shape, 0.0);
    let mut v = BufferND::filled(&with_matrix(batch, m, k), 0.0);
    {
        let view = a.view();
        let tasks: Vec<_> = view
            .matrix_sequence()?
            .zip(u.view_mut().into_matrix_sequence()?)
            .zip(s.view_mut().into_vector_sequence()?)
            .zip(v.view_mut().into_matrix_sequence()?)
            .collect();
        run_batch(tasks, |(((mat, mut um), mut sv), mut vm)| {
            svd_into(&mat, &mut um, &mut sv, &mut vm, config)
        })?;
    }
    Ok((u, s, v))
}
