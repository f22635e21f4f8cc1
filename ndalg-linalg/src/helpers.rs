//! Small matrix helpers shared by the decomposition kernels.

use ndalg_view::{BufferND, NdError, NdView, NdViewMut, Result};

/// Rows and columns of a rank-2 view.
#[inline]
pub(crate) fn dims2(shape: &[usize]) -> (usize, usize) {
    debug_assert_eq!(shape.len(), 2, "expected a matrix view");
    (shape[0], shape[1])
}

/// Rows and columns of the trailing matrices of a rank >= 2 shape.
pub fn matrix_dims(shape: &[usize]) -> Result<(usize, usize)> {
    let rank = shape.len();
    if rank < 2 {
        return Err(NdError::RankMismatch(rank, 2));
    }
    Ok((shape[rank - 2], shape[rank - 1]))
}

/// Size of the trailing square matrices, or `NonSquare`.
pub fn ensure_square(shape: &[usize]) -> Result<usize> {
    let (rows, cols) = matrix_dims(shape)?;
    if rows != cols {
        return Err(NdError::NonSquare { rows, cols });
    }
    Ok(rows)
}

/// Rows and columns of a rank-2 view, or `RankMismatch`.
pub(crate) fn matrix_shape(shape: &[usize]) -> Result<(usize, usize)> {
    if shape.len() != 2 {
        return Err(NdError::RankMismatch(shape.len(), 2));
    }
    Ok((shape[0], shape[1]))
}

/// Size of a square rank-2 view.
pub(crate) fn square_matrix(shape: &[usize]) -> Result<usize> {
    matrix_shape(shape)?;
    ensure_square(shape)
}

pub(crate) fn ensure_shape(actual: &[usize], expected: &[usize]) -> Result<()> {
    if actual != expected {
        return Err(NdError::ShapeMismatch(actual.to_vec(), expected.to_vec()));
    }
    Ok(())
}

#[inline]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[inline]
pub fn norm(a: &[f64]) -> f64 {
    dot(a, a).sqrt()
}

/// `out = a · b` for an `l×m` matrix `a` and an `m×n` matrix `b`.
pub fn matmul_into(a: &NdView<'_, f64>, b: &NdView<'_, f64>, out: &mut NdViewMut<'_, f64>) -> Result<()> {
    let (l, m) = matrix_dims(a.shape())?;
    let (mb, n) = matrix_dims(b.shape())?;
    if a.ndim() != 2 || b.ndim() != 2 || m != mb {
        return Err(NdError::ShapeMismatch(a.shape().to_vec(), b.shape().to_vec()));
    }
    ensure_shape(out.shape(), &[l, n])?;
    for i in 0..l {
        for j in 0..n {
            let mut acc = 0.0;
            for k in 0..m {
                acc += a[[i, k]] * b[[k, j]];
            }
            out[[i, j]] = acc;
        }
    }
    Ok(())
}

/// `out = aᵗ`.
pub fn transpose_into(a: &NdView<'_, f64>, out: &mut NdViewMut<'_, f64>) -> Result<()> {
    let (rows, cols) = matrix_shape(a.shape())?;
    ensure_shape(out.shape(), &[cols, rows])?;
    for i in 0..rows {
        for j in 0..cols {
            out[[j, i]] = a[[i, j]];
        }
    }
    Ok(())
}

/// Allocating form of [`matmul_into`].
pub fn matmul(a: &NdView<'_, f64>, b: &NdView<'_, f64>) -> Result<BufferND<f64>> {
    let (l, _) = matrix_dims(a.shape())?;
    let (_, n) = matrix_dims(b.shape())?;
    let mut out = BufferND::filled(&[l, n], 0.0);
    matmul_into(a, b, &mut out.view_mut())?;
    Ok(out)
}

/// Allocating form of [`transpose_into`].
pub fn transpose(a: &NdView<'_, f64>) -> Result<BufferND<f64>> {
    let (rows, cols) = matrix_dims(a.shape())?;
    let mut out = BufferND::filled(&[cols, rows], 0.0);
    transpose_into(a, &mut out.view_mut())?;
    Ok(out)
}

/// `out = b · x` for a square matrix `b`.
pub(crate) fn matvec_into(b: &NdView<'_, f64>, x: &[f64], out: &mut [f64]) {
    let (rows, cols) = dims2(b.shape());
    let data = b.as_slice();
    for (i, slot) in out.iter_mut().enumerate().take(rows) {
        *slot = dot(&data[i * cols..(i + 1) * cols], x);
    }
}
