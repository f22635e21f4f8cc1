//! Cholesky factorization of symmetric positive-definite matrices.

use ndalg_view::{NdView, NdViewMut, Result};

use crate::helpers::{ensure_shape, square_matrix};

/// Write the lower-triangular `l` with `a = l·lᵗ`.
///
/// Only the lower triangle of `a` is read. Symmetry and definiteness are not
/// checked: a non-positive pivot yields `NaN` on the diagonal. Shapes are
/// checked: `a` must be square and `l` must match it.
pub fn cholesky_into(a: &NdView<'_, f64>, l: &mut NdViewMut<'_, f64>) -> Result<()> {
    let n = square_matrix(a.shape())?;
    ensure_shape(l.shape(), &[n, n])?;
    l.fill(0.0);
    for i in 0..n {
        for j in 0..i {
            let mut h = a[[i, j]];
            for k in 0..j {
                h -= l[[i, k]] * l[[j, k]];
            }
            l[[i, j]] = h / l[[j, j]];
        }
        let mut h = a[[i, i]];
        for j in 0..i {
            h -= l[[i, j]] * l[[i, j]];
        }
        l[[i, i]] = h.sqrt();
    }
    Ok(())
}
