//! QR decomposition by modified Gram-Schmidt.

use ndalg_view::{NdView, NdViewMut, Result};

use crate::helpers::{dot, ensure_shape, norm, square_matrix};

/// Write orthogonal `q` and upper-triangular `r` with `a = q·r`.
///
/// `a` must be square. Columns are orthogonalized one at a time against the
/// already finished columns of `q`, each projection being removed from the
/// running residual. A rank-deficient `a` divides by a zero norm and
/// yields `NaN` columns. `q` and `r` must have the shape of `a`.
pub fn qr_into(
    a: &NdView<'_, f64>,
    q: &mut NdViewMut<'_, f64>,
    r: &mut NdViewMut<'_, f64>,
) -> Result<()> {
    let n = square_matrix(a.shape())?;
    ensure_shape(q.shape(), &[n, n])?;
    ensure_shape(r.shape(), &[n, n])?;
    r.fill(0.0);
    // Column-major copy of q so projections run on contiguous slices.
    let mut q_cols = vec![0.0; n * n];
    let mut v = vec![0.0; n];

    for j in 0..n {
        for (k, slot) in v.iter_mut().enumerate() {
            *slot = a[[k, j]];
        }
        for i in 0..j {
            let qi = &q_cols[i * n..(i + 1) * n];
            let rij = dot(qi, &v);
            r[[i, j]] = rij;
            for (vk, qk) in v.iter_mut().zip(qi) {
                *vk -= rij * qk;
            }
        }
        let rjj = norm(&v);
        r[[j, j]] = rjj;
        for k in 0..n {
            let value = v[k] / rjj;
            q_cols[j * n + k] = value;
            q[[k, j]] = value;
        }
    }
    Ok(())
}
