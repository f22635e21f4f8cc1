//! LU decomposition with partial pivoting, and what follows from it.

use ndalg_view::{NdError, NdView, NdViewMut, Result};

use crate::helpers::{ensure_shape, square_matrix};

/// Row permutation recorded by [`lu_in_place`].
///
/// `indices` is a permutation of `0..dimension`: row `i` of the factored
/// matrix came from row `indices[i]` of the input. `swaps` counts the row
/// exchanges and fixes the determinant sign.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pivots {
    indices: Vec<usize>,
    swaps: usize,
}

impl Pivots {
    /// The identity permutation with no swaps.
    pub fn identity(dimension: usize) -> Self {
        Self {
            indices: (0..dimension).collect(),
            swaps: 0,
        }
    }

    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    #[inline]
    pub fn swaps(&self) -> usize {
        self.swaps
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.indices.len()
    }

    /// `(-1)^swaps`.
    pub fn sign(&self) -> f64 {
        if self.swaps % 2 == 0 {
            1.0
        } else {
            -1.0
        }
    }

    /// Flat `dimension + 1` layout: the permutation followed by the swap count.
    pub fn as_slots(&self) -> Vec<usize> {
        let mut slots = Vec::with_capacity(self.indices.len() + 1);
        slots.extend_from_slice(&self.indices);
        slots.push(self.swaps);
        slots
    }

    fn swap(&mut self, i: usize, k: usize) {
        self.indices.swap(i, k);
        self.swaps += 1;
    }
}

/// Factor a square matrix in place into combined unit-lower `L` and upper `U`.
///
/// After the call, `lu` holds `L` strictly below the diagonal (its unit
/// diagonal is implicit) and `U` on and above it, with `P·A = L·U` for the
/// permutation described by the returned [`Pivots`].
///
/// Fails with `RankMismatch` or `NonSquare` unless `lu` is a square matrix.
/// A zero pivot is not reported: it surfaces as `NaN`/`Inf` in the result.
pub fn lu_in_place(lu: &mut NdViewMut<'_, f64>) -> Result<Pivots> {
    let m = square_matrix(lu.shape())?;
    let mut pivots = Pivots::identity(m);

    for i in 0..m {
        let mut max_val = -1.0;
        let mut max_ind = i;
        for k in i..m {
            let abs = lu[[k, i]].abs();
            if abs > max_val {
                max_val = abs;
                max_ind = k;
            }
        }

        if max_ind != i {
            log::trace!("lu: pivot column {i}, swap rows {i} and {max_ind}");
            pivots.swap(i, max_ind);
            for k in 0..m {
                let tmp = lu[[i, k]];
                lu[[i, k]] = lu[[max_ind, k]];
                lu[[max_ind, k]] = tmp;
            }
        }

        let pivot = lu[[i, i]];
        for j in i + 1..m {
            let factor = lu[[j, i]] / pivot;
            lu[[j, i]] = factor;
            for k in i + 1..m {
                let delta = factor * lu[[i, k]];
                lu[[j, k]] -= delta;
            }
        }
    }
    Ok(pivots)
}

/// Size of a factored matrix whose pivots must match it.
fn factored_dimension(lu: &NdView<'_, f64>, pivots: &Pivots) -> Result<usize> {
    let m = square_matrix(lu.shape())?;
    if pivots.dimension() != m {
        return Err(NdError::ShapeMismatch(vec![pivots.dimension()], vec![m]));
    }
    Ok(m)
}

/// Split a combined LU matrix into `l` (unit lower) and `u` (upper).
///
/// Every element of both outputs is written.
pub fn lu_split_into(
    lu: &NdView<'_, f64>,
    l: &mut NdViewMut<'_, f64>,
    u: &mut NdViewMut<'_, f64>,
) -> Result<()> {
    let n = square_matrix(lu.shape())?;
    ensure_shape(l.shape(), &[n, n])?;
    ensure_shape(u.shape(), &[n, n])?;
    for i in 0..n {
        for j in 0..n {
            let value = lu[[i, j]];
            l[[i, j]] = match j.cmp(&i) {
                std::cmp::Ordering::Less => value,
                std::cmp::Ordering::Equal => 1.0,
                std::cmp::Ordering::Greater => 0.0,
            };
            u[[i, j]] = if j >= i { value } else { 0.0 };
        }
    }
    Ok(())
}

/// Write the permutation matrix `P` with `P[i, pivots[i]] = 1`.
pub fn permutation_into(pivots: &Pivots, p: &mut NdViewMut<'_, f64>) -> Result<()> {
    let d = pivots.dimension();
    ensure_shape(p.shape(), &[d, d])?;
    p.fill(0.0);
    for (i, &j) in pivots.indices().iter().enumerate() {
        p[[i, j]] = 1.0;
    }
    Ok(())
}

/// Determinant from an LU factorization: `Π lu[i,i] · (-1)^swaps`.
pub fn lu_det(lu: &NdView<'_, f64>, pivots: &Pivots) -> Result<f64> {
    let m = factored_dimension(lu, pivots)?;
    Ok((0..m).fold(pivots.sign(), |acc, i| acc * lu[[i, i]]))
}

/// Inverse from an LU factorization, solving `L·U·x = P·e_j` per column.
pub fn lu_inv_into(
    lu: &NdView<'_, f64>,
    pivots: &Pivots,
    inv: &mut NdViewMut<'_, f64>,
) -> Result<()> {
    let m = factored_dimension(lu, pivots)?;
    ensure_shape(inv.shape(), &[m, m])?;
    inv.fill(0.0);
    let perm = pivots.indices();

    for j in 0..m {
        for i in 0..m {
            if perm[i] == j {
                inv[[i, j]] = 1.0;
            }
            for k in 0..i {
                let delta = lu[[i, k]] * inv[[k, j]];
                inv[[i, j]] -= delta;
            }
        }

        for i in (0..m).rev() {
            for k in i + 1..m {
                let delta = lu[[i, k]] * inv[[k, j]];
                inv[[i, j]] -= delta;
            }
            inv[[i, j]] /= lu[[i, i]];
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndalg_view::BufferND;

    fn factor(values: Vec<f64>, n: usize) -> (BufferND<f64>, Pivots) {
        let mut lu = BufferND::from_vec(&[n, n], values).unwrap();
        let pivots = lu_in_place(&mut lu.view_mut()).unwrap();
        (lu, pivots)
    }

    #[test]
    fn test_swap_determinant_sign() {
        let (lu, pivots) = factor(vec![0.0, 1.0, 1.0, 0.0], 2);
        assert_eq!(pivots.indices(), &[1, 0]);
        assert_eq!(pivots.swaps(), 1);
        assert_eq!(pivots.as_slots(), vec![1, 0, 1]);
        assert_eq!(lu_det(&lu.view(), &pivots).unwrap(), -1.0);
    }

    #[test]
    fn test_pivot_on_largest_magnitude() {
        let (lu, pivots) = factor(vec![4.0, 3.0, 6.0, 3.0], 2);
        // |6| > |4| forces a swap
        assert_eq!(pivots.swaps(), 1);
        assert_relative_eq!(lu_det(&lu.view(), &pivots).unwrap(), 4.0 * 3.0 - 3.0 * 6.0, epsilon = 1e-12);
        let (_, id) = factor(vec![2.0, 0.0, 0.0, 3.0], 2);
        assert_eq!(id, Pivots::identity(2));
    }

    #[test]
    fn test_split_and_permutation() {
        let (lu, pivots) = factor(vec![1.0, 2.0, 3.0, 4.0], 2);
        let mut l = BufferND::filled(&[2, 2], f64::NAN);
        let mut u = BufferND::filled(&[2, 2], f64::NAN);
        lu_split_into(&lu.view(), &mut l.view_mut(), &mut u.view_mut()).unwrap();
        assert_eq!(l[[0, 0]], 1.0);
        assert_eq!(l[[0, 1]], 0.0);
        assert_eq!(u[[1, 0]], 0.0);
        assert_relative_eq!(l[[1, 0]], 1.0 / 3.0, epsilon = 1e-12);

        let mut p = BufferND::filled(&[2, 2], 7.0);
        permutation_into(&pivots, &mut p.view_mut()).unwrap();
        assert_eq!(p.buffer(), &[0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_inverse_3x3() {
        let a = vec![2.0, 1.0, 1.0, 1.0, 3.0, 2.0, 1.0, 0.0, 0.0];
        let (lu, pivots) = factor(a.clone(), 3);
        let mut inv = BufferND::filled(&[3, 3], 0.0);
        lu_inv_into(&lu.view(), &pivots, &mut inv.view_mut()).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                let mut acc = 0.0;
                for k in 0..3 {
                    acc += a[i * 3 + k] * inv[[k, j]];
                }
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(acc, expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_singular_matrix_propagates_non_finite() {
        let (lu, pivots) = factor(vec![1.0, 2.0, 2.0, 4.0], 2);
        let det = lu_det(&lu.view(), &pivots).unwrap();
        assert_eq!(det, 0.0);
        let mut inv = BufferND::filled(&[2, 2], 0.0);
        lu_inv_into(&lu.view(), &pivots, &mut inv.view_mut()).unwrap();
        assert!(inv.buffer().iter().any(|x| !x.is_finite()));
    }

    #[test]
    fn test_shapes_are_checked() {
        let mut wide = BufferND::filled(&[2, 3], 1.0);
        assert!(matches!(
            lu_in_place(&mut wide.view_mut()),
            Err(NdError::NonSquare { rows: 2, cols: 3 })
        ));
        let mut stack = BufferND::filled(&[2, 2, 2], 1.0);
        assert!(matches!(
            lu_in_place(&mut stack.view_mut()),
            Err(NdError::RankMismatch(3, 2))
        ));

        let (lu, pivots) = factor(vec![4.0, 3.0, 6.0, 3.0], 2);
        let mut l = BufferND::filled(&[3, 3], 0.0);
        let mut u = BufferND::filled(&[2, 2], 0.0);
        assert!(matches!(
            lu_split_into(&lu.view(), &mut l.view_mut(), &mut u.view_mut()),
            Err(NdError::ShapeMismatch(_, _))
        ));
        let mut p = BufferND::filled(&[3, 3], 0.0);
        assert!(matches!(
            permutation_into(&pivots, &mut p.view_mut()),
            Err(NdError::ShapeMismatch(_, _))
        ));
        let mut inv = BufferND::filled(&[2, 3], 0.0);
        assert!(matches!(
            lu_inv_into(&lu.view(), &pivots, &mut inv.view_mut()),
            Err(NdError::ShapeMismatch(_, _))
        ));
        assert!(matches!(
            lu_det(&lu.view(), &Pivots::identity(3)),
            Err(NdError::ShapeMismatch(_, _))
        ));
    }
}
