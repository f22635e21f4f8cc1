//! Singular value decomposition by power iteration and deflation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use ndalg_view::{BufferND, NdError, NdView, NdViewMut, Result};

use crate::helpers::{dims2, dot, matrix_shape, matvec_into, norm};

/// Default convergence threshold on `1 - |v·v_prev|`.
pub const DEFAULT_SVD_EPSILON: f64 = 1e-10;

/// Tuning for the power-iteration SVD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvdConfig {
    /// Iteration stops once `|v·v_prev| > 1 - epsilon`.
    pub epsilon: f64,
    /// Iteration budget per singular component.
    pub max_iterations: usize,
    /// Seed of the generator drawing the start vectors.
    pub seed: u64,
}

impl Default for SvdConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_SVD_EPSILON,
            max_iterations: 10_000,
            seed: 0,
        }
    }
}

impl SvdConfig {
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Gram matrix `aᵗ·a` when `transpose` is set, `a·aᵗ` otherwise.
fn gram(a: &NdView<'_, f64>, transpose: bool) -> BufferND<f64> {
    let (n, m) = dims2(a.shape());
    if transpose {
        BufferND::from_fn(&[m, m], |idx| (0..n).map(|k| a[[k, idx[0]]] * a[[k, idx[1]]]).sum())
    } else {
        BufferND::from_fn(&[n, n], |idx| (0..m).map(|k| a[[idx[0], k]] * a[[idx[1], k]]).sum())
    }
}

fn start_vector<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<f64> {
    let mut v: Vec<f64> = (0..len).map(|_| rng.sample(StandardNormal)).collect();
    let length = norm(&v);
    if length > 0.0 {
        v.iter_mut().for_each(|x| *x /= length);
    }
    v
}

/// Dominant singular vector of an `n×m` matrix.
///
/// Runs power iteration on `aᵗ·a` (a right singular vector of length `m`)
/// when `n > m`, on `a·aᵗ` (a left singular vector of length `n`) otherwise.
/// If the iterate collapses to zero, the previous vector is returned; this
/// happens once `a` has been fully deflated.
///
/// The start vector is drawn from `rng`. `component` only labels the error
/// when the iteration budget runs out.
pub fn svd_1d<R: Rng + ?Sized>(
    a: &NdView<'_, f64>,
    config: &SvdConfig,
    rng: &mut R,
    component: usize,
) -> Result<Vec<f64>> {
    let (n, m) = matrix_shape(a.shape())?;
    let b = gram(a, n > m);
    let b = b.view();
    let len = n.min(m);

    let mut v = start_vector(len, rng);
    let mut next = vec![0.0; len];
    for iteration in 1..=config.max_iterations {
        matvec_into(&b, &v, &mut next);
        let length = norm(&next);
        if length == 0.0 || !length.is_finite() {
            log::trace!("svd_1d: component {component} collapsed after {iteration} iterations");
            return Ok(v);
        }
        next.iter_mut().for_each(|x| *x /= length);
        std::mem::swap(&mut v, &mut next);
        if dot(&v, &next).abs() > 1.0 - config.epsilon {
            log::trace!("svd_1d: component {component} converged after {iteration} iterations");
            return Ok(v);
        }
    }
    Err(NdError::NotConverged {
        component,
        iterations: config.max_iterations,
    })
}

/// Thin SVD of an `n×m` matrix: `a ≈ u · diag(s) · vᵗ`.
///
/// With `k = min(n, m)`, `u` is `n×k`, `s` has length `k` and `v` is `m×k`.
/// Components are found in order of decreasing singular value, each one
/// removed from a working copy of `a` before the next is sought; the
/// partner vector of each component is projected through that deflated
/// copy. Components of a rank-deficient `a` beyond its rank get a zero
/// singular value and zero singular vectors.
///
/// One generator seeded from `config.seed` supplies the start vector of
/// every component, so equal configs give equal results.
pub fn svd_into(
    a: &NdView<'_, f64>,
    u: &mut NdViewMut<'_, f64>,
    s: &mut NdViewMut<'_, f64>,
    v: &mut NdViewMut<'_, f64>,
    config: &SvdConfig,
) -> Result<()> {
    let (n, m) = matrix_shape(a.shape())?;
    let k = n.min(m);
    for (actual, expected) in [
        (u.shape(), vec![n, k]),
        (s.shape(), vec![k]),
        (v.shape(), vec![m, k]),
    ] {
        if actual != expected.as_slice() {
            return Err(NdError::ShapeMismatch(actual.to_vec(), expected));
        }
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut work = a.to_buffer_nd();
    let mut left = vec![0.0; n];
    let mut right = vec![0.0; m];

    for c in 0..k {
        let sigma = if n > m {
            right = svd_1d(&work.view(), config, &mut rng, c)?;
            for (i, slot) in left.iter_mut().enumerate() {
                *slot = (0..m).map(|j| work[[i, j]] * right[j]).sum();
            }
            normalize(&mut left)
        } else {
            left = svd_1d(&work.view(), config, &mut rng, c)?;
            for (j, slot) in right.iter_mut().enumerate() {
                *slot = (0..n).map(|i| work[[i, j]] * left[i]).sum();
            }
            normalize(&mut right)
        };
        if sigma == 0.0 {
            left.iter_mut().for_each(|x| *x = 0.0);
            right.iter_mut().for_each(|x| *x = 0.0);
        }

        for i in 0..n {
            for j in 0..m {
                work[[i, j]] -= sigma * left[i] * right[j];
            }
        }
        s[[c]] = sigma;
        for (i, &x) in left.iter().enumerate() {
            u[[i, c]] = x;
        }
        for (j, &x) in right.iter().enumerate() {
            v[[j, c]] = x;
        }
    }
    Ok(())
}

/// Scale `x` to unit length, returning its former length.
fn normalize(x: &mut [f64]) -> f64 {
    let length = norm(x);
    if length > 0.0 && length.is_finite() {
        x.iter_mut().for_each(|e| *e /= length);
        length
    } else {
        0.0
    }
}
