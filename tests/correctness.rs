use approx::assert_relative_eq;
use ndalg::linalg::{self, batch, SvdConfig};
use ndalg::{
    content_equals, content_equals_approx, BufferAlgebraNd, BufferND, FnStructure,
    Group, NdError, StructureND, F64_FIELD, I64_RING,
};
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_identity_map_is_content_equal() {
    let alg = BufferAlgebraNd::new(F64_FIELD);
    let a = alg.structure_nd(&[3, 4, 2], |idx| (idx[0] * 8 + idx[1] * 2 + idx[2]) as f64);
    let b = alg.map(&a, |_, x| x).unwrap();
    assert!(content_equals(&a, &b));
    assert_eq!(a.elements().count(), 24);
}

#[test]
fn test_lazy_structure_feeds_algebra() {
    let alg = BufferAlgebraNd::new(I64_RING);
    let lazy = FnStructure::new(&[2, 3], |idx: &[usize]| (idx[0] * 3 + idx[1]) as i64);
    let ones = alg.one(&[2, 3]);
    let sum = alg.binary_operation("+", &lazy, &ones).unwrap();
    assert_eq!(sum.buffer(), &[1, 2, 3, 4, 5, 6]);
    let product = alg.multiply(&sum, &sum).unwrap();
    assert_eq!(product[[1, 2]], 36);
}

#[test]
fn test_ring_rejects_division() {
    let alg = BufferAlgebraNd::new(I64_RING);
    let a = alg.one(&[2]);
    assert!(matches!(
        alg.binary_operation("/", &a, &a),
        Err(NdError::Algebra(_))
    ));
}

#[test]
fn test_complex_field_structures() {
    let alg = BufferAlgebraNd::new(ndalg::COMPLEX64_FIELD);
    let a = alg.structure_nd(&[2], |idx| Complex64::new(idx[0] as f64, 1.0));
    let b = alg.multiply(&a, &a).unwrap();
    assert_eq!(b[[0]], Complex64::new(-1.0, 0.0));
    assert_eq!(b[[1]], Complex64::new(0.0, 2.0));
    assert_eq!(alg.element_algebra().zero(), Complex64::new(0.0, 0.0));
}

#[test]
fn test_batched_inverse_of_algebra_built_stack() {
    let alg = BufferAlgebraNd::new(F64_FIELD);
    let mut rng = StdRng::seed_from_u64(5);
    let noise = alg.structure_nd(&[4, 3, 3], |_| rng.gen_range(-0.5..0.5));
    let diag = alg.structure_nd(&[4, 3, 3], |idx| if idx[1] == idx[2] { 4.0 } else { 0.0 });
    let stack = alg.add(&noise, &diag).unwrap();

    let inverses = batch::inv(&stack).unwrap();
    let (sv, iv) = (stack.view(), inverses.view());
    for (a, inv) in sv.matrix_sequence().unwrap().zip(iv.matrix_sequence().unwrap()) {
        let prod = linalg::matmul(&a, &inv).unwrap();
        let eye = BufferND::from_fn(&[3, 3], |idx| if idx[0] == idx[1] { 1.0 } else { 0.0 });
        assert!(content_equals_approx(&prod, &eye, 1e-10));
    }
}

#[test]
fn test_batched_svd_reconstructs_each_matrix() {
    let stack = BufferND::from_vec(
        &[2, 2, 2],
        vec![3.0, 0.0, 0.0, 1.0, 4.0, 0.0, 0.0, 2.0],
    )
    .unwrap();
    let (u, s, v) = batch::svd(&stack, &SvdConfig::default().with_epsilon(1e-14)).unwrap();
    for b in 0..2 {
        for i in 0..2 {
            for j in 0..2 {
                let value: f64 = (0..2).map(|c| u[[b, i, c]] * s[[b, c]] * v[[b, j, c]]).sum();
                assert_relative_eq!(value, stack[[b, i, j]], epsilon = 1e-6);
            }
        }
    }
}

#[test]
fn test_display_of_matrix() {
    let a = BufferND::from_vec(&[2, 2], vec![1, 2, 3, 4]).unwrap();
    assert_eq!(a.to_string(), "BufferND(shape=[2, 2], buffer=[[1, 2], [3, 4]])");
}
