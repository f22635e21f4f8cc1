use approx::assert_relative_eq;
use ndalg_kernel::{map_into, zip_map2_into, BufferAlgebraNd, BufferND, NdError, StructureND};
use ndalg_traits::{Algebra, COMPLEX64_FIELD, F64_FIELD};
use num_complex::Complex64;

fn make_matrix(rows: usize, cols: usize) -> BufferND<f64> {
    BufferND::from_fn(&[rows, cols], |idx| (idx[0] * cols + idx[1]) as f64)
}

#[test]
fn test_map_into_sub_matrices() {
    let stack = BufferND::from_fn(&[3, 2, 2], |idx| (idx[0] + 1) as f64);
    let mut out = BufferND::filled(&[2, 2], 0.0);
    let view = stack.view();
    for (k, m) in view.matrix_sequence().unwrap().enumerate() {
        map_into(&mut out.view_mut(), &m, |x| x * 10.0).unwrap();
        assert!(out.buffer().iter().all(|&x| x == (k + 1) as f64 * 10.0));
    }
}

#[test]
fn test_zip_map2_into_rows() {
    let a = make_matrix(4, 3);
    let b = make_matrix(4, 3);
    let mut out = BufferND::filled(&[3], 0.0);
    let (va, vb) = (a.view(), b.view());
    for (i, (ra, rb)) in va
        .vector_sequence()
        .unwrap()
        .zip(vb.vector_sequence().unwrap())
        .enumerate()
    {
        zip_map2_into(&mut out.view_mut(), &ra, &rb, |x, y| x * y).unwrap();
        for j in 0..3 {
            let v = (i * 3 + j) as f64;
            assert_relative_eq!(out[[j]], v * v);
        }
    }
}

#[test]
fn test_elements_count_matches_linear_size() {
    let alg = BufferAlgebraNd::new(F64_FIELD);
    let a = alg.structure_nd(&[2, 3, 4], |idx| idx.iter().sum::<usize>() as f64);
    assert_eq!(a.elements().count(), 24);
    let total: f64 = a.elements().map(|(_, v)| v).sum();
    assert_relative_eq!(total, a.buffer().iter().sum::<f64>());
}

#[test]
fn test_complex_structures() {
    let alg = BufferAlgebraNd::new(COMPLEX64_FIELD);
    let i = COMPLEX64_FIELD.bind_symbol("i").unwrap();
    let a = alg.structure_nd(&[2], |idx| Complex64::new(idx[0] as f64, 1.0));
    let rotated = alg
        .map(&a, move |f, z| f.binary_operation("*", z, i).unwrap())
        .unwrap();
    assert_eq!(rotated[[0]], Complex64::new(-1.0, 0.0));
    assert_eq!(rotated[[1]], Complex64::new(-1.0, 1.0));
    let back = alg.divide(&rotated, &alg.structure_nd(&[2], |_| i)).unwrap();
    assert!(alg.content_equals(&back, &a));
}

#[test]
fn test_unknown_structure_operation() {
    let alg = BufferAlgebraNd::new(F64_FIELD);
    let a = alg.one(&[2]);
    let err = alg.binary_operation("^", &a, &a).unwrap_err();
    assert!(matches!(err, NdError::Algebra(_)));
    assert!(err.to_string().contains("'^'"));
}

#[test]
fn test_large_structures_match_sequential_result() {
    let alg = BufferAlgebraNd::new(F64_FIELD);
    let n = ndalg_kernel::MIN_PARALLEL_LEN * 2 + 3;
    let a = alg.structure_nd(&[n], |idx| idx[0] as f64);
    let b = alg.scale(&a, 2.0).unwrap();
    let c = alg.sub(&b, &a).unwrap();
    assert!(alg.content_equals(&c, &a));
}
