//! Row-major strided index model.
//!
//! The canonical layout is "last dimension fastest": the rightmost index has
//! stride 1 and `strides[d]` is the product of the sizes of every dimension
//! after `d`. A zero-size dimension contributes a factor of 1 so that strides
//! stay non-zero and offsets decode unambiguously.

/// Compute row-major strides (last index varies fastest).
pub fn row_major_strides(shape: &[usize]) -> Vec<usize> {
    let rank = shape.len();
    if rank == 0 {
        return vec![];
    }
    let mut strides = vec![1usize; rank];
    for i in (0..rank - 1).rev() {
        strides[i] = strides[i + 1] * shape[i + 1].max(1);
    }
    strides
}

/// Index model of a structure: shape, derived strides and linear size.
///
/// Equality is structural: two instances built from the same shape compare
/// equal, which lets containers skip element-wise shape validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Strides {
    shape: Box<[usize]>,
    strides: Box<[usize]>,
    linear_size: usize,
}

impl Strides {
    pub fn new(shape: &[usize]) -> Self {
        Self {
            strides: row_major_strides(shape).into_boxed_slice(),
            linear_size: shape.iter().product(),
            shape: shape.into(),
        }
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Number of elements addressed by this index model.
    #[inline]
    pub fn linear_size(&self) -> usize {
        self.linear_size
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Linear offset of a multi-index.
    ///
    /// Out-of-range indices are not checked in release builds.
    #[inline]
    pub fn offset(&self, index: &[usize]) -> usize {
        debug_assert_eq!(index.len(), self.shape.len(), "wrong number of indices");
        let mut offset = 0;
        for (d, (&i, &s)) in index.iter().zip(self.strides.iter()).enumerate() {
            debug_assert!(
                i < self.shape[d],
                "index {} out of bounds for dim {}",
                i,
                self.shape[d]
            );
            offset += i * s;
        }
        offset
    }

    /// Multi-index of a linear offset in `[0, linear_size)`.
    pub fn index(&self, offset: usize) -> Vec<usize> {
        let mut index = vec![0; self.shape.len()];
        self.index_into(offset, &mut index);
        index
    }

    /// Decode `offset` into `out` without allocating.
    #[inline]
    pub fn index_into(&self, offset: usize, out: &mut [usize]) {
        debug_assert_eq!(out.len(), self.strides.len());
        let mut current = offset;
        for (slot, &stride) in out.iter_mut().zip(self.strides.iter()) {
            *slot = current / stride;
            current %= stride;
        }
    }

    /// Iterate every multi-index in linear order.
    pub fn indices(&self) -> Indices<'_> {
        Indices {
            strides: self,
            next: 0,
        }
    }
}

/// Iterator over the multi-indices of a [`Strides`], in linear order.
#[derive(Debug, Clone)]
pub struct Indices<'a> {
    strides: &'a Strides,
    next: usize,
}

impl Iterator for Indices<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.next >= self.strides.linear_size {
            return None;
        }
        let index = self.strides.index(self.next);
        self.next += 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.strides.linear_size.saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Indices<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_strides() {
        assert_eq!(row_major_strides(&[3, 4]), vec![4, 1]);
        assert_eq!(row_major_strides(&[2, 3, 4]), vec![12, 4, 1]);
        assert_eq!(row_major_strides(&[5]), vec![1]);
        assert!(row_major_strides(&[]).is_empty());
    }

    #[test]
    fn test_zero_size_dim_keeps_strides_nonzero() {
        assert_eq!(row_major_strides(&[2, 0, 3]), vec![3, 3, 1]);
        let s = Strides::new(&[2, 0, 3]);
        assert_eq!(s.linear_size(), 0);
        assert_eq!(s.indices().count(), 0);
    }

    #[test]
    fn test_offset_index_roundtrip() {
        let s = Strides::new(&[2, 3, 4]);
        assert_eq!(s.linear_size(), 24);
        for off in 0..s.linear_size() {
            assert_eq!(s.offset(&s.index(off)), off);
        }
        for idx in s.indices() {
            assert_eq!(s.index(s.offset(&idx)), idx);
        }
    }

    #[test]
    fn test_indices_linear_order() {
        let s = Strides::new(&[2, 2]);
        let all: Vec<Vec<usize>> = s.indices().collect();
        assert_eq!(all, vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]);
        assert_eq!(s.indices().len(), 4);
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(Strides::new(&[3, 4]), Strides::new(&[3, 4]));
        assert_ne!(Strides::new(&[3, 4]), Strides::new(&[4, 3]));
    }
}
