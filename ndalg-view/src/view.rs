//! Owned buffers and borrowed strided views.
//!
//! - [`BufferND`]: owned structure, `(Arc<Strides>, Vec<T>, start offset)`
//! - [`NdView`]: immutable view aliasing a buffer region
//! - [`NdViewMut`]: mutable view with exclusive access to its region
//!
//! Every container uses the canonical row-major layout, so the region of a
//! structure is the contiguous range `offset..offset + linear_size` of its
//! buffer. Element-wise passes run over that slice directly and never decode
//! multi-indices unless the callback asks for them.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::sync::Arc;

use crate::strides::Strides;
use crate::{NdError, Result};

// ============================================================================
// Validation helpers
// ============================================================================

/// Validate that `offset..offset + linear_size` fits into a buffer of `len`.
fn validate_region(len: usize, strides: &Strides, offset: usize) -> Result<()> {
    let required = offset
        .checked_add(strides.linear_size())
        .ok_or(NdError::BufferLength {
            required: usize::MAX,
            actual: len,
        })?;
    if required > len {
        return Err(NdError::BufferLength {
            required,
            actual: len,
        });
    }
    Ok(())
}

/// Split off the trailing `keep` dimensions.
///
/// Returns the inner index model, the element count of one sub-structure and
/// how many sub-structures the outer dimensions hold.
fn split_trailing(shape: &[usize], keep: usize) -> Result<(Arc<Strides>, usize, usize)> {
    if shape.len() < keep {
        return Err(NdError::RankMismatch(shape.len(), keep));
    }
    let inner = Strides::new(&shape[shape.len() - keep..]);
    let step = inner.linear_size();
    let count = if step == 0 {
        0
    } else {
        shape.iter().product::<usize>() / step
    };
    Ok((Arc::new(inner), step, count))
}

#[inline]
fn same_layout(a: &Arc<Strides>, b: &Arc<Strides>) -> bool {
    Arc::ptr_eq(a, b) || a == b
}

// ============================================================================
// NdView
// ============================================================================

/// Immutable view over a region of a buffer.
pub struct NdView<'a, T> {
    data: &'a [T],
    strides: Arc<Strides>,
    offset: usize,
}

impl<T> Clone for NdView<'_, T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data,
            strides: self.strides.clone(),
            offset: self.offset,
        }
    }
}

impl<T> fmt::Debug for NdView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NdView")
            .field("shape", &self.strides.shape())
            .field("offset", &self.offset)
            .finish()
    }
}

impl<'a, T> NdView<'a, T> {
    /// Create a view of `shape` starting at `offset` in `data`.
    pub fn new(data: &'a [T], shape: &[usize], offset: usize) -> Result<Self> {
        Self::with_strides(data, Arc::new(Strides::new(shape)), offset)
    }

    /// Create a view sharing an existing index model.
    pub fn with_strides(data: &'a [T], strides: Arc<Strides>, offset: usize) -> Result<Self> {
        validate_region(data.len(), &strides, offset)?;
        Ok(Self {
            data,
            strides,
            offset,
        })
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.strides.shape()
    }

    #[inline]
    pub fn strides(&self) -> &Arc<Strides> {
        &self.strides
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.strides.ndim()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.strides.linear_size()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The whole backing buffer, including elements outside this view.
    #[inline]
    pub fn data(&self) -> &'a [T] {
        self.data
    }

    /// The region addressed by this view, in linear order.
    #[inline]
    pub fn as_slice(&self) -> &'a [T] {
        &self.data[self.offset..self.offset + self.len()]
    }

    /// Iterate the trailing-dimension vectors of this view.
    ///
    /// Each item aliases the same buffer at offsets `offset + k * shape[last]`.
    pub fn vector_sequence(&self) -> Result<impl Iterator<Item = NdView<'a, T>> + 'a> {
        self.sub_views(1)
    }

    /// Iterate the trailing `rows x cols` matrices of this view.
    pub fn matrix_sequence(&self) -> Result<impl Iterator<Item = NdView<'a, T>> + 'a> {
        self.sub_views(2)
    }

    fn sub_views(&self, keep: usize) -> Result<impl Iterator<Item = NdView<'a, T>> + 'a> {
        let (inner, step, count) = split_trailing(self.shape(), keep)?;
        let data = self.data;
        let base = self.offset;
        Ok((0..count).map(move |k| NdView {
            data,
            strides: inner.clone(),
            offset: base + k * step,
        }))
    }

    /// Apply `f` to every element, producing a structure of the same shape.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> BufferND<U> {
        BufferND {
            strides: self.strides.clone(),
            buffer: self.as_slice().iter().map(f).collect(),
            offset: 0,
        }
    }

    /// Like [`map`](Self::map), also passing each element's multi-index.
    pub fn map_indexed<U>(&self, mut f: impl FnMut(&[usize], &T) -> U) -> BufferND<U> {
        let mut index = vec![0; self.ndim()];
        let strides = &self.strides;
        let buffer = self
            .as_slice()
            .iter()
            .enumerate()
            .map(|(off, value)| {
                strides.index_into(off, &mut index);
                f(&index, value)
            })
            .collect();
        BufferND {
            strides: self.strides.clone(),
            buffer,
            offset: 0,
        }
    }

    /// Combine two views of equal shape element by element.
    pub fn zip<U, V>(
        &self,
        other: &NdView<'_, U>,
        mut f: impl FnMut(&T, &U) -> V,
    ) -> Result<BufferND<V>> {
        if !same_layout(&self.strides, &other.strides) {
            return Err(NdError::ShapeMismatch(
                self.shape().to_vec(),
                other.shape().to_vec(),
            ));
        }
        let buffer = self
            .as_slice()
            .iter()
            .zip(other.as_slice().iter())
            .map(|(a, b)| f(a, b))
            .collect();
        Ok(BufferND {
            strides: self.strides.clone(),
            buffer,
            offset: 0,
        })
    }

    /// Copy this view into a freshly owned structure.
    pub fn to_buffer_nd(&self) -> BufferND<T>
    where
        T: Clone,
    {
        BufferND {
            strides: self.strides.clone(),
            buffer: self.as_slice().to_vec(),
            offset: 0,
        }
    }
}

impl<T: Clone> NdView<'_, T> {
    /// Get an element by multi-index.
    #[inline]
    pub fn get(&self, index: &[usize]) -> T {
        self.data[self.offset + self.strides.offset(index)].clone()
    }
}

impl<T> Index<&[usize]> for NdView<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, index: &[usize]) -> &T {
        &self.data[self.offset + self.strides.offset(index)]
    }
}

impl<T, const N: usize> Index<[usize; N]> for NdView<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, index: [usize; N]) -> &T {
        &self.data[self.offset + self.strides.offset(&index)]
    }
}

// ============================================================================
// NdViewMut
// ============================================================================

/// Mutable view over a region of a buffer.
///
/// The view holds the only mutable borrow of its region, so in-place kernels
/// running on it cannot race with other readers or writers.
pub struct NdViewMut<'a, T> {
    data: &'a mut [T],
    strides: Arc<Strides>,
    offset: usize,
}

impl<T> fmt::Debug for NdViewMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NdViewMut")
            .field("shape", &self.strides.shape())
            .field("offset", &self.offset)
            .finish()
    }
}

impl<'a, T> NdViewMut<'a, T> {
    /// Create a mutable view of `shape` starting at `offset` in `data`.
    pub fn new(data: &'a mut [T], shape: &[usize], offset: usize) -> Result<Self> {
        Self::with_strides(data, Arc::new(Strides::new(shape)), offset)
    }

    /// Create a mutable view sharing an existing index model.
    pub fn with_strides(data: &'a mut [T], strides: Arc<Strides>, offset: usize) -> Result<Self> {
        validate_region(data.len(), &strides, offset)?;
        Ok(Self {
            data,
            strides,
            offset,
        })
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.strides.shape()
    }

    #[inline]
    pub fn strides(&self) -> &Arc<Strides> {
        &self.strides
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.strides.ndim()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.strides.linear_size()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data[self.offset..self.offset + self.len()]
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let len = self.len();
        &mut self.data[self.offset..self.offset + len]
    }

    /// Reborrow as an immutable view.
    pub fn as_view(&self) -> NdView<'_, T> {
        NdView {
            data: &*self.data,
            strides: self.strides.clone(),
            offset: self.offset,
        }
    }

    /// Reborrow as a shorter-lived mutable view.
    pub fn reborrow(&mut self) -> NdViewMut<'_, T> {
        NdViewMut {
            data: &mut *self.data,
            strides: self.strides.clone(),
            offset: self.offset,
        }
    }

    /// Set an element by multi-index.
    #[inline]
    pub fn set(&mut self, index: &[usize], value: T) {
        let off = self.offset + self.strides.offset(index);
        self.data[off] = value;
    }

    /// Transform every element in place, passing its multi-index.
    pub fn map_in_place(&mut self, mut f: impl FnMut(&[usize], &T) -> T) {
        let mut index = vec![0; self.ndim()];
        let strides = self.strides.clone();
        for (off, slot) in self.as_mut_slice().iter_mut().enumerate() {
            strides.index_into(off, &mut index);
            *slot = f(&index, slot);
        }
    }

    /// Split into disjoint mutable vectors along the trailing dimension.
    pub fn into_vector_sequence(self) -> Result<impl Iterator<Item = NdViewMut<'a, T>>> {
        self.into_sub_views(1)
    }

    /// Split into disjoint mutable trailing matrices.
    pub fn into_matrix_sequence(self) -> Result<impl Iterator<Item = NdViewMut<'a, T>>> {
        self.into_sub_views(2)
    }

    /// Mutable trailing matrices, borrowing this view for the iteration.
    pub fn matrix_sequence_mut(&mut self) -> Result<impl Iterator<Item = NdViewMut<'_, T>>> {
        self.reborrow().into_sub_views(2)
    }

    fn into_sub_views(self, keep: usize) -> Result<impl Iterator<Item = NdViewMut<'a, T>>> {
        let (inner, step, count) = split_trailing(self.shape(), keep)?;
        let len = self.len();
        let NdViewMut { data, offset, .. } = self;
        let region = &mut data[offset..offset + len];
        Ok(region
            .chunks_exact_mut(step.max(1))
            .take(count)
            .map(move |chunk| NdViewMut {
                data: chunk,
                strides: inner.clone(),
                offset: 0,
            }))
    }
}

impl<T: Clone> NdViewMut<'_, T> {
    /// Get an element by multi-index.
    #[inline]
    pub fn get(&self, index: &[usize]) -> T {
        self.data[self.offset + self.strides.offset(index)].clone()
    }

    /// Overwrite every element with `value`.
    pub fn fill(&mut self, value: T) {
        self.as_mut_slice().fill(value);
    }

    /// Copy the contents of `src`, which must have the same shape.
    pub fn copy_from(&mut self, src: &NdView<'_, T>) -> Result<()> {
        if !same_layout(&self.strides, src.strides()) {
            return Err(NdError::ShapeMismatch(
                self.shape().to_vec(),
                src.shape().to_vec(),
            ));
        }
        self.as_mut_slice().clone_from_slice(src.as_slice());
        Ok(())
    }
}

impl<T> Index<&[usize]> for NdViewMut<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, index: &[usize]) -> &T {
        &self.data[self.offset + self.strides.offset(index)]
    }
}

impl<T> IndexMut<&[usize]> for NdViewMut<'_, T> {
    #[inline]
    fn index_mut(&mut self, index: &[usize]) -> &mut T {
        let off = self.offset + self.strides.offset(index);
        &mut self.data[off]
    }
}

impl<T, const N: usize> Index<[usize; N]> for NdViewMut<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, index: [usize; N]) -> &T {
        &self.data[self.offset + self.strides.offset(&index)]
    }
}

impl<T, const N: usize> IndexMut<[usize; N]> for NdViewMut<'_, T> {
    #[inline]
    fn index_mut(&mut self, index: [usize; N]) -> &mut T {
        let off = self.offset + self.strides.offset(&index);
        &mut self.data[off]
    }
}

// ============================================================================
// BufferND
// ============================================================================

/// Owned n-dimensional structure.
///
/// The buffer may be longer than the structure: elements live at
/// `offset..offset + linear_size`.
#[derive(Clone)]
pub struct BufferND<T> {
    strides: Arc<Strides>,
    buffer: Vec<T>,
    offset: usize,
}

impl<T> BufferND<T> {
    /// Create a structure with values produced by `f`, called in row-major order.
    pub fn from_fn(shape: &[usize], f: impl FnMut(&[usize]) -> T) -> Self {
        Self::from_strides_fn(Arc::new(Strides::new(shape)), f)
    }

    /// Like [`from_fn`](Self::from_fn), sharing an existing index model.
    pub fn from_strides_fn(strides: Arc<Strides>, mut f: impl FnMut(&[usize]) -> T) -> Self {
        let total = strides.linear_size();
        let mut buffer = Vec::with_capacity(total);
        let mut index = vec![0; strides.ndim()];
        for off in 0..total {
            strides.index_into(off, &mut index);
            buffer.push(f(&index));
        }
        Self {
            strides,
            buffer,
            offset: 0,
        }
    }

    /// Wrap a row-major buffer whose length must equal the element count.
    pub fn from_vec(shape: &[usize], buffer: Vec<T>) -> Result<Self> {
        let strides = Strides::new(shape);
        if buffer.len() != strides.linear_size() {
            return Err(NdError::BufferLength {
                required: strides.linear_size(),
                actual: buffer.len(),
            });
        }
        Ok(Self {
            strides: Arc::new(strides),
            buffer,
            offset: 0,
        })
    }

    /// Wrap a row-major buffer under an existing index model.
    pub fn with_strides(strides: Arc<Strides>, buffer: Vec<T>) -> Result<Self> {
        if buffer.len() != strides.linear_size() {
            return Err(NdError::BufferLength {
                required: strides.linear_size(),
                actual: buffer.len(),
            });
        }
        Ok(Self {
            strides,
            buffer,
            offset: 0,
        })
    }

    /// Create from raw parts: the structure starts at `offset` in `buffer`.
    pub fn from_parts(buffer: Vec<T>, shape: &[usize], offset: usize) -> Result<Self> {
        let strides = Strides::new(shape);
        validate_region(buffer.len(), &strides, offset)?;
        Ok(Self {
            strides: Arc::new(strides),
            buffer,
            offset,
        })
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.strides.shape()
    }

    #[inline]
    pub fn strides(&self) -> &Arc<Strides> {
        &self.strides
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.strides.ndim()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.strides.linear_size()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Elements of this structure in linear order.
    #[inline]
    pub fn buffer(&self) -> &[T] {
        &self.buffer[self.offset..self.offset + self.len()]
    }

    #[inline]
    pub fn buffer_mut(&mut self) -> &mut [T] {
        let len = self.len();
        &mut self.buffer[self.offset..self.offset + len]
    }

    /// Consume the structure, returning its elements in linear order.
    pub fn into_vec(mut self) -> Vec<T> {
        let len = self.len();
        if self.offset == 0 && self.buffer.len() == len {
            return self.buffer;
        }
        self.buffer.truncate(self.offset + len);
        self.buffer.drain(..self.offset);
        self.buffer
    }

    /// Create an immutable view over this structure.
    pub fn view(&self) -> NdView<'_, T> {
        NdView {
            data: self.buffer.as_slice(),
            strides: self.strides.clone(),
            offset: self.offset,
        }
    }

    /// Create a mutable view over this structure.
    pub fn view_mut(&mut self) -> NdViewMut<'_, T> {
        NdViewMut {
            data: self.buffer.as_mut_slice(),
            strides: self.strides.clone(),
            offset: self.offset,
        }
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> BufferND<U> {
        self.view().map(f)
    }

    pub fn map_indexed<U>(&self, f: impl FnMut(&[usize], &T) -> U) -> BufferND<U> {
        self.view().map_indexed(f)
    }

    pub fn zip<U, V>(&self, other: &BufferND<U>, f: impl FnMut(&T, &U) -> V) -> Result<BufferND<V>> {
        self.view().zip(&other.view(), f)
    }

    /// Transform every element in place, passing its multi-index.
    pub fn map_in_place(&mut self, f: impl FnMut(&[usize], &T) -> T) {
        self.view_mut().map_in_place(f)
    }
}

impl<T: Clone> BufferND<T> {
    /// Create a structure with every element set to `value`.
    pub fn filled(shape: &[usize], value: T) -> Self {
        let strides = Strides::new(shape);
        let buffer = vec![value; strides.linear_size()];
        Self {
            strides: Arc::new(strides),
            buffer,
            offset: 0,
        }
    }

    /// Get an element by multi-index.
    #[inline]
    pub fn get(&self, index: &[usize]) -> T {
        self.buffer[self.offset + self.strides.offset(index)].clone()
    }

    /// Set an element by multi-index.
    #[inline]
    pub fn set(&mut self, index: &[usize], value: T) {
        let off = self.offset + self.strides.offset(index);
        self.buffer[off] = value;
    }
}

impl<T> Index<&[usize]> for BufferND<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: &[usize]) -> &T {
        &self.buffer[self.offset + self.strides.offset(index)]
    }
}

impl<T> IndexMut<&[usize]> for BufferND<T> {
    #[inline]
    fn index_mut(&mut self, index: &[usize]) -> &mut T {
        let off = self.offset + self.strides.offset(index);
        &mut self.buffer[off]
    }
}

impl<T, const N: usize> Index<[usize; N]> for BufferND<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: [usize; N]) -> &T {
        &self.buffer[self.offset + self.strides.offset(&index)]
    }
}

impl<T, const N: usize> IndexMut<[usize; N]> for BufferND<T> {
    #[inline]
    fn index_mut(&mut self, index: [usize; N]) -> &mut T {
        let off = self.offset + self.strides.offset(&index);
        &mut self.buffer[off]
    }
}

impl<T: PartialEq> PartialEq for BufferND<T> {
    fn eq(&self, other: &Self) -> bool {
        same_layout(&self.strides, &other.strides) && self.buffer() == other.buffer()
    }
}

impl<T: fmt::Debug> fmt::Debug for BufferND<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferND")
            .field("shape", &self.shape())
            .field("buffer", &self.buffer())
            .finish()
    }
}

impl<T: fmt::Display> fmt::Display for BufferND<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join<T: fmt::Display>(row: &[T]) -> String {
            let items: Vec<String> = row.iter().map(|x| x.to_string()).collect();
            format!("[{}]", items.join(", "))
        }

        let repr = match self.shape() {
            [_] => join(self.buffer()),
            [_, cols] => {
                let rows: Vec<String> = self.buffer().chunks((*cols).max(1)).map(join).collect();
                format!("[{}]", rows.join(", "))
            }
            _ => "...".to_string(),
        };
        write!(f, "BufferND(shape={:?}, buffer={})", self.shape(), repr)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn iota(shape: &[usize]) -> BufferND<f64> {
        let strides = Strides::new(shape);
        BufferND::from_fn(shape, |idx| strides.offset(idx) as f64)
    }

    #[test]
    fn test_from_fn_row_major() {
        let t = BufferND::from_fn(&[2, 3], |idx| (idx[0] * 3 + idx[1]) as f64);
        assert_eq!(t.shape(), &[2, 3]);
        assert_eq!(t.strides().strides(), &[3, 1]);
        assert_eq!(t.buffer(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(t.get(&[1, 2]), 5.0);
        assert_eq!(t[[1, 0]], 3.0);
    }

    #[test]
    fn test_from_vec_length_check() {
        assert!(BufferND::from_vec(&[2, 2], vec![1, 2, 3, 4]).is_ok());
        let err = BufferND::from_vec(&[2, 2], vec![1, 2, 3]).unwrap_err();
        assert!(matches!(
            err,
            NdError::BufferLength {
                required: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_from_parts_with_offset() {
        let t = BufferND::from_parts(vec![9, 9, 1, 2, 3, 4], &[2, 2], 2).unwrap();
        assert_eq!(t.offset(), 2);
        assert_eq!(t.buffer(), &[1, 2, 3, 4]);
        assert_eq!(t[[1, 1]], 4);
        assert_eq!(t.into_vec(), vec![1, 2, 3, 4]);
        assert!(BufferND::from_parts(vec![0; 5], &[2, 2], 2).is_err());
    }

    #[test]
    fn test_set_and_index_mut() {
        let mut t = BufferND::filled(&[2, 3], 0.0);
        t.set(&[0, 1], 1.0);
        t[[1, 2]] = 2.0;
        t[&[1usize, 0] as &[usize]] = 3.0;
        assert_eq!(t.buffer(), &[0.0, 1.0, 0.0, 3.0, 0.0, 2.0]);
    }

    #[test]
    fn test_map_preserves_shape_and_strides() {
        let t = iota(&[2, 3, 2]);
        let m = t.map(|x| x * 2.0);
        assert_eq!(m.shape(), t.shape());
        assert!(Arc::ptr_eq(m.strides(), t.strides()));
        assert_eq!(m.get(&[1, 2, 1]), 22.0);
    }

    #[test]
    fn test_map_identity_is_content_equal() {
        let t = iota(&[3, 4]);
        assert_eq!(t.map(|x| *x), t);
    }

    #[test]
    fn test_map_indexed() {
        let t = BufferND::filled(&[2, 2], 10);
        let m = t.map_indexed(|idx, v| v + idx[0] * 2 + idx[1]);
        assert_eq!(m.buffer(), &[10, 11, 12, 13]);
    }

    #[test]
    fn test_zip_same_shape() {
        let a = iota(&[2, 2]);
        let b = BufferND::filled(&[2, 2], 1.0);
        let c = a.zip(&b, |x, y| x + y).unwrap();
        assert_eq!(c.buffer(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_zip_shape_mismatch_names_both_shapes() {
        let a = iota(&[2, 3]);
        let b = iota(&[3, 2]);
        let err = a.zip(&b, |x, y| x + y).unwrap_err();
        assert_eq!(err.to_string(), "shape mismatch: [2, 3] vs [3, 2]");
    }

    #[test]
    fn test_view_aliases_buffer() {
        let mut t = iota(&[2, 2]);
        {
            let mut v = t.view_mut();
            v[[0, 1]] = 42.0;
        }
        assert_eq!(t.get(&[0, 1]), 42.0);
    }

    #[test]
    fn test_vector_sequence() {
        let t = iota(&[2, 3]);
        let rows: Vec<Vec<f64>> = t
            .view()
            .vector_sequence()
            .unwrap()
            .map(|v| v.as_slice().to_vec())
            .collect();
        assert_eq!(rows, vec![vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 5.0]]);
    }

    #[test]
    fn test_matrix_sequence_offsets() {
        let t = iota(&[3, 2, 2]);
        let view = t.view();
        let mats: Vec<NdView<'_, f64>> = view.matrix_sequence().unwrap().collect();
        assert_eq!(mats.len(), 3);
        for (k, m) in mats.iter().enumerate() {
            assert_eq!(m.shape(), &[2, 2]);
            assert_eq!(m.offset(), 4 * k);
            assert_eq!(m[[1, 0]], (4 * k + 2) as f64);
        }
    }

    #[test]
    fn test_matrix_sequence_rank_error() {
        let t = iota(&[4]);
        assert!(matches!(
            t.view().matrix_sequence().err(),
            Some(NdError::RankMismatch(1, 2))
        ));
    }

    #[test]
    fn test_matrix_sequence_mut_writes_through() {
        let mut t = BufferND::filled(&[2, 2, 2], 0.0);
        for (k, mut m) in t.view_mut().into_matrix_sequence().unwrap().enumerate() {
            m[[0, 0]] = k as f64 + 1.0;
            m[[1, 1]] = k as f64 + 1.0;
        }
        assert_eq!(t.buffer(), &[1.0, 0.0, 0.0, 1.0, 2.0, 0.0, 0.0, 2.0]);
    }

    #[test]
    fn test_empty_sequence() {
        let t: BufferND<f64> = BufferND::filled(&[3, 0, 2], 0.0);
        assert_eq!(t.view().matrix_sequence().unwrap().count(), 0);
    }

    #[test]
    fn test_copy_from_and_fill() {
        let src = iota(&[2, 2]);
        let mut dst = BufferND::filled(&[2, 2], 0.0);
        dst.view_mut().copy_from(&src.view()).unwrap();
        assert_eq!(dst, src);
        dst.view_mut().fill(7.0);
        assert!(dst.buffer().iter().all(|&x| x == 7.0));
        let wrong = iota(&[4]);
        assert!(dst.view_mut().copy_from(&wrong.view()).is_err());
    }

    #[test]
    fn test_map_in_place() {
        let mut t = BufferND::filled(&[2, 2], 1);
        t.map_in_place(|idx, v| v * (idx[0] + 1) * (idx[1] + 1));
        assert_eq!(t.buffer(), &[1, 2, 2, 4]);
    }

    #[test]
    fn test_display() {
        let m = BufferND::from_vec(&[2, 2], vec![1, 2, 3, 4]).unwrap();
        assert_eq!(m.to_string(), "BufferND(shape=[2, 2], buffer=[[1, 2], [3, 4]])");
        let v = BufferND::from_vec(&[3], vec![1, 2, 3]).unwrap();
        assert_eq!(v.to_string(), "BufferND(shape=[3], buffer=[1, 2, 3])");
        let t = BufferND::filled(&[1, 1, 1], 0);
        assert_eq!(t.to_string(), "BufferND(shape=[1, 1, 1], buffer=...)");
    }
}
