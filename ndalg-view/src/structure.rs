//! Read interface shared by every n-dimensional structure.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::strides::Strides;
use crate::view::{BufferND, NdView, NdViewMut};

/// Default absolute tolerance for approximate content equality.
pub const DEFAULT_TOLERANCE: f64 = 1e-11;

/// An n-dimensional structure that can be read element by element.
///
/// Buffer-backed implementors override [`as_buffer`](Self::as_buffer) so
/// that bulk consumers can work on the underlying slice directly.
pub trait StructureND {
    type Item;

    fn shape(&self) -> &[usize];

    /// Number of dimensions.
    fn dimension(&self) -> usize {
        self.shape().len()
    }

    /// Element at a multi-index.
    fn get(&self, index: &[usize]) -> Self::Item;

    /// Iterate `(index, value)` pairs in row-major order.
    fn elements(&self) -> Elements<'_, Self>
    where
        Self: Sized,
    {
        Elements::new(self)
    }

    /// Borrowed buffer view, if this structure has one.
    fn as_buffer(&self) -> Option<NdView<'_, Self::Item>> {
        None
    }
}

impl<T: Clone> StructureND for BufferND<T> {
    type Item = T;

    fn shape(&self) -> &[usize] {
        BufferND::shape(self)
    }

    fn get(&self, index: &[usize]) -> T {
        self[index].clone()
    }

    fn as_buffer(&self) -> Option<NdView<'_, T>> {
        Some(self.view())
    }
}

impl<T: Clone> StructureND for NdView<'_, T> {
    type Item = T;

    fn shape(&self) -> &[usize] {
        NdView::shape(self)
    }

    fn get(&self, index: &[usize]) -> T {
        self[index].clone()
    }

    fn as_buffer(&self) -> Option<NdView<'_, T>> {
        Some(self.clone())
    }
}

impl<T: Clone> StructureND for NdViewMut<'_, T> {
    type Item = T;

    fn shape(&self) -> &[usize] {
        NdViewMut::shape(self)
    }

    fn get(&self, index: &[usize]) -> T {
        self[index].clone()
    }

    fn as_buffer(&self) -> Option<NdView<'_, T>> {
        Some(self.as_view())
    }
}

/// Lazily evaluated structure: every read calls the generating function.
pub struct FnStructure<T, F> {
    strides: Arc<Strides>,
    f: F,
    _marker: PhantomData<fn() -> T>,
}

impl<T, F: Fn(&[usize]) -> T> FnStructure<T, F> {
    pub fn new(shape: &[usize], f: F) -> Self {
        Self {
            strides: Arc::new(Strides::new(shape)),
            f,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn strides(&self) -> &Arc<Strides> {
        &self.strides
    }
}

impl<T, F: Fn(&[usize]) -> T> StructureND for FnStructure<T, F> {
    type Item = T;

    fn shape(&self) -> &[usize] {
        self.strides.shape()
    }

    fn get(&self, index: &[usize]) -> T {
        (self.f)(index)
    }
}

/// Row-major iterator over the `(index, value)` pairs of a structure.
///
/// Yields exactly `linear_size` items; call [`StructureND::elements`] again
/// to restart.
pub struct Elements<'a, S: StructureND> {
    source: &'a S,
    strides: Strides,
    next: usize,
}

impl<'a, S: StructureND> Elements<'a, S> {
    fn new(source: &'a S) -> Self {
        Self {
            strides: Strides::new(source.shape()),
            source,
            next: 0,
        }
    }
}

impl<S: StructureND> Iterator for Elements<'_, S> {
    type Item = (Vec<usize>, S::Item);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.strides.linear_size() {
            return None;
        }
        let index = self.strides.index(self.next);
        self.next += 1;
        let value = self.source.get(&index);
        Some((index, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.strides.linear_size().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl<S: StructureND> ExactSizeIterator for Elements<'_, S> {}

/// A buffer-backed view of an arbitrary structure.
#[derive(Debug)]
pub enum FlatView<'a, T> {
    /// The source already had a buffer.
    Borrowed(NdView<'a, T>),
    /// The source was materialized into a new buffer.
    Owned(BufferND<T>),
}

impl<T> FlatView<'_, T> {
    pub fn view(&self) -> NdView<'_, T> {
        match self {
            FlatView::Borrowed(v) => v.clone(),
            FlatView::Owned(b) => b.view(),
        }
    }

    pub fn is_borrowed(&self) -> bool {
        matches!(self, FlatView::Borrowed(_))
    }
}

/// Adapt a structure into a buffer-backed view, copying only if it has no buffer.
pub fn to_flat_view<S: StructureND>(source: &S) -> FlatView<'_, S::Item> {
    match source.as_buffer() {
        Some(view) => FlatView::Borrowed(view),
        None => FlatView::Owned(BufferND::from_fn(source.shape(), |idx| source.get(idx))),
    }
}

/// Exact content equality: same shape and equal elements.
pub fn content_equals<A, B>(a: &A, b: &B) -> bool
where
    A: StructureND,
    B: StructureND<Item = A::Item>,
    A::Item: PartialEq,
{
    if a.shape() != b.shape() {
        return false;
    }
    match (a.as_buffer(), b.as_buffer()) {
        (Some(x), Some(y)) => x.as_slice() == y.as_slice(),
        _ => a.elements().all(|(idx, value)| value == b.get(&idx)),
    }
}

/// Content equality of `f64` structures: every difference strictly below `tolerance`.
pub fn content_equals_approx<A, B>(a: &A, b: &B, tolerance: f64) -> bool
where
    A: StructureND<Item = f64>,
    B: StructureND<Item = f64>,
{
    if a.shape() != b.shape() {
        return false;
    }
    match (a.as_buffer(), b.as_buffer()) {
        (Some(x), Some(y)) => x
            .as_slice()
            .iter()
            .zip(y.as_slice())
            .all(|(p, q)| (p - q).abs() < tolerance),
        _ => a
            .elements()
            .all(|(idx, value)| (value - b.get(&idx)).abs() < tolerance),
    }
}
