//! Algebraic operations lifted from elements to whole structures.

use ndalg_traits::{Algebra, Field, Group, Ring, ScaleOperations};
use ndalg_view::{content_equals, to_flat_view, BufferND, StructureND};

use crate::map_view::{map_assign, map_buffer, map_indexed_buffer, zip_assign, zip_buffers};
use crate::maybe_sync::MaybeSendSync;
use crate::Result;

/// Pointwise algebra over [`BufferND`] structures of a fixed element algebra.
///
/// Every operation accepts any [`StructureND`]; buffer-backed inputs are read
/// in place, others are materialized once. Binary operations require
/// identical shapes.
///
/// ```rust
/// use ndalg_kernel::BufferAlgebraNd;
/// use ndalg_traits::F64_FIELD;
///
/// let alg = BufferAlgebraNd::new(F64_FIELD);
/// let a = alg.structure_nd(&[2, 2], |idx| (idx[0] + idx[1]) as f64);
/// let b = alg.one(&[2, 2]);
/// let c = alg.binary_operation("+", &a, &b).unwrap();
/// assert_eq!(c.buffer(), &[1.0, 2.0, 2.0, 3.0]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BufferAlgebraNd<A> {
    element: A,
}

impl<A> BufferAlgebraNd<A>
where
    A: Algebra + MaybeSendSync,
    A::Elem: MaybeSendSync,
{
    pub fn new(element: A) -> Self {
        Self { element }
    }

    /// The algebra applied to individual elements.
    pub fn element_algebra(&self) -> &A {
        &self.element
    }

    /// Build a structure from an initializer on multi-indices.
    pub fn structure_nd(
        &self,
        shape: &[usize],
        init: impl FnMut(&[usize]) -> A::Elem,
    ) -> BufferND<A::Elem> {
        BufferND::from_fn(shape, init)
    }

    pub fn map<S>(
        &self,
        arg: &S,
        f: impl Fn(&A, A::Elem) -> A::Elem + MaybeSendSync,
    ) -> Result<BufferND<A::Elem>>
    where
        S: StructureND<Item = A::Elem>,
    {
        let src = to_flat_view(arg);
        let element = &self.element;
        map_buffer(&src.view(), |x| f(element, x.clone()))
    }

    pub fn map_indexed<S>(
        &self,
        arg: &S,
        f: impl Fn(&A, &[usize], A::Elem) -> A::Elem + MaybeSendSync,
    ) -> Result<BufferND<A::Elem>>
    where
        S: StructureND<Item = A::Elem>,
    {
        let src = to_flat_view(arg);
        let element = &self.element;
        map_indexed_buffer(&src.view(), |idx, x| f(element, idx, x.clone()))
    }

    pub fn zip<L, R>(
        &self,
        left: &L,
        right: &R,
        f: impl Fn(&A, A::Elem, A::Elem) -> A::Elem + MaybeSendSync,
    ) -> Result<BufferND<A::Elem>>
    where
        L: StructureND<Item = A::Elem>,
        R: StructureND<Item = A::Elem>,
    {
        let (l, r) = (to_flat_view(left), to_flat_view(right));
        let element = &self.element;
        zip_buffers(&l.view(), &r.view(), |x, y| f(element, x.clone(), y.clone()))
    }

    /// Apply a named binary operation of the element algebra pointwise.
    pub fn binary_operation<L, R>(
        &self,
        operation: &str,
        left: &L,
        right: &R,
    ) -> Result<BufferND<A::Elem>>
    where
        L: StructureND<Item = A::Elem>,
        R: StructureND<Item = A::Elem>,
    {
        let op = self.element.binary_operation_function(operation)?;
        log::debug!(
            "{} structure op '{}' on {:?}",
            self.element.name(),
            operation,
            left.shape()
        );
        self.zip(left, right, op)
    }

    /// Apply a named unary operation of the element algebra pointwise.
    pub fn unary_operation<S>(&self, operation: &str, arg: &S) -> Result<BufferND<A::Elem>>
    where
        S: StructureND<Item = A::Elem>,
    {
        let op = self.element.unary_operation_function(operation)?;
        self.map(arg, op)
    }

    /// Content equality: same shape and pointwise equal elements.
    pub fn content_equals<L, R>(&self, left: &L, right: &R) -> bool
    where
        L: StructureND<Item = A::Elem>,
        R: StructureND<Item = A::Elem>,
        A::Elem: PartialEq,
    {
        content_equals(left, right)
    }
}

impl<A> BufferAlgebraNd<A>
where
    A: Group + MaybeSendSync,
    A::Elem: MaybeSendSync,
{
    pub fn zero(&self, shape: &[usize]) -> BufferND<A::Elem> {
        BufferND::filled(shape, self.element.zero())
    }

    pub fn add<L, R>(&self, left: &L, right: &R) -> Result<BufferND<A::Elem>>
    where
        L: StructureND<Item = A::Elem>,
        R: StructureND<Item = A::Elem>,
    {
        self.zip(left, right, |alg, x, y| alg.add(x, y))
    }

    pub fn sub<L, R>(&self, left: &L, right: &R) -> Result<BufferND<A::Elem>>
    where
        L: StructureND<Item = A::Elem>,
        R: StructureND<Item = A::Elem>,
    {
        self.zip(left, right, |alg, x, y| alg.sub(x, y))
    }

    pub fn neg<S>(&self, arg: &S) -> Result<BufferND<A::Elem>>
    where
        S: StructureND<Item = A::Elem>,
    {
        self.map(arg, |alg, x| alg.neg(x))
    }

    /// `target += other`, in place.
    pub fn add_assign<S>(&self, target: &mut BufferND<A::Elem>, other: &S) -> Result<()>
    where
        S: StructureND<Item = A::Elem>,
    {
        let src = to_flat_view(other);
        let element = &self.element;
        zip_assign(&mut target.view_mut(), &src.view(), |x, y| {
            element.add(x.clone(), y.clone())
        })
    }
}

impl<A> BufferAlgebraNd<A>
where
    A: Ring + MaybeSendSync,
    A::Elem: MaybeSendSync,
{
    pub fn one(&self, shape: &[usize]) -> BufferND<A::Elem> {
        BufferND::filled(shape, self.element.one())
    }

    pub fn multiply<L, R>(&self, left: &L, right: &R) -> Result<BufferND<A::Elem>>
    where
        L: StructureND<Item = A::Elem>,
        R: StructureND<Item = A::Elem>,
    {
        self.zip(left, right, |alg, x, y| alg.multiply(x, y))
    }
}

impl<A> BufferAlgebraNd<A>
where
    A: ScaleOperations + MaybeSendSync,
    A::Elem: MaybeSendSync,
{
    pub fn scale<S>(&self, arg: &S, value: f64) -> Result<BufferND<A::Elem>>
    where
        S: StructureND<Item = A::Elem>,
    {
        self.map(arg, move |alg, x| alg.scale(x, value))
    }

    /// `target *= value`, in place.
    pub fn scale_assign(&self, target: &mut BufferND<A::Elem>, value: f64) {
        let element = &self.element;
        map_assign(&mut target.view_mut(), |x| element.scale(x.clone(), value));
    }
}

impl<A> BufferAlgebraNd<A>
where
    A: Field + MaybeSendSync,
    A::Elem: MaybeSendSync,
{
    pub fn divide<L, R>(&self, left: &L, right: &R) -> Result<BufferND<A::Elem>>
    where
        L: StructureND<Item = A::Elem>,
        R: StructureND<Item = A::Elem>,
    {
        self.zip(left, right, |alg, x, y| alg.divide(x, y))
    }
}

impl<A> BufferAlgebraNd<A>
where
    A: Algebra<Elem = f64> + MaybeSendSync,
{
    /// Content equality of `f64` structures within `tolerance`.
    pub fn content_equals_approx<L, R>(&self, left: &L, right: &R, tolerance: f64) -> bool
    where
        L: StructureND<Item = f64>,
        R: StructureND<Item = f64>,
    {
        ndalg_view::content_equals_approx(left, right, tolerance)
    }
}
