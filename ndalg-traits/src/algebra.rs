//! Algebraic structure hierarchy and its operation tables.
//!
//! The capability levels nest as `Group ⊂ Ring ⊂ Field`:
//!
//! ```text
//!   level  | binary tokens  | unary tokens | identities
//! ---------|----------------|--------------|-----------
//!   Group  | +  -           | +  -         | zero
//!   Ring   | +  -  *        | +  -         | zero, one
//!   Field  | +  -  *  /     | +  -         | zero, one
//! ```
//!
//! Optional capabilities extend the unary table: [`PowerOperations`] adds
//! `sqrt`, [`ExponentialOperations`] adds `exp` and `ln`.
//!
//! # Key Design: explicit tables
//!
//! Each concrete algebra routes [`Algebra::binary_table`] to the table of the
//! highest level it implements (e.g. [`field_binary_table`]). A table handles
//! its own tokens and falls through to the level below, so an algebra never
//! exposes a token its level does not provide.

use crate::operation::{BinaryOp, UnaryOp};
use crate::{AlgebraError, Result};

/// A unary operation bound to an algebra.
pub type UnaryFn<A> = fn(&A, <A as Algebra>::Elem) -> <A as Algebra>::Elem;

/// A binary operation bound to an algebra.
pub type BinaryFn<A> =
    fn(&A, <A as Algebra>::Elem, <A as Algebra>::Elem) -> <A as Algebra>::Elem;

// ---------------------------------------------------------------------------
// Algebra: named dispatch and symbol binding
// ---------------------------------------------------------------------------

/// An algebraic structure over elements of type [`Algebra::Elem`].
///
/// Implementations are stateless values. Named dispatch lets expression
/// evaluators bind operators by name without compile-time knowledge of the
/// concrete algebra.
pub trait Algebra {
    /// Element type of this structure.
    type Elem: Clone;

    /// Human-readable name used in error messages.
    fn name(&self) -> &'static str;

    /// Resolve a named constant such as `"pi"`, or `None` if unknown.
    fn bind_symbol_or_none(&self, symbol: &str) -> Option<Self::Elem> {
        let _ = symbol;
        None
    }

    /// Resolve a named constant, failing with [`AlgebraError::UnboundSymbol`].
    fn bind_symbol(&self, symbol: &str) -> Result<Self::Elem> {
        self.bind_symbol_or_none(symbol)
            .ok_or_else(|| AlgebraError::UnboundSymbol {
                symbol: symbol.to_string(),
                algebra: self.name(),
            })
    }

    /// Unary operation table. Defaults to no operations.
    fn unary_table(&self, op: UnaryOp) -> Option<UnaryFn<Self>> {
        let _ = op;
        None
    }

    /// Binary operation table. Defaults to no operations.
    fn binary_table(&self, op: BinaryOp) -> Option<BinaryFn<Self>> {
        let _ = op;
        None
    }

    /// Look up a unary operation by name.
    fn unary_operation_function(&self, operation: &str) -> Result<UnaryFn<Self>> {
        UnaryOp::from_symbol(operation)
            .and_then(|op| self.unary_table(op))
            .ok_or_else(|| AlgebraError::UnsupportedOperation {
                operation: operation.to_string(),
                algebra: self.name(),
            })
    }

    /// Look up a binary operation by name.
    fn binary_operation_function(&self, operation: &str) -> Result<BinaryFn<Self>> {
        BinaryOp::from_symbol(operation)
            .and_then(|op| self.binary_table(op))
            .ok_or_else(|| AlgebraError::UnsupportedOperation {
                operation: operation.to_string(),
                algebra: self.name(),
            })
    }

    /// Invoke a unary operation by name.
    ///
    /// Equivalent to `unary_operation_function(operation)?(self, arg)`.
    fn unary_operation(&self, operation: &str, arg: Self::Elem) -> Result<Self::Elem> {
        let f = self.unary_operation_function(operation)?;
        Ok(f(self, arg))
    }

    /// Invoke a binary operation by name.
    ///
    /// Equivalent to `binary_operation_function(operation)?(self, left, right)`.
    fn binary_operation(
        &self,
        operation: &str,
        left: Self::Elem,
        right: Self::Elem,
    ) -> Result<Self::Elem> {
        let f = self.binary_operation_function(operation)?;
        Ok(f(self, left, right))
    }
}

// ---------------------------------------------------------------------------
// Capability levels
// ---------------------------------------------------------------------------

/// Group: associative addition with a neutral element and inverses.
pub trait Group: Algebra {
    /// The neutral element of addition.
    fn zero(&self) -> Self::Elem;

    fn add(&self, left: Self::Elem, right: Self::Elem) -> Self::Elem;

    /// The additive inverse.
    fn neg(&self, arg: Self::Elem) -> Self::Elem;

    fn sub(&self, left: Self::Elem, right: Self::Elem) -> Self::Elem {
        self.add(left, self.neg(right))
    }

    /// Unary plus.
    fn plus(&self, arg: Self::Elem) -> Self::Elem {
        arg
    }
}

/// Ring: a group with multiplication distributive over addition.
pub trait Ring: Group {
    /// The neutral element of multiplication.
    fn one(&self) -> Self::Elem;

    fn multiply(&self, left: Self::Elem, right: Self::Elem) -> Self::Elem;
}

/// Multiplication by a real scalar.
pub trait ScaleOperations: Algebra {
    fn scale(&self, arg: Self::Elem, value: f64) -> Self::Elem;
}

/// Field: a ring with division, also supporting scaling by `f64`.
pub trait Field: Ring + ScaleOperations {
    fn divide(&self, left: Self::Elem, right: Self::Elem) -> Self::Elem;

    fn reciprocal(&self, arg: Self::Elem) -> Self::Elem {
        self.divide(self.one(), arg)
    }

    /// Embed a real number as `one` scaled by `value`.
    fn number(&self, value: f64) -> Self::Elem {
        self.scale(self.one(), value)
    }
}

/// Raising to a real power.
pub trait PowerOperations: Algebra {
    fn power(&self, arg: Self::Elem, pow: f64) -> Self::Elem;

    fn sqrt(&self, arg: Self::Elem) -> Self::Elem {
        self.power(arg, 0.5)
    }
}

/// Exponential and natural logarithm.
pub trait ExponentialOperations: Algebra {
    fn exp(&self, arg: Self::Elem) -> Self::Elem;
    fn ln(&self, arg: Self::Elem) -> Self::Elem;
}

// ---------------------------------------------------------------------------
// Operation tables
// ---------------------------------------------------------------------------

fn op_plus<A: Group>(alg: &A, arg: A::Elem) -> A::Elem {
    alg.plus(arg)
}

fn op_neg<A: Group>(alg: &A, arg: A::Elem) -> A::Elem {
    alg.neg(arg)
}

fn op_add<A: Group>(alg: &A, left: A::Elem, right: A::Elem) -> A::Elem {
    alg.add(left, right)
}

fn op_sub<A: Group>(alg: &A, left: A::Elem, right: A::Elem) -> A::Elem {
    alg.sub(left, right)
}

fn op_multiply<A: Ring>(alg: &A, left: A::Elem, right: A::Elem) -> A::Elem {
    alg.multiply(left, right)
}

fn op_divide<A: Field>(alg: &A, left: A::Elem, right: A::Elem) -> A::Elem {
    alg.divide(left, right)
}

fn op_sqrt<A: PowerOperations>(alg: &A, arg: A::Elem) -> A::Elem {
    alg.sqrt(arg)
}

fn op_exp<A: ExponentialOperations>(alg: &A, arg: A::Elem) -> A::Elem {
    alg.exp(arg)
}

fn op_ln<A: ExponentialOperations>(alg: &A, arg: A::Elem) -> A::Elem {
    alg.ln(arg)
}

/// Unary tokens of a [`Group`]: `+` and `-`.
pub fn group_unary_table<A: Group>(op: UnaryOp) -> Option<UnaryFn<A>> {
    let f: UnaryFn<A> = match op {
        UnaryOp::Plus => op_plus::<A>,
        UnaryOp::Minus => op_neg::<A>,
        _ => return None,
    };
    Some(f)
}

/// Unary tokens of [`PowerOperations`]: `sqrt`.
pub fn power_unary_table<A: PowerOperations>(op: UnaryOp) -> Option<UnaryFn<A>> {
    let f: UnaryFn<A> = match op {
        UnaryOp::Sqrt => op_sqrt::<A>,
        _ => return None,
    };
    Some(f)
}

/// Unary tokens of [`ExponentialOperations`]: `exp` and `ln`.
pub fn exponential_unary_table<A: ExponentialOperations>(op: UnaryOp) -> Option<UnaryFn<A>> {
    let f: UnaryFn<A> = match op {
        UnaryOp::Exp => op_exp::<A>,
        UnaryOp::Ln => op_ln::<A>,
        _ => return None,
    };
    Some(f)
}

/// Binary tokens of a [`Group`]: `+` and `-`.
pub fn group_binary_table<A: Group>(op: BinaryOp) -> Option<BinaryFn<A>> {
    let f: BinaryFn<A> = match op {
        BinaryOp::Plus => op_add::<A>,
        BinaryOp::Minus => op_sub::<A>,
        _ => return None,
    };
    Some(f)
}

/// Binary tokens of a [`Ring`]: `*`, then the group table.
pub fn ring_binary_table<A: Ring>(op: BinaryOp) -> Option<BinaryFn<A>> {
    match op {
        BinaryOp::Times => Some(op_multiply::<A> as BinaryFn<A>),
        _ => group_binary_table::<A>(op),
    }
}

/// Binary tokens of a [`Field`]: `/`, then the ring table.
pub fn field_binary_table<A: Field>(op: BinaryOp) -> Option<BinaryFn<A>> {
    match op {
        BinaryOp::Div => Some(op_divide::<A> as BinaryFn<A>),
        _ => ring_binary_table::<A>(op),
    }
}

/// Symbols every ring understands: `"zero"` and `"one"`.
pub fn ring_symbol<A: Ring>(alg: &A, symbol: &str) -> Option<A::Elem> {
    match symbol {
        "zero" => Some(alg.zero()),
        "one" => Some(alg.one()),
        _ => None,
    }
}
