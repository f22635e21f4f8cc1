//! Algebras over primitive numbers: real fields and integer rings.

use std::marker::PhantomData;

use num_traits::{Float, FloatConst, FromPrimitive, PrimInt, Signed};

use crate::algebra::{
    exponential_unary_table, field_binary_table, group_binary_table, group_unary_table,
    power_unary_table, ring_binary_table, ring_symbol, Algebra, BinaryFn, ExponentialOperations,
    Field, Group, PowerOperations, Ring, ScaleOperations, UnaryFn,
};
use crate::operation::{BinaryOp, UnaryOp};

// ============================================================================
// RealField
// ============================================================================

/// Field of floating-point numbers (`f32`, `f64`).
///
/// Supports every binary token, `sqrt`, `exp`, `ln`, and the symbols
/// `"pi"`, `"e"`, `"zero"`, `"one"`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RealField<T>(PhantomData<T>);

impl<T> RealField<T> {
    /// The canonical instance.
    pub const INSTANCE: Self = RealField(PhantomData);
}

pub type F64Field = RealField<f64>;
pub type F32Field = RealField<f32>;

pub const F64_FIELD: F64Field = RealField::INSTANCE;
pub const F32_FIELD: F32Field = RealField::INSTANCE;

impl<T: Float + FloatConst + FromPrimitive> Algebra for RealField<T> {
    type Elem = T;

    fn name(&self) -> &'static str {
        "RealField"
    }

    fn bind_symbol_or_none(&self, symbol: &str) -> Option<T> {
        match symbol {
            "pi" => Some(T::PI()),
            "e" => Some(T::E()),
            _ => ring_symbol(self, symbol),
        }
    }

    fn unary_table(&self, op: UnaryOp) -> Option<UnaryFn<Self>> {
        exponential_unary_table::<Self>(op)
            .or_else(|| power_unary_table::<Self>(op))
            .or_else(|| group_unary_table::<Self>(op))
    }

    fn binary_table(&self, op: BinaryOp) -> Option<BinaryFn<Self>> {
        field_binary_table::<Self>(op)
    }
}

impl<T: Float + FloatConst + FromPrimitive> Group for RealField<T> {
    #[inline]
    fn zero(&self) -> T {
        T::zero()
    }

    #[inline]
    fn add(&self, left: T, right: T) -> T {
        left + right
    }

    #[inline]
    fn neg(&self, arg: T) -> T {
        -arg
    }

    #[inline]
    fn sub(&self, left: T, right: T) -> T {
        left - right
    }
}

impl<T: Float + FloatConst + FromPrimitive> Ring for RealField<T> {
    #[inline]
    fn one(&self) -> T {
        T::one()
    }

    #[inline]
    fn multiply(&self, left: T, right: T) -> T {
        left * right
    }
}

impl<T: Float + FloatConst + FromPrimitive> ScaleOperations for RealField<T> {
    #[inline]
    fn scale(&self, arg: T, value: f64) -> T {
        arg * T::from_f64(value).unwrap_or_else(T::nan)
    }
}

impl<T: Float + FloatConst + FromPrimitive> Field for RealField<T> {
    #[inline]
    fn divide(&self, left: T, right: T) -> T {
        left / right
    }
}

impl<T: Float + FloatConst + FromPrimitive> PowerOperations for RealField<T> {
    fn power(&self, arg: T, pow: f64) -> T {
        arg.powf(T::from_f64(pow).unwrap_or_else(T::nan))
    }

    fn sqrt(&self, arg: T) -> T {
        arg.sqrt()
    }
}

impl<T: Float + FloatConst + FromPrimitive> ExponentialOperations for RealField<T> {
    fn exp(&self, arg: T) -> T {
        arg.exp()
    }

    fn ln(&self, arg: T) -> T {
        arg.ln()
    }
}

// ============================================================================
// IntRing
// ============================================================================

/// Ring of signed machine integers. Has no `"/"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct IntRing<T>(PhantomData<T>);

impl<T> IntRing<T> {
    /// The canonical instance.
    pub const INSTANCE: Self = IntRing(PhantomData);
}

pub type I64Ring = IntRing<i64>;
pub type I32Ring = IntRing<i32>;

pub const I64_RING: I64Ring = IntRing::INSTANCE;
pub const I32_RING: I32Ring = IntRing::INSTANCE;

impl<T: PrimInt + Signed> Algebra for IntRing<T> {
    type Elem = T;

    fn name(&self) -> &'static str {
        "IntRing"
    }

    fn bind_symbol_or_none(&self, symbol: &str) -> Option<T> {
        ring_symbol(self, symbol)
    }

    fn unary_table(&self, op: UnaryOp) -> Option<UnaryFn<Self>> {
        group_unary_table::<Self>(op)
    }

    fn binary_table(&self, op: BinaryOp) -> Option<BinaryFn<Self>> {
        ring_binary_table::<Self>(op)
    }
}

impl<T: PrimInt + Signed> Group for IntRing<T> {
    fn zero(&self) -> T {
        T::zero()
    }

    fn add(&self, left: T, right: T) -> T {
        left + right
    }

    fn neg(&self, arg: T) -> T {
        -arg
    }
}

impl<T: PrimInt + Signed> Ring for IntRing<T> {
    fn one(&self) -> T {
        T::one()
    }

    fn multiply(&self, left: T, right: T) -> T {
        left * right
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AlgebraError;
    use approx::assert_relative_eq;

    #[test]
    fn test_real_binary_dispatch() {
        assert_eq!(F64_FIELD.binary_operation("+", 2.0, 3.0).unwrap(), 5.0);
        assert_eq!(F64_FIELD.binary_operation("-", 2.0, 3.0).unwrap(), -1.0);
        assert_eq!(F64_FIELD.binary_operation("*", 2.0, 3.0).unwrap(), 6.0);
        assert_eq!(F64_FIELD.binary_operation("/", 3.0, 2.0).unwrap(), 1.5);
    }

    #[test]
    fn test_real_unary_dispatch() {
        assert_eq!(F64_FIELD.unary_operation("-", 2.0).unwrap(), -2.0);
        assert_eq!(F64_FIELD.unary_operation("sqrt", 9.0).unwrap(), 3.0);
        assert_relative_eq!(F64_FIELD.unary_operation("exp", 0.0).unwrap(), 1.0);
        assert_relative_eq!(
            F64_FIELD.unary_operation("ln", std::f64::consts::E).unwrap(),
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_real_symbols() {
        assert_eq!(F64_FIELD.bind_symbol("pi").unwrap(), std::f64::consts::PI);
        assert_eq!(F32_FIELD.bind_symbol("one").unwrap(), 1.0f32);
        assert!(matches!(
            F64_FIELD.bind_symbol("x"),
            Err(AlgebraError::UnboundSymbol { .. })
        ));
    }

    #[test]
    fn test_real_scale_and_number() {
        assert_eq!(F64_FIELD.scale(3.0, 0.5), 1.5);
        assert_eq!(F32_FIELD.number(2.5), 2.5f32);
        assert_eq!(F64_FIELD.reciprocal(4.0), 0.25);
        assert_relative_eq!(F64_FIELD.power(2.0, 10.0), 1024.0);
    }

    #[test]
    fn test_int_ring_lacks_division() {
        assert_eq!(I64_RING.binary_operation("*", 6, 7).unwrap(), 42);
        let err = I64_RING.binary_operation("/", 6, 3).unwrap_err();
        assert_eq!(err.to_string(), "operation '/' is not defined in IntRing");
    }

    #[test]
    fn test_int_ring_default_sub() {
        assert_eq!(I32_RING.sub(3, 5), -2);
        assert_eq!(I32_RING.bind_symbol("zero").unwrap(), 0);
        assert!(I32_RING.unary_operation("sqrt", 4).is_err());
    }
}
