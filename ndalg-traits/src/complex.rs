//! Field of complex numbers backed by `num_complex::Complex`.

use std::marker::PhantomData;

use num_complex::Complex;
use num_traits::{Float, FloatConst, FromPrimitive};

use crate::algebra::{
    exponential_unary_table, field_binary_table, group_unary_table, power_unary_table,
    ring_symbol, Algebra, BinaryFn, ExponentialOperations, Field, Group, PowerOperations, Ring,
    ScaleOperations, UnaryFn,
};
use crate::operation::{BinaryOp, UnaryOp};

/// Field of complex numbers over `f32` or `f64`.
///
/// Binds `"i"` in addition to the real-field symbols.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ComplexField<T>(PhantomData<T>);

impl<T> ComplexField<T> {
    /// The canonical instance.
    pub const INSTANCE: Self = ComplexField(PhantomData);
}

pub type Complex64Field = ComplexField<f64>;
pub type Complex32Field = ComplexField<f32>;

pub const COMPLEX64_FIELD: Complex64Field = ComplexField::INSTANCE;

impl<T: Float + FloatConst + FromPrimitive> Algebra for ComplexField<T> {
    type Elem = Complex<T>;

    fn name(&self) -> &'static str {
        "ComplexField"
    }

    fn bind_symbol_or_none(&self, symbol: &str) -> Option<Complex<T>> {
        match symbol {
            "i" => Some(Complex::i()),
            "pi" => Some(Complex::new(T::PI(), T::zero())),
            "e" => Some(Complex::new(T::E(), T::zero())),
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

impl<T: Float + FloatConst + FromPrimitive> Group for ComplexField<T> {
    fn zero(&self) -> Complex<T> {
        Complex::new(T::zero(), T::zero())
    }

    fn add(&self, left: Complex<T>, right: Complex<T>) -> Complex<T> {
        left + right
    }

    fn neg(&self, arg: Complex<T>) -> Complex<T> {
        -arg
    }

    fn sub(&self, left: Complex<T>, right: Complex<T>) -> Complex<T> {
        left - right
    }
}

impl<T: Float + FloatConst + FromPrimitive> Ring for ComplexField<T> {
    fn one(&self) -> Complex<T> {
        Complex::new(T::one(), T::zero())
    }

    fn multiply(&self, left: Complex<T>, right: Complex<T>) -> Complex<T> {
        left * right
    }
}

impl<T: Float + FloatConst + FromPrimitive> ScaleOperations for ComplexField<T> {
    fn scale(&self, arg: Complex<T>, value: f64) -> Complex<T> {
        arg.scale(T::from_f64(value).unwrap_or_else(T::nan))
    }
}

impl<T: Float + FloatConst + FromPrimitive> Field for ComplexField<T> {
    fn divide(&self, left: Complex<T>, right: Complex<T>) -> Complex<T> {
        left / right
    }
}

impl<T: Float + FloatConst + FromPrimitive> PowerOperations for ComplexField<T> {
    fn power(&self, arg: Complex<T>, pow: f64) -> Complex<T> {
        arg.powf(T::from_f64(pow).unwrap_or_else(T::nan))
    }

    fn sqrt(&self, arg: Complex<T>) -> Complex<T> {
        arg.sqrt()
    }
}

impl<T: Float + FloatConst + FromPrimitive> ExponentialOperations for ComplexField<T> {
    fn exp(&self, arg: Complex<T>) -> Complex<T> {
        arg.exp()
    }

    fn ln(&self, arg: Complex<T>) -> Complex<T> {
        arg.ln()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use num_complex::Complex64;

    #[test]
    fn test_complex_dispatch() {
        let a = Complex64::new(1.0, 2.0);
        let b = Complex64::new(3.0, -1.0);
        assert_eq!(COMPLEX64_FIELD.binary_operation("+", a, b).unwrap(), a + b);
        assert_eq!(COMPLEX64_FIELD.binary_operation("*", a, b).unwrap(), a * b);
        let q = COMPLEX64_FIELD.binary_operation("/", a * b, b).unwrap();
        assert_relative_eq!(q.re, a.re, epsilon = 1e-12);
        assert_relative_eq!(q.im, a.im, epsilon = 1e-12);
    }

    #[test]
    fn test_i_squared_is_minus_one() {
        let i = COMPLEX64_FIELD.bind_symbol("i").unwrap();
        assert_eq!(COMPLEX64_FIELD.multiply(i, i), Complex64::new(-1.0, 0.0));
    }

    #[test]
    fn test_complex_scale() {
        let a = Complex64::new(1.0, -2.0);
        assert_eq!(COMPLEX64_FIELD.scale(a, 2.0), Complex64::new(2.0, -4.0));
        assert_eq!(COMPLEX64_FIELD.number(3.0), Complex64::new(3.0, 0.0));
    }

    #[test]
    fn test_complex_exp_of_i_pi() {
        let i_pi = Complex64::new(0.0, std::f64::consts::PI);
        let z = COMPLEX64_FIELD.unary_operation("exp", i_pi).unwrap();
        assert_relative_eq!(z.re, -1.0, epsilon = 1e-12);
        assert_relative_eq!(z.im, 0.0, epsilon = 1e-12);
    }
}
