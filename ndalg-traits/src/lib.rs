//! Shared algebra traits for the ndalg ecosystem.
//!
//! This crate defines the element-level algebraic structures that the rest of
//! the workspace is generic over:
//!
//! - [`Algebra`]: base trait with named-operation dispatch and symbol binding
//! - [`Group`] ⊂ [`Ring`] ⊂ [`Field`]: capability levels
//! - [`ScaleOperations`], [`PowerOperations`], [`ExponentialOperations`]:
//!   optional capabilities
//!
//! Concrete algebras are zero-sized values: [`RealField`], [`IntRing`] and
//! [`ComplexField`]. External crates can implement the traits for their own
//! element types (quaternions, residue rings, ...) and use every container and
//! kernel in the workspace without further glue.
//!
//! # Named dispatch
//!
//! ```rust
//! use ndalg_traits::{Algebra, F64_FIELD, I64_RING};
//!
//! assert_eq!(F64_FIELD.binary_operation("/", 1.0, 4.0).unwrap(), 0.25);
//! assert!(I64_RING.binary_operation("/", 1, 4).is_err());
//! ```

mod algebra;
mod complex;
mod operation;
mod real;

pub use algebra::{
    exponential_unary_table, field_binary_table, group_binary_table, group_unary_table,
    power_unary_table, ring_binary_table, ring_symbol, Algebra, BinaryFn, ExponentialOperations,
    Field, Group, PowerOperations, Ring, ScaleOperations, UnaryFn,
};
pub use complex::{Complex32Field, Complex64Field, ComplexField, COMPLEX64_FIELD};
pub use operation::{BinaryOp, UnaryOp};
pub use real::{
    F32Field, F64Field, I32Ring, I64Ring, IntRing, RealField, F32_FIELD, F64_FIELD, I32_RING,
    I64_RING,
};

// ============================================================================
// Error types
// ============================================================================

/// Errors raised by named-operation dispatch and symbol binding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlgebraError {
    /// The operation name is unknown or not provided by this algebra.
    #[error("operation '{operation}' is not defined in {algebra}")]
    UnsupportedOperation {
        operation: String,
        algebra: &'static str,
    },

    /// The algebra cannot resolve a named constant.
    #[error("symbol '{symbol}' is not supported in {algebra}")]
    UnboundSymbol {
        symbol: String,
        algebra: &'static str,
    },
}

/// Result type for algebra dispatch.
pub type Result<T> = std::result::Result<T, AlgebraError>;
