//! Thread-safety bounds that only bite when kernels can run on rayon.
//!
//! With the `parallel` feature, [`MaybeSend`], [`MaybeSync`] and
//! [`MaybeSendSync`] require the real `Send`/`Sync`. Without it they hold for
//! every type, so element types such as `Rc`-backed values still work with the
//! sequential kernels.

#[cfg(feature = "parallel")]
mod bounds {
    pub trait MaybeSend: Send {}
    impl<T: Send + ?Sized> MaybeSend for T {}

    pub trait MaybeSync: Sync {}
    impl<T: Sync + ?Sized> MaybeSync for T {}

    pub trait MaybeSendSync: Send + Sync {}
    impl<T: Send + Sync + ?Sized> MaybeSendSync for T {}
}

#[cfg(not(feature = "parallel"))]
mod bounds {
    pub trait MaybeSend {}
    impl<T: ?Sized> MaybeSend for T {}

    pub trait MaybeSync {}
    impl<T: ?Sized> MaybeSync for T {}

    pub trait MaybeSendSync {}
    impl<T: ?Sized> MaybeSendSync for T {}
}

pub use bounds::{MaybeSend, MaybeSendSync, MaybeSync};

#[cfg(test)]
mod tests {
    use super::*;
    use ndalg_traits::F64Field;

    fn assert_send_sync<T: MaybeSendSync>() {}
    fn assert_send<T: MaybeSend>() {}
    fn assert_sync<T: MaybeSync>() {}

    #[test]
    fn test_numeric_types_and_algebras_qualify() {
        assert_send_sync::<f64>();
        assert_send_sync::<F64Field>();
        assert_send::<Vec<i64>>();
        assert_sync::<num_complex::Complex64>();
    }

    #[cfg(not(feature = "parallel"))]
    #[test]
    fn test_rc_qualifies_without_parallel() {
        use std::rc::Rc;
        assert_send_sync::<Rc<f64>>();
    }
}
