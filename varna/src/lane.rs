//! Lane element types.
//!
//! The set of scalar types a vector lane may hold is closed: 8/16/32-bit
//! signed and unsigned integers and `f32`. [`Lane`] is sealed so no other
//! crate can add to it.

use std::fmt::Debug;

mod sealed {
    pub trait Sealed {}
}

/// A scalar type that can occupy one lane of a vector.
pub trait Lane: sealed::Sealed + Copy + Default + Debug + PartialEq + Send + Sync + 'static {}

macro_rules! impl_lane {
    ($($ty:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}
            impl Lane for $ty {}
        )*
    };
}

impl_lane!(i8, u8, i16, u16, i32, u32, f32);
