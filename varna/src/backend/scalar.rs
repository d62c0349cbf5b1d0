//! Portable array-backed backend.
//!
//! Every native type wraps a plain array with register-sized alignment and
//! every operation is a per-lane loop. LLVM auto-vectorizes most of them on
//! targets with a vector unit (NEON, SIMD128), and the results are
//! bit-identical to the SSE backend for all pinned edge cases:
//!
//! | Edge case                         | Result                     |
//! |-----------------------------------|----------------------------|
//! | float `min`/`max` with NaN        | second operand             |
//! | f32 → i32 of NaN / out of range   | `i32::MIN`                 |
//! | shift count ≥ lane width          | 0, or sign fill for `>>` on signed |
//! | `round` ties                      | to even                    |
//!
//! `rsqrt` and `invert` are exact here; the SSE versions are approximate.

use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Not, Shl, Shr, Sub};
use std::ptr;

use crate::pair::{F32x16, U8x8};
use crate::vector::{
    Halves, Interleave4, LaneCast, RoundToInt, SaturatingAdd, SimdFloat, SimdVector,
};

macro_rules! scalar_vector {
    ($(#[$meta:meta])* $name:ident: [$lane:ty; $lanes:literal], align = $align:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq)]
        #[repr(C, align($align))]
        pub struct $name([$lane; $lanes]);

        impl $name {
            /// Build from one scalar per lane, in lane order.
            #[inline(always)]
            pub const fn from_array(lanes: [$lane; $lanes]) -> Self {
                Self(lanes)
            }

            /// Copy every lane out, in lane order.
            #[inline(always)]
            pub const fn to_array(self) -> [$lane; $lanes] {
                self.0
            }

            #[inline(always)]
            fn map(self, f: impl Fn($lane) -> $lane) -> Self {
                Self(self.0.map(f))
            }

            #[inline(always)]
            fn zip(self, other: Self, f: impl Fn($lane, $lane) -> $lane) -> Self {
                Self(std::array::from_fn(|i| f(self.0[i], other.0[i])))
            }
        }

        impl From<[$lane; $lanes]> for $name {
            #[inline(always)]
            fn from(lanes: [$lane; $lanes]) -> Self {
                Self(lanes)
            }
        }

        impl From<$name> for [$lane; $lanes] {
            #[inline(always)]
            fn from(v: $name) -> Self {
                v.0
            }
        }
    };
}

/// Memory, lane access and select: identical for every lane type once the
/// per-lane bit operations are known.
macro_rules! scalar_memory {
    ($name:ident, $lane:ty, $lanes:literal) => {
        type Lane = $lane;
        const LANES: usize = $lanes;

        #[inline(always)]
        fn splat(value: $lane) -> Self {
            Self([value; $lanes])
        }

        #[inline(always)]
        unsafe fn load(ptr: *const u8) -> Self {
            // SAFETY: the caller guarantees BYTES readable bytes.
            Self(unsafe { ptr::read_unaligned(ptr.cast::<[$lane; $lanes]>()) })
        }

        #[inline(always)]
        unsafe fn store(self, ptr: *mut u8) {
            // SAFETY: the caller guarantees BYTES writable bytes.
            unsafe { ptr::write_unaligned(ptr.cast::<[$lane; $lanes]>(), self.0) }
        }

        #[inline(always)]
        fn lane(self, index: usize) -> $lane {
            debug_assert!(
                index < $lanes,
                "lane {index} out of range for {}",
                stringify!($name)
            );
            self.0[index & ($lanes - 1)]
        }

        #[inline(always)]
        fn then_else(self, when_true: Self, when_false: Self) -> Self {
            (self & when_true) | (!self & when_false)
        }
    };
}

macro_rules! scalar_int {
    ($(#[$meta:meta])* $name:ident: [$lane:ty; $lanes:literal], align = $align:literal, shr = $shr:expr) => {
        scalar_vector!($(#[$meta])* $name: [$lane; $lanes], align = $align);

        impl Add for $name {
            type Output = Self;
            #[inline(always)]
            fn add(self, rhs: Self) -> Self {
                self.zip(rhs, <$lane>::wrapping_add)
            }
        }

        impl Sub for $name {
            type Output = Self;
            #[inline(always)]
            fn sub(self, rhs: Self) -> Self {
                self.zip(rhs, <$lane>::wrapping_sub)
            }
        }

        impl BitAnd for $name {
            type Output = Self;
            #[inline(always)]
            fn bitand(self, rhs: Self) -> Self {
                self.zip(rhs, |a, b| a & b)
            }
        }

        impl BitOr for $name {
            type Output = Self;
            #[inline(always)]
            fn bitor(self, rhs: Self) -> Self {
                self.zip(rhs, |a, b| a | b)
            }
        }

        impl BitXor for $name {
            type Output = Self;
            #[inline(always)]
            fn bitxor(self, rhs: Self) -> Self {
                self.zip(rhs, |a, b| a ^ b)
            }
        }

        impl Not for $name {
            type Output = Self;
            #[inline(always)]
            fn not(self) -> Self {
                self.map(|a| !a)
            }
        }

        impl Shl<u32> for $name {
            type Output = Self;
            #[inline(always)]
            fn shl(self, bits: u32) -> Self {
                self.map(|a| a.checked_shl(bits).unwrap_or(0))
            }
        }

        impl Shr<u32> for $name {
            type Output = Self;
            #[inline(always)]
            fn shr(self, bits: u32) -> Self {
                self.map(|a| ($shr)(a, bits))
            }
        }

        impl SimdVector for $name {
            scalar_memory!($name, $lane, $lanes);

            #[inline(always)]
            fn simd_eq(self, other: Self) -> Self {
                self.zip(other, |a, b| if a == b { !0 } else { 0 })
            }

            #[inline(always)]
            fn simd_lt(self, other: Self) -> Self {
                self.zip(other, |a, b| if a < b { !0 } else { 0 })
            }

            #[inline(always)]
            fn simd_gt(self, other: Self) -> Self {
                self.zip(other, |a, b| if a > b { !0 } else { 0 })
            }

            #[inline(always)]
            fn min(self, other: Self) -> Self {
                self.zip(other, <$lane as Ord>::min)
            }

            #[inline(always)]
            fn max(self, other: Self) -> Self {
                self.zip(other, <$lane as Ord>::max)
            }

            #[inline(always)]
            fn all_true(self) -> bool {
                self.0.iter().all(|&a| a == !0)
            }

            #[inline(always)]
            fn any_true(self) -> bool {
                self.0.iter().any(|&a| a != 0)
            }
        }
    };
}

#[inline(always)]
fn fmask(cond: bool) -> f32 {
    f32::from_bits(if cond { u32::MAX } else { 0 })
}

#[inline(always)]
fn fbits(a: f32, b: f32, f: impl Fn(u32, u32) -> u32) -> f32 {
    f32::from_bits(f(a.to_bits(), b.to_bits()))
}

macro_rules! scalar_float {
    ($(#[$meta:meta])* $name:ident: [f32; $lanes:literal], align = $align:literal) => {
        scalar_vector!($(#[$meta])* $name: [f32; $lanes], align = $align);

        impl Add for $name {
            type Output = Self;
            #[inline(always)]
            fn add(self, rhs: Self) -> Self {
                self.zip(rhs, |a, b| a + b)
            }
        }

        impl Sub for $name {
            type Output = Self;
            #[inline(always)]
            fn sub(self, rhs: Self) -> Self {
                self.zip(rhs, |a, b| a - b)
            }
        }

        impl Mul for $name {
            type Output = Self;
            #[inline(always)]
            fn mul(self, rhs: Self) -> Self {
                self.zip(rhs, |a, b| a * b)
            }
        }

        impl Div for $name {
            type Output = Self;
            #[inline(always)]
            fn div(self, rhs: Self) -> Self {
                self.zip(rhs, |a, b| a / b)
            }
        }

        impl BitAnd for $name {
            type Output = Self;
            #[inline(always)]
            fn bitand(self, rhs: Self) -> Self {
                self.zip(rhs, |a, b| fbits(a, b, |x, y| x & y))
            }
        }

        impl BitOr for $name {
            type Output = Self;
            #[inline(always)]
            fn bitor(self, rhs: Self) -> Self {
                self.zip(rhs, |a, b| fbits(a, b, |x, y| x | y))
            }
        }

        impl BitXor for $name {
            type Output = Self;
            #[inline(always)]
            fn bitxor(self, rhs: Self) -> Self {
                self.zip(rhs, |a, b| fbits(a, b, |x, y| x ^ y))
            }
        }

        impl Not for $name {
            type Output = Self;
            #[inline(always)]
            fn not(self) -> Self {
                self.map(|a| f32::from_bits(!a.to_bits()))
            }
        }

        impl SimdVector for $name {
            scalar_memory!($name, f32, $lanes);

            #[inline(always)]
            fn simd_eq(self, other: Self) -> Self {
                self.zip(other, |a, b| fmask(a == b))
            }

            #[inline(always)]
            fn simd_ne(self, other: Self) -> Self {
                self.zip(other, |a, b| fmask(a != b))
            }

            #[inline(always)]
            fn simd_lt(self, other: Self) -> Self {
                self.zip(other, |a, b| fmask(a < b))
            }

            #[inline(always)]
            fn simd_le(self, other: Self) -> Self {
                self.zip(other, |a, b| fmask(a <= b))
            }

            #[inline(always)]
            fn simd_gt(self, other: Self) -> Self {
                self.zip(other, |a, b| fmask(a > b))
            }

            #[inline(always)]
            fn simd_ge(self, other: Self) -> Self {
                self.zip(other, |a, b| fmask(a >= b))
            }

            // minps/maxps: the second operand wins unless the comparison holds.
            #[inline(always)]
            fn min(self, other: Self) -> Self {
                self.zip(other, |a, b| if a < b { a } else { b })
            }

            #[inline(always)]
            fn max(self, other: Self) -> Self {
                self.zip(other, |a, b| if a > b { a } else { b })
            }

            #[inline(always)]
            fn all_true(self) -> bool {
                self.0.iter().all(|a| a.to_bits() == u32::MAX)
            }

            #[inline(always)]
            fn any_true(self) -> bool {
                self.0.iter().any(|a| a.to_bits() != 0)
            }
        }
    };
}

scalar_float!(
    /// Two `f32` lanes.
    F32x2: [f32; 2], align = 8
);
scalar_float!(
    /// Four `f32` lanes.
    F32x4: [f32; 4], align = 16
);
scalar_int!(
    /// Four `i32` lanes.
    I32x4: [i32; 4], align = 16, shr = |a: i32, bits: u32| a >> bits.min(31)
);
scalar_int!(
    /// Four `u32` lanes.
    U32x4: [u32; 4], align = 16, shr = |a: u32, bits: u32| a.checked_shr(bits).unwrap_or(0)
);
scalar_int!(
    /// Four `i16` lanes.
    I16x4: [i16; 4], align = 8, shr = |a: i16, bits: u32| a >> bits.min(15)
);
scalar_int!(
    /// Four `u16` lanes.
    U16x4: [u16; 4], align = 8, shr = |a: u16, bits: u32| a.checked_shr(bits).unwrap_or(0)
);
scalar_int!(
    /// Eight `i16` lanes.
    I16x8: [i16; 8], align = 16, shr = |a: i16, bits: u32| a >> bits.min(15)
);
scalar_int!(
    /// Eight `u16` lanes.
    U16x8: [u16; 8], align = 16, shr = |a: u16, bits: u32| a.checked_shr(bits).unwrap_or(0)
);
scalar_int!(
    /// Four `u8` lanes.
    U8x4: [u8; 4], align = 4, shr = |a: u8, bits: u32| a.checked_shr(bits).unwrap_or(0)
);
scalar_int!(
    /// Sixteen `u8` lanes.
    U8x16: [u8; 16], align = 16, shr = |a: u8, bits: u32| a.checked_shr(bits).unwrap_or(0)
);
scalar_int!(
    /// Sixteen `i8` lanes.
    I8x16: [i8; 16], align = 16, shr = |a: i8, bits: u32| a >> bits.min(7)
);

lane_ctor! {
    F32x2: f32 => (a, b);
    F32x4: f32 => (a, b, c, d);
    I32x4: i32 => (a, b, c, d);
    U32x4: u32 => (a, b, c, d);
    I16x4: i16 => (a, b, c, d);
    U16x4: u16 => (a, b, c, d);
    U8x4: u8 => (a, b, c, d);
}

macro_rules! scalar_mul {
    ($($name:ident: $lane:ty),*) => {
        $(
            impl Mul for $name {
                type Output = Self;
                #[inline(always)]
                fn mul(self, rhs: Self) -> Self {
                    self.zip(rhs, <$lane>::wrapping_mul)
                }
            }
        )*
    };
}

scalar_mul!(I32x4: i32, I16x4: i16, I16x8: i16, U16x4: u16, U16x8: u16);

macro_rules! scalar_saturating_add {
    ($($name:ident: $lane:ty),*) => {
        $(
            impl SaturatingAdd for $name {
                #[inline(always)]
                fn saturating_add(self, other: Self) -> Self {
                    self.zip(other, <$lane>::saturating_add)
                }
            }
        )*
    };
}

scalar_saturating_add!(U8x4: u8, U8x16: u8, U16x4: u16, U16x8: u16);

impl F32x2 {
    /// Exact square root.
    #[inline(always)]
    pub fn sqrt(self) -> Self {
        self.map(f32::sqrt)
    }

    /// `1 / sqrt(x)`.
    #[inline(always)]
    pub fn rsqrt(self) -> Self {
        self.map(|a| 1.0 / a.sqrt())
    }

    /// `1 / x`.
    #[inline(always)]
    pub fn invert(self) -> Self {
        self.map(|a| 1.0 / a)
    }
}

impl SimdFloat for F32x4 {
    type Bits = U32x4;

    #[inline(always)]
    fn sqrt(self) -> Self {
        self.map(f32::sqrt)
    }

    #[inline(always)]
    fn rsqrt(self) -> Self {
        self.map(|a| 1.0 / a.sqrt())
    }

    #[inline(always)]
    fn invert(self) -> Self {
        self.map(|a| 1.0 / a)
    }

    #[inline(always)]
    fn floor(self) -> Self {
        self.map(f32::floor)
    }

    #[inline(always)]
    fn abs(self) -> Self {
        self.map(|a| f32::from_bits(a.to_bits() & 0x7fff_ffff))
    }

    #[inline(always)]
    fn to_bits(self) -> U32x4 {
        U32x4(self.0.map(f32::to_bits))
    }

    #[inline(always)]
    fn from_bits(bits: U32x4) -> Self {
        Self(bits.0.map(f32::from_bits))
    }
}

impl RoundToInt for F32x4 {
    type Int = I32x4;

    #[inline(always)]
    fn round(self) -> I32x4 {
        I32x4(self.0.map(|a| trunc_i32(a.round_ties_even())))
    }
}

impl Halves for F32x4 {
    type Half = F32x2;

    #[inline(always)]
    fn split(self) -> (F32x2, F32x2) {
        let [a, b, c, d] = self.0;
        (F32x2([a, b]), F32x2([c, d]))
    }

    #[inline(always)]
    fn join(lo: F32x2, hi: F32x2) -> Self {
        let ([a, b], [c, d]) = (lo.0, hi.0);
        Self([a, b, c, d])
    }
}

macro_rules! scalar_halves {
    ($($name:ident => $half:ident, $half_lanes:literal;)*) => {
        $(
            impl Halves for $name {
                type Half = $half;

                #[inline(always)]
                fn split(self) -> ($half, $half) {
                    (
                        $half(std::array::from_fn(|i| self.0[i])),
                        $half(std::array::from_fn(|i| self.0[i + $half_lanes])),
                    )
                }

                #[inline(always)]
                fn join(lo: $half, hi: $half) -> Self {
                    Self(std::array::from_fn(|i| {
                        if i < $half_lanes {
                            lo.0[i]
                        } else {
                            hi.0[i - $half_lanes]
                        }
                    }))
                }
            }
        )*
    };
}

scalar_halves! {
    U16x8 => U16x4, 4;
    I16x8 => I16x4, 4;
}

impl Halves for U8x16 {
    type Half = U8x8;

    #[inline(always)]
    fn split(self) -> (U8x8, U8x8) {
        (U8x8::from_slice(&self.0[..8]), U8x8::from_slice(&self.0[8..]))
    }

    #[inline(always)]
    fn join(lo: U8x8, hi: U8x8) -> Self {
        let mut out = [0u8; 16];
        lo.write_to_slice(&mut out[..8]);
        hi.write_to_slice(&mut out[8..]);
        Self(out)
    }
}

macro_rules! scalar_interleave4 {
    ($($name:ident: [$lane:ty; $lanes:literal]),*) => {
        $(
            impl Interleave4 for $name {
                unsafe fn load4_raw(ptr: *const u8) -> (Self, Self, Self, Self) {
                    // SAFETY: the caller guarantees 4 * BYTES readable bytes.
                    let src: [[$lane; 4]; $lanes] = unsafe { ptr::read_unaligned(ptr.cast()) };
                    let channel = |c: usize| Self(std::array::from_fn(|i| src[i][c]));
                    (channel(0), channel(1), channel(2), channel(3))
                }

                unsafe fn store4_raw(ptr: *mut u8, c0: Self, c1: Self, c2: Self, c3: Self) {
                    let dst: [[$lane; 4]; $lanes] =
                        std::array::from_fn(|i| [c0.0[i], c1.0[i], c2.0[i], c3.0[i]]);
                    // SAFETY: the caller guarantees 4 * BYTES writable bytes.
                    unsafe { ptr::write_unaligned(ptr.cast(), dst) }
                }
            }
        )*
    };
}

scalar_interleave4!(F32x4: [f32; 4], U16x4: [u16; 4], U16x8: [u16; 8], U8x16: [u8; 16]);

/// Truncate toward zero; NaN and out-of-range values become `i32::MIN`.
#[inline(always)]
fn trunc_i32(a: f32) -> i32 {
    if (-2_147_483_648.0..2_147_483_648.0).contains(&a) {
        a as i32
    } else {
        i32::MIN
    }
}

#[inline(always)]
fn sat_u8(a: i32) -> u8 {
    a.clamp(0, u8::MAX as i32) as u8
}

#[inline(always)]
fn sat_u16(a: i32) -> u16 {
    a.clamp(0, u16::MAX as i32) as u16
}

#[inline(always)]
fn sat_i16(a: i32) -> i16 {
    a.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

macro_rules! scalar_casts {
    ($($src:ident => $dst:ident: $f:expr;)*) => {
        $(
            impl LaneCast<$dst> for $src {
                #[inline(always)]
                fn cast(self) -> $dst {
                    $dst(self.0.map($f))
                }
            }
        )*
    };
}

scalar_casts! {
    I32x4 => F32x4: |a| a as f32;
    U32x4 => F32x4: |a| a as f32;
    F32x4 => I32x4: trunc_i32;
    I32x4 => U32x4: |a| a as u32;
    U32x4 => I32x4: |a| a as i32;
    I32x4 => U16x4: sat_u16;
    I32x4 => I16x4: sat_i16;
    I32x4 => U8x4: sat_u8;
    I16x4 => I32x4: i32::from;
    U16x4 => I32x4: i32::from;
    U8x4 => I32x4: i32::from;
    U8x4 => U16x4: u16::from;
    U16x4 => U8x4: |a| a.min(u8::MAX as u16) as u8;
    U16x4 => F32x4: f32::from;
    U8x4 => F32x4: f32::from;
    F32x4 => U16x4: |a| sat_u16(trunc_i32(a));
    F32x4 => U8x4: |a| sat_u8(trunc_i32(a));
}

impl LaneCast<U8x16> for F32x16 {
    #[inline(always)]
    fn cast(self) -> U8x16 {
        let mut lanes = [0.0f32; 16];
        self.write_to_slice(&mut lanes);
        U8x16(lanes.map(|a| sat_u8(trunc_i32(a))))
    }
}

impl LaneCast<F32x16> for U8x16 {
    #[inline(always)]
    fn cast(self) -> F32x16 {
        F32x16::from_array(self.0.map(f32::from))
    }
}
