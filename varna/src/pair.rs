//! Wide vectors composed from two half-width vectors.
//!
//! When a logical width exceeds what one native register holds, the vector is
//! a [`Pair`] of two half-width values and every operation applies the
//! half-width operation to both halves. Pairs nest: `F32x16` is
//! `Pair<Pair<F32x4>>`.
//!
//! ```text
//!   F32x8 lanes:  0 1 2 3 | 4 5 6 7
//!                 ───lo── | ───hi──
//! ```

use std::fmt::{self, Debug, Formatter};
use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Not, Shl, Shr, Sub};

use crate::backend::{F32x4, I32x4, U8x4, U16x8, U32x4};
use crate::vector::{
    Halves, Interleave4, LaneCast, RoundToInt, SaturatingAdd, SimdFloat, SimdVector,
};

/// Eight `f32` lanes.
pub type F32x8 = Pair<F32x4>;
/// Sixteen `f32` lanes.
pub type F32x16 = Pair<F32x8>;
/// Eight `i32` lanes.
pub type I32x8 = Pair<I32x4>;
/// Eight `u32` lanes.
pub type U32x8 = Pair<U32x4>;
/// Eight `u8` lanes.
pub type U8x8 = Pair<U8x4>;
/// Sixteen `u16` lanes.
pub type U16x16 = Pair<U16x8>;

/// Two half-width vectors acting as one vector of twice the lanes.
///
/// Lane `i` of the pair is lane `i` of `lo` for `i < H::LANES`, otherwise
/// lane `i - H::LANES` of `hi`.
#[derive(Clone, Copy, Default, PartialEq)]
#[repr(C)]
pub struct Pair<H> {
    /// Lanes `0 .. H::LANES`.
    pub lo: H,
    /// Lanes `H::LANES .. 2 * H::LANES`.
    pub hi: H,
}

impl<H> Pair<H> {
    /// Build from low and high halves.
    #[inline(always)]
    pub const fn new(lo: H, hi: H) -> Self {
        Self { lo, hi }
    }
}

impl<H: SimdVector> Debug for Pair<H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("Pair")?;
        f.debug_list()
            .entries((0..Self::LANES).map(|i| self.lane(i)))
            .finish()
    }
}

macro_rules! pair_binary_ops {
    ($($op:ident :: $method:ident),* $(,)?) => {
        $(
            impl<H: $op<Output = H>> $op for Pair<H> {
                type Output = Self;

                #[inline(always)]
                fn $method(self, rhs: Self) -> Self {
                    Self {
                        lo: self.lo.$method(rhs.lo),
                        hi: self.hi.$method(rhs.hi),
                    }
                }
            }
        )*
    };
}

pair_binary_ops!(
    Add::add,
    Sub::sub,
    Mul::mul,
    Div::div,
    BitAnd::bitand,
    BitOr::bitor,
    BitXor::bitxor,
);

impl<H: Not<Output = H>> Not for Pair<H> {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        Self {
            lo: !self.lo,
            hi: !self.hi,
        }
    }
}

impl<H: Shl<u32, Output = H>> Shl<u32> for Pair<H> {
    type Output = Self;

    #[inline(always)]
    fn shl(self, bits: u32) -> Self {
        Self {
            lo: self.lo << bits,
            hi: self.hi << bits,
        }
    }
}

impl<H: Shr<u32, Output = H>> Shr<u32> for Pair<H> {
    type Output = Self;

    #[inline(always)]
    fn shr(self, bits: u32) -> Self {
        Self {
            lo: self.lo >> bits,
            hi: self.hi >> bits,
        }
    }
}

impl<H: SimdVector> SimdVector for Pair<H> {
    type Lane = H::Lane;
    const LANES: usize = 2 * H::LANES;

    #[inline(always)]
    fn splat(value: H::Lane) -> Self {
        Self {
            lo: H::splat(value),
            hi: H::splat(value),
        }
    }

    #[inline(always)]
    unsafe fn load(ptr: *const u8) -> Self {
        // SAFETY: the caller guarantees 2 * H::BYTES readable bytes.
        unsafe {
            Self {
                lo: H::load(ptr),
                hi: H::load(ptr.add(H::BYTES)),
            }
        }
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut u8) {
        // SAFETY: the caller guarantees 2 * H::BYTES writable bytes.
        unsafe {
            self.lo.store(ptr);
            self.hi.store(ptr.add(H::BYTES));
        }
    }

    #[inline(always)]
    fn lane(self, index: usize) -> H::Lane {
        debug_assert!(
            index < Self::LANES,
            "lane {index} out of range for {} lanes",
            Self::LANES
        );
        let index = index & (Self::LANES - 1);
        if index < H::LANES {
            self.lo.lane(index)
        } else {
            self.hi.lane(index - H::LANES)
        }
    }

    #[inline(always)]
    fn simd_eq(self, other: Self) -> Self {
        Self::new(self.lo.simd_eq(other.lo), self.hi.simd_eq(other.hi))
    }

    #[inline(always)]
    fn simd_ne(self, other: Self) -> Self {
        Self::new(self.lo.simd_ne(other.lo), self.hi.simd_ne(other.hi))
    }

    #[inline(always)]
    fn simd_lt(self, other: Self) -> Self {
        Self::new(self.lo.simd_lt(other.lo), self.hi.simd_lt(other.hi))
    }

    #[inline(always)]
    fn simd_le(self, other: Self) -> Self {
        Self::new(self.lo.simd_le(other.lo), self.hi.simd_le(other.hi))
    }

    #[inline(always)]
    fn simd_gt(self, other: Self) -> Self {
        Self::new(self.lo.simd_gt(other.lo), self.hi.simd_gt(other.hi))
    }

    #[inline(always)]
    fn simd_ge(self, other: Self) -> Self {
        Self::new(self.lo.simd_ge(other.lo), self.hi.simd_ge(other.hi))
    }

    #[inline(always)]
    fn min(self, other: Self) -> Self {
        Self::new(self.lo.min(other.lo), self.hi.min(other.hi))
    }

    #[inline(always)]
    fn max(self, other: Self) -> Self {
        Self::new(self.lo.max(other.lo), self.hi.max(other.hi))
    }

    #[inline(always)]
    fn then_else(self, when_true: Self, when_false: Self) -> Self {
        Self::new(
            self.lo.then_else(when_true.lo, when_false.lo),
            self.hi.then_else(when_true.hi, when_false.hi),
        )
    }

    #[inline(always)]
    fn all_true(self) -> bool {
        self.lo.all_true() && self.hi.all_true()
    }

    #[inline(always)]
    fn any_true(self) -> bool {
        self.lo.any_true() || self.hi.any_true()
    }
}

impl<H: SimdFloat> SimdFloat for Pair<H> {
    type Bits = Pair<H::Bits>;

    #[inline(always)]
    fn sqrt(self) -> Self {
        Self::new(self.lo.sqrt(), self.hi.sqrt())
    }

    #[inline(always)]
    fn rsqrt(self) -> Self {
        Self::new(self.lo.rsqrt(), self.hi.rsqrt())
    }

    #[inline(always)]
    fn invert(self) -> Self {
        Self::new(self.lo.invert(), self.hi.invert())
    }

    #[inline(always)]
    fn floor(self) -> Self {
        Self::new(self.lo.floor(), self.hi.floor())
    }

    #[inline(always)]
    fn abs(self) -> Self {
        Self::new(self.lo.abs(), self.hi.abs())
    }

    #[inline(always)]
    fn to_bits(self) -> Self::Bits {
        Pair::new(self.lo.to_bits(), self.hi.to_bits())
    }

    #[inline(always)]
    fn from_bits(bits: Self::Bits) -> Self {
        Self::new(H::from_bits(bits.lo), H::from_bits(bits.hi))
    }

    /// Applies the half-width multiply-add to each half.
    #[inline(always)]
    fn mul_add(self, a: Self, b: Self) -> Self {
        Self::new(self.lo.mul_add(a.lo, b.lo), self.hi.mul_add(a.hi, b.hi))
    }

    #[inline(always)]
    fn neg_mul_add(self, a: Self, b: Self) -> Self {
        Self::new(
            self.lo.neg_mul_add(a.lo, b.lo),
            self.hi.neg_mul_add(a.hi, b.hi),
        )
    }
}

impl<H: RoundToInt> RoundToInt for Pair<H> {
    type Int = Pair<H::Int>;

    #[inline(always)]
    fn round(self) -> Self::Int {
        Pair::new(self.lo.round(), self.hi.round())
    }
}

impl<H: SaturatingAdd> SaturatingAdd for Pair<H> {
    #[inline(always)]
    fn saturating_add(self, other: Self) -> Self {
        Self::new(
            self.lo.saturating_add(other.lo),
            self.hi.saturating_add(other.hi),
        )
    }
}

impl<H: SimdVector> Halves for Pair<H> {
    type Half = H;

    #[inline(always)]
    fn split(self) -> (H, H) {
        (self.lo, self.hi)
    }

    #[inline(always)]
    fn join(lo: H, hi: H) -> Self {
        Self::new(lo, hi)
    }
}

impl<H: Interleave4> Interleave4 for Pair<H> {
    /// The first `H::LANES` tuples fill the low halves, the rest the high halves.
    #[inline(always)]
    unsafe fn load4_raw(ptr: *const u8) -> (Self, Self, Self, Self) {
        // SAFETY: the caller guarantees 8 * H::BYTES readable bytes.
        let ((r0, g0, b0, a0), (r1, g1, b1, a1)) =
            unsafe { (H::load4_raw(ptr), H::load4_raw(ptr.add(4 * H::BYTES))) };
        (
            Self::new(r0, r1),
            Self::new(g0, g1),
            Self::new(b0, b1),
            Self::new(a0, a1),
        )
    }

    #[inline(always)]
    unsafe fn store4_raw(ptr: *mut u8, c0: Self, c1: Self, c2: Self, c3: Self) {
        // SAFETY: the caller guarantees 8 * H::BYTES writable bytes.
        unsafe {
            H::store4_raw(ptr, c0.lo, c1.lo, c2.lo, c3.lo);
            H::store4_raw(ptr.add(4 * H::BYTES), c0.hi, c1.hi, c2.hi, c3.hi);
        }
    }
}

impl<A, B> LaneCast<Pair<B>> for Pair<A>
where
    A: LaneCast<B>,
{
    #[inline(always)]
    fn cast(self) -> Pair<B> {
        Pair::new(self.lo.cast(), self.hi.cast())
    }
}

macro_rules! pair_arrays {
    ($($name:ident: $lane:ty, $lanes:literal;)*) => {
        $(
            impl $name {
                /// Build from one scalar per lane, in lane order.
                #[inline(always)]
                pub fn from_array(lanes: [$lane; $lanes]) -> Self {
                    Self::from_slice(&lanes)
                }

                /// Copy every lane out, in lane order.
                #[inline(always)]
                pub fn to_array(self) -> [$lane; $lanes] {
                    let mut out = [<$lane>::default(); $lanes];
                    self.write_to_slice(&mut out);
                    out
                }
            }

            impl From<[$lane; $lanes]> for $name {
                #[inline(always)]
                fn from(lanes: [$lane; $lanes]) -> Self {
                    Self::from_array(lanes)
                }
            }

            impl From<$name> for [$lane; $lanes] {
                #[inline(always)]
                fn from(v: $name) -> Self {
                    v.to_array()
                }
            }
        )*
    };
}

pair_arrays! {
    F32x8: f32, 8;
    F32x16: f32, 16;
    I32x8: i32, 8;
    U32x8: u32, 8;
    U8x8: u8, 8;
    U16x16: u16, 16;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_order() {
        let v = F32x8::from_array([0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(v.lo.to_array(), [0.0, 1.0, 2.0, 3.0]);
        assert_eq!(v.hi.to_array(), [4.0, 5.0, 6.0, 7.0]);
        for i in 0..8 {
            assert_eq!(v.lane(i), i as f32);
        }
    }

    #[test]
    fn test_nested_lane_order() {
        let lanes: [f32; 16] = std::array::from_fn(|i| i as f32);
        let v = F32x16::from_array(lanes);
        assert_eq!(v.hi.lo.to_array(), [8.0, 9.0, 10.0, 11.0]);
        assert_eq!(v.to_array(), lanes);
    }

    #[test]
    fn test_ops_apply_to_both_halves() {
        let a = I32x8::from_array([1, 2, 3, 4, 5, 6, 7, 8]);
        let b = I32x8::splat(10);
        assert_eq!((a + b).to_array(), [11, 12, 13, 14, 15, 16, 17, 18]);
        assert_eq!((b - a).to_array(), [9, 8, 7, 6, 5, 4, 3, 2]);
        assert_eq!((a << 1).to_array(), [2, 4, 6, 8, 10, 12, 14, 16]);
    }

    #[test]
    fn test_mask_reductions_span_halves() {
        let a = U32x8::from_array([0, 0, 0, 0, 0, 0, 0, 9]);
        let mask = a.simd_eq(U32x8::splat(9));
        assert!(mask.any_true());
        assert!(!mask.all_true());
        assert!(a.simd_eq(a).all_true());
    }

    #[test]
    fn test_float_ne_is_unordered() {
        let a = F32x8::splat(f32::NAN);
        assert!(a.simd_ne(a).all_true());
        assert!(!a.simd_le(a).any_true());
        assert!(!a.simd_ge(a).any_true());
    }

    #[test]
    fn test_split_join() {
        let v = U8x8::from_array([1, 2, 3, 4, 5, 6, 7, 8]);
        let (lo, hi) = v.split();
        assert_eq!(lo.to_array(), [1, 2, 3, 4]);
        assert_eq!(hi.to_array(), [5, 6, 7, 8]);
        assert_eq!(U8x8::join(lo, hi), v);
    }

    #[test]
    fn test_mul_add_per_half() {
        let a = F32x8::from_array([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let r = a.mul_add(F32x8::splat(2.0), F32x8::splat(10.0));
        assert_eq!(
            r.to_array(),
            [12.0, 14.0, 16.0, 18.0, 20.0, 22.0, 24.0, 26.0]
        );
    }

    #[test]
    fn test_debug_lists_lanes() {
        let v = U8x8::from_array([1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(format!("{v:?}"), "Pair[1, 2, 3, 4, 5, 6, 7, 8]");
    }

    #[test]
    fn test_pair_cast() {
        let f = F32x8::from_array([1.5, -2.5, 3.99, -0.001, 100.0, 0.0, 7.9, -7.9]);
        let i: I32x8 = f.cast();
        assert_eq!(i.to_array(), [1, -2, 3, 0, 100, 0, 7, -7]);
    }
}
