//! x86 SSE backend.
//!
//! Every native type wraps one XMM register. Types narrower than 128 bits
//! (`F32x2`, `U8x4`, `I16x4`, `U16x4`) live in the low bytes; their upper
//! lanes are never observable: loads and stores touch only the used bytes,
//! reductions mask them out, and every layout converter reads the low lanes
//! only.
//!
//! # Instruction mapping
//!
//! | Operation               | SSE2                        | SSE4.1 / SSSE3     |
//! |-------------------------|-----------------------------|--------------------|
//! | `then_else`             | `and` / `andnot` / `or`     | `blendv`           |
//! | `F32x4::floor`          | `cvttps` round trip, fix up | `roundps`          |
//! | `I32x4 * I32x4`         | 2 x `pmuludq` + shuffles    | `pmulld`           |
//! | `I32x4::min`            | `pcmpgtd` + select          | `pminsd`           |
//! | `U16x8::min`            | sign flip + `pminsw`        | `pminuw`           |
//! | `I8x16::min`            | sign flip + `pminub`        | `pminsb`           |
//! | `U8x4` → `I32x4`        | 2 x `punpckl` with zero     | `pshufb` (SSSE3)   |
//! | `I32x4` → `U16x4`       | clamp + `packssdw`          | `packusdw`         |
//!
//! # Unsigned ordering
//!
//! SSE2 only compares signed integers. Unsigned `<` / `>` flip the sign bit of
//! both operands first (`x ^ 0x80`, `x ^ 0x8000`, `x ^ 0x8000_0000`), which
//! maps unsigned order onto signed order.
//!
//! # Pinned numeric behavior
//!
//! - `min` / `max` on floats are `minps` / `maxps`: the second operand is
//!   returned when either lane is NaN.
//! - f32 → i32 truncation of NaN or out-of-range values gives `i32::MIN`.
//! - `round` uses the MXCSR rounding mode, which is round-to-nearest-even
//!   unless the caller changed it.
//! - `rsqrt` / `invert` are the ~12-bit `rsqrtps` / `rcpps` estimates.

#![allow(unused_unsafe)]

#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;
use std::fmt::{self, Debug, Formatter};
use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Not, Shl, Shr, Sub};
use std::ptr;

use crate::pair::{F32x16, Pair, U8x8};
use crate::vector::{
    Halves, Interleave4, LaneCast, RoundToInt, SaturatingAdd, SimdFloat, SimdVector,
};

// ============================================================================
// Memory helpers
// ============================================================================

#[inline(always)]
unsafe fn load32(ptr: *const u8) -> __m128i {
    unsafe { _mm_cvtsi32_si128(ptr::read_unaligned(ptr.cast::<i32>())) }
}

#[inline(always)]
unsafe fn store32(ptr: *mut u8, v: __m128i) {
    unsafe { ptr::write_unaligned(ptr.cast::<i32>(), _mm_cvtsi128_si32(v)) }
}

#[inline(always)]
unsafe fn load64(ptr: *const u8) -> __m128i {
    unsafe { _mm_loadl_epi64(ptr.cast()) }
}

#[inline(always)]
unsafe fn store64(ptr: *mut u8, v: __m128i) {
    unsafe { _mm_storel_epi64(ptr.cast(), v) }
}

#[inline(always)]
unsafe fn load128(ptr: *const u8) -> __m128i {
    unsafe { _mm_loadu_si128(ptr.cast()) }
}

#[inline(always)]
unsafe fn store128(ptr: *mut u8, v: __m128i) {
    unsafe { _mm_storeu_si128(ptr.cast(), v) }
}

/// Keep the low 32 bits, zero the rest.
#[inline(always)]
fn low32(v: __m128i) -> __m128i {
    unsafe { _mm_cvtsi32_si128(_mm_cvtsi128_si32(v)) }
}

// ============================================================================
// Masks and selects
// ============================================================================

/// True iff every byte selected by `used` (one bit per byte) is 0xff.
#[inline(always)]
fn all_ones(v: __m128i, used: i32) -> bool {
    let hits = unsafe { _mm_movemask_epi8(_mm_cmpeq_epi8(v, _mm_set1_epi8(-1))) };
    (hits & used) == used
}

/// True iff some byte selected by `used` is nonzero.
#[inline(always)]
fn any_set(v: __m128i, used: i32) -> bool {
    let zeros = unsafe { _mm_movemask_epi8(_mm_cmpeq_epi8(v, _mm_setzero_si128())) };
    (zeros & used) != used
}

#[cfg(target_feature = "sse4.1")]
#[inline(always)]
fn select_si128(mask: __m128i, t: __m128i, e: __m128i) -> __m128i {
    unsafe { _mm_blendv_epi8(e, t, mask) }
}

#[cfg(not(target_feature = "sse4.1"))]
#[inline(always)]
fn select_si128(mask: __m128i, t: __m128i, e: __m128i) -> __m128i {
    unsafe { _mm_or_si128(_mm_and_si128(mask, t), _mm_andnot_si128(mask, e)) }
}

#[cfg(target_feature = "sse4.1")]
#[inline(always)]
fn select_ps(mask: __m128, t: __m128, e: __m128) -> __m128 {
    unsafe { _mm_blendv_ps(e, t, mask) }
}

#[cfg(not(target_feature = "sse4.1"))]
#[inline(always)]
fn select_ps(mask: __m128, t: __m128, e: __m128) -> __m128 {
    unsafe { _mm_or_ps(_mm_and_ps(mask, t), _mm_andnot_ps(mask, e)) }
}

// ============================================================================
// Shifts
// ============================================================================

/// Runtime shift count operand; counts past the lane width saturate.
#[inline(always)]
fn count(bits: u32) -> __m128i {
    unsafe { _mm_cvtsi32_si128(bits as i32) }
}

// No 8-bit shifts in SSE: shift 16-bit lanes, then clear the bits that
// crossed over from the neighbouring byte.
#[inline(always)]
fn sll8(v: __m128i, bits: u32) -> __m128i {
    let keep = (0xffu32.checked_shl(bits).unwrap_or(0) & 0xff) as u8;
    unsafe { _mm_and_si128(_mm_sll_epi16(v, count(bits)), _mm_set1_epi8(keep as i8)) }
}

#[inline(always)]
fn srl8(v: __m128i, bits: u32) -> __m128i {
    let keep = 0xffu32.checked_shr(bits).unwrap_or(0) as u8;
    unsafe { _mm_and_si128(_mm_srl_epi16(v, count(bits)), _mm_set1_epi8(keep as i8)) }
}

#[inline(always)]
fn sra8(v: __m128i, bits: u32) -> __m128i {
    let n = count(bits.min(7));
    unsafe {
        // Even bytes move to the top of their word so sra sees their sign bit.
        let even = _mm_srli_epi16::<8>(_mm_sra_epi16(_mm_slli_epi16::<8>(v), n));
        let odd = _mm_and_si128(_mm_sra_epi16(v, n), _mm_set1_epi16(0xff00u16 as i16));
        _mm_or_si128(even, odd)
    }
}

#[inline(always)]
fn sll16(v: __m128i, bits: u32) -> __m128i {
    unsafe { _mm_sll_epi16(v, count(bits)) }
}

#[inline(always)]
fn srl16(v: __m128i, bits: u32) -> __m128i {
    unsafe { _mm_srl_epi16(v, count(bits)) }
}

#[inline(always)]
fn sra16(v: __m128i, bits: u32) -> __m128i {
    unsafe { _mm_sra_epi16(v, count(bits)) }
}

#[inline(always)]
fn sll32(v: __m128i, bits: u32) -> __m128i {
    unsafe { _mm_sll_epi32(v, count(bits)) }
}

#[inline(always)]
fn srl32(v: __m128i, bits: u32) -> __m128i {
    unsafe { _mm_srl_epi32(v, count(bits)) }
}

#[inline(always)]
fn sra32(v: __m128i, bits: u32) -> __m128i {
    unsafe { _mm_sra_epi32(v, count(bits)) }
}

// ============================================================================
// Min / max / multiply variants that depend on SSE4.1
// ============================================================================

#[cfg(target_feature = "sse4.1")]
#[inline(always)]
fn min_i8(a: __m128i, b: __m128i) -> __m128i {
    unsafe { _mm_min_epi8(a, b) }
}

#[cfg(target_feature = "sse4.1")]
#[inline(always)]
fn max_i8(a: __m128i, b: __m128i) -> __m128i {
    unsafe { _mm_max_epi8(a, b) }
}

#[cfg(not(target_feature = "sse4.1"))]
#[inline(always)]
fn min_i8(a: __m128i, b: __m128i) -> __m128i {
    unsafe {
        let flip = _mm_set1_epi8(i8::MIN);
        _mm_xor_si128(
            flip,
            _mm_min_epu8(_mm_xor_si128(flip, a), _mm_xor_si128(flip, b)),
        )
    }
}

#[cfg(not(target_feature = "sse4.1"))]
#[inline(always)]
fn max_i8(a: __m128i, b: __m128i) -> __m128i {
    unsafe {
        let flip = _mm_set1_epi8(i8::MIN);
        _mm_xor_si128(
            flip,
            _mm_max_epu8(_mm_xor_si128(flip, a), _mm_xor_si128(flip, b)),
        )
    }
}

#[cfg(target_feature = "sse4.1")]
#[inline(always)]
fn min_u16(a: __m128i, b: __m128i) -> __m128i {
    unsafe { _mm_min_epu16(a, b) }
}

#[cfg(target_feature = "sse4.1")]
#[inline(always)]
fn max_u16(a: __m128i, b: __m128i) -> __m128i {
    unsafe { _mm_max_epu16(a, b) }
}

#[cfg(not(target_feature = "sse4.1"))]
#[inline(always)]
fn min_u16(a: __m128i, b: __m128i) -> __m128i {
    unsafe {
        let flip = _mm_set1_epi16(i16::MIN);
        _mm_xor_si128(
            flip,
            _mm_min_epi16(_mm_xor_si128(flip, a), _mm_xor_si128(flip, b)),
        )
    }
}

#[cfg(not(target_feature = "sse4.1"))]
#[inline(always)]
fn max_u16(a: __m128i, b: __m128i) -> __m128i {
    unsafe {
        let flip = _mm_set1_epi16(i16::MIN);
        _mm_xor_si128(
            flip,
            _mm_max_epi16(_mm_xor_si128(flip, a), _mm_xor_si128(flip, b)),
        )
    }
}

#[cfg(target_feature = "sse4.1")]
#[inline(always)]
fn min_i32(a: __m128i, b: __m128i) -> __m128i {
    unsafe { _mm_min_epi32(a, b) }
}

#[cfg(target_feature = "sse4.1")]
#[inline(always)]
fn max_i32(a: __m128i, b: __m128i) -> __m128i {
    unsafe { _mm_max_epi32(a, b) }
}

#[cfg(not(target_feature = "sse4.1"))]
#[inline(always)]
fn min_i32(a: __m128i, b: __m128i) -> __m128i {
    select_si128(unsafe { _mm_cmplt_epi32(a, b) }, a, b)
}

#[cfg(not(target_feature = "sse4.1"))]
#[inline(always)]
fn max_i32(a: __m128i, b: __m128i) -> __m128i {
    select_si128(unsafe { _mm_cmpgt_epi32(a, b) }, a, b)
}

#[cfg(target_feature = "sse4.1")]
#[inline(always)]
fn min_u32(a: __m128i, b: __m128i) -> __m128i {
    unsafe { _mm_min_epu32(a, b) }
}

#[cfg(target_feature = "sse4.1")]
#[inline(always)]
fn max_u32(a: __m128i, b: __m128i) -> __m128i {
    unsafe { _mm_max_epu32(a, b) }
}

#[cfg(not(target_feature = "sse4.1"))]
#[inline(always)]
fn min_u32(a: __m128i, b: __m128i) -> __m128i {
    select_si128(lt_u32(a, b), a, b)
}

#[cfg(not(target_feature = "sse4.1"))]
#[inline(always)]
fn max_u32(a: __m128i, b: __m128i) -> __m128i {
    select_si128(lt_u32(b, a), a, b)
}

#[inline(always)]
fn lt_u8(a: __m128i, b: __m128i) -> __m128i {
    unsafe {
        let flip = _mm_set1_epi8(i8::MIN);
        _mm_cmplt_epi8(_mm_xor_si128(flip, a), _mm_xor_si128(flip, b))
    }
}

#[inline(always)]
fn lt_u16(a: __m128i, b: __m128i) -> __m128i {
    unsafe {
        let flip = _mm_set1_epi16(i16::MIN);
        _mm_cmplt_epi16(_mm_xor_si128(flip, a), _mm_xor_si128(flip, b))
    }
}

#[inline(always)]
fn lt_u32(a: __m128i, b: __m128i) -> __m128i {
    unsafe {
        let flip = _mm_set1_epi32(i32::MIN);
        _mm_cmplt_epi32(_mm_xor_si128(flip, a), _mm_xor_si128(flip, b))
    }
}

#[cfg(target_feature = "sse4.1")]
#[inline(always)]
fn mul_i32(a: __m128i, b: __m128i) -> __m128i {
    unsafe { _mm_mullo_epi32(a, b) }
}

#[cfg(not(target_feature = "sse4.1"))]
#[inline(always)]
fn mul_i32(a: __m128i, b: __m128i) -> __m128i {
    unsafe {
        // pmuludq multiplies lanes 0 and 2; shift to reach lanes 1 and 3.
        let mul20 = _mm_mul_epu32(a, b);
        let mul31 = _mm_mul_epu32(_mm_srli_si128::<4>(a), _mm_srli_si128::<4>(b));
        _mm_unpacklo_epi32(
            _mm_shuffle_epi32::<0b00_00_10_00>(mul20),
            _mm_shuffle_epi32::<0b00_00_10_00>(mul31),
        )
    }
}

#[cfg(target_feature = "sse4.1")]
#[inline(always)]
fn floor_ps(v: __m128) -> __m128 {
    unsafe { _mm_floor_ps(v) }
}

#[cfg(not(target_feature = "sse4.1"))]
#[inline(always)]
fn floor_ps(v: __m128) -> __m128 {
    unsafe {
        // Exact for |v| < 2^31.
        let roundtrip = _mm_cvtepi32_ps(_mm_cvttps_epi32(v));
        let too_big = _mm_cmpgt_ps(roundtrip, v);
        _mm_sub_ps(roundtrip, _mm_and_ps(too_big, _mm_set1_ps(1.0)))
    }
}

// ============================================================================
// Integer vectors
// ============================================================================

macro_rules! sse_int {
    (
        $(#[$meta:meta])*
        $name:ident: [$lane:ty; $lanes:literal],
        used = $used:literal, load = $load:ident, store = $store:ident,
        splat = $splat:ident($sty:ty), add = $add:ident, sub = $sub:ident, eq = $eq:ident,
        lt = $lt:expr, gt = $gt:expr, min = $min:expr, max = $max:expr,
        shl = $shl:ident, shr = $shr:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy)]
        #[repr(transparent)]
        pub struct $name(__m128i);

        impl $name {
            /// Build from one scalar per lane, in lane order.
            #[inline(always)]
            pub fn from_array(lanes: [$lane; $lanes]) -> Self {
                // SAFETY: the array spans exactly the bytes the load reads.
                Self(unsafe { $load(lanes.as_ptr().cast()) })
            }

            /// Copy every lane out, in lane order.
            #[inline(always)]
            pub fn to_array(self) -> [$lane; $lanes] {
                let mut out = [<$lane>::default(); $lanes];
                // SAFETY: the array spans exactly the bytes the store writes.
                unsafe { $store(out.as_mut_ptr().cast(), self.0) };
                out
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:?})", stringify!($name), self.to_array())
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self(unsafe { _mm_setzero_si128() })
            }
        }

        impl PartialEq for $name {
            #[inline(always)]
            fn eq(&self, other: &Self) -> bool {
                self.to_array() == other.to_array()
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

        impl Add for $name {
            type Output = Self;
            #[inline(always)]
            fn add(self, rhs: Self) -> Self {
                Self(unsafe { $add(self.0, rhs.0) })
            }
        }

        impl Sub for $name {
            type Output = Self;
            #[inline(always)]
            fn sub(self, rhs: Self) -> Self {
                Self(unsafe { $sub(self.0, rhs.0) })
            }
        }

        impl BitAnd for $name {
            type Output = Self;
            #[inline(always)]
            fn bitand(self, rhs: Self) -> Self {
                Self(unsafe { _mm_and_si128(self.0, rhs.0) })
            }
        }

        impl BitOr for $name {
            type Output = Self;
            #[inline(always)]
            fn bitor(self, rhs: Self) -> Self {
                Self(unsafe { _mm_or_si128(self.0, rhs.0) })
            }
        }

        impl BitXor for $name {
            type Output = Self;
            #[inline(always)]
            fn bitxor(self, rhs: Self) -> Self {
                Self(unsafe { _mm_xor_si128(self.0, rhs.0) })
            }
        }

        impl Not for $name {
            type Output = Self;
            #[inline(always)]
            fn not(self) -> Self {
                Self(unsafe { _mm_xor_si128(self.0, _mm_set1_epi32(-1)) })
            }
        }

        impl Shl<u32> for $name {
            type Output = Self;
            #[inline(always)]
            fn shl(self, bits: u32) -> Self {
                Self($shl(self.0, bits))
            }
        }

        impl Shr<u32> for $name {
            type Output = Self;
            #[inline(always)]
            fn shr(self, bits: u32) -> Self {
                Self($shr(self.0, bits))
            }
        }

        impl SimdVector for $name {
            type Lane = $lane;
            const LANES: usize = $lanes;

            #[inline(always)]
            fn splat(value: $lane) -> Self {
                Self(unsafe { $splat(value as $sty) })
            }

            #[inline(always)]
            unsafe fn load(ptr: *const u8) -> Self {
                // SAFETY: the caller guarantees BYTES readable bytes.
                Self(unsafe { $load(ptr) })
            }

            #[inline(always)]
            unsafe fn store(self, ptr: *mut u8) {
                // SAFETY: the caller guarantees BYTES writable bytes.
                unsafe { $store(ptr, self.0) }
            }

            #[inline(always)]
            fn lane(self, index: usize) -> $lane {
                debug_assert!(
                    index < $lanes,
                    "lane {index} out of range for {}",
                    stringify!($name)
                );
                self.to_array()[index & ($lanes - 1)]
            }

            #[inline(always)]
            fn simd_eq(self, other: Self) -> Self {
                Self(unsafe { $eq(self.0, other.0) })
            }

            #[inline(always)]
            fn simd_lt(self, other: Self) -> Self {
                Self(unsafe { ($lt)(self.0, other.0) })
            }

            #[inline(always)]
            fn simd_gt(self, other: Self) -> Self {
                Self(unsafe { ($gt)(self.0, other.0) })
            }

            #[inline(always)]
            fn min(self, other: Self) -> Self {
                Self(unsafe { ($min)(self.0, other.0) })
            }

            #[inline(always)]
            fn max(self, other: Self) -> Self {
                Self(unsafe { ($max)(self.0, other.0) })
            }

            #[inline(always)]
            fn then_else(self, when_true: Self, when_false: Self) -> Self {
                Self(select_si128(self.0, when_true.0, when_false.0))
            }

            #[inline(always)]
            fn all_true(self) -> bool {
                all_ones(self.0, $used)
            }

            #[inline(always)]
            fn any_true(self) -> bool {
                any_set(self.0, $used)
            }
        }
    };
}

sse_int!(
    /// Four `u8` lanes in the low 32 bits of an XMM register.
    U8x4: [u8; 4],
    used = 0xf, load = load32, store = store32,
    splat = _mm_set1_epi8(i8), add = _mm_add_epi8, sub = _mm_sub_epi8, eq = _mm_cmpeq_epi8,
    lt = lt_u8, gt = |a, b| lt_u8(b, a), min = _mm_min_epu8, max = _mm_max_epu8,
    shl = sll8, shr = srl8
);
sse_int!(
    /// Sixteen `u8` lanes.
    U8x16: [u8; 16],
    used = 0xffff, load = load128, store = store128,
    splat = _mm_set1_epi8(i8), add = _mm_add_epi8, sub = _mm_sub_epi8, eq = _mm_cmpeq_epi8,
    lt = lt_u8, gt = |a, b| lt_u8(b, a), min = _mm_min_epu8, max = _mm_max_epu8,
    shl = sll8, shr = srl8
);
sse_int!(
    /// Sixteen `i8` lanes.
    I8x16: [i8; 16],
    used = 0xffff, load = load128, store = store128,
    splat = _mm_set1_epi8(i8), add = _mm_add_epi8, sub = _mm_sub_epi8, eq = _mm_cmpeq_epi8,
    lt = _mm_cmplt_epi8, gt = _mm_cmpgt_epi8, min = min_i8, max = max_i8,
    shl = sll8, shr = sra8
);
sse_int!(
    /// Four `u16` lanes in the low 64 bits of an XMM register.
    U16x4: [u16; 4],
    used = 0xff, load = load64, store = store64,
    splat = _mm_set1_epi16(i16), add = _mm_add_epi16, sub = _mm_sub_epi16, eq = _mm_cmpeq_epi16,
    lt = lt_u16, gt = |a, b| lt_u16(b, a), min = min_u16, max = max_u16,
    shl = sll16, shr = srl16
);
sse_int!(
    /// Eight `u16` lanes.
    U16x8: [u16; 8],
    used = 0xffff, load = load128, store = store128,
    splat = _mm_set1_epi16(i16), add = _mm_add_epi16, sub = _mm_sub_epi16, eq = _mm_cmpeq_epi16,
    lt = lt_u16, gt = |a, b| lt_u16(b, a), min = min_u16, max = max_u16,
    shl = sll16, shr = srl16
);
sse_int!(
    /// Four `i16` lanes in the low 64 bits of an XMM register.
    I16x4: [i16; 4],
    used = 0xff, load = load64, store = store64,
    splat = _mm_set1_epi16(i16), add = _mm_add_epi16, sub = _mm_sub_epi16, eq = _mm_cmpeq_epi16,
    lt = _mm_cmplt_epi16, gt = _mm_cmpgt_epi16, min = _mm_min_epi16, max = _mm_max_epi16,
    shl = sll16, shr = sra16
);
sse_int!(
    /// Eight `i16` lanes.
    I16x8: [i16; 8],
    used = 0xffff, load = load128, store = store128,
    splat = _mm_set1_epi16(i16), add = _mm_add_epi16, sub = _mm_sub_epi16, eq = _mm_cmpeq_epi16,
    lt = _mm_cmplt_epi16, gt = _mm_cmpgt_epi16, min = _mm_min_epi16, max = _mm_max_epi16,
    shl = sll16, shr = sra16
);
sse_int!(
    /// Four `i32` lanes.
    I32x4: [i32; 4],
    used = 0xffff, load = load128, store = store128,
    splat = _mm_set1_epi32(i32), add = _mm_add_epi32, sub = _mm_sub_epi32, eq = _mm_cmpeq_epi32,
    lt = _mm_cmplt_epi32, gt = _mm_cmpgt_epi32, min = min_i32, max = max_i32,
    shl = sll32, shr = sra32
);
sse_int!(
    /// Four `u32` lanes. No multiply: SSE has no full-width unsigned `pmulld`.
    U32x4: [u32; 4],
    used = 0xffff, load = load128, store = store128,
    splat = _mm_set1_epi32(i32), add = _mm_add_epi32, sub = _mm_sub_epi32, eq = _mm_cmpeq_epi32,
    lt = lt_u32, gt = |a, b| lt_u32(b, a), min = min_u32, max = max_u32,
    shl = sll32, shr = srl32
);

macro_rules! sse_mul {
    ($($name:ident: $mul:ident),*) => {
        $(
            impl Mul for $name {
                type Output = Self;
                #[inline(always)]
                fn mul(self, rhs: Self) -> Self {
                    Self(unsafe { $mul(self.0, rhs.0) })
                }
            }
        )*
    };
}

sse_mul!(
    I32x4: mul_i32,
    I16x4: _mm_mullo_epi16,
    I16x8: _mm_mullo_epi16,
    U16x4: _mm_mullo_epi16,
    U16x8: _mm_mullo_epi16
);

macro_rules! sse_saturating_add {
    ($($name:ident: $adds:ident),*) => {
        $(
            impl SaturatingAdd for $name {
                #[inline(always)]
                fn saturating_add(self, other: Self) -> Self {
                    Self(unsafe { $adds(self.0, other.0) })
                }
            }
        )*
    };
}

sse_saturating_add!(
    U8x4: _mm_adds_epu8,
    U8x16: _mm_adds_epu8,
    U16x4: _mm_adds_epu16,
    U16x8: _mm_adds_epu16
);

// ============================================================================
// Float vectors
// ============================================================================

macro_rules! sse_float {
    (
        $(#[$meta:meta])*
        $name:ident: [f32; $lanes:literal],
        used = $used:literal, load = $load:ident, store = $store:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy)]
        #[repr(transparent)]
        pub struct $name(__m128);

        impl $name {
            /// Build from one scalar per lane, in lane order.
            #[inline(always)]
            pub fn from_array(lanes: [f32; $lanes]) -> Self {
                // SAFETY: the array spans exactly the bytes the load reads.
                Self(unsafe { _mm_castsi128_ps($load(lanes.as_ptr().cast())) })
            }

            /// Copy every lane out, in lane order.
            #[inline(always)]
            pub fn to_array(self) -> [f32; $lanes] {
                let mut out = [0.0f32; $lanes];
                // SAFETY: the array spans exactly the bytes the store writes.
                unsafe { $store(out.as_mut_ptr().cast(), _mm_castps_si128(self.0)) };
                out
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:?})", stringify!($name), self.to_array())
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self(unsafe { _mm_setzero_ps() })
            }
        }

        impl PartialEq for $name {
            #[inline(always)]
            fn eq(&self, other: &Self) -> bool {
                self.to_array() == other.to_array()
            }
        }

        impl From<[f32; $lanes]> for $name {
            #[inline(always)]
            fn from(lanes: [f32; $lanes]) -> Self {
                Self::from_array(lanes)
            }
        }

        impl From<$name> for [f32; $lanes] {
            #[inline(always)]
            fn from(v: $name) -> Self {
                v.to_array()
            }
        }

        impl Add for $name {
            type Output = Self;
            #[inline(always)]
            fn add(self, rhs: Self) -> Self {
                Self(unsafe { _mm_add_ps(self.0, rhs.0) })
            }
        }

        impl Sub for $name {
            type Output = Self;
            #[inline(always)]
            fn sub(self, rhs: Self) -> Self {
                Self(unsafe { _mm_sub_ps(self.0, rhs.0) })
            }
        }

        impl Mul for $name {
            type Output = Self;
            #[inline(always)]
            fn mul(self, rhs: Self) -> Self {
                Self(unsafe { _mm_mul_ps(self.0, rhs.0) })
            }
        }

        impl Div for $name {
            type Output = Self;
            #[inline(always)]
            fn div(self, rhs: Self) -> Self {
                Self(unsafe { _mm_div_ps(self.0, rhs.0) })
            }
        }

        impl BitAnd for $name {
            type Output = Self;
            #[inline(always)]
            fn bitand(self, rhs: Self) -> Self {
                Self(unsafe { _mm_and_ps(self.0, rhs.0) })
            }
        }

        impl BitOr for $name {
            type Output = Self;
            #[inline(always)]
            fn bitor(self, rhs: Self) -> Self {
                Self(unsafe { _mm_or_ps(self.0, rhs.0) })
            }
        }

        impl BitXor for $name {
            type Output = Self;
            #[inline(always)]
            fn bitxor(self, rhs: Self) -> Self {
                Self(unsafe { _mm_xor_ps(self.0, rhs.0) })
            }
        }

        impl Not for $name {
            type Output = Self;
            #[inline(always)]
            fn not(self) -> Self {
                Self(unsafe { _mm_xor_ps(self.0, _mm_castsi128_ps(_mm_set1_epi32(-1))) })
            }
        }

        impl SimdVector for $name {
            type Lane = f32;
            const LANES: usize = $lanes;

            #[inline(always)]
            fn splat(value: f32) -> Self {
                Self(unsafe { _mm_set1_ps(value) })
            }

            #[inline(always)]
            unsafe fn load(ptr: *const u8) -> Self {
                // SAFETY: the caller guarantees BYTES readable bytes.
                Self(unsafe { _mm_castsi128_ps($load(ptr)) })
            }

            #[inline(always)]
            unsafe fn store(self, ptr: *mut u8) {
                // SAFETY: the caller guarantees BYTES writable bytes.
                unsafe { $store(ptr, _mm_castps_si128(self.0)) }
            }

            #[inline(always)]
            fn lane(self, index: usize) -> f32 {
                debug_assert!(
                    index < $lanes,
                    "lane {index} out of range for {}",
                    stringify!($name)
                );
                self.to_array()[index & ($lanes - 1)]
            }

            #[inline(always)]
            fn simd_eq(self, other: Self) -> Self {
                Self(unsafe { _mm_cmpeq_ps(self.0, other.0) })
            }

            #[inline(always)]
            fn simd_ne(self, other: Self) -> Self {
                Self(unsafe { _mm_cmpneq_ps(self.0, other.0) })
            }

            #[inline(always)]
            fn simd_lt(self, other: Self) -> Self {
                Self(unsafe { _mm_cmplt_ps(self.0, other.0) })
            }

            #[inline(always)]
            fn simd_le(self, other: Self) -> Self {
                Self(unsafe { _mm_cmple_ps(self.0, other.0) })
            }

            #[inline(always)]
            fn simd_gt(self, other: Self) -> Self {
                Self(unsafe { _mm_cmpgt_ps(self.0, other.0) })
            }

            #[inline(always)]
            fn simd_ge(self, other: Self) -> Self {
                Self(unsafe { _mm_cmpge_ps(self.0, other.0) })
            }

            #[inline(always)]
            fn min(self, other: Self) -> Self {
                Self(unsafe { _mm_min_ps(self.0, other.0) })
            }

            #[inline(always)]
            fn max(self, other: Self) -> Self {
                Self(unsafe { _mm_max_ps(self.0, other.0) })
            }

            #[inline(always)]
            fn then_else(self, when_true: Self, when_false: Self) -> Self {
                Self(select_ps(self.0, when_true.0, when_false.0))
            }

            #[inline(always)]
            fn all_true(self) -> bool {
                all_ones(unsafe { _mm_castps_si128(self.0) }, $used)
            }

            #[inline(always)]
            fn any_true(self) -> bool {
                any_set(unsafe { _mm_castps_si128(self.0) }, $used)
            }
        }
    };
}

sse_float!(
    /// Two `f32` lanes in the low 64 bits of an XMM register.
    F32x2: [f32; 2],
    used = 0xff, load = load64, store = store64
);
sse_float!(
    /// Four `f32` lanes.
    F32x4: [f32; 4],
    used = 0xffff, load = load128, store = store128
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

impl F32x2 {
    /// Exact square root.
    #[inline(always)]
    pub fn sqrt(self) -> Self {
        Self(unsafe { _mm_sqrt_ps(self.0) })
    }

    /// Approximate `1 / sqrt(x)` (`rsqrtps`).
    #[inline(always)]
    pub fn rsqrt(self) -> Self {
        Self(unsafe { _mm_rsqrt_ps(self.0) })
    }

    /// Approximate `1 / x` (`rcpps`).
    #[inline(always)]
    pub fn invert(self) -> Self {
        Self(unsafe { _mm_rcp_ps(self.0) })
    }
}

impl SimdFloat for F32x4 {
    type Bits = U32x4;

    #[inline(always)]
    fn sqrt(self) -> Self {
        Self(unsafe { _mm_sqrt_ps(self.0) })
    }

    #[inline(always)]
    fn rsqrt(self) -> Self {
        Self(unsafe { _mm_rsqrt_ps(self.0) })
    }

    #[inline(always)]
    fn invert(self) -> Self {
        Self(unsafe { _mm_rcp_ps(self.0) })
    }

    #[inline(always)]
    fn floor(self) -> Self {
        Self(floor_ps(self.0))
    }

    #[inline(always)]
    fn abs(self) -> Self {
        Self(unsafe { _mm_andnot_ps(_mm_set1_ps(-0.0), self.0) })
    }

    #[inline(always)]
    fn to_bits(self) -> U32x4 {
        U32x4(unsafe { _mm_castps_si128(self.0) })
    }

    #[inline(always)]
    fn from_bits(bits: U32x4) -> Self {
        Self(unsafe { _mm_castsi128_ps(bits.0) })
    }
}

impl RoundToInt for F32x4 {
    type Int = I32x4;

    #[inline(always)]
    fn round(self) -> I32x4 {
        I32x4(unsafe { _mm_cvtps_epi32(self.0) })
    }
}

// ============================================================================
// Split / join
// ============================================================================

impl Halves for F32x4 {
    type Half = F32x2;

    #[inline(always)]
    fn split(self) -> (F32x2, F32x2) {
        unsafe {
            (
                F32x2(_mm_castsi128_ps(_mm_move_epi64(_mm_castps_si128(self.0)))),
                F32x2(_mm_movehl_ps(_mm_setzero_ps(), self.0)),
            )
        }
    }

    #[inline(always)]
    fn join(lo: F32x2, hi: F32x2) -> Self {
        Self(unsafe { _mm_movelh_ps(lo.0, hi.0) })
    }
}

macro_rules! sse_halves_64 {
    ($($name:ident => $half:ident),*) => {
        $(
            impl Halves for $name {
                type Half = $half;

                #[inline(always)]
                fn split(self) -> ($half, $half) {
                    unsafe { ($half(_mm_move_epi64(self.0)), $half(_mm_srli_si128::<8>(self.0))) }
                }

                #[inline(always)]
                fn join(lo: $half, hi: $half) -> Self {
                    Self(unsafe { _mm_unpacklo_epi64(lo.0, hi.0) })
                }
            }
        )*
    };
}

sse_halves_64!(U16x8 => U16x4, I16x8 => I16x4);

impl Halves for U8x16 {
    type Half = U8x8;

    #[inline(always)]
    fn split(self) -> (U8x8, U8x8) {
        let v = self.0;
        unsafe {
            (
                Pair::new(U8x4(low32(v)), U8x4(low32(_mm_srli_si128::<4>(v)))),
                Pair::new(
                    U8x4(low32(_mm_srli_si128::<8>(v))),
                    U8x4(low32(_mm_srli_si128::<12>(v))),
                ),
            )
        }
    }

    #[inline(always)]
    fn join(lo: U8x8, hi: U8x8) -> Self {
        unsafe {
            Self(_mm_unpacklo_epi64(
                _mm_unpacklo_epi32(lo.lo.0, lo.hi.0),
                _mm_unpacklo_epi32(hi.lo.0, hi.hi.0),
            ))
        }
    }
}

// ============================================================================
// Interleaved load / store
// ============================================================================

/// 4x4 transpose; its own inverse.
#[inline(always)]
fn transpose4(p0: __m128, p1: __m128, p2: __m128, p3: __m128) -> (__m128, __m128, __m128, __m128) {
    unsafe {
        let t0 = _mm_unpacklo_ps(p0, p1);
        let t1 = _mm_unpacklo_ps(p2, p3);
        let t2 = _mm_unpackhi_ps(p0, p1);
        let t3 = _mm_unpackhi_ps(p2, p3);
        (
            _mm_movelh_ps(t0, t1),
            _mm_movehl_ps(t1, t0),
            _mm_movelh_ps(t2, t3),
            _mm_movehl_ps(t3, t2),
        )
    }
}

impl Interleave4 for F32x4 {
    #[inline(always)]
    unsafe fn load4_raw(ptr: *const u8) -> (Self, Self, Self, Self) {
        // SAFETY: the caller guarantees 64 readable bytes.
        let (p0, p1, p2, p3) = unsafe {
            let ptr = ptr.cast::<f32>();
            (
                _mm_loadu_ps(ptr),
                _mm_loadu_ps(ptr.add(4)),
                _mm_loadu_ps(ptr.add(8)),
                _mm_loadu_ps(ptr.add(12)),
            )
        };
        let (r, g, b, a) = transpose4(p0, p1, p2, p3);
        (Self(r), Self(g), Self(b), Self(a))
    }

    #[inline(always)]
    unsafe fn store4_raw(ptr: *mut u8, c0: Self, c1: Self, c2: Self, c3: Self) {
        let (p0, p1, p2, p3) = transpose4(c0.0, c1.0, c2.0, c3.0);
        // SAFETY: the caller guarantees 64 writable bytes.
        unsafe {
            let ptr = ptr.cast::<f32>();
            _mm_storeu_ps(ptr, p0);
            _mm_storeu_ps(ptr.add(4), p1);
            _mm_storeu_ps(ptr.add(8), p2);
            _mm_storeu_ps(ptr.add(12), p3);
        }
    }
}

impl Interleave4 for U16x4 {
    #[inline(always)]
    unsafe fn load4_raw(ptr: *const u8) -> (Self, Self, Self, Self) {
        // SAFETY: the caller guarantees 32 readable bytes.
        let (lo, hi) = unsafe { (load128(ptr), load128(ptr.add(16))) };
        unsafe {
            let even = _mm_unpacklo_epi16(lo, hi); // r0 r2 g0 g2 b0 b2 a0 a2
            let odd = _mm_unpackhi_epi16(lo, hi); // r1 r3 g1 g3 b1 b3 a1 a3
            let rg = _mm_unpacklo_epi16(even, odd);
            let ba = _mm_unpackhi_epi16(even, odd);
            (
                Self(_mm_move_epi64(rg)),
                Self(_mm_srli_si128::<8>(rg)),
                Self(_mm_move_epi64(ba)),
                Self(_mm_srli_si128::<8>(ba)),
            )
        }
    }

    #[inline(always)]
    unsafe fn store4_raw(ptr: *mut u8, c0: Self, c1: Self, c2: Self, c3: Self) {
        unsafe {
            let rg = _mm_unpacklo_epi16(c0.0, c1.0);
            let ba = _mm_unpacklo_epi16(c2.0, c3.0);
            // SAFETY: the caller guarantees 32 writable bytes.
            store128(ptr, _mm_unpacklo_epi32(rg, ba));
            store128(ptr.add(16), _mm_unpackhi_epi32(rg, ba));
        }
    }
}

impl Interleave4 for U16x8 {
    #[inline(always)]
    unsafe fn load4_raw(ptr: *const u8) -> (Self, Self, Self, Self) {
        // SAFETY: the caller guarantees 64 readable bytes.
        let (p01, p23, p45, p67) = unsafe {
            (
                load128(ptr),
                load128(ptr.add(16)),
                load128(ptr.add(32)),
                load128(ptr.add(48)),
            )
        };
        unsafe {
            let p02 = _mm_unpacklo_epi16(p01, p23);
            let p13 = _mm_unpackhi_epi16(p01, p23);
            let p46 = _mm_unpacklo_epi16(p45, p67);
            let p57 = _mm_unpackhi_epi16(p45, p67);

            let rg0123 = _mm_unpacklo_epi16(p02, p13);
            let ba0123 = _mm_unpackhi_epi16(p02, p13);
            let rg4567 = _mm_unpacklo_epi16(p46, p57);
            let ba4567 = _mm_unpackhi_epi16(p46, p57);

            (
                Self(_mm_unpacklo_epi64(rg0123, rg4567)),
                Self(_mm_unpackhi_epi64(rg0123, rg4567)),
                Self(_mm_unpacklo_epi64(ba0123, ba4567)),
                Self(_mm_unpackhi_epi64(ba0123, ba4567)),
            )
        }
    }

    #[inline(always)]
    unsafe fn store4_raw(ptr: *mut u8, c0: Self, c1: Self, c2: Self, c3: Self) {
        unsafe {
            let rg0123 = _mm_unpacklo_epi16(c0.0, c1.0);
            let rg4567 = _mm_unpackhi_epi16(c0.0, c1.0);
            let ba0123 = _mm_unpacklo_epi16(c2.0, c3.0);
            let ba4567 = _mm_unpackhi_epi16(c2.0, c3.0);
            // SAFETY: the caller guarantees 64 writable bytes.
            store128(ptr, _mm_unpacklo_epi32(rg0123, ba0123));
            store128(ptr.add(16), _mm_unpackhi_epi32(rg0123, ba0123));
            store128(ptr.add(32), _mm_unpacklo_epi32(rg4567, ba4567));
            store128(ptr.add(48), _mm_unpackhi_epi32(rg4567, ba4567));
        }
    }
}

impl Interleave4 for U8x16 {
    #[inline(always)]
    unsafe fn load4_raw(ptr: *const u8) -> (Self, Self, Self, Self) {
        // SAFETY: the caller guarantees 64 readable bytes.
        let (v0, v1, v2, v3) = unsafe {
            (
                load128(ptr),
                load128(ptr.add(16)),
                load128(ptr.add(32)),
                load128(ptr.add(48)),
            )
        };
        unsafe {
            // Three rounds of byte unpacks sort 16 pixels by channel.
            let t0 = _mm_unpacklo_epi8(v0, v1);
            let t1 = _mm_unpackhi_epi8(v0, v1);
            let t2 = _mm_unpacklo_epi8(v2, v3);
            let t3 = _mm_unpackhi_epi8(v2, v3);

            let u0 = _mm_unpacklo_epi8(t0, t1);
            let u1 = _mm_unpackhi_epi8(t0, t1);
            let u2 = _mm_unpacklo_epi8(t2, t3);
            let u3 = _mm_unpackhi_epi8(t2, t3);

            let w0 = _mm_unpacklo_epi8(u0, u1); // r0..7 g0..7
            let w1 = _mm_unpackhi_epi8(u0, u1); // b0..7 a0..7
            let w2 = _mm_unpacklo_epi8(u2, u3); // r8..15 g8..15
            let w3 = _mm_unpackhi_epi8(u2, u3); // b8..15 a8..15

            (
                Self(_mm_unpacklo_epi64(w0, w2)),
                Self(_mm_unpackhi_epi64(w0, w2)),
                Self(_mm_unpacklo_epi64(w1, w3)),
                Self(_mm_unpackhi_epi64(w1, w3)),
            )
        }
    }

    #[inline(always)]
    unsafe fn store4_raw(ptr: *mut u8, c0: Self, c1: Self, c2: Self, c3: Self) {
        unsafe {
            let rg_lo = _mm_unpacklo_epi8(c0.0, c1.0);
            let rg_hi = _mm_unpackhi_epi8(c0.0, c1.0);
            let ba_lo = _mm_unpacklo_epi8(c2.0, c3.0);
            let ba_hi = _mm_unpackhi_epi8(c2.0, c3.0);
            // SAFETY: the caller guarantees 64 writable bytes.
            store128(ptr, _mm_unpacklo_epi16(rg_lo, ba_lo));
            store128(ptr.add(16), _mm_unpackhi_epi16(rg_lo, ba_lo));
            store128(ptr.add(32), _mm_unpacklo_epi16(rg_hi, ba_hi));
            store128(ptr.add(48), _mm_unpackhi_epi16(rg_hi, ba_hi));
        }
    }
}

// ============================================================================
// Casts
// ============================================================================

#[cfg(target_feature = "sse4.1")]
#[inline(always)]
fn pack_i32_u16(v: __m128i) -> __m128i {
    unsafe { _mm_packus_epi32(v, _mm_setzero_si128()) }
}

#[cfg(not(target_feature = "sse4.1"))]
#[inline(always)]
fn pack_i32_u16(v: __m128i) -> __m128i {
    unsafe {
        let zero = _mm_setzero_si128();
        let max = _mm_set1_epi32(0xffff);
        let v = _mm_andnot_si128(_mm_cmplt_epi32(v, zero), v);
        let v = select_si128(_mm_cmpgt_epi32(v, max), max, v);
        // Sign-extend so packssdw passes 0x8000..=0xffff through unchanged.
        _mm_packs_epi32(_mm_srai_epi32::<16>(_mm_slli_epi32::<16>(v)), zero)
    }
}

#[inline(always)]
fn pack_i32_u8(v: __m128i) -> __m128i {
    unsafe {
        let zero = _mm_setzero_si128();
        _mm_packus_epi16(_mm_packs_epi32(v, zero), zero)
    }
}

#[cfg(target_feature = "ssse3")]
#[inline(always)]
fn widen_u8_i32(v: __m128i) -> __m128i {
    unsafe {
        _mm_shuffle_epi8(
            v,
            _mm_setr_epi8(0, -1, -1, -1, 1, -1, -1, -1, 2, -1, -1, -1, 3, -1, -1, -1),
        )
    }
}

#[cfg(not(target_feature = "ssse3"))]
#[inline(always)]
fn widen_u8_i32(v: __m128i) -> __m128i {
    unsafe {
        let zero = _mm_setzero_si128();
        _mm_unpacklo_epi16(_mm_unpacklo_epi8(v, zero), zero)
    }
}

#[inline(always)]
fn widen_u16_i32(v: __m128i) -> __m128i {
    unsafe { _mm_unpacklo_epi16(v, _mm_setzero_si128()) }
}

#[inline(always)]
fn i32_to_f32(v: __m128i) -> F32x4 {
    F32x4(unsafe { _mm_cvtepi32_ps(v) })
}

macro_rules! sse_casts {
    ($($src:ident => $dst:ident: |$v:ident| $body:expr;)*) => {
        $(
            impl LaneCast<$dst> for $src {
                #[inline(always)]
                fn cast(self) -> $dst {
                    let $v = self.0;
                    $dst(unsafe { $body })
                }
            }
        )*
    };
}

sse_casts! {
    I32x4 => F32x4: |v| _mm_cvtepi32_ps(v);
    F32x4 => I32x4: |v| _mm_cvttps_epi32(v);
    I32x4 => U32x4: |v| v;
    U32x4 => I32x4: |v| v;
    I32x4 => U16x4: |v| pack_i32_u16(v);
    I32x4 => I16x4: |v| _mm_packs_epi32(v, _mm_setzero_si128());
    I32x4 => U8x4: |v| pack_i32_u8(v);
    I16x4 => I32x4: |v| _mm_srai_epi32::<16>(_mm_unpacklo_epi16(v, v));
    U16x4 => I32x4: |v| widen_u16_i32(v);
    U8x4 => I32x4: |v| widen_u8_i32(v);
    U8x4 => U16x4: |v| _mm_unpacklo_epi8(v, _mm_setzero_si128());
    U16x4 => U8x4: |v| _mm_packus_epi16(min_u16(v, _mm_set1_epi16(0xff)), _mm_setzero_si128());
    U16x4 => F32x4: |v| _mm_cvtepi32_ps(widen_u16_i32(v));
    U8x4 => F32x4: |v| _mm_cvtepi32_ps(widen_u8_i32(v));
    F32x4 => U16x4: |v| pack_i32_u16(_mm_cvttps_epi32(v));
    F32x4 => U8x4: |v| pack_i32_u8(_mm_cvttps_epi32(v));
}

impl LaneCast<F32x4> for U32x4 {
    /// Exact: converts the high and low 16 bits separately.
    #[inline(always)]
    fn cast(self) -> F32x4 {
        unsafe {
            let hi = _mm_cvtepi32_ps(_mm_srli_epi32::<16>(self.0));
            let lo = _mm_cvtepi32_ps(_mm_and_si128(self.0, _mm_set1_epi32(0xffff)));
            F32x4(_mm_add_ps(_mm_mul_ps(hi, _mm_set1_ps(65536.0)), lo))
        }
    }
}

impl LaneCast<U8x16> for F32x16 {
    #[inline(always)]
    fn cast(self) -> U8x16 {
        let Pair {
            lo: Pair { lo: a, hi: b },
            hi: Pair { lo: c, hi: d },
        } = self;
        unsafe {
            let (a, b) = (_mm_cvttps_epi32(a.0), _mm_cvttps_epi32(b.0));
            let (c, d) = (_mm_cvttps_epi32(c.0), _mm_cvttps_epi32(d.0));
            U8x16(_mm_packus_epi16(
                _mm_packs_epi32(a, b),
                _mm_packs_epi32(c, d),
            ))
        }
    }
}

impl LaneCast<F32x16> for U8x16 {
    #[inline(always)]
    fn cast(self) -> F32x16 {
        unsafe {
            let zero = _mm_setzero_si128();
            let lo = _mm_unpacklo_epi8(self.0, zero);
            let hi = _mm_unpackhi_epi8(self.0, zero);
            Pair::new(
                Pair::new(
                    i32_to_f32(_mm_unpacklo_epi16(lo, zero)),
                    i32_to_f32(_mm_unpackhi_epi16(lo, zero)),
                ),
                Pair::new(
                    i32_to_f32(_mm_unpacklo_epi16(hi, zero)),
                    i32_to_f32(_mm_unpackhi_epi16(hi, zero)),
                ),
            )
        }
    }
}
