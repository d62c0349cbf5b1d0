//! The uniform vector operation surface.
//!
//! Every concrete vector kind (native or [`Pair`](crate::Pair)-composed)
//! implements [`SimdVector`]. Float kinds add [`SimdFloat`], and the layout
//! converters live in [`Halves`], [`Interleave4`] and [`LaneCast`].
//!
//! # Masks
//!
//! Comparisons return a vector of the *same* type whose lanes are all-ones
//! (true) or all-zeros (false). Masks combine with `&`, `|`, `^`, `!` and are
//! consumed by [`SimdVector::then_else`], [`SimdVector::all_true`] and
//! [`SimdVector::any_true`].
//!
//! # Contract violations
//!
//! Out-of-range lane indices and non-mask selectors are programming errors.
//! They are checked with `debug_assert!` only; release builds take the index
//! modulo the lane count and blend non-mask selectors in a backend-defined
//! way. Callers relying on release behavior for bad inputs get no guarantee.

use std::fmt::Debug;
use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Not, Sub};

use crate::error::{Error, Result};
use crate::lane::Lane;

/// A fixed-width vector of `LANES` lanes of [`SimdVector::Lane`].
///
/// Values are immutable: every operation returns a new vector. `Default` is
/// the all-zeros vector and `PartialEq` compares lane by lane (so a float
/// vector holding NaN never equals itself).
pub trait SimdVector:
    Copy
    + Default
    + Debug
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
{
    /// Scalar type held in each lane.
    type Lane: Lane;

    /// Number of lanes.
    const LANES: usize;

    /// Bytes read by [`load`](Self::load) and written by [`store`](Self::store).
    const BYTES: usize = Self::LANES * std::mem::size_of::<Self::Lane>();

    /// Broadcast one scalar to every lane.
    fn splat(value: Self::Lane) -> Self;

    /// Read `BYTES` contiguous bytes starting at `ptr`.
    ///
    /// Lane `i` takes bytes `[i * size_of::<Lane>(), (i + 1) * size_of::<Lane>())`.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of `BYTES` bytes. No alignment is required.
    unsafe fn load(ptr: *const u8) -> Self;

    /// Write `BYTES` contiguous bytes starting at `ptr`; the inverse of [`load`](Self::load).
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writes of `BYTES` bytes. No alignment is required.
    unsafe fn store(self, ptr: *mut u8);

    /// Read lane `index`.
    ///
    /// Debug builds assert `index < LANES`. Release builds use
    /// `index % LANES` instead of trapping, trading safety for speed.
    fn lane(self, index: usize) -> Self::Lane;

    /// Lane-wise `==`.
    fn simd_eq(self, other: Self) -> Self;

    /// Lane-wise `<`.
    fn simd_lt(self, other: Self) -> Self;

    /// Lane-wise `>`.
    fn simd_gt(self, other: Self) -> Self;

    /// Lane-wise `!=`. For floats this is true when either lane is NaN.
    #[inline(always)]
    fn simd_ne(self, other: Self) -> Self {
        !self.simd_eq(other)
    }

    /// Lane-wise `<=`.
    #[inline(always)]
    fn simd_le(self, other: Self) -> Self {
        !self.simd_gt(other)
    }

    /// Lane-wise `>=`.
    #[inline(always)]
    fn simd_ge(self, other: Self) -> Self {
        !self.simd_lt(other)
    }

    /// Lane-wise minimum.
    ///
    /// Floats return `other`'s lane when either lane is NaN.
    fn min(self, other: Self) -> Self;

    /// Lane-wise maximum.
    ///
    /// Floats return `other`'s lane when either lane is NaN.
    fn max(self, other: Self) -> Self;

    /// Lane-wise select with `self` as the mask:
    /// `when_true[i]` where the mask lane is all-ones, `when_false[i]` where it is zero.
    fn then_else(self, when_true: Self, when_false: Self) -> Self;

    /// True iff every lane of the mask is all-ones.
    fn all_true(self) -> bool;

    /// True iff some lane of the mask has any bit set.
    fn any_true(self) -> bool;

    /// Load the first `LANES` elements of `src`.
    ///
    /// # Panics
    /// Panics if `src.len() < LANES`.
    #[inline(always)]
    fn from_slice(src: &[Self::Lane]) -> Self {
        assert!(
            src.len() >= Self::LANES,
            "slice of {} elements too short for {} lanes",
            src.len(),
            Self::LANES
        );
        // SAFETY: the slice covers LANES elements; load needs no alignment.
        unsafe { Self::load(src.as_ptr().cast()) }
    }

    /// Load the first `LANES` elements of `src`, or fail if it is too short.
    #[inline]
    fn try_from_slice(src: &[Self::Lane]) -> Result<Self> {
        Error::check_len(Self::LANES, src.len())?;
        // SAFETY: length checked above.
        Ok(unsafe { Self::load(src.as_ptr().cast()) })
    }

    /// Store all lanes into the first `LANES` elements of `dst`.
    ///
    /// # Panics
    /// Panics if `dst.len() < LANES`.
    #[inline(always)]
    fn write_to_slice(self, dst: &mut [Self::Lane]) {
        assert!(
            dst.len() >= Self::LANES,
            "slice of {} elements too short for {} lanes",
            dst.len(),
            Self::LANES
        );
        // SAFETY: the slice covers LANES elements; store needs no alignment.
        unsafe { self.store(dst.as_mut_ptr().cast()) }
    }

    /// Store all lanes into `dst`, or fail if it is too short.
    #[inline]
    fn try_write_to_slice(self, dst: &mut [Self::Lane]) -> Result<()> {
        Error::check_len(Self::LANES, dst.len())?;
        // SAFETY: length checked above.
        unsafe { self.store(dst.as_mut_ptr().cast()) };
        Ok(())
    }

    /// Load from the first `BYTES` bytes of `src`.
    ///
    /// # Panics
    /// Panics if `src.len() < BYTES`.
    #[inline(always)]
    fn load_bytes(src: &[u8]) -> Self {
        assert!(
            src.len() >= Self::BYTES,
            "buffer of {} bytes too short for {} bytes",
            src.len(),
            Self::BYTES
        );
        // SAFETY: the buffer covers BYTES bytes.
        unsafe { Self::load(src.as_ptr()) }
    }

    /// Store into the first `BYTES` bytes of `dst`.
    ///
    /// # Panics
    /// Panics if `dst.len() < BYTES`.
    #[inline(always)]
    fn store_bytes(self, dst: &mut [u8]) {
        assert!(
            dst.len() >= Self::BYTES,
            "buffer of {} bytes too short for {} bytes",
            dst.len(),
            Self::BYTES
        );
        // SAFETY: the buffer covers BYTES bytes.
        unsafe { self.store(dst.as_mut_ptr()) }
    }
}

/// Float-only operations.
pub trait SimdFloat: SimdVector<Lane = f32> + Mul<Output = Self> + Div<Output = Self> {
    /// Same-width vector of `u32` lanes for bit reinterpretation.
    type Bits: SimdVector<Lane = u32>;

    /// Exact square root.
    fn sqrt(self) -> Self;

    /// Fast approximate `1 / sqrt(x)`. Not bit-exact across backends.
    fn rsqrt(self) -> Self;

    /// Fast approximate `1 / x`. Not bit-exact across backends; use `/` for exact division.
    fn invert(self) -> Self;

    /// Round toward negative infinity.
    fn floor(self) -> Self;

    /// Clear the sign bit of every lane.
    fn abs(self) -> Self;

    /// Reinterpret lane bits as `u32`.
    fn to_bits(self) -> Self::Bits;

    /// Reinterpret `u32` lane bits as `f32`.
    fn from_bits(bits: Self::Bits) -> Self;

    /// Multiply-add: `(self * a) + b`, rounded after each step.
    ///
    /// Never fused, so every backend produces the same bits.
    #[inline(always)]
    fn mul_add(self, a: Self, b: Self) -> Self {
        self * a + b
    }

    /// Negative multiply-add: `b - (self * a)`.
    #[inline(always)]
    fn neg_mul_add(self, a: Self, b: Self) -> Self {
        b - self * a
    }

    /// Horizontal sum of all lanes, accumulated in lane order.
    #[inline]
    fn sum(self) -> f32 {
        (1..Self::LANES).fold(self.lane(0), |acc, i| acc + self.lane(i))
    }

    /// Horizontal minimum of all lanes.
    #[inline]
    fn horizontal_min(self) -> f32 {
        (1..Self::LANES).fold(self.lane(0), |acc, i| acc.min(self.lane(i)))
    }

    /// Horizontal maximum of all lanes.
    #[inline]
    fn horizontal_max(self) -> f32 {
        (1..Self::LANES).fold(self.lane(0), |acc, i| acc.max(self.lane(i)))
    }
}

/// Float to `i32` conversion with rounding rather than truncation.
pub trait RoundToInt: SimdFloat {
    /// Same-width vector of `i32` lanes.
    type Int: SimdVector<Lane = i32>;

    /// Round to nearest, ties to even.
    ///
    /// NaN and values outside the `i32` range produce `i32::MIN`.
    fn round(self) -> Self::Int;
}

/// Addition that clamps to the lane type's maximum instead of wrapping.
pub trait SaturatingAdd: SimdVector {
    /// Lane-wise saturating add: `200u8 + 100u8 == 255`.
    fn saturating_add(self, other: Self) -> Self;
}

/// Split a vector into two half-width vectors and join them back.
///
/// Lane order is preserved: `lo[i] == wide[i]`, `hi[i] == wide[LANES / 2 + i]`.
pub trait Halves: SimdVector {
    /// The half-width vector kind.
    type Half: SimdVector<Lane = Self::Lane>;

    /// Partition into low and high halves.
    fn split(self) -> (Self::Half, Self::Half);

    /// Recombine two halves; the inverse of [`split`](Self::split).
    fn join(lo: Self::Half, hi: Self::Half) -> Self;
}

/// Four-channel interleaved load and store (an `N x 4` transpose).
///
/// The interleaved layout holds `LANES` tuples `(c0, c1, c2, c3)` back to back.
/// `load4` returns one vector per channel; `store4` is its exact inverse.
pub trait Interleave4: SimdVector {
    /// Deinterleave `4 * BYTES` bytes starting at `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of `4 * BYTES` bytes. No alignment is required.
    unsafe fn load4_raw(ptr: *const u8) -> (Self, Self, Self, Self);

    /// Interleave four channel vectors into `4 * BYTES` bytes starting at `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writes of `4 * BYTES` bytes. No alignment is required.
    unsafe fn store4_raw(ptr: *mut u8, c0: Self, c1: Self, c2: Self, c3: Self);

    /// Deinterleave the first `4 * LANES` elements of `src`.
    ///
    /// # Panics
    /// Panics if `src.len() < 4 * LANES`.
    #[inline(always)]
    fn load4(src: &[Self::Lane]) -> (Self, Self, Self, Self) {
        assert!(
            src.len() >= 4 * Self::LANES,
            "slice of {} elements too short for 4 x {} lanes",
            src.len(),
            Self::LANES
        );
        // SAFETY: the slice covers 4 * LANES elements.
        unsafe { Self::load4_raw(src.as_ptr().cast()) }
    }

    /// Deinterleave the first `4 * LANES` elements of `src`, or fail if it is too short.
    #[inline]
    fn try_load4(src: &[Self::Lane]) -> Result<(Self, Self, Self, Self)> {
        Error::check_len(4 * Self::LANES, src.len())?;
        // SAFETY: length checked above.
        Ok(unsafe { Self::load4_raw(src.as_ptr().cast()) })
    }

    /// Interleave four channels into the first `4 * LANES` elements of `dst`.
    ///
    /// # Panics
    /// Panics if `dst.len() < 4 * LANES`.
    #[inline(always)]
    fn store4(dst: &mut [Self::Lane], c0: Self, c1: Self, c2: Self, c3: Self) {
        assert!(
            dst.len() >= 4 * Self::LANES,
            "slice of {} elements too short for 4 x {} lanes",
            dst.len(),
            Self::LANES
        );
        // SAFETY: the slice covers 4 * LANES elements.
        unsafe { Self::store4_raw(dst.as_mut_ptr().cast(), c0, c1, c2, c3) }
    }

    /// Interleave four channels into `dst`, or fail if it is too short.
    #[inline]
    fn try_store4(dst: &mut [Self::Lane], c0: Self, c1: Self, c2: Self, c3: Self) -> Result<()> {
        Error::check_len(4 * Self::LANES, dst.len())?;
        // SAFETY: length checked above.
        unsafe { Self::store4_raw(dst.as_mut_ptr().cast(), c0, c1, c2, c3) };
        Ok(())
    }
}

/// Lane-count preserving element type conversion.
///
/// | Direction          | Rule                                          |
/// |--------------------|-----------------------------------------------|
/// | int → f32          | IEEE round-to-nearest (exact below 2^24)      |
/// | f32 → i32          | truncate toward zero; NaN/out of range → `i32::MIN` |
/// | f32 → u8/u16       | truncate, then saturate                       |
/// | wide int → narrow  | saturate to the destination range             |
/// | narrow int → wide  | zero-extend unsigned, sign-extend signed      |
/// | i32 ↔ u32          | bit reinterpretation                          |
pub trait LaneCast<Dst> {
    /// Convert every lane to the destination lane type.
    fn cast(self) -> Dst;
}

/// Free-function form of [`LaneCast::cast`]: `cast::<F32x4, _>(bytes)`.
#[inline(always)]
pub fn cast<Dst, Src: LaneCast<Dst>>(src: Src) -> Dst {
    src.cast()
}
