//! IEEE 754 half-float conversion on four lanes at a time.
//!
//! Built purely from the vector operation set, so both backends share it.
//! Both directions assume finite inputs within half range and flush
//! denormals to zero:
//!
//! | Input                     | Output                  |
//! |---------------------------|-------------------------|
//! | half denormal             | ±0.0                    |
//! | f32 below 2^-14 (rounded) | ±0 half                 |
//! | infinity / NaN / > 65504  | unspecified             |

use crate::backend::{F32x4, I32x4, U16x4, U32x4};
use crate::vector::{LaneCast, SimdFloat, SimdVector};

/// Exponent bias difference between f32 (127) and f16 (15), in f32 exponent position.
const REBIAS: u32 = (127 - 15) << 23;

/// Largest f32 (as bits) that still rounds below the smallest normal half, 2^-14.
const BELOW_MIN_NORMAL: u32 = 0x3880_0000 - 0x1000 - 1;

/// Widen four halves to f32.
#[inline]
pub fn half_to_float_finite_ftz(h: U16x4) -> F32x4 {
    let h: U32x4 = LaneCast::<I32x4>::cast(h).cast();
    let sign = h & U32x4::splat(0x8000);
    let positive = h ^ sign;
    let is_norm = positive.simd_gt(U32x4::splat(0x03ff));
    let norm = (positive << 13) + U32x4::splat(REBIAS);
    F32x4::from_bits((sign << 16) | (norm & is_norm))
}

/// Narrow four f32 lanes to halves, rounding half-up on the dropped mantissa bits.
#[inline]
pub fn float_to_half_finite_ftz(f: F32x4) -> U16x4 {
    let bits = f.to_bits();
    let sign = bits & U32x4::splat(0x8000_0000);
    let positive = bits ^ sign;
    let is_norm = positive.simd_gt(U32x4::splat(BELOW_MIN_NORMAL));
    let norm = (positive - U32x4::splat(REBIAS) + U32x4::splat(0x1000)) >> 13;
    let merged: I32x4 = ((sign >> 16) | (norm & is_norm)).cast();
    merged.cast()
}

/// Unpack one RGBA F16 pixel (8 bytes, native endian) to f32 lanes.
///
/// # Panics
/// Panics if `src` is shorter than 8 bytes.
#[inline]
pub fn load_half4(src: &[u8]) -> F32x4 {
    half_to_float_finite_ftz(U16x4::load_bytes(src))
}

/// Pack f32 lanes into one RGBA F16 pixel (8 bytes, native endian).
///
/// # Panics
/// Panics if `dst` is shorter than 8 bytes.
#[inline]
pub fn store_half4(v: F32x4, dst: &mut [u8]) {
    float_to_half_finite_ftz(v).store_bytes(dst);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_known_halves() {
        // 1.0, -2.0, 0.5, 65504
        let h = U16x4::new(0x3c00, 0xc000, 0x3800, 0x7bff);
        let f = half_to_float_finite_ftz(h);
        assert_eq!(f.to_array(), [1.0, -2.0, 0.5, 65504.0]);
    }

    #[test]
    fn test_denormals_flush_to_zero() {
        let h = U16x4::new(0x0001, 0x03ff, 0x8001, 0x0000);
        let f = half_to_float_finite_ftz(h);
        assert_eq!(f.to_bits().to_array(), [0, 0, 0x8000_0000, 0]);

        let tiny = F32x4::new(1e-6, -1e-6, 1e-10, 0.0);
        assert_eq!(
            float_to_half_finite_ftz(tiny).to_array(),
            [0, 0x8000, 0, 0]
        );
    }

    #[test]
    fn test_float_to_half() {
        let f = F32x4::new(1.0, -2.0, 0.5, 65504.0);
        assert_eq!(
            float_to_half_finite_ftz(f).to_array(),
            [0x3c00, 0xc000, 0x3800, 0x7bff]
        );
    }

    #[test]
    fn test_round_trip_precision() {
        let f = F32x4::new(0.1, 0.333, 0.75, 1234.5);
        let back = half_to_float_finite_ftz(float_to_half_finite_ftz(f));
        for i in 0..4 {
            assert_relative_eq!(back.lane(i), f.lane(i), max_relative = 1e-3);
        }
    }

    #[test]
    fn test_pixel_bytes() {
        let mut px = [0u8; 8];
        store_half4(F32x4::new(0.0, 0.25, 0.5, 1.0), &mut px);
        assert_eq!(load_half4(&px).to_array(), [0.0, 0.25, 0.5, 1.0]);
    }
}
