//! Lane type conversion tests.
//!
//! Narrowing casts saturate, float-to-int casts truncate toward zero and
//! `u8 <-> f32` round trips are exact for every byte value.

mod common;

use varna::{
    F32x4, F32x8, F32x16, I16x4, I16x8, I32x4, I32x8, LaneCast, RoundToInt, SimdVector, U8x4,
    U8x8, U8x16, U16x4, U16x8, U32x4, cast,
};

// ============================================================================
// Saturating narrowing
// ============================================================================

#[test]
fn test_i32_to_u8_saturates() {
    let v = I32x4::new(-1, 1000, 300, 42);
    let narrowed: U8x4 = cast(v);
    assert_eq!(narrowed.to_array(), [0, 255, 255, 42]);
}

#[test]
fn test_i32_to_u16_saturates() {
    let v = I32x4::new(-70_000, 70_000, 65_535, 1);
    let narrowed: U16x4 = cast(v);
    assert_eq!(narrowed.to_array(), [0, 65_535, 65_535, 1]);
}

#[test]
fn test_i32_to_i16_saturates() {
    let v = I32x4::new(i32::MIN, i32::MAX, -32_769, 32_767);
    let narrowed: I16x4 = cast(v);
    assert_eq!(narrowed.to_array(), [-32_768, 32_767, -32_768, 32_767]);
}

#[test]
fn test_u16_to_u8_saturates() {
    let v = U16x4::new(0, 255, 256, u16::MAX);
    let narrowed: U8x4 = cast(v);
    assert_eq!(narrowed.to_array(), [0, 255, 255, 255]);
}

#[test]
fn test_wide_narrowing_saturates() {
    let v = I32x8::from_array([-5, 0, 1, 65_535, 65_536, 1 << 20, -1 << 20, 7]);
    let narrowed: U16x8 = cast(v);
    assert_eq!(
        narrowed.to_array(),
        [0, 0, 1, 65_535, 65_535, 65_535, 0, 7]
    );

    let signed: I16x8 = cast(v);
    assert_eq!(
        signed.to_array(),
        [-5, 0, 1, 32_767, 32_767, 32_767, -32_768, 7]
    );
}

#[test]
fn test_f32_to_u8_saturates() {
    let v = F32x16::from_array([
        -1.0, 0.0, 0.9, 1.0, 254.9, 255.0, 256.0, 1000.0, -1000.0, 12.5, 99.99, 128.0, 3.0, 2.0,
        1.0, 0.0,
    ]);
    let narrowed: U8x16 = cast(v);
    assert_eq!(
        narrowed.to_array(),
        [0, 0, 0, 1, 254, 255, 255, 255, 0, 12, 99, 128, 3, 2, 1, 0]
    );

    let four: U8x4 = cast(F32x4::new(-3.0, 300.0, 17.8, 0.2));
    assert_eq!(four.to_array(), [0, 255, 17, 0]);
}

// ============================================================================
// Widening
// ============================================================================

#[test]
fn test_widening_preserves_values() {
    let bytes = U8x4::new(0, 1, 128, 255);
    let ints: I32x4 = cast(bytes);
    assert_eq!(ints.to_array(), [0, 1, 128, 255]);
    let halves: U16x4 = cast(bytes);
    assert_eq!(halves.to_array(), [0, 1, 128, 255]);

    let unsigned = U16x4::new(0, 1, 32_768, 65_535);
    let ints: I32x4 = cast(unsigned);
    assert_eq!(ints.to_array(), [0, 1, 32_768, 65_535]);

    let signed = I16x4::new(-32_768, -1, 0, 32_767);
    let ints: I32x4 = cast(signed);
    assert_eq!(ints.to_array(), [-32_768, -1, 0, 32_767]);
}

#[test]
fn test_wide_widening_preserves_values() {
    let halfwords = common::halfwords(8, 17);
    let v = U16x8::from_slice(&halfwords);

    let ints: I32x8 = cast(v);
    let floats: F32x8 = cast(v);
    for i in 0..8 {
        assert_eq!(ints.lane(i), i32::from(halfwords[i]));
        assert_eq!(floats.lane(i), f32::from(halfwords[i]));
    }

    let signed = I16x8::from_array([-300, -2, -1, 0, 1, 2, 300, i16::MIN]);
    let ints: I32x8 = cast(signed);
    assert_eq!(ints.to_array(), [-300, -2, -1, 0, 1, 2, 300, -32_768]);
}

#[test]
fn test_u8x8_u16x8_round_trip() {
    let bytes = common::bytes(8, 3);
    let v = U8x8::from_slice(&bytes);
    let wide: U16x8 = cast(v);
    for i in 0..8 {
        assert_eq!(wide.lane(i), u16::from(bytes[i]));
    }
    let back: U8x8 = cast(wide);
    assert_eq!(back, v);
}

// ============================================================================
// Exact u8 <-> f32
// ============================================================================

#[test]
fn test_u8_f32_round_trip_every_value() {
    let all: Vec<u8> = (0..=255).collect();
    for chunk in all.chunks_exact(16) {
        let v = U8x16::from_slice(chunk);
        let floats: F32x16 = cast(v);
        for (i, &b) in chunk.iter().enumerate() {
            assert_eq!(floats.lane(i), f32::from(b));
        }
        let back: U8x16 = cast(floats);
        assert_eq!(back, v);
    }
}

#[test]
fn test_u8x4_f32_round_trip_every_value() {
    for b in 0..=255u8 {
        let v = U8x4::new(b, b.wrapping_add(1), b.wrapping_mul(3), 255 - b);
        let floats: F32x4 = cast(v);
        let back: U8x4 = cast(floats);
        assert_eq!(back, v);
    }
}

// ============================================================================
// Float <-> int
// ============================================================================

#[test]
fn test_truncate_and_round_scenario() {
    let v = F32x4::new(1.0, -2.5, 3.99, -0.001);
    let truncated: I32x4 = cast(v);
    assert_eq!(truncated.to_array(), [1, -2, 3, 0]);
    // Ties go to even: -2.5 rounds to -2.
    assert_eq!(v.round().to_array(), [1, -2, 4, 0]);
}

#[test]
fn test_round_ties_to_even() {
    let v = F32x4::new(0.5, 1.5, 2.5, -3.5);
    assert_eq!(v.round().to_array(), [0, 2, 2, -4]);

    let wide = F32x8::from_array([0.5, 1.5, 2.5, -3.5, 0.49, 0.51, -0.49, -0.51]);
    assert_eq!(wide.round().to_array(), [0, 2, 2, -4, 0, 1, 0, -1]);
}

#[test]
fn test_f32_to_i32_out_of_range() {
    let v = F32x4::new(f32::NAN, 3.0e9, -3.0e9, f32::INFINITY);
    let ints: I32x4 = cast(v);
    assert_eq!(ints.to_array(), [i32::MIN; 4]);
}

#[test]
fn test_int_to_float() {
    let ints = common::ints(4, 5);
    let v = I32x4::from_slice(&ints);
    let floats: F32x4 = cast(v);
    for i in 0..4 {
        assert_eq!(floats.lane(i), ints[i] as f32);
    }
}

#[test]
fn test_u32_to_f32_uses_unsigned_value() {
    let v = U32x4::new(0, 65_535, 1 << 31, 16_777_216);
    let floats: F32x4 = cast(v);
    assert_eq!(floats.to_array(), [0.0, 65_535.0, 2_147_483_648.0, 16_777_216.0]);
}

#[test]
fn test_i32_u32_reinterpret_bits() {
    let v = I32x4::new(-1, 0, i32::MIN, 7);
    let bits: U32x4 = cast(v);
    assert_eq!(bits.to_array(), [u32::MAX, 0, 1 << 31, 7]);
    let back: I32x4 = LaneCast::cast(bits);
    assert_eq!(back, v);
}
