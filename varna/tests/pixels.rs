//! End-to-end pixel conversion tests.
//!
//! Runs whole images through `read_pixels` and loads jobs from YAML files.

mod common;

use std::io::Write;

use approx::assert_relative_eq;
use tempfile::NamedTempFile;
use varna::half::{load_half4, store_half4};
use varna::{
    AlphaType, BackendKind, ColorType, ConversionConfig, Error, F32x4, PixelInfo, SimdVector,
    clamp_f16, read_pixels,
};

fn info(width: usize, height: usize, color_type: ColorType, alpha_type: AlphaType) -> PixelInfo {
    PixelInfo::new(width, height, color_type, alpha_type)
}

// ============================================================================
// 8888 swizzles
// ============================================================================

#[test]
fn test_rgba_to_bgra_multi_row_with_padding() {
    let (width, height, padding) = (37, 3, 12);
    let row_bytes = width * 4 + padding;
    let mut src = vec![0u8; row_bytes * height];
    for y in 0..height {
        let row = common::bytes(width * 4, 100 + y as u32);
        src[y * row_bytes..][..width * 4].copy_from_slice(&row);
    }

    let src_info = info(width, height, ColorType::Rgba8888, AlphaType::Premul);
    let dst_info = info(width, height, ColorType::Bgra8888, AlphaType::Premul);
    let mut dst = vec![0xAAu8; row_bytes * height];
    read_pixels(&src_info, &src, row_bytes, &dst_info, &mut dst, row_bytes).unwrap();

    for y in 0..height {
        let s = &src[y * row_bytes..][..width * 4];
        let d = &dst[y * row_bytes..][..row_bytes];
        for (sp, dp) in s.chunks_exact(4).zip(d.chunks_exact(4)) {
            assert_eq!([dp[0], dp[1], dp[2], dp[3]], [sp[2], sp[1], sp[0], sp[3]]);
        }
        // Padding bytes are left alone.
        assert!(d[width * 4..].iter().all(|&b| b == 0xAA));
    }
}

#[test]
fn test_same_format_copy_is_identity() {
    let width = 64;
    let src = common::gradient_rgba(width);
    let src_info = info(width, 1, ColorType::Rgba8888, AlphaType::Unpremul);
    let mut dst = vec![0u8; src.len()];
    read_pixels(&src_info, &src, width * 4, &src_info, &mut dst, width * 4).unwrap();
    assert_eq!(dst, src);
}

// ============================================================================
// Float formats
// ============================================================================

#[test]
fn test_8888_through_f16_round_trip() {
    let width = 19;
    let src = common::gradient_rgba(width);
    let src_info = info(width, 1, ColorType::Rgba8888, AlphaType::Unpremul);
    let mid_info = info(width, 1, ColorType::RgbaF16, AlphaType::Unpremul);

    let mut mid = vec![0u8; width * 8];
    read_pixels(&src_info, &src, width * 4, &mid_info, &mut mid, width * 8).unwrap();

    let first = load_half4(&mid[..8]);
    assert_relative_eq!(first.lane(0), src[0] as f32 / 255.0, max_relative = 1e-3);
    assert_eq!(first.lane(3), 1.0);

    let mut back = vec![0u8; width * 4];
    read_pixels(&mid_info, &mid, width * 8, &src_info, &mut back, width * 4).unwrap();
    assert_eq!(back, src);
}

#[test]
fn test_bgra_to_f32_swaps_channels() {
    let src = [255u8, 0, 51, 255];
    let src_info = info(1, 1, ColorType::Bgra8888, AlphaType::Premul);
    let dst_info = info(1, 1, ColorType::RgbaF32, AlphaType::Premul);
    let mut dst = [0u8; 16];
    read_pixels(&src_info, &src, 4, &dst_info, &mut dst, 16).unwrap();

    let px = F32x4::load_bytes(&dst);
    assert_relative_eq!(px.lane(0), 0.2, epsilon = 1e-6);
    assert_eq!(px.lane(1), 0.0);
    assert_eq!(px.lane(2), 1.0);
    assert_eq!(px.lane(3), 1.0);
}

#[test]
fn test_f32_to_8888_clamps_and_rounds() {
    let mut src = [0u8; 32];
    F32x4::new(-0.5, 1.5, 0.5, 1.0).store_bytes(&mut src[..16]);
    F32x4::new(0.1, 0.9, 0.0, 1.0).store_bytes(&mut src[16..]);
    let src_info = info(2, 1, ColorType::RgbaF32, AlphaType::Unpremul);
    let dst_info = info(2, 1, ColorType::Rgba8888, AlphaType::Unpremul);
    let mut dst = [0u8; 8];
    read_pixels(&src_info, &src, 32, &dst_info, &mut dst, 8).unwrap();
    // 0.5 * 255 + 0.5 = 128.0; 0.1 * 255 + 0.5 = 26.0; 0.9 * 255 + 0.5 = 230.0
    assert_eq!(dst, [0, 255, 128, 255, 26, 230, 0, 255]);
}

#[test]
fn test_premul_f32_to_unpremul_8888() {
    let mut src = [0u8; 16];
    F32x4::new(0.25, 0.125, 0.0, 0.5).store_bytes(&mut src);
    let src_info = info(1, 1, ColorType::RgbaF32, AlphaType::Premul);
    let dst_info = info(1, 1, ColorType::Rgba8888, AlphaType::Unpremul);
    let mut dst = [0u8; 4];
    read_pixels(&src_info, &src, 16, &dst_info, &mut dst, 4).unwrap();
    assert_eq!(dst, [128, 64, 0, 128]);
}

#[test]
fn test_unpremul_to_premul_multiplies() {
    let src = [255u8, 128, 0, 0, 255, 255, 255, 255];
    let src_info = info(2, 1, ColorType::Rgba8888, AlphaType::Unpremul);
    let dst_info = info(2, 1, ColorType::Rgba8888, AlphaType::Premul);
    let mut dst = [0u8; 8];
    read_pixels(&src_info, &src, 8, &dst_info, &mut dst, 8).unwrap();
    assert_eq!(dst, [0, 0, 0, 0, 255, 255, 255, 255]);
}

// ============================================================================
// F16 clamping
// ============================================================================

#[test]
fn test_clamp_f16_in_place() {
    let mut pixels = [0u8; 16];
    store_half4(F32x4::new(2.0, -1.0, 0.5, 0.75), &mut pixels[..8]);
    store_half4(F32x4::new(0.5, 0.25, 0.125, 1.5), &mut pixels[8..]);

    let premul = info(2, 1, ColorType::RgbaF16, AlphaType::Premul);
    clamp_f16(&premul, &mut pixels, 16).unwrap();

    // Premultiplied color never exceeds alpha.
    assert_eq!(load_half4(&pixels[..8]).to_array(), [0.75, 0.0, 0.5, 0.75]);
    assert_eq!(load_half4(&pixels[8..]).to_array(), [0.5, 0.25, 0.125, 1.0]);
}

#[test]
fn test_clamp_f16_skips_other_formats() {
    let original = common::bytes(16, 9);
    let mut pixels = original.clone();
    let rgba = info(4, 1, ColorType::Rgba8888, AlphaType::Premul);
    clamp_f16(&rgba, &mut pixels, 16).unwrap();
    assert_eq!(pixels, original);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_dimension_mismatch() {
    let src_info = info(4, 4, ColorType::Rgba8888, AlphaType::Premul);
    let dst_info = info(4, 3, ColorType::Rgba8888, AlphaType::Premul);
    let src = vec![0u8; 64];
    let mut dst = vec![0u8; 48];
    let err = read_pixels(&src_info, &src, 16, &dst_info, &mut dst, 16).unwrap_err();
    assert!(matches!(err, Error::InvalidDimensions { width: 4, height: 3 }));
}

#[test]
fn test_short_buffers_and_strides() {
    let src_info = info(4, 2, ColorType::Rgba8888, AlphaType::Premul);
    let dst_info = info(4, 2, ColorType::RgbaF32, AlphaType::Premul);
    let src = vec![0u8; 32];
    let mut dst = vec![0u8; 64];

    let err = read_pixels(&src_info, &src, 8, &dst_info, &mut dst, 64).unwrap_err();
    assert!(matches!(err, Error::RowBytesTooSmall { row_bytes: 8, min: 16 }));

    let err = read_pixels(&src_info, &src, 16, &dst_info, &mut dst, 64).unwrap_err();
    assert!(matches!(err, Error::BufferTooShort { needed: 128, actual: 64 }));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_load_config_file_and_convert() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "image:\n  width: 20\n  height: 2\n  row_padding: 4\n\
         source:\n  color_type: bgra8888\n  alpha_type: unpremul\n\
         destination:\n  color_type: rgba_f32\n"
    )
    .unwrap();

    let config = ConversionConfig::load(file.path()).unwrap();
    assert_eq!(config.image.width, 20);
    assert_eq!(config.source.color_type, ColorType::Bgra8888);
    assert_eq!(config.destination.alpha_type, AlphaType::Premul);
    assert_eq!(config.source_row_bytes().unwrap(), 84);
    assert_eq!(config.destination_row_bytes().unwrap(), 324);
    assert!(config.check_backend());

    let src_info = config.source_info();
    let dst_info = config.destination_info();
    let src_row_bytes = config.source_row_bytes().unwrap();
    let dst_row_bytes = config.destination_row_bytes().unwrap();
    let mut src = vec![0u8; src_info.byte_size(src_row_bytes).unwrap()];
    for y in 0..2 {
        src[y * src_row_bytes..][..80].copy_from_slice(&common::gradient_rgba(20));
    }
    let mut dst = vec![0u8; dst_info.byte_size(dst_row_bytes).unwrap()];
    read_pixels(&src_info, &src, src_row_bytes, &dst_info, &mut dst, dst_row_bytes).unwrap();

    // gradient_rgba starts with (0, 255, 0, 255) stored as BGRA.
    let px = F32x4::load_bytes(&dst[dst_row_bytes..][..16]);
    assert_eq!(px.to_array(), [0.0, 1.0, 0.0, 1.0]);
}

#[test]
fn test_config_backend_mismatch_is_reported() {
    let other = if varna::backend::active() == BackendKind::Scalar {
        BackendKind::Sse41
    } else {
        BackendKind::Scalar
    };
    let yaml = format!("expected_backend: {}\n", other.name());
    let config = ConversionConfig::from_yaml(&yaml).unwrap();
    assert_eq!(config.expected_backend, Some(other));
    assert!(!config.check_backend());
}

#[test]
fn test_config_bad_yaml() {
    let err = ConversionConfig::from_yaml("image: [1, 2").unwrap_err();
    assert!(matches!(err, Error::Parse(_)));

    let err = ConversionConfig::load(std::path::Path::new("/nonexistent/varna.yaml")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
