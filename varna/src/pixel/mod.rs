//! Pixel-row conversion on top of the vector core.
//!
//! Converts whole images between the four supported color types and between
//! premultiplied and unpremultiplied alpha. Every pixel travels as one
//! [`F32x4`] holding `(r, g, b, a)` in `0.0..=1.0` (F16/F32 formats may carry
//! values outside that range). Pure 8888 channel reorders skip the float path
//! and swizzle 16 pixels at a time through [`U8x16`] interleaved load/store.
//!
//! ```text
//!   src row ──load_pixel──► F32x4 rgba ──alpha──► F32x4 ──store_pixel──► dst row
//!                                                              │
//!                                                  RgbaF16 ──► clamp_f16_row
//! ```

mod clamp;

pub use clamp::clamp_f16;

use serde::{Deserialize, Serialize};

use crate::backend::{self, F32x4, U8x4, U8x16};
use crate::error::{Error, Result};
use crate::half::{load_half4, store_half4};
use crate::vector::{Interleave4, LaneCast, SimdVector};

/// Memory layout of one pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorType {
    /// 8-bit unorm channels in R, G, B, A byte order.
    Rgba8888,
    /// 8-bit unorm channels in B, G, R, A byte order.
    Bgra8888,
    /// IEEE half-float channels, R, G, B, A.
    RgbaF16,
    /// `f32` channels, R, G, B, A.
    RgbaF32,
}

impl ColorType {
    /// Bytes occupied by one pixel.
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            ColorType::Rgba8888 | ColorType::Bgra8888 => 4,
            ColorType::RgbaF16 => 8,
            ColorType::RgbaF32 => 16,
        }
    }

    /// True for the two 8-bit unorm layouts.
    pub const fn is_8888(self) -> bool {
        matches!(self, ColorType::Rgba8888 | ColorType::Bgra8888)
    }
}

/// How color channels relate to alpha.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlphaType {
    /// Color channels already multiplied by alpha.
    #[default]
    Premul,
    /// Color channels independent of alpha.
    Unpremul,
}

/// Dimensions and format of a pixel buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelInfo {
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
    /// Per-pixel layout.
    pub color_type: ColorType,
    /// Alpha interpretation.
    #[serde(default)]
    pub alpha_type: AlphaType,
}

impl PixelInfo {
    /// Describe a `width` x `height` image.
    pub fn new(width: usize, height: usize, color_type: ColorType, alpha_type: AlphaType) -> Self {
        Self {
            width,
            height,
            color_type,
            alpha_type,
        }
    }

    /// Bytes in one tightly packed row, or `None` if that overflows `usize`.
    pub fn min_row_bytes(&self) -> Option<usize> {
        self.width.checked_mul(self.color_type.bytes_per_pixel())
    }

    /// Bytes spanned by the image with the given row stride (the last row is not padded).
    ///
    /// `None` if the span does not fit in `usize`.
    pub fn byte_size(&self, row_bytes: usize) -> Option<usize> {
        match self.height {
            0 => Some(0),
            h => row_bytes
                .checked_mul(h - 1)?
                .checked_add(self.min_row_bytes()?),
        }
    }

    /// Check that a buffer of `len` bytes with stride `row_bytes` holds this image.
    ///
    /// Returns the packed row length on success.
    pub fn validate(&self, row_bytes: usize, len: usize) -> Result<usize> {
        let invalid = || Error::InvalidDimensions {
            width: self.width,
            height: self.height,
        };
        if self.width == 0 || self.height == 0 {
            return Err(invalid());
        }
        let min = self.min_row_bytes().ok_or_else(invalid)?;
        if row_bytes < min {
            return Err(Error::RowBytesTooSmall { row_bytes, min });
        }
        let needed = self.byte_size(row_bytes).ok_or_else(invalid)?;
        Error::check_len(needed, len)?;
        Ok(min)
    }
}

/// Convert `src` into `dst`, changing color type and alpha type as needed.
///
/// Both images must have the same dimensions. F16 destinations are clamped
/// with [`clamp_f16`] rules after conversion.
pub fn read_pixels(
    src_info: &PixelInfo,
    src: &[u8],
    src_row_bytes: usize,
    dst_info: &PixelInfo,
    dst: &mut [u8],
    dst_row_bytes: usize,
) -> Result<()> {
    backend::log_active();

    if (src_info.width, src_info.height) != (dst_info.width, dst_info.height) {
        return Err(Error::InvalidDimensions {
            width: dst_info.width,
            height: dst_info.height,
        });
    }
    let src_packed = src_info.validate(src_row_bytes, src.len())?;
    let dst_packed = dst_info.validate(dst_row_bytes, dst.len())?;

    let swizzle_only = src_info.color_type.is_8888()
        && dst_info.color_type.is_8888()
        && src_info.alpha_type == dst_info.alpha_type;
    let swap_rb = src_info.color_type != dst_info.color_type;

    log::debug!(
        "[Varna] read_pixels {}x{}: {:?}/{:?} -> {:?}/{:?} ({})",
        src_info.width,
        src_info.height,
        src_info.color_type,
        src_info.alpha_type,
        dst_info.color_type,
        dst_info.alpha_type,
        if swizzle_only { "swizzle" } else { "float" }
    );

    for y in 0..src_info.height {
        let src_row = &src[y * src_row_bytes..][..src_packed];
        let dst_row = &mut dst[y * dst_row_bytes..][..dst_packed];

        if swizzle_only {
            swizzle_row(src_row, dst_row, swap_rb);
        } else {
            convert_row(src_info, src_row, dst_info, dst_row);
        }
        if dst_info.color_type == ColorType::RgbaF16 {
            clamp::clamp_f16_row(dst_row, dst_info.alpha_type);
        }
        log::trace!("[Varna] row {} converted", y);
    }
    Ok(())
}

/// Copy 8888 pixels, optionally exchanging the R and B channels.
fn swizzle_row(src: &[u8], dst: &mut [u8], swap_rb: bool) {
    let mut src_blocks = src.chunks_exact(4 * U8x16::LANES);
    let mut dst_blocks = dst.chunks_exact_mut(4 * U8x16::LANES);

    for (s, d) in (&mut src_blocks).zip(&mut dst_blocks) {
        let (r, g, b, a) = U8x16::load4(s);
        if swap_rb {
            U8x16::store4(d, b, g, r, a);
        } else {
            U8x16::store4(d, r, g, b, a);
        }
    }

    let tail = src_blocks.remainder().chunks_exact(4);
    for (s, d) in tail.zip(dst_blocks.into_remainder().chunks_exact_mut(4)) {
        d.copy_from_slice(s);
        if swap_rb {
            d.swap(0, 2);
        }
    }
}

fn convert_row(src_info: &PixelInfo, src: &[u8], dst_info: &PixelInfo, dst: &mut [u8]) {
    let src_pixels = src.chunks_exact(src_info.color_type.bytes_per_pixel());
    let dst_pixels = dst.chunks_exact_mut(dst_info.color_type.bytes_per_pixel());

    for (s, d) in src_pixels.zip(dst_pixels) {
        let rgba = load_pixel(src_info.color_type, s);
        let rgba = convert_alpha(rgba, src_info.alpha_type, dst_info.alpha_type);
        store_pixel(dst_info.color_type, rgba, d);
    }
}

#[inline]
fn swap_rb(v: F32x4) -> F32x4 {
    F32x4::new(v.lane(2), v.lane(1), v.lane(0), v.lane(3))
}

#[inline]
fn from_unorm8(v: U8x4) -> F32x4 {
    LaneCast::<F32x4>::cast(v) * F32x4::splat(1.0 / 255.0)
}

#[inline]
fn to_unorm8(v: F32x4) -> U8x4 {
    let clamped = F32x4::splat(0.0).max(v.min(F32x4::splat(1.0)));
    (clamped * F32x4::splat(255.0) + F32x4::splat(0.5)).cast()
}

fn load_pixel(color_type: ColorType, px: &[u8]) -> F32x4 {
    match color_type {
        ColorType::Rgba8888 => from_unorm8(U8x4::load_bytes(px)),
        ColorType::Bgra8888 => swap_rb(from_unorm8(U8x4::load_bytes(px))),
        ColorType::RgbaF16 => load_half4(px),
        ColorType::RgbaF32 => F32x4::load_bytes(px),
    }
}

fn store_pixel(color_type: ColorType, rgba: F32x4, px: &mut [u8]) {
    match color_type {
        ColorType::Rgba8888 => to_unorm8(rgba).store_bytes(px),
        ColorType::Bgra8888 => to_unorm8(swap_rb(rgba)).store_bytes(px),
        ColorType::RgbaF16 => store_half4(rgba, px),
        ColorType::RgbaF32 => rgba.store_bytes(px),
    }
}

fn convert_alpha(rgba: F32x4, from: AlphaType, to: AlphaType) -> F32x4 {
    let a = rgba.lane(3);
    match (from, to) {
        (AlphaType::Premul, AlphaType::Unpremul) => {
            let scale = if a == 0.0 { 0.0 } else { 1.0 / a };
            rgba * F32x4::new(scale, scale, scale, 1.0)
        }
        (AlphaType::Unpremul, AlphaType::Premul) => rgba * F32x4::new(a, a, a, 1.0),
        _ => rgba,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rgba_image(width: usize) -> Vec<u8> {
        (0..width * 4).map(|i| (i * 7 % 256) as u8).collect()
    }

    #[test]
    fn test_bytes_per_pixel() {
        assert_eq!(ColorType::Rgba8888.bytes_per_pixel(), 4);
        assert_eq!(ColorType::RgbaF16.bytes_per_pixel(), 8);
        assert_eq!(ColorType::RgbaF32.bytes_per_pixel(), 16);
        let info = PixelInfo::new(10, 3, ColorType::RgbaF16, AlphaType::Premul);
        assert_eq!(info.min_row_bytes(), Some(80));
        assert_eq!(info.byte_size(96), Some(96 * 2 + 80));
    }

    #[test]
    fn test_oversized_dimensions_are_rejected() {
        let wide = PixelInfo::new(usize::MAX / 4 + 1, 1, ColorType::Rgba8888, AlphaType::Premul);
        assert_eq!(wide.min_row_bytes(), None);
        assert!(matches!(
            wide.validate(0, 0),
            Err(Error::InvalidDimensions { .. })
        ));

        let src = [0u8; 16];
        let mut dst = [0u8; 16];
        assert!(matches!(
            read_pixels(&wide, &src, 16, &wide, &mut dst, 16),
            Err(Error::InvalidDimensions { .. })
        ));

        // Packed row fits, but the stride times the row count does not.
        let tall = PixelInfo::new(1, 3, ColorType::RgbaF32, AlphaType::Premul);
        assert_eq!(tall.byte_size(usize::MAX / 2 + 1), None);
        assert!(matches!(
            tall.validate(usize::MAX / 2 + 1, 64),
            Err(Error::InvalidDimensions {
                width: 1,
                height: 3
            })
        ));
        assert_eq!(tall.validate(16, 48).unwrap(), 16);
    }

    #[test]
    fn test_swizzle_blocks_and_tail() {
        // 20 pixels: one 16-pixel block plus a 4-pixel tail.
        let width = 20;
        let src = rgba_image(width);
        let src_info = PixelInfo::new(width, 1, ColorType::Rgba8888, AlphaType::Premul);
        let dst_info = PixelInfo::new(width, 1, ColorType::Bgra8888, AlphaType::Premul);
        let mut dst = vec![0u8; width * 4];
        read_pixels(&src_info, &src, width * 4, &dst_info, &mut dst, width * 4).unwrap();

        for (s, d) in src.chunks_exact(4).zip(dst.chunks_exact(4)) {
            assert_eq!([d[0], d[1], d[2], d[3]], [s[2], s[1], s[0], s[3]]);
        }
    }

    #[test]
    fn test_8888_to_f32_is_exact() {
        let src = [0u8, 51, 255, 255];
        let src_info = PixelInfo::new(1, 1, ColorType::Rgba8888, AlphaType::Unpremul);
        let dst_info = PixelInfo::new(1, 1, ColorType::RgbaF32, AlphaType::Unpremul);
        let mut dst = [0u8; 16];
        read_pixels(&src_info, &src, 4, &dst_info, &mut dst, 16).unwrap();
        let px = F32x4::load_bytes(&dst);
        assert_relative_eq!(px.lane(1), 0.2, epsilon = 1e-6);
        assert_eq!(px.lane(2), 1.0);

        let mut back = [0u8; 4];
        read_pixels(&dst_info, &dst, 16, &src_info, &mut back, 4).unwrap();
        assert_eq!(back, src);
    }

    #[test]
    fn test_unpremul_divides_by_alpha() {
        let src = [64u8, 32, 0, 128, 10, 20, 30, 0];
        let src_info = PixelInfo::new(2, 1, ColorType::Rgba8888, AlphaType::Premul);
        let dst_info = PixelInfo::new(2, 1, ColorType::Rgba8888, AlphaType::Unpremul);
        let mut dst = [0u8; 8];
        read_pixels(&src_info, &src, 8, &dst_info, &mut dst, 8).unwrap();
        assert_eq!(&dst[..4], &[128, 64, 0, 128]);
        // Zero alpha unpremultiplies to transparent black.
        assert_eq!(&dst[4..], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_f16_destination_is_clamped() {
        let mut src = [0u8; 16];
        F32x4::new(1.5, -0.5, 0.25, 1.0).store_bytes(&mut src);
        let src_info = PixelInfo::new(1, 1, ColorType::RgbaF32, AlphaType::Unpremul);
        let dst_info = PixelInfo::new(1, 1, ColorType::RgbaF16, AlphaType::Unpremul);
        let mut dst = [0u8; 8];
        read_pixels(&src_info, &src, 16, &dst_info, &mut dst, 8).unwrap();
        assert_eq!(load_half4(&dst).to_array(), [1.0, 0.0, 0.25, 1.0]);
    }

    #[test]
    fn test_rejects_bad_buffers() {
        let info = PixelInfo::new(4, 2, ColorType::Rgba8888, AlphaType::Premul);
        let src = [0u8; 32];
        let mut dst = [0u8; 31];
        assert!(matches!(
            read_pixels(&info, &src, 16, &info, &mut dst, 16),
            Err(Error::BufferTooShort {
                needed: 32,
                actual: 31
            })
        ));
        let mut dst = [0u8; 32];
        assert!(matches!(
            read_pixels(&info, &src, 8, &info, &mut dst, 16),
            Err(Error::RowBytesTooSmall { row_bytes: 8, min: 16 })
        ));
        let other = PixelInfo::new(2, 4, ColorType::Rgba8888, AlphaType::Premul);
        assert!(matches!(
            read_pixels(&info, &src, 16, &other, &mut dst, 8),
            Err(Error::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_pixel_info_yaml() {
        let info = PixelInfo::new(8, 4, ColorType::Bgra8888, AlphaType::Unpremul);
        let yaml = serde_yaml::to_string(&info).unwrap();
        assert!(yaml.contains("bgra8888"));
        let back: PixelInfo = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, info);
    }
}
