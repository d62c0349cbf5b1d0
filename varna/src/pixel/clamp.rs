//! F16 range clamping.
//!
//! Half-float pixels may hold values outside the displayable range after a
//! conversion. Unpremultiplied pixels clamp every channel to `0..=1`;
//! premultiplied pixels clamp alpha to `0..=1` and color channels to
//! `0..=alpha`.

use super::{AlphaType, ColorType, PixelInfo};
use crate::backend::F32x4;
use crate::error::Result;
use crate::half::{load_half4, store_half4};
use crate::vector::SimdVector;

/// Clamp every pixel of an F16 image in place.
///
/// Images of any other color type are left untouched.
pub fn clamp_f16(info: &PixelInfo, pixels: &mut [u8], row_bytes: usize) -> Result<()> {
    if info.color_type != ColorType::RgbaF16 {
        log::debug!(
            "[Varna] clamp_f16: {:?} is not F16, nothing to do",
            info.color_type
        );
        return Ok(());
    }
    let packed = info.validate(row_bytes, pixels.len())?;

    for y in 0..info.height {
        let row = &mut pixels[y * row_bytes..][..packed];
        clamp_f16_row(row, info.alpha_type);
    }
    Ok(())
}

pub(crate) fn clamp_f16_row(row: &mut [u8], alpha_type: AlphaType) {
    for px in row.chunks_exact_mut(ColorType::RgbaF16.bytes_per_pixel()) {
        let rgba = load_half4(px);
        let upper = match alpha_type {
            AlphaType::Unpremul => F32x4::splat(1.0),
            AlphaType::Premul => {
                let a = rgba.lane(3).clamp(0.0, 1.0);
                F32x4::new(a, a, a, 1.0)
            }
        };
        store_half4(F32x4::splat(0.0).max(rgba.min(upper)), px);
    }
}
