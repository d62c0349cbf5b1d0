//! Default value functions for serde deserialization.

use crate::pixel::{AlphaType, ColorType};

use super::format::FormatSection;

pub fn width() -> usize {
    64
}

pub fn height() -> usize {
    64
}

pub fn source() -> FormatSection {
    FormatSection {
        color_type: ColorType::Rgba8888,
        alpha_type: AlphaType::Premul,
    }
}

pub fn destination() -> FormatSection {
    FormatSection {
        color_type: ColorType::RgbaF16,
        alpha_type: AlphaType::Premul,
    }
}

pub fn color_type() -> ColorType {
    ColorType::Rgba8888
}
