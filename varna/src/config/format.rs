//! Image and pixel format configuration sections.

use serde::{Deserialize, Serialize};

use crate::pixel::{AlphaType, ColorType};

use super::defaults;

/// Image dimensions section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageSection {
    /// Width in pixels
    #[serde(default = "defaults::width")]
    pub width: usize,

    /// Height in pixels
    #[serde(default = "defaults::height")]
    pub height: usize,

    /// Extra bytes after every row of both buffers (0 = tightly packed)
    #[serde(default)]
    pub row_padding: usize,
}

impl Default for ImageSection {
    fn default() -> Self {
        Self {
            width: defaults::width(),
            height: defaults::height(),
            row_padding: 0,
        }
    }
}

/// Pixel format of one side of a conversion
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatSection {
    /// Per-pixel layout
    #[serde(default = "defaults::color_type")]
    pub color_type: ColorType,

    /// Alpha interpretation
    #[serde(default)]
    pub alpha_type: AlphaType,
}

impl Default for FormatSection {
    fn default() -> Self {
        defaults::source()
    }
}
