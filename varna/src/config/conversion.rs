//! Main ConversionConfig and conversion methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::backend::{self, BackendKind};
use crate::error::{Error, Result};
use crate::pixel::PixelInfo;

use super::defaults;
use super::format::{FormatSection, ImageSection};

/// A pixel conversion job loaded from YAML
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Image dimensions
    #[serde(default)]
    pub image: ImageSection,

    /// Source pixel format
    #[serde(default = "defaults::source")]
    pub source: FormatSection,

    /// Destination pixel format
    #[serde(default = "defaults::destination")]
    pub destination: FormatSection,

    /// Backend the job was tuned for; a mismatch is logged, not rejected
    #[serde(default)]
    pub expected_backend: Option<BackendKind>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            image: ImageSection::default(),
            source: defaults::source(),
            destination: defaults::destination(),
            expected_backend: None,
        }
    }
}

impl ConversionConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        log::info!("[Varna] loading conversion config from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/varna.yaml)
    pub fn load_default() -> Result<Self> {
        let path = Path::new("configs/varna.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!("[Varna] {} not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Serialize to a YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Source image description
    pub fn source_info(&self) -> PixelInfo {
        PixelInfo::new(
            self.image.width,
            self.image.height,
            self.source.color_type,
            self.source.alpha_type,
        )
    }

    /// Destination image description
    pub fn destination_info(&self) -> PixelInfo {
        PixelInfo::new(
            self.image.width,
            self.image.height,
            self.destination.color_type,
            self.destination.alpha_type,
        )
    }

    /// Source row stride in bytes
    pub fn source_row_bytes(&self) -> Result<usize> {
        self.padded_row_bytes(&self.source_info())
    }

    /// Destination row stride in bytes
    pub fn destination_row_bytes(&self) -> Result<usize> {
        self.padded_row_bytes(&self.destination_info())
    }

    fn padded_row_bytes(&self, info: &PixelInfo) -> Result<usize> {
        info.min_row_bytes()
            .and_then(|packed| packed.checked_add(self.image.row_padding))
            .ok_or(Error::InvalidDimensions {
                width: info.width,
                height: info.height,
            })
    }

    /// Compare `expected_backend` with the compiled one, warning on mismatch.
    ///
    /// Returns true when no backend is expected or it matches.
    pub fn check_backend(&self) -> bool {
        match self.expected_backend {
            Some(expected) if expected != backend::active() => {
                log::warn!(
                    "[Varna] config expects {} backend, build uses {}",
                    expected,
                    backend::active()
                );
                false
            }
            _ => true,
        }
    }
}
