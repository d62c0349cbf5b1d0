//! Configuration loading for Varna pixel conversion jobs.
//!
//! Loads a whole job description from a single YAML file.

mod conversion;
mod defaults;
mod format;

pub use conversion::ConversionConfig;
pub use format::{FormatSection, ImageSection};
