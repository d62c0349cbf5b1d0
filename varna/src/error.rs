//! Error types for Varna
//!
//! Vector operations never fail at runtime. Errors only come from the
//! slice-checked memory helpers, the pixel layer and configuration loading.

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Varna error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Buffer holds fewer elements than the operation reads or writes
    #[error("Buffer too short: need {needed} elements, got {actual}")]
    BufferTooShort {
        /// Elements required
        needed: usize,
        /// Elements available
        actual: usize,
    },

    /// Image dimensions that cannot describe a pixel buffer
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width in pixels
        width: usize,
        /// Height in pixels
        height: usize,
    },

    /// Row stride smaller than one packed row
    #[error("Row bytes {row_bytes} smaller than packed row of {min} bytes")]
    RowBytesTooSmall {
        /// Requested stride
        row_bytes: usize,
        /// Minimum stride for the width and color type
        min: usize,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration parse error
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::Parse(e.to_string())
    }
}

impl Error {
    /// Check `actual >= needed`, producing [`Error::BufferTooShort`] otherwise.
    #[inline]
    pub(crate) fn check_len(needed: usize, actual: usize) -> Result<()> {
        if actual < needed {
            Err(Error::BufferTooShort { needed, actual })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_len() {
        assert!(Error::check_len(4, 4).is_ok());
        assert!(Error::check_len(4, 8).is_ok());
        match Error::check_len(16, 3) {
            Err(Error::BufferTooShort { needed, actual }) => {
                assert_eq!(needed, 16);
                assert_eq!(actual, 3);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_display() {
        let err = Error::BufferTooShort {
            needed: 8,
            actual: 2,
        };
        assert_eq!(err.to_string(), "Buffer too short: need 8 elements, got 2");
    }
}
