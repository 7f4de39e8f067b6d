//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The config file exists but could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for [`super::AppConfig`].
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A timezone identifier is not in the IANA database.
    #[error("unknown timezone '{0}': {1}")]
    InvalidTimezone(String, String),

    /// A field holds a value outside its allowed range.
    #[error("invalid configuration: {0}")]
    InvalidValue(String),
}

impl ConfigError {
    /// Returns true if the error is about the config file itself.
    #[must_use]
    pub fn is_file_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::Read { .. } | Self::Parse { .. }
        )
    }

    /// Returns true if the error comes from validating field values.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::InvalidTimezone(..) | Self::InvalidValue(_))
    }
}
