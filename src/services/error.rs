//! External service error types.

use thiserror::Error;

/// Errors from the weather and quote services.
///
/// These never reach the user; callers log them and substitute fallback
/// values.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Network access is turned off in the configuration.
    #[error("external services are disabled")]
    Disabled,

    /// The quote API key variable is unset or empty.
    #[error("missing API key: {0}")]
    MissingApiKey(String),

    /// The HTTP request failed before a response arrived.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("{service} returned HTTP {status}")]
    Status { service: &'static str, status: u16 },

    /// The response body does not have the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ServiceError {
    /// Returns true if the service could not be reached or answered badly.
    #[must_use]
    pub fn is_remote_error(&self) -> bool {
        matches!(
            self,
            Self::Request(_) | Self::Status { .. } | Self::InvalidResponse(_)
        )
    }

    /// Returns true if the call was never attempted because of local setup.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::Disabled | Self::MissingApiKey(_))
    }
}
