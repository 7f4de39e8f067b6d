//! Ambient sound error types.

use thiserror::Error;

/// Errors from the ambient sound backend.
///
/// Any of these disables ambient sound for the session; the dashboard keeps
/// running.
#[derive(Debug, Error)]
pub enum SoundError {
    /// No audio output device is available.
    #[error("audio device not available: {0}")]
    DeviceNotAvailable(String),

    /// The output stream or sink could not be created.
    #[error("failed to create audio stream: {0}")]
    StreamError(String),

    /// The audio thread did not start or has exited.
    #[error("audio thread unavailable: {0}")]
    ThreadError(String),
}

impl SoundError {
    /// Returns true if this error is related to the audio hardware.
    #[must_use]
    pub fn is_device_error(&self) -> bool {
        matches!(self, Self::DeviceNotAvailable(_) | Self::StreamError(_))
    }

    /// Returns a short hint for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::DeviceNotAvailable(_) => "connect an audio output device",
            Self::StreamError(_) => "check the system audio settings",
            Self::ThreadError(_) => "restart clockdeck",
        }
    }
}
