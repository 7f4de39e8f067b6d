//! Ambient sound for clockdeck.
//!
//! A soft drone of four detuned sine oscillators that fades in when enabled
//! and fades out when disabled.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │    AmbientSound     │ ← lifecycle: create lazily, suspend, resume, dispose
//! └──────────┬──────────┘
//!            │ AmbientBackend
//!            ▼
//! ┌─────────────────────┐  crossbeam  ┌──────────────────┐
//! │ RodioAmbientBackend │────────────▶│   audio thread   │
//! └─────────────────────┘             │  (OutputStream)  │
//!                                     └──────────────────┘
//! ```

mod error;
mod player;
pub mod synth;

pub use error::SoundError;
pub use player::RodioAmbientBackend;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

/// Audio graph driven by [`AmbientSound`].
pub trait AmbientBackend: Send {
    /// Opens the output device. Called once, on first enable.
    fn create(&mut self) -> Result<(), SoundError>;

    /// Starts the drone with its fade-in.
    fn start(&mut self) -> Result<(), SoundError>;

    /// Fades the drone out and suspends output.
    fn stop(&mut self);

    /// Releases the device.
    fn dispose(&mut self);
}

/// Lifecycle of an [`AmbientSound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmbientState {
    /// No audio graph yet
    Uninitialized,
    Playing,
    /// Graph kept alive but silent
    Suspended,
    /// The backend failed; ambient sound is off for the session
    Unavailable,
    Disposed,
}

/// Ambient drone toggled by the dashboard.
pub struct AmbientSound {
    backend: Box<dyn AmbientBackend>,
    state: AmbientState,
}

impl AmbientSound {
    pub fn new(backend: Box<dyn AmbientBackend>) -> Self {
        Self {
            backend,
            state: AmbientState::Uninitialized,
        }
    }

    /// Ambient sound played through the default audio device.
    pub fn rodio() -> Self {
        Self::new(Box::new(RodioAmbientBackend::new()))
    }

    pub fn state(&self) -> AmbientState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == AmbientState::Playing
    }

    /// Turns the drone on or off and returns whether it is now playing.
    ///
    /// The audio graph is created on the first enable and reused afterwards.
    /// A backend failure logs a warning and leaves the sound off.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        if enabled {
            self.enable();
        } else {
            self.disable();
        }
        self.is_playing()
    }

    fn enable(&mut self) {
        match self.state {
            AmbientState::Playing => return,
            AmbientState::Unavailable | AmbientState::Disposed => {
                debug!("Ambient sound unavailable, ignoring enable");
                return;
            }
            AmbientState::Uninitialized => {
                if let Err(e) = self.backend.create() {
                    warn!("Ambient sound disabled: {} ({})", e, e.suggestion());
                    self.state = AmbientState::Unavailable;
                    return;
                }
                info!("Ambient sound initialized");
            }
            AmbientState::Suspended => {}
        }

        match self.backend.start() {
            Ok(()) => self.state = AmbientState::Playing,
            Err(e) => {
                warn!("Ambient sound disabled: {}", e);
                self.backend.dispose();
                self.state = AmbientState::Unavailable;
            }
        }
    }

    fn disable(&mut self) {
        if self.state == AmbientState::Playing {
            self.backend.stop();
            self.state = AmbientState::Suspended;
        }
    }

    /// Shuts the audio graph down. Further enables are ignored.
    pub fn dispose(&mut self) {
        if matches!(
            self.state,
            AmbientState::Playing | AmbientState::Suspended
        ) {
            self.backend.dispose();
        }
        self.state = AmbientState::Disposed;
    }
}

impl Drop for AmbientSound {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for AmbientSound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AmbientSound")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Mock Implementation (for testing)
// ============================================================================

/// Backend that records calls. Clones share their counters.
#[derive(Debug, Clone, Default)]
pub struct MockAmbientBackend {
    creates: Arc<AtomicUsize>,
    starts: Arc<AtomicUsize>,
    stops: Arc<AtomicUsize>,
    disposes: Arc<AtomicUsize>,
    fail_create: Arc<AtomicBool>,
    fail_start: Arc<AtomicBool>,
}

impl MockAmbientBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_start(&self, fail: bool) {
        self.fail_start.store(fail, Ordering::SeqCst);
    }

    pub fn create_count(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn start_count(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    pub fn stop_count(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }

    pub fn dispose_count(&self) -> usize {
        self.disposes.load(Ordering::SeqCst)
    }
}

impl AmbientBackend for MockAmbientBackend {
    fn create(&mut self) -> Result<(), SoundError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(SoundError::DeviceNotAvailable("mock".into()));
        }
        Ok(())
    }

    fn start(&mut self) -> Result<(), SoundError> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        if self.fail_start.load(Ordering::SeqCst) {
            return Err(SoundError::StreamError("mock".into()));
        }
        Ok(())
    }

    fn stop(&mut self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
    }

    fn dispose(&mut self) {
        self.disposes.fetch_add(1, Ordering::SeqCst);
    }
}

// ============================================================================
// Tests
// ============================================================================
