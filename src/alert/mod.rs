//! Countdown completion alerts.
//!
//! The countdown engine notifies an [`AlertSink`] exactly once each time a
//! countdown reaches zero. How the alert is delivered is up to the sink.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tracing::{debug, warn};

/// Pulse/pause/pulse pattern in milliseconds.
pub const ALERT_PATTERN_MS: [u64; 3] = [200, 100, 200];

/// Receives countdown completion signals.
pub trait AlertSink: Send + Sync {
    /// Called when a countdown reaches zero.
    fn countdown_finished(&self);
}

/// Rings the terminal bell following [`ALERT_PATTERN_MS`].
///
/// The pattern plays on a short-lived thread so the caller never blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell;

impl TerminalBell {
    pub fn new() -> Self {
        Self
    }

    fn ring() {
        let mut stderr = std::io::stderr();
        if let Err(e) = stderr.write_all(b"\x07").and_then(|()| stderr.flush()) {
            warn!("Failed to ring terminal bell: {}", e);
        }
    }
}

impl AlertSink for TerminalBell {
    fn countdown_finished(&self) {
        debug!("Countdown finished, ringing bell");
        std::thread::spawn(|| {
            // Even indices are pulses, odd indices are pauses
            for (i, ms) in ALERT_PATTERN_MS.iter().enumerate() {
                if i % 2 == 0 {
                    Self::ring();
                }
                std::thread::sleep(Duration::from_millis(*ms));
            }
        });
    }
}

/// Does nothing. Used when alerts are disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAlert;

impl AlertSink for SilentAlert {
    fn countdown_finished(&self) {}
}

/// Mock alert sink for testing.
#[derive(Debug, Default)]
pub struct MockAlertSink {
    count: AtomicUsize,
}

impl MockAlertSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of completion signals received.
    #[must_use]
    pub fn alert_count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl AlertSink for MockAlertSink {
    fn countdown_finished(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}
