//! Ambient drone backend using rodio.
//!
//! rodio's `OutputStream` is not `Send`, so the stream lives on a dedicated
//! audio thread. The backend talks to it over a crossbeam channel.

use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender};
use rodio::source::SineWave;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};
use tracing::{debug, warn};

use super::error::SoundError;
use super::synth::{detuned_frequencies, FadeOut, FADE_IN, GAIN, SAMPLE_RATE};
use super::AmbientBackend;

/// How long `create` waits for the audio thread to open the device.
const STARTUP_TIMEOUT: Duration = Duration::from_secs(3);
/// Volume update period during a fade-out.
const FADE_STEP: Duration = Duration::from_millis(20);
/// Poll period while idle.
const IDLE_WAIT: Duration = Duration::from_millis(500);

#[derive(Debug)]
enum AudioCommand {
    Play,
    Stop,
    Shutdown,
}

/// Backend that synthesises the drone on a dedicated audio thread.
#[derive(Debug, Default)]
pub struct RodioAmbientBackend {
    commands: Option<Sender<AudioCommand>>,
    thread: Option<JoinHandle<()>>,
}

impl RodioAmbientBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn send(&self, command: AudioCommand) -> Result<(), SoundError> {
        let commands = self
            .commands
            .as_ref()
            .ok_or_else(|| SoundError::ThreadError("audio thread not started".into()))?;
        commands
            .send(command)
            .map_err(|_| SoundError::ThreadError("audio thread has exited".into()))
    }
}

impl AmbientBackend for RodioAmbientBackend {
    fn create(&mut self) -> Result<(), SoundError> {
        if self.commands.is_some() {
            return Ok(());
        }

        let (command_tx, command_rx) = unbounded();
        let (ready_tx, ready_rx) = bounded(1);

        let handle = std::thread::Builder::new()
            .name("clockdeck-audio".into())
            .spawn(move || audio_thread(command_rx, ready_tx))
            .map_err(|e| SoundError::ThreadError(e.to_string()))?;

        match ready_rx.recv_timeout(STARTUP_TIMEOUT) {
            Ok(Ok(())) => {
                debug!("Audio thread started");
                self.commands = Some(command_tx);
                self.thread = Some(handle);
                Ok(())
            }
            Ok(Err(e)) => {
                let _ = handle.join();
                Err(e)
            }
            Err(_) => Err(SoundError::ThreadError(
                "audio thread did not start in time".into(),
            )),
        }
    }

    fn start(&mut self) -> Result<(), SoundError> {
        self.send(AudioCommand::Play)
    }

    fn stop(&mut self) {
        if let Err(e) = self.send(AudioCommand::Stop) {
            debug!("Ignoring stop: {}", e);
        }
    }

    fn dispose(&mut self) {
        if self.commands.is_some() {
            let _ = self.send(AudioCommand::Shutdown);
        }
        self.commands = None;
        if let Some(handle) = self.thread.take() {
            if handle.join().is_err() {
                warn!("Audio thread panicked");
            }
        }
    }
}

impl Drop for RodioAmbientBackend {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Builds a sink playing the four detuned oscillators with the fade-in.
fn build_drone(handle: &OutputStreamHandle) -> Result<Sink, SoundError> {
    let sink = Sink::try_new(handle).map_err(|e| SoundError::StreamError(e.to_string()))?;

    let (controller, mixer) = rodio::dynamic_mixer::mixer::<f32>(1, SAMPLE_RATE);
    for frequency in detuned_frequencies(&mut rand::thread_rng()) {
        controller.add(SineWave::new(frequency));
    }

    sink.append(mixer.amplify(GAIN).fade_in(FADE_IN));
    sink.play();
    Ok(sink)
}

fn audio_thread(commands: Receiver<AudioCommand>, ready: Sender<Result<(), SoundError>>) {
    // Keep the stream alive for the lifetime of the thread.
    let (_stream, handle) = match OutputStream::try_default() {
        Ok(pair) => pair,
        Err(e) => {
            let _ = ready.send(Err(SoundError::DeviceNotAvailable(e.to_string())));
            return;
        }
    };
    let _ = ready.send(Ok(()));

    let mut sink: Option<Sink> = None;
    let mut fading: Option<(FadeOut, Instant)> = None;

    loop {
        let wait = if fading.is_some() { FADE_STEP } else { IDLE_WAIT };
        match commands.recv_timeout(wait) {
            Ok(AudioCommand::Play) => {
                if let Some(old) = sink.take() {
                    old.stop();
                }
                fading = None;
                match build_drone(&handle) {
                    Ok(new_sink) => {
                        debug!("Ambient drone playing");
                        sink = Some(new_sink);
                    }
                    Err(e) => warn!("Failed to start ambient drone: {}", e),
                }
            }
            Ok(AudioCommand::Stop) => {
                if let Some(active) = &sink {
                    fading = Some((FadeOut::new(active.volume()), Instant::now()));
                }
            }
            Ok(AudioCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }

        if let (Some((fade, started)), Some(active)) = (fading, &sink) {
            let elapsed = started.elapsed();
            active.set_volume(fade.volume_at(elapsed));
            if fade.is_done(elapsed) {
                active.stop();
                sink = None;
                fading = None;
                debug!("Ambient drone suspended");
            }
        }
    }

    if let Some(active) = sink {
        active.stop();
    }
    debug!("Audio thread exiting");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_before_create_fail() {
        let mut backend = RodioAmbientBackend::new();
        assert!(backend.start().is_err());
        // stop and dispose without a thread are no-ops
        backend.stop();
        backend.dispose();
    }

    #[test]
    fn test_create_without_device_is_graceful() {
        // May fail in a container without audio; either way no panic
        let mut backend = RodioAmbientBackend::new();
        if backend.create().is_ok() {
            assert!(backend.start().is_ok());
            backend.stop();
        }
        backend.dispose();
    }
}
